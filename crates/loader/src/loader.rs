use std::path::{Path, PathBuf};
use std::sync::Arc;

use ignore::WalkBuilder;
use tracing::{debug, info, trace};

use crate::registry::path_key;
use crate::{DylibOpener, LoadError, ModuleHandle, ModuleRegistry};

/// Turns a module file into a [`ModuleHandle`].
pub trait ModuleOpener: Send + Sync {
	fn open(&self, path: &Path) -> Result<ModuleHandle, LoadError>;
}

/// Loads every not-yet-loaded module under a directory.
pub trait LibraryScanner: Send + Sync {
	/// Returns the modules newly loaded by this call.
	fn load_all(&self, root: &Path) -> Result<Vec<Arc<ModuleHandle>>, LoadError>;
}

/// Eagerly loads module files into a [`ModuleRegistry`].
///
/// Files are matched by extension (case-insensitive, platform shared-library
/// extension by default) and skipped when a module with the same resolved
/// path is already registered. Loading stops at the first file that fails to
/// open; modules loaded before it stay registered.
pub struct ModuleLoader {
	registry: Arc<ModuleRegistry>,
	opener: Arc<dyn ModuleOpener>,
	extension: String,
}

impl ModuleLoader {
	pub fn new(registry: Arc<ModuleRegistry>) -> Self {
		Self {
			registry,
			opener: Arc::new(DylibOpener),
			extension: std::env::consts::DLL_EXTENSION.to_string(),
		}
	}

	/// Sets the module file extension, with or without the leading dot.
	pub fn with_extension(mut self, extension: impl AsRef<str>) -> Self {
		self.extension = extension.as_ref().trim_start_matches('.').to_string();
		self
	}

	pub fn with_opener(mut self, opener: Arc<dyn ModuleOpener>) -> Self {
		self.opener = opener;
		self
	}

	pub fn registry(&self) -> &Arc<ModuleRegistry> {
		&self.registry
	}

	pub fn extension(&self) -> &str {
		&self.extension
	}

	/// Loads every module file directly under `root`, or anywhere below it
	/// when `recursive` is set.
	pub fn load_all(&self, root: &Path, recursive: bool) -> Result<Vec<Arc<ModuleHandle>>, LoadError> {
		let candidates = self.candidates(root, recursive)?;
		debug!(root = %root.display(), recursive, candidates = candidates.len(), "modules.scan");
		self.load_files(candidates)
	}

	/// Loads the modules next to `module`'s file.
	pub fn load_near(&self, module: &ModuleHandle, recursive: bool) -> Result<Vec<Arc<ModuleHandle>>, LoadError> {
		let Some(root) = module.directory() else {
			return Err(LoadError::NoDirectory {
				module: module.name().to_string(),
			});
		};
		self.load_all(root, recursive)
	}

	/// Loads an explicit list of module files.
	///
	/// Files with another extension, missing files, duplicates and files
	/// already registered are skipped.
	pub fn load_files<I, P>(&self, files: I) -> Result<Vec<Arc<ModuleHandle>>, LoadError>
	where
		I: IntoIterator<Item = P>,
		P: AsRef<Path>,
	{
		let mut known = self.registry.loaded_paths();
		let mut loaded = Vec::new();

		for file in files {
			let file = file.as_ref();
			if !self.matches_extension(file) || !file.is_file() {
				trace!(path = %file.display(), "modules.skip.candidate");
				continue;
			}
			let path = file.canonicalize().map_err(|source| LoadError::Resolve {
				path: file.to_path_buf(),
				source,
			})?;
			if !known.insert(path_key(&path)) {
				trace!(path = %path.display(), "modules.skip.loaded");
				continue;
			}

			let module = self.opener.open(&path)?;
			match self.registry.register(module) {
				Some(module) => {
					debug!(name = module.name(), path = %path.display(), types = module.types().len(), "modules.load");
					loaded.push(module);
				}
				None => trace!(path = %path.display(), "modules.skip.concurrent"),
			}
		}

		if !loaded.is_empty() {
			info!(count = loaded.len(), "modules.loaded");
		}
		Ok(loaded)
	}

	fn matches_extension(&self, path: &Path) -> bool {
		path.extension()
			.and_then(|ext| ext.to_str())
			.is_some_and(|ext| ext.eq_ignore_ascii_case(&self.extension))
	}

	fn candidates(&self, root: &Path, recursive: bool) -> Result<Vec<PathBuf>, LoadError> {
		let mut walker = WalkBuilder::new(root);
		walker
			.standard_filters(false)
			.follow_links(true)
			.max_depth(if recursive { None } else { Some(1) })
			.sort_by_file_name(|a, b| a.cmp(b));

		let mut files = Vec::new();
		for entry in walker.build() {
			let entry = entry.map_err(|source| LoadError::Walk {
				root: root.to_path_buf(),
				source,
			})?;
			if entry.file_type().is_some_and(|ty| ty.is_file()) && self.matches_extension(entry.path()) {
				files.push(entry.into_path());
			}
		}
		Ok(files)
	}
}

impl LibraryScanner for ModuleLoader {
	fn load_all(&self, root: &Path) -> Result<Vec<Arc<ModuleHandle>>, LoadError> {
		ModuleLoader::load_all(self, root, false)
	}
}
