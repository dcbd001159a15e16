use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use tagscan_loader::{LibraryScanner, ModuleHandle, ModuleLoader, ModuleRegistry};
use tagscan_types::{Annotation, Capability};
use tracing::{debug, trace};

use crate::{AnnotationMatch, Matches, QueryCache, QueryKey, SearchError};

/// Where sibling modules are loaded from when a search forces loading.
#[derive(Debug, Clone)]
pub enum SearchRoot {
	Directory(PathBuf),
	/// The directory containing this module's file.
	Module(Arc<ModuleHandle>),
	/// The directory containing the running executable.
	CurrentExe,
}

impl SearchRoot {
	/// Resolves the directory to load modules from.
	pub fn directory(&self) -> Result<PathBuf, SearchError> {
		match self {
			Self::Directory(dir) => Ok(dir.clone()),
			Self::Module(module) => module
				.directory()
				.map(Path::to_path_buf)
				.ok_or_else(|| SearchError::NoModuleDirectory {
					module: module.name().to_string(),
				}),
			Self::CurrentExe => {
				let exe = std::env::current_exe().map_err(SearchError::CurrentExe)?;
				executable_directory(&exe)
			}
		}
	}
}

fn executable_directory(exe: &Path) -> Result<PathBuf, SearchError> {
	match exe.parent() {
		Some(dir) if !dir.as_os_str().is_empty() => Ok(dir.to_path_buf()),
		_ => Err(SearchError::NoModuleDirectory {
			module: exe.display().to_string(),
		}),
	}
}

impl From<PathBuf> for SearchRoot {
	fn from(dir: PathBuf) -> Self {
		Self::Directory(dir)
	}
}

impl From<&Path> for SearchRoot {
	fn from(dir: &Path) -> Self {
		Self::Directory(dir.to_path_buf())
	}
}

impl From<Arc<ModuleHandle>> for SearchRoot {
	fn from(module: Arc<ModuleHandle>) -> Self {
		Self::Module(module)
	}
}

impl From<&Arc<ModuleHandle>> for SearchRoot {
	fn from(module: &Arc<ModuleHandle>) -> Self {
		Self::Module(Arc::clone(module))
	}
}

/// Finds annotated types across the modules of a [`ModuleRegistry`].
///
/// Owns its [`QueryCache`]; create one per registry and share it by
/// reference.
pub struct AttributedTypeSearch {
	registry: Arc<ModuleRegistry>,
	scanner: Arc<dyn LibraryScanner>,
	cache: QueryCache,
	scans: AtomicUsize,
}

impl AttributedTypeSearch {
	/// Creates a search that loads sibling modules with a default
	/// [`ModuleLoader`] over the same registry.
	pub fn new(registry: Arc<ModuleRegistry>) -> Self {
		let scanner = Arc::new(ModuleLoader::new(Arc::clone(&registry)));
		Self::with_scanner(registry, scanner)
	}

	pub fn with_scanner(registry: Arc<ModuleRegistry>, scanner: Arc<dyn LibraryScanner>) -> Self {
		Self {
			registry,
			scanner,
			cache: QueryCache::new(),
			scans: AtomicUsize::new(0),
		}
	}

	pub fn registry(&self) -> &Arc<ModuleRegistry> {
		&self.registry
	}

	pub fn cache(&self) -> &QueryCache {
		&self.cache
	}

	/// Number of times the scan procedure has run.
	pub fn scan_count(&self) -> usize {
		self.scans.load(Ordering::SeqCst)
	}

	/// Returns every concrete type carrying an `A` annotation.
	///
	/// With a `filter`, only types that are, implement or extend that
	/// capability are kept; bases count transitively. With `force_load`,
	/// modules next to `root` are loaded before the scan. The result for each
	/// `(A, filter, force_load)` is computed once and shared; `root` is not
	/// part of the key. Failures are not cached.
	pub fn find_all<A: Annotation>(&self, root: impl Into<SearchRoot>, filter: Option<Capability>, force_load: bool) -> Result<Matches<A>, SearchError> {
		let key = QueryKey::new::<A>(filter, force_load);
		let root = root.into();
		let matches = self.cache.get_or_try_compute(key, || {
			debug!(%key, "search.compute");
			self.scan::<A>(&root, filter, force_load)
		})?;
		trace!(%key, matches = matches.len(), "search.result");
		Ok(matches)
	}

	fn scan<A: Annotation>(&self, root: &SearchRoot, filter: Option<Capability>, force_load: bool) -> Result<Vec<AnnotationMatch<A>>, SearchError> {
		self.scans.fetch_add(1, Ordering::SeqCst);

		if force_load {
			let dir = root.directory()?;
			let loaded = self.scanner.load_all(&dir)?;
			debug!(dir = %dir.display(), loaded = loaded.len(), "search.force_load");
		}

		let modules = self.registry.modules();
		let matches: Vec<_> = modules
			.iter()
			.filter(|module| !module.is_dynamic())
			.flat_map(|module| module.types().iter().copied())
			.filter(|ty| ty.is_concrete() && filter.is_none_or(|filter| ty.satisfies(&filter)))
			.filter_map(|ty| ty.annotation::<A>().map(|annotation| AnnotationMatch::new(annotation, ty)))
			.collect();

		debug!(modules = modules.len(), matches = matches.len(), "search.scan");
		Ok(matches)
	}
}

#[cfg(test)]
mod tests {
	use std::path::Path;

	use super::executable_directory;
	use crate::SearchError;

	#[test]
	fn executable_directory_is_the_parent() {
		let dir = executable_directory(Path::new("/opt/app/bin/tool")).expect("has a parent");
		assert_eq!(dir, Path::new("/opt/app/bin"));
	}

	#[test]
	fn executable_without_parent_has_no_directory() {
		for exe in ["/", "tool"] {
			let err = executable_directory(Path::new(exe)).unwrap_err();
			assert!(matches!(err, SearchError::NoModuleDirectory { .. }), "{exe}: {err}");
		}
	}
}
