use std::fmt;
use std::mem::ManuallyDrop;
use std::path::{Path, PathBuf};

use libloading::Library;
use tagscan_types::{TypeDef, linked_types};

/// Where a module's types come from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ModuleOrigin {
	/// The running executable's own registration table.
	Linked,
	/// A module file loaded at runtime.
	Loaded,
	/// Types registered at runtime with no backing file. Never scanned.
	Dynamic,
}

/// A registered module and the types it defines.
pub struct ModuleHandle {
	name: String,
	path: Option<PathBuf>,
	origin: ModuleOrigin,
	types: Vec<&'static TypeDef>,
	/// Never unloaded: `types` point into the mapped image.
	_library: Option<ManuallyDrop<Library>>,
}

impl ModuleHandle {
	/// The executable's linked module, holding every type registered in this
	/// binary.
	pub fn linked() -> Self {
		let path = std::env::current_exe().and_then(|exe| exe.canonicalize()).ok();
		let name = path
			.as_deref()
			.and_then(Path::file_stem)
			.map_or_else(|| "linked".to_string(), |stem| stem.to_string_lossy().into_owned());
		Self {
			name,
			path,
			origin: ModuleOrigin::Linked,
			types: linked_types().collect(),
			_library: None,
		}
	}

	/// A module loaded from `path`. Used by [`ModuleOpener`](crate::ModuleOpener)
	/// implementations that keep their types alive by other means.
	pub fn from_file(name: impl Into<String>, path: PathBuf, types: Vec<&'static TypeDef>) -> Self {
		Self {
			name: name.into(),
			path: Some(path),
			origin: ModuleOrigin::Loaded,
			types,
			_library: None,
		}
	}

	pub(crate) fn from_library(name: impl Into<String>, path: PathBuf, types: Vec<&'static TypeDef>, library: Library) -> Self {
		Self {
			_library: Some(ManuallyDrop::new(library)),
			..Self::from_file(name, path, types)
		}
	}

	/// Types registered at runtime without a module file.
	pub fn dynamic(name: impl Into<String>, types: Vec<&'static TypeDef>) -> Self {
		Self {
			name: name.into(),
			path: None,
			origin: ModuleOrigin::Dynamic,
			types,
			_library: None,
		}
	}

	pub fn name(&self) -> &str {
		&self.name
	}

	/// Resolved absolute path of the module file.
	pub fn path(&self) -> Option<&Path> {
		self.path.as_deref()
	}

	/// Directory containing the module file.
	pub fn directory(&self) -> Option<&Path> {
		self.path()?.parent()
	}

	pub fn origin(&self) -> ModuleOrigin {
		self.origin
	}

	pub fn is_dynamic(&self) -> bool {
		self.origin == ModuleOrigin::Dynamic
	}

	pub fn types(&self) -> &[&'static TypeDef] {
		&self.types
	}
}

impl fmt::Debug for ModuleHandle {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("ModuleHandle")
			.field("name", &self.name)
			.field("path", &self.path)
			.field("origin", &self.origin)
			.field("types", &self.types.len())
			.finish()
	}
}
