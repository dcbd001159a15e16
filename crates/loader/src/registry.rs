use std::path::Path;
use std::sync::Arc;

use parking_lot::RwLock;
use rustc_hash::FxHashSet;
use tagscan_types::TypeDef;

use crate::ModuleHandle;

/// Append-only set of modules visible to discovery.
///
/// Modules are identified by their resolved file path, compared
/// case-insensitively; dynamic modules have no path and are always appended.
#[derive(Debug, Default)]
pub struct ModuleRegistry {
	modules: RwLock<Vec<Arc<ModuleHandle>>>,
}

impl ModuleRegistry {
	/// Creates an empty registry.
	pub fn new() -> Self {
		Self::default()
	}

	/// Creates a registry holding the executable's linked module.
	pub fn with_linked() -> Self {
		let registry = Self::new();
		registry.register(ModuleHandle::linked());
		registry
	}

	/// Snapshot of the registered modules, in registration order.
	pub fn modules(&self) -> Vec<Arc<ModuleHandle>> {
		self.modules.read().clone()
	}

	pub fn len(&self) -> usize {
		self.modules.read().len()
	}

	pub fn is_empty(&self) -> bool {
		self.modules.read().is_empty()
	}

	/// Appends a module unless one with the same path is already registered.
	///
	/// Returns the registered handle, or `None` if the path was taken.
	pub fn register(&self, module: ModuleHandle) -> Option<Arc<ModuleHandle>> {
		let mut modules = self.modules.write();
		if let Some(path) = module.path() {
			let key = path_key(path);
			if modules.iter().filter_map(|m| m.path()).any(|p| path_key(p) == key) {
				return None;
			}
		}
		let module = Arc::new(module);
		modules.push(Arc::clone(&module));
		Some(module)
	}

	/// Registers types that have no backing module file.
	pub fn register_dynamic(&self, name: impl Into<String>, types: Vec<&'static TypeDef>) -> Arc<ModuleHandle> {
		let module = Arc::new(ModuleHandle::dynamic(name, types));
		self.modules.write().push(Arc::clone(&module));
		module
	}

	/// Case-folded paths of every module loaded from a file.
	pub fn loaded_paths(&self) -> FxHashSet<String> {
		self.modules.read().iter().filter_map(|m| m.path()).map(path_key).collect()
	}

	pub fn contains_path(&self, path: &Path) -> bool {
		let key = path_key(path);
		self.modules.read().iter().filter_map(|m| m.path()).any(|p| path_key(p) == key)
	}

	pub fn find_by_name(&self, name: &str) -> Option<Arc<ModuleHandle>> {
		self.modules.read().iter().find(|m| m.name() == name).cloned()
	}
}

pub(crate) fn path_key(path: &Path) -> String {
	path.to_string_lossy().to_lowercase()
}

#[cfg(test)]
mod tests {
	use std::path::PathBuf;

	use super::ModuleRegistry;
	use crate::{ModuleHandle, ModuleOrigin};

	#[test]
	fn register_rejects_duplicate_paths_case_insensitively() {
		let registry = ModuleRegistry::new();
		let first = registry.register(ModuleHandle::from_file("models", PathBuf::from("/opt/app/Models.so"), Vec::new()));
		assert!(first.is_some());

		let second = registry.register(ModuleHandle::from_file("models", PathBuf::from("/opt/app/models.SO"), Vec::new()));
		assert!(second.is_none());
		assert_eq!(registry.len(), 1);
		assert!(registry.contains_path(&PathBuf::from("/OPT/APP/MODELS.so")));
	}

	#[test]
	fn dynamic_modules_have_no_path() {
		let registry = ModuleRegistry::new();
		registry.register_dynamic("generated", Vec::new());
		registry.register_dynamic("generated", Vec::new());

		assert_eq!(registry.len(), 2);
		assert!(registry.loaded_paths().is_empty());
		let module = registry.find_by_name("generated").expect("dynamic module registered");
		assert!(module.is_dynamic());
		assert_eq!(module.origin(), ModuleOrigin::Dynamic);
		assert!(module.directory().is_none());
	}

	#[test]
	fn with_linked_registers_the_executable() {
		let registry = ModuleRegistry::with_linked();
		let modules = registry.modules();
		assert_eq!(modules.len(), 1);
		assert_eq!(modules[0].origin(), ModuleOrigin::Linked);
		assert!(modules[0].path().is_some());
	}
}
