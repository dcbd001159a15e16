use std::path::Path;

use libloading::{Library, Symbol};
use tagscan_types::{MODULE_ABI_VERSION, MODULE_ENTRY_SYMBOL, ModuleEntry};

use crate::{LoadError, ModuleHandle, ModuleOpener};

/// Opens shared libraries built with `tagscan_types::export_module!`.
///
/// Loaded libraries stay mapped for the rest of the process.
#[derive(Debug, Default, Clone, Copy)]
pub struct DylibOpener;

impl ModuleOpener for DylibOpener {
	fn open(&self, path: &Path) -> Result<ModuleHandle, LoadError> {
		// SAFETY: loading runs the library's initializers. Module files are
		// trusted like the executable that loads them.
		let library = unsafe { Library::new(path) }.map_err(|source| LoadError::Open {
			path: path.to_path_buf(),
			source,
		})?;

		let decl = {
			// SAFETY: `export_module!` defines the symbol with the `ModuleEntry`
			// signature; the ABI version below guards against stale modules.
			let entry: Symbol<ModuleEntry> = unsafe { library.get(MODULE_ENTRY_SYMBOL) }.map_err(|source| LoadError::MissingEntry {
				path: path.to_path_buf(),
				source,
			})?;
			entry()
		};

		if decl.abi_version != MODULE_ABI_VERSION {
			return Err(LoadError::IncompatibleAbi {
				path: path.to_path_buf(),
				expected: MODULE_ABI_VERSION,
				found: decl.abi_version,
			});
		}

		Ok(ModuleHandle::from_library(decl.name, path.to_path_buf(), decl.types.to_vec(), library))
	}
}
