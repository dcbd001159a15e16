use std::io;
use std::path::PathBuf;

/// Errors raised while loading modules.
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
	#[error("failed to walk {}: {source}", .root.display())]
	Walk {
		root: PathBuf,
		#[source]
		source: ignore::Error,
	},
	#[error("failed to resolve {}: {source}", .path.display())]
	Resolve {
		path: PathBuf,
		#[source]
		source: io::Error,
	},
	/// The file is not a loadable shared library.
	#[error("failed to open module {}: {source}", .path.display())]
	Open {
		path: PathBuf,
		#[source]
		source: libloading::Error,
	},
	/// The library does not export `tagscan_module_entry`.
	#[error("module {} has no entry point: {source}", .path.display())]
	MissingEntry {
		path: PathBuf,
		#[source]
		source: libloading::Error,
	},
	#[error("module {} was built for ABI {found}, expected {expected}", .path.display())]
	IncompatibleAbi { path: PathBuf, expected: u32, found: u32 },
	/// Rejected by a custom [`ModuleOpener`](crate::ModuleOpener).
	#[error("invalid module {}: {reason}", .path.display())]
	Invalid { path: PathBuf, reason: String },
	#[error("module `{module}` has no file to load siblings from")]
	NoDirectory { module: String },
}
