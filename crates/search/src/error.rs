use std::io;

use tagscan_loader::LoadError;

/// Errors raised while computing a search.
#[derive(Debug, thiserror::Error)]
pub enum SearchError {
	#[error(transparent)]
	Load(#[from] LoadError),
	/// The reference module has no file, so it has no sibling directory.
	#[error("module `{module}` has no directory to search")]
	NoModuleDirectory { module: String },
	#[error("cannot locate the current executable: {0}")]
	CurrentExe(#[source] io::Error),
}
