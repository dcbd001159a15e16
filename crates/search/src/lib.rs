//! Attributed-type search.
//!
//! [`AttributedTypeSearch::find_all`] returns every concrete type in the
//! registered modules that carries a given annotation and, optionally,
//! satisfies a capability. Results are memoized per [`QueryKey`] in a
//! [`QueryCache`]: each key is computed at most once, even when many threads
//! ask for it at the same time.
//!
//! ```ignore
//! let registry = Arc::new(ModuleRegistry::with_linked());
//! let search = AttributedTypeSearch::new(registry);
//! let jedi = search.find_all::<Jedi>(SearchRoot::CurrentExe, Some(Capability::of::<dyn JediKnight>()), true)?;
//! for found in jedi.iter() {
//!     let knight = found.construct_instance::<dyn JediKnight>(Args::new())?;
//! }
//! ```

mod cache;
mod error;
mod key;
mod matches;
mod search;

pub use cache::QueryCache;
pub use error::SearchError;
pub use key::QueryKey;
pub use matches::{AnnotationMatch, Matches};
pub use search::{AttributedTypeSearch, SearchRoot};
