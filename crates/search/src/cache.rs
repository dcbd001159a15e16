use std::any::{Any, TypeId};
use std::sync::Arc;

use once_cell::sync::OnceCell;
use parking_lot::Mutex;
use rustc_hash::FxHashMap;

use crate::QueryKey;

type Entry = Arc<dyn Any + Send + Sync>;

/// Memoized search results keyed by [`QueryKey`].
///
/// Every key owns a once-cell per value type. The map lock is held only to
/// fetch or insert that cell, so computations for different keys run in
/// parallel while callers of the same key block on the one computation and
/// share its result.
///
/// A failed computation leaves its cell empty; the next caller retries.
/// Entries are never evicted.
#[derive(Default)]
pub struct QueryCache {
	cells: Mutex<FxHashMap<(QueryKey, TypeId), Arc<OnceCell<Entry>>>>,
}

impl QueryCache {
	pub fn new() -> Self {
		Self::default()
	}

	/// Returns the cached value for `key`, computing it first if needed.
	pub fn get_or_try_compute<T, E, F>(&self, key: QueryKey, compute: F) -> Result<Arc<T>, E>
	where
		T: Send + Sync + 'static,
		F: FnOnce() -> Result<T, E>,
	{
		let cell = Arc::clone(self.cells.lock().entry((key, TypeId::of::<T>())).or_default());
		let entry = cell.get_or_try_init(|| compute().map(|value| Arc::new(value) as Entry))?;
		// The cell is keyed by `T`'s TypeId, so it only ever holds a `T`.
		Ok(Arc::clone(entry)
			.downcast::<T>()
			.unwrap_or_else(|_| unreachable!("query cache cell for {key} keyed by another type")))
	}

	/// Returns true once `key` holds a computed value.
	pub fn is_cached(&self, key: &QueryKey) -> bool {
		self.cells
			.lock()
			.iter()
			.any(|((cached, _), cell)| cached == key && cell.get().is_some())
	}

	/// Number of cells with a computed value.
	pub fn len(&self) -> usize {
		self.cells.lock().values().filter(|cell| cell.get().is_some()).count()
	}

	pub fn is_empty(&self) -> bool {
		self.len() == 0
	}
}
