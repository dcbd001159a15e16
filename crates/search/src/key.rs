use std::fmt;

use tagscan_types::{Annotation, Capability, TypeKey};

/// Identifies one cached search: annotation type, capability filter and load
/// mode.
///
/// Keys compare by [`TypeId`](std::any::TypeId), so two distinct types never
/// share a key even if their names coincide.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct QueryKey {
	annotation: TypeKey,
	filter: Option<Capability>,
	force_load: bool,
}

impl QueryKey {
	pub fn new<A: Annotation>(filter: Option<Capability>, force_load: bool) -> Self {
		Self {
			annotation: TypeKey::of::<A>(),
			filter,
			force_load,
		}
	}

	pub fn annotation(&self) -> TypeKey {
		self.annotation
	}

	pub fn filter(&self) -> Option<Capability> {
		self.filter
	}

	pub fn force_load(&self) -> bool {
		self.force_load
	}
}

impl fmt::Display for QueryKey {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "Annotation [{}] :: Filter [", self.annotation)?;
		match self.filter {
			Some(filter) => write!(f, "{filter}")?,
			None => f.write_str("none")?,
		}
		write!(f, "] :: ForceLoad [{}]", self.force_load)
	}
}
