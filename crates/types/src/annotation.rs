use std::any::Any;
use std::fmt::Debug;

/// A typed value attached to a registered type.
///
/// Annotations are stored in statics next to the [`TypeDef`](crate::TypeDef)
/// that declares them, so they must be constructible in a constant context and
/// shareable between threads.
pub trait Annotation: Any + Send + Sync + Debug {}

impl dyn Annotation {
	/// Returns this annotation as `A` if that is its concrete type.
	pub fn downcast_ref<A: Annotation>(&self) -> Option<&A> {
		let any: &dyn Any = self;
		any.downcast_ref::<A>()
	}

	/// Returns true if this annotation is an `A`.
	pub fn is<A: Annotation>(&self) -> bool {
		self.downcast_ref::<A>().is_some()
	}
}
