use std::fmt;
use std::sync::Arc;

use tagscan_types::{Annotation, Args, ConstructError, TypeDef};

/// Shared, immutable result list of one search.
pub type Matches<A> = Arc<Vec<AnnotationMatch<A>>>;

/// A discovered type together with the annotation that matched it.
pub struct AnnotationMatch<A: Annotation> {
	annotation: &'static A,
	ty: &'static TypeDef,
}

impl<A: Annotation> AnnotationMatch<A> {
	pub fn new(annotation: &'static A, ty: &'static TypeDef) -> Self {
		Self { annotation, ty }
	}

	/// The first annotation of type `A` declared on the type.
	pub fn annotation(&self) -> &'static A {
		self.annotation
	}

	pub fn type_def(&self) -> &'static TypeDef {
		self.ty
	}

	pub fn type_name(&self) -> &'static str {
		self.ty.name
	}

	/// Constructs a new instance of the matched type and views it as `T`.
	///
	/// `args` selects the constructor by argument types; an empty list selects
	/// the zero-argument constructor. `T` is the type itself or a trait object
	/// the type registered under `implements`.
	pub fn construct_instance<T: ?Sized + 'static>(&self, args: Args) -> Result<Box<T>, ConstructError> {
		self.ty.construct_as::<T>(args)
	}
}

impl<A: Annotation> Clone for AnnotationMatch<A> {
	fn clone(&self) -> Self {
		*self
	}
}

impl<A: Annotation> Copy for AnnotationMatch<A> {}

impl<A: Annotation> fmt::Debug for AnnotationMatch<A> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("AnnotationMatch")
			.field("annotation", self.annotation)
			.field("ty", &self.ty.name)
			.finish()
	}
}

impl<A: Annotation> fmt::Display for AnnotationMatch<A> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "Annotation [{:?}]; Type [{}]", self.annotation, self.ty.name)
	}
}
