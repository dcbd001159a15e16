use std::any::Any;
use std::fmt;

use crate::{TypeDef, TypeKey};

/// A constructed, type-erased instance of a registered type.
pub type Instance = Box<dyn Any>;

/// Converts an [`Instance`] of the registered type into a boxed view.
///
/// On success the returned instance holds a `Box<V>` for the view `V`
/// (`Box<dyn Trait>` for trait views, `Box<Self>` for the type itself). The
/// input is handed back unchanged if it is not of the registered type.
pub type ViewFn = fn(Instance) -> Result<Instance, Instance>;

/// A capability a type can be filtered by: a trait object type (`dyn Trait`)
/// for interfaces or a concrete type for bases.
pub type Capability = TypeKey;

/// How a registered type relates to one of its capabilities.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CapabilityKind {
	/// The type implements a trait and can be viewed as `dyn Trait`.
	Implements,
	/// The type declares another registered type as its base. Bases carry no
	/// view and do not pass their annotations down; their capabilities count
	/// for filtering.
	Extends,
}

/// One capability entry of a [`TypeDef`](crate::TypeDef).
pub struct CapabilityDef {
	pub capability: fn() -> Capability,
	pub kind: CapabilityKind,
	pub view: Option<ViewFn>,
	/// Descriptor of the base type, for `Extends` entries.
	pub base: Option<fn() -> &'static TypeDef>,
}

impl CapabilityDef {
	#[inline]
	pub fn capability(&self) -> Capability {
		(self.capability)()
	}

	#[inline]
	pub fn base(&self) -> Option<&'static TypeDef> {
		self.base.map(|base| base())
	}
}

impl fmt::Debug for CapabilityDef {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("CapabilityDef")
			.field("capability", &self.capability())
			.field("kind", &self.kind)
			.field("view", &self.view.is_some())
			.field("base", &self.base().map(|base| base.name))
			.finish()
	}
}
