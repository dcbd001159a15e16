use std::fmt;
use std::panic::{AssertUnwindSafe, catch_unwind};

use crate::{Annotation, Args, Capability, CapabilityDef, ConstructError, ConstructorDef, Instance, TypeKey, ViewFn};

/// Whether a registered type can be instantiated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TypeKind {
	Concrete,
	/// Declared as a base for other types; never instantiated or discovered.
	Abstract,
	/// Stands for a contract rather than an implementation; never discovered.
	Interface,
}

/// Static description of a registered type.
///
/// Instances are emitted by [`register_type!`](crate::register_type) and live
/// for the lifetime of the module that defines them.
pub struct TypeDef {
	/// Fully-qualified name (`module::path::Ident`).
	pub name: &'static str,
	/// Crate that registered the type.
	pub crate_name: &'static str,
	pub kind: TypeKind,
	pub ty: fn() -> TypeKey,
	/// Identity view: wraps an instance of this type as `Box<Self>`.
	pub view_self: ViewFn,
	pub capabilities: &'static [CapabilityDef],
	/// Annotations declared directly on the type, in declaration order.
	pub annotations: &'static [&'static dyn Annotation],
	pub constructors: &'static [ConstructorDef],
}

impl TypeDef {
	#[inline]
	pub fn type_key(&self) -> TypeKey {
		(self.ty)()
	}

	#[inline]
	pub fn is_concrete(&self) -> bool {
		self.kind == TypeKind::Concrete
	}

	/// Returns true if the type is `capability` itself, implements it or
	/// extends it.
	///
	/// `Extends` entries are followed through the whole base chain, so a type
	/// also satisfies every capability of its bases.
	pub fn satisfies(&self, capability: &Capability) -> bool {
		self.type_key() == *capability || self.inherited_capabilities().any(|def| def.capability() == *capability)
	}

	/// Capabilities declared on this type and, transitively, on its bases.
	///
	/// Each base is visited once, so a cyclic `extends` declaration ends the
	/// walk instead of looping.
	pub fn inherited_capabilities(&self) -> impl Iterator<Item = &'static CapabilityDef> {
		let own: &'static [CapabilityDef] = self.capabilities;
		let mut seen = vec![self.type_key()];
		let mut pending: Vec<&'static CapabilityDef> = own.iter().rev().collect();
		std::iter::from_fn(move || {
			let def = pending.pop()?;
			if let Some(base) = def.base()
				&& !seen.contains(&base.type_key())
			{
				seen.push(base.type_key());
				pending.extend(base.capabilities.iter().rev());
			}
			Some(def)
		})
	}

	/// Annotations of type `A` declared directly on this type, in declaration
	/// order.
	pub fn annotations_of<A: Annotation>(&self) -> impl Iterator<Item = &'static A> {
		let annotations: &'static [&'static dyn Annotation] = self.annotations;
		annotations.iter().filter_map(|annotation| (*annotation).downcast_ref::<A>())
	}

	/// First declared annotation of type `A`.
	pub fn annotation<A: Annotation>(&self) -> Option<&'static A> {
		self.annotations_of::<A>().next()
	}

	/// Constructor whose parameter list matches `args`.
	pub fn constructor_for(&self, args: &Args) -> Option<&'static ConstructorDef> {
		let constructors: &'static [ConstructorDef] = self.constructors;
		constructors.iter().find(|ctor| ctor.accepts(args))
	}

	/// Constructs a type-erased instance.
	///
	/// A panicking constructor is reported as [`ConstructError::Panicked`].
	pub fn construct(&self, args: Args) -> Result<Instance, ConstructError> {
		if !self.is_concrete() {
			return Err(ConstructError::NotConcrete { ty: self.name });
		}
		let Some(ctor) = self.constructor_for(&args) else {
			return Err(ConstructError::NoMatchingConstructor {
				ty: self.name,
				args: args.type_names(),
			});
		};
		let arg_names = args.type_names();
		match catch_unwind(AssertUnwindSafe(|| (ctor.invoke)(args))) {
			Ok(Some(instance)) => Ok(instance),
			Ok(None) => Err(ConstructError::NoMatchingConstructor {
				ty: self.name,
				args: arg_names,
			}),
			Err(_) => Err(ConstructError::Panicked { ty: self.name }),
		}
	}

	/// Views an instance of this type as `T`.
	///
	/// `T` is either the type itself or a `dyn Trait` listed under
	/// `implements`.
	pub fn view<T: ?Sized + 'static>(&self, instance: Instance) -> Result<Box<T>, ConstructError> {
		let target = TypeKey::of::<T>();
		let unsupported = || ConstructError::Unsupported {
			ty: self.name,
			view: target.name(),
		};
		let view = if target == self.type_key() {
			Some(self.view_self)
		} else {
			self.capabilities.iter().find(|def| def.capability() == target).and_then(|def| def.view)
		};
		let view = view.ok_or_else(unsupported)?;
		let viewed = view(instance).map_err(|_| unsupported())?;
		viewed.downcast::<Box<T>>().map(|boxed| *boxed).map_err(|_| unsupported())
	}

	/// Constructs an instance and views it as `T`.
	pub fn construct_as<T: ?Sized + 'static>(&self, args: Args) -> Result<Box<T>, ConstructError> {
		let instance = self.construct(args)?;
		self.view::<T>(instance)
	}
}

impl fmt::Debug for TypeDef {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("TypeDef")
			.field("name", &self.name)
			.field("crate_name", &self.crate_name)
			.field("kind", &self.kind)
			.field("capabilities", &self.capabilities)
			.field("annotations", &self.annotations)
			.field("constructors", &self.constructors)
			.finish()
	}
}

/// Wrapper for `inventory::collect!`.
pub struct TypeReg(pub &'static TypeDef);

inventory::collect!(TypeReg);

/// Types registered in the current binary (or, inside a loadable module, in
/// that module), in link order.
pub fn linked_types() -> impl Iterator<Item = &'static TypeDef> {
	inventory::iter::<TypeReg>.into_iter().map(|reg| reg.0)
}
