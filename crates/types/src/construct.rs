use std::any::{Any, TypeId, type_name};
use std::collections::VecDeque;
use std::fmt;

use crate::{Instance, TypeKey};

/// Positional constructor arguments.
///
/// Arguments are matched against a constructor's parameter list by exact type,
/// in order. Build them with [`Args::with`] or the [`args!`](crate::args)
/// macro.
#[derive(Default)]
pub struct Args {
	values: VecDeque<(Box<dyn Any>, &'static str)>,
}

impl Args {
	pub fn new() -> Self {
		Self::default()
	}

	/// Appends an argument.
	pub fn with<T: Any>(mut self, value: T) -> Self {
		self.push(value);
		self
	}

	pub fn push<T: Any>(&mut self, value: T) {
		self.values.push_back((Box::new(value), type_name::<T>()));
	}

	pub fn len(&self) -> usize {
		self.values.len()
	}

	pub fn is_empty(&self) -> bool {
		self.values.is_empty()
	}

	/// Type names of the arguments, in order.
	pub fn type_names(&self) -> Vec<&'static str> {
		self.values.iter().map(|(_, name)| *name).collect()
	}

	/// Removes the first argument if it is a `T`.
	///
	/// Used by generated constructor shims; a mismatch leaves the list intact.
	pub fn take<T: Any>(&mut self) -> Option<T> {
		let (value, name) = self.values.pop_front()?;
		match value.downcast::<T>() {
			Ok(value) => Some(*value),
			Err(value) => {
				self.values.push_front((value, name));
				None
			}
		}
	}

	fn type_ids(&self) -> impl Iterator<Item = TypeId> + '_ {
		self.values.iter().map(|(value, _)| (**value).type_id())
	}
}

impl fmt::Debug for Args {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_list().entries(self.values.iter().map(|(_, name)| name)).finish()
	}
}

/// Builds an [`Args`] list from expressions.
#[macro_export]
macro_rules! args {
	($($value:expr),* $(,)?) => {
		$crate::Args::new()$(.with($value))*
	};
}

/// One constructor parameter.
pub struct ParamDef {
	pub name: &'static str,
	pub ty: fn() -> TypeKey,
}

impl fmt::Debug for ParamDef {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{}: {}", self.name, (self.ty)())
	}
}

/// A registered constructor.
///
/// `invoke` consumes arguments already checked by [`ConstructorDef::accepts`]
/// and returns `None` only if they do not downcast to the parameter types.
pub struct ConstructorDef {
	pub params: &'static [ParamDef],
	pub invoke: fn(Args) -> Option<Instance>,
}

impl ConstructorDef {
	/// Returns true if `args` matches the parameter list exactly.
	pub fn accepts(&self, args: &Args) -> bool {
		self.params.len() == args.len() && self.params.iter().zip(args.type_ids()).all(|(param, id)| (param.ty)().id() == id)
	}
}

impl fmt::Debug for ConstructorDef {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_tuple("ConstructorDef").field(&self.params).finish()
	}
}

/// Errors raised while constructing an instance of a registered type.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConstructError {
	/// The type is abstract or an interface.
	#[error("{ty} is not a concrete type")]
	NotConcrete { ty: &'static str },
	/// No constructor takes the given argument types.
	#[error("no constructor of {ty} accepts ({})", .args.join(", "))]
	NoMatchingConstructor { ty: &'static str, args: Vec<&'static str> },
	/// The constructor panicked.
	#[error("constructor of {ty} panicked")]
	Panicked { ty: &'static str },
	/// The instance cannot be viewed as the requested type.
	#[error("{ty} cannot be viewed as {view}")]
	Unsupported { ty: &'static str, view: &'static str },
}
