//! Registration macros.

/// Registers a type for attributed-type discovery.
///
/// ```ignore
/// register_type!(LukeSkywalker, {
///     implements: [UsesTheForce, JediKnight],
///     annotations: [Jedi { saber: Saber::Blue }],
///     constructors: [() => LukeSkywalker::default],
/// });
/// ```
///
/// - `kind`: `Concrete` (default), `Abstract` or `Interface`
/// - `extends`: registered base types, named by ident with their `TYPE_<Base>`
///   static in scope. The type satisfies each base and, transitively, every
///   capability of the base chain. Bases give no views and no annotations.
/// - `implements`: traits the type can be viewed as; checked at compile time.
///   Supertraits are listed after the trait (`JediMaster: [JediKnight]`) and
///   become views of their own.
/// - `annotations`: constant expressions of types implementing
///   [`Annotation`](crate::Annotation), kept in declaration order
/// - `constructors`: `(name: Type, ...) => callable` pairs
#[macro_export]
macro_rules! register_type {
	($ty:ident, {
		$(kind: $kind:ident,)?
		$(extends: [$($base:ident),* $(,)?],)?
		$(implements: [$($cap:path $(: [$($super:path),* $(,)?])?),* $(,)?],)?
		annotations: [$($annotation:expr),* $(,)?]
		$(, constructors: [$(($($arg:ident: $arg_ty:ty),* $(,)?) => $ctor:expr),* $(,)?])?
		$(,)?
	}) => {
		$crate::paste::paste! {
			#[doc(hidden)]
			#[allow(non_upper_case_globals, unused_mut, unused_variables)]
			pub static [<TYPE_ $ty>]: $crate::TypeDef = $crate::TypeDef {
				name: concat!(module_path!(), "::", stringify!($ty)),
				crate_name: env!("CARGO_PKG_NAME"),
				kind: $crate::__tagscan_opt!($({$crate::TypeKind::$kind})?, $crate::TypeKind::Concrete),
				ty: $crate::TypeKey::of::<$ty>,
				view_self: |instance: $crate::Instance| {
					instance.downcast::<$ty>().map(|value| ::std::boxed::Box::new(value) as $crate::Instance)
				},
				capabilities: &[
					$($(
						$crate::CapabilityDef {
							capability: $crate::TypeKey::of::<$base>,
							kind: $crate::CapabilityKind::Extends,
							view: ::std::option::Option::None,
							base: ::std::option::Option::Some(|| &[<TYPE_ $base>]),
						},
					)*)?
					$($(
						$crate::__tagscan_implements!($ty, $cap),
						$($($crate::__tagscan_implements!($ty, $super),)*)?
					)*)?
				],
				annotations: &[$(&$annotation),*],
				constructors: &[
					$($(
						$crate::ConstructorDef {
							params: &[$($crate::ParamDef {
								name: stringify!($arg),
								ty: $crate::TypeKey::of::<$arg_ty>,
							}),*],
							invoke: |mut args: $crate::Args| {
								$(let $arg: $arg_ty = args.take::<$arg_ty>()?;)*
								::std::option::Option::Some(::std::boxed::Box::new(($ctor)($($arg),*)) as $crate::Instance)
							},
						},
					)*)?
				],
			};

			$crate::inventory::submit! { $crate::TypeReg(&[<TYPE_ $ty>]) }
		}
	};
}

#[macro_export]
#[doc(hidden)]
macro_rules! __tagscan_implements {
	($ty:ident, $cap:path) => {
		$crate::CapabilityDef {
			capability: $crate::TypeKey::of::<dyn $cap>,
			kind: $crate::CapabilityKind::Implements,
			view: ::std::option::Option::Some(|instance: $crate::Instance| {
				instance
					.downcast::<$ty>()
					.map(|value| ::std::boxed::Box::new(value as ::std::boxed::Box<dyn $cap>) as $crate::Instance)
			}),
			base: ::std::option::Option::None,
		}
	};
}

#[macro_export]
#[doc(hidden)]
macro_rules! __tagscan_opt {
	(, $default:expr) => {
		$default
	};
	({$val:expr}, $default:expr) => {
		$val
	};
}
