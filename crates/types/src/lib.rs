//! Static type descriptors for attributed-type discovery.
//!
//! Rust has no runtime reflection, so every discoverable type describes itself
//! up front. [`register_type!`] emits a [`TypeDef`] for a type and submits it
//! to a link-time table via `inventory`. The table of the current binary is
//! available through [`linked_types`]; a shared library built with
//! [`export_module!`] exposes its own table to the loader.
//!
//! - [`TypeDef`]: name, kind, capabilities, annotations and constructors
//! - [`Annotation`]: marker for values attached to a type
//! - [`TypeKey`] / [`Capability`]: type identity used for filtering and views
//! - [`Args`] / [`ConstructorDef`]: constructor matching by argument types
//! - [`ModuleDecl`]: what a loadable module hands back to the host

mod annotation;
mod capability;
mod construct;
mod def;
mod key;
mod macros;
mod module;

pub use annotation::Annotation;
pub use capability::{Capability, CapabilityDef, CapabilityKind, Instance, ViewFn};
pub use construct::{Args, ConstructError, ConstructorDef, ParamDef};
pub use def::{TypeDef, TypeKind, TypeReg, linked_types};
pub use key::TypeKey;
pub use module::{MODULE_ABI_VERSION, MODULE_ENTRY_SYMBOL, ModuleDecl, ModuleEntry};

#[doc(hidden)]
pub use {inventory, paste};
