//! Module registry and eager module loading.
//!
//! A [`ModuleRegistry`] is the append-only set of modules whose types are
//! visible to discovery. It usually starts with the executable's own linked
//! module ([`ModuleRegistry::with_linked`]) and grows as a [`ModuleLoader`]
//! loads shared libraries found next to it.
//!
//! Opening a file is delegated to a [`ModuleOpener`]; [`DylibOpener`] is the
//! `libloading` implementation. Callers that only need "load everything under
//! this directory" depend on the [`LibraryScanner`] trait.

mod dylib;
mod error;
mod handle;
mod loader;
mod registry;

pub use dylib::DylibOpener;
pub use error::LoadError;
pub use handle::{ModuleHandle, ModuleOrigin};
pub use loader::{LibraryScanner, ModuleLoader, ModuleOpener};
pub use registry::ModuleRegistry;
