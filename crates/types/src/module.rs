use crate::TypeDef;

/// Version of the [`ModuleDecl`] handshake. Bumped whenever [`TypeDef`] or
/// [`ModuleDecl`] change layout.
pub const MODULE_ABI_VERSION: u32 = 1;

/// Symbol a loadable module exports, NUL-terminated for `libloading`.
pub const MODULE_ENTRY_SYMBOL: &[u8] = b"tagscan_module_entry\0";

/// Signature of [`MODULE_ENTRY_SYMBOL`].
///
/// The declaration crosses a Rust ABI boundary, so host and module must be
/// built by the same compiler against the same `tagscan-types`.
pub type ModuleEntry = fn() -> ModuleDecl;

/// What a loadable module hands to the host: its own type table.
#[derive(Debug, Clone, Copy)]
pub struct ModuleDecl {
	pub abi_version: u32,
	pub name: &'static str,
	pub types: &'static [&'static TypeDef],
}

impl ModuleDecl {
	pub const fn new(name: &'static str, types: &'static [&'static TypeDef]) -> Self {
		Self {
			abi_version: MODULE_ABI_VERSION,
			name,
			types,
		}
	}
}

/// Exports the module entry point of a `cdylib` crate.
///
/// Every type the crate registers with [`register_type!`](crate::register_type)
/// becomes visible to the host once the library is loaded.
#[macro_export]
macro_rules! export_module {
	() => {
		#[unsafe(no_mangle)]
		pub fn tagscan_module_entry() -> $crate::ModuleDecl {
			static TYPES: ::std::sync::OnceLock<::std::vec::Vec<&'static $crate::TypeDef>> = ::std::sync::OnceLock::new();
			$crate::ModuleDecl::new(env!("CARGO_PKG_NAME"), TYPES.get_or_init(|| $crate::linked_types().collect()))
		}
	};
}
