//! A loadable module.
//!
//! Built as a `cdylib`, it exposes its registered types through
//! `tagscan_module_entry`. The `rlib` lets hosts name the annotation and
//! trait types they search for.

use tagscan_types::{Annotation, export_module, register_type};

/// Marks the types this module exports.
#[derive(Debug, PartialEq, Eq)]
pub struct Exported {
	pub label: &'static str,
}
impl Annotation for Exported {}

pub trait Describe {
	fn describe(&self) -> String;
}

pub struct Lantern {
	lumens: u32,
}

impl Lantern {
	pub fn new(lumens: u32) -> Self {
		Self { lumens }
	}
}

impl Describe for Lantern {
	fn describe(&self) -> String {
		format!("lantern at {} lumens", self.lumens)
	}
}

register_type!(Lantern, {
	implements: [Describe],
	annotations: [Exported { label: "lantern" }],
	constructors: [
		() => || Lantern::new(400),
		(lumens: u32) => Lantern::new,
	],
});

/// Never discovered: abstract types are skipped by searches.
pub struct Wick;

register_type!(Wick, {
	kind: Abstract,
	annotations: [Exported { label: "wick" }],
});

export_module!();
