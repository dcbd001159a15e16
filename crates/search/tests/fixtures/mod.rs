//! Registered types shared by the search tests.

#![allow(dead_code)]

use std::path::Path;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use tagscan_loader::{LibraryScanner, LoadError, ModuleHandle, ModuleOpener};
use tagscan_types::{Annotation, linked_types, register_type};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Saber {
	Blue,
	Green,
	Red,
	White,
}

#[derive(Debug, PartialEq, Eq)]
pub struct Jedi {
	pub saber: Saber,
}
impl Annotation for Jedi {}

#[derive(Debug, PartialEq, Eq)]
pub struct DarkSide {
	pub saber: Saber,
}
impl Annotation for DarkSide {}

pub trait UsesTheForce {
	fn name(&self) -> &str;
}

pub trait JediKnight {
	fn is_jedi(&self) -> bool;
}

pub trait JediMaster: JediKnight {
	fn lives_forever(&self) -> bool;
}

pub trait Sith {
	fn is_dark_side(&self) -> bool;
}

#[derive(Default)]
pub struct LukeSkywalker;

impl UsesTheForce for LukeSkywalker {
	fn name(&self) -> &str {
		"Luke Skywalker"
	}
}

impl JediKnight for LukeSkywalker {
	fn is_jedi(&self) -> bool {
		TYPE_LukeSkywalker.annotation::<Jedi>().is_some()
	}
}

register_type!(LukeSkywalker, {
	implements: [UsesTheForce, JediKnight],
	annotations: [Jedi { saber: Saber::Blue }],
	constructors: [() => LukeSkywalker::default],
});

#[derive(Default)]
pub struct Yoda;

impl UsesTheForce for Yoda {
	fn name(&self) -> &str {
		"Yoda"
	}
}

impl JediKnight for Yoda {
	fn is_jedi(&self) -> bool {
		TYPE_Yoda.annotation::<Jedi>().is_some()
	}
}

impl JediMaster for Yoda {
	fn lives_forever(&self) -> bool {
		true
	}
}

register_type!(Yoda, {
	implements: [UsesTheForce, JediMaster: [JediKnight]],
	annotations: [Jedi { saber: Saber::Green }],
	constructors: [() => Yoda::default],
});

#[derive(Default)]
pub struct DarthVader;

impl UsesTheForce for DarthVader {
	fn name(&self) -> &str {
		"Darth Vader"
	}
}

impl Sith for DarthVader {
	fn is_dark_side(&self) -> bool {
		TYPE_DarthVader.annotation::<DarkSide>().is_some()
	}
}

register_type!(DarthVader, {
	implements: [UsesTheForce, Sith],
	annotations: [DarkSide { saber: Saber::Red }],
	constructors: [() => DarthVader::default],
});

#[derive(Default)]
pub struct EmperorPalpatine;

impl UsesTheForce for EmperorPalpatine {
	fn name(&self) -> &str {
		"Emperor Palpatine"
	}
}

impl Sith for EmperorPalpatine {
	fn is_dark_side(&self) -> bool {
		TYPE_EmperorPalpatine.annotation::<DarkSide>().is_some()
	}
}

register_type!(EmperorPalpatine, {
	implements: [UsesTheForce, Sith],
	annotations: [DarkSide { saber: Saber::Red }],
	constructors: [() => EmperorPalpatine::default],
});

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Color {
	Blue,
	Green,
	Red,
}

#[derive(Debug, PartialEq, Eq)]
pub struct Tag {
	pub color: Color,
}
impl Annotation for Tag {}

pub trait Paintable {
	fn color(&self) -> Color;
}

pub struct X;

impl Paintable for X {
	fn color(&self) -> Color {
		Color::Blue
	}
}

register_type!(X, {
	implements: [Paintable],
	annotations: [Tag { color: Color::Blue }],
	constructors: [() => || X],
});

pub struct Y;

register_type!(Y, {
	annotations: [Tag { color: Color::Green }],
	constructors: [() => || Y],
});

pub struct Z;

register_type!(Z, {
	kind: Abstract,
	annotations: [Tag { color: Color::Red }],
});

pub struct Painter;

register_type!(Painter, {
	kind: Interface,
	annotations: [Tag { color: Color::Red }],
});

/// Annotation for the construction fixtures.
#[derive(Debug, PartialEq, Eq)]
pub struct Apprentice {
	pub rank: u8,
}
impl Annotation for Apprentice {}

pub struct Padawan {
	name: String,
	age: u32,
}

impl Padawan {
	pub fn new(name: String, age: u32) -> Self {
		Self { name, age }
	}

	pub fn unnamed() -> Self {
		Self::new("unnamed".to_string(), 0)
	}
}

impl UsesTheForce for Padawan {
	fn name(&self) -> &str {
		&self.name
	}
}

register_type!(Padawan, {
	implements: [UsesTheForce],
	annotations: [Apprentice { rank: 2 }, Apprentice { rank: 1 }],
	constructors: [
		() => Padawan::unnamed,
		(name: String, age: u32) => Padawan::new,
	],
});

pub struct Youngling;

impl Youngling {
	fn new() -> Self {
		panic!("younglings cannot be constructed");
	}
}

register_type!(Youngling, {
	annotations: [Apprentice { rank: 0 }],
	constructors: [() => Youngling::new],
});

/// Annotation carried by a base type only.
#[derive(Debug, PartialEq, Eq)]
pub struct Lineage;
impl Annotation for Lineage {}

pub trait Sworn {
	fn oath(&self) -> &'static str;
}

pub struct Order;

impl Sworn for Order {
	fn oath(&self) -> &'static str {
		"serve the order"
	}
}

register_type!(Order, {
	implements: [Sworn],
	annotations: [Lineage],
	constructors: [() => || Order],
});

pub struct Knight;

register_type!(Knight, {
	extends: [Order],
	annotations: [Apprentice { rank: 9 }],
	constructors: [() => || Knight],
});

pub struct GrandMaster;

register_type!(GrandMaster, {
	extends: [Knight],
	annotations: [Apprentice { rank: 10 }],
	constructors: [() => || GrandMaster],
});

/// Opens every file as a module exposing this binary's registered types.
#[derive(Default)]
pub struct FixtureOpener {
	opened: AtomicUsize,
}

impl FixtureOpener {
	pub fn opened(&self) -> usize {
		self.opened.load(Ordering::SeqCst)
	}
}

impl ModuleOpener for FixtureOpener {
	fn open(&self, path: &Path) -> Result<ModuleHandle, LoadError> {
		self.opened.fetch_add(1, Ordering::SeqCst);
		let name = path.file_stem().map(|s| s.to_string_lossy().into_owned()).unwrap_or_default();
		Ok(ModuleHandle::from_file(name, path.to_path_buf(), linked_types().collect()))
	}
}

/// Scanner that fails a fixed number of times before loading nothing.
pub struct FlakyScanner {
	failures: AtomicUsize,
	calls: AtomicUsize,
}

impl FlakyScanner {
	pub fn failing(times: usize) -> Self {
		Self {
			failures: AtomicUsize::new(times),
			calls: AtomicUsize::new(0),
		}
	}

	pub fn calls(&self) -> usize {
		self.calls.load(Ordering::SeqCst)
	}
}

impl LibraryScanner for FlakyScanner {
	fn load_all(&self, root: &Path) -> Result<Vec<Arc<ModuleHandle>>, LoadError> {
		self.calls.fetch_add(1, Ordering::SeqCst);
		let remaining = self.failures.load(Ordering::SeqCst);
		if remaining > 0 {
			self.failures.store(remaining - 1, Ordering::SeqCst);
			return Err(LoadError::Invalid {
				path: root.to_path_buf(),
				reason: "module failed to load".to_string(),
			});
		}
		Ok(Vec::new())
	}
}

/// Sorted type names of a result list, with the module path stripped.
pub fn short_names<A: Annotation>(matches: &[tagscan_search::AnnotationMatch<A>]) -> Vec<&'static str> {
	let mut names: Vec<_> = matches
		.iter()
		.map(|found| found.type_name().rsplit("::").next().unwrap_or_default())
		.collect();
	names.sort_unstable();
	names
}
