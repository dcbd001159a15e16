use std::sync::Arc;

use tagscan_loader::ModuleHandle;
use tagscan_types::TypeDef;

/// One line per type of every module with a file, in registry order.
pub fn lines(modules: &[Arc<ModuleHandle>]) -> Vec<String> {
	modules
		.iter()
		.filter(|module| !module.is_dynamic())
		.flat_map(|module| module.types().iter().map(|ty| type_line(module.name(), ty)))
		.collect()
}

/// `module  name  kind  [capabilities]  [annotations]`, tab separated.
pub fn type_line(module: &str, ty: &TypeDef) -> String {
	let capabilities: Vec<_> = ty
		.capabilities
		.iter()
		.map(|def| format!("{:?} {}", def.kind, def.capability()))
		.collect();
	let annotations: Vec<_> = ty.annotations.iter().map(|annotation| format!("{annotation:?}")).collect();
	format!(
		"{module}\t{}\t{:?}\t[{}]\t[{}]",
		ty.name,
		ty.kind,
		capabilities.join(", "),
		annotations.join(", ")
	)
}
