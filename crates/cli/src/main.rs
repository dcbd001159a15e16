//! Tagscan binary.
//!
//! Loads every module file in a directory and prints the types each loaded
//! module registered, one line per type.

use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;
use tagscan_loader::{ModuleLoader, ModuleRegistry};
use tracing::info;

mod report;

/// Command line arguments.
#[derive(Parser, Debug)]
#[command(name = "tagscan")]
#[command(about = "List the registered types of every module in a directory")]
struct Args {
	/// Directory to load modules from
	#[arg(value_name = "DIR")]
	dir: PathBuf,

	/// Descend into subdirectories
	#[arg(short, long)]
	recursive: bool,

	/// Module file extension, defaults to the platform's shared library extension
	#[arg(short, long, value_name = "EXT")]
	extension: Option<String>,

	/// Verbose logging
	#[arg(short, long)]
	verbose: bool,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
	let args = Args::parse();

	let subscriber = tracing_subscriber::fmt()
		.with_max_level(if args.verbose {
			tracing::Level::DEBUG
		} else {
			tracing::Level::INFO
		})
		.with_writer(std::io::stderr)
		.finish();

	tracing::subscriber::set_global_default(subscriber)?;

	let registry = Arc::new(ModuleRegistry::with_linked());
	let mut loader = ModuleLoader::new(Arc::clone(&registry));
	if let Some(extension) = &args.extension {
		loader = loader.with_extension(extension);
	}

	info!(dir = %args.dir.display(), extension = loader.extension(), recursive = args.recursive, "tagscan.load");
	let loaded = loader.load_all(&args.dir, args.recursive)?;
	info!(loaded = loaded.len(), modules = registry.len(), "tagscan.loaded");

	for line in report::lines(&registry.modules()) {
		println!("{line}");
	}

	Ok(())
}
