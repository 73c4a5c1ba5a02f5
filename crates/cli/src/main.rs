//! Glyphscope command line front end.
//!
//! Prints Unicode character metadata from locally cached UCD files.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use glyphscope_ucd::{Catalog, Config, Format, Node, UcdError, parse_code};
use tracing::debug;

/// Command line arguments.
#[derive(Parser, Debug)]
#[command(name = "glyphscope")]
#[command(about = "Inspect Unicode characters: names, blocks, categories and encodings")]
struct Args {
	/// Configuration file (TOML)
	#[arg(short, long, value_name = "PATH")]
	config: Option<PathBuf>,

	/// Directory holding Blocks.txt, NamesList.txt and entities.json
	#[arg(short, long, value_name = "DIR")]
	data_dir: Option<PathBuf>,

	/// Verbose logging
	#[arg(short, long)]
	verbose: bool,

	#[command(subcommand)]
	command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
	/// Show everything known about a character
	Info {
		/// A literal character, `U+XXXX`, `0xXXXX` or bare hex
		character: String,
	},
	/// Encode a character in one format
	Encode {
		/// Format label (see `formats`)
		format: String,
		/// A literal character, `U+XXXX`, `0xXXXX` or bare hex
		character: String,
	},
	/// List the available encoding formats
	Formats,
	/// List every block with its range and node count
	Blocks,
}

fn main() -> ExitCode {
	let args = Args::parse();
	setup_tracing(args.verbose);

	match run(args) {
		Ok(()) => ExitCode::SUCCESS,
		Err(e) => {
			eprintln!("error: {e}");
			ExitCode::FAILURE
		}
	}
}

fn run(args: Args) -> Result<(), Box<dyn std::error::Error>> {
	let mut config = match &args.config {
		Some(path) => Config::load(path)?,
		None => Config::default(),
	};
	if let Some(dir) = args.data_dir {
		config.data_dir = dir;
	}
	debug!(data_dir = %config.data_dir.display(), "using data directory");

	let catalog = Catalog::from_config(&config, None);

	match args.command {
		Command::Formats => {
			for label in catalog.formats() {
				println!("{label}");
			}
		}
		Command::Encode { format, character } => {
			let point = parse_character(&character)?;
			match Format::from_label(&format) {
				None => return Err(format!("unknown format {format:?} (try `glyphscope formats`)").into()),
				Some(Format::HtmlEntity) => {
					catalog.parse_entities()?;
				}
				Some(_) => {}
			}
			if let Some(encoded) = catalog.encode(&format, point) {
				println!("{encoded}");
			}
		}
		Command::Blocks => {
			catalog.load()?;
			if let Some(blocks) = catalog.blocks() {
				for block in blocks.read().iter() {
					println!("{:06X}..{:06X}  {:<48} {}", block.start, block.end, block.name, block.nodes.len());
				}
			}
		}
		Command::Info { character } => {
			let point = parse_character(&character)?;
			catalog.load()?;
			let node = catalog.lookup_point(point)?;
			print_info(&catalog, &node);
		}
	}

	Ok(())
}

/// Accepts `é`, `U+00E9`, `0xE9` or `00E9`.
fn parse_character(input: &str) -> Result<u32, UcdError> {
	let mut chars = input.chars();
	if let (Some(ch), None) = (chars.next(), chars.next())
		&& !ch.is_ascii_hexdigit()
	{
		return Ok(ch as u32);
	}

	let hex = input
		.strip_prefix("U+")
		.or_else(|| input.strip_prefix("u+"))
		.or_else(|| input.strip_prefix("0x"))
		.or_else(|| input.strip_prefix("0X"))
		.unwrap_or(input);
	parse_code(hex)
}

fn print_info(catalog: &Catalog, node: &Node) {
	let block = catalog.block_of(node).map(|b| b.name).unwrap_or_default();
	println!("{}  {}", node.code, node.name);
	println!("  Block:    {block}");
	println!("  Category: {}", catalog.category_label(node.point));

	println!("  Encodings:");
	for label in catalog.formats() {
		if let Some(encoded) = catalog.encode(label, node.point) {
			println!("    {label:<12} {}", encoded.replace('\n', " "));
		}
	}

	print_list("Alternate names", &node.alt_names);
	print_list("Remarks", &node.remarks);

	if !node.refs.is_empty() {
		println!("  Cross references:");
		for reference in catalog.references(&node.refs.join(" ")) {
			let name = reference.name.as_deref().unwrap_or("<Undefined>");
			println!("    {}: {name}", reference.code.code);
		}
	}

	print_list("Approximate", &node.approx);
	print_list("Equivalent", &node.equiv);

	if !node.alt_forms.is_empty() {
		println!("  Alternate forms:");
		for form in &node.alt_forms {
			println!("    {} {}  {}", form.codes[0], form.codes[1], form.note);
		}
	}
}

fn print_list(title: &str, items: &[String]) {
	if items.is_empty() {
		return;
	}
	println!("  {title}:");
	for item in items {
		println!("    {item}");
	}
}

fn setup_tracing(verbose: bool) {
	use tracing_subscriber::EnvFilter;

	let filter = EnvFilter::try_from_env("GLYPHSCOPE_LOG")
		.or_else(|_| EnvFilter::try_from_default_env())
		.unwrap_or_else(|_| {
			if verbose {
				EnvFilter::new("glyphscope=debug,glyphscope_ucd=debug")
			} else {
				EnvFilter::new("glyphscope=info,glyphscope_ucd=warn")
			}
		});

	tracing_subscriber::fmt()
		.with_env_filter(filter)
		.with_writer(std::io::stderr)
		.with_target(false)
		.init();
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn parses_character_spellings() {
		assert_eq!(parse_character("é").unwrap(), 0xE9);
		assert_eq!(parse_character("U+00E9").unwrap(), 0xE9);
		assert_eq!(parse_character("0xe9").unwrap(), 0xE9);
		assert_eq!(parse_character("1F600").unwrap(), 0x1F600);
		assert_eq!(parse_character("Z").unwrap(), 0x5A);
		assert_eq!(parse_character("A").unwrap(), 0xA);
		assert!(parse_character("U+ZZZZ").is_err());
	}

	#[test]
	fn args_parse() {
		let args = Args::try_parse_from(["glyphscope", "-d", "/tmp/ucd", "encode", "UTF-8", "é"]).unwrap();
		assert_eq!(args.data_dir, Some(PathBuf::from("/tmp/ucd")));
		assert!(matches!(args.command, Command::Encode { ref format, .. } if format == "UTF-8"));
	}
}
