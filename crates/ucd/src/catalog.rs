//! The loaded Unicode tables and the queries built on them.

use std::sync::Arc;

use once_cell::sync::OnceCell;

use crate::blocks::{Block, MAX_POINT, parse_blocks};
use crate::category::{CategoryOracle, Classification, UnicodeProperties, classify, render};
use crate::config::{Config, SourceConfig};
use crate::encode::Format;
use crate::entities::EntityTable;
use crate::error::{Result, UcdError};
use crate::names::{Node, canonical_code, parse_names_list};
use crate::refs::{CodeRef, find_codes};
use crate::source::{CachedSource, Fetch, LineSource};
use crate::table::{BlockTable, NameTable};

/// A code token in free text, paired with the name of the node it refers to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reference {
	pub code: CodeRef,
	/// `None` when the code has no entry (undefined nodes are not created).
	pub name: Option<String>,
}

/// Owns the data sources and the tables parsed from them.
///
/// Each table is parsed at most once; later calls return the cached table.
/// All methods take `&self`, so a catalog can be shared behind an [`Arc`]
/// between an event loop and loader threads.
pub struct Catalog {
	blocks_source: Box<dyn LineSource>,
	names_source: Box<dyn LineSource>,
	entities_source: Option<Box<dyn LineSource>>,
	oracle: Box<dyn CategoryOracle>,
	blocks: OnceCell<BlockTable>,
	names: OnceCell<NameTable>,
	entities: OnceCell<EntityTable>,
}

impl std::fmt::Debug for Catalog {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("Catalog")
			.field("blocks_source", &self.blocks_source.name())
			.field("names_source", &self.names_source.name())
			.field("entities_source", &self.entities_source.as_ref().map(|s| s.name()))
			.field("blocks_loaded", &self.blocks.get().is_some())
			.field("names_loaded", &self.names.get().is_some())
			.finish()
	}
}

impl Catalog {
	/// Creates a catalog over the two UCD sources. Nothing is read yet.
	pub fn new(blocks: impl LineSource + 'static, names: impl LineSource + 'static) -> Self {
		Self {
			blocks_source: Box::new(blocks),
			names_source: Box::new(names),
			entities_source: None,
			oracle: Box::new(UnicodeProperties),
			blocks: OnceCell::new(),
			names: OnceCell::new(),
			entities: OnceCell::new(),
		}
	}

	/// Creates a catalog over cached files laid out as `config` describes.
	pub fn from_config(config: &Config, fetcher: Option<Arc<dyn Fetch>>) -> Self {
		let source = |cfg: &SourceConfig| {
			let source = CachedSource::new(config.source_path(cfg), &cfg.url, config.max_age());
			match &fetcher {
				Some(fetcher) => source.with_fetcher(fetcher.clone()),
				None => source,
			}
		};
		Self::new(source(&config.blocks), source(&config.names_list)).with_entities(source(&config.entities))
	}

	/// Adds the HTML entity list used by the `HTML Entity` format.
	pub fn with_entities(mut self, source: impl LineSource + 'static) -> Self {
		self.entities_source = Some(Box::new(source));
		self
	}

	/// Replaces the general category oracle.
	pub fn with_oracle(mut self, oracle: impl CategoryOracle + 'static) -> Self {
		self.oracle = Box::new(oracle);
		self
	}

	/// Parses `Blocks.txt` once.
	pub fn parse_blocks(&self) -> Result<&BlockTable> {
		self.blocks
			.get_or_try_init(|| parse_blocks(self.blocks_source.as_ref()).map(BlockTable::new))
	}

	/// Parses `NamesList.txt` once, parsing the blocks first if needed.
	pub fn parse_names_list(&self) -> Result<&NameTable> {
		self.names.get_or_try_init(|| {
			let blocks = self.parse_blocks()?;
			let nodes = parse_names_list(self.names_source.as_ref(), &blocks.read())?;
			blocks.file_nodes(&nodes);
			Ok(NameTable::new(nodes))
		})
	}

	/// Parses the entity list once. `None` when no entity source is set.
	pub fn parse_entities(&self) -> Result<Option<&EntityTable>> {
		let Some(source) = &self.entities_source else {
			return Ok(None);
		};
		self.entities
			.get_or_try_init(|| {
				let table = EntityTable::parse(&source.lines()?.join("\n"))?;
				tracing::info!(source = source.name(), entities = table.len(), "parsed entities");
				Ok(table)
			})
			.map(Some)
	}

	/// Parses every source in parallel and waits for all of them.
	pub fn load(&self) -> Result<()> {
		std::thread::scope(|scope| {
			let blocks = scope.spawn(|| self.parse_blocks().map(|_| ()));
			let names = scope.spawn(|| self.parse_names_list().map(|_| ()));
			let entities = scope.spawn(|| self.parse_entities().map(|_| ()));

			for handle in [blocks, names, entities] {
				handle.join().unwrap_or_else(|panic| std::panic::resume_unwind(panic))?;
			}
			Ok(())
		})
	}

	/// True once both the block and name tables are available.
	pub fn is_loaded(&self) -> bool {
		self.blocks.get().is_some() && self.names.get().is_some()
	}

	/// The block table, if parsed.
	pub fn blocks(&self) -> Option<&BlockTable> {
		self.blocks.get()
	}

	/// The name table, if parsed.
	pub fn names(&self) -> Option<&NameTable> {
		self.names.get()
	}

	fn tables(&self) -> Result<(&BlockTable, &NameTable)> {
		match (self.blocks.get(), self.names.get()) {
			(Some(blocks), Some(names)) => Ok((blocks, names)),
			_ => Err(UcdError::NotLoaded),
		}
	}

	/// Looks up a node by hex code, synthesizing an undefined node for a
	/// code point with no entry.
	///
	/// The code is tried verbatim first, then in canonical form, so `"e000"`
	/// and `"0E000"` both find `"E000"`.
	///
	/// # Errors
	///
	/// [`UcdError::NotLoaded`] before [`Catalog::load`] (or both parse calls)
	/// has finished, and [`UcdError::InvalidCode`] for anything that is not a
	/// hex value up to `0xFFFFFF`.
	pub fn lookup(&self, code: &str) -> Result<Arc<Node>> {
		let (blocks, names) = self.tables()?;
		if let Some(node) = names.get(code) {
			return Ok(node);
		}

		let point = parse_code(code)?;
		let canonical = canonical_code(point);
		if canonical != code
			&& let Some(node) = names.get(&canonical)
		{
			return Ok(node);
		}
		Ok(names.synthesize(blocks, point))
	}

	/// Looks up a node by code point.
	pub fn lookup_point(&self, point: u32) -> Result<Arc<Node>> {
		if point > MAX_POINT {
			return Err(UcdError::InvalidCode(format!("{point:X}")));
		}
		self.lookup(&canonical_code(point))
	}

	/// The block a node is filed under.
	pub fn block_of(&self, node: &Node) -> Option<Block> {
		self.blocks.get()?.get(node.block)
	}

	/// Encodes `point` with the format called `label`.
	///
	/// `None` if no such format exists.
	pub fn encode(&self, label: &str, point: u32) -> Option<String> {
		Format::from_label(label).map(|format| format.encode(point, self.entities.get()))
	}

	/// Every format label, sorted.
	pub fn formats(&self) -> Vec<&'static str> {
		Format::labels()
	}

	/// General categories of `point`, grouped by major class.
	pub fn classify(&self, point: u32) -> Classification {
		classify(self.oracle.as_ref(), point)
	}

	/// Rendered form of [`Catalog::classify`], e.g. `"Letter: Uppercase"`.
	pub fn category_label(&self, point: u32) -> String {
		render(&self.classify(point))
	}

	/// Finds code tokens in `text` and resolves their names.
	pub fn references(&self, text: &str) -> Vec<Reference> {
		let names = self.names.get();
		find_codes(text)
			.into_iter()
			.map(|code| {
				let name = names.and_then(|n| n.get(&code.code)).map(|node| node.name.clone());
				Reference { code, name }
			})
			.collect()
	}
}

/// Parses a hex code string into a displayable code point.
pub fn parse_code(code: &str) -> Result<u32> {
	let invalid = || UcdError::InvalidCode(code.to_string());
	if code.is_empty() || !code.bytes().all(|b| b.is_ascii_hexdigit()) {
		return Err(invalid());
	}
	match u32::from_str_radix(code, 16) {
		Ok(point) if point <= MAX_POINT => Ok(point),
		_ => Err(invalid()),
	}
}
