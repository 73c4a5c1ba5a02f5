//! `Blocks.txt` parsing.
//!
//! ```text
//! # comment
//! 0000..007F; Basic Latin
//! ```

use crate::error::{Result, UcdError};
use crate::source::LineSource;

/// Name of the catch-all block appended after the parsed ones.
pub const OTHER_BLOCK: &str = "Other";

/// Upper bound of the catch-all block and of displayable code points.
pub const MAX_POINT: u32 = 0xFF_FFFF;

/// A named, inclusive range of code points.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Block {
	pub name: String,
	pub start: u32,
	pub end: u32,
	/// Codes of the nodes filed under this block, in insertion order.
	pub nodes: Vec<String>,
}

impl Block {
	pub fn new(name: impl Into<String>, start: u32, end: u32) -> Self {
		Self {
			name: name.into(),
			start,
			end,
			nodes: Vec::new(),
		}
	}

	pub fn contains(&self, point: u32) -> bool {
		self.start <= point && point <= self.end
	}

	/// Distance between the first and last code point.
	pub fn span(&self) -> u32 {
		self.end - self.start
	}
}

/// Index of the first block containing `point`, in table order.
pub fn first_containing(blocks: &[Block], point: u32) -> Option<usize> {
	blocks.iter().position(|b| b.contains(point))
}

/// Parses `Blocks.txt` lines and appends the catch-all [`OTHER_BLOCK`].
pub fn parse_blocks(source: &dyn LineSource) -> Result<Vec<Block>> {
	let name = source.name();
	let mut blocks = Vec::new();

	for (idx, raw) in source.lines()?.iter().enumerate() {
		let line = raw.trim();
		if line.is_empty() || line.starts_with('#') {
			continue;
		}
		let malformed = |reason| UcdError::malformed(name, idx + 1, raw, reason);

		let fields: Vec<&str> = line.split(';').collect();
		let &[range, block_name] = fields.as_slice() else {
			return Err(malformed("expected `range; name`"));
		};
		let bounds: Vec<&str> = range.split("..").collect();
		let &[start, end] = bounds.as_slice() else {
			return Err(malformed("expected `start..end`"));
		};
		let start = u32::from_str_radix(start.trim(), 16).map_err(|_| malformed("invalid range start"))?;
		let end = u32::from_str_radix(end.trim(), 16).map_err(|_| malformed("invalid range end"))?;
		if start > end {
			return Err(malformed("range start exceeds end"));
		}

		blocks.push(Block::new(block_name.trim(), start, end));
	}

	blocks.push(Block::new(OTHER_BLOCK, 0, MAX_POINT));
	tracing::info!(source = name, blocks = blocks.len(), "parsed blocks");
	Ok(blocks)
}
