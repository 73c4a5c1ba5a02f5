//! `NamesList.txt` parsing.
//!
//! Each entry is a top-level `CODE<TAB>NAME` line followed by tab-indented
//! annotation lines:
//!
//! ```text
//! 0041	LATIN CAPITAL LETTER A
//! 	= also known as
//! 	* informative note
//! 	x (cross reference - 0061)
//! 	x 2070
//! 	# approximate 0020 0308
//! 	: equivalent 0020 0308
//! 	~ 0041 FE00 variation note
//! ```
//!
//! Lines starting with `@` are section headings and are skipped.

use crate::blocks::{Block, first_containing};
use crate::error::{Result, UcdError};
use crate::source::LineSource;

/// Name given to synthesized nodes.
pub const UNDEFINED_NAME: &str = "Undefined";

/// Remark attached to synthesized nodes.
pub const UNDEFINED_REMARK: &str = "This character is not defined by the unicode spec";

/// An alternate glyph form (`~` annotation).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AltForm {
	/// Base code and variation selector.
	pub codes: [String; 2],
	pub note: String,
}

/// Metadata for one code point.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Node {
	pub point: u32,
	/// Lookup key: the hex code as written in the source.
	pub code: String,
	pub name: String,
	pub alt_names: Vec<String>,
	pub alt_forms: Vec<AltForm>,
	pub remarks: Vec<String>,
	/// Codes referenced by `x` annotations.
	pub refs: Vec<String>,
	pub approx: Vec<String>,
	pub equiv: Vec<String>,
	/// Index of the owning block in the block table.
	pub block: usize,
	/// The source lines of this entry, newline terminated.
	pub raw: String,
}

impl Node {
	fn new(point: u32, code: &str, name: &str, block: usize) -> Self {
		Self {
			point,
			code: code.to_string(),
			name: name.to_string(),
			alt_names: Vec::new(),
			alt_forms: Vec::new(),
			remarks: Vec::new(),
			refs: Vec::new(),
			approx: Vec::new(),
			equiv: Vec::new(),
			block,
			raw: String::new(),
		}
	}

	/// Placeholder for a code point with no entry, filed under the narrowest
	/// block containing it.
	pub fn undefined(point: u32, blocks: &[Block]) -> Self {
		let mut block = blocks.len().saturating_sub(1);
		for (idx, candidate) in blocks.iter().enumerate() {
			if candidate.contains(point) && blocks.get(block).is_none_or(|current| candidate.span() < current.span()) {
				block = idx;
			}
		}

		let mut node = Self::new(point, &canonical_code(point), UNDEFINED_NAME, block);
		node.remarks.push(UNDEFINED_REMARK.to_string());
		node
	}

	/// True for nodes created by [`Node::undefined`].
	pub fn is_undefined(&self) -> bool {
		self.name == UNDEFINED_NAME && self.remarks.first().is_some_and(|r| r == UNDEFINED_REMARK)
	}
}

/// Uppercase hex, zero padded to at least four digits.
pub fn canonical_code(point: u32) -> String {
	format!("{point:04X}")
}

/// Text after the two-character annotation marker (`"* "`, `"= "`, ...).
fn rest(line: &str) -> &str {
	line.get(2..).unwrap_or("")
}

/// Number of leading header lines: everything before the `0000` entry, or
/// before the first line opening with a hex digit when there is none.
fn header_len(lines: &[String]) -> usize {
	lines
		.iter()
		.position(|l| l.starts_with("0000"))
		.or_else(|| lines.iter().position(|l| l.starts_with(|c: char| c.is_ascii_hexdigit())))
		.unwrap_or(lines.len())
}

/// Parses `NamesList.txt` into nodes in file order.
///
/// Each node is assigned the first block (in table order) containing it.
pub fn parse_names_list(source: &dyn LineSource, blocks: &[Block]) -> Result<Vec<Node>> {
	let source_name = source.name();
	let lines = source.lines()?;
	let first = header_len(&lines);

	let mut nodes: Vec<Node> = Vec::new();
	let mut unhandled = 0usize;

	for (idx, raw) in lines.iter().enumerate().skip(first) {
		let line_no = idx + 1;
		let malformed = |reason| UcdError::malformed(source_name, line_no, raw, reason);

		if raw.trim().is_empty() || raw.starts_with('@') {
			continue;
		}

		if !raw.starts_with('\t') {
			let fields: Vec<&str> = raw.split('\t').collect();
			let &[code, name] = fields.as_slice() else {
				return Err(malformed("expected `code<TAB>name`"));
			};
			let point = u32::from_str_radix(code, 16).map_err(|_| malformed("invalid code point"))?;
			let block = first_containing(blocks, point).unwrap_or(blocks.len().saturating_sub(1));

			let mut node = Node::new(point, code, name, block);
			node.raw.push_str(raw);
			node.raw.push('\n');
			nodes.push(node);
			continue;
		}

		let Some(node) = nodes.last_mut() else {
			return Err(malformed("annotation before the first entry"));
		};
		node.raw.push_str(raw);
		node.raw.push('\n');

		let line = raw.trim();
		match line.as_bytes()[0] {
			b'*' => node.remarks.push(rest(line).to_string()),
			b'%' | b'=' => node.alt_names.push(rest(line).to_string()),
			b':' => node.equiv.extend(rest(line).split(' ').map(str::to_string)),
			b'#' => node.approx.extend(rest(line).split(' ').map(str::to_string)),
			b'x' => {
				let parts: Vec<&str> = if line.as_bytes().get(2) == Some(&b'(') {
					let inner = rest(line);
					inner.strip_suffix(')').unwrap_or(inner).split(" - ").collect()
				} else {
					line.split(' ').collect()
				};
				let &[_, code] = parts.as_slice() else {
					return Err(malformed("malformed cross reference"));
				};
				node.refs.push(code.to_string());
			}
			b'~' => {
				let parts: Vec<&str> = rest(line).split(' ').collect();
				let [base, selector, note @ ..] = parts.as_slice() else {
					return Err(malformed("malformed alternate form"));
				};
				node.alt_forms.push(AltForm {
					codes: [base.to_string(), selector.to_string()],
					note: note.join(" "),
				});
			}
			_ => {
				unhandled += 1;
				tracing::warn!(source = source_name, line = line_no, code = %node.code, note = line, "unhandled note");
			}
		}
	}

	tracing::info!(source = source_name, nodes = nodes.len(), unhandled, "parsed names list");
	Ok(nodes)
}

#[cfg(test)]
mod tests;
