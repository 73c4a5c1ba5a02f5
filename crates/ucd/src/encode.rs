//! Code point encoders.
//!
//! Every [`Format`] is a total function from a raw `u32` value to display
//! text. Values that are not Unicode scalar values (surrogates, anything past
//! `0x10FFFF`) are never rejected: the byte-oriented formats encode them as
//! U+FFFD and the numeric formats print the raw value.

use crate::entities::EntityTable;

/// A textual notation for a code point.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Format {
	Utf8,
	Utf16,
	Utf32,
	COctal,
	CHex,
	CUnicode,
	XmlEntity,
	HtmlEntity,
	JavaScript,
}

impl Format {
	/// All formats, in declaration order.
	pub const ALL: [Format; 9] = [
		Format::Utf8,
		Format::Utf16,
		Format::Utf32,
		Format::COctal,
		Format::CHex,
		Format::CUnicode,
		Format::XmlEntity,
		Format::HtmlEntity,
		Format::JavaScript,
	];

	/// Human-readable label used to select the format.
	pub fn label(self) -> &'static str {
		match self {
			Format::Utf8 => "UTF-8",
			Format::Utf16 => "UTF-16",
			Format::Utf32 => "UTF-32",
			Format::COctal => "C Octal",
			Format::CHex => "C Hex",
			Format::CUnicode => "C Unicode",
			Format::XmlEntity => "XML Entity",
			Format::HtmlEntity => "HTML Entity",
			Format::JavaScript => "JavaScript",
		}
	}

	/// Resolves a label, ignoring ASCII case.
	pub fn from_label(label: &str) -> Option<Format> {
		Self::ALL.into_iter().find(|f| f.label().eq_ignore_ascii_case(label.trim()))
	}

	/// Labels of every format, sorted for presentation.
	pub fn labels() -> Vec<&'static str> {
		let mut labels: Vec<_> = Self::ALL.iter().map(|f| f.label()).collect();
		labels.sort_unstable();
		labels
	}

	/// Renders `point` in this format.
	///
	/// `entities` is only consulted by [`Format::HtmlEntity`]; without a
	/// table the numeric reference is used.
	pub fn encode(self, point: u32, entities: Option<&EntityTable>) -> String {
		match self {
			Format::Utf8 => utf8(point),
			Format::Utf16 => utf16(point),
			Format::Utf32 => utf32(point),
			Format::COctal => c_octal(point),
			Format::CHex => c_hex(point),
			Format::CUnicode => c_unicode(point),
			Format::XmlEntity => xml_entity(point),
			Format::HtmlEntity => html_entity(point, entities),
			Format::JavaScript => javascript(point),
		}
	}
}

impl std::fmt::Display for Format {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.write_str(self.label())
	}
}

/// UTF-8 bytes of `point`, most significant first. Non-scalar values encode
/// as U+FFFD.
pub fn utf8_bytes(point: u32) -> Vec<u8> {
	let ch = char::from_u32(point).unwrap_or(char::REPLACEMENT_CHARACTER);
	let mut buf = [0u8; 4];
	ch.encode_utf8(&mut buf).as_bytes().to_vec()
}

/// UTF-16 code units of `point`: a surrogate pair for supplementary scalar
/// values, otherwise the raw value as a single unit.
pub fn utf16_units(point: u32) -> (Option<u32>, u32) {
	if (0x1_0000..=0x10_FFFF).contains(&point) {
		let offset = point - 0x1_0000;
		(Some(0xD800 + (offset >> 10)), 0xDC00 + (offset & 0x3FF))
	} else {
		(None, point)
	}
}

fn utf8(point: u32) -> String {
	utf8_bytes(point)
		.iter()
		.map(|b| format!("0x{b:02X}"))
		.collect::<Vec<_>>()
		.join(" ")
}

fn utf16(point: u32) -> String {
	match utf16_units(point) {
		(Some(high), low) => format!("0x{high:04X} 0x{low:04X}"),
		(None, unit) => format!("0x{unit:04X}"),
	}
}

fn utf32(point: u32) -> String {
	format!("0x{point:06X}")
}

fn c_octal(point: u32) -> String {
	utf8_bytes(point).iter().map(|b| format!("\\{b:o}")).collect()
}

fn c_hex(point: u32) -> String {
	utf8_bytes(point).iter().map(|b| format!("\\x{b:02x}")).collect()
}

fn c_unicode(point: u32) -> String {
	if point > 0xFFFF {
		format!("\\U{point:08x}")
	} else {
		format!("\\u{point:04x}")
	}
}

fn xml_entity(point: u32) -> String {
	format!("&#{point};")
}

fn html_entity(point: u32, entities: Option<&EntityTable>) -> String {
	match entities.map(|table| table.names(point)) {
		Some(names) if !names.is_empty() => names.join("\n"),
		_ => format!("&#x{point:x};"),
	}
}

fn javascript(point: u32) -> String {
	format!("\\u{{{point:04x}}}")
}
