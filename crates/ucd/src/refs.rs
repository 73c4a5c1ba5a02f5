//! Code tokens embedded in free text.

use std::ops::Range;
use std::sync::LazyLock;

use regex::Regex;

static CODE_TOKEN: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\b[A-F0-9]{4,}\b").expect("valid regex"));

/// A code token found in text such as a node's `raw` block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodeRef {
	/// Byte range of the token in the scanned text.
	pub range: Range<usize>,
	pub code: String,
	pub point: u32,
}

/// Finds every uppercase hex token of four or more digits.
///
/// Tokens too large for a `u32` are skipped.
pub fn find_codes(text: &str) -> Vec<CodeRef> {
	CODE_TOKEN
		.find_iter(text)
		.filter_map(|m| {
			let point = u32::from_str_radix(m.as_str(), 16).ok()?;
			Some(CodeRef {
				range: m.range(),
				code: m.as_str().to_string(),
				point,
			})
		})
		.collect()
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn finds_codes_in_annotations() {
		let refs = find_codes("\tx (latin small letter a - 0061)\n\t: 0041 030A\n");
		let codes: Vec<_> = refs.iter().map(|r| r.code.as_str()).collect();
		assert_eq!(codes, ["0061", "0041", "030A"]);
		assert_eq!(refs[0].point, 0x61);
	}

	#[test]
	fn ignores_short_lowercase_and_embedded_tokens() {
		assert!(find_codes("ABC 00e9 X0041 0041Y").is_empty());
	}

	#[test]
	fn ranges_point_into_text() {
		let text = "see 1F600";
		let refs = find_codes(text);
		assert_eq!(&text[refs[0].range.clone()], "1F600");
	}

	#[test]
	fn skips_oversized_tokens() {
		assert!(find_codes("FFFFFFFFFF").is_empty());
	}
}
