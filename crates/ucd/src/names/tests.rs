use super::*;
use crate::blocks::parse_blocks;
use crate::source::StaticSource;

const BLOCKS: &str = "0000..007F; Basic Latin\n0080..00FF; Latin-1 Supplement\n";

fn blocks() -> Vec<Block> {
	parse_blocks(&StaticSource::new("Blocks.txt", BLOCKS)).unwrap()
}

fn parse(text: &str) -> Result<Vec<Node>> {
	parse_names_list(&StaticSource::new("NamesList.txt", text), &blocks())
}

#[test]
fn parses_basic_entry() {
	let nodes = parse("0041\tLATIN CAPITAL LETTER A\n\t= capital a\n\t* something\n").unwrap();

	assert_eq!(nodes.len(), 1);
	let node = &nodes[0];
	assert_eq!(node.code, "0041");
	assert_eq!(node.point, 0x41);
	assert_eq!(node.name, "LATIN CAPITAL LETTER A");
	assert_eq!(node.alt_names, ["capital a"]);
	assert_eq!(node.remarks, ["something"]);
	assert_eq!(node.block, 0);
	assert_eq!(node.raw, "0041\tLATIN CAPITAL LETTER A\n\t= capital a\n\t* something\n");
}

#[test]
fn skips_header_and_section_lines() {
	let text = "\
@@@\tThe Unicode Standard 16.0
@@@+\tU16M240715.lst
; header comment
@@\t0000\tC0 Controls and Basic Latin\t007F
0000\t<control>
\t= NULL
@\t\tASCII punctuation and symbols
0021\tEXCLAMATION MARK
\t= factorial
\t= bang
";
	let nodes = parse(text).unwrap();

	assert_eq!(nodes.len(), 2);
	assert_eq!(nodes[0].code, "0000");
	assert_eq!(nodes[0].alt_names, ["NULL"]);
	assert_eq!(nodes[1].code, "0021");
	assert_eq!(nodes[1].alt_names, ["factorial", "bang"]);
}

#[test]
fn fragment_without_null_entry_is_parsed() {
	let text = "\
@@@\tThe Unicode Standard
0041\tLATIN CAPITAL LETTER A
\tx (latin small letter a - 0061)
0042\tLATIN CAPITAL LETTER B
";
	let nodes = parse(text).unwrap();

	assert_eq!(nodes.len(), 2);
	assert_eq!(nodes[0].code, "0041");
	assert_eq!(nodes[0].refs, ["0061"]);
	assert_eq!(nodes[1].name, "LATIN CAPITAL LETTER B");
}

#[test]
fn malformed_line_after_header_is_fatal() {
	let err = parse("@@@\tThe Unicode Standard\n0041\tA\n\tx nothing to see\n").unwrap_err();
	assert!(matches!(err, UcdError::Malformed { line: 3, .. }));
}

#[test]
fn header_only_list_is_empty() {
	assert!(parse("@@@\tThe Unicode Standard\n; comment\n").unwrap().is_empty());
}

#[test]
fn parses_every_annotation_kind() {
	let text = "\
00C5\tLATIN CAPITAL LETTER A WITH RING ABOVE
\t% angstrom
\tx (angstrom sign - 212B)
\tx 030A
\t: 0041 030A
\t# 0041 0020
\t~ 00C5 FE00 alternate glyph form
\t~ 00C5 FE01
";
	let nodes = parse(text).unwrap();
	let node = &nodes[0];

	assert_eq!(node.block, 1);
	assert_eq!(node.alt_names, ["angstrom"]);
	assert_eq!(node.refs, ["212B", "030A"]);
	assert_eq!(node.equiv, ["0041", "030A"]);
	assert_eq!(node.approx, ["0041", "0020"]);
	assert_eq!(
		node.alt_forms,
		[
			AltForm {
				codes: ["00C5".to_string(), "FE00".to_string()],
				note: "alternate glyph form".to_string(),
			},
			AltForm {
				codes: ["00C5".to_string(), "FE01".to_string()],
				note: String::new(),
			},
		]
	);
}

#[test]
fn unknown_annotation_is_kept_in_raw_only() {
	let nodes = parse("0041\tLATIN CAPITAL LETTER A\n\t? mystery\n").unwrap();
	let node = &nodes[0];

	assert!(node.remarks.is_empty());
	assert!(node.alt_names.is_empty());
	assert!(node.raw.contains("\t? mystery\n"));
}

#[test]
fn preserves_source_code_spelling() {
	let nodes = parse("0000\t<control>\n1F600\tGRINNING FACE\n").unwrap();
	assert_eq!(nodes[1].code, "1F600");
	assert_eq!(nodes[1].point, 0x1F600);
	assert_eq!(nodes[1].block, 2, "falls through to the catch-all block");
}

#[test]
fn first_matching_block_wins() {
	let blocks = vec![Block::new("Wide", 0, 0xFF), Block::new("Narrow", 0x40, 0x4F)];
	let nodes = parse_names_list(&StaticSource::new("NamesList.txt", "0041\tA\n"), &blocks).unwrap();
	assert_eq!(nodes[0].block, 0);
}

#[test]
fn top_level_line_needs_two_fields() {
	let err = parse("0041\tLATIN CAPITAL LETTER A\n0042 LATIN CAPITAL LETTER B\n").unwrap_err();
	assert!(matches!(err, UcdError::Malformed { line: 2, .. }));
}

#[test]
fn malformed_cross_reference_is_fatal() {
	let err = parse("0041\tLATIN CAPITAL LETTER A\n\tx see also 0061\n").unwrap_err();
	assert!(matches!(err, UcdError::Malformed { line: 2, .. }));

	assert!(parse("0041\tA\n\tx (no separator 0061)\n").is_err());
}

#[test]
fn undefined_node_prefers_narrowest_block() {
	let blocks = vec![
		Block::new("Wide", 0, 0xFFFF),
		Block::new("Narrow", 0xE000, 0xE0FF),
		Block::new("Other", 0, 0xFF_FFFF),
	];

	let node = Node::undefined(0xE000, &blocks);
	assert_eq!(node.code, "E000");
	assert_eq!(node.block, 1);
	assert!(node.is_undefined());

	let stray = Node::undefined(0x20_0000, &blocks);
	assert_eq!(stray.code, "200000");
	assert_eq!(stray.block, 2);
}

#[test]
fn canonical_codes_are_padded_uppercase() {
	assert_eq!(canonical_code(0x41), "0041");
	assert_eq!(canonical_code(0xe000), "E000");
	assert_eq!(canonical_code(0x1f600), "1F600");
}
