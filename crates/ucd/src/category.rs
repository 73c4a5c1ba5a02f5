//! General category classification.
//!
//! Category membership comes from a [`CategoryOracle`]; this module only
//! maps the two-letter tags onto display names and groups them by major
//! class.

use indexmap::IndexMap;
use unicode_general_category::{GeneralCategory, get_general_category};

/// Heading for tags whose major letter is not in [`CATEGORY_MAP`].
pub const UNCLASSIFIED: &str = "Unclassified";

/// Key holding the display name of a major class.
const MAJOR_KEY: char = '!';

/// Major letter to `(minor letter, display name)` pairs. The `'!'` entry
/// names the major class itself.
pub const CATEGORY_MAP: &[(char, &[(char, &str)])] = &[
	(
		'L',
		&[
			(MAJOR_KEY, "Letter"),
			('u', "Uppercase"),
			('l', "Lowercase"),
			('t', "Titlecase"),
			('m', "Modifier"),
			('o', "Other"),
		],
	),
	(
		'M',
		&[(MAJOR_KEY, "Mark"), ('n', "Nonspacing"), ('c', "Spacing"), ('e', "Enclosing")],
	),
	(
		'N',
		&[(MAJOR_KEY, "Number"), ('d', "Decimal"), ('l', "Letter"), ('o', "Other")],
	),
	(
		'P',
		&[
			(MAJOR_KEY, "Punctuation"),
			('c', "Connector"),
			('d', "Dash"),
			('s', "Open"),
			('e', "Close"),
			('i', "Initial"),
			('f', "Final"),
			('o', "Other"),
		],
	),
	(
		'S',
		&[
			(MAJOR_KEY, "Symbol"),
			('m', "Math"),
			('c', "Currency"),
			('k', "Modifier"),
			('o', "Other"),
		],
	),
	(
		'Z',
		&[(MAJOR_KEY, "Separator"), ('s', "Space"), ('l', "Line"), ('p', "Paragraph")],
	),
	(
		'C',
		&[
			(MAJOR_KEY, "Other"),
			('c', "Control"),
			('f', "Format"),
			('s', "Surrogate"),
			('o', "Private Use"),
			('n', "Unassigned"),
		],
	),
];

/// Every tag an oracle is asked about: the seven major classes followed by
/// the minor categories.
pub const TAGS: &[&str] = &[
	"C", "Cc", "Cf", "Cn", "Co", "Cs", "L", "Ll", "Lm", "Lo", "Lt", "Lu", "M", "Mc", "Me", "Mn", "N", "Nd", "Nl", "No", "P",
	"Pc", "Pd", "Pe", "Pf", "Pi", "Po", "Ps", "S", "Sc", "Sk", "Sm", "So", "Z", "Zl", "Zp", "Zs",
];

/// Answers general category membership questions.
pub trait CategoryOracle: Send + Sync {
	/// Returns true if `point` belongs to the category `tag`.
	///
	/// `tag` is either a major letter (`"L"`) or a two-letter tag (`"Lu"`).
	fn contains(&self, tag: &str, point: u32) -> bool;

	/// Tags to test, in presentation order.
	fn tags(&self) -> &[&str] {
		TAGS
	}
}

/// Oracle backed by the `unicode-general-category` tables.
///
/// Surrogates (which have no `char`) report `Cs`; values past `0x10FFFF`
/// belong to no category.
#[derive(Debug, Clone, Copy, Default)]
pub struct UnicodeProperties;

impl UnicodeProperties {
	fn tag_of(point: u32) -> Option<&'static str> {
		if (0xD800..=0xDFFF).contains(&point) {
			return Some("Cs");
		}
		let ch = char::from_u32(point)?;
		Some(match get_general_category(ch) {
			GeneralCategory::UppercaseLetter => "Lu",
			GeneralCategory::LowercaseLetter => "Ll",
			GeneralCategory::TitlecaseLetter => "Lt",
			GeneralCategory::ModifierLetter => "Lm",
			GeneralCategory::OtherLetter => "Lo",
			GeneralCategory::NonspacingMark => "Mn",
			GeneralCategory::SpacingMark => "Mc",
			GeneralCategory::EnclosingMark => "Me",
			GeneralCategory::DecimalNumber => "Nd",
			GeneralCategory::LetterNumber => "Nl",
			GeneralCategory::OtherNumber => "No",
			GeneralCategory::ConnectorPunctuation => "Pc",
			GeneralCategory::DashPunctuation => "Pd",
			GeneralCategory::OpenPunctuation => "Ps",
			GeneralCategory::ClosePunctuation => "Pe",
			GeneralCategory::InitialPunctuation => "Pi",
			GeneralCategory::FinalPunctuation => "Pf",
			GeneralCategory::OtherPunctuation => "Po",
			GeneralCategory::MathSymbol => "Sm",
			GeneralCategory::CurrencySymbol => "Sc",
			GeneralCategory::ModifierSymbol => "Sk",
			GeneralCategory::OtherSymbol => "So",
			GeneralCategory::SpaceSeparator => "Zs",
			GeneralCategory::LineSeparator => "Zl",
			GeneralCategory::ParagraphSeparator => "Zp",
			GeneralCategory::Control => "Cc",
			GeneralCategory::Format => "Cf",
			GeneralCategory::PrivateUse => "Co",
			_ => "Cn",
		})
	}
}

impl CategoryOracle for UnicodeProperties {
	fn contains(&self, tag: &str, point: u32) -> bool {
		match Self::tag_of(point) {
			Some(actual) if tag.len() == 1 => actual.starts_with(tag),
			Some(actual) => actual == tag,
			None => false,
		}
	}
}

/// Display names grouped by major class, e.g. `{"Letter": ["Uppercase"]}`.
///
/// Buckets keep the order in which the oracle's tags first produced them.
pub type Classification = IndexMap<String, Vec<String>>;

fn major_names(major: char) -> Option<&'static [(char, &'static str)]> {
	CATEGORY_MAP.iter().find(|(letter, _)| *letter == major).map(|(_, names)| *names)
}

fn lookup(names: &[(char, &'static str)], key: char) -> Option<&'static str> {
	names.iter().find(|(k, _)| *k == key).map(|(_, name)| *name)
}

/// Groups every category `point` belongs to under its major display name.
///
/// Unknown minor letters render as `<Xx>`; unknown major letters collect the
/// raw tag under [`UNCLASSIFIED`].
pub fn classify(oracle: &dyn CategoryOracle, point: u32) -> Classification {
	let mut classes = Classification::new();

	for tag in oracle.tags() {
		if !oracle.contains(tag, point) {
			continue;
		}
		let mut letters = tag.chars();
		let Some(major) = letters.next() else {
			continue;
		};

		let Some(major_display) = major_names(major).and_then(|names| lookup(names, MAJOR_KEY)) else {
			classes.entry(UNCLASSIFIED.to_string()).or_default().push(tag.to_string());
			continue;
		};

		let minors = classes.entry(major_display.to_string()).or_default();
		let Some(minor) = letters.next() else {
			continue;
		};
		let name = major_names(major)
			.and_then(|names| lookup(names, minor))
			.map(str::to_string)
			.unwrap_or_else(|| format!("<{tag}>"));
		minors.push(name);
	}

	classes
}

/// Renders a classification as `"Major: minor, minor; Major"`.
pub fn render(classes: &Classification) -> String {
	classes
		.iter()
		.map(|(major, minors)| {
			if minors.is_empty() {
				major.clone()
			} else {
				format!("{major}: {}", minors.join(", "))
			}
		})
		.collect::<Vec<_>>()
		.join("; ")
}
