//! Data source configuration.
//!
//! Configuration is TOML. Every field is optional:
//!
//! ```toml
//! data-dir = "/var/cache/glyphscope"
//! max-age-days = 30
//!
//! [blocks]
//! file = "Blocks.txt"
//! url = "https://www.unicode.org/Public/UCD/latest/ucd/Blocks.txt"
//!
//! [names-list]
//! file = "NamesList.txt"
//!
//! [entities]
//! file = "entities.json"
//! ```
//!
//! Relative `file` values are resolved against `data-dir`.

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;

use crate::error::{Result, UcdError};

pub const BLOCKS_URL: &str = "https://www.unicode.org/Public/UCD/latest/ucd/Blocks.txt";
pub const NAMES_LIST_URL: &str = "https://www.unicode.org/Public/UCD/latest/ucd/NamesList.txt";
pub const ENTITIES_URL: &str = "https://html.spec.whatwg.org/entities.json";

/// Default cache lifetime before a source is fetched again.
pub const DEFAULT_MAX_AGE_DAYS: u64 = 30;

/// Location of one data file and where to refresh it from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceConfig {
	pub file: PathBuf,
	pub url: String,
}

impl SourceConfig {
	fn new(file: &str, url: &str) -> Self {
		Self {
			file: PathBuf::from(file),
			url: url.to_string(),
		}
	}
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct PartialSource {
	file: Option<PathBuf>,
	url: Option<String>,
}

impl PartialSource {
	fn resolve(self, default: SourceConfig) -> SourceConfig {
		SourceConfig {
			file: self.file.unwrap_or(default.file),
			url: self.url.unwrap_or(default.url),
		}
	}
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
struct RawConfig {
	data_dir: Option<PathBuf>,
	max_age_days: Option<u64>,
	#[serde(default)]
	blocks: PartialSource,
	#[serde(default)]
	names_list: PartialSource,
	#[serde(default)]
	entities: PartialSource,
}

/// Where data files are cached and fetched from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
	pub data_dir: PathBuf,
	pub max_age_days: u64,
	pub blocks: SourceConfig,
	pub names_list: SourceConfig,
	pub entities: SourceConfig,
}

impl Default for Config {
	fn default() -> Self {
		Self {
			data_dir: default_data_dir(),
			max_age_days: DEFAULT_MAX_AGE_DAYS,
			blocks: SourceConfig::new("Blocks.txt", BLOCKS_URL),
			names_list: SourceConfig::new("NamesList.txt", NAMES_LIST_URL),
			entities: SourceConfig::new("entities.json", ENTITIES_URL),
		}
	}
}

/// `<cache dir>/glyphscope`, or `./data` when the platform has no cache
/// directory.
pub fn default_data_dir() -> PathBuf {
	dirs::cache_dir()
		.map(|dir| dir.join("glyphscope"))
		.unwrap_or_else(|| PathBuf::from("data"))
}

impl Config {
	/// Parses a TOML document, filling unset fields with defaults.
	pub fn parse(input: &str) -> Result<Self> {
		let raw: RawConfig = toml::from_str(input)?;
		let defaults = Config::default();
		Ok(Config {
			data_dir: raw.data_dir.unwrap_or(defaults.data_dir),
			max_age_days: raw.max_age_days.unwrap_or(defaults.max_age_days),
			blocks: raw.blocks.resolve(defaults.blocks),
			names_list: raw.names_list.resolve(defaults.names_list),
			entities: raw.entities.resolve(defaults.entities),
		})
	}

	/// Loads configuration from a file.
	pub fn load(path: impl AsRef<Path>) -> Result<Self> {
		let path = path.as_ref();
		let content = std::fs::read_to_string(path).map_err(|error| UcdError::Io {
			path: path.to_path_buf(),
			error,
		})?;
		Self::parse(&content)
	}

	/// Cache path of a source, resolved against `data_dir`.
	pub fn source_path(&self, source: &SourceConfig) -> PathBuf {
		self.data_dir.join(&source.file)
	}

	pub fn max_age(&self) -> Duration {
		Duration::from_secs(self.max_age_days.saturating_mul(24 * 60 * 60))
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn empty_document_uses_defaults() {
		let config = Config::parse("").unwrap();
		assert_eq!(config, Config::default());
		assert_eq!(config.max_age(), Duration::from_secs(30 * 24 * 60 * 60));
		assert_eq!(config.names_list.url, NAMES_LIST_URL);
	}

	#[test]
	fn overrides_are_merged_with_defaults() {
		let config = Config::parse(
			r#"
			data-dir = "/tmp/ucd"
			max-age-days = 7

			[names-list]
			file = "names/NamesList-16.txt"
			"#,
		)
		.unwrap();

		assert_eq!(config.data_dir, PathBuf::from("/tmp/ucd"));
		assert_eq!(config.max_age_days, 7);
		assert_eq!(
			config.source_path(&config.names_list),
			PathBuf::from("/tmp/ucd/names/NamesList-16.txt")
		);
		assert_eq!(config.names_list.url, NAMES_LIST_URL);
		assert_eq!(config.source_path(&config.blocks), PathBuf::from("/tmp/ucd/Blocks.txt"));
	}

	#[test]
	fn absolute_files_ignore_data_dir() {
		let config = Config::parse("data-dir = \"/tmp/ucd\"\n[blocks]\nfile = \"/srv/Blocks.txt\"\n").unwrap();
		assert_eq!(config.source_path(&config.blocks), PathBuf::from("/srv/Blocks.txt"));
	}

	#[test]
	fn unknown_keys_are_rejected() {
		assert!(matches!(Config::parse("colour = \"red\""), Err(UcdError::Config(_))));
	}

	#[test]
	fn load_reports_missing_file() {
		let dir = tempfile::tempdir().unwrap();
		let err = Config::load(dir.path().join("missing.toml")).unwrap_err();
		assert!(matches!(err, UcdError::Io { .. }));
	}
}
