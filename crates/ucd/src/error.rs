//! Error types for data ingestion and lookup.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while loading or querying Unicode data.
#[derive(Debug, Error)]
pub enum UcdError {
	/// Error reading or writing a cached data file.
	#[error("I/O error on {path}: {error}")]
	Io {
		/// Path of the file that failed.
		path: PathBuf,
		/// The underlying I/O error.
		error: std::io::Error,
	},

	/// A data file no longer matches the expected grammar.
	#[error("{source_name}:{line}: {reason}: {text:?}")]
	Malformed {
		/// Name of the source being parsed (e.g. `Blocks.txt`).
		source_name: String,
		/// 1-based line number within the source.
		line: usize,
		/// The offending line.
		text: String,
		/// What was wrong with it.
		reason: &'static str,
	},

	/// Neither a fresh fetch nor a cached copy could be obtained.
	#[error("data source unavailable: {name}")]
	SourceUnavailable {
		/// Name of the source.
		name: String,
	},

	/// The HTML entity list could not be decoded.
	#[error("invalid entity list: {0}")]
	Entities(#[from] serde_json::Error),

	/// The configuration file could not be decoded.
	#[error("invalid configuration: {0}")]
	Config(#[from] toml::de::Error),

	/// A lookup was attempted before the block and name tables were loaded.
	#[error("unicode tables are not loaded yet")]
	NotLoaded,

	/// A code string was not a hex code point in the displayable range.
	#[error("invalid code point: {0}")]
	InvalidCode(String),
}

impl UcdError {
	pub(crate) fn malformed(source_name: &str, line: usize, text: &str, reason: &'static str) -> Self {
		Self::Malformed {
			source_name: source_name.to_string(),
			line,
			text: text.to_string(),
			reason,
		}
	}
}

/// Result type for Unicode data operations.
pub type Result<T> = std::result::Result<T, UcdError>;
