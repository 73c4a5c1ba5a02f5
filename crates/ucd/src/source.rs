//! Line-oriented data sources.
//!
//! Parsers only ever see an ordered list of lines. [`CachedSource`] applies
//! the cache-or-fetch policy on top of a local file; the network client
//! behind [`Fetch`] is supplied by the embedding application.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::{Duration, SystemTime};
use std::{fs, io};

use tracing::{debug, warn};

use crate::error::{Result, UcdError};

/// An ordered sequence of text lines.
pub trait LineSource: Send + Sync {
	/// Display name used in diagnostics (e.g. `Blocks.txt`).
	fn name(&self) -> &str;

	/// Reads every line, without trailing newlines.
	fn lines(&self) -> Result<Vec<String>>;
}

/// Retrieves fresh bytes for a URL.
pub trait Fetch: Send + Sync {
	fn fetch(&self, url: &str) -> io::Result<Vec<u8>>;
}

/// Splits text into lines, dropping the `\r` of CRLF endings.
pub fn split_lines(text: &str) -> Vec<String> {
	text.split('\n').map(|line| line.strip_suffix('\r').unwrap_or(line).to_string()).collect()
}

/// Source backed by text held in memory.
#[derive(Debug, Clone)]
pub struct StaticSource {
	name: String,
	text: String,
}

impl StaticSource {
	pub fn new(name: impl Into<String>, text: impl Into<String>) -> Self {
		Self {
			name: name.into(),
			text: text.into(),
		}
	}
}

impl LineSource for StaticSource {
	fn name(&self) -> &str {
		&self.name
	}

	fn lines(&self) -> Result<Vec<String>> {
		Ok(split_lines(&self.text))
	}
}

/// Source backed by a cache file that is refreshed from `url` once it is
/// older than `max_age`.
///
/// A failed or unavailable fetch falls back to the stale cache. Only when
/// neither exists does reading fail with [`UcdError::SourceUnavailable`].
#[derive(Clone)]
pub struct CachedSource {
	name: String,
	path: PathBuf,
	url: String,
	max_age: Duration,
	fetcher: Option<Arc<dyn Fetch>>,
}

impl std::fmt::Debug for CachedSource {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("CachedSource")
			.field("name", &self.name)
			.field("path", &self.path)
			.field("url", &self.url)
			.field("max_age", &self.max_age)
			.field("fetcher", &self.fetcher.is_some())
			.finish()
	}
}

impl CachedSource {
	/// Creates a source named after the cache file's name.
	pub fn new(path: impl Into<PathBuf>, url: impl Into<String>, max_age: Duration) -> Self {
		let path = path.into();
		let name = path
			.file_name()
			.map(|n| n.to_string_lossy().into_owned())
			.unwrap_or_else(|| path.display().to_string());
		Self {
			name,
			path,
			url: url.into(),
			max_age,
			fetcher: None,
		}
	}

	/// Attaches the client used to refresh stale caches.
	pub fn with_fetcher(mut self, fetcher: Arc<dyn Fetch>) -> Self {
		self.fetcher = Some(fetcher);
		self
	}

	fn is_fresh(&self) -> bool {
		let Ok(modified) = fs::metadata(&self.path).and_then(|m| m.modified()) else {
			return false;
		};
		SystemTime::now()
			.duration_since(modified)
			.map(|age| age < self.max_age)
			.unwrap_or(true)
	}

	fn read_cache(&self) -> Result<String> {
		match fs::read_to_string(&self.path) {
			Ok(text) => Ok(text),
			Err(e) if e.kind() == io::ErrorKind::NotFound => Err(UcdError::SourceUnavailable {
				name: self.name.clone(),
			}),
			Err(error) => Err(UcdError::Io {
				path: self.path.clone(),
				error,
			}),
		}
	}

	fn write_cache(&self, data: &[u8]) -> Result<()> {
		let io_err = |error| UcdError::Io {
			path: self.path.clone(),
			error,
		};
		if let Some(parent) = self.path.parent()
			&& !parent.as_os_str().is_empty()
		{
			fs::create_dir_all(parent).map_err(io_err)?;
		}
		fs::write(&self.path, data).map_err(io_err)
	}

	fn refresh(&self, fetcher: &dyn Fetch) -> Option<String> {
		debug!(source = %self.name, url = %self.url, "fetching");
		match fetcher.fetch(&self.url) {
			Ok(data) => {
				if let Err(e) = self.write_cache(&data) {
					warn!(source = %self.name, error = %e, "could not update cache");
				}
				Some(String::from_utf8_lossy(&data).into_owned())
			}
			Err(e) => {
				warn!(source = %self.name, url = %self.url, error = %e, "fetch failed, using cached copy");
				None
			}
		}
	}
}

impl LineSource for CachedSource {
	fn name(&self) -> &str {
		&self.name
	}

	fn lines(&self) -> Result<Vec<String>> {
		if self.is_fresh() {
			debug!(source = %self.name, path = %self.path.display(), "using cache");
			return self.read_cache().map(|text| split_lines(&text));
		}

		if let Some(text) = self.fetcher.as_deref().and_then(|f| self.refresh(f)) {
			return Ok(split_lines(&text));
		}

		if self.fetcher.is_none() && self.path.exists() {
			warn!(source = %self.name, path = %self.path.display(), "cache is stale and no fetcher is configured");
		}
		self.read_cache().map(|text| split_lines(&text))
	}
}

#[cfg(test)]
mod tests {
	use std::path::Path;
	use std::sync::atomic::{AtomicUsize, Ordering};

	use super::*;

	const DAY: Duration = Duration::from_secs(24 * 60 * 60);

	struct CountingFetch {
		calls: AtomicUsize,
		body: Option<&'static str>,
	}

	impl CountingFetch {
		fn new(body: Option<&'static str>) -> Arc<Self> {
			Arc::new(Self {
				calls: AtomicUsize::new(0),
				body,
			})
		}
	}

	impl Fetch for CountingFetch {
		fn fetch(&self, _url: &str) -> io::Result<Vec<u8>> {
			self.calls.fetch_add(1, Ordering::SeqCst);
			self.body
				.map(|b| b.as_bytes().to_vec())
				.ok_or_else(|| io::Error::other("offline"))
		}
	}

	fn age(path: &Path, by: Duration) {
		let file = fs::File::options().write(true).open(path).unwrap();
		file.set_modified(SystemTime::now() - by).unwrap();
	}

	#[test]
	fn split_lines_strips_carriage_returns() {
		assert_eq!(split_lines("a\r\nb\n"), ["a", "b", ""]);
	}

	#[test]
	fn fresh_cache_is_used_without_fetching() {
		let dir = tempfile::tempdir().unwrap();
		let path = dir.path().join("Blocks.txt");
		fs::write(&path, "cached").unwrap();

		let fetch = CountingFetch::new(Some("fresh"));
		let source = CachedSource::new(&path, "http://example.invalid", 30 * DAY).with_fetcher(fetch.clone());

		assert_eq!(source.name(), "Blocks.txt");
		assert_eq!(source.lines().unwrap(), ["cached"]);
		assert_eq!(fetch.calls.load(Ordering::SeqCst), 0);
	}

	#[test]
	fn stale_cache_is_refreshed_and_persisted() {
		let dir = tempfile::tempdir().unwrap();
		let path = dir.path().join("Blocks.txt");
		fs::write(&path, "cached").unwrap();
		age(&path, 31 * DAY);

		let fetch = CountingFetch::new(Some("fresh"));
		let source = CachedSource::new(&path, "http://example.invalid", 30 * DAY).with_fetcher(fetch.clone());

		assert_eq!(source.lines().unwrap(), ["fresh"]);
		assert_eq!(fetch.calls.load(Ordering::SeqCst), 1);
		assert_eq!(fs::read_to_string(&path).unwrap(), "fresh");
	}

	#[test]
	fn missing_cache_is_created_in_nested_directory() {
		let dir = tempfile::tempdir().unwrap();
		let path = dir.path().join("data").join("ucd").join("NamesList.txt");

		let source = CachedSource::new(&path, "http://example.invalid", 30 * DAY)
			.with_fetcher(CountingFetch::new(Some("0000\t<control>")));

		assert_eq!(source.lines().unwrap(), ["0000\t<control>"]);
		assert!(path.exists());
	}

	#[test]
	fn failed_fetch_falls_back_to_stale_cache() {
		let dir = tempfile::tempdir().unwrap();
		let path = dir.path().join("Blocks.txt");
		fs::write(&path, "stale").unwrap();
		age(&path, 90 * DAY);

		let source =
			CachedSource::new(&path, "http://example.invalid", 30 * DAY).with_fetcher(CountingFetch::new(None));

		assert_eq!(source.lines().unwrap(), ["stale"]);
	}

	#[test]
	fn stale_cache_without_fetcher_is_used() {
		let dir = tempfile::tempdir().unwrap();
		let path = dir.path().join("NamesList.txt");
		fs::write(&path, "stale").unwrap();
		age(&path, 90 * DAY);

		let source = CachedSource::new(&path, "http://example.invalid", 30 * DAY);
		assert_eq!(source.lines().unwrap(), ["stale"]);
		assert_eq!(fs::read_to_string(&path).unwrap(), "stale");
	}

	#[test]
	fn nothing_available_is_an_error() {
		let dir = tempfile::tempdir().unwrap();
		let path = dir.path().join("Blocks.txt");

		let source =
			CachedSource::new(&path, "http://example.invalid", 30 * DAY).with_fetcher(CountingFetch::new(None));
		assert!(matches!(source.lines(), Err(UcdError::SourceUnavailable { .. })));

		let offline = CachedSource::new(&path, "http://example.invalid", 30 * DAY);
		assert!(matches!(offline.lines(), Err(UcdError::SourceUnavailable { .. })));
	}
}
