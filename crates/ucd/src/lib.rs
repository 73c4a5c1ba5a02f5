//! Unicode Character Database ingestion and lookup.
//!
//! This crate turns the UCD plain-text files into a cross-referenced index
//! of code point metadata:
//!
//! - **Blocks**: `Blocks.txt` ranges plus a catch-all `Other` block
//! - **Names**: `NamesList.txt` entries with their annotations (alternate
//!   names, remarks, cross references, approximate and equivalent forms)
//! - **Undefined nodes**: placeholders created on first lookup of a code
//!   point with no entry
//! - **Encoders**: UTF-8/16/32, C escapes, XML/HTML entities, JavaScript
//! - **Categories**: general category membership grouped for display
//!
//! [`Catalog`] owns the sources and the parsed tables:
//!
//! ```no_run
//! use glyphscope_ucd::{Catalog, Config};
//!
//! let catalog = Catalog::from_config(&Config::default(), None);
//! catalog.load()?;
//!
//! let node = catalog.lookup("00E9")?;
//! println!("{} ({})", node.name, catalog.category_label(node.point));
//! println!("{}", catalog.encode("UTF-8", node.point).unwrap_or_default());
//! # Ok::<(), glyphscope_ucd::UcdError>(())
//! ```

pub mod blocks;
pub mod catalog;
pub mod category;
pub mod config;
pub mod encode;
pub mod entities;
pub mod error;
pub mod names;
pub mod refs;
pub mod source;
pub mod table;

pub use blocks::{Block, MAX_POINT, OTHER_BLOCK};
pub use catalog::{Catalog, Reference, parse_code};
pub use category::{CategoryOracle, Classification, UnicodeProperties};
pub use config::Config;
pub use encode::Format;
pub use entities::EntityTable;
pub use error::{Result, UcdError};
pub use names::{AltForm, Node};
pub use refs::CodeRef;
pub use source::{CachedSource, Fetch, LineSource, StaticSource};
pub use table::{BlockTable, NameTable};
