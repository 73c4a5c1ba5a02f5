//! Named HTML character references.
//!
//! Built from the WHATWG `entities.json` list. Only entities that expand to
//! a single code point are kept; joined sequences have no single-point
//! lookup.

use std::collections::{BTreeSet, HashMap};

use serde::Deserialize;

use crate::error::Result;

#[derive(Debug, Deserialize)]
struct EntityDef {
	codepoints: Vec<u32>,
}

/// Code point to entity names (each including the leading `&`).
#[derive(Debug, Clone, Default)]
pub struct EntityTable {
	by_point: HashMap<u32, Vec<String>>,
}

impl EntityTable {
	/// Parses the JSON entity list.
	pub fn parse(json: &str) -> Result<Self> {
		let defs: HashMap<String, EntityDef> = serde_json::from_str(json)?;

		let mut grouped: HashMap<u32, BTreeSet<String>> = HashMap::new();
		for (name, def) in defs {
			let &[point] = def.codepoints.as_slice() else {
				continue;
			};
			let name = if name.starts_with('&') { name } else { format!("&{name}") };
			grouped.entry(point).or_default().insert(name);
		}

		let by_point = grouped
			.into_iter()
			.map(|(point, names)| (point, names.into_iter().collect()))
			.collect();
		Ok(Self { by_point })
	}

	/// Sorted entity names for `point`, empty if there are none.
	pub fn names(&self, point: u32) -> &[String] {
		self.by_point.get(&point).map(Vec::as_slice).unwrap_or(&[])
	}

	/// Number of code points with at least one name.
	pub fn len(&self) -> usize {
		self.by_point.len()
	}

	pub fn is_empty(&self) -> bool {
		self.by_point.is_empty()
	}
}
