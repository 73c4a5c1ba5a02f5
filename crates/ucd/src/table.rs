//! Shared block and name tables.
//!
//! Both tables are read-mostly. The only writer after loading is undefined
//! node synthesis, which takes the name lock and then the block lock so a
//! new node appears in both tables at once.

use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::{RwLock, RwLockReadGuard};

use crate::blocks::Block;
use crate::names::{Node, canonical_code};

/// Ordered block list. Only the `nodes` membership changes after loading.
#[derive(Debug, Default)]
pub struct BlockTable {
	blocks: RwLock<Vec<Block>>,
}

impl BlockTable {
	pub fn new(blocks: Vec<Block>) -> Self {
		Self {
			blocks: RwLock::new(blocks),
		}
	}

	/// Read access to the block list.
	pub fn read(&self) -> RwLockReadGuard<'_, Vec<Block>> {
		self.blocks.read()
	}

	/// Copy of the current block list.
	pub fn snapshot(&self) -> Vec<Block> {
		self.blocks.read().clone()
	}

	pub fn get(&self, idx: usize) -> Option<Block> {
		self.blocks.read().get(idx).cloned()
	}

	pub fn len(&self) -> usize {
		self.blocks.read().len()
	}

	pub fn is_empty(&self) -> bool {
		self.blocks.read().is_empty()
	}

	/// Files parsed nodes under their assigned blocks, in order.
	pub(crate) fn file_nodes<'a>(&self, nodes: impl IntoIterator<Item = &'a Node>) {
		let mut blocks = self.blocks.write();
		for node in nodes {
			if let Some(block) = blocks.get_mut(node.block) {
				block.nodes.push(node.code.clone());
			}
		}
	}
}

/// Code string to node.
#[derive(Debug, Default)]
pub struct NameTable {
	nodes: RwLock<HashMap<String, Arc<Node>>>,
}

impl NameTable {
	pub fn new(nodes: impl IntoIterator<Item = Node>) -> Self {
		let nodes = nodes.into_iter().map(|n| (n.code.clone(), Arc::new(n))).collect();
		Self {
			nodes: RwLock::new(nodes),
		}
	}

	pub fn get(&self, code: &str) -> Option<Arc<Node>> {
		self.nodes.read().get(code).cloned()
	}

	pub fn contains(&self, code: &str) -> bool {
		self.nodes.read().contains_key(code)
	}

	pub fn len(&self) -> usize {
		self.nodes.read().len()
	}

	pub fn is_empty(&self) -> bool {
		self.nodes.read().is_empty()
	}

	/// Returns the node for `point`, creating an undefined placeholder if
	/// none exists.
	///
	/// The placeholder is appended to every block containing `point` and is
	/// assigned the narrowest of them. Repeated calls for the same point
	/// return the first placeholder and leave the tables untouched.
	pub fn synthesize(&self, blocks: &BlockTable, point: u32) -> Arc<Node> {
		let code = canonical_code(point);
		let mut nodes = self.nodes.write();
		if let Some(existing) = nodes.get(&code) {
			return existing.clone();
		}

		let mut blocks = blocks.blocks.write();
		let node = Arc::new(Node::undefined(point, &blocks));
		for block in blocks.iter_mut().filter(|b| b.contains(point)) {
			block.nodes.push(code.clone());
		}
		tracing::debug!(code = %code, block = node.block, "synthesized undefined node");

		nodes.insert(code, node.clone());
		node
	}
}
