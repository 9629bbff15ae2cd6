use std::cmp::Ordering;
use std::collections::BinaryHeap;

use super::{Quadtree, QuadtreeNode};
use crate::color::Color;

/// What collapsing a branch of four leaves into one leaf would produce.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Merge {
	/// Floor average of the four leaf colors.
	pub color: Color,
	/// Largest luminance difference between `color` and any of the four
	/// leaf colors it would replace.
	pub degradation: f64,
}

/// A mergeable branch queued for phi compression, addressed by the
/// quadrant indices leading to it from the root.
///
/// Ordered so that `BinaryHeap` pops the lowest degradation first, and
/// among equal degradations the one met first in a NW, NE, SE, SW depth
/// first walk. Mergeable branches never nest, so that walk order is the
/// lexicographic order of their paths.
#[derive(Debug)]
struct Candidate {
	path: Vec<u8>,
	merge: Merge,
}

impl Ord for Candidate {
	fn cmp(&self, other: &Self) -> Ordering {
		other.merge.degradation.total_cmp(&self.merge.degradation)
			.then_with(|| other.path.cmp(&self.path))
	}
}

impl PartialOrd for Candidate {
	fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
		Some(self.cmp(other))
	}
}

impl PartialEq for Candidate {
	fn eq(&self, other: &Self) -> bool {
		self.cmp(other) == Ordering::Equal
	}
}

impl Eq for Candidate {}

impl QuadtreeNode {
	/// Evaluates collapsing this node into a single leaf.
	///
	/// Returns `None` unless this is a branch whose four sections are
	/// all leaves.
	pub fn merge(&self) -> Option<Merge> {
		let sects = self.sections()?;
		let mut colors = [Color::default(); 4];
		for (slot, sect) in colors.iter_mut().zip(sects.iter()) {
			*slot = sect.color()?;
		}
		let color = Color::average(colors);
		let lum = color.luminance();
		let degradation = colors.iter()
			.map(|c| (lum - c.luminance()).abs())
			.fold(0., f64::max);
		Some(Merge { color, degradation })
	}

	/// Post-order: sections are compressed before their parent is judged,
	/// so merges cascade upwards within one pass.
	fn compress_lambda(&mut self, threshold: f64) {
		if let QuadtreeNode::Branch(sects) = self {
			sects.iter_mut().for_each(|s| s.compress_lambda(threshold));
		}
		if let Some(merge) = self.merge() {
			if merge.degradation < threshold {
				tracing::trace!(color = %merge.color, degradation = merge.degradation, "merged");
				*self = QuadtreeNode::Leaf(merge.color);
			}
		}
	}

	/// Pushes every mergeable branch at or below this node.
	fn collect_candidates(&self, path: &mut Vec<u8>, out: &mut BinaryHeap<Candidate>) {
		if let Some(merge) = self.merge() {
			out.push(Candidate { path: path.clone(), merge });
		} else if let QuadtreeNode::Branch(sects) = self {
			for (ind, sect) in sects.iter().enumerate() {
				path.push(ind as u8);
				sect.collect_candidates(path, out);
				path.pop();
			}
		}
	}

	pub(crate) fn node_at(&self, path: &[u8]) -> Option<&QuadtreeNode> {
		match path.split_first() {
			None => Some(self),
			Some((&ind, rest)) => self.sections()?.get(ind as usize)?.node_at(rest),
		}
	}

	pub(crate) fn node_at_mut(&mut self, path: &[u8]) -> Option<&mut QuadtreeNode> {
		match path.split_first() {
			None => Some(self),
			Some((&ind, rest)) => match self {
				QuadtreeNode::Branch(sects) => sects.get_mut(ind as usize)?.node_at_mut(rest),
				QuadtreeNode::Leaf(_) => None,
			},
		}
	}
}

impl Quadtree {
	/// Quality-threshold compression.
	///
	/// Every branch whose sections are (or become, during this pass) four
	/// leaves is replaced by a leaf of their average color if its
	/// degradation is strictly below `threshold`. A threshold of 0 never
	/// merges anything.
	pub fn compress_lambda(&mut self, threshold: u32) {
		let before = self.leaf_count();
		if let Some(ref mut root) = self.root {
			root.compress_lambda(threshold as f64);
		}
		tracing::debug!(threshold, before, after = self.leaf_count(), "lambda compression");
	}

	/// Leaf-budget compression.
	///
	/// Repeatedly collapses the mergeable branch with the lowest
	/// degradation (the first one in NW, NE, SE, SW depth first order on
	/// ties) until at most `target` leaves remain. Each collapse removes
	/// exactly three leaves. Stops early, leaving the budget unmet, once
	/// the whole tree is a single leaf.
	pub fn compress_phi(&mut self, target: usize) {
		let mut leaves = self.leaf_count();
		if leaves <= target {
			return;
		}
		let root = match self.root {
			Some(ref mut r) => r,
			None => return,
		};
		let mut queue = BinaryHeap::new();
		root.collect_candidates(&mut Vec::new(), &mut queue);

		// Collapsing a branch leaves every other candidate untouched; only
		// its parent can become newly mergeable.
		while leaves > target {
			let best = match queue.pop() {
				Some(c) => c,
				None => break,
			};
			if let Some(node) = root.node_at_mut(&best.path) {
				*node = QuadtreeNode::Leaf(best.merge.color);
			}
			leaves -= 3;
			tracing::debug!(
				depth = best.path.len(),
				color = %best.merge.color,
				degradation = best.merge.degradation,
				leaves,
				"pruned"
			);
			if let Some((_, parent_path)) = best.path.split_last() {
				if let Some(merge) = root.node_at(parent_path).and_then(QuadtreeNode::merge) {
					queue.push(Candidate { path: parent_path.to_vec(), merge });
				}
			}
		}
	}

	/// The collapse phi compression would perform next, if any.
	pub fn cheapest_merge(&self) -> Option<Merge> {
		let mut queue = BinaryHeap::new();
		self.root.as_ref()?.collect_candidates(&mut Vec::new(), &mut queue);
		queue.pop().map(|c| c.merge)
	}
}
