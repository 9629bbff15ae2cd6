use super::{height, PaletteNode};

impl PaletteNode {
	pub(super) fn update_height(&mut self) {
		self.height = 1 + height(&self.left).max(height(&self.right));
	}

	/// `height(right) - height(left)`.
	pub(super) fn balance(&self) -> i64 {
		height(&self.right) as i64 - height(&self.left) as i64
	}
}

/// Lifts the left child into this node's place.
///
/// Returns the node unchanged if it has no left child.
fn rotate_right(mut node: Box<PaletteNode>) -> Box<PaletteNode> {
	let mut pivot = match node.left.take() {
		Some(p) => p,
		None => return node,
	};
	node.left = pivot.right.take();
	node.update_height();
	pivot.right = Some(node);
	pivot.update_height();
	pivot
}

/// Lifts the right child into this node's place.
///
/// Returns the node unchanged if it has no right child.
fn rotate_left(mut node: Box<PaletteNode>) -> Box<PaletteNode> {
	let mut pivot = match node.right.take() {
		Some(p) => p,
		None => return node,
	};
	node.right = pivot.left.take();
	node.update_height();
	pivot.left = Some(node);
	pivot.update_height();
	pivot
}

/// Recomputes the height of `node` and restores the AVL invariant at it,
/// assuming both subtrees are already balanced.
///
/// Rotations are chosen from the children's own balance, not from the key
/// that was inserted or removed, so this is valid after deletions too.
pub(super) fn rebalance(mut node: Box<PaletteNode>) -> Box<PaletteNode> {
	node.update_height();
	let balance = node.balance();
	if balance < -1 {
		if let Some(left) = node.left.take() {
			node.left = Some(if left.balance() > 0 { rotate_left(left) } else { left });
		}
		rotate_right(node)
	} else if balance > 1 {
		if let Some(right) = node.right.take() {
			node.right = Some(if right.balance() < 0 { rotate_right(right) } else { right });
		}
		rotate_left(node)
	} else {
		node
	}
}
