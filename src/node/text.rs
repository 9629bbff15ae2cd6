use std::fmt;

use super::{Quadtree, QuadtreeNode};

/// Parenthesized dump: a leaf is its `rrggbb` color, a branch is
/// `(NW NE SE SW)`.
impl fmt::Display for QuadtreeNode {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			QuadtreeNode::Leaf(c) => write!(f, "{}", c),
			QuadtreeNode::Branch(sects) => {
				write!(f, "({} {} {} {})", sects[0], sects[1], sects[2], sects[3])
			}
		}
	}
}

/// Same as the root node's dump; the empty tree is a single space.
impl fmt::Display for Quadtree {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self.root {
			Some(ref root) => write!(f, "{}", root),
			None => f.write_str(" "),
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::node::tests::*;
	use image::{Rgb, RgbImage};

	#[test]
	fn dumps_leaf_as_hex() {
		let tree = Quadtree::from_image(&RgbImage::from_pixel(8, 8, Rgb([0xab, 0x01, 0xff]))).unwrap();
		assert_eq!(tree.to_string(), "ab01ff");
	}

	#[test]
	fn dumps_branches_in_quadrant_order() {
		let tree = Quadtree::from_image(&four_quadrants(RED, GREEN, BLUE, WHITE)).unwrap();
		assert_eq!(tree.to_string(), "(ff0000 00ff00 0000ff ffffff)");
	}

	#[test]
	fn dumps_nested_branches() {
		let img = RgbImage::from_fn(4, 4, |x, y| {
			if (x, y) == (3, 0) { Rgb([1, 1, 1]) } else { Rgb([0, 0, 0]) }
		});
		let tree = Quadtree::from_image(&img).unwrap();
		assert_eq!(
			tree.to_string(),
			"(000000 (000000 010101 000000 000000) 000000 000000)"
		);
	}

	#[test]
	fn dumps_empty_tree_as_space() {
		assert_eq!(Quadtree::default().to_string(), " ");
	}
}
