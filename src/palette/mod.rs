//! Deduplicated, ordered set of the colors of an image, kept as an AVL tree.

mod balance;

use std::cmp::Ordering;
use std::fmt;

use crate::color::Color;
use crate::node::Quadtree;
use crate::raster::Raster;

type Link = Option<Box<PaletteNode>>;

#[derive(Clone, Debug)]
struct PaletteNode {
	color: Color,
	left: Link,
	right: Link,
	/// Height of the subtree rooted here; a node without children is 1.
	height: u32,
}

/// An AVL tree of distinct colors, ordered by `Color`'s lexicographic
/// `(r, g, b)` order.
#[derive(Clone, Debug, Default)]
pub struct PaletteTree {
	root: Link,
	len: usize,
}

fn height(link: &Link) -> u32 {
	link.as_ref().map_or(0, |n| n.height)
}

impl PaletteNode {
	fn new(color: Color) -> Self {
		PaletteNode { color, left: None, right: None, height: 1 }
	}
}

/// Inserts `color` below `link`, returning the new subtree root and
/// whether the color was absent.
fn insert(link: Link, color: Color) -> (Box<PaletteNode>, bool) {
	let mut node = match link {
		Some(n) => n,
		None => return (Box::new(PaletteNode::new(color)), true),
	};
	let inserted = match color.cmp(&node.color) {
		Ordering::Less => {
			let (child, inserted) = insert(node.left.take(), color);
			node.left = Some(child);
			inserted
		}
		Ordering::Greater => {
			let (child, inserted) = insert(node.right.take(), color);
			node.right = Some(child);
			inserted
		}
		Ordering::Equal => return (node, false),
	};
	(balance::rebalance(node), inserted)
}

/// Removes `color` from below `link`, returning the new subtree root and
/// whether the color was present.
fn remove(link: Link, color: &Color) -> (Link, bool) {
	let mut node = match link {
		Some(n) => n,
		None => return (None, false),
	};
	match color.cmp(&node.color) {
		Ordering::Less => {
			let (child, removed) = remove(node.left.take(), color);
			node.left = child;
			(Some(balance::rebalance(node)), removed)
		}
		Ordering::Greater => {
			let (child, removed) = remove(node.right.take(), color);
			node.right = child;
			(Some(balance::rebalance(node)), removed)
		}
		Ordering::Equal => match (node.left.take(), node.right.take()) {
			(None, None) => (None, true),
			(Some(child), None) | (None, Some(child)) => (Some(child), true),
			(Some(left), Some(right)) => {
				// Two children: take the in-order successor's color.
				let successor = min_color(&right);
				let (right, _) = remove(Some(right), &successor);
				node.color = successor;
				node.left = Some(left);
				node.right = right;
				(Some(balance::rebalance(node)), true)
			}
		},
	}
}

fn min_color(mut node: &PaletteNode) -> Color {
	while let Some(ref left) = node.left {
		node = &**left;
	}
	node.color
}

fn collect(link: &Link, out: &mut Vec<Color>) {
	if let Some(n) = link {
		collect(&n.left, out);
		out.push(n.color);
		collect(&n.right, out);
	}
}

impl PaletteTree {
	pub fn new() -> Self {
		Default::default()
	}

	/// Builds the palette of every pixel color in `img`.
	pub fn from_image<R: Raster + ?Sized>(img: &R) -> Self {
		let mut palette = PaletteTree::new();
		for x in 0..img.width() {
			for y in 0..img.height() {
				palette.insert(img.color_at(x, y));
			}
		}
		tracing::debug!(colors = palette.len(), "built palette from image");
		palette
	}

	/// Builds the palette of the leaf colors of `tree`, inserted in
	/// NW, NE, SE, SW depth first order.
	pub fn from_quadtree(tree: &Quadtree) -> Self {
		let palette = tree.leaf_colors().into_iter().collect::<PaletteTree>();
		tracing::debug!(colors = palette.len(), leaves = tree.leaf_count(), "built palette from quadtree");
		palette
	}

	/// Adds `color`, returning `false` if it was already present.
	pub fn insert(&mut self, color: Color) -> bool {
		let (root, inserted) = insert(self.root.take(), color);
		self.root = Some(root);
		if inserted {
			self.len += 1;
		}
		inserted
	}

	pub fn contains(&self, color: &Color) -> bool {
		let mut curr = &self.root;
		while let Some(n) = curr {
			curr = match color.cmp(&n.color) {
				Ordering::Less => &n.left,
				Ordering::Greater => &n.right,
				Ordering::Equal => return true,
			};
		}
		false
	}

	/// Removes `color`, returning `false` if it wasn't present.
	pub fn remove(&mut self, color: &Color) -> bool {
		let (root, removed) = remove(self.root.take(), color);
		self.root = root;
		if removed {
			self.len -= 1;
		}
		removed
	}

	pub fn len(&self) -> usize {
		self.len
	}

	pub fn is_empty(&self) -> bool {
		self.root.is_none()
	}

	/// Height of the tree; 0 when empty.
	pub fn height(&self) -> u32 {
		height(&self.root)
	}

	/// All colors in ascending order.
	pub fn colors(&self) -> Vec<Color> {
		let mut out = Vec::with_capacity(self.len);
		collect(&self.root, &mut out);
		out
	}
}

impl Extend<Color> for PaletteTree {
	fn extend<I: IntoIterator<Item = Color>>(&mut self, iter: I) {
		for color in iter {
			self.insert(color);
		}
	}
}

impl std::iter::FromIterator<Color> for PaletteTree {
	fn from_iter<I: IntoIterator<Item = Color>>(iter: I) -> Self {
		let mut palette = PaletteTree::new();
		palette.extend(iter);
		palette
	}
}

impl fmt::Display for PaletteNode {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		if self.left.is_none() && self.right.is_none() {
			return write!(f, "{}", self.color);
		}
		f.write_str("(")?;
		if let Some(ref left) = self.left {
			write!(f, "{} ", left)?;
		}
		write!(f, "{}", self.color)?;
		if let Some(ref right) = self.right {
			write!(f, " {}", right)?;
		}
		f.write_str(")")
	}
}

/// In-order parenthesized dump: a node with children is
/// `(LEFT COLOR RIGHT)`, with absent sides omitted; the empty tree is `()`.
impl fmt::Display for PaletteTree {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self.root {
			Some(ref root) => write!(f, "{}", root),
			None => f.write_str("()"),
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::node::tests::*;
	use image::{Rgb, RgbImage};
	use rand::{rngs::StdRng, Rng, SeedableRng};
	use std::collections::BTreeSet;

	fn gray(v: u8) -> Color {
		Color::new(v, v, v)
	}

	/// Checks ordering, stored heights and balance of every node; returns
	/// the subtree height.
	fn check(link: &Link, lo: Option<Color>, hi: Option<Color>) -> u32 {
		let n = match link {
			Some(n) => n,
			None => return 0,
		};
		assert!(lo.map_or(true, |lo| n.color > lo));
		assert!(hi.map_or(true, |hi| n.color < hi));
		let lh = check(&n.left, lo, Some(n.color));
		let rh = check(&n.right, Some(n.color), hi);
		assert!((rh as i64 - lh as i64).abs() <= 1, "unbalanced at {}", n.color);
		assert_eq!(n.height, 1 + lh.max(rh));
		n.height
	}

	fn check_tree(palette: &PaletteTree) {
		check(&palette.root, None, None);
		assert_eq!(palette.colors().len(), palette.len());
	}

	#[test]
	fn empty_palette() {
		let palette = PaletteTree::new();
		assert!(palette.is_empty());
		assert_eq!(palette.height(), 0);
		assert_eq!(palette.to_string(), "()");
		assert!(!palette.contains(&RED));
	}

	#[test]
	fn single_color_dumps_bare_hex() {
		let palette = std::iter::once(RED).collect::<PaletteTree>();
		assert_eq!(palette.to_string(), "ff0000");
	}

	#[test]
	fn dump_puts_color_between_subtrees() {
		let palette = [gray(2), gray(1), gray(3)].into_iter().collect::<PaletteTree>();
		assert_eq!(palette.to_string(), "(010101 020202 030303)");

		let mut palette = [gray(2), gray(1)].into_iter().collect::<PaletteTree>();
		assert_eq!(palette.to_string(), "(010101 020202)");
		palette.remove(&gray(1));
		palette.insert(gray(3));
		assert_eq!(palette.to_string(), "(020202 030303)");
	}

	#[test]
	fn ascending_inserts_rotate_left() {
		let palette = (1..=3).map(gray).collect::<PaletteTree>();
		assert_eq!(palette.to_string(), "(010101 020202 030303)");
		assert_eq!(palette.height(), 2);
	}

	#[test]
	fn descending_inserts_rotate_right() {
		let palette = (1..=3).rev().map(gray).collect::<PaletteTree>();
		assert_eq!(palette.to_string(), "(010101 020202 030303)");
	}

	#[test]
	fn zig_zag_inserts_double_rotate() {
		let palette = [gray(3), gray(1), gray(2)].into_iter().collect::<PaletteTree>();
		assert_eq!(palette.to_string(), "(010101 020202 030303)");
		let palette = [gray(1), gray(3), gray(2)].into_iter().collect::<PaletteTree>();
		assert_eq!(palette.to_string(), "(010101 020202 030303)");
	}

	#[test]
	fn duplicates_are_ignored() {
		let mut palette = [gray(5), gray(9), gray(1)].into_iter().collect::<PaletteTree>();
		let before = palette.to_string();
		assert!(!palette.insert(gray(9)));
		assert_eq!(palette.to_string(), before);
		assert_eq!(palette.len(), 3);
	}

	#[test]
	fn search_follows_lexicographic_order() {
		let palette = [Color::new(1, 0, 0), Color::new(0, 255, 255), Color::new(0, 1, 0)]
			.into_iter()
			.collect::<PaletteTree>();
		assert!(palette.contains(&Color::new(0, 1, 0)));
		assert!(!palette.contains(&Color::new(0, 0, 1)));
		assert_eq!(palette.colors(), vec![
			Color::new(0, 1, 0),
			Color::new(0, 255, 255),
			Color::new(1, 0, 0),
		]);
	}

	#[test]
	fn removing_node_with_two_children_uses_successor() {
		let mut palette = (1..=7).map(gray).collect::<PaletteTree>();
		assert_eq!(
			palette.to_string(),
			"((010101 020202 030303) 040404 (050505 060606 070707))"
		);
		assert!(palette.remove(&gray(4)));
		assert_eq!(
			palette.to_string(),
			"((010101 020202 030303) 050505 (060606 070707))"
		);
		assert!(!palette.remove(&gray(4)));
		check_tree(&palette);
	}

	#[test]
	fn removal_rebalances_without_the_removed_key() {
		// Removing 1 leaves the root right-heavy with a left-leaning right
		// child, which needs a double rotation.
		let mut palette = [gray(2), gray(1), gray(4), gray(3)].into_iter().collect::<PaletteTree>();
		assert!(palette.remove(&gray(1)));
		assert_eq!(palette.to_string(), "(020202 030303 040404)");
		check_tree(&palette);
	}

	#[test]
	fn removing_everything_empties_the_tree() {
		let mut palette = (0..20).map(gray).collect::<PaletteTree>();
		for v in (0..20).rev() {
			assert!(palette.remove(&gray(v)));
			check_tree(&palette);
		}
		assert!(palette.is_empty());
		assert_eq!(palette.to_string(), "()");
	}

	#[test]
	fn random_operations_keep_set_semantics_and_balance() {
		let mut rng = StdRng::seed_from_u64(42);
		let mut palette = PaletteTree::new();
		let mut model = BTreeSet::new();
		for _ in 0..3000 {
			let color = Color::new(rng.random_range(0..4), rng.random_range(0..8), rng.random_range(0..8));
			if rng.random_bool(0.6) {
				assert_eq!(palette.insert(color), model.insert(color));
			} else {
				assert_eq!(palette.remove(&color), model.remove(&color));
			}
			assert_eq!(palette.len(), model.len());
		}
		check_tree(&palette);
		assert_eq!(palette.colors(), model.iter().copied().collect::<Vec<_>>());
		for r in 0..4 {
			for g in 0..8 {
				let color = Color::new(r, g, 3);
				assert_eq!(palette.contains(&color), model.contains(&color));
			}
		}
	}

	#[test]
	fn image_and_quadtree_palettes_hold_the_same_colors() {
		let img = RgbImage::from_fn(8, 8, |x, y| Rgb([(x / 2) as u8 * 40, (y / 4) as u8 * 90, 7]));
		let from_image = PaletteTree::from_image(&img);
		let tree = Quadtree::from_image(&img).unwrap();
		let from_tree = PaletteTree::from_quadtree(&tree);
		assert_eq!(from_image.len(), 8);
		assert_eq!(from_image.colors(), from_tree.colors());
		check_tree(&from_image);
		check_tree(&from_tree);
	}

	#[test]
	fn quadtree_palette_follows_leaf_order() {
		let tree = Quadtree::from_image(&four_quadrants(RED, GREEN, BLUE, WHITE)).unwrap();
		let palette = PaletteTree::from_quadtree(&tree);
		// Inserted ff0000, 00ff00, 0000ff, ffffff.
		assert_eq!(palette.to_string(), "(0000ff 00ff00 (ff0000 ffffff))");
	}
}
