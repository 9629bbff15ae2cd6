pub mod error;

use crate::color::Color;
use crate::raster::Raster;

/// Node in a quadtree for storing an image.
///
/// A leaf is a square region of a single color. A branch splits its region
/// into four equal quadrants, stored in the order NW, NE, SE, SW.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum QuadtreeNode {
	Leaf(Color),
	Branch(Box<[QuadtreeNode; 4]>),
}

/// A quadtree covering a square image with a power-of-two side.
///
/// The default value is the empty tree, which has no root.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Quadtree {
	root: Option<QuadtreeNode>,
	size: u32,
}

impl QuadtreeNode {
	pub fn is_leaf(&self) -> bool {
		matches!(self, QuadtreeNode::Leaf(_))
	}

	/// The color of a leaf; `None` for a branch.
	pub fn color(&self) -> Option<Color> {
		match self {
			QuadtreeNode::Leaf(c) => Some(*c),
			QuadtreeNode::Branch(_) => None,
		}
	}

	/// The four quadrants of a branch; `None` for a leaf.
	pub fn sections(&self) -> Option<&[QuadtreeNode; 4]> {
		match self {
			QuadtreeNode::Leaf(_) => None,
			QuadtreeNode::Branch(sects) => Some(sects),
		}
	}

	/// Recursively builds the node covering the `size`-sided square whose
	/// top left corner is at `(x, y)`.
	///
	/// Four equally colored leaves are collapsed into one, so a uniform
	/// region of any size ends up as a single leaf.
	fn build<R: Raster + ?Sized>(raster: &R, x: u32, y: u32, size: u32) -> QuadtreeNode {
		if size == 1 {
			return QuadtreeNode::Leaf(raster.color_at(x, y));
		}
		let half = size / 2;
		let sects = quadrant_origins(x, y, half)
			.map(|(qx, qy)| QuadtreeNode::build(raster, qx, qy, half));
		match sects[0].color() {
			Some(c) if sects.iter().all(|s| s.color() == Some(c)) => QuadtreeNode::Leaf(c),
			_ => QuadtreeNode::Branch(Box::new(sects)),
		}
	}

	fn leaf_count(&self) -> usize {
		match self {
			QuadtreeNode::Leaf(_) => 1,
			QuadtreeNode::Branch(sects) => sects.iter().map(QuadtreeNode::leaf_count).sum(),
		}
	}

	fn collect_leaf_colors(&self, out: &mut Vec<Color>) {
		match self {
			QuadtreeNode::Leaf(c) => out.push(*c),
			QuadtreeNode::Branch(sects) => sects.iter().for_each(|s| s.collect_leaf_colors(out)),
		}
	}
}

/// Top left corners of the four `half`-sided quadrants of the square at
/// `(x, y)`, in NW, NE, SE, SW order.
pub(crate) fn quadrant_origins(x: u32, y: u32, half: u32) -> [(u32, u32); 4] {
	[
		(x, y),
		(x + half, y),
		(x + half, y + half),
		(x, y + half),
	]
}

impl Quadtree {
	/// Analyzes an image into a quadtree.
	///
	/// Fails if the image is not a square whose side is a positive power
	/// of two; no tree is produced in that case.
	pub fn from_image<R: Raster + ?Sized>(img: &R) -> Result<Quadtree, error::BuildError> {
		let (width, height) = (img.width(), img.height());
		if width != height || !width.is_power_of_two() {
			return Err(error::BuildError::InvalidDimensions { width, height });
		}
		let root = QuadtreeNode::build(img, 0, 0, width);
		let tree = Quadtree { root: Some(root), size: width };
		tracing::debug!(size = width, leaves = tree.leaf_count(), "built quadtree");
		Ok(tree)
	}

	/// Side length, in pixels, of the image this tree covers.
	pub fn size(&self) -> u32 {
		self.size
	}

	pub fn root(&self) -> Option<&QuadtreeNode> {
		self.root.as_ref()
	}

	pub fn leaf_count(&self) -> usize {
		self.root.as_ref().map_or(0, QuadtreeNode::leaf_count)
	}

	/// Colors of every leaf, depth first in NW, NE, SE, SW order.
	pub fn leaf_colors(&self) -> Vec<Color> {
		let mut out = Vec::new();
		if let Some(ref root) = self.root {
			root.collect_leaf_colors(&mut out);
		}
		out
	}
}

mod compress;
mod image;
mod text;

pub use compress::Merge;
