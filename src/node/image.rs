use image::RgbImage;

use super::{quadrant_origins, Quadtree, QuadtreeNode};
use crate::raster::Raster;

impl QuadtreeNode {
	/// Paints this node over the `size`-sided square whose top left corner
	/// is at `(x, y)`.
	fn draw<R: Raster + ?Sized>(&self, img: &mut R, x: u32, y: u32, size: u32) {
		match self {
			QuadtreeNode::Leaf(c) => {
				for px in x..x + size {
					for py in y..y + size {
						img.set_color_at(px, py, *c);
					}
				}
			}
			QuadtreeNode::Branch(sects) => {
				let half = size / 2;
				for (sect, (qx, qy)) in sects.iter().zip(quadrant_origins(x, y, half).iter()) {
					sect.draw(img, *qx, *qy, half);
				}
			}
		}
	}
}

impl Quadtree {
	/// Draws the tree into the top left `size` x `size` pixels of `img`,
	/// which must be at least that large.
	pub fn draw<R: Raster + ?Sized>(&self, img: &mut R) {
		if let Some(ref root) = self.root {
			root.draw(img, 0, 0, self.size);
		}
	}

	/// Renders the tree to a new image of the size it was built from.
	pub fn to_image(&self) -> RgbImage {
		let mut img = RgbImage::new(self.size, self.size);
		self.draw(&mut img);
		img
	}
}
