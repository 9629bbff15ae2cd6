use image::{ImageBuffer, RgbImage, RgbaImage};

use crate::color::Color;

/// A grid of pixels that quadtrees can be built from and drawn into.
///
/// `x` is the horizontal coordinate, `y` the vertical one; both are
/// 0-indexed from the top left corner.
pub trait Raster {
	fn width(&self) -> u32;
	fn height(&self) -> u32;
	fn color_at(&self, x: u32, y: u32) -> Color;
	fn set_color_at(&mut self, x: u32, y: u32, color: Color);
}

impl Raster for RgbImage {
	fn width(&self) -> u32 {
		ImageBuffer::width(self)
	}
	fn height(&self) -> u32 {
		ImageBuffer::height(self)
	}
	fn color_at(&self, x: u32, y: u32) -> Color {
		(*ImageBuffer::get_pixel(self, x, y)).into()
	}
	fn set_color_at(&mut self, x: u32, y: u32, color: Color) {
		ImageBuffer::put_pixel(self, x, y, color.into());
	}
}

/// Alpha is ignored on read and written as fully opaque.
impl Raster for RgbaImage {
	fn width(&self) -> u32 {
		ImageBuffer::width(self)
	}
	fn height(&self) -> u32 {
		ImageBuffer::height(self)
	}
	fn color_at(&self, x: u32, y: u32) -> Color {
		(*ImageBuffer::get_pixel(self, x, y)).into()
	}
	fn set_color_at(&mut self, x: u32, y: u32, color: Color) {
		ImageBuffer::put_pixel(self, x, y, color.into());
	}
}
