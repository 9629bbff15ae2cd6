//! Comparisons between an original image and its compressed rendition.

use crate::node::error::CompareError;
use crate::raster::Raster;

/// Mean, over every pixel and each of the three channels, of the squared
/// channel difference between `a` and `b`.
///
/// Two empty images have an error of 0.
pub fn mean_squared_error<A, B>(a: &A, b: &B) -> Result<f64, CompareError>
where
	A: Raster + ?Sized,
	B: Raster + ?Sized,
{
	if a.width() != b.width() || a.height() != b.height() {
		return Err(CompareError::DimensionMismatch(a.width(), a.height(), b.width(), b.height()));
	}
	let samples = a.width() as u64 * a.height() as u64 * 3;
	if samples == 0 {
		return Ok(0.);
	}
	let mut total = 0u64;
	for x in 0..a.width() {
		for y in 0..a.height() {
			let (p, q) = (a.color_at(x, y), b.color_at(x, y));
			for (u, v) in [(p.r, q.r), (p.g, q.g), (p.b, q.b)] {
				let d = u as i64 - v as i64;
				total += (d * d) as u64;
			}
		}
	}
	Ok(total as f64 / samples as f64)
}

/// Expresses a mean squared error as a percentage of the largest
/// possible one, `255²`.
pub fn quality_percent(mse: f64) -> f64 {
	100. * mse / (255. * 255.)
}

/// Size of `compressed` relative to `original`, in percent, rounded up to
/// two decimals.
pub fn size_ratio_percent(original: u64, compressed: u64) -> f64 {
	if original == 0 {
		return 0.;
	}
	(10000. * compressed as f64 / original as f64).ceil() / 100.
}

#[cfg(test)]
mod tests {
	use super::*;
	use image::{Rgb, RgbImage};

	#[test]
	fn identical_images_have_no_error() {
		let img = RgbImage::from_fn(4, 4, |x, y| Rgb([x as u8, y as u8, 9]));
		assert_eq!(mean_squared_error(&img, &img.clone()), Ok(0.));
	}

	#[test]
	fn averages_over_channels_and_pixels() {
		let a = RgbImage::from_pixel(2, 2, Rgb([0, 0, 0]));
		let mut b = a.clone();
		b.put_pixel(0, 0, Rgb([6, 0, 0]));
		// 36 over 12 samples.
		assert_eq!(mean_squared_error(&a, &b), Ok(3.));
		assert!((quality_percent(255. * 255.) - 100.).abs() < 1e-9);
	}

	#[test]
	fn rejects_mismatched_sizes() {
		let a = RgbImage::new(2, 2);
		let b = RgbImage::new(4, 2);
		assert_eq!(mean_squared_error(&a, &b), Err(CompareError::DimensionMismatch(2, 2, 4, 2)));
	}

	#[test]
	fn size_ratio_rounds_up() {
		assert_eq!(size_ratio_percent(3, 1), 33.34);
		assert_eq!(size_ratio_percent(200, 50), 25.);
		assert_eq!(size_ratio_percent(0, 10), 0.);
	}
}
