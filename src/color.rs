use std::fmt;
use std::str::FromStr;

use crate::node::error::ParseColorError;

/// An opaque RGB color.
///
/// Colors compare lexicographically on `(r, g, b)`, which is the order
/// the palette tree is sorted by.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Color {
	pub r: u8,
	pub g: u8,
	pub b: u8,
}

impl Color {
	pub const fn new(r: u8, g: u8, b: u8) -> Self {
		Color { r, g, b }
	}

	/// Relative luminance, `0.2126 R + 0.7152 G + 0.0722 B`.
	pub fn luminance(&self) -> f64 {
		0.2126 * self.r as f64 + 0.7152 * self.g as f64 + 0.0722 * self.b as f64
	}

	/// Per-channel floor of the mean of four colors.
	pub fn average(colors: [Color; 4]) -> Color {
		let sum = colors.iter().fold([0u16; 3], |mut acc, c| {
			acc[0] += c.r as u16;
			acc[1] += c.g as u16;
			acc[2] += c.b as u16;
			acc
		});
		Color::new((sum[0] / 4) as u8, (sum[1] / 4) as u8, (sum[2] / 4) as u8)
	}
}

impl From<image::Rgb<u8>> for Color {
	fn from(p: image::Rgb<u8>) -> Self {
		Color::new(p.0[0], p.0[1], p.0[2])
	}
}

impl From<Color> for image::Rgb<u8> {
	fn from(c: Color) -> Self {
		image::Rgb([c.r, c.g, c.b])
	}
}

/// Alpha is dropped.
impl From<image::Rgba<u8>> for Color {
	fn from(p: image::Rgba<u8>) -> Self {
		Color::new(p.0[0], p.0[1], p.0[2])
	}
}

impl From<Color> for image::Rgba<u8> {
	fn from(c: Color) -> Self {
		image::Rgba([c.r, c.g, c.b, 255])
	}
}

/// Lowercase `rrggbb`.
impl fmt::Display for Color {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{:02x}{:02x}{:02x}", self.r, self.g, self.b)
	}
}

/// Parses `rrggbb`, optionally prefixed with `#`. Digits are case-insensitive.
impl FromStr for Color {
	type Err = ParseColorError;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		let digits = s.strip_prefix('#').unwrap_or(s);
		if digits.len() != 6 || !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
			return Err(ParseColorError(s.to_string()));
		}
		let channel = |i: usize| u8::from_str_radix(&digits[i..i + 2], 16)
			.map_err(|_| ParseColorError(s.to_string()));
		Ok(Color::new(channel(0)?, channel(2)?, channel(4)?))
	}
}
