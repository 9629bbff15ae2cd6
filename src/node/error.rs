use thiserror::Error;

/// Reason why an image couldn't be turned into a quadtree.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum BuildError {
	/// The image is not a square, or its side is not a positive power of two.
	#[error("invalid image dimensions {width}x{height}: must be a square with a power-of-two side")]
	InvalidDimensions { width: u32, height: u32 },
}

/// A string that is not a `rrggbb` hex color.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("invalid hex color {0:?}: expected six hexadecimal digits")]
pub struct ParseColorError(pub String);

/// Reason why two images couldn't be compared.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CompareError {
	/// The images don't have the same width and height.
	#[error("cannot compare a {0}x{1} image with a {2}x{3} image")]
	DimensionMismatch(u32, u32, u32, u32),
}
