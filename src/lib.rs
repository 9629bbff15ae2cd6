//! Quadtree image compression.
//!
//! A square, power-of-two sided image is analyzed into a [`Quadtree`] whose
//! uniform regions are single leaves. The tree can then be compressed either
//! by merging groups of leaves whose average color is close enough in
//! luminance ([`Quadtree::compress_lambda`]) or by greedily merging the least
//! damaging groups until a leaf budget is met ([`Quadtree::compress_phi`]).
//! The colors that remain can be collected into a [`PaletteTree`].

pub mod color;
pub mod metrics;
pub mod node;
pub mod palette;
pub mod raster;

pub use node::*;

pub use color::Color;
pub use palette::PaletteTree;
pub use raster::Raster;
