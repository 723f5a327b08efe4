//! Glyph rasterization for the glyphswarm particle typer.
//!
//! A character is painted from a 5x7 bitmap font onto an off-screen pixel
//! buffer, read back, and reduced to a column-trimmed presence [`Mask`].

mod font;
mod mask;
mod raster;
mod rasterizer;

pub use font::{GLYPH_HEIGHT, GLYPH_WIDTH, glyph5x7};
pub use mask::Mask;
pub use raster::RasterSurface;
pub use rasterizer::GlyphRasterizer;
