//! Character to presence-mask conversion with a process-lifetime cache.

use std::collections::HashMap;

use glyphswarm_core::{Error, Result};

use crate::font::{GLYPH_HEIGHT, GLYPH_WIDTH, glyph5x7};
use crate::{Mask, RasterSurface};

/// Renders single characters into presence masks.
///
/// Masks are built lazily on first request and never evicted. The cache
/// needs `&mut self` to fill, so sharing a rasterizer across threads
/// requires wrapping it in a lock.
#[derive(Debug)]
pub struct GlyphRasterizer {
    font_size: u32,
    ink: u32,
    surface: RasterSurface,
    cache: HashMap<char, Mask>,
}

impl GlyphRasterizer {
    /// Create a rasterizer for glyphs `font_size` pixels tall on a square
    /// surface of side `font_size + padding`, testing for the `ink` color
    /// (`0x00RRGGBB`).
    pub fn new(font_size: u32, padding: u32, ink: u32) -> Self {
        let font_size = font_size.max(GLYPH_HEIGHT as u32);
        Self {
            font_size,
            ink: ink & 0x00ff_ffff,
            surface: RasterSurface::new(font_size.saturating_add(padding) as usize),
            cache: HashMap::new(),
        }
    }

    /// Side length of the raster surface, which is also the height of every
    /// non-empty mask.
    pub fn side(&self) -> usize {
        self.surface.side()
    }

    /// Integer scale applied to font pixels.
    pub fn scale(&self) -> usize {
        (self.font_size as usize / GLYPH_HEIGHT).max(1)
    }

    /// Number of cached masks.
    pub fn cached(&self) -> usize {
        self.cache.len()
    }

    /// Mask for `text`, which must be exactly one character.
    pub fn mask_for(&mut self, text: &str) -> Result<&Mask> {
        let mut chars = text.chars();
        match (chars.next(), chars.next()) {
            (Some(ch), None) => Ok(self.mask_for_char(ch)),
            _ => Err(Error::InvalidArgument(format!(
                "expected exactly one character, got {text:?}"
            ))),
        }
    }

    /// Mask for `ch`, rendering and caching it on first use.
    pub fn mask_for_char(&mut self, ch: char) -> &Mask {
        if !self.cache.contains_key(&ch) {
            let mask = self.render(ch);
            log::debug!(
                "rasterized {ch:?}: {}x{} mask, {} ink cells",
                mask.width(),
                mask.height(),
                mask.ink_count()
            );
            self.cache.insert(ch, mask);
        }
        &self.cache[&ch]
    }

    fn render(&mut self, ch: char) -> Mask {
        // Any color other than ink works as background.
        let background = self.ink ^ 0x00ff_ffff;
        self.surface.clear(background);

        if let Some(rows) = glyph5x7(ch) {
            let scale = self.scale() as i32;
            let side = self.surface.side() as i32;
            let ox = (side - GLYPH_WIDTH as i32 * scale) / 2;
            let oy = (side - GLYPH_HEIGHT as i32 * scale) / 2;

            for (ry, rowbits) in rows.iter().enumerate() {
                for rx in 0..GLYPH_WIDTH {
                    if rowbits & (1 << (GLYPH_WIDTH - 1 - rx)) != 0 {
                        self.surface.fill_rect(
                            ox + rx as i32 * scale,
                            oy + ry as i32 * scale,
                            scale,
                            scale,
                            self.ink,
                        );
                    }
                }
            }
        }

        Mask::from_pixels(self.surface.pixels(), self.surface.side(), self.ink)
    }
}
