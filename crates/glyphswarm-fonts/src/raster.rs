//! Off-screen pixel buffer the rasterizer paints glyphs into.

/// A square buffer of `0x00RRGGBB` pixels.
///
/// Painting never blends: a pixel is either untouched or overwritten with
/// the exact color, so read-back can test for the ink color by equality.
#[derive(Debug, Clone)]
pub struct RasterSurface {
    side: usize,
    pixels: Vec<u32>,
}

impl RasterSurface {
    /// Create a `side` x `side` buffer filled with zero.
    pub fn new(side: usize) -> Self {
        Self {
            side,
            pixels: vec![0; side * side],
        }
    }

    pub fn side(&self) -> usize {
        self.side
    }

    /// Fill every pixel with `color`.
    pub fn clear(&mut self, color: u32) {
        self.pixels.fill(color);
    }

    /// Put a pixel if (x,y) is inside the buffer.
    #[inline]
    pub fn put_pixel(&mut self, x: i32, y: i32, color: u32) {
        if x < 0 || y < 0 {
            return;
        }
        let (x, y) = (x as usize, y as usize);
        if x >= self.side || y >= self.side {
            return;
        }
        self.pixels[y * self.side + x] = color;
    }

    /// Fill the axis-aligned rectangle at (x,y) of size w x h, clipped to the buffer.
    pub fn fill_rect(&mut self, x: i32, y: i32, w: i32, h: i32, color: u32) {
        for py in y..y + h {
            for px in x..x + w {
                self.put_pixel(px, py, color);
            }
        }
    }

    /// Pixel at (x,y). Panics when out of range.
    pub fn pixel(&self, x: usize, y: usize) -> u32 {
        self.pixels[y * self.side + x]
    }

    /// Row-major pixel data.
    pub fn pixels(&self) -> &[u32] {
        &self.pixels
    }
}
