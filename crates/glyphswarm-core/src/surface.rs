//! Drawing collaborator used by the animation engines.

use ratatui::style::Color;

use crate::{Bounds, Point};

/// A drawable surface in canvas units.
///
/// The engines call these once per particle per frame and do not otherwise
/// depend on the rendering backend.
pub trait Surface {
    fn width(&self) -> f32;

    fn height(&self) -> f32;

    /// Erase everything drawn since the last clear.
    fn clear(&mut self);

    fn draw_filled_circle(&mut self, x: f32, y: f32, radius: f32, color: Color);

    fn draw_line(&mut self, from: Point, to: Point, color: Color, thickness: f32);

    /// Current drawable area.
    fn bounds(&self) -> Bounds {
        Bounds::new(self.width(), self.height())
    }
}
