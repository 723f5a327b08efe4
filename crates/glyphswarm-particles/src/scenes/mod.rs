//! Foreground scenes drawn over the ambient particles.

pub mod grapher;
pub mod oscilloscope;

#[cfg(test)]
pub(crate) mod testing {
    use glyphswarm_core::{Point, Surface};
    use ratatui::style::Color;

    /// Surface that keeps every line drawn.
    pub struct LineRecorder {
        pub width: f32,
        pub height: f32,
        pub lines: Vec<(Point, Point, Color, f32)>,
    }

    impl LineRecorder {
        pub fn new(width: f32, height: f32) -> Self {
            Self {
                width,
                height,
                lines: Vec::new(),
            }
        }
    }

    impl Surface for LineRecorder {
        fn width(&self) -> f32 {
            self.width
        }

        fn height(&self) -> f32 {
            self.height
        }

        fn clear(&mut self) {
            self.lines.clear();
        }

        fn draw_filled_circle(&mut self, _x: f32, _y: f32, _radius: f32, _color: Color) {}

        fn draw_line(&mut self, from: Point, to: Point, color: Color, thickness: f32) {
            self.lines.push((from, to, color, thickness));
        }
    }
}
