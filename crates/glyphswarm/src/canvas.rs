//! Terminal implementation of the drawing surface.
//!
//! Shapes are recorded in canvas units (one unit per braille dot, `y` down)
//! and painted through a ratatui braille [`Canvas`] when the frame renders.

use glyphswarm_core::{Point, Surface};
use ratatui::{
    Frame,
    layout::Rect,
    style::Color,
    symbols::Marker,
    widgets::canvas::{Canvas, Line as CanvasLine, Points},
};

/// Braille dots per terminal cell, horizontally.
const DOTS_X: f32 = 2.0;
/// Braille dots per terminal cell, vertically.
const DOTS_Y: f32 = 4.0;

#[derive(Debug, Clone, Copy, PartialEq)]
enum Shape {
    Disc {
        center: Point,
        radius: f32,
        color: Color,
    },
    Stroke {
        from: Point,
        to: Point,
        color: Color,
        thickness: f32,
    },
}

/// Shape recorder backed by a braille canvas.
#[derive(Debug, Default)]
pub struct TerminalCanvas {
    width: f32,
    height: f32,
    shapes: Vec<Shape>,
}

impl TerminalCanvas {
    pub fn new() -> Self {
        Self::default()
    }

    /// Size the canvas to `area`. Returns true when the size changed.
    pub fn fit(&mut self, area: Rect) -> bool {
        let width = f32::from(area.width) * DOTS_X;
        let height = f32::from(area.height) * DOTS_Y;
        let changed = width != self.width || height != self.height;
        self.width = width;
        self.height = height;
        changed
    }

    /// Number of shapes recorded since the last clear.
    pub fn shape_count(&self) -> usize {
        self.shapes.len()
    }

    /// Paint the recorded shapes into `area`.
    pub fn render(&self, frame: &mut Frame, area: Rect) {
        let height = f64::from(self.height);
        let canvas = Canvas::default()
            .marker(Marker::Braille)
            .x_bounds([0.0, f64::from(self.width)])
            .y_bounds([0.0, height])
            .paint(|ctx| {
                for shape in &self.shapes {
                    match *shape {
                        Shape::Disc {
                            center,
                            radius,
                            color,
                        } => {
                            let coords = disc_points(center, radius, height);
                            ctx.draw(&Points {
                                coords: &coords,
                                color,
                            });
                        }
                        Shape::Stroke {
                            from,
                            to,
                            color,
                            thickness,
                        } => {
                            for (a, b) in stroke_lines(from, to, thickness) {
                                ctx.draw(&CanvasLine::new(
                                    f64::from(a.x),
                                    height - f64::from(a.y),
                                    f64::from(b.x),
                                    height - f64::from(b.y),
                                    color,
                                ));
                            }
                        }
                    }
                }
            });
        frame.render_widget(canvas, area);
    }
}

impl Surface for TerminalCanvas {
    fn width(&self) -> f32 {
        self.width
    }

    fn height(&self) -> f32 {
        self.height
    }

    fn clear(&mut self) {
        self.shapes.clear();
    }

    fn draw_filled_circle(&mut self, x: f32, y: f32, radius: f32, color: Color) {
        self.shapes.push(Shape::Disc {
            center: Point::new(x, y),
            radius,
            color,
        });
    }

    fn draw_line(&mut self, from: Point, to: Point, color: Color, thickness: f32) {
        self.shapes.push(Shape::Stroke {
            from,
            to,
            color,
            thickness,
        });
    }
}

/// Dots covering a disc, in canvas coordinates (`y` up).
fn disc_points(center: Point, radius: f32, height: f64) -> Vec<(f64, f64)> {
    let flip = |p: Point| (f64::from(p.x), height - f64::from(p.y));
    if radius < 1.0 {
        return vec![flip(center)];
    }

    let steps = (radius * 2.0).ceil() as i32;
    let mut coords = Vec::new();
    for iy in -steps..=steps {
        for ix in -steps..=steps {
            let offset = Point::new(ix as f32 * 0.5, iy as f32 * 0.5);
            if offset.x.hypot(offset.y) <= radius {
                coords.push(flip(center + offset));
            }
        }
    }
    coords
}

/// Parallel strokes, one dot apart, approximating a line of `thickness`.
fn stroke_lines(from: Point, to: Point, thickness: f32) -> Vec<(Point, Point)> {
    let count = thickness.round().max(1.0) as usize;
    let length = from.distance(to);
    if count == 1 || length == 0.0 {
        return vec![(from, to)];
    }

    let normal = Point::new(-(to.y - from.y) / length, (to.x - from.x) / length);
    let first = -(count as f32 - 1.0) / 2.0;
    (0..count)
        .map(|i| {
            let k = first + i as f32;
            let shift = Point::new(normal.x * k, normal.y * k);
            (from + shift, to + shift)
        })
        .collect()
}
