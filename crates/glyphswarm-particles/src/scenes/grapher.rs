//! Sine wave grapher (stateless).

use std::f32::consts::TAU;

use glyphswarm_core::{Point, Surface};
use ratatui::style::Color;

use crate::color::hsl_to_rgb;

/// Horizontal distance between wave samples.
const SAMPLE_STEP: f32 = 2.0;

/// Full wave cycles across the surface width.
const CYCLES: f32 = 2.0;

/// Wave cycles scrolled per second.
const SCROLL_HZ: f32 = 0.25;

/// Draw the axis and a scrolling sine wave for time `elapsed_ms`.
pub fn render_grapher(surface: &mut dyn Surface, elapsed_ms: u64) {
    let width = surface.width();
    let height = surface.height();
    if width <= 0.0 || height <= 0.0 {
        return;
    }

    let mid = height / 2.0;
    let amplitude = height * 0.3;
    let wavelength = width / CYCLES;
    let seconds = elapsed_ms as f32 / 1000.0;
    let phase = seconds * SCROLL_HZ * TAU;

    surface.draw_line(
        Point::new(0.0, mid),
        Point::new(width, mid),
        Color::DarkGray,
        1.0,
    );

    let color = hsl_to_rgb((seconds * 20.0) % 360.0, 0.8, 0.6);
    let wave = |x: f32| Point::new(x, mid + amplitude * (TAU * x / wavelength + phase).sin());

    let mut x = 0.0;
    let mut prev = wave(x);
    while x < width {
        x = (x + SAMPLE_STEP).min(width);
        let next = wave(x);
        surface.draw_line(prev, next, color, 1.0);
        prev = next;
    }
}
