//! Bar-graph oscilloscope of per-core load (stateful smoothing).

use glyphswarm_core::{Point, Surface};
use ratatui::style::Color;

use crate::color::load_to_color;

/// Fraction of the gap to the target closed per frame.
const SMOOTHING: f32 = 0.25;

/// Share of the surface height a full bar occupies.
const MAX_BAR_SHARE: f32 = 0.8;

/// Smoothed bar levels, one per input channel.
#[derive(Debug, Clone, Default)]
pub struct BarLevels {
    levels: Vec<f32>,
}

impl BarLevels {
    pub fn new() -> Self {
        Self::default()
    }

    /// Ease every level toward its target (clamped to 0..1). The number of
    /// bars follows the number of targets.
    pub fn update(&mut self, targets: &[f32]) {
        self.levels.resize(targets.len(), 0.0);
        for (level, &target) in self.levels.iter_mut().zip(targets) {
            *level += (target.clamp(0.0, 1.0) - *level) * SMOOTHING;
        }
    }

    pub fn levels(&self) -> &[f32] {
        &self.levels
    }
}

/// Draw a baseline and one vertical bar per level.
pub fn render_bars(surface: &mut dyn Surface, levels: &[f32]) {
    let width = surface.width();
    let height = surface.height();
    if width <= 0.0 || height <= 0.0 {
        return;
    }

    let baseline = height - 1.0;
    surface.draw_line(
        Point::new(0.0, baseline),
        Point::new(width, baseline),
        Color::DarkGray,
        1.0,
    );

    if levels.is_empty() {
        return;
    }
    let slot = width / levels.len() as f32;
    let thickness = (slot * 0.6).max(1.0);
    for (i, &level) in levels.iter().enumerate() {
        let level = level.clamp(0.0, 1.0);
        let x = slot * (i as f32 + 0.5);
        let top = baseline - level * baseline * MAX_BAR_SHARE;
        surface.draw_line(
            Point::new(x, baseline),
            Point::new(x, top),
            load_to_color(level),
            thickness,
        );
    }
}
