//! Keystroke handling: glyph masks become traveling particles.

use glyphswarm_config::{Config, GlyphConfig};
use glyphswarm_core::{Point, Result};
use glyphswarm_fonts::GlyphRasterizer;

use crate::ParticleSwarm;

/// What one keystroke did, kept so backspace can undo it.
#[derive(Debug, Clone, Copy, PartialEq)]
struct Keystroke {
    spawned: usize,
    cursor_before: Point,
}

/// Lays typed characters out left to right, wrapping at the right margin.
#[derive(Debug)]
pub struct TypingController {
    rasterizer: GlyphRasterizer,
    layout: GlyphConfig,
    cursor: Point,
    history: Vec<Keystroke>,
}

impl TypingController {
    pub fn new(config: &Config) -> Result<Self> {
        let glyph = &config.glyph;
        Ok(Self {
            rasterizer: GlyphRasterizer::new(glyph.font_size, glyph.padding, config.ink_rgb()?),
            layout: glyph.clone(),
            cursor: Point::ORIGIN,
            history: Vec::new(),
        })
    }

    /// Offset of the next character from the layout origin.
    pub fn cursor(&self) -> Point {
        self.cursor
    }

    /// Top-left corner of the first character.
    pub fn origin(&self) -> Point {
        Point::new(self.layout.origin_x, self.layout.origin_y)
    }

    /// Number of keystrokes backspace can still undo.
    pub fn history_len(&self) -> usize {
        self.history.len()
    }

    pub fn rasterizer(&mut self) -> &mut GlyphRasterizer {
        &mut self.rasterizer
    }

    /// Spawn one traveling particle per ink cell of `text`'s glyph and
    /// advance the cursor. Returns the number of particles spawned.
    pub fn handle_character(&mut self, text: &str, swarm: &mut ParticleSwarm) -> Result<usize> {
        let layout = &self.layout;
        let mask = self.rasterizer.mask_for(text)?;
        let base = Point::new(layout.origin_x, layout.origin_y) + self.cursor;

        let mut spawned = 0;
        for (row, col) in mask.ink_cells() {
            let cell = Point::new(
                col as f32 * layout.cell_spacing,
                row as f32 * layout.cell_spacing,
            );
            swarm.spawn_traveling(base + cell, layout.particle_radius);
            spawned += 1;
        }

        let advance = if mask.is_empty() {
            layout.space_advance
        } else {
            mask.width() as f32 * layout.advance
        };

        let cursor_before = self.cursor;
        let next_x = self.cursor.x + advance;
        let line_limit = swarm
            .bounds()
            .map_or(f32::INFINITY, |b| b.width - layout.right_margin);
        if layout.origin_x + next_x > line_limit {
            self.cursor.x = 0.0;
            self.cursor.y += layout.line_height;
        } else {
            self.cursor.x = next_x;
        }

        self.history.push(Keystroke {
            spawned,
            cursor_before,
        });
        log::debug!("typed {text:?}: {spawned} particles, cursor {:?}", self.cursor);
        Ok(spawned)
    }

    /// Undo the most recent keystroke.
    ///
    /// Every traveling particle is abandoned and the last `spawned` orbiting
    /// particles are removed by count, since particles do not record which
    /// character produced them. Returns the number of orbiting particles
    /// removed.
    pub fn handle_backspace(&mut self, swarm: &mut ParticleSwarm) -> usize {
        let Some(keystroke) = self.history.pop() else {
            return 0;
        };
        let abandoned = swarm.clear_traveling();
        let removed = swarm.remove_recent_orbiting(keystroke.spawned);
        self.cursor = keystroke.cursor_before;
        log::debug!("backspace: removed {removed} orbiting, abandoned {abandoned} traveling");
        removed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glyphswarm_core::{Behavior, Bounds, Error};

    const BOUNDS: Bounds = Bounds::new(160.0, 96.0);

    fn setup() -> (TypingController, ParticleSwarm) {
        let config = Config::default();
        let controller = TypingController::new(&config).unwrap();
        let mut swarm = ParticleSwarm::with_seed(&config, 11).unwrap();
        swarm.resize(BOUNDS);
        (controller, swarm)
    }

    fn settle(swarm: &mut ParticleSwarm) {
        let mut frames = 0;
        while swarm.count(Behavior::Traveling) > 0 {
            swarm.step(BOUNDS).unwrap();
            frames += 1;
            assert!(frames < 1_000, "glyph particles never settled");
        }
    }

    #[test]
    fn test_type_then_backspace() {
        let (mut controller, mut swarm) = setup();
        let ink = controller.rasterizer().mask_for("A").unwrap().ink_count();
        assert!(ink > 0);

        let spawned = controller.handle_character("A", &mut swarm).unwrap();
        assert_eq!(spawned, ink);
        assert_eq!(swarm.count(Behavior::Traveling), ink);
        assert!(controller.cursor().x > 0.0);

        settle(&mut swarm);
        assert_eq!(swarm.count(Behavior::Orbiting), ink);
        assert_eq!(swarm.reclassified(), ink);
        assert_eq!(swarm.reclassify_misses(), 0);

        assert_eq!(controller.handle_backspace(&mut swarm), ink);
        assert_eq!(swarm.count(Behavior::Orbiting), 0);
        assert_eq!(controller.cursor(), Point::ORIGIN);
        assert_eq!(controller.history_len(), 0);
    }

    #[test]
    fn test_destinations_follow_mask_and_cursor() {
        let (mut controller, mut swarm) = setup();
        let layout = GlyphConfig::default();
        controller.handle_character("I", &mut swarm).unwrap();
        let cursor = controller.cursor();
        controller.handle_character("I", &mut swarm).unwrap();

        let mask = controller.rasterizer().mask_for("I").unwrap().clone();
        assert_eq!(cursor.x, mask.width() as f32 * layout.advance);

        let destinations: Vec<Point> = swarm
            .collection(Behavior::Traveling)
            .iter()
            .filter_map(|p| p.destination())
            .collect();
        let per_char = mask.ink_count();
        assert_eq!(destinations.len(), 2 * per_char);

        let origin = controller.origin();
        let (row, col) = mask.ink_cells().next().unwrap();
        let first = origin + Point::new(col as f32, row as f32);
        assert_eq!(destinations[0], first);
        assert_eq!(destinations[per_char], first + cursor);
    }

    #[test]
    fn test_space_advances_without_particles() {
        let (mut controller, mut swarm) = setup();
        assert_eq!(controller.handle_character(" ", &mut swarm).unwrap(), 0);
        assert_eq!(controller.cursor().x, GlyphConfig::default().space_advance);
        assert_eq!(controller.history_len(), 1);
        assert_eq!(controller.handle_backspace(&mut swarm), 0);
        assert_eq!(controller.cursor(), Point::ORIGIN);
    }

    #[test]
    fn test_wraps_at_right_margin() {
        let (mut controller, mut swarm) = setup();
        let layout = GlyphConfig::default();
        let mut lines_seen = 0;
        for _ in 0..40 {
            let before = controller.cursor();
            controller.handle_character("W", &mut swarm).unwrap();
            let after = controller.cursor();
            if after.y > before.y {
                assert_eq!(after.x, 0.0);
                assert_eq!(after.y, before.y + layout.line_height);
                lines_seen += 1;
            }
            assert!(layout.origin_x + after.x <= BOUNDS.width - layout.right_margin);
        }
        assert!(lines_seen > 0);
    }

    #[test]
    fn test_backspace_restores_across_wrap() {
        let (mut controller, mut swarm) = setup();
        let mut cursors = vec![controller.cursor()];
        for _ in 0..20 {
            controller.handle_character("M", &mut swarm).unwrap();
            cursors.push(controller.cursor());
        }
        cursors.pop();
        while let Some(expected) = cursors.pop() {
            controller.handle_backspace(&mut swarm);
            assert_eq!(controller.cursor(), expected);
        }
        assert_eq!(controller.handle_backspace(&mut swarm), 0);
    }

    #[test]
    fn test_backspace_abandons_traveling() {
        let (mut controller, mut swarm) = setup();
        controller.handle_character("A", &mut swarm).unwrap();
        settle(&mut swarm);
        let settled = swarm.count(Behavior::Orbiting);
        controller.handle_character("B", &mut swarm).unwrap();
        assert!(swarm.count(Behavior::Traveling) > 0);

        controller.handle_backspace(&mut swarm);
        assert_eq!(swarm.count(Behavior::Traveling), 0);
        // B had not arrived, so the tail count eats into A's particles.
        assert!(swarm.count(Behavior::Orbiting) < settled);
    }

    #[test]
    fn test_rejects_multi_character_input() {
        let (mut controller, mut swarm) = setup();
        let err = controller.handle_character("ab", &mut swarm).unwrap_err();
        assert!(matches!(err, Error::InvalidArgument(_)));
        assert_eq!(controller.history_len(), 0);
        assert_eq!(swarm.count(Behavior::Traveling), 0);
    }
}
