//! Ownership and per-frame driving of all particles.

use glyphswarm_config::{AmbientConfig, Config, MotionConfig};
use glyphswarm_core::{Behavior, Bounds, Error, Point, Result, Surface};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use ratatui::style::Color;

use crate::{Particle, ParticleId, ParticleSet};

/// Particles grouped by behavior.
///
/// Each particle lives in exactly one collection. Ambient particles are
/// regenerated on every resize; orbiting and traveling particles are
/// created and removed by typing and are not rescaled on resize.
#[derive(Debug)]
pub struct ParticleSwarm {
    ambient: ParticleSet,
    orbiting: ParticleSet,
    traveling: ParticleSet,
    bounds: Option<Bounds>,
    ambient_config: AmbientConfig,
    motion: MotionConfig,
    palette: Vec<Color>,
    rng: StdRng,
    next_id: u64,
    reclassified: usize,
    reclassify_misses: usize,
}

impl ParticleSwarm {
    /// Create an empty swarm seeded from the OS.
    pub fn new(config: &Config) -> Result<Self> {
        Self::with_rng(config, StdRng::from_entropy())
    }

    /// Create an empty swarm with a fixed seed.
    pub fn with_seed(config: &Config, seed: u64) -> Result<Self> {
        Self::with_rng(config, StdRng::seed_from_u64(seed))
    }

    fn with_rng(config: &Config, rng: StdRng) -> Result<Self> {
        let palette = config.palette_colors()?;
        if palette.is_empty() {
            return Err(Error::InvalidConfig("palette must not be empty".into()));
        }
        Ok(Self {
            ambient: ParticleSet::new(),
            orbiting: ParticleSet::new(),
            traveling: ParticleSet::new(),
            bounds: None,
            ambient_config: config.ambient.clone(),
            motion: config.motion.clone(),
            palette,
            rng,
            next_id: 0,
            reclassified: 0,
            reclassify_misses: 0,
        })
    }

    /// Bounds from the most recent resize.
    pub fn bounds(&self) -> Option<Bounds> {
        self.bounds
    }

    pub fn collection(&self, behavior: Behavior) -> &ParticleSet {
        match behavior {
            Behavior::Ambient => &self.ambient,
            Behavior::Orbiting => &self.orbiting,
            Behavior::Traveling => &self.traveling,
        }
    }

    fn collection_mut(&mut self, behavior: Behavior) -> &mut ParticleSet {
        match behavior {
            Behavior::Ambient => &mut self.ambient,
            Behavior::Orbiting => &mut self.orbiting,
            Behavior::Traveling => &mut self.traveling,
        }
    }

    pub fn count(&self, behavior: Behavior) -> usize {
        self.collection(behavior).len()
    }

    /// Total number of particles.
    pub fn len(&self) -> usize {
        Behavior::ALL.iter().map(|&b| self.count(b)).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Successful reclassifications so far.
    pub fn reclassified(&self) -> usize {
        self.reclassified
    }

    /// Reclassify requests whose particle was not in the source collection.
    pub fn reclassify_misses(&self) -> usize {
        self.reclassify_misses
    }

    /// Regenerate the ambient fill for new bounds.
    pub fn resize(&mut self, bounds: Bounds) {
        self.bounds = Some(bounds);
        self.ambient.clear();

        let AmbientConfig {
            count,
            radius_min,
            radius_max,
            speed,
        } = self.ambient_config;
        for _ in 0..count {
            let radius = self.rng.gen_range(radius_min..=radius_max);
            let position = Point::new(
                random_axis(&mut self.rng, radius, bounds.width),
                random_axis(&mut self.rng, radius, bounds.height),
            );
            let velocity = Point::new(
                self.rng.gen_range(-speed..=speed),
                self.rng.gen_range(-speed..=speed),
            );
            let color = self.random_color();
            let id = self.issue_id();
            self.ambient
                .push(Particle::ambient(id, position, velocity, radius, color));
        }
        log::debug!(
            "resized to {}x{}: {} ambient particles",
            bounds.width,
            bounds.height,
            self.ambient.len()
        );
    }

    /// Draw then update every particle, once each.
    pub fn tick(&mut self, surface: &mut dyn Surface) -> Result<()> {
        let bounds = surface.bounds();
        self.advance(bounds, Some(surface))
    }

    /// Update every particle without drawing.
    pub fn step(&mut self, bounds: Bounds) -> Result<()> {
        self.advance(bounds, None)
    }

    fn advance(&mut self, bounds: Bounds, mut surface: Option<&mut dyn Surface>) -> Result<()> {
        let mut transitions = Vec::new();
        let mut failure = None;

        'frame: for behavior in Behavior::ALL {
            let set = match behavior {
                Behavior::Ambient => &mut self.ambient,
                Behavior::Orbiting => &mut self.orbiting,
                Behavior::Traveling => &mut self.traveling,
            };
            for particle in set.iter_mut() {
                if let Some(surface) = surface.as_deref_mut() {
                    particle.draw(surface);
                }
                match particle.update(Some(bounds), &self.motion, &mut self.rng) {
                    Ok(Some(transition)) => transitions.push((particle.id(), transition)),
                    Ok(None) => {}
                    Err(err) => {
                        failure = Some(err);
                        break 'frame;
                    }
                }
            }
        }

        if !transitions.is_empty() {
            log::trace!("{} particles changed behavior", transitions.len());
        }
        for (id, transition) in transitions {
            self.reclassify(id, transition.from, transition.to);
        }

        match failure {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }

    /// Move a particle between collections.
    ///
    /// Returns false, logs and counts a miss when `id` is not in `from`.
    pub fn reclassify(&mut self, id: ParticleId, from: Behavior, to: Behavior) -> bool {
        match self.collection_mut(from).remove(id) {
            Some(particle) => {
                self.collection_mut(to).push(particle);
                self.reclassified += 1;
                true
            }
            None => {
                self.reclassify_misses += 1;
                log::warn!("reclassify {from} -> {to}: particle {} not found", id.0);
                false
            }
        }
    }

    /// Spawn a traveling particle at a random point headed for `destination`.
    pub fn spawn_traveling(&mut self, destination: Point, radius: f32) -> ParticleId {
        let start = match self.bounds {
            Some(bounds) => Point::new(
                random_axis(&mut self.rng, radius, bounds.width),
                random_axis(&mut self.rng, radius, bounds.height),
            ),
            None => destination,
        };
        let color = self.random_color();
        let id = self.issue_id();
        self.traveling
            .push(Particle::traveling(id, start, destination, radius, color));
        id
    }

    /// Drop every traveling particle, returning how many were dropped.
    pub fn clear_traveling(&mut self) -> usize {
        let dropped = self.traveling.len();
        self.traveling.clear();
        dropped
    }

    /// Remove up to `count` of the most recently added orbiting particles.
    pub fn remove_recent_orbiting(&mut self, count: usize) -> usize {
        (0..count)
            .take_while(|_| self.orbiting.pop().is_some())
            .count()
    }

    fn issue_id(&mut self) -> ParticleId {
        let id = ParticleId(self.next_id);
        self.next_id += 1;
        id
    }

    fn random_color(&mut self) -> Color {
        self.palette
            .choose(&mut self.rng)
            .copied()
            .unwrap_or(Color::White)
    }
}

/// Uniform coordinate keeping a disc of `radius` inside `extent`.
fn random_axis(rng: &mut StdRng, radius: f32, extent: f32) -> f32 {
    if extent > 2.0 * radius {
        rng.gen_range(radius..=extent - radius)
    } else {
        extent / 2.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Surface that records draw calls.
    #[derive(Default)]
    struct Recorder {
        circles: usize,
        clears: usize,
    }

    impl Surface for Recorder {
        fn width(&self) -> f32 {
            160.0
        }

        fn height(&self) -> f32 {
            96.0
        }

        fn clear(&mut self) {
            self.clears += 1;
        }

        fn draw_filled_circle(&mut self, _x: f32, _y: f32, _radius: f32, _color: Color) {
            self.circles += 1;
        }

        fn draw_line(&mut self, _from: Point, _to: Point, _color: Color, _thickness: f32) {}
    }

    fn swarm() -> ParticleSwarm {
        ParticleSwarm::with_seed(&Config::default(), 42).unwrap()
    }

    fn within(bounds: Bounds, p: &Particle) -> bool {
        const EPS: f32 = 1e-4;
        p.position.x - p.radius >= -EPS
            && p.position.x + p.radius <= bounds.width + EPS
            && p.position.y - p.radius >= -EPS
            && p.position.y + p.radius <= bounds.height + EPS
    }

    #[test]
    fn test_resize_regenerates_ambient() {
        let mut swarm = swarm();
        let count = Config::default().ambient.count;
        let bounds = Bounds::new(120.0, 60.0);
        swarm.resize(bounds);
        assert_eq!(swarm.count(Behavior::Ambient), count);
        assert!(swarm.collection(Behavior::Ambient).iter().all(|p| within(bounds, p)));

        let smaller = Bounds::new(30.0, 20.0);
        swarm.resize(smaller);
        assert_eq!(swarm.count(Behavior::Ambient), count);
        assert!(swarm.collection(Behavior::Ambient).iter().all(|p| within(smaller, p)));
    }

    #[test]
    fn test_resize_leaves_glyph_particles() {
        let mut swarm = swarm();
        swarm.resize(Bounds::new(160.0, 96.0));
        for i in 0..5 {
            swarm.spawn_traveling(Point::new(10.0 + i as f32, 10.0), 0.5);
        }
        let orbiting_id = swarm.spawn_traveling(Point::new(50.0, 50.0), 0.5);
        assert!(swarm.reclassify(orbiting_id, Behavior::Traveling, Behavior::Orbiting));

        swarm.resize(Bounds::new(40.0, 40.0));
        assert_eq!(swarm.count(Behavior::Traveling), 5);
        assert_eq!(swarm.count(Behavior::Orbiting), 1);
    }

    #[test]
    fn test_ambient_stays_in_bounds_across_frames() {
        let mut swarm = swarm();
        let bounds = Bounds::new(80.0, 40.0);
        swarm.resize(bounds);
        for _ in 0..2_000 {
            swarm.step(bounds).unwrap();
            assert!(swarm.collection(Behavior::Ambient).iter().all(|p| within(bounds, p)));
        }
    }

    #[test]
    fn test_arrival_reclassifies_once() {
        let mut swarm = swarm();
        swarm.resize(Bounds::new(160.0, 96.0));
        let id = swarm.spawn_traveling(Point::new(80.0, 48.0), 0.5);

        let mut frames = 0;
        while swarm.collection(Behavior::Traveling).contains(id) {
            swarm.step(Bounds::new(160.0, 96.0)).unwrap();
            frames += 1;
            assert!(frames < 1_000, "particle never arrived");
        }
        assert!(swarm.collection(Behavior::Orbiting).contains(id));
        assert_eq!(swarm.reclassified(), 1);

        for _ in 0..100 {
            swarm.step(Bounds::new(160.0, 96.0)).unwrap();
        }
        assert_eq!(swarm.reclassified(), 1);
        assert_eq!(swarm.reclassify_misses(), 0);
        let particle = swarm.collection(Behavior::Orbiting).get(id).unwrap();
        assert_eq!(particle.behavior(), Behavior::Orbiting);
    }

    #[test]
    fn test_tick_draws_every_particle_once() {
        let mut swarm = swarm();
        let mut surface = Recorder::default();
        swarm.resize(surface.bounds());
        for i in 0..7 {
            swarm.spawn_traveling(Point::new(i as f32 * 3.0, 20.0), 0.5);
        }
        swarm.tick(&mut surface).unwrap();
        assert_eq!(surface.circles, swarm.len());
        assert_eq!(surface.clears, 0);
    }

    #[test]
    fn test_collections_partition_by_behavior() {
        let mut swarm = swarm();
        let bounds = Bounds::new(160.0, 96.0);
        swarm.resize(bounds);
        for i in 0..40 {
            swarm.spawn_traveling(Point::new(5.0 + i as f32, 30.0), 0.5);
        }
        for _ in 0..60 {
            swarm.step(bounds).unwrap();
            for behavior in Behavior::ALL {
                assert!(swarm.collection(behavior).iter().all(|p| p.behavior() == behavior));
            }
        }
        assert_eq!(swarm.len(), 40 + Config::default().ambient.count);
        assert_eq!(swarm.reclassify_misses(), 0);
    }

    #[test]
    fn test_reclassify_miss_is_counted() {
        let mut swarm = swarm();
        assert!(!swarm.reclassify(ParticleId(999), Behavior::Traveling, Behavior::Orbiting));
        assert_eq!(swarm.reclassify_misses(), 1);
        assert_eq!(swarm.reclassified(), 0);
    }

    #[test]
    fn test_remove_recent_orbiting_takes_tail() {
        let mut swarm = swarm();
        let ids: Vec<ParticleId> = (0..5)
            .map(|i| swarm.spawn_traveling(Point::new(i as f32, 0.0), 0.5))
            .collect();
        for &id in &ids {
            swarm.reclassify(id, Behavior::Traveling, Behavior::Orbiting);
        }
        assert_eq!(swarm.remove_recent_orbiting(2), 2);
        let left: Vec<ParticleId> = swarm
            .collection(Behavior::Orbiting)
            .iter()
            .map(Particle::id)
            .collect();
        assert_eq!(left, ids[..3].to_vec());
        assert_eq!(swarm.remove_recent_orbiting(10), 3);
        assert_eq!(swarm.count(Behavior::Orbiting), 0);
    }

    #[test]
    fn test_spawn_before_resize_starts_at_destination() {
        let mut swarm = swarm();
        let id = swarm.spawn_traveling(Point::new(7.0, 9.0), 0.5);
        let particle = swarm.collection(Behavior::Traveling).get(id).unwrap();
        assert_eq!(particle.position, Point::new(7.0, 9.0));
    }
}
