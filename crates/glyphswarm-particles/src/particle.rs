//! A single animated particle and its motion state machine.
//!
//! | From      | Trigger          | To        |
//! |-----------|------------------|-----------|
//! | Traveling | within threshold | Orbiting  |
//! | Orbiting  | within threshold | Orbiting (next orbit point) |
//! | Ambient   | hits a boundary  | Ambient (velocity negated)  |

use glyphswarm_config::MotionConfig;
use glyphswarm_core::{Behavior, Bounds, Error, Point, Result, Surface};
use rand::Rng;
use ratatui::style::Color;

use crate::OrbitPath;

/// Identity of a particle, unique within its swarm.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ParticleId(pub u64);

/// Behavior change reported by [`Particle::update`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Transition {
    pub from: Behavior,
    pub to: Behavior,
}

/// A moving point with a behavior tag.
///
/// A traveling particle always has a destination. An orbiting particle
/// owns exactly one orbit and its destination comes from that orbit. An
/// ambient particle moves by velocity and has neither.
#[derive(Debug, Clone)]
pub struct Particle {
    id: ParticleId,
    pub position: Point,
    /// Per-frame displacement; only used while ambient.
    pub velocity: Point,
    pub radius: f32,
    pub color: Color,
    behavior: Behavior,
    destination: Option<Point>,
    orbit: Option<OrbitPath>,
}

impl Particle {
    /// Create an ambient particle.
    pub fn ambient(
        id: ParticleId,
        position: Point,
        velocity: Point,
        radius: f32,
        color: Color,
    ) -> Self {
        Self {
            id,
            position,
            velocity,
            radius,
            color,
            behavior: Behavior::Ambient,
            destination: None,
            orbit: None,
        }
    }

    /// Create a particle traveling to `destination`.
    pub fn traveling(
        id: ParticleId,
        position: Point,
        destination: Point,
        radius: f32,
        color: Color,
    ) -> Self {
        Self {
            id,
            position,
            velocity: Point::ORIGIN,
            radius,
            color,
            behavior: Behavior::Traveling,
            destination: Some(destination),
            orbit: None,
        }
    }

    pub fn id(&self) -> ParticleId {
        self.id
    }

    pub fn behavior(&self) -> Behavior {
        self.behavior
    }

    pub fn destination(&self) -> Option<Point> {
        self.destination
    }

    pub fn orbit(&self) -> Option<&OrbitPath> {
        self.orbit.as_ref()
    }

    /// Distance to the current destination, if any.
    pub fn distance_to_destination(&self) -> Option<f32> {
        self.destination.map(|d| self.position.distance(d))
    }

    pub fn draw(&self, surface: &mut dyn Surface) {
        surface.draw_filled_circle(self.position.x, self.position.y, self.radius, self.color);
    }

    /// Advance one frame.
    ///
    /// Ambient particles need `bounds`. Returns the transition when the
    /// particle switched behavior during this frame; the owner must move it
    /// to the matching collection before the next frame.
    pub fn update<R: Rng + ?Sized>(
        &mut self,
        bounds: Option<Bounds>,
        motion: &MotionConfig,
        rng: &mut R,
    ) -> Result<Option<Transition>> {
        match self.behavior {
            Behavior::Ambient => {
                let bounds = bounds.ok_or_else(|| {
                    Error::PreconditionViolation("ambient update requires bounds".into())
                })?;
                self.bounce(bounds);
                Ok(None)
            }
            Behavior::Traveling => {
                let destination = self.destination.ok_or_else(|| {
                    Error::PreconditionViolation(format!(
                        "traveling particle {} has no destination",
                        self.id.0
                    ))
                })?;
                self.approach(
                    destination,
                    motion.travel_divisor_x,
                    motion.travel_divisor_y,
                );
                if self.position.distance(destination) < motion.arrival_threshold {
                    self.set_behavior(Behavior::Orbiting, true, motion, rng)?;
                    return Ok(Some(Transition {
                        from: Behavior::Traveling,
                        to: Behavior::Orbiting,
                    }));
                }
                Ok(None)
            }
            Behavior::Orbiting => {
                let (Some(orbit), Some(destination)) = (self.orbit.as_mut(), self.destination)
                else {
                    return Err(Error::PreconditionViolation(format!(
                        "orbiting particle {} has no orbit",
                        self.id.0
                    )));
                };
                let factor = orbit.travel_factor();
                let position = self.position;
                let next = Point::new(
                    position.x + (destination.x - position.x) / factor,
                    position.y + (destination.y - position.y) / factor,
                );
                if next.distance(destination) < motion.arrival_threshold {
                    self.destination = Some(orbit.advance());
                }
                self.position = next;
                Ok(None)
            }
        }
    }

    /// Switch behavior.
    ///
    /// Entering `Orbiting` creates an orbit around the current position when
    /// `reset_orbit` is set or none exists yet. Entering `Traveling` keeps
    /// the current destination and fails when there is none.
    pub fn set_behavior<R: Rng + ?Sized>(
        &mut self,
        behavior: Behavior,
        reset_orbit: bool,
        motion: &MotionConfig,
        rng: &mut R,
    ) -> Result<()> {
        match behavior {
            Behavior::Ambient => {
                self.destination = None;
                self.orbit = None;
            }
            Behavior::Traveling => {
                if self.destination.is_none() {
                    return Err(Error::PreconditionViolation(format!(
                        "particle {} cannot travel without a destination",
                        self.id.0
                    )));
                }
                self.orbit = None;
            }
            Behavior::Orbiting => {
                if reset_orbit || self.orbit.is_none() {
                    let radius =
                        self.radius * rng.gen_range(motion.orbit_radius_min..=motion.orbit_radius_max);
                    let travel_factor =
                        rng.gen_range(motion.orbit_travel_min..=motion.orbit_travel_max);
                    self.orbit = Some(OrbitPath::new(self.position, radius, travel_factor));
                }
                self.destination = self.orbit.as_mut().map(OrbitPath::advance);
            }
        }
        self.behavior = behavior;
        Ok(())
    }

    /// Send the particle toward a new destination.
    pub fn travel_to(&mut self, destination: Point) {
        self.destination = Some(destination);
        self.orbit = None;
        self.behavior = Behavior::Traveling;
    }

    /// Move a fraction of the remaining distance, with independent divisors per axis.
    fn approach(&mut self, destination: Point, divisor_x: f32, divisor_y: f32) {
        self.position.x += (destination.x - self.position.x) / divisor_x;
        self.position.y += (destination.y - self.position.y) / divisor_y;
    }

    fn bounce(&mut self, bounds: Bounds) {
        let next = self.position + self.velocity;
        if next.x + self.radius > bounds.width || next.x - self.radius < 0.0 {
            self.velocity.x = -self.velocity.x;
        }
        if next.y + self.radius > bounds.height || next.y - self.radius < 0.0 {
            self.velocity.y = -self.velocity.y;
        }
        self.position = self.position + self.velocity;
        self.position.x = clamp_axis(self.position.x, self.radius, bounds.width);
        self.position.y = clamp_axis(self.position.y, self.radius, bounds.height);
    }
}

/// Keep a coordinate at least `radius` away from both ends of `extent`.
fn clamp_axis(value: f32, radius: f32, extent: f32) -> f32 {
    if extent >= 2.0 * radius {
        value.clamp(radius, extent - radius)
    } else {
        extent / 2.0
    }
}
