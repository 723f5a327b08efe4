//! Particle engine for the glyphswarm typer.
//!
//! Typed characters are rasterized into presence masks and turned into
//! particles that travel to their glyph cell and then orbit around it,
//! while an ambient fill drifts and bounces in the background. The crate
//! also carries the two lighter foreground scenes (grapher and
//! oscilloscope).

mod color;
mod orbit;
mod particle;
pub mod scenes;
mod set;
mod swarm;
mod typing;

pub use color::{hsl_to_rgb, load_to_color};
pub use orbit::{ORBIT_SAMPLES, OrbitPath};
pub use particle::{Particle, ParticleId, Transition};
pub use set::ParticleSet;
pub use swarm::ParticleSwarm;
pub use typing::TypingController;
