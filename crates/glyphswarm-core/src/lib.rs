//! Core types shared by the glyphswarm crates.
//!
//! Everything here is a leaf: geometry, the behavior tag carried by every
//! particle, the scene selector, the drawing collaborator trait and the
//! common error type.

mod behavior;
mod error;
mod geometry;
mod scene;
mod surface;

pub use behavior::Behavior;
pub use error::{Error, Result};
pub use geometry::{Bounds, Point};
pub use scene::Scene;
pub use surface::Surface;
