//! Particle behavior tags.

use std::fmt;
use std::str::FromStr;

use crate::Error;

/// Motion behavior of a particle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Behavior {
    /// Bouncing, velocity-driven background motion.
    Ambient,
    /// Cyclic motion among points sampled around a fixed center.
    Orbiting,
    /// Eased motion toward a one-shot destination.
    Traveling,
}

impl Behavior {
    /// All behaviors in collection order.
    pub const ALL: [Behavior; 3] = [Behavior::Ambient, Behavior::Orbiting, Behavior::Traveling];

    /// Lowercase tag used in logs and config files.
    pub fn as_str(self) -> &'static str {
        match self {
            Behavior::Ambient => "ambient",
            Behavior::Orbiting => "orbiting",
            Behavior::Traveling => "traveling",
        }
    }
}

impl fmt::Display for Behavior {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Behavior {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "ambient" => Ok(Behavior::Ambient),
            "orbiting" => Ok(Behavior::Orbiting),
            "traveling" => Ok(Behavior::Traveling),
            other => Err(Error::InvalidArgument(format!(
                "unrecognized behavior tag {other:?}"
            ))),
        }
    }
}
