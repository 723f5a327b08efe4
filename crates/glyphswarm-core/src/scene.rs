//! Scene selection for the frame driver.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::Error;

/// Foreground visual drawn over the ambient particles.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Scene {
    #[default]
    Typer,
    Grapher,
    Oscilloscope,
}

impl Scene {
    /// Cycle to the next scene.
    pub fn next(self) -> Self {
        match self {
            Scene::Typer => Scene::Grapher,
            Scene::Grapher => Scene::Oscilloscope,
            Scene::Oscilloscope => Scene::Typer,
        }
    }

    /// Display name.
    pub fn name(self) -> &'static str {
        match self {
            Scene::Typer => "typer",
            Scene::Grapher => "grapher",
            Scene::Oscilloscope => "oscilloscope",
        }
    }
}

impl FromStr for Scene {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "typer" => Ok(Scene::Typer),
            "grapher" => Ok(Scene::Grapher),
            "oscilloscope" => Ok(Scene::Oscilloscope),
            other => Err(Error::InvalidArgument(format!("unknown scene {other:?}"))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scene_cycle() {
        let mut scene = Scene::default();
        assert_eq!(scene, Scene::Typer);
        scene = scene.next();
        assert_eq!(scene, Scene::Grapher);
        scene = scene.next();
        assert_eq!(scene, Scene::Oscilloscope);
        assert_eq!(scene.next(), Scene::Typer);
    }

    #[test]
    fn test_scene_from_str() {
        assert_eq!("grapher".parse::<Scene>(), Ok(Scene::Grapher));
        assert!("clock".parse::<Scene>().is_err());
    }
}
