//! Configuration for the glyphswarm particle typer.
//!
//! Settings live in `config.toml` under the platform config directory
//! (`GLYPHSWARM_CONFIG` overrides the path). Every section is optional;
//! anything left out keeps its default.

use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use glyphswarm_core::{Error, Scene};
use ratatui::style::Color;
use serde::{Deserialize, Serialize};
use thiserror::Error as ThisError;

/// Environment variable naming an explicit config file.
pub const CONFIG_ENV: &str = "GLYPHSWARM_CONFIG";

/// Largest accepted `glyph.font_size`, in raster pixels.
pub const MAX_FONT_SIZE: u32 = 256;
/// Largest accepted `glyph.padding`, in raster pixels.
pub const MAX_PADDING: u32 = 256;

/// Errors raised while loading configuration.
#[derive(Debug, ThisError)]
pub enum ConfigError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error(transparent)]
    Invalid(#[from] Error),
}

/// Background particle fill.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AmbientConfig {
    /// Number of ambient particles regenerated on every resize.
    pub count: usize,
    pub radius_min: f32,
    pub radius_max: f32,
    /// Maximum speed per axis, in canvas units per frame.
    pub speed: f32,
}

impl Default for AmbientConfig {
    fn default() -> Self {
        Self {
            count: 60,
            radius_min: 0.5,
            radius_max: 1.5,
            speed: 0.6,
        }
    }
}

/// Glyph rasterization and text layout.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GlyphConfig {
    /// Glyph height in raster pixels.
    pub font_size: u32,
    /// Extra raster pixels around the glyph.
    pub padding: u32,
    /// Color painted into the raster and tested on read-back.
    pub ink: String,
    /// Canvas units between neighboring mask cells.
    pub cell_spacing: f32,
    /// Cursor advance per mask column.
    pub advance: f32,
    /// Cursor advance for characters without ink.
    pub space_advance: f32,
    pub line_height: f32,
    pub origin_x: f32,
    pub origin_y: f32,
    /// Distance from the right edge at which lines wrap.
    pub right_margin: f32,
    /// Radius of particles spawned for glyph cells.
    pub particle_radius: f32,
}

impl Default for GlyphConfig {
    fn default() -> Self {
        Self {
            font_size: 14,
            padding: 4,
            ink: "#ffffff".to_string(),
            cell_spacing: 1.0,
            advance: 1.25,
            space_advance: 8.0,
            line_height: 22.0,
            origin_x: 4.0,
            origin_y: 4.0,
            right_margin: 4.0,
            particle_radius: 0.5,
        }
    }
}

/// Motion tuning for traveling and orbiting particles.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MotionConfig {
    /// Distance under which a particle counts as arrived.
    pub arrival_threshold: f32,
    pub travel_divisor_x: f32,
    pub travel_divisor_y: f32,
    pub orbit_travel_min: f32,
    pub orbit_travel_max: f32,
    /// Orbit radius bounds as multiples of the particle radius.
    pub orbit_radius_min: f32,
    pub orbit_radius_max: f32,
}

impl Default for MotionConfig {
    fn default() -> Self {
        Self {
            arrival_threshold: 1.0,
            travel_divisor_x: 12.0,
            travel_divisor_y: 8.0,
            orbit_travel_min: 4.0,
            orbit_travel_max: 10.0,
            orbit_radius_min: 1.0,
            orbit_radius_max: 3.0,
        }
    }
}

/// Top-level configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub ambient: AmbientConfig,
    pub glyph: GlyphConfig,
    pub motion: MotionConfig,
    /// Particle colors as `#rrggbb`.
    pub palette: Vec<String>,
    /// Target frame interval in milliseconds.
    pub frame_ms: u64,
    /// Scene shown at startup.
    pub scene: Scene,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            ambient: AmbientConfig::default(),
            glyph: GlyphConfig::default(),
            motion: MotionConfig::default(),
            palette: ["#ff6b6b", "#ffd93d", "#6bcb77", "#4d96ff", "#c77dff", "#f8f9fa"]
                .into_iter()
                .map(String::from)
                .collect(),
            frame_ms: 16,
            scene: Scene::Typer,
        }
    }
}

impl Config {
    /// Load from `GLYPHSWARM_CONFIG` or the default location, falling back
    /// to defaults when no file exists.
    pub fn load() -> Result<Self, ConfigError> {
        match Self::config_path() {
            Some(path) if path.exists() => Self::load_from(&path),
            _ => Ok(Self::default()),
        }
    }

    /// Load from a specific file.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&content)
    }

    /// Parse and validate TOML text.
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config: Config = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Path of the config file that [`Config::load`] reads.
    pub fn config_path() -> Option<PathBuf> {
        if let Ok(path) = std::env::var(CONFIG_ENV) {
            return Some(PathBuf::from(path));
        }
        Self::project_dirs().map(|dirs| dirs.config_dir().join("config.toml"))
    }

    /// Platform directories for this application.
    pub fn project_dirs() -> Option<ProjectDirs> {
        ProjectDirs::from("", "", "glyphswarm")
    }

    /// Check every value against the ranges the engines rely on.
    pub fn validate(&self) -> Result<(), Error> {
        self.ensure_finite()?;

        let a = &self.ambient;
        ensure(a.radius_min > 0.0, "ambient.radius_min must be positive")?;
        ensure(
            a.radius_min <= a.radius_max,
            "ambient.radius_min must not exceed ambient.radius_max",
        )?;
        ensure(a.speed >= 0.0, "ambient.speed must not be negative")?;

        let g = &self.glyph;
        ensure(
            g.font_size > 0 && g.font_size <= MAX_FONT_SIZE,
            "glyph.font_size must be between 1 and 256",
        )?;
        ensure(g.padding <= MAX_PADDING, "glyph.padding must not exceed 256")?;
        ensure(g.cell_spacing > 0.0, "glyph.cell_spacing must be positive")?;
        ensure(g.advance > 0.0, "glyph.advance must be positive")?;
        ensure(g.space_advance >= 0.0, "glyph.space_advance must not be negative")?;
        ensure(g.line_height > 0.0, "glyph.line_height must be positive")?;
        ensure(g.particle_radius > 0.0, "glyph.particle_radius must be positive")?;
        parse_hex_color(&g.ink)?;

        let m = &self.motion;
        ensure(
            m.arrival_threshold > 0.0,
            "motion.arrival_threshold must be positive",
        )?;
        ensure(
            m.travel_divisor_x >= 1.0 && m.travel_divisor_y >= 1.0,
            "motion travel divisors must be at least 1",
        )?;
        ensure(
            m.orbit_travel_min >= 1.0 && m.orbit_travel_min <= m.orbit_travel_max,
            "motion.orbit_travel_min must be at least 1 and not exceed orbit_travel_max",
        )?;
        ensure(
            m.orbit_radius_min > 0.0 && m.orbit_radius_min <= m.orbit_radius_max,
            "motion.orbit_radius_min must be positive and not exceed orbit_radius_max",
        )?;

        ensure(!self.palette.is_empty(), "palette must not be empty")?;
        self.palette_colors()?;
        ensure(self.frame_ms > 0, "frame_ms must be positive")?;
        Ok(())
    }

    /// TOML accepts `inf` and `nan`, which no range check below can catch.
    fn ensure_finite(&self) -> Result<(), Error> {
        let (a, g, m) = (&self.ambient, &self.glyph, &self.motion);
        let fields = [
            ("ambient.radius_min", a.radius_min),
            ("ambient.radius_max", a.radius_max),
            ("ambient.speed", a.speed),
            ("glyph.cell_spacing", g.cell_spacing),
            ("glyph.advance", g.advance),
            ("glyph.space_advance", g.space_advance),
            ("glyph.line_height", g.line_height),
            ("glyph.origin_x", g.origin_x),
            ("glyph.origin_y", g.origin_y),
            ("glyph.right_margin", g.right_margin),
            ("glyph.particle_radius", g.particle_radius),
            ("motion.arrival_threshold", m.arrival_threshold),
            ("motion.travel_divisor_x", m.travel_divisor_x),
            ("motion.travel_divisor_y", m.travel_divisor_y),
            ("motion.orbit_travel_min", m.orbit_travel_min),
            ("motion.orbit_travel_max", m.orbit_travel_max),
            ("motion.orbit_radius_min", m.orbit_radius_min),
            ("motion.orbit_radius_max", m.orbit_radius_max),
        ];
        match fields.iter().find(|(_, value)| !value.is_finite()) {
            Some((name, _)) => Err(Error::InvalidConfig(format!("{name} must be finite"))),
            None => Ok(()),
        }
    }

    /// Palette parsed into terminal colors.
    pub fn palette_colors(&self) -> Result<Vec<Color>, Error> {
        self.palette
            .iter()
            .map(|hex| {
                let (r, g, b) = parse_hex_color(hex)?;
                Ok(Color::Rgb(r, g, b))
            })
            .collect()
    }

    /// Ink color as `0x00RRGGBB`.
    pub fn ink_rgb(&self) -> Result<u32, Error> {
        let (r, g, b) = parse_hex_color(&self.glyph.ink)?;
        Ok(u32::from(r) << 16 | u32::from(g) << 8 | u32::from(b))
    }
}

fn ensure(condition: bool, message: &str) -> Result<(), Error> {
    if condition {
        Ok(())
    } else {
        Err(Error::InvalidConfig(message.to_string()))
    }
}

/// Parse `#rrggbb` into its components.
pub fn parse_hex_color(hex: &str) -> Result<(u8, u8, u8), Error> {
    let invalid = || Error::InvalidConfig(format!("invalid color {hex:?}, expected #rrggbb"));
    let digits = hex.strip_prefix('#').ok_or_else(invalid)?;
    if digits.len() != 6 || !digits.chars().all(|c| c.is_ascii_hexdigit()) {
        return Err(invalid());
    }
    let channel = |i: usize| u8::from_str_radix(&digits[i..i + 2], 16).map_err(|_| invalid());
    Ok((channel(0)?, channel(2)?, channel(4)?))
}
