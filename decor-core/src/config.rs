// SPDX-License-Identifier: MIT OR Apache-2.0

//! # Decor Configuration
//!
//! Animation timing and popup menu defaults, loadable from TOML files and
//! environment variables.
//!
//! ## Environment Variables
//!
//! - `DECOR_CONFIG`: Path to a TOML configuration file
//! - `DECOR_ANIMATION_STEP`: Progress step applied on every animation tick
//! - `DECOR_ANIMATION_INTERVAL_MS`: Delay between animation ticks
//!
//! ## Configuration File Format
//!
//! ```toml
//! [animation]
//! interval_ms = 20
//! step = 0.04
//!
//! [menu]
//! radius = 60.0
//! starting_angle = 0.0
//! angle_range = 360.0
//! clockwise = true
//! kind = "shutter"
//! hide_kind = "star"
//! ```

use std::env;
use std::fs;
use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{CoreError, CoreResult};

/// Default delay between animation ticks.
pub const DEFAULT_ANIMATION_INTERVAL_MS: u64 = 20;

/// Default progress step applied on every animation tick.
pub const DEFAULT_ANIMATION_STEP: f32 = 0.04;

/// Root configuration structure.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct DecorConfig {
    /// Animation timing.
    pub animation: AnimationConfig,
    /// Popup menu defaults.
    pub menu: MenuConfig,
}

/// Animation timing configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnimationConfig {
    /// Delay between two ticks in milliseconds.
    pub interval_ms: u64,
    /// Progress added (or removed) on every tick.
    pub step: f32,
}

impl AnimationConfig {
    /// Get the tick interval.
    pub fn interval(&self) -> Duration {
        Duration::from_millis(self.interval_ms)
    }
}

impl Default for AnimationConfig {
    fn default() -> Self {
        Self {
            interval_ms: DEFAULT_ANIMATION_INTERVAL_MS,
            step: DEFAULT_ANIMATION_STEP,
        }
    }
}

/// Animation style used by radial popup menus.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum MenuAnimationType {
    /// Items stay in place, only the overlay opacity changes.
    Plain,
    /// Items sweep out from the starting angle like a camera shutter.
    #[default]
    Shutter,
    /// Items fly outwards from the center.
    Star,
    /// Items roll along the circle while moving outwards.
    Roll,
    /// Items spiral into (or out of) the center.
    BlackHole,
}

/// Popup menu defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MenuConfig {
    /// Radius of the item circle in pixels.
    pub radius: f64,
    /// Angle of the first item in degrees, counted clockwise from the top.
    pub starting_angle: f64,
    /// Angle available to the items in degrees.
    pub angle_range: f64,
    /// Whether items are placed clockwise.
    pub clockwise: bool,
    /// Display animation style.
    pub kind: MenuAnimationType,
    /// Hide animation style, [None] reuses `kind`.
    pub hide_kind: Option<MenuAnimationType>,
}

impl Default for MenuConfig {
    fn default() -> Self {
        Self {
            radius: 60.0,
            starting_angle: 0.0,
            angle_range: 360.0,
            clockwise: true,
            kind: MenuAnimationType::Shutter,
            hide_kind: None,
        }
    }
}

impl DecorConfig {
    /// Create a configuration with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a configuration from environment variables or use defaults.
    ///
    /// `DECOR_CONFIG` is read first; the single-value variables then override
    /// whatever the file provided. Unreadable files fall back to defaults.
    pub fn from_env_or_default() -> Self {
        let mut config = match env::var("DECOR_CONFIG") {
            Ok(path) => Self::from_file(&path).unwrap_or_else(|err| {
                log::warn!("Ignoring config file {}: {}", path, err);
                Self::default()
            }),
            Err(_) => Self::default(),
        };

        if let Ok(step) = env::var("DECOR_ANIMATION_STEP") {
            match step.parse::<f32>() {
                Ok(step) => config.animation.step = step,
                Err(_) => log::warn!("Invalid DECOR_ANIMATION_STEP '{}'", step),
            }
        }

        if let Ok(interval) = env::var("DECOR_ANIMATION_INTERVAL_MS") {
            match interval.parse::<u64>() {
                Ok(interval) => config.animation.interval_ms = interval,
                Err(_) => log::warn!("Invalid DECOR_ANIMATION_INTERVAL_MS '{}'", interval),
            }
        }

        config.validate()
    }

    /// Load the configuration from a TOML file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> CoreResult<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(CoreError::config_not_found(path));
        }
        if path.extension().and_then(|s| s.to_str()) != Some("toml") {
            return Err(CoreError::UnsupportedFormat {
                path: path.to_path_buf(),
            });
        }

        let content = fs::read_to_string(path)?;
        Self::from_toml(&content)
    }

    /// Load the configuration from TOML content.
    pub fn from_toml(content: &str) -> CoreResult<Self> {
        let config: Self = toml::from_str(content)?;
        Ok(config.validate())
    }

    /// Clamp out-of-range values to usable ones.
    pub fn validate(mut self) -> Self {
        if !(self.animation.step > 0.0 && self.animation.step <= 1.0) {
            log::warn!(
                "Animation step {} out of range, using {}",
                self.animation.step,
                DEFAULT_ANIMATION_STEP
            );
            self.animation.step = DEFAULT_ANIMATION_STEP;
        }
        if self.animation.interval_ms == 0 {
            log::warn!("Animation interval must be positive, using 1ms");
            self.animation.interval_ms = 1;
        }
        if !(self.menu.radius >= 0.0) {
            log::warn!("Menu radius {} is negative, using 0", self.menu.radius);
            self.menu.radius = 0.0;
        }
        if !(self.menu.angle_range > 0.0 && self.menu.angle_range <= 360.0) {
            log::warn!("Menu angle range {} out of range, using 360", self.menu.angle_range);
            self.menu.angle_range = 360.0;
        }
        self
    }
}
