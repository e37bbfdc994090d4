//! Player settings and preferences
//!
//! Loaded together with the tuning from the asset provider's config file.

use serde::{Deserialize, Serialize};

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Audio ===
    /// Master volume (0.0 - 1.0)
    pub master_volume: f32,
    /// Sound effects volume (0.0 - 1.0)
    pub sfx_volume: f32,
    /// Music volume (0.0 - 1.0)
    pub music_volume: f32,
    /// Begin the run with audio muted
    pub start_muted: bool,

    // === HUD ===
    /// Log frames per second once a second
    pub show_fps: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            master_volume: 0.8,
            sfx_volume: 1.0,
            music_volume: 0.7,
            start_muted: false,
            show_fps: false,
        }
    }
}

impl Settings {
    /// Copy with every volume forced into 0.0 - 1.0
    pub fn clamped(&self) -> Self {
        Self {
            master_volume: self.master_volume.clamp(0.0, 1.0),
            sfx_volume: self.sfx_volume.clamp(0.0, 1.0),
            music_volume: self.music_volume.clamp(0.0, 1.0),
            ..self.clone()
        }
    }
}
