//! Asset manifest and configuration loading
//!
//! A provider answers two questions before the first frame: which files make
//! up the game (sprites, font, sounds) and which settings/tuning to run with.
//! Everything here is fatal on failure; nothing is retried.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::StartupError;
use crate::settings::Settings;
use crate::tuning::Tuning;

/// Config file looked up in an asset directory
pub const CONFIG_FILE: &str = "config.json";

/// Files the game is built from, relative to the provider's root
#[derive(Debug, Clone, PartialEq)]
pub struct AssetManifest {
    pub background: PathBuf,
    pub ship: PathBuf,
    pub projectile: PathBuf,
    pub heart: PathBuf,
    pub music_on: PathBuf,
    pub music_off: PathBuf,
    /// Enemy hit-reaction frames, in animation order
    pub enemy_frames: Vec<PathBuf>,
    pub font: PathBuf,
    pub shot_sound: PathBuf,
    pub music_track: PathBuf,
}

impl Default for AssetManifest {
    fn default() -> Self {
        Self {
            background: "background1.png".into(),
            ship: "spaceship.png".into(),
            projectile: "bullet.png".into(),
            heart: "heart.png".into(),
            music_on: "music.png".into(),
            music_off: "mute.png".into(),
            enemy_frames: ["enemy.png", "enemy2.png", "enemy1.png", "enemy3.png", "enemy4.png"]
                .into_iter()
                .map(PathBuf::from)
                .collect(),
            font: "superstarfont.ttf".into(),
            shot_sound: "shot.mp3".into(),
            music_track: "SpaceGame.mp3".into(),
        }
    }
}

impl AssetManifest {
    /// Every file in the manifest
    pub fn files(&self) -> impl Iterator<Item = &Path> {
        [
            &self.background,
            &self.ship,
            &self.projectile,
            &self.heart,
            &self.music_on,
            &self.music_off,
        ]
        .into_iter()
        .chain(self.enemy_frames.iter())
        .chain([&self.font, &self.shot_sound, &self.music_track])
        .map(PathBuf::as_path)
    }

    pub fn enemy_frame_count(&self) -> u32 {
        self.enemy_frames.len() as u32
    }
}

/// Contents of a config file. Missing sections fall back to defaults.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub settings: Settings,
    pub tuning: Tuning,
}

impl GameConfig {
    /// Read and parse a JSON config file
    pub fn from_file(path: &Path) -> Result<Self, StartupError> {
        let text = fs::read_to_string(path).map_err(|source| StartupError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&text).map_err(|e| StartupError::Config {
            path: path.to_path_buf(),
            message: e.to_string(),
        })
    }
}

/// Source of the manifest and config
pub trait AssetProvider {
    fn manifest(&self) -> Result<AssetManifest, StartupError>;
    fn config(&self) -> Result<GameConfig, StartupError>;
}

/// Assets on disk under one root directory
#[derive(Debug, Clone)]
pub struct DirectoryAssets {
    root: PathBuf,
}

impl DirectoryAssets {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }
}

impl AssetProvider for DirectoryAssets {
    /// The standard manifest, checked file by file
    fn manifest(&self) -> Result<AssetManifest, StartupError> {
        let manifest = AssetManifest::default();
        for file in manifest.files() {
            let path = self.root.join(file);
            if !path.is_file() {
                return Err(StartupError::MissingAsset { path });
            }
        }
        Ok(manifest)
    }

    fn config(&self) -> Result<GameConfig, StartupError> {
        let path = self.root.join(CONFIG_FILE);
        if !path.exists() {
            log::debug!("No {} in {}, using defaults", CONFIG_FILE, self.root.display());
            return Ok(GameConfig::default());
        }
        GameConfig::from_file(&path)
    }
}

/// Defaults only, no filesystem access
#[derive(Debug, Clone, Copy, Default)]
pub struct BuiltinAssets;

impl AssetProvider for BuiltinAssets {
    fn manifest(&self) -> Result<AssetManifest, StartupError> {
        Ok(AssetManifest::default())
    }

    fn config(&self) -> Result<GameConfig, StartupError> {
        Ok(GameConfig::default())
    }
}

/// Everything the runner needs, validated
#[derive(Debug, Clone)]
pub struct LoadedAssets {
    pub manifest: AssetManifest,
    pub settings: Settings,
    pub tuning: Tuning,
}

/// Resolve manifest and config. An explicit `config_path` replaces the
/// provider's config and must exist.
pub fn resolve(
    provider: &impl AssetProvider,
    config_path: Option<&Path>,
) -> Result<LoadedAssets, StartupError> {
    let manifest = provider.manifest()?;
    let config = match config_path {
        Some(path) => GameConfig::from_file(path)?,
        None => provider.config()?,
    };

    let mut tuning = config.tuning;
    // The sprite set decides how many animation frames an enemy has
    tuning.enemy.sprite_frames = manifest.enemy_frame_count();
    tuning.validate()?;

    Ok(LoadedAssets {
        manifest,
        settings: config.settings.clamped(),
        tuning,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standard_manifest() {
        let manifest = AssetManifest::default();
        assert_eq!(manifest.enemy_frame_count(), 5);
        assert_eq!(manifest.files().count(), 14);
    }

    #[test]
    fn test_builtin_resolves_defaults() {
        let loaded = resolve(&BuiltinAssets, None).unwrap();
        assert_eq!(loaded.tuning.enemy.sprite_frames, 5);
        assert_eq!(loaded.tuning.ship.lives, 3);
        assert_eq!(loaded.settings, Settings::default());
    }

    #[test]
    fn test_missing_explicit_config() {
        let err = resolve(&BuiltinAssets, Some(Path::new("/nonexistent/space-game.json")))
            .unwrap_err();
        assert!(matches!(err, StartupError::Io { .. }));
    }
}
