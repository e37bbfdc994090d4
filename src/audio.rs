//! Audio system
//!
//! The manager owns volume and mute state and decides what to play; the
//! actual output goes through an [`AudioDevice`]. The headless binary uses
//! [`LogAudio`].

use crate::settings::Settings;

/// Sound effect types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SoundEffect {
    /// Projectile launched
    Shot,
    /// Looping background track
    Music,
}

impl SoundEffect {
    pub fn is_music(self) -> bool {
        matches!(self, SoundEffect::Music)
    }
}

/// Sound output backend
pub trait AudioDevice {
    /// Start a sound at the given volume (0.0 - 1.0)
    fn play(&mut self, sound: SoundEffect, volume: f32);
    /// Change the volume of a sound that is already playing
    fn set_volume(&mut self, sound: SoundEffect, volume: f32);
}

/// Audio manager for the game
#[derive(Debug)]
pub struct AudioManager<D> {
    device: D,
    master_volume: f32,
    sfx_volume: f32,
    music_volume: f32,
    muted: bool,
    music_started: bool,
}

impl<D: AudioDevice> AudioManager<D> {
    pub fn new(device: D, settings: &Settings) -> Self {
        Self {
            device,
            master_volume: settings.master_volume.clamp(0.0, 1.0),
            sfx_volume: settings.sfx_volume.clamp(0.0, 1.0),
            music_volume: settings.music_volume.clamp(0.0, 1.0),
            muted: settings.start_muted,
            music_started: false,
        }
    }

    /// Set master volume (0.0 - 1.0)
    pub fn set_master_volume(&mut self, vol: f32) {
        self.master_volume = vol.clamp(0.0, 1.0);
        self.sync_music();
    }

    /// Set SFX volume (0.0 - 1.0)
    pub fn set_sfx_volume(&mut self, vol: f32) {
        self.sfx_volume = vol.clamp(0.0, 1.0);
    }

    pub fn set_music_volume(&mut self, vol: f32) {
        self.music_volume = vol.clamp(0.0, 1.0);
        self.sync_music();
    }

    /// Mute/unmute all audio
    pub fn set_muted(&mut self, muted: bool) {
        self.muted = muted;
        self.sync_music();
    }

    pub fn toggle_mute(&mut self) -> bool {
        self.set_muted(!self.muted);
        log::info!("Audio {}", if self.muted { "muted" } else { "unmuted" });
        self.muted
    }

    pub fn is_muted(&self) -> bool {
        self.muted
    }

    /// Get effective volume
    pub fn effective_volume(&self, sound: SoundEffect) -> f32 {
        if self.muted {
            return 0.0;
        }
        let channel = if sound.is_music() {
            self.music_volume
        } else {
            self.sfx_volume
        };
        self.master_volume * channel
    }

    /// Start the background track once; later calls are ignored
    pub fn start_music(&mut self) {
        if self.music_started {
            return;
        }
        self.music_started = true;
        let vol = self.effective_volume(SoundEffect::Music);
        self.device.play(SoundEffect::Music, vol);
    }

    /// Shot sound for a launched projectile
    pub fn on_fire(&mut self) {
        self.play(SoundEffect::Shot);
    }

    /// Play a sound effect
    pub fn play(&mut self, effect: SoundEffect) {
        let vol = self.effective_volume(effect);
        if vol <= 0.0 {
            return;
        }
        self.device.play(effect, vol);
    }

    pub fn device(&self) -> &D {
        &self.device
    }

    fn sync_music(&mut self) {
        if self.music_started {
            let vol = self.effective_volume(SoundEffect::Music);
            self.device.set_volume(SoundEffect::Music, vol);
        }
    }
}

/// Headless device: logs and remembers every request
#[derive(Debug, Clone, Default)]
pub struct LogAudio {
    pub played: Vec<(SoundEffect, f32)>,
    pub volume_changes: Vec<(SoundEffect, f32)>,
}

impl AudioDevice for LogAudio {
    fn play(&mut self, sound: SoundEffect, volume: f32) {
        log::debug!("play {:?} at {:.2}", sound, volume);
        self.played.push((sound, volume));
    }

    fn set_volume(&mut self, sound: SoundEffect, volume: f32) {
        log::debug!("volume {:?} -> {:.2}", sound, volume);
        self.volume_changes.push((sound, volume));
    }
}
