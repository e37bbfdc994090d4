//! Space Game - a single-screen arcade shooter
//!
//! Core modules:
//! - `sim`: Deterministic simulation (entities, collisions, lives, the tick)
//! - `runner`: Frame loop tying input, simulation, presentation and pacing
//! - `renderer`: Sprite/HUD presentation contract and a headless backend
//! - `audio`: Shot and music playback behind a device contract
//! - `platform`: Input sources and clocks
//! - `assets`: Asset manifest and config loading
//! - `tuning`: Data-driven game balance

pub mod assets;
pub mod audio;
pub mod error;
pub mod platform;
pub mod renderer;
pub mod runner;
pub mod settings;
pub mod sim;
pub mod tuning;

pub use error::{DomainError, StartupError};
pub use runner::{FrameOutcome, Game};
pub use settings::Settings;
pub use tuning::Tuning;
