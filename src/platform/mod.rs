//! Platform abstraction layer
//!
//! Handles what the simulation must not touch directly:
//! - Input sources and per-frame snapshots
//! - Wall-clock time and frame pacing sleeps

pub mod input;
pub mod time;

pub use input::{Action, ActionSet, Autopilot, InputSnapshot, InputSource, ScriptedInput};
pub use time::{Clock, ManualClock, SystemClock};
