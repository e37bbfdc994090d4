//! Deterministic simulation module
//!
//! All gameplay logic lives here. Given the same seed, tuning and input
//! sequence it produces the same run:
//! - Every random draw goes through the World's seeded RNG
//! - Entities are visited in fixed roster order
//! - No rendering, audio or clock access; time is handed in per tick

pub mod collision;
pub mod entity;
pub mod life;
pub mod state;
pub mod tick;
pub mod vector;

pub use collision::{Contact, resolve_border, resolve_collision};
pub use entity::{Body, Direction, Enemy, EntityKind, EntityMut, EntityRef, Facing, Pickup, Projectile, Ship};
pub use life::{HitOutcome, LifePhase, LifeState};
pub use state::{GameEvent, World};
pub use tick::{FrameTime, tick};
pub use vector::{Vector2, VectorExt};
