//! Data-driven game balance
//!
//! Every number the simulation depends on lives here so it can be tweaked from
//! a config file instead of being scattered through the code. The defaults
//! reproduce the classic arcade feel: a 800x600 field, a 36 px hit radius and a
//! three-second grace window after a hit.

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::error::StartupError;

/// Inclusive integer range sampled uniformly
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct IntRange {
    pub min: i32,
    pub max: i32,
}

impl IntRange {
    pub const fn new(min: i32, max: i32) -> Self {
        Self { min, max }
    }

    /// Draw a value as `f32` (validated ranges never panic)
    pub fn sample(&self, rng: &mut impl Rng) -> f32 {
        rng.random_range(self.min..=self.max) as f32
    }

    fn check(&self, field: &'static str) -> Result<(), StartupError> {
        if self.min > self.max {
            return Err(StartupError::invalid(
                field,
                format!("empty range {}..={}", self.min, self.max),
            ));
        }
        Ok(())
    }
}

/// Vertical limits for one entity variant
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BorderRule {
    /// Lowest allowed y (top of screen, off-field allowance)
    pub min_y: f32,
    /// Where an entity crossing `min_y` is put back
    pub min_y_clamp: f32,
    /// Highest allowed y (bottom of screen)
    pub max_y: f32,
    /// Where an entity crossing `max_y` is put back
    pub max_y_clamp: f32,
}

impl BorderRule {
    pub const fn with_bottom(max_y: f32) -> Self {
        Self {
            min_y: -100.0,
            min_y_clamp: -90.0,
            max_y,
            max_y_clamp: max_y - 1.0,
        }
    }
}

/// Play-field geometry
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FieldTuning {
    pub min_x: f32,
    pub max_x: f32,
    pub min_x_clamp: f32,
    pub max_x_clamp: f32,
    pub ship: BorderRule,
    pub enemy: BorderRule,
    pub projectile: BorderRule,
    pub pickup: BorderRule,
    /// A projectile above this y has left the screen
    pub projectile_exit_y: f32,
}

impl Default for FieldTuning {
    fn default() -> Self {
        Self {
            min_x: 2.0,
            max_x: 735.0,
            min_x_clamp: 3.0,
            max_x_clamp: 734.0,
            ship: BorderRule::with_bottom(535.0),
            enemy: BorderRule::with_bottom(570.0),
            projectile: BorderRule::with_bottom(535.0),
            pickup: BorderRule::with_bottom(535.0),
            projectile_exit_y: 0.0,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ShipTuning {
    pub spawn: Vec2,
    /// Acceleration per held direction (units/s²)
    pub thrust: f32,
    pub max_speed: f32,
    pub lives: u32,
    pub teleport_charges: u32,
    pub max_teleport_charges: u32,
    pub teleport_distance: f32,
    /// Offset from the ship position where a fresh projectile appears
    pub muzzle_offset: Vec2,
    /// Position step applied by the slow input channel
    pub nudge: f32,
}

impl Default for ShipTuning {
    fn default() -> Self {
        Self {
            spawn: Vec2::new(350.0, 500.0),
            thrust: 100.0,
            max_speed: 300.0,
            lives: 3,
            teleport_charges: 3,
            max_teleport_charges: 10,
            teleport_distance: 100.0,
            muzzle_offset: Vec2::new(12.0, 0.0),
            nudge: 5.0,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EnemyTuning {
    pub count: usize,
    pub max_speed: f32,
    /// Horizontal thrust toward the facing direction, per second
    pub thrust: IntRange,
    /// Downward drift, per second
    pub drift: IntRange,
    pub sprite_frames: u32,
    pub spawn_x: IntRange,
    pub spawn_y: f32,
}

impl Default for EnemyTuning {
    fn default() -> Self {
        Self {
            count: 3,
            max_speed: 200.0,
            thrust: IntRange::new(1, 99),
            drift: IntRange::new(1, 35),
            sprite_frames: 5,
            spawn_x: IntRange::new(200, 600),
            spawn_y: 0.0,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectileTuning {
    /// Vertical velocity on launch (negative is up)
    pub launch_velocity: f32,
}

impl Default for ProjectileTuning {
    fn default() -> Self {
        Self {
            launch_velocity: -300.0,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PickupTuning {
    pub radius: f32,
    /// Parking spot while the heart is not on the field
    pub hidden_at: Vec2,
    pub area_x: IntRange,
    pub area_y: IntRange,
    /// Paced frames between spawn attempts
    pub spawn_period: u64,
    /// Hearts only spawn while the ship has exactly this many lives
    pub low_life_threshold: u32,
}

impl Default for PickupTuning {
    fn default() -> Self {
        Self {
            radius: 36.0,
            hidden_at: Vec2::new(-100.0, -100.0),
            area_x: IntRange::new(0, 730),
            area_y: IntRange::new(0, 530),
            spawn_period: 400,
            low_life_threshold: 1,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CollisionTuning {
    pub radius: f32,
    /// Positional correction applied to each side of a contact
    pub separation: f32,
    /// Velocity damping in tenths (7 means ×0.7)
    pub damping_tenths: IntRange,
    /// Touches between checks that mark an enemy as stuck
    pub stuck_touches: u32,
    /// Paced frames between stuck checks
    pub stuck_check_period: u64,
    pub unstuck_x: IntRange,
    pub unstuck_y: f32,
    /// Off-field area a dead enemy is parked in
    pub dead_x: IntRange,
    pub dead_y: IntRange,
}

impl Default for CollisionTuning {
    fn default() -> Self {
        Self {
            radius: 36.0,
            separation: 6.0,
            damping_tenths: IntRange::new(6, 10),
            stuck_touches: 10,
            stuck_check_period: 2,
            unstuck_x: IntRange::new(200, 700),
            unstuck_y: -50.0,
            dead_x: IntRange::new(10, 600),
            dead_y: IntRange::new(-100, -50),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LifeTuning {
    /// Seconds of invulnerability after losing a life
    pub cooldown_secs: f64,
    /// Seconds the game-over screen stays up before the run ends
    pub game_over_secs: f64,
}

impl Default for LifeTuning {
    fn default() -> Self {
        Self {
            cooldown_secs: 3.0,
            game_over_secs: 5.0,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PacingTuning {
    pub target_fps: u32,
    /// Paced frames between runs of the slow input channel
    pub slow_tick_period: u64,
    /// Upper bound on a single integration step (seconds)
    pub max_dt: f32,
}

impl Default for PacingTuning {
    fn default() -> Self {
        Self {
            target_fps: 60,
            slow_tick_period: 6,
            max_dt: 0.1,
        }
    }
}

impl PacingTuning {
    /// Frame budget in seconds
    pub fn frame_budget(&self) -> f64 {
        1.0 / self.target_fps as f64
    }
}

/// All gameplay constants
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    pub field: FieldTuning,
    pub ship: ShipTuning,
    pub enemy: EnemyTuning,
    pub projectile: ProjectileTuning,
    pub pickup: PickupTuning,
    pub collision: CollisionTuning,
    pub life: LifeTuning,
    pub pacing: PacingTuning,
}

impl Tuning {
    /// Reject values the simulation cannot run with
    pub fn validate(&self) -> Result<(), StartupError> {
        let field = &self.field;
        if field.min_x >= field.max_x {
            return Err(StartupError::invalid("field.min_x", "must be below field.max_x"));
        }
        if !(field.min_x..=field.max_x).contains(&field.min_x_clamp)
            || !(field.min_x..=field.max_x).contains(&field.max_x_clamp)
        {
            return Err(StartupError::invalid(
                "field.*_x_clamp",
                "clamp targets must lie inside the field",
            ));
        }
        for (name, rule) in [
            ("field.ship", &field.ship),
            ("field.enemy", &field.enemy),
            ("field.projectile", &field.projectile),
            ("field.pickup", &field.pickup),
        ] {
            if rule.min_y >= rule.max_y {
                return Err(StartupError::invalid(name, "min_y must be below max_y"));
            }
        }

        if self.collision.radius <= 0.0 {
            return Err(StartupError::invalid("collision.radius", "must be positive"));
        }
        if self.pickup.radius <= 0.0 {
            return Err(StartupError::invalid("pickup.radius", "must be positive"));
        }
        if self.ship.max_speed <= 0.0 || self.enemy.max_speed <= 0.0 {
            return Err(StartupError::invalid("*.max_speed", "must be positive"));
        }
        if self.enemy.count == 0 {
            return Err(StartupError::invalid("enemy.count", "need at least one enemy"));
        }
        if self.enemy.sprite_frames == 0 {
            return Err(StartupError::invalid("enemy.sprite_frames", "must be at least 1"));
        }
        if self.pickup.spawn_period == 0 {
            return Err(StartupError::invalid("pickup.spawn_period", "must be non-zero"));
        }
        if self.collision.stuck_check_period == 0 {
            return Err(StartupError::invalid(
                "collision.stuck_check_period",
                "must be non-zero",
            ));
        }
        if self.pacing.slow_tick_period == 0 {
            return Err(StartupError::invalid("pacing.slow_tick_period", "must be non-zero"));
        }
        if self.pacing.target_fps == 0 {
            return Err(StartupError::invalid("pacing.target_fps", "must be non-zero"));
        }
        if !(self.pacing.max_dt.is_finite() && self.pacing.max_dt >= 0.0) {
            return Err(StartupError::invalid(
                "pacing.max_dt",
                "must be a finite, non-negative number of seconds",
            ));
        }
        if self.life.cooldown_secs < 0.0 || self.life.game_over_secs < 0.0 {
            return Err(StartupError::invalid("life.*_secs", "must not be negative"));
        }

        self.enemy.thrust.check("enemy.thrust")?;
        self.enemy.drift.check("enemy.drift")?;
        self.enemy.spawn_x.check("enemy.spawn_x")?;
        self.pickup.area_x.check("pickup.area_x")?;
        self.pickup.area_y.check("pickup.area_y")?;
        self.collision.damping_tenths.check("collision.damping_tenths")?;
        self.collision.unstuck_x.check("collision.unstuck_x")?;
        self.collision.dead_x.check("collision.dead_x")?;
        self.collision.dead_y.check("collision.dead_y")?;
        Ok(())
    }
}
