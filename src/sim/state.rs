//! World state and core simulation types
//!
//! The World owns the fixed roster `[projectile, ship, enemies.., pickup]`,
//! the seeded RNG every random draw goes through, and the counters that drive
//! periodic events.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;

use super::entity::{EntityMut, EntityRef, Enemy, Facing, Pickup, Projectile, Ship};
use super::life::{LifePhase, LifeState};
use crate::tuning::Tuning;

/// Things that happened during a tick, for logging, audio and HUD
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GameEvent {
    /// Projectile launched
    Fired,
    Teleported { charges_left: u32 },
    ShipHit { lives_left: u32 },
    EnemyKilled { enemy: usize, kills: u32 },
    TeleportGranted { charges: u32 },
    PickupSpawned { at: Vec2 },
    PickupCollected { lives: u32 },
    /// Stuck enemy moved back to the top
    EnemyUnstuck { enemy: usize },
    /// Dead enemy drifted back onto the field
    EnemyReturned { enemy: usize },
    CooldownEnded,
    GameOver,
    Terminated,
}

/// Complete simulation state
#[derive(Debug, Clone)]
pub struct World {
    /// Run seed for reproducibility
    pub seed: u64,
    pub tuning: Tuning,
    /// Slot 0: replaced wholesale on reload
    pub projectile: Projectile,
    pub ship: Ship,
    pub enemies: Vec<Enemy>,
    pub pickup: Pickup,
    pub life: LifeState,
    /// Simulated ticks
    pub frame: u64,
    /// Frames that finished inside their time budget; timebase for
    /// periodic events
    pub paced_frames: u64,
    /// `paced_frames` value periodic events last ran for
    pub(crate) last_periodic: Option<u64>,
    pub(crate) rng: Pcg32,
}

impl World {
    /// Build the opening layout for a seed
    pub fn new(seed: u64, tuning: Tuning) -> Self {
        let mut rng = Pcg32::seed_from_u64(seed);

        let ship = Ship::new(&tuning.ship);
        let projectile = Projectile::loaded_at(ship.fire_position(&tuning.ship));

        // Alternate headings so the opening wave spreads out
        let enemies = (0..tuning.enemy.count)
            .map(|i| {
                let x = tuning.enemy.spawn_x.sample(&mut rng);
                let facing = if i % 2 == 0 { Facing::Right } else { Facing::Left };
                Enemy::new(Vec2::new(x, tuning.enemy.spawn_y), facing, &tuning.enemy)
            })
            .collect();

        let pickup = Pickup::hidden(&tuning.pickup);

        Self {
            seed,
            projectile,
            ship,
            enemies,
            pickup,
            life: LifeState::new(),
            frame: 0,
            paced_frames: 0,
            last_periodic: None,
            rng,
            tuning,
        }
    }

    /// Entities in roster order
    pub fn entities(&self) -> impl Iterator<Item = EntityRef<'_>> {
        std::iter::once(EntityRef::Projectile(&self.projectile))
            .chain(std::iter::once(EntityRef::Ship(&self.ship)))
            .chain(self.enemies.iter().map(EntityRef::Enemy))
            .chain(std::iter::once(EntityRef::Pickup(&self.pickup)))
    }

    /// Mutable entities in roster order
    pub fn entities_mut(&mut self) -> impl Iterator<Item = EntityMut<'_>> {
        std::iter::once(EntityMut::Projectile(&mut self.projectile))
            .chain(std::iter::once(EntityMut::Ship(&mut self.ship)))
            .chain(self.enemies.iter_mut().map(EntityMut::Enemy))
            .chain(std::iter::once(EntityMut::Pickup(&mut self.pickup)))
    }

    /// Swap a freshly loaded round into slot 0
    pub fn reload_projectile(&mut self) {
        let origin = self.ship.fire_position(&self.tuning.ship);
        self.projectile = Projectile::loaded_at(origin);
    }

    /// Called by the frame loop after a frame met its budget
    pub fn record_paced_frame(&mut self) {
        self.paced_frames += 1;
    }

    pub fn phase(&self) -> LifePhase {
        self.life.phase()
    }

    pub fn is_terminated(&self) -> bool {
        self.life.phase() == LifePhase::Terminated
    }
}
