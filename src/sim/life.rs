//! Lives, the post-hit cooldown window and game over
//!
//! ```text
//!   Playing --hit--> Cooldown --deadline--> Playing
//!   Playing --lives < 1--> GameOver --deadline--> Terminated
//! ```
//!
//! Deadlines are wall-clock seconds handed in by the frame loop and checked
//! once per frame.

use super::entity::Ship;
use crate::tuning::{LifeTuning, ShipTuning};

/// Where the run is in its life cycle
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LifePhase {
    Playing,
    /// Hits are absorbed until `until`
    Cooldown { until: f64 },
    /// Simulation frozen, final screen shown until `until`
    GameOver { until: f64 },
    Terminated,
}

impl LifePhase {
    /// Entities move and collide in this phase
    pub fn is_running(&self) -> bool {
        matches!(self, LifePhase::Playing | LifePhase::Cooldown { .. })
    }

    pub fn is_invulnerable(&self) -> bool {
        !matches!(self, LifePhase::Playing)
    }
}

/// What a ship–enemy contact did to the run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HitOutcome {
    /// Cooldown (or game over) swallowed the hit
    Absorbed,
    LifeLost { remaining: u32 },
    GameOver,
}

#[derive(Debug, Clone)]
pub struct LifeState {
    phase: LifePhase,
}

impl Default for LifeState {
    fn default() -> Self {
        Self::new()
    }
}

impl LifeState {
    pub fn new() -> Self {
        Self {
            phase: LifePhase::Playing,
        }
    }

    pub fn phase(&self) -> LifePhase {
        self.phase
    }

    /// Expire deadlines. Returns the new phase if it changed.
    pub fn advance(&mut self, now: f64) -> Option<LifePhase> {
        let next = match self.phase {
            LifePhase::Cooldown { until } if now >= until => LifePhase::Playing,
            LifePhase::GameOver { until } if now >= until => LifePhase::Terminated,
            _ => return None,
        };
        self.phase = next;
        Some(next)
    }

    /// The ship touched an enemy
    pub fn register_hit(&mut self, ship: &mut Ship, now: f64, tuning: &LifeTuning) -> HitOutcome {
        if self.phase.is_invulnerable() {
            return HitOutcome::Absorbed;
        }

        ship.lives = ship.lives.saturating_sub(1);
        if ship.lives < 1 {
            self.enter_game_over(now, tuning);
            return HitOutcome::GameOver;
        }

        self.phase = LifePhase::Cooldown {
            until: now + tuning.cooldown_secs,
        };
        log::info!("Ship hit, {} lives left", ship.lives);
        HitOutcome::LifeLost {
            remaining: ship.lives,
        }
    }

    /// Out of lives ends the run whatever the cooldown says.
    /// Returns true on the transition.
    pub fn enforce_game_over(&mut self, lives: u32, now: f64, tuning: &LifeTuning) -> bool {
        if lives >= 1 || !self.phase.is_running() {
            return false;
        }
        self.enter_game_over(now, tuning);
        true
    }

    fn enter_game_over(&mut self, now: f64, tuning: &LifeTuning) {
        log::info!("Game over");
        self.phase = LifePhase::GameOver {
            until: now + tuning.game_over_secs,
        };
    }
}

/// Credit a kill. Every second kill earns a teleport charge while below the
/// cap. Returns true if a charge was granted.
pub fn reward_kill(ship: &mut Ship, tuning: &ShipTuning) -> bool {
    ship.kills += 1;
    if ship.kills % 2 == 0 && ship.teleport_charges < tuning.max_teleport_charges {
        ship.teleport_charges += 1;
        return true;
    }
    false
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ship() -> Ship {
        Ship::new(&ShipTuning::default())
    }

    #[test]
    fn test_hit_opens_cooldown() {
        let tuning = LifeTuning::default();
        let mut life = LifeState::new();
        let mut ship = ship();

        assert_eq!(
            life.register_hit(&mut ship, 10.0, &tuning),
            HitOutcome::LifeLost { remaining: 2 }
        );
        assert_eq!(life.phase(), LifePhase::Cooldown { until: 13.0 });

        // Repeated contact inside the window is free
        for t in [10.0, 11.0, 12.99] {
            assert_eq!(life.register_hit(&mut ship, t, &tuning), HitOutcome::Absorbed);
            assert_eq!(life.advance(t), None);
        }
        assert_eq!(ship.lives, 2);

        assert_eq!(life.advance(13.0), Some(LifePhase::Playing));
        assert_eq!(
            life.register_hit(&mut ship, 13.0, &tuning),
            HitOutcome::LifeLost { remaining: 1 }
        );
    }

    #[test]
    fn test_last_life_ends_run() {
        let tuning = LifeTuning::default();
        let mut life = LifeState::new();
        let mut ship = ship();
        ship.lives = 1;

        assert_eq!(life.register_hit(&mut ship, 2.0, &tuning), HitOutcome::GameOver);
        assert_eq!(ship.lives, 0);
        assert_eq!(life.phase(), LifePhase::GameOver { until: 7.0 });
        assert!(!life.phase().is_running());

        assert_eq!(life.advance(6.9), None);
        assert_eq!(life.advance(7.0), Some(LifePhase::Terminated));
        assert_eq!(life.register_hit(&mut ship, 8.0, &tuning), HitOutcome::Absorbed);
    }

    #[test]
    fn test_enforce_game_over_ignores_cooldown() {
        let tuning = LifeTuning::default();
        let mut life = LifeState::new();
        let mut ship = ship();
        life.register_hit(&mut ship, 0.0, &tuning);
        assert!(matches!(life.phase(), LifePhase::Cooldown { .. }));

        assert!(!life.enforce_game_over(2, 1.0, &tuning));
        assert!(life.enforce_game_over(0, 1.0, &tuning));
        assert_eq!(life.phase(), LifePhase::GameOver { until: 6.0 });
        // Already over: no second transition
        assert!(!life.enforce_game_over(0, 2.0, &tuning));
    }

    #[test]
    fn test_kill_rewards() {
        let tuning = ShipTuning::default();
        let mut ship = ship();
        assert!(!reward_kill(&mut ship, &tuning));
        assert!(reward_kill(&mut ship, &tuning));
        assert_eq!(ship.kills, 2);
        assert_eq!(ship.teleport_charges, 4);

        ship.teleport_charges = tuning.max_teleport_charges;
        reward_kill(&mut ship, &tuning);
        assert!(!reward_kill(&mut ship, &tuning));
        assert_eq!(ship.teleport_charges, tuning.max_teleport_charges);
        assert_eq!(ship.kills, 4);
    }
}
