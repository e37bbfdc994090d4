//! Logical input actions and per-frame snapshots
//!
//! Raw key handling belongs to the host. The simulation only sees an
//! [`InputSnapshot`]: which actions are held this frame and which of them went
//! down since the previous frame. A snapshot is built once per frame and never
//! changes while the frame is simulated.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use crate::sim::World;

/// Logical player actions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Action {
    MoveUp,
    MoveDown,
    MoveLeft,
    MoveRight,
    Fire,
    Teleport,
    ToggleMute,
}

impl Action {
    pub const ALL: [Action; 7] = [
        Action::MoveUp,
        Action::MoveDown,
        Action::MoveLeft,
        Action::MoveRight,
        Action::Fire,
        Action::Teleport,
        Action::ToggleMute,
    ];

    #[inline]
    fn bit(self) -> u8 {
        1 << self as u8
    }
}

/// Set of actions packed into a byte
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct ActionSet(u8);

impl ActionSet {
    pub const EMPTY: ActionSet = ActionSet(0);

    pub fn contains(self, action: Action) -> bool {
        self.0 & action.bit() != 0
    }

    pub fn insert(&mut self, action: Action) {
        self.0 |= action.bit();
    }

    pub fn remove(&mut self, action: Action) {
        self.0 &= !action.bit();
    }

    pub fn with(mut self, action: Action) -> Self {
        self.insert(action);
        self
    }

    pub fn is_empty(self) -> bool {
        self.0 == 0
    }

    pub fn iter(self) -> impl Iterator<Item = Action> {
        Action::ALL.into_iter().filter(move |a| self.contains(*a))
    }
}

impl FromIterator<Action> for ActionSet {
    fn from_iter<T: IntoIterator<Item = Action>>(iter: T) -> Self {
        let mut set = ActionSet::EMPTY;
        for action in iter {
            set.insert(action);
        }
        set
    }
}

/// Immutable view of the input for one frame
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct InputSnapshot {
    held: ActionSet,
    pressed: ActionSet,
}

impl InputSnapshot {
    /// Build a snapshot from last frame's held set and this frame's
    pub fn from_transition(previous: ActionSet, current: ActionSet) -> Self {
        Self {
            held: current,
            pressed: ActionSet(current.0 & !previous.0),
        }
    }

    /// Snapshot where every held action was also just pressed
    pub fn fresh(held: ActionSet) -> Self {
        Self::from_transition(ActionSet::EMPTY, held)
    }

    /// Action is down this frame
    pub fn held(&self, action: Action) -> bool {
        self.held.contains(action)
    }

    /// Action went down this frame
    pub fn pressed(&self, action: Action) -> bool {
        self.pressed.contains(action)
    }

    pub fn held_set(&self) -> ActionSet {
        self.held
    }
}

/// Source of raw held-action state, polled once per frame
pub trait InputSource {
    fn poll(&mut self, world: &World) -> ActionSet;
}

/// Replays a fixed list of held sets, one per frame, then releases everything
#[derive(Debug, Clone, Default)]
pub struct ScriptedInput {
    frames: Vec<ActionSet>,
    cursor: usize,
}

impl ScriptedInput {
    pub fn new(frames: Vec<ActionSet>) -> Self {
        Self { frames, cursor: 0 }
    }
}

impl InputSource for ScriptedInput {
    fn poll(&mut self, _world: &World) -> ActionSet {
        let held = self.frames.get(self.cursor).copied().unwrap_or_default();
        self.cursor += 1;
        held
    }
}

/// Demo pilot used for headless runs
///
/// Steers under the nearest live enemy, fires when roughly lined up and burns
/// a teleport charge when an enemy gets too close.
#[derive(Debug, Clone)]
pub struct Autopilot {
    rng: Pcg32,
    fire_held: bool,
}

impl Autopilot {
    /// Horizontal slack before the pilot steers
    const ALIGN_TOLERANCE: f32 = 18.0;
    /// Enemies closer than this trigger an evasive teleport
    const PANIC_DISTANCE: f32 = 70.0;

    pub fn new(seed: u64) -> Self {
        Self {
            rng: Pcg32::seed_from_u64(seed ^ 0xA5A5_5A5A),
            fire_held: false,
        }
    }
}

impl InputSource for Autopilot {
    fn poll(&mut self, world: &World) -> ActionSet {
        let mut held = ActionSet::EMPTY;
        let ship_pos = world.ship.body.pos;

        let target = world
            .enemies
            .iter()
            .filter(|e| e.body.alive)
            .min_by(|a, b| {
                a.body
                    .pos
                    .distance(ship_pos)
                    .partial_cmp(&b.body.pos.distance(ship_pos))
                    .unwrap_or(std::cmp::Ordering::Equal)
            })
            .map(|e| e.body.pos);

        let Some(target) = target else {
            return held;
        };

        let dx = target.x - ship_pos.x;
        if dx > Self::ALIGN_TOLERANCE {
            held.insert(Action::MoveRight);
        } else if dx < -Self::ALIGN_TOLERANCE {
            held.insert(Action::MoveLeft);
        } else {
            // Let the ship coast back toward rest when lined up
            let vx = world.ship.body.vel.x;
            if vx > 20.0 {
                held.insert(Action::MoveLeft);
            } else if vx < -20.0 {
                held.insert(Action::MoveRight);
            }
        }

        // Fire is edge-triggered: release every other frame while lined up
        if dx.abs() <= Self::ALIGN_TOLERANCE * 2.0 && !self.fire_held {
            held.insert(Action::Fire);
            self.fire_held = true;
        } else {
            self.fire_held = false;
        }

        let threat = Vec2::new(dx, target.y - ship_pos.y).length();
        if threat < Self::PANIC_DISTANCE && world.ship.teleport_charges > 0 && self.rng.random_bool(0.5)
        {
            held.insert(Action::Teleport);
        }

        held
    }
}
