//! Simulated entities
//!
//! Every entity shares a [`Body`] (position, velocity, facing, touch counter,
//! alive flag). The four variants add their own state and rules on top.
//! Code that needs to treat the roster uniformly goes through the tagged
//! [`EntityRef`] / [`EntityMut`] views and dispatches on the variant.

use glam::Vec2;
use rand::Rng;

use super::collision;
use crate::platform::input::{Action, InputSnapshot};
use crate::renderer::{Renderer, Sprite};
use crate::tuning::{CollisionTuning, EnemyTuning, FieldTuning, PickupTuning, ShipTuning};

/// Horizontal heading
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Facing {
    Left,
    Right,
}

impl Facing {
    #[inline]
    pub fn sign(self) -> f32 {
        match self {
            Facing::Left => -1.0,
            Facing::Right => 1.0,
        }
    }
}

/// The four movement directions, in the order the ship reads them
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Down,
        Direction::Left,
        Direction::Right,
    ];

    pub fn action(self) -> Action {
        match self {
            Direction::Up => Action::MoveUp,
            Direction::Down => Action::MoveDown,
            Direction::Left => Action::MoveLeft,
            Direction::Right => Action::MoveRight,
        }
    }

    /// Unit step in screen space (y grows downward)
    pub fn unit(self) -> Vec2 {
        match self {
            Direction::Up => Vec2::new(0.0, -1.0),
            Direction::Down => Vec2::new(0.0, 1.0),
            Direction::Left => Vec2::new(-1.0, 0.0),
            Direction::Right => Vec2::new(1.0, 0.0),
        }
    }

    /// Last direction held this frame (later entries in [`Direction::ALL`] win)
    pub fn latest_held(input: &InputSnapshot) -> Option<Direction> {
        Direction::ALL
            .into_iter()
            .filter(|d| input.held(d.action()))
            .last()
    }
}

/// State shared by every entity
#[derive(Debug, Clone, PartialEq)]
pub struct Body {
    pub pos: Vec2,
    pub vel: Vec2,
    pub facing: Facing,
    /// Border and collision contacts
    pub touches: u32,
    pub alive: bool,
    /// `touches` at the last stuck check
    touch_checkpoint: u32,
}

impl Body {
    pub fn at(pos: Vec2) -> Self {
        Self {
            pos,
            vel: Vec2::ZERO,
            facing: Facing::Right,
            touches: 0,
            alive: true,
            touch_checkpoint: 0,
        }
    }

    /// Explicit Euler step
    #[inline]
    pub fn integrate(&mut self, dt: f32) {
        self.pos += self.vel * dt;
    }

    #[inline]
    pub fn distance(&self, other: &Body) -> f32 {
        self.pos.distance(other.pos)
    }

    /// Park off-field with no velocity and mark as dead
    pub fn die(&mut self, rng: &mut impl Rng, tuning: &CollisionTuning) {
        self.pos = Vec2::new(tuning.dead_x.sample(rng), tuning.dead_y.sample(rng));
        self.vel = Vec2::ZERO;
        self.alive = false;
    }

    /// Touches accumulated since the previous call
    pub fn touches_since_check(&mut self) -> u32 {
        let since = self.touches.saturating_sub(self.touch_checkpoint);
        self.touch_checkpoint = self.touches;
        since
    }

    /// Stuck-entity recovery: relocate when it bounced too often since the
    /// last check. Returns whether it was moved.
    pub fn respawn(
        &mut self,
        touches_since_check: u32,
        rng: &mut impl Rng,
        tuning: &CollisionTuning,
    ) -> bool {
        if touches_since_check <= tuning.stuck_touches {
            return false;
        }
        self.pos = Vec2::new(tuning.unstuck_x.sample(rng), tuning.unstuck_y);
        self.touches = 0;
        self.touch_checkpoint = 0;
        true
    }

    /// Undo a velocity change that broke the speed cap
    #[inline]
    fn enforce_speed_cap(&mut self, previous: Vec2, cap: f32) {
        if self.vel.length() > cap {
            self.vel = previous;
        }
    }
}

/// The player ship
#[derive(Debug, Clone)]
pub struct Ship {
    pub body: Body,
    pub lives: u32,
    pub kills: u32,
    pub teleport_charges: u32,
    pub speed_cap: f32,
    pub thrust: f32,
}

impl Ship {
    pub fn new(tuning: &ShipTuning) -> Self {
        Self {
            body: Body::at(tuning.spawn),
            lives: tuning.lives,
            kills: 0,
            teleport_charges: tuning.teleport_charges,
            speed_cap: tuning.max_speed,
            thrust: tuning.thrust,
        }
    }

    /// Per-frame input channel: thrust, edge-triggered teleport, speed cap,
    /// then integration. Returns true if the ship teleported.
    pub fn update(&mut self, dt: f32, input: &InputSnapshot, tuning: &ShipTuning) -> bool {
        let previous = self.body.vel;
        let step = self.thrust * dt;
        for dir in Direction::ALL {
            if input.held(dir.action()) {
                self.body.vel += dir.unit() * step;
            }
        }

        let mut teleported = false;
        if input.pressed(Action::Teleport) {
            if let Some(dir) = Direction::latest_held(input) {
                teleported = self.teleport(dir, tuning.teleport_distance);
            }
        }

        self.body.enforce_speed_cap(previous, self.speed_cap);
        self.body.integrate(dt);
        teleported
    }

    /// Low-frequency input channel: positional nudges and a held-teleport
    /// repeat. Returns true if the ship teleported.
    pub fn slow_update(&mut self, input: &InputSnapshot, tuning: &ShipTuning) -> bool {
        for dir in Direction::ALL {
            if input.held(dir.action()) {
                self.body.pos += dir.unit() * tuning.nudge;
            }
        }

        // A fresh press was already handled by `update` this frame
        if input.held(Action::Teleport) && !input.pressed(Action::Teleport) {
            if let Some(dir) = Direction::latest_held(input) {
                return self.teleport(dir, tuning.teleport_distance);
            }
        }
        false
    }

    fn teleport(&mut self, dir: Direction, distance: f32) -> bool {
        if self.teleport_charges == 0 {
            return false;
        }
        self.body.pos += dir.unit() * distance;
        self.teleport_charges -= 1;
        log::debug!(
            "Teleported {:?} to {:?}, {} charges left",
            dir,
            self.body.pos,
            self.teleport_charges
        );
        true
    }

    /// Where a fresh projectile appears
    pub fn fire_position(&self, tuning: &ShipTuning) -> Vec2 {
        self.body.pos + tuning.muzzle_offset
    }
}

/// A drifting enemy
#[derive(Debug, Clone)]
pub struct Enemy {
    pub body: Body,
    /// Current frame of the hit-reaction animation
    pub sprite_frame: u32,
    pub sprite_count: u32,
    pub speed_cap: f32,
}

impl Enemy {
    pub fn new(pos: Vec2, facing: Facing, tuning: &EnemyTuning) -> Self {
        let mut body = Body::at(pos);
        body.facing = facing;
        Self {
            body,
            sprite_frame: 0,
            sprite_count: tuning.sprite_frames.max(1),
            speed_cap: tuning.max_speed,
        }
    }

    /// Random thrust toward the facing side plus a random downward drift,
    /// reverted as a whole if the result is too fast, then integrated.
    pub fn update(&mut self, dt: f32, rng: &mut impl Rng, tuning: &EnemyTuning) {
        let previous = self.body.vel;
        let thrust = tuning.thrust.sample(rng);
        let drift = tuning.drift.sample(rng);
        self.body.vel.x += self.body.facing.sign() * thrust * dt;
        self.body.vel.y += drift * dt;
        self.body.enforce_speed_cap(previous, self.speed_cap);
        self.body.integrate(dt);
    }

    /// Step the hit animation, wrapping after the last frame
    pub fn advance_sprite(&mut self) {
        self.sprite_frame = (self.sprite_frame + 1) % self.sprite_count;
    }

    pub fn die(&mut self, rng: &mut impl Rng, tuning: &CollisionTuning) {
        self.body.die(rng, tuning);
    }
}

/// The ship's single round
#[derive(Debug, Clone)]
pub struct Projectile {
    pub body: Body,
    pub launched: bool,
    /// Muzzle position this round was loaded at
    pub fire_origin: Vec2,
    /// Consumed by a hit; replaced on the next tick
    pub spent: bool,
}

impl Projectile {
    pub fn loaded_at(origin: Vec2) -> Self {
        Self {
            body: Body::at(origin),
            launched: false,
            fire_origin: origin,
            spent: false,
        }
    }

    /// Launch on the fire edge. An already launched round ignores it.
    pub fn fire(&mut self, fire_edge: bool, launch_velocity: f32) -> bool {
        if !fire_edge || self.launched {
            return false;
        }
        self.body.vel.y = launch_velocity;
        self.launched = true;
        true
    }

    pub fn update(&mut self, dt: f32) {
        self.body.integrate(dt);
    }

    pub fn is_touching_border(&self, field: &FieldTuning) -> bool {
        collision::is_touching_border(self.body.pos, field, &field.projectile, field.projectile_exit_y)
    }

    /// Slot 0 must be reloaded: nothing in flight, or the flight is over
    pub fn needs_reload(&self, field: &FieldTuning) -> bool {
        !self.launched || self.spent || self.is_touching_border(field)
    }
}

/// The heart pickup; `body.alive` doubles as visibility
#[derive(Debug, Clone)]
pub struct Pickup {
    pub body: Body,
}

impl Pickup {
    pub fn hidden(tuning: &PickupTuning) -> Self {
        let mut body = Body::at(tuning.hidden_at);
        body.alive = false;
        Self { body }
    }

    /// Place at a random spot on the field
    pub fn appear(&mut self, rng: &mut impl Rng, tuning: &PickupTuning) {
        self.body.pos = Vec2::new(tuning.area_x.sample(rng), tuning.area_y.sample(rng));
        self.body.alive = true;
    }

    /// Give the ship a life if it is close enough. Returns true on pickup.
    pub fn pickup(&mut self, ship: &mut Ship, tuning: &PickupTuning) -> bool {
        if !self.body.alive || self.body.distance(&ship.body) >= tuning.radius {
            return false;
        }
        self.body.pos = tuning.hidden_at;
        self.body.alive = false;
        ship.lives += 1;
        true
    }
}

/// Variant tag
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntityKind {
    Projectile,
    Ship,
    Enemy,
    Pickup,
}

/// Shared read-only view of any entity
#[derive(Debug, Clone, Copy)]
pub enum EntityRef<'a> {
    Projectile(&'a Projectile),
    Ship(&'a Ship),
    Enemy(&'a Enemy),
    Pickup(&'a Pickup),
}

impl<'a> EntityRef<'a> {
    pub fn kind(&self) -> EntityKind {
        match self {
            EntityRef::Projectile(_) => EntityKind::Projectile,
            EntityRef::Ship(_) => EntityKind::Ship,
            EntityRef::Enemy(_) => EntityKind::Enemy,
            EntityRef::Pickup(_) => EntityKind::Pickup,
        }
    }

    pub fn body(&self) -> &'a Body {
        match *self {
            EntityRef::Projectile(p) => &p.body,
            EntityRef::Ship(s) => &s.body,
            EntityRef::Enemy(e) => &e.body,
            EntityRef::Pickup(p) => &p.body,
        }
    }

    pub fn is_dead(&self) -> bool {
        !self.body().alive
    }

    pub fn sprite(&self) -> Sprite {
        match self {
            EntityRef::Projectile(_) => Sprite::Projectile,
            EntityRef::Ship(_) => Sprite::Ship,
            EntityRef::Enemy(e) => Sprite::Enemy(e.sprite_frame),
            EntityRef::Pickup(_) => Sprite::Heart,
        }
    }

    /// Hand the sprite and position to the renderer; dead entities are skipped
    pub fn render(&self, target: &mut impl Renderer) {
        if self.is_dead() {
            return;
        }
        target.draw(self.sprite(), self.body().pos);
    }
}

/// Shared mutable view of any entity
#[derive(Debug)]
pub enum EntityMut<'a> {
    Projectile(&'a mut Projectile),
    Ship(&'a mut Ship),
    Enemy(&'a mut Enemy),
    Pickup(&'a mut Pickup),
}

impl EntityMut<'_> {
    pub fn kind(&self) -> EntityKind {
        match self {
            EntityMut::Projectile(_) => EntityKind::Projectile,
            EntityMut::Ship(_) => EntityKind::Ship,
            EntityMut::Enemy(_) => EntityKind::Enemy,
            EntityMut::Pickup(_) => EntityKind::Pickup,
        }
    }

    pub fn body_mut(&mut self) -> &mut Body {
        match self {
            EntityMut::Projectile(p) => &mut p.body,
            EntityMut::Ship(s) => &mut s.body,
            EntityMut::Enemy(e) => &mut e.body,
            EntityMut::Pickup(p) => &mut p.body,
        }
    }

    /// Clamp/reflect at the field edges using the variant's vertical limits.
    /// A hidden pickup stays parked where it is.
    pub fn resolve_border(&mut self, field: &FieldTuning) -> bool {
        let rule = match self {
            EntityMut::Projectile(_) => &field.projectile,
            EntityMut::Ship(_) => &field.ship,
            EntityMut::Enemy(_) => &field.enemy,
            EntityMut::Pickup(p) if !p.body.alive => return false,
            EntityMut::Pickup(_) => &field.pickup,
        };
        collision::resolve_border(self.body_mut(), field, rule)
    }
}
