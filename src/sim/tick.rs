//! One simulation step
//!
//! Order within a tick:
//! 1. expire life-cycle deadlines (a frozen run stops here)
//! 2. reload the projectile slot if needed, then handle the fire edge
//! 3. per-entity update and integration
//! 4. border resolution for every entity
//! 5. pairwise contacts: projectile–enemy, ship–enemy, enemy–enemy
//!    (a run that just ended stops here)
//! 6. heart pickup and the out-of-lives check
//! 7. periodic events keyed on the paced-frame counter; a slow-channel move
//!    of the ship is border-resolved again
//!
//! The reload in step 2 happens before the ship moves, so a fresh round sits
//! at the muzzle position of the previous frame. It catches up on the next
//! reload; this one-frame lag is intended.
//!
//! Every unordered pair is resolved at most once per tick, so a single overlap
//! can never cost two lives or score two kills.

use super::collision;
use super::entity::{EntityMut, Ship};
use super::life::{self, HitOutcome, LifePhase};
use super::state::{GameEvent, World};
use crate::platform::input::{Action, InputSnapshot};

/// Timing for a single tick
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameTime {
    /// Seconds since the previous tick
    pub dt: f32,
    /// Wall-clock seconds, compared against life-cycle deadlines
    pub now: f64,
}

/// Advance the world by one frame
pub fn tick(world: &mut World, input: &InputSnapshot, time: FrameTime) -> Vec<GameEvent> {
    let mut events = Vec::new();

    match world.life.advance(time.now) {
        Some(LifePhase::Playing) => events.push(GameEvent::CooldownEnded),
        Some(LifePhase::Terminated) => events.push(GameEvent::Terminated),
        _ => {}
    }
    if !world.phase().is_running() {
        return events;
    }

    world.frame += 1;
    let dt = time.dt.clamp(0.0, world.tuning.pacing.max_dt);

    // Slot 0 is reloaded before anything moves, at last frame's muzzle
    if world.projectile.needs_reload(&world.tuning.field) {
        world.reload_projectile();
    }
    if world
        .projectile
        .fire(input.pressed(Action::Fire), world.tuning.projectile.launch_velocity)
    {
        events.push(GameEvent::Fired);
    }

    update_entities(world, input, dt, &mut events);

    let field = world.tuning.field.clone();
    for mut entity in world.entities_mut() {
        entity.resolve_border(&field);
    }
    revive_returning_enemies(world, &mut events);

    resolve_contacts(world, time.now, &mut events);
    if !world.phase().is_running() {
        return events;
    }

    if world.pickup.pickup(&mut world.ship, &world.tuning.pickup) {
        log::info!("Heart collected, {} lives", world.ship.lives);
        events.push(GameEvent::PickupCollected {
            lives: world.ship.lives,
        });
    }
    if world
        .life
        .enforce_game_over(world.ship.lives, time.now, &world.tuning.life)
    {
        events.push(GameEvent::GameOver);
    }

    apply_periodic_events(world, input, &mut events);

    events
}

fn update_entities(world: &mut World, input: &InputSnapshot, dt: f32, events: &mut Vec<GameEvent>) {
    let World {
        projectile,
        ship,
        enemies,
        tuning,
        rng,
        ..
    } = world;

    if ship.update(dt, input, &tuning.ship) {
        events.push(teleported(ship));
    }
    projectile.update(dt);
    for enemy in enemies.iter_mut() {
        enemy.update(dt, rng, &tuning.enemy);
    }
}

/// Dead enemies keep drifting; once back on the field they are live again
fn revive_returning_enemies(world: &mut World, events: &mut Vec<GameEvent>) {
    for (i, enemy) in world.enemies.iter_mut().enumerate() {
        if !enemy.body.alive && enemy.body.pos.y >= 0.0 {
            enemy.body.alive = true;
            log::debug!("Enemy {} back on the field", i);
            events.push(GameEvent::EnemyReturned { enemy: i });
        }
    }
}

fn resolve_contacts(world: &mut World, now: f64, events: &mut Vec<GameEvent>) {
    let World {
        projectile,
        ship,
        enemies,
        life: life_state,
        tuning,
        rng,
        ..
    } = world;
    let contact_tuning = &tuning.collision;

    // Projectile–enemy: only a round in flight hits, and only once
    if projectile.launched && !projectile.spent {
        for (i, enemy) in enemies.iter_mut().enumerate() {
            if !enemy.body.alive {
                continue;
            }
            if collision::resolve_collision(&mut projectile.body, &mut enemy.body, contact_tuning, rng)
                .is_none()
            {
                continue;
            }
            enemy.die(rng, contact_tuning);
            enemy.advance_sprite();
            projectile.spent = true;
            let granted = life::reward_kill(ship, &tuning.ship);
            log::info!("Enemy {} destroyed, {} kills", i, ship.kills);
            events.push(GameEvent::EnemyKilled {
                enemy: i,
                kills: ship.kills,
            });
            if granted {
                events.push(GameEvent::TeleportGranted {
                    charges: ship.teleport_charges,
                });
            }
            break;
        }
    }

    // Ship–enemy
    for enemy in enemies.iter_mut() {
        if !enemy.body.alive {
            continue;
        }
        if collision::resolve_collision(&mut ship.body, &mut enemy.body, contact_tuning, rng).is_none() {
            continue;
        }
        match life_state.register_hit(ship, now, &tuning.life) {
            HitOutcome::LifeLost { remaining } => {
                events.push(GameEvent::ShipHit {
                    lives_left: remaining,
                });
            }
            HitOutcome::GameOver => {
                events.push(GameEvent::ShipHit { lives_left: 0 });
                events.push(GameEvent::GameOver);
            }
            HitOutcome::Absorbed => {}
        }
    }

    // Enemy–enemy, each unordered pair once
    for j in 1..enemies.len() {
        let (head, tail) = enemies.split_at_mut(j);
        let b = &mut tail[0];
        for a in head.iter_mut() {
            if !a.body.alive || !b.body.alive {
                continue;
            }
            collision::resolve_collision(&mut a.body, &mut b.body, contact_tuning, rng);
        }
    }
}

/// Events keyed on the paced-frame counter. They run at most once per
/// counter value, so a frame that overran its budget does not repeat them.
fn apply_periodic_events(world: &mut World, input: &InputSnapshot, events: &mut Vec<GameEvent>) {
    let counter = world.paced_frames;
    if world.last_periodic == Some(counter) {
        return;
    }
    world.last_periodic = Some(counter);

    let World {
        ship,
        enemies,
        pickup,
        tuning,
        rng,
        ..
    } = world;

    if counter % tuning.pacing.slow_tick_period == 0 {
        if ship.slow_update(input, &tuning.ship) {
            events.push(teleported(ship));
        }
        // Nudges and teleports land after the border pass
        EntityMut::Ship(ship).resolve_border(&tuning.field);
    }

    if counter % tuning.collision.stuck_check_period == 0 {
        for (i, enemy) in enemies.iter_mut().enumerate() {
            let since = enemy.body.touches_since_check();
            if enemy.body.respawn(since, rng, &tuning.collision) {
                log::debug!("Enemy {} was stuck ({} touches), moved to {:?}", i, since, enemy.body.pos);
                events.push(GameEvent::EnemyUnstuck { enemy: i });
            }
        }
    }

    if counter % tuning.pickup.spawn_period == 0
        && ship.lives == tuning.pickup.low_life_threshold
    {
        pickup.appear(rng, &tuning.pickup);
        log::debug!("Heart spawned at {:?}", pickup.body.pos);
        events.push(GameEvent::PickupSpawned {
            at: pickup.body.pos,
        });
    }
}

fn teleported(ship: &Ship) -> GameEvent {
    GameEvent::Teleported {
        charges_left: ship.teleport_charges,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::platform::input::ActionSet;
    use crate::tuning::Tuning;
    use glam::Vec2;

    const DT: f32 = 1.0 / 60.0;

    fn idle() -> InputSnapshot {
        InputSnapshot::default()
    }

    fn at(now: f64) -> FrameTime {
        FrameTime { dt: DT, now }
    }

    /// World with enemies parked far from the ship and each other
    fn quiet_world() -> World {
        let mut world = World::new(2024, Tuning::default());
        for (i, enemy) in world.enemies.iter_mut().enumerate() {
            enemy.body.pos = Vec2::new(100.0 + 250.0 * i as f32, 100.0);
        }
        world
    }

    #[test]
    fn test_ship_enemy_overlap_costs_one_life() {
        let mut world = quiet_world();
        world.ship.body.pos = Vec2::new(350.0, 500.0);
        world.enemies[0].body.pos = Vec2::new(350.0, 500.0);

        let events = tick(&mut world, &idle(), at(0.0));
        assert_eq!(world.ship.lives, 2);
        assert!(events.contains(&GameEvent::ShipHit { lives_left: 2 }));
        assert!(matches!(world.phase(), LifePhase::Cooldown { .. }));
        assert_eq!(world.ship.body.touches, 1);
        assert!(world.enemies[0].body.touches >= 1);
        assert!(world.ship.body.distance(&world.enemies[0].body) > 0.0);
    }

    #[test]
    fn test_two_enemies_one_life() {
        let mut world = quiet_world();
        world.ship.body.pos = Vec2::new(350.0, 300.0);
        world.enemies[0].body.pos = Vec2::new(350.0, 300.0);
        world.enemies[1].body.pos = Vec2::new(350.0, 300.0);

        tick(&mut world, &idle(), at(0.0));
        assert_eq!(world.ship.lives, 2);
    }

    #[test]
    fn test_launched_projectile_kills() {
        let mut world = quiet_world();
        let fire = InputSnapshot::fresh(ActionSet::EMPTY.with(Action::Fire));

        let events = tick(&mut world, &fire, at(0.0));
        assert!(events.contains(&GameEvent::Fired));
        assert!(world.projectile.launched);

        world.enemies[1].body.pos = world.projectile.body.pos;
        world.enemies[1].body.vel = Vec2::ZERO;
        let events = tick(&mut world, &idle(), at(0.1));

        assert!(events.contains(&GameEvent::EnemyKilled { enemy: 1, kills: 1 }));
        assert_eq!(world.ship.kills, 1);
        assert!(!world.enemies[1].body.alive);
        assert!(world.enemies[1].body.pos.y < 0.0);
        assert_eq!(world.enemies[1].sprite_frame, 1);
        assert!(world.projectile.spent);

        // Spent round is replaced on the next tick
        tick(&mut world, &idle(), at(0.2));
        assert!(!world.projectile.launched);
        assert!(!world.projectile.spent);
    }

    #[test]
    fn test_loaded_projectile_is_harmless() {
        let mut world = quiet_world();
        world.reload_projectile();
        world.enemies[0].body.pos = world.projectile.body.pos;

        tick(&mut world, &idle(), at(0.0));
        assert_eq!(world.ship.kills, 0);
        assert!(world.enemies[0].body.alive);
    }

    #[test]
    fn test_fire_needs_fresh_press() {
        let mut world = quiet_world();
        let keys = ActionSet::EMPTY.with(Action::Fire);
        let held = InputSnapshot::from_transition(keys, keys);
        let events = tick(&mut world, &held, at(0.0));
        assert!(!events.contains(&GameEvent::Fired));
        assert!(!world.projectile.launched);
    }

    #[test]
    fn test_projectile_reloads_after_leaving_field() {
        let mut world = quiet_world();
        let fire = InputSnapshot::fresh(ActionSet::EMPTY.with(Action::Fire));
        tick(&mut world, &fire, at(0.0));

        let mut t = 0.0;
        let mut reloaded = false;
        for _ in 0..200 {
            t += DT as f64;
            tick(&mut world, &idle(), at(t));
            if !world.projectile.launched {
                reloaded = true;
                break;
            }
        }
        assert!(reloaded);
        let muzzle = world.ship.fire_position(&world.tuning.ship);
        assert!(world.projectile.body.pos.distance(muzzle) < 1.0);
    }

    #[test]
    fn test_game_over_freezes_then_terminates() {
        let mut world = quiet_world();
        world.ship.lives = 1;
        world.ship.body.pos = Vec2::new(350.0, 500.0);
        world.enemies[0].body.pos = Vec2::new(350.0, 500.0);

        let events = tick(&mut world, &idle(), at(1.0));
        assert!(events.contains(&GameEvent::GameOver));
        assert_eq!(world.phase(), LifePhase::GameOver { until: 6.0 });

        let frozen = world.ship.body.pos;
        let frame = world.frame;
        tick(&mut world, &idle(), at(3.0));
        assert_eq!(world.ship.body.pos, frozen);
        assert_eq!(world.frame, frame);

        let events = tick(&mut world, &idle(), at(6.0));
        assert_eq!(events, vec![GameEvent::Terminated]);
        assert!(world.is_terminated());
    }

    #[test]
    fn test_cooldown_expires() {
        let mut world = quiet_world();
        world.ship.body.pos = Vec2::new(350.0, 500.0);
        world.enemies[0].body.pos = Vec2::new(350.0, 500.0);
        tick(&mut world, &idle(), at(0.0));
        world.enemies[0].body.pos = Vec2::new(100.0, 300.0);

        let events = tick(&mut world, &idle(), at(3.0));
        assert!(events.contains(&GameEvent::CooldownEnded));
        assert_eq!(world.phase(), LifePhase::Playing);
    }

    #[test]
    fn test_heart_spawns_only_at_low_life() {
        let mut world = quiet_world();
        tick(&mut world, &idle(), at(0.0));
        assert!(!world.pickup.body.alive);

        let mut world = quiet_world();
        world.ship.lives = 1;
        let events = tick(&mut world, &idle(), at(0.0));
        assert!(world.pickup.body.alive);
        assert!(events.iter().any(|e| matches!(e, GameEvent::PickupSpawned { .. })));
    }

    #[test]
    fn test_heart_collected() {
        let mut world = quiet_world();
        world.pickup.body.alive = true;
        world.pickup.body.pos = world.ship.body.pos;

        let events = tick(&mut world, &idle(), at(0.0));
        assert!(events.contains(&GameEvent::PickupCollected { lives: 4 }));
        assert_eq!(world.ship.lives, 4);
        assert_eq!(world.pickup.body.pos, Vec2::new(-100.0, -100.0));
    }

    #[test]
    fn test_periodic_events_once_per_counter_value() {
        let mut world = quiet_world();
        world.ship.lives = 1;
        tick(&mut world, &idle(), at(0.0));
        assert!(world.pickup.body.alive);

        // Hide it again; same counter value must not respawn it
        world.pickup.body.alive = false;
        tick(&mut world, &idle(), at(0.01));
        assert!(!world.pickup.body.alive);
    }

    #[test]
    fn test_stuck_enemy_is_moved() {
        let mut world = quiet_world();
        world.enemies[2].body.touches = 25;
        let events = tick(&mut world, &idle(), at(0.0));
        assert!(events.contains(&GameEvent::EnemyUnstuck { enemy: 2 }));
        assert_eq!(world.enemies[2].body.pos.y, -50.0);
        assert_eq!(world.enemies[2].body.touches, 0);
    }

    #[test]
    fn test_dead_enemy_returns() {
        let mut world = quiet_world();
        world.enemies[0].body.alive = false;
        world.enemies[0].body.pos = Vec2::new(300.0, -0.01);
        world.enemies[0].body.vel = Vec2::new(0.0, 30.0);

        let events = tick(&mut world, &idle(), at(0.0));
        assert!(events.contains(&GameEvent::EnemyReturned { enemy: 0 }));
        assert!(world.enemies[0].body.alive);
    }

    #[test]
    fn test_same_seed_same_run() {
        let run = || {
            let mut world = World::new(77, Tuning::default());
            let right = InputSnapshot::fresh(ActionSet::EMPTY.with(Action::MoveRight));
            for i in 0..600 {
                let input = if i % 3 == 0 { right } else { idle() };
                tick(&mut world, &input, at(i as f64 * DT as f64));
                world.record_paced_frame();
            }
            (
                world.ship.body.pos,
                world.enemies.iter().map(|e| e.body.pos).collect::<Vec<_>>(),
            )
        };
        assert_eq!(run(), run());
    }

    #[test]
    fn test_run_ending_hit_stops_the_tick() {
        let mut world = quiet_world();
        world.ship.lives = 1;
        world.ship.body.pos = Vec2::new(350.0, 500.0);
        world.enemies[0].body.pos = Vec2::new(350.0, 500.0);
        world.pickup.body.alive = true;
        world.pickup.body.pos = Vec2::new(350.0, 500.0);

        let events = tick(&mut world, &idle(), at(1.0));
        assert_eq!(world.phase(), LifePhase::GameOver { until: 6.0 });
        assert_eq!(world.ship.lives, 0);
        assert!(!events.iter().any(|e| matches!(
            e,
            GameEvent::PickupCollected { .. } | GameEvent::PickupSpawned { .. }
        )));
        assert!(world.pickup.body.alive);
    }

    #[test]
    fn test_slow_channel_move_stays_in_field() {
        let mut world = quiet_world();
        world.ship.body.pos = Vec2::new(700.0, 500.0);
        let keys = ActionSet::EMPTY.with(Action::MoveRight).with(Action::Teleport);
        let held = InputSnapshot::from_transition(keys, keys);

        let events = tick(&mut world, &held, at(0.0));
        assert!(events.contains(&GameEvent::Teleported { charges_left: 2 }));
        let field = &world.tuning.field;
        assert!((field.min_x..=field.max_x).contains(&world.ship.body.pos.x));
        assert_eq!(world.ship.body.pos.x, field.max_x_clamp);
    }

    #[test]
    fn test_heart_spawns_on_period_boundary() {
        let mut world = quiet_world();
        world.ship.lives = 1;

        world.paced_frames = 399;
        tick(&mut world, &idle(), at(0.0));
        assert!(!world.pickup.body.alive);

        world.paced_frames = 400;
        let events = tick(&mut world, &idle(), at(0.01));
        assert!(world.pickup.body.alive);
        assert!(events.iter().any(|e| matches!(e, GameEvent::PickupSpawned { .. })));
    }

    #[test]
    fn test_slow_channel_runs_on_its_period() {
        let keys = ActionSet::EMPTY.with(Action::MoveDown);
        let held = InputSnapshot::from_transition(keys, keys);

        let mut world = quiet_world();
        world.paced_frames = 5;
        let start = world.ship.body.pos.y;
        tick(&mut world, &held, at(0.0));
        assert!(world.ship.body.pos.y - start < 1.0);

        let mut world = quiet_world();
        world.paced_frames = 6;
        tick(&mut world, &held, at(0.0));
        assert!(world.ship.body.pos.y - start >= 5.0);
    }

    #[test]
    fn test_stuck_check_skips_odd_counters() {
        let mut world = quiet_world();
        world.enemies[2].body.touches = 25;

        world.paced_frames = 3;
        let events = tick(&mut world, &idle(), at(0.0));
        assert!(!events.contains(&GameEvent::EnemyUnstuck { enemy: 2 }));
        assert_eq!(world.enemies[2].body.touches, 25);

        world.paced_frames = 4;
        let events = tick(&mut world, &idle(), at(0.01));
        assert!(events.contains(&GameEvent::EnemyUnstuck { enemy: 2 }));
        assert_eq!(world.enemies[2].body.touches, 0);
    }
}
