//! End-to-end scenarios through the public simulation API

use glam::Vec2;
use space_game::Tuning;
use space_game::platform::{Action, ActionSet, InputSnapshot};
use space_game::sim::{FrameTime, GameEvent, LifePhase, World, tick};

const DT: f32 = 1.0 / 60.0;

fn frame(now: f64) -> FrameTime {
    FrameTime { dt: DT, now }
}

/// Enemies parked apart near the top, away from the ship
fn world(seed: u64) -> World {
    let mut world = World::new(seed, Tuning::default());
    for (i, enemy) in world.enemies.iter_mut().enumerate() {
        enemy.body.pos = Vec2::new(100.0 + 250.0 * i as f32, 60.0);
        enemy.body.vel = Vec2::ZERO;
    }
    world
}

#[test]
fn ship_and_enemy_on_same_spot() {
    let mut world = world(1);
    world.ship.body.pos = Vec2::new(350.0, 500.0);
    world.enemies[0].body.pos = Vec2::new(350.0, 500.0);
    let enemy_touches = world.enemies[0].body.touches;

    let events = tick(&mut world, &InputSnapshot::default(), frame(0.0));

    assert_eq!(world.ship.lives, 2);
    assert!(events.contains(&GameEvent::ShipHit { lives_left: 2 }));
    assert_eq!(world.phase(), LifePhase::Cooldown { until: 3.0 });
    assert!(world.ship.body.distance(&world.enemies[0].body) > 0.0);
    assert_eq!(world.ship.body.touches, 1);
    assert_eq!(world.enemies[0].body.touches, enemy_touches + 1);
}

#[test]
fn launched_projectile_on_enemy() {
    let mut world = world(2);
    let fire = InputSnapshot::fresh(ActionSet::EMPTY.with(Action::Fire));
    tick(&mut world, &fire, frame(0.0));
    assert!(world.projectile.launched);

    world.enemies[2].sprite_frame = 4;
    world.enemies[2].body.pos = world.projectile.body.pos;
    let events = tick(&mut world, &InputSnapshot::default(), frame(DT as f64));

    assert!(events.contains(&GameEvent::EnemyKilled { enemy: 2, kills: 1 }));
    assert_eq!(world.ship.kills, 1);
    let enemy = &world.enemies[2];
    assert!(!enemy.body.alive);
    assert!(enemy.body.pos.y < 0.0);
    // Last frame wraps to the first
    assert_eq!(enemy.sprite_frame, 0);
}

#[test]
fn second_kill_grants_teleport() {
    let mut world = world(3);
    let fire = InputSnapshot::fresh(ActionSet::EMPTY.with(Action::Fire));
    let mut now = 0.0;

    for target in [0, 1] {
        tick(&mut world, &fire, frame(now));
        now += DT as f64;
        world.enemies[target].body.pos = world.projectile.body.pos;
        tick(&mut world, &InputSnapshot::default(), frame(now));
        now += DT as f64;
    }

    assert_eq!(world.ship.kills, 2);
    assert_eq!(world.ship.teleport_charges, 4);
}

#[test]
fn teleport_uses_a_charge() {
    let mut world = world(4);
    let keys = ActionSet::EMPTY.with(Action::MoveLeft).with(Action::Teleport);
    let start = world.ship.body.pos;

    let events = tick(&mut world, &InputSnapshot::fresh(keys), frame(0.0));
    assert!(events.contains(&GameEvent::Teleported { charges_left: 2 }));
    assert!(world.ship.body.pos.x < start.x - 99.0);
}

#[test]
fn last_life_ends_the_run() {
    let mut world = world(5);
    world.ship.lives = 1;
    world.ship.body.pos = Vec2::new(200.0, 400.0);
    world.enemies[0].body.pos = Vec2::new(200.0, 400.0);

    let events = tick(&mut world, &InputSnapshot::default(), frame(10.0));
    assert!(events.contains(&GameEvent::GameOver));
    assert_eq!(world.ship.lives, 0);

    let mut now = 10.0;
    while !world.is_terminated() {
        now += DT as f64;
        assert!(now <= 15.0 + 1e-6, "game over screen outlived its window");
        tick(&mut world, &InputSnapshot::default(), frame(now));
    }
}
