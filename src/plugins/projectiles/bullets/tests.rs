use std::time::Duration;

use bevy::prelude::*;

use super::systems::{advance_bullets, spawn_bullet, spawn_requested_bullets};
use super::Bullet;
use crate::common::components::{Bounds, CollisionMask, SpawnSequence};
use crate::common::input::FrameInput;
use crate::common::test_utils::{advance_ms, init_messages, run_system_once};
use crate::common::tunables::Tunables;
use crate::plugins::catalog::{ArtKey, FrameCatalog};
use crate::plugins::lifecycle::{despawn_marked, PendingDespawn};
use crate::plugins::projectiles::messages::SpawnBulletRequest;

fn bullet_world() -> World {
    let mut world = World::new();
    world.insert_resource(Tunables::default());
    world.insert_resource(FrameCatalog::placeholder());
    world.init_resource::<SpawnSequence>();
    world.init_resource::<FrameInput>();
    world.insert_resource(Time::<()>::default());
    init_messages::<SpawnBulletRequest>(&mut world);
    world
}

fn step(world: &mut World, ms: u64) {
    advance_ms(world, ms);
    run_system_once(world, advance_bullets);
}

#[test]
fn expiry_is_strictly_after_lifetime() {
    let bullet = Bullet { born: Duration::from_millis(100), lifetime: Duration::from_millis(1000) };
    assert!(!bullet.expired(Duration::from_millis(1100)));
    assert!(bullet.expired(Duration::from_millis(1101)));
}

#[test]
fn bullet_flies_straight_then_expires() {
    let mut world = bullet_world();
    let bullet = run_system_once(
        &mut world,
        |mut commands: Commands,
         mut seq: ResMut<SpawnSequence>,
         catalog: Res<FrameCatalog>,
         tunables: Res<Tunables>| {
            spawn_bullet(&mut commands, &mut seq, &catalog, &tunables, Vec2::new(500.0, 500.0), Vec2::X, Duration::ZERO)
        },
    );

    for _ in 0..10 {
        step(&mut world, 50);
    }
    let center = world.get::<Bounds>(bullet).unwrap().center();
    assert!((center - Vec2::new(900.0, 500.0)).length() < 1e-2, "at 500ms: {center}");

    for _ in 0..10 {
        step(&mut world, 50);
    }
    assert!(world.get::<PendingDespawn>(bullet).is_none(), "still alive at exactly 1000ms");

    step(&mut world, 1);
    assert!(world.get::<PendingDespawn>(bullet).is_some());

    run_system_once(&mut world, despawn_marked);
    assert!(world.get_entity(bullet).is_err());
}

#[test]
fn requested_bullets_appear_at_the_muzzle() {
    let mut world = bullet_world();
    advance_ms(&mut world, 250);
    world.write_message(SpawnBulletRequest { origin: Vec2::new(500.0, 500.0), heading: Vec2::NEG_X });

    run_system_once(&mut world, spawn_requested_bullets);

    let mut q = world.query::<(&Bullet, &Bounds, &CollisionMask)>();
    let (bullet, bounds, mask) = q.single(&world).unwrap();
    let art = world.resource::<FrameCatalog>().frame(ArtKey::Bullet, 0);

    assert_eq!(bullet.born, Duration::from_millis(250));
    assert_eq!(bounds.center(), Vec2::new(278.0, 500.0));
    assert_eq!(bounds.size(), art.size());
    assert_eq!(mask.size(), bounds.size());
}
