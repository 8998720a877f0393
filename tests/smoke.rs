mod common;

use bevy::prelude::*;
use vampire_core::common::components::{Obstacles, SpawnSeq};
use vampire_core::plugins::audio::{SoundCue, SoundRequest};
use vampire_core::plugins::enemies::Enemy;
use vampire_core::plugins::projectiles::gun::Gun;
use vampire_core::plugins::scene::DrawList;

#[test]
fn boots_and_ticks() {
    let mut app = common::app_headless();

    for _ in 0..3 {
        app.update();
    }
    common::tick_n(&mut app, 3);
}

#[test]
fn world_load_frames_the_character() {
    let mut app = common::app_headless();

    assert!(!app.world().resource::<Obstacles>().is_empty());

    let character = common::character(&app);
    let list = app.world().resource::<DrawList>().clone();
    let drawn = list.iter().find(|c| c.entity == character).unwrap();
    let size = app
        .world()
        .get::<vampire_core::common::components::Bounds>(character)
        .unwrap()
        .size();
    assert_eq!(drawn.position + size * 0.5, Vec2::new(640.0, 360.0));

    let last = list.last().unwrap().entity;
    assert!(app.world().get::<Gun>(last).is_some(), "gun is drawn on top");

    let guns = app.world_mut().query::<&Gun>().iter(app.world()).count();
    assert_eq!(guns, 1);
}

#[test]
fn music_starts_on_entering_the_game() {
    let app = common::app_headless();
    assert_eq!(
        common::buffered::<SoundRequest>(&app),
        vec![SoundRequest::looping(SoundCue::Music)]
    );
}

#[test]
fn enemies_arrive_on_the_spawn_cadence() {
    let mut app = common::app_headless();

    // 37 * 16 = 592ms
    common::tick_n(&mut app, 37);
    let count = app.world_mut().query::<&Enemy>().iter(app.world()).count();
    assert_eq!(count, 0);

    // 38 * 16 = 608ms
    common::tick(&mut app, common::TICK_MS);
    let count = app.world_mut().query::<&Enemy>().iter(app.world()).count();
    assert_eq!(count, 1);

    // 75 * 16 = 1200ms
    common::tick_n(&mut app, 37);
    let mut q = app.world_mut().query_filtered::<&SpawnSeq, With<Enemy>>();
    let mut seqs: Vec<SpawnSeq> = q.iter(app.world()).copied().collect();
    assert_eq!(seqs.len(), 2);
    seqs.sort();
    assert!(seqs[0] < seqs[1]);
}
