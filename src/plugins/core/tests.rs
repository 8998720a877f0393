use std::time::Duration;

use bevy::prelude::*;

use crate::common::components::SpawnSequence;
use crate::common::input::FrameInput;
use crate::common::test_utils::run_system_once;
use crate::common::tunables::Tunables;
use crate::plugins::core::{self, FrameContext};

#[test]
fn inserts_resources() {
    let mut app = App::new();
    core::plugin(&mut app);
    assert!(app.world().get_resource::<Tunables>().is_some());
    assert!(app.world().get_resource::<ClearColor>().is_some());
    assert!(app.world().get_resource::<SpawnSequence>().is_some());
    assert!(app.world().get_resource::<FrameInput>().is_some());
}

#[test]
fn fixed_tick_follows_tunables() {
    let mut app = App::new();
    app.insert_resource(Tunables { tick_hz: 30.0, ..default() });
    core::plugin(&mut app);

    let fixed = app.world().resource::<Time<Fixed>>();
    assert_eq!(fixed.timestep(), Duration::from_secs_f64(1.0 / 30.0));
}

#[test]
fn frame_context_reports_clock_and_delta() {
    let mut world = World::new();
    world.insert_resource(Tunables::default());
    world.insert_resource(FrameInput { fire: true, ..default() });
    let mut time = Time::<()>::default();
    time.advance_by(Duration::from_millis(40));
    time.advance_by(Duration::from_millis(20));
    world.insert_resource(time);

    let (now, dt, fire) = run_system_once(&mut world, |ctx: FrameContext| (ctx.now(), ctx.dt(), ctx.input.fire));

    assert_eq!(now, Duration::from_millis(60));
    assert!((dt - 0.02).abs() < 1e-6);
    assert!(fire);
}

#[test]
fn spawn_sequence_is_monotonic() {
    let mut seq = SpawnSequence::default();
    let a = seq.next();
    let b = seq.next();
    assert!(a < b);
}

#[test]
fn rejected_input_exits_with_error_on_startup() {
    let mut app = App::new();
    core::plugin(&mut app);
    core::reject_input(&mut app, "map", "map has no \"Player\" marker");

    app.update();

    assert_eq!(
        app.world().resource::<core::RejectedInput>().0,
        vec!["map: map has no \"Player\" marker".to_owned()]
    );
    assert_eq!(app.should_exit(), Some(AppExit::error()));
}

#[test]
fn clean_startup_keeps_running() {
    let mut app = App::new();
    core::plugin(&mut app);

    app.update();

    assert!(app.world().get_resource::<core::RejectedInput>().is_none());
    assert_eq!(app.should_exit(), None);
}
