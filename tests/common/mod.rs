//! Integration test harness.
//!
//! Keep integration tests headless:
//! - `MinimalPlugins` provides core ECS runtime.
//! - we then call `vampire_core::game::configure_headless` to install gameplay plugins.
//!
//! Ticks are driven by hand: advance the game clock, then run `FixedUpdate` once.
//! Real time never leaks in, so every test is deterministic.

#![allow(dead_code)]

use std::time::Duration;

use bevy::ecs::message::Messages;
use bevy::prelude::*;
use bevy::state::app::StatesPlugin;
use bevy::time::TimeUpdateStrategy;

use vampire_core::common::components::{Bounds, CharacterEntity};
use vampire_core::plugins::enemies::SpawnRng;

/// Fixed step used by `tick`, close to 60 Hz but in whole milliseconds.
pub const TICK_MS: u64 = 16;

pub fn app_headless() -> App {
    app_headless_with(|_| {})
}

/// Headless app with collaborator input (catalog, map) supplied by `supply` before the
/// gameplay plugins are built.
pub fn app_headless_with(supply: impl FnOnce(&mut App)) -> App {
    let mut app = App::new();

    app.add_plugins((MinimalPlugins, StatesPlugin))
        .insert_resource(TimeUpdateStrategy::ManualDuration(Duration::ZERO))
        .insert_resource(SpawnRng::seeded(42));
    supply(&mut app);

    vampire_core::game::configure_headless(&mut app);

    // Enter InGame: loads the world and composes the first frame.
    app.update();
    app
}

/// Advance the game clock by `ms` and run exactly one simulation tick.
pub fn tick(app: &mut App, ms: u64) {
    let world = app.world_mut();
    world.resource_mut::<Time>().advance_by(Duration::from_millis(ms));
    world.run_schedule(FixedUpdate);
}

pub fn tick_n(app: &mut App, n: usize) {
    for _ in 0..n {
        tick(app, TICK_MS);
    }
}

pub fn character(app: &App) -> Entity {
    app.world().resource::<CharacterEntity>().0
}

pub fn character_center(app: &App) -> Vec2 {
    app.world().get::<Bounds>(character(app)).unwrap().center()
}

/// Every message of type `M` still buffered, oldest first.
pub fn buffered<M: Message + Clone>(app: &App) -> Vec<M> {
    let messages = app.world().resource::<Messages<M>>();
    messages.get_cursor().read(messages).cloned().collect()
}
