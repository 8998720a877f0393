//! Feature plugins.

use bevy::prelude::*;

pub mod animation;
pub mod audio;
pub mod catalog;
pub mod core;
pub mod enemies;
pub mod lifecycle;
pub mod player;
pub mod projectiles;
pub mod scene;
pub mod world;

// Render-only
pub mod camera;

/// Register gameplay plugins that work in headless tests.
///
/// `core` goes first: later plugins read the `Tunables` it guarantees.
pub fn register_gameplay(app: &mut App) {
    core::plugin(app);
    catalog::plugin(app);
    audio::plugin(app);
    lifecycle::plugin(app);
    animation::plugin(app);
    world::plugin(app);
    player::plugin(app);
    enemies::plugin(app);
    projectiles::plugin(app);
    scene::plugin(app);
}

/// Register render-only plugins (requires DefaultPlugins / render infra).
pub fn register_render(app: &mut App) {
    camera::plugin(app);
}

