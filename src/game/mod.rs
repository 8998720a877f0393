//! Game composition root.
//!
//! Provides two public configuration functions:
//! - `configure_full`: includes DefaultPlugins (window/render) + game plugins.
//! - `configure_headless`: minimal configuration for integration tests.

use bevy::prelude::*;
use bevy::window::WindowResolution;

use crate::common::state::GameState;
use crate::common::tunables::Tunables;
use crate::plugins;

/// Run the game until the window closes or the session ends.
///
/// Returns `AppExit::error()` when supplied catalog or map input was rejected.
pub fn run() -> AppExit {
    App::new().add_plugins(configure_full).run()
}

/// Full configuration for `cargo run`.
pub fn configure_full(app: &mut App) {
    let viewport = Tunables::default().viewport;

    app.add_plugins(DefaultPlugins.set(WindowPlugin {
        primary_window: Some(Window {
            title: "Vampire Survivor".into(),
            resolution: WindowResolution::new(viewport.x as u32, viewport.y as u32),
            resizable: false,
            ..default()
        }),
        ..default()
    }));

    configure_game(app);
    plugins::register_render(app);
}

/// Headless configuration for integration tests.
///
/// Notes:
/// - Do NOT add DefaultPlugins.
/// - Do NOT add render-only plugins (camera).
pub fn configure_headless(app: &mut App) {
    configure_game(app);
}

/// Configuration shared by both full and headless apps.
fn configure_game(app: &mut App) {
    app.init_state::<GameState>();
    plugins::register_gameplay(app);
}
