//! Core plugin: shared resources, the fixed tick, and the order everything runs in.
//!
//! One fixed tick is one simulation frame:
//!
//! ```text
//! FixedUpdate
//!   TickSet::Spawn    spawn timer fires -> enemy spawn requests -> enemies created
//!   TickSet::Advance  Character -> Enemies -> Projectiles -> Weapons -> Animation
//!                     (dying entities only count down)
//!   TickSet::Combat   bullets x enemies, then character x enemies
//!   TickSet::Cleanup  deferred despawns
//! PostUpdate
//!   scene composite + presentation
//! ```
//!
//! Sets are chained, so every stage sees the structural changes of the previous one.

use std::fmt::Display;
use std::time::Duration;

use bevy::ecs::system::SystemParam;
use bevy::prelude::*;

use crate::common::components::SpawnSequence;
use crate::common::input::FrameInput;
use crate::common::state::GameState;
use crate::common::tunables::Tunables;

#[derive(SystemSet, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TickSet {
    Spawn,
    Advance,
    Combat,
    Cleanup,
}

/// Ordered stages inside `TickSet::Advance`.
///
/// Bullets advance before the gun fires, so a fresh bullet first moves on the next tick.
#[derive(SystemSet, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AdvanceSet {
    Character,
    Enemies,
    Projectiles,
    Weapons,
    Animation,
}

/// Everything a per-tick update needs to know about "now", bundled explicitly.
#[derive(SystemParam)]
pub struct FrameContext<'w> {
    time: Res<'w, Time>,
    pub input: Res<'w, FrameInput>,
    pub tunables: Res<'w, Tunables>,
}

impl FrameContext<'_> {
    /// Game clock.
    #[inline]
    pub fn now(&self) -> Duration {
        self.time.elapsed()
    }

    /// Seconds since the previous tick.
    #[inline]
    pub fn dt(&self) -> f32 {
        self.time.delta_secs()
    }
}

/// Collaborator input that failed validation while the app was built.
#[derive(Resource, Debug, Default)]
pub struct RejectedInput(pub Vec<String>);

/// Log rejected `source` input and mark the session for an error exit.
pub fn reject_input(app: &mut App, source: &str, err: impl Display) {
    error!("Rejected {source}: {err}");
    app.world_mut()
        .get_resource_or_init::<RejectedInput>()
        .0
        .push(format!("{source}: {err}"));
}

fn exit_on_rejected_input(rejected: Option<Res<RejectedInput>>, mut exit: MessageWriter<AppExit>) {
    if let Some(rejected) = rejected {
        error!("Aborting: {} rejected input(s)", rejected.0.len());
        exit.write(AppExit::error());
    }
}

pub fn plugin(app: &mut App) {
    if !app.world().contains_resource::<Tunables>() {
        app.insert_resource(Tunables::default());
    }
    let hz = app.world().resource::<Tunables>().tick_hz;

    app.insert_resource(Time::<Fixed>::from_hz(hz))
        .insert_resource(ClearColor(Color::srgb(0.88, 0.88, 1.0)))
        .init_resource::<SpawnSequence>()
        .init_resource::<FrameInput>()
        .add_systems(Startup, exit_on_rejected_input);

    app.configure_sets(
        FixedUpdate,
        (TickSet::Spawn, TickSet::Advance, TickSet::Combat, TickSet::Cleanup)
            .chain()
            .run_if(in_state(GameState::InGame)),
    );
    app.configure_sets(
        FixedUpdate,
        (
            AdvanceSet::Character,
            AdvanceSet::Enemies,
            AdvanceSet::Projectiles,
            AdvanceSet::Weapons,
            AdvanceSet::Animation,
        )
            .chain()
            .in_set(TickSet::Advance),
    );
}

#[cfg(test)]
mod tests;
