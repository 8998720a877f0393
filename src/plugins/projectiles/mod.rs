//! Projectiles plugin: the aimed gun, its bullets, and bullet hits.
//!
//! # Data flow
//! ```text
//!   FixedUpdate, one tick
//!┌────────────────────────────────────────────────────────────────────────────┐
//!│  AdvanceSet::Projectiles                                                   │
//!│    advance_bullets: expire (PendingDespawn) or move by heading*speed*dt    │
//!│                                                                            │
//!│  AdvanceSet::Weapons                                                       │
//!│    (A) Producer: aim_and_fire                                              │
//!│        - reads: FrameInput pointer/fire, owner Bounds + Lifecycle          │
//!│        - mutates: Gun.trigger, Heading, Pose, Bounds                       │
//!│        - writes: SpawnBulletRequest, SoundRequest(Shoot)                   │
//!│    (B) Consumer: spawn_requested_bullets                                   │
//!│        - reads: SpawnBulletRequest                                         │
//!│        - spawns: Bullet at origin + heading * muzzle_distance              │
//!└────────────────────────────────────────────────────────────────────────────┘
//!                │
//!                v
//!┌────────────────────────────────────────────────────────────────────────────┐
//!│  TickSet::Combat                                                           │
//!│    resolve_bullet_hits: mask overlap vs alive enemies                      │
//!│      - strikes every matched enemy, one SoundRequest(Impact)               │
//!│      - marks the bullet PendingDespawn                                     │
//!└────────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Producers never build bullets. The consumer is the single writer of bullet entities.
//! A bullet spawned this tick first moves on the next one.

pub mod aim;
pub mod bullets;
pub mod collision;
pub mod gun;
pub mod messages;

use bevy::prelude::*;

use crate::common::state::GameState;
use crate::plugins::core::{AdvanceSet, TickSet};

pub fn plugin(app: &mut App) {
    app.add_message::<messages::SpawnBulletRequest>();

    app.add_systems(
        FixedUpdate,
        bullets::systems::advance_bullets
            .in_set(AdvanceSet::Projectiles)
            .run_if(in_state(GameState::InGame)),
    )
    .add_systems(
        FixedUpdate,
        (gun::aim_and_fire, bullets::systems::spawn_requested_bullets)
            .chain()
            .in_set(AdvanceSet::Weapons)
            .run_if(in_state(GameState::InGame)),
    )
    .add_systems(
        FixedUpdate,
        collision::resolve_bullet_hits
            .in_set(TickSet::Combat)
            .run_if(in_state(GameState::InGame)),
    );
}
