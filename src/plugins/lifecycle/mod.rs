//! Entity lifecycle: `Alive -> Dying -> Removed`, never backwards.
//!
//! ```text
//!   Alive ──destroy(now)──► Dying { since: now } ──now - since > death_duration──► Removed
//! ```
//!
//! While dying an entity receives no input or movement; only its timer is checked.
//! What `Removed` means is data: enemies are despawned, the character ends the session.
//!
//! Despawning is deferred. Systems only mark `PendingDespawn`; `despawn_marked` runs once
//! per tick after every query has finished iterating.

use std::time::Duration;

use bevy::prelude::*;

use crate::common::components::CollisionMask;
use crate::common::state::GameState;
use crate::plugins::animation::Appearance;
use crate::plugins::catalog::FrameCatalog;
use crate::plugins::core::TickSet;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LifeStatus {
    Alive,
    Dying { since: Duration },
    Removed,
}

#[derive(Component, Debug, Clone, PartialEq)]
pub struct Lifecycle {
    status: LifeStatus,
    death_duration: Duration,
}

impl Lifecycle {
    pub fn new(death_duration: Duration) -> Self {
        Self { status: LifeStatus::Alive, death_duration }
    }

    #[inline]
    pub fn status(&self) -> LifeStatus {
        self.status
    }

    #[inline]
    pub fn is_alive(&self) -> bool {
        self.status == LifeStatus::Alive
    }

    #[inline]
    pub fn death_duration(&self) -> Duration {
        self.death_duration
    }

    /// `Alive -> Dying`, stamping `now`. Any later trigger is a no-op.
    pub fn destroy(&mut self, now: Duration) -> bool {
        if !self.is_alive() {
            return false;
        }
        self.status = LifeStatus::Dying { since: now };
        true
    }

    /// `Dying -> Removed` on the first call where strictly more than the death duration
    /// has passed. Returns `true` exactly once.
    pub fn expire(&mut self, now: Duration) -> bool {
        let LifeStatus::Dying { since } = self.status else {
            return false;
        };
        if now.saturating_sub(since) > self.death_duration {
            self.status = LifeStatus::Removed;
            return true;
        }
        false
    }
}

/// Consequence of reaching `Removed`.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq)]
pub enum OnRemoval {
    Despawn,
    EndSession,
}

/// Marker: remove from every collection at the end of the tick.
#[derive(Component, Debug, Clone, Copy)]
pub struct PendingDespawn;

/// Destroy trigger: enter `Dying` and swap the visual (and mask) for the silhouette.
///
/// Returns `false` if the entity was already dying or removed.
pub fn strike(
    life: &mut Lifecycle,
    appearance: &mut Appearance,
    mask: &mut CollisionMask,
    catalog: &FrameCatalog,
    now: Duration,
) -> bool {
    if !life.destroy(now) {
        return false;
    }
    if let Appearance::Strip { art, .. } = *appearance {
        *appearance = Appearance::Silhouette { art };
        mask.0 = catalog.silhouette(art).mask.clone();
    }
    true
}

pub fn plugin(app: &mut App) {
    app.add_systems(
        FixedUpdate,
        expire_dying
            .in_set(TickSet::Advance)
            .run_if(in_state(GameState::InGame)),
    )
    .add_systems(
        FixedUpdate,
        despawn_marked
            .in_set(TickSet::Cleanup)
            .run_if(in_state(GameState::InGame)),
    );
}

/// Count down every dying entity and apply its removal consequence.
pub fn expire_dying(
    time: Res<Time>,
    mut commands: Commands,
    mut exit: MessageWriter<AppExit>,
    mut q: Query<(Entity, &mut Lifecycle, &OnRemoval), Without<PendingDespawn>>,
) {
    let now = time.elapsed();
    for (e, mut life, on_removal) in &mut q {
        if !life.expire(now) {
            continue;
        }
        match on_removal {
            OnRemoval::Despawn => {
                debug!("{e} removed after death flash");
                commands.entity(e).insert(PendingDespawn);
            }
            OnRemoval::EndSession => {
                info!("Character died; ending session");
                exit.write(AppExit::Success);
            }
        }
    }
}

/// Despawn everything marked for removal.
///
/// Centralizing despawn in one system keeps structural changes predictable.
pub fn despawn_marked(mut commands: Commands, q: Query<Entity, With<PendingDespawn>>) {
    for e in &q {
        commands.entity(e).despawn();
    }
}
