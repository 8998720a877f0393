//! The gun: orbits its owner, follows the pointer, and fires on a cooldown.
//!
//! Firing state machine:
//!
//! ```text
//!   Ready ──fire──► CoolingDown { since } ──now - since > cooldown──► Ready
//! ```
//!
//! Requests while cooling down are dropped, never queued.

use std::time::Duration;

use bevy::prelude::*;
use bevy::state::state_scoped::DespawnOnExit;

use crate::common::components::{Bounds, Heading, Layering, SpawnSequence};
use crate::common::state::GameState;
use crate::common::tunables::Tunables;
use crate::plugins::animation::Appearance;
use crate::plugins::audio::{SoundCue, SoundRequest};
use crate::plugins::catalog::{ArtKey, FrameCatalog};
use crate::plugins::core::FrameContext;
use crate::plugins::lifecycle::Lifecycle;

use super::aim::{aim_direction, Pose};
use super::messages::SpawnBulletRequest;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Trigger {
    #[default]
    Ready,
    CoolingDown { since: Duration },
}

impl Trigger {
    /// Settle an elapsed cooldown, then honor `requested` if ready.
    ///
    /// Returns `true` when a shot goes off.
    pub fn pull(&mut self, now: Duration, cooldown: Duration, requested: bool) -> bool {
        if let Trigger::CoolingDown { since } = *self {
            if now.saturating_sub(since) > cooldown {
                *self = Trigger::Ready;
            }
        }
        if !requested || *self != Trigger::Ready {
            return false;
        }
        *self = Trigger::CoolingDown { since: now };
        true
    }
}

#[derive(Component, Debug, Clone)]
pub struct Gun {
    /// The body the gun orbits; always the character.
    pub owner: Entity,
    pub orbit: f32,
    pub trigger: Trigger,
}

/// Spawn the gun next to `owner`, pointing right.
pub fn spawn_gun(
    commands: &mut Commands,
    seq: &mut SpawnSequence,
    catalog: &FrameCatalog,
    tunables: &Tunables,
    owner: Entity,
    owner_center: Vec2,
) -> Entity {
    let heading = Vec2::X;
    let pose = Pose::from_direction(heading);
    let art = catalog.frame(ArtKey::Gun, 0);
    let bounds = pose.rect(owner_center + heading * tunables.gun_orbit, art.size());

    commands
        .spawn((
            Name::new("Gun"),
            Gun { owner, orbit: tunables.gun_orbit, trigger: Trigger::Ready },
            seq.next(),
            Layering::Sortable,
            Bounds(bounds),
            Heading(heading),
            pose,
            Appearance::Strip { art: ArtKey::Gun, index: 0 },
            Sprite::default(),
            DespawnOnExit(GameState::InGame),
        ))
        .id()
}

/// Producer: aim at the pointer, follow the owner, and request bullets.
///
/// A gun whose owner is no longer alive is frozen in place.
pub fn aim_and_fire(
    ctx: FrameContext,
    catalog: Res<FrameCatalog>,
    q_owners: Query<(&Bounds, &Lifecycle), Without<Gun>>,
    mut q_guns: Query<(&mut Gun, &mut Heading, &mut Pose, &mut Bounds)>,
    mut bullets: MessageWriter<SpawnBulletRequest>,
    mut sounds: MessageWriter<SoundRequest>,
) {
    let art_size = catalog.frame(ArtKey::Gun, 0).size();
    let now = ctx.now();

    for (mut gun, mut heading, mut pose, mut bounds) in &mut q_guns {
        let Ok((owner, life)) = q_owners.get(gun.owner) else {
            continue;
        };
        if !life.is_alive() {
            continue;
        }

        if let Some(pointer) = ctx.input.pointer {
            let direction = aim_direction(pointer, ctx.tunables.aim_pivot());
            if direction != Vec2::ZERO {
                heading.0 = direction;
            }
        }

        let origin = owner.center();
        *pose = Pose::from_direction(heading.0);
        bounds.0 = pose.rect(origin + heading.0 * gun.orbit, art_size);

        if gun.trigger.pull(now, ctx.tunables.fire_cooldown, ctx.input.fire) {
            debug!("Shot fired toward {}", heading.0);
            bullets.write(SpawnBulletRequest { origin, heading: heading.0 });
            sounds.write(SoundRequest::once(SoundCue::Shoot));
        }
    }
}
