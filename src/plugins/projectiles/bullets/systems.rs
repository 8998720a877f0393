use std::time::Duration;

use bevy::prelude::*;
use bevy::state::state_scoped::DespawnOnExit;

use crate::common::components::{Bounds, CollisionMask, Heading, Layering, SpawnSequence, Speed};
use crate::common::geometry::translate;
use crate::common::state::GameState;
use crate::common::tunables::Tunables;
use crate::plugins::animation::Appearance;
use crate::plugins::catalog::{ArtKey, FrameCatalog};
use crate::plugins::core::FrameContext;
use crate::plugins::lifecycle::PendingDespawn;
use crate::plugins::projectiles::aim::Pose;
use crate::plugins::projectiles::messages::SpawnBulletRequest;

use super::Bullet;

/// Build one bullet centered on `center`. Its pose and footprint are fixed for life.
pub fn spawn_bullet(
    commands: &mut Commands,
    seq: &mut SpawnSequence,
    catalog: &FrameCatalog,
    tunables: &Tunables,
    center: Vec2,
    heading: Vec2,
    now: Duration,
) -> Entity {
    let art = catalog.frame(ArtKey::Bullet, 0);
    let pose = Pose::from_direction(heading);
    let mask = pose.mask(&art.mask);
    let bounds = Rect::from_center_size(center, mask.size());

    commands
        .spawn((
            (Name::new("Bullet"), Bullet { born: now, lifetime: tunables.bullet_lifetime }),
            (seq.next(), Layering::Sortable),
            (Bounds(bounds), Heading(heading), Speed(tunables.bullet_speed), pose),
            (
                Appearance::Strip { art: ArtKey::Bullet, index: 0 },
                CollisionMask(mask.into()),
                Sprite::default(),
            ),
            DespawnOnExit(GameState::InGame),
        ))
        .id()
}

/// Consumer: every request becomes a bullet at the muzzle.
pub fn spawn_requested_bullets(
    mut commands: Commands,
    mut requests: MessageReader<SpawnBulletRequest>,
    mut seq: ResMut<SpawnSequence>,
    catalog: Res<FrameCatalog>,
    ctx: FrameContext,
) {
    for req in requests.read() {
        let center = req.origin + req.heading * ctx.tunables.muzzle_distance;
        spawn_bullet(&mut commands, &mut seq, &catalog, &ctx.tunables, center, req.heading, ctx.now());
    }
}

/// Expire bullets past their lifetime; move the rest.
pub fn advance_bullets(
    mut commands: Commands,
    ctx: FrameContext,
    mut q: Query<(Entity, &Bullet, &Heading, &Speed, &mut Bounds), Without<PendingDespawn>>,
) {
    let now = ctx.now();
    let dt = ctx.dt();

    for (e, bullet, heading, speed, mut bounds) in &mut q {
        if bullet.expired(now) {
            commands.entity(e).insert(PendingDespawn);
            continue;
        }
        bounds.0 = translate(bounds.0, heading.0 * speed.0 * dt);
    }
}
