//! Bullets x enemies, silhouette tier.
//!
//! Every bullet is tested against every *alive* enemy. All enemies a bullet overlaps
//! start dying together, one impact sound is requested, and the bullet is marked for
//! removal. Removal is deferred to `TickSet::Cleanup`, so nothing is despawned while
//! these queries iterate.

use bevy::prelude::*;

use crate::common::components::{Bounds, CollisionMask};
use crate::common::mask::masks_collide;
use crate::plugins::animation::Appearance;
use crate::plugins::audio::{SoundCue, SoundRequest};
use crate::plugins::catalog::FrameCatalog;
use crate::plugins::enemies::Enemy;
use crate::plugins::lifecycle::{strike, Lifecycle, PendingDespawn};

use super::bullets::Bullet;

pub fn resolve_bullet_hits(
    mut commands: Commands,
    time: Res<Time>,
    catalog: Res<FrameCatalog>,
    mut sounds: MessageWriter<SoundRequest>,
    q_bullets: Query<(Entity, &Bounds, &CollisionMask), (With<Bullet>, Without<PendingDespawn>)>,
    mut q_enemies: Query<
        (Entity, &Bounds, &mut Lifecycle, &mut Appearance, &mut CollisionMask),
        (With<Enemy>, Without<Bullet>, Without<PendingDespawn>),
    >,
) {
    let now = time.elapsed();

    for (bullet, bullet_bounds, bullet_mask) in &q_bullets {
        let mut hits = 0usize;

        for (enemy, enemy_bounds, mut life, mut appearance, mut mask) in &mut q_enemies {
            if !life.is_alive() {
                continue;
            }
            if !masks_collide(bullet_mask, bullet_bounds.0, &mask, enemy_bounds.0) {
                continue;
            }
            if strike(&mut life, &mut appearance, &mut mask, &catalog, now) {
                debug!("{bullet} hit {enemy}");
                hits += 1;
            }
        }

        if hits > 0 {
            sounds.write(SoundRequest::once(SoundCue::Impact));
            commands.entity(bullet).insert(PendingDespawn);
        }
    }
}
