//! Enemies plugin: the spawn scheduler and pursuit.
//!
//! ```text
//! TickSet::Spawn      SpawnTimer fires -> SpawnEnemyRequest { kind, at } -> enemy entity
//! AdvanceSet::Enemies heading = target center - own hitbox center, then move + slide
//! ```
//!
//! Enemies never despawn on their own. They leave the world only through a bullet hit,
//! a short silhouette flash, and the lifecycle plugin's removal.
//!
//! Spawning follows the request -> consumer split: the timer only decides *what* and
//! *where*; `spawn_requested_enemies` is the single place enemy entities are built.

use bevy::prelude::*;
use bevy::state::state_scoped::DespawnOnExit;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

use crate::common::components::{
    Bounds, CharacterEntity, CollisionMask, Heading, Hitbox, Layering, Obstacles, SpawnSequence, Speed,
};
use crate::common::geometry::{contains_rect, deflate, heading_from, move_body};
use crate::common::state::GameState;
use crate::common::tunables::Tunables;
use crate::plugins::animation::{Animator, Appearance};
use crate::plugins::catalog::{ArtKey, FrameCatalog};
use crate::plugins::core::{AdvanceSet, FrameContext, TickSet};
use crate::plugins::lifecycle::{Lifecycle, OnRemoval};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EnemyKind {
    Bat,
    Blob,
    Skeleton,
}

impl EnemyKind {
    pub const ALL: [EnemyKind; 3] = [EnemyKind::Bat, EnemyKind::Blob, EnemyKind::Skeleton];

    #[inline]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Folder name in the asset tree.
    pub const fn key(self) -> &'static str {
        match self {
            EnemyKind::Bat => "bat",
            EnemyKind::Blob => "blob",
            EnemyKind::Skeleton => "skeleton",
        }
    }
}

#[derive(Component, Debug, Clone, Copy)]
pub struct Enemy {
    pub kind: EnemyKind,
    /// Pursuit target; always the character.
    pub target: Entity,
}

/// Designated enemy entry points, collected at world load. Duplicates are allowed.
#[derive(Resource, Debug, Default, Clone, Deref)]
pub struct EnemySpawnPoints(pub Vec<Vec2>);

#[derive(Resource, Debug, Deref, DerefMut)]
pub struct SpawnTimer(pub Timer);

impl SpawnTimer {
    pub fn new(tunables: &Tunables) -> Self {
        Self(Timer::new(tunables.spawn_interval, TimerMode::Repeating))
    }
}

#[derive(Resource, Debug, Deref, DerefMut)]
pub struct SpawnRng(pub StdRng);

impl SpawnRng {
    pub fn from_entropy() -> Self {
        Self(StdRng::from_entropy())
    }

    pub fn seeded(seed: u64) -> Self {
        Self(StdRng::seed_from_u64(seed))
    }
}

/// "Spawn an enemy of `kind` with its top-left at `at`."
#[derive(Message, Debug, Clone, Copy, PartialEq)]
pub struct SpawnEnemyRequest {
    pub kind: EnemyKind,
    pub at: Vec2,
}

pub fn plugin(app: &mut App) {
    let timer = SpawnTimer::new(app.world().resource::<Tunables>());

    app.add_message::<SpawnEnemyRequest>()
        .insert_resource(timer)
        .init_resource::<EnemySpawnPoints>();
    if !app.world().contains_resource::<SpawnRng>() {
        app.insert_resource(SpawnRng::from_entropy());
    }

    app.add_systems(
        FixedUpdate,
        (tick_spawn_timer, spawn_requested_enemies)
            .chain()
            .in_set(TickSet::Spawn)
            .run_if(in_state(GameState::InGame)),
    )
    .add_systems(
        FixedUpdate,
        pursue_character
            .in_set(AdvanceSet::Enemies)
            .run_if(in_state(GameState::InGame)),
    );
}

/// Producer: one request per timer completion this tick.
pub fn tick_spawn_timer(
    time: Res<Time>,
    tunables: Res<Tunables>,
    points: Res<EnemySpawnPoints>,
    mut timer: ResMut<SpawnTimer>,
    mut rng: ResMut<SpawnRng>,
    mut requests: MessageWriter<SpawnEnemyRequest>,
) {
    timer.tick(time.delta());

    for _ in 0..timer.times_finished_this_tick() {
        let (Some(&kind), Some(&at)) = (
            tunables.enemy_kinds.choose(&mut rng.0),
            points.choose(&mut rng.0),
        ) else {
            return;
        };
        requests.write(SpawnEnemyRequest { kind, at });
    }
}

/// Consumer: build every requested enemy.
pub fn spawn_requested_enemies(
    mut commands: Commands,
    mut requests: MessageReader<SpawnEnemyRequest>,
    mut seq: ResMut<SpawnSequence>,
    catalog: Res<FrameCatalog>,
    tunables: Res<Tunables>,
    character: Res<CharacterEntity>,
) {
    let body = tunables.enemy;

    for req in requests.read() {
        let art = ArtKey::Enemy(req.kind);
        let frame = catalog.frame(art, 0);
        let bounds = Rect::from_corners(req.at, req.at + frame.size());
        let hitbox = deflate(bounds, body.hitbox_deflate);
        debug_assert!(contains_rect(bounds, hitbox));

        let e = commands
            .spawn((
                (
                    Name::new(format!("Enemy ({})", req.kind.key())),
                    Enemy { kind: req.kind, target: character.0 },
                    seq.next(),
                    Layering::Sortable,
                ),
                (Bounds(bounds), Hitbox(hitbox), Heading::default(), Speed(body.speed)),
                (Lifecycle::new(body.death_duration), OnRemoval::Despawn),
                (
                    Animator::new(art, body.frame_rate),
                    Appearance::Strip { art, index: 0 },
                    CollisionMask(frame.mask.clone()),
                    Sprite::default(),
                ),
                DespawnOnExit(GameState::InGame),
            ))
            .id();

        debug!("Spawned {:?} {e} at {}", req.kind, req.at);
    }
}

/// Steer every living enemy toward its target's visual center and move it.
pub fn pursue_character(
    ctx: FrameContext,
    obstacles: Res<Obstacles>,
    q_targets: Query<&Bounds, Without<Enemy>>,
    mut q_enemies: Query<(&Enemy, &Lifecycle, &Speed, &mut Heading, &mut Hitbox, &mut Bounds)>,
) {
    let dt = ctx.dt();

    for (enemy, life, speed, mut heading, mut hitbox, mut bounds) in &mut q_enemies {
        if !life.is_alive() {
            continue;
        }
        let Ok(target) = q_targets.get(enemy.target) else {
            continue;
        };

        heading.0 = heading_from(target.center() - hitbox.center());
        (bounds.0, hitbox.0) = move_body(bounds.0, hitbox.0, heading.0, speed.0 * dt, &obstacles);
    }
}
