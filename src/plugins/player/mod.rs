//! Player plugin: the controllable character.
//!
//! Pipeline:
//! - Update: sample keyboard/pointer into `FrameInput`
//! - FixedUpdate (Advance/Character): keys -> heading, heading -> move + obstacle slide
//! - FixedUpdate (Combat): any enemy touching the character's silhouette kills it, even one
//!   still flashing its own death
//!
//! Death is terminal. The character flashes its silhouette for its death duration, then
//! the lifecycle plugin ends the session.

use bevy::prelude::*;
use bevy::state::state_scoped::DespawnOnExit;

use crate::common::components::{
    Bounds, CharacterEntity, CollisionMask, Heading, Hitbox, Layering, Obstacles, SpawnSequence, Speed,
};
use crate::common::geometry::{contains_rect, deflate, heading_from, move_body};
use crate::common::input::{FrameInput, MoveKeys};
use crate::common::mask::masks_collide;
use crate::common::state::GameState;
use crate::common::tunables::Tunables;
use crate::plugins::animation::{Appearance, Animator, Facing};
use crate::plugins::catalog::{ArtKey, FrameCatalog};
use crate::plugins::core::{AdvanceSet, FrameContext, TickSet};
use crate::plugins::enemies::Enemy;
use crate::plugins::lifecycle::{strike, Lifecycle, OnRemoval, PendingDespawn};

#[derive(Component, Debug, Clone, Copy)]
pub struct Character;

pub fn plugin(app: &mut App) {
    app.add_systems(Update, gather_input)
        .add_systems(
            FixedUpdate,
            (steer_character, move_character)
                .chain()
                .in_set(AdvanceSet::Character)
                .run_if(in_state(GameState::InGame)),
        )
        .add_systems(
            FixedUpdate,
            resolve_character_contacts
                .after(crate::plugins::projectiles::collision::resolve_bullet_hits)
                .in_set(TickSet::Combat)
                .run_if(in_state(GameState::InGame)),
        );
}

/// Spawn the character centered on `center`, facing down on its idle frame.
pub fn spawn_character(
    commands: &mut Commands,
    seq: &mut SpawnSequence,
    catalog: &FrameCatalog,
    tunables: &Tunables,
    center: Vec2,
) -> Entity {
    let art = ArtKey::Character(Facing::Down);
    let frame = catalog.frame(art, 0);
    let bounds = Rect::from_center_size(center, frame.size());
    let hitbox = deflate(bounds, tunables.character.hitbox_deflate);
    debug_assert!(contains_rect(bounds, hitbox));

    commands
        .spawn((
            (Name::new("Character"), Character, seq.next(), Layering::Sortable),
            (Bounds(bounds), Hitbox(hitbox), Heading::default(), Speed(tunables.character.speed)),
            (
                Lifecycle::new(tunables.character.death_duration),
                OnRemoval::EndSession,
            ),
            (
                Animator::new(art, tunables.character.frame_rate),
                Appearance::Strip { art, index: 0 },
                CollisionMask(frame.mask.clone()),
                Sprite::default(),
            ),
            DespawnOnExit(GameState::InGame),
        ))
        .id()
}

/// Sample hardware into the per-tick snapshot.
///
/// Headless apps have no input devices or window; the snapshot is then left untouched so
/// tests can drive it directly.
fn gather_input(
    keys: Option<Res<ButtonInput<KeyCode>>>,
    buttons: Option<Res<ButtonInput<MouseButton>>>,
    windows: Query<&Window>,
    mut input: ResMut<FrameInput>,
) {
    let (Some(keys), Some(buttons)) = (keys, buttons) else {
        return;
    };

    input.keys = MoveKeys {
        up: keys.pressed(KeyCode::KeyW),
        down: keys.pressed(KeyCode::KeyS),
        left: keys.pressed(KeyCode::KeyA),
        right: keys.pressed(KeyCode::KeyD),
    };
    input.fire = buttons.pressed(MouseButton::Left);
    input.pointer = windows.single().ok().and_then(Window::cursor_position);
}

fn steer_character(ctx: FrameContext, mut q: Query<(&Lifecycle, &mut Heading), With<Character>>) {
    let Ok((life, mut heading)) = q.single_mut() else {
        return;
    };
    if !life.is_alive() {
        return;
    }
    heading.0 = heading_from(ctx.input.keys.axis());
}

fn move_character(
    ctx: FrameContext,
    obstacles: Res<Obstacles>,
    mut q: Query<(&Lifecycle, &Heading, &Speed, &mut Hitbox, &mut Bounds), With<Character>>,
) {
    let Ok((life, heading, speed, mut hitbox, mut bounds)) = q.single_mut() else {
        return;
    };
    if !life.is_alive() {
        return;
    }
    (bounds.0, hitbox.0) = move_body(bounds.0, hitbox.0, heading.0, speed.0 * ctx.dt(), &obstacles);
}

/// Character x enemies, silhouette tier. Dying enemies still count, through their
/// silhouette. Runs only while the character is alive, so the death trigger can never
/// fire twice.
pub fn resolve_character_contacts(
    time: Res<Time>,
    catalog: Res<FrameCatalog>,
    character: Option<Res<CharacterEntity>>,
    mut q_character: Query<(&Bounds, &mut Lifecycle, &mut Appearance, &mut CollisionMask), With<Character>>,
    q_enemies: Query<(&Bounds, &CollisionMask), (With<Enemy>, Without<Character>, Without<PendingDespawn>)>,
) {
    let Some(character) = character else {
        return;
    };
    let Ok((bounds, mut life, mut appearance, mut mask)) = q_character.get_mut(character.0) else {
        return;
    };
    if !life.is_alive() {
        return;
    }

    let touched = q_enemies
        .iter()
        .any(|(enemy_bounds, enemy_mask)| masks_collide(&mask, bounds.0, enemy_mask, enemy_bounds.0));

    if touched && strike(&mut life, &mut appearance, &mut mask, &catalog, time.elapsed()) {
        info!("Character caught by an enemy");
    }
}
