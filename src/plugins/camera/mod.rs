//! Camera plugin: presents the composed `DrawList` through Bevy's 2D renderer.
//!
//! The simulation lives in screen-like space (y down, top-left anchored rectangles) and
//! the compositor has already applied the camera offset. Presentation is therefore a
//! fixed mapping onto a static camera at the origin:
//!
//! ```text
//!   screen center (sx, sy)  ->  translation (sx - W/2, H/2 - sy, index * Z_STEP)
//! ```
//!
//! Render-only: headless apps never add this plugin.

use bevy::asset::RenderAssetUsages;
use bevy::platform::collections::HashMap;
use bevy::prelude::*;
use bevy::render::render_resource::{Extent3d, TextureDimension, TextureFormat};
use bevy::state::state_scoped::DespawnOnExit;

use crate::common::components::Bounds;
use crate::common::mask::Mask;
use crate::common::state::GameState;
use crate::common::tunables::Tunables;
use crate::plugins::animation::Appearance;
use crate::plugins::catalog::{ArtKey, FrameCatalog};
use crate::plugins::projectiles::aim::Pose;
use crate::plugins::scene::{compose_frame, DrawList};

/// Depth step between consecutive draw commands.
const Z_STEP: f32 = 0.01;

#[derive(Component)]
pub struct MainCamera;

pub fn plugin(app: &mut App) {
    app.add_systems(OnEnter(GameState::InGame), spawn_camera)
        .add_systems(
            PostUpdate,
            (sync_sprites, present_draw_list)
                .chain()
                .after(compose_frame)
                .before(TransformSystems::Propagate)
                .run_if(in_state(GameState::InGame)),
        );
}

fn spawn_camera(mut commands: Commands) {
    commands.spawn((
        Name::new("MainCamera"),
        Camera2d,
        MainCamera,
        DespawnOnExit(GameState::InGame),
    ));
}

/// Map a screen-space center (y down) and draw slot to a Bevy translation (y up).
pub fn screen_to_translation(viewport: Vec2, center: Vec2, slot: usize) -> Vec3 {
    Vec3::new(center.x - viewport.x * 0.5, viewport.y * 0.5 - center.y, slot as f32 * Z_STEP)
}

/// Rotation for a sprite transform.
///
/// `Pose` rotates first and mirrors second. A sprite's `flip_x` mirrors in local space,
/// before the transform rotates, so the angle must be negated for mirrored poses.
pub fn presented_rotation(pose: Pose) -> Quat {
    let degrees = if pose.mirrored { -pose.rotation } else { pose.rotation };
    Quat::from_rotation_z(degrees.to_radians())
}

/// Flat white cutout of a mask, for the death flash.
fn silhouette_image(mask: &Mask) -> Image {
    let data = (0..mask.height())
        .flat_map(|y| (0..mask.width()).map(move |x| (x, y)))
        .flat_map(|(x, y)| if mask.get(x, y) { [255u8; 4] } else { [0u8; 4] })
        .collect();

    Image::new(
        Extent3d { width: mask.width(), height: mask.height(), depth_or_array_layers: 1 },
        TextureDimension::D2,
        data,
        TextureFormat::Rgba8UnormSrgb,
        RenderAssetUsages::default(),
    )
}

/// Push appearance changes into sprites.
fn sync_sprites(
    catalog: Res<FrameCatalog>,
    mut images: ResMut<Assets<Image>>,
    mut silhouettes: Local<HashMap<ArtKey, Handle<Image>>>,
    mut q: Query<(&Appearance, &mut Sprite, &mut Visibility), Changed<Appearance>>,
) {
    for (appearance, mut sprite, mut visibility) in &mut q {
        let (image, color, size) = match appearance {
            Appearance::Strip { art, index } => {
                let frame = catalog.frame(*art, *index);
                (frame.image.clone(), frame.tint, frame.size())
            }
            Appearance::Fixed(frame) => (frame.image.clone(), frame.tint, frame.size()),
            Appearance::Silhouette { art } => {
                let frame = catalog.silhouette(*art);
                let image = silhouettes
                    .entry(*art)
                    .or_insert_with(|| images.add(silhouette_image(&frame.mask)))
                    .clone();
                (image, Color::WHITE, frame.size())
            }
            Appearance::Hidden => {
                *visibility = Visibility::Hidden;
                continue;
            }
        };

        sprite.image = image;
        sprite.color = color;
        sprite.custom_size = Some(size);
        *visibility = Visibility::Inherited;
    }
}

/// Place every listed entity on screen in draw order.
fn present_draw_list(
    tunables: Res<Tunables>,
    list: Res<DrawList>,
    mut q: Query<(&Bounds, &mut Transform, &mut Sprite, Option<&Pose>)>,
) {
    for (slot, cmd) in list.iter().enumerate() {
        let Ok((bounds, mut transform, mut sprite, pose)) = q.get_mut(cmd.entity) else {
            continue;
        };
        let center = cmd.position + bounds.size() * 0.5;
        transform.translation = screen_to_translation(tunables.viewport, center, slot);

        if let Some(pose) = pose {
            transform.rotation = presented_rotation(*pose);
            sprite.flip_x = pose.mirrored;
        }
    }
}
