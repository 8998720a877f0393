//! World plugin: turns a `LevelLayout` into entities on entering the game.
//!
//! The map collaborator delivers ground tiles, placed art objects, invisible collision
//! boxes and named markers as a `MapInput`. `LevelLayout::build` validates that input once,
//! when the plugin is built; a rejected map aborts the session. After that, loading is a
//! straight walk over the layout:
//!
//! ```text
//! ground tiles   -> Layering::Ground, drawn first
//! objects        -> Obstacle + Layering::Sortable   (sorted by bottom edge)
//! collision boxes-> Obstacle + Layering::Sortable, nothing drawn
//! "Player"       -> character + gun (gun also goes on top)
//! "Enemy"        -> EnemySpawnPoints
//! ```
//!
//! Without an external map the plugin builds an asset-free arena.

use bevy::prelude::*;
use bevy::state::state_scoped::DespawnOnExit;
use thiserror::Error;

use crate::common::components::{Bounds, CharacterEntity, Layering, Obstacle, Obstacles, SpawnSequence};
use crate::common::geometry::is_degenerate;
use crate::common::mask::Mask;
use crate::common::state::GameState;
use crate::common::tunables::Tunables;
use crate::plugins::animation::Appearance;
use crate::plugins::catalog::{Frame, FrameCatalog};
use crate::plugins::core::{reject_input, RejectedInput};
use crate::plugins::enemies::EnemySpawnPoints;
use crate::plugins::player::spawn_character;
use crate::plugins::projectiles::gun::spawn_gun;
use crate::plugins::scene::TopLayer;

pub const PLAYER_MARKER: &str = "Player";
pub const ENEMY_MARKER: &str = "Enemy";

/// A piece of static art with a rectangle in world space.
#[derive(Debug, Clone, PartialEq)]
pub struct Placed {
    pub rect: Rect,
    pub frame: Frame,
}

/// A named point from the map's entity layer.
#[derive(Debug, Clone, PartialEq)]
pub struct Marker {
    pub name: String,
    pub at: Vec2,
}

impl Marker {
    pub fn new(name: impl Into<String>, at: Vec2) -> Self {
        Self { name: name.into(), at }
    }
}

/// Raw map collaborator output, supplied before the world plugin is built.
#[derive(Resource, Debug, Clone, Default)]
pub struct MapInput {
    pub ground: Vec<Placed>,
    pub objects: Vec<Placed>,
    pub collision_boxes: Vec<Rect>,
    pub markers: Vec<Marker>,
}

#[derive(Debug, Error, PartialEq)]
pub enum LayoutError {
    #[error("map has no \"Player\" marker")]
    NoPlayer,
    #[error("map has {0} \"Player\" markers, expected exactly one")]
    MultiplePlayers(usize),
    #[error("obstacle {0:?} has no area")]
    DegenerateObstacle(Rect),
}

#[derive(Resource, Debug, Clone)]
pub struct LevelLayout {
    pub ground: Vec<Placed>,
    /// Sorted by bottom edge so the static layer paints back to front.
    pub objects: Vec<Placed>,
    pub collision_boxes: Vec<Rect>,
    pub player_spawn: Vec2,
    pub enemy_spawns: Vec<Vec2>,
}

impl LevelLayout {
    /// Validate map collaborator output.
    pub fn build(
        ground: Vec<Placed>,
        mut objects: Vec<Placed>,
        collision_boxes: Vec<Rect>,
        markers: &[Marker],
    ) -> Result<Self, LayoutError> {
        objects.sort_by(|a, b| a.rect.max.y.total_cmp(&b.rect.max.y));

        if let Some(bad) = objects
            .iter()
            .map(|o| o.rect)
            .chain(collision_boxes.iter().copied())
            .find(|r| is_degenerate(*r))
        {
            return Err(LayoutError::DegenerateObstacle(bad));
        }

        let players: Vec<Vec2> = markers.iter().filter(|m| m.name == PLAYER_MARKER).map(|m| m.at).collect();
        let player_spawn = match players.as_slice() {
            [] => return Err(LayoutError::NoPlayer),
            [at] => *at,
            many => return Err(LayoutError::MultiplePlayers(many.len())),
        };
        let enemy_spawns = markers.iter().filter(|m| m.name == ENEMY_MARKER).map(|m| m.at).collect();

        for m in markers.iter().filter(|m| m.name != PLAYER_MARKER && m.name != ENEMY_MARKER) {
            debug!("Ignoring map marker {:?}", m.name);
        }

        Ok(Self { ground, objects, collision_boxes, player_spawn, enemy_spawns })
    }

    /// Obstacle set in collision order: placed objects first, then collision boxes.
    pub fn obstacles(&self) -> Vec<Rect> {
        self.objects.iter().map(|o| o.rect).chain(self.collision_boxes.iter().copied()).collect()
    }

    /// Asset-free arena: checkerboard ground, walls, a few rocks, four enemy gates.
    pub fn arena(tunables: &Tunables) -> Self {
        const COLS: i32 = 32;
        const ROWS: i32 = 24;
        let tile = tunables.tile_size;
        let size = Vec2::new(COLS as f32, ROWS as f32) * tile;
        let tile_px = tile as u32;

        let ground = (0..ROWS)
            .flat_map(|y| (0..COLS).map(move |x| (x, y)))
            .map(|(x, y)| {
                let color = if (x + y) % 2 == 0 {
                    Color::srgb(0.55, 0.75, 0.45)
                } else {
                    Color::srgb(0.5, 0.7, 0.4)
                };
                let min = Vec2::new(x as f32, y as f32) * tile;
                Placed {
                    rect: Rect::from_corners(min, min + Vec2::splat(tile)),
                    frame: Frame::solid(color, Mask::filled(tile_px, tile_px)),
                }
            })
            .collect();

        // Interior walls one tile thick, inside the ground.
        let collision_boxes = vec![
            Rect::new(0.0, 0.0, size.x, tile),
            Rect::new(0.0, size.y - tile, size.x, size.y),
            Rect::new(0.0, tile, tile, size.y - tile),
            Rect::new(size.x - tile, tile, size.x, size.y - tile),
        ];

        let rock = Frame::solid(Color::srgb(0.45, 0.45, 0.5), Mask::ellipse(tile_px, tile_px));
        let mut objects: Vec<Placed> = [(6, 5), (24, 7), (9, 17), (21, 18), (15, 4)]
            .into_iter()
            .map(|(x, y)| {
                let min = Vec2::new(x as f32, y as f32) * tile;
                Placed { rect: Rect::from_corners(min, min + Vec2::splat(tile)), frame: rock.clone() }
            })
            .collect();
        objects.sort_by(|a, b| a.rect.max.y.total_cmp(&b.rect.max.y));

        let gate = 2.0 * tile;
        Self {
            ground,
            objects,
            collision_boxes,
            player_spawn: size * 0.5,
            enemy_spawns: vec![
                Vec2::new(gate, gate),
                Vec2::new(size.x - 2.0 * gate, gate),
                Vec2::new(gate, size.y - 2.0 * gate),
                Vec2::new(size.x - 2.0 * gate, size.y - 2.0 * gate),
            ],
        }
    }
}

pub fn plugin(app: &mut App) {
    if let Some(map) = app.world_mut().remove_resource::<MapInput>() {
        match LevelLayout::build(map.ground, map.objects, map.collision_boxes, &map.markers) {
            Ok(layout) => {
                app.insert_resource(layout);
            }
            Err(err) => reject_input(app, "map", err),
        }
    } else if !app.world().contains_resource::<LevelLayout>() {
        let layout = LevelLayout::arena(app.world().resource::<Tunables>());
        app.insert_resource(layout);
    }

    app.init_resource::<Obstacles>()
        .init_resource::<TopLayer>()
        .add_systems(
            OnEnter(GameState::InGame),
            load_world.run_if(not(resource_exists::<RejectedInput>)),
        );
}

/// Spawn everything the layout describes, in paint order.
pub fn load_world(
    mut commands: Commands,
    layout: Res<LevelLayout>,
    catalog: Res<FrameCatalog>,
    tunables: Res<Tunables>,
    mut seq: ResMut<SpawnSequence>,
    mut top: ResMut<TopLayer>,
) {
    for tile in &layout.ground {
        commands.spawn((
            Name::new("Ground"),
            seq.next(),
            Layering::Ground,
            Bounds(tile.rect),
            Appearance::Fixed(tile.frame.clone()),
            Sprite::default(),
            DespawnOnExit(GameState::InGame),
        ));
    }

    for object in &layout.objects {
        commands.spawn((
            Name::new("Object"),
            Obstacle,
            seq.next(),
            Layering::Sortable,
            Bounds(object.rect),
            Appearance::Fixed(object.frame.clone()),
            Sprite::default(),
            DespawnOnExit(GameState::InGame),
        ));
    }

    for rect in &layout.collision_boxes {
        commands.spawn((
            Name::new("Collision"),
            Obstacle,
            seq.next(),
            Layering::Sortable,
            Bounds(*rect),
            Appearance::Hidden,
            DespawnOnExit(GameState::InGame),
        ));
    }

    let obstacles = layout.obstacles();
    let obstacle_count = obstacles.len();
    commands.insert_resource(Obstacles(obstacles));

    let character = spawn_character(&mut commands, &mut seq, &catalog, &tunables, layout.player_spawn);
    let gun = spawn_gun(&mut commands, &mut seq, &catalog, &tunables, character, layout.player_spawn);
    commands.insert_resource(CharacterEntity(character));
    top.0 = vec![gun];

    commands.insert_resource(EnemySpawnPoints(layout.enemy_spawns.clone()));

    info!(
        "World loaded: {} ground tiles, {} obstacles, {} enemy spawn points",
        layout.ground.len(),
        obstacle_count,
        layout.enemy_spawns.len()
    );
}
