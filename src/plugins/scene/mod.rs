//! Scene compositor: decides what is drawn, in which order, and where on screen.
//!
//! The draw sequence is three concatenated tiers, not one sort key:
//!
//! ```text
//!   1. Layering::Ground    spawn order
//!   2. Layering::Sortable  spawn order (DrawOrder::Insertion)
//!                          or bottom edge, then spawn order (DrawOrder::Depth)
//!   3. TopLayer            list order
//! ```
//!
//! Entities listed in `TopLayer` are drawn only there. Every entry is placed at
//! `bounds.min + camera_offset`, with `camera_offset = viewport / 2 - character center`,
//! so the character always sits in the middle of the screen.
//!
//! The output is a plain `DrawList` resource; the camera plugin presents it.

use bevy::prelude::*;

use crate::common::components::{Bounds, CharacterEntity, Layering, SpawnSeq};
use crate::common::state::GameState;
use crate::common::tunables::Tunables;
use crate::plugins::lifecycle::PendingDespawn;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DrawOrder {
    #[default]
    Insertion,
    Depth,
}

/// Entities always drawn last, in this order.
#[derive(Resource, Debug, Default, Clone)]
pub struct TopLayer(pub Vec<Entity>);

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DrawCommand {
    pub entity: Entity,
    /// Screen-space top-left (y down).
    pub position: Vec2,
}

#[derive(Resource, Debug, Default, Clone, Deref)]
pub struct DrawList(pub Vec<DrawCommand>);

/// One candidate for the frame.
#[derive(Debug, Clone, Copy)]
pub struct Drawable {
    pub entity: Entity,
    pub bounds: Rect,
    pub layering: Layering,
    pub seq: SpawnSeq,
}

#[inline]
pub fn camera_offset(viewport: Vec2, focus: Vec2) -> Vec2 {
    viewport * 0.5 - focus
}

/// Order `drawables` into tiers and place them on screen.
pub fn compose(drawables: &[Drawable], top: &[Entity], order: DrawOrder, offset: Vec2) -> Vec<DrawCommand> {
    let mut ground: Vec<&Drawable> = Vec::new();
    let mut sortable: Vec<&Drawable> = Vec::new();
    for d in drawables.iter().filter(|d| !top.contains(&d.entity)) {
        match d.layering {
            Layering::Ground => ground.push(d),
            Layering::Sortable => sortable.push(d),
        }
    }

    ground.sort_by_key(|d| d.seq);
    match order {
        DrawOrder::Insertion => sortable.sort_by_key(|d| d.seq),
        DrawOrder::Depth => sortable.sort_by(|a, b| {
            a.bounds.max.y.total_cmp(&b.bounds.max.y).then(a.seq.cmp(&b.seq))
        }),
    }

    let on_top = top.iter().filter_map(|e| drawables.iter().find(|d| d.entity == *e));

    ground
        .into_iter()
        .chain(sortable)
        .chain(on_top)
        .map(|d| DrawCommand { entity: d.entity, position: d.bounds.min + offset })
        .collect()
}

pub fn plugin(app: &mut App) {
    app.init_resource::<DrawList>()
        .init_resource::<TopLayer>()
        .add_systems(PostUpdate, compose_frame.run_if(in_state(GameState::InGame)));
}

/// Build this frame's `DrawList` around the character.
pub fn compose_frame(
    tunables: Res<Tunables>,
    character: Option<Res<CharacterEntity>>,
    top: Res<TopLayer>,
    q: Query<(Entity, &Bounds, &Layering, &SpawnSeq), Without<PendingDespawn>>,
    mut list: ResMut<DrawList>,
) {
    let focus = character
        .and_then(|c| q.get(c.0).ok())
        .map(|(_, bounds, _, _)| bounds.center());
    let Some(focus) = focus else {
        list.0.clear();
        return;
    };

    let drawables: Vec<Drawable> = q
        .iter()
        .map(|(entity, bounds, layering, seq)| Drawable { entity, bounds: bounds.0, layering: *layering, seq: *seq })
        .collect();

    list.0 = compose(
        &drawables,
        &top.0,
        tunables.draw_order,
        camera_offset(tunables.viewport, focus),
    );
}
