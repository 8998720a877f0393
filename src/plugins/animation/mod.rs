//! Animation selector: turns motion into a facing and a frame index.
//!
//! Facing resolution is sequential, so the horizontal axis wins whenever both axes move:
//!
//! ```text
//!   y > 0 -> Down     y < 0 -> Up        (vertical pass)
//!   x > 0 -> Right    x < 0 -> Left      (horizontal pass, overrides)
//!   (0, 0)          -> previous facing
//! ```
//!
//! Directional art idles on frame 0. Undirected art (enemies) loops unconditionally.

use bevy::prelude::*;

use crate::common::components::{CollisionMask, Heading};
use crate::common::state::GameState;
use crate::plugins::catalog::{ArtKey, Frame, FrameCatalog};
use crate::plugins::core::AdvanceSet;
use crate::plugins::lifecycle::{Lifecycle, PendingDespawn};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Facing {
    Left,
    Right,
    Up,
    #[default]
    Down,
}

impl Facing {
    pub const ALL: [Facing; 4] = [Facing::Left, Facing::Right, Facing::Up, Facing::Down];

    #[inline]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Folder name in the asset tree.
    pub const fn key(self) -> &'static str {
        match self {
            Facing::Left => "left",
            Facing::Right => "right",
            Facing::Up => "up",
            Facing::Down => "down",
        }
    }
}

/// Resolve a facing from a heading, keeping `current` when the heading is zero.
pub fn select_facing(current: Facing, heading: Vec2) -> Facing {
    let mut facing = current;
    if heading.y > 0.0 {
        facing = Facing::Down;
    } else if heading.y < 0.0 {
        facing = Facing::Up;
    }
    if heading.x > 0.0 {
        facing = Facing::Right;
    } else if heading.x < 0.0 {
        facing = Facing::Left;
    }
    facing
}

/// Frame shown after `clock` accumulated frames on a strip of `frame_count`.
#[inline]
pub fn frame_index(clock: f32, frame_count: usize) -> usize {
    debug_assert!(frame_count > 0, "frame index requested on an empty strip");
    (clock.max(0.0) as usize) % frame_count
}

/// What an entity currently shows.
#[derive(Component, Debug, Clone, PartialEq)]
pub enum Appearance {
    /// Catalog frame `index` of strip `art`.
    Strip { art: ArtKey, index: usize },
    /// Flat white cutout of the strip's first frame.
    Silhouette { art: ArtKey },
    /// Static artwork owned by the map.
    Fixed(Frame),
    /// Collision geometry with nothing to draw.
    Hidden,
}

/// Per-entity animation clock. Clocks are never shared between entities.
#[derive(Component, Debug, Clone, PartialEq)]
pub struct Animator {
    pub art: ArtKey,
    /// Accumulated frames (`frame_rate * elapsed`).
    pub clock: f32,
    pub frame_rate: f32,
}

impl Animator {
    pub fn new(art: ArtKey, frame_rate: f32) -> Self {
        Self { art, clock: 0.0, frame_rate }
    }

    pub fn facing(&self) -> Option<Facing> {
        match self.art {
            ArtKey::Character(facing) => Some(facing),
            _ => None,
        }
    }

    /// Advance by `dt` seconds of `heading` motion and return the frame to show.
    ///
    /// `frame_count` reports the strip length for the art selected this tick.
    pub fn tick(&mut self, heading: Vec2, dt: f32, frame_count: impl FnOnce(ArtKey) -> usize) -> usize {
        match self.art {
            ArtKey::Character(facing) => {
                self.art = ArtKey::Character(select_facing(facing, heading));
                let count = frame_count(self.art);
                // Idle shows frame 0 but keeps the clock, so walking resumes mid-cycle.
                if heading == Vec2::ZERO {
                    debug_assert!(count > 0, "idle frame requested on an empty strip");
                    return 0;
                }
                self.clock += self.frame_rate * dt;
                frame_index(self.clock, count)
            }
            art => {
                self.clock += self.frame_rate * dt;
                frame_index(self.clock, frame_count(art))
            }
        }
    }
}

pub fn plugin(app: &mut App) {
    app.add_systems(
        FixedUpdate,
        animate
            .in_set(AdvanceSet::Animation)
            .run_if(in_state(GameState::InGame)),
    );
}

/// Advance every living animated body and refresh what it shows (and collides with).
pub fn animate(
    time: Res<Time>,
    catalog: Res<FrameCatalog>,
    mut q: Query<
        (&Heading, &Lifecycle, &mut Animator, &mut Appearance, &mut CollisionMask),
        Without<PendingDespawn>,
    >,
) {
    let dt = time.delta_secs();
    for (heading, life, mut animator, mut appearance, mut mask) in &mut q {
        if !life.is_alive() {
            continue;
        }
        let index = animator.tick(heading.0, dt, |art| catalog.strip(art).len());
        let art = animator.art;

        let next = Appearance::Strip { art, index };
        if *appearance != next {
            *appearance = next;
            mask.0 = catalog.frame(art, index).mask.clone();
        }
    }
}
