//! Tunable gameplay constants.

use std::time::Duration;

use bevy::prelude::*;

use crate::plugins::enemies::EnemyKind;
use crate::plugins::scene::DrawOrder;

/// Movement, animation and death timing for one kind of walking body.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BodyTunables {
    pub speed: f32,
    /// Animation frames advanced per second of motion.
    pub frame_rate: f32,
    /// Total width/height removed from the visual rectangle to form the hitbox.
    pub hitbox_deflate: Vec2,
    pub death_duration: Duration,
}

#[derive(Resource, Debug, Clone)]
pub struct Tunables {
    pub viewport: Vec2,
    pub tile_size: f32,
    pub tick_hz: f64,
    pub character: BodyTunables,
    pub enemy: BodyTunables,
    pub enemy_kinds: Vec<EnemyKind>,
    pub spawn_interval: Duration,
    pub gun_orbit: f32,
    pub muzzle_distance: f32,
    pub fire_cooldown: Duration,
    pub bullet_speed: f32,
    pub bullet_lifetime: Duration,
    pub draw_order: DrawOrder,
}

impl Tunables {
    /// Screen-space point the pointer is aimed from: the character is always drawn there.
    pub fn aim_pivot(&self) -> Vec2 {
        self.viewport * 0.5
    }
}

impl Default for Tunables {
    fn default() -> Self {
        Self {
            viewport: Vec2::new(1280.0, 720.0),
            tile_size: 64.0,
            tick_hz: 60.0,
            character: BodyTunables {
                speed: 500.0,
                frame_rate: 5.0,
                hitbox_deflate: Vec2::new(60.0, 90.0),
                death_duration: Duration::from_millis(1000),
            },
            enemy: BodyTunables {
                speed: 200.0,
                frame_rate: 10.0,
                hitbox_deflate: Vec2::new(20.0, 40.0),
                death_duration: Duration::from_millis(200),
            },
            enemy_kinds: EnemyKind::ALL.to_vec(),
            spawn_interval: Duration::from_millis(600),
            gun_orbit: 140.0,
            muzzle_distance: 222.0,
            fire_cooldown: Duration::from_millis(100),
            bullet_speed: 800.0,
            bullet_lifetime: Duration::from_millis(1000),
            draw_order: DrawOrder::Insertion,
        }
    }
}
