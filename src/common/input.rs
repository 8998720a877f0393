//! Per-tick input snapshot.
//!
//! Hardware input is sampled once per frame into `FrameInput`; the simulation only ever
//! reads this snapshot, never the devices.

use bevy::prelude::*;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MoveKeys {
    pub up: bool,
    pub down: bool,
    pub left: bool,
    pub right: bool,
}

impl MoveKeys {
    /// Raw (unnormalized) axis; `y` grows downwards.
    pub fn axis(self) -> Vec2 {
        Vec2::new(
            f32::from(u8::from(self.right)) - f32::from(u8::from(self.left)),
            f32::from(u8::from(self.down)) - f32::from(u8::from(self.up)),
        )
    }
}

#[derive(Resource, Debug, Clone, Copy, Default, PartialEq)]
pub struct FrameInput {
    pub keys: MoveKeys,
    /// Pointer position in viewport pixels (top-left origin), if it is over the window.
    pub pointer: Option<Vec2>,
    /// Primary fire is held down.
    pub fire: bool,
}
