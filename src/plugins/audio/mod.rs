//! Audio requests.
//!
//! The simulation never plays sound itself. It writes fire-and-forget `SoundRequest`
//! messages; whatever audio backend is attached drains them. Without one, requests are
//! only logged.

use bevy::prelude::*;

use crate::common::state::GameState;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SoundCue {
    Shoot,
    Impact,
    Music,
}

#[derive(Message, Debug, Clone, Copy, PartialEq, Eq)]
pub struct SoundRequest {
    pub cue: SoundCue,
    pub looping: bool,
}

impl SoundRequest {
    pub const fn once(cue: SoundCue) -> Self {
        Self { cue, looping: false }
    }

    pub const fn looping(cue: SoundCue) -> Self {
        Self { cue, looping: true }
    }
}

pub fn plugin(app: &mut App) {
    app.add_message::<SoundRequest>()
        .add_systems(OnEnter(GameState::InGame), start_music)
        .add_systems(PostUpdate, log_sound_requests);
}

fn start_music(mut sounds: MessageWriter<SoundRequest>) {
    sounds.write(SoundRequest::looping(SoundCue::Music));
}

fn log_sound_requests(mut requests: MessageReader<SoundRequest>) {
    for req in requests.read() {
        debug!("play {:?}{}", req.cue, if req.looping { " (looping)" } else { "" });
    }
}
