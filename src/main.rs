use bevy::prelude::AppExit;

fn main() -> AppExit {
    vampire_core::game::run()
}
