//! Test helpers.
//!
//! `World::run_system_once` (via the `RunSystemOnce` trait) executes a system without a
//! schedule. Systems that use `Commands` only enqueue structural changes, so we flush the
//! world before handing control back to the assertions.

use std::time::Duration;

use bevy::ecs::message::{Message, Messages};
use bevy::ecs::system::{IntoSystem, RunSystemOnce};
use bevy::prelude::*;

/// Run a system once on the given world, then flush deferred commands.
/// Returns the system output.
pub fn run_system_once<T, Out, Marker>(world: &mut World, system: T) -> Out
where
    T: IntoSystem<(), Out, Marker>,
{
    let out = world.run_system_once(system).expect("system run failed");
    world.flush();
    out
}

/// Make sure the message buffer backing `MessageReader<M>`/`MessageWriter<M>` exists.
pub fn init_messages<M: Message>(world: &mut World) {
    if world.get_resource::<Messages<M>>().is_none() {
        world.init_resource::<Messages<M>>();
    }
}

/// Drain every buffered message of type `M` through a fresh reader.
pub fn read_messages<M: Message + Clone>(world: &mut World) -> Vec<M> {
    init_messages::<M>(world);
    run_system_once(world, |mut reader: MessageReader<M>| {
        reader.read().cloned().collect::<Vec<M>>()
    })
}

/// Advance the generic game clock by `ms` milliseconds.
pub fn advance_ms(world: &mut World, ms: u64) {
    if world.get_resource::<Time>().is_none() {
        world.insert_resource(Time::<()>::default());
    }
    world.resource_mut::<Time>().advance_by(Duration::from_millis(ms));
}
