//! Common, shared types.

pub mod components;
pub mod geometry;
pub mod input;
pub mod mask;
pub mod state;
pub mod tunables;

#[cfg(test)]
pub mod test_utils;
