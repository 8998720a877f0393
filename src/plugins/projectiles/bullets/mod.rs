//! Bullets: spawn from requests, fly straight, expire.

mod components;
pub mod systems;

pub use components::*;

#[cfg(test)]
mod tests;
