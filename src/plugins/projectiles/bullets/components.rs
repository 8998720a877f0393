use std::time::Duration;

use bevy::prelude::*;

#[derive(Component, Debug, Clone, Copy, PartialEq)]
pub struct Bullet {
    pub born: Duration,
    pub lifetime: Duration,
}

impl Bullet {
    /// Strictly past its lifetime.
    #[inline]
    pub fn expired(&self, now: Duration) -> bool {
        now.saturating_sub(self.born) > self.lifetime
    }
}
