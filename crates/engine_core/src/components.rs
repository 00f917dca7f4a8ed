//! Common ECS components used across the engine.

/// Lifetime component for temporary entities (projectiles, effects).
#[derive(Debug, Clone, Copy)]
pub struct Lifetime {
    pub remaining: f32,
}

impl Lifetime {
    pub fn new(seconds: f32) -> Self {
        Self { remaining: seconds }
    }

    /// Count down by `dt`. Returns true once the lifetime has run out.
    pub fn update(&mut self, dt: f32) -> bool {
        self.remaining -= dt;
        self.is_expired()
    }

    pub fn is_expired(&self) -> bool {
        self.remaining <= 0.0
    }
}
