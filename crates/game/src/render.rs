//! Per-frame snapshot handed to the host renderer. The core never reads it back.

use engine_core::TransformRaw;

use crate::animation::AnimState;

/// One shoebill as the renderer needs it.
#[derive(Debug, Clone)]
pub struct ActorInstance {
    pub model: TransformRaw,
    /// Playing clips and their blend weights, primary first.
    pub blend: Vec<(AnimState, f32)>,
}

/// Everything visible this frame.
#[derive(Debug, Clone)]
pub struct FrameSnapshot {
    pub camera: TransformRaw,
    pub actors: Vec<ActorInstance>,
    pub projectiles: Vec<TransformRaw>,
}

/// Host-side consumer of frame snapshots.
pub trait RenderSink {
    fn present(&mut self, frame: &FrameSnapshot);
}

/// Keeps only the latest frame. Used by the headless driver.
#[derive(Debug, Default)]
pub struct LastFrame {
    pub frame: Option<FrameSnapshot>,
    pub presented: u64,
}

impl RenderSink for LastFrame {
    fn present(&mut self, frame: &FrameSnapshot) {
        self.frame = Some(frame.clone());
        self.presented += 1;
    }
}
