//! Scene hand-off: the host loads the shoebill model and its animation clips.

use std::collections::HashMap;

use crate::config::{ClipNames, DemoConfig};

/// Errors from the host's scene loader.
#[derive(Debug, thiserror::Error)]
pub enum AssetError {
    #[error("animation clip `{0}` not found in scene")]
    MissingClip(String),
    #[error("scene failed to load: {0}")]
    Load(String),
}

/// Animation clips by name, with their durations in seconds.
#[derive(Debug, Clone, Default)]
pub struct ClipLibrary {
    clips: HashMap<String, f32>,
}

impl ClipLibrary {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, name: impl Into<String>, duration: f32) {
        self.clips.insert(name.into(), duration);
    }

    pub fn get(&self, name: &str) -> Option<f32> {
        self.clips.get(name).copied()
    }

    /// Duration of a clip the game cannot run without.
    pub fn require(&self, name: &str) -> Result<f32, AssetError> {
        self.get(name)
            .ok_or_else(|| AssetError::MissingClip(name.to_string()))
    }

    pub fn len(&self) -> usize {
        self.clips.len()
    }

    pub fn is_empty(&self) -> bool {
        self.clips.is_empty()
    }
}

/// What the loader hands back once the model is ready to be cloned.
#[derive(Debug, Clone, Default)]
pub struct LoadedScene {
    pub clips: ClipLibrary,
}

/// Host-side model loading. Called once, on the start interaction.
pub trait SceneLoader {
    fn load_scene(&mut self) -> Result<LoadedScene, AssetError>;
}

/// The four clips a shoebill plays.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ShoebillClips {
    pub idle: f32,
    pub walk: f32,
    pub fly: f32,
    pub fly_end: f32,
}

impl ShoebillClips {
    pub fn resolve(library: &ClipLibrary, names: &ClipNames) -> Result<Self, AssetError> {
        Ok(Self {
            idle: library.require(&names.idle)?,
            walk: library.require(&names.walk)?,
            fly: library.require(&names.fly)?,
            fly_end: library.require(&names.fly_end)?,
        })
    }
}

/// In-process loader with fixed clip durations, for the headless driver and tests.
#[derive(Debug, Clone)]
pub struct BuiltinScene {
    clips: ClipLibrary,
    loads: u32,
}

impl BuiltinScene {
    pub fn new(names: &ClipNames, demo: &DemoConfig) -> Self {
        let mut clips = ClipLibrary::new();
        clips.insert(names.idle.clone(), demo.idle_duration);
        clips.insert(names.walk.clone(), demo.walk_duration);
        clips.insert(names.fly.clone(), demo.fly_duration);
        clips.insert(names.fly_end.clone(), demo.fly_end_duration);
        Self { clips, loads: 0 }
    }

    /// A scene with arbitrary clips.
    pub fn from_library(clips: ClipLibrary) -> Self {
        Self { clips, loads: 0 }
    }

    /// How many times the scene was requested.
    pub fn loads(&self) -> u32 {
        self.loads
    }
}

impl SceneLoader for BuiltinScene {
    fn load_scene(&mut self) -> Result<LoadedScene, AssetError> {
        self.loads += 1;
        Ok(LoadedScene {
            clips: self.clips.clone(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_scene_resolves_default_names() {
        let names = ClipNames::default();
        let mut loader = BuiltinScene::new(&names, &DemoConfig::default());
        let scene = loader.load_scene().unwrap();
        let clips = ShoebillClips::resolve(&scene.clips, &names).unwrap();
        assert!((clips.idle - 2.0).abs() < 1e-6);
        assert!((clips.fly_end - 1.5).abs() < 1e-6);
        assert_eq!(loader.loads(), 1);
    }

    #[test]
    fn missing_clip_is_reported_by_name() {
        let mut lib = ClipLibrary::new();
        lib.insert("Shoebill_idle", 1.0);
        let err = ShoebillClips::resolve(&lib, &ClipNames::default()).unwrap_err();
        match err {
            AssetError::MissingClip(name) => assert_eq!(name, "Shoebill_walk"),
            other => panic!("unexpected error {other:?}"),
        }
    }
}
