//! Core engine types and utilities for the shoebill arena.
//!
//! This crate provides the foundational types used across all game systems:
//! - Transform and coordinate conversions
//! - Frame time management
//! - Common component types for the ECS

pub mod components;
pub mod coords;
pub mod time;
pub mod transform;

pub use components::*;
pub use coords::*;
pub use time::*;
pub use transform::*;

// Re-export commonly used types
pub use glam::{Mat4, Quat, Vec2, Vec3, Vec4};
pub use hecs::{Entity, World};
