//! In-memory host for `avatar-rig`: a small scene graph, a skeleton index over it, a
//! simulated animator and a rig factory.

#![forbid(unsafe_code)]

mod animator;
mod character;
mod ids;
mod rig;
mod scene;
mod skeleton;

pub use animator::*;
pub use character::*;
pub use rig::*;
pub use scene::*;
pub use skeleton::*;

#[cfg(test)]
mod scene_tests;
