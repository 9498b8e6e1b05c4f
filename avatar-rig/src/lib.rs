//! Runtime rig construction for procedurally assembled characters.
//!
//! The crate reconciles an authored template skeleton against a character's live bone
//! hierarchy to produce a rig descriptor, and carries animator playback across rig swaps.
//! It is engine-agnostic: the host plugs in through [`SkeletonIndex`], [`AnimationController`]
//! and [`Character`].

#![forbid(unsafe_code)]

mod diagnostics;
mod error;
mod hash;
mod model;
mod pose_asset;
mod rig;
mod runtime;
mod skeleton_index;

#[cfg(feature = "json")]
pub mod json;

#[cfg(feature = "binary")]
pub mod binary;

pub use diagnostics::*;
pub use error::*;
pub use hash::*;
pub use model::*;
pub use pose_asset::*;
pub use rig::*;
pub use runtime::*;
pub use skeleton_index::*;

#[cfg(all(test, feature = "json"))]
mod json_tests;
