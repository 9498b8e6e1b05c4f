//! Interfaces the host engine and the character-assembly pipeline provide.

use crate::{Error, RigDescriptor, RigKind, RootBones, SkeletonIndex, TemplatePoseAsset};
use glam::{Quat, Vec3};

#[derive(Copy, Clone, Debug, Eq, PartialEq, Default)]
pub enum UpdateMode {
    #[default]
    Normal,
    AnimatePhysics,
    UnscaledTime,
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, Default)]
pub enum CullingMode {
    #[default]
    AlwaysAnimate,
    CullUpdateTransforms,
    CullCompletely,
}

/// Playback of the state currently running on one animator layer.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct LayerPlayback {
    pub state_hash: i32,
    /// Integer part counts completed loops; the fraction is the position within the clip.
    pub normalized_time: f32,
    /// Clip length in seconds.
    pub length: f32,
    pub looping: bool,
}

/// The host's animation component.
pub trait AnimationController {
    type Rig;
    type ControllerAsset;

    fn layer_count(&self) -> usize;

    /// Playback of `layer`; only called with `layer < layer_count()`.
    fn layer_playback(&self, layer: usize) -> LayerPlayback;

    /// Jumps `layer` to `state_hash` at `normalized_time`.
    fn play(&mut self, state_hash: i32, layer: usize, normalized_time: f32);

    /// Advances the animator by `delta` seconds. `0.0` re-evaluates the pose in place.
    fn update(&mut self, delta: f32);

    fn enabled(&self) -> bool;
    fn set_enabled(&mut self, enabled: bool);

    fn apply_root_motion(&self) -> bool;
    fn set_apply_root_motion(&mut self, apply: bool);

    fn update_mode(&self) -> UpdateMode;
    fn set_update_mode(&mut self, mode: UpdateMode);

    fn culling_mode(&self) -> CullingMode;
    fn set_culling_mode(&mut self, mode: CullingMode);

    fn has_rig(&self) -> bool;

    /// Replaces the installed rig. `None` discards the current one.
    fn set_rig(&mut self, rig: Option<Self::Rig>);

    fn set_controller_asset(&mut self, asset: Self::ControllerAsset);
}

pub type RigOf<C> = <<C as Character>::Controller as AnimationController>::Rig;

/// How a character's rig is built.
#[derive(Clone, Copy, Debug)]
pub enum RigTarget<'a> {
    Humanoid { template: &'a TemplatePoseAsset },
    Generic { root_motion_bone: &'a str },
}

impl RigTarget<'_> {
    pub fn kind(&self) -> RigKind {
        match self {
            Self::Humanoid { .. } => RigKind::Humanoid,
            Self::Generic { .. } => RigKind::Generic,
        }
    }
}

/// A procedurally assembled character as seen by the rig orchestrator.
pub trait Character {
    type Skeleton: SkeletonIndex;
    type Controller: AnimationController;
    type Parent;

    fn skeleton(&self) -> &Self::Skeleton;

    /// The character object and its root bone, read at call time.
    fn root_bones(&self) -> RootBones;

    fn rig_target(&self) -> RigTarget<'_>;

    fn controller_asset(
        &self,
    ) -> Option<<Self::Controller as AnimationController>::ControllerAsset>;

    /// Unparents the character root, returning what it was attached to.
    fn detach_from_parent(&mut self) -> Option<Self::Parent>;
    fn attach_to_parent(&mut self, parent: Option<Self::Parent>);

    fn local_position(&self) -> Vec3;
    fn set_local_position(&mut self, position: Vec3);
    fn local_rotation(&self) -> Quat;
    fn set_local_rotation(&mut self, rotation: Quat);

    fn animator_mut(&mut self) -> Option<&mut Self::Controller>;
    fn add_animator(&mut self) -> &mut Self::Controller;

    fn build_humanoid_rig(
        &mut self,
        descriptor: &RigDescriptor,
    ) -> Result<<Self::Controller as AnimationController>::Rig, Error>;

    fn build_generic_rig(
        &mut self,
        root_motion_bone: &str,
    ) -> Result<<Self::Controller as AnimationController>::Rig, Error>;
}
