use crate::{ControllerAsset, NodeId, SceneRig, SceneSkeleton, SimAnimator};
use avatar_rig::{Character, Error, RigDescriptor, RigTarget, RootBones, TemplatePoseAsset};
use glam::{Quat, Vec3};
use std::sync::Arc;

#[derive(Clone, Debug)]
pub enum CharacterRigTarget {
    Humanoid(TemplatePoseAsset),
    Generic { root_motion_bone: String },
}

/// A character living in a [`crate::Scene`], with an optional simulated animator.
#[derive(Debug)]
pub struct SceneCharacter {
    skeleton: SceneSkeleton,
    target: CharacterRigTarget,
    controller_asset: Option<Arc<ControllerAsset>>,
    animator: Option<SimAnimator>,
}

impl SceneCharacter {
    pub fn new(skeleton: SceneSkeleton, target: CharacterRigTarget) -> Self {
        Self {
            skeleton,
            target,
            controller_asset: None,
            animator: None,
        }
    }

    pub fn with_controller_asset(mut self, asset: Arc<ControllerAsset>) -> Self {
        self.controller_asset = Some(asset);
        self
    }

    pub fn set_controller_asset(&mut self, asset: Option<Arc<ControllerAsset>>) {
        self.controller_asset = asset;
    }

    pub fn set_target(&mut self, target: CharacterRigTarget) {
        self.target = target;
    }

    pub fn skeleton_mut(&mut self) -> &mut SceneSkeleton {
        &mut self.skeleton
    }

    pub fn animator(&self) -> Option<&SimAnimator> {
        self.animator.as_ref()
    }

    fn root(&self) -> NodeId {
        self.skeleton.character_root()
    }
}

impl Character for SceneCharacter {
    type Skeleton = SceneSkeleton;
    type Controller = SimAnimator;
    type Parent = NodeId;

    fn skeleton(&self) -> &SceneSkeleton {
        &self.skeleton
    }

    fn root_bones(&self) -> RootBones {
        self.skeleton.root_bones()
    }

    fn rig_target(&self) -> RigTarget<'_> {
        match &self.target {
            CharacterRigTarget::Humanoid(template) => RigTarget::Humanoid { template },
            CharacterRigTarget::Generic { root_motion_bone } => RigTarget::Generic {
                root_motion_bone: root_motion_bone.as_str(),
            },
        }
    }

    fn controller_asset(&self) -> Option<Arc<ControllerAsset>> {
        self.controller_asset.clone()
    }

    fn detach_from_parent(&mut self) -> Option<NodeId> {
        let root = self.root();
        let scene = self.skeleton.scene_mut();
        let parent = scene.parent(root);
        scene.set_parent(root, None);
        parent
    }

    fn attach_to_parent(&mut self, parent: Option<NodeId>) {
        let root = self.root();
        self.skeleton.scene_mut().set_parent(root, parent);
    }

    fn local_position(&self) -> Vec3 {
        self.skeleton.scene().local(self.root()).position
    }

    fn set_local_position(&mut self, position: Vec3) {
        let root = self.root();
        self.skeleton.scene_mut().node_mut(root).local.position = position;
    }

    fn local_rotation(&self) -> Quat {
        self.skeleton.scene().local(self.root()).rotation
    }

    fn set_local_rotation(&mut self, rotation: Quat) {
        let root = self.root();
        self.skeleton.scene_mut().node_mut(root).local.rotation = rotation;
    }

    fn animator_mut(&mut self) -> Option<&mut SimAnimator> {
        self.animator.as_mut()
    }

    fn add_animator(&mut self) -> &mut SimAnimator {
        self.animator.insert(SimAnimator::new())
    }

    fn build_humanoid_rig(&mut self, descriptor: &RigDescriptor) -> Result<SceneRig, Error> {
        SceneRig::humanoid(self.skeleton.scene(), self.root(), descriptor)
    }

    fn build_generic_rig(&mut self, root_motion_bone: &str) -> Result<SceneRig, Error> {
        SceneRig::generic(self.skeleton.scene(), self.root(), root_motion_bone)
    }
}
