use crate::{NodeId, Scene};
use avatar_rig::{BoneHash, LocalTransform, NamedTransform, RootBones, SkeletonIndex};
use glam::Quat;
use std::collections::HashMap;

/// A character's hierarchy inside a [`Scene`], indexed by bone hash.
///
/// The hash → node table is rebuilt by [`SceneSkeleton::reindex`] after hierarchy edits;
/// transforms are always read from the scene.
#[derive(Clone, Debug)]
pub struct SceneSkeleton {
    scene: Scene,
    character_root: NodeId,
    root_bone: NodeId,
    bones: HashMap<BoneHash, NodeId>,
    bind_rotations: HashMap<BoneHash, Quat>,
}

impl SceneSkeleton {
    /// `character_root` is the character object, `root_bone` the bone directly beneath it.
    /// Only bones strictly below `root_bone` are indexed.
    pub fn new(scene: Scene, character_root: NodeId, root_bone: NodeId) -> Self {
        let mut skeleton = Self {
            scene,
            character_root,
            root_bone,
            bones: HashMap::new(),
            bind_rotations: HashMap::new(),
        };
        skeleton.reindex();
        skeleton
    }

    pub fn reindex(&mut self) {
        self.bones = self
            .scene
            .depth_first(self.root_bone)
            .into_iter()
            .skip(1)
            .map(|id| (BoneHash::of(self.scene.name(id)), id))
            .collect();
    }

    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    /// Mutable scene access. Call [`SceneSkeleton::reindex`] after adding or removing bones.
    pub fn scene_mut(&mut self) -> &mut Scene {
        &mut self.scene
    }

    pub fn character_root(&self) -> NodeId {
        self.character_root
    }

    pub fn root_bone(&self) -> NodeId {
        self.root_bone
    }

    pub fn bone(&self, name: &str) -> Option<NodeId> {
        self.bones.get(&BoneHash::of(name)).copied()
    }

    pub fn bone_count(&self) -> usize {
        self.bones.len()
    }

    /// Records the rotation a rig should use for `name` in place of the template's rest pose.
    pub fn set_bind_rotation(&mut self, name: &str, rotation: Quat) {
        self.bind_rotations.insert(BoneHash::of(name), rotation);
    }

    /// Removes `name` and its descendants from the skeleton. Returns `false` if it is unknown.
    pub fn remove_bone(&mut self, name: &str) -> bool {
        let Some(id) = self.bone(name) else {
            return false;
        };
        self.scene.detach_subtree(id);
        self.reindex();
        true
    }

    pub fn root_bones(&self) -> RootBones {
        RootBones {
            outer: NamedTransform::new(
                self.scene.name(self.character_root),
                self.scene.local(self.character_root),
            ),
            inner: NamedTransform::new(
                self.scene.name(self.root_bone),
                self.scene.local(self.root_bone),
            ),
        }
    }
}

impl SkeletonIndex for SceneSkeleton {
    fn has_bone(&self, hash: BoneHash) -> bool {
        self.bones.contains_key(&hash)
    }

    fn bone_transform(&self, hash: BoneHash) -> Option<LocalTransform> {
        self.bones.get(&hash).map(|id| self.scene.local(*id))
    }

    fn corrected_rotation(&self, hash: BoneHash, proposed: Quat) -> Quat {
        self.bind_rotations.get(&hash).copied().unwrap_or(proposed)
    }
}
