use crate::{BoneHash, BoneRecord, LocalTransform};
use glam::Quat;
use std::collections::HashMap;

/// Hash-keyed view of a character's live bone hierarchy.
///
/// Implementations read through to the host on every call; callers never keep the results
/// across rebuilds.
pub trait SkeletonIndex {
    fn has_bone(&self, hash: BoneHash) -> bool;

    /// Live local transform of the bone node, if the bone exists.
    fn bone_transform(&self, hash: BoneHash) -> Option<LocalTransform>;

    /// Rotation to use for `hash` in a rig built from a template whose rest pose proposed
    /// `proposed`. Returns `proposed` when the bone needs no correction.
    fn corrected_rotation(&self, hash: BoneHash, proposed: Quat) -> Quat;
}

impl<T: SkeletonIndex + ?Sized> SkeletonIndex for &T {
    fn has_bone(&self, hash: BoneHash) -> bool {
        (**self).has_bone(hash)
    }

    fn bone_transform(&self, hash: BoneHash) -> Option<LocalTransform> {
        (**self).bone_transform(hash)
    }

    fn corrected_rotation(&self, hash: BoneHash, proposed: Quat) -> Quat {
        (**self).corrected_rotation(hash, proposed)
    }
}

#[derive(Clone, Debug)]
struct IndexedBone {
    name: String,
    transform: LocalTransform,
    bind_rotation: Option<Quat>,
}

/// Skeleton index backed by a plain hash map.
#[derive(Clone, Debug, Default)]
pub struct MapSkeletonIndex {
    bones: HashMap<BoneHash, IndexedBone>,
}

impl MapSkeletonIndex {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_bones<'a>(bones: impl IntoIterator<Item = &'a BoneRecord>) -> Self {
        let mut index = Self::new();
        for bone in bones {
            index.insert(bone.name.as_str(), bone.transform());
        }
        index
    }

    pub fn insert(&mut self, name: &str, transform: LocalTransform) {
        self.bones.insert(
            BoneHash::of(name),
            IndexedBone {
                name: name.to_string(),
                transform,
                bind_rotation: None,
            },
        );
    }

    /// Overrides the rotation reported by [`SkeletonIndex::corrected_rotation`] for `name`.
    /// Returns `false` when the bone is unknown.
    pub fn set_bind_rotation(&mut self, name: &str, rotation: Quat) -> bool {
        match self.bones.get_mut(&BoneHash::of(name)) {
            Some(bone) => {
                bone.bind_rotation = Some(rotation);
                true
            }
            None => false,
        }
    }

    pub fn bone_name(&self, hash: BoneHash) -> Option<&str> {
        self.bones.get(&hash).map(|b| b.name.as_str())
    }

    pub fn len(&self) -> usize {
        self.bones.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bones.is_empty()
    }
}

impl SkeletonIndex for MapSkeletonIndex {
    fn has_bone(&self, hash: BoneHash) -> bool {
        self.bones.contains_key(&hash)
    }

    fn bone_transform(&self, hash: BoneHash) -> Option<LocalTransform> {
        self.bones.get(&hash).map(|b| b.transform)
    }

    fn corrected_rotation(&self, hash: BoneHash, proposed: Quat) -> Quat {
        self.bones
            .get(&hash)
            .and_then(|b| b.bind_rotation)
            .unwrap_or(proposed)
    }
}
