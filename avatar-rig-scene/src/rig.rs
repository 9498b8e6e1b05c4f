use crate::ids::next_rig_id;
use crate::{NodeId, Scene};
use avatar_rig::{Error, RigDescriptor};

#[derive(Clone, Debug, PartialEq)]
pub enum SceneRigKind {
    Humanoid {
        descriptor: RigDescriptor,
        /// Scene node of each descriptor skeleton entry, in descriptor order.
        nodes: Vec<NodeId>,
    },
    Generic {
        root_motion_bone: NodeId,
    },
}

/// A rig bound to nodes of a [`Scene`].
#[derive(Clone, Debug, PartialEq)]
pub struct SceneRig {
    id: u64,
    pub kind: SceneRigKind,
}

impl SceneRig {
    pub fn id(&self) -> u64 {
        self.id
    }

    pub fn is_humanoid(&self) -> bool {
        matches!(self.kind, SceneRigKind::Humanoid { .. })
    }

    pub fn descriptor(&self) -> Option<&RigDescriptor> {
        match &self.kind {
            SceneRigKind::Humanoid { descriptor, .. } => Some(descriptor),
            SceneRigKind::Generic { .. } => None,
        }
    }

    /// Binds every descriptor entry to a node under `root`.
    pub fn humanoid(scene: &Scene, root: NodeId, descriptor: &RigDescriptor) -> Result<Self, Error> {
        if descriptor.skeleton.is_empty() {
            return Err(Error::RigConstruction {
                message: "descriptor has no skeleton".to_string(),
            });
        }
        let nodes = descriptor
            .skeleton
            .iter()
            .map(|bone| {
                scene
                    .find_in_subtree(root, &bone.name)
                    .ok_or_else(|| Error::RigConstruction {
                        message: format!("bone '{}' is not under '{}'", bone.name, scene.name(root)),
                    })
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            id: next_rig_id(),
            kind: SceneRigKind::Humanoid {
                descriptor: descriptor.clone(),
                nodes,
            },
        })
    }

    pub fn generic(scene: &Scene, root: NodeId, root_motion_bone: &str) -> Result<Self, Error> {
        let node = scene
            .find_in_subtree(root, root_motion_bone)
            .ok_or_else(|| Error::RigConstruction {
                message: format!(
                    "root motion bone '{root_motion_bone}' is not under '{}'",
                    scene.name(root)
                ),
            })?;
        Ok(Self {
            id: next_rig_id(),
            kind: SceneRigKind::Generic {
                root_motion_bone: node,
            },
        })
    }
}
