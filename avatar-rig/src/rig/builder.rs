use crate::{
    BoneHash, BoneRecord, Diagnostics, Error, LocalTransform, NamedTransform, RigDescriptor,
    RootBones, SkeletonIndex, TemplatePose,
};
use std::collections::HashMap;
use std::ops::Range;

/// Template bones resolved against a live skeleton, keyed by bone hash.
#[derive(Clone, Debug)]
pub struct ResolvedSkeleton {
    leading_unresolved: usize,
    transforms: HashMap<BoneHash, LocalTransform>,
}

impl ResolvedSkeleton {
    /// Number of template slots at the front that have no node in the skeleton.
    pub fn leading_unresolved(&self) -> usize {
        self.leading_unresolved
    }

    pub fn transform(&self, hash: BoneHash) -> Option<LocalTransform> {
        self.transforms.get(&hash).copied()
    }

    pub fn len(&self) -> usize {
        self.transforms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.transforms.is_empty()
    }
}

/// How the unresolved leading template slots are turned into the character's root entries.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum RootSubstitution {
    /// Every leading slot resolved; roots are ordinary skeleton bones.
    None,
    /// The last two unresolved slots carry the outer and inner roots. Slots in `discarded` come
    /// before them and are left out of the output.
    Carriers {
        discarded: Range<usize>,
        outer_slot: usize,
        inner_slot: usize,
    },
}

impl RootSubstitution {
    pub fn for_unresolved(leading_unresolved: usize) -> Result<Self, Error> {
        match leading_unresolved {
            0 => Ok(Self::None),
            1 => Err(Error::MissingRootCarrier { missing: 1 }),
            n => Ok(Self::Carriers {
                discarded: 0..n - 2,
                outer_slot: n - 2,
                inner_slot: n - 1,
            }),
        }
    }
}

/// Phase one: locate the first template bone present in `index` and resolve every bone from
/// there on to its live transform with the pose-corrected rotation.
pub fn resolve_skeleton<S: SkeletonIndex + ?Sized>(
    template: &[BoneRecord],
    index: &S,
) -> Result<ResolvedSkeleton, Error> {
    if template.is_empty() {
        return Err(Error::EmptyTemplate);
    }

    let leading_unresolved = template
        .iter()
        .position(|bone| index.has_bone(BoneHash::of(&bone.name)))
        .ok_or(Error::NoResolvableBone {
            template_len: template.len(),
        })?;

    let mut transforms = HashMap::with_capacity(template.len() - leading_unresolved);
    for bone in &template[leading_unresolved..] {
        let hash = BoneHash::of(&bone.name);
        let Some(live) = index.bone_transform(hash) else {
            continue;
        };
        let rotation = index.corrected_rotation(hash, bone.rotation);
        transforms.insert(
            hash,
            LocalTransform::new(live.position, rotation, live.scale),
        );
    }

    Ok(ResolvedSkeleton {
        leading_unresolved,
        transforms,
    })
}

fn root_carrier(slot: &BoneRecord, root: &NamedTransform) -> BoneRecord {
    let mut carrier = slot.clone();
    carrier.name = root.name.clone();
    carrier.set_transform(root.transform);
    carrier
}

/// Phase two: project `resolved` back onto template order, substituting root carriers and
/// dropping bones the skeleton does not have.
pub fn project_skeleton(
    template: &[BoneRecord],
    resolved: &ResolvedSkeleton,
    roots: &RootBones,
    diagnostics: &mut Diagnostics,
) -> Result<Vec<BoneRecord>, Error> {
    let leading = resolved.leading_unresolved;
    if leading >= template.len() {
        return Err(Error::NoResolvableBone {
            template_len: template.len(),
        });
    }

    let mut out = Vec::with_capacity(template.len());

    if let RootSubstitution::Carriers {
        discarded,
        outer_slot,
        inner_slot,
    } = RootSubstitution::for_unresolved(leading)?
    {
        for slot in &template[discarded] {
            diagnostics.info(format!(
                "discarding unresolved leading template bone '{}'",
                slot.name
            ));
        }
        let outer = &template[outer_slot];
        let inner = &template[inner_slot];
        diagnostics.info(format!(
            "template slot '{}' carries root '{}'; slot '{}' carries root bone '{}'",
            outer.name, roots.outer.name, inner.name, roots.inner.name
        ));
        out.push(root_carrier(outer, &roots.outer));
        out.push(root_carrier(inner, &roots.inner));
    }

    for bone in &template[leading..] {
        match resolved.transform(BoneHash::of(&bone.name)) {
            Some(transform) => {
                let mut record = bone.clone();
                record.set_transform(transform);
                out.push(record);
            }
            None => diagnostics.info(format!(
                "template bone '{}' is not in the skeleton; dropped",
                bone.name
            )),
        }
    }

    Ok(out)
}

/// Reconciles `template` against `index`, producing the ordered skeleton for rig construction.
pub fn build_skeleton<S: SkeletonIndex + ?Sized>(
    template: &[BoneRecord],
    index: &S,
    roots: &RootBones,
    diagnostics: &mut Diagnostics,
) -> Result<Vec<BoneRecord>, Error> {
    let resolved = resolve_skeleton(template, index)?;
    project_skeleton(template, &resolved, roots, diagnostics)
}

/// Builds a humanoid rig descriptor from `pose`. Human mappings and tuning pass through
/// unchanged.
pub fn build_rig_descriptor<S: SkeletonIndex + ?Sized>(
    pose: &TemplatePose,
    index: &S,
    roots: &RootBones,
    diagnostics: &mut Diagnostics,
) -> Result<RigDescriptor, Error> {
    let skeleton = build_skeleton(&pose.bones, index, roots, diagnostics)?;
    Ok(RigDescriptor {
        skeleton,
        human: pose.human.clone(),
        tuning: pose.tuning,
    })
}
