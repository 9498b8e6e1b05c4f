use glam::{Quat, Vec3};

/// Local position, rotation and scale of a transform relative to its parent.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct LocalTransform {
    pub position: Vec3,
    pub rotation: Quat,
    pub scale: Vec3,
}

impl LocalTransform {
    pub const IDENTITY: Self = Self {
        position: Vec3::ZERO,
        rotation: Quat::IDENTITY,
        scale: Vec3::ONE,
    };

    pub fn new(position: Vec3, rotation: Quat, scale: Vec3) -> Self {
        Self {
            position,
            rotation,
            scale,
        }
    }

    pub fn is_finite(&self) -> bool {
        self.position.is_finite() && self.rotation.is_finite() && self.scale.is_finite()
    }
}

impl Default for LocalTransform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

/// One skeleton entry of a rig descriptor.
///
/// Sequences of records are ordered parent-before-child; the order is what the host's rig
/// constructor walks, so every transformation here preserves it.
#[derive(Clone, Debug, PartialEq)]
pub struct BoneRecord {
    pub name: String,
    pub position: Vec3,
    pub rotation: Quat,
    pub scale: Vec3,
}

impl BoneRecord {
    pub fn new(name: impl Into<String>, transform: LocalTransform) -> Self {
        Self {
            name: name.into(),
            position: transform.position,
            rotation: transform.rotation,
            scale: transform.scale,
        }
    }

    pub fn transform(&self) -> LocalTransform {
        LocalTransform::new(self.position, self.rotation, self.scale)
    }

    pub fn set_transform(&mut self, transform: LocalTransform) {
        self.position = transform.position;
        self.rotation = transform.rotation;
        self.scale = transform.scale;
    }
}

/// Muscle range limits for a humanoid bone role.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct HumanLimit {
    pub use_default_values: bool,
    pub min: Vec3,
    pub max: Vec3,
    pub center: Vec3,
    pub axis_length: f32,
}

impl Default for HumanLimit {
    fn default() -> Self {
        Self {
            use_default_values: true,
            min: Vec3::ZERO,
            max: Vec3::ZERO,
            center: Vec3::ZERO,
            axis_length: 0.0,
        }
    }
}

/// Binds a humanoid role (e.g. `"LeftUpperArm"`) to a skeleton bone name.
#[derive(Clone, Debug, PartialEq)]
pub struct HumanMapping {
    pub human_name: String,
    pub bone_name: String,
    pub limit: HumanLimit,
}

impl HumanMapping {
    pub fn new(human_name: impl Into<String>, bone_name: impl Into<String>) -> Self {
        Self {
            human_name: human_name.into(),
            bone_name: bone_name.into(),
            limit: HumanLimit::default(),
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub struct RigTuning {
    pub arm_stretch: f32,
    pub leg_stretch: f32,
    pub upper_arm_twist: f32,
    pub lower_arm_twist: f32,
    pub upper_leg_twist: f32,
    pub lower_leg_twist: f32,
    pub feet_spacing: f32,
    pub has_translation_dof: bool,
}

impl Default for RigTuning {
    fn default() -> Self {
        Self {
            arm_stretch: 0.05,
            leg_stretch: 0.05,
            upper_arm_twist: 0.5,
            lower_arm_twist: 0.5,
            upper_leg_twist: 0.5,
            lower_leg_twist: 0.5,
            feet_spacing: 0.0,
            has_translation_dof: false,
        }
    }
}

/// Authored template for one rig family, before reconciliation against a live skeleton.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TemplatePose {
    pub bones: Vec<BoneRecord>,
    pub human: Vec<HumanMapping>,
    pub tuning: RigTuning,
}

/// What the host's humanoid rig constructor consumes.
#[derive(Clone, Debug, PartialEq)]
pub struct RigDescriptor {
    pub skeleton: Vec<BoneRecord>,
    pub human: Vec<HumanMapping>,
    pub tuning: RigTuning,
}

#[derive(Clone, Debug, PartialEq)]
pub struct NamedTransform {
    pub name: String,
    pub transform: LocalTransform,
}

impl NamedTransform {
    pub fn new(name: impl Into<String>, transform: LocalTransform) -> Self {
        Self {
            name: name.into(),
            transform,
        }
    }
}

/// The two real root transforms of a character: the character object itself (`outer`) and the
/// root bone directly beneath it (`inner`).
#[derive(Clone, Debug, PartialEq)]
pub struct RootBones {
    pub outer: NamedTransform,
    pub inner: NamedTransform,
}

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum RigKind {
    Humanoid,
    Generic,
}
