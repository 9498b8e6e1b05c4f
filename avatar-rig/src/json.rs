//! JSON loader for template poses.
//!
//! ```json
//! {
//!   "bones": [{ "name": "Hips", "position": [0, 1, 0], "rotation": [0, 0, 0, 1], "scale": [1, 1, 1] }],
//!   "human": [{ "humanName": "Hips", "boneName": "Hips" }],
//!   "tuning": { "armStretch": 0.05 }
//! }
//! ```

use crate::{BoneRecord, Error, HumanLimit, HumanMapping, RigTuning, TemplatePose};
use crate::pose_asset::sanitize_pose;
use glam::{Quat, Vec3};
use serde::Deserialize;

#[derive(Debug, Deserialize)]
struct Root {
    #[serde(default)]
    bones: Vec<BoneDef>,
    #[serde(default)]
    human: Vec<HumanDef>,
    #[serde(default)]
    tuning: Option<TuningDef>,
}

fn default_rotation() -> [f32; 4] {
    [0.0, 0.0, 0.0, 1.0]
}

fn default_scale() -> [f32; 3] {
    [1.0, 1.0, 1.0]
}

fn default_true() -> bool {
    true
}

#[derive(Debug, Deserialize)]
struct BoneDef {
    name: String,
    #[serde(default)]
    position: [f32; 3],
    #[serde(default = "default_rotation")]
    rotation: [f32; 4],
    #[serde(default = "default_scale")]
    scale: [f32; 3],
}

#[derive(Debug, Deserialize)]
struct HumanDef {
    #[serde(rename = "humanName")]
    human_name: String,
    #[serde(rename = "boneName")]
    bone_name: String,
    #[serde(default)]
    limit: Option<LimitDef>,
}

#[derive(Debug, Deserialize)]
struct LimitDef {
    #[serde(default = "default_true", rename = "useDefaultValues")]
    use_default_values: bool,
    #[serde(default)]
    min: [f32; 3],
    #[serde(default)]
    max: [f32; 3],
    #[serde(default)]
    center: [f32; 3],
    #[serde(default, rename = "axisLength")]
    axis_length: f32,
}

#[derive(Debug, Deserialize)]
struct TuningDef {
    #[serde(default, rename = "armStretch")]
    arm_stretch: Option<f32>,
    #[serde(default, rename = "legStretch")]
    leg_stretch: Option<f32>,
    #[serde(default, rename = "upperArmTwist")]
    upper_arm_twist: Option<f32>,
    #[serde(default, rename = "lowerArmTwist")]
    lower_arm_twist: Option<f32>,
    #[serde(default, rename = "upperLegTwist")]
    upper_leg_twist: Option<f32>,
    #[serde(default, rename = "lowerLegTwist")]
    lower_leg_twist: Option<f32>,
    #[serde(default, rename = "feetSpacing")]
    feet_spacing: Option<f32>,
    #[serde(default, rename = "hasTranslationDoF")]
    has_translation_dof: Option<bool>,
}

impl TuningDef {
    fn into_tuning(self) -> RigTuning {
        let d = RigTuning::default();
        RigTuning {
            arm_stretch: self.arm_stretch.unwrap_or(d.arm_stretch),
            leg_stretch: self.leg_stretch.unwrap_or(d.leg_stretch),
            upper_arm_twist: self.upper_arm_twist.unwrap_or(d.upper_arm_twist),
            lower_arm_twist: self.lower_arm_twist.unwrap_or(d.lower_arm_twist),
            upper_leg_twist: self.upper_leg_twist.unwrap_or(d.upper_leg_twist),
            lower_leg_twist: self.lower_leg_twist.unwrap_or(d.lower_leg_twist),
            feet_spacing: self.feet_spacing.unwrap_or(d.feet_spacing),
            has_translation_dof: self.has_translation_dof.unwrap_or(d.has_translation_dof),
        }
    }
}

impl TemplatePose {
    pub fn from_json_str(input: &str) -> Result<Self, Error> {
        let root: Root = serde_json::from_str(input).map_err(|e| Error::JsonParse {
            message: e.to_string(),
        })?;

        let mut bones = Vec::with_capacity(root.bones.len());
        for bone in root.bones {
            let rotation = Quat::from_array(bone.rotation);
            if rotation.length_squared() <= f32::EPSILON {
                return Err(Error::JsonInvalidBoneField {
                    bone: bone.name,
                    field: "rotation".to_string(),
                });
            }
            bones.push(BoneRecord {
                name: bone.name,
                position: Vec3::from_array(bone.position),
                rotation,
                scale: Vec3::from_array(bone.scale),
            });
        }

        let human = root
            .human
            .into_iter()
            .map(|h| HumanMapping {
                human_name: h.human_name,
                bone_name: h.bone_name,
                limit: h
                    .limit
                    .map(|l| HumanLimit {
                        use_default_values: l.use_default_values,
                        min: Vec3::from_array(l.min),
                        max: Vec3::from_array(l.max),
                        center: Vec3::from_array(l.center),
                        axis_length: l.axis_length,
                    })
                    .unwrap_or_default(),
            })
            .collect();

        let tuning = root
            .tuning
            .map(TuningDef::into_tuning)
            .unwrap_or_default();

        sanitize_pose(TemplatePose {
            bones,
            human,
            tuning,
        })
    }
}
