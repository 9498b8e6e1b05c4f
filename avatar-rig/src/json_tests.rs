use crate::{Error, RigTuning, TemplatePose, TemplatePoseAsset};
use glam::{Quat, Vec3};

const POSE_JSON: &str = r#"
{
  "bones": [
    { "name": "Female(Clone)" },
    { "name": "Root", "rotation": [0, 0, 0, 2] },
    { "name": "Hips", "position": [0, 1.02, 0.01], "scale": [1, 1, 1] },
    { "name": "Spine", "position": [0, 0.1, 0], "rotation": [0.0, 0.0, 0.7071068, 0.7071068] }
  ],
  "human": [
    { "humanName": "Hips", "boneName": "Hips" },
    {
      "humanName": "Spine",
      "boneName": "Spine",
      "limit": { "useDefaultValues": false, "min": [-40, -40, -40], "max": [40, 40, 40], "axisLength": 0.1 }
    }
  ],
  "tuning": { "feetSpacing": 0.1, "hasTranslationDoF": true }
}
"#;

#[test]
fn parses_bones_mappings_and_tuning() {
    let pose = TemplatePose::from_json_str(POSE_JSON).unwrap();

    assert_eq!(pose.bones.len(), 4);
    assert_eq!(pose.bones[0].name, "Female(Clone)");
    assert_eq!(pose.bones[0].rotation, Quat::IDENTITY);
    assert_eq!(pose.bones[0].scale, Vec3::ONE);
    // Rotations are normalized on load.
    assert!(pose.bones[1].rotation.is_normalized());
    assert!(
        pose.bones[2]
            .position
            .abs_diff_eq(Vec3::new(0.0, 1.02, 0.01), 1.0e-6)
    );

    assert_eq!(pose.human.len(), 2);
    assert!(pose.human[0].limit.use_default_values);
    assert!(!pose.human[1].limit.use_default_values);
    assert_eq!(pose.human[1].limit.max, Vec3::splat(40.0));

    assert_eq!(
        pose.tuning,
        RigTuning {
            feet_spacing: 0.1,
            has_translation_dof: true,
            ..RigTuning::default()
        }
    );
}

#[test]
fn asset_decodes_json_text() {
    let asset = TemplatePoseAsset::Json(POSE_JSON.to_string());
    assert_eq!(asset.format_name(), "json");
    let pose = asset.decode().unwrap();
    assert_eq!(pose.bones[3].name, "Spine");
}

#[test]
fn missing_sections_default() {
    let pose = TemplatePose::from_json_str("{}").unwrap();
    assert!(pose.bones.is_empty());
    assert!(pose.human.is_empty());
    assert_eq!(pose.tuning, RigTuning::default());
}

#[test]
fn rejects_zero_rotation() {
    let err = TemplatePose::from_json_str(r#"{ "bones": [{ "name": "Hips", "rotation": [0, 0, 0, 0] }] }"#)
        .unwrap_err();
    assert!(
        matches!(err, Error::JsonInvalidBoneField { ref bone, ref field } if bone == "Hips" && field == "rotation")
    );
}

#[test]
fn malformed_json_is_a_parse_error() {
    let err = TemplatePose::from_json_str(r#"{ "bones": [{ "position": [0, 0, 0] }] }"#).unwrap_err();
    assert!(matches!(err, Error::JsonParse { .. }));
}
