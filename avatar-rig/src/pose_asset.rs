use crate::{Error, TemplatePose};
use glam::{Quat, Vec4};

/// Template pose as handed over by the character-assembly pipeline.
#[derive(Clone, Debug)]
pub enum TemplatePoseAsset {
    Decoded(TemplatePose),
    /// JSON text, see [`TemplatePose::from_json_str`].
    Json(String),
    /// Serialized bytes, see [`TemplatePose::from_binary`].
    Binary(Vec<u8>),
}

impl TemplatePoseAsset {
    pub fn format_name(&self) -> &'static str {
        match self {
            Self::Decoded(_) => "decoded",
            Self::Json(_) => "json",
            Self::Binary(_) => "binary",
        }
    }

    pub fn decode(&self) -> Result<TemplatePose, Error> {
        match self {
            Self::Decoded(pose) => sanitize_pose(pose.clone()),
            #[cfg(feature = "json")]
            Self::Json(text) => TemplatePose::from_json_str(text),
            #[cfg(feature = "binary")]
            Self::Binary(bytes) => TemplatePose::from_binary(bytes),
            #[allow(unreachable_patterns)]
            _ => Err(Error::UnsupportedPoseFormat {
                format: self.format_name().to_string(),
            }),
        }
    }
}

impl From<TemplatePose> for TemplatePoseAsset {
    fn from(pose: TemplatePose) -> Self {
        Self::Decoded(pose)
    }
}

/// Rejects non-finite transforms and normalizes bone rotations.
pub(crate) fn sanitize_pose(mut pose: TemplatePose) -> Result<TemplatePose, Error> {
    for bone in &mut pose.bones {
        if !bone.transform().is_finite() {
            return Err(Error::InvalidValue {
                message: format!("non-finite transform for template bone '{}'", bone.name),
            });
        }
        let rotation = Vec4::from(bone.rotation)
            .try_normalize()
            .ok_or_else(|| Error::InvalidValue {
                message: format!("zero-length rotation for template bone '{}'", bone.name),
            })?;
        bone.rotation = Quat::from_vec4(rotation);
    }
    Ok(pose)
}
