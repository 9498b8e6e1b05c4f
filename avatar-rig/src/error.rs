use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("template pose has no bones")]
    EmptyTemplate,

    #[error("none of the {template_len} template bones resolve in the skeleton")]
    NoResolvableBone { template_len: usize },

    #[error("{missing} leading template bone(s) unresolved; at least two are needed to carry the root transforms")]
    MissingRootCarrier { missing: usize },

    #[error("invalid value: {message}")]
    InvalidValue { message: String },

    #[error("rig construction failed: {message}")]
    RigConstruction { message: String },

    #[error("template pose format '{format}' is not enabled in this build")]
    UnsupportedPoseFormat { format: String },

    #[cfg(feature = "json")]
    #[error("failed to parse template pose JSON: {message}")]
    JsonParse { message: String },

    #[cfg(feature = "json")]
    #[error("invalid {field} for bone '{bone}' in template pose JSON")]
    JsonInvalidBoneField { bone: String, field: String },

    #[cfg(feature = "binary")]
    #[error("failed to parse template pose binary: {message}")]
    BinaryParse { message: String },
}
