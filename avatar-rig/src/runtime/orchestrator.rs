use super::host::{AnimationController, Character, RigOf, RigTarget};
use super::snapshot::AnimatorSnapshot;
use crate::{Diagnostics, Error, RigDescriptor, build_rig_descriptor, validate_human_mapping};
use glam::{Quat, Vec3};

pub const DEFAULT_LOG_TARGET: &str = "avatar_rig";

fn default_frame_delta() -> f32 {
    1.0 / 60.0
}

fn default_log_target() -> String {
    DEFAULT_LOG_TARGET.to_string()
}

/// Knobs for [`update_avatar`].
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "json", derive(serde::Deserialize))]
#[cfg_attr(feature = "json", serde(default, rename_all = "camelCase"))]
pub struct UpdateOptions {
    /// Duration of the host's last frame in seconds; captured layer times are rewound by it.
    pub frame_delta: f32,
    /// Leave an already installed rig alone.
    pub keep_avatar: bool,
    /// Check human mappings against the built humanoid skeleton.
    pub validate_mapping: bool,
    pub log_target: String,
}

impl Default for UpdateOptions {
    fn default() -> Self {
        Self {
            frame_delta: default_frame_delta(),
            keep_avatar: false,
            validate_mapping: true,
            log_target: default_log_target(),
        }
    }
}

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum Outcome {
    NoCharacter,
    MissingControllerAsset,
    /// `keep_avatar` was set and a rig was already installed.
    Kept,
    Created,
    Rebuilt {
        /// Whether per-layer playback was replayed onto the new rig.
        replayed: bool,
    },
}

#[derive(Clone, Debug)]
pub struct AvatarUpdate {
    pub outcome: Outcome,
    pub diagnostics: Diagnostics,
}

enum RigRequest {
    Humanoid(RigDescriptor),
    Generic(String),
}

/// Builds the rig for `character` according to its rig target, without installing it.
pub fn set_avatar<C: Character>(
    character: &mut C,
    options: &UpdateOptions,
    diagnostics: &mut Diagnostics,
) -> Result<RigOf<C>, Error> {
    let request = match character.rig_target() {
        RigTarget::Humanoid { template } => {
            let pose = template.decode()?;
            let roots = character.root_bones();
            let descriptor =
                build_rig_descriptor(&pose, character.skeleton(), &roots, diagnostics)?;
            if options.validate_mapping {
                validate_human_mapping(&descriptor, diagnostics);
            }
            RigRequest::Humanoid(descriptor)
        }
        RigTarget::Generic { root_motion_bone } => RigRequest::Generic(root_motion_bone.to_string()),
    };

    match request {
        RigRequest::Humanoid(descriptor) => {
            log::debug!(
                target: options.log_target.as_str(),
                "building humanoid rig with {} bones and {} human mappings",
                descriptor.skeleton.len(),
                descriptor.human.len()
            );
            character.build_humanoid_rig(&descriptor)
        }
        RigRequest::Generic(root_motion_bone) => {
            log::debug!(
                target: options.log_target.as_str(),
                "building generic rig rooted at '{root_motion_bone}'"
            );
            character.build_generic_rig(&root_motion_bone)
        }
    }
}

enum Installed {
    Created,
    Replaced,
}

fn install_rig<C: Character>(
    character: &mut C,
    options: &UpdateOptions,
    diagnostics: &mut Diagnostics,
) -> Result<Installed, Error> {
    // The old rig stays installed until the new one has been built.
    let rig = set_avatar(character, options, diagnostics)?;
    if let Some(animator) = character.animator_mut() {
        animator.set_rig(None);
        animator.set_rig(Some(rig));
        return Ok(Installed::Replaced);
    }

    let asset = character
        .controller_asset()
        .ok_or_else(|| Error::RigConstruction {
            message: "animation controller asset disappeared during rebuild".to_string(),
        })?;
    let animator = character.add_animator();
    animator.set_rig(Some(rig));
    animator.set_controller_asset(asset);
    Ok(Installed::Created)
}

/// Builds or rebuilds the rig of `character`, carrying animator playback across the swap.
///
/// The character root is detached and put in a canonical pose while the rig is built, then
/// reattached with its original local pose. Recoverable problems end up in the returned
/// diagnostics; errors abort the rebuild and leave any previously installed rig in place.
pub fn update_avatar<C: Character>(
    character: Option<&mut C>,
    options: &UpdateOptions,
) -> Result<AvatarUpdate, Error> {
    let target = options.log_target.as_str();
    let mut diagnostics = Diagnostics::new();

    let Some(character) = character else {
        return Ok(AvatarUpdate {
            outcome: Outcome::NoCharacter,
            diagnostics,
        });
    };

    if !options.frame_delta.is_finite() || options.frame_delta < 0.0 {
        return Err(Error::InvalidValue {
            message: format!(
                "frame delta must be finite and non-negative, got {}",
                options.frame_delta
            ),
        });
    }

    if character.controller_asset().is_none() {
        diagnostics.warn("character has no animation controller asset; rig not updated");
        diagnostics.emit(target);
        return Ok(AvatarUpdate {
            outcome: Outcome::MissingControllerAsset,
            diagnostics,
        });
    }

    if options.keep_avatar && character.animator_mut().is_some_and(|a| a.has_rig()) {
        log::debug!(target: target, "keeping installed rig");
        return Ok(AvatarUpdate {
            outcome: Outcome::Kept,
            diagnostics,
        });
    }

    let snapshot = character
        .animator_mut()
        .map(|animator| AnimatorSnapshot::capture(&*animator, options.frame_delta))
        .unwrap_or_default();

    let position = character.local_position();
    let rotation = character.local_rotation();
    let parent = character.detach_from_parent();
    character.set_local_position(Vec3::ZERO);
    character.set_local_rotation(Quat::IDENTITY);

    let installed = install_rig(character, options, &mut diagnostics);

    character.attach_to_parent(parent);
    character.set_local_position(position);
    character.set_local_rotation(rotation);

    let installed = match installed {
        Ok(installed) => installed,
        Err(err) => {
            diagnostics.emit(target);
            log::error!(target: target, "rig rebuild aborted: {err}");
            return Err(err);
        }
    };

    let outcome = match installed {
        Installed::Created => Outcome::Created,
        Installed::Replaced => {
            let mut replayed = false;
            if let Some(animator) = character.animator_mut() {
                let layer_count = animator.layer_count();
                replayed = snapshot.matches_layer_count(layer_count);
                if snapshot.is_captured() && !replayed {
                    let message = format!(
                        "animator layer count changed from {} to {layer_count}; playback not restored",
                        snapshot.layers().len()
                    );
                    diagnostics.warn(message);
                }
                snapshot.restore_into(animator);
            }
            Outcome::Rebuilt { replayed }
        }
    };

    diagnostics.emit(target);
    Ok(AvatarUpdate {
        outcome,
        diagnostics,
    })
}
