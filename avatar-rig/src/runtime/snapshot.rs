use super::host::{AnimationController, CullingMode, LayerPlayback, UpdateMode};

/// Captured playback of one animator layer.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct AnimationLayerState {
    pub state_hash: i32,
    /// Position in `[0, 1)` for looping states, rewound by one frame.
    pub normalized_time: f32,
}

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct AnimatorFlags {
    pub enabled: bool,
    pub apply_root_motion: bool,
    pub update_mode: UpdateMode,
    pub culling_mode: CullingMode,
}

impl AnimatorFlags {
    pub fn read<A: AnimationController + ?Sized>(controller: &A) -> Self {
        Self {
            enabled: controller.enabled(),
            apply_root_motion: controller.apply_root_motion(),
            update_mode: controller.update_mode(),
            culling_mode: controller.culling_mode(),
        }
    }
}

/// One mutation of an animation controller, in the order it must be applied.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum AnimatorCommand {
    SetApplyRootMotion(bool),
    SetUpdateMode(UpdateMode),
    SetCullingMode(CullingMode),
    Play {
        state_hash: i32,
        layer: usize,
        normalized_time: f32,
    },
    Update {
        delta: f32,
    },
    SetEnabled(bool),
}

/// Playback state carried across a rig swap.
#[derive(Clone, Debug, Default, PartialEq)]
pub enum AnimatorSnapshot {
    #[default]
    Empty,
    Captured {
        layers: Vec<AnimationLayerState>,
        flags: AnimatorFlags,
    },
}

fn rewound_time(playback: &LayerPlayback, frame_delta: f32) -> f32 {
    let time = playback.normalized_time;
    if !time.is_finite() {
        return 0.0;
    }
    let mut time = if playback.looping {
        // Tiny negative times round up to exactly 1.0.
        let wrapped = time.rem_euclid(1.0);
        if wrapped >= 1.0 { 0.0 } else { wrapped }
    } else {
        time.clamp(0.0, 1.0)
    };
    if playback.length.is_finite() && playback.length > 0.0 {
        time -= frame_delta / playback.length;
    }
    time.max(0.0)
}

impl AnimatorSnapshot {
    /// Reads every layer of `controller`. Normalized times are rewound by `frame_delta`
    /// seconds so that replay resumes just before the captured frame.
    pub fn capture<A: AnimationController + ?Sized>(controller: &A, frame_delta: f32) -> Self {
        let frame_delta = if frame_delta.is_finite() && frame_delta > 0.0 {
            frame_delta
        } else {
            0.0
        };
        let layers = (0..controller.layer_count())
            .map(|layer| {
                let playback = controller.layer_playback(layer);
                AnimationLayerState {
                    state_hash: playback.state_hash,
                    normalized_time: rewound_time(&playback, frame_delta),
                }
            })
            .collect();
        Self::Captured {
            layers,
            flags: AnimatorFlags::read(controller),
        }
    }

    pub fn is_captured(&self) -> bool {
        matches!(self, Self::Captured { .. })
    }

    pub fn layers(&self) -> &[AnimationLayerState] {
        match self {
            Self::Empty => &[],
            Self::Captured { layers, .. } => layers,
        }
    }

    pub fn flags(&self) -> Option<AnimatorFlags> {
        match self {
            Self::Empty => None,
            Self::Captured { flags, .. } => Some(*flags),
        }
    }

    /// Whether layer states can be replayed onto a controller with `layer_count` layers.
    pub fn matches_layer_count(&self, layer_count: usize) -> bool {
        match self {
            Self::Empty => false,
            Self::Captured { layers, .. } => layers.len() == layer_count,
        }
    }

    /// Consumes the snapshot, producing the commands that restore it onto a controller that
    /// currently has `layer_count` layers. Layer replay is skipped when the count differs from
    /// the captured one; the flags are restored either way.
    pub fn restore(self, layer_count: usize) -> Vec<AnimatorCommand> {
        let Self::Captured { layers, flags } = self else {
            return Vec::new();
        };

        let mut commands = Vec::with_capacity(layers.len() + 5);
        commands.push(AnimatorCommand::SetApplyRootMotion(flags.apply_root_motion));
        commands.push(AnimatorCommand::SetUpdateMode(flags.update_mode));
        commands.push(AnimatorCommand::SetCullingMode(flags.culling_mode));
        if layers.len() == layer_count {
            commands.extend(
                layers
                    .iter()
                    .enumerate()
                    .map(|(layer, state)| AnimatorCommand::Play {
                        state_hash: state.state_hash,
                        layer,
                        normalized_time: state.normalized_time,
                    }),
            );
        }
        commands.push(AnimatorCommand::Update { delta: 0.0 });
        // Last, so the forced update above runs regardless of the captured state.
        commands.push(AnimatorCommand::SetEnabled(flags.enabled));
        commands
    }

    /// Restores the snapshot onto `controller` using its current layer count. Returns whether
    /// layer playback was replayed.
    pub fn restore_into<A: AnimationController + ?Sized>(self, controller: &mut A) -> bool {
        let layer_count = controller.layer_count();
        let replayed = self.matches_layer_count(layer_count);
        apply_animator_commands(controller, &self.restore(layer_count));
        replayed
    }
}

pub fn apply_animator_commands<A: AnimationController + ?Sized>(
    controller: &mut A,
    commands: &[AnimatorCommand],
) {
    for command in commands {
        match *command {
            AnimatorCommand::SetApplyRootMotion(apply) => controller.set_apply_root_motion(apply),
            AnimatorCommand::SetUpdateMode(mode) => controller.set_update_mode(mode),
            AnimatorCommand::SetCullingMode(mode) => controller.set_culling_mode(mode),
            AnimatorCommand::Play {
                state_hash,
                layer,
                normalized_time,
            } => controller.play(state_hash, layer, normalized_time),
            AnimatorCommand::Update { delta } => controller.update(delta),
            AnimatorCommand::SetEnabled(enabled) => controller.set_enabled(enabled),
        }
    }
}
