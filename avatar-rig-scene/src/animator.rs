use crate::SceneRig;
use avatar_rig::{
    AnimationController, AnimatorCommand, BoneHash, CullingMode, LayerPlayback, UpdateMode,
};
use std::sync::Arc;

#[derive(Clone, Debug, PartialEq)]
pub struct StateDef {
    pub name: String,
    pub hash: i32,
    pub length: f32,
    pub looping: bool,
}

impl StateDef {
    pub fn new(name: &str, length: f32) -> Self {
        Self {
            name: name.to_string(),
            // States share the bone name hash.
            hash: BoneHash::of(name).raw(),
            length,
            looping: true,
        }
    }
}

/// One animator layer; the first state is the entry state.
#[derive(Clone, Debug, PartialEq)]
pub struct LayerDef {
    pub name: String,
    pub states: Vec<StateDef>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct ControllerAsset {
    pub name: String,
    pub layers: Vec<LayerDef>,
}

#[derive(Clone, Debug, PartialEq)]
struct LayerRuntime {
    state: i32,
    normalized_time: f32,
    length: f32,
    looping: bool,
}

/// Simulated animator: plays states by normalized time and records every mutation.
#[derive(Debug)]
pub struct SimAnimator {
    asset: Option<Arc<ControllerAsset>>,
    staged_asset: Option<Arc<ControllerAsset>>,
    rig: Option<SceneRig>,
    layers: Vec<LayerRuntime>,
    enabled: bool,
    apply_root_motion: bool,
    update_mode: UpdateMode,
    culling_mode: CullingMode,
    history: Vec<AnimatorCommand>,
    pose_evaluations: usize,
}

impl Default for SimAnimator {
    fn default() -> Self {
        Self {
            asset: None,
            staged_asset: None,
            rig: None,
            layers: Vec::new(),
            enabled: true,
            apply_root_motion: false,
            update_mode: UpdateMode::Normal,
            culling_mode: CullingMode::AlwaysAnimate,
            history: Vec::new(),
            pose_evaluations: 0,
        }
    }
}

impl SimAnimator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn rig(&self) -> Option<&SceneRig> {
        self.rig.as_ref()
    }

    pub fn asset(&self) -> Option<&ControllerAsset> {
        self.asset.as_deref()
    }

    /// Mutations applied through [`AnimationController`] since the last
    /// [`SimAnimator::clear_history`].
    pub fn history(&self) -> &[AnimatorCommand] {
        &self.history
    }

    pub fn clear_history(&mut self) {
        self.history.clear();
    }

    /// Number of updates that evaluated a pose against a bound rig.
    pub fn pose_evaluations(&self) -> usize {
        self.pose_evaluations
    }

    /// Swaps the controller asset at the next rig rebind, as hosts do for asset edits made
    /// while the character is animating.
    pub fn stage_controller_asset(&mut self, asset: Arc<ControllerAsset>) {
        self.staged_asset = Some(asset);
    }

    pub fn state_name(&self, layer: usize) -> Option<&str> {
        let state = self.layers.get(layer)?.state;
        self.asset
            .as_ref()?
            .layers
            .get(layer)?
            .states
            .iter()
            .find(|s| s.hash == state)
            .map(|s| s.name.as_str())
    }

    fn find_state(&self, layer: usize, hash: i32) -> Option<&StateDef> {
        self.asset
            .as_ref()?
            .layers
            .get(layer)?
            .states
            .iter()
            .find(|s| s.hash == hash)
    }

    /// Puts every layer back into its entry state.
    fn rebind(&mut self) {
        if let Some(staged) = self.staged_asset.take() {
            self.asset = Some(staged);
        }
        self.layers = match &self.asset {
            Some(asset) => asset
                .layers
                .iter()
                .map(|layer| match layer.states.first() {
                    Some(entry) => LayerRuntime {
                        state: entry.hash,
                        normalized_time: 0.0,
                        length: entry.length,
                        looping: entry.looping,
                    },
                    None => LayerRuntime {
                        state: 0,
                        normalized_time: 0.0,
                        length: 0.0,
                        looping: false,
                    },
                })
                .collect(),
            None => Vec::new(),
        };
    }
}

impl AnimationController for SimAnimator {
    type Rig = SceneRig;
    type ControllerAsset = Arc<ControllerAsset>;

    fn layer_count(&self) -> usize {
        self.layers.len()
    }

    fn layer_playback(&self, layer: usize) -> LayerPlayback {
        let runtime = &self.layers[layer];
        LayerPlayback {
            state_hash: runtime.state,
            normalized_time: runtime.normalized_time,
            length: runtime.length,
            looping: runtime.looping,
        }
    }

    fn play(&mut self, state_hash: i32, layer: usize, normalized_time: f32) {
        self.history.push(AnimatorCommand::Play {
            state_hash,
            layer,
            normalized_time,
        });
        let (length, looping) = match self.find_state(layer, state_hash) {
            Some(state) => (state.length, state.looping),
            None => {
                log::warn!("layer {layer} has no state with hash {state_hash}");
                return;
            }
        };
        if let Some(runtime) = self.layers.get_mut(layer) {
            runtime.state = state_hash;
            runtime.normalized_time = normalized_time;
            runtime.length = length;
            runtime.looping = looping;
        }
    }

    fn update(&mut self, delta: f32) {
        self.history.push(AnimatorCommand::Update { delta });
        // Manual updates evaluate even while the component is disabled.
        if self.rig.is_none() {
            return;
        }
        self.pose_evaluations += 1;
        for runtime in &mut self.layers {
            if runtime.length > 0.0 && delta > 0.0 {
                runtime.normalized_time += delta / runtime.length;
            }
        }
    }

    fn enabled(&self) -> bool {
        self.enabled
    }

    fn set_enabled(&mut self, enabled: bool) {
        self.history.push(AnimatorCommand::SetEnabled(enabled));
        self.enabled = enabled;
    }

    fn apply_root_motion(&self) -> bool {
        self.apply_root_motion
    }

    fn set_apply_root_motion(&mut self, apply: bool) {
        self.history.push(AnimatorCommand::SetApplyRootMotion(apply));
        self.apply_root_motion = apply;
    }

    fn update_mode(&self) -> UpdateMode {
        self.update_mode
    }

    fn set_update_mode(&mut self, mode: UpdateMode) {
        self.history.push(AnimatorCommand::SetUpdateMode(mode));
        self.update_mode = mode;
    }

    fn culling_mode(&self) -> CullingMode {
        self.culling_mode
    }

    fn set_culling_mode(&mut self, mode: CullingMode) {
        self.history.push(AnimatorCommand::SetCullingMode(mode));
        self.culling_mode = mode;
    }

    fn has_rig(&self) -> bool {
        self.rig.is_some()
    }

    fn set_rig(&mut self, rig: Option<SceneRig>) {
        let rebind = rig.is_some();
        self.rig = rig;
        if rebind {
            self.rebind();
        }
    }

    fn set_controller_asset(&mut self, asset: Arc<ControllerAsset>) {
        self.asset = Some(asset);
        self.staged_asset = None;
        self.rebind();
    }
}
