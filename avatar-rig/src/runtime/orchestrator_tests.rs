use crate::runtime::{
    AnimationController, Character, CullingMode, LayerPlayback, Outcome, RigTarget, UpdateMode,
    UpdateOptions, update_avatar,
};
use crate::{
    BoneRecord, Error, HumanMapping, LocalTransform, MapSkeletonIndex, NamedTransform,
    RigDescriptor, RigTuning, RootBones, TemplatePose, TemplatePoseAsset,
};
use glam::{Quat, Vec3};

#[derive(Clone, Debug, PartialEq)]
enum TestRig {
    Humanoid(RigDescriptor),
    Generic(String),
}

#[derive(Default)]
struct TestAnimator {
    rig: Option<TestRig>,
    asset: Option<&'static str>,
    layers: Vec<LayerPlayback>,
    plays: Vec<(i32, usize, f32)>,
    updates: usize,
    enabled: bool,
}

impl AnimationController for TestAnimator {
    type Rig = TestRig;
    type ControllerAsset = &'static str;

    fn layer_count(&self) -> usize {
        self.layers.len()
    }

    fn layer_playback(&self, layer: usize) -> LayerPlayback {
        self.layers[layer]
    }

    fn play(&mut self, state_hash: i32, layer: usize, normalized_time: f32) {
        self.plays.push((state_hash, layer, normalized_time));
    }

    fn update(&mut self, _delta: f32) {
        self.updates += 1;
    }

    fn enabled(&self) -> bool {
        self.enabled
    }

    fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    fn apply_root_motion(&self) -> bool {
        false
    }

    fn set_apply_root_motion(&mut self, _apply: bool) {}

    fn update_mode(&self) -> UpdateMode {
        UpdateMode::Normal
    }

    fn set_update_mode(&mut self, _mode: UpdateMode) {}

    fn culling_mode(&self) -> CullingMode {
        CullingMode::AlwaysAnimate
    }

    fn set_culling_mode(&mut self, _mode: CullingMode) {}

    fn has_rig(&self) -> bool {
        self.rig.is_some()
    }

    fn set_rig(&mut self, rig: Option<TestRig>) {
        self.rig = rig;
    }

    fn set_controller_asset(&mut self, asset: &'static str) {
        self.asset = Some(asset);
    }
}

struct TestCharacter {
    skeleton: MapSkeletonIndex,
    template: TemplatePoseAsset,
    generic: bool,
    asset: Option<&'static str>,
    parent: Option<u32>,
    position: Vec3,
    rotation: Quat,
    animator: Option<TestAnimator>,
    // Local position observed when a rig was built.
    built_at: Vec<Vec3>,
    events: Vec<&'static str>,
}

impl TestCharacter {
    fn new() -> Self {
        let mut skeleton = MapSkeletonIndex::new();
        skeleton.insert("Hips", LocalTransform::IDENTITY);
        skeleton.insert("Spine", LocalTransform::IDENTITY);
        let template = TemplatePose {
            bones: ["Outer", "Inner", "Hips", "Spine"]
                .iter()
                .map(|n| BoneRecord::new(*n, LocalTransform::IDENTITY))
                .collect(),
            human: vec![HumanMapping::new("Hips", "Hips")],
            tuning: RigTuning::default(),
        };
        Self {
            skeleton,
            template: template.into(),
            generic: false,
            asset: Some("locomotion"),
            parent: Some(7),
            position: Vec3::new(1.0, 2.0, 3.0),
            rotation: Quat::from_rotation_y(0.5),
            animator: None,
            built_at: Vec::new(),
            events: Vec::new(),
        }
    }
}

impl Character for TestCharacter {
    type Skeleton = MapSkeletonIndex;
    type Controller = TestAnimator;
    type Parent = u32;

    fn skeleton(&self) -> &MapSkeletonIndex {
        &self.skeleton
    }

    fn root_bones(&self) -> RootBones {
        RootBones {
            outer: NamedTransform::new(
                "Character",
                LocalTransform::new(self.position, self.rotation, Vec3::ONE),
            ),
            inner: NamedTransform::new("Root", LocalTransform::IDENTITY),
        }
    }

    fn rig_target(&self) -> RigTarget<'_> {
        if self.generic {
            RigTarget::Generic {
                root_motion_bone: "Hips",
            }
        } else {
            RigTarget::Humanoid {
                template: &self.template,
            }
        }
    }

    fn controller_asset(&self) -> Option<&'static str> {
        self.asset
    }

    fn detach_from_parent(&mut self) -> Option<u32> {
        self.events.push("detach");
        self.parent.take()
    }

    fn attach_to_parent(&mut self, parent: Option<u32>) {
        self.events.push("attach");
        self.parent = parent;
    }

    fn local_position(&self) -> Vec3 {
        self.position
    }

    fn set_local_position(&mut self, position: Vec3) {
        self.position = position;
    }

    fn local_rotation(&self) -> Quat {
        self.rotation
    }

    fn set_local_rotation(&mut self, rotation: Quat) {
        self.rotation = rotation;
    }

    fn animator_mut(&mut self) -> Option<&mut TestAnimator> {
        self.animator.as_mut()
    }

    fn add_animator(&mut self) -> &mut TestAnimator {
        self.events.push("add_animator");
        self.animator.insert(TestAnimator {
            enabled: true,
            ..TestAnimator::default()
        })
    }

    fn build_humanoid_rig(&mut self, descriptor: &RigDescriptor) -> Result<TestRig, Error> {
        self.events.push("build");
        self.built_at.push(self.position);
        Ok(TestRig::Humanoid(descriptor.clone()))
    }

    fn build_generic_rig(&mut self, root_motion_bone: &str) -> Result<TestRig, Error> {
        self.events.push("build");
        self.built_at.push(self.position);
        Ok(TestRig::Generic(root_motion_bone.to_string()))
    }
}

#[test]
fn absent_character_is_a_no_op() {
    let update = update_avatar::<TestCharacter>(None, &UpdateOptions::default()).unwrap();
    assert_eq!(update.outcome, Outcome::NoCharacter);
    assert!(update.diagnostics.is_empty());
}

#[test]
fn missing_controller_asset_warns_and_leaves_character_untouched() {
    let mut character = TestCharacter::new();
    character.asset = None;

    let update = update_avatar(Some(&mut character), &UpdateOptions::default()).unwrap();
    assert_eq!(update.outcome, Outcome::MissingControllerAsset);
    assert!(update.diagnostics.has_warnings());
    assert!(character.events.is_empty());
    assert_eq!(character.parent, Some(7));
    assert!(character.animator.is_none());
}

#[test]
fn first_update_creates_animator_in_canonical_pose() {
    let mut character = TestCharacter::new();
    let position = character.position;
    let rotation = character.rotation;

    let update = update_avatar(Some(&mut character), &UpdateOptions::default()).unwrap();
    assert_eq!(update.outcome, Outcome::Created);
    assert_eq!(
        character.events,
        vec!["detach", "build", "add_animator", "attach"]
    );
    assert_eq!(character.built_at, vec![Vec3::ZERO]);
    assert_eq!(character.parent, Some(7));
    assert_eq!(character.position, position);
    assert_eq!(character.rotation, rotation);

    let animator = character.animator.as_ref().unwrap();
    assert_eq!(animator.asset, Some("locomotion"));
    let Some(TestRig::Humanoid(descriptor)) = &animator.rig else {
        panic!("expected humanoid rig, got {:?}", animator.rig);
    };
    let names: Vec<_> = descriptor.skeleton.iter().map(|b| b.name.as_str()).collect();
    assert_eq!(names, vec!["Character", "Root", "Hips", "Spine"]);
    // Root carrier reflects the canonical pose, not the parented one.
    assert_eq!(descriptor.skeleton[0].position, Vec3::ZERO);
}

#[test]
fn rebuild_replays_captured_layers() {
    let mut character = TestCharacter::new();
    update_avatar(Some(&mut character), &UpdateOptions::default()).unwrap();
    character.animator.as_mut().unwrap().layers = vec![LayerPlayback {
        state_hash: 10,
        normalized_time: 0.42,
        length: 1.0,
        looping: true,
    }];

    let options = UpdateOptions {
        frame_delta: 0.05,
        ..UpdateOptions::default()
    };
    let update = update_avatar(Some(&mut character), &options).unwrap();
    assert_eq!(update.outcome, Outcome::Rebuilt { replayed: true });

    let animator = character.animator.as_ref().unwrap();
    assert_eq!(animator.plays.len(), 1);
    assert_eq!(animator.plays[0].0, 10);
    assert!((animator.plays[0].2 - 0.37).abs() < 1.0e-6);
    assert_eq!(animator.updates, 1);
}

#[test]
fn generic_target_bypasses_reconciliation() {
    let mut character = TestCharacter::new();
    character.generic = true;
    // A template that could never reconcile must not matter for generic rigs.
    character.template = TemplatePose::default().into();

    let update = update_avatar(Some(&mut character), &UpdateOptions::default()).unwrap();
    assert_eq!(update.outcome, Outcome::Created);
    assert_eq!(
        character.animator.as_ref().unwrap().rig,
        Some(TestRig::Generic("Hips".to_string()))
    );
}

#[test]
fn failed_rebuild_reattaches_and_keeps_previous_rig() {
    let mut character = TestCharacter::new();
    update_avatar(Some(&mut character), &UpdateOptions::default()).unwrap();
    let previous = character.animator.as_ref().unwrap().rig.clone();
    let position = character.position;

    character.template = TemplatePose {
        bones: vec![BoneRecord::new("Nowhere", LocalTransform::IDENTITY)],
        ..TemplatePose::default()
    }
    .into();

    let err = update_avatar(Some(&mut character), &UpdateOptions::default()).unwrap_err();
    assert!(matches!(err, Error::NoResolvableBone { template_len: 1 }));
    assert_eq!(character.parent, Some(7));
    assert_eq!(character.position, position);
    assert_eq!(character.animator.as_ref().unwrap().rig, previous);
}

#[test]
fn keep_avatar_skips_rebuild_when_rig_installed() {
    let mut character = TestCharacter::new();
    update_avatar(Some(&mut character), &UpdateOptions::default()).unwrap();
    character.events.clear();

    let options = UpdateOptions {
        keep_avatar: true,
        ..UpdateOptions::default()
    };
    let update = update_avatar(Some(&mut character), &options).unwrap();
    assert_eq!(update.outcome, Outcome::Kept);
    assert!(character.events.is_empty());
}

#[test]
fn unresolved_human_mapping_is_reported_not_fatal() {
    let mut character = TestCharacter::new();
    character.template = TemplatePose {
        bones: ["Outer", "Inner", "Hips"]
            .iter()
            .map(|n| BoneRecord::new(*n, LocalTransform::IDENTITY))
            .collect(),
        human: vec![HumanMapping::new("Head", "Head")],
        tuning: RigTuning::default(),
    }
    .into();

    let update = update_avatar(Some(&mut character), &UpdateOptions::default()).unwrap();
    assert_eq!(update.outcome, Outcome::Created);
    assert_eq!(update.diagnostics.warnings().count(), 1);

    let options = UpdateOptions {
        validate_mapping: false,
        ..UpdateOptions::default()
    };
    let update = update_avatar(Some(&mut character), &options).unwrap();
    assert!(!update.diagnostics.has_warnings());
}

#[test]
fn invalid_frame_delta_is_rejected_before_touching_character() {
    let mut character = TestCharacter::new();
    let options = UpdateOptions {
        frame_delta: f32::NAN,
        ..UpdateOptions::default()
    };

    let err = update_avatar(Some(&mut character), &options).unwrap_err();
    assert!(matches!(err, Error::InvalidValue { .. }));
    assert!(character.events.is_empty());
    assert!(character.animator.is_none());
}
