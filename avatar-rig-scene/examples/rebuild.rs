use avatar_rig::{
    AnimationController, Character, LocalTransform, TemplatePoseAsset, UpdateOptions,
    update_avatar,
};
use avatar_rig_scene::{
    CharacterRigTarget, ControllerAsset, LayerDef, Scene, SceneCharacter, SceneSkeleton, StateDef,
};
use glam::{Quat, Vec3};
use std::sync::Arc;

const TEMPLATE_JSON: &str = r#"
{
  "bones": [
    { "name": "Template(Clone)" },
    { "name": "Root" },
    { "name": "Hips", "position": [0, 1, 0] },
    { "name": "Spine", "position": [0, 0.1, 0] },
    { "name": "Head", "position": [0, 0.5, 0] },
    { "name": "Tail", "position": [0, -0.1, 0] }
  ],
  "human": [
    { "humanName": "Hips", "boneName": "Hips" },
    { "humanName": "Spine", "boneName": "Spine" },
    { "humanName": "Head", "boneName": "Head" }
  ]
}
"#;

fn at(y: f32) -> LocalTransform {
    LocalTransform::new(Vec3::new(0.0, y, 0.0), Quat::IDENTITY, Vec3::ONE)
}

fn main() -> Result<(), avatar_rig::Error> {
    let mut scene = Scene::new();
    let world = scene.add_node("World", None, LocalTransform::IDENTITY);
    let character_root = scene.add_node(
        "Avatar(Clone)",
        Some(world),
        LocalTransform::new(Vec3::new(3.0, 0.0, 1.0), Quat::from_rotation_y(1.2), Vec3::ONE),
    );
    let root = scene.add_node("Root", Some(character_root), LocalTransform::IDENTITY);
    let hips = scene.add_node("Hips", Some(root), at(1.0));
    let spine = scene.add_node("Spine", Some(hips), at(0.1));
    scene.add_node("Head", Some(spine), at(0.5));
    scene.add_node("Tail", Some(hips), at(-0.1));

    let controller = Arc::new(ControllerAsset {
        name: "Avatar".to_string(),
        layers: vec![LayerDef {
            name: "Base".to_string(),
            states: vec![StateDef::new("Idle", 2.0), StateDef::new("Walk", 1.0)],
        }],
    });

    let mut character = SceneCharacter::new(
        SceneSkeleton::new(scene, character_root, root),
        CharacterRigTarget::Humanoid(TemplatePoseAsset::Json(TEMPLATE_JSON.to_string())),
    )
    .with_controller_asset(controller);

    let options = UpdateOptions::default();
    let update = update_avatar(Some(&mut character), &options)?;
    println!("first update: {:?}", update.outcome);

    if let Some(animator) = character.animator_mut() {
        let walk = StateDef::new("Walk", 1.0).hash;
        animator.play(walk, 0, 0.25);
        animator.update(0.5);
        println!(
            "layer 0 before rebuild: {:?}",
            animator.layer_playback(0)
        );
    }

    character.skeleton_mut().remove_bone("Tail");
    let update = update_avatar(Some(&mut character), &options)?;
    println!("second update: {:?}", update.outcome);
    for diagnostic in &update.diagnostics {
        println!("  {diagnostic}");
    }

    if let Some(animator) = character.animator() {
        println!("layer 0 after rebuild: {:?}", animator.layer_playback(0));
        if let Some(descriptor) = animator.rig().and_then(|rig| rig.descriptor()) {
            let names: Vec<_> = descriptor.skeleton.iter().map(|b| b.name.as_str()).collect();
            println!("rig skeleton: {names:?}");
        }
    }
    Ok(())
}
