use crate::{Scene, SceneSkeleton};
use avatar_rig::{BoneHash, LocalTransform, SkeletonIndex};
use glam::{Quat, Vec3};

fn at(x: f32) -> LocalTransform {
    LocalTransform::new(Vec3::new(x, 0.0, 0.0), Quat::IDENTITY, Vec3::ONE)
}

#[test]
fn depth_first_visits_parents_before_children() {
    let mut scene = Scene::new();
    let root = scene.add_node("root", None, at(0.0));
    let a = scene.add_node("a", Some(root), at(1.0));
    let b = scene.add_node("b", Some(root), at(2.0));
    let a1 = scene.add_node("a1", Some(a), at(3.0));

    assert_eq!(scene.depth_first(root), vec![root, a, a1, b]);
    let names: Vec<_> = scene
        .bone_records(root)
        .into_iter()
        .map(|r| r.name)
        .collect();
    assert_eq!(names, vec!["root", "a", "a1", "b"]);
}

#[test]
fn set_parent_moves_the_subtree() {
    let mut scene = Scene::new();
    let world = scene.add_node("world", None, at(0.0));
    let other = scene.add_node("other", None, at(0.0));
    let child = scene.add_node("child", Some(world), at(5.0));

    scene.set_parent(child, Some(other));
    assert_eq!(scene.parent(child), Some(other));
    assert!(scene.node(world).children().is_empty());
    assert_eq!(scene.node(other).children(), &[child]);
    assert_eq!(scene.find_in_subtree(other, "child"), Some(child));
    assert_eq!(scene.find_in_subtree(world, "child"), None);

    scene.set_parent(child, None);
    assert_eq!(scene.parent(child), None);
    assert!(scene.node(other).children().is_empty());
}

fn small_character() -> SceneSkeleton {
    let mut scene = Scene::new();
    let character = scene.add_node("Character", None, at(0.0));
    let root = scene.add_node("Root", Some(character), at(0.0));
    let hips = scene.add_node("Hips", Some(root), at(1.0));
    let tail = scene.add_node("Tail", Some(hips), at(2.0));
    scene.add_node("TailTip", Some(tail), at(3.0));
    SceneSkeleton::new(scene, character, root)
}

#[test]
fn skeleton_indexes_bones_below_the_root_bone() {
    let skeleton = small_character();
    assert_eq!(skeleton.bone_count(), 3);
    assert!(skeleton.has_bone(BoneHash::of("Hips")));
    assert!(!skeleton.has_bone(BoneHash::of("Root")));
    assert!(!skeleton.has_bone(BoneHash::of("Character")));

    let roots = skeleton.root_bones();
    assert_eq!(roots.outer.name, "Character");
    assert_eq!(roots.inner.name, "Root");
}

#[test]
fn transforms_are_read_live() {
    let mut skeleton = small_character();
    let hips = skeleton.bone("Hips").unwrap();
    skeleton.scene_mut().node_mut(hips).local.position = Vec3::new(0.0, 9.0, 0.0);

    let live = skeleton.bone_transform(BoneHash::of("Hips")).unwrap();
    assert_eq!(live.position, Vec3::new(0.0, 9.0, 0.0));
}

#[test]
fn removing_a_bone_drops_its_descendants() {
    let mut skeleton = small_character();
    assert!(skeleton.remove_bone("Tail"));
    assert!(!skeleton.remove_bone("Tail"));
    assert_eq!(skeleton.bone_count(), 1);
    assert!(!skeleton.has_bone(BoneHash::of("TailTip")));
}

#[test]
fn bind_rotation_overrides_proposed_rotation() {
    let mut skeleton = small_character();
    let proposed = Quat::from_rotation_x(0.2);
    assert_eq!(
        skeleton.corrected_rotation(BoneHash::of("Hips"), proposed),
        proposed
    );

    let bind = Quat::from_rotation_z(1.0);
    skeleton.set_bind_rotation("Hips", bind);
    assert_eq!(skeleton.corrected_rotation(BoneHash::of("Hips"), proposed), bind);
}

#[test]
fn node_ids_are_arena_slots_in_insertion_order() {
    let mut scene = Scene::new();
    let first = scene.add_node("first", None, at(0.0));
    let second = scene.add_node("second", Some(first), at(1.0));

    assert_eq!(first.index(), 0);
    assert_eq!(second.index(), 1);
    scene.detach_subtree(second);
    let third = scene.add_node("third", None, at(2.0));
    assert_eq!(third.index(), 2);
}
