use crate::{BoneHash, Diagnostics, RigDescriptor};
use std::collections::{HashMap, HashSet};

/// Checks that every human mapping points at a bone present in the descriptor's skeleton.
///
/// Diagnostic only: unresolved mappings are reported as warnings and the descriptor is left
/// untouched. Returns the number of unresolved mappings.
pub fn validate_human_mapping(descriptor: &RigDescriptor, diagnostics: &mut Diagnostics) -> usize {
    let skeleton: HashSet<BoneHash> = descriptor
        .skeleton
        .iter()
        .map(|b| BoneHash::of(&b.name))
        .collect();

    let mut unresolved = 0;
    let mut seen_roles: HashMap<&str, &str> = HashMap::new();
    for mapping in &descriptor.human {
        if !skeleton.contains(&BoneHash::of(&mapping.bone_name)) {
            unresolved += 1;
            diagnostics.warn(format!(
                "human bone '{}' maps to '{}', which is not in the rig skeleton",
                mapping.human_name, mapping.bone_name
            ));
        }
        if let Some(previous) = seen_roles.insert(&mapping.human_name, &mapping.bone_name) {
            diagnostics.warn(format!(
                "human bone '{}' is mapped twice ('{}' and '{}')",
                mapping.human_name, previous, mapping.bone_name
            ));
        }
    }
    unresolved
}
