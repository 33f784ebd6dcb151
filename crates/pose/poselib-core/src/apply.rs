//! Restoring a [`PoseSnapshot`] onto live rigs.

use serde::{Deserialize, Serialize};

use crate::rig::RigSource;
use crate::snapshot::PoseSnapshot;
use crate::transform::BoneTransform;

/// Counts produced by [`apply_pose`]. Bone counts only include writes the host accepted.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct ApplySummary {
    /// Rigs from the payload that resolved on the host.
    pub rigs_applied: usize,
    /// Rig names from the payload that did not resolve.
    pub rigs_skipped: Vec<String>,
    pub bones_set: usize,
    pub bones_reset: usize,
}

/// Write the saved transforms onto each rig named in `snapshot`.
///
/// Drives off the rig's live bone list, not the saved one: saved bones the rig no
/// longer has are ignored, and live bones the pose does not mention are reset to
/// [`BoneTransform::IDENTITY`] when `reset_unsaved_bones` is set, else left alone.
pub fn apply_pose<T: RigSource + ?Sized>(
    snapshot: &PoseSnapshot,
    target: &mut T,
    reset_unsaved_bones: bool,
) -> ApplySummary {
    let mut summary = ApplySummary::default();

    for (rig, saved) in &snapshot.rigs {
        let Some(live_bones) = target.bone_names(rig) else {
            log::warn!("apply: rig '{rig}' not found, skipping");
            summary.rigs_skipped.push(rig.clone());
            continue;
        };

        for bone in &live_bones {
            if let Some(t) = saved.get(bone) {
                if target.set_bone_transform(rig, bone, *t) {
                    summary.bones_set += 1;
                } else {
                    log::warn!("apply: could not write bone '{bone}' on rig '{rig}'");
                }
            } else if reset_unsaved_bones {
                if target.set_bone_transform(rig, bone, BoneTransform::IDENTITY) {
                    summary.bones_reset += 1;
                } else {
                    log::warn!("apply: could not reset bone '{bone}' on rig '{rig}'");
                }
            }
        }
        summary.rigs_applied += 1;
    }

    summary
}
