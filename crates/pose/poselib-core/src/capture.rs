//! Capturing live bone transforms into a [`PoseSnapshot`].

use crate::config::Preferences;
use crate::error::{PoseError, Result};
use crate::rig::RigSource;
use crate::snapshot::{PoseSnapshot, RigPose};

/// Which rigs a capture reads.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CaptureMode {
    /// A single rig designated by the host (active and in pose mode).
    Active(String),
    /// Every resolvable rig from a list of names; unresolved names are skipped.
    Named(Vec<String>),
}

impl CaptureMode {
    /// Prefer the host's active rig, else fall back to the preference list.
    pub fn select(active_rig: Option<&str>, prefs: &Preferences) -> Self {
        match active_rig {
            Some(rig) => Self::Active(rig.to_string()),
            None => Self::Named(prefs.default_rig_names()),
        }
    }
}

/// Read every bone of each rig selected by `mode`.
///
/// Fails with [`PoseError::NoRigNames`] for an empty name list and
/// [`PoseError::NoRigsFound`] when nothing resolved.
pub fn capture<S: RigSource + ?Sized>(source: &S, mode: &CaptureMode) -> Result<PoseSnapshot> {
    let mut snapshot = PoseSnapshot::new();
    match mode {
        CaptureMode::Active(rig) => {
            if let Some(bones) = capture_rig(source, rig) {
                snapshot.insert_rig(rig.clone(), bones);
            }
        }
        CaptureMode::Named(names) => {
            if names.is_empty() {
                return Err(PoseError::NoRigNames);
            }
            for rig in names {
                match capture_rig(source, rig) {
                    Some(bones) => snapshot.insert_rig(rig.clone(), bones),
                    None => log::debug!("capture: rig '{rig}' not found, skipping"),
                }
            }
        }
    }

    if snapshot.is_empty() {
        return Err(PoseError::NoRigsFound);
    }
    Ok(snapshot)
}

fn capture_rig<S: RigSource + ?Sized>(source: &S, rig: &str) -> Option<RigPose> {
    let names = source.bone_names(rig)?;
    let mut bones = RigPose::with_capacity(names.len());
    for bone in names {
        if let Some(t) = source.bone_transform(rig, &bone) {
            bones.insert(bone, t);
        }
    }
    Some(bones)
}
