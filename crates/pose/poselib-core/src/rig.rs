//! Host rig access.
//!
//! The core never walks a scene graph itself. Hosts implement [`RigSource`] over their
//! own armature objects and pass it into capture/apply. [`MemoryRigs`] is a plain
//! in-memory implementation for hosts that keep rigs outside a scene and for tests.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::transform::BoneTransform;

/// Read/write view over the rigs a host exposes.
pub trait RigSource {
    /// Names of every rig the host can resolve.
    fn rig_names(&self) -> Vec<String>;

    /// Live bone names of `rig` in host order, or `None` if the name does not
    /// resolve to a rig.
    fn bone_names(&self, rig: &str) -> Option<Vec<String>>;

    fn bone_transform(&self, rig: &str, bone: &str) -> Option<BoneTransform>;

    /// Write a bone transform. Returns false when the rig or bone does not exist.
    fn set_bone_transform(&mut self, rig: &str, bone: &str, transform: BoneTransform) -> bool;
}

/// Rigs held in memory, bones kept in insertion order.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
#[serde(transparent)]
pub struct MemoryRigs {
    rigs: IndexMap<String, IndexMap<String, BoneTransform>>,
}

impl MemoryRigs {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a rig whose bones all start at the identity transform.
    pub fn add_rig<I, S>(&mut self, rig: impl Into<String>, bones: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let bones = bones
            .into_iter()
            .map(|b| (b.into(), BoneTransform::IDENTITY))
            .collect();
        self.rigs.insert(rig.into(), bones);
    }

    /// Builder form of [`MemoryRigs::add_rig`].
    pub fn with_rig<I, S>(mut self, rig: impl Into<String>, bones: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.add_rig(rig, bones);
        self
    }

    pub fn remove_rig(&mut self, rig: &str) -> bool {
        self.rigs.shift_remove(rig).is_some()
    }

    pub fn bones(&self, rig: &str) -> Option<&IndexMap<String, BoneTransform>> {
        self.rigs.get(rig)
    }
}

impl RigSource for MemoryRigs {
    fn rig_names(&self) -> Vec<String> {
        self.rigs.keys().cloned().collect()
    }

    fn bone_names(&self, rig: &str) -> Option<Vec<String>> {
        self.rigs.get(rig).map(|bones| bones.keys().cloned().collect())
    }

    fn bone_transform(&self, rig: &str, bone: &str) -> Option<BoneTransform> {
        self.rigs.get(rig)?.get(bone).copied()
    }

    fn set_bone_transform(&mut self, rig: &str, bone: &str, transform: BoneTransform) -> bool {
        match self.rigs.get_mut(rig).and_then(|bones| bones.get_mut(bone)) {
            Some(slot) => {
                *slot = transform;
                true
            }
            None => false,
        }
    }
}
