//! Pose payload: rig name → bone name → transform.
//!
//! The payload travels as a JSON string inside [`crate::store::Pose::data`] and inside
//! exported library files, so encoding goes through [`PoseSnapshot::to_json`] /
//! [`PoseSnapshot::from_json`]. Maps keep insertion order so rigs and bones are written
//! in the order they were captured.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::transform::BoneTransform;

/// Bone name → transform for one rig.
pub type RigPose = IndexMap<String, BoneTransform>;

/// Captured transforms for one or more rigs.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
#[serde(transparent)]
pub struct PoseSnapshot {
    pub rigs: IndexMap<String, RigPose>,
}

impl PoseSnapshot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert (or replace) the bones captured for `rig`.
    pub fn insert_rig(&mut self, rig: impl Into<String>, bones: RigPose) {
        self.rigs.insert(rig.into(), bones);
    }

    pub fn rig(&self, rig: &str) -> Option<&RigPose> {
        self.rigs.get(rig)
    }

    pub fn bone(&self, rig: &str, bone: &str) -> Option<&BoneTransform> {
        self.rigs.get(rig).and_then(|bones| bones.get(bone))
    }

    pub fn rig_names(&self) -> impl Iterator<Item = &str> {
        self.rigs.keys().map(String::as_str)
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.rigs.is_empty()
    }

    /// Total number of bone entries across all rigs.
    pub fn bone_count(&self) -> usize {
        self.rigs.values().map(IndexMap::len).sum()
    }

    /// Compact JSON string stored as the pose data.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn from_json(s: &str) -> Result<Self> {
        Ok(serde_json::from_str(s)?)
    }
}
