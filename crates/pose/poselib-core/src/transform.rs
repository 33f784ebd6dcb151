//! Per-bone local transform.

use serde::{Deserialize, Serialize};

/// Local transform of a single bone: translation, scalar-first quaternion, scale.
///
/// Values are stored as given; the quaternion is not normalized here.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq)]
pub struct BoneTransform {
    pub location: [f32; 3],
    /// Quaternion as `[w, x, y, z]`.
    pub rotation_quaternion: [f32; 4],
    pub scale: [f32; 3],
}

impl BoneTransform {
    /// Rest transform used when resetting bones that a pose does not cover.
    pub const IDENTITY: Self = Self {
        location: [0.0, 0.0, 0.0],
        rotation_quaternion: [1.0, 0.0, 0.0, 0.0],
        scale: [1.0, 1.0, 1.0],
    };

    pub fn new(location: [f32; 3], rotation_quaternion: [f32; 4], scale: [f32; 3]) -> Self {
        Self {
            location,
            rotation_quaternion,
            scale,
        }
    }

    #[inline]
    pub fn is_identity(&self) -> bool {
        *self == Self::IDENTITY
    }

    /// True when every component is a finite number.
    pub fn is_finite(&self) -> bool {
        self.location
            .iter()
            .chain(self.rotation_quaternion.iter())
            .chain(self.scale.iter())
            .all(|c| c.is_finite())
    }
}

impl Default for BoneTransform {
    fn default() -> Self {
        Self::IDENTITY
    }
}
