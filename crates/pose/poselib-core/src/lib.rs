//! Poselib Core (host-agnostic)
//!
//! Libraries of named armature poses: capture live bone transforms into JSON
//! payloads, restore them onto rigs, organise poses into ordered libraries, and
//! move libraries in and out of standalone JSON files. Hosts plug in through
//! [`RigSource`] (rig access) and [`StoreBackend`] (document persistence).

pub mod apply;
pub mod capture;
pub mod config;
pub mod error;
pub mod exchange;
pub mod migration;
pub mod persist;
pub mod report;
pub mod rig;
pub mod session;
pub mod snapshot;
pub mod store;
pub mod transform;

// Re-exports for host adapters
pub use apply::{apply_pose, ApplySummary};
pub use capture::{capture, CaptureMode};
pub use config::Preferences;
pub use error::{PoseError, Result};
pub use exchange::{export_library, import_library, library_to_json, parse_library_json};
pub use migration::{
    migrate_legacy, MigrationOutcome, MigrationState, DEFAULT_LIBRARY_NAME,
    DEFAULT_NEW_LIBRARY_NAME,
};
pub use persist::{JsonFileBackend, MemoryBackend, StoreBackend};
pub use report::{Message, OpReport, OpStatus, ReportLevel};
pub use rig::{MemoryRigs, RigSource};
pub use session::{HostContext, Session};
pub use snapshot::{PoseSnapshot, RigPose};
pub use store::{Library, MoveDirection, Pose, SaveOutcome, Store};
pub use transform::BoneTransform;
