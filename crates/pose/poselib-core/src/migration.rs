//! One-way upgrade from the flat single-library pose list.
//!
//! `NotMigrated → Migrated` happens at most once per document. The move only fires
//! while the store has no libraries, so existing user libraries are never touched.

use serde::{Deserialize, Serialize};

use crate::store::{Library, Store};

/// Name of the library created from legacy poses.
pub const DEFAULT_LIBRARY_NAME: &str = "Default Library";

/// Name given to a library added without one.
pub const DEFAULT_NEW_LIBRARY_NAME: &str = "New Library";

#[derive(Copy, Clone, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum MigrationState {
    #[default]
    NotMigrated,
    Migrated,
}

/// What [`migrate_legacy`] did.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum MigrationOutcome {
    /// Legacy poses moved into a new library at this index.
    Migrated { library: usize, poses: usize },
    AlreadyMigrated,
    /// No legacy poses present.
    NothingToMigrate,
    /// The store already holds libraries; legacy data is left as is.
    LibrariesPresent,
}

/// Move the legacy flat list into [`DEFAULT_LIBRARY_NAME`] if the guard allows it.
pub fn migrate_legacy(store: &mut Store) -> MigrationOutcome {
    if store.migration == MigrationState::Migrated {
        return MigrationOutcome::AlreadyMigrated;
    }
    if store.legacy_poses.is_empty() {
        return MigrationOutcome::NothingToMigrate;
    }
    if !store.libraries.is_empty() {
        log::debug!(
            "migration: {} legacy poses kept, store already has {} libraries",
            store.legacy_poses.len(),
            store.libraries.len()
        );
        return MigrationOutcome::LibrariesPresent;
    }

    let poses = std::mem::take(&mut store.legacy_poses);
    let count = poses.len();
    let library = store.push_library(Library::with_poses(DEFAULT_LIBRARY_NAME, poses));
    store.migration = MigrationState::Migrated;
    log::info!("migration: moved {count} legacy poses into '{DEFAULT_LIBRARY_NAME}'");

    MigrationOutcome::Migrated {
        library,
        poses: count,
    }
}
