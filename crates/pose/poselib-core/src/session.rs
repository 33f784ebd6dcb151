//! Session: the store of one open document plus the user-facing operators.
//!
//! Operators act on the *active* library and its *selected* pose, the way a host
//! panel drives them, and always return an [`OpReport`] instead of an error.
//! Host state the operators need (rigs, active rig) comes in through [`HostContext`].

use std::path::Path;

use crate::apply::{apply_pose, ApplySummary};
use crate::capture::{capture, CaptureMode};
use crate::config::Preferences;
use crate::error::{PoseError, Result};
use crate::exchange::{export_library, import_library};
use crate::migration::{migrate_legacy, MigrationOutcome, DEFAULT_NEW_LIBRARY_NAME};
use crate::persist::StoreBackend;
use crate::report::OpReport;
use crate::rig::RigSource;
use crate::store::{MoveDirection, SaveOutcome, Store};

/// Host state visible to an operator call.
pub struct HostContext<'a, R: RigSource + ?Sized> {
    pub rigs: &'a mut R,
    /// Rig that is active and in pose mode, if any.
    pub active_rig: Option<String>,
}

impl<'a, R: RigSource + ?Sized> HostContext<'a, R> {
    pub fn new(rigs: &'a mut R) -> Self {
        Self {
            rigs,
            active_rig: None,
        }
    }

    pub fn with_active_rig(mut self, rig: impl Into<String>) -> Self {
        self.active_rig = Some(rig.into());
        self
    }
}

#[derive(Debug, Default)]
pub struct Session {
    pub store: Store,
    pub prefs: Preferences,
}

impl Session {
    pub fn new(store: Store, prefs: Preferences) -> Self {
        Self { store, prefs }
    }

    /// Load the document's store from `backend` and run the legacy migration.
    pub fn open<B: StoreBackend + ?Sized>(backend: &mut B, prefs: Preferences) -> Result<Self> {
        let store = backend.load()?.unwrap_or_default();
        let mut session = Self::new(store, prefs);
        session.on_document_loaded();
        Ok(session)
    }

    /// Hook for the host's document-load event.
    pub fn on_document_loaded(&mut self) -> MigrationOutcome {
        let outcome = migrate_legacy(&mut self.store);
        log::debug!("document loaded: {outcome:?}");
        outcome
    }

    pub fn persist<B: StoreBackend + ?Sized>(&self, backend: &mut B) -> Result<()> {
        backend.save(&self.store)
    }

    fn active_index(&self) -> Result<usize> {
        self.store
            .active_library_index()
            .ok_or(PoseError::NoActiveLibrary)
    }

    fn selected_pose_name(&self) -> Result<String> {
        let library = self.store.library(self.active_index()?)?;
        library
            .selected_pose()
            .map(|p| p.name.clone())
            .ok_or(PoseError::NoPoseSelected)
    }

    /// Add and select a library; a blank name falls back to [`DEFAULT_NEW_LIBRARY_NAME`].
    pub fn add_library(&mut self, name: &str) -> OpReport {
        if name.trim().is_empty() {
            self.store.add_library(DEFAULT_NEW_LIBRARY_NAME);
        } else {
            self.store.add_library(name);
        }
        OpReport::finished()
    }

    pub fn remove_active_library(&mut self) -> OpReport {
        self.try_remove_active_library()
            .unwrap_or_else(OpReport::from)
    }

    fn try_remove_active_library(&mut self) -> Result<OpReport> {
        let index = self.active_index()?;
        self.store.remove_library(index)?;
        Ok(OpReport::info("Pose library deleted."))
    }

    pub fn rename_active_library(&mut self, new_name: &str) -> OpReport {
        let result = self
            .active_index()
            .and_then(|i| self.store.rename_library(i, new_name));
        match result {
            Ok(()) => OpReport::finished(),
            Err(e) => e.into(),
        }
    }

    /// Capture the current rigs into the active library under `name`.
    pub fn save_pose<R: RigSource + ?Sized>(
        &mut self,
        ctx: &HostContext<'_, R>,
        name: &str,
    ) -> OpReport {
        self.try_save_pose(ctx, name).unwrap_or_else(OpReport::from)
    }

    fn try_save_pose<R: RigSource + ?Sized>(
        &mut self,
        ctx: &HostContext<'_, R>,
        name: &str,
    ) -> Result<OpReport> {
        if name.trim().is_empty() {
            return Err(PoseError::EmptyPoseName);
        }
        let library = self.active_index()?;
        let mode = CaptureMode::select(ctx.active_rig.as_deref(), &self.prefs);
        let data = capture(&*ctx.rigs, &mode)?.to_json()?;
        Ok(match self.store.save_pose(library, name, data)? {
            SaveOutcome::Created(_) => OpReport::info(format!("Saved new pose: {name}")),
            SaveOutcome::Updated(_) => OpReport::info(format!("Updated pose: {name}")),
        })
    }

    pub fn load_selected_pose<R: RigSource + ?Sized>(
        &self,
        ctx: &mut HostContext<'_, R>,
    ) -> OpReport {
        match self.selected_pose_name() {
            Ok(name) => self.load_pose(ctx, &name),
            Err(e) => e.into(),
        }
    }

    /// Apply the first pose named `name` from the active library.
    pub fn load_pose<R: RigSource + ?Sized>(
        &self,
        ctx: &mut HostContext<'_, R>,
        name: &str,
    ) -> OpReport {
        match self.try_load_pose(ctx, name) {
            Ok(summary) => {
                log::debug!("loaded '{name}': {summary:?}");
                OpReport::info(format!("Loaded pose: {name}"))
            }
            Err(e) => e.into(),
        }
    }

    fn try_load_pose<R: RigSource + ?Sized>(
        &self,
        ctx: &mut HostContext<'_, R>,
        name: &str,
    ) -> Result<ApplySummary> {
        let library = self.store.library(self.active_index()?)?;
        let pose = library
            .find_pose(name)
            .ok_or_else(|| PoseError::PoseNotFound {
                name: name.to_string(),
            })?;
        let snapshot = pose.snapshot()?;
        Ok(apply_pose(
            &snapshot,
            &mut *ctx.rigs,
            self.prefs.reset_unsaved_bones,
        ))
    }

    pub fn delete_selected_pose(&mut self) -> OpReport {
        match self.selected_pose_name() {
            Ok(name) => self.delete_pose(&name),
            Err(e) => e.into(),
        }
    }

    pub fn delete_pose(&mut self, name: &str) -> OpReport {
        let result = self
            .active_index()
            .and_then(|i| self.store.delete_pose(i, name));
        match result {
            Ok(_) => OpReport::info(format!("Deleted pose: {name}")),
            Err(e) => e.into(),
        }
    }

    /// Move the selected pose of the active library one slot.
    pub fn move_selected_pose(&mut self, direction: MoveDirection) -> OpReport {
        self.try_move_selected_pose(direction)
            .unwrap_or_else(OpReport::from)
    }

    fn try_move_selected_pose(&mut self, direction: MoveDirection) -> Result<OpReport> {
        let library = self.active_index()?;
        let index = self
            .store
            .library(library)?
            .selected
            .ok_or(PoseError::NoPoseSelected)?;
        self.store.move_pose(library, index, direction)?;
        Ok(OpReport::finished())
    }

    pub fn export_active_library(&self, path: impl AsRef<Path>) -> OpReport {
        self.try_export_active_library(path.as_ref())
            .unwrap_or_else(OpReport::from)
    }

    fn try_export_active_library(&self, path: &Path) -> Result<OpReport> {
        let library = self.store.library(self.active_index()?)?;
        export_library(library, path)?;
        Ok(OpReport::info(format!(
            "Pose library '{}' exported successfully.",
            library.name
        )))
    }

    pub fn import_library(&mut self, path: impl AsRef<Path>) -> OpReport {
        match import_library(&mut self.store, path) {
            Ok(index) => OpReport::info(format!(
                "Pose library '{}' imported successfully.",
                self.store.libraries[index].name
            )),
            Err(e) => e.into(),
        }
    }
}
