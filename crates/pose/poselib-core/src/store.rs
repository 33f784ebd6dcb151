//! In-memory pose store: ordered libraries of ordered, named poses.
//!
//! Selections are `Option<usize>` and are kept in range by every mutation. Pose
//! names are not forced unique; lookups return the first match (case-sensitive).
//! Every operation validates its arguments before touching any state.

use serde::{Deserialize, Serialize};

use crate::error::{PoseError, Result};
use crate::migration::MigrationState;
use crate::snapshot::PoseSnapshot;

/// A named pose; `data` is the JSON-encoded [`PoseSnapshot`].
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Pose {
    pub name: String,
    pub data: String,
}

impl Pose {
    pub fn new(name: impl Into<String>, data: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            data: data.into(),
        }
    }

    /// Decode the stored payload.
    pub fn snapshot(&self) -> Result<PoseSnapshot> {
        PoseSnapshot::from_json(&self.data)
    }
}

/// Direction for [`Store::move_pose`].
#[derive(Copy, Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum MoveDirection {
    Up,
    Down,
}

/// Result of [`Store::save_pose`].
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum SaveOutcome {
    /// A new pose was appended at this index and selected.
    Created(usize),
    /// The first pose with the same name was overwritten in place.
    Updated(usize),
}

impl SaveOutcome {
    pub fn index(self) -> usize {
        match self {
            Self::Created(i) | Self::Updated(i) => i,
        }
    }
}

#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Library {
    pub name: String,
    #[serde(default)]
    pub poses: Vec<Pose>,
    #[serde(default)]
    pub selected: Option<usize>,
}

impl Library {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            poses: Vec::new(),
            selected: None,
        }
    }

    /// Library pre-filled with `poses`, first pose selected.
    pub fn with_poses(name: impl Into<String>, poses: Vec<Pose>) -> Self {
        let selected = if poses.is_empty() { None } else { Some(0) };
        Self {
            name: name.into(),
            poses,
            selected,
        }
    }

    pub fn position(&self, name: &str) -> Option<usize> {
        self.poses.iter().position(|p| p.name == name)
    }

    pub fn find_pose(&self, name: &str) -> Option<&Pose> {
        self.poses.iter().find(|p| p.name == name)
    }

    pub fn selected_pose(&self) -> Option<&Pose> {
        self.selected.and_then(|i| self.poses.get(i))
    }

    /// Select the pose at `index`.
    pub fn select(&mut self, index: usize) -> Result<()> {
        if index >= self.poses.len() {
            return Err(PoseError::NoPoseSelected);
        }
        self.selected = Some(index);
        Ok(())
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.poses.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.poses.is_empty()
    }

    fn clamp_selection(&mut self) {
        self.selected = match (self.selected, self.poses.len()) {
            (_, 0) => None,
            (Some(i), n) => Some(i.min(n - 1)),
            (None, _) => None,
        };
    }
}

/// All libraries of one document/session.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Store {
    #[serde(default)]
    pub libraries: Vec<Library>,
    #[serde(default)]
    pub selected: Option<usize>,
    /// Flat pose list written by the single-library format.
    #[serde(default)]
    pub legacy_poses: Vec<Pose>,
    #[serde(default)]
    pub migration: MigrationState,
}

impl Store {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn library(&self, index: usize) -> Result<&Library> {
        self.libraries
            .get(index)
            .ok_or(PoseError::LibraryNotFound { index })
    }

    pub fn library_mut(&mut self, index: usize) -> Result<&mut Library> {
        self.libraries
            .get_mut(index)
            .ok_or(PoseError::LibraryNotFound { index })
    }

    /// Index of the selected library, if it is in range.
    pub fn active_library_index(&self) -> Option<usize> {
        self.selected.filter(|&i| i < self.libraries.len())
    }

    pub fn active_library(&self) -> Option<&Library> {
        self.active_library_index().map(|i| &self.libraries[i])
    }

    pub fn select_library(&mut self, index: usize) -> Result<()> {
        self.library(index)?;
        self.selected = Some(index);
        Ok(())
    }

    /// Append a library and select it.
    pub fn add_library(&mut self, name: impl Into<String>) -> usize {
        self.push_library(Library::new(name))
    }

    /// Append an existing library and select it.
    pub fn push_library(&mut self, library: Library) -> usize {
        self.libraries.push(library);
        let index = self.libraries.len() - 1;
        self.selected = Some(index);
        index
    }

    /// Remove the library at `index`.
    ///
    /// A selection below the removed library keeps pointing at the same library;
    /// removing the selected one moves it to the nearest remaining neighbour.
    pub fn remove_library(&mut self, index: usize) -> Result<Library> {
        self.library(index)?;
        let removed = self.libraries.remove(index);
        let len = self.libraries.len();
        self.selected = match self.selected {
            _ if len == 0 => None,
            Some(sel) if index < sel => Some(sel - 1),
            Some(sel) if index == sel => Some(index.min(len - 1)),
            Some(sel) => Some(sel.min(len - 1)),
            None => None,
        };
        Ok(removed)
    }

    pub fn rename_library(&mut self, index: usize, new_name: impl Into<String>) -> Result<()> {
        self.library_mut(index)?.name = new_name.into();
        Ok(())
    }

    /// Overwrite the first pose named `name`, or append (and select) a new one.
    pub fn save_pose(
        &mut self,
        library_index: usize,
        name: &str,
        data: impl Into<String>,
    ) -> Result<SaveOutcome> {
        let library = self.library_mut(library_index)?;
        let data = data.into();
        match library.position(name) {
            Some(i) => {
                library.poses[i].data = data;
                Ok(SaveOutcome::Updated(i))
            }
            None => {
                library.poses.push(Pose::new(name, data));
                let i = library.poses.len() - 1;
                library.selected = Some(i);
                Ok(SaveOutcome::Created(i))
            }
        }
    }

    /// Remove the first pose named `name`.
    pub fn delete_pose(&mut self, library_index: usize, name: &str) -> Result<Pose> {
        let library = self.library_mut(library_index)?;
        let index = library.position(name).ok_or_else(|| PoseError::PoseNotFound {
            name: name.to_string(),
        })?;
        let removed = library.poses.remove(index);
        if let Some(sel) = library.selected {
            if index < sel {
                library.selected = Some(sel - 1);
            }
        }
        library.clamp_selection();
        Ok(removed)
    }

    /// Swap the pose at `index` with its neighbour; the selection follows it.
    ///
    /// At the first (`Up`) or last (`Down`) position nothing changes. Returns the
    /// pose's index after the move.
    pub fn move_pose(
        &mut self,
        library_index: usize,
        index: usize,
        direction: MoveDirection,
    ) -> Result<usize> {
        let library = self.library_mut(library_index)?;
        let len = library.poses.len();
        if index >= len {
            return Err(PoseError::NoPoseSelected);
        }
        let target = match direction {
            MoveDirection::Up if index > 0 => index - 1,
            MoveDirection::Down if index + 1 < len => index + 1,
            _ => return Ok(index),
        };
        library.poses.swap(index, target);
        library.selected = Some(target);
        Ok(target)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store_with(names: &[&str]) -> Store {
        let mut store = Store::new();
        let lib = store.add_library("A");
        for name in names {
            store.save_pose(lib, name, format!("{{\"{name}\":{{}}}}")).unwrap();
        }
        store
    }

    fn names(store: &Store) -> Vec<&str> {
        store.libraries[0]
            .poses
            .iter()
            .map(|p| p.name.as_str())
            .collect()
    }

    #[test]
    fn add_library_selects_it() {
        let mut store = Store::new();
        assert_eq!(store.add_library("A"), 0);
        assert_eq!(store.add_library("B"), 1);
        assert_eq!(store.active_library().unwrap().name, "B");
    }

    #[test]
    fn remove_library_clamps_selection() {
        let mut store = Store::new();
        store.add_library("A");
        store.add_library("B");
        store.add_library("C");

        let removed = store.remove_library(2).unwrap();
        assert_eq!(removed.name, "C");
        assert_eq!(store.selected, Some(1));

        store.remove_library(0).unwrap();
        assert_eq!(store.selected, Some(0));
        assert_eq!(store.active_library().unwrap().name, "B");

        store.remove_library(0).unwrap();
        assert_eq!(store.selected, None);
        assert!(store.active_library().is_none());
    }

    #[test]
    fn removing_another_library_keeps_the_selected_one() {
        let mut store = Store::new();
        store.add_library("A");
        store.add_library("B");
        store.add_library("C");

        store.remove_library(0).unwrap();
        assert_eq!(store.selected, Some(1));
        assert_eq!(store.active_library().unwrap().name, "C");

        store.select_library(0).unwrap();
        store.remove_library(1).unwrap();
        assert_eq!(store.selected, Some(0));
        assert_eq!(store.active_library().unwrap().name, "B");
    }

    #[test]
    fn remove_library_out_of_range() {
        let mut store = store_with(&["idle"]);
        let err = store.remove_library(3).unwrap_err();
        assert!(matches!(err, PoseError::LibraryNotFound { index: 3 }));
        assert_eq!(store.libraries.len(), 1);
        assert_eq!(store.selected, Some(0));
    }

    #[test]
    fn explicit_selection_is_range_checked() {
        let mut store = store_with(&["a", "b"]);
        store.add_library("B");
        store.select_library(0).unwrap();
        assert_eq!(store.active_library().unwrap().name, "A");
        assert!(store.select_library(2).is_err());
        assert_eq!(store.selected, Some(0));

        store.libraries[0].select(0).unwrap();
        assert_eq!(store.libraries[0].selected_pose().unwrap().name, "a");
        assert!(matches!(
            store.libraries[0].select(2),
            Err(PoseError::NoPoseSelected)
        ));
    }

    #[test]
    fn rename_library() {
        let mut store = store_with(&[]);
        store.rename_library(0, "Faces").unwrap();
        assert_eq!(store.libraries[0].name, "Faces");
        assert!(store.rename_library(1, "X").is_err());
    }

    #[test]
    fn save_new_name_appends_and_selects() {
        let mut store = store_with(&["idle", "walk"]);
        store.libraries[0].selected = Some(0);
        let outcome = store.save_pose(0, "run", "{}").unwrap();
        assert_eq!(outcome, SaveOutcome::Created(2));
        assert_eq!(names(&store), vec!["idle", "walk", "run"]);
        assert_eq!(store.libraries[0].selected, Some(2));
    }

    #[test]
    fn save_existing_name_overwrites_in_place() {
        let mut store = store_with(&["idle", "walk", "run"]);
        store.libraries[0].selected = Some(2);
        let outcome = store.save_pose(0, "walk", "{\"new\":{}}").unwrap();
        assert_eq!(outcome, SaveOutcome::Updated(1));
        assert_eq!(names(&store), vec!["idle", "walk", "run"]);
        assert_eq!(store.libraries[0].poses[1].data, "{\"new\":{}}");
        assert_eq!(store.libraries[0].selected, Some(2));
    }

    #[test]
    fn duplicate_names_first_match_wins() {
        let mut store = Store::new();
        store.push_library(Library::with_poses(
            "dupes",
            vec![Pose::new("a", "1"), Pose::new("a", "2")],
        ));
        store.save_pose(0, "a", "3").unwrap();
        assert_eq!(store.libraries[0].poses[0].data, "3");
        assert_eq!(store.libraries[0].poses[1].data, "2");

        let removed = store.delete_pose(0, "a").unwrap();
        assert_eq!(removed.data, "3");
        assert_eq!(store.libraries[0].find_pose("a").unwrap().data, "2");
    }

    #[test]
    fn lookups_are_case_sensitive() {
        let store = store_with(&["Idle"]);
        assert!(store.libraries[0].find_pose("idle").is_none());
        assert!(store.libraries[0].find_pose("Idle").is_some());
    }

    #[test]
    fn delete_missing_pose_leaves_library_unchanged() {
        let mut store = store_with(&["idle", "walk"]);
        let before = store.clone();
        let err = store.delete_pose(0, "jump").unwrap_err();
        assert!(matches!(err, PoseError::PoseNotFound { ref name } if name == "jump"));
        assert_eq!(store, before);
    }

    #[test]
    fn delete_keeps_selection_valid() {
        let mut store = store_with(&["a", "b", "c"]);
        store.libraries[0].selected = Some(2);
        store.delete_pose(0, "c").unwrap();
        assert_eq!(store.libraries[0].selected, Some(1));

        store.delete_pose(0, "a").unwrap();
        assert_eq!(store.libraries[0].selected, Some(0));
        assert_eq!(store.libraries[0].selected_pose().unwrap().name, "b");

        store.delete_pose(0, "b").unwrap();
        assert_eq!(store.libraries[0].selected, None);
    }

    #[test]
    fn move_up_at_top_and_down_at_bottom_are_noops() {
        let mut store = store_with(&["a", "b", "c"]);
        store.libraries[0].selected = Some(1);
        assert_eq!(store.move_pose(0, 0, MoveDirection::Up).unwrap(), 0);
        assert_eq!(store.move_pose(0, 2, MoveDirection::Down).unwrap(), 2);
        assert_eq!(names(&store), vec!["a", "b", "c"]);
        assert_eq!(store.libraries[0].selected, Some(1));
    }

    #[test]
    fn move_swaps_and_selection_follows() {
        let mut store = store_with(&["a", "b", "c"]);
        assert_eq!(store.move_pose(0, 0, MoveDirection::Down).unwrap(), 1);
        assert_eq!(names(&store), vec!["b", "a", "c"]);
        assert_eq!(store.libraries[0].selected, Some(1));

        assert_eq!(store.move_pose(0, 2, MoveDirection::Up).unwrap(), 1);
        assert_eq!(names(&store), vec!["b", "c", "a"]);
        assert_eq!(store.libraries[0].selected, Some(1));
    }

    #[test]
    fn move_out_of_range_index_fails() {
        let mut store = store_with(&["a"]);
        assert!(store.move_pose(0, 5, MoveDirection::Up).is_err());
        assert!(store.move_pose(4, 0, MoveDirection::Up).is_err());
    }

    #[test]
    fn store_document_defaults_missing_fields() {
        let store: Store =
            serde_json::from_str(r#"{"libraries":[{"name":"A","poses":[{"name":"p","data":"{}"}]}]}"#)
                .unwrap();
        assert_eq!(store.libraries[0].len(), 1);
        assert_eq!(store.selected, None);
        assert!(store.legacy_poses.is_empty());
        assert_eq!(store.migration, MigrationState::NotMigrated);
    }
}
