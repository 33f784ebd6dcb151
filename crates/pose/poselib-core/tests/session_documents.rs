use poselib_core::{
    HostContext, JsonFileBackend, MemoryBackend, MemoryRigs, MigrationOutcome, MigrationState,
    OpStatus, Preferences, ReportLevel, Session, Store, StoreBackend,
};

fn legacy_store() -> Store {
    poselib_test_fixtures::documents::load("legacy-expressions").expect("legacy document")
}

#[test]
fn opening_a_legacy_document_migrates_once() {
    let mut backend = MemoryBackend::new(Some(legacy_store()));
    let mut session = Session::open(&mut backend, Preferences::default()).unwrap();

    let store = &session.store;
    assert_eq!(store.migration, MigrationState::Migrated);
    assert!(store.legacy_poses.is_empty());
    assert_eq!(store.libraries.len(), 1);
    let lib = store.active_library().unwrap();
    assert_eq!(lib.name, "Default Library");
    let names: Vec<_> = lib.poses.iter().map(|p| p.name.as_str()).collect();
    assert_eq!(names, vec!["happy", "sad", "angry"]);

    let before = session.store.clone();
    assert_eq!(
        session.on_document_loaded(),
        MigrationOutcome::AlreadyMigrated
    );
    assert_eq!(session.store, before);
}

#[test]
fn migrated_document_keeps_its_libraries() {
    let store: Store =
        poselib_test_fixtures::documents::load("migrated-two-libraries").unwrap();
    let mut backend = MemoryBackend::new(Some(store.clone()));
    let session = Session::open(&mut backend, Preferences::default()).unwrap();
    assert_eq!(session.store, store);
    assert_eq!(session.store.legacy_poses.len(), 1);
    assert_eq!(session.store.active_library().unwrap().name, "Hands");
}

#[test]
fn reopening_a_persisted_session_does_not_duplicate_libraries() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("scene.poses.json");
    let mut backend = JsonFileBackend::new(&path);
    backend.save(&legacy_store()).unwrap();

    let session = Session::open(&mut backend, Preferences::default()).unwrap();
    session.persist(&mut backend).unwrap();

    let reopened = Session::open(&mut backend, Preferences::default()).unwrap();
    assert_eq!(reopened.store.libraries.len(), 1);
    assert_eq!(reopened.store, session.store);
}

#[test]
fn empty_backend_opens_an_empty_session() {
    let dir = tempfile::tempdir().unwrap();
    let mut backend = JsonFileBackend::new(dir.path().join("fresh.json"));
    let session = Session::open(&mut backend, Preferences::default()).unwrap();
    assert!(session.store.libraries.is_empty());
    assert_eq!(session.store.migration, MigrationState::NotMigrated);
}

#[test]
fn operators_export_and_import_between_sessions() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("body.json");

    let mut rigs = MemoryRigs::new().with_rig("Body", ["hip", "spine"]);
    let prefs = Preferences {
        armature_names: "Body".into(),
        ..Default::default()
    };
    let mut first = Session::new(Store::new(), prefs.clone());

    let report = first.export_active_library(&path);
    assert_eq!(report.status, OpStatus::Cancelled);

    first.add_library("Body Poses");
    first.save_pose(&HostContext::new(&mut rigs), "rest");
    let report = first.export_active_library(&path);
    assert_eq!(
        report.text(),
        Some("Pose library 'Body Poses' exported successfully.")
    );

    let mut second = Session::new(Store::new(), prefs);
    let report = second.import_library(&path);
    assert_eq!(report.level(), Some(ReportLevel::Info));
    assert_eq!(
        report.text(),
        Some("Pose library 'Body Poses' imported successfully.")
    );
    assert_eq!(second.store.libraries[0].poses, first.store.libraries[0].poses);

    let report = second.load_selected_pose(&mut HostContext::new(&mut rigs));
    assert_eq!(report.text(), Some("Loaded pose: rest"));

    let report = second.import_library(dir.path().join("nope.json"));
    assert_eq!(report.level(), Some(ReportLevel::Warning));
    assert_eq!(second.store.libraries.len(), 1);
}

#[test]
fn every_document_fixture_opens_from_disk() {
    for key in poselib_test_fixtures::documents::keys() {
        let json = poselib_test_fixtures::documents::json(&key).expect("document fixture");
        let expected: Store = serde_json::from_str(&json).expect("document decodes");

        let path = poselib_test_fixtures::documents::path(&key).expect("document path");
        let mut backend = JsonFileBackend::new(path);
        assert_eq!(backend.load().unwrap(), Some(expected));

        let session = Session::open(&mut backend, Preferences::default()).unwrap();
        assert_eq!(session.store.migration, MigrationState::Migrated, "{key}");
        assert!(session.store.active_library().is_some(), "{key}");
    }
}
