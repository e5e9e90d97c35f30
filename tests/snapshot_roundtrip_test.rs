use prof_roster::core::report::{filter_and_sort, unique_characters};
use prof_roster::core::seed::sample_roster;
use prof_roster::{LocalStorage, RosterError, SnapshotStore};
use tempfile::TempDir;

#[tokio::test]
async fn test_round_trip_on_disk() {
    let temp_dir = TempDir::new().unwrap();
    let store = SnapshotStore::new(LocalStorage::new(
        temp_dir.path().to_str().unwrap().to_string(),
    ));

    let original = sample_roster().unwrap();
    tokio_test::assert_ok!(store.save(&original, "prof.bin").await);
    let restored = tokio_test::assert_ok!(store.load("prof.bin").await);

    assert!(restored.matches(&original));

    // Back-references resolve inside the restored roster, not the original.
    for character in restored.characters() {
        let owner = restored.profession_of(character).unwrap();
        assert!(owner.characters().contains(character));
        let original_owner = original.profession_of(character).unwrap();
        assert!(!std::ptr::eq(owner, original_owner));
    }

    let unique = unique_characters(&restored);
    let kept: Vec<(&str, i32, &str)> = filter_and_sort(&unique, 10)
        .into_iter()
        .map(|c| (c.name(), c.level(), restored.profession_name(c).unwrap()))
        .collect();
    assert_eq!(kept, vec![("B", 15, "PB"), ("C", 12, "PA")]);
}

#[tokio::test]
async fn test_snapshot_in_nested_directory() {
    let temp_dir = TempDir::new().unwrap();
    let store = SnapshotStore::new(LocalStorage::new(
        temp_dir.path().to_str().unwrap().to_string(),
    ));

    store
        .save(&sample_roster().unwrap(), "nested/dir/prof.bin")
        .await
        .unwrap();
    assert!(temp_dir.path().join("nested/dir/prof.bin").exists());
}

#[tokio::test]
async fn test_truncated_snapshot_is_rejected() {
    let temp_dir = TempDir::new().unwrap();
    let store = SnapshotStore::new(LocalStorage::new(
        temp_dir.path().to_str().unwrap().to_string(),
    ));
    store.save(&sample_roster().unwrap(), "prof.bin").await.unwrap();

    let path = temp_dir.path().join("prof.bin");
    let bytes = std::fs::read(&path).unwrap();
    std::fs::write(&path, &bytes[..bytes.len() / 2]).unwrap();

    let result = store.load("prof.bin").await;
    assert!(matches!(result, Err(RosterError::SerializationError(_))));
}
