use super::*;
use tempfile::TempDir;

fn sample_manifest() -> Manifest {
    Manifest::new(vec![
        MigrationEntry {
            idx: 0,
            when: 1000,
            tag: "0000_init".to_string(),
            hash: "aa".repeat(32),
            sql: vec!["CREATE TABLE t (x INTEGER);".to_string()],
        },
        MigrationEntry {
            idx: 1,
            when: 2000,
            tag: "0001_add_col".to_string(),
            hash: "bb".repeat(32),
            sql: vec!["ALTER TABLE t ADD y INTEGER;".to_string()],
        },
    ])
}

#[test]
fn test_serializes_as_plain_array() {
    let manifest = sample_manifest();
    let value = serde_json::to_value(&manifest).unwrap();
    let array = value.as_array().expect("manifest must serialize as array");
    assert_eq!(array.len(), 2);
    assert_eq!(array[0]["idx"], 0);
    assert_eq!(array[0]["when"], 1000);
    assert_eq!(array[0]["tag"], "0000_init");
    assert_eq!(array[1]["sql"][0], "ALTER TABLE t ADD y INTEGER;");
}

#[test]
fn test_save_load_round_trip() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("manifest.json");

    let manifest = sample_manifest();
    manifest.save(&path).unwrap();

    let loaded = Manifest::load(&path).unwrap();
    assert_eq!(loaded, manifest);
}

#[test]
fn test_save_creates_parent_dirs() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("nested/deep/manifest.json");

    sample_manifest().save(&path).unwrap();
    assert!(path.exists());
}

#[test]
fn test_identical_manifests_serialize_identically() {
    let a = sample_manifest().to_json().unwrap();
    let b = sample_manifest().to_json().unwrap();
    assert_eq!(a, b);
}

#[test]
fn test_load_malformed() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("manifest.json");
    std::fs::write(&path, "{ not a manifest").unwrap();

    assert!(matches!(
        Manifest::load(&path),
        Err(CoreError::ManifestParseError { .. })
    ));
}

#[test]
fn test_len_and_iter() {
    let manifest = sample_manifest();
    assert_eq!(manifest.len(), 2);
    assert!(!manifest.is_empty());
    let tags: Vec<&str> = manifest.iter().map(|m| m.tag.as_str()).collect();
    assert_eq!(tags, vec!["0000_init", "0001_add_col"]);
}
