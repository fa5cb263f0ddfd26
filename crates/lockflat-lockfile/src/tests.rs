//! Unit tests for lockfile decoding

use super::*;
use camino::Utf8PathBuf;
use tempfile::TempDir;

const NORMAL: &str = include_str!("../testdata/normal.json");
const WITH_DEV: &str = include_str!("../testdata/with-dev.json");
const NESTED: &str = include_str!("../testdata/nested.json");

#[test]
fn test_parse_normal_lockfile() {
    let tree = parse_lockfile(NORMAL).unwrap();

    assert_eq!(tree.name.as_deref(), Some("node"));
    assert_eq!(tree.lockfile_version, Some(1));
    assert_eq!(tree.dependencies.len(), 3);

    let promise = &tree.dependencies["promise"];
    assert_eq!(promise.version, "8.0.3");
    assert_eq!(promise.requires["asap"], "~2.0.6");
    assert!(!promise.dev);
}

#[test]
fn test_document_order_is_kept() {
    let tree = parse_lockfile(NORMAL).unwrap();
    let names: Vec<&str> = tree.dependencies.keys().map(String::as_str).collect();
    assert_eq!(names, vec!["asap", "jquery", "promise"]);
}

#[test]
fn test_parse_nested_and_dev_entries() {
    let tree = parse_lockfile(WITH_DEV).unwrap();

    let mocha = &tree.dependencies["mocha"];
    assert!(mocha.dev);
    assert_eq!(mocha.nested_version("supports-color"), Some("6.0.0"));
    assert_eq!(tree.node_count(), 20);
}

#[test]
fn test_missing_dependencies_is_empty_tree() {
    let tree = parse_lockfile(r#"{"name": "empty", "lockfileVersion": 1}"#).unwrap();
    assert!(tree.dependencies.is_empty());
}

#[test]
fn test_malformed_json_is_decode_error() {
    let err = parse_lockfile("{ \"dependencies\": ").unwrap_err();
    assert!(matches!(err, LockflatError::LockfileDecode { .. }));
}

#[test]
fn test_wrong_shape_is_decode_error() {
    // `version` is required on every entry
    let err = parse_lockfile(r#"{"dependencies": {"asap": {"dev": false}}}"#).unwrap_err();
    assert!(matches!(err, LockflatError::LockfileDecode { .. }));

    let err = parse_lockfile(r#"{"dependencies": ["asap"]}"#).unwrap_err();
    assert!(matches!(err, LockflatError::LockfileDecode { .. }));
}

#[test]
fn test_top_level_array_is_decode_error() {
    for content in ["[]", r#"["node", "1.0.0", 1, {}]"#] {
        let err = parse_lockfile(content).unwrap_err();
        assert!(matches!(err, LockflatError::LockfileDecode { .. }), "{content}");
    }
}

#[test]
fn test_array_valued_entry_is_decode_error() {
    let err = parse_lockfile(r#"{"dependencies": {"asap": ["2.0.7"]}}"#).unwrap_err();
    assert!(matches!(err, LockflatError::LockfileDecode { .. }));

    // Nested entries are held to the same shape
    let content = r#"{
        "dependencies": {
            "send": { "version": "0.17.1", "dependencies": { "ms": ["2.1.1", false] } }
        }
    }"#;
    let err = parse_lockfile(content).unwrap_err();
    assert!(matches!(err, LockflatError::LockfileDecode { .. }));

    let err = from_reader(r#"{"dependencies": {"asap": ["2.0.7"]}}"#.as_bytes()).unwrap_err();
    assert!(matches!(err, LockflatError::LockfileDecode { .. }));
}

#[test]
fn test_parse_nested_lockfile() {
    let tree = parse_lockfile(NESTED).unwrap();

    let send = &tree.dependencies["send"];
    assert_eq!(send.nested_version("ms"), Some("2.1.1"));
    let debug = &send.dependencies.as_ref().unwrap()["debug"];
    assert_eq!(debug.version, "2.6.9");
    assert_eq!(debug.nested_version("ms"), Some("2.0.0"));
    assert_eq!(tree.node_count(), 22);
}

#[test]
fn test_from_reader() {
    let tree = from_reader(NORMAL.as_bytes()).unwrap();
    assert_eq!(tree.dependencies.len(), 3);
}

#[test]
fn test_serialize_round_trip() {
    let tree = parse_lockfile(WITH_DEV).unwrap();
    let serialized = serialize_lockfile(&tree).unwrap();
    let reparsed = parse_lockfile(&serialized).unwrap();
    assert_eq!(tree, reparsed);
}

#[tokio::test]
async fn test_load_from_file() {
    let temp_dir = TempDir::new().unwrap();
    let temp_path = Utf8PathBuf::try_from(temp_dir.path().to_path_buf()).unwrap();
    let path = temp_path.join(LOCKFILE_NAME);
    tokio::fs::write(&path, NORMAL).await.unwrap();

    let tree = load_from_file(&path).await.unwrap();
    assert_eq!(tree.dependencies.len(), 3);
}

#[tokio::test]
async fn test_load_from_file_errors() {
    let temp_dir = TempDir::new().unwrap();
    let temp_path = Utf8PathBuf::try_from(temp_dir.path().to_path_buf()).unwrap();

    let missing = load_from_file(&temp_path.join("nope.json")).await.unwrap_err();
    assert!(matches!(missing, LockflatError::Io { .. }));

    let broken = temp_path.join(LOCKFILE_NAME);
    tokio::fs::write(&broken, "not json").await.unwrap();
    match load_from_file(&broken).await.unwrap_err() {
        LockflatError::LockfileDecode { message } => assert!(message.contains("In file")),
        other => panic!("unexpected error: {other}"),
    }
}
