//! Integration tests for loading and querying a JSON database file.

use std::io::Write;

use mrd_store::{RecordStore, StoreError};
use pretty_assertions::assert_eq;
use tempfile::NamedTempFile;

const DATABASE: &str = r#"{
    "im3l0": {
        "name": "im3l0",
        "type": "OphydItem",
        "device_class": "ophyd.sim.SynAxis",
        "args": [],
        "kwargs": {"name": "{{name}}"}
    },
    "at1k4": {
        "name": "at1k4",
        "type": "Motor",
        "device_class": "ophyd.EpicsMotor",
        "prefix": "AT1K4:SOLID",
        "channel": 12
    },
    "bogus": "not-an-object"
}"#;

fn write_database(contents: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("tempfile");
    file.write_all(contents.as_bytes()).expect("write database");
    file
}

#[test]
fn loads_all_object_entries() {
    let file = write_database(DATABASE);
    let store = RecordStore::load(file.path()).expect("load");

    // The malformed "bogus" entry is skipped, not fatal.
    assert_eq!(store.all().len(), 2);
    assert_eq!(store.path(), file.path());
}

#[test]
fn finds_record_by_name() {
    let file = write_database(DATABASE);
    let store = RecordStore::load(file.path()).expect("load");

    let record = store.find_by_name("at1k4").expect("record");
    assert_eq!(record.container(), Some("Motor"));
    assert!(store.find_by_name("nope").is_none());
}

#[test]
fn search_matches_globs_per_field() {
    let file = write_database(DATABASE);
    let store = RecordStore::load(file.path()).expect("load");

    let hits = store
        .search(&[("name".into(), "im*".into())])
        .expect("search");
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].name(), Some("im3l0"));

    // Numeric fields match against their JSON rendition.
    let hits = store
        .search(&[("channel".into(), "1*".into())])
        .expect("search");
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].name(), Some("at1k4"));

    // Criteria are conjunctive.
    let hits = store
        .search(&[
            ("name".into(), "at*".into()),
            ("type".into(), "OphydItem".into()),
        ])
        .expect("search");
    assert!(hits.is_empty());
}

#[test]
fn missing_file_is_not_a_file_error() {
    let err = RecordStore::load(std::path::Path::new("/nonexistent/db.json")).unwrap_err();
    assert!(matches!(err, StoreError::NotAFile { .. }));
}

#[test]
fn invalid_json_is_a_parse_error() {
    let file = write_database("{ not json");
    let err = RecordStore::load(file.path()).unwrap_err();
    assert!(matches!(err, StoreError::Parse { .. }));
}

#[test]
fn non_object_top_level_is_bad_shape() {
    let file = write_database("[1, 2, 3]");
    let err = RecordStore::load(file.path()).unwrap_err();
    assert!(matches!(err, StoreError::BadShape { .. }));
}

#[test]
fn bad_glob_is_reported() {
    let file = write_database(DATABASE);
    let store = RecordStore::load(file.path()).expect("load");
    let err = store
        .search(&[("name".into(), "a[".into())])
        .unwrap_err();
    assert!(matches!(err, StoreError::InvalidPattern { .. }));
}
