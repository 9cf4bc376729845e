use std::fs;
use std::path::{Path, PathBuf};

use frame_catalog::Error;
use frame_catalog::catalog::{Catalog, Orientation};
use tempfile::tempdir;

fn write_db(dir: &Path, contents: &str) -> PathBuf {
    let path = dir.join("db.json");
    fs::write(&path, contents).unwrap();
    path
}

#[test]
fn load_partitions_records_by_favorite_flag() {
    let dir = tempdir().unwrap();
    let path = write_db(
        dir.path(),
        r#"[
            {"relativePath": "2020/a.jpg", "isFavorite": false, "createdDate": "2020-01-01"},
            {"relativePath": "2020/b.jpg", "isFavorite": true, "createdDate": "2020-02-01"},
            {"relativePath": "2021/c.heic", "isFavorite": false, "hasLivePhoto": true, "orientation": 6},
            {"relativePath": "2021/d.png", "isFavorite": true}
        ]"#,
    );

    let catalog = Catalog::load(&path).unwrap();
    assert_eq!(catalog.len(), 4);
    assert!(!catalog.is_empty());

    let favorites: Vec<_> = catalog
        .favorites()
        .iter()
        .map(|r| r.relative_path.as_str())
        .collect();
    let normal: Vec<_> = catalog
        .normal()
        .iter()
        .map(|r| r.relative_path.as_str())
        .collect();
    assert_eq!(favorites, ["2020/b.jpg", "2021/d.png"]);
    assert_eq!(normal, ["2020/a.jpg", "2021/c.heic"]);

    assert!(catalog.favorites().iter().all(|r| r.is_favorite));
    assert!(catalog.normal().iter().all(|r| !r.is_favorite));

    let live = &catalog.normal()[1];
    assert!(live.has_live_photo);
    assert_eq!(live.orientation, Orientation::Right);
}

#[test]
fn load_coerces_malformed_records_to_defaults() {
    let dir = tempdir().unwrap();
    let path = write_db(
        dir.path(),
        r#"[
            {"relativePath": 17, "isFavorite": "absolutely"},
            "not an object",
            {},
            {"relativePath": "ok.jpg", "isFavorite": true}
        ]"#,
    );

    let catalog = Catalog::load(&path).unwrap();
    assert_eq!(catalog.len(), 4);
    assert_eq!(catalog.favorites().len(), 1);
    assert_eq!(catalog.favorites()[0].relative_path, "ok.jpg");

    for record in catalog.normal() {
        assert_eq!(record.relative_path, "");
        assert_eq!(record.created_date, "");
        assert_eq!(record.orientation, Orientation::Up);
    }
}

#[test]
fn load_does_not_require_media_files_to_exist() {
    let dir = tempdir().unwrap();
    let path = write_db(
        dir.path(),
        r#"[{"relativePath": "gone/forever.jpg", "isFavorite": false}]"#,
    );

    // the referenced file is never created; the record still loads
    let catalog = Catalog::load(&path).unwrap();
    assert_eq!(catalog.normal()[0].relative_path, "gone/forever.jpg");
}

#[test]
fn load_empty_array_yields_empty_catalog() {
    let dir = tempdir().unwrap();
    let path = write_db(dir.path(), "[]");

    let catalog = Catalog::load(&path).unwrap();
    assert!(catalog.is_empty());
    assert_eq!(catalog.len(), 0);
}

#[test]
fn load_missing_file_is_an_io_error() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("db.json");

    let err = Catalog::load(&path).unwrap_err();
    match err {
        Error::Io { path: reported, .. } => assert_eq!(reported, path),
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn load_truncated_json_is_a_parse_error() {
    let dir = tempdir().unwrap();
    let path = write_db(dir.path(), r#"[{"relativePath": "a.jpg""#);

    let err = Catalog::load(&path).unwrap_err();
    assert!(matches!(err, Error::Parse { .. }));
}

#[test]
fn load_non_array_document_is_a_parse_error() {
    let dir = tempdir().unwrap();
    let path = write_db(dir.path(), r#"{"relativePath": "a.jpg"}"#);

    let err = Catalog::load(&path).unwrap_err();
    assert!(matches!(err, Error::Parse { .. }));
}
