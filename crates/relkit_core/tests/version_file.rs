use relkit_core::{BumpOptions, Version, VersionError, VersionFile};
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

fn write_version_file(contents: &str) -> (TempDir, PathBuf) {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("version.properties");
    fs::write(&path, contents).unwrap();
    (dir, path)
}

#[test]
fn load_reads_version_and_notable_flag() {
    let (_dir, path) = write_version_file("version=2.7.15\nnotableRelease=true\n");

    let file = VersionFile::load(&path).unwrap();
    assert_eq!(file.version().to_string(), "2.7.15");
    assert!(file.is_notable_release());
    assert_eq!(file.path(), path.as_path());
}

#[test]
fn load_missing_file_is_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let err = VersionFile::load(dir.path().join("version.properties")).unwrap_err();
    assert!(matches!(err, VersionError::Io { .. }));
    assert!(std::error::Error::source(&err).is_some());
}

#[test]
fn load_malformed_version_is_rejected() {
    let (_dir, path) = write_version_file("version=two.oh\n");
    let err = VersionFile::load(&path).unwrap_err();
    assert!(matches!(err, VersionError::InvalidVersion(ref value) if value == "two.oh"));
}

#[test]
fn set_version_roundtrips_through_disk() {
    let (_dir, path) = write_version_file("# managed by relkit\nversion=1.0.0\n");
    let mut file = VersionFile::load(&path).unwrap();

    for raw in ["3.1.4", "4.0.0-beta.1", "0.0.0"] {
        file.set_version(raw.parse::<Version>().unwrap()).unwrap();
        let reloaded = VersionFile::load(&path).unwrap();
        assert_eq!(reloaded.version().to_string(), raw);
    }
    assert!(fs::read_to_string(&path)
        .unwrap()
        .starts_with("# managed by relkit\n"));
}

#[test]
fn bump_increments_patch_and_records_previous_version() {
    let (_dir, path) = write_version_file("version=1.2.3\n");
    let mut file = VersionFile::load(&path).unwrap();

    let bump = file.bump(BumpOptions::default()).unwrap();
    assert_eq!(bump.previous.to_string(), "1.2.3");
    assert_eq!(bump.current.to_string(), "1.2.4");
    assert_eq!(file.version().to_string(), "1.2.4");
    assert_eq!(file.previous_version(), Some("1.2.3"));
    assert_eq!(
        fs::read_to_string(&path).unwrap(),
        "version=1.2.4\npreviousVersion=1.2.3\n"
    );
}

#[test]
fn bump_preserves_comments_and_unknown_keys() {
    let (_dir, path) = write_version_file(
        "# release metadata\nversion=0.9.9\ngroup=org.example\n\npreviousVersion=0.9.8\n",
    );
    let mut file = VersionFile::load(&path).unwrap();
    file.bump(BumpOptions::default()).unwrap();

    assert_eq!(
        fs::read_to_string(&path).unwrap(),
        "# release metadata\nversion=0.9.10\ngroup=org.example\n\npreviousVersion=0.9.9\n"
    );
}

#[test]
fn bump_with_record_notable_prepends_outgoing_version() {
    let (_dir, path) = write_version_file("version=2.0.0\nnotableVersions=1.0.0\n");
    let mut file = VersionFile::load(&path).unwrap();

    file.bump(BumpOptions {
        record_notable: true,
    })
    .unwrap();

    let reloaded = VersionFile::load(&path).unwrap();
    assert_eq!(reloaded.version().to_string(), "2.0.1");
    assert_eq!(reloaded.notable_versions(), ["2.0.0", "1.0.0"]);
}

#[test]
fn bump_pre_release_increments_counter() {
    let (_dir, path) = write_version_file("version=3.0.0-beta.7\n");
    let mut file = VersionFile::load(&path).unwrap();
    let bump = file.bump(BumpOptions::default()).unwrap();
    assert_eq!(bump.current.to_string(), "3.0.0-beta.8");
}

#[test]
fn bump_rereads_file_edited_after_load() {
    let (_dir, path) = write_version_file("version=1.0.0\n");
    let mut file = VersionFile::load(&path).unwrap();
    fs::write(&path, "version=5.5.5\n").unwrap();

    let bump = file.bump(BumpOptions::default()).unwrap();
    assert_eq!(bump.previous.to_string(), "5.5.5");
    assert_eq!(bump.current.to_string(), "5.5.6");
}

#[test]
fn failed_bump_leaves_file_untouched() {
    let (_dir, path) = write_version_file("version=1.0.0\n");
    let mut file = VersionFile::load(&path).unwrap();
    fs::write(&path, "version=broken\n").unwrap();

    let err = file.bump(BumpOptions::default()).unwrap_err();
    assert!(matches!(err, VersionError::InvalidVersion(_)));
    assert_eq!(fs::read_to_string(&path).unwrap(), "version=broken\n");
    assert_eq!(file.version().to_string(), "1.0.0");
}
