use gozel_fs::{error::Error, is_file_exists, read_json_file, verify_dir};
use serde::Deserialize;
use std::fs;

#[derive(Debug, Deserialize, PartialEq)]
struct Package {
    name: String,
    private: bool,
}

#[tokio::test]
async fn file_exists() {
    let dir = tempfile::tempdir().unwrap();
    let file = dir.path().join("package.json");
    fs::write(&file, "{}").unwrap();

    assert!(is_file_exists(&file).await);
    assert!(!is_file_exists(dir.path().join("abcdefu.json")).await);
}

#[tokio::test]
async fn read_json() {
    let dir = tempfile::tempdir().unwrap();
    let file = dir.path().join("package.json");
    fs::write(&file, r#"{"name":"standard-backend","private":true,"version":"1.0.0"}"#).unwrap();

    let package: Package = read_json_file(&file).await.unwrap();
    assert_eq!(
        package,
        Package {
            name: "standard-backend".into(),
            private: true,
        }
    );
}

#[tokio::test]
async fn read_json_errors() {
    let dir = tempfile::tempdir().unwrap();
    let missing = read_json_file::<Package, _>(dir.path().join("missing.json")).await;
    assert!(matches!(missing, Err(Error::Io(..))));

    let file = dir.path().join("broken.json");
    fs::write(&file, "{ not json").unwrap();
    let broken = read_json_file::<Package, _>(&file).await;
    assert!(matches!(broken, Err(Error::Json(..))));
}

#[tokio::test]
async fn verify_existing_dir() {
    let dir = tempfile::tempdir().unwrap();
    verify_dir(dir.path(), false).await.unwrap();
}

#[tokio::test]
async fn verify_missing_dir() {
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("abcdefu");

    assert!(matches!(
        verify_dir(&missing, false).await,
        Err(Error::Access { .. })
    ));
    assert!(!missing.exists());
}

#[tokio::test]
async fn verify_dir_with_create_attempt() {
    let dir = tempfile::tempdir().unwrap();
    let nested = dir.path().join("abcdefu").join("nested");

    verify_dir(&nested, true).await.unwrap();
    assert!(nested.is_dir());
    verify_dir(&nested, false).await.unwrap();
}

#[tokio::test]
async fn file_is_not_a_dir() {
    let dir = tempfile::tempdir().unwrap();
    let file = dir.path().join("file.txt");
    fs::write(&file, "").unwrap();

    assert!(matches!(
        verify_dir(&file, false).await,
        Err(Error::Access { .. })
    ));
    assert!(matches!(
        verify_dir(&file, true).await,
        Err(Error::Create { .. })
    ));
}

#[cfg(unix)]
#[tokio::test]
async fn read_only_file_follows_process_access() {
    use std::{fs::OpenOptions, os::unix::fs::PermissionsExt};

    let dir = tempfile::tempdir().unwrap();
    let file = dir.path().join("locked.json");
    fs::write(&file, "{}").unwrap();
    fs::set_permissions(&file, fs::Permissions::from_mode(0o444)).unwrap();

    // Root keeps write access regardless of the mode bits
    let writable = OpenOptions::new().write(true).open(&file).is_ok();
    assert_eq!(is_file_exists(&file).await, writable);
}

#[cfg(unix)]
#[tokio::test]
async fn read_only_dir_follows_process_access() {
    use std::os::unix::fs::PermissionsExt;

    let dir = tempfile::tempdir().unwrap();
    let locked = dir.path().join("locked");
    fs::create_dir(&locked).unwrap();
    fs::set_permissions(&locked, fs::Permissions::from_mode(0o555)).unwrap();

    let writable = fs::write(locked.join("canary"), "").is_ok();
    let result = verify_dir(&locked, false).await;
    if writable {
        result.unwrap();
    } else {
        assert!(matches!(result, Err(Error::Access { .. })));
    }

    fs::set_permissions(&locked, fs::Permissions::from_mode(0o755)).unwrap();
}
