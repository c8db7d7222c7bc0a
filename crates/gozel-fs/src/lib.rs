//! Small filesystem helpers

#[macro_use]
extern crate tracing;

use crate::error::{Error, Result};
#[cfg(unix)]
use rustix::fs::Access;
use serde::de::DeserializeOwned;
use std::{
    io,
    path::{Path, PathBuf},
};
use tokio::fs;

pub mod error;

#[cfg(unix)]
async fn check_write_access(path: &Path) -> io::Result<()> {
    let path = PathBuf::from(path);
    tokio::task::spawn_blocking(move || rustix::fs::access(&path, Access::WRITE_OK))
        .await
        .map_err(io::Error::other)?
        .map_err(io::Error::from)
}

#[cfg(not(unix))]
async fn check_write_access(path: &Path) -> io::Result<()> {
    if fs::metadata(path).await?.permissions().readonly() {
        return Err(io::Error::new(io::ErrorKind::PermissionDenied, "read-only"));
    }

    Ok(())
}

async fn ensure_writable(path: &Path, expect_dir: bool) -> io::Result<()> {
    let metadata = fs::metadata(path).await?;
    if expect_dir && !metadata.is_dir() {
        return Err(io::Error::other("not a directory"));
    }

    check_write_access(path).await
}

/// Whether the path exists and is writable by the process
pub async fn is_file_exists<P>(path: P) -> bool
where
    P: AsRef<Path>,
{
    ensure_writable(path.as_ref(), false).await.is_ok()
}

/// Read a UTF-8 JSON file and deserialize it
pub async fn read_json_file<T, P>(path: P) -> Result<T>
where
    T: DeserializeOwned,
    P: AsRef<Path>,
{
    let content = fs::read_to_string(path).await?;
    sonic_rs::from_str(&content).map_err(Error::from)
}

/// Make sure the directory is accessible, creating it (and its parents) if asked to
pub async fn verify_dir<P>(path: P, attempt_to_create: bool) -> Result<()>
where
    P: AsRef<Path>,
{
    let path = path.as_ref();

    let Err(access_error) = ensure_writable(path, true).await else {
        return Ok(());
    };

    if !attempt_to_create {
        return Err(Error::Access {
            path: PathBuf::from(path),
            source: access_error,
        });
    }

    debug!(path = %path.display(), "creating directory");
    fs::create_dir_all(path)
        .await
        .map_err(|source| Error::Create {
            path: PathBuf::from(path),
            source,
        })
}
