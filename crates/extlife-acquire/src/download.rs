// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Download and unpack (`spec.md` §4.4, C4).

use std::fs;
use std::io;
use std::path::Path;

use extlife_core::ExtensionError;
use extlife_fs::Paths;
use tracing::{info, warn};

/// Attempts each URI in order with an HTTP GET. The first successful body
/// is written to `<libDir>/<basename(uri)>.zip`, extracted into the base
/// directory, and every regular file under it is made executable for its
/// owner. Fails with `DownloadFailed` once every URI has been exhausted.
pub async fn download_and_unpack(
    client: &reqwest::Client,
    paths: &Paths,
    name: &str,
    version: &str,
    uris: &[String],
) -> Result<(), ExtensionError> {
    if uris.is_empty() {
        return Err(ExtensionError::NoPackageUris(version.to_string()));
    }

    let mut last_error = String::new();
    let mut body: Option<Vec<u8>> = None;
    let mut source_uri = "";

    for uri in uris {
        match fetch(client, uri).await {
            Ok(bytes) => {
                body = Some(bytes);
                source_uri = uri;
                break;
            }
            Err(e) => {
                warn!(uri, error = %e, "package download attempt failed");
                last_error = e;
            }
        }
    }

    let Some(body) = body else {
        return Err(ExtensionError::DownloadFailed(last_error));
    };

    let base_dir = paths.base_dir(name, version);
    let zip_path = paths.lib_dir.join(format!("{}.zip", basename(source_uri)));
    let bytes_written = body.len();

    let base_dir_for_blocking = base_dir.clone();
    tokio::task::spawn_blocking(move || -> Result<(), ExtensionError> {
        fs::create_dir_all(&base_dir_for_blocking)?;
        fs::write(&zip_path, &body)?;
        extract_and_chmod(&zip_path, &base_dir_for_blocking)
    })
    .await
    .map_err(|e| ExtensionError::DownloadFailed(format!("extraction task panicked: {e}")))??;

    info!(name, version, bytes = bytes_written, "downloaded extension package");
    Ok(())
}

async fn fetch(client: &reqwest::Client, uri: &str) -> Result<Vec<u8>, String> {
    let response = client.get(uri).send().await.map_err(|e| e.to_string())?;
    let response = response.error_for_status().map_err(|e| e.to_string())?;
    let bytes = response.bytes().await.map_err(|e| e.to_string())?;
    Ok(bytes.to_vec())
}

fn basename(uri: &str) -> &str {
    uri.rsplit('/').next().filter(|s| !s.is_empty()).unwrap_or("package")
}

fn extract_and_chmod(zip_path: &Path, base_dir: &Path) -> Result<(), ExtensionError> {
    let file = fs::File::open(zip_path)?;
    let mut archive = zip::ZipArchive::new(file)
        .map_err(|e| ExtensionError::DownloadFailed(format!("not a valid zip archive: {e}")))?;
    archive
        .extract(base_dir)
        .map_err(|e| ExtensionError::DownloadFailed(format!("failed to extract package: {e}")))?;

    set_executable_recursive(base_dir)?;
    Ok(())
}

/// Recursively sets `u+x` on every regular file under `dir`, equivalent to
/// `chmod u+x -R` but without shelling out.
fn set_executable_recursive(dir: &Path) -> io::Result<()> {
    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        let file_type = entry.file_type()?;
        let path = entry.path();
        if file_type.is_dir() {
            set_executable_recursive(&path)?;
        } else if file_type.is_file() {
            set_owner_executable(&path)?;
        }
    }
    Ok(())
}

#[cfg(unix)]
fn set_owner_executable(path: &Path) -> io::Result<()> {
    use std::os::unix::fs::PermissionsExt;
    let mut perms = fs::metadata(path)?.permissions();
    perms.set_mode(perms.mode() | 0o100);
    fs::set_permissions(path, perms)
}

#[cfg(not(unix))]
fn set_owner_executable(_path: &Path) -> io::Result<()> {
    Ok(())
}

#[cfg(test)]
mod download_tests;
