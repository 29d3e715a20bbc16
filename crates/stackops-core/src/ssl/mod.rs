//! SSL certificate management: path model, backups, and the guarded
//! edit/install/check workflows.
//!
//! Certificates live next to the website they protect, as
//! `<site>/ssl/cert.crt` and `<site>/ssl/priv.key`. Before any mutating
//! operation, a timestamped backup directory is created under the same `ssl/`
//! directory with `.bak` copies of both files; the mutating workflows restore
//! from it when they fail partway.

pub mod checker;
pub mod editor;
pub mod installer;
pub mod prompts;

use crate::config::Env;
use crate::errors::OpsError;
use crate::website;
use chrono::Local;
use std::fs;
use std::path::{Path, PathBuf};

pub const CERT_FILE: &str = "cert.crt";
pub const KEY_FILE: &str = "priv.key";
const BACKUP_SUFFIX: &str = ".bak";

#[derive(Debug, Clone)]
pub struct SslPaths {
    pub dir: PathBuf,
    pub cert: PathBuf,
    pub key: PathBuf,
}

impl SslPaths {
    pub fn for_domain(env: &Env, domain: &str) -> Result<Self, OpsError> {
        let dir = website::site_dir(env, domain)?.join("ssl");
        Ok(Self {
            cert: dir.join(CERT_FILE),
            key: dir.join(KEY_FILE),
            dir,
        })
    }

    pub fn exist(&self) -> bool {
        self.cert.is_file() && self.key.is_file()
    }

    /// Error unless both certificate files are present.
    pub fn ensure_exist(&self) -> Result<(), OpsError> {
        for path in [&self.cert, &self.key] {
            if !path.is_file() {
                return Err(OpsError::SslError(format!(
                    "Certificate file not found: {}",
                    path.display()
                )));
            }
        }
        Ok(())
    }
}

/// Copy the certificate pair into a fresh timestamped backup directory and
/// return its path. The copies carry a `.bak` suffix.
pub fn backup_ssl_files(paths: &SslPaths) -> Result<PathBuf, OpsError> {
    paths.ensure_exist()?;

    let timestamp = Local::now().format("%Y%m%d_%H%M%S");
    let backup_dir = paths.dir.join("backup").join(timestamp.to_string());
    fs::create_dir_all(&backup_dir).map_err(|e| {
        OpsError::SslError(format!(
            "Failed to create backup directory {}: {}",
            backup_dir.display(),
            e
        ))
    })?;

    for src in [&paths.cert, &paths.key] {
        let file_name = src
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_default();
        let dst = backup_dir.join(format!("{}{}", file_name, BACKUP_SUFFIX));
        copy_file(src, &dst)?;
    }

    log::info!("created SSL backup at {}", backup_dir.display());
    Ok(backup_dir)
}

/// Copy the `.bak` files from a backup directory back over the originals.
pub fn restore_ssl_backup(paths: &SslPaths, backup_dir: &Path) -> Result<(), OpsError> {
    if !backup_dir.is_dir() {
        return Err(OpsError::SslError(format!(
            "Backup directory not found: {}",
            backup_dir.display()
        )));
    }

    for dst in [&paths.cert, &paths.key] {
        let file_name = dst
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_default();
        let src = backup_dir.join(format!("{}{}", file_name, BACKUP_SUFFIX));
        if src.is_file() {
            copy_file(&src, dst)?;
        }
    }

    log::info!("restored SSL files from {}", backup_dir.display());
    Ok(())
}

fn copy_file(src: &Path, dst: &Path) -> Result<(), OpsError> {
    fs::copy(src, dst).map_err(|e| {
        OpsError::SslError(format!(
            "Failed to copy {} to {}: {}",
            src.display(),
            dst.display(),
            e
        ))
    })?;
    Ok(())
}
