//! Certificate installation.
//!
//! Two ways to get a certificate pair into a site's `ssl/` directory: copy
//! an operator-supplied pair into place, or generate a self-signed pair with
//! openssl. Both back up any existing pair first, reload the webserver, and
//! only then record the install in the site config; a failed reload restores
//! the previous pair and leaves the config untouched. File placement is
//! separated from the reload so the copy logic is testable without a running
//! stack.

use crate::config::Env;
use crate::errors::OpsError;
use crate::ssl::{self, SslPaths};
use crate::webserver;
use crate::website::{self, SiteConfig, SslSettings};
use chrono::Local;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;

#[derive(Debug)]
pub struct SslInstallReport {
    pub domain: String,
    pub replaced_backup: Option<PathBuf>,
}

/// Copy `cert_src` / `key_src` into place for `domain`. Returns the backup
/// directory when an existing pair was replaced.
pub fn place_certificate(
    env: &Env,
    domain: &str,
    cert_src: &Path,
    key_src: &Path,
) -> Result<Option<PathBuf>, OpsError> {
    for src in [cert_src, key_src] {
        if !src.is_file() {
            return Err(OpsError::SslError(format!(
                "Source file not found: {}",
                src.display()
            )));
        }
    }

    let paths = SslPaths::for_domain(env, domain)?;
    let replaced_backup = if paths.exist() {
        Some(ssl::backup_ssl_files(&paths)?)
    } else {
        fs::create_dir_all(&paths.dir).map_err(|e| {
            OpsError::SslError(format!(
                "Failed to create {}: {}",
                paths.dir.display(),
                e
            ))
        })?;
        None
    };

    fs::copy(cert_src, &paths.cert)
        .and_then(|_| fs::copy(key_src, &paths.key))
        .map_err(|e| OpsError::SslError(format!("Failed to install certificate: {}", e)))?;

    log::info!("installed custom certificate for {}", domain);
    Ok(replaced_backup)
}

/// Generate a self-signed certificate pair for `domain` with openssl,
/// backing up any existing pair first.
pub fn install_selfsigned(env: &Env, domain: &str) -> Result<SslInstallReport, OpsError> {
    let paths = SslPaths::for_domain(env, domain)?;
    let replaced_backup = if paths.exist() {
        Some(ssl::backup_ssl_files(&paths)?)
    } else {
        fs::create_dir_all(&paths.dir).map_err(|e| {
            OpsError::SslError(format!(
                "Failed to create {}: {}",
                paths.dir.display(),
                e
            ))
        })?;
        None
    };

    let subject = format!("/O=stackops/CN={}", domain);
    let result = Command::new("openssl")
        .args(["req", "-x509", "-nodes", "-days", "365", "-newkey", "rsa:2048"])
        .arg("-keyout")
        .arg(&paths.key)
        .arg("-out")
        .arg(&paths.cert)
        .args(["-subj", &subject])
        .output();

    match result {
        Ok(output) if output.status.success() => {}
        Ok(output) => {
            restore_replaced(&paths, &replaced_backup);
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(OpsError::SslError(format!(
                "Failed to generate self-signed certificate for {}: {}",
                domain,
                stderr.trim()
            )));
        }
        Err(e) => {
            restore_replaced(&paths, &replaced_backup);
            return Err(OpsError::CommandError {
                command: "openssl req -x509".to_string(),
                message: e.to_string(),
            });
        }
    }
    log::info!("generated self-signed certificate for {}", domain);

    if let Err(err) = webserver::reload(env) {
        restore_replaced(&paths, &replaced_backup);
        return Err(err);
    }
    record_install(env, domain, "selfsigned")?;

    Ok(SslInstallReport {
        domain: domain.to_string(),
        replaced_backup,
    })
}

/// Full install workflow for an operator-supplied pair: place files, reload,
/// record in site config.
pub fn install_ssl(
    env: &Env,
    domain: &str,
    cert_src: &Path,
    key_src: &Path,
) -> Result<SslInstallReport, OpsError> {
    let replaced_backup = place_certificate(env, domain, cert_src, key_src)?;

    if let Err(err) = webserver::reload(env) {
        let paths = SslPaths::for_domain(env, domain)?;
        restore_replaced(&paths, &replaced_backup);
        return Err(err);
    }
    record_install(env, domain, "custom")?;

    Ok(SslInstallReport {
        domain: domain.to_string(),
        replaced_backup,
    })
}

fn restore_replaced(paths: &SslPaths, replaced_backup: &Option<PathBuf>) {
    if let Some(backup_dir) = replaced_backup {
        if let Err(err) = ssl::restore_ssl_backup(paths, backup_dir) {
            // The backup stays on disk for manual recovery.
            log::error!("failed to restore previous certificate: {}", err);
        }
    }
}

fn record_install(env: &Env, domain: &str, method: &str) -> Result<(), OpsError> {
    let mut config = website::load_site_config(env, domain)?.unwrap_or(SiteConfig {
        domain: domain.to_string(),
        ..Default::default()
    });
    config.ssl = Some(SslSettings {
        method: method.to_string(),
        installed_at: Some(Local::now().format("%Y-%m-%d %H:%M:%S").to_string()),
    });
    website::save_site_config(env, &config)
}
