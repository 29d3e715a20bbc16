//! Guarded SSL certificate editing.
//!
//! The edit workflow backs up the certificate pair, opens each file in the
//! operator's editor, then reloads the webserver so the new material is
//! served. If the editor or the reload fails, the backup is restored before
//! the error is reported, so a half-finished edit never leaves broken
//! certificates in place.

use crate::config::Env;
use crate::errors::OpsError;
use crate::ssl::{self, SslPaths};
use crate::webserver;
use std::path::{Path, PathBuf};
use std::process::Command;

#[derive(Debug)]
pub struct SslEditReport {
    pub domain: String,
    pub backup_dir: PathBuf,
    pub reloaded: bool,
}

/// Edit the certificate pair of `domain` with `editor`, reloading the
/// webserver afterwards. The editor command must already be resolved (see
/// `crate::editor::choose_editor`).
pub fn edit_ssl(env: &Env, domain: &str, editor: &str) -> Result<SslEditReport, OpsError> {
    let paths = SslPaths::for_domain(env, domain)?;
    paths.ensure_exist()?;

    let backup_dir = ssl::backup_ssl_files(&paths)?;

    log::info!("opening certificate and key of {} in {}", domain, editor);
    if let Err(err) = open_in_editor(editor, &paths) {
        roll_back(&paths, &backup_dir);
        return Err(err);
    }

    if let Err(err) = webserver::reload(env) {
        log::warn!("webserver reload failed after editing {}, restoring backup", domain);
        roll_back(&paths, &backup_dir);
        return Err(err);
    }

    Ok(SslEditReport {
        domain: domain.to_string(),
        backup_dir,
        reloaded: true,
    })
}

fn open_in_editor(editor: &str, paths: &SslPaths) -> Result<(), OpsError> {
    for path in [&paths.cert, &paths.key] {
        let status = Command::new(editor).arg(path).status().map_err(|e| {
            OpsError::EditorError(format!("Failed to launch editor '{}': {}", editor, e))
        })?;
        if !status.success() {
            return Err(OpsError::EditorError(format!(
                "Editor '{}' exited with {} while editing {}",
                editor,
                status,
                path.display()
            )));
        }
    }
    Ok(())
}

fn roll_back(paths: &SslPaths, backup_dir: &Path) {
    if let Err(err) = ssl::restore_ssl_backup(paths, backup_dir) {
        // The backup stays on disk for manual recovery.
        log::error!(
            "failed to restore SSL backup {}: {}",
            backup_dir.display(),
            err
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn env_for(dir: &TempDir) -> Env {
        Env::from_vars(&[("SITES_DIR", dir.path().to_str().unwrap())])
    }

    fn write_pair(env: &Env, domain: &str) -> SslPaths {
        let paths = SslPaths::for_domain(env, domain).unwrap();
        fs::create_dir_all(&paths.dir).unwrap();
        fs::write(&paths.cert, "original cert").unwrap();
        fs::write(&paths.key, "original key").unwrap();
        paths
    }

    #[test]
    fn test_edit_without_certificates_is_error() {
        let dir = TempDir::new().unwrap();
        let env = env_for(&dir);
        let err = edit_ssl(&env, "example.com", "vi").unwrap_err();
        assert!(err.to_string().contains("not found"));
    }

    #[test]
    fn test_failed_editor_restores_backup() {
        let dir = TempDir::new().unwrap();
        let env = env_for(&dir);
        let paths = write_pair(&env, "example.com");

        let err = edit_ssl(&env, "example.com", "/nonexistent/editor").unwrap_err();
        assert!(matches!(err, OpsError::EditorError(_)));
        // Originals untouched after the rollback.
        assert_eq!(fs::read_to_string(&paths.cert).unwrap(), "original cert");
        assert_eq!(fs::read_to_string(&paths.key).unwrap(), "original key");
    }

    #[test]
    fn test_failed_reload_restores_edited_files() {
        use std::os::unix::fs::PermissionsExt;

        let dir = TempDir::new().unwrap();
        let env = Env::from_vars(&[
            ("SITES_DIR", dir.path().to_str().unwrap()),
            ("NGINX_CONTAINER", "stackops-test-no-such-container"),
        ]);
        let paths = write_pair(&env, "example.com");

        // An "editor" that appends to whatever file it is given, so the
        // reload failure has real changes to undo.
        let script = dir.path().join("append-editor.sh");
        fs::write(&script, "#!/bin/sh\necho edited >> \"$1\"\n").unwrap();
        fs::set_permissions(&script, fs::Permissions::from_mode(0o755)).unwrap();

        let err = edit_ssl(&env, "example.com", script.to_str().unwrap()).unwrap_err();
        assert!(!matches!(err, OpsError::EditorError(_)));
        assert_eq!(fs::read_to_string(&paths.cert).unwrap(), "original cert");
        assert_eq!(fs::read_to_string(&paths.key).unwrap(), "original key");
    }
}
