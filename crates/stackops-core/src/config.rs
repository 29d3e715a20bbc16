//! Environment file loading and resolution.
//!
//! Runtime configuration comes from a `stackops.env` KEY=VALUE file, with
//! process environment variables taking precedence over file values. The
//! loader is deliberately forgiving about formatting (blank lines, comments,
//! whitespace) and strict about required keys: a missing required key is a
//! configuration error that names every absent key at once.

use crate::errors::OpsError;
use std::collections::HashMap;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

pub const ENV_FILE_NAME: &str = "stackops.env";

/// Key of the directory that holds one subdirectory per managed website.
pub const KEY_SITES_DIR: &str = "SITES_DIR";
/// Suffix appended to a domain to name its PHP container.
pub const KEY_PHP_CONTAINER_SUFFIX: &str = "PHP_CONTAINER_SUFFIX";
/// Name of the shared nginx proxy container.
pub const KEY_NGINX_CONTAINER: &str = "NGINX_CONTAINER";

const DEFAULT_PHP_CONTAINER_SUFFIX: &str = "-php";
const DEFAULT_NGINX_CONTAINER: &str = "nginx-proxy";

#[derive(Debug, Clone, Default)]
pub struct Env {
    vars: HashMap<String, String>,
}

impl Env {
    /// Load from an explicit file, or from the standard locations when none
    /// is given: `./stackops.env`, then the user config directory.
    pub fn load(path: Option<&Path>) -> Result<Self, OpsError> {
        let path = match path {
            Some(path) => path.to_path_buf(),
            None => Self::find_env_file().ok_or_else(|| {
                OpsError::ConfigError(format!(
                    "No {} found in the current directory or user config directory",
                    ENV_FILE_NAME
                ))
            })?,
        };

        let content = fs::read_to_string(&path).map_err(|e| {
            OpsError::ConfigError(format!("Failed to read {}: {}", path.display(), e))
        })?;

        let mut env = Self::parse(&content);
        env.apply_process_overrides();
        log::debug!("loaded {} variables from {}", env.vars.len(), path.display());
        Ok(env)
    }

    fn find_env_file() -> Option<PathBuf> {
        let local = PathBuf::from(ENV_FILE_NAME);
        if local.is_file() {
            return Some(local);
        }
        let user = dirs::config_dir()?.join("stackops").join(ENV_FILE_NAME);
        user.is_file().then_some(user)
    }

    /// Parse KEY=VALUE lines, skipping blanks, comments, and malformed lines.
    pub fn parse(content: &str) -> Self {
        let mut vars = HashMap::new();
        for line in content.lines() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            let Some((key, value)) = line.split_once('=') else {
                continue;
            };
            vars.insert(key.trim().to_string(), value.trim().to_string());
        }
        Self { vars }
    }

    /// Process environment wins over file values for known keys.
    fn apply_process_overrides(&mut self) {
        for key in self.vars.keys().cloned().collect::<Vec<_>>() {
            if let Ok(value) = env::var(&key) {
                self.vars.insert(key, value);
            }
        }
    }

    #[cfg(test)]
    pub fn from_vars(pairs: &[(&str, &str)]) -> Self {
        Self {
            vars: pairs
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
        }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.vars.get(key).map(String::as_str)
    }

    pub fn get_or<'a>(&'a self, key: &str, default: &'a str) -> &'a str {
        self.get(key).unwrap_or(default)
    }

    /// Verify that every listed key is present, reporting all missing keys.
    pub fn require(&self, keys: &[&str]) -> Result<(), OpsError> {
        let missing: Vec<&str> = keys
            .iter()
            .filter(|key| !self.vars.contains_key(**key))
            .copied()
            .collect();
        if missing.is_empty() {
            Ok(())
        } else {
            Err(OpsError::ConfigError(format!(
                "Missing required configuration keys: {}",
                missing.join(", ")
            )))
        }
    }

    pub fn sites_dir(&self) -> Result<PathBuf, OpsError> {
        self.get(KEY_SITES_DIR)
            .map(PathBuf::from)
            .ok_or_else(|| OpsError::ConfigError(format!("{} is not set", KEY_SITES_DIR)))
    }

    pub fn php_container(&self, domain: &str) -> String {
        format!(
            "{}{}",
            domain,
            self.get_or(KEY_PHP_CONTAINER_SUFFIX, DEFAULT_PHP_CONTAINER_SUFFIX)
        )
    }

    pub fn nginx_container(&self) -> &str {
        self.get_or(KEY_NGINX_CONTAINER, DEFAULT_NGINX_CONTAINER)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_parse_skips_comments_and_blank_lines() {
        let env = Env::parse(
            "# stackops configuration\n\nSITES_DIR=/opt/stackops/sites\n  NGINX_CONTAINER = proxy-1  \nnot a pair\n",
        );
        assert_eq!(env.get("SITES_DIR"), Some("/opt/stackops/sites"));
        assert_eq!(env.get("NGINX_CONTAINER"), Some("proxy-1"));
        assert_eq!(env.get("not a pair"), None);
    }

    #[test]
    fn test_load_reads_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "SITES_DIR=/srv/sites").unwrap();
        let env = Env::load(Some(file.path())).unwrap();
        assert_eq!(env.get("SITES_DIR"), Some("/srv/sites"));
    }

    #[test]
    fn test_load_missing_file_is_config_error() {
        let err = Env::load(Some(Path::new("/nonexistent/stackops.env"))).unwrap_err();
        assert!(err.to_string().contains("Failed to read"));
    }

    #[test]
    fn test_require_reports_all_missing_keys() {
        let env = Env::from_vars(&[("SITES_DIR", "/srv/sites")]);
        assert!(env.require(&["SITES_DIR"]).is_ok());
        let err = env.require(&["SITES_DIR", "A_KEY", "B_KEY"]).unwrap_err();
        let message = err.to_string();
        assert!(message.contains("A_KEY"));
        assert!(message.contains("B_KEY"));
    }

    #[test]
    fn test_container_name_defaults() {
        let env = Env::from_vars(&[]);
        assert_eq!(env.php_container("example.com"), "example.com-php");
        assert_eq!(env.nginx_container(), "nginx-proxy");

        let env = Env::from_vars(&[
            ("PHP_CONTAINER_SUFFIX", "_php82"),
            ("NGINX_CONTAINER", "edge"),
        ]);
        assert_eq!(env.php_container("example.com"), "example.com_php82");
        assert_eq!(env.nginx_container(), "edge");
    }
}
