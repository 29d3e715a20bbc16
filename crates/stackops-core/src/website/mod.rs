//! Website inventory and per-site configuration.
//!
//! A website is a subdirectory of `SITES_DIR` named after its domain, with an
//! optional `.config.json` describing the PHP version, installed extensions,
//! and SSL metadata. Directory names that are not plausible domains (work
//! dirs, backups) are ignored by the listing.

pub mod prompts;

use crate::config::Env;
use crate::errors::OpsError;
use crate::ui::console::Console;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;
use std::sync::OnceLock;

pub const SITE_CONFIG_FILE: &str = ".config.json";

fn domain_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"^[a-z0-9]([a-z0-9-]*[a-z0-9])?(\.[a-z0-9]([a-z0-9-]*[a-z0-9])?)+$")
            .expect("domain regex is valid")
    })
}

pub fn is_valid_domain(name: &str) -> bool {
    name.len() <= 253 && domain_regex().is_match(name)
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SslSettings {
    pub method: String,
    #[serde(default)]
    pub installed_at: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct SiteConfig {
    pub domain: String,
    #[serde(default)]
    pub php_version: Option<String>,
    #[serde(default)]
    pub php_extensions: Vec<String>,
    #[serde(default)]
    pub ssl: Option<SslSettings>,
}

/// Domains of all managed websites, sorted.
pub fn list_websites(env: &Env) -> Result<Vec<String>, OpsError> {
    let sites_dir = env.sites_dir()?;
    let entries = fs::read_dir(&sites_dir).map_err(|e| {
        OpsError::WebsiteError(format!(
            "Failed to read sites directory {}: {}",
            sites_dir.display(),
            e
        ))
    })?;

    let mut domains = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|e| OpsError::WebsiteError(e.to_string()))?;
        if !entry.path().is_dir() {
            continue;
        }
        let name = entry.file_name().to_string_lossy().to_string();
        if is_valid_domain(&name) {
            domains.push(name);
        } else {
            log::debug!("skipping non-domain entry '{}' in sites dir", name);
        }
    }
    domains.sort();
    Ok(domains)
}

/// Present the managed websites and block for one choice. `Ok(None)` when
/// there is nothing to choose from or the user cancels.
pub fn select_website(
    console: &mut dyn Console,
    env: &Env,
    title: &str,
) -> Result<Option<String>, OpsError> {
    let domains = list_websites(env)?;
    if domains.is_empty() {
        console.line("⚠️ No websites found.");
        return Ok(None);
    }
    console.select(title, &domains)
}

pub fn site_dir(env: &Env, domain: &str) -> Result<PathBuf, OpsError> {
    Ok(env.sites_dir()?.join(domain))
}

pub fn load_site_config(env: &Env, domain: &str) -> Result<Option<SiteConfig>, OpsError> {
    let path = site_dir(env, domain)?.join(SITE_CONFIG_FILE);
    if !path.is_file() {
        return Ok(None);
    }
    let content = fs::read_to_string(&path).map_err(|e| {
        OpsError::WebsiteError(format!("Failed to read {}: {}", path.display(), e))
    })?;
    let config: SiteConfig = serde_json::from_str(&content).map_err(|e| {
        OpsError::WebsiteError(format!("Invalid site config {}: {}", path.display(), e))
    })?;
    Ok(Some(config))
}

pub fn save_site_config(env: &Env, config: &SiteConfig) -> Result<(), OpsError> {
    let path = site_dir(env, &config.domain)?.join(SITE_CONFIG_FILE);
    let content = serde_json::to_string_pretty(config)
        .map_err(|e| OpsError::WebsiteError(format!("Failed to serialize site config: {}", e)))?;
    fs::write(&path, content).map_err(|e| {
        OpsError::WebsiteError(format!("Failed to write {}: {}", path.display(), e))
    })?;
    log::debug!("saved site config for {}", config.domain);
    Ok(())
}
