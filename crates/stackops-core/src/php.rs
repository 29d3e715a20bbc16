//! PHP extension management.
//!
//! The supported extension set is a closed, static registry; installation is
//! a `docker exec` into the site's PHP container followed by recording the
//! extension in the site config, so it can be re-applied after a container
//! rebuild.

use crate::config::Env;
use crate::errors::OpsError;
use crate::ui::console::Console;
use crate::ui::prompt::Prompt;
use crate::website::{self, SiteConfig};
use std::process::Command;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PhpExtension {
    pub id: &'static str,
    pub label: &'static str,
    /// Arguments passed to `docker-php-ext-install`.
    pub install_args: &'static [&'static str],
}

/// Extensions installable through `docker-php-ext-install`. Loader-style
/// extensions that need image-specific setup (ioncube) are out of scope.
pub static EXTENSION_REGISTRY: [PhpExtension; 6] = [
    PhpExtension {
        id: "gd",
        label: "GD (image processing)",
        install_args: &["gd"],
    },
    PhpExtension {
        id: "intl",
        label: "Intl (internationalization)",
        install_args: &["intl"],
    },
    PhpExtension {
        id: "exif",
        label: "Exif (image metadata)",
        install_args: &["exif"],
    },
    PhpExtension {
        id: "bcmath",
        label: "BCMath (arbitrary precision math)",
        install_args: &["bcmath"],
    },
    PhpExtension {
        id: "opcache",
        label: "OPcache (bytecode cache)",
        install_args: &["opcache"],
    },
    PhpExtension {
        id: "pcntl",
        label: "PCNTL (process control)",
        install_args: &["pcntl"],
    },
];

pub fn find_extension(id: &str) -> Option<&'static PhpExtension> {
    EXTENSION_REGISTRY.iter().find(|ext| ext.id == id)
}

/// Install one extension into the site's PHP container and record it in the
/// site config.
pub fn install_extension(
    env: &Env,
    domain: &str,
    extension: &PhpExtension,
) -> Result<(), OpsError> {
    let container = env.php_container(domain);
    log::info!("installing PHP extension '{}' in {}", extension.id, container);

    let output = Command::new("docker")
        .args(["exec", &container, "docker-php-ext-install"])
        .args(extension.install_args)
        .output()
        .map_err(|e| OpsError::CommandError {
            command: format!("docker exec {}", container),
            message: e.to_string(),
        })?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        return Err(OpsError::PhpError(format!(
            "Failed to install '{}' in container '{}': {}",
            extension.id,
            container,
            stderr.trim()
        )));
    }

    record_extension(env, domain, extension.id)?;
    Ok(())
}

/// Remember an installed extension so it survives container rebuilds.
fn record_extension(env: &Env, domain: &str, extension_id: &str) -> Result<(), OpsError> {
    let mut config = website::load_site_config(env, domain)?.unwrap_or(SiteConfig {
        domain: domain.to_string(),
        ..Default::default()
    });
    if !config.php_extensions.iter().any(|id| id == extension_id) {
        config.php_extensions.push(extension_id.to_string());
        website::save_site_config(env, &config)?;
    }
    Ok(())
}

pub struct InstallExtensionInputs {
    pub domain: String,
    pub extension: &'static PhpExtension,
}

/// Select a website and an extension, confirm, install.
pub struct InstallExtensionPrompt {
    env: Env,
}

impl InstallExtensionPrompt {
    pub fn new(env: Env) -> Self {
        Self { env }
    }
}

impl Prompt for InstallExtensionPrompt {
    type Input = InstallExtensionInputs;
    type Output = String;

    fn collect_inputs(
        &mut self,
        console: &mut dyn Console,
    ) -> Result<Option<InstallExtensionInputs>, OpsError> {
        let Some(domain) =
            website::select_website(console, &self.env, "Select a website:")?
        else {
            return Ok(None);
        };

        let labels: Vec<String> = EXTENSION_REGISTRY
            .iter()
            .map(|ext| format!("{} - {}", ext.id, ext.label))
            .collect();
        let Some(chosen) = console.select("Select a PHP extension to install:", &labels)? else {
            return Ok(None);
        };
        let extension = EXTENSION_REGISTRY
            .iter()
            .zip(&labels)
            .find(|(_, label)| **label == chosen)
            .map(|(ext, _)| ext)
            .ok_or_else(|| OpsError::PhpError(format!("Unknown extension choice: {}", chosen)))?;

        match console.confirm(
            &format!("Install '{}' for {}?", extension.id, domain),
            true,
        )? {
            Some(true) => Ok(Some(InstallExtensionInputs { domain, extension })),
            Some(false) | None => Ok(None),
        }
    }

    fn process(
        &mut self,
        _console: &mut dyn Console,
        inputs: InstallExtensionInputs,
    ) -> Result<Option<String>, OpsError> {
        install_extension(&self.env, &inputs.domain, inputs.extension)?;
        Ok(Some(format!(
            "Extension '{}' installed for {}.",
            inputs.extension.id, inputs.domain
        )))
    }

    fn show_results(&self, console: &mut dyn Console, result: &String) {
        console.line(&format!("✅ {}", result));
    }
}
