//! Interactive workflows for SSL certificate management.

use crate::config::Env;
use crate::editor::choose_editor;
use crate::errors::OpsError;
use crate::ssl::checker::{self, CertInfo};
use crate::ssl::editor::{self, SslEditReport};
use crate::ssl::installer::{self, SslInstallReport};
use crate::ui::console::Console;
use crate::ui::prompt::Prompt;
use crate::website;
use std::path::PathBuf;

/// Inspect the installed certificate of one website.
pub struct CheckSslPrompt {
    env: Env,
}

impl CheckSslPrompt {
    pub fn new(env: Env) -> Self {
        Self { env }
    }
}

impl Prompt for CheckSslPrompt {
    type Input = String;
    type Output = (String, CertInfo);

    fn collect_inputs(
        &mut self,
        console: &mut dyn Console,
    ) -> Result<Option<String>, OpsError> {
        website::select_website(console, &self.env, "Select a website to check:")
    }

    fn process(
        &mut self,
        _console: &mut dyn Console,
        domain: String,
    ) -> Result<Option<Self::Output>, OpsError> {
        let info = checker::check_ssl(&self.env, &domain)?;
        Ok(Some((domain, info)))
    }

    fn show_results(&self, console: &mut dyn Console, result: &Self::Output) {
        let (domain, info) = result;
        console.line(&format!("🔒 Certificate for {}:", domain));
        console.line(&format!("  Subject:    {}", info.subject));
        console.line(&format!("  Issuer:     {}", info.issuer));
        console.line(&format!("  Valid from: {}", info.not_before));
        console.line(&format!("  Valid to:   {}", info.not_after));
    }
}

pub struct EditSslInputs {
    pub domain: String,
    pub confirmed: bool,
}

/// Guarded certificate edit: select, confirm, back up, edit, reload.
pub struct EditSslPrompt {
    env: Env,
}

impl EditSslPrompt {
    pub fn new(env: Env) -> Self {
        Self { env }
    }
}

impl Prompt for EditSslPrompt {
    type Input = EditSslInputs;
    type Output = SslEditReport;

    fn collect_inputs(
        &mut self,
        console: &mut dyn Console,
    ) -> Result<Option<EditSslInputs>, OpsError> {
        let Some(domain) = website::select_website(console, &self.env, "Select a website to edit SSL:")?
        else {
            return Ok(None);
        };
        let Some(confirmed) = console.confirm(
            &format!(
                "Open cert.crt and priv.key of {} in an editor? A backup is created first.",
                domain
            ),
            false,
        )?
        else {
            return Ok(None);
        };
        Ok(Some(EditSslInputs { domain, confirmed }))
    }

    fn process(
        &mut self,
        console: &mut dyn Console,
        inputs: EditSslInputs,
    ) -> Result<Option<SslEditReport>, OpsError> {
        if !inputs.confirmed {
            // A declined confirmation is a completed no-op, not a failure.
            log::debug!("SSL edit declined for {}", inputs.domain);
            return Ok(None);
        }
        let Some(editor) = choose_editor(console)? else {
            return Ok(None);
        };
        let report = editor::edit_ssl(&self.env, &inputs.domain, &editor)?;
        Ok(Some(report))
    }

    fn show_results(&self, console: &mut dyn Console, result: &SslEditReport) {
        console.line(&format!("✅ SSL files of {} updated.", result.domain));
        console.line(&format!(
            "  Previous version backed up at {}",
            result.backup_dir.display()
        ));
        if result.reloaded {
            console.line("  Webserver reloaded.");
        }
    }
}

const MODE_SELFSIGNED: &str = "Generate a self-signed certificate";
const MODE_CUSTOM: &str = "Install an existing certificate pair";

pub enum InstallSslInputs {
    SelfSigned {
        domain: String,
    },
    Custom {
        domain: String,
        cert_src: PathBuf,
        key_src: PathBuf,
    },
}

/// Install a certificate pair: generated self-signed, or supplied by the
/// operator.
pub struct InstallSslPrompt {
    env: Env,
}

impl InstallSslPrompt {
    pub fn new(env: Env) -> Self {
        Self { env }
    }
}

impl Prompt for InstallSslPrompt {
    type Input = InstallSslInputs;
    type Output = SslInstallReport;

    fn collect_inputs(
        &mut self,
        console: &mut dyn Console,
    ) -> Result<Option<InstallSslInputs>, OpsError> {
        let Some(domain) =
            website::select_website(console, &self.env, "Select a website to install SSL:")?
        else {
            return Ok(None);
        };
        let Some(mode) = console.select(
            "How should the certificate be obtained?",
            &[MODE_SELFSIGNED.to_string(), MODE_CUSTOM.to_string()],
        )?
        else {
            return Ok(None);
        };

        if mode == MODE_SELFSIGNED {
            let Some(confirmed) = console.confirm(
                &format!(
                    "Generate a self-signed certificate for {} and reload the webserver?",
                    domain
                ),
                true,
            )?
            else {
                return Ok(None);
            };
            if !confirmed {
                return Ok(None);
            }
            return Ok(Some(InstallSslInputs::SelfSigned { domain }));
        }

        let Some(cert_src) = console.input("Path to the certificate file (.crt/.pem):")? else {
            return Ok(None);
        };
        let Some(key_src) = console.input("Path to the private key file:")? else {
            return Ok(None);
        };
        let Some(confirmed) = console.confirm(
            &format!("Install this certificate for {} and reload the webserver?", domain),
            true,
        )?
        else {
            return Ok(None);
        };
        if !confirmed {
            return Ok(None);
        }
        Ok(Some(InstallSslInputs::Custom {
            domain,
            cert_src: PathBuf::from(cert_src),
            key_src: PathBuf::from(key_src),
        }))
    }

    fn process(
        &mut self,
        _console: &mut dyn Console,
        inputs: InstallSslInputs,
    ) -> Result<Option<SslInstallReport>, OpsError> {
        let report = match inputs {
            InstallSslInputs::SelfSigned { domain } => {
                installer::install_selfsigned(&self.env, &domain)?
            }
            InstallSslInputs::Custom {
                domain,
                cert_src,
                key_src,
            } => installer::install_ssl(&self.env, &domain, &cert_src, &key_src)?,
        };
        Ok(Some(report))
    }

    fn show_results(&self, console: &mut dyn Console, result: &SslInstallReport) {
        console.line(&format!("✅ Certificate installed for {}.", result.domain));
        match &result.replaced_backup {
            Some(backup) => console.line(&format!(
                "  Replaced pair backed up at {}",
                backup.display()
            )),
            None => console.line("  No previous certificate was present."),
        }
    }
}
