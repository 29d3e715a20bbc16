//! Interactive workflows for website management.

use crate::config::Env;
use crate::errors::OpsError;
use crate::ssl;
use crate::ui::console::Console;
use crate::ui::prompt::Prompt;
use crate::website::{self, SiteConfig};

/// List every managed website with its SSL state.
pub struct ListWebsitesPrompt {
    env: Env,
}

impl ListWebsitesPrompt {
    pub fn new(env: Env) -> Self {
        Self { env }
    }
}

impl Prompt for ListWebsitesPrompt {
    type Input = ();
    type Output = Vec<(String, bool)>;

    fn collect_inputs(&mut self, _console: &mut dyn Console) -> Result<Option<()>, OpsError> {
        // Nothing to ask; the listing runs unconditionally.
        Ok(Some(()))
    }

    fn process(
        &mut self,
        _console: &mut dyn Console,
        _inputs: (),
    ) -> Result<Option<Self::Output>, OpsError> {
        let domains = website::list_websites(&self.env)?;
        let rows = domains
            .into_iter()
            .map(|domain| {
                let has_ssl = ssl::SslPaths::for_domain(&self.env, &domain)
                    .map(|paths| paths.exist())
                    .unwrap_or(false);
                (domain, has_ssl)
            })
            .collect();
        Ok(Some(rows))
    }

    fn show_results(&self, console: &mut dyn Console, result: &Self::Output) {
        if result.is_empty() {
            console.line("⚠️ No websites found.");
            return;
        }
        console.line(&format!("🌐 Managed websites ({}):", result.len()));
        for (domain, has_ssl) in result {
            let ssl_mark = if *has_ssl { "🔒 SSL" } else { "-" };
            console.line(&format!("  {}  {}", domain, ssl_mark));
        }
    }
}

/// Show the stored configuration of one website.
pub struct WebsiteInfoPrompt {
    env: Env,
}

impl WebsiteInfoPrompt {
    pub fn new(env: Env) -> Self {
        Self { env }
    }
}

pub struct WebsiteInfo {
    pub domain: String,
    pub config: Option<SiteConfig>,
}

impl Prompt for WebsiteInfoPrompt {
    type Input = String;
    type Output = WebsiteInfo;

    fn collect_inputs(
        &mut self,
        console: &mut dyn Console,
    ) -> Result<Option<String>, OpsError> {
        website::select_website(console, &self.env, "Select a website:")
    }

    fn process(
        &mut self,
        _console: &mut dyn Console,
        domain: String,
    ) -> Result<Option<WebsiteInfo>, OpsError> {
        let config = website::load_site_config(&self.env, &domain)?;
        Ok(Some(WebsiteInfo { domain, config }))
    }

    fn show_results(&self, console: &mut dyn Console, result: &WebsiteInfo) {
        console.line(&format!("🌐 Website: {}", result.domain));
        match &result.config {
            Some(config) => {
                let php = config.php_version.as_deref().unwrap_or("unknown");
                console.line(&format!("  PHP version: {}", php));
                if config.php_extensions.is_empty() {
                    console.line("  PHP extensions: none");
                } else {
                    console.line(&format!(
                        "  PHP extensions: {}",
                        config.php_extensions.join(", ")
                    ));
                }
                match &config.ssl {
                    Some(ssl) => console.line(&format!("  SSL: {}", ssl.method)),
                    None => console.line("  SSL: not installed"),
                }
            }
            None => console.line("  No stored configuration for this website."),
        }
    }
}
