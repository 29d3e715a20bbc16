//! Webserver control through the `docker` CLI.
//!
//! The nginx proxy runs as a container; reload and config-test are plain
//! `docker exec` invocations, with stderr folded into the error so the
//! operator sees nginx's own message when something is wrong.

use crate::config::Env;
use crate::errors::OpsError;
use std::process::Command;

/// `nginx -s reload` inside the proxy container.
pub fn reload(env: &Env) -> Result<(), OpsError> {
    exec_nginx(env, &["-s", "reload"])?;
    log::info!("webserver reloaded");
    Ok(())
}

/// `nginx -t` inside the proxy container.
pub fn test_config(env: &Env) -> Result<(), OpsError> {
    exec_nginx(env, &["-t"])
}

fn exec_nginx(env: &Env, args: &[&str]) -> Result<(), OpsError> {
    let container = env.nginx_container();
    let output = Command::new("docker")
        .args(["exec", container, "nginx"])
        .args(args)
        .output()
        .map_err(|e| OpsError::CommandError {
            command: format!("docker exec {} nginx", container),
            message: e.to_string(),
        })?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        return Err(OpsError::WebserverError(format!(
            "nginx {} failed in container '{}': {}",
            args.join(" "),
            container,
            stderr.trim()
        )));
    }
    Ok(())
}
