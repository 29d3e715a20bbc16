//! Certificate inspection via the system `openssl` binary.
//!
//! Parsing X.509 in-process is out of scope; `openssl x509` is assumed to be
//! present on any host that serves TLS, and its `-noout` text output is
//! stable enough to pick the subject, issuer, and validity window out of.

use crate::config::Env;
use crate::errors::OpsError;
use crate::ssl::SslPaths;
use std::process::Command;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct CertInfo {
    pub subject: String,
    pub issuer: String,
    pub not_before: String,
    pub not_after: String,
}

pub fn check_ssl(env: &Env, domain: &str) -> Result<CertInfo, OpsError> {
    let paths = SslPaths::for_domain(env, domain)?;
    paths.ensure_exist()?;

    let output = Command::new("openssl")
        .args(["x509", "-noout", "-subject", "-issuer", "-dates", "-in"])
        .arg(&paths.cert)
        .output()
        .map_err(|e| OpsError::CommandError {
            command: "openssl x509".to_string(),
            message: e.to_string(),
        })?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        return Err(OpsError::SslError(format!(
            "openssl could not read {}: {}",
            paths.cert.display(),
            stderr.trim()
        )));
    }

    Ok(parse_x509_summary(&String::from_utf8_lossy(&output.stdout)))
}

/// Pick the known fields out of `openssl x509 -noout -subject -issuer -dates`
/// output. Unknown lines are ignored.
fn parse_x509_summary(output: &str) -> CertInfo {
    let mut info = CertInfo::default();
    for line in output.lines() {
        let line = line.trim();
        if let Some(value) = line.strip_prefix("subject=") {
            info.subject = value.trim().to_string();
        } else if let Some(value) = line.strip_prefix("issuer=") {
            info.issuer = value.trim().to_string();
        } else if let Some(value) = line.strip_prefix("notBefore=") {
            info.not_before = value.trim().to_string();
        } else if let Some(value) = line.strip_prefix("notAfter=") {
            info.not_after = value.trim().to_string();
        }
    }
    info
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_x509_summary() {
        let output = "\
subject=CN = example.com, O = Example Org
issuer=C = US, O = Let's Encrypt, CN = R11
notBefore=Jun  1 00:00:00 2026 GMT
notAfter=Aug 30 23:59:59 2026 GMT
";
        let info = parse_x509_summary(output);
        assert_eq!(info.subject, "CN = example.com, O = Example Org");
        assert_eq!(info.issuer, "C = US, O = Let's Encrypt, CN = R11");
        assert_eq!(info.not_before, "Jun  1 00:00:00 2026 GMT");
        assert_eq!(info.not_after, "Aug 30 23:59:59 2026 GMT");
    }

    #[test]
    fn test_parse_ignores_unknown_lines() {
        let info = parse_x509_summary("serial=0A\nsubject=CN = a.example.com\n");
        assert_eq!(info.subject, "CN = a.example.com");
        assert_eq!(info.issuer, "");
    }
}
