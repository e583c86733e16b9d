use std::env;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};

/// Root directory served when `LOG_ROOT_PATH` is unset.
pub const DEFAULT_LOG_ROOT: &str = "/srv/static/logs";

/// Listen port when `HTTP_PORT` is unset.
pub const DEFAULT_HTTP_PORT: u16 = 8710;

#[derive(Debug)]
pub struct Settings {
    /// Root directory the served log files live under.
    pub log_root: PathBuf,
    /// Main HTTP server port (log view + health).
    pub http_port: u16,
}

impl Settings {
    /// Validates the settings and returns an error if invalid.
    pub fn validate(&self) -> Result<()> {
        validate_log_root(&self.log_root)?;
        validate_port(self.http_port)?;
        Ok(())
    }
}

/// The root must be absolute: containment of resolved request paths is
/// checked against it, and a relative root would make that check depend on
/// the working directory.
fn validate_log_root(root: &Path) -> Result<()> {
    if root.as_os_str().is_empty() {
        bail!("Log root cannot be empty");
    }
    if !root.is_absolute() {
        bail!("Log root must be an absolute path");
    }
    Ok(())
}

/// Validates that the port is in valid range (1-65535).
fn validate_port(port: u16) -> Result<()> {
    if port == 0 {
        bail!("Port cannot be 0");
    }
    Ok(())
}

pub fn get_configuration() -> Result<Settings> {
    let log_root = PathBuf::from(
        env::var("LOG_ROOT_PATH").unwrap_or_else(|_| DEFAULT_LOG_ROOT.to_string()),
    );
    let http_port = env::var("HTTP_PORT")
        .unwrap_or_else(|_| DEFAULT_HTTP_PORT.to_string())
        .parse::<u16>()
        .context("HTTP_PORT must be a port number")?;

    let settings = Settings {
        log_root,
        http_port,
    };

    // Validate settings before returning
    settings.validate()?;

    Ok(settings)
}
