//! HTTP server settings.
//!
//! Read from the `[server]` section of `items.toml` when present, then
//! overridden by `HOST`, `PORT`, `TEMPLATES_GLOB` and `STATIC_DIR`.

use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::path::{Path, PathBuf};

/// Server settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Glob of template files; the embedded templates are used when unset
    pub templates_glob: Option<String>,
    /// Directory served under `/static`
    pub static_dir: PathBuf,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
            templates_glob: None,
            static_dir: PathBuf::from("static"),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
struct ServerFile {
    #[serde(default)]
    server: ServerConfig,
}

impl ServerConfig {
    /// Defaults overridden by the environment.
    pub fn from_env() -> anyhow::Result<Self> {
        Self::default().with_env_overrides()
    }

    /// Read the `[server]` section of a TOML file; other sections are ignored.
    pub fn from_file<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> anyhow::Result<Self> {
        let file: ServerFile = toml::from_str(content)?;
        Ok(file.server)
    }

    /// Apply `HOST`, `PORT`, `TEMPLATES_GLOB` and `STATIC_DIR` when set.
    pub fn with_env_overrides(mut self) -> anyhow::Result<Self> {
        if let Ok(host) = std::env::var("HOST") {
            self.host = host;
        }
        if let Ok(port) = std::env::var("PORT") {
            self.port = port
                .parse()
                .map_err(|_| anyhow::anyhow!("PORT must be a valid port number, got '{}'", port))?;
        }
        if let Ok(glob) = std::env::var("TEMPLATES_GLOB") {
            self.templates_glob = Some(glob);
        }
        if let Ok(dir) = std::env::var("STATIC_DIR") {
            self.static_dir = PathBuf::from(dir);
        }
        Ok(self)
    }

    /// Address to bind.
    pub fn socket_addr(&self) -> anyhow::Result<SocketAddr> {
        Ok(format!("{}:{}", self.host, self.port).parse()?)
    }
}
