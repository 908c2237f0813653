//! Server configuration.
//!
//! Values are resolved in three layers: an optional TOML file, then
//! `ENVIROCAR_*` environment variables, then command line flags (applied by
//! the binary).

use std::net::SocketAddr;
use std::path::Path;

use envirocar_auth::AuthConfig;
use envirocar_core::filter::{DEFAULT_LIMIT, MAX_LIMIT};
use envirocar_encoding::shapefile::DEFAULT_MAX_MEASUREMENTS;
use envirocar_encoding::LinkBuilder;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Prefix of every environment override.
pub const ENV_PREFIX: &str = "ENVIROCAR_";

// ============================================================================
// Sections
// ============================================================================

/// Shapefile export limits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShapefileConfig {
    /// Longest track, in measurements, exported as a shapefile.
    pub max_measurements: usize,
}

impl Default for ShapefileConfig {
    fn default() -> Self {
        Self {
            max_measurements: DEFAULT_MAX_MEASUREMENTS,
        }
    }
}

/// Page sizes for collection resources.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PaginationConfig {
    /// Page size when a client names a page but no limit.
    pub default_limit: usize,
    /// Largest page size a client may ask for.
    pub max_limit: usize,
}

impl Default for PaginationConfig {
    fn default() -> Self {
        Self {
            default_limit: DEFAULT_LIMIT,
            max_limit: MAX_LIMIT,
        }
    }
}

// ============================================================================
// ServerConfig
// ============================================================================

/// Complete server configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Interface to bind.
    pub host: String,
    /// Port to bind.
    pub port: u16,
    /// Public base URL resource links are built from. Empty means
    /// `http://{host}:{port}`.
    pub base_url: String,
    /// Credential header names.
    pub auth: AuthConfig,
    /// Shapefile export limits.
    pub shapefile: ShapefileConfig,
    /// Page sizes.
    pub pagination: PaginationConfig,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8080,
            base_url: String::new(),
            auth: AuthConfig::default(),
            shapefile: ShapefileConfig::default(),
            pagination: PaginationConfig::default(),
        }
    }
}

impl ServerConfig {
    /// Loads the configuration from an optional TOML file and the process
    /// environment.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut config = match path {
            Some(path) => Self::from_file(path)?,
            None => Self::default(),
        };
        config.apply_env(|key| std::env::var(key).ok())?;
        config.validate()?;
        Ok(config)
    }

    /// Reads a TOML file. Missing keys take their defaults.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| Error::config(format!("Failed to read {}: {e}", path.display())))?;
        Self::from_toml(&content)
            .map_err(|e| Error::config(format!("Failed to parse {}: {e}", path.display())))
    }

    /// Parses TOML text.
    pub fn from_toml(content: &str) -> Result<Self> {
        toml::from_str(content).map_err(|e| Error::config(e.to_string()))
    }

    /// Serializes the configuration as TOML.
    pub fn to_toml_string(&self) -> Result<String> {
        toml::to_string_pretty(self).map_err(|e| Error::config(e.to_string()))
    }

    /// Applies `ENVIROCAR_*` overrides read through `lookup`.
    pub fn apply_env<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |name: &str| lookup(&format!("{ENV_PREFIX}{name}"));

        if let Some(host) = var("HOST") {
            self.host = host;
        }
        if let Some(port) = var("PORT") {
            self.port = parse_env("PORT", &port)?;
        }
        if let Some(base_url) = var("BASE_URL") {
            self.base_url = base_url;
        }
        if let Some(header) = var("USERNAME_HEADER") {
            self.auth.username_header = header;
        }
        if let Some(header) = var("TOKEN_HEADER") {
            self.auth.token_header = header;
        }
        if let Some(max) = var("SHAPEFILE_MAX_MEASUREMENTS") {
            self.shapefile.max_measurements = parse_env("SHAPEFILE_MAX_MEASUREMENTS", &max)?;
        }
        Ok(())
    }

    /// Checks values that serde cannot.
    pub fn validate(&self) -> Result<()> {
        if self.auth.username_header.trim().is_empty() || self.auth.token_header.trim().is_empty()
        {
            return Err(Error::config("credential header names must not be empty"));
        }
        if self
            .auth
            .username_header
            .eq_ignore_ascii_case(&self.auth.token_header)
        {
            return Err(Error::config(
                "username and token must be carried in different headers",
            ));
        }
        if http::HeaderName::from_bytes(self.auth.username_header.as_bytes()).is_err()
            || http::HeaderName::from_bytes(self.auth.token_header.as_bytes()).is_err()
        {
            return Err(Error::config("credential header names must be valid HTTP header names"));
        }
        if self.shapefile.max_measurements == 0 {
            return Err(Error::config("shapefile.max_measurements must be at least 1"));
        }
        let PaginationConfig {
            default_limit,
            max_limit,
        } = self.pagination;
        if default_limit == 0 || default_limit > max_limit {
            return Err(Error::config(format!(
                "pagination.default_limit must be in 1..={max_limit}, got {default_limit}"
            )));
        }
        self.link_builder()?;
        Ok(())
    }

    /// The address to bind. `host` may be an IP literal or a host name;
    /// names resolve to their first address.
    pub async fn socket_addr(&self) -> Result<SocketAddr> {
        let host = self.host.trim();
        tokio::net::lookup_host((host, self.port))
            .await
            .map_err(|e| Error::config(format!("cannot resolve host '{host}': {e}")))?
            .next()
            .ok_or_else(|| Error::config(format!("host '{host}' has no address")))
    }

    /// The effective public base URL.
    pub fn base_url(&self) -> String {
        if self.base_url.trim().is_empty() {
            format!("http://{}:{}", self.host, self.port)
        } else {
            self.base_url.trim().to_string()
        }
    }

    /// A link builder for the effective base URL.
    pub fn link_builder(&self) -> Result<LinkBuilder> {
        let base = self.base_url();
        LinkBuilder::new(&base).map_err(|e| Error::config(format!("invalid base_url '{base}': {e}")))
    }
}

fn parse_env<T: std::str::FromStr>(name: &str, value: &str) -> Result<T>
where
    T::Err: std::fmt::Display,
{
    value
        .trim()
        .parse()
        .map_err(|e| Error::config(format!("{ENV_PREFIX}{name}='{value}': {e}")))
}

// ============================================================================
// Tests
// ============================================================================
