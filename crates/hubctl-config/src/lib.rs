//! Profile configuration for hubctl.
//!
//! TOML profiles, loading through figment (defaults, file, `HUBCTL_*`
//! environment), and translation to the explicit layer of
//! `hubctl_api::ClientConfig` plus a `TransportConfig`. Anything a profile
//! leaves unset still falls through to the `JUPYTERHUB_*` environment when
//! the client config resolves.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::time::Duration;

use directories::ProjectDirs;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use secrecy::SecretString;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use hubctl_api::{EnvSource, PartialConfig, TlsMode, TransportConfig};

// ── Error ───────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("profile '{name}' not found in config")]
    ProfileNotFound { name: String },

    #[error("failed to serialize config: {0}")]
    Serialization(#[from] toml::ser::Error),

    #[error("config loading failed: {0}")]
    Figment(Box<figment::Error>),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<figment::Error> for ConfigError {
    fn from(err: figment::Error) -> Self {
        Self::Figment(Box::new(err))
    }
}

// ── TOML config structs ─────────────────────────────────────────────

/// Top-level TOML configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Config {
    /// Profile used when `--profile` is not given.
    pub default_profile: Option<String>,

    #[serde(default)]
    pub defaults: Defaults,

    /// Named hub profiles.
    #[serde(default)]
    pub profiles: BTreeMap<String, Profile>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            default_profile: Some("default".into()),
            defaults: Defaults::default(),
            profiles: BTreeMap::new(),
        }
    }
}

impl Config {
    /// Look up a profile by name, or the default profile when `name` is `None`.
    ///
    /// An unnamed lookup with no matching default profile yields `None`; the
    /// caller then relies on flags and environment alone. An explicitly named
    /// profile that does not exist is an error.
    pub fn profile(&self, name: Option<&str>) -> Result<Option<&Profile>, ConfigError> {
        match name {
            Some(name) => self
                .profiles
                .get(name)
                .map(Some)
                .ok_or_else(|| ConfigError::ProfileNotFound { name: name.into() }),
            None => Ok(self
                .default_profile
                .as_deref()
                .and_then(|name| self.profiles.get(name))),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Defaults {
    /// Output format used when neither `--output` nor `HUBCTL_OUTPUT` is given.
    #[serde(default = "default_output")]
    pub output: String,

    #[serde(default)]
    pub insecure: bool,

    /// Request timeout in seconds. Unset means no timeout.
    #[serde(default)]
    pub timeout: Option<u64>,
}

impl Default for Defaults {
    fn default() -> Self {
        Self {
            output: default_output(),
            insecure: false,
            timeout: None,
        }
    }
}

fn default_output() -> String {
    "table".into()
}

/// A named hub profile.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct Profile {
    /// Full API URL (e.g. "https://hub.example.org/hub/api").
    pub api_url: Option<String>,

    /// Used with `host` and `url_prefix` when `api_url` is unset.
    pub protocol: Option<String>,
    pub host: Option<String>,
    pub url_prefix: Option<String>,

    /// API token (plaintext; prefer `api_token_env`).
    pub api_token: Option<String>,

    /// Environment variable name containing the API token.
    pub api_token_env: Option<String>,

    pub username: Option<String>,

    /// Password for Basic auth (plaintext).
    pub password: Option<String>,

    pub service_name: Option<String>,
    pub client_id: Option<String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub oauth_scopes: Vec<String>,

    /// Path to a custom CA certificate.
    pub ca_cert: Option<PathBuf>,

    /// Override the global insecure TLS setting.
    pub insecure: Option<bool>,

    /// Override the global timeout (seconds).
    pub timeout: Option<u64>,
}

impl Profile {
    /// Explicit client settings carried by this profile.
    ///
    /// The token comes from `api_token_env` when that variable is set,
    /// otherwise from the plaintext `api_token`.
    pub fn to_partial(&self, env: &impl EnvSource) -> PartialConfig {
        let api_token = self
            .api_token_env
            .as_deref()
            .and_then(|name| env.var(name))
            .filter(|v| !v.is_empty())
            .or_else(|| self.api_token.clone())
            .map(SecretString::from);

        PartialConfig {
            api_token,
            username: self.username.clone(),
            password: self.password.clone().map(SecretString::from),
            api_url: self.api_url.clone(),
            protocol: self.protocol.clone(),
            host: self.host.clone(),
            url_prefix: self.url_prefix.clone(),
            service_name: self.service_name.clone(),
            client_id: self.client_id.clone(),
            oauth_scopes: self.oauth_scopes.clone(),
            ..PartialConfig::default()
        }
    }

    /// Transport settings, with this profile's overrides applied over `defaults`.
    pub fn transport(&self, defaults: &Defaults) -> TransportConfig {
        let tls = if self.insecure.unwrap_or(defaults.insecure) {
            TlsMode::DangerAcceptInvalid
        } else if let Some(ref ca_path) = self.ca_cert {
            TlsMode::CustomCa(ca_path.clone())
        } else {
            TlsMode::System
        };

        TransportConfig {
            tls,
            timeout: self.timeout.or(defaults.timeout).map(Duration::from_secs),
            ..TransportConfig::default()
        }
    }
}

// ── Config file path ────────────────────────────────────────────────

/// Resolve the config file path via XDG / platform conventions.
pub fn config_path() -> PathBuf {
    ProjectDirs::from("org", "hubctl", "hubctl").map_or_else(
        || {
            let mut p = dirs_fallback();
            p.push("config.toml");
            p
        },
        |dirs| dirs.config_dir().join("config.toml"),
    )
}

fn dirs_fallback() -> PathBuf {
    let mut p = PathBuf::from(std::env::var("HOME").unwrap_or_else(|_| ".".into()));
    p.push(".config");
    p.push("hubctl");
    p
}

// ── Config loading ──────────────────────────────────────────────────

/// Load the full Config from the canonical file + environment.
pub fn load_config() -> Result<Config, ConfigError> {
    load_config_from(&config_path())
}

/// Load from `path`, layering defaults, the TOML file (if present) and
/// `HUBCTL_*` variables (`__` separates nested keys).
pub fn load_config_from(path: &Path) -> Result<Config, ConfigError> {
    let figment = Figment::new()
        .merge(Serialized::defaults(Config::default()))
        .merge(Toml::file(path))
        .merge(Env::prefixed("HUBCTL_").split("__"));

    let config: Config = figment.extract()?;
    Ok(config)
}

/// Load config, returning a default if the file doesn't exist.
pub fn load_config_or_default() -> Config {
    load_config().unwrap_or_default()
}

// ── Config saving ───────────────────────────────────────────────────

/// Serialize config to TOML and write to the canonical config path.
pub fn save_config(cfg: &Config) -> Result<PathBuf, ConfigError> {
    let path = config_path();
    save_config_to(cfg, &path)?;
    Ok(path)
}

pub fn save_config_to(cfg: &Config, path: &Path) -> Result<(), ConfigError> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let toml_str = toml::to_string_pretty(cfg)?;
    std::fs::write(path, toml_str)?;
    Ok(())
}
