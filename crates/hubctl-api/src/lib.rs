// hubctl-api: Async Rust client for the JupyterHub REST API.
//
// Configuration resolves once from explicit values, `JUPYTERHUB_*`
// environment variables and defaults. `HubClient` then performs single,
// authenticated round trips against the hub's API URL.

pub mod auth;
pub mod client;
pub mod config;
pub mod endpoints;
pub mod error;
pub mod models;
pub mod transport;

// ── Primary re-exports ──────────────────────────────────────────────
pub use auth::{AuthScheme, Credentials};
pub use client::{ApiRequest, HubClient, decode};
pub use config::{ClientConfig, ClientConfigBuilder, ConfigError, EnvSource, PartialConfig, ProcessEnv};
pub use endpoints::parse_oauth_callback;
pub use error::Error;
pub use transport::{TlsMode, TransportConfig};

pub use reqwest::Method;
pub use tokio_util::sync::CancellationToken;
