//! Client configuration and its resolution from explicit values,
//! environment variables, and built-in defaults.
//!
//! [`PartialConfig`] is the explicit layer handed in by a caller (or built
//! from a profile file). [`ClientConfig::resolve`] layers it over the
//! `JUPYTERHUB_*` environment and the defaults below, producing an immutable
//! configuration. The environment is only ever read here -- the request
//! executor works purely from the resolved [`ClientConfig`].

use std::collections::HashMap;
use std::hash::BuildHasher;

use secrecy::{ExposeSecret, SecretString};
use thiserror::Error;
use url::Url;

use crate::auth::Credentials;

pub const DEFAULT_PROTOCOL: &str = "http";
pub const DEFAULT_HOST: &str = "localhost:8000";
pub const DEFAULT_URL_PREFIX: &str = "/hub/api";
pub const DEFAULT_BASE_URL: &str = "/";

/// Environment variables consulted by the resolver.
pub mod env_var {
    pub const API_TOKEN: &str = "JUPYTERHUB_API_TOKEN";
    pub const USERNAME: &str = "JUPYTERHUB_USERNAME";
    pub const PASSWORD: &str = "JUPYTERHUB_PASSWORD";
    pub const API_URL: &str = "JUPYTERHUB_API_URL";
    pub const PROTOCOL: &str = "JUPYTERHUB_PROTOCOL";
    pub const HOST: &str = "JUPYTERHUB_HOST";
    pub const URL_PREFIX: &str = "JUPYTERHUB_URL_PREFIX";
    pub const BASE_URL: &str = "JUPYTERHUB_BASE_URL";
    pub const SERVICE_NAME: &str = "JUPYTERHUB_SERVICE_NAME";
    pub const SERVICE_PREFIX: &str = "JUPYTERHUB_SERVICE_PREFIX";
    pub const SERVICE_URL: &str = "JUPYTERHUB_SERVICE_URL";
    pub const OAUTH_SCOPES: &str = "JUPYTERHUB_OAUTH_SCOPES";
    pub const OAUTH_ACCESS_SCOPES: &str = "JUPYTERHUB_OAUTH_ACCESS_SCOPES";
    pub const OAUTH_CLIENT_ALLOWED_SCOPES: &str = "JUPYTERHUB_OAUTH_CLIENT_ALLOWED_SCOPES";
    pub const CLIENT_ID: &str = "JUPYTERHUB_CLIENT_ID";
}

// ── Error ───────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing credential: expected {expected}")]
    MissingCredential { expected: String },

    #[error("malformed value for {field}: expected a JSON array of strings ({source})")]
    MalformedField {
        field: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid {field}: {reason}")]
    Validation { field: String, reason: String },
}

// ── Environment seam ────────────────────────────────────────────────

/// Source of environment variables for the resolver.
///
/// [`ProcessEnv`] reads the real process environment; a `HashMap` works as
/// an in-memory environment.
pub trait EnvSource {
    fn var(&self, key: &str) -> Option<String>;
}

/// The real process environment.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessEnv;

impl EnvSource for ProcessEnv {
    fn var(&self, key: &str) -> Option<String> {
        std::env::var(key).ok()
    }
}

impl<S: BuildHasher> EnvSource for HashMap<String, String, S> {
    fn var(&self, key: &str) -> Option<String> {
        self.get(key).cloned()
    }
}

impl<S: BuildHasher> EnvSource for HashMap<&str, &str, S> {
    fn var(&self, key: &str) -> Option<String> {
        self.get(key).map(|v| (*v).to_owned())
    }
}

// ── Explicit layer ──────────────────────────────────────────────────

/// Caller-supplied configuration. Every field is optional; empty strings
/// and empty lists count as "not supplied".
#[derive(Debug, Clone, Default)]
pub struct PartialConfig {
    pub api_token: Option<SecretString>,
    pub username: Option<String>,
    pub password: Option<SecretString>,
    /// Full API URL, e.g. `https://hub.example.org/hub/api`. Takes precedence
    /// over `protocol` + `host` + `url_prefix`.
    pub api_url: Option<String>,
    pub protocol: Option<String>,
    pub host: Option<String>,
    pub url_prefix: Option<String>,
    pub base_url: Option<String>,
    pub service_name: Option<String>,
    pub service_prefix: Option<String>,
    pub service_url: Option<String>,
    pub oauth_scopes: Vec<String>,
    pub oauth_access_scopes: Vec<String>,
    pub oauth_client_allowed_scopes: Vec<String>,
    pub client_id: Option<String>,
}

// ── Resolved configuration ──────────────────────────────────────────

/// Immutable, fully resolved client configuration.
///
/// Cheap to clone and safe to share across tasks. There are no setters;
/// build a new one with [`ClientConfig::builder`] instead.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    credentials: Credentials,
    api_url: Url,
    url_prefix: String,
    base_url: String,
    service_name: Option<String>,
    service_prefix: Option<String>,
    service_url: Option<String>,
    oauth_scopes: Vec<String>,
    oauth_access_scopes: Vec<String>,
    oauth_client_allowed_scopes: Vec<String>,
    client_id: Option<String>,
}

impl ClientConfig {
    pub fn builder() -> ClientConfigBuilder {
        ClientConfigBuilder::default()
    }

    /// Resolve against the process environment.
    pub fn resolve(explicit: PartialConfig) -> Result<Self, ConfigError> {
        Self::resolve_with(explicit, &ProcessEnv)
    }

    /// Resolve against an arbitrary environment.
    ///
    /// Precedence for every field: explicit (non-empty) value, then the
    /// environment variable (set and non-empty), then the default.
    pub fn resolve_with(explicit: PartialConfig, env: &impl EnvSource) -> Result<Self, ConfigError> {
        let credentials = resolve_credentials(
            explicit.api_token,
            explicit.username,
            explicit.password,
            env,
        )?;

        let url_prefix = pick(explicit.url_prefix, env, env_var::URL_PREFIX)
            .unwrap_or_else(|| DEFAULT_URL_PREFIX.to_owned());

        let raw_api_url = if let Some(url) = pick(explicit.api_url, env, env_var::API_URL) {
            url
        } else {
            let protocol = pick(explicit.protocol, env, env_var::PROTOCOL)
                .unwrap_or_else(|| DEFAULT_PROTOCOL.to_owned());
            let host =
                pick(explicit.host, env, env_var::HOST).unwrap_or_else(|| DEFAULT_HOST.to_owned());
            compose_api_url(&protocol, &host, &url_prefix)
        };
        let api_url = parse_api_url(&raw_api_url)?;

        Ok(Self {
            credentials,
            api_url,
            url_prefix,
            base_url: pick(explicit.base_url, env, env_var::BASE_URL)
                .unwrap_or_else(|| DEFAULT_BASE_URL.to_owned()),
            service_name: pick(explicit.service_name, env, env_var::SERVICE_NAME),
            service_prefix: pick(explicit.service_prefix, env, env_var::SERVICE_PREFIX),
            service_url: pick(explicit.service_url, env, env_var::SERVICE_URL),
            oauth_scopes: pick_list(explicit.oauth_scopes, env, env_var::OAUTH_SCOPES)?,
            oauth_access_scopes: pick_list(
                explicit.oauth_access_scopes,
                env,
                env_var::OAUTH_ACCESS_SCOPES,
            )?,
            oauth_client_allowed_scopes: pick_list(
                explicit.oauth_client_allowed_scopes,
                env,
                env_var::OAUTH_CLIENT_ALLOWED_SCOPES,
            )?,
            client_id: pick(explicit.client_id, env, env_var::CLIENT_ID),
        })
    }

    // ── Accessors ────────────────────────────────────────────────────

    pub fn credentials(&self) -> &Credentials {
        &self.credentials
    }

    /// Root of the REST API; relative paths are appended to it.
    pub fn api_url(&self) -> &Url {
        &self.api_url
    }

    /// The resolved API path prefix (`JUPYTERHUB_URL_PREFIX`, default `/hub/api`).
    ///
    /// Only used to compose the API URL when no api url was given; with an
    /// explicit or `JUPYTERHUB_API_URL` value this reports the prefix that
    /// would have been used, not one present in [`api_url`](Self::api_url).
    pub fn url_prefix(&self) -> &str {
        &self.url_prefix
    }

    /// Base URL of the hub itself (`JUPYTERHUB_BASE_URL`).
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn service_name(&self) -> Option<&str> {
        self.service_name.as_deref()
    }

    pub fn service_prefix(&self) -> Option<&str> {
        self.service_prefix.as_deref()
    }

    pub fn service_url(&self) -> Option<&str> {
        self.service_url.as_deref()
    }

    pub fn oauth_scopes(&self) -> &[String] {
        &self.oauth_scopes
    }

    pub fn oauth_access_scopes(&self) -> &[String] {
        &self.oauth_access_scopes
    }

    pub fn oauth_client_allowed_scopes(&self) -> &[String] {
        &self.oauth_client_allowed_scopes
    }

    pub fn client_id(&self) -> Option<&str> {
        self.client_id.as_deref()
    }

    /// Full URL for a relative API path: `{api_url}/{path}`.
    ///
    /// Exactly one slash separates the two halves regardless of trailing or
    /// leading slashes. An empty path addresses the API root.
    pub fn endpoint_url(&self, path: &str) -> Result<Url, url::ParseError> {
        let base = self.api_url.as_str().trim_end_matches('/');
        let path = path.trim_start_matches('/');
        Url::parse(&format!("{base}/{path}"))
    }
}

// ── Builder ─────────────────────────────────────────────────────────

/// Fluent construction of a [`PartialConfig`], finished by `resolve`.
#[derive(Debug, Clone, Default)]
pub struct ClientConfigBuilder {
    partial: PartialConfig,
}

impl ClientConfigBuilder {
    pub fn api_token(mut self, token: impl Into<String>) -> Self {
        self.partial.api_token = Some(SecretString::from(token.into()));
        self
    }

    pub fn basic_auth(mut self, username: impl Into<String>, password: impl Into<String>) -> Self {
        self.partial.username = Some(username.into());
        self.partial.password = Some(SecretString::from(password.into()));
        self
    }

    pub fn api_url(mut self, url: impl Into<String>) -> Self {
        self.partial.api_url = Some(url.into());
        self
    }

    pub fn protocol(mut self, protocol: impl Into<String>) -> Self {
        self.partial.protocol = Some(protocol.into());
        self
    }

    pub fn host(mut self, host: impl Into<String>) -> Self {
        self.partial.host = Some(host.into());
        self
    }

    pub fn url_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.partial.url_prefix = Some(prefix.into());
        self
    }

    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.partial.base_url = Some(base_url.into());
        self
    }

    pub fn service_name(mut self, name: impl Into<String>) -> Self {
        self.partial.service_name = Some(name.into());
        self
    }

    pub fn service_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.partial.service_prefix = Some(prefix.into());
        self
    }

    pub fn service_url(mut self, url: impl Into<String>) -> Self {
        self.partial.service_url = Some(url.into());
        self
    }

    pub fn oauth_scopes<I, S>(mut self, scopes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.partial.oauth_scopes = scopes.into_iter().map(Into::into).collect();
        self
    }

    pub fn oauth_access_scopes<I, S>(mut self, scopes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.partial.oauth_access_scopes = scopes.into_iter().map(Into::into).collect();
        self
    }

    pub fn oauth_client_allowed_scopes<I, S>(mut self, scopes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.partial.oauth_client_allowed_scopes = scopes.into_iter().map(Into::into).collect();
        self
    }

    pub fn client_id(mut self, client_id: impl Into<String>) -> Self {
        self.partial.client_id = Some(client_id.into());
        self
    }

    pub fn into_partial(self) -> PartialConfig {
        self.partial
    }

    pub fn resolve(self) -> Result<ClientConfig, ConfigError> {
        ClientConfig::resolve(self.partial)
    }

    pub fn resolve_with(self, env: &impl EnvSource) -> Result<ClientConfig, ConfigError> {
        ClientConfig::resolve_with(self.partial, env)
    }
}

// ── Resolution helpers ──────────────────────────────────────────────

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

fn non_empty_secret(value: Option<SecretString>) -> Option<SecretString> {
    value.filter(|v| !v.expose_secret().is_empty())
}

fn env_value(env: &impl EnvSource, key: &str) -> Option<String> {
    non_empty(env.var(key))
}

fn pick(explicit: Option<String>, env: &impl EnvSource, key: &str) -> Option<String> {
    non_empty(explicit).or_else(|| env_value(env, key))
}

fn pick_list(
    explicit: Vec<String>,
    env: &impl EnvSource,
    key: &str,
) -> Result<Vec<String>, ConfigError> {
    if !explicit.is_empty() {
        return Ok(explicit);
    }
    match env_value(env, key) {
        Some(raw) => serde_json::from_str(&raw).map_err(|source| ConfigError::MalformedField {
            field: key.to_owned(),
            source,
        }),
        None => Ok(Vec::new()),
    }
}

/// Token beats Basic. Explicit credentials are considered before the
/// environment: an explicit username or password (even one half of the
/// pair) selects Basic, so an inherited `JUPYTERHUB_API_TOKEN` never
/// shadows it. The missing half may still come from the environment.
fn resolve_credentials(
    api_token: Option<SecretString>,
    username: Option<String>,
    password: Option<SecretString>,
    env: &impl EnvSource,
) -> Result<Credentials, ConfigError> {
    if let Some(token) = non_empty_secret(api_token) {
        return Ok(Credentials::Token(token));
    }

    let username = non_empty(username);
    let password = non_empty_secret(password);
    if let (Some(username), Some(password)) = (&username, &password) {
        return Ok(Credentials::Basic {
            username: username.clone(),
            password: password.clone(),
        });
    }

    if username.is_none() && password.is_none() {
        if let Some(token) = env_value(env, env_var::API_TOKEN) {
            return Ok(Credentials::Token(SecretString::from(token)));
        }
    }

    let username = username.or_else(|| env_value(env, env_var::USERNAME));
    let password = password.or_else(|| env_value(env, env_var::PASSWORD).map(SecretString::from));

    match (username, password) {
        (Some(username), Some(password)) => Ok(Credentials::Basic { username, password }),
        (Some(_), None) => Err(ConfigError::MissingCredential {
            expected: format!("a password for basic auth (set {})", env_var::PASSWORD),
        }),
        (None, Some(_)) => Err(ConfigError::MissingCredential {
            expected: format!("a username for basic auth (set {})", env_var::USERNAME),
        }),
        (None, None) => Err(ConfigError::MissingCredential {
            expected: format!(
                "an API token ({}) or a username and password ({} and {})",
                env_var::API_TOKEN,
                env_var::USERNAME,
                env_var::PASSWORD,
            ),
        }),
    }
}

fn compose_api_url(protocol: &str, host: &str, prefix: &str) -> String {
    let protocol = protocol.trim_end_matches("://");
    let host = host.trim_end_matches('/');
    let prefix = prefix.trim_matches('/');
    if prefix.is_empty() {
        format!("{protocol}://{host}")
    } else {
        format!("{protocol}://{host}/{prefix}")
    }
}

fn parse_api_url(raw: &str) -> Result<Url, ConfigError> {
    let url = Url::parse(raw).map_err(|e| ConfigError::Validation {
        field: "api_url".into(),
        reason: format!("{raw:?} is not a valid URL: {e}"),
    })?;

    match url.scheme() {
        "http" | "https" => Ok(url),
        other => Err(ConfigError::Validation {
            field: "api_url".into(),
            reason: format!("unsupported scheme '{other}', expected http or https"),
        }),
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use pretty_assertions::assert_eq;

    use super::*;

    fn env(pairs: &[(&'static str, &'static str)]) -> HashMap<&'static str, &'static str> {
        pairs.iter().copied().collect()
    }

    fn token_of(config: &ClientConfig) -> &str {
        config.credentials().token().unwrap().expose_secret()
    }

    // ── Credentials ─────────────────────────────────────────────────

    #[test]
    fn no_credentials_anywhere_is_missing_credential() {
        let err = ClientConfig::resolve_with(PartialConfig::default(), &env(&[])).unwrap_err();
        match err {
            ConfigError::MissingCredential { expected } => {
                assert!(expected.contains(env_var::API_TOKEN), "{expected}");
                assert!(expected.contains(env_var::USERNAME), "{expected}");
            }
            other => panic!("expected MissingCredential, got: {other:?}"),
        }
    }

    #[test]
    fn empty_explicit_token_counts_as_missing() {
        let explicit = ClientConfig::builder().api_token("").into_partial();
        let err = ClientConfig::resolve_with(explicit, &env(&[])).unwrap_err();
        assert!(matches!(err, ConfigError::MissingCredential { .. }));
    }

    #[test]
    fn username_without_password_names_password() {
        let explicit = PartialConfig {
            username: Some("alice".into()),
            ..PartialConfig::default()
        };
        let err = ClientConfig::resolve_with(explicit, &env(&[])).unwrap_err();
        match err {
            ConfigError::MissingCredential { expected } => {
                assert!(expected.contains(env_var::PASSWORD), "{expected}");
            }
            other => panic!("expected MissingCredential, got: {other:?}"),
        }
    }

    #[test]
    fn token_from_environment() {
        let config =
            ClientConfig::resolve_with(PartialConfig::default(), &env(&[(env_var::API_TOKEN, "env-tok")]))
                .unwrap();
        assert_eq!(token_of(&config), "env-tok");
    }

    #[test]
    fn explicit_token_beats_environment() {
        let config = ClientConfig::builder()
            .api_token("explicit-tok")
            .resolve_with(&env(&[(env_var::API_TOKEN, "env-tok")]))
            .unwrap();
        assert_eq!(token_of(&config), "explicit-tok");
    }

    #[test]
    fn token_takes_precedence_over_basic() {
        let config = ClientConfig::builder()
            .api_token("tok")
            .basic_auth("user", "pass")
            .resolve_with(&env(&[]))
            .unwrap();
        assert_eq!(token_of(&config), "tok");
    }

    #[test]
    fn basic_auth_from_environment_pair() {
        let config = ClientConfig::resolve_with(
            PartialConfig::default(),
            &env(&[(env_var::USERNAME, "user"), (env_var::PASSWORD, "pass")]),
        )
        .unwrap();
        match config.credentials() {
            Credentials::Basic { username, password } => {
                assert_eq!(username, "user");
                assert_eq!(password.expose_secret(), "pass");
            }
            Credentials::Token(_) => panic!("expected basic credentials"),
        }
    }

    #[test]
    fn explicit_basic_pair_is_not_shadowed_by_env_token() {
        let config = ClientConfig::builder()
            .basic_auth("user", "pass")
            .resolve_with(&env(&[(env_var::API_TOKEN, "env-tok")]))
            .unwrap();
        assert!(matches!(config.credentials(), Credentials::Basic { .. }));
    }

    #[test]
    fn basic_pair_can_mix_explicit_and_environment_halves() {
        let config = ClientConfig::builder()
            .host("hub:8000")
            .resolve_with(&env(&[(env_var::USERNAME, "user"), (env_var::PASSWORD, "pass")]))
            .unwrap();
        assert!(matches!(config.credentials(), Credentials::Basic { .. }));

        let explicit = PartialConfig {
            username: Some("alice".into()),
            ..PartialConfig::default()
        };
        let config =
            ClientConfig::resolve_with(explicit, &env(&[(env_var::PASSWORD, "pw")])).unwrap();
        match config.credentials() {
            Credentials::Basic { username, .. } => assert_eq!(username, "alice"),
            Credentials::Token(_) => panic!("expected basic credentials"),
        }
    }

    #[test]
    fn explicit_username_alone_is_not_shadowed_by_env_token() {
        let explicit = PartialConfig {
            username: Some("alice".into()),
            ..PartialConfig::default()
        };
        let err = ClientConfig::resolve_with(explicit, &env(&[(env_var::API_TOKEN, "env-tok")]))
            .unwrap_err();
        match err {
            ConfigError::MissingCredential { expected } => {
                assert!(expected.contains(env_var::PASSWORD), "{expected}");
            }
            other => panic!("expected MissingCredential, got: {other:?}"),
        }

        let explicit = PartialConfig {
            username: Some("alice".into()),
            ..PartialConfig::default()
        };
        let config = ClientConfig::resolve_with(
            explicit,
            &env(&[(env_var::API_TOKEN, "env-tok"), (env_var::PASSWORD, "pw")]),
        )
        .unwrap();
        match config.credentials() {
            Credentials::Basic { username, password } => {
                assert_eq!(username, "alice");
                assert_eq!(password.expose_secret(), "pw");
            }
            Credentials::Token(_) => panic!("expected basic credentials"),
        }
    }

    #[test]
    fn empty_explicit_username_does_not_block_env_token() {
        let explicit = PartialConfig {
            username: Some(String::new()),
            ..PartialConfig::default()
        };
        let config =
            ClientConfig::resolve_with(explicit, &env(&[(env_var::API_TOKEN, "env-tok")])).unwrap();
        assert_eq!(token_of(&config), "env-tok");
    }

    // ── Defaults & precedence ───────────────────────────────────────

    #[test]
    fn defaults_apply_when_nothing_is_set() {
        let config = ClientConfig::builder()
            .api_token("tok")
            .resolve_with(&env(&[]))
            .unwrap();

        assert_eq!(config.api_url().as_str(), "http://localhost:8000/hub/api");
        assert_eq!(config.url_prefix(), DEFAULT_URL_PREFIX);
        assert_eq!(config.base_url(), DEFAULT_BASE_URL);
        assert_eq!(config.service_name(), None);
        assert_eq!(config.service_prefix(), None);
        assert_eq!(config.service_url(), None);
        assert_eq!(config.client_id(), None);
        assert!(config.oauth_scopes().is_empty());
        assert!(config.oauth_access_scopes().is_empty());
        assert!(config.oauth_client_allowed_scopes().is_empty());
    }

    #[test]
    fn url_prefix_is_reported_even_when_api_url_bypasses_it() {
        let config = ClientConfig::builder()
            .api_token("tok")
            .api_url("https://hub.example.org/api")
            .url_prefix("/custom/api")
            .resolve_with(&env(&[]))
            .unwrap();

        assert_eq!(config.api_url().as_str(), "https://hub.example.org/api");
        assert_eq!(config.url_prefix(), "/custom/api");
        assert_eq!(
            config.endpoint_url("users").unwrap().as_str(),
            "https://hub.example.org/api/users"
        );
    }

    #[test]
    fn explicit_values_win_over_environment() {
        let environment = env(&[
            (env_var::API_URL, "http://env-hub/hub/api"),
            (env_var::BASE_URL, "/env/"),
            (env_var::SERVICE_NAME, "env-service"),
            (env_var::CLIENT_ID, "env-client"),
            (env_var::OAUTH_SCOPES, r#"["env:scope"]"#),
        ]);
        let config = ClientConfig::builder()
            .api_token("tok")
            .api_url("https://explicit-hub/hub/api")
            .base_url("/explicit/")
            .service_name("explicit-service")
            .client_id("explicit-client")
            .oauth_scopes(["explicit:scope"])
            .resolve_with(&environment)
            .unwrap();

        assert_eq!(config.api_url().as_str(), "https://explicit-hub/hub/api");
        assert_eq!(config.base_url(), "/explicit/");
        assert_eq!(config.service_name(), Some("explicit-service"));
        assert_eq!(config.client_id(), Some("explicit-client"));
        assert_eq!(config.oauth_scopes(), ["explicit:scope".to_owned()]);
    }

    #[test]
    fn environment_fills_empty_explicit_values() {
        let environment = env(&[
            (env_var::API_TOKEN, "tok"),
            (env_var::SERVICE_NAME, "announcer"),
            (env_var::SERVICE_PREFIX, "/services/announcer/"),
            (env_var::SERVICE_URL, "http://127.0.0.1:10101"),
            (env_var::CLIENT_ID, "service-announcer"),
        ]);
        let explicit = PartialConfig {
            service_name: Some(String::new()),
            ..PartialConfig::default()
        };
        let config = ClientConfig::resolve_with(explicit, &environment).unwrap();

        assert_eq!(config.service_name(), Some("announcer"));
        assert_eq!(config.service_prefix(), Some("/services/announcer/"));
        assert_eq!(config.service_url(), Some("http://127.0.0.1:10101"));
        assert_eq!(config.client_id(), Some("service-announcer"));
    }

    // ── Scope lists ─────────────────────────────────────────────────

    #[test]
    fn scope_list_round_trips_through_environment_json() {
        let scopes = vec![
            "read:users".to_owned(),
            "access:services!service=announcer".to_owned(),
            "admin:groups".to_owned(),
        ];
        let encoded = serde_json::to_string(&scopes).unwrap();
        let environment: HashMap<String, String> = [
            (env_var::API_TOKEN.to_owned(), "tok".to_owned()),
            (env_var::OAUTH_ACCESS_SCOPES.to_owned(), encoded),
        ]
        .into_iter()
        .collect();

        let config = ClientConfig::resolve_with(PartialConfig::default(), &environment).unwrap();
        assert_eq!(config.oauth_access_scopes(), scopes.as_slice());
    }

    #[test]
    fn malformed_scope_json_names_the_variable() {
        let environment = env(&[
            (env_var::API_TOKEN, "tok"),
            (env_var::OAUTH_CLIENT_ALLOWED_SCOPES, "read:users, admin"),
        ]);
        let err = ClientConfig::resolve_with(PartialConfig::default(), &environment).unwrap_err();
        match err {
            ConfigError::MalformedField { field, .. } => {
                assert_eq!(field, env_var::OAUTH_CLIENT_ALLOWED_SCOPES);
            }
            other => panic!("expected MalformedField, got: {other:?}"),
        }
    }

    #[test]
    fn each_scope_list_uses_its_own_explicit_value() {
        let environment = env(&[
            (env_var::API_TOKEN, "tok"),
            (env_var::OAUTH_CLIENT_ALLOWED_SCOPES, r#"["from-env"]"#),
        ]);
        let config = ClientConfig::builder()
            .oauth_scopes(["explicit"])
            .resolve_with(&environment)
            .unwrap();
        assert_eq!(config.oauth_scopes(), ["explicit".to_owned()]);
        assert_eq!(config.oauth_client_allowed_scopes(), ["from-env".to_owned()]);
    }

    // ── URLs ────────────────────────────────────────────────────────

    #[test]
    fn api_url_composed_from_protocol_host_prefix() {
        let config = ClientConfig::builder()
            .api_token("tok")
            .protocol("https")
            .host("hub.example.org/")
            .url_prefix("/jhub/hub/api/")
            .resolve_with(&env(&[]))
            .unwrap();
        assert_eq!(config.api_url().as_str(), "https://hub.example.org/jhub/hub/api");
        assert_eq!(
            config.endpoint_url("users").unwrap().as_str(),
            "https://hub.example.org/jhub/hub/api/users"
        );
    }

    #[test]
    fn api_url_from_environment_overrides_composition() {
        let environment = env(&[
            (env_var::API_TOKEN, "tok"),
            (env_var::API_URL, "http://10.0.0.5:8081/hub/api"),
            (env_var::HOST, "ignored:1"),
        ]);
        let config = ClientConfig::resolve_with(PartialConfig::default(), &environment).unwrap();
        assert_eq!(config.api_url().as_str(), "http://10.0.0.5:8081/hub/api");
    }

    #[test]
    fn endpoint_url_never_doubles_slashes() {
        let config = ClientConfig::builder()
            .api_token("tok")
            .api_url("http://hub:8000/hub/api/")
            .resolve_with(&env(&[]))
            .unwrap();

        assert_eq!(
            config.endpoint_url("/users/alice").unwrap().as_str(),
            "http://hub:8000/hub/api/users/alice"
        );
        assert_eq!(
            config.endpoint_url("").unwrap().as_str(),
            "http://hub:8000/hub/api/"
        );
    }

    #[test]
    fn non_http_api_url_is_rejected() {
        let err = ClientConfig::builder()
            .api_token("tok")
            .api_url("ftp://hub/hub/api")
            .resolve_with(&env(&[]))
            .unwrap_err();
        assert!(matches!(err, ConfigError::Validation { ref field, .. } if field == "api_url"));

        let err = ClientConfig::builder()
            .api_token("tok")
            .api_url("not a url")
            .resolve_with(&env(&[]))
            .unwrap_err();
        assert!(matches!(err, ConfigError::Validation { .. }));
    }
}
