//! CLI configuration: a thin layer over `hubctl_config`.
//!
//! Applies `GlobalOpts` flag overrides (--api-url, --token, ...) on top of
//! the selected profile, then resolves the client config against the
//! `JUPYTERHUB_*` environment.

use std::time::Duration;

use clap::ValueEnum;
use secrecy::SecretString;

use hubctl_api::{ClientConfig, EnvSource, HubClient, TlsMode, TransportConfig};
use hubctl_config::Config;

use crate::cli::{GlobalOpts, OutputFormat};
use crate::error::CliError;

// ── Re-exports from shared crate ────────────────────────────────────

pub use hubctl_config::{Profile, config_path, load_config_or_default, save_config};

// ── CLI-specific helpers ────────────────────────────────────────────

/// Resolve the active profile name from CLI flags and config.
pub fn active_profile_name(global: &GlobalOpts, config: &Config) -> String {
    global
        .profile
        .clone()
        .or_else(|| config.default_profile.clone())
        .unwrap_or_else(|| "default".into())
}

/// Fill in the output format from `[defaults] output` when neither
/// `--output` nor `HUBCTL_OUTPUT` chose one.
pub fn apply_output_default(global: &mut GlobalOpts, config: &Config) -> Result<(), CliError> {
    if global.output.is_some() {
        return Ok(());
    }
    let value = config.defaults.output.as_str();
    let format = <OutputFormat as ValueEnum>::from_str(value, true).map_err(|_| {
        CliError::Validation {
            field: "defaults.output".into(),
            reason: format!(
                "unknown output format '{value}' (expected table, json, json-compact or yaml)"
            ),
        }
    })?;
    global.output = Some(format);
    Ok(())
}

/// Client and transport settings for this invocation.
///
/// Flags beat the profile, the profile beats `JUPYTERHUB_*` variables, and
/// those beat the built-in defaults. With no profile at all, flags and the
/// environment must supply everything.
pub fn resolve_settings(
    global: &GlobalOpts,
    config: &Config,
    env: &impl EnvSource,
) -> Result<(ClientConfig, TransportConfig), CliError> {
    let profile = config
        .profile(global.profile.as_deref())
        .map_err(|err| match err {
            hubctl_config::ConfigError::ProfileNotFound { name } => CliError::ProfileNotFound {
                name,
                available: available_profiles(config),
            },
            other => other.into(),
        })?
        .cloned()
        .unwrap_or_default();

    let mut partial = profile.to_partial(env);
    if let Some(ref url) = global.api_url {
        partial.api_url = Some(url.clone());
    }
    if let Some(ref token) = global.token {
        partial.api_token = Some(SecretString::from(token.clone()));
    }
    if let Some(ref username) = global.username {
        partial.username = Some(username.clone());
    }
    if let Some(ref password) = global.password {
        partial.password = Some(SecretString::from(password.clone()));
    }

    let mut transport = profile.transport(&config.defaults);
    if global.insecure {
        transport.tls = TlsMode::DangerAcceptInvalid;
    }
    if let Some(secs) = global.timeout {
        transport.timeout = Some(Duration::from_secs(secs));
    }

    let client = ClientConfig::resolve_with(partial, env)?;
    tracing::debug!(
        api_url = %client.api_url(),
        auth = %client.credentials().scheme(),
        "resolved hub connection"
    );
    Ok((client, transport))
}

/// Build a `HubClient` from the loaded config, profile, flags and environment.
pub fn build_client(global: &GlobalOpts, config: &Config) -> Result<HubClient, CliError> {
    let (client_config, transport) = resolve_settings(global, config, &hubctl_api::ProcessEnv)?;
    Ok(HubClient::with_transport(client_config, &transport)?)
}

fn available_profiles(config: &Config) -> String {
    if config.profiles.is_empty() {
        "(none)".into()
    } else {
        config.profiles.keys().cloned().collect::<Vec<_>>().join(", ")
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use std::collections::HashMap;

    use clap::Parser;
    use hubctl_api::Credentials;

    use super::*;
    use crate::cli::Cli;

    fn global(args: &[&str]) -> GlobalOpts {
        let mut argv = vec!["hubctl"];
        argv.extend_from_slice(args);
        argv.push("version");
        Cli::try_parse_from(argv).unwrap().global
    }

    fn config_with_profile() -> Config {
        let mut config = Config::default();
        config.profiles.insert(
            "default".into(),
            Profile {
                api_url: Some("https://hub.example.org/hub/api".into()),
                api_token: Some("profile-token".into()),
                timeout: Some(15),
                ..Profile::default()
            },
        );
        config
    }

    #[test]
    fn profile_values_beat_environment() {
        let env: HashMap<&str, &str> = HashMap::from([
            ("JUPYTERHUB_API_URL", "http://env-hub:8000/hub/api"),
            ("JUPYTERHUB_API_TOKEN", "env-token"),
        ]);
        let (client, transport) = resolve_settings(&global(&[]), &config_with_profile(), &env).unwrap();
        assert_eq!(client.api_url().as_str(), "https://hub.example.org/hub/api");
        assert!(matches!(client.credentials(), Credentials::Token(_)));
        assert_eq!(transport.timeout, Some(Duration::from_secs(15)));
    }

    #[test]
    fn flags_beat_profile() {
        let env: HashMap<&str, &str> = HashMap::new();
        let opts = global(&[
            "--api-url",
            "http://flag-hub/hub/api",
            "--insecure",
            "--timeout",
            "3",
        ]);
        let (client, transport) = resolve_settings(&opts, &config_with_profile(), &env).unwrap();
        assert_eq!(client.api_url().as_str(), "http://flag-hub/hub/api");
        assert_eq!(transport.tls, TlsMode::DangerAcceptInvalid);
        assert_eq!(transport.timeout, Some(Duration::from_secs(3)));
    }

    #[test]
    fn environment_alone_is_enough_without_profiles() {
        let env: HashMap<&str, &str> = HashMap::from([("JUPYTERHUB_API_TOKEN", "env-token")]);
        let (client, transport) = resolve_settings(&global(&[]), &Config::default(), &env).unwrap();
        assert_eq!(client.api_url().as_str(), "http://localhost:8000/hub/api");
        assert_eq!(transport.timeout, None);
    }

    #[test]
    fn unknown_profile_lists_available_ones() {
        let env: HashMap<&str, &str> = HashMap::new();
        let err = resolve_settings(&global(&["--profile", "prod"]), &config_with_profile(), &env)
            .unwrap_err();
        match err {
            CliError::ProfileNotFound { name, available } => {
                assert_eq!(name, "prod");
                assert_eq!(available, "default");
            }
            other => panic!("expected ProfileNotFound, got: {other:?}"),
        }
    }

    #[test]
    fn config_default_output_applies_without_flag() {
        let mut config = Config::default();
        config.defaults.output = "json-compact".into();

        let mut opts = global(&[]);
        apply_output_default(&mut opts, &config).unwrap();
        assert_eq!(opts.output_format(), OutputFormat::JsonCompact);

        let mut opts = global(&["-o", "yaml"]);
        apply_output_default(&mut opts, &config).unwrap();
        assert_eq!(opts.output_format(), OutputFormat::Yaml);
    }

    #[test]
    fn unknown_config_default_output_is_rejected() {
        let mut config = Config::default();
        config.defaults.output = "xml".into();

        let err = apply_output_default(&mut global(&[]), &config).unwrap_err();
        assert!(matches!(err, CliError::Validation { ref field, .. } if field == "defaults.output"));
    }

    #[test]
    fn no_credentials_anywhere_is_reported() {
        let env: HashMap<&str, &str> = HashMap::new();
        let err = resolve_settings(&global(&[]), &Config::default(), &env).unwrap_err();
        assert!(matches!(err, CliError::NoCredentials { .. }));
    }
}
