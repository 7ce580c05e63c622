//! Config subcommand handlers.

use std::fmt::Write;
use std::io::IsTerminal;

use dialoguer::{Input, Password, Select};

use crate::cli::{ConfigArgs, ConfigCommand, GlobalOpts};
use crate::config::{self, Profile};
use crate::error::CliError;
use crate::output;

use hubctl_config::Config;

// ── Helpers ─────────────────────────────────────────────────────────

/// Format config for display, masking secrets.
fn format_config_redacted(cfg: &Config) -> String {
    let mut out = String::new();

    if let Some(ref default) = cfg.default_profile {
        let _ = writeln!(out, "default_profile = \"{default}\"");
    }
    let _ = writeln!(out);
    let _ = writeln!(out, "[defaults]");
    let _ = writeln!(out, "output = \"{}\"", cfg.defaults.output);
    let _ = writeln!(out, "insecure = {}", cfg.defaults.insecure);
    if let Some(timeout) = cfg.defaults.timeout {
        let _ = writeln!(out, "timeout = {timeout}");
    }

    for (name, p) in &cfg.profiles {
        let _ = writeln!(out);
        let _ = writeln!(out, "[profiles.{name}]");
        let plain = [
            ("api_url", &p.api_url),
            ("protocol", &p.protocol),
            ("host", &p.host),
            ("url_prefix", &p.url_prefix),
            ("api_token_env", &p.api_token_env),
            ("username", &p.username),
            ("service_name", &p.service_name),
            ("client_id", &p.client_id),
        ];
        for (key, value) in plain {
            if let Some(value) = value {
                let _ = writeln!(out, "{key} = \"{value}\"");
            }
        }
        if p.api_token.is_some() {
            let _ = writeln!(out, "api_token = \"****\"");
        }
        if p.password.is_some() {
            let _ = writeln!(out, "password = \"****\"");
        }
        if !p.oauth_scopes.is_empty() {
            let _ = writeln!(out, "oauth_scopes = {:?}", p.oauth_scopes);
        }
        if let Some(ref ca) = p.ca_cert {
            let _ = writeln!(out, "ca_cert = \"{}\"", ca.display());
        }
        if let Some(insecure) = p.insecure {
            let _ = writeln!(out, "insecure = {insecure}");
        }
        if let Some(timeout) = p.timeout {
            let _ = writeln!(out, "timeout = {timeout}");
        }
    }

    out
}

/// Map a dialoguer / interactive I/O failure into CliError.
fn prompt_err(e: impl std::fmt::Display) -> CliError {
    CliError::Validation {
        field: "interactive".into(),
        reason: format!("prompt failed: {e}"),
    }
}

fn non_empty(value: String) -> Option<String> {
    if value.trim().is_empty() { None } else { Some(value) }
}

/// Guided creation of one profile.
fn prompt_profile(name_default: &str) -> Result<(String, Profile), CliError> {
    let name: String = Input::new()
        .with_prompt("Profile name")
        .default(name_default.to_owned())
        .interact_text()
        .map_err(prompt_err)?;

    let api_url: String = Input::new()
        .with_prompt("Hub API URL")
        .default("http://localhost:8000/hub/api".to_owned())
        .interact_text()
        .map_err(prompt_err)?;

    let mut profile = Profile {
        api_url: Some(api_url),
        ..Profile::default()
    };

    let choices = &[
        "Read the API token from an environment variable (recommended)",
        "Save the API token to the config file (plaintext)",
        "Username and password (HTTP Basic)",
    ];
    let selection = Select::new()
        .with_prompt("Authentication")
        .items(choices)
        .default(0)
        .interact()
        .map_err(prompt_err)?;

    match selection {
        0 => {
            let var: String = Input::new()
                .with_prompt("Environment variable")
                .default("JUPYTERHUB_API_TOKEN".to_owned())
                .interact_text()
                .map_err(prompt_err)?;
            profile.api_token_env = non_empty(var);
        }
        1 => {
            let token = Password::new()
                .with_prompt("API token")
                .interact()
                .map_err(prompt_err)?;
            profile.api_token = non_empty(token);
        }
        _ => {
            let user: String = Input::new()
                .with_prompt("Username")
                .interact_text()
                .map_err(prompt_err)?;
            let pass = Password::new()
                .with_prompt("Password")
                .interact()
                .map_err(prompt_err)?;
            profile.username = non_empty(user);
            profile.password = non_empty(pass);
        }
    }

    Ok((name, profile))
}

// ── Handler ─────────────────────────────────────────────────────────

pub fn handle(args: ConfigArgs, global: &GlobalOpts) -> Result<(), CliError> {
    match args.command {
        ConfigCommand::Path => {
            output::print_output(&config::config_path().display().to_string(), global.quiet);
            Ok(())
        }

        ConfigCommand::Show => {
            let cfg = config::load_config_or_default();
            let out = match global.output_format() {
                crate::cli::OutputFormat::Table => format_config_redacted(&cfg),
                format => output::render_single(format, &redacted(cfg), |_| String::new())?,
            };
            output::print_output(&out, global.quiet);
            Ok(())
        }

        ConfigCommand::Init => {
            if !std::io::stdin().is_terminal() {
                return Err(CliError::Validation {
                    field: "config init".into(),
                    reason: "guided setup needs an interactive terminal".into(),
                });
            }
            let mut cfg = config::load_config_or_default();
            let default_name = config::active_profile_name(global, &cfg);
            let (name, profile) = prompt_profile(&default_name)?;

            if cfg.profiles.is_empty() {
                cfg.default_profile = Some(name.clone());
            }
            cfg.profiles.insert(name.clone(), profile);
            let path = config::save_config(&cfg)?;
            output::notice(
                &format!("Profile '{name}' saved to {}", path.display()),
                global.quiet,
            );
            Ok(())
        }
    }
}

/// Copy of `cfg` with secrets masked, for structured output.
fn redacted(mut cfg: Config) -> Config {
    for profile in cfg.profiles.values_mut() {
        if profile.api_token.is_some() {
            profile.api_token = Some("****".into());
        }
        if profile.password.is_some() {
            profile.password = Some("****".into());
        }
    }
    cfg
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Config {
        let mut cfg = Config::default();
        cfg.profiles.insert(
            "campus".into(),
            Profile {
                api_url: Some("https://hub.example.edu/hub/api".into()),
                api_token: Some("super-secret".into()),
                username: Some("admin".into()),
                password: Some("hunter2".into()),
                ..Profile::default()
            },
        );
        cfg
    }

    #[test]
    fn table_view_masks_secrets() {
        let out = format_config_redacted(&sample());
        assert!(out.contains("[profiles.campus]"));
        assert!(out.contains("api_url = \"https://hub.example.edu/hub/api\""));
        assert!(out.contains("api_token = \"****\""));
        assert!(!out.contains("super-secret"));
        assert!(!out.contains("hunter2"));
    }

    #[test]
    fn structured_view_masks_secrets() {
        let cfg = redacted(sample());
        let profile = &cfg.profiles["campus"];
        assert_eq!(profile.api_token.as_deref(), Some("****"));
        assert_eq!(profile.password.as_deref(), Some("****"));
        assert_eq!(profile.username.as_deref(), Some("admin"));
    }
}
