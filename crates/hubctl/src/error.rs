//! CLI error types with miette diagnostics.
//!
//! Maps `hubctl_api::Error` variants into user-facing errors with
//! actionable help text and stable exit codes.

use miette::Diagnostic;
use thiserror::Error;

use hubctl_api::ConfigError as ResolveError;

pub mod exit_code {
    pub const GENERAL: i32 = 1;
    pub const USAGE: i32 = 2;
    pub const AUTH: i32 = 3;
    pub const NOT_FOUND: i32 = 4;
    pub const CONFLICT: i32 = 6;
    pub const CONNECTION: i32 = 7;
    pub const TIMEOUT: i32 = 8;
    pub const INTERRUPTED: i32 = 130;
}

#[derive(Debug, Error, Diagnostic)]
pub enum CliError {
    // ── Connection ───────────────────────────────────────────────────
    #[error("Could not reach the hub at {url}")]
    #[diagnostic(
        code(hubctl::connection_failed),
        help(
            "Check that the hub is running and the API URL is right.\n\
             URL: {url}\n\
             Set it with --api-url, a profile, or JUPYTERHUB_API_URL."
        )
    )]
    ConnectionFailed {
        url: String,
        #[source]
        source: hubctl_api::Error,
    },

    #[error("TLS setup failed: {reason}")]
    #[diagnostic(
        code(hubctl::tls_error),
        help(
            "Check the ca_cert path in your profile, or use --insecure (-k)\n\
             to accept a self-signed certificate."
        )
    )]
    Tls { reason: String },

    #[error("Request timed out")]
    #[diagnostic(
        code(hubctl::timeout),
        help("Increase the timeout with --timeout or check hub responsiveness.")
    )]
    Timeout,

    #[error("Interrupted")]
    #[diagnostic(code(hubctl::interrupted))]
    Interrupted,

    // ── Authentication ───────────────────────────────────────────────
    #[error("The hub rejected the credentials (HTTP {status})")]
    #[diagnostic(
        code(hubctl::auth_failed),
        help(
            "Verify the API token and that it carries the scopes this command needs.\n\
             Check which identity is in use with: hubctl whoami"
        )
    )]
    AuthFailed { status: u16 },

    #[error("No credentials configured")]
    #[diagnostic(
        code(hubctl::no_credentials),
        help(
            "Expected {expected}.\n\
             Pass --token, configure a profile with: hubctl config init,\n\
             or set JUPYTERHUB_API_TOKEN."
        )
    )]
    NoCredentials { expected: String },

    // ── Resources ────────────────────────────────────────────────────
    #[error("{resource_type} '{identifier}' not found")]
    #[diagnostic(
        code(hubctl::not_found),
        help("Run: hubctl {list_command} to see available {resource_type}s")
    )]
    NotFound {
        resource_type: String,
        identifier: String,
        list_command: String,
    },

    #[error("Hub responded with HTTP {status}")]
    #[diagnostic(code(hubctl::http_status))]
    HttpStatus { status: u16 },

    #[error("Unexpected response from the hub: {message}")]
    #[diagnostic(
        code(hubctl::decode),
        help("The API URL may point at something other than a hub API (try -vv).")
    )]
    Decode { message: String },

    // ── Validation ───────────────────────────────────────────────────
    #[error("Invalid value for {field}: {reason}")]
    #[diagnostic(code(hubctl::validation))]
    Validation { field: String, reason: String },

    #[error("Destructive operation '{action}' requires confirmation")]
    #[diagnostic(
        code(hubctl::confirmation_required),
        help("Use --yes (-y) to skip confirmation in non-interactive contexts.")
    )]
    NonInteractiveRequiresYes { action: String },

    // ── Configuration ────────────────────────────────────────────────
    #[error("Profile '{name}' not found in configuration")]
    #[diagnostic(
        code(hubctl::profile_not_found),
        help(
            "Available profiles: {available}\n\
             Create one with: hubctl config init"
        )
    )]
    ProfileNotFound { name: String, available: String },

    #[error(transparent)]
    #[diagnostic(code(hubctl::config))]
    Config(#[from] hubctl_config::ConfigError),

    // ── IO / Serialization ───────────────────────────────────────────
    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("Failed to render JSON: {0}")]
    #[diagnostic(code(hubctl::json))]
    Json(#[from] serde_json::Error),

    #[error("Failed to render YAML: {0}")]
    #[diagnostic(code(hubctl::yaml))]
    Yaml(#[from] serde_yaml::Error),
}

impl CliError {
    /// Map this error to an exit code for process termination.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::ConnectionFailed { .. } | Self::Tls { .. } => exit_code::CONNECTION,
            Self::Timeout => exit_code::TIMEOUT,
            Self::Interrupted => exit_code::INTERRUPTED,
            Self::AuthFailed { .. } | Self::NoCredentials { .. } => exit_code::AUTH,
            Self::NotFound { .. } | Self::HttpStatus { status: 404 } => exit_code::NOT_FOUND,
            Self::HttpStatus { status: 409 } => exit_code::CONFLICT,
            Self::Validation { .. } | Self::NonInteractiveRequiresYes { .. } => exit_code::USAGE,
            _ => exit_code::GENERAL,
        }
    }

    /// Turn a 404 into a [`CliError::NotFound`] naming the missing resource.
    pub fn or_not_found(self, resource_type: &str, identifier: &str, list_command: &str) -> Self {
        match self {
            Self::HttpStatus { status: 404 } => Self::NotFound {
                resource_type: resource_type.into(),
                identifier: identifier.into(),
                list_command: list_command.into(),
            },
            other => other,
        }
    }
}

// ── hubctl_api::Error → CliError mapping ─────────────────────────────

impl From<hubctl_api::Error> for CliError {
    fn from(err: hubctl_api::Error) -> Self {
        use hubctl_api::Error as ApiError;

        match err {
            ApiError::Config(ResolveError::MissingCredential { expected }) => {
                CliError::NoCredentials { expected }
            }
            ApiError::Config(ResolveError::Validation { field, reason }) => {
                CliError::Validation { field, reason }
            }
            ApiError::Config(ResolveError::MalformedField { field, source }) => {
                CliError::Validation {
                    field,
                    reason: source.to_string(),
                }
            }

            ApiError::Transport(ref e) if e.is_timeout() => CliError::Timeout,
            ApiError::Transport(ref e) => CliError::ConnectionFailed {
                url: e.url().map_or_else(|| "(unknown)".into(), ToString::to_string),
                source: err,
            },
            ApiError::Cancelled => CliError::Interrupted,
            ApiError::Tls(reason) => CliError::Tls { reason },
            ApiError::InvalidUrl(e) => CliError::Validation {
                field: "api_url".into(),
                reason: e.to_string(),
            },

            ApiError::UnexpectedStatus { status: status @ (401 | 403) } => {
                CliError::AuthFailed { status }
            }
            ApiError::UnexpectedStatus { status } => CliError::HttpStatus { status },

            ApiError::Decode { message, .. } => CliError::Decode { message },
            ApiError::Encode(e) => CliError::Json(e),

            ApiError::OAuthStateMismatch | ApiError::OAuthMissingCode => CliError::Validation {
                field: "oauth callback".into(),
                reason: err.to_string(),
            },
        }
    }
}

impl From<ResolveError> for CliError {
    fn from(err: ResolveError) -> Self {
        hubctl_api::Error::from(err).into()
    }
}
