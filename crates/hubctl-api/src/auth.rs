use reqwest::RequestBuilder;
use secrecy::{ExposeSecret, SecretString};

/// Which `Authorization` scheme a request carries.
///
/// Marker enum (no data) -- the actual secret material lives in [`Credentials`].
/// Useful for logging and branching without touching secrets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, strum::Display)]
pub enum AuthScheme {
    /// `Authorization: Bearer <token>`
    #[strum(to_string = "bearer")]
    Bearer,
    /// `Authorization: Basic base64(user:pass)`
    #[strum(to_string = "basic")]
    Basic,
}

/// Credentials for authenticating with a hub.
///
/// The two variants are mutually exclusive; the resolver picks the token
/// when one is available and only falls back to Basic without it.
#[derive(Debug, Clone)]
pub enum Credentials {
    /// API token of a user or service.
    Token(SecretString),

    /// HTTP Basic username/password pair.
    Basic {
        username: String,
        password: SecretString,
    },
}

impl Credentials {
    pub fn scheme(&self) -> AuthScheme {
        match self {
            Self::Token(_) => AuthScheme::Bearer,
            Self::Basic { .. } => AuthScheme::Basic,
        }
    }

    /// The bearer token, if this is token auth.
    pub fn token(&self) -> Option<&SecretString> {
        match self {
            Self::Token(token) => Some(token),
            Self::Basic { .. } => None,
        }
    }

    /// Attach the `Authorization` header to an outgoing request.
    ///
    /// reqwest marks both header values as sensitive.
    pub(crate) fn authorize(&self, builder: RequestBuilder) -> RequestBuilder {
        match self {
            Self::Token(token) => builder.bearer_auth(token.expose_secret()),
            Self::Basic { username, password } => {
                builder.basic_auth(username, Some(password.expose_secret()))
            }
        }
    }
}
