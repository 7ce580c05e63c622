// OAuth2 helpers
//
// A hub acts as an OAuth2 provider for its services. These helpers build
// the authorize redirect, check the callback, and trade the code for a
// token. Client id and secret fall back to the resolved configuration.

use secrecy::{ExposeSecret, SecretString};
use tracing::debug;
use url::Url;

use crate::client::{ApiRequest, HubClient};
use crate::config::{ClientConfig, ConfigError, env_var};
use crate::error::Error;
use crate::models::{AuthorizeParams, OAuth2TokenResponse, TokenExchangeBody};

const DEFAULT_RESPONSE_TYPE: &str = "code";
const DEFAULT_GRANT_TYPE: &str = "authorization_code";

impl HubClient {
    /// URL of `oauth2/authorize` to redirect a browser to.
    ///
    /// No request is sent. `state` and `redirect_uri` must be non-empty.
    pub fn oauth2_authorize_url(&self, params: &AuthorizeParams) -> Result<Url, Error> {
        require("state", &params.state)?;
        require("redirect_uri", &params.redirect_uri)?;

        let client_id = resolve_client_id(params.client_id.as_deref(), self.config())?;
        let response_type = params
            .response_type
            .as_deref()
            .filter(|v| !v.is_empty())
            .unwrap_or(DEFAULT_RESPONSE_TYPE);

        let mut url = self.config().endpoint_url("oauth2/authorize")?;
        {
            let mut query = url.query_pairs_mut();
            query
                .append_pair("client_id", &client_id)
                .append_pair("response_type", response_type)
                .append_pair("state", &params.state)
                .append_pair("redirect_uri", &params.redirect_uri);
            if let Some(scope) = params.scope.as_deref().filter(|s| !s.is_empty()) {
                query.append_pair("scope", scope);
            }
        }
        Ok(url)
    }

    /// Exchange an authorization code for an access token.
    ///
    /// `POST /oauth2/token`, form-encoded.
    pub async fn exchange_oauth2_code(
        &self,
        body: TokenExchangeBody,
    ) -> Result<OAuth2TokenResponse, Error> {
        let client_id = resolve_client_id(body.client_id.as_deref(), self.config())?;
        let client_secret = resolve_client_secret(body.client_secret, self.config())?;
        let grant_type = body
            .grant_type
            .filter(|v| !v.is_empty())
            .unwrap_or_else(|| DEFAULT_GRANT_TYPE.to_owned());

        debug!(client_id = %client_id, grant_type = %grant_type, "exchanging oauth2 code");
        let request = ApiRequest::post("oauth2/token").with_form([
            ("client_id", client_id.as_str()),
            ("client_secret", client_secret.expose_secret()),
            ("grant_type", grant_type.as_str()),
            ("code", body.code.as_str()),
            ("redirect_uri", body.redirect_uri.as_str()),
        ]);
        self.fetch(request).await
    }
}

/// Extract the authorization code from an OAuth2 redirect back to us.
///
/// The `state` query parameter must equal `expected_state`.
pub fn parse_oauth_callback(callback: &Url, expected_state: &str) -> Result<String, Error> {
    let mut state = None;
    let mut code = None;
    for (key, value) in callback.query_pairs() {
        match key.as_ref() {
            "state" => state = Some(value.into_owned()),
            "code" => code = Some(value.into_owned()),
            _ => {}
        }
    }

    if state.as_deref() != Some(expected_state) {
        return Err(Error::OAuthStateMismatch);
    }
    code.filter(|c| !c.is_empty()).ok_or(Error::OAuthMissingCode)
}

fn require(field: &str, value: &str) -> Result<(), ConfigError> {
    if value.is_empty() {
        return Err(ConfigError::Validation {
            field: field.to_owned(),
            reason: "must not be empty".to_owned(),
        });
    }
    Ok(())
}

fn resolve_client_id(explicit: Option<&str>, config: &ClientConfig) -> Result<String, ConfigError> {
    if let Some(id) = explicit.filter(|v| !v.is_empty()) {
        return Ok(id.to_owned());
    }
    if let Some(id) = config.client_id() {
        return Ok(id.to_owned());
    }
    if let Some(name) = config.service_name() {
        return Ok(format!("service-{name}"));
    }
    Err(ConfigError::MissingCredential {
        expected: format!(
            "an explicit client id, {} or {}",
            env_var::CLIENT_ID,
            env_var::SERVICE_NAME
        ),
    })
}

fn resolve_client_secret(
    explicit: Option<SecretString>,
    config: &ClientConfig,
) -> Result<SecretString, ConfigError> {
    if let Some(secret) = explicit.filter(|s| !s.expose_secret().is_empty()) {
        return Ok(secret);
    }
    config
        .credentials()
        .token()
        .cloned()
        .ok_or_else(|| ConfigError::MissingCredential {
            expected: format!("an explicit client secret or {}", env_var::API_TOKEN),
        })
}
