// JupyterHub REST API request and response shapes
//
// Response types are lenient: anything the hub may omit or null out is
// `Option` or defaulted, so older and newer hub versions both decode.

use std::collections::HashMap;
use std::fmt;

use chrono::{DateTime, Utc};
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use serde_json::Value;

// ── Hub ──────────────────────────────────────────────────────────────

/// `GET /` -- the API root.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VersionResponse {
    pub version: String,
}

/// Python class name + version of a pluggable hub component.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComponentInfo {
    pub class: String,
    #[serde(default)]
    pub version: Option<String>,
}

/// `GET /info` -- detailed hub information (admin only).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InfoResponse {
    pub version: String,
    #[serde(default)]
    pub python: Option<String>,
    #[serde(default)]
    pub sys_executable: Option<String>,
    pub authenticator: ComponentInfo,
    pub spawner: ComponentInfo,
}

/// `POST /shutdown` body.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShutdownBody {
    /// Also shut down the proxy.
    pub proxy: bool,
    /// Also shut down single-user servers.
    pub servers: bool,
}

// ── Users ────────────────────────────────────────────────────────────

/// A single-user server as reported in the user model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Server {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub ready: bool,
    #[serde(default)]
    pub stopped: bool,
    #[serde(default)]
    pub pending: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub progress_url: Option<String>,
    #[serde(default)]
    pub started: Option<DateTime<Utc>>,
    #[serde(default)]
    pub last_activity: Option<DateTime<Utc>>,
    #[serde(default)]
    pub state: Option<Value>,
    #[serde(default)]
    pub user_options: Option<Value>,
}

/// The user model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub name: String,
    #[serde(default)]
    pub kind: Option<String>,
    #[serde(default)]
    pub admin: bool,
    #[serde(default)]
    pub roles: Vec<String>,
    #[serde(default)]
    pub groups: Vec<String>,
    /// URL path of the default server, if running.
    #[serde(default)]
    pub server: Option<String>,
    #[serde(default)]
    pub pending: Option<String>,
    #[serde(default)]
    pub created: Option<DateTime<Utc>>,
    #[serde(default)]
    pub last_activity: Option<DateTime<Utc>>,
    #[serde(default)]
    pub servers: HashMap<String, Server>,
    #[serde(default)]
    pub auth_state: Option<Value>,
    /// Present on `GET /user`: the scopes of the requesting token.
    #[serde(default)]
    pub scopes: Vec<String>,
    #[serde(default)]
    pub session_id: Option<String>,
}

/// Server-state filter for `GET /users`.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, strum::Display, strum::EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum UserState {
    Inactive,
    Active,
    Ready,
}

/// Query parameters for `GET /users`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ListUsersParams {
    pub state: Option<UserState>,
    pub offset: u32,
    pub limit: u32,
    pub include_stopped_servers: bool,
}

impl ListUsersParams {
    /// `state` only when set, `offset`/`limit` only when non-zero,
    /// `include_stopped_servers` always.
    pub fn to_query(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::new();
        if let Some(state) = self.state {
            pairs.push(("state", state.to_string()));
        }
        push_paging(&mut pairs, self.offset, self.limit);
        pairs.push((
            "include_stopped_servers",
            self.include_stopped_servers.to_string(),
        ));
        pairs
    }
}

/// `POST /users` body.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateUsersBody {
    pub usernames: Vec<String>,
    pub admin: bool,
}

/// `PATCH /users/{name}` body. Unset fields are left unchanged.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateUserBody {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub admin: Option<bool>,
}

/// Per-server activity entry in [`UserActivityBody`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServerActivity {
    pub last_activity: DateTime<Utc>,
}

/// `POST /users/{name}/activity` body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserActivityBody {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_activity: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub servers: HashMap<String, ServerActivity>,
}

// ── Tokens ───────────────────────────────────────────────────────────

/// The token model. `token` is only populated right after creation.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Token {
    pub id: String,
    #[serde(default)]
    pub kind: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
    #[serde(default)]
    pub user: Option<String>,
    #[serde(default)]
    pub service: Option<String>,
    #[serde(default)]
    pub roles: Vec<String>,
    #[serde(default)]
    pub scopes: Vec<String>,
    #[serde(default)]
    pub note: Option<String>,
    #[serde(default)]
    pub created: Option<DateTime<Utc>>,
    #[serde(default)]
    pub expires_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub last_activity: Option<DateTime<Utc>>,
    #[serde(default)]
    pub session_id: Option<String>,
    #[serde(default)]
    pub oauth_client: Option<String>,
}

impl fmt::Debug for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Token")
            .field("id", &self.id)
            .field("token", &self.token.as_ref().map(|_| "[REDACTED]"))
            .field("user", &self.user)
            .field("service", &self.service)
            .field("scopes", &self.scopes)
            .field("note", &self.note)
            .field("expires_at", &self.expires_at)
            .finish_non_exhaustive()
    }
}

/// `POST /users/{name}/tokens` body.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateUserTokenBody {
    /// Lifetime in seconds; omitted means the token never expires.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expires_in: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub roles: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scopes: Option<Vec<String>>,
}

/// `POST /authorizations/token` body: trade a username/password for a token.
#[derive(Clone, Serialize)]
pub struct NewTokenBody {
    pub username: String,
    #[serde(serialize_with = "expose")]
    pub password: SecretString,
}

impl fmt::Debug for NewTokenBody {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NewTokenBody")
            .field("username", &self.username)
            .field("password", &"[REDACTED]")
            .finish()
    }
}

#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewTokenResponse {
    pub token: String,
    #[serde(default)]
    pub user: Option<Value>,
}

impl fmt::Debug for NewTokenResponse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NewTokenResponse")
            .field("token", &"[REDACTED]")
            .field("user", &self.user)
            .finish()
    }
}

/// Owner of a token: a user or a service model. `kind` tells which.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TokenOwner {
    pub name: String,
    #[serde(default)]
    pub kind: Option<String>,
    #[serde(default)]
    pub admin: bool,
    #[serde(default)]
    pub roles: Vec<String>,
    #[serde(default)]
    pub groups: Vec<String>,
    #[serde(default)]
    pub scopes: Vec<String>,
}

// ── Groups ───────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Group {
    pub name: String,
    #[serde(default)]
    pub kind: Option<String>,
    #[serde(default)]
    pub users: Vec<String>,
    #[serde(default)]
    pub properties: serde_json::Map<String, Value>,
    #[serde(default)]
    pub roles: Vec<String>,
}

/// Query parameters for `GET /groups`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ListGroupsParams {
    pub offset: u32,
    pub limit: u32,
}

impl ListGroupsParams {
    pub fn to_query(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::new();
        push_paging(&mut pairs, self.offset, self.limit);
        pairs
    }
}

/// Body for adding users to, or removing users from, a group.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroupUsersBody {
    pub users: Vec<String>,
}

// ── Services ─────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Service {
    pub name: String,
    #[serde(default)]
    pub kind: Option<String>,
    #[serde(default)]
    pub admin: bool,
    #[serde(default)]
    pub roles: Vec<String>,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub prefix: Option<String>,
    #[serde(default)]
    pub pid: Option<u32>,
    #[serde(default)]
    pub command: Vec<String>,
    #[serde(default)]
    pub display: Option<bool>,
    #[serde(default)]
    pub info: Option<Value>,
}

// ── Proxy ────────────────────────────────────────────────────────────

/// One entry of the proxy routing table, keyed by routespec.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProxyRoute {
    pub routespec: String,
    pub target: String,
    #[serde(default)]
    pub data: Option<Value>,
}

/// Query parameters for `GET /proxy`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ProxyTableParams {
    pub offset: u32,
    pub limit: u32,
}

impl ProxyTableParams {
    pub fn to_query(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::new();
        push_paging(&mut pairs, self.offset, self.limit);
        pairs
    }
}

/// `PATCH /proxy` body: tell the hub about a new proxy.
#[derive(Clone, Serialize)]
pub struct NewProxyBody {
    pub ip: String,
    pub port: u16,
    pub protocol: String,
    #[serde(serialize_with = "expose")]
    pub auth_token: SecretString,
}

impl fmt::Debug for NewProxyBody {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NewProxyBody")
            .field("ip", &self.ip)
            .field("port", &self.port)
            .field("protocol", &self.protocol)
            .field("auth_token", &"[REDACTED]")
            .finish()
    }
}

// ── OAuth2 ───────────────────────────────────────────────────────────

/// Parameters of the OAuth2 authorize redirect.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AuthorizeParams {
    /// Falls back to the configured client id, then `service-{name}`.
    pub client_id: Option<String>,
    /// Defaults to `code`.
    pub response_type: Option<String>,
    pub state: String,
    pub redirect_uri: String,
    pub scope: Option<String>,
}

/// Authorization-code exchange sent to `POST /oauth2/token`.
#[derive(Debug, Clone, Default)]
pub struct TokenExchangeBody {
    /// Falls back to the configured client id, then `service-{name}`.
    pub client_id: Option<String>,
    /// Falls back to the configured API token.
    pub client_secret: Option<SecretString>,
    /// Defaults to `authorization_code`.
    pub grant_type: Option<String>,
    pub code: String,
    pub redirect_uri: String,
}

#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OAuth2TokenResponse {
    pub access_token: String,
    pub token_type: String,
    #[serde(default)]
    pub scope: Option<String>,
}

impl fmt::Debug for OAuth2TokenResponse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OAuth2TokenResponse")
            .field("access_token", &"[REDACTED]")
            .field("token_type", &self.token_type)
            .field("scope", &self.scope)
            .finish()
    }
}

// ── Helpers ──────────────────────────────────────────────────────────

fn push_paging(pairs: &mut Vec<(&'static str, String)>, offset: u32, limit: u32) {
    if offset != 0 {
        pairs.push(("offset", offset.to_string()));
    }
    if limit != 0 {
        pairs.push(("limit", limit.to_string()));
    }
}

fn expose<S: serde::Serializer>(secret: &SecretString, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(secret.expose_secret())
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use pretty_assertions::assert_eq;
    use serde_json::json;

    use super::*;

    #[test]
    fn list_users_query_always_carries_include_stopped_servers() {
        assert_eq!(
            ListUsersParams::default().to_query(),
            vec![("include_stopped_servers", "false".to_owned())]
        );

        let params = ListUsersParams {
            state: Some(UserState::Ready),
            offset: 20,
            limit: 10,
            include_stopped_servers: true,
        };
        assert_eq!(
            params.to_query(),
            vec![
                ("state", "ready".to_owned()),
                ("offset", "20".to_owned()),
                ("limit", "10".to_owned()),
                ("include_stopped_servers", "true".to_owned()),
            ]
        );
    }

    #[test]
    fn paging_omits_zero_values() {
        assert!(ListGroupsParams::default().to_query().is_empty());
        assert_eq!(
            ProxyTableParams { offset: 0, limit: 5 }.to_query(),
            vec![("limit", "5".to_owned())]
        );
    }

    #[test]
    fn user_state_parses_lowercase() {
        assert_eq!("active".parse::<UserState>().unwrap(), UserState::Active);
        assert!("running".parse::<UserState>().is_err());
    }

    #[test]
    fn user_decodes_with_servers_and_nulls() {
        let user: User = serde_json::from_value(json!({
            "kind": "user",
            "name": "alice",
            "admin": false,
            "groups": ["staff"],
            "server": "/user/alice/",
            "pending": null,
            "created": "2024-03-01T12:00:00.000000Z",
            "last_activity": null,
            "servers": {
                "": {
                    "name": "",
                    "ready": true,
                    "stopped": false,
                    "pending": null,
                    "url": "/user/alice/",
                    "started": "2024-03-01T12:05:00Z",
                    "last_activity": "2024-03-01T12:10:00Z",
                    "state": {"pid": 4242},
                    "user_options": {}
                }
            }
        }))
        .unwrap();

        assert_eq!(user.name, "alice");
        assert_eq!(user.groups, vec!["staff".to_owned()]);
        assert!(user.last_activity.is_none());
        let server = &user.servers[""];
        assert!(server.ready);
        assert_eq!(server.state, Some(json!({"pid": 4242})));
    }

    #[test]
    fn update_user_body_skips_unset_fields() {
        let body = UpdateUserBody {
            admin: Some(true),
            ..UpdateUserBody::default()
        };
        assert_eq!(serde_json::to_value(&body).unwrap(), json!({"admin": true}));
    }

    #[test]
    fn secret_bodies_serialize_secret_but_hide_it_in_debug() {
        let body = NewTokenBody {
            username: "alice".into(),
            password: SecretString::from("hunter2".to_owned()),
        };
        assert_eq!(
            serde_json::to_value(&body).unwrap(),
            json!({"username": "alice", "password": "hunter2"})
        );
        assert!(!format!("{body:?}").contains("hunter2"));
    }
}
