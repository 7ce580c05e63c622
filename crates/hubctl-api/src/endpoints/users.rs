// User endpoints
//
// User CRUD, activity reporting, server lifecycle, and per-user tokens.

use serde::Serialize;
use tracing::debug;

use crate::client::{ApiRequest, HubClient, segment, with_query};
use crate::error::Error;
use crate::models::{
    CreateUserTokenBody, CreateUsersBody, ListUsersParams, Token, UpdateUserBody, User,
    UserActivityBody,
};

fn user_path(name: &str, rest: &str) -> Result<String, Error> {
    let name = segment(name)?;
    Ok(if rest.is_empty() {
        format!("users/{name}")
    } else {
        format!("users/{name}/{rest}")
    })
}

impl HubClient {
    // ── Users ────────────────────────────────────────────────────────

    /// `GET /users`
    pub async fn list_users(&self, params: &ListUsersParams) -> Result<Vec<User>, Error> {
        let path = with_query("users", &params.to_query());
        self.fetch(ApiRequest::get(path)).await
    }

    /// Create several users at once.
    ///
    /// `POST /users`
    pub async fn create_users(&self, body: &CreateUsersBody) -> Result<Vec<User>, Error> {
        debug!(count = body.usernames.len(), admin = body.admin, "creating users");
        self.fetch(ApiRequest::post("users").with_json(body)?).await
    }

    /// `GET /users/{name}`
    pub async fn get_user(&self, name: &str) -> Result<User, Error> {
        self.fetch(ApiRequest::get(user_path(name, "")?)).await
    }

    /// `POST /users/{name}`
    pub async fn create_user(&self, name: &str) -> Result<User, Error> {
        debug!(name, "creating user");
        self.fetch(ApiRequest::post(user_path(name, "")?)).await
    }

    /// `DELETE /users/{name}`
    pub async fn delete_user(&self, name: &str) -> Result<(), Error> {
        debug!(name, "deleting user");
        self.fire(ApiRequest::delete(user_path(name, "")?)).await
    }

    /// Rename a user and/or change their admin flag.
    ///
    /// `PATCH /users/{name}`
    pub async fn update_user(&self, name: &str, body: &UpdateUserBody) -> Result<User, Error> {
        self.fetch(ApiRequest::patch(user_path(name, "")?).with_json(body)?)
            .await
    }

    /// Report activity for a user and their servers.
    ///
    /// `POST /users/{name}/activity`
    pub async fn notify_user_activity(
        &self,
        name: &str,
        body: &UserActivityBody,
    ) -> Result<(), Error> {
        self.fire(ApiRequest::post(user_path(name, "activity")?).with_json(body)?)
            .await
    }

    // ── Servers ──────────────────────────────────────────────────────

    /// Start the default server. `options` become the spawner's user options.
    ///
    /// `POST /users/{name}/server`
    pub async fn start_user_server<O: Serialize + ?Sized>(
        &self,
        name: &str,
        options: &O,
    ) -> Result<(), Error> {
        debug!(name, "starting default server");
        self.fire(ApiRequest::post(user_path(name, "server")?).with_json(options)?)
            .await
    }

    /// `DELETE /users/{name}/server`
    pub async fn stop_user_server(&self, name: &str) -> Result<(), Error> {
        debug!(name, "stopping default server");
        self.fire(ApiRequest::delete(user_path(name, "server")?)).await
    }

    /// `POST /users/{name}/servers/{server}`
    pub async fn start_user_named_server<O: Serialize + ?Sized>(
        &self,
        name: &str,
        server: &str,
        options: &O,
    ) -> Result<(), Error> {
        debug!(name, server, "starting named server");
        let path = user_path(name, &format!("servers/{}", segment(server)?))?;
        self.fire(ApiRequest::post(path).with_json(options)?).await
    }

    /// `DELETE /users/{name}/servers/{server}`
    pub async fn stop_user_named_server(&self, name: &str, server: &str) -> Result<(), Error> {
        debug!(name, server, "stopping named server");
        let path = user_path(name, &format!("servers/{}", segment(server)?))?;
        self.fire(ApiRequest::delete(path)).await
    }

    // ── Tokens ───────────────────────────────────────────────────────

    /// `GET /users/{name}/tokens`
    pub async fn list_user_tokens(&self, name: &str) -> Result<Vec<Token>, Error> {
        #[derive(serde::Deserialize)]
        struct TokenList {
            api_tokens: Vec<Token>,
        }

        // Hubs answer either `{"api_tokens": [...]}` or a bare list.
        #[derive(serde::Deserialize)]
        #[serde(untagged)]
        enum Listing {
            Wrapped(TokenList),
            Bare(Vec<Token>),
        }

        let listing: Listing = self.fetch(ApiRequest::get(user_path(name, "tokens")?)).await?;
        Ok(match listing {
            Listing::Wrapped(list) => list.api_tokens,
            Listing::Bare(tokens) => tokens,
        })
    }

    /// `POST /users/{name}/tokens`
    pub async fn create_user_token(
        &self,
        name: &str,
        body: &CreateUserTokenBody,
    ) -> Result<Token, Error> {
        debug!(name, "creating token");
        self.fetch(ApiRequest::post(user_path(name, "tokens")?).with_json(body)?)
            .await
    }

    /// `GET /users/{name}/tokens/{token_id}`
    pub async fn get_user_token(&self, name: &str, token_id: &str) -> Result<Token, Error> {
        let path = user_path(name, &format!("tokens/{}", segment(token_id)?))?;
        self.fetch(ApiRequest::get(path)).await
    }

    /// `DELETE /users/{name}/tokens/{token_id}`
    pub async fn delete_user_token(&self, name: &str, token_id: &str) -> Result<(), Error> {
        debug!(name, token_id, "revoking token");
        let path = user_path(name, &format!("tokens/{}", segment(token_id)?))?;
        self.fire(ApiRequest::delete(path)).await
    }
}
