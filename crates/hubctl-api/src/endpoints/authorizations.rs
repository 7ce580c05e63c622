// Token authorization endpoints

use crate::client::{ApiRequest, HubClient, segment};
use crate::error::Error;
use crate::models::{NewTokenBody, NewTokenResponse, TokenOwner};

impl HubClient {
    /// Trade a username and password for a new API token.
    ///
    /// `POST /authorizations/token`
    pub async fn new_api_token(&self, body: &NewTokenBody) -> Result<NewTokenResponse, Error> {
        self.fetch(ApiRequest::post("authorizations/token").with_json(body)?)
            .await
    }

    /// Identify the user or service owning `token`.
    ///
    /// `GET /authorizations/token/{token}`. The path is kept out of logs.
    /// A rejected token surfaces as [`Error::UnexpectedStatus`] (404).
    pub async fn validate_token(&self, token: &str) -> Result<TokenOwner, Error> {
        let path = format!("authorizations/token/{}", segment(token)?);
        let request = ApiRequest::get(path).redacted();
        self.fetch(request).await
    }
}
