// Hub-level endpoints
//
// Version, detailed info, the requesting identity, and shutdown.

use tracing::debug;

use crate::client::{ApiRequest, HubClient};
use crate::error::Error;
use crate::models::{InfoResponse, ShutdownBody, User, VersionResponse};

impl HubClient {
    /// Hub version.
    ///
    /// `GET /` (the API root)
    pub async fn version(&self) -> Result<VersionResponse, Error> {
        debug!("fetching hub version");
        self.fetch(ApiRequest::get("")).await
    }

    /// Detailed hub information: Python, authenticator and spawner classes.
    ///
    /// `GET /info` (admin only)
    pub async fn info(&self) -> Result<InfoResponse, Error> {
        debug!("fetching hub info");
        self.fetch(ApiRequest::get("info")).await
    }

    /// The user (or service) owning the configured credentials.
    ///
    /// `GET /user`
    pub async fn current_user(&self) -> Result<User, Error> {
        self.fetch(ApiRequest::get("user")).await
    }

    /// Shut down the hub, optionally with the proxy and user servers.
    ///
    /// `POST /shutdown`
    pub async fn shutdown(&self, body: &ShutdownBody) -> Result<(), Error> {
        debug!(proxy = body.proxy, servers = body.servers, "requesting hub shutdown");
        self.fire(ApiRequest::post("shutdown").with_json(body)?).await
    }
}
