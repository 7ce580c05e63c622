// Proxy endpoints
//
// Read the routing table, force a sync, or point the hub at a new proxy.

use std::collections::HashMap;

use tracing::debug;

use crate::client::{ApiRequest, HubClient, with_query};
use crate::error::Error;
use crate::models::{NewProxyBody, ProxyRoute, ProxyTableParams};

impl HubClient {
    /// The proxy routing table, keyed by routespec.
    ///
    /// `GET /proxy`
    pub async fn get_proxy_table(
        &self,
        params: &ProxyTableParams,
    ) -> Result<HashMap<String, ProxyRoute>, Error> {
        let path = with_query("proxy", &params.to_query());
        self.fetch(ApiRequest::get(path)).await
    }

    /// Force the hub to sync its routes to the proxy.
    ///
    /// `POST /proxy`
    pub async fn force_proxy_sync(&self) -> Result<(), Error> {
        debug!("forcing proxy sync");
        self.fire(ApiRequest::post("proxy")).await
    }

    /// Tell the hub a new proxy is running and should be used.
    ///
    /// `PATCH /proxy`
    pub async fn notify_new_proxy(&self, body: &NewProxyBody) -> Result<(), Error> {
        debug!(ip = %body.ip, port = body.port, "notifying hub of new proxy");
        self.fire(ApiRequest::patch("proxy").with_json(body)?).await
    }
}
