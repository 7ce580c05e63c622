// Service endpoints

use std::collections::HashMap;

use crate::client::{ApiRequest, HubClient, segment};
use crate::error::Error;
use crate::models::Service;

impl HubClient {
    /// All services, keyed by name.
    ///
    /// `GET /services`
    pub async fn list_services(&self) -> Result<HashMap<String, Service>, Error> {
        self.fetch(ApiRequest::get("services")).await
    }

    /// `GET /services/{name}`
    pub async fn get_service(&self, name: &str) -> Result<Service, Error> {
        self.fetch(ApiRequest::get(format!("services/{}", segment(name)?)))
            .await
    }
}
