// Group endpoints

use serde::Serialize;
use tracing::debug;

use crate::client::{ApiRequest, HubClient, segment, with_query};
use crate::error::Error;
use crate::models::{Group, GroupUsersBody, ListGroupsParams};

fn group_path(name: &str, rest: &str) -> Result<String, Error> {
    let name = segment(name)?;
    Ok(if rest.is_empty() {
        format!("groups/{name}")
    } else {
        format!("groups/{name}/{rest}")
    })
}

impl HubClient {
    /// `GET /groups`
    pub async fn list_groups(&self, params: &ListGroupsParams) -> Result<Vec<Group>, Error> {
        let path = with_query("groups", &params.to_query());
        self.fetch(ApiRequest::get(path)).await
    }

    /// `GET /groups/{name}`
    pub async fn get_group(&self, name: &str) -> Result<Group, Error> {
        self.fetch(ApiRequest::get(group_path(name, "")?)).await
    }

    /// `POST /groups/{name}`
    pub async fn create_group(&self, name: &str) -> Result<Group, Error> {
        debug!(name, "creating group");
        self.fetch(ApiRequest::post(group_path(name, "")?)).await
    }

    /// `DELETE /groups/{name}`
    pub async fn delete_group(&self, name: &str) -> Result<(), Error> {
        debug!(name, "deleting group");
        self.fire(ApiRequest::delete(group_path(name, "")?)).await
    }

    /// `POST /groups/{name}/users`
    pub async fn add_group_users(&self, name: &str, body: &GroupUsersBody) -> Result<Group, Error> {
        debug!(name, count = body.users.len(), "adding group members");
        self.fetch(ApiRequest::post(group_path(name, "users")?).with_json(body)?)
            .await
    }

    /// `DELETE /groups/{name}/users` (with a body)
    pub async fn remove_group_users(&self, name: &str, body: &GroupUsersBody) -> Result<(), Error> {
        debug!(name, count = body.users.len(), "removing group members");
        self.fire(ApiRequest::delete(group_path(name, "users")?).with_json(body)?)
            .await
    }

    /// Replace the group's properties with `properties`.
    ///
    /// `PUT /groups/{name}/properties`
    pub async fn set_group_properties<P: Serialize + ?Sized>(
        &self,
        name: &str,
        properties: &P,
    ) -> Result<(), Error> {
        self.fire(ApiRequest::put(group_path(name, "properties")?).with_json(properties)?)
            .await
    }
}
