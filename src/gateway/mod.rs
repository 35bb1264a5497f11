mod client;
mod endpoints;
mod error;

pub use client::{ApiResponse, Client};
pub use endpoints::Endpoints;
pub use error::GatewayError;

use crate::entity::{Entity, EntityKind, SaveMode};
use log::*;
use reqwest::Method;
use serde_json::{json, Value};

/// Default gateway location.
///
pub const DEFAULT_BASE_URL: &str = "https://localhost:7777/gateway";

/// Responsible for asynchronous interaction with the REST gateway including
/// transformation of response data into the entity view models.
///
pub struct Gateway {
    client: Client,
}

impl Gateway {
    /// Returns a new instance for the base URL and optional bearer token.
    ///
    pub fn new(base_url: &str, access_token: Option<&str>) -> Gateway {
        debug!("Initializing gateway client for {}...", base_url);
        Gateway {
            client: Client::new(base_url, access_token),
        }
    }

    /// Replaces the bearer token, or clears it on logout.
    ///
    pub fn set_access_token(&mut self, access_token: Option<String>) {
        self.client.set_access_token(access_token);
    }

    pub fn has_access_token(&self) -> bool {
        self.client.has_access_token()
    }

    /// Returns every record of the entity type. Records that fail to decode
    /// are skipped with a warning; the call fails only when none decode.
    ///
    pub async fn list<E: Entity>(&self) -> Result<Vec<E>, GatewayError> {
        let endpoints = Endpoints::of(E::KIND);
        debug!("Requesting {}...", E::KIND.plural());
        let response = self
            .client
            .call(Method::GET, endpoints.list, None)
            .await?
            .accepted()?;
        let items: Vec<Value> = match response.data {
            Some(Value::Null) | None => vec![],
            Some(data) => serde_json::from_value(data)?,
        };
        let mut records = Vec::with_capacity(items.len());
        let mut first_error = None;
        for item in &items {
            match E::from_wire(item) {
                Ok(record) => records.push(record),
                Err(e) => {
                    warn!("Skipping {} record: {}", E::KIND.singular(), e);
                    first_error.get_or_insert(e);
                }
            }
        }
        if let (true, Some(e)) = (records.is_empty(), first_error) {
            return Err(e.into());
        }
        debug!("Retrieved {} {}", records.len(), E::KIND.plural());
        Ok(records)
    }

    /// Creates or updates a record from a prepared payload.
    ///
    pub async fn save(
        &self,
        kind: EntityKind,
        mode: SaveMode,
        payload: &Value,
    ) -> Result<ApiResponse, GatewayError> {
        let endpoints = Endpoints::of(kind);
        let (method, path) = match mode {
            SaveMode::Create => (Method::POST, endpoints.create),
            SaveMode::Update => (Method::PUT, endpoints.update),
        };
        debug!("Saving {} ({:?})...", kind.singular(), mode);
        self.client
            .call(method, path, Some(payload))
            .await?
            .accepted()
    }

    /// Deletes a record by identity.
    ///
    pub async fn delete(&self, kind: EntityKind, id: &str) -> Result<ApiResponse, GatewayError> {
        debug!("Deleting {} {}...", kind.singular(), id);
        let path = Endpoints::of(kind).delete(id);
        self.client
            .call(Method::DELETE, &path, None)
            .await?
            .accepted()
    }

    /// Replaces the roles assigned to a user.
    ///
    pub async fn assign_roles(&self, user_id: &str, roles: &[String]) -> Result<(), GatewayError> {
        self.assign(endpoints::ASSIGN_ROLES, user_id, json!({ "roles": roles }))
            .await
    }

    /// Replaces the explicit permissions granted to a user.
    ///
    pub async fn assign_permissions(
        &self,
        user_id: &str,
        permissions: &[String],
    ) -> Result<(), GatewayError> {
        self.assign(
            endpoints::ASSIGN_PERMISSIONS,
            user_id,
            json!({ "permissions": permissions }),
        )
        .await
    }

    /// Replaces the modules a user can reach.
    ///
    pub async fn assign_modules(
        &self,
        user_id: &str,
        modules: &[String],
    ) -> Result<(), GatewayError> {
        self.assign(endpoints::ASSIGN_MODULES, user_id, json!({ "modules": modules }))
            .await
    }

    async fn assign(&self, prefix: &str, user_id: &str, body: Value) -> Result<(), GatewayError> {
        debug!("Updating access for user {} via {}...", user_id, prefix);
        let path = format!("{}/{}", prefix, user_id);
        self.client
            .call(Method::PUT, &path, Some(&body))
            .await?
            .accepted()?;
        Ok(())
    }
}
