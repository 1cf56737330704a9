//! HTTP remote backed by the deployment server's REST API.
//!
//! Endpoints, relative to the instance URL:
//!
//! - `GET   /api/v1/applications/{id}/envs` - list variables
//! - `PATCH /api/v1/applications/{id}/envs/bulk` - update many by key
//! - `POST  /api/v1/applications/{id}/envs` - create one
//!
//! Calls are blocking and never retried; the configured timeout is the only
//! deadline.

use envkit::{OperationRequest, RemoteDeclaration, RemoteError, RemoteService};
use serde::{Deserialize, Serialize};

use crate::config::Connection;

pub struct HttpRemote {
    /// HTTP agent for requests.
    agent: ureq::Agent,
    /// Instance base URL, without trailing slash.
    base_url: String,
    token: String,
}

impl HttpRemote {
    pub fn new(connection: &Connection) -> Self {
        let agent: ureq::Agent = ureq::Agent::config_builder()
            .timeout_global(Some(connection.timeout))
            .build()
            .into();
        Self {
            agent,
            base_url: connection.base_url.clone(),
            token: connection.token.clone(),
        }
    }

    fn envs_url(&self, resource_id: &str) -> String {
        format!("{}/api/v1/applications/{}/envs", self.base_url, resource_id)
    }

    fn bulk_url(&self, resource_id: &str) -> String {
        format!("{}/bulk", self.envs_url(resource_id))
    }

    fn auth_header(&self) -> String {
        format!("Bearer {}", self.token)
    }
}

/// Variable as returned by the API; optional fields may be `null`.
#[derive(Debug, Deserialize)]
struct ApiVariable {
    #[serde(default)]
    uuid: Option<String>,
    key: String,
    #[serde(default)]
    value: Option<String>,
    #[serde(default)]
    is_build_time: Option<bool>,
    #[serde(default)]
    is_literal: Option<bool>,
    #[serde(default)]
    is_multiline: Option<bool>,
    #[serde(default)]
    is_runtime: Option<bool>,
}

impl From<ApiVariable> for RemoteDeclaration {
    fn from(var: ApiVariable) -> Self {
        Self {
            key: var.key,
            value: var.value.unwrap_or_default(),
            identity: var.uuid.unwrap_or_default(),
            is_build_time: var.is_build_time.unwrap_or(false),
            is_literal: var.is_literal.unwrap_or(false),
            is_multiline: var.is_multiline.unwrap_or(false),
            is_runtime: var.is_runtime.unwrap_or(false),
        }
    }
}

#[derive(Debug, Serialize)]
struct BulkBody<'a> {
    data: &'a [OperationRequest],
}

#[derive(Debug, Deserialize)]
struct CreatedBody {
    uuid: String,
}

/// Wrap a transport error with the operation it interrupted.
fn remote_error(context: &str, err: ureq::Error) -> RemoteError {
    match err {
        ureq::Error::StatusCode(code) => {
            RemoteError::new(context, format!("HTTP {code}")).with_status(code)
        }
        other => RemoteError::new(context, other.to_string()),
    }
}

fn declaration_from_created(request: &OperationRequest, uuid: String) -> RemoteDeclaration {
    RemoteDeclaration {
        key: request.key.clone(),
        value: request.value.clone(),
        identity: uuid,
        is_build_time: request.is_build_time.unwrap_or(false),
        is_literal: request.is_literal.unwrap_or(false),
        is_multiline: request.is_multiline.unwrap_or(false),
        is_runtime: request.is_runtime.unwrap_or(false),
    }
}

impl RemoteService for HttpRemote {
    fn list(&self, resource_id: &str) -> Result<Vec<RemoteDeclaration>, RemoteError> {
        let url = self.envs_url(resource_id);
        log::debug!("GET {url}");

        let vars: Vec<ApiVariable> = self
            .agent
            .get(&url)
            .header("Authorization", &self.auth_header())
            .header("Accept", "application/json")
            .call()
            .and_then(|mut response| response.body_mut().read_json())
            .map_err(|e| remote_error("list", e))?;

        Ok(vars.into_iter().map(Into::into).collect())
    }

    fn bulk_update(
        &self,
        resource_id: &str,
        requests: &[OperationRequest],
    ) -> Result<(), RemoteError> {
        let url = self.bulk_url(resource_id);
        log::debug!("PATCH {url} ({} variables)", requests.len());

        self.agent
            .patch(&url)
            .header("Authorization", &self.auth_header())
            .header("Accept", "application/json")
            .send_json(BulkBody { data: requests })
            .map_err(|e| remote_error("bulk update", e))?;

        Ok(())
    }

    fn create(
        &self,
        resource_id: &str,
        request: &OperationRequest,
    ) -> Result<RemoteDeclaration, RemoteError> {
        let url = self.envs_url(resource_id);
        let context = format!("create {}", request.key);
        log::debug!("POST {url} ({})", request.key);

        let created: CreatedBody = self
            .agent
            .post(&url)
            .header("Authorization", &self.auth_header())
            .header("Accept", "application/json")
            .send_json(request)
            .and_then(|mut response| response.body_mut().read_json())
            .map_err(|e| remote_error(&context, e))?;

        Ok(declaration_from_created(request, created.uuid))
    }
}
