//! Remote service abstraction.
//!
//! The planner and executor only talk to the remote through
//! [`RemoteService`], so any store that can list variables, bulk-update by
//! key, and create one variable at a time can be synced against.
//!
//! # Testing
//!
//! Use [`MockRemote`] for testing without network access:
//!
//! ```
//! use envkit::remote::{MockRemote, RemoteService};
//! use envkit::RemoteDeclaration;
//!
//! let mock = MockRemote::new()
//!     .with_resource("app-1", vec![RemoteDeclaration::new("PORT", "80", "u1")]);
//!
//! let vars = mock.list("app-1").unwrap();
//! assert_eq!(vars.len(), 1);
//! ```

use crate::error::RemoteError;
use crate::types::{OperationRequest, RemoteDeclaration};
use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex};

/// Capabilities the sync engine needs from a remote variable store.
pub trait RemoteService {
    /// Snapshot of every variable currently set on `resource_id`.
    fn list(&self, resource_id: &str) -> Result<Vec<RemoteDeclaration>, RemoteError>;

    /// Update many variables, addressed by key, in one call.
    ///
    /// All-or-nothing from the caller's point of view: an error means no
    /// per-item outcome is known.
    fn bulk_update(
        &self,
        resource_id: &str,
        requests: &[OperationRequest],
    ) -> Result<(), RemoteError>;

    /// Create a single variable.
    fn create(
        &self,
        resource_id: &str,
        request: &OperationRequest,
    ) -> Result<RemoteDeclaration, RemoteError>;
}

#[derive(Debug, Default)]
struct MockState {
    resources: HashMap<String, Vec<RemoteDeclaration>>,
    fail_bulk_update: Option<String>,
    fail_create: HashSet<String>,
    bulk_update_calls: Vec<Vec<OperationRequest>>,
    create_calls: Vec<OperationRequest>,
    next_id: usize,
}

/// In-memory remote for tests and dry runs.
///
/// Writes are applied to the stored variables, so running the same plan
/// twice converges to the same state. Failures can be injected per phase.
#[derive(Debug, Clone, Default)]
pub struct MockRemote {
    state: Arc<Mutex<MockState>>,
}

impl MockRemote {
    /// Create a new mock with no resources.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a resource with its current variables.
    pub fn with_resource(self, resource_id: impl Into<String>, vars: Vec<RemoteDeclaration>) -> Self {
        self.state
            .lock()
            .unwrap()
            .resources
            .insert(resource_id.into(), vars);
        self
    }

    /// Make every bulk update fail with `message`.
    pub fn fail_bulk_update(self, message: impl Into<String>) -> Self {
        self.state.lock().unwrap().fail_bulk_update = Some(message.into());
        self
    }

    /// Make creating `key` fail.
    pub fn fail_create_for(self, key: impl Into<String>) -> Self {
        self.state.lock().unwrap().fail_create.insert(key.into());
        self
    }

    /// Requests passed to each bulk update call, in call order.
    pub fn bulk_update_calls(&self) -> Vec<Vec<OperationRequest>> {
        self.state.lock().unwrap().bulk_update_calls.clone()
    }

    /// Requests passed to create, in call order.
    pub fn create_calls(&self) -> Vec<OperationRequest> {
        self.state.lock().unwrap().create_calls.clone()
    }

    /// Current variables of a resource.
    pub fn vars(&self, resource_id: &str) -> Vec<RemoteDeclaration> {
        self.state
            .lock()
            .unwrap()
            .resources
            .get(resource_id)
            .cloned()
            .unwrap_or_default()
    }
}

fn apply_request(var: &mut RemoteDeclaration, request: &OperationRequest) {
    var.value = request.value.clone();
    if let Some(v) = request.is_build_time {
        var.is_build_time = v;
    }
    if let Some(v) = request.is_literal {
        var.is_literal = v;
    }
    if let Some(v) = request.is_multiline {
        var.is_multiline = v;
    }
    if let Some(v) = request.is_runtime {
        var.is_runtime = v;
    }
}

fn not_found(context: &str, resource_id: &str) -> RemoteError {
    RemoteError::new(context, format!("resource not found: {resource_id}")).with_status(404)
}

impl RemoteService for MockRemote {
    fn list(&self, resource_id: &str) -> Result<Vec<RemoteDeclaration>, RemoteError> {
        let state = self.state.lock().unwrap();
        state
            .resources
            .get(resource_id)
            .cloned()
            .ok_or_else(|| not_found("list", resource_id))
    }

    fn bulk_update(
        &self,
        resource_id: &str,
        requests: &[OperationRequest],
    ) -> Result<(), RemoteError> {
        let mut state = self.state.lock().unwrap();
        state.bulk_update_calls.push(requests.to_vec());

        if let Some(message) = &state.fail_bulk_update {
            return Err(RemoteError::new("bulk update", message.clone()).with_status(500));
        }

        let vars = state
            .resources
            .get_mut(resource_id)
            .ok_or_else(|| not_found("bulk update", resource_id))?;

        for request in requests {
            match vars.iter_mut().rev().find(|v| v.key == request.key) {
                Some(var) => apply_request(var, request),
                None => {
                    let mut var = RemoteDeclaration::new(&request.key, "", "");
                    apply_request(&mut var, request);
                    vars.push(var);
                }
            }
        }

        Ok(())
    }

    fn create(
        &self,
        resource_id: &str,
        request: &OperationRequest,
    ) -> Result<RemoteDeclaration, RemoteError> {
        let mut state = self.state.lock().unwrap();
        state.create_calls.push(request.clone());

        let context = format!("create {}", request.key);
        if state.fail_create.contains(&request.key) {
            return Err(RemoteError::new(context, "rejected by mock").with_status(422));
        }

        state.next_id += 1;
        let identity = format!("mock-{}", state.next_id);

        let vars = state
            .resources
            .get_mut(resource_id)
            .ok_or_else(|| not_found(&context, resource_id))?;

        if vars.iter().any(|v| v.key == request.key) {
            return Err(RemoteError::new(context, "variable already exists").with_status(409));
        }

        let mut var = RemoteDeclaration::new(&request.key, "", identity);
        apply_request(&mut var, request);
        vars.push(var.clone());

        Ok(var)
    }
}
