//! Core types for environment-variable synchronization

use serde::{Deserialize, Serialize};

/// A single `KEY=VALUE` assignment read from an env file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Declaration {
    pub key: String,
    pub value: String,
}

impl Declaration {
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }

    /// Whether the value spans more than one line
    pub fn is_multiline(&self) -> bool {
        self.value.contains('\n')
    }
}

/// A variable as currently stored on the remote side
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemoteDeclaration {
    pub key: String,
    #[serde(default)]
    pub value: String,
    /// Opaque identifier assigned by the remote
    #[serde(rename = "uuid", default)]
    pub identity: String,
    #[serde(default)]
    pub is_build_time: bool,
    #[serde(default)]
    pub is_literal: bool,
    #[serde(default)]
    pub is_multiline: bool,
    #[serde(default)]
    pub is_runtime: bool,
}

impl RemoteDeclaration {
    /// Create a remote entry with all flags cleared
    pub fn new(
        key: impl Into<String>,
        value: impl Into<String>,
        identity: impl Into<String>,
    ) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
            identity: identity.into(),
            is_build_time: false,
            is_literal: false,
            is_multiline: false,
            is_runtime: false,
        }
    }
}

/// Normalized write payload for both bulk updates and creates.
///
/// Flag fields are `None` unless the caller explicitly set them, and are
/// left out of the serialized payload so the remote keeps its defaults.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct OperationRequest {
    pub key: String,
    pub value: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_build_time: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_literal: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_multiline: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_runtime: Option<bool>,
}

impl OperationRequest {
    /// Build a request from a declaration plus the explicitly-set common flags
    pub fn from_declaration(declaration: &Declaration, flags: &CommonFlags) -> Self {
        Self {
            key: declaration.key.clone(),
            value: declaration.value.clone(),
            is_build_time: flags.build_time,
            is_literal: flags.is_literal,
            is_multiline: None,
            is_runtime: flags.runtime,
        }
    }
}

/// Flags applied to every request in a sync run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct CommonFlags {
    pub build_time: Option<bool>,
    pub is_literal: Option<bool>,
    pub runtime: Option<bool>,
}

impl CommonFlags {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn build_time(mut self, value: bool) -> Self {
        self.build_time = Some(value);
        self
    }

    pub fn literal(mut self, value: bool) -> Self {
        self.is_literal = Some(value);
        self
    }

    pub fn runtime(mut self, value: bool) -> Self {
        self.runtime = Some(value);
        self
    }
}

/// Update and create operations, each in file order
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SyncPlan {
    pub to_update: Vec<OperationRequest>,
    pub to_create: Vec<OperationRequest>,
}

impl SyncPlan {
    /// Check if plan is empty
    pub fn is_empty(&self) -> bool {
        self.to_update.is_empty() && self.to_create.is_empty()
    }

    /// Total number of planned operations
    pub fn len(&self) -> usize {
        self.to_update.len() + self.to_create.len()
    }
}

/// A create that the remote rejected
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SyncFailure {
    pub key: String,
    pub error: String,
}

/// Summary of an executed plan
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SyncResult {
    pub updated: usize,
    pub created: usize,
    pub failed: usize,
    /// Per-key create failures. A failed bulk update only bumps `failed`.
    pub failures: Vec<SyncFailure>,
}

impl SyncResult {
    /// Check if execution was fully successful (no failures)
    pub fn is_success(&self) -> bool {
        self.failed == 0
    }

    /// Total number of variables written
    pub fn total_changes(&self) -> usize {
        self.updated + self.created
    }

    /// Total number of operations attempted, successful or not
    pub fn attempted(&self) -> usize {
        self.updated + self.created + self.failed
    }

    pub(crate) fn record_failure(&mut self, key: impl Into<String>, error: impl Into<String>) {
        self.failed += 1;
        self.failures.push(SyncFailure {
            key: key.into(),
            error: error.into(),
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_omits_unset_flags() {
        let decl = Declaration::new("API_URL", "https://example.com");
        let req = OperationRequest::from_declaration(&decl, &CommonFlags::new().build_time(true));

        let json = serde_json::to_value(&req).unwrap();
        assert_eq!(json["key"], "API_URL");
        assert_eq!(json["is_build_time"], true);
        assert!(json.get("is_literal").is_none());
        assert!(json.get("is_multiline").is_none());
        assert!(json.get("is_runtime").is_none());
    }

    #[test]
    fn test_explicit_false_is_kept() {
        let decl = Declaration::new("A", "1");
        let req = OperationRequest::from_declaration(&decl, &CommonFlags::new().runtime(false));

        let json = serde_json::to_value(&req).unwrap();
        assert_eq!(json["is_runtime"], false);
    }

    #[test]
    fn test_remote_declaration_from_json() {
        let json = r#"{"uuid":"abc123","key":"DB_HOST","value":"localhost","is_literal":true}"#;
        let remote: RemoteDeclaration = serde_json::from_str(json).unwrap();

        assert_eq!(remote.identity, "abc123");
        assert_eq!(remote.key, "DB_HOST");
        assert!(remote.is_literal);
        assert!(!remote.is_build_time);
    }

    #[test]
    fn test_sync_result_accounting() {
        let mut result = SyncResult {
            updated: 2,
            created: 1,
            ..Default::default()
        };
        assert!(result.is_success());
        assert_eq!(result.total_changes(), 3);

        result.record_failure("X", "boom");
        assert!(!result.is_success());
        assert_eq!(result.failed, 1);
        assert_eq!(result.failures[0].key, "X");
    }

    #[test]
    fn test_plan_len() {
        let plan = SyncPlan {
            to_update: vec![OperationRequest::default()],
            to_create: vec![OperationRequest::default(), OperationRequest::default()],
        };
        assert_eq!(plan.len(), 3);
        assert!(!plan.is_empty());
        assert!(SyncPlan::default().is_empty());
    }
}
