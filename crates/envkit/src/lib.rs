//! # envkit
//!
//! Parse `.env` files and reconcile them against a remote
//! environment-variable store.
//!
//! ## Core Concepts
//!
//! - **Declaration**: one `KEY=VALUE` from the file, in file order
//! - **SyncPlan**: which keys to bulk-update and which to create
//! - **SyncResult**: counts of updated, created, and failed operations
//! - **RemoteService**: the store being synced to (HTTP API, mock, ...)
//!
//! ## Example
//!
//! ```
//! use envkit::{parser, planner, executor, CommonFlags, RemoteDeclaration};
//! use envkit::remote::MockRemote;
//!
//! let desired = parser::parse_str("A=1\nB=\"two\nlines\"").unwrap();
//! let remote = MockRemote::new()
//!     .with_resource("app", vec![RemoteDeclaration::new("B", "old", "u1")]);
//!
//! let existing = envkit::remote::RemoteService::list(&remote, "app").unwrap();
//! let plan = planner::plan(&desired, &existing, &CommonFlags::default());
//! assert_eq!(plan.to_create.len(), 1);
//! assert_eq!(plan.to_update.len(), 1);
//!
//! let result = executor::execute_simple(&plan, "app", &remote);
//! assert!(result.is_success());
//! ```
//!
//! Syncs are not atomic. Updates are sent as one bulk call and reported as a
//! unit; creates are sent one by one and fail individually. Nothing is
//! rolled back.

pub mod error;
pub mod executor;
pub mod parser;
pub mod planner;
pub mod remote;
pub mod sync;
pub mod types;

// Re-export main types at crate root
pub use error::{ErrorCategory, ParseError, RemoteError, Result, SyncError};
pub use executor::{NoProgress, Phase, ProgressCallback, execute, execute_simple};
pub use parser::{parse_file, parse_reader, parse_str};
pub use planner::plan;
pub use remote::{MockRemote, RemoteService};
pub use sync::{prepare, sync_file};
pub use types::{
    CommonFlags, Declaration, OperationRequest, RemoteDeclaration, SyncFailure, SyncPlan,
    SyncResult,
};
