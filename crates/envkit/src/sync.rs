//! End-to-end sync: parse, snapshot, plan, execute

use crate::error::{Result, SyncError};
use crate::executor::{ProgressCallback, execute};
use crate::parser::parse_file;
use crate::planner::plan;
use crate::remote::RemoteService;
use crate::types::{CommonFlags, SyncPlan, SyncResult};
use std::path::Path;

/// Parse `path` and plan it against the current remote state, without writing.
///
/// Parse errors abort before the remote is contacted.
pub fn prepare<R: RemoteService + ?Sized>(
    path: &Path,
    resource_id: &str,
    flags: &CommonFlags,
    remote: &R,
) -> Result<SyncPlan> {
    let desired = parse_file(path)?;
    let existing = remote
        .list(resource_id)
        .map_err(|e| e.in_context("list"))?;

    log::debug!(
        "Resource {} has {} variables, file declares {}",
        resource_id,
        existing.len(),
        desired.len()
    );

    Ok(plan(&desired, &existing, flags))
}

/// Sync an env file to a remote resource.
///
/// Returns `Err(SyncError::PartialFailure)` when any operation failed; the
/// error still carries the full [`SyncResult`] so successes stay visible.
pub fn sync_file<R, P>(
    path: &Path,
    resource_id: &str,
    flags: &CommonFlags,
    remote: &R,
    progress: &mut P,
) -> Result<SyncResult>
where
    R: RemoteService + ?Sized,
    P: ProgressCallback,
{
    let plan = prepare(path, resource_id, flags, remote)?;
    finish(execute(&plan, resource_id, remote, progress))
}

/// Turn an execution result into the overall outcome.
pub fn finish(result: SyncResult) -> Result<SyncResult> {
    if result.is_success() {
        Ok(result)
    } else {
        Err(SyncError::PartialFailure(result))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::executor::NoProgress;
    use crate::remote::MockRemote;
    use crate::types::RemoteDeclaration;
    use std::io::Write;

    fn env_file(content: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_sync_creates_and_updates() {
        let file = env_file("A=1\nB=2\n");
        let remote =
            MockRemote::new().with_resource("app", vec![RemoteDeclaration::new("B", "old", "u1")]);

        let result = sync_file(
            file.path(),
            "app",
            &CommonFlags::default(),
            &remote,
            &mut NoProgress,
        )
        .unwrap();

        assert_eq!(result.updated, 1);
        assert_eq!(result.created, 1);

        let vars = remote.vars("app");
        assert_eq!(vars.len(), 2);
        assert!(vars.iter().any(|v| v.key == "B" && v.value == "2"));
    }

    #[test]
    fn test_parse_error_makes_no_remote_calls() {
        let file = env_file("A=1\nBROKEN\n");
        let remote = MockRemote::new().with_resource("app", Vec::new());

        let err = sync_file(
            file.path(),
            "app",
            &CommonFlags::default(),
            &remote,
            &mut NoProgress,
        )
        .unwrap_err();

        assert!(matches!(err, SyncError::Parse(_)));
        assert!(err.to_string().contains("missing '='"));
        assert!(remote.bulk_update_calls().is_empty());
        assert!(remote.create_calls().is_empty());
    }

    #[test]
    fn test_list_failure_propagates() {
        let file = env_file("A=1\n");
        let remote = MockRemote::new();

        let err = sync_file(
            file.path(),
            "unknown",
            &CommonFlags::default(),
            &remote,
            &mut NoProgress,
        )
        .unwrap_err();

        assert!(matches!(err, SyncError::Remote(ref e) if e.context == "list"));
        assert!(remote.create_calls().is_empty());
    }

    #[test]
    fn test_bulk_failure_reports_counts_and_errors() {
        let file = env_file("EXISTING1=a\nNEW1=b\nEXISTING2=c\nNEW2=d\n");
        let remote = MockRemote::new()
            .with_resource(
                "app",
                vec![
                    RemoteDeclaration::new("EXISTING1", "x", "u1"),
                    RemoteDeclaration::new("EXISTING2", "y", "u2"),
                ],
            )
            .fail_bulk_update("gateway timeout");

        let err = sync_file(
            file.path(),
            "app",
            &CommonFlags::default(),
            &remote,
            &mut NoProgress,
        )
        .unwrap_err();

        let result = err.result().unwrap();
        assert_eq!(result.failed, 2);
        assert_eq!(result.created, 2);
        assert_eq!(result.updated, 0);
    }

    #[test]
    fn test_prepare_is_stable_across_runs() {
        let file = env_file("A=1\nB=\"multi\nline\"\n");
        let remote = MockRemote::new().with_resource(
            "app",
            vec![
                RemoteDeclaration::new("A", "1", "u1"),
                RemoteDeclaration::new("B", "multi\nline", "u2"),
            ],
        );
        let flags = CommonFlags::new().literal(true);

        let first = prepare(file.path(), "app", &flags, &remote).unwrap();
        execute(&first, "app", &remote, &mut NoProgress);
        let second = prepare(file.path(), "app", &flags, &remote).unwrap();

        assert_eq!(first.to_update.len(), 2);
        assert_eq!(first, second);
        assert_eq!(second.to_update[1].is_multiline, Some(true));
    }

    #[test]
    fn test_finish() {
        assert!(finish(SyncResult::default()).is_ok());
        let failed = SyncResult {
            failed: 1,
            ..Default::default()
        };
        assert!(matches!(finish(failed), Err(SyncError::PartialFailure(_))));
    }
}
