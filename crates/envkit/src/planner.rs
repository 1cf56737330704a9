//! Reconciliation planner - splits desired declarations into updates and creates

use crate::types::{CommonFlags, Declaration, OperationRequest, RemoteDeclaration, SyncPlan};
use std::collections::HashMap;

/// Build a sync plan from the desired declarations and a remote snapshot.
///
/// Keys already present remotely go to `to_update`, the rest to `to_create`.
/// Both lists keep the order of `desired`. Values containing a newline are
/// always sent with `is_multiline = true`, whatever the common flags say.
///
/// Duplicate keys in `desired` are not collapsed: each occurrence becomes
/// its own request.
pub fn plan(
    desired: &[Declaration],
    existing: &[RemoteDeclaration],
    flags: &CommonFlags,
) -> SyncPlan {
    // Last entry wins on duplicate remote keys
    let lookup: HashMap<&str, &RemoteDeclaration> = existing
        .iter()
        .map(|remote| (remote.key.as_str(), remote))
        .collect();

    let mut plan = SyncPlan::default();

    for declaration in desired {
        let mut request = OperationRequest::from_declaration(declaration, flags);
        if declaration.is_multiline() {
            request.is_multiline = Some(true);
        }

        if lookup.contains_key(declaration.key.as_str()) {
            plan.to_update.push(request);
        } else {
            plan.to_create.push(request);
        }
    }

    log::debug!(
        "Planned {} updates and {} creates",
        plan.to_update.len(),
        plan.to_create.len()
    );

    plan
}

#[cfg(test)]
mod tests {
    use super::*;

    fn keys(requests: &[OperationRequest]) -> Vec<&str> {
        requests.iter().map(|r| r.key.as_str()).collect()
    }

    #[test]
    fn test_plan_splits_update_and_create() {
        let desired = vec![Declaration::new("A", "1"), Declaration::new("B", "2")];
        let existing = vec![RemoteDeclaration::new("B", "old", "uuid-b")];

        let plan = plan(&desired, &existing, &CommonFlags::default());

        assert_eq!(keys(&plan.to_create), vec!["A"]);
        assert_eq!(plan.to_create[0].value, "1");
        assert_eq!(keys(&plan.to_update), vec!["B"]);
        assert_eq!(plan.to_update[0].value, "2");
    }

    #[test]
    fn test_plan_preserves_order() {
        let desired = vec![
            Declaration::new("Z", "1"),
            Declaration::new("Y", "2"),
            Declaration::new("X", "3"),
            Declaration::new("W", "4"),
        ];
        let existing = vec![
            RemoteDeclaration::new("W", "", "1"),
            RemoteDeclaration::new("Y", "", "2"),
        ];

        let plan = plan(&desired, &existing, &CommonFlags::default());

        assert_eq!(keys(&plan.to_update), vec!["Y", "W"]);
        assert_eq!(keys(&plan.to_create), vec!["Z", "X"]);
    }

    #[test]
    fn test_common_flags_applied() {
        let desired = vec![Declaration::new("A", "1")];
        let flags = CommonFlags::new().build_time(true).literal(false);

        let plan = plan(&desired, &[], &flags);
        let req = &plan.to_create[0];

        assert_eq!(req.is_build_time, Some(true));
        assert_eq!(req.is_literal, Some(false));
        assert_eq!(req.is_runtime, None);
        assert_eq!(req.is_multiline, None);
    }

    #[test]
    fn test_multiline_detected() {
        let desired = vec![
            Declaration::new("CERT", "line1\nline2"),
            Declaration::new("PLAIN", "one line"),
        ];

        let plan = plan(&desired, &[], &CommonFlags::new().runtime(true));

        assert_eq!(plan.to_create[0].is_multiline, Some(true));
        assert_eq!(plan.to_create[0].is_runtime, Some(true));
        assert_eq!(plan.to_create[1].is_multiline, None);
    }

    #[test]
    fn test_duplicate_desired_keys_both_planned() {
        let desired = vec![Declaration::new("A", "1"), Declaration::new("A", "2")];

        let plan = plan(&desired, &[], &CommonFlags::default());

        assert_eq!(keys(&plan.to_create), vec!["A", "A"]);
    }

    #[test]
    fn test_duplicate_remote_keys_collapse() {
        let desired = vec![Declaration::new("A", "new")];
        let existing = vec![
            RemoteDeclaration::new("A", "first", "1"),
            RemoteDeclaration::new("A", "second", "2"),
        ];

        let plan = plan(&desired, &existing, &CommonFlags::default());

        assert_eq!(plan.to_update.len(), 1);
        assert!(plan.to_create.is_empty());
    }

    #[test]
    fn test_unchanged_values_still_updated() {
        let desired = vec![Declaration::new("A", "same")];
        let existing = vec![RemoteDeclaration::new("A", "same", "1")];

        let first = plan(&desired, &existing, &CommonFlags::default());
        let second = plan(&desired, &existing, &CommonFlags::default());

        assert_eq!(keys(&first.to_update), vec!["A"]);
        assert_eq!(first, second);
    }
}
