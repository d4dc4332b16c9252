//! Report output models

use serde::Serialize;

use super::Principal;

/// Principals bound to one permission set in one account
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BindingReportEntry {
    pub permission_set_arn: String,
    pub permission_set_name: String,
    pub attached_users: Vec<Principal>,
}

/// All bindings for one active account
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountReport {
    pub account_id: String,
    pub account_name: String,
    pub user_assignments: Vec<BindingReportEntry>,
}

impl AccountReport {
    /// Number of (permission set, principal) pairs in the report
    pub fn binding_count(&self) -> usize {
        self.user_assignments
            .iter()
            .map(|entry| entry.attached_users.len())
            .sum()
    }
}
