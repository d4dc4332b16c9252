//! Permission set models

use chrono::{DateTime, Utc};
use std::collections::BTreeSet;

/// Descriptor returned by `DescribePermissionSet`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PermissionSetDescriptor {
    pub arn: String,
    pub name: String,
    pub description: Option<String>,
    pub created_date: Option<DateTime<Utc>>,
    pub session_duration: Option<String>,
    pub relay_state: Option<String>,
}

/// A permission set together with the accounts it is provisioned to
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PermissionSet {
    pub arn: String,
    pub name: String,
    pub description: Option<String>,
    pub created_date: Option<DateTime<Utc>>,
    pub session_duration: Option<String>,
    pub relay_state: Option<String>,
    pub account_ids: BTreeSet<String>,
}

impl PermissionSet {
    pub fn from_descriptor(
        descriptor: PermissionSetDescriptor,
        account_ids: impl IntoIterator<Item = String>,
    ) -> Self {
        Self {
            arn: descriptor.arn,
            name: descriptor.name,
            description: descriptor.description,
            created_date: descriptor.created_date,
            session_duration: descriptor.session_duration,
            relay_state: descriptor.relay_state,
            account_ids: account_ids.into_iter().collect(),
        }
    }

    pub fn is_provisioned_to(&self, account_id: &str) -> bool {
        self.account_ids.contains(account_id)
    }
}
