use serde::{Deserialize, Serialize};

/// IAM Identity Center instance and its backing identity store
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SsoInstance {
    pub instance_arn: String,
    pub identity_store_id: String,
}

impl SsoInstance {
    pub fn new(instance_arn: impl Into<String>, identity_store_id: impl Into<String>) -> Self {
        Self {
            instance_arn: instance_arn.into(),
            identity_store_id: identity_store_id.into(),
        }
    }
}
