//! Principal name resolution backed by the identity store

use std::collections::HashMap;
use std::sync::Arc;
use tracing::{debug, info};

use crate::api::IdentityStoreApi;
use crate::error::Result;

/// Resolves user and group ids to names, remembering every answer
///
/// Users and groups are separate remote lookups, so each has its own cache.
/// Entries are never refreshed for the lifetime of the directory.
pub struct IdentityDirectory {
    client: Arc<dyn IdentityStoreApi>,
    identity_store_id: String,
    user_names: HashMap<String, String>,
    group_names: HashMap<String, String>,
}

impl IdentityDirectory {
    /// Create a directory for one identity store (e.g. `d-9967177d78`)
    pub fn new(client: Arc<dyn IdentityStoreApi>, identity_store_id: impl Into<String>) -> Self {
        Self {
            client,
            identity_store_id: identity_store_id.into(),
            user_names: HashMap::new(),
            group_names: HashMap::new(),
        }
    }

    /// `UserName` of a user, calling `identitystore:DescribeUser` on a cache miss
    pub async fn get_username_by_id(&mut self, user_id: &str) -> Result<String> {
        if let Some(name) = self.user_names.get(user_id) {
            debug!(user_id, "User name served from cache");
            return Ok(name.clone());
        }

        info!(user_id, "Calling identitystore:DescribeUser");
        let name = self
            .client
            .describe_user(&self.identity_store_id, user_id)
            .await?;
        self.user_names.insert(user_id.to_string(), name.clone());
        Ok(name)
    }

    /// `DisplayName` of a group, calling `identitystore:DescribeGroup` on a cache miss
    pub async fn get_groupname_by_id(&mut self, group_id: &str) -> Result<String> {
        if let Some(name) = self.group_names.get(group_id) {
            debug!(group_id, "Group name served from cache");
            return Ok(name.clone());
        }

        info!(group_id, "Calling identitystore:DescribeGroup");
        let name = self
            .client
            .describe_group(&self.identity_store_id, group_id)
            .await?;
        self.group_names.insert(group_id.to_string(), name.clone());
        Ok(name)
    }
}
