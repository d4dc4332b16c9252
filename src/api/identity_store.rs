//! Identity Store API endpoints

use async_trait::async_trait;
use aws_sdk_identitystore::Client;

use super::IdentityStoreApi;
use crate::error::{DirectoryError, Result};

const DESCRIBE_USER: &str = "identitystore:DescribeUser";
const DESCRIBE_GROUP: &str = "identitystore:DescribeGroup";

pub struct IdentityStoreClient {
    client: Client,
}

impl IdentityStoreClient {
    pub fn new(client: Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl IdentityStoreApi for IdentityStoreClient {
    async fn describe_user(&self, identity_store_id: &str, user_id: &str) -> Result<String> {
        let output = self
            .client
            .describe_user()
            .identity_store_id(identity_store_id)
            .user_id(user_id)
            .send()
            .await
            .map_err(|err| DirectoryError::from_sdk(DESCRIBE_USER, err))?;

        output
            .user_name()
            .map(str::to_string)
            .ok_or_else(|| DirectoryError::missing(DESCRIBE_USER, "UserName"))
    }

    async fn describe_group(&self, identity_store_id: &str, group_id: &str) -> Result<String> {
        let output = self
            .client
            .describe_group()
            .identity_store_id(identity_store_id)
            .group_id(group_id)
            .send()
            .await
            .map_err(|err| DirectoryError::from_sdk(DESCRIBE_GROUP, err))?;

        output
            .display_name()
            .map(str::to_string)
            .ok_or_else(|| DirectoryError::missing(DESCRIBE_GROUP, "DisplayName"))
    }
}
