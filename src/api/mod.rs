//! Remote API surface for Organizations, SSO Admin and Identity Store
//!
//! Each trait method performs exactly one remote call and returns one page or
//! one object. Pagination and caching live in the directory layer.

mod client;
mod identity_store;
mod organizations;
pub mod pagination;
mod sso_admin;

#[cfg(test)]
pub mod testing;

use async_trait::async_trait;

use crate::error::Result;
use crate::models::{Account, AccountAssignment, Page, PermissionSetDescriptor, SsoInstance};

pub use client::AwsClients;

/// `organizations:*` operations
#[async_trait]
pub trait OrganizationsApi: Send + Sync {
    async fn list_accounts(
        &self,
        max_results: i32,
        next_token: Option<String>,
    ) -> Result<Page<Account>>;
}

/// `sso-admin:*` operations
#[async_trait]
pub trait SsoAdminApi: Send + Sync {
    /// First page of Identity Center instances
    async fn list_instances(&self) -> Result<Vec<SsoInstance>>;

    async fn list_permission_sets(
        &self,
        instance_arn: &str,
        max_results: i32,
        next_token: Option<String>,
    ) -> Result<Page<String>>;

    async fn describe_permission_set(
        &self,
        instance_arn: &str,
        permission_set_arn: &str,
    ) -> Result<PermissionSetDescriptor>;

    async fn list_accounts_for_provisioned_permission_set(
        &self,
        instance_arn: &str,
        permission_set_arn: &str,
        next_token: Option<String>,
    ) -> Result<Page<String>>;

    async fn list_account_assignments(
        &self,
        instance_arn: &str,
        account_id: &str,
        permission_set_arn: &str,
        max_results: i32,
        next_token: Option<String>,
    ) -> Result<Page<AccountAssignment>>;
}

/// `identitystore:*` operations
#[async_trait]
pub trait IdentityStoreApi: Send + Sync {
    /// Returns the user's `UserName`
    async fn describe_user(&self, identity_store_id: &str, user_id: &str) -> Result<String>;

    /// Returns the group's `DisplayName`
    async fn describe_group(&self, identity_store_id: &str, group_id: &str) -> Result<String>;
}
