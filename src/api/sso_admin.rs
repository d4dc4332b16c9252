//! SSO Admin API endpoints

use async_trait::async_trait;
use aws_sdk_ssoadmin::Client;
use aws_sdk_ssoadmin::types::{
    AccountAssignment as SdkAccountAssignment, InstanceMetadata, PermissionSet as SdkPermissionSet,
};
use tracing::warn;

use super::SsoAdminApi;
use super::client::to_utc;
use crate::error::{DirectoryError, Result};
use crate::models::{AccountAssignment, Page, PermissionSetDescriptor, PrincipalType, SsoInstance};

const LIST_INSTANCES: &str = "sso-admin:ListInstances";
const LIST_PERMISSION_SETS: &str = "sso-admin:ListPermissionSets";
const DESCRIBE_PERMISSION_SET: &str = "sso-admin:DescribePermissionSet";
const LIST_ACCOUNTS_FOR_PERMISSION_SET: &str = "sso-admin:ListAccountsForProvisionedPermissionSet";
const LIST_ACCOUNT_ASSIGNMENTS: &str = "sso-admin:ListAccountAssignments";

pub struct SsoAdminClient {
    client: Client,
}

impl SsoAdminClient {
    pub fn new(client: Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl SsoAdminApi for SsoAdminClient {
    async fn list_instances(&self) -> Result<Vec<SsoInstance>> {
        let output = self
            .client
            .list_instances()
            .send()
            .await
            .map_err(|err| DirectoryError::from_sdk(LIST_INSTANCES, err))?;

        output.instances().iter().map(to_instance).collect()
    }

    async fn list_permission_sets(
        &self,
        instance_arn: &str,
        max_results: i32,
        next_token: Option<String>,
    ) -> Result<Page<String>> {
        let output = self
            .client
            .list_permission_sets()
            .instance_arn(instance_arn)
            .max_results(max_results)
            .set_next_token(next_token)
            .send()
            .await
            .map_err(|err| DirectoryError::from_sdk(LIST_PERMISSION_SETS, err))?;

        Ok(Page::new(
            output.permission_sets().to_vec(),
            output.next_token().map(str::to_string),
        ))
    }

    async fn describe_permission_set(
        &self,
        instance_arn: &str,
        permission_set_arn: &str,
    ) -> Result<PermissionSetDescriptor> {
        let output = self
            .client
            .describe_permission_set()
            .instance_arn(instance_arn)
            .permission_set_arn(permission_set_arn)
            .send()
            .await
            .map_err(|err| DirectoryError::from_sdk(DESCRIBE_PERMISSION_SET, err))?;

        let permission_set = output
            .permission_set()
            .ok_or_else(|| DirectoryError::missing(DESCRIBE_PERMISSION_SET, "PermissionSet"))?;

        to_descriptor(permission_set, permission_set_arn)
    }

    async fn list_accounts_for_provisioned_permission_set(
        &self,
        instance_arn: &str,
        permission_set_arn: &str,
        next_token: Option<String>,
    ) -> Result<Page<String>> {
        let output = self
            .client
            .list_accounts_for_provisioned_permission_set()
            .instance_arn(instance_arn)
            .permission_set_arn(permission_set_arn)
            .set_next_token(next_token)
            .send()
            .await
            .map_err(|err| DirectoryError::from_sdk(LIST_ACCOUNTS_FOR_PERMISSION_SET, err))?;

        Ok(Page::new(
            output.account_ids().to_vec(),
            output.next_token().map(str::to_string),
        ))
    }

    async fn list_account_assignments(
        &self,
        instance_arn: &str,
        account_id: &str,
        permission_set_arn: &str,
        max_results: i32,
        next_token: Option<String>,
    ) -> Result<Page<AccountAssignment>> {
        let output = self
            .client
            .list_account_assignments()
            .instance_arn(instance_arn)
            .account_id(account_id)
            .permission_set_arn(permission_set_arn)
            .max_results(max_results)
            .set_next_token(next_token)
            .send()
            .await
            .map_err(|err| DirectoryError::from_sdk(LIST_ACCOUNT_ASSIGNMENTS, err))?;

        let assignments = output
            .account_assignments()
            .iter()
            .map(to_assignment)
            .filter_map(Result::transpose)
            .collect::<Result<Vec<_>>>()?;

        Ok(Page::new(assignments, output.next_token().map(str::to_string)))
    }
}

fn to_instance(instance: &InstanceMetadata) -> Result<SsoInstance> {
    let instance_arn = instance
        .instance_arn()
        .ok_or_else(|| DirectoryError::missing(LIST_INSTANCES, "InstanceArn"))?;
    let identity_store_id = instance
        .identity_store_id()
        .ok_or_else(|| DirectoryError::missing(LIST_INSTANCES, "IdentityStoreId"))?;

    Ok(SsoInstance::new(instance_arn, identity_store_id))
}

fn to_descriptor(
    permission_set: &SdkPermissionSet,
    requested_arn: &str,
) -> Result<PermissionSetDescriptor> {
    let name = permission_set
        .name()
        .ok_or_else(|| DirectoryError::missing(DESCRIBE_PERMISSION_SET, "PermissionSet.Name"))?;

    Ok(PermissionSetDescriptor {
        arn: permission_set
            .permission_set_arn()
            .unwrap_or(requested_arn)
            .to_string(),
        name: name.to_string(),
        description: permission_set.description().map(str::to_string),
        created_date: permission_set.created_date().and_then(to_utc),
        session_duration: permission_set.session_duration().map(str::to_string),
        relay_state: permission_set.relay_state().map(str::to_string),
    })
}

/// `None` for principal types other than users and groups
fn to_assignment(assignment: &SdkAccountAssignment) -> Result<Option<AccountAssignment>> {
    let principal_id = assignment
        .principal_id()
        .ok_or_else(|| DirectoryError::missing(LIST_ACCOUNT_ASSIGNMENTS, "PrincipalId"))?;
    let Some(principal_type) = assignment
        .principal_type()
        .and_then(|t| PrincipalType::from_code(t.as_str()))
    else {
        warn!(
            principal_id,
            principal_type = ?assignment.principal_type(),
            "Skipping account assignment with unsupported principal type"
        );
        return Ok(None);
    };

    Ok(Some(AccountAssignment {
        account_id: assignment.account_id().unwrap_or_default().to_string(),
        permission_set_arn: assignment.permission_set_arn().unwrap_or_default().to_string(),
        principal_type,
        principal_id: principal_id.to_string(),
    }))
}
