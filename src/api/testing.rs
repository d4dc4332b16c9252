//! In-memory fakes of the remote APIs, recording every call

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Mutex;

use super::{IdentityStoreApi, OrganizationsApi, SsoAdminApi};
use crate::error::{DirectoryError, Result};
use crate::models::{
    Account, AccountAssignment, AccountStatus, Page, PermissionSetDescriptor, PrincipalType,
    SsoInstance,
};

/// Serve `items` in chunks of `size`, using the offset as the next token
fn chunk<T: Clone>(items: &[T], size: usize, token: Option<&str>) -> Page<T> {
    let start = token.map(|t| t.parse::<usize>().unwrap()).unwrap_or(0);
    let end = (start + size.max(1)).min(items.len());
    let next = (end < items.len()).then(|| end.to_string());
    Page::new(items[start..end].to_vec(), next)
}

#[derive(Default)]
struct CallLog {
    calls: Mutex<Vec<(&'static str, String)>>,
    failures: Mutex<HashMap<&'static str, &'static str>>,
}

impl CallLog {
    fn record(&self, operation: &'static str, detail: String) -> Result<()> {
        self.calls.lock().unwrap().push((operation, detail));
        match self.failures.lock().unwrap().get(operation) {
            Some(&code) => Err(DirectoryError::from_code(
                operation,
                Some(code),
                format!("injected {code}"),
            )),
            None => Ok(()),
        }
    }

    fn count(&self, operation: &str) -> usize {
        self.calls
            .lock()
            .unwrap()
            .iter()
            .filter(|(op, _)| *op == operation)
            .count()
    }

    fn details(&self, operation: &str) -> Vec<String> {
        self.calls
            .lock()
            .unwrap()
            .iter()
            .filter(|(op, _)| *op == operation)
            .map(|(_, detail)| detail.clone())
            .collect()
    }

    fn total(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    fn fail(&self, operation: &'static str, code: &'static str) {
        self.failures.lock().unwrap().insert(operation, code);
    }
}

pub fn account(id: &str, name: &str, status: AccountStatus) -> Account {
    Account {
        id: id.to_string(),
        arn: Some(format!("arn:aws:organizations::000000000000:account/o-test/{id}")),
        email: Some(format!("{name}@example.com")),
        name: name.to_string(),
        status,
        joined_method: Some("CREATED".to_string()),
        joined_timestamp: None,
    }
}

pub fn descriptor(arn: &str, name: &str) -> PermissionSetDescriptor {
    PermissionSetDescriptor {
        arn: arn.to_string(),
        name: name.to_string(),
        description: None,
        created_date: None,
        session_duration: Some("PT1H".to_string()),
        relay_state: None,
    }
}

#[derive(Default)]
pub struct FakeOrganizations {
    accounts: Vec<Account>,
    log: CallLog,
}

impl FakeOrganizations {
    pub const LIST_ACCOUNTS: &'static str = "ListAccounts";

    pub fn new(accounts: Vec<Account>) -> Self {
        Self {
            accounts,
            log: CallLog::default(),
        }
    }

    pub fn calls(&self, operation: &str) -> usize {
        self.log.count(operation)
    }

    /// `max_results` of each call, in call order
    pub fn page_sizes(&self) -> Vec<String> {
        self.log.details(Self::LIST_ACCOUNTS)
    }

    pub fn fail(&self, operation: &'static str, code: &'static str) {
        self.log.fail(operation, code);
    }
}

#[async_trait]
impl OrganizationsApi for FakeOrganizations {
    async fn list_accounts(
        &self,
        max_results: i32,
        next_token: Option<String>,
    ) -> Result<Page<Account>> {
        self.log.record(Self::LIST_ACCOUNTS, max_results.to_string())?;
        Ok(chunk(&self.accounts, max_results as usize, next_token.as_deref()))
    }
}

#[derive(Default)]
pub struct FakeSsoAdmin {
    instances: Vec<SsoInstance>,
    permission_sets: Vec<(PermissionSetDescriptor, Vec<String>)>,
    assignments: Vec<AccountAssignment>,
    /// Page size for the listing that takes no `MaxResults`
    provisioned_page_size: usize,
    log: CallLog,
}

impl FakeSsoAdmin {
    pub const LIST_INSTANCES: &'static str = "ListInstances";
    pub const LIST_PERMISSION_SETS: &'static str = "ListPermissionSets";
    pub const DESCRIBE_PERMISSION_SET: &'static str = "DescribePermissionSet";
    pub const LIST_ACCOUNTS_FOR_PERMISSION_SET: &'static str =
        "ListAccountsForProvisionedPermissionSet";
    pub const LIST_ACCOUNT_ASSIGNMENTS: &'static str = "ListAccountAssignments";

    pub fn new() -> Self {
        Self {
            provisioned_page_size: 2,
            ..Self::default()
        }
    }

    pub fn with_instance(mut self, instance: SsoInstance) -> Self {
        self.instances.push(instance);
        self
    }

    pub fn with_permission_set(
        mut self,
        descriptor: PermissionSetDescriptor,
        account_ids: &[&str],
    ) -> Self {
        let account_ids = account_ids.iter().map(|id| id.to_string()).collect();
        self.permission_sets.push((descriptor, account_ids));
        self
    }

    pub fn with_assignment(
        mut self,
        account_id: &str,
        permission_set_arn: &str,
        principal_type: PrincipalType,
        principal_id: &str,
    ) -> Self {
        self.assignments.push(AccountAssignment {
            account_id: account_id.to_string(),
            permission_set_arn: permission_set_arn.to_string(),
            principal_type,
            principal_id: principal_id.to_string(),
        });
        self
    }

    pub fn with_provisioned_page_size(mut self, size: usize) -> Self {
        self.provisioned_page_size = size;
        self
    }

    pub fn calls(&self, operation: &str) -> usize {
        self.log.count(operation)
    }

    pub fn total_calls(&self) -> usize {
        self.log.total()
    }

    pub fn details(&self, operation: &str) -> Vec<String> {
        self.log.details(operation)
    }

    pub fn fail(&self, operation: &'static str, code: &'static str) {
        self.log.fail(operation, code);
    }
}

#[async_trait]
impl SsoAdminApi for FakeSsoAdmin {
    async fn list_instances(&self) -> Result<Vec<SsoInstance>> {
        self.log.record(Self::LIST_INSTANCES, String::new())?;
        Ok(self.instances.clone())
    }

    async fn list_permission_sets(
        &self,
        instance_arn: &str,
        max_results: i32,
        next_token: Option<String>,
    ) -> Result<Page<String>> {
        self.log.record(
            Self::LIST_PERMISSION_SETS,
            format!("{instance_arn} {max_results}"),
        )?;
        let arns: Vec<String> = self
            .permission_sets
            .iter()
            .map(|(descriptor, _)| descriptor.arn.clone())
            .collect();
        Ok(chunk(&arns, max_results as usize, next_token.as_deref()))
    }

    async fn describe_permission_set(
        &self,
        instance_arn: &str,
        permission_set_arn: &str,
    ) -> Result<PermissionSetDescriptor> {
        self.log.record(
            Self::DESCRIBE_PERMISSION_SET,
            format!("{instance_arn} {permission_set_arn}"),
        )?;
        self.permission_sets
            .iter()
            .find(|(descriptor, _)| descriptor.arn == permission_set_arn)
            .map(|(descriptor, _)| descriptor.clone())
            .ok_or_else(|| {
                DirectoryError::from_code(
                    Self::DESCRIBE_PERMISSION_SET,
                    Some("ResourceNotFoundException"),
                    permission_set_arn.to_string(),
                )
            })
    }

    async fn list_accounts_for_provisioned_permission_set(
        &self,
        instance_arn: &str,
        permission_set_arn: &str,
        next_token: Option<String>,
    ) -> Result<Page<String>> {
        self.log.record(
            Self::LIST_ACCOUNTS_FOR_PERMISSION_SET,
            format!("{instance_arn} {permission_set_arn} {next_token:?}"),
        )?;
        let account_ids = self
            .permission_sets
            .iter()
            .find(|(descriptor, _)| descriptor.arn == permission_set_arn)
            .map(|(_, account_ids)| account_ids.clone())
            .unwrap_or_default();
        Ok(chunk(
            &account_ids,
            self.provisioned_page_size,
            next_token.as_deref(),
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
        self.log.record(
            Self::LIST_ACCOUNT_ASSIGNMENTS,
            format!("{instance_arn} {account_id} {permission_set_arn} {max_results}"),
        )?;
        let matching: Vec<AccountAssignment> = self
            .assignments
            .iter()
            .filter(|a| a.account_id == account_id && a.permission_set_arn == permission_set_arn)
            .cloned()
            .collect();
        Ok(chunk(&matching, max_results as usize, next_token.as_deref()))
    }
}

#[derive(Default)]
pub struct FakeIdentityStore {
    users: HashMap<String, String>,
    groups: HashMap<String, String>,
    log: CallLog,
}

impl FakeIdentityStore {
    pub const DESCRIBE_USER: &'static str = "DescribeUser";
    pub const DESCRIBE_GROUP: &'static str = "DescribeGroup";

    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_user(mut self, id: &str, user_name: &str) -> Self {
        self.users.insert(id.to_string(), user_name.to_string());
        self
    }

    pub fn with_group(mut self, id: &str, display_name: &str) -> Self {
        self.groups.insert(id.to_string(), display_name.to_string());
        self
    }

    pub fn calls(&self, operation: &str) -> usize {
        self.log.count(operation)
    }

    pub fn total_calls(&self) -> usize {
        self.log.total()
    }

    /// Identity store ids the calls were made against
    pub fn details(&self, operation: &str) -> Vec<String> {
        self.log.details(operation)
    }

    pub fn fail(&self, operation: &'static str, code: &'static str) {
        self.log.fail(operation, code);
    }
}

fn lookup(
    operation: &'static str,
    names: &HashMap<String, String>,
    id: &str,
) -> Result<String> {
    names.get(id).cloned().ok_or_else(|| {
        DirectoryError::from_code(
            operation,
            Some("ResourceNotFoundException"),
            format!("{id} does not exist"),
        )
    })
}

#[async_trait]
impl IdentityStoreApi for FakeIdentityStore {
    async fn describe_user(&self, identity_store_id: &str, user_id: &str) -> Result<String> {
        self.log
            .record(Self::DESCRIBE_USER, identity_store_id.to_string())?;
        lookup(Self::DESCRIBE_USER, &self.users, user_id)
    }

    async fn describe_group(&self, identity_store_id: &str, group_id: &str) -> Result<String> {
        self.log
            .record(Self::DESCRIBE_GROUP, identity_store_id.to_string())?;
        lookup(Self::DESCRIBE_GROUP, &self.groups, group_id)
    }
}
