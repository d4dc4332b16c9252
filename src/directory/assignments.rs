//! Permission set catalog and account assignment resolution

use std::sync::Arc;
use tracing::{debug, info};

use super::IdentityDirectory;
use crate::api::pagination::collect_all;
use crate::api::{IdentityStoreApi, SsoAdminApi};
use crate::error::{DirectoryError, Result};
use crate::models::{
    AccountAssignment, BindingReportEntry, PermissionSet, Principal, PrincipalFilter,
    PrincipalType, SsoInstance,
};

/// Page size for `sso-admin:ListPermissionSets`
pub const PERMISSION_SETS_PAGE_SIZE: i32 = 100;
/// Page size for `sso-admin:ListAccountAssignments`
pub const ASSIGNMENTS_PAGE_SIZE: i32 = 100;

/// Which permission sets grant which principals access to an account
///
/// The permission set catalog, including the accounts each set is provisioned
/// to, is loaded once. Account assignments are fetched on every query; only
/// principal names are cached, through the owned [`IdentityDirectory`].
pub struct AssignmentDirectory {
    client: Arc<dyn SsoAdminApi>,
    instance: SsoInstance,
    identities: IdentityDirectory,
    permission_sets: Vec<PermissionSet>,
    loaded: bool,
}

impl AssignmentDirectory {
    /// Create a directory for an Identity Center instance
    ///
    /// Without an explicit `instance` the first one returned by
    /// `sso-admin:ListInstances` is used. Must run in the account where
    /// Identity Center is enabled.
    ///
    /// # Errors
    /// [`DirectoryError::NoSsoInstance`] if no instance was given and none exists.
    pub async fn new(
        sso_admin: Arc<dyn SsoAdminApi>,
        identity_store: Arc<dyn IdentityStoreApi>,
        instance: Option<SsoInstance>,
    ) -> Result<Self> {
        let instance = match instance {
            Some(instance) => instance,
            None => Self::first_instance(sso_admin.as_ref()).await?,
        };
        info!(
            instance_arn = %instance.instance_arn,
            identity_store_id = %instance.identity_store_id,
            "Using IAM Identity Center instance"
        );

        let identities = IdentityDirectory::new(identity_store, instance.identity_store_id.clone());
        Ok(Self {
            client: sso_admin,
            instance,
            identities,
            permission_sets: Vec::new(),
            loaded: false,
        })
    }

    async fn first_instance(sso_admin: &dyn SsoAdminApi) -> Result<SsoInstance> {
        info!("Calling sso-admin:ListInstances to discover the Identity Center instance");
        sso_admin
            .list_instances()
            .await?
            .into_iter()
            .next()
            .ok_or(DirectoryError::NoSsoInstance)
    }

    pub fn instance(&self) -> &SsoInstance {
        &self.instance
    }

    /// Load every permission set of the instance with its provisioned accounts
    ///
    /// Returns the cached catalog without any remote call once loaded.
    pub async fn load_all_permission_sets(&mut self) -> Result<&[PermissionSet]> {
        if self.loaded {
            debug!(
                count = self.permission_sets.len(),
                "Permission sets served from cache"
            );
            return Ok(&self.permission_sets);
        }

        let client = self.client.as_ref();
        let instance_arn = self.instance.instance_arn.as_str();

        info!("Calling sso-admin:ListPermissionSets to retrieve all permission sets");
        let arns = collect_all(move |token| {
            client.list_permission_sets(instance_arn, PERMISSION_SETS_PAGE_SIZE, token)
        })
        .await?;

        let mut permission_sets = Vec::with_capacity(arns.len());
        for arn in &arns {
            let account_ids = self.account_ids_for_permission_set(arn).await?;

            info!(permission_set_arn = %arn, "Calling sso-admin:DescribePermissionSet");
            let descriptor = client.describe_permission_set(instance_arn, arn).await?;

            permission_sets.push(PermissionSet::from_descriptor(descriptor, account_ids));
        }

        info!(count = permission_sets.len(), "Loaded permission set catalog");
        self.permission_sets = permission_sets;
        self.loaded = true;
        Ok(&self.permission_sets)
    }

    /// Accounts a permission set is provisioned to
    ///
    /// This listing has no SDK paginator, so the next token is followed by hand.
    async fn account_ids_for_permission_set(&self, permission_set_arn: &str) -> Result<Vec<String>> {
        let client = self.client.as_ref();
        let instance_arn = self.instance.instance_arn.as_str();

        info!(
            permission_set_arn,
            "Calling sso-admin:ListAccountsForProvisionedPermissionSet"
        );
        collect_all(move |token| {
            if token.is_some() {
                debug!(permission_set_arn, "Following ListAccountsForProvisionedPermissionSet pagination");
            }
            client.list_accounts_for_provisioned_permission_set(
                instance_arn,
                permission_set_arn,
                token,
            )
        })
        .await
    }

    /// Every assignment of a permission set in an account, in listing order
    async fn account_assignments(
        &self,
        account_id: &str,
        permission_set_arn: &str,
    ) -> Result<Vec<AccountAssignment>> {
        let client = self.client.as_ref();
        let instance_arn = self.instance.instance_arn.as_str();

        info!(
            account_id,
            permission_set_arn, "Calling sso-admin:ListAccountAssignments"
        );
        collect_all(move |token| {
            if token.is_some() {
                debug!(account_id, permission_set_arn, "Following ListAccountAssignments pagination");
            }
            client.list_account_assignments(
                instance_arn,
                account_id,
                permission_set_arn,
                ASSIGNMENTS_PAGE_SIZE,
                token,
            )
        })
        .await
    }

    /// Principals bound to a permission set in an account, with resolved names
    ///
    /// With [`PrincipalFilter::All`] users come first, then groups. Within a
    /// type the remote listing order is kept.
    pub async fn get_bindings_by_permission_set(
        &mut self,
        account_id: &str,
        permission_set_arn: &str,
        principal_type: PrincipalFilter,
    ) -> Result<Vec<Principal>> {
        let assignments = self
            .account_assignments(account_id, permission_set_arn)
            .await?;

        let mut principals = Vec::new();
        if principal_type.includes_users() {
            self.resolve_principals(&assignments, PrincipalType::User, &mut principals)
                .await?;
        }
        if principal_type.includes_groups() {
            self.resolve_principals(&assignments, PrincipalType::Group, &mut principals)
                .await?;
        }
        Ok(principals)
    }

    async fn resolve_principals(
        &mut self,
        assignments: &[AccountAssignment],
        principal_type: PrincipalType,
        principals: &mut Vec<Principal>,
    ) -> Result<()> {
        for assignment in assignments
            .iter()
            .filter(|assignment| assignment.principal_type == principal_type)
        {
            let name = match principal_type {
                PrincipalType::User => {
                    self.identities
                        .get_username_by_id(&assignment.principal_id)
                        .await?
                }
                PrincipalType::Group => {
                    self.identities
                        .get_groupname_by_id(&assignment.principal_id)
                        .await?
                }
            };
            principals.push(Principal {
                principal_type,
                id: assignment.principal_id.clone(),
                name,
            });
        }
        Ok(())
    }

    /// Permission sets granted in an account together with their users
    ///
    /// Only permission sets provisioned to the account and bound to at least
    /// one user are returned. Account reports always list user bindings, so
    /// `principal_type` does not widen the result; use
    /// [`Self::get_principal_bindings_by_account_id`] for groups.
    pub async fn get_bindings_by_account_id(
        &mut self,
        account_id: &str,
        principal_type: PrincipalFilter,
    ) -> Result<Vec<BindingReportEntry>> {
        if principal_type != PrincipalFilter::User {
            debug!(
                account_id,
                requested = %principal_type,
                "Account bindings resolve users only"
            );
        }
        self.get_principal_bindings_by_account_id(account_id, PrincipalFilter::User)
            .await
    }

    /// Permission sets granted in an account with the principals selected by `principal_type`
    ///
    /// Same selection as [`Self::get_bindings_by_account_id`], except that
    /// group bindings are included for [`PrincipalFilter::Group`] and
    /// [`PrincipalFilter::All`].
    pub async fn get_principal_bindings_by_account_id(
        &mut self,
        account_id: &str,
        principal_type: PrincipalFilter,
    ) -> Result<Vec<BindingReportEntry>> {
        let provisioned: Vec<(String, String)> = self
            .load_all_permission_sets()
            .await?
            .iter()
            .filter(|permission_set| permission_set.is_provisioned_to(account_id))
            .map(|permission_set| (permission_set.arn.clone(), permission_set.name.clone()))
            .collect();

        let mut bindings = Vec::new();
        for (arn, name) in provisioned {
            let attached = self
                .get_bindings_by_permission_set(account_id, &arn, principal_type)
                .await?;
            if attached.is_empty() {
                debug!(account_id, permission_set_arn = %arn, "No bindings, skipping permission set");
                continue;
            }
            bindings.push(BindingReportEntry {
                permission_set_arn: arn,
                permission_set_name: name,
                attached_users: attached,
            });
        }
        Ok(bindings)
    }
}
