//! Per-account permission set report

use tracing::{info, warn};

use crate::directory::{AccountDirectory, AssignmentDirectory};
use crate::error::Result;
use crate::models::{AccountReport, AccountSummary, PrincipalFilter};

/// What to include in a report
#[derive(Debug, Clone, Default)]
pub struct ReportOptions {
    /// Principals listed per permission set; USER matches the plain account query
    pub principal_type: PrincipalFilter,
    /// Restrict the report to these accounts; empty means every active account
    pub account_ids: Vec<String>,
}

/// Build one [`AccountReport`] per active account, in account listing order
pub async fn build_report(
    accounts: &mut AccountDirectory,
    assignments: &mut AssignmentDirectory,
    options: &ReportOptions,
) -> Result<Vec<AccountReport>> {
    let targets = target_accounts(accounts, &options.account_ids).await?;
    info!(
        accounts = targets.len(),
        principal_type = %options.principal_type,
        "Building assignment report"
    );

    let mut reports = Vec::with_capacity(targets.len());
    for account in targets {
        let user_assignments = assignments
            .get_principal_bindings_by_account_id(&account.id, options.principal_type)
            .await?;

        reports.push(AccountReport {
            account_id: account.id,
            account_name: account.name,
            user_assignments,
        });
    }
    Ok(reports)
}

async fn target_accounts(
    accounts: &mut AccountDirectory,
    requested: &[String],
) -> Result<Vec<AccountSummary>> {
    if requested.is_empty() {
        return accounts.get_all_accounts().await;
    }

    let mut targets = Vec::with_capacity(requested.len());
    for account_id in requested {
        match accounts.get_account_name_by_id(account_id).await? {
            Some(name) => targets.push(AccountSummary {
                id: account_id.clone(),
                name,
            }),
            None => warn!(account_id = %account_id, "Not an active account in the organization, skipping"),
        }
    }
    Ok(targets)
}
