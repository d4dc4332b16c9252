//! Active account enumeration for an AWS organization

use std::sync::Arc;
use tracing::{debug, info};

use crate::api::OrganizationsApi;
use crate::api::pagination::collect_all;
use crate::error::Result;
use crate::models::{Account, AccountSummary};

/// Page size for `organizations:ListAccounts`
pub const ACCOUNTS_PAGE_SIZE: i32 = 20;

/// Cached list of the organization's active accounts
///
/// Must be used with credentials for the management account (or a delegated
/// administrator). The list is loaded once, on first use.
pub struct AccountDirectory {
    client: Arc<dyn OrganizationsApi>,
    accounts: Vec<Account>,
    loaded: bool,
}

impl AccountDirectory {
    pub fn new(client: Arc<dyn OrganizationsApi>) -> Self {
        Self {
            client,
            accounts: Vec::new(),
            loaded: false,
        }
    }

    /// Enumerate all accounts and keep the `ACTIVE` ones
    ///
    /// Returns the cached list without any remote call once loaded.
    pub async fn load_active_accounts(&mut self) -> Result<&[Account]> {
        if self.loaded {
            debug!(count = self.accounts.len(), "Active accounts served from cache");
            return Ok(&self.accounts);
        }

        info!("Loading all active accounts with organizations:ListAccounts");
        let client = self.client.as_ref();
        let accounts =
            collect_all(move |token| client.list_accounts(ACCOUNTS_PAGE_SIZE, token)).await?;

        let total = accounts.len();
        self.accounts = accounts
            .into_iter()
            .filter(|account| {
                if !account.is_active() {
                    debug!(
                        account_id = %account.id,
                        status = account.status.as_str(),
                        "Skipping inactive account"
                    );
                }
                account.is_active()
            })
            .collect();
        self.loaded = true;
        info!(total, active = self.accounts.len(), "Loaded organization accounts");

        Ok(&self.accounts)
    }

    /// `{id, name}` of every active account, in listing order
    pub async fn get_all_accounts(&mut self) -> Result<Vec<AccountSummary>> {
        let accounts = self.load_active_accounts().await?;
        Ok(accounts.iter().map(Account::summary).collect())
    }

    pub async fn get_all_account_ids(&mut self) -> Result<Vec<String>> {
        let accounts = self.load_active_accounts().await?;
        Ok(accounts.iter().map(|account| account.id.clone()).collect())
    }

    /// Name of an active account, `None` if no active account has this id
    pub async fn get_account_name_by_id(&mut self, account_id: &str) -> Result<Option<String>> {
        let accounts = self.load_active_accounts().await?;
        Ok(accounts
            .iter()
            .find(|account| account.id == account_id)
            .map(|account| account.name.clone()))
    }
}
