//! Organizations API endpoints

use async_trait::async_trait;
use aws_sdk_organizations::Client;
use aws_sdk_organizations::types::Account as SdkAccount;

use super::OrganizationsApi;
use super::client::to_utc;
use crate::error::{DirectoryError, Result};
use crate::models::{Account, AccountStatus, Page};

const LIST_ACCOUNTS: &str = "organizations:ListAccounts";

pub struct OrganizationsClient {
    client: Client,
}

impl OrganizationsClient {
    pub fn new(client: Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl OrganizationsApi for OrganizationsClient {
    async fn list_accounts(
        &self,
        max_results: i32,
        next_token: Option<String>,
    ) -> Result<Page<Account>> {
        let output = self
            .client
            .list_accounts()
            .max_results(max_results)
            .set_next_token(next_token)
            .send()
            .await
            .map_err(|err| DirectoryError::from_sdk(LIST_ACCOUNTS, err))?;

        let accounts = output
            .accounts()
            .iter()
            .map(to_account)
            .collect::<Result<Vec<_>>>()?;

        Ok(Page::new(accounts, output.next_token().map(str::to_string)))
    }
}

// `Status` is superseded by `State` in newer Organizations models but still populated
#[allow(deprecated)]
fn to_account(account: &SdkAccount) -> Result<Account> {
    let id = account
        .id()
        .ok_or_else(|| DirectoryError::missing(LIST_ACCOUNTS, "Account.Id"))?;

    let name = account
        .name()
        .ok_or_else(|| DirectoryError::missing(LIST_ACCOUNTS, "Account.Name"))?;

    let status = account
        .status()
        .map(|status| AccountStatus::from_code(status.as_str()))
        .unwrap_or_else(|| AccountStatus::Other(String::new()));

    Ok(Account {
        id: id.to_string(),
        arn: account.arn().map(str::to_string),
        email: account.email().map(str::to_string),
        name: name.to_string(),
        status,
        joined_method: account.joined_method().map(|m| m.as_str().to_string()),
        joined_timestamp: account.joined_timestamp().and_then(to_utc),
    })
}
