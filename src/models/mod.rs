//! Data models for organization accounts, permission sets and principals

mod account;
mod instance;
mod page;
mod permission_set;
mod principal;
mod report;

pub use account::{Account, AccountStatus, AccountSummary};
pub use instance::SsoInstance;
pub use page::Page;
pub use permission_set::{PermissionSet, PermissionSetDescriptor};
pub use principal::{AccountAssignment, Principal, PrincipalFilter, PrincipalType};
pub use report::{AccountReport, BindingReportEntry};
