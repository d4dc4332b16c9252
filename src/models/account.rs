//! Organization account models

use chrono::{DateTime, Utc};
use serde::Serialize;

/// Member account of an AWS organization
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Account {
    pub id: String,
    pub arn: Option<String>,
    pub email: Option<String>,
    pub name: String,
    pub status: AccountStatus,
    pub joined_method: Option<String>,
    pub joined_timestamp: Option<DateTime<Utc>>,
}

impl Account {
    pub fn is_active(&self) -> bool {
        self.status == AccountStatus::Active
    }

    pub fn summary(&self) -> AccountSummary {
        AccountSummary {
            id: self.id.clone(),
            name: self.name.clone(),
        }
    }
}

/// Account lifecycle status as reported by Organizations
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AccountStatus {
    Active,
    Suspended,
    PendingClosure,
    Other(String),
}

impl AccountStatus {
    /// Convert from the Organizations wire value
    pub fn from_code(code: &str) -> Self {
        match code {
            "ACTIVE" => Self::Active,
            "SUSPENDED" => Self::Suspended,
            "PENDING_CLOSURE" => Self::PendingClosure,
            other => Self::Other(other.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Self::Active => "ACTIVE",
            Self::Suspended => "SUSPENDED",
            Self::PendingClosure => "PENDING_CLOSURE",
            Self::Other(code) => code,
        }
    }
}

/// The `{id, name}` view handed to report consumers
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AccountSummary {
    pub id: String,
    pub name: String,
}
