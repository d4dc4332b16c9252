//! Principal and account assignment models

use serde::Serialize;
use std::fmt;
use std::str::FromStr;

use crate::error::DirectoryError;

/// Kind of identity store principal
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum PrincipalType {
    #[serde(rename = "USER")]
    User,
    #[serde(rename = "GROUP")]
    Group,
}

impl PrincipalType {
    /// Convert from the SSO Admin wire value
    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "USER" => Some(Self::User),
            "GROUP" => Some(Self::Group),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::User => "USER",
            Self::Group => "GROUP",
        }
    }
}

impl fmt::Display for PrincipalType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Which principals a binding lookup resolves
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PrincipalFilter {
    #[default]
    User,
    Group,
    /// Users first, then groups
    All,
}

impl PrincipalFilter {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::User => "USER",
            Self::Group => "GROUP",
            Self::All => "ALL",
        }
    }

    pub fn includes_users(&self) -> bool {
        matches!(self, Self::User | Self::All)
    }

    pub fn includes_groups(&self) -> bool {
        matches!(self, Self::Group | Self::All)
    }
}

impl FromStr for PrincipalFilter {
    type Err = DirectoryError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "USER" => Ok(Self::User),
            "GROUP" => Ok(Self::Group),
            "ALL" => Ok(Self::All),
            other => Err(DirectoryError::InvalidPrincipalType(other.to_string())),
        }
    }
}

impl fmt::Display for PrincipalFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A user or group with its resolved display name
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Principal {
    #[serde(rename = "type")]
    pub principal_type: PrincipalType,
    pub id: String,
    pub name: String,
}

/// Raw binding of one principal to one permission set in one account
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccountAssignment {
    pub account_id: String,
    pub permission_set_arn: String,
    pub principal_type: PrincipalType,
    pub principal_id: String,
}
