//! Errors raised by the directory layer
//!
//! Remote failures keep the category the AWS service reported, together with
//! the operation that failed and the service's own message.

use aws_sdk_ssoadmin::error::{DisplayErrorContext, ProvideErrorMetadata, SdkError};
use thiserror::Error;

pub type Result<T> = std::result::Result<T, DirectoryError>;

#[derive(Error, Debug)]
pub enum DirectoryError {
    #[error("{operation}: access denied: {message}")]
    AccessDenied {
        operation: &'static str,
        message: String,
    },

    #[error("{operation}: resource not found: {message}")]
    ResourceNotFound {
        operation: &'static str,
        message: String,
    },

    #[error("{operation}: request throttled: {message}")]
    Throttling {
        operation: &'static str,
        message: String,
    },

    #[error("{operation}: invalid request: {message}")]
    Validation {
        operation: &'static str,
        message: String,
    },

    #[error("{operation}: AWS Organizations is not in use for this account: {message}")]
    OrganizationsNotInUse {
        operation: &'static str,
        message: String,
    },

    #[error("{operation}: internal service error: {message}")]
    Internal {
        operation: &'static str,
        message: String,
    },

    #[error("{operation} failed: {message}")]
    Service {
        operation: &'static str,
        message: String,
    },

    #[error("principal type must be one of \"USER\", \"GROUP\" or \"ALL\", got {0:?}")]
    InvalidPrincipalType(String),

    #[error("no IAM Identity Center instance found; enable Identity Center or pass the instance explicitly")]
    NoSsoInstance,

    #[error("{operation} response is missing {field}")]
    MissingField {
        operation: &'static str,
        field: &'static str,
    },
}

impl DirectoryError {
    /// Classify an SDK failure by the error code the service returned
    pub fn from_sdk<E, R>(operation: &'static str, err: SdkError<E, R>) -> Self
    where
        E: ProvideErrorMetadata + std::error::Error + Send + Sync + 'static,
        R: std::fmt::Debug,
    {
        let code = err.code().map(str::to_string);
        let message = err
            .message()
            .map(str::to_string)
            .unwrap_or_else(|| DisplayErrorContext(&err).to_string());

        Self::from_code(operation, code.as_deref(), message)
    }

    pub fn from_code(operation: &'static str, code: Option<&str>, message: String) -> Self {
        match code {
            Some("AccessDeniedException") => Self::AccessDenied { operation, message },
            Some("ResourceNotFoundException") => Self::ResourceNotFound { operation, message },
            Some("ThrottlingException") | Some("TooManyRequestsException") => {
                Self::Throttling { operation, message }
            }
            Some("ValidationException") | Some("InvalidInputException") => {
                Self::Validation { operation, message }
            }
            Some("AWSOrganizationsNotInUseException") => {
                Self::OrganizationsNotInUse { operation, message }
            }
            Some("InternalServerException") | Some("ServiceException") => {
                Self::Internal { operation, message }
            }
            _ => Self::Service { operation, message },
        }
    }

    pub fn missing(operation: &'static str, field: &'static str) -> Self {
        Self::MissingField { operation, field }
    }
}

#[cfg(test)]
impl DirectoryError {
    pub fn is_throttling(&self) -> bool {
        matches!(self, Self::Throttling { .. })
    }
}
