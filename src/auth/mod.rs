//! Auth module for AWS session setup
//!
//! Builds the shared SDK configuration from an explicit profile and region
//! instead of process-wide defaults.

mod aws_profile;

pub use aws_profile::AwsSession;
