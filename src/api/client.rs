//! AWS SDK client bundle

use aws_config::SdkConfig;
use aws_sdk_ssoadmin::primitives::DateTime as SmithyDateTime;
use chrono::{DateTime, Utc};
use std::sync::Arc;

use super::identity_store::IdentityStoreClient;
use super::organizations::OrganizationsClient;
use super::sso_admin::SsoAdminClient;
use super::{IdentityStoreApi, OrganizationsApi, SsoAdminApi};

/// The three remote API families the report is built from
#[derive(Clone)]
pub struct AwsClients {
    pub organizations: Arc<dyn OrganizationsApi>,
    pub sso_admin: Arc<dyn SsoAdminApi>,
    pub identity_store: Arc<dyn IdentityStoreApi>,
}

impl AwsClients {
    /// Create SDK-backed clients sharing one configuration
    pub fn new(config: &SdkConfig) -> Self {
        Self {
            organizations: Arc::new(OrganizationsClient::new(aws_sdk_organizations::Client::new(
                config,
            ))),
            sso_admin: Arc::new(SsoAdminClient::new(aws_sdk_ssoadmin::Client::new(config))),
            identity_store: Arc::new(IdentityStoreClient::new(
                aws_sdk_identitystore::Client::new(config),
            )),
        }
    }
}

/// Convert an SDK timestamp, dropping values chrono cannot represent
pub(super) fn to_utc(timestamp: &SmithyDateTime) -> Option<DateTime<Utc>> {
    DateTime::from_timestamp(timestamp.secs(), timestamp.subsec_nanos())
}
