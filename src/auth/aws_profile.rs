//! AWS profile based session for the Organizations, SSO Admin and Identity Store APIs

use anyhow::{anyhow, Context, Result};
use aws_config::retry::RetryConfig;
use aws_config::{BehaviorVersion, Region, SdkConfig};
use aws_sdk_sts::Client as StsClient;

/// Resolved AWS configuration shared by every client of one run
pub struct AwsSession {
    config: SdkConfig,
    profile: Option<String>,
}

impl AwsSession {
    /// Load credentials and region through the default provider chain
    ///
    /// # Arguments
    /// * `profile` - Named profile from `~/.aws/config` (e.g., "management")
    /// * `region` - Region override; the profile's region is used otherwise
    /// * `max_attempts` - SDK attempts per request, `1` disables retries
    pub async fn new(
        profile: Option<String>,
        region: Option<String>,
        max_attempts: u32,
    ) -> Result<Self> {
        let mut loader = aws_config::defaults(BehaviorVersion::latest())
            .retry_config(RetryConfig::standard().with_max_attempts(max_attempts));

        if let Some(profile) = &profile {
            loader = loader.profile_name(profile);
        }
        if let Some(region) = region {
            loader = loader.region(Region::new(region));
        }

        let config = loader.load().await;
        if config.region().is_none() {
            return Err(anyhow!(
                "No AWS region configured. Pass --region or set one in the profile"
            ));
        }

        Ok(Self { config, profile })
    }

    pub fn sdk_config(&self) -> &SdkConfig {
        &self.config
    }

    /// Profile name for log and error messages
    pub fn profile_label(&self) -> &str {
        self.profile.as_deref().unwrap_or("default")
    }

    /// Check the credentials with `sts:GetCallerIdentity`, returning the caller ARN
    pub async fn test_connection(&self) -> Result<String> {
        let sts = StsClient::new(&self.config);
        let caller = sts
            .get_caller_identity()
            .send()
            .await
            .with_context(|| {
                format!(
                    "Failed to call sts:GetCallerIdentity with profile '{}'. Make sure you're logged in with 'aws sso login'",
                    self.profile_label()
                )
            })?;

        caller
            .arn()
            .map(str::to_string)
            .ok_or_else(|| anyhow!("AWS GetCallerIdentity response missing ARN"))
    }
}
