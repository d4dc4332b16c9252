//! ssoreport - IAM Identity Center assignment report for an AWS organization
//!
//! For every active account this tool lists:
//! - The permission sets provisioned to the account
//! - The users (and optionally groups) bound to each permission set
//!
//! It only mirrors what Identity Center reports; no policy is evaluated.

mod api;
mod auth;
mod config;
mod directory;
mod error;
mod export;
mod models;
mod report;

use anyhow::{Context, Result};
use clap::Parser;
use std::io::{self, Write};
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::api::AwsClients;
use crate::auth::AwsSession;
use crate::config::Config;
use crate::directory::{AccountDirectory, AssignmentDirectory};
use crate::export::ExportFormat;
use crate::report::ReportOptions;

/// ssoreport - who can access which account through IAM Identity Center
#[derive(Parser, Debug)]
#[command(name = "ssoreport")]
#[command(about = "Report IAM Identity Center permission set assignments for every active account")]
#[command(version)]
struct Args {
    /// Named AWS profile (must belong to the management or delegated admin account)
    #[arg(short, long, env = "AWS_PROFILE")]
    profile: Option<String>,

    /// AWS region where IAM Identity Center is enabled
    #[arg(short, long, env = "AWS_REGION")]
    region: Option<String>,

    /// Identity Center instance ARN; discovered when omitted
    #[arg(long, requires = "identity_store_id")]
    instance_arn: Option<String>,

    /// Identity store id of the instance (e.g., d-9967177d78)
    #[arg(long, requires = "instance_arn")]
    identity_store_id: Option<String>,

    /// Principals to report: USER, GROUP or ALL
    #[arg(short = 't', long)]
    principal_type: Option<String>,

    /// Only report these account ids (repeatable)
    #[arg(short, long = "account-id")]
    account_ids: Vec<String>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "json-lines")]
    format: ExportFormat,

    /// Write the report to this file instead of stdout
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// SDK attempts per request, including the first (1 disables retries)
    #[arg(long)]
    max_attempts: Option<u32>,

    /// Store the effective connection settings in the config file
    #[arg(long, default_value = "false")]
    save_config: bool,
}

impl Args {
    fn config_overrides(&self) -> Config {
        Config {
            profile: self.profile.clone(),
            region: self.region.clone(),
            instance_arn: self.instance_arn.clone(),
            identity_store_id: self.identity_store_id.clone(),
            max_attempts: self.max_attempts,
            principal_type: self.principal_type.clone(),
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging (set RUST_LOG=info to follow every API call)
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();

    let args = Args::parse();

    let config = Config::load()
        .context("Failed to load config file")?
        .merge(args.config_overrides());

    // Validate arguments before any remote call
    let principal_type = config.principal_filter()?;
    let instance = config.instance()?;

    if args.save_config {
        let path = config.save().context("Failed to save config file")?;
        eprintln!("Saved settings to {}", path.display());
    }

    let session = AwsSession::new(
        config.profile.clone(),
        config.region.clone(),
        config.max_attempts(),
    )
    .await
    .context("Failed to load AWS configuration")?;

    // Test connection before enumerating
    eprintln!("Connecting with profile '{}'...", session.profile_label());
    let caller = session.test_connection().await?;
    eprintln!("Connected as {}", caller);

    let clients = AwsClients::new(session.sdk_config());
    let mut accounts = AccountDirectory::new(clients.organizations.clone());
    let mut assignments =
        AssignmentDirectory::new(clients.sso_admin.clone(), clients.identity_store.clone(), instance)
            .await
            .context("Failed to resolve the IAM Identity Center instance")?;
    eprintln!("Using instance {}", assignments.instance().instance_arn);

    let options = ReportOptions {
        principal_type,
        account_ids: args.account_ids.clone(),
    };
    let reports = report::build_report(&mut accounts, &mut assignments, &options)
        .await
        .context("Failed to build the assignment report")?;

    let bindings: usize = reports.iter().map(|r| r.binding_count()).sum();
    info!(accounts = reports.len(), bindings, "Report complete");

    match &args.output {
        Some(path) => {
            let written = export::export_report(&reports, args.format, path)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            eprintln!("Exported {} accounts to {}", reports.len(), written);
        }
        None => {
            let stdout = io::stdout();
            let mut out = stdout.lock();
            export::write_report(&reports, args.format, &mut out)?;
            out.flush()?;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Args::command().debug_assert();
    }

    #[test]
    fn test_instance_flags_go_together() {
        let result = Args::try_parse_from([
            "ssoreport",
            "--instance-arn",
            "arn:aws:sso:::instance/ssoins-1",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn test_overrides_from_flags() {
        let args = Args::try_parse_from([
            "ssoreport",
            "--profile",
            "audit",
            "-t",
            "ALL",
            "--account-id",
            "111111111111",
            "--account-id",
            "222222222222",
            "--format",
            "csv",
        ])
        .unwrap();

        let overrides = args.config_overrides();
        assert_eq!(overrides.profile.as_deref(), Some("audit"));
        assert_eq!(overrides.principal_type.as_deref(), Some("ALL"));
        assert_eq!(args.account_ids.len(), 2);
        assert_eq!(args.format, ExportFormat::Csv);
    }
}
