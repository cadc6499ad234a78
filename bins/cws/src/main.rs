//! `cws` - publish Chrome extensions from the command line
//!
//! Wraps the Chrome Web Store API v2: upload a package, submit it for
//! review, follow its status and control the rollout.

use clap::{Parser, Subcommand};
use cws_core::error::exit_codes;
use cws_telemetry::{TelemetryConfig, Timer};
use std::path::PathBuf;
use std::process::ExitCode;

mod commands;
mod context;

use commands::{cancel_submission, deploy_percentage, fetch_status, publish, upload};
use commands::{LogFormat, ProjectionArg, PublishTypeArg};
use context::{Context, GlobalArgs};

/// Manage Chrome Web Store items
#[derive(Parser, Debug)]
#[command(name = "cws")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    #[command(flatten)]
    global: GlobalArgs,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Show the review and rollout status of the item
    FetchStatus {
        /// Report on the draft or the published revision
        #[arg(long, value_enum)]
        projection: Option<ProjectionArg>,
    },

    /// Submit the uploaded draft for review and publication
    Publish {
        /// Publish right after review, or stage the revision
        #[arg(long = "type", value_enum)]
        publish_type: Option<PublishTypeArg>,

        /// Initial rollout percentage
        #[arg(long, value_parser = clap::value_parser!(u8).range(0..=100))]
        deploy_percentage: Option<u8>,

        /// Ask the store to skip review when the item qualifies
        #[arg(long)]
        skip_review: bool,
    },

    /// Cancel the submission that is pending review
    CancelSubmission,

    /// Change the share of users receiving the published version
    SetPublishedDeployPercentage {
        /// Percentage of users (0-100)
        #[arg(value_parser = clap::value_parser!(u8).range(0..=100))]
        percentage: u8,
    },

    /// Upload a new package for the item
    Upload {
        /// Path to the extension package
        file: PathBuf,

        /// Content type of the package
        #[arg(long, default_value = "application/zip")]
        media_type: String,
    },
}

impl Commands {
    fn name(&self) -> &'static str {
        match self {
            Self::FetchStatus { .. } => "fetch-status",
            Self::Publish { .. } => "publish",
            Self::CancelSubmission => "cancel-submission",
            Self::SetPublishedDeployPercentage { .. } => "set-published-deploy-percentage",
            Self::Upload { .. } => "upload",
        }
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    let json = cli.global.json;

    let telemetry = TelemetryConfig::for_verbosity(cli.global.verbose)
        .with_json(cli.global.log_format == LogFormat::Json);
    if let Err(e) = cws_telemetry::init(telemetry) {
        eprintln!("warning: logging disabled: {e}");
    }

    let timer = Timer::start(cli.command.name());
    let result = match Context::resolve(cli.global) {
        Ok(ctx) => run(&ctx, cli.command).await,
        Err(e) => Err(e),
    };
    timer.stop();

    match result {
        Ok(()) => ExitCode::from(exit_status(exit_codes::SUCCESS)),
        Err(e) => {
            tracing::debug!(code = %e.code, error = ?e, "Command failed");
            if json {
                cws_cli::output::print_error_json(&e);
            } else {
                cws_cli::output::print_error(&e);
            }
            ExitCode::from(exit_status(e.exit_code()))
        }
    }
}

async fn run(ctx: &Context, command: Commands) -> cws_core::Result<()> {
    match command {
        Commands::FetchStatus { projection } => {
            fetch_status::run(ctx, projection.map(Into::into)).await
        }
        Commands::Publish {
            publish_type,
            deploy_percentage,
            skip_review,
        } => {
            let options = publish::Options {
                publish_type: publish_type.map(Into::into),
                deploy_percentage,
                skip_review,
            };
            publish::run(ctx, options).await
        }
        Commands::CancelSubmission => cancel_submission::run(ctx).await,
        Commands::SetPublishedDeployPercentage { percentage } => {
            deploy_percentage::run(ctx, percentage).await
        }
        Commands::Upload { file, media_type } => upload::run(ctx, &file, &media_type).await,
    }
}

fn exit_status(code: i32) -> u8 {
    u8::try_from(code).unwrap_or(1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_publish() {
        let cli = Cli::try_parse_from([
            "cws",
            "publish",
            "--type",
            "staged",
            "--deploy-percentage",
            "10",
        ])
        .unwrap();

        match cli.command {
            Commands::Publish {
                publish_type,
                deploy_percentage,
                skip_review,
            } => {
                assert_eq!(publish_type, Some(PublishTypeArg::Staged));
                assert_eq!(deploy_percentage, Some(10));
                assert!(!skip_review);
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn test_percentage_range_checked() {
        assert!(Cli::try_parse_from(["cws", "set-published-deploy-percentage", "100"]).is_ok());
        assert!(Cli::try_parse_from(["cws", "set-published-deploy-percentage", "101"]).is_err());
        assert!(Cli::try_parse_from(["cws", "set-published-deploy-percentage", "-1"]).is_err());
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from(["cws", "cancel-submission", "--json", "--item-id", "abc"])
            .unwrap();
        assert!(cli.global.json);
        assert_eq!(cli.global.item_id.as_deref(), Some("abc"));
        assert_eq!(cli.command.name(), "cancel-submission");
    }

    #[test]
    fn test_log_format_flag() {
        let cli = Cli::try_parse_from(["cws", "cancel-submission"]).unwrap();
        assert_eq!(cli.global.log_format, LogFormat::Text);

        let cli = Cli::try_parse_from(["cws", "--log-format", "json", "cancel-submission"]).unwrap();
        assert_eq!(cli.global.log_format, LogFormat::Json);

        assert!(Cli::try_parse_from(["cws", "--log-format", "xml", "cancel-submission"]).is_err());
    }

    #[test]
    fn test_exit_status() {
        assert_eq!(exit_status(exit_codes::API_ERROR), 5);
        assert_eq!(exit_status(-1), 1);
    }
}
