//! dwiz - component version selection for the deployment wizard
//!
//! This is the CLI front end. It loads configuration, wires the deployment
//! service client into the ops context and renders what the ops return.

mod cli;
mod display;
mod error;
mod events;
mod logging;

use crate::cli::{Cli, Commands, DraftsCommands, GlobalArgs};
use crate::display::OutputRenderer;
use crate::error::CliError;
use crate::events::EventHandler;
use clap::Parser;
use dwiz_config::Config;
use dwiz_events::EventReceiver;
use dwiz_ops::{OperationResult, OpsContextBuilder, OpsCtx};
use dwiz_types::{ColorChoice, OutputFormat};
use std::process;
use tokio::select;
use tokio_util::sync::CancellationToken;
use tracing::{error, info, warn};

/// Exit status when the selection cannot proceed
const EXIT_NOT_READY: i32 = 2;

#[tokio::main]
async fn main() {
    // Parse command line arguments first to check for JSON mode
    let cli = Cli::parse();
    let json_mode = cli.global.json;

    init_tracing(json_mode, cli.global.debug);

    match run(cli).await {
        Ok(true) => {}
        Ok(false) => process::exit(EXIT_NOT_READY),
        Err(e) => {
            error!("Application error: {}", e);
            eprintln!("Error: {e}");
            process::exit(1);
        }
    }
}

/// Main application logic
///
/// Returns whether the result lets the wizard move on.
async fn run(cli: Cli) -> Result<bool, CliError> {
    info!("Starting dwiz v{}", env!("CARGO_PKG_VERSION"));

    // 1. File config (or defaults)
    let mut config = Config::load_or_default(cli.global.config.as_deref()).await?;

    // 2. Environment variables
    config.merge_env()?;

    // 3. CLI flags (highest precedence)
    apply_cli_config(&mut config, &cli.global)?;

    let json_output = cli.global.json || config.general.default_output == OutputFormat::Json;

    let (event_sender, event_receiver) = dwiz_events::channel();

    let api = dwiz_net::api_client(&config.network)?;
    let ops_ctx = OpsContextBuilder::new()
        .with_api(api)
        .with_event_sender(event_sender)
        .with_config(config.clone())
        .build()?;

    let renderer = OutputRenderer::new(json_output, config.general.color);

    let colors_enabled = match config.general.color {
        ColorChoice::Always => true,
        ColorChoice::Never => false,
        ColorChoice::Auto => console::Term::stderr().features().colors_supported(),
    };
    let mut event_handler = EventHandler::new(colors_enabled, cli.global.debug, json_output);

    let result =
        execute_command_with_events(cli.command, ops_ctx, event_receiver, &mut event_handler)
            .await?;

    renderer.render_result(&result)?;

    info!("Command completed");
    Ok(result.is_success())
}

/// Execute command with concurrent event handling
///
/// Ctrl-C cancels the running operation instead of killing the process, so
/// a busy-retry loop ends with a proper cancellation error.
async fn execute_command_with_events(
    command: Commands,
    ops_ctx: OpsCtx,
    mut event_receiver: EventReceiver,
    event_handler: &mut EventHandler,
) -> Result<OperationResult, CliError> {
    let cancel = CancellationToken::new();
    let mut command_future = Box::pin(execute_command(command, ops_ctx, cancel.clone()));
    let mut interrupted = false;

    loop {
        select! {
            result = &mut command_future => {
                // Drain any remaining events
                while let Ok(event) = event_receiver.try_recv() {
                    event_handler.handle_event(event);
                }
                return result;
            }

            event = event_receiver.recv() => {
                if let Some(event) = event {
                    event_handler.handle_event(event);
                }
            }

            signal = tokio::signal::ctrl_c(), if !interrupted => {
                interrupted = true;
                if let Err(e) = signal {
                    warn!("Failed to listen for Ctrl-C: {}", e);
                } else {
                    info!("Interrupted, cancelling");
                    cancel.cancel();
                }
            }
        }
    }
}

/// Execute the specified command
async fn execute_command(
    command: Commands,
    ctx: OpsCtx,
    cancel: CancellationToken,
) -> Result<OperationResult, CliError> {
    match command {
        Commands::Versions {
            flow,
            choices,
            active,
        } => {
            let mut report = dwiz_ops::load_catalog(&ctx, flow, &cancel).await?;

            for choice in &choices {
                report.session.select_version(choice.component, &choice.key)?;
            }
            if let Some(active) = active {
                report.session.set_active_components(active);
            }

            // User picks can make a seeded selection ready or break it
            if !choices.is_empty() {
                let diagnostics = if report.session.evaluate_readiness() {
                    Vec::new()
                } else {
                    let missing = report.session.missing_components();
                    dwiz_ops::diagnose_missing_artifacts(&ctx, &missing, &cancel).await?
                };
                report.session.set_diagnostics(diagnostics);
            }

            Ok(OperationResult::Session(report.summary()))
        }

        Commands::Catalog { flow } => {
            let report = dwiz_ops::load_catalog(&ctx, flow, &cancel).await?;
            Ok(OperationResult::Catalog(report.listing()))
        }

        Commands::Drafts(drafts_cmd) => match drafts_cmd {
            DraftsCommands::List => {
                let drafts = dwiz_ops::list_drafts(&ctx).await?;
                Ok(OperationResult::Drafts(drafts))
            }
            DraftsCommands::Discard { name } => {
                dwiz_ops::discard_draft(&ctx, &name).await?;
                Ok(OperationResult::Success(format!("Discarded draft {name}")))
            }
        },

        Commands::Connection { cluster } => {
            let info = dwiz_ops::connection_info(&ctx, &cluster).await?;
            Ok(OperationResult::Connection(info))
        }
    }
}

/// Initialize tracing/logging
fn init_tracing(json_mode: bool, debug_enabled_flag: bool) {
    let debug_enabled = std::env::var("RUST_LOG").is_ok() || debug_enabled_flag;

    if json_mode && !debug_enabled {
        // Keep stdout clean for the JSON document
        tracing_subscriber::fmt()
            .with_writer(std::io::sink)
            .with_env_filter("off")
            .init();
    } else if debug_enabled {
        // Debug mode: structured JSON logs on stderr
        tracing_subscriber::fmt()
            .json()
            .with_writer(std::io::stderr)
            .with_env_filter(
                tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                    tracing_subscriber::EnvFilter::new(
                        "info,dwiz=debug,dwiz_ops=debug,dwiz_net=debug",
                    )
                }),
            )
            .init();
    } else {
        // Normal mode: the event handler prints status lines, logs stay quiet
        tracing_subscriber::fmt()
            .with_writer(std::io::stderr)
            .with_env_filter(
                tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                    tracing_subscriber::EnvFilter::new("warn,dwiz::logging=off")
                }),
            )
            .init();
    }
}

/// Apply CLI configuration overrides (highest precedence)
fn apply_cli_config(config: &mut Config, global: &GlobalArgs) -> Result<(), CliError> {
    if let Some(color) = global.color {
        config.general.color = color;
    }

    if let Some(api_url) = &global.api_url {
        if !(api_url.starts_with("http://") || api_url.starts_with("https://")) {
            return Err(CliError::InvalidArguments(format!(
                "--api-url must be an http(s) URL, got '{api_url}'"
            )));
        }
        config.network.api_url.clone_from(api_url);
    }

    config.validate()?;
    Ok(())
}
