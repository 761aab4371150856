//! CLI entrypoint for borg
//!
//! This is the main binary that wires together all layers using
//! dependency injection.

use anyhow::{Context, Result, bail};
use borg_application::AnalyzeFileUseCase;
use borg_domain::ConfigIssue;
use borg_infrastructure::{ConfigLoader, HttpToolInvoker};
use borg_presentation::{Cli, ConsoleFormatter, OutputFormat, ProgressReporter, SimpleProgress};
use clap::Parser;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;
use tracing::info;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Keep the guard alive so buffered log lines are flushed on exit
    let _log_guard = init_logging(cli.verbose, cli.log_dir.as_deref());

    if cli.show_config {
        ConfigLoader::print_config_sources(cli.config.as_deref());
        return Ok(());
    }

    if cli.check_config {
        return check_config(cli.config.as_deref());
    }

    let file_id = match cli.file_id.as_deref() {
        Some(id) => id,
        None => bail!(
            "FILE_ID is required. Use --check-config to only validate the configuration."
        ),
    };

    info!("Starting borg analysis of {}", file_id);

    let (file_config, server_config) = ConfigLoader::load_server_config(cli.config.as_deref())
        .context("cannot use configuration")?;

    let mut params = file_config.server.to_analysis_params();
    if let Some(seconds) = cli.tool_timeout {
        if seconds == 0 {
            bail!("--tool-timeout must be at least 1 second");
        }
        params = params.with_tool_timeout(Duration::from_secs(seconds));
    }

    // === Dependency Injection ===
    let invoker = Arc::new(HttpToolInvoker::new());
    let use_case = AnalyzeFileUseCase::new(invoker, server_config).with_params(params);

    let analysis = if cli.quiet || cli.output == OutputFormat::Json {
        use_case.execute(file_id).await?
    } else if cli.simple_progress {
        use_case.execute_with_progress(file_id, &SimpleProgress).await?
    } else {
        let progress = ProgressReporter::new();
        use_case.execute_with_progress(file_id, &progress).await?
    };

    let output = match cli.output {
        OutputFormat::Full => ConsoleFormatter::format(&analysis),
        OutputFormat::Summary => ConsoleFormatter::format_summary_only(&analysis),
        OutputFormat::Json => ConsoleFormatter::format_json(&analysis),
    };

    println!("{}", output);

    Ok(())
}

/// Log to stderr at the level picked by `-v`, and to daily files when asked
fn init_logging(verbose: u8, log_dir: Option<&Path>) -> Option<WorkerGuard> {
    let filter = match verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"), // -vvv or more
    };

    let stderr_layer = fmt::layer().with_target(false).with_writer(std::io::stderr);

    let (file_layer, guard) = match log_dir {
        Some(dir) => {
            let appender = tracing_appender::rolling::daily(dir, "borg.log");
            let (writer, guard) = tracing_appender::non_blocking(appender);
            let layer = fmt::layer().with_ansi(false).with_writer(writer);
            (Some(layer), Some(guard))
        }
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(stderr_layer)
        .with(file_layer)
        .init();

    guard
}

/// Validate the configuration and print every issue found
fn check_config(config_path: Option<&Path>) -> Result<()> {
    let file_config = ConfigLoader::load(config_path).context("cannot load configuration")?;
    let issues = file_config.validate();
    for issue in &issues {
        println!("{}", issue);
    }

    if ConfigIssue::has_errors(&issues) {
        bail!("configuration is invalid");
    }

    let server_config = file_config
        .into_server_config()
        .context("cannot compile configuration")?;
    println!(
        "Configuration OK: {} tools ({} enabled), {} identity rules",
        server_config.tools.len(),
        server_config.enabled_tools().count(),
        server_config.file_identity_rules.len()
    );
    Ok(())
}
