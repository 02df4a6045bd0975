//! CLI entrypoint for huddle
//!
//! This is the main binary that wires together all layers using
//! dependency injection. The channel is the in-process hub; stdin stands
//! in for the chat platform and the authorization callback.

use anyhow::{Result, anyhow, bail};
use clap::Parser;
use huddle_application::{
    ChannelId, ConnectionQuorumTracker, InboundMessage, NoProgress, NoSessionLogger,
    PlanningCollaborator, ResponseCollector, SessionLogger, StageOrchestrator,
    StageProgressNotifier, TokenExchange, outing_pipeline,
};
use huddle_domain::ClaimedIdentity;
use huddle_infrastructure::{
    CatalogPlanner, ConfigLoader, FileConfig, HttpPlanner, HttpTokenExchange, InMemoryChannel,
    JsonlSessionLogger, OfflineTokenExchange,
};
use huddle_presentation::{
    Cli, ConsoleFormatter, ConsoleInput, OutputFormatter, ProgressReporter, SimpleProgress,
};
use std::io::IsTerminal;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let _log_guard = init_tracing(&cli)?;

    if cli.show_config {
        ConfigLoader::print_config_sources();
        return Ok(());
    }

    let mut config = if cli.no_config {
        ConfigLoader::load_defaults()
    } else {
        ConfigLoader::load(cli.config.as_ref()).map_err(|e| anyhow!("{}", e))?
    };
    apply_overrides(&mut config, &cli);

    let problems = config.validate();
    if !problems.is_empty() {
        let list: Vec<String> = problems.iter().map(|p| format!("  - {}", p)).collect();
        bail!("Invalid configuration:\n{}", list.join("\n"));
    }

    let roster = config.session.roster();
    if roster.is_empty() {
        bail!("No participants. Pass --roster alice,bob or set [session] roster.");
    }
    if !config.output.color {
        ConsoleFormatter::disable_color();
    }
    let format = cli
        .output
        .map(Into::into)
        .or(config.output.format)
        .unwrap_or_default();

    info!("Starting huddle in {} for {}", config.session.city, roster);

    // === Dependency Injection ===
    let (hub, mut outbound) = InMemoryChannel::new().with_outbound_listener();
    let hub = Arc::new(hub);
    let channel_id = ChannelId::new(config.session.channel.as_str());

    tokio::spawn(async move {
        while let Some(message) = outbound.recv().await {
            println!("[#{}] huddle: {}", message.channel, message.text);
        }
    });

    let logger: Arc<dyn SessionLogger> = match &config.logging.session_log {
        Some(path) => match JsonlSessionLogger::new(path) {
            Some(logger) => Arc::new(logger),
            None => Arc::new(NoSessionLogger),
        },
        None => Arc::new(NoSessionLogger),
    };

    let exchange: Arc<dyn TokenExchange> = match (
        &config.auth.token_url,
        &config.auth.client_id,
        &config.auth.client_secret,
    ) {
        (Some(url), Some(id), Some(secret)) => {
            let exchange = HttpTokenExchange::new(url, id, secret);
            match &config.auth.redirect_uri {
                Some(uri) => Arc::new(exchange.with_redirect_uri(uri)),
                None => Arc::new(exchange),
            }
        }
        _ => Arc::new(OfflineTokenExchange),
    };

    let tracker = Arc::new(
        ConnectionQuorumTracker::new(hub.clone(), channel_id.clone(), exchange)
            .with_logger(logger.clone()),
    );
    tracker.register_expected(roster.clone());

    let cancel = CancellationToken::new();
    tokio::spawn(pump_stdin(
        hub.clone(),
        channel_id.clone(),
        tracker.clone(),
        cancel.clone(),
    ));

    let progress: Box<dyn StageProgressNotifier> = if cli.quiet {
        Box::new(NoProgress)
    } else if std::io::stdin().is_terminal() {
        Box::new(SimpleProgress)
    } else {
        Box::new(ProgressReporter::new())
    };

    // Connection gate
    let connection = config.connection.to_settings();
    if connection.enabled && !cli.no_auth {
        if let Err(e) = tracker.request_authorization(connection.min_fraction).await {
            warn!("Could not announce authorization: {}", e);
        }
        let wait = tracker
            .wait_for_quorum_with_progress(
                connection.timeout,
                connection.min_fraction,
                progress.as_ref(),
            )
            .await;
        println!("{}", ConsoleFormatter::format_quorum(&wait));
    }

    let planner: Arc<dyn PlanningCollaborator> = match &config.planner.endpoint {
        Some(endpoint) => Arc::new(
            HttpPlanner::new(endpoint)
                .with_timeout(Duration::from_secs(config.planner.timeout_seconds)),
        ),
        None => Arc::new(CatalogPlanner),
    };

    let mut settings = config.stages.to_settings();
    if let Some(secs) = cli.stage_timeout {
        settings = settings.with_stage_timeout(Duration::from_secs(secs));
    }
    let stages = outing_pipeline(&settings, roster.len());

    let collector = ResponseCollector::new(hub.clone(), channel_id).with_logger(logger.clone());
    let orchestrator =
        StageOrchestrator::new(collector, planner, config.session.city.clone()).with_logger(logger);

    let result = orchestrator
        .run_with_progress(&stages, &roster, progress.as_ref())
        .await;
    cancel.cancel();

    let artifact = result?;
    println!();
    println!("{}", ConsoleFormatter.render(&artifact, format));

    Ok(())
}

fn init_tracing(cli: &Cli) -> Result<Option<WorkerGuard>> {
    let filter = match cli.verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"), // -vvv or more
    };

    let Some(path) = &cli.log_file else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .with_writer(std::io::stderr)
            .init();
        return Ok(None);
    };

    let file_name = path
        .file_name()
        .ok_or_else(|| anyhow!("--log-file must name a file: {}", path.display()))?;
    let dir = path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or(Path::new("."));
    let (writer, guard) =
        tracing_appender::non_blocking(tracing_appender::rolling::never(dir, file_name));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_ansi(false)
        .with_writer(writer)
        .init();
    Ok(Some(guard))
}

fn apply_overrides(config: &mut FileConfig, cli: &Cli) {
    if let Some(city) = &cli.city {
        config.session.city = city.clone();
    }
    if let Some(channel) = &cli.channel {
        config.session.channel = channel.clone();
    }
    if !cli.roster.is_empty() {
        config.session.roster = cli.roster.clone();
    }
    if cli.no_auth {
        config.connection.enabled = false;
    }
    if let Some(path) = &cli.session_log {
        config.logging.session_log = Some(path.clone());
    }
}

/// Read stdin on a detached thread so a pending read never holds up exit
fn spawn_stdin_reader() -> mpsc::UnboundedReceiver<String> {
    let (tx, rx) = mpsc::unbounded_channel();
    std::thread::spawn(move || {
        for line in std::io::stdin().lines() {
            match line {
                Ok(line) => {
                    if tx.send(line).is_err() {
                        break;
                    }
                }
                Err(e) => {
                    warn!("Failed to read stdin: {}", e);
                    break;
                }
            }
        }
    });
    rx
}

/// Feed stdin lines into the hub until the session ends
async fn pump_stdin(
    hub: Arc<InMemoryChannel>,
    channel_id: ChannelId,
    tracker: Arc<ConnectionQuorumTracker>,
    cancel: CancellationToken,
) {
    let mut lines = spawn_stdin_reader();

    loop {
        let line = tokio::select! {
            _ = cancel.cancelled() => break,
            line = lines.recv() => match line {
                Some(line) => line,
                None => break,
            },
        };

        match ConsoleInput::parse(&line) {
            Some(ConsoleInput::Reply { sender, text }) => {
                hub.publish(&channel_id, InboundMessage::from_participant(sender, text));
            }
            Some(ConsoleInput::Authorize { identity, code }) => {
                let state = tracker
                    .handle_authorization_callback(ClaimedIdentity::new(identity.as_str()), &code)
                    .await;
                if state.is_connected() {
                    println!("{} is connected", identity);
                } else {
                    println!("{} could not be connected", identity);
                }
            }
            None if line.trim().is_empty() => {}
            None => println!("Use `name: reply` or `/auth <name> <code>`"),
        }
    }
}
