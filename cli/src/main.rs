//! CLI entrypoint for couple-quest
//!
//! This is the main binary that wires together all layers using
//! dependency injection.

use anyhow::{Context, Result, bail};
use clap::Parser;
use couplequest_application::{ActivityLogger, NoActivityLogger, Repositories};
use couplequest_infrastructure::{
    ConfigLoader, FileConfig, InMemoryStore, JsonlActivityLogger, Severity, SnapshotFile,
    builtin_questions, load_seed_file,
};
use couplequest_presentation::{Cli, Dispatcher, RpcServer};
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::{error, info, warn};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt::writer::MakeWriterExt;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    if cli.show_config {
        ConfigLoader::print_config_sources(cli.config.as_ref());
        return Ok(());
    }

    let mut config = if cli.no_config {
        ConfigLoader::load_defaults()
    } else {
        ConfigLoader::load(cli.config.as_ref())?
    };
    if let Some(listen) = &cli.listen {
        config.server.listen = listen.clone();
    }
    if let Some(snapshot) = &cli.snapshot {
        config.storage.snapshot_path = Some(snapshot.clone());
    }

    let _log_guard = init_logging(cli.verbose, &config);

    info!("Starting couple-quest");

    let issues = config.validate();
    for issue in &issues {
        match issue.severity {
            Severity::Warning => warn!("{}", issue.message),
            Severity::Error => error!("{}", issue.message),
        }
    }
    if issues.iter().any(|i| i.severity == Severity::Error) {
        bail!("Invalid configuration");
    }
    let (listen, _) = config.server.parse_listen();
    let listen = listen.context("server.listen is not a socket address")?;
    let (params, _) = config.chat.to_service_params();

    // === Dependency Injection ===
    // Store: restored from the snapshot when configured
    let store = match &config.storage.snapshot_path {
        Some(path) => InMemoryStore::open(SnapshotFile::new(path)).await?,
        None => {
            warn!("No storage.snapshot_path configured; data will not survive a restart");
            InMemoryStore::new()
        }
    }
    .into_shared();

    let seeds = match &config.storage.question_seed_path {
        Some(path) => load_seed_file(path)?,
        None => builtin_questions()?,
    };
    store.seed_questions(seeds).await;

    let activity: Arc<dyn ActivityLogger> = match &config.logging.activity_log {
        Some(path) => match JsonlActivityLogger::new(path) {
            Some(logger) => {
                info!("Recording activity to {}", logger.path().display());
                Arc::new(logger)
            }
            None => Arc::new(NoActivityLogger),
        },
        None => Arc::new(NoActivityLogger),
    };

    let dispatcher = Dispatcher::with_activity_logger(
        Repositories::from_store(store.clone()),
        &params,
        activity,
    )
    .with_store_flush(store.clone());

    let server = RpcServer::bind(listen, Arc::new(dispatcher))
        .await
        .with_context(|| format!("failed to bind {}", listen))?;

    let shutdown = CancellationToken::new();
    let on_signal = shutdown.clone();
    tokio::spawn(async move {
        match tokio::signal::ctrl_c().await {
            Ok(()) => {
                info!("Interrupt received");
                on_signal.cancel();
            }
            Err(e) => warn!("Cannot listen for Ctrl-C, graceful shutdown disabled: {}", e),
        }
    });

    server.serve(shutdown).await?;

    store.save().await?;
    info!("Stopped");
    Ok(())
}

/// Initialize logging based on verbosity level, optionally teeing into a
/// daily rolling file under `[logging] dir`.
fn init_logging(verbose: u8, config: &FileConfig) -> Option<WorkerGuard> {
    let filter = match verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"), // -vvv or more
    };

    match &config.logging.dir {
        Some(dir) => {
            let appender = tracing_appender::rolling::daily(dir, "couplequest.log");
            let (file, guard) = tracing_appender::non_blocking(appender);
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_target(false)
                .with_ansi(false)
                .with_writer(std::io::stderr.and(file))
                .init();
            Some(guard)
        }
        None => {
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_target(false)
                .init();
            None
        }
    }
}
