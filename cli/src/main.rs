//! CLI entrypoint for Guidance Desk
//!
//! This is the main binary that wires together all layers using
//! dependency injection.

use anyhow::{Context, Result, bail};
use clap::Parser;
use guidance_application::{
    CorpusStore, HandleQueryUseCase, InteractionLogger, NoInteractionLogger, RoutingStateMachine,
    SessionStore,
};
use guidance_domain::{ConfigIssue, Severity};
use guidance_infrastructure::{
    ConfigLoader, FileConfig, JsonSessionStore, JsonUnreadStore, JsonWorkbookSource,
    JsonlInteractionLogger,
};
use guidance_presentation::{
    Cli, ConsoleFormatter, DeskRepl, OutputFormat, ReplConfig, expand_home,
};
use std::sync::Arc;
use tracing::{error, info, warn};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

fn main() -> Result<()> {
    let cli = Cli::parse();

    if cli.show_config {
        ConfigLoader::print_config_sources(cli.config.as_ref());
        return Ok(());
    }

    let config = if cli.no_config {
        ConfigLoader::load_defaults()
    } else {
        ConfigLoader::load(cli.config.as_ref())
            .map_err(|e| anyhow::anyhow!("Failed to load configuration: {}", e))?
    };

    // Held until exit so buffered file logs are flushed
    let _log_guard = init_logging(cli.verbose, &config);

    info!("Starting Guidance Desk");

    let issues = config.validate();
    report_issues(&issues);
    if ConfigIssue::has_errors(&issues) {
        bail!("Configuration has errors; see messages above.");
    }

    // === Dependency Injection ===
    let params = config.to_desk_params();

    let source = Arc::new(JsonWorkbookSource::new(expand_home(&config.corpus.path)));
    let corpus = Arc::new(
        CorpusStore::load(source, &params)
            .with_context(|| format!("Failed to load corpus from {}", config.corpus.path))?,
    );

    let interaction_logger: Arc<dyn InteractionLogger> = match &config.logging.audit_file {
        Some(path) => match JsonlInteractionLogger::new(expand_home(path)) {
            Some(logger) => {
                info!("Interaction audit log: {}", logger.path().display());
                Arc::new(logger)
            }
            None => Arc::new(NoInteractionLogger),
        },
        None => Arc::new(NoInteractionLogger),
    };

    let classifier = config
        .routing
        .to_classifier()
        .context("Invalid responder configuration")?;
    let unread_store = Arc::new(JsonUnreadStore::new(expand_home(
        &config.routing.unread_file,
    )));
    let routing = Arc::new(
        RoutingStateMachine::open(classifier, corpus.clone(), unread_store)
            .with_context(|| {
                format!(
                    "Failed to load unread counts from {}",
                    config.routing.unread_file
                )
            })?
            .with_interaction_logger(interaction_logger.clone()),
    );

    let use_case = HandleQueryUseCase::new(corpus, routing.clone(), &params)?
        .with_interaction_logger(interaction_logger);

    // The pending question outlives a single run
    let session_store = Arc::new(JsonSessionStore::new(expand_home(
        &config.routing.session_file,
    )));
    let mut session = session_store
        .load()
        .with_context(|| {
            format!(
                "Failed to load session from {}",
                config.routing.session_file
            )
        })?
        .map(|saved| routing.restore_session(saved))
        .unwrap_or_default();

    // Responder overview
    if cli.responders {
        println!("{}", ConsoleFormatter::format_badges(&routing.badges()));
        return Ok(());
    }

    // Interactive mode
    if cli.chat {
        let repl_config = ReplConfig {
            show_banner: config.repl.show_banner && !cli.quiet,
            history_file: config.repl.history_file.as_deref().map(expand_home),
        };
        DeskRepl::new(Arc::new(use_case))
            .with_config(repl_config)
            .with_session(session)
            .with_session_store(session_store)
            .run()?;
        return Ok(());
    }

    // Single question mode - question is required
    let question = match cli.question {
        Some(q) => q,
        None => bail!("Question is required. Use --chat for interactive mode."),
    };

    let outcome = use_case.handle(&mut session, &question)?;
    session_store.save(&session).with_context(|| {
        format!(
            "Failed to save session to {}",
            config.routing.session_file
        )
    })?;

    let output = match cli.output {
        OutputFormat::Text => ConsoleFormatter::format_outcome(&outcome),
        OutputFormat::Json => ConsoleFormatter::format_outcome_json(&outcome),
    };
    println!("{}", output);

    if outcome.is_routed() && !cli.quiet && cli.output == OutputFormat::Text {
        println!("(The question is kept; answer it in --chat mode with /select and /answer.)");
    }

    Ok(())
}

/// Install the tracing subscriber.
///
/// The console filter comes from `-v` (warn/info/debug/trace), or from
/// `RUST_LOG` when no `-v` was given. A daily rolling file log is added
/// when `[logging] dir` is set.
fn init_logging(verbose: u8, config: &FileConfig) -> Option<WorkerGuard> {
    let filter = match verbose {
        0 => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"), // -vvv or more
    };

    let (file_layer, guard) = match &config.logging.dir {
        Some(dir) => {
            let appender = tracing_appender::rolling::daily(expand_home(dir), "guidance-desk.log");
            let (writer, guard) = tracing_appender::non_blocking(appender);
            let layer = fmt::layer()
                .with_writer(writer)
                .with_ansi(false)
                .with_target(false);
            (Some(layer), Some(guard))
        }
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false),
        )
        .with(file_layer)
        .init();

    guard
}

fn report_issues(issues: &[ConfigIssue]) {
    for issue in issues {
        match issue.severity {
            Severity::Error => error!("{}", issue.message),
            Severity::Warning => warn!("{}", issue.message),
        }
    }
}
