//! repowatch entry point.
//!
//! This binary is the composition root for the entire system. Responsibilities:
//!
//! 1. **Parse configuration**: load `.env` (if present), then read every
//!    setting from the environment and validate it.
//! 2. **Wire observability**: configure `tracing-subscriber` with a pretty or
//!    JSON console layer and, when `OTEL_EXPORTER_OTLP_ENDPOINT` is set, an
//!    OpenTelemetry OTLP exporter.
//! 3. **Construct infrastructure**: create `GitHubSource`, `JsonFileStore`,
//!    the optional `DeepLTranslator`, and the senders (Discord always,
//!    Misskey when fully configured), and inject them into `CycleRunner`.
//! 4. **Run**: drive the runner from a `Scheduler` until SIGINT or SIGTERM.
//!
//! Exit status is 0 after a signal and 1 when startup fails.

mod config;
mod telemetry;

use std::process::ExitCode;
use std::sync::Arc;

use engine::{CycleRunner, Scheduler};
use github::GitHubSource;
use notify::{DiscordWebhookSender, MisskeySender};
use state::JsonFileStore;
use tracing::{error, info, warn};
use translator::DeepLTranslator;

use crate::config::{Config, MisskeySetting};
use crate::telemetry::TelemetryConfig;

#[tokio::main]
async fn main() -> ExitCode {
    // A missing .env file is the normal case in production.
    let _ = dotenvy::dotenv();

    let telemetry_config = match TelemetryConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("repowatch: configuration error: {e}");
            return ExitCode::FAILURE;
        }
    };
    let guard = match telemetry::init(&telemetry_config) {
        Ok(guard) => guard,
        Err(e) => {
            eprintln!("repowatch: failed to initialise telemetry: {e:#}");
            return ExitCode::FAILURE;
        }
    };

    let config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            error!(error = %e, "configuration error");
            guard.shutdown();
            return ExitCode::FAILURE;
        }
    };

    let scheduler = build_scheduler(&config);
    scheduler.run_until(shutdown_signal()).await;

    info!("repowatch stopped");
    guard.shutdown();
    ExitCode::SUCCESS
}

fn build_scheduler(config: &Config) -> Scheduler {
    if config.github_token.is_none() {
        warn!("GITHUB_TOKEN not set; using the anonymous GitHub rate limit");
    }
    let source = GitHubSource::new(config.github_token.clone())
        .with_base_url(config.github_api_url.clone());
    let store = JsonFileStore::new(config.state_file.clone());

    let mut runner = CycleRunner::new(
        config.repositories.clone(),
        Arc::new(source),
        Arc::new(store),
    )
    .with_sender(Arc::new(DiscordWebhookSender::new(
        config.discord_webhook_url.clone(),
    )));

    match &config.misskey {
        MisskeySetting::Enabled(misskey) => {
            runner = runner.with_sender(Arc::new(MisskeySender::new(
                misskey.instance_url.clone(),
                misskey.token.clone(),
                misskey.channel_id.clone(),
            )));
        }
        MisskeySetting::Partial { missing } => {
            warn!(?missing, "Misskey partially configured; destination disabled");
        }
        MisskeySetting::Disabled => {}
    }

    match &config.translation {
        Some(translation) => {
            let deepl = DeepLTranslator::new(
                translation.api_key.clone(),
                translation.target_lang.clone(),
            );
            info!(
                endpoint = deepl.endpoint(),
                target_lang = %translation.target_lang,
                "translation enabled"
            );
            runner = runner.with_translator(Arc::new(deepl));
        }
        None => info!("DEEPL_API_KEY not set; translation disabled"),
    }

    info!(
        repositories = ?config.repositories.iter().map(|r| r.as_str()).collect::<Vec<_>>(),
        misskey = config.misskey.enabled().is_some(),
        state_file = %config.state_file.display(),
        "repowatch starting"
    );

    Scheduler::new(runner, config.check_interval)
}

/// Completes on SIGINT (Ctrl+C) or, on Unix, SIGTERM.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            error!(error = %e, "failed to listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{signal, SignalKind};
        match signal(SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(e) => {
                error!(error = %e, "failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => info!("received SIGINT"),
        _ = terminate => info!("received SIGTERM"),
    }
}
