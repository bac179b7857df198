//! Insider Risk - Main Entry Point
//!
//! Usage: `insider-risk [config.json]`

use std::path::PathBuf;

use tokio::sync::broadcast::error::RecvError;

use insider_risk_core::constants::{get_data_dir, APP_NAME, APP_VERSION};
use insider_risk_core::logic::config::EngineConfig;
use insider_risk_core::logic::engine::{EngineUpdate, RiskEngine};
use insider_risk_core::logic::events::{UpdateEmitter, UpdateKind};
use insider_risk_core::logic::persistence::{JsonlSink, NullSink, PersistenceSink};
use insider_risk_core::logic::random::RngSource;
use insider_risk_core::logic::runner;
use insider_risk_core::logic::simulator::EventSimulator;

#[tokio::main]
async fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    log::info!("Starting {} v{}...", APP_NAME, APP_VERSION);

    let config_path = std::env::args().nth(1).map(PathBuf::from);
    let config = match EngineConfig::load(config_path.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            log::error!("{}", e);
            std::process::exit(1);
        }
    };

    let sink: Box<dyn PersistenceSink> = match JsonlSink::open(get_data_dir()) {
        Ok(sink) => Box::new(sink),
        Err(e) => {
            log::warn!("Persistence init failed: {} - records will not be saved", e);
            Box::new(NullSink)
        }
    };

    let engine = match RiskEngine::with_parts(
        config.clone(),
        sink,
        Box::new(RngSource::from_entropy()),
        Box::new(RngSource::from_entropy()),
    ) {
        Ok(engine) => engine,
        Err(e) => {
            log::error!("{}", e);
            std::process::exit(1);
        }
    };

    let handle = runner::spawn(
        engine,
        EventSimulator::new(&config.users),
        UpdateEmitter::default(),
    );
    let mut updates = handle.subscribe();
    handle.start();

    loop {
        tokio::select! {
            _ = tokio::signal::ctrl_c() => {
                log::info!("Ctrl-C received, shutting down");
                break;
            }
            update = updates.recv() => match update {
                Ok(update) => log_update(&update),
                Err(RecvError::Lagged(n)) => log::warn!("Display lagged, {} updates skipped", n),
                Err(RecvError::Closed) => break,
            },
        }
    }

    match handle.shutdown().await {
        Ok(engine) => {
            let stats = engine.stats();
            log::info!(
                "Stopped: {} activities, {} incidents, max score {}",
                stats.total_activities,
                stats.incident_count,
                stats.max_score
            );
        }
        Err(e) => log::error!("{}", e),
    }
}

fn log_update(update: &EngineUpdate) {
    match update.kind {
        UpdateKind::Activity => {
            if let Some(entry) = &update.latest_entry {
                log::info!(
                    "[{}] {} - {} (+{})",
                    update.kind.event_name(),
                    entry.user_id,
                    entry.description,
                    entry.risk_delta
                );
            }
        }
        UpdateKind::Decay => {
            let scores: Vec<String> = update
                .users
                .iter()
                .map(|u| format!("{}={} {}", u.user_id, u.score, u.status))
                .collect();
            log::debug!(
                "[{}] {} | model trained={} corpus {}/{}",
                update.kind.event_name(),
                scores.join(", "),
                update.model.is_trained,
                update.model.corpus.current_size,
                update.model.corpus.required_size
            );
            for user_id in &update.unlocked {
                log::info!("[{}] {} unlocked", update.kind.event_name(), user_id);
            }
        }
        UpdateKind::Reset => log::info!("[{}] all state cleared", update.kind.event_name()),
    }

    for incident in &update.new_incidents {
        log::warn!("{}", incident.message);
    }
}
