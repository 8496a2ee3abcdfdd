//! Application setup and initialization

pub mod routes;
pub mod server;
pub mod services;

use anyhow::{Context, Result};
use idskill_core::Config;
use std::sync::Arc;

use crate::state::AppState;

/// Initialize the entire application
pub fn initialize_app(config: &Config) -> Result<(Arc<AppState>, axum::Router)> {
    // Fail fast on misconfiguration
    config.validate().context("Configuration validation failed")?;

    idskill_infra::init_telemetry(config.log_format)
        .map_err(|e| anyhow::anyhow!("Failed to initialize telemetry: {}", e))?;

    tracing::info!("Configuration loaded and validated successfully");

    let state = services::initialize_services(config)?;
    let router = routes::setup_routes(state.clone());

    Ok((state, router))
}
