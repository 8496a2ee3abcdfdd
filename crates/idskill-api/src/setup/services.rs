//! Remote clients and the skill processor

use anyhow::{Context, Result};
use std::sync::Arc;

use idskill_core::Config;
use idskill_storage::BoxStoreFactory;
use idskill_verification::AssureIdClient;

use crate::services::skill_processor::{FailureReporting, SkillProcessor};
use crate::state::AppState;

pub fn initialize_services(config: &Config) -> Result<Arc<AppState>> {
    let verifier = AssureIdClient::new(&config.assure_id, config.http_timeout())
        .context("Failed to create AssureID client")?;
    let stores = BoxStoreFactory::from_config(config).context("Failed to create Box client")?;

    tracing::info!(
        verifier = ?verifier,
        box_api_base_url = %config.box_api_base_url,
        "Remote clients initialized"
    );

    let processor = SkillProcessor::new(
        Arc::new(verifier),
        Arc::new(stores),
        FailureReporting::from_enabled(config.error_cards_enabled),
    );

    Ok(Arc::new(AppState::new(processor, config.is_production())))
}
