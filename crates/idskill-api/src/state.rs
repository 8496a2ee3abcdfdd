//! Application state shared by all handlers

use std::sync::Arc;

use crate::services::skill_processor::SkillProcessor;

#[derive(Clone)]
pub struct AppState {
    pub processor: Arc<SkillProcessor>,
    /// Production responses carry no internal error detail
    pub is_production: bool,
}

impl AppState {
    pub fn new(processor: SkillProcessor, is_production: bool) -> Self {
        Self {
            processor: Arc::new(processor),
            is_production,
        }
    }
}
