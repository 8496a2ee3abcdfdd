//! idskill API
//!
//! HTTP front for the AssureID skill: receives Box skill invocations, runs
//! them through [`SkillProcessor`] and acknowledges Box.

pub mod error;
pub mod handlers;
pub mod services;
pub mod setup;
pub mod state;

pub use error::HttpSkillError;
pub use services::skill_processor::{save_cards, FailureReporting, SkillOutcome, SkillProcessor};
pub use state::AppState;
