//! HTTP error response conversion
//!
//! `SkillError` comes from idskill-core, so the orphan rule requires the
//! local [`HttpSkillError`] wrapper to implement `IntoResponse`.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use idskill_core::{LogLevel, SkillError};
use idskill_infra::ErrorResponse;

#[derive(Debug)]
pub struct HttpSkillError {
    pub error: SkillError,
    /// Include the internal error text in the body (off in production)
    pub expose_details: bool,
}

impl HttpSkillError {
    pub fn new(error: SkillError, expose_details: bool) -> Self {
        Self {
            error,
            expose_details,
        }
    }
}

/// Log a skill error at the level it declares
pub fn log_skill_error(error: &SkillError, context: &str) {
    let code = error.error_code();
    match error.log_level() {
        LogLevel::Debug => tracing::debug!(error = %error, code, "{}", context),
        LogLevel::Warn => tracing::warn!(error = %error, code, "{}", context),
        LogLevel::Error => tracing::error!(error = %error, code, "{}", context),
    }
}

fn status_code(error: &SkillError) -> StatusCode {
    match error {
        SkillError::InvalidEvent(_) => StatusCode::BAD_REQUEST,
        SkillError::EmptyFile { .. } => StatusCode::UNPROCESSABLE_ENTITY,
        SkillError::SubscriptionInactive => StatusCode::SERVICE_UNAVAILABLE,
        SkillError::Verification(_) | SkillError::Storage(_) => StatusCode::BAD_GATEWAY,
    }
}

impl IntoResponse for HttpSkillError {
    fn into_response(self) -> Response {
        let error = &self.error;
        log_skill_error(error, "Request failed");

        let mut body = ErrorResponse::new(error.client_message()).with_type(error.error_code());
        if self.expose_details {
            body = body.with_details(error.to_string());
        }

        (status_code(error), Json(body)).into_response()
    }
}
