//! Box skill invocation webhook

use axum::{extract::State, Extension, Json};
use bytes::Bytes;
use serde::Serialize;
use std::sync::Arc;
use tracing::Instrument;

use idskill_core::SkillInvocation;
use idskill_infra::RequestId;

use crate::error::HttpSkillError;
use crate::state::AppState;

pub const FINISHED_MESSAGE: &str = "AssureID Skill Processing Finished!";

#[derive(Debug, Serialize)]
pub struct SkillResponse {
    pub message: &'static str,
}

/// Handle a skill invocation.
///
/// Box only needs to know the event arrived, so any parseable invocation is
/// acknowledged with 200 whatever the processing outcome. Failures are logged
/// and, when enabled, reported on the file as a status card.
///
/// Processing runs on its own task and finishes even if the caller hangs up,
/// so a created document instance is always released.
#[tracing::instrument(
    skip(state, request_id, body),
    fields(
        request_id = %request_id.0.0,
        invocation_id = tracing::field::Empty,
        file_id = tracing::field::Empty
    )
)]
pub async fn invoke_skill(
    state: State<Arc<AppState>>,
    request_id: Extension<RequestId>,
    body: Bytes,
) -> Result<Json<SkillResponse>, HttpSkillError> {
    let invocation = SkillInvocation::from_request_body(&body)
        .map_err(|e| HttpSkillError::new(e, !state.is_production))?;

    let span = tracing::Span::current();
    span.record("invocation_id", invocation.id.as_str());
    span.record("file_id", invocation.file_id());

    let processor = state.processor.clone();
    let task = tokio::spawn(
        async move {
            // Outcome is logged by the processor
            let _ = processor.run(&invocation).await;
        }
        .instrument(span),
    );

    if let Err(e) = task.await {
        tracing::error!(error = %e, "Skill invocation task did not complete");
    }

    Ok(Json(SkillResponse {
        message: FINISHED_MESSAGE,
    }))
}
