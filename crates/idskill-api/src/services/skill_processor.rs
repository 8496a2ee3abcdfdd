//! Skill invocation pipeline
//!
//! One invocation runs as a straight sequence of remote calls:
//!
//! 1. download the file with the read token
//! 2. check the AssureID subscription
//! 3. create a document instance
//! 4. upload the image, fetch results, build cards, save them with the write token
//! 5. delete the document instance
//!
//! The first failure ends the sequence. Once step 3 succeeds the instance is
//! deleted exactly once, whatever happens in step 4.

use bytes::Bytes;
use std::sync::Arc;

use idskill_core::{DocumentInstanceId, MetadataTemplate, SkillCard, SkillError, SkillInvocation};
use idskill_processing::{build_skill_cards, error_card, merge_cards};
use idskill_storage::{
    SkillCardWriter, SkillFileReader, SkillStoreFactory, StorageError, StorageResult,
};
use idskill_verification::DocumentVerifier;

use crate::error::log_skill_error;

/// What happens when an invocation fails
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureReporting {
    /// Write a status card describing the failure onto the file
    ErrorCard,
    /// Log only
    Silent,
}

impl FailureReporting {
    pub fn from_enabled(error_cards_enabled: bool) -> Self {
        if error_cards_enabled {
            FailureReporting::ErrorCard
        } else {
            FailureReporting::Silent
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SkillOutcome {
    pub cards_written: usize,
    /// False when the final instance deletion failed
    pub instance_deleted: bool,
}

pub struct SkillProcessor {
    verifier: Arc<dyn DocumentVerifier>,
    stores: Arc<dyn SkillStoreFactory>,
    failure_reporting: FailureReporting,
}

impl SkillProcessor {
    pub fn new(
        verifier: Arc<dyn DocumentVerifier>,
        stores: Arc<dyn SkillStoreFactory>,
        failure_reporting: FailureReporting,
    ) -> Self {
        Self {
            verifier,
            stores,
            failure_reporting,
        }
    }

    /// Process an invocation and report a failure according to the
    /// configured [`FailureReporting`].
    pub async fn run(&self, invocation: &SkillInvocation) -> Result<SkillOutcome, SkillError> {
        let result = self.process(invocation).await;

        match &result {
            Ok(outcome) => tracing::info!(
                invocation_id = %invocation.id,
                file_id = %invocation.file_id(),
                cards_written = outcome.cards_written,
                instance_deleted = outcome.instance_deleted,
                "Skill invocation processed"
            ),
            Err(error) => {
                log_skill_error(error, "Skill invocation failed");
                if self.failure_reporting == FailureReporting::ErrorCard {
                    self.report_failure(invocation, error).await;
                }
            }
        }

        result
    }

    /// Run the pipeline without any failure reporting
    pub async fn process(&self, invocation: &SkillInvocation) -> Result<SkillOutcome, SkillError> {
        let file_id = invocation.file_id();
        let reader = self.stores.reader(invocation.read_token());

        let bytes = reader.read_file_bytes(file_id).await?;
        if bytes.is_empty() {
            return Err(SkillError::EmptyFile {
                file_id: file_id.to_string(),
            });
        }

        if !self.verifier.check_subscription_active().await? {
            return Err(SkillError::SubscriptionInactive);
        }

        let instance_id = self.verifier.create_instance().await?;
        tracing::debug!(instance_id = %instance_id, file_id = %file_id, "Document instance created");

        let analyzed = self
            .analyze(invocation, &instance_id, bytes, reader.as_ref())
            .await;

        let instance_deleted = match self.verifier.delete_instance(&instance_id).await {
            Ok(()) => true,
            Err(e) => {
                tracing::warn!(
                    error = %e,
                    instance_id = %instance_id,
                    "Failed to delete document instance"
                );
                false
            }
        };

        Ok(SkillOutcome {
            cards_written: analyzed?,
            instance_deleted,
        })
    }

    /// Steps that run while the document instance exists
    async fn analyze(
        &self,
        invocation: &SkillInvocation,
        instance_id: &DocumentInstanceId,
        bytes: Bytes,
        reader: &dyn SkillFileReader,
    ) -> Result<usize, SkillError> {
        self.verifier.upload_image(instance_id, bytes).await?;
        let result = self.verifier.fetch_results(instance_id).await?;

        let cards = build_skill_cards(invocation, &result).into_vec();

        let writer = self.stores.writer(invocation.write_token());
        save_cards(reader, writer.as_ref(), invocation.file_id(), &cards).await?;

        Ok(cards.len())
    }

    async fn report_failure(&self, invocation: &SkillInvocation, error: &SkillError) {
        let card = error_card(invocation, error.client_message());
        let reader = self.stores.reader(invocation.read_token());
        let writer = self.stores.writer(invocation.write_token());

        if let Err(e) = save_cards(
            reader.as_ref(),
            writer.as_ref(),
            invocation.file_id(),
            std::slice::from_ref(&card),
        )
        .await
        {
            tracing::warn!(
                error = %e,
                invocation_id = %invocation.id,
                "Failed to write error card"
            );
        }
    }
}

/// Write `cards` to the file's skill cards metadata, creating the instance
/// when missing and merging into it otherwise.
///
/// A create that loses a race with another writer (`Conflict`) is retried once
/// as read-merge-update.
pub async fn save_cards(
    reader: &dyn SkillFileReader,
    writer: &dyn SkillCardWriter,
    file_id: &str,
    cards: &[SkillCard],
) -> StorageResult<()> {
    match reader.read_metadata_template(file_id).await {
        Ok(existing) => {
            writer
                .update_metadata_template(file_id, &merge_cards(existing.cards, cards))
                .await?;
        }
        Err(StorageError::NotFound(_)) => {
            let template = MetadataTemplate::new(cards.to_vec());
            match writer.create_metadata_template(file_id, &template).await {
                Ok(_) => {}
                Err(StorageError::Conflict(_)) => {
                    tracing::info!(file_id = %file_id, "Skill cards created concurrently, merging");
                    let existing = reader.read_metadata_template(file_id).await?;
                    writer
                        .update_metadata_template(file_id, &merge_cards(existing.cards, cards))
                        .await?;
                }
                Err(e) => return Err(e),
            }
        }
        Err(e) => return Err(e),
    }

    Ok(())
}
