//! Storage capability traits

use async_trait::async_trait;
use bytes::Bytes;
use std::sync::Arc;

use idskill_core::{MetadataTemplate, SkillCard};

use crate::error::StorageResult;

/// Read side of a skill invocation: file content and existing skill cards
#[async_trait]
pub trait SkillFileReader: Send + Sync {
    /// Download the full content of a file
    async fn read_file_bytes(&self, file_id: &str) -> StorageResult<Bytes>;

    /// Read the skill-cards metadata instance of a file.
    ///
    /// Returns `StorageError::NotFound` when the file carries no instance yet.
    async fn read_metadata_template(&self, file_id: &str) -> StorageResult<MetadataTemplate>;
}

/// Write side of a skill invocation
#[async_trait]
pub trait SkillCardWriter: Send + Sync {
    /// Attach a new skill-cards metadata instance to a file.
    ///
    /// Returns `StorageError::Conflict` when one already exists.
    async fn create_metadata_template(
        &self,
        file_id: &str,
        template: &MetadataTemplate,
    ) -> StorageResult<MetadataTemplate>;

    /// Replace the card list of an existing instance
    async fn update_metadata_template(
        &self,
        file_id: &str,
        cards: &[SkillCard],
    ) -> StorageResult<MetadataTemplate>;
}

/// Builds the reader/writer pair for one invocation from its scoped tokens
pub trait SkillStoreFactory: Send + Sync {
    fn reader(&self, access_token: &str) -> Arc<dyn SkillFileReader>;

    fn writer(&self, access_token: &str) -> Arc<dyn SkillCardWriter>;
}
