//! Verification service abstraction

use async_trait::async_trait;
use bytes::Bytes;
use std::fmt::Debug;

use idskill_core::{DocumentInstanceId, DocumentResult};

use crate::error::VerificationResult;

/// Operations the skill needs from an identity-document verification service.
///
/// A document instance is a server-side analysis session: it is created,
/// receives exactly one image, is queried for results and is then deleted.
/// Each call maps to a single request and is never retried.
#[async_trait]
pub trait DocumentVerifier: Send + Sync + Debug {
    /// Whether the configured subscription exists and is active
    async fn check_subscription_active(&self) -> VerificationResult<bool>;

    async fn create_instance(&self) -> VerificationResult<DocumentInstanceId>;

    /// Attach the front-side image of the document to the instance
    async fn upload_image(
        &self,
        instance_id: &DocumentInstanceId,
        image: Bytes,
    ) -> VerificationResult<()>;

    async fn fetch_results(
        &self,
        instance_id: &DocumentInstanceId,
    ) -> VerificationResult<DocumentResult>;

    async fn delete_instance(&self, instance_id: &DocumentInstanceId) -> VerificationResult<()>;
}
