//! Box content API client scoped to one access token

use async_trait::async_trait;
use bytes::Bytes;
use reqwest::header::{ACCEPT, AUTHORIZATION, CONTENT_TYPE};
use reqwest::{Client, Response, StatusCode};
use serde::Serialize;
use std::fmt::{Debug, Formatter, Result as FmtResult};

use idskill_core::{MetadataTemplate, SkillCard, SKILLS_METADATA_SCOPE, SKILLS_METADATA_TEMPLATE};

use crate::error::{StorageError, StorageResult};
use crate::traits::{SkillCardWriter, SkillFileReader};

const JSON_PATCH: &str = "application/json-patch+json";

/// One JSON Patch operation
#[derive(Debug, Serialize)]
struct PatchOperation<'a, T: Serialize> {
    op: &'static str,
    path: &'static str,
    value: &'a T,
}

/// File and metadata access for a single invocation token.
///
/// The same type serves as reader and writer; which token it carries
/// decides what Box allows it to do.
#[derive(Clone)]
pub struct BoxFileClient {
    http_client: Client,
    base_url: String,
    authorization: String,
}

impl Debug for BoxFileClient {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.debug_struct("BoxFileClient")
            .field("base_url", &self.base_url)
            .finish()
    }
}

impl BoxFileClient {
    /// Wrap a shared HTTP client with a bearer token
    pub fn new(http_client: Client, base_url: &str, access_token: &str) -> Self {
        Self {
            http_client,
            base_url: base_url.trim_end_matches('/').to_string(),
            authorization: format!("Bearer {}", access_token),
        }
    }

    fn file_url(&self, file_id: &str, suffix: &str) -> String {
        format!(
            "{}/files/{}{}",
            self.base_url,
            urlencoding::encode(file_id),
            suffix
        )
    }

    fn metadata_url(&self, file_id: &str) -> String {
        self.file_url(
            file_id,
            &format!("/metadata/{}/{}", SKILLS_METADATA_SCOPE, SKILLS_METADATA_TEMPLATE),
        )
    }

    /// Map non-2xx responses to storage errors. 404 and 409 get their own
    /// variants since callers branch on them.
    async fn ensure_success(
        operation: &'static str,
        file_id: &str,
        response: Response,
    ) -> StorageResult<Response> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response
            .text()
            .await
            .unwrap_or_else(|_| "Unknown error".to_string());

        match status {
            StatusCode::NOT_FOUND => Err(StorageError::NotFound(format!(
                "{} for file {}",
                operation, file_id
            ))),
            StatusCode::CONFLICT => Err(StorageError::Conflict(format!(
                "{} for file {}",
                operation, file_id
            ))),
            _ => Err(StorageError::Status {
                operation,
                status,
                body,
            }),
        }
    }

    async fn decode_template(
        operation: &'static str,
        response: Response,
    ) -> StorageResult<MetadataTemplate> {
        response
            .json()
            .await
            .map_err(|e| StorageError::from_decode(operation, e))
    }
}

#[async_trait]
impl SkillFileReader for BoxFileClient {
    async fn read_file_bytes(&self, file_id: &str) -> StorageResult<Bytes> {
        const OPERATION: &str = "file download";

        let response = self
            .http_client
            .get(self.file_url(file_id, "/content"))
            .header(AUTHORIZATION, &self.authorization)
            .send()
            .await
            .map_err(|e| StorageError::from_send(OPERATION, e))?;

        let bytes = Self::ensure_success(OPERATION, file_id, response)
            .await?
            .bytes()
            .await
            .map_err(|e| StorageError::from_decode(OPERATION, e))?;

        tracing::debug!(file_id = %file_id, size = bytes.len(), "Downloaded file from Box");

        Ok(bytes)
    }

    async fn read_metadata_template(&self, file_id: &str) -> StorageResult<MetadataTemplate> {
        const OPERATION: &str = "skill cards lookup";

        let response = self
            .http_client
            .get(self.metadata_url(file_id))
            .header(ACCEPT, "application/json")
            .header(AUTHORIZATION, &self.authorization)
            .send()
            .await
            .map_err(|e| StorageError::from_send(OPERATION, e))?;

        let response = Self::ensure_success(OPERATION, file_id, response).await?;
        Self::decode_template(OPERATION, response).await
    }
}

#[async_trait]
impl SkillCardWriter for BoxFileClient {
    async fn create_metadata_template(
        &self,
        file_id: &str,
        template: &MetadataTemplate,
    ) -> StorageResult<MetadataTemplate> {
        const OPERATION: &str = "skill cards creation";

        let response = self
            .http_client
            .post(self.metadata_url(file_id))
            .header(ACCEPT, "application/json")
            .header(AUTHORIZATION, &self.authorization)
            .json(template)
            .send()
            .await
            .map_err(|e| StorageError::from_send(OPERATION, e))?;

        let response = Self::ensure_success(OPERATION, file_id, response).await?;

        tracing::info!(
            file_id = %file_id,
            card_count = template.cards.len(),
            "Created skill cards metadata"
        );

        Self::decode_template(OPERATION, response).await
    }

    async fn update_metadata_template(
        &self,
        file_id: &str,
        cards: &[SkillCard],
    ) -> StorageResult<MetadataTemplate> {
        const OPERATION: &str = "skill cards update";

        let patch = [PatchOperation {
            op: "replace",
            path: "/cards",
            value: &cards,
        }];
        let body = serde_json::to_vec(&patch)?;

        let response = self
            .http_client
            .put(self.metadata_url(file_id))
            .header(ACCEPT, "application/json")
            .header(AUTHORIZATION, &self.authorization)
            .header(CONTENT_TYPE, JSON_PATCH)
            .body(body)
            .send()
            .await
            .map_err(|e| StorageError::from_send(OPERATION, e))?;

        let response = Self::ensure_success(OPERATION, file_id, response).await?;

        tracing::info!(
            file_id = %file_id,
            card_count = cards.len(),
            "Updated skill cards metadata"
        );

        Self::decode_template(OPERATION, response).await
    }
}
