//! AssureID REST client

use async_trait::async_trait;
use base64::Engine;
use bytes::Bytes;
use reqwest::{Client, Response};
use serde::Serialize;
use std::fmt::{Debug, Formatter, Result as FmtResult};
use std::time::Duration;

use idskill_core::{AssureIdConfig, DocumentInstanceId, DocumentResult, VerificationSubscription};

use crate::error::{VerificationError, VerificationResult};
use crate::verifier::DocumentVerifier;

const SERVICE_PATH: &str = "/AssureIDService";
const CONNECT_TIMEOUT_SECS: u64 = 10;

/// Query for a front-side image captured under visible light
const IMAGE_QUERY: [(&str, &str); 3] = [("side", "0"), ("light", "0"), ("metrics", "false")];

/// Body of `POST /Document/Instance`
#[derive(Debug, Serialize)]
#[serde(rename_all = "PascalCase")]
struct CreateInstanceRequest<'a> {
    subscription_id: &'a str,
    image_cropping_expected_size: u8,
    image_cropping_mode: u8,
    manual_document_type: Option<String>,
    process_mode: u8,
    device: DeviceInfo,
    authentication_sensitivity: u8,
    classification_mode: u8,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "PascalCase")]
struct DeviceInfo {
    has_contactless_chip_reader: bool,
    has_magnetic_stripe_reader: bool,
    serial_number: &'static str,
    #[serde(rename = "Type")]
    device_type: DeviceType,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "PascalCase")]
struct DeviceType {
    manufacturer: &'static str,
    model: &'static str,
    sensor_type: u8,
}

impl<'a> CreateInstanceRequest<'a> {
    fn new(subscription_id: &'a str) -> Self {
        Self {
            subscription_id,
            image_cropping_expected_size: 0,
            image_cropping_mode: 1,
            manual_document_type: None,
            process_mode: 0,
            device: DeviceInfo {
                has_contactless_chip_reader: false,
                has_magnetic_stripe_reader: false,
                serial_number: "xxx",
                device_type: DeviceType {
                    manufacturer: "Box",
                    model: "Box Skills",
                    sensor_type: 0,
                },
            },
            authentication_sensitivity: 0,
            classification_mode: 0,
        }
    }
}

/// AssureID client authenticating with HTTP Basic credentials
pub struct AssureIdClient {
    http_client: Client,
    endpoint: String,
    subscription_id: String,
    authorization: String,
}

impl Debug for AssureIdClient {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.debug_struct("AssureIdClient")
            .field("endpoint", &self.endpoint)
            .field("subscription_id", &self.subscription_id)
            .finish()
    }
}

impl AssureIdClient {
    /// Create a client. `timeout` bounds every request made by it.
    pub fn new(config: &AssureIdConfig, timeout: Duration) -> VerificationResult<Self> {
        let http_client = Client::builder()
            .timeout(timeout)
            .connect_timeout(Duration::from_secs(CONNECT_TIMEOUT_SECS).min(timeout))
            .build()
            .map_err(VerificationError::ClientBuild)?;

        let credentials = base64::engine::general_purpose::STANDARD
            .encode(format!("{}:{}", config.username, config.password));

        Ok(Self {
            http_client,
            endpoint: config.endpoint.trim_end_matches('/').to_string(),
            subscription_id: config.subscription_id.clone(),
            authorization: format!("Basic {}", credentials),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}{}", self.endpoint, SERVICE_PATH, path)
    }

    fn document_url(&self, instance_id: &DocumentInstanceId) -> String {
        self.url(&format!("/Document/{}", instance_id))
    }

    /// Turn non-2xx responses into `VerificationError::Status`
    async fn ensure_success(
        operation: &'static str,
        response: Response,
    ) -> VerificationResult<Response> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response
            .text()
            .await
            .unwrap_or_else(|_| "Unknown error".to_string());
        Err(VerificationError::Status {
            operation,
            status,
            body,
        })
    }
}

#[async_trait]
impl DocumentVerifier for AssureIdClient {
    /// Looks for the configured subscription anywhere in the account's list
    /// instead of trusting its first entry, so an account holding several
    /// subscriptions is still recognised as active.
    async fn check_subscription_active(&self) -> VerificationResult<bool> {
        const OPERATION: &str = "subscription lookup";

        let response = self
            .http_client
            .get(self.url("/Subscriptions"))
            .header("Accept", "application/json")
            .header("Authorization", &self.authorization)
            .send()
            .await
            .map_err(|e| VerificationError::from_send(OPERATION, e))?;

        let subscriptions: Vec<VerificationSubscription> = Self::ensure_success(OPERATION, response)
            .await?
            .json()
            .await
            .map_err(|e| VerificationError::from_decode(OPERATION, e))?;

        let active = subscriptions
            .iter()
            .find(|subscription| subscription.id == self.subscription_id)
            .map(|subscription| subscription.is_active)
            .unwrap_or(false);

        tracing::info!(
            subscription_count = subscriptions.len(),
            subscription_id = %self.subscription_id,
            active,
            "Checked AssureID subscription"
        );

        Ok(active)
    }

    async fn create_instance(&self) -> VerificationResult<DocumentInstanceId> {
        const OPERATION: &str = "document instance creation";

        let response = self
            .http_client
            .post(self.url("/Document/Instance"))
            .header("Accept", "application/json")
            .header("Authorization", &self.authorization)
            .json(&CreateInstanceRequest::new(&self.subscription_id))
            .send()
            .await
            .map_err(|e| VerificationError::from_send(OPERATION, e))?;

        let instance_id: DocumentInstanceId = Self::ensure_success(OPERATION, response)
            .await?
            .json()
            .await
            .map_err(|e| VerificationError::from_decode(OPERATION, e))?;

        if instance_id.as_str().trim().is_empty() {
            return Err(VerificationError::EmptyInstanceId);
        }

        tracing::info!(instance_id = %instance_id, "Created AssureID document instance");
        Ok(instance_id)
    }

    async fn upload_image(
        &self,
        instance_id: &DocumentInstanceId,
        image: Bytes,
    ) -> VerificationResult<()> {
        const OPERATION: &str = "image upload";

        let image_size = image.len();
        let response = self
            .http_client
            .post(format!("{}/Image", self.document_url(instance_id)))
            .query(&IMAGE_QUERY)
            .header("Authorization", &self.authorization)
            .body(image)
            .send()
            .await
            .map_err(|e| VerificationError::from_send(OPERATION, e))?;

        Self::ensure_success(OPERATION, response).await?;

        tracing::info!(
            instance_id = %instance_id,
            image_size,
            "Posted image to AssureID document instance"
        );
        Ok(())
    }

    async fn fetch_results(
        &self,
        instance_id: &DocumentInstanceId,
    ) -> VerificationResult<DocumentResult> {
        const OPERATION: &str = "document result lookup";

        let response = self
            .http_client
            .get(self.document_url(instance_id))
            .header("Accept", "application/json")
            .header("Authorization", &self.authorization)
            .send()
            .await
            .map_err(|e| VerificationError::from_send(OPERATION, e))?;

        let result: DocumentResult = Self::ensure_success(OPERATION, response)
            .await?
            .json()
            .await
            .map_err(|e| VerificationError::from_decode(OPERATION, e))?;

        tracing::info!(
            instance_id = %instance_id,
            field_count = result.fields().len(),
            classified = result.classification_type().is_some(),
            "Fetched AssureID document results"
        );
        Ok(result)
    }

    async fn delete_instance(&self, instance_id: &DocumentInstanceId) -> VerificationResult<()> {
        const OPERATION: &str = "document instance deletion";

        let response = self
            .http_client
            .delete(self.document_url(instance_id))
            .header("Accept", "application/json")
            .header("Authorization", &self.authorization)
            .send()
            .await
            .map_err(|e| VerificationError::from_send(OPERATION, e))?;

        Self::ensure_success(OPERATION, response).await?;

        tracing::info!(instance_id = %instance_id, "Deleted AssureID document instance");
        Ok(())
    }
}
