//! In-memory doubles for the AssureID and Box seams

use async_trait::async_trait;
use bytes::Bytes;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use idskill_core::{DocumentInstanceId, DocumentResult, MetadataTemplate, SkillCard};
use idskill_storage::{
    SkillCardWriter, SkillFileReader, SkillStoreFactory, StorageError, StorageResult,
};
use idskill_verification::{DocumentVerifier, VerificationError, VerificationResult};

pub const INSTANCE_ID: &str = "instance-1";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VerifierCall {
    Subscription,
    Create,
    Upload,
    Fetch,
    Delete,
}

#[derive(Debug)]
pub struct FakeVerifier {
    pub active: bool,
    pub result: DocumentResult,
    pub fail_on: Option<VerifierCall>,
    pub fetch_delay: Option<Duration>,
    calls: Mutex<Vec<VerifierCall>>,
    uploaded: Mutex<Vec<Bytes>>,
}

impl FakeVerifier {
    pub fn new(result: DocumentResult) -> Self {
        Self {
            active: true,
            result,
            fail_on: None,
            fetch_delay: None,
            calls: Mutex::new(Vec::new()),
            uploaded: Mutex::new(Vec::new()),
        }
    }

    pub fn inactive(mut self) -> Self {
        self.active = false;
        self
    }

    pub fn failing_on(mut self, call: VerifierCall) -> Self {
        self.fail_on = Some(call);
        self
    }

    /// Hold each result lookup for `delay` before answering
    pub fn slow_fetch(mut self, delay: Duration) -> Self {
        self.fetch_delay = Some(delay);
        self
    }

    pub fn calls(&self) -> Vec<VerifierCall> {
        self.calls.lock().unwrap().clone()
    }

    pub fn count(&self, call: VerifierCall) -> usize {
        self.calls().iter().filter(|c| **c == call).count()
    }

    pub fn uploaded(&self) -> Vec<Bytes> {
        self.uploaded.lock().unwrap().clone()
    }

    fn record(&self, call: VerifierCall) -> VerificationResult<()> {
        self.calls.lock().unwrap().push(call);
        if self.fail_on == Some(call) {
            return Err(VerificationError::Timeout {
                operation: "fake call",
            });
        }
        Ok(())
    }
}

#[async_trait]
impl DocumentVerifier for FakeVerifier {
    async fn check_subscription_active(&self) -> VerificationResult<bool> {
        self.record(VerifierCall::Subscription)?;
        Ok(self.active)
    }

    async fn create_instance(&self) -> VerificationResult<DocumentInstanceId> {
        self.record(VerifierCall::Create)?;
        Ok(DocumentInstanceId::new(INSTANCE_ID))
    }

    async fn upload_image(
        &self,
        instance_id: &DocumentInstanceId,
        image: Bytes,
    ) -> VerificationResult<()> {
        assert_eq!(instance_id.as_str(), INSTANCE_ID);
        self.record(VerifierCall::Upload)?;
        self.uploaded.lock().unwrap().push(image);
        Ok(())
    }

    async fn fetch_results(&self, instance_id: &DocumentInstanceId) -> VerificationResult<DocumentResult> {
        assert_eq!(instance_id.as_str(), INSTANCE_ID);
        self.record(VerifierCall::Fetch)?;
        if let Some(delay) = self.fetch_delay {
            tokio::time::sleep(delay).await;
        }
        Ok(self.result.clone())
    }

    async fn delete_instance(&self, instance_id: &DocumentInstanceId) -> VerificationResult<()> {
        assert_eq!(instance_id.as_str(), INSTANCE_ID);
        self.record(VerifierCall::Delete)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreCall {
    ReadFile { token: String },
    ReadTemplate { token: String },
    Create { token: String },
    Update { token: String },
}

#[derive(Debug, Default)]
struct StoreState {
    files: HashMap<String, Bytes>,
    templates: HashMap<String, MetadataTemplate>,
    /// Inserted by the next create, which then reports a conflict
    racing_template: Option<MetadataTemplate>,
    fail_update: bool,
    calls: Vec<StoreCall>,
}

/// Box stand-in holding file content and skill card metadata per file id
#[derive(Debug, Default)]
pub struct MemoryStore {
    state: Mutex<StoreState>,
}

impl MemoryStore {
    pub fn with_file(file_id: &str, content: &'static [u8]) -> Self {
        let store = Self::default();
        store
            .state
            .lock()
            .unwrap()
            .files
            .insert(file_id.to_string(), Bytes::from_static(content));
        store
    }

    pub fn with_template(self, file_id: &str, template: MetadataTemplate) -> Self {
        self.state
            .lock()
            .unwrap()
            .templates
            .insert(file_id.to_string(), template);
        self
    }

    /// Make the next create lose a race against `template`
    pub fn with_racing_template(self, template: MetadataTemplate) -> Self {
        self.state.lock().unwrap().racing_template = Some(template);
        self
    }

    pub fn failing_updates(self) -> Self {
        self.state.lock().unwrap().fail_update = true;
        self
    }

    pub fn template(&self, file_id: &str) -> Option<MetadataTemplate> {
        self.state.lock().unwrap().templates.get(file_id).cloned()
    }

    pub fn calls(&self) -> Vec<StoreCall> {
        self.state.lock().unwrap().calls.clone()
    }

    pub fn update_count(&self) -> usize {
        self.calls()
            .iter()
            .filter(|c| matches!(c, StoreCall::Update { .. }))
            .count()
    }

    pub fn create_count(&self) -> usize {
        self.calls()
            .iter()
            .filter(|c| matches!(c, StoreCall::Create { .. }))
            .count()
    }
}

/// Handle bound to one access token
struct TokenScopedStore {
    store: Arc<MemoryStore>,
    token: String,
}

#[async_trait]
impl SkillFileReader for TokenScopedStore {
    async fn read_file_bytes(&self, file_id: &str) -> StorageResult<Bytes> {
        let mut state = self.store.state.lock().unwrap();
        state.calls.push(StoreCall::ReadFile {
            token: self.token.clone(),
        });
        state
            .files
            .get(file_id)
            .cloned()
            .ok_or_else(|| StorageError::NotFound(file_id.to_string()))
    }

    async fn read_metadata_template(&self, file_id: &str) -> StorageResult<MetadataTemplate> {
        let mut state = self.store.state.lock().unwrap();
        state.calls.push(StoreCall::ReadTemplate {
            token: self.token.clone(),
        });
        state
            .templates
            .get(file_id)
            .cloned()
            .ok_or_else(|| StorageError::NotFound(file_id.to_string()))
    }
}

#[async_trait]
impl SkillCardWriter for TokenScopedStore {
    async fn create_metadata_template(
        &self,
        file_id: &str,
        template: &MetadataTemplate,
    ) -> StorageResult<MetadataTemplate> {
        let mut state = self.store.state.lock().unwrap();
        state.calls.push(StoreCall::Create {
            token: self.token.clone(),
        });

        if let Some(racing) = state.racing_template.take() {
            state.templates.insert(file_id.to_string(), racing);
        }
        if state.templates.contains_key(file_id) {
            return Err(StorageError::Conflict(file_id.to_string()));
        }

        state
            .templates
            .insert(file_id.to_string(), template.clone());
        Ok(template.clone())
    }

    async fn update_metadata_template(
        &self,
        file_id: &str,
        cards: &[SkillCard],
    ) -> StorageResult<MetadataTemplate> {
        let mut state = self.store.state.lock().unwrap();
        state.calls.push(StoreCall::Update {
            token: self.token.clone(),
        });

        if state.fail_update {
            return Err(StorageError::Timeout {
                operation: "fake update",
            });
        }

        let template = state
            .templates
            .get_mut(file_id)
            .ok_or_else(|| StorageError::NotFound(file_id.to_string()))?;
        template.cards = cards.to_vec();
        Ok(template.clone())
    }
}

/// Factory handing out token-scoped views of one shared store
pub struct MemoryStoreFactory(pub Arc<MemoryStore>);

impl SkillStoreFactory for MemoryStoreFactory {
    fn reader(&self, access_token: &str) -> Arc<dyn SkillFileReader> {
        Arc::new(TokenScopedStore {
            store: self.0.clone(),
            token: access_token.to_string(),
        })
    }

    fn writer(&self, access_token: &str) -> Arc<dyn SkillCardWriter> {
        Arc::new(TokenScopedStore {
            store: self.0.clone(),
            token: access_token.to_string(),
        })
    }
}
