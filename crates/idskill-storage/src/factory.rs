//! Builds Box readers and writers that share one connection pool

use reqwest::Client;
use std::sync::Arc;
use std::time::Duration;

use idskill_core::Config;

use crate::box_client::BoxFileClient;
use crate::error::{StorageError, StorageResult};
use crate::traits::{SkillCardWriter, SkillFileReader, SkillStoreFactory};

const CONNECT_TIMEOUT_SECS: u64 = 10;

#[derive(Debug, Clone)]
pub struct BoxStoreFactory {
    http_client: Client,
    base_url: String,
}

impl BoxStoreFactory {
    pub fn new(base_url: &str, timeout: Duration) -> StorageResult<Self> {
        let http_client = Client::builder()
            .timeout(timeout)
            .connect_timeout(Duration::from_secs(CONNECT_TIMEOUT_SECS).min(timeout))
            .build()
            .map_err(StorageError::ClientBuild)?;

        Ok(Self {
            http_client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn from_config(config: &Config) -> StorageResult<Self> {
        Self::new(&config.box_api_base_url, config.http_timeout())
    }

    fn client(&self, access_token: &str) -> BoxFileClient {
        BoxFileClient::new(self.http_client.clone(), &self.base_url, access_token)
    }
}

impl SkillStoreFactory for BoxStoreFactory {
    fn reader(&self, access_token: &str) -> Arc<dyn SkillFileReader> {
        Arc::new(self.client(access_token))
    }

    fn writer(&self, access_token: &str) -> Arc<dyn SkillCardWriter> {
        Arc::new(self.client(access_token))
    }
}
