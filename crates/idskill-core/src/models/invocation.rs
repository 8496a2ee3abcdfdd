//! Skill invocation event
//!
//! Box delivers one of these when a file is ready for automated processing.
//! The event carries two scoped access tokens: `read` for downloading the file
//! and reading its metadata, `write` for writing skill cards back.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::fmt::{Debug, Formatter, Result as FmtResult};

use crate::error::SkillError;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkillInvocation {
    /// Invocation ID, echoed on every card written for this invocation
    #[serde(deserialize_with = "string_or_number")]
    pub id: String,
    pub skill: SkillDescriptor,
    pub token: InvocationTokens,
    pub source: InvocationSource,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkillDescriptor {
    #[serde(deserialize_with = "string_or_number")]
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InvocationTokens {
    pub read: AccessToken,
    pub write: AccessToken,
}

/// Bearer token scoped to the invocation. Redacted from `Debug` output.
#[derive(Clone, PartialEq, Serialize, Deserialize)]
pub struct AccessToken {
    pub access_token: String,
}

impl Debug for AccessToken {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.debug_struct("AccessToken")
            .field("access_token", &"[REDACTED]")
            .finish()
    }
}

/// The file the skill was invoked on
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InvocationSource {
    #[serde(deserialize_with = "string_or_number")]
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

impl SkillInvocation {
    /// Parse an inbound request body.
    ///
    /// Accepts either the invocation itself or a proxy envelope whose `body`
    /// field holds the invocation serialized as a string.
    pub fn from_request_body(body: &[u8]) -> Result<Self, SkillError> {
        let value: Value = serde_json::from_slice(body)
            .map_err(|e| SkillError::InvalidEvent(format!("body is not valid JSON: {}", e)))?;

        let value = match value.get("body") {
            Some(Value::String(inner)) if value.get("id").is_none() => {
                serde_json::from_str(inner).map_err(|e| {
                    SkillError::InvalidEvent(format!("envelope body is not valid JSON: {}", e))
                })?
            }
            _ => value,
        };

        serde_json::from_value(value).map_err(|e| SkillError::InvalidEvent(e.to_string()))
    }

    pub fn file_id(&self) -> &str {
        &self.source.id
    }

    pub fn read_token(&self) -> &str {
        &self.token.read.access_token
    }

    pub fn write_token(&self) -> &str {
        &self.token.write.access_token
    }
}

/// Box IDs are strings on the wire, but numeric IDs show up in hand-built events.
fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::String(s) => Ok(s),
        Value::Number(n) => Ok(n.to_string()),
        other => Err(serde::de::Error::custom(format!(
            "expected string or number id, got {}",
            other
        ))),
    }
}
