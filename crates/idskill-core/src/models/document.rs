//! AssureID document models
//!
//! Wire names are PascalCase as returned by the AssureID REST service. Only
//! the parts the skill reads are modelled; everything else is ignored.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt::{Display, Formatter, Result as FmtResult};

/// Entry of `GET /AssureIDService/Subscriptions`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct VerificationSubscription {
    pub id: String,
    #[serde(default)]
    pub is_active: bool,
}

/// Opaque ID of a server-side document instance
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DocumentInstanceId(String);

impl DocumentInstanceId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for DocumentInstanceId {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str(&self.0)
    }
}

impl From<String> for DocumentInstanceId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

/// Result of `GET /AssureIDService/Document/{id}`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct DocumentResult {
    #[serde(default)]
    pub classification: Option<DocumentClassification>,
    #[serde(default)]
    pub fields: Option<Vec<DocumentField>>,
}

impl DocumentResult {
    pub fn fields(&self) -> &[DocumentField] {
        self.fields.as_deref().unwrap_or_default()
    }

    /// First field whose name matches exactly (case-sensitive)
    pub fn field(&self, name: &str) -> Option<&DocumentField> {
        self.fields().iter().find(|field| field.name == name)
    }

    pub fn classification_type(&self) -> Option<&ClassificationType> {
        self.classification
            .as_ref()
            .and_then(|c| c.document_type.as_ref())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DocumentClassification {
    #[serde(rename = "Type", default)]
    pub document_type: Option<ClassificationType>,
}

/// Issuer attributes of the classified document.
///
/// Values are kept as raw JSON because AssureID mixes strings and numbers here.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ClassificationType {
    #[serde(default)]
    pub class_name: Option<Value>,
    #[serde(default)]
    pub issue_type: Option<Value>,
    #[serde(default)]
    pub name: Option<Value>,
    #[serde(default)]
    pub issuer_name: Option<Value>,
    #[serde(default)]
    pub issuer_code: Option<Value>,
}

/// One named data field extracted from the document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct DocumentField {
    pub name: String,
    #[serde(default)]
    pub value: Value,
}
