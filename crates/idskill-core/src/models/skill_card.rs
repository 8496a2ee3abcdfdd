//! Box skill cards and the `boxSkillsCards` metadata instance that holds them
//!
//! Cards written by other skills can sit on the same file. Properties this
//! crate does not model are kept in `extra` so they survive a read/update
//! cycle unchanged.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Metadata template key holding skill cards
pub const SKILLS_METADATA_TEMPLATE: &str = "boxSkillsCards";
/// Metadata scope of the skill cards template
pub const SKILLS_METADATA_SCOPE: &str = "global";

const SKILL_CARD: &str = "skill_card";
const TEXT_ENTRY: &str = "text";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SkillCardType {
    Transcript,
    Keyword,
    Timeline,
    Status,
    /// Card type introduced by another skill, kept verbatim
    #[serde(untagged)]
    Other(String),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkillCard {
    #[serde(rename = "type", default = "skill_card_kind")]
    pub kind: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub skill_card_type: Option<SkillCardType>,
    pub skill_card_title: SkillCardTitle,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub skill: Option<SkillReference>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub invocation: Option<InvocationReference>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub entries: Option<Vec<CardEntry>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<CardStatus>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

fn skill_card_kind() -> String {
    SKILL_CARD.to_string()
}

impl SkillCard {
    /// Transcript card listing text entries under a title
    pub fn transcript(
        title: impl Into<String>,
        skill_id: &str,
        invocation_id: &str,
        entries: Vec<CardEntry>,
    ) -> Self {
        Self {
            kind: skill_card_kind(),
            skill_card_type: Some(SkillCardType::Transcript),
            skill_card_title: SkillCardTitle::message(title),
            skill: Some(SkillReference::service(skill_id)),
            invocation: Some(InvocationReference::skill_invocation(invocation_id)),
            entries: Some(entries),
            status: None,
            extra: Map::new(),
        }
    }

    /// Status card shown in place of results
    pub fn status(skill_id: &str, invocation_id: &str, status: CardStatus) -> Self {
        Self {
            kind: skill_card_kind(),
            skill_card_type: Some(SkillCardType::Status),
            skill_card_title: SkillCardTitle {
                code: Some("skills_status".to_string()),
                message: "Status".to_string(),
            },
            skill: Some(SkillReference::service(skill_id)),
            invocation: Some(InvocationReference::skill_invocation(invocation_id)),
            entries: None,
            status: Some(status),
            extra: Map::new(),
        }
    }

    /// Title message, the key cards are matched on when merging
    pub fn title(&self) -> &str {
        &self.skill_card_title.message
    }

    pub fn is_status(&self) -> bool {
        self.skill_card_type == Some(SkillCardType::Status)
    }

    /// Id of the skill that wrote the card, when recorded
    pub fn skill_id(&self) -> Option<&str> {
        self.skill.as_ref().map(|skill| skill.id.as_str())
    }

    pub fn invocation_id(&self) -> Option<&str> {
        self.invocation
            .as_ref()
            .map(|invocation| invocation.id.as_str())
    }

    pub fn entries(&self) -> &[CardEntry] {
        self.entries.as_deref().unwrap_or_default()
    }

    /// Text of every entry, in order
    pub fn texts(&self) -> Vec<&str> {
        self.entries()
            .iter()
            .filter_map(|entry| entry.text.as_deref())
            .collect()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkillCardTitle {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
    #[serde(default)]
    pub message: String,
}

impl SkillCardTitle {
    pub fn message(message: impl Into<String>) -> Self {
        Self {
            code: None,
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkillReference {
    #[serde(rename = "type", default, skip_serializing_if = "String::is_empty")]
    pub kind: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub id: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl SkillReference {
    pub fn service(id: &str) -> Self {
        Self {
            kind: "service".to_string(),
            id: id.to_string(),
            extra: Map::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InvocationReference {
    #[serde(rename = "type", default, skip_serializing_if = "String::is_empty")]
    pub kind: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub id: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl InvocationReference {
    pub fn skill_invocation(id: &str) -> Self {
        Self {
            kind: "skill_invocation".to_string(),
            id: id.to_string(),
            extra: Map::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CardEntry {
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl CardEntry {
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            kind: Some(TEXT_ENTRY.to_string()),
            text: Some(text.into()),
            extra: Map::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CardStatus {
    pub code: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// Instance of the `boxSkillsCards` template on one file.
///
/// Platform bookkeeping fields (`$id`, `$version`, ...) are dropped on read
/// and never written.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MetadataTemplate {
    #[serde(default)]
    pub cards: Vec<SkillCard>,
}

impl MetadataTemplate {
    pub fn new(cards: Vec<SkillCard>) -> Self {
        Self { cards }
    }
}
