//! Skill cards built from an AssureID document result

use serde_json::Value;

use idskill_core::{CardEntry, DocumentResult, SkillCard, SkillInvocation};

use crate::dates::parse_epoch_date;

pub const ISSUER_TITLE: &str = "ID Issuer Metadata";
pub const DOCUMENT_TITLE: &str = "ID Metadata";
pub const HOLDER_TITLE: &str = "ID Holder Metadata";

#[derive(Debug, Clone, Copy)]
enum FieldFormat {
    Text,
    Date,
}

/// Document field name, card label, value format
type FieldMapping = (&'static str, &'static str, FieldFormat);

const DOCUMENT_FIELDS: &[FieldMapping] = &[
    ("Control Number", "Control Number", FieldFormat::Text),
    ("Document Number", "Document Number", FieldFormat::Text),
    ("Issue Date", "Issue Date", FieldFormat::Date),
    ("Expiration Date", "Expiration Date", FieldFormat::Date),
];

const HOLDER_FIELDS: &[FieldMapping] = &[
    ("Given Name", "First Name", FieldFormat::Text),
    ("Surname", "Last Name", FieldFormat::Text),
    ("Birth Date", "Birth Date", FieldFormat::Date),
    ("Sex", "Gender", FieldFormat::Text),
    ("Address", "Address", FieldFormat::Text),
    ("Eye Color", "Eye Color", FieldFormat::Text),
    ("Height", "Height", FieldFormat::Text),
];

/// The three transcript cards written for one document
#[derive(Debug, Clone, PartialEq)]
pub struct SkillCards {
    pub issuer: SkillCard,
    pub document: SkillCard,
    pub holder: SkillCard,
}

impl SkillCards {
    /// Cards in write order: issuer, document, holder
    pub fn into_vec(self) -> Vec<SkillCard> {
        vec![self.issuer, self.document, self.holder]
    }
}

/// Build the issuer, document and holder cards for `result`.
///
/// Absent values are left out rather than defaulted, so any card may end up
/// with no entries.
pub fn build_skill_cards(invocation: &SkillInvocation, result: &DocumentResult) -> SkillCards {
    let card = |title: &str, entries: Vec<CardEntry>| {
        SkillCard::transcript(title, &invocation.skill.id, &invocation.id, entries)
    };

    SkillCards {
        issuer: card(ISSUER_TITLE, issuer_entries(result)),
        document: card(DOCUMENT_TITLE, field_entries(result, DOCUMENT_FIELDS)),
        holder: card(HOLDER_TITLE, field_entries(result, HOLDER_FIELDS)),
    }
}

fn issuer_entries(result: &DocumentResult) -> Vec<CardEntry> {
    let Some(issuer) = result.classification_type() else {
        return Vec::new();
    };

    [
        ("ID Class", &issuer.class_name),
        ("ID Type", &issuer.issue_type),
        ("ID Name", &issuer.name),
        ("Issuer Name", &issuer.issuer_name),
        ("Issuer Code", &issuer.issuer_code),
    ]
    .into_iter()
    .filter_map(|(label, value)| {
        value
            .as_ref()
            .filter(|value| is_present(value))
            .map(|value| entry(label, &render(value)))
    })
    .collect()
}

fn field_entries(result: &DocumentResult, mappings: &[FieldMapping]) -> Vec<CardEntry> {
    mappings
        .iter()
        .filter_map(|&(name, label, format)| {
            let field = result.field(name)?;
            if field.value.is_null() {
                return None;
            }

            let text = render(&field.value);
            match format {
                FieldFormat::Text => Some(entry(label, &text)),
                FieldFormat::Date => match parse_epoch_date(&text) {
                    Some(date) => Some(entry(label, &date)),
                    None => {
                        tracing::warn!(field = name, value = %text, "Skipping unparseable date field");
                        None
                    }
                },
            }
        })
        .collect()
}

fn entry(label: &str, value: &str) -> CardEntry {
    CardEntry::text(format!("{}: {}", label, value))
}

/// Classification values count only when they carry something: null, empty
/// strings, `false` and zero are skipped.
fn is_present(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(flag) => *flag,
        Value::Number(number) => number.as_f64().is_some_and(|n| n != 0.0),
        Value::String(text) => !text.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

fn render(value: &Value) -> String {
    match value {
        Value::String(text) => text.clone(),
        other => other.to_string(),
    }
}
