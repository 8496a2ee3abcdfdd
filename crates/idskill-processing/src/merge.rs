//! Combining new cards with the ones already on a file

use idskill_core::{CardStatus, SkillCard, SkillInvocation};

/// Status code Box shows as a failed invocation
pub const INVOCATION_ERROR_CODE: &str = "skills_invocations_error";

/// Replace cards that share a title with one of `new`, then append `new`.
///
/// Cards with other titles keep their relative order. When `new` holds
/// results rather than a status, status cards left by the same skill are
/// dropped so an earlier failure is not shown next to them.
pub fn merge_cards(existing: Vec<SkillCard>, new: &[SkillCard]) -> Vec<SkillCard> {
    let mut merged = existing;
    if !new.is_empty() && !new.iter().any(SkillCard::is_status) {
        merged.retain(|current| {
            !(current.is_status()
                && current.skill_id().is_some()
                && new.iter().any(|card| card.skill_id() == current.skill_id()))
        });
    }
    for card in new {
        merged.retain(|current| current.title() != card.title());
        merged.push(card.clone());
    }
    merged
}

/// Status card reporting a failed invocation
pub fn error_card(invocation: &SkillInvocation, message: impl Into<String>) -> SkillCard {
    SkillCard::status(
        &invocation.skill.id,
        &invocation.id,
        CardStatus {
            code: INVOCATION_ERROR_CODE.to_string(),
            message: Some(message.into()),
        },
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use idskill_core::CardEntry;
    use serde_json::json;

    fn card(title: &str, text: &str) -> SkillCard {
        SkillCard::transcript(title, "skill", "inv", vec![CardEntry::text(text)])
    }

    #[test]
    fn test_same_title_replaced_others_kept() {
        let existing = vec![
            card("Faces", "face"),
            card("ID Metadata", "old"),
            card("Topics", "topic"),
        ];
        let new = vec![card("ID Metadata", "new"), card("ID Holder Metadata", "holder")];

        let merged = merge_cards(existing, &new);

        let summary: Vec<_> = merged.iter().map(|c| (c.title(), c.texts()[0])).collect();
        assert_eq!(
            summary,
            vec![
                ("Faces", "face"),
                ("Topics", "topic"),
                ("ID Metadata", "new"),
                ("ID Holder Metadata", "holder"),
            ]
        );
    }

    #[test]
    fn test_duplicate_existing_titles_all_removed() {
        let existing = vec![card("ID Metadata", "a"), card("ID Metadata", "b")];

        let merged = merge_cards(existing, &[card("ID Metadata", "c")]);

        assert_eq!(merged.len(), 1);
        assert_eq!(merged[0].texts(), vec!["c"]);
    }

    #[test]
    fn test_results_clear_own_status_card() {
        let failed = CardStatus {
            code: INVOCATION_ERROR_CODE.to_string(),
            message: None,
        };
        let existing = vec![
            SkillCard::status("skill", "inv-0", failed.clone()),
            SkillCard::status("other-skill", "inv-x", failed),
            card("Faces", "face"),
        ];

        let merged = merge_cards(existing, &[card("ID Metadata", "new")]);

        let summary: Vec<_> = merged
            .iter()
            .map(|c| (c.title(), c.skill_id()))
            .collect();
        assert_eq!(
            summary,
            vec![
                ("Status", Some("other-skill")),
                ("Faces", Some("skill")),
                ("ID Metadata", Some("skill")),
            ]
        );
    }

    #[test]
    fn test_merge_into_empty() {
        let new = vec![card("A", "1"), card("B", "2")];
        assert_eq!(merge_cards(Vec::new(), &new), new);
    }

    #[test]
    fn test_error_card() {
        let invocation: SkillInvocation = serde_json::from_value(json!({
            "id": "inv-3",
            "skill": { "id": "skill-9" },
            "token": {
                "read": { "access_token": "r" },
                "write": { "access_token": "w" }
            },
            "source": { "id": "42" }
        }))
        .unwrap();

        let card = error_card(&invocation, "AssureID subscription is not active");
        let value = serde_json::to_value(&card).unwrap();

        assert_eq!(value["skill_card_type"], json!("status"));
        assert_eq!(value["skill_card_title"]["message"], json!("Status"));
        assert_eq!(value["status"]["code"], json!(INVOCATION_ERROR_CODE));
        assert_eq!(
            value["status"]["message"],
            json!("AssureID subscription is not active")
        );
        assert_eq!(value["invocation"]["id"], json!("inv-3"));
    }
}
