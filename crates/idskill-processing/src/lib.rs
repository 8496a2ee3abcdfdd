//! idskill processing
//!
//! Pure transformations from AssureID document results to Box skill cards,
//! and the merge rules applied when cards already exist on a file.

pub mod cards;
pub mod dates;
pub mod merge;

pub use cards::{build_skill_cards, SkillCards, DOCUMENT_TITLE, HOLDER_TITLE, ISSUER_TITLE};
pub use dates::parse_epoch_date;
pub use merge::{error_card, merge_cards, INVOCATION_ERROR_CODE};
