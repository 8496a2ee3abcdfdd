//! Domain models

mod document;
mod invocation;
mod skill_card;

pub use document::{
    ClassificationType, DocumentClassification, DocumentField, DocumentInstanceId,
    DocumentResult, VerificationSubscription,
};
pub use invocation::{AccessToken, InvocationSource, InvocationTokens, SkillDescriptor, SkillInvocation};
pub use skill_card::{
    CardEntry, CardStatus, InvocationReference, MetadataTemplate, SkillCard, SkillCardTitle,
    SkillCardType, SkillReference, SKILLS_METADATA_SCOPE, SKILLS_METADATA_TEMPLATE,
};
