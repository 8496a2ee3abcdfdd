//! idskill core library
//!
//! Configuration, error types and the domain models shared by every idskill
//! crate: the skill invocation event, AssureID verification results and the
//! Box skill cards written back to files.

pub mod config;
pub mod error;
pub mod models;

// Re-export commonly used types
pub use config::{AssureIdConfig, Config, LogFormat};
pub use error::{BoxError, LogLevel, SkillError};
pub use models::{
    AccessToken, CardEntry, CardStatus, ClassificationType, DocumentClassification,
    DocumentField, DocumentInstanceId, DocumentResult, InvocationReference, InvocationSource,
    InvocationTokens, MetadataTemplate, SkillCard, SkillCardTitle, SkillCardType,
    SkillDescriptor, SkillInvocation, SkillReference, VerificationSubscription,
    SKILLS_METADATA_SCOPE, SKILLS_METADATA_TEMPLATE,
};
