//! idskill storage
//!
//! Access to the files a skill is invoked on and to the skill-card metadata
//! attached to them. The orchestrator only sees the [`SkillFileReader`] /
//! [`SkillCardWriter`] capability pair; [`BoxStoreFactory`] builds the Box
//! implementation of both from the invocation's scoped access tokens.
//!
//! # Metadata instance
//!
//! Cards live in one instance of the `boxSkillsCards` template in the
//! `global` scope. Creating it when it already exists fails with
//! [`StorageError::Conflict`]; callers re-read and update instead.

pub mod box_client;
pub mod error;
pub mod factory;
pub mod traits;

// Re-export commonly used types
pub use box_client::BoxFileClient;
pub use error::{StorageError, StorageResult};
pub use factory::BoxStoreFactory;
pub use traits::{SkillCardWriter, SkillFileReader, SkillStoreFactory};
