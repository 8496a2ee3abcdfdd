//! idskill verification
//!
//! Client for the AssureID identity-document verification service, exposed
//! through the [`DocumentVerifier`] trait so the orchestrator can be driven by
//! test doubles.

pub mod assure_id;
pub mod error;
pub mod verifier;

pub use assure_id::AssureIdClient;
pub use error::{VerificationError, VerificationResult};
pub use verifier::DocumentVerifier;
