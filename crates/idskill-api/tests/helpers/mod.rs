//! Test helpers: in-memory AssureID and Box doubles plus invocation fixtures.
//!
//! Run from workspace root: `cargo test -p idskill-api`.

pub mod fakes;

use axum::Router;
use axum_test::TestServer;
use idskill_api::setup::routes;
use idskill_api::{AppState, FailureReporting, SkillProcessor};
use idskill_core::{DocumentResult, SkillInvocation};
use serde_json::{json, Value};
use std::sync::Arc;

use fakes::{FakeVerifier, MemoryStore, MemoryStoreFactory};

pub const FILE_ID: &str = "42";
pub const READ_TOKEN: &str = "read-token";
pub const WRITE_TOKEN: &str = "write-token";

/// Invocation event as Box sends it
pub fn invocation_json() -> Value {
    json!({
        "type": "skill_invocation",
        "id": "inv-1",
        "skill": { "type": "skill", "id": "skill-9", "name": "AssureID" },
        "token": {
            "read": { "access_token": READ_TOKEN },
            "write": { "access_token": WRITE_TOKEN }
        },
        "source": { "type": "file", "id": FILE_ID, "name": "license.jpg" },
        "event": { "type": "FILE.UPLOADED" }
    })
}

pub fn invocation() -> SkillInvocation {
    serde_json::from_value(invocation_json()).unwrap()
}

/// A complete AssureID result for a California license
pub fn full_result() -> DocumentResult {
    serde_json::from_value(json!({
        "Classification": {
            "Type": {
                "ClassName": "Drivers License",
                "IssueType": "Driver License",
                "Name": "California (CA) Driver License",
                "IssuerName": "California",
                "IssuerCode": "CA"
            }
        },
        "Fields": [
            { "Name": "Control Number", "Value": "C-77" },
            { "Name": "Document Number", "Value": "D1234567" },
            { "Name": "Issue Date", "Value": "/Date(1609459200000)/" },
            { "Name": "Expiration Date", "Value": "/Date(1767225600000)/" },
            { "Name": "Given Name", "Value": "ALEX" },
            { "Name": "Surname", "Value": "SAMPLE" },
            { "Name": "Birth Date", "Value": "/Date(-151545600000)/" },
            { "Name": "Sex", "Value": "F" },
            { "Name": "Address", "Value": "1 MAIN ST" },
            { "Name": "Eye Color", "Value": "BRN" },
            { "Name": "Height", "Value": "5'-06\"" }
        ]
    }))
    .unwrap()
}

pub fn processor(
    verifier: &Arc<FakeVerifier>,
    store: &Arc<MemoryStore>,
    failure_reporting: FailureReporting,
) -> SkillProcessor {
    SkillProcessor::new(
        verifier.clone(),
        Arc::new(MemoryStoreFactory(store.clone())),
        failure_reporting,
    )
}

pub fn router(verifier: &Arc<FakeVerifier>, store: &Arc<MemoryStore>) -> Router {
    let state = AppState::new(processor(verifier, store, FailureReporting::ErrorCard), false);
    routes::setup_routes(Arc::new(state))
}

pub fn test_server(verifier: &Arc<FakeVerifier>, store: &Arc<MemoryStore>) -> TestServer {
    TestServer::new(router(verifier, store)).unwrap()
}
