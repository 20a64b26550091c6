//! Candidate report summaries. No persistence exists yet, so the list is a fixed
//! placeholder and carries `Capability::Placeholder`.

use serde::Serialize;

use crate::report::Capability;

pub const CANDIDATES_CAPABILITY: Capability = Capability::Placeholder;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CandidateSummary {
    pub id: String,
    pub name: String,
    pub score: u32,
}

impl CandidateSummary {
    fn new(id: &str, name: &str, score: u32) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            score,
        }
    }
}

// TODO: replace with a query once candidate reports are persisted.
pub fn list_candidate_summaries() -> Vec<CandidateSummary> {
    vec![
        CandidateSummary::new("abc123", "Alice Johnson", 88),
        CandidateSummary::new("xyz789", "Bob Smith", 75),
    ]
}
