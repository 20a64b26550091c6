// Final candidate report: resume summary + emotion distribution + interview score.
// Resume parsing and the candidate list are placeholders until a parser and a store exist.

use axum::http::{HeaderName, HeaderValue};
use serde::Serialize;

pub mod aggregator;
pub mod candidates;
pub mod handlers;
pub mod resume;

/// Response header naming the sections of a body that hold placeholder data.
pub const PLACEHOLDER_HEADER: HeaderName = HeaderName::from_static("x-placeholder-data");

/// Whether a component produces real data or a fixed stand-in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Capability {
    Implemented,
    Placeholder,
}

/// Header value listing placeholder sections, or `None` when every section is real.
pub fn placeholder_marker(sections: &[(&str, Capability)]) -> Option<HeaderValue> {
    let names: Vec<&str> = sections
        .iter()
        .filter(|(_, capability)| *capability == Capability::Placeholder)
        .map(|(name, _)| *name)
        .collect();

    if names.is_empty() {
        None
    } else {
        HeaderValue::from_str(&names.join(",")).ok()
    }
}
