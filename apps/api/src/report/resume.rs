//! Resume Summarizer: free resume text in, `{name, experience, skills}` out.
//!
//! Only a placeholder exists today: it ignores its input and returns a fixed record.
//! It reports `Capability::Placeholder` so callers can flag its output.

use serde::{Deserialize, Serialize};

use crate::report::Capability;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResumeSummary {
    pub name: String,
    pub experience: String,
    pub skills: Vec<String>,
}

/// Pure, infallible resume summarizer.
pub trait ResumeSummarizer: Send + Sync {
    fn capability(&self) -> Capability;

    fn summarize(&self, resume_text: &str) -> ResumeSummary;
}

/// Fixed stand-in until a real resume parser is wired in.
pub struct PlaceholderResumeSummarizer;

impl ResumeSummarizer for PlaceholderResumeSummarizer {
    fn capability(&self) -> Capability {
        Capability::Placeholder
    }

    fn summarize(&self, _resume_text: &str) -> ResumeSummary {
        ResumeSummary {
            name: "Candidate Name".to_string(),
            experience: "3+ years".to_string(),
            skills: ["Python", "Node.js", "AWS"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
        }
    }
}
