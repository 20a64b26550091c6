// Interview scoring: transcript -> {score, feedback} via the LLM client.
// LLM replies are verified against a strict schema; violations degrade to a null score.

pub mod handlers;
pub mod prompts;
pub mod scorer;
