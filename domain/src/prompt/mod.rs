//! Prompt domain
//!
//! Builders for the per-turn prompts and the moderator synthesis prompt.

mod builder;
mod synthesis;

pub use builder::PromptBuilder;
pub use synthesis::SynthesisPrompt;
