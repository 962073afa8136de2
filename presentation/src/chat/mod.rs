//! Interactive chat module
//!
//! Provides a readline-based interactive chat interface: every question
//! typed at the prompt is discussed by the whole panel.

mod repl;

pub use repl::{ChatRepl, EXAMPLE_QUESTIONS, ReplCommand};
