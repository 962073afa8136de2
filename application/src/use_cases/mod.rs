//! Use cases
//!
//! Application-level operations that orchestrate domain logic.

pub mod execute_turn;
pub mod run_discussion;
pub mod run_round;
pub mod summarize;
