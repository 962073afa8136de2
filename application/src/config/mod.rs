//! Application-level configuration.
//!
//! - [`DiscussionParams`] — round loop control (rounds, pacing, per-turn timeout)

pub mod discussion_params;

pub use discussion_params::DiscussionParams;
