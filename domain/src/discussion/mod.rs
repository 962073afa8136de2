//! Discussion domain.
//!
//! - [`turn::Turn`] — one speaker's contribution in one round
//! - [`transcript::Transcript`] — append-only ordered history of turns
//! - [`session::Session`] — a whole roundtable, from question to summary

pub mod session;
pub mod transcript;
pub mod turn;
