//! Core domain concepts shared across all subdomains.
//!
//! - [`participant::ParticipantId`] / [`participant::Roster`] — who speaks, in which order
//! - [`question::Question`] — the validated question put to the roundtable
//! - [`error::DomainError`] — domain-level errors

pub mod error;
pub mod participant;
pub mod question;
pub mod string;
