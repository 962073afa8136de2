//! Output formatting for finished (or failed) discussions

pub mod console;
