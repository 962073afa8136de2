//! Discussion observers for the terminal

pub mod live;
pub mod reporter;
