//! Infrastructure layer for roundtable
//!
//! This crate contains adapters that implement the ports defined
//! in the application layer, including configuration file loading.

pub mod config;
pub mod logging;
pub mod responders;

// Re-export commonly used types
pub use config::{
    ConfigLoader, FileConfig, FileDiscussionConfig, FileLoggingConfig, FileOutputConfig,
    FileOutputFormat, FileParticipantConfig, FileProviderConfig, FileReplConfig,
    FileSummaryMode,
};
pub use logging::JsonlConversationLogger;
pub use responders::{
    ChatCompletionsResponder, MODERATOR_NAME, OfflineResponder, ResponderFactory,
    ResponderSetupError,
};
