//! Output format value object

use serde::{Deserialize, Serialize};

/// How a finished discussion is printed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Full transcript grouped by round, followed by the summary
    Full,
    /// Only the final summary (default)
    #[default]
    Summary,
    /// JSON output
    Json,
}
