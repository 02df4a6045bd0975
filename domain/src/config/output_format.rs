//! Output format value object

use serde::{Deserialize, Serialize};

/// How a finished session is rendered on the console
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Every stage value, selection and collaborator list
    Full,
    /// Only the plan summary (default)
    #[default]
    Summary,
    /// The artifact as JSON
    Json,
}
