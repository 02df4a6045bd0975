//! Output formatter trait

use huddle_domain::{OutputFormat, SessionArtifact};

/// Trait for formatting finished sessions
pub trait OutputFormatter {
    /// Format every stage value, selection and collaborator answer
    fn format(&self, artifact: &SessionArtifact) -> String;

    /// Format as JSON
    fn format_json(&self, artifact: &SessionArtifact) -> String;

    /// Format the selections and confirmation only
    fn format_summary(&self, artifact: &SessionArtifact) -> String;

    /// Dispatch on the configured format
    fn render(&self, artifact: &SessionArtifact, format: OutputFormat) -> String {
        match format {
            OutputFormat::Full => self.format(artifact),
            OutputFormat::Summary => self.format_summary(artifact),
            OutputFormat::Json => self.format_json(artifact),
        }
    }
}
