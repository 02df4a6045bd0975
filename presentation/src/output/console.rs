//! Console output formatter for finished sessions

use crate::output::formatter::OutputFormatter;
use colored::Colorize;
use huddle_domain::{QuorumWait, Recommendation, SessionArtifact};

/// Formats session results for console display
pub struct ConsoleFormatter;

impl ConsoleFormatter {
    /// Turn ANSI colors off for the rest of the process
    pub fn disable_color() {
        colored::control::set_override(false);
    }

    /// Format the complete session
    pub fn format(artifact: &SessionArtifact) -> String {
        let mut output = String::new();

        output.push_str(&Self::header(&format!("Outing plan for {}", artifact.city)));
        output.push('\n');

        output.push_str(&format!(
            "{} {}\n",
            "Group:".cyan().bold(),
            artifact.roster
        ));

        // Stage values
        output.push_str(&Self::section_header("Decisions"));
        for (stage, value) in &artifact.accumulated {
            let line = format!("  {:<12} {}", format!("{}:", stage), value);
            if value.is_default() {
                output.push_str(&format!("{} {}\n", line, "(default)".dimmed()));
            } else {
                output.push_str(&format!("{}\n", line));
            }
        }

        if !artifact.selections.is_empty() {
            output.push_str(&Self::section_header("Selections"));
            for (stage, selection) in &artifact.selections {
                output.push_str(&format!(
                    "  {:<12} {}\n",
                    format!("{}:", stage),
                    selection.label().green()
                ));
            }
        }

        // Every collaborator answer, best entry marked
        for (kind, recommendations) in &artifact.plans {
            output.push_str(&Self::section_header(&format!("Suggested {}", kind)));
            if recommendations.is_empty() {
                output.push_str(&format!("  {}\n", "(none)".dimmed()));
            }
            for recommendation in recommendations {
                output.push_str(&Self::recommendation_line(recommendation));
            }
        }

        if let Some(cost) = artifact.estimated_cost_per_person() {
            output.push_str(&format!(
                "\n{} ~${:.0} per person\n",
                "Estimated cost:".cyan().bold(),
                cost
            ));
        }
        output.push_str(&format!("\n{}\n", Self::confirmation_line(artifact)));

        output.push_str(&Self::footer());

        output
    }

    /// Format as JSON
    pub fn format_json(artifact: &SessionArtifact) -> String {
        serde_json::to_string_pretty(artifact).unwrap_or_else(|_| "{}".to_string())
    }

    /// Format selections only (concise output)
    pub fn format_summary(artifact: &SessionArtifact) -> String {
        let mut output = String::new();

        output.push_str(&format!(
            "{}\n\n",
            format!("=== Plan for {} ===", artifact.city).cyan().bold()
        ));

        for (stage, selection) in &artifact.selections {
            output.push_str(&format!("{} {}\n", format!("{}:", stage).bold(), selection.label()));
        }
        if let Some(cost) = artifact.estimated_cost_per_person() {
            output.push_str(&format!("{} ~${:.0} per person\n", "Cost:".dimmed(), cost));
        }

        output.push('\n');
        output.push_str(&Self::confirmation_line(artifact));
        output.push('\n');

        output
    }

    /// One line describing how a connection quorum wait ended
    pub fn format_quorum(wait: &QuorumWait) -> String {
        let status = format!(
            "{} ({}/{} required)",
            wait.outcome,
            wait.connected_count(),
            wait.required
        );
        let names: Vec<&str> = wait
            .connected
            .iter()
            .map(|record| record.participant.as_str())
            .collect();

        let status = if wait.outcome.is_reached() {
            status.green().to_string()
        } else {
            status.yellow().to_string()
        };
        if names.is_empty() {
            status
        } else {
            format!("{}: {}", status, names.join(", "))
        }
    }

    fn recommendation_line(recommendation: &Recommendation) -> String {
        if recommendation.best {
            format!("  {} {}\n", "*".yellow().bold(), recommendation.label().bold())
        } else {
            format!("    {}\n", recommendation.label())
        }
    }

    fn confirmation_line(artifact: &SessionArtifact) -> String {
        match artifact.confirmed {
            Some(true) => "Confirmed by the group".green().bold().to_string(),
            Some(false) => "Not confirmed".red().bold().to_string(),
            None => "No confirmation stage".dimmed().to_string(),
        }
    }

    fn header(title: &str) -> String {
        let line = "=".repeat(60);
        format!("{}\n{:^60}\n{}", line.cyan(), title.bold(), line.cyan())
    }

    fn section_header(title: &str) -> String {
        format!("\n{}\n{}\n", title.cyan().bold(), "-".repeat(40))
    }

    fn footer() -> String {
        format!("\n{}\n", "=".repeat(60).cyan())
    }
}

impl OutputFormatter for ConsoleFormatter {
    fn format(&self, artifact: &SessionArtifact) -> String {
        Self::format(artifact)
    }

    fn format_json(&self, artifact: &SessionArtifact) -> String {
        Self::format_json(artifact)
    }

    fn format_summary(&self, artifact: &SessionArtifact) -> String {
        Self::format_summary(artifact)
    }
}
