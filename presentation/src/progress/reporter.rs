//! Progress reporting while a session runs

use colored::Colorize;
use huddle_application::ports::progress::StageProgressNotifier;
use huddle_domain::{Participant, ResolvedValue, StageId};
use indicatif::{MultiProgress, ProgressBar, ProgressStyle};
use std::sync::Mutex;

/// Reports progress with one bar per stage and one for the connection wait
pub struct ProgressReporter {
    multi: MultiProgress,
    stage_bar: Mutex<Option<ProgressBar>>,
    quorum_bar: Mutex<Option<ProgressBar>>,
}

impl ProgressReporter {
    pub fn new() -> Self {
        Self {
            multi: MultiProgress::new(),
            stage_bar: Mutex::new(None),
            quorum_bar: Mutex::new(None),
        }
    }

    fn bar_style() -> ProgressStyle {
        ProgressStyle::default_bar()
            .template("{spinner:.green} {prefix:.bold.cyan} [{bar:30.cyan/blue}] {pos}/{len} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("=>-")
    }

    fn stage_title(stage: &StageId, index: usize, total: usize) -> String {
        format!("Stage {}/{}: {}", index + 1, total, stage)
    }
}

impl Default for ProgressReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl StageProgressNotifier for ProgressReporter {
    fn on_stage_start(&self, stage: &StageId, index: usize, total: usize) {
        let pb = self.multi.add(ProgressBar::new(0));
        pb.set_style(Self::bar_style());
        pb.set_prefix(Self::stage_title(stage, index, total));
        pb.set_message("Waiting for replies...");

        let mut slot = self.stage_bar.lock().unwrap_or_else(|e| e.into_inner());
        if let Some(previous) = slot.replace(pb) {
            previous.finish_and_clear();
        }
    }

    fn on_response(&self, participant: &Participant, received: usize, expected: usize) {
        if let Some(pb) = self
            .stage_bar
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .as_ref()
        {
            pb.set_length(expected as u64);
            pb.set_position(received as u64);
            pb.set_message(format!("{} {}", "v".green(), participant));
        }
    }

    fn on_stage_complete(&self, _stage: &StageId, value: &ResolvedValue) {
        if let Some(pb) = self
            .stage_bar
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .take()
        {
            let suffix = if value.is_default() { " (default)" } else { "" };
            pb.finish_with_message(format!("{}{}", value.to_string().green(), suffix));
        }
    }

    fn on_quorum_progress(&self, connected: usize, required: usize, total: usize) {
        let mut slot = self.quorum_bar.lock().unwrap_or_else(|e| e.into_inner());
        let pb = slot.get_or_insert_with(|| {
            let pb = self.multi.add(ProgressBar::new(total as u64));
            pb.set_style(Self::bar_style());
            pb.set_prefix("Connecting");
            pb
        });

        pb.set_position(connected as u64);
        if connected >= required {
            pb.finish_with_message(format!("{}", "quorum reached".green()));
        } else {
            pb.set_message(format!("{} needed", required));
        }
    }
}

/// Simple text-based progress (no fancy UI)
pub struct SimpleProgress;

impl StageProgressNotifier for SimpleProgress {
    fn on_stage_start(&self, stage: &StageId, index: usize, total: usize) {
        println!(
            "{} {}",
            "->".cyan(),
            ProgressReporter::stage_title(stage, index, total).bold()
        );
    }

    fn on_response(&self, participant: &Participant, received: usize, expected: usize) {
        println!("  {} {} ({}/{})", "v".green(), participant, received, expected);
    }

    fn on_stage_complete(&self, _stage: &StageId, value: &ResolvedValue) {
        println!("  = {}", value);
        println!();
    }

    fn on_quorum_progress(&self, connected: usize, required: usize, total: usize) {
        println!(
            "{} {}/{} connected ({} needed)",
            "->".cyan(),
            connected,
            total,
            required
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stage_title_is_one_based() {
        assert_eq!(
            ProgressReporter::stage_title(&StageId::new("budget"), 1, 5),
            "Stage 2/5: budget"
        );
    }

    #[test]
    fn test_bar_lifecycle_without_a_terminal() {
        let reporter = ProgressReporter::new();
        let stage = StageId::new("budget");

        reporter.on_stage_start(&stage, 0, 1);
        reporter.on_response(&Participant::new("alice"), 1, 2);
        reporter.on_stage_complete(
            &stage,
            &ResolvedValue::Budget {
                tier: huddle_domain::BudgetTier::Low,
            },
        );
        reporter.on_quorum_progress(1, 2, 3);
        reporter.on_quorum_progress(2, 2, 3);

        assert!(reporter.stage_bar.lock().unwrap().is_none());
        assert!(reporter.quorum_bar.lock().unwrap().as_ref().unwrap().is_finished());
    }
}
