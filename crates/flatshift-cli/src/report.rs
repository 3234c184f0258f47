use flatshift_core::{MigrationOutcome, MigrationPhase};

use crate::render::{render_status_line, OutputStyle};

#[derive(Debug, Default)]
pub struct ReportAggregator {
    outcomes: Vec<MigrationOutcome>,
}

impl ReportAggregator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, outcome: MigrationOutcome) {
        self.outcomes.push(outcome);
    }

    pub fn outcomes(&self) -> &[MigrationOutcome] {
        &self.outcomes
    }

    pub fn render_lines(&self, style: OutputStyle) -> Vec<String> {
        let mut lines = Vec::new();
        self.render_bucket(
            &mut lines,
            style,
            "Installed",
            "ok",
            &[MigrationPhase::InstalledTarget],
        );
        self.render_bucket(
            &mut lines,
            style,
            "Removed",
            "ok",
            &[MigrationPhase::RemovedLegacy],
        );
        self.render_bucket(
            &mut lines,
            style,
            "Other",
            "step",
            &[MigrationPhase::AlreadyPresent, MigrationPhase::Skipped],
        );
        self.render_bucket(&mut lines, style, "Failed", "err", &[MigrationPhase::Failed]);
        if lines.is_empty() {
            lines.push("nothing to report".to_string());
        }
        lines
    }

    fn render_bucket(
        &self,
        lines: &mut Vec<String>,
        style: OutputStyle,
        title: &str,
        status: &str,
        phases: &[MigrationPhase],
    ) {
        let selected = self
            .outcomes
            .iter()
            .filter(|outcome| phases.contains(&outcome.phase))
            .collect::<Vec<_>>();
        if selected.is_empty() {
            return;
        }

        lines.push(format!("{title}:"));
        for outcome in selected {
            lines.push(render_status_line(
                style,
                status,
                &format!("  {}: {}", outcome.display_name, outcome.detail),
            ));
        }
    }
}
