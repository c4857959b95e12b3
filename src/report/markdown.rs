use crate::analysis::{Confidence, DetectionReport, VerificationRecord, VerificationReport};
use miette::{IntoDiagnostic, Result};
use std::path::{Path, PathBuf};

/// Markdown reporter, suitable for committing next to the project or pasting
/// into a pull request
pub struct MarkdownReporter {
    output_path: Option<PathBuf>,
    root: PathBuf,
}

impl MarkdownReporter {
    pub fn new(output_path: Option<PathBuf>, root: PathBuf) -> Self {
        Self { output_path, root }
    }

    pub fn report(
        &self,
        detection: Option<&DetectionReport>,
        verification: Option<&VerificationReport>,
    ) -> Result<()> {
        let markdown = self.render(detection, verification);

        if let Some(path) = &self.output_path {
            std::fs::write(path, &markdown).into_diagnostic()?;
            println!("Report written to: {}", path.display());
        } else {
            println!("{}", markdown);
        }

        Ok(())
    }

    pub fn render(
        &self,
        detection: Option<&DetectionReport>,
        verification: Option<&VerificationReport>,
    ) -> String {
        let mut out = String::new();
        if let Some(detection) = detection {
            self.render_detection(&mut out, detection);
        }
        if let Some(verification) = verification {
            self.render_verification(&mut out, verification);
        }
        out
    }

    fn relative(&self, path: &Path) -> String {
        path.strip_prefix(&self.root)
            .unwrap_or(path)
            .display()
            .to_string()
    }

    fn render_detection(&self, out: &mut String, detection: &DetectionReport) {
        line(out, "# Dead File Detection Report");
        out.push('\n');
        line(out, &format!("Project: `{}`", self.root.display()));
        out.push('\n');

        line(out, "## Summary");
        line(out, &format!("- **Alive files**: {}", detection.alive_count));
        line(out, &format!("- **Potentially dead files**: {}", detection.total_dead()));
        line(out, &format!("- **Dead Swift files**: {}", detection.dead_code_units.len()));
        line(out, &format!("- **Unused assets**: {}", detection.dead_assets.len()));
        line(out, &format!("- **Orphaned layouts**: {}", detection.dead_layouts.len()));
        out.push('\n');

        if !detection.diagnostics.is_empty() {
            line(out, "## Warnings");
            for diagnostic in &detection.diagnostics {
                line(out, &format!("- `{}`: {}", diagnostic.kind, diagnostic.message));
            }
            out.push('\n');
        }

        self.render_list(
            out,
            "## Potentially Dead Swift Files",
            "Not declared in the project, or never referenced by name:",
            &detection.dead_code_units,
        );
        self.render_list(
            out,
            "## Potentially Unused Assets",
            "Never loaded by name from code:",
            &detection.dead_assets,
        );
        self.render_list(
            out,
            "## Potentially Orphaned Storyboards & XIBs",
            "Never instantiated by name from code:",
            &detection.dead_layouts,
        );

        line(out, "## Notes");
        line(out, "- Results are heuristic; review every file before removing it.");
        line(out, "- Files loaded by reflection, Interface Builder or string lookups may be missed.");
        out.push('\n');
    }

    fn render_list(&self, out: &mut String, heading: &str, caption: &str, paths: &[PathBuf]) {
        if paths.is_empty() {
            return;
        }
        line(out, heading);
        line(out, &format!("*{}*", caption));
        out.push('\n');
        for path in paths {
            line(out, &format!("- `{}`", self.relative(path)));
        }
        out.push('\n');
    }

    fn render_verification(&self, out: &mut String, verification: &VerificationReport) {
        line(out, "# Dead File Verification Report");
        out.push('\n');

        let sections = [
            (Confidence::High, "High Confidence - Safe to Delete"),
            (Confidence::Medium, "Medium Confidence - Review Recommended"),
            (Confidence::Low, "Low Confidence - Caution Advised"),
            (Confidence::VeryLow, "Very Low Confidence - Do Not Delete"),
        ];

        for (grade, title) in sections {
            let records: Vec<&VerificationRecord> = verification
                .records
                .iter()
                .filter(|r| r.confidence == grade)
                .collect();
            if records.is_empty() {
                continue;
            }

            line(out, &format!("## {}", title));
            out.push('\n');
            for record in records {
                line(out, &format!("- {}", self.record_line(record)));
            }
            out.push('\n');
        }
    }

    fn record_line(&self, record: &VerificationRecord) -> String {
        let path = self.relative(&record.path);
        match record.confidence {
            Confidence::High => format!("`{}` - {}", path, record.recommendation()),
            Confidence::Low => {
                let status = if record.in_build_phase { "In build" } else { "Not in build" };
                format!(
                    "`{}` - {} references ({}) - {}",
                    path,
                    record.total_references,
                    status,
                    record.recommendation()
                )
            }
            Confidence::Medium | Confidence::VeryLow => format!(
                "`{}` - {} references - {}",
                path,
                record.total_references,
                record.recommendation()
            ),
        }
    }
}

fn line(out: &mut String, text: &str) {
    out.push_str(text);
    out.push('\n');
}
