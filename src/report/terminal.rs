use crate::analysis::{Confidence, DeadCandidate, DetectionReport, VerificationRecord, VerificationReport};
use crate::discovery::FileKind;
use crate::parser::ReferenceCategory;
use colored::Colorize;
use miette::Result;
use std::path::{Path, PathBuf};

/// Terminal reporter with colored output
pub struct TerminalReporter {
    /// Paths are printed relative to this directory
    root: PathBuf,
}

impl TerminalReporter {
    pub fn new(root: PathBuf) -> Self {
        Self { root }
    }

    pub fn report(
        &self,
        detection: Option<&DetectionReport>,
        verification: Option<&VerificationReport>,
    ) -> Result<()> {
        self.print_diagnostics(detection, verification);

        if let Some(detection) = detection {
            self.print_detection(detection);
        }

        if let Some(verification) = verification {
            self.print_verification(verification);
        }

        Ok(())
    }

    fn relative<'p>(&self, path: &'p Path) -> std::path::Display<'p> {
        path.strip_prefix(&self.root).unwrap_or(path).display()
    }

    fn print_diagnostics(
        &self,
        detection: Option<&DetectionReport>,
        verification: Option<&VerificationReport>,
    ) {
        let mut seen = Vec::new();
        let all = detection
            .into_iter()
            .flat_map(|d| d.diagnostics.iter())
            .chain(verification.into_iter().flat_map(|v| v.diagnostics.iter()));

        for diagnostic in all {
            if seen.contains(&diagnostic) {
                continue;
            }
            seen.push(diagnostic);
            println!(
                "{} [{}] {}",
                "warning".yellow().bold(),
                diagnostic.kind.as_str().dimmed(),
                diagnostic.message
            );
        }
        if !seen.is_empty() {
            println!();
        }
    }

    fn print_detection(&self, detection: &DetectionReport) {
        if detection.total_dead() == 0 {
            println!("{}", "No dead files found!".green().bold());
            return;
        }

        println!();
        println!(
            "{}",
            format!("Found {} potentially dead files:", detection.total_dead())
                .yellow()
                .bold()
        );
        println!();

        for (kind, title) in [
            (FileKind::Code, "Swift files"),
            (FileKind::Asset, "Image assets"),
            (FileKind::Layout, "Storyboards & XIBs"),
        ] {
            let items: Vec<&DeadCandidate> = detection
                .candidates
                .iter()
                .filter(|c| c.kind == kind)
                .collect();
            if items.is_empty() {
                continue;
            }

            println!("{}", format!("{} ({})", title, items.len()).cyan().bold());
            for item in items {
                self.print_candidate(item);
            }
            println!();
        }

        println!("{}", "─".repeat(60).dimmed());
        println!(
            "Summary: {} alive, {}",
            detection.alive_count.to_string().green(),
            format!(
                "{} dead ({} code, {} assets, {} layouts)",
                detection.total_dead(),
                detection.dead_code_units.len(),
                detection.dead_assets.len(),
                detection.dead_layouts.len()
            )
            .yellow()
        );
        println!();
    }

    fn print_candidate(&self, item: &DeadCandidate) {
        println!(
            "  {} [{}] {}",
            self.relative(&item.path),
            item.reason.code().dimmed(),
            item.message()
        );

        if !item.declared_types.is_empty() {
            println!(
                "    {} declares {}",
                "→".dimmed(),
                item.declared_types.join(", ").white()
            );
        }
    }

    fn print_verification(&self, verification: &VerificationReport) {
        println!("{}", "Verification".bold());
        println!();

        if verification.records.is_empty() {
            println!("{}", "No candidates to verify.".dimmed());
            return;
        }

        self.print_legend();

        for record in &verification.records {
            self.print_record(record);
        }

        println!("{}", "─".repeat(60).dimmed());
        println!("{}", "By Confidence:".dimmed());
        for grade in [
            Confidence::High,
            Confidence::Medium,
            Confidence::Low,
            Confidence::VeryLow,
        ] {
            let count = verification.count(grade);
            if count > 0 {
                println!(
                    "  {} {}",
                    confidence_indicator(grade),
                    format!("{} {} confidence", count, grade.label().to_lowercase()).color(color_of(grade))
                );
            }
        }
        println!();

        if verification.count(Confidence::VeryLow) + verification.count(Confidence::Low) > 0 {
            println!(
                "{}",
                "⚠ Low confidence files are referenced elsewhere; review before deleting".yellow()
            );
        }
        println!(
            "{}",
            "Tip: Use --min-confidence high to show only files with no references".dimmed()
        );
    }

    fn print_legend(&self) {
        println!("{}", "Confidence Legend:".dimmed());
        println!(
            "  {} {} {} {}",
            confidence_indicator(Confidence::High),
            "High".dimmed(),
            confidence_indicator(Confidence::Medium),
            "Medium".dimmed()
        );
        println!(
            "  {} {} {} {}",
            confidence_indicator(Confidence::Low),
            "Low".dimmed(),
            confidence_indicator(Confidence::VeryLow),
            "Very Low".dimmed()
        );
        println!();
    }

    fn print_record(&self, record: &VerificationRecord) {
        let build_badge = if record.in_build_phase {
            " [IN BUILD]".red().bold().to_string()
        } else {
            String::new()
        };

        println!(
            "  {} {} ({} refs){}",
            confidence_indicator(record.confidence),
            self.relative(&record.path).to_string().cyan(),
            record.total_references,
            build_badge
        );
        println!(
            "    {} {}",
            "→".dimmed(),
            record.recommendation().color(color_of(record.confidence))
        );

        for category in ReferenceCategory::ALL {
            let files = record.referenced_by(category);
            if files.is_empty() {
                continue;
            }
            let listed: Vec<String> = files
                .iter()
                .map(|f| self.relative(f).to_string())
                .collect();
            println!(
                "      {}: {}",
                category.display_name().dimmed(),
                listed.join(", ")
            );
        }
    }
}

fn confidence_indicator(confidence: Confidence) -> colored::ColoredString {
    match confidence {
        Confidence::High => "◉".bright_green(),
        Confidence::Medium => "○".yellow(),
        Confidence::Low => "◌".red(),
        Confidence::VeryLow => "✗".red().bold(),
    }
}

fn color_of(confidence: Confidence) -> colored::Color {
    match confidence {
        Confidence::High => colored::Color::BrightGreen,
        Confidence::Medium => colored::Color::Yellow,
        Confidence::Low => colored::Color::Red,
        Confidence::VeryLow => colored::Color::BrightRed,
    }
}
