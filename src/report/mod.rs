mod candidates;
mod json;
mod markdown;
mod terminal;

pub use candidates::{
    format_candidates, parse_candidates, read_candidates, write_candidates, CandidateListError,
};
pub use json::JsonReporter;
pub use markdown::MarkdownReporter;
pub use terminal::TerminalReporter;

use crate::analysis::{DetectionReport, VerificationReport};
use miette::Result;
use std::path::PathBuf;

/// Output format for reports
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ReportFormat {
    #[default]
    Terminal,
    Json,
    Markdown,
}

impl std::str::FromStr for ReportFormat {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "terminal" | "text" => Ok(ReportFormat::Terminal),
            "json" => Ok(ReportFormat::Json),
            "markdown" | "md" => Ok(ReportFormat::Markdown),
            other => Err(format!("unknown report format '{}'", other)),
        }
    }
}

/// Reporter for outputting dead file analysis results
pub struct Reporter {
    format: ReportFormat,
    output_path: Option<PathBuf>,
    root: PathBuf,
}

impl Reporter {
    /// Paths in the output are shown relative to `root`
    pub fn new(format: ReportFormat, output_path: Option<PathBuf>, root: PathBuf) -> Self {
        Self {
            format,
            output_path,
            root,
        }
    }

    /// Report detection results, verification results, or both.
    /// A verification-only run passes `None` for detection.
    pub fn report(
        &self,
        detection: Option<&DetectionReport>,
        verification: Option<&VerificationReport>,
    ) -> Result<()> {
        match self.format {
            ReportFormat::Terminal => {
                TerminalReporter::new(self.root.clone()).report(detection, verification)
            }
            ReportFormat::Json => JsonReporter::new(self.output_path.clone(), self.root.clone())
                .report(detection, verification),
            ReportFormat::Markdown => {
                MarkdownReporter::new(self.output_path.clone(), self.root.clone())
                    .report(detection, verification)
            }
        }
    }
}
