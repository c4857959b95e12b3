//! SearchDeadFiles - Dead file detection for iOS projects
//!
//! This library finds Swift files, image assets and storyboards/XIBs that
//! nothing in the project appears to use, then grades each code candidate by
//! how safe it would be to delete.
//!
//! # Architecture
//!
//! The analysis pipeline consists of:
//! 1. **File Discovery** - Find .swift, .storyboard, .xib, .imageset and the project manifest
//! 2. **Pattern Extraction** - Pull imports, type names and resource literals out of each file
//! 3. **Graph Building** - Aggregate every mention into one immutable reference graph
//! 4. **Liveness Classification** - Manifest membership, references and naming conventions
//! 5. **Verification** - Re-scan the corpus per candidate and grade confidence
//! 6. **Reporting** - Terminal, JSON or Markdown output

pub mod analysis;
pub mod config;
pub mod diagnostics;
pub mod discovery;
pub mod graph;
pub mod parser;
pub mod report;
pub mod watch;

pub use analysis::{
    Confidence, DeadCandidate, DeadFileDetector, DeadReason, DetectionReport, VerificationRecord,
    VerificationReport,
};
pub use config::Config;
pub use diagnostics::{Diagnostic, DiagnosticKind};
pub use discovery::{FileFinder, FsTextSource, ProjectFiles, TextSource};
pub use report::{ReportFormat, Reporter};
