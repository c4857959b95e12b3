mod loader;
mod rules;

pub use loader::{glob_match, Config, ProjectConfig, ReportConfig};
pub use rules::RuleSet;
