use super::RuleSet;
use miette::{IntoDiagnostic, Result, WrapErr};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Configuration for SearchDeadFiles analysis
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Target directories to analyze, relative to the project root
    pub targets: Vec<PathBuf>,

    /// Path patterns excluded from discovery
    pub exclude: Vec<String>,

    /// Name patterns that are never reported as dead
    pub retain_patterns: Vec<String>,

    /// Explicit manifest path (otherwise the first `*.xcodeproj/project.pbxproj`)
    pub manifest: Option<PathBuf>,

    /// File kinds that make up the project
    pub project: ProjectConfig,

    /// Heuristic vocabulary
    pub rules: RuleSet,

    /// Report configuration
    pub report: ReportConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectConfig {
    /// Extension of code units
    pub code_extension: String,

    /// Directory extensions of asset bundles
    pub asset_extensions: Vec<String>,

    /// Extensions of layout documents
    pub layout_extensions: Vec<String>,

    /// File name of the build manifest inside the project bundle
    pub manifest_file_name: String,

    /// Extension of the project bundle directory holding the manifest
    pub manifest_bundle_extension: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ReportConfig {
    /// Output format: terminal, json, markdown
    pub format: String,

    /// Lowest verification grade to report: very-low, low, medium, high
    pub min_confidence: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            targets: vec![],
            exclude: vec![
                "**/Pods/**".to_string(),
                "**/Carthage/**".to_string(),
                "**/build/**".to_string(),
                "**/DerivedData/**".to_string(),
            ],
            retain_patterns: vec![],
            manifest: None,
            project: ProjectConfig::default(),
            rules: RuleSet::default(),
            report: ReportConfig::default(),
        }
    }
}

impl Default for ProjectConfig {
    fn default() -> Self {
        Self {
            code_extension: "swift".to_string(),
            asset_extensions: vec!["imageset".to_string()],
            layout_extensions: vec!["storyboard".to_string(), "xib".to_string()],
            manifest_file_name: "project.pbxproj".to_string(),
            manifest_bundle_extension: "xcodeproj".to_string(),
        }
    }
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            format: "terminal".to_string(),
            min_confidence: "very-low".to_string(),
        }
    }
}

impl Config {
    /// Load configuration from a file (YAML or TOML)
    pub fn from_file(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .into_diagnostic()
            .wrap_err_with(|| format!("Failed to read config file: {}", path.display()))?;

        let extension = path.extension().and_then(|e| e.to_str()).unwrap_or("");

        match extension {
            "yml" | "yaml" => serde_yaml::from_str(&contents)
                .into_diagnostic()
                .wrap_err("Failed to parse YAML config"),
            "toml" => toml::from_str(&contents)
                .into_diagnostic()
                .wrap_err("Failed to parse TOML config"),
            _ => {
                if let Ok(config) = serde_yaml::from_str(&contents) {
                    Ok(config)
                } else {
                    toml::from_str(&contents)
                        .into_diagnostic()
                        .wrap_err("Failed to parse config file")
                }
            }
        }
    }

    /// Try to load configuration from default locations in the project root
    pub fn from_default_locations(project_root: &Path) -> Result<Self> {
        let default_names = [
            ".deadfiles.yml",
            ".deadfiles.yaml",
            ".deadfiles.toml",
            "deadfiles.yml",
            "deadfiles.yaml",
            "deadfiles.toml",
        ];

        for name in &default_names {
            let path = project_root.join(name);
            if path.exists() {
                return Self::from_file(&path);
            }
        }

        Ok(Self::default())
    }

    /// Check whether a project-relative path (rooted at `/`) is excluded from discovery
    pub fn should_exclude(&self, path: &Path) -> bool {
        let path_str = path.to_string_lossy();
        self.exclude.iter().any(|pattern| glob_match(pattern, &path_str))
    }

    /// Check whether a file stem is on the user's retain list
    pub fn should_retain(&self, name: &str) -> bool {
        self.retain_patterns.iter().any(|p| glob_match(p, name))
    }
}

/// Simple glob matching for patterns like "*Cell", "Legacy*" or "**/Pods/**"
pub fn glob_match(pattern: &str, text: &str) -> bool {
    if let Some(suffix) = pattern.strip_prefix('*') {
        if !pattern.contains('/') && !suffix.contains('*') {
            return text.ends_with(suffix);
        }
    }

    if let Some(prefix) = pattern.strip_suffix('*') {
        if !pattern.contains('/') && !prefix.contains('*') {
            return text.starts_with(prefix);
        }
    }

    if pattern.contains("**") {
        // "**/Pods/**" must match a whole directory segment, so "/Pods/" but not "/PodsHelper/"
        if pattern.starts_with("**/") && pattern.ends_with("/**") {
            let dir_name = pattern.trim_start_matches("**/").trim_end_matches("/**");
            return text.contains(&format!("/{}/", dir_name));
        }

        let parts: Vec<&str> = pattern.split("**").collect();
        if parts.len() == 2 {
            let prefix = parts[0].trim_end_matches('/');
            let suffix = parts[1].trim_start_matches('/');

            return match (prefix.is_empty(), suffix.is_empty()) {
                (true, true) => true,
                (true, false) => text.ends_with(suffix) || text.contains(&format!("/{}", suffix)),
                (false, true) => text.starts_with(prefix) || text.contains(&format!("{}/", prefix)),
                (false, false) => {
                    (text.starts_with(prefix) || text.contains(&format!("/{}/", prefix)))
                        && (text.ends_with(suffix) || text.contains(&format!("/{}", suffix)))
                }
            };
        }
    }

    text == pattern
}
