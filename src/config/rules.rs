use serde::{Deserialize, Serialize};

/// Rule vocabulary used by the pattern library and the liveness classifier.
///
/// Everything here is plain data so a project can tune the heuristics from
/// its config file without touching the extraction code.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct RuleSet {
    /// Suffixes that make an uppercase identifier "type-like"
    pub type_suffixes: Vec<String>,

    /// Exact file stems that are application or scene entry points
    pub entry_names: Vec<String>,

    /// Stem suffixes that mark extension groups (e.g. `UIColor+Extensions`)
    pub exception_suffixes: Vec<String>,

    /// Stem prefixes that are always kept alive
    pub exception_prefixes: Vec<String>,

    /// Substrings that keep a stem alive wherever they appear
    pub exception_substrings: Vec<String>,

    /// Layout that the platform loads on its own (never reported)
    pub bootstrap_layout: String,

    /// Call prefixes whose first string argument names an asset
    pub resource_calls: Vec<String>,

    /// Call prefixes whose first string argument names a layout document
    pub layout_calls: Vec<String>,

    /// Keyword that marks a segue-style reference on the same line
    pub segue_keyword: String,

    /// Keyword that marks a NIB-style reference on the same line
    pub nib_keyword: String,
}

impl Default for RuleSet {
    fn default() -> Self {
        Self {
            type_suffixes: vec![
                "Controller".to_string(),
                "View".to_string(),
                "Cell".to_string(),
                "Manager".to_string(),
                "Service".to_string(),
                "Delegate".to_string(),
            ],
            entry_names: vec!["AppDelegate".to_string(), "SceneDelegate".to_string()],
            exception_suffixes: vec!["Extensions".to_string()],
            exception_prefixes: vec!["UI".to_string()],
            exception_substrings: vec!["DataModel".to_string(), "Manager".to_string()],
            bootstrap_layout: "LaunchScreen".to_string(),
            resource_calls: vec![
                "UIImage(named:".to_string(),
                "#imageLiteral(resourceName:".to_string(),
                "Image(".to_string(),
            ],
            layout_calls: vec!["UIStoryboard(name:".to_string(), "nibName:".to_string()],
            segue_keyword: "segue".to_string(),
            nib_keyword: "nibName".to_string(),
        }
    }
}

impl RuleSet {
    /// Naming conventions that keep a code unit alive without textual evidence
    pub fn is_structural_exception(&self, name: &str) -> bool {
        self.entry_names.iter().any(|n| n == name)
            || self.exception_suffixes.iter().any(|s| name.ends_with(s.as_str()))
            || self.exception_prefixes.iter().any(|p| name.starts_with(p.as_str()))
            || self.exception_substrings.iter().any(|s| name.contains(s.as_str()))
    }

    pub fn is_bootstrap_layout(&self, name: &str) -> bool {
        self.bootstrap_layout == name
    }
}
