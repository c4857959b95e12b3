use crate::config::RuleSet;
use regex::{Regex, RegexBuilder};
use serde::Serialize;
use std::collections::BTreeSet;

/// Evidence categories counted when verifying a dead-file candidate
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ReferenceCategory {
    /// Bare identifier on word boundaries
    DirectReference,
    /// Name inside single or double quotes
    StringLiteral,
    /// Name immediately followed by `(`
    Construction,
    /// Quoted name on a line mentioning a segue
    SegueReference,
    /// Quoted name on a line mentioning a NIB
    LayoutReference,
}

impl ReferenceCategory {
    pub const ALL: [ReferenceCategory; 5] = [
        ReferenceCategory::DirectReference,
        ReferenceCategory::StringLiteral,
        ReferenceCategory::Construction,
        ReferenceCategory::SegueReference,
        ReferenceCategory::LayoutReference,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ReferenceCategory::DirectReference => "direct_reference",
            ReferenceCategory::StringLiteral => "string_literal",
            ReferenceCategory::Construction => "construction",
            ReferenceCategory::SegueReference => "segue_reference",
            ReferenceCategory::LayoutReference => "layout_reference",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            ReferenceCategory::DirectReference => "direct",
            ReferenceCategory::StringLiteral => "string",
            ReferenceCategory::Construction => "instantiation",
            ReferenceCategory::SegueReference => "segue",
            ReferenceCategory::LayoutReference => "nib",
        }
    }
}

impl std::fmt::Display for ReferenceCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Named extraction rules shared by the detection and verification passes.
///
/// Every `extract_*` method is total: text that matches nothing yields an
/// empty set. Results are ordered sets so downstream output is stable.
#[derive(Debug, Clone)]
pub struct PatternLibrary {
    import_pattern: Regex,
    declaration_pattern: Regex,
    type_like_pattern: Option<Regex>,
    resource_patterns: Vec<Regex>,
    layout_patterns: Vec<Regex>,
    manifest_entry_pattern: Regex,
    build_phase_pattern: Regex,
    segue_keyword: String,
    nib_keyword: String,
}

impl PatternLibrary {
    /// Compile the rule vocabulary for code units with the given extension
    pub fn new(rules: &RuleSet, code_extension: &str) -> Result<Self, regex::Error> {
        let import_pattern = Regex::new(r"import\s+(\w+)")?;

        let declaration_pattern =
            Regex::new(r"\b(?:class|struct|enum|protocol|actor|typealias)\s+([A-Z]\w*)")?;

        let type_like_pattern = if rules.type_suffixes.is_empty() {
            None
        } else {
            let suffixes = rules
                .type_suffixes
                .iter()
                .map(|s| regex::escape(s))
                .collect::<Vec<_>>()
                .join("|");
            Some(Regex::new(&format!(r"\b([A-Z][a-zA-Z0-9]*(?:{}))\b", suffixes))?)
        };

        let resource_patterns = Self::call_patterns(&rules.resource_calls)?;
        let layout_patterns = Self::call_patterns(&rules.layout_calls)?;

        let manifest_entry_pattern = Regex::new(&format!(
            r"/\* ([^*]+\.{}) \*/ = \{{isa = PBXFileReference",
            regex::escape(code_extension)
        ))?;

        let build_phase_pattern = Regex::new(r"/\* ([^*]+?) in Sources \*/")?;

        Ok(Self {
            import_pattern,
            declaration_pattern,
            type_like_pattern,
            resource_patterns,
            layout_patterns,
            manifest_entry_pattern,
            build_phase_pattern,
            segue_keyword: rules.segue_keyword.clone(),
            nib_keyword: rules.nib_keyword.clone(),
        })
    }

    // `UIImage(named: "icon")` -> capture `icon`
    fn call_patterns(calls: &[String]) -> Result<Vec<Regex>, regex::Error> {
        calls
            .iter()
            .map(|call| Regex::new(&format!(r#"{}\s*"([^"]+)""#, regex::escape(call))))
            .collect()
    }

    /// Module names from `import X` statements
    pub fn extract_imports(&self, text: &str) -> BTreeSet<String> {
        capture_all(&self.import_pattern, text)
    }

    /// Type names declared in the text (`class X`, `struct X`, ...)
    pub fn extract_declared_types(&self, text: &str) -> BTreeSet<String> {
        capture_all(&self.declaration_pattern, text)
    }

    /// Uppercase identifiers ending in an architectural-role suffix
    pub fn extract_type_like_identifiers(&self, text: &str) -> BTreeSet<String> {
        match &self.type_like_pattern {
            Some(pattern) => capture_all(pattern, text),
            None => BTreeSet::new(),
        }
    }

    /// Asset names passed to image-loading calls
    pub fn extract_resource_literals(&self, text: &str) -> BTreeSet<String> {
        self.resource_patterns
            .iter()
            .flat_map(|pattern| capture_all(pattern, text))
            .collect()
    }

    /// Layout names passed to storyboard/NIB-loading calls
    pub fn extract_layout_name_literals(&self, text: &str) -> BTreeSet<String> {
        self.layout_patterns
            .iter()
            .flat_map(|pattern| capture_all(pattern, text))
            .collect()
    }

    /// File names the manifest declares as file references
    pub fn extract_manifest_declared_files(&self, manifest_text: &str) -> BTreeSet<String> {
        capture_all(&self.manifest_entry_pattern, manifest_text)
    }

    /// File names listed in a Sources build phase
    pub fn extract_build_phase_files(&self, manifest_text: &str) -> BTreeSet<String> {
        capture_all(&self.build_phase_pattern, manifest_text)
    }

    /// Case-insensitive category matchers keyed to one candidate name
    pub fn reference_matchers(&self, name: &str) -> Result<ReferenceMatchers, regex::Error> {
        let n = regex::escape(name);
        let rules = [
            (ReferenceCategory::DirectReference, format!(r"\b{}\b", n)),
            (ReferenceCategory::StringLiteral, format!(r#""{}""#, n)),
            (ReferenceCategory::StringLiteral, format!(r"'{}'", n)),
            (ReferenceCategory::Construction, format!(r"{}\(", n)),
            (
                ReferenceCategory::SegueReference,
                format!(r#"{}.*"{}""#, regex::escape(&self.segue_keyword), n),
            ),
            (
                ReferenceCategory::LayoutReference,
                format!(r#"{}.*"{}""#, regex::escape(&self.nib_keyword), n),
            ),
        ];

        let rules = rules
            .into_iter()
            .map(|(category, pattern)| {
                RegexBuilder::new(&pattern)
                    .case_insensitive(true)
                    .build()
                    .map(|regex| (category, regex))
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(ReferenceMatchers { rules })
    }
}

/// Compiled per-candidate category patterns
#[derive(Debug, Clone)]
pub struct ReferenceMatchers {
    rules: Vec<(ReferenceCategory, Regex)>,
}

impl ReferenceMatchers {
    /// Categories with at least one match in `text`
    pub fn matched_categories(&self, text: &str) -> BTreeSet<ReferenceCategory> {
        self.rules
            .iter()
            .filter(|(_, regex)| regex.is_match(text))
            .map(|(category, _)| *category)
            .collect()
    }
}

fn capture_all(pattern: &Regex, text: &str) -> BTreeSet<String> {
    pattern
        .captures_iter(text)
        .filter_map(|cap| cap.get(1))
        .map(|m| m.as_str().to_string())
        .collect()
}
