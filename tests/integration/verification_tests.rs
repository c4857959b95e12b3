//! Integration tests for candidate verification
//!
//! These run the second pass over in-memory corpora, so the expected
//! reference counts are easy to read off each test.

use searchdeadfiles::analysis::{Confidence, DeadFileDetector};
use searchdeadfiles::parser::ReferenceCategory;
use searchdeadfiles::report::{format_candidates, parse_candidates, read_candidates, write_candidates};
use searchdeadfiles::{Config, ProjectFiles};
use std::collections::HashMap;
use std::path::PathBuf;
use tempfile::TempDir;

const MANIFEST_PATH: &str = "App.xcodeproj/project.pbxproj";

/// In-memory project. `in_sources` lists the files placed in the Sources
/// build phase; every file is declared.
fn project(units: &[(&str, &str)], in_sources: &[&str]) -> (ProjectFiles, HashMap<PathBuf, String>) {
    let mut manifest = String::new();
    for (i, (path, _)) in units.iter().enumerate() {
        let file_name = path.rsplit('/').next().unwrap();
        if in_sources.contains(&file_name) {
            manifest.push_str(&format!(
                "B{i} /* {file_name} in Sources */ = {{isa = PBXBuildFile; fileRef = A{i} /* {file_name} */; }};\n"
            ));
        }
        manifest.push_str(&format!(
            "A{i} /* {file_name} */ = {{isa = PBXFileReference; path = {file_name}; }};\n"
        ));
    }

    let mut files = ProjectFiles::new("");
    files.manifest = Some(PathBuf::from(MANIFEST_PATH));
    files.code_units = units.iter().map(|(p, _)| PathBuf::from(p)).collect();

    let mut source: HashMap<PathBuf, String> = units
        .iter()
        .map(|(p, t)| (PathBuf::from(p), t.to_string()))
        .collect();
    source.insert(PathBuf::from(MANIFEST_PATH), manifest);

    (files, source)
}

#[test]
fn test_clean_dead_file_scores_high() {
    let (files, source) = project(
        &[
            ("App/Orphan.swift", "struct Orphan { static let shared = Orphan() }"),
            ("App/Home.swift", "struct Home {}"),
        ],
        &[],
    );
    let config = Config::default();
    let detector = DeadFileDetector::new(&config).unwrap();

    let report = detector.verify(&files, &[PathBuf::from("App/Orphan.swift")], &source);

    assert_eq!(report.records.len(), 1);
    let record = &report.records[0];
    assert_eq!(record.total_references, 0, "self-references do not count");
    assert!(!record.in_build_phase);
    assert_eq!(record.confidence, Confidence::High);
    assert_eq!(record.recommendation(), "SAFE TO DELETE - No references found");
}

#[test]
fn test_build_phase_is_monotonic() {
    // Same evidence, once outside and once inside the Sources build phase
    let units = [
        ("App/Widget.swift", "struct Widget {}"),
        ("App/A.swift", "let w = Widget()"),
    ];
    let config = Config::default();
    let detector = DeadFileDetector::new(&config).unwrap();
    let candidate = [PathBuf::from("App/Widget.swift")];

    let (files, source) = project(&units, &[]);
    let outside = detector.verify(&files, &candidate, &source).records.remove(0);

    let (files, source) = project(&units, &["Widget.swift"]);
    let inside = detector.verify(&files, &candidate, &source).records.remove(0);

    assert_eq!(outside.total_references, inside.total_references);
    assert_eq!(outside.confidence, Confidence::Medium);
    assert_eq!(inside.confidence, Confidence::Low);
    assert!(inside.confidence <= outside.confidence);
}

#[test]
fn test_many_references_score_very_low() {
    let (files, source) = project(
        &[
            ("App/Theme.swift", "struct Theme {}"),
            ("App/A.swift", r#"let t = Theme(); let k = "Theme""#),
            ("App/B.swift", r#"let t = Theme(); performSegue(withIdentifier: "Theme", sender: nil)"#),
            ("App/C.swift", r#"let n = UINib(nibName: "Theme", bundle: nil)"#),
        ],
        &[],
    );
    let config = Config::default();
    let detector = DeadFileDetector::new(&config).unwrap();

    let report = detector.verify(&files, &[PathBuf::from("App/Theme.swift")], &source);
    let record = &report.records[0];

    assert_eq!(record.referenced_by(ReferenceCategory::DirectReference).len(), 3);
    assert_eq!(record.referenced_by(ReferenceCategory::StringLiteral).len(), 3);
    assert_eq!(record.referenced_by(ReferenceCategory::Construction).len(), 2);
    assert_eq!(
        record.referenced_by(ReferenceCategory::SegueReference),
        &[PathBuf::from("App/B.swift")]
    );
    assert_eq!(
        record.referenced_by(ReferenceCategory::LayoutReference),
        &[PathBuf::from("App/C.swift")]
    );
    assert_eq!(record.total_references, 10);
    assert_eq!(record.confidence, Confidence::VeryLow);
}

#[test]
fn test_records_ordered_by_confidence_then_path() {
    let (files, source) = project(
        &[
            ("App/Zeta.swift", "struct Zeta {}"),
            ("App/Alpha.swift", "struct Alpha {}"),
            ("App/Beta.swift", "struct Beta {}"),
            ("App/Home.swift", "let b = Beta()"),
        ],
        &[],
    );
    let config = Config::default();
    let detector = DeadFileDetector::new(&config).unwrap();

    let candidates = vec![
        PathBuf::from("App/Beta.swift"),
        PathBuf::from("App/Zeta.swift"),
        PathBuf::from("App/Alpha.swift"),
    ];
    let report = detector.verify(&files, &candidates, &source);

    let order: Vec<_> = report
        .records
        .iter()
        .map(|r| r.path.to_string_lossy().to_string())
        .collect();
    assert_eq!(order, vec!["App/Alpha.swift", "App/Zeta.swift", "App/Beta.swift"]);
    assert_eq!(report.count(Confidence::High), 2);
    assert_eq!(report.count(Confidence::Medium), 1);
}

#[test]
fn test_min_confidence_filter() {
    let (files, source) = project(
        &[
            ("App/Alpha.swift", "struct Alpha {}"),
            ("App/Beta.swift", "struct Beta {}"),
            ("App/Home.swift", "let b = Beta()"),
        ],
        &[],
    );
    let config = Config::default();
    let detector = DeadFileDetector::new(&config).unwrap();

    let mut report = detector.verify(
        &files,
        &[PathBuf::from("App/Alpha.swift"), PathBuf::from("App/Beta.swift")],
        &source,
    );
    report.retain_at_least(Confidence::High);

    assert_eq!(report.records.len(), 1);
    assert_eq!(report.records[0].path, PathBuf::from("App/Alpha.swift"));
}

#[test]
fn test_hand_off_matches_in_process_verification() {
    let (files, source) = project(
        &[
            ("App/Orphan.swift", "struct Orphan {}"),
            ("App/Legacy.swift", "enum Legacy {}"),
            ("App/Home.swift", r#"let key = "Legacy""#),
        ],
        &["Legacy.swift", "Home.swift"],
    );
    let config = Config::default();
    let detector = DeadFileDetector::new(&config).unwrap();

    let detection = detector.detect(&files, &source);
    let in_process = detector.verify(&files, &detection.code_candidates(), &source);

    let temp_dir = TempDir::new().unwrap();
    let list = temp_dir.path().join("candidates.txt");
    write_candidates(&list, &files.root, &detection.dead_code_units).unwrap();
    let handed_off = read_candidates(&list, &files.root).unwrap();
    let from_file = detector.verify(&files, &handed_off, &source);

    assert_eq!(in_process.records, from_file.records);
}

#[test]
fn test_candidate_list_format() {
    let root = PathBuf::from("/work/App");
    let text = format_candidates(
        &root,
        &[root.join("Feed/Orphan.swift"), root.join("Legacy.swift")],
    );

    assert_eq!(
        parse_candidates(&text),
        vec![PathBuf::from("Feed/Orphan.swift"), PathBuf::from("Legacy.swift")]
    );
}

#[test]
fn test_missing_manifest_during_verification() {
    let (mut files, source) = project(&[("App/Orphan.swift", "struct Orphan {}")], &[]);
    files.manifest = None;

    let config = Config::default();
    let detector = DeadFileDetector::new(&config).unwrap();
    let report = detector.verify(&files, &[PathBuf::from("App/Orphan.swift")], &source);

    assert_eq!(report.records[0].confidence, Confidence::High);
    assert_eq!(report.diagnostics.len(), 1);
}
