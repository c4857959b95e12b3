//! CLI integration tests
//!
//! These tests verify that the CLI works correctly with various options.

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

const PBXPROJ: &str = r#"
		B1 /* AppDelegate.swift in Sources */ = {isa = PBXBuildFile; fileRef = A1 /* AppDelegate.swift */; };
		B2 /* FeedViewController.swift in Sources */ = {isa = PBXBuildFile; fileRef = A2 /* FeedViewController.swift */; };
		A1 /* AppDelegate.swift */ = {isa = PBXFileReference; lastKnownFileType = sourcecode.swift; path = AppDelegate.swift; sourceTree = "<group>"; };
		A2 /* FeedViewController.swift */ = {isa = PBXFileReference; lastKnownFileType = sourcecode.swift; path = FeedViewController.swift; sourceTree = "<group>"; };
		A3 /* Orphan.swift */ = {isa = PBXFileReference; lastKnownFileType = sourcecode.swift; path = Orphan.swift; sourceTree = "<group>"; };
"#;

fn create_project(root: &Path) {
    let write = |rel: &str, content: &str| {
        let path = root.join(rel);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, content).unwrap();
    };

    write("Demo.xcodeproj/project.pbxproj", PBXPROJ);
    write(
        "Demo/AppDelegate.swift",
        "import UIKit\n@main class AppDelegate: UIResponder {\n    let feed = FeedViewController()\n}\n",
    );
    write(
        "Demo/FeedViewController.swift",
        "import UIKit\nclass FeedViewController: UIViewController {\n    let header = UIImage(named: \"header\")\n}\n",
    );
    write("Demo/Orphan.swift", "struct Orphan {}\n");
    write("Demo/Assets.xcassets/header.imageset/Contents.json", "{}");
    write("Demo/Assets.xcassets/unused_banner.imageset/Contents.json", "{}");
    write("Demo/LaunchScreen.storyboard", "<document/>");
}

fn cli() -> Command {
    Command::cargo_bin("searchdeadfiles").unwrap()
}

// ============================================================================
// Basic CLI Tests
// ============================================================================

#[test]
fn test_help() {
    cli()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("--verify"))
        .stdout(predicate::str::contains("--candidates"));
}

#[test]
fn test_version() {
    cli()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("searchdeadfiles"));
}

#[test]
fn test_terminal_output() {
    let temp_dir = TempDir::new().unwrap();
    create_project(temp_dir.path());

    cli()
        .arg(temp_dir.path())
        .arg("--quiet")
        .assert()
        .success()
        .stdout(predicate::str::contains("Demo/Orphan.swift"))
        .stdout(predicate::str::contains("unused_banner.imageset"));
}

// ============================================================================
// Output Formats
// ============================================================================

#[test]
fn test_json_output() {
    let temp_dir = TempDir::new().unwrap();
    create_project(temp_dir.path());

    let output = cli()
        .arg(temp_dir.path())
        .args(["--format", "json", "--quiet"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(value["detection"]["dead_code_units"][0], "Demo/Orphan.swift");
    assert_eq!(
        value["detection"]["dead_assets"][0],
        "Demo/Assets.xcassets/unused_banner.imageset"
    );
    assert!(value.get("verification").is_none());
}

#[test]
fn test_markdown_with_verification() {
    let temp_dir = TempDir::new().unwrap();
    create_project(temp_dir.path());

    cli()
        .arg(temp_dir.path())
        .args(["--format", "markdown", "--verify", "--quiet"])
        .assert()
        .success()
        .stdout(predicate::str::contains("# Dead File Detection Report"))
        .stdout(predicate::str::contains("# Dead File Verification Report"))
        .stdout(predicate::str::contains(
            "- `Demo/Orphan.swift` - SAFE TO DELETE - No references found",
        ));
}

#[test]
fn test_output_file() {
    let temp_dir = TempDir::new().unwrap();
    create_project(temp_dir.path());
    let report = temp_dir.path().join("report.json");

    cli()
        .arg(temp_dir.path())
        .args(["--format", "json", "--quiet", "--output"])
        .arg(&report)
        .assert()
        .success();

    let value: serde_json::Value = serde_json::from_str(&fs::read_to_string(&report).unwrap()).unwrap();
    assert_eq!(value["version"], "1.0");
}

// ============================================================================
// Candidate Hand-off
// ============================================================================

#[test]
fn test_write_then_verify_candidates() {
    let temp_dir = TempDir::new().unwrap();
    create_project(temp_dir.path());
    let list = temp_dir.path().join("candidates.txt");

    cli()
        .arg(temp_dir.path())
        .args(["--quiet", "--write-candidates"])
        .arg(&list)
        .assert()
        .success();

    let written = fs::read_to_string(&list).unwrap();
    assert!(written.contains("Demo/Orphan.swift"));

    let output = cli()
        .arg(temp_dir.path())
        .args(["--format", "json", "--quiet", "--candidates"])
        .arg(&list)
        .output()
        .unwrap();
    assert!(output.status.success());

    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert!(value.get("detection").is_none());
    assert_eq!(value["verification"]["records"][0]["file"], "Demo/Orphan.swift");
    assert_eq!(value["verification"]["records"][0]["confidence"], "high");
}

// ============================================================================
// Options
// ============================================================================

#[test]
fn test_min_confidence_filters_records() {
    let temp_dir = TempDir::new().unwrap();
    create_project(temp_dir.path());
    // Undeclared and referenced from a Swift file: dead, but graded medium
    fs::write(temp_dir.path().join("Demo/Ghost.swift"), "struct Ghost {}\n").unwrap();
    fs::write(temp_dir.path().join("Demo/Spooky.swift"), "let g = Ghost()\n").unwrap();

    let output = cli()
        .arg(temp_dir.path())
        .args(["--format", "json", "--quiet", "--verify", "--min-confidence", "high"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let records = value["verification"]["records"].as_array().unwrap();
    assert!(!records.is_empty());
    assert!(records.iter().all(|r| r["confidence"] == "high"));
    assert!(records.iter().all(|r| r["file"] != "Demo/Ghost.swift"));
}

#[test]
fn test_invalid_min_confidence() {
    let temp_dir = TempDir::new().unwrap();
    create_project(temp_dir.path());

    cli()
        .arg(temp_dir.path())
        .args(["--min-confidence", "certain", "--quiet"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown confidence level"));
}

#[test]
fn test_retain_flag() {
    let temp_dir = TempDir::new().unwrap();
    create_project(temp_dir.path());

    cli()
        .arg(temp_dir.path())
        .args(["--retain", "Orph*", "--format", "json", "--quiet"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Demo/Orphan.swift").not());
}

#[test]
fn test_missing_manifest_warns_but_succeeds() {
    let temp_dir = TempDir::new().unwrap();
    create_project(temp_dir.path());
    fs::remove_dir_all(temp_dir.path().join("Demo.xcodeproj")).unwrap();

    cli()
        .arg(temp_dir.path())
        .args(["--format", "json", "--quiet"])
        .assert()
        .success()
        .stdout(predicate::str::contains("missing_manifest"));
}

#[test]
fn test_config_file() {
    let temp_dir = TempDir::new().unwrap();
    create_project(temp_dir.path());
    let config = temp_dir.path().join("custom.toml");
    fs::write(&config, "retain_patterns = [\"Orphan\"]\n\n[report]\nformat = \"json\"\n").unwrap();

    let output = cli()
        .arg(temp_dir.path())
        .arg("--config")
        .arg(&config)
        .arg("--quiet")
        .output()
        .unwrap();
    assert!(output.status.success());

    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(value["detection"]["dead_code_units"].as_array().unwrap().len(), 0);
}
