//! Integration tests for the detection pipeline
//!
//! These tests build a small iOS project on disk and run discovery,
//! extraction, graph building and classification end to end.

use searchdeadfiles::analysis::{DeadFileDetector, DeadReason};
use searchdeadfiles::discovery::{FileFinder, FileKind, FsTextSource};
use searchdeadfiles::{Config, DiagnosticKind};
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

const PBXPROJ: &str = r#"// !$*UTF8*$!
{
	objects = {

/* Begin PBXBuildFile section */
		B001 /* AppDelegate.swift in Sources */ = {isa = PBXBuildFile; fileRef = A001 /* AppDelegate.swift */; };
		B002 /* HomeViewController.swift in Sources */ = {isa = PBXBuildFile; fileRef = A002 /* HomeViewController.swift */; };
		B003 /* EventCell.swift in Sources */ = {isa = PBXBuildFile; fileRef = A003 /* EventCell.swift */; };
		B004 /* UserProfile.swift in Sources */ = {isa = PBXBuildFile; fileRef = A004 /* UserProfile.swift */; };
		B005 /* UserProfileViewController.swift in Sources */ = {isa = PBXBuildFile; fileRef = A005 /* UserProfileViewController.swift */; };
		B007 /* LegacyHelper.swift in Sources */ = {isa = PBXBuildFile; fileRef = A007 /* LegacyHelper.swift */; };
/* End PBXBuildFile section */

/* Begin PBXFileReference section */
		A001 /* AppDelegate.swift */ = {isa = PBXFileReference; lastKnownFileType = sourcecode.swift; path = AppDelegate.swift; sourceTree = "<group>"; };
		A002 /* HomeViewController.swift */ = {isa = PBXFileReference; lastKnownFileType = sourcecode.swift; path = HomeViewController.swift; sourceTree = "<group>"; };
		A003 /* EventCell.swift */ = {isa = PBXFileReference; lastKnownFileType = sourcecode.swift; path = EventCell.swift; sourceTree = "<group>"; };
		A004 /* UserProfile.swift */ = {isa = PBXFileReference; lastKnownFileType = sourcecode.swift; path = UserProfile.swift; sourceTree = "<group>"; };
		A005 /* UserProfileViewController.swift */ = {isa = PBXFileReference; lastKnownFileType = sourcecode.swift; path = UserProfileViewController.swift; sourceTree = "<group>"; };
		A006 /* Orphan.swift */ = {isa = PBXFileReference; lastKnownFileType = sourcecode.swift; path = Orphan.swift; sourceTree = "<group>"; };
		A007 /* LegacyHelper.swift */ = {isa = PBXFileReference; lastKnownFileType = sourcecode.swift; path = LegacyHelper.swift; sourceTree = "<group>"; };
/* End PBXFileReference section */
	};
}
"#;

/// Write a small app: five live Swift files, three dead ones, two assets and
/// three storyboards
fn create_project(root: &Path) {
    let write = |rel: &str, content: &str| {
        let path = root.join(rel);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, content).unwrap();
    };

    write("App.xcodeproj/project.pbxproj", PBXPROJ);

    write(
        "App/AppDelegate.swift",
        r#"import UIKit

@main
class AppDelegate: UIResponder, UIApplicationDelegate {
    var window: UIWindow?
    let root = HomeViewController()
}
"#,
    );
    write(
        "App/HomeViewController.swift",
        r#"import UIKit

final class HomeViewController: UIViewController {
    private let cell = EventCell()
    private let profile = UserProfileViewController()
    private let logo = UIImage(named: "logo")
    private let storyboard = UIStoryboard(name: "Main", bundle: nil)
    private let analyticsKey = "LegacyHelper"
}
"#,
    );
    write("App/EventCell.swift", "import UIKit\n\nclass EventCell: UITableViewCell {}\n");
    write("App/UserProfile.swift", "struct UserProfile {\n    let name: String\n}\n");
    write(
        "App/UserProfileViewController.swift",
        "import UIKit\n\nclass UserProfileViewController: UIViewController {}\n",
    );
    write("App/Orphan.swift", "struct Orphan {\n    let value = 42\n}\n");
    write("App/Ghost.swift", "class Ghost {}\n");
    write("App/LegacyHelper.swift", "enum LegacyHelper {\n    static func run() {}\n}\n");

    write("App/Assets.xcassets/logo.imageset/Contents.json", "{}");
    write("App/Assets.xcassets/icon_unused.imageset/Contents.json", "{}");

    write("App/Base.lproj/Main.storyboard", "<document/>");
    write("App/Base.lproj/LaunchScreen.storyboard", "<document/>");
    write("App/Onboarding.storyboard", "<document/>");

    write("Pods/Vendor/VendorManager.swift", "class VendorManager {}\n");
}

fn names(paths: &[PathBuf]) -> Vec<String> {
    paths
        .iter()
        .map(|p| p.file_name().unwrap().to_string_lossy().to_string())
        .collect()
}

#[test]
fn test_detects_dead_files_on_disk() {
    let temp_dir = TempDir::new().unwrap();
    let root = temp_dir.path();
    create_project(root);

    let config = Config::default();
    let files = FileFinder::new(&config).find_project(root).unwrap();
    assert_eq!(files.code_units.len(), 8, "Pods must be excluded");

    let detector = DeadFileDetector::new(&config).unwrap();
    let report = detector.detect(&files, &FsTextSource);

    assert_eq!(
        names(&report.dead_code_units),
        vec!["Ghost.swift", "LegacyHelper.swift", "Orphan.swift"]
    );
    assert_eq!(names(&report.dead_assets), vec!["icon_unused.imageset"]);
    assert_eq!(names(&report.dead_layouts), vec!["Onboarding.storyboard"]);
    assert_eq!(report.alive_count, 8);
    assert!(report.diagnostics.is_empty());
    assert!(report.stats.manifest_present);
    assert_eq!(report.stats.manifest_declared, 7);
}

#[test]
fn test_dead_reasons() {
    let temp_dir = TempDir::new().unwrap();
    let root = temp_dir.path();
    create_project(root);

    let config = Config::default();
    let files = FileFinder::new(&config).find_project(root).unwrap();
    let report = DeadFileDetector::new(&config)
        .unwrap()
        .detect(&files, &FsTextSource);

    let reason_of = |name: &str| {
        report
            .candidates
            .iter()
            .find(|c| c.name == name)
            .map(|c| (c.kind, c.reason))
    };

    assert_eq!(reason_of("Ghost"), Some((FileKind::Code, DeadReason::NotInManifest)));
    assert_eq!(reason_of("Orphan"), Some((FileKind::Code, DeadReason::NoSymbolReference)));
    assert_eq!(
        reason_of("icon_unused"),
        Some((FileKind::Asset, DeadReason::NoResourceReference))
    );
    assert_eq!(
        reason_of("Onboarding"),
        Some((FileKind::Layout, DeadReason::NoLayoutReference))
    );
    assert_eq!(reason_of("UserProfile"), None, "kept alive by UserProfileViewController");
    assert_eq!(reason_of("LaunchScreen"), None);
}

#[test]
fn test_detection_is_idempotent() {
    let temp_dir = TempDir::new().unwrap();
    let root = temp_dir.path();
    create_project(root);

    let config = Config::default();
    let detector = DeadFileDetector::new(&config).unwrap();

    let first = detector.detect(&FileFinder::new(&config).find_project(root).unwrap(), &FsTextSource);
    let second = detector.detect(&FileFinder::new(&config).find_project(root).unwrap(), &FsTextSource);

    assert_eq!(first, second);
}

#[test]
fn test_missing_manifest() {
    let temp_dir = TempDir::new().unwrap();
    let root = temp_dir.path();
    create_project(root);
    fs::remove_dir_all(root.join("App.xcodeproj")).unwrap();

    let config = Config::default();
    let files = FileFinder::new(&config).find_project(root).unwrap();
    assert!(files.manifest.is_none());

    let report = DeadFileDetector::new(&config)
        .unwrap()
        .detect(&files, &FsTextSource);

    assert_eq!(report.dead_code_units.len(), 8);
    assert!(report
        .diagnostics
        .iter()
        .any(|d| d.kind == DiagnosticKind::MissingManifest));
}

#[test]
fn test_retain_patterns_from_config_file() {
    let temp_dir = TempDir::new().unwrap();
    let root = temp_dir.path();
    create_project(root);
    fs::write(root.join(".deadfiles.yml"), "retain_patterns:\n  - \"Legacy*\"\n").unwrap();

    let config = Config::from_default_locations(root).unwrap();
    let files = FileFinder::new(&config).find_project(root).unwrap();
    let report = DeadFileDetector::new(&config)
        .unwrap()
        .detect(&files, &FsTextSource);

    assert_eq!(names(&report.dead_code_units), vec!["Ghost.swift", "Orphan.swift"]);
}

#[test]
fn test_exclude_patterns() {
    let temp_dir = TempDir::new().unwrap();
    let root = temp_dir.path();
    create_project(root);

    let mut config = Config::default();
    config.exclude.push("**/Ghost.swift".to_string());

    let files = FileFinder::new(&config).find_project(root).unwrap();
    let report = DeadFileDetector::new(&config)
        .unwrap()
        .detect(&files, &FsTextSource);

    assert!(!names(&report.dead_code_units).contains(&"Ghost.swift".to_string()));
}

#[test]
fn test_unreadable_unit_is_skipped() {
    let temp_dir = TempDir::new().unwrap();
    let root = temp_dir.path();
    create_project(root);
    fs::write(root.join("App/Binary.swift"), [0xff, 0xfe, 0x00, 0x80]).unwrap();

    let config = Config::default();
    let files = FileFinder::new(&config).find_project(root).unwrap();
    let report = DeadFileDetector::new(&config)
        .unwrap()
        .detect(&files, &FsTextSource);

    let unreadable: Vec<_> = report
        .diagnostics
        .iter()
        .filter(|d| d.kind == DiagnosticKind::UnreadableUnit)
        .collect();
    assert_eq!(unreadable.len(), 1);
    assert_eq!(unreadable[0].path, Some(root.join("App/Binary.swift")));
    assert!(!names(&report.dead_code_units).contains(&"Binary.swift".to_string()));
    assert_eq!(report.stats.code_units, 8);
}
