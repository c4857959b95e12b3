//! Watch mode
//!
//! Re-runs detection whenever a Swift file, layout, asset catalog entry or
//! project manifest changes.

use crate::config::ProjectConfig;
use colored::Colorize;
use notify::RecursiveMode;
use notify_debouncer_mini::{new_debouncer, DebouncedEventKind};
use std::path::Path;
use std::sync::mpsc::channel;
use std::time::Duration;
use thiserror::Error;

/// Watch mode errors
#[derive(Error, Debug)]
pub enum WatchError {
    #[error("Failed to create file watcher: {0}")]
    WatcherError(#[from] notify::Error),
    #[error("Failed to receive events: {0}")]
    RecvError(#[from] std::sync::mpsc::RecvError),
}

/// Directory names whose contents never trigger a re-run
const IGNORED_DIRS: &[&str] = &["Pods", "Carthage", "build", "DerivedData", ".git", ".build"];

/// File watcher for continuous analysis
pub struct FileWatcher {
    /// Debounce duration in milliseconds
    debounce_ms: u64,
    /// File extensions to watch
    extensions: Vec<String>,
    /// Exact file names to watch regardless of extension
    file_names: Vec<String>,
}

impl FileWatcher {
    /// Watch the code, layout and manifest files of the configured project
    pub fn new(project: &ProjectConfig) -> Self {
        let mut extensions = vec![project.code_extension.clone()];
        extensions.extend(project.layout_extensions.iter().cloned());
        if let Some(ext) = Path::new(&project.manifest_file_name).extension() {
            extensions.push(ext.to_string_lossy().to_string());
        }

        Self {
            debounce_ms: 500,
            extensions,
            // Asset bundles change through their Contents.json
            file_names: vec!["Contents.json".to_string()],
        }
    }

    /// Set debounce duration
    pub fn with_debounce_ms(mut self, ms: u64) -> Self {
        self.debounce_ms = ms;
        self
    }

    /// Check if a path should trigger a re-run
    fn should_trigger(&self, path: &Path) -> bool {
        let in_ignored_dir = path.components().any(|c| {
            let name = c.as_os_str().to_string_lossy();
            IGNORED_DIRS.iter().any(|d| *d == name)
        });
        if in_ignored_dir {
            return false;
        }

        let name_matches = path
            .file_name()
            .map(|n| self.file_names.iter().any(|f| n.to_string_lossy() == f.as_str()))
            .unwrap_or(false);

        let ext_matches = path
            .extension()
            .map(|e| {
                let ext = e.to_string_lossy().to_lowercase();
                self.extensions.iter().any(|x| x.to_lowercase() == ext)
            })
            .unwrap_or(false);

        name_matches || ext_matches
    }

    /// Start watching a directory and call the callback on changes
    pub fn watch<F>(&self, path: &Path, mut on_change: F) -> Result<(), WatchError>
    where
        F: FnMut() -> bool, // Returns false to stop watching
    {
        let (tx, rx) = channel();

        let mut debouncer = new_debouncer(Duration::from_millis(self.debounce_ms), tx)?;
        debouncer.watcher().watch(path, RecursiveMode::Recursive)?;

        println!();
        println!("{}", "👁  Watch mode active. Press Ctrl+C to stop.".cyan().bold());
        println!("{}", format!("   Watching: {}", path.display()).dimmed());
        println!();

        if !on_change() {
            return Ok(());
        }

        loop {
            match rx.recv()? {
                Ok(events) => {
                    let relevant: Vec<_> = events
                        .iter()
                        .filter(|e| {
                            matches!(e.kind, DebouncedEventKind::Any | DebouncedEventKind::AnyContinuous)
                                && self.should_trigger(&e.path)
                        })
                        .collect();

                    if relevant.is_empty() {
                        continue;
                    }

                    println!();
                    println!(
                        "{}",
                        format!("🔄 Changes detected in {} file(s), re-analyzing...", relevant.len())
                            .yellow()
                    );
                    for event in relevant.iter().take(5) {
                        if let Some(name) = event.path.file_name() {
                            println!("   • {}", name.to_string_lossy().dimmed());
                        }
                    }
                    if relevant.len() > 5 {
                        println!("   • ... and {} more", relevant.len() - 5);
                    }
                    println!();

                    if !on_change() {
                        break;
                    }
                }
                Err(e) => {
                    eprintln!("{}: {:?}", "Watch error".red(), e);
                }
            }
        }

        Ok(())
    }
}
