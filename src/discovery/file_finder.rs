use crate::config::{Config, ProjectConfig};
use ignore::WalkBuilder;
use miette::Result;
use rayon::prelude::*;
use std::path::{Path, PathBuf};
use tracing::{debug, trace};

/// Kind of project file
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum FileKind {
    /// Source file analyzed for declarations and references
    Code,
    /// Named resource bundle (a directory such as `icon.imageset`)
    Asset,
    /// Declarative UI layout document
    Layout,
    /// Build manifest listing the build inputs
    Manifest,
}

impl FileKind {
    /// Determine the kind of a regular file from its path
    pub fn from_path(path: &Path, project: &ProjectConfig) -> Option<Self> {
        let extension = path.extension()?.to_str()?;
        let file_name = path.file_name()?.to_str()?;

        if extension == project.code_extension {
            return Some(FileKind::Code);
        }
        if project.layout_extensions.iter().any(|e| e == extension) {
            return Some(FileKind::Layout);
        }
        if file_name == project.manifest_file_name {
            let in_bundle = path
                .parent()
                .and_then(|p| p.extension())
                .and_then(|e| e.to_str())
                .map(|e| e == project.manifest_bundle_extension)
                .unwrap_or(false);
            if in_bundle {
                return Some(FileKind::Manifest);
            }
        }
        None
    }

    /// Whether a directory path names an asset bundle
    pub fn is_asset_dir(path: &Path, project: &ProjectConfig) -> bool {
        path.extension()
            .and_then(|e| e.to_str())
            .map(|ext| project.asset_extensions.iter().any(|e| e == ext))
            .unwrap_or(false)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            FileKind::Code => "code",
            FileKind::Asset => "asset",
            FileKind::Layout => "layout",
            FileKind::Manifest => "manifest",
        }
    }
}

impl std::fmt::Display for FileKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Everything discovered under a project root, each list sorted by path
#[derive(Debug, Clone, Default)]
pub struct ProjectFiles {
    pub root: PathBuf,
    pub code_units: Vec<PathBuf>,
    pub assets: Vec<PathBuf>,
    pub layouts: Vec<PathBuf>,
    pub manifest: Option<PathBuf>,
}

impl ProjectFiles {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            ..Self::default()
        }
    }

    pub fn total(&self) -> usize {
        self.code_units.len() + self.assets.len() + self.layouts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.total() == 0
    }

    /// Path relative to the project root, for display and hand-off files
    pub fn relative<'p>(&self, path: &'p Path) -> &'p Path {
        path.strip_prefix(&self.root).unwrap_or(path)
    }
}

/// File finder for discovering project files
pub struct FileFinder<'a> {
    config: &'a Config,
}

impl<'a> FileFinder<'a> {
    pub fn new(config: &'a Config) -> Self {
        Self { config }
    }

    /// Discover code units, asset bundles, layouts and the manifest
    pub fn find_project(&self, root: &Path) -> Result<ProjectFiles> {
        debug!("Scanning for files in: {}", root.display());

        let project = &self.config.project;
        let mut files = ProjectFiles::new(root);

        for (path, kind) in self.walk_files(root) {
            match kind {
                FileKind::Code => files.code_units.push(path),
                FileKind::Layout => files.layouts.push(path),
                FileKind::Manifest | FileKind::Asset => {}
            }
        }

        files.assets = self
            .targets(root)
            .par_iter()
            .flat_map(|target| self.scan_asset_dirs(root, target))
            .collect();

        files.code_units.sort();
        files.code_units.dedup();
        files.layouts.sort();
        files.layouts.dedup();
        files.assets.sort();
        files.assets.dedup();

        files.manifest = match &self.config.manifest {
            Some(manifest) if manifest.is_absolute() => Some(manifest.clone()),
            Some(manifest) => Some(root.join(manifest)),
            None => self.locate_manifest(root, project),
        };

        debug!(
            "Found {} code units, {} assets, {} layouts, manifest: {:?}",
            files.code_units.len(),
            files.assets.len(),
            files.layouts.len(),
            files.manifest
        );
        Ok(files)
    }

    fn targets(&self, root: &Path) -> Vec<PathBuf> {
        if self.config.targets.is_empty() {
            vec![root.to_path_buf()]
        } else {
            self.config.targets.iter().map(|t| root.join(t)).collect()
        }
    }

    fn walker(&self, dir: &Path) -> ignore::Walk {
        WalkBuilder::new(dir)
            .hidden(true)           // Skip hidden files
            .git_ignore(true)       // Respect .gitignore
            .git_global(true)       // Respect global gitignore
            .git_exclude(true)      // Respect .git/info/exclude
            .ignore(true)           // Respect .ignore files
            .parents(true)          // Check parent directories for ignore files
            .follow_links(false)    // Don't follow symlinks
            .build()
    }

    fn walk_files(&self, root: &Path) -> Vec<(PathBuf, FileKind)> {
        self.targets(root)
            .par_iter()
            .flat_map(|target| self.scan_directory(root, target))
            .collect()
    }

    /// Exclude patterns apply below the project root only, so a root that
    /// itself lives under `build/` or `DerivedData/` is still scanned
    fn is_excluded(&self, root: &Path, path: &Path) -> bool {
        let relative = path.strip_prefix(root).unwrap_or(path);
        self.config.should_exclude(&Path::new("/").join(relative))
    }

    /// Scan a single directory for classified files
    fn scan_directory(&self, root: &Path, dir: &Path) -> Vec<(PathBuf, FileKind)> {
        if !dir.exists() {
            trace!("Directory does not exist: {}", dir.display());
            return Vec::new();
        }

        self.walker(dir)
            .filter_map(|entry| entry.ok())
            .filter(|entry| entry.file_type().map(|t| t.is_file()).unwrap_or(false))
            .filter_map(|entry| {
                let path = entry.path();

                if self.is_excluded(root, path) {
                    trace!("Excluding: {}", path.display());
                    return None;
                }

                let kind = FileKind::from_path(path, &self.config.project)?;
                trace!("Found {:?}: {}", kind, path.display());
                Some((path.to_path_buf(), kind))
            })
            .collect()
    }

    /// Asset bundles are directories, so they are found with a directory walk
    fn scan_asset_dirs(&self, root: &Path, dir: &Path) -> Vec<PathBuf> {
        let project = &self.config.project;

        walkdir::WalkDir::new(dir)
            .into_iter()
            .filter_entry(|e| {
                let hidden = e.depth() > 0 && e.file_name().to_string_lossy().starts_with('.');
                !hidden && !self.is_excluded(root, e.path())
            })
            .flatten()
            .filter(|e| e.file_type().is_dir() && FileKind::is_asset_dir(e.path(), project))
            .map(|e| e.into_path())
            .collect()
    }

    fn locate_manifest(&self, root: &Path, project: &ProjectConfig) -> Option<PathBuf> {
        let mut manifests: Vec<PathBuf> = WalkBuilder::new(root)
            .hidden(true)
            .max_depth(Some(4))
            .build()
            .filter_map(|entry| entry.ok())
            .map(|entry| entry.into_path())
            .filter(|path| !self.is_excluded(root, path))
            .filter(|path| FileKind::from_path(path, project) == Some(FileKind::Manifest))
            .collect();

        manifests.sort();
        if manifests.len() > 1 {
            debug!("Multiple manifests found, using {}", manifests[0].display());
        }
        manifests.into_iter().next()
    }
}
