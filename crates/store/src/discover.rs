//! Finding board files below a directory.

use std::path::{Path, PathBuf};

use tracing::debug;
use walkdir::{DirEntry, WalkDir};

use crate::file::{BOARD_FILE_NAME, read_board};

/// How many directory levels below the start directory are searched.
pub const MAX_SCAN_DEPTH: usize = 3;

/// A directory holding a board file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Project {
    /// Board name, or the directory name if the board has none.
    pub name: String,
    /// Path of the board file.
    pub path: PathBuf,
    /// Directory containing the board file.
    pub dir: PathBuf,
}

impl Project {
    /// Returns the project directory relative to `base`, for display.
    ///
    /// # Examples
    ///
    /// ```
    /// use std::path::PathBuf;
    /// use cardstack_store::Project;
    ///
    /// let project = Project {
    ///     name: "api".into(),
    ///     path: PathBuf::from("/work/api/.cardstack.yaml"),
    ///     dir: PathBuf::from("/work/api"),
    /// };
    /// assert_eq!(project.display_path("/work".as_ref()), "api");
    /// assert_eq!(project.display_path("/work/api".as_ref()), "(current directory)");
    /// ```
    #[must_use]
    pub fn display_path(&self, base: &Path) -> String {
        match self.dir.strip_prefix(base) {
            Ok(rel) if rel.as_os_str().is_empty() => "(current directory)".to_string(),
            Ok(rel) => rel.display().to_string(),
            Err(_) => self.dir.display().to_string(),
        }
    }
}

fn is_hidden(entry: &DirEntry) -> bool {
    entry.file_name().to_str().is_some_and(|s| s.starts_with('.'))
}

fn project_in(dir: &Path) -> Option<Project> {
    let path = dir.join(BOARD_FILE_NAME);
    if !path.is_file() {
        return None;
    }
    let fallback = dir
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| dir.display().to_string());
    let name = read_board(&path)
        .ok()
        .map(|b| b.name)
        .filter(|n| !n.is_empty())
        .unwrap_or(fallback);
    Some(Project {
        name,
        path,
        dir: dir.to_path_buf(),
    })
}

/// Scans `start` and its subdirectories for board files.
///
/// Hidden directories are skipped, and the scan does not descend into a
/// directory that is itself a project. Unreadable directories are ignored.
///
/// # Examples
///
/// ```no_run
/// use cardstack_store::scan_projects;
///
/// for project in scan_projects(".") {
///     println!("{} at {}", project.name, project.path.display());
/// }
/// ```
#[must_use]
pub fn scan_projects(start: impl AsRef<Path>) -> Vec<Project> {
    let start = start.as_ref();
    let mut projects = Vec::new();
    let mut walker = WalkDir::new(start)
        .max_depth(MAX_SCAN_DEPTH)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|e| e.depth() == 0 || !is_hidden(e));

    while let Some(entry) = walker.next() {
        let Ok(entry) = entry else { continue };
        if !entry.file_type().is_dir() {
            continue;
        }
        if let Some(project) = project_in(entry.path()) {
            debug!(path = %project.path.display(), "found project");
            projects.push(project);
            if entry.depth() > 0 {
                walker.skip_current_dir();
            }
        }
    }
    projects
}
