use crate::error::OutputError;
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

const MAX_FOLDER_CHARS: usize = 80;
const RESERVED: &[char] = &['<', '>', ':', '"', '/', '\\', '|', '?', '*'];

/// Directory structure under the output root
#[derive(Debug, Clone)]
pub struct OutputLayout {
    root: PathBuf,
}

impl OutputLayout {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn downloads_dir(&self, folder: &str) -> PathBuf {
        self.root.join("all_downloads").join(folder)
    }

    pub fn curated_dir(&self, folder: &str) -> PathBuf {
        self.root.join("curated").join(folder)
    }

    pub fn reports_dir(&self) -> PathBuf {
        self.root.join("reports")
    }

    pub fn analysis_path(&self, folder: &str) -> PathBuf {
        self.reports_dir().join(format!("{}_analysis.json", folder))
    }

    /// Create the top-level directories
    pub fn prepare(&self) -> Result<(), OutputError> {
        for dir in ["all_downloads", "curated", "reports"] {
            fs::create_dir_all(self.root.join(dir)).map_err(OutputError::CreateDir)?;
        }
        Ok(())
    }
}

/// Replace characters that are not allowed in a file name with `_`
pub fn file_safe(name: &str) -> String {
    name.chars()
        .map(|c| if RESERVED.contains(&c) || c.is_control() { '_' } else { c })
        .collect()
}

/// Filesystem-safe folder name for a location
pub fn folder_name(location: &str) -> String {
    let stripped: String = location.chars().filter(|c| !RESERVED.contains(c)).collect();
    let joined = stripped.split_whitespace().collect::<Vec<_>>().join("_");
    let capped: String = joined.chars().take(MAX_FOLDER_CHARS).collect();

    if capped.is_empty() {
        "location".to_string()
    } else {
        capped
    }
}

/// Tracks assigned folder names so two locations never share one
#[derive(Debug, Default)]
pub struct FolderNames {
    used: HashSet<String>,
}

impl FolderNames {
    pub fn assign(&mut self, location: &str) -> String {
        let base = folder_name(location);
        let mut candidate = base.clone();
        let mut n = 2;
        while !self.used.insert(candidate.clone()) {
            candidate = format!("{}_{}", base, n);
            n += 1;
        }
        candidate
    }
}
