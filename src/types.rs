/*!
 * Core types and data structures for dumpctx
 */

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// A path recorded in the rendered tree
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathEntry {
    /// Path relative to the scan root, `/`-separated
    pub path: String,
    /// Whether the entry is an ancestor directory of a selected file
    pub is_directory: bool,
}

impl PathEntry {
    pub fn directory(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            is_directory: true,
        }
    }

    pub fn file(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            is_directory: false,
        }
    }
}

/// A file chosen during the walk
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectedFile {
    /// `/`-separated form used for matching, the tree and headers
    pub path: String,
    /// Path relative to the scan root as found on disk
    pub rel_path: PathBuf,
}

/// Files chosen during the walk together with every directory they imply
#[derive(Debug, Clone, Default)]
pub struct Selection {
    /// Selected files in walk order
    pub files: Vec<SelectedFile>,
    /// Path -> is_directory, for files and all their ancestors
    pub entries: BTreeMap<String, bool>,
}

impl Selection {
    /// Record a selected file and all of its ancestor directories
    pub fn record(&mut self, path: &str, rel_path: &Path) {
        let mut components: Vec<&str> = path
            .split('/')
            .filter(|c| !c.is_empty() && *c != ".")
            .collect();
        components.pop();

        let mut current = String::new();
        for component in components {
            if !current.is_empty() {
                current.push('/');
            }
            current.push_str(component);
            self.entries.insert(current.clone(), true);
        }

        self.entries.insert(path.to_string(), false);
        self.files.push(SelectedFile {
            path: path.to_string(),
            rel_path: rel_path.to_path_buf(),
        });
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    /// Selected paths in walk order
    pub fn paths(&self) -> Vec<&str> {
        self.files.iter().map(|f| f.path.as_str()).collect()
    }

    /// Number of distinct directories implied by the selected files
    pub fn directory_count(&self) -> usize {
        self.entries.values().filter(|is_dir| **is_dir).count()
    }

    /// All recorded entries, ordered by path
    pub fn path_entries(&self) -> Vec<PathEntry> {
        self.entries
            .iter()
            .map(|(path, is_directory)| PathEntry {
                path: path.clone(),
                is_directory: *is_directory,
            })
            .collect()
    }
}

/// A selected file whose content made it into the document
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IncludedFile {
    /// Path relative to the scan root
    pub path: String,
    /// Size of the content in bytes
    pub size: u64,
    /// Number of lines in the content
    pub lines: usize,
}

/// A selected file whose content could not be read
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedFile {
    /// Path relative to the scan root
    pub path: String,
    /// Read error description
    pub reason: String,
}

/// The content section of the document
#[derive(Debug, Clone, Default)]
pub struct ContentSection {
    /// Concatenated file blocks
    pub bytes: Vec<u8>,
    pub included: Vec<IncludedFile>,
    pub skipped: Vec<SkippedFile>,
}

/// Everything needed to write the output document
#[derive(Debug, Clone)]
pub struct Snapshot {
    /// Rendered tree, one line per entry, each terminated by a newline
    pub tree: String,
    /// Concatenated file blocks
    pub content: Vec<u8>,
    /// Files whose content was emitted, in walk order
    pub included: Vec<IncludedFile>,
    /// Selected files that could not be read
    pub skipped: Vec<SkippedFile>,
    /// Number of directories in the tree
    pub directories: usize,
}

impl Snapshot {
    /// Tree, blank line, then content blocks
    pub fn document(&self) -> Vec<u8> {
        let mut doc = Vec::with_capacity(self.tree.len() + 1 + self.content.len());
        doc.extend_from_slice(self.tree.as_bytes());
        doc.push(b'\n');
        doc.extend_from_slice(&self.content);
        doc
    }
}
