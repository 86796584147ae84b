/*!
 * Directory walking, tree rendering and content assembly
 */

use std::fs;
use std::sync::Arc;

use indicatif::ProgressBar;
use log::{debug, info, warn};
use walkdir::WalkDir;

use crate::config::Config;
use crate::error::{DumpCtxError, Result};
use crate::matcher::{base_name, Matcher};
use crate::types::{
    ContentSection, IncludedFile, PathEntry, SelectedFile, Selection, SkippedFile, Snapshot,
};
use crate::utils::{count_lines, to_posix};

/// Indentation per tree level
const INDENT: &str = "    ";

/// Walks the target directory and builds a [`Snapshot`] of the selected files
pub struct TreeCollector {
    /// Collector configuration
    config: Config,
    matcher: Matcher,
    /// Progress bar
    pub progress: Arc<ProgressBar>,
}

impl TreeCollector {
    /// Create a new collector
    pub fn new(config: Config, progress: Arc<ProgressBar>) -> Self {
        let matcher = Matcher::new(&config.include_patterns, &config.exclude_patterns);
        Self {
            config,
            matcher,
            progress,
        }
    }

    /// Walk, select, render and read everything.
    ///
    /// Returns `Ok(None)` when no file was selected.
    pub fn collect(&self) -> Result<Option<Snapshot>> {
        let selection = self.walk()?;
        if selection.is_empty() {
            info!("No files selected under {}", self.config.target_dir.display());
            return Ok(None);
        }

        let tree = render_tree(&selection.path_entries());
        let content = self.assemble_content(&selection.files);

        Ok(Some(Snapshot {
            tree,
            content: content.bytes,
            included: content.included,
            skipped: content.skipped,
            directories: selection.directory_count(),
        }))
    }

    /// Walk the target directory and record every selected file.
    ///
    /// Any error while traversing aborts the walk.
    pub fn walk(&self) -> Result<Selection> {
        let root = &self.config.target_dir;
        let mut selection = Selection::default();

        self.progress.set_message(format!("Scanning {}", root.display()));

        for entry in WalkDir::new(root).sort_by_file_name() {
            let entry = entry?;
            if entry.file_type().is_dir() {
                continue;
            }

            let rel_path = entry.path().strip_prefix(root).map_err(|_| {
                DumpCtxError::PathResolution {
                    path: entry.path().to_path_buf(),
                    root: root.clone(),
                }
            })?;
            let path = to_posix(rel_path);
            if path.is_empty() {
                continue;
            }

            if !self.matcher.is_included(&path) {
                debug!("Not selected: {}", path);
                continue;
            }

            debug!("Selected: {}", path);
            selection.record(&path, rel_path);
        }

        self.progress.set_length(selection.files.len() as u64);
        Ok(selection)
    }

    /// Read every file in order and concatenate its block.
    ///
    /// Unreadable files are logged and left out; they never fail the run.
    pub fn assemble_content(&self, files: &[SelectedFile]) -> ContentSection {
        let mut section = ContentSection::default();

        for SelectedFile { path, rel_path } in files {
            self.progress
                .set_message(format!("Reading {}", base_name(path)));
            self.progress.inc(1);

            let content = match fs::read(self.config.target_dir.join(rel_path)) {
                Ok(content) => content,
                Err(e) => {
                    warn!("Error reading file {}: {}", path, e);
                    section.skipped.push(SkippedFile {
                        path: path.clone(),
                        reason: e.to_string(),
                    });
                    continue;
                }
            };

            section
                .bytes
                .extend_from_slice(format!("\n=== File: {} ===\n", path).as_bytes());
            section.bytes.extend_from_slice(&content);
            section.bytes.push(b'\n');

            section.included.push(IncludedFile {
                path: path.clone(),
                size: content.len() as u64,
                lines: count_lines(&content),
            });
        }

        section
    }
}

/// Render entries as an indented listing.
///
/// Entries are sorted by their full path string, not traversed as a
/// hierarchy, so a nested entry can land between shallower siblings (e.g.
/// `a-b` sorts before `a/x`). Each line is the base name indented four
/// spaces per `/` in the path, with a trailing `/` for directories.
pub fn render_tree(entries: &[PathEntry]) -> String {
    let mut sorted: Vec<&PathEntry> = entries.iter().collect();
    sorted.sort_by(|a, b| a.path.cmp(&b.path));

    let mut tree = String::new();
    for entry in sorted {
        let depth = entry.path.matches('/').count();
        tree.push_str(&INDENT.repeat(depth));
        tree.push_str(base_name(&entry.path));
        if entry.is_directory {
            tree.push('/');
        }
        tree.push('\n');
    }

    tree
}
