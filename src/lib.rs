/*!
 * dumpctx - Snapshot a directory into a single text document
 *
 * This library walks a directory, selects files with include/exclude glob
 * patterns, and produces one document holding a rendered tree of the
 * selected files followed by their contents.
 */

pub mod collector;
pub mod config;
pub mod error;
pub mod matcher;
pub mod report;
pub mod types;
pub mod utils;
pub mod writer;


// Re-export main components for easier access
pub use collector::{render_tree, TreeCollector};
pub use config::{split_patterns, Config};
pub use error::{DumpCtxError, Result};
pub use matcher::{is_included, matches, Matcher};
pub use report::{ReportFormat, Reporter, ScanReport};
pub use types::{PathEntry, SelectedFile, Selection, SkippedFile, Snapshot};
pub use writer::SnapshotWriter;

/// Version of the library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
