/*!
 * Output document writer for dumpctx
 */

use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;

use log::debug;

use crate::config::Config;
use crate::error::{DumpCtxError, Result};
use crate::types::Snapshot;

/// Writes a snapshot to the configured output file
pub struct SnapshotWriter {
    /// Writer configuration
    config: Config,
}

impl SnapshotWriter {
    /// Create a new writer
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    /// Write the whole document in one go and return the absolute output path
    pub fn write(&self, snapshot: &Snapshot) -> Result<PathBuf> {
        let path = &self.config.output_file;
        let write_err = |source: io::Error| DumpCtxError::Write {
            path: path.clone(),
            source,
        };

        let file = File::create(path).map_err(write_err)?;
        let mut writer = BufWriter::new(file);
        writer.write_all(&snapshot.document()).map_err(write_err)?;
        writer.flush().map_err(write_err)?;
        debug!("Wrote {}", path.display());

        Ok(fs::canonicalize(path).unwrap_or_else(|_| path.clone()))
    }
}
