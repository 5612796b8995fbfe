//! Source line lookup for rendered frames.
//!
//! Only the most recently read file is kept. Walks commonly visit the same
//! file several times in a row (recursion, a module calling into itself), and
//! that is the only repetition this cache serves: looking up a different file
//! replaces the entry. It is deliberately a single slot and not an LRU.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Why no source line could be produced for a frame.
#[derive(Debug, thiserror::Error)]
pub(crate) enum SourceError {
    #[error("source file is unknown")]
    Unknown,
    #[error("failed to read {}: {source}", .path.display())]
    Read { path: PathBuf, source: io::Error },
    #[error("line number is unknown")]
    NoLine,
    #[error("line {line} is out of range for a file of {len} lines")]
    OutOfRange { line: u32, len: usize },
}

/// A single-slot cache of the lines of one source file.
#[derive(Debug, Default)]
pub(crate) struct SourceCache {
    slot: Option<(PathBuf, Vec<String>)>,
}

impl SourceCache {
    pub(crate) fn new() -> SourceCache {
        SourceCache::default()
    }

    /// Returns line `line` (1-indexed) of `file` with surrounding whitespace
    /// trimmed.
    pub(crate) fn line(
        &mut self,
        file: Option<&Path>,
        line: Option<u32>,
    ) -> Result<&str, SourceError> {
        let file = match file {
            Some(file) => file,
            None => {
                self.slot = None;
                return Err(SourceError::Unknown);
            }
        };
        let lines = self.load(file)?;
        let line = line.ok_or(SourceError::NoLine)?;
        let len = lines.len();
        match (line as usize).checked_sub(1).and_then(|i| lines.get(i)) {
            Some(text) => Ok(text.trim()),
            None => Err(SourceError::OutOfRange { line, len }),
        }
    }

    fn load(&mut self, file: &Path) -> Result<&[String], SourceError> {
        let cached = matches!(&self.slot, Some((path, _)) if path == file);
        if !cached {
            // A failed read leaves the slot empty, never holding stale lines.
            self.slot = None;
            let data = fs::read(file).map_err(|source| SourceError::Read {
                path: file.to_path_buf(),
                source,
            })?;
            let lines = String::from_utf8_lossy(&data)
                .split('\n')
                .map(str::to_owned)
                .collect();
            self.slot = Some((file.to_path_buf(), lines));
        }
        Ok(self.slot.as_ref().map_or(&[][..], |(_, lines)| lines.as_slice()))
    }

    #[cfg(test)]
    fn cached_path(&self) -> Option<&Path> {
        self.slot.as_ref().map(|(path, _)| path.as_path())
    }
}
