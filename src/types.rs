//! Owned frame data shared by live walks and pre-captured traces.

use std::path::{Path, PathBuf};

#[cfg(feature = "serialize-serde")]
use serde::{Deserialize, Serialize};

/// One logical frame of a stack trace.
///
/// Frames yielded by a live walk always carry the instruction pointer of the
/// physical frame they came from. When a physical frame has inlined callees
/// each of them becomes its own `CapturedFrame` sharing that `ip`, innermost
/// first. Any of the other fields may be missing when the symbolizer could
/// not learn about them, in which case they render as `???`.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serialize-serde", derive(Deserialize, Serialize))]
pub struct CapturedFrame {
    /// Instruction pointer of the frame.
    pub ip: usize,
    /// Source file the frame's code was compiled from.
    pub file: Option<PathBuf>,
    /// 1-indexed line within `file`.
    pub line: Option<u32>,
    /// Qualified symbol name, either already demangled or in raw mangled
    /// form.
    pub symbol: Option<String>,
}

impl CapturedFrame {
    /// A frame the symbolizer knows nothing about beyond its address.
    pub fn unresolved(ip: usize) -> CapturedFrame {
        CapturedFrame {
            ip,
            ..CapturedFrame::default()
        }
    }

    /// Returns the path shown in the frame header, `None` if the file is
    /// unknown.
    ///
    /// With `full` unset only the final component is shown, falling back to
    /// the whole path when it has none (for example `..`).
    pub fn display_path(&self, full: bool) -> Option<String> {
        let file = self.file.as_deref()?;
        let shown = if full {
            file
        } else {
            file.file_name().map(Path::new).unwrap_or(file)
        };
        Some(shown.display().to_string())
    }
}

#[cfg(feature = "backtrace")]
impl CapturedFrame {
    pub(crate) fn from_symbol(
        ip: usize,
        name: Option<backtrace::SymbolName<'_>>,
        file: Option<&Path>,
        line: Option<u32>,
    ) -> CapturedFrame {
        CapturedFrame {
            ip,
            file: file.map(Path::to_path_buf),
            line,
            // The alternate form leaves off the trailing hash of legacy
            // mangled Rust symbols.
            symbol: name.map(|name| format!("{:#}", name)),
        }
    }
}
