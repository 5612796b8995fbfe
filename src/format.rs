use crate::source::{SourceCache, SourceError};
use crate::symbolize::{self, UNKNOWN};
use crate::{walk, CapturedFrame, StackTraceConfig, StackTraceOption};
use core::ffi::c_void;
use core::fmt;
use std::io;

/// Renders the current call stack according to `config`.
///
/// The first frame of the report is the frame of this function itself;
/// `config.skip_frames` counts outwards from there, so a skip of 1 makes the
/// report start at the caller.
///
/// Rendering never fails. Anything that cannot be resolved, such as a
/// frame without debug info or a source file which is not on disk, is
/// printed as `???`. If the stack has no more than `skip_frames` frames the
/// report is empty.
///
/// # Example
///
/// ```
/// use pretty_stack::{stack_trace, StackTraceConfig, StackTraceOption};
///
/// let config = StackTraceConfig::new(vec![StackTraceOption::IncludeSourceCode(false)]);
/// let report = stack_trace(&config);
/// println!("{}", String::from_utf8_lossy(&report));
/// ```
///
/// # Required features
///
/// Without the `backtrace` feature no frames can be walked and the report
/// is always empty.
#[inline(never)]
pub fn stack_trace(config: &StackTraceConfig) -> Vec<u8> {
    let frames = walk::frames(config.skip_frames, stack_trace as *mut c_void);
    format_frames(config, &frames)
}

/// Same as `stack_trace`, building the configuration from `options` first.
///
/// The first frame of the report is the frame of this function.
#[inline(never)]
pub fn new_stack_trace<I>(options: I) -> Vec<u8>
where
    I: IntoIterator<Item = StackTraceOption>,
{
    let config = StackTraceConfig::new(options);
    let frames = walk::frames(config.skip_frames, new_stack_trace::<I> as *mut c_void);
    format_frames(&config, &frames)
}

/// Renders the current call stack into `stream`.
///
/// This is `stack_trace` for callers which already have somewhere to put
/// the report, the first frame of which is the frame of this function. The
/// only error returned is one from `stream`.
#[inline(never)]
pub fn write_stack_trace<W: io::Write>(mut stream: W, config: &StackTraceConfig) -> io::Result<()> {
    let frames = walk::frames(config.skip_frames, write_stack_trace::<W> as *mut c_void);
    stream.write_all(&format_frames(config, &frames))
}

/// Renders frames captured earlier, innermost first.
///
/// `config.skip_frames` drops frames from the front of `frames`.
///
/// # Example
///
/// ```
/// use pretty_stack::{render_frames, CapturedFrame, StackTraceConfig, StackTraceOption};
///
/// let frames = [CapturedFrame {
///     ip: 0x1000,
///     file: Some("/src/app/main.rs".into()),
///     line: Some(7),
///     symbol: Some("app::main".to_string()),
/// }];
/// let config = StackTraceConfig::new(vec![StackTraceOption::IncludeSourceCode(false)]);
/// assert_eq!(render_frames(&config, &frames), b"/src/app/main.rs:7 (0x1000)\n\tmain");
/// ```
pub fn render_frames(config: &StackTraceConfig, frames: &[CapturedFrame]) -> Vec<u8> {
    let frames = frames.get(config.skip_frames..).unwrap_or(&[]);
    format_frames(config, frames)
}

/// Renders a `Backtrace` captured earlier, for example from a panic hook.
///
/// Every frame of `backtrace` expands into one rendered frame per symbol.
/// Frames of a `Backtrace` which was never resolved render as `???`.
///
/// # Required features
///
/// This function requires the `backtrace` feature of this crate to be
/// enabled, and the `backtrace` feature is enabled by default.
#[cfg(feature = "backtrace")]
pub fn render_backtrace(config: &StackTraceConfig, backtrace: &backtrace::Backtrace) -> Vec<u8> {
    render_frames(config, &walk::from_backtrace(backtrace))
}

fn format_frames(config: &StackTraceConfig, frames: &[CapturedFrame]) -> Vec<u8> {
    FormatFrames { config, frames }.to_string().into_bytes()
}

struct FormatFrames<'a> {
    config: &'a StackTraceConfig,
    frames: &'a [CapturedFrame],
}

impl fmt::Display for FormatFrames<'_> {
    fn fmt(&self, fmt: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Scoped to this render, never shared between calls.
        let mut source = SourceCache::new();
        for (i, frame) in self.frames.iter().enumerate() {
            if i > 0 {
                fmt.write_str(&self.config.frame_separator)?;
            }
            let mut frame_fmt = FrameFmt {
                config: self.config,
                frame,
                fmt: &mut *fmt,
            };
            frame_fmt.header()?;
            frame_fmt.fmt.write_str(&self.config.chunk_separator)?;
            frame_fmt.body(&mut source)?;
        }
        Ok(())
    }
}

struct FrameFmt<'a, 'b, 'c> {
    config: &'a StackTraceConfig,
    frame: &'a CapturedFrame,
    fmt: &'b mut fmt::Formatter<'c>,
}

impl FrameFmt<'_, '_, '_> {
    /// `path[:line][ (0xip)]`
    fn header(&mut self) -> fmt::Result {
        match self.frame.display_path(self.config.show_full_path) {
            Some(path) => self.fmt.write_str(&path)?,
            None => self.fmt.write_str(UNKNOWN)?,
        }
        if self.config.show_line_numbers {
            match self.frame.line {
                Some(line) => write!(self.fmt, ":{}", line)?,
                None => write!(self.fmt, ":{}", UNKNOWN)?,
            }
        }
        if self.config.include_pc {
            write!(self.fmt, " ({:#x})", self.frame.ip)?;
        }
        Ok(())
    }

    /// `<indent>name[: source line]`
    fn body(&mut self, source: &mut SourceCache) -> fmt::Result {
        if self.frame.symbol.is_none() {
            log::trace!("no symbol for frame at {:#x}", self.frame.ip);
        }
        let name = symbolize::function_name(
            self.frame.symbol.as_deref(),
            self.config.short_func_names,
        );
        self.fmt.write_str(&self.config.chunk_indentation)?;
        self.fmt.write_str(&name)?;
        if !self.config.include_source_code {
            return Ok(());
        }
        let code = match source.line(self.frame.file.as_deref(), self.frame.line) {
            Ok(code) => code,
            Err(e @ SourceError::Read { .. }) => {
                log::debug!("{}", e);
                UNKNOWN
            }
            Err(e) => {
                log::trace!("no source line for frame at {:#x}: {}", self.frame.ip, e);
                UNKNOWN
            }
        };
        write!(self.fmt, ": {}", code)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write as _;
    use std::path::PathBuf;
    use tempfile::NamedTempFile;

    fn frame(file: &str, line: u32, ip: usize, symbol: &str) -> CapturedFrame {
        CapturedFrame {
            ip,
            file: Some(PathBuf::from(file)),
            line: Some(line),
            symbol: Some(symbol.to_string()),
        }
    }

    fn render(options: Vec<StackTraceOption>, frames: &[CapturedFrame]) -> String {
        let config = StackTraceConfig::new(options);
        String::from_utf8(render_frames(&config, frames)).unwrap()
    }

    fn no_source() -> Vec<StackTraceOption> {
        vec![StackTraceOption::IncludeSourceCode(false)]
    }

    #[test]
    fn default_layout() {
        let mut src = NamedTempFile::new().unwrap();
        writeln!(src, "fn main() {{").unwrap();
        writeln!(src, "    run(1);").unwrap();
        writeln!(src, "}}").unwrap();
        let path = src.path().to_str().unwrap().to_string();

        let frames = [
            frame(&path, 2, 0x1234, "app::main"),
            frame(&path, 1, 0x5678, "std::rt::lang_start"),
        ];
        let expected = format!(
            "{p}:2 (0x1234)\n\tmain: run(1);\n{p}:1 (0x5678)\n\tlang_start: fn main() {{",
            p = path
        );
        assert_eq!(render(vec![], &frames), expected);
    }

    #[test]
    fn optional_header_parts() {
        let frames = [frame("/src/app/lib.rs", 12, 0xabc, "app::Server::run")];
        assert_eq!(render(no_source(), &frames), "/src/app/lib.rs:12 (0xabc)\n\trun");

        let mut options = no_source();
        options.push(StackTraceOption::IncludePc(false));
        assert_eq!(render(options, &frames), "/src/app/lib.rs:12\n\trun");

        let mut options = no_source();
        options.push(StackTraceOption::ShowLineNumbers(false));
        assert_eq!(render(options, &frames), "/src/app/lib.rs (0xabc)\n\trun");

        let mut options = no_source();
        options.push(StackTraceOption::ShowLineNumbers(false));
        options.push(StackTraceOption::IncludePc(false));
        assert_eq!(render(options, &frames), "/src/app/lib.rs\n\trun");

        let mut options = no_source();
        options.push(StackTraceOption::ShowFullPath(false));
        options.push(StackTraceOption::ShortFuncNames(false));
        assert_eq!(render(options, &frames), "lib.rs:12 (0xabc)\n\tapp::Server::run");
    }

    #[test]
    fn separators_and_indentation() {
        let frames = [
            frame("/a.rs", 1, 0x1, "a::one"),
            frame("/b.rs", 2, 0x2, "b::two"),
            frame("/c.rs", 3, 0x3, "c::three"),
        ];
        let mut options = no_source();
        options.push(StackTraceOption::IncludePc(false));
        options.push(StackTraceOption::FrameSeparator("|".to_string()));
        options.push(StackTraceOption::ChunkSeparator(" - ".to_string()));
        options.push(StackTraceOption::ChunkIndentation(String::new()));
        let out = render(options, &frames);
        assert_eq!(out, "/a.rs:1 - one|/b.rs:2 - two|/c.rs:3 - three");
        assert_eq!(out.matches('|').count(), frames.len() - 1);

        let mut options = no_source();
        options.push(StackTraceOption::FrameSeparator(String::new()));
        options.push(StackTraceOption::ChunkSeparator(String::new()));
        options.push(StackTraceOption::ChunkIndentation(String::new()));
        options.push(StackTraceOption::IncludePc(false));
        assert_eq!(render(options, &frames[..2]), "/a.rs:1one/b.rs:2two");
    }

    #[test]
    fn skip_frames() {
        let frames = [
            frame("/a.rs", 1, 0x1, "a::one"),
            frame("/b.rs", 2, 0x2, "b::two"),
        ];
        let mut options = no_source();
        options.push(StackTraceOption::SkipFrames(1));
        assert_eq!(render(options, &frames), "/b.rs:2 (0x2)\n\ttwo");

        for skip in [2, 3, 100] {
            let mut options = no_source();
            options.push(StackTraceOption::SkipFrames(skip));
            assert_eq!(render(options, &frames), "");
        }
        assert_eq!(render(vec![], &[]), "");
    }

    #[test]
    fn unresolved_frames() {
        let frames = [CapturedFrame::unresolved(0xdead)];
        assert_eq!(render(vec![], &frames), "???:??? (0xdead)\n\t???: ???");

        let frames = [CapturedFrame {
            line: None,
            ..frame("/missing/file.rs", 0, 0x1, "x::y")
        }];
        assert_eq!(render(vec![], &frames), "/missing/file.rs:??? (0x1)\n\ty: ???");
    }

    #[test]
    fn source_placeholders() {
        let mut src = NamedTempFile::new().unwrap();
        write!(src, "only line").unwrap();
        let path = src.path().to_str().unwrap().to_string();
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("gone.rs");
        let missing = missing.to_str().unwrap();

        let mut options = vec![
            StackTraceOption::IncludePc(false),
            StackTraceOption::ShowFullPath(false),
            StackTraceOption::FrameSeparator("\n".to_string()),
            StackTraceOption::ChunkSeparator(" ".to_string()),
        ];
        options.push(StackTraceOption::ChunkIndentation(String::new()));
        let frames = [
            frame(&path, 1, 0x1, "a::inside"),
            frame(&path, 2, 0x2, "a::past_end"),
            frame(missing, 1, 0x3, "a::unreadable"),
            frame(&path, 0, 0x4, "a::zero"),
        ];
        let base = src.path().file_name().unwrap().to_str().unwrap();
        let expected = format!(
            "{b}:1 inside: only line\n\
             {b}:2 past_end: ???\n\
             gone.rs:1 unreadable: ???\n\
             {b}:0 zero: ???",
            b = base
        );
        assert_eq!(render(options, &frames), expected);
    }

    #[test]
    fn mangled_symbols() {
        let frames = [frame("/m.rs", 3, 0x3, "_ZN7testing4main17h0123456789abcdefE")];
        assert_eq!(render(no_source(), &frames), "/m.rs:3 (0x3)\n\tmain");

        let mut options = no_source();
        options.push(StackTraceOption::ShortFuncNames(false));
        assert_eq!(render(options, &frames), "/m.rs:3 (0x3)\n\ttesting::main");
    }

    #[test]
    fn write_to_stream() {
        let mut out = Vec::new();
        let config = StackTraceConfig::new(vec![StackTraceOption::SkipFrames(usize::MAX)]);
        write_stack_trace(&mut out, &config).unwrap();
        assert!(out.is_empty());
    }
}
