//! Resolution of the knobs controlling how a stack trace is rendered.

#[cfg(feature = "serialize-serde")]
use serde::{Deserialize, Serialize};

/// The effective settings for one rendered stack trace.
///
/// A configuration is built once per render, either from
/// `StackTraceConfig::default()` or by applying a sequence of
/// [`StackTraceOption`]s with [`StackTraceConfig::new`], and is only read
/// afterwards.
///
/// No validation happens here. Empty separators are accepted and simply
/// concatenate the fields they would have separated.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serialize-serde", derive(Deserialize, Serialize))]
pub struct StackTraceConfig {
    /// Number of innermost frames to omit. Frame 0 is the function which
    /// was called to produce the trace.
    pub skip_frames: usize,
    /// Read each frame's source file and embed the literal line.
    pub include_source_code: bool,
    /// Append the frame's instruction address to the header.
    pub include_pc: bool,
    /// Print `method` instead of `my_crate::module::Type::method`.
    pub short_func_names: bool,
    /// Print the full path of the source file instead of its file name.
    pub show_full_path: bool,
    /// Append `:line` to the file in the header.
    pub show_line_numbers: bool,
    /// Placed between two rendered frames.
    pub frame_separator: String,
    /// Placed between the header and the body of a frame.
    pub chunk_separator: String,
    /// Prefix of the body of every frame.
    pub chunk_indentation: String,
}

impl Default for StackTraceConfig {
    fn default() -> StackTraceConfig {
        StackTraceConfig {
            skip_frames: 0,
            include_source_code: true,
            include_pc: true,
            short_func_names: true,
            show_full_path: true,
            show_line_numbers: true,
            frame_separator: "\n".to_string(),
            chunk_separator: "\n".to_string(),
            chunk_indentation: "\t".to_string(),
        }
    }
}

impl StackTraceConfig {
    /// Creates a configuration from the defaults with every option applied
    /// in order.
    ///
    /// When two options set the same field the later one wins.
    ///
    /// # Example
    ///
    /// ```
    /// use pretty_stack::{StackTraceConfig, StackTraceOption};
    ///
    /// let config = StackTraceConfig::new(vec![
    ///     StackTraceOption::IncludePc(false),
    ///     StackTraceOption::SkipFrames(1),
    ///     StackTraceOption::SkipFrames(2),
    /// ]);
    /// assert!(!config.include_pc);
    /// assert_eq!(config.skip_frames, 2);
    /// ```
    pub fn new<I>(options: I) -> StackTraceConfig
    where
        I: IntoIterator<Item = StackTraceOption>,
    {
        let mut config = StackTraceConfig::default();
        for option in options {
            config.apply(option);
        }
        config
    }

    /// Sets the single field `option` targets.
    pub fn apply(&mut self, option: StackTraceOption) {
        match option {
            StackTraceOption::SkipFrames(skip) => self.skip_frames = skip,
            StackTraceOption::IncludeSourceCode(include) => self.include_source_code = include,
            StackTraceOption::IncludePc(include) => self.include_pc = include,
            StackTraceOption::ShortFuncNames(short) => self.short_func_names = short,
            StackTraceOption::ShowFullPath(full) => self.show_full_path = full,
            StackTraceOption::ShowLineNumbers(show) => self.show_line_numbers = show,
            StackTraceOption::FrameSeparator(sep) => self.frame_separator = sep,
            StackTraceOption::ChunkSeparator(sep) => self.chunk_separator = sep,
            StackTraceOption::ChunkIndentation(indent) => self.chunk_indentation = indent,
        }
    }
}

/// A mutator for exactly one field of [`StackTraceConfig`].
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serialize-serde", derive(Deserialize, Serialize))]
pub enum StackTraceOption {
    /// Sets [`StackTraceConfig::skip_frames`].
    SkipFrames(usize),
    /// Sets [`StackTraceConfig::include_source_code`].
    IncludeSourceCode(bool),
    /// Sets [`StackTraceConfig::include_pc`].
    IncludePc(bool),
    /// Sets [`StackTraceConfig::short_func_names`].
    ShortFuncNames(bool),
    /// Sets [`StackTraceConfig::show_full_path`].
    ShowFullPath(bool),
    /// Sets [`StackTraceConfig::show_line_numbers`].
    ShowLineNumbers(bool),
    /// Sets [`StackTraceConfig::frame_separator`].
    FrameSeparator(String),
    /// Sets [`StackTraceConfig::chunk_separator`].
    ChunkSeparator(String),
    /// Sets [`StackTraceConfig::chunk_indentation`].
    ChunkIndentation(String),
}
