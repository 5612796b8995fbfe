//! A library to render the current call stack of a Rust program as a
//! human-readable, configurable text report.
//!
//! The report is typically produced from a panic hook or an error path and
//! handed on as bytes: this crate only formats, where the output goes is up
//! to the caller.
//!
//! Every frame is rendered as a header and a body:
//!
//! ```text
//! /home/user/app/src/main.rs:12 (0x55d4c3a1b2c7)
//! 	run: let trace = pretty_stack::stack_trace(&config);
//! ```
//!
//! The header holds the source file, the line number and the instruction
//! address of the frame, and the body holds the function name and the
//! literal source line. Which of these are shown, and how frames and chunks
//! are separated, is controlled by a [`StackTraceConfig`].
//!
//! # Usage
//!
//! First, add this to your Cargo.toml
//!
//! ```toml
//! [dependencies]
//! pretty-stack = "0.1"
//! ```
//!
//! Next:
//!
//! ```
//! use pretty_stack::StackTraceOption;
//!
//! let report = pretty_stack::new_stack_trace(vec![
//!     StackTraceOption::SkipFrames(1),
//!     StackTraceOption::ShowFullPath(false),
//! ]);
//! eprintln!("{}", String::from_utf8_lossy(&report));
//! ```
//!
//! # Cargo features
//!
//! * `backtrace` (default): walk the live stack with the `backtrace` crate.
//!   Without it only [`render_frames`] produces non-empty reports.
//! * `cpp_demangle`: demangle C++ symbols in live traces.
//! * `serialize-serde`: `serde` support for [`StackTraceConfig`],
//!   [`StackTraceOption`] and [`CapturedFrame`].

#![doc(html_root_url = "https://docs.rs/pretty-stack")]
#![deny(missing_docs)]

pub use crate::config::{StackTraceConfig, StackTraceOption};
pub use crate::format::{new_stack_trace, render_frames, stack_trace, write_stack_trace};
pub use crate::symbolize::{qualified_name, short_name};
pub use crate::types::CapturedFrame;
pub use crate::walk::capture_frames;

mod config;
mod format;
mod source;
mod symbolize;
mod types;
mod walk;

cfg_if::cfg_if! {
    if #[cfg(feature = "backtrace")] {
        pub use crate::format::render_backtrace;
    }
}
