//! Walking backed by the `backtrace` crate's unwinder and symbolizer.

use crate::CapturedFrame;
use backtrace::{Backtrace, Frame};
use core::ffi::c_void;

/// Yields the logical frames from the entry point outwards.
///
/// `walker_address` is the start of the `#[inline(never)]` function which
/// called this one. When the entry point has no frame of its own, because it
/// was turned into a tail call, the walk starts just past the walker instead.
pub fn trace(
    entry_point_address: *mut c_void,
    walker_address: *mut c_void,
    cb: &mut dyn FnMut(CapturedFrame) -> bool,
) {
    // Unwind everything up front so the entry point is known before any
    // symbol gets resolved.
    let mut physical = Vec::new();
    backtrace::trace(|frame| {
        physical.push(frame.clone());
        true
    });

    let position = |address: *mut c_void| {
        physical
            .iter()
            .position(|frame| frame.symbol_address() == address)
    };
    let start = match position(entry_point_address) {
        Some(i) => i,
        None => match position(walker_address) {
            Some(i) => {
                log::debug!(
                    "entry point {:p} has no frame, starting past the walker",
                    entry_point_address
                );
                i + 1
            }
            None => {
                log::debug!(
                    "entry point {:p} not found among {} frames, not skipping unwinder frames",
                    entry_point_address,
                    physical.len()
                );
                0
            }
        },
    };

    for frame in &physical[start..] {
        if !each_symbol(frame, cb) {
            break;
        }
    }
}

/// Yields one frame per symbol of `frame`, or a single unresolved frame.
fn each_symbol(frame: &Frame, cb: &mut dyn FnMut(CapturedFrame) -> bool) -> bool {
    let ip = frame.ip() as usize;
    let mut keep_going = true;
    let mut any_symbol = false;
    backtrace::resolve_frame(frame, |symbol| {
        any_symbol = true;
        if keep_going {
            keep_going = cb(CapturedFrame::from_symbol(
                ip,
                symbol.name(),
                symbol.filename(),
                symbol.lineno(),
            ));
        }
    });
    if !any_symbol {
        keep_going = cb(CapturedFrame::unresolved(ip));
    }
    keep_going
}

/// Converts a previously captured `Backtrace` into frames, innermost first.
///
/// A `Backtrace` which was never resolved yields only unresolved frames.
pub(crate) fn from_backtrace(backtrace: &Backtrace) -> Vec<CapturedFrame> {
    let mut frames = Vec::new();
    for frame in backtrace.frames() {
        let ip = frame.ip() as usize;
        let symbols = frame.symbols();
        if symbols.is_empty() {
            frames.push(CapturedFrame::unresolved(ip));
            continue;
        }
        frames.extend(symbols.iter().map(|symbol| {
            CapturedFrame::from_symbol(ip, symbol.name(), symbol.filename(), symbol.lineno())
        }));
    }
    frames
}
