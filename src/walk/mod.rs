//! Enumeration of the frames of the live call stack.

use crate::CapturedFrame;
use core::ffi::c_void;
use core::hint::black_box;

/// Captures the frames of the current call stack without rendering them.
///
/// Frame 0 is the frame of this function and the first `skip` frames are
/// left out. The result can be rendered later with
/// [`render_frames`](crate::render_frames), which is what `stack_trace` does
/// in one go.
///
/// # Example
///
/// ```
/// let frames = pretty_stack::capture_frames(1);
/// for frame in &frames {
///     println!("{:#x} {:?}", frame.ip, frame.symbol);
/// }
/// ```
///
/// # Required features
///
/// Without the `backtrace` feature this always returns no frames.
#[inline(never)]
pub fn capture_frames(skip: usize) -> Vec<CapturedFrame> {
    // Keeps the walk out of tail position so this function keeps its frame.
    black_box(frames(skip, capture_frames as *mut c_void))
}

/// Walks the current call stack, returning its frames innermost first.
///
/// Depth 0 is the frame of the function at `entry_point_address`, normally
/// the public entry point of this crate that was called to produce a trace,
/// and the first `skip` frames from there are left out. Frames belonging to
/// the unwinder itself, which sit above the entry point, are never returned.
///
/// When no frame can be matched to `entry_point_address`, because the entry
/// point was compiled into a tail call, depth 0 is the caller of this
/// function. On platforms without a working `symbol_address` neither can be
/// found and depth 0 is the innermost frame the unwinder reports.
#[inline(never)]
pub(crate) fn frames(skip: usize, entry_point_address: *mut c_void) -> Vec<CapturedFrame> {
    let mut captured = Vec::new();
    let mut depth = 0;
    trace_imp(entry_point_address, frames as *mut c_void, &mut |frame| {
        if depth >= skip {
            captured.push(frame);
        }
        depth += 1;
        true
    });
    captured
}

cfg_if::cfg_if! {
    if #[cfg(feature = "backtrace")] {
        mod unwind;
        use self::unwind::trace as trace_imp;
        pub(crate) use self::unwind::from_backtrace;
    } else {
        mod noop;
        use self::noop::trace as trace_imp;
    }
}

#[cfg(all(test, feature = "backtrace", target_os = "linux"))]
mod tests {
    use super::*;
    use core::ptr;

    #[inline(never)]
    fn without_entry_point(skip: usize) -> Vec<CapturedFrame> {
        black_box(frames(skip, ptr::null_mut()))
    }

    #[inline(never)]
    fn walker_caller() -> Vec<CapturedFrame> {
        black_box(without_entry_point(0))
    }

    fn short(frame: &CapturedFrame) -> String {
        crate::short_name(frame.symbol.as_deref().unwrap_or("")).into_owned()
    }

    #[test]
    #[inline(never)]
    fn missing_entry_point_starts_past_the_walker() {
        let frames = walker_caller();
        assert_eq!(short(&frames[0]), "without_entry_point");
        assert_eq!(short(&frames[1]), "walker_caller");
    }

    #[test]
    #[inline(never)]
    fn entry_point_keeps_its_frame() {
        let frames = capture_frames(0);
        assert_eq!(short(&frames[0]), "capture_frames");
        assert_eq!(short(&frames[1]), "entry_point_keeps_its_frame");

        let frames = capture_frames(1);
        assert_eq!(short(&frames[0]), "entry_point_keeps_its_frame");
    }
}
