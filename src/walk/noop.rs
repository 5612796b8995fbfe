//! Empty implementation of walking used when the `backtrace` feature is
//! disabled. Every live trace comes out empty.

use crate::CapturedFrame;
use core::ffi::c_void;

#[inline(always)]
pub fn trace(
    _entry_point_address: *mut c_void,
    _walker_address: *mut c_void,
    _cb: &mut dyn FnMut(CapturedFrame) -> bool,
) {
}
