//! Operating system abstraction layer (macOS)
//!
//! This module provides access to operating system services specific to
//! macOS that are required by the rest of the crate.
//!
//! It currently exposes a function to obtain cryptographically secure random
//! bytes from the system, reached directly through `libSystem` (always
//! linked into a `std`-based binary on macOS) so that no crates.io
//! dependency is required.
//!
//! On macOS, randomness is provided by `getentropy`, which is backed by the
//! operating system and suitable for cryptographic use.

use std::ffi::{c_int, c_void};

unsafe extern "C" {
    fn getentropy(buf: *mut c_void, len: usize) -> c_int;
}

/// Fills a buffer with data provided by the operating system.
///
/// This function uses `getentropy`, the macOS-provided interface for
/// generating cryptographically secure random bytes. `getentropy` accepts
/// at most 256 bytes per call, so larger buffers are filled in chunks.
///
/// # Panics
/// Panics if `getentropy` returns an error. Such a failure indicates a
/// critical operating system issue and is considered unrecoverable.
///
/// # Notes
/// - No heap allocation is performed.
/// - The buffer is fully initialized on return.
/// - The output is suitable for seeding cryptographic primitives.
pub(crate) fn sys_random(buf: &mut [u8]) {
    const MAX_CHUNK: usize = 256;

    for chunk in buf.chunks_mut(MAX_CHUNK) {
        let ret = unsafe { getentropy(chunk.as_mut_ptr() as *mut c_void, chunk.len()) };

        if ret != 0 {
            panic!("getentropy() failed");
        }
    }
}
