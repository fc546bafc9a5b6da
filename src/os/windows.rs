//! Operating system abstraction layer (Windows)
//!
//! This module provides low-level bindings to operating system services
//! required by the rest of the crate.
//!
//! It is intended to act as a thin, explicit abstraction layer over
//! platform-specific system APIs. At the moment, it only exposes access
//! to the operating system's cryptographically secure random number
//! generator, reached directly through `bcrypt.dll` via `#[link]` so that
//! no crates.io dependency is required.
//!
//! All functions in this module are low-level, unsafe-adjacent by nature,
//! but are exposed through safe Rust interfaces.

const BCRYPT_USE_SYSTEM_PREFERRED_RNG: u32 = 0x0000_0002;

#[link(name = "bcrypt")]
unsafe extern "system" {
    fn BCryptGenRandom(
        algorithm: *mut core::ffi::c_void,
        buffer: *mut u8,
        length: u32,
        flags: u32,
    ) -> i32;
}

/// Fills a buffer with data provided by the operating system.
///
/// This function forwards to the Windows CNG API to obtain
/// cryptographically secure random bytes.
///
/// # Panics
/// Panics if the underlying system call fails. Such a failure indicates
/// a critical operating system error and is considered unrecoverable.
///
/// # Notes
/// - No heap allocation is performed.
/// - The buffer is fully initialized on success.
/// - This function is suitable for seeding cryptographic primitives.
pub(crate) fn sys_random(buf: &mut [u8]) {
    let status = unsafe {
        BCryptGenRandom(
            std::ptr::null_mut(),
            buf.as_mut_ptr(),
            buf.len() as u32,
            BCRYPT_USE_SYSTEM_PREFERRED_RNG,
        )
    };

    if status != 0 {
        panic!("BCryptGenRandom failed with status {status}");
    }
}
