//! Fallback for platforms without a memory-mapping implementation.

use std::io;
use std::path::Path;

use crate::error::{Error, Result};
use crate::handle::FileHandle;

/// The OS file handle type.
pub type RawFileHandle = i32;

/// The sentinel value denoting "no handle".
pub const INVALID_HANDLE: RawFileHandle = -1;

fn unsupported() -> io::Error {
    io::Error::new(
        io::ErrorKind::Unsupported,
        "memory mapping is not supported on this platform",
    )
}

pub fn open(_path: &Path) -> Result<RawFileHandle> {
    Err(Error::Open(unsupported()))
}

pub fn close(_handle: RawFileHandle) {}

pub fn file_size(_handle: RawFileHandle) -> Result<u64> {
    Err(Error::Stat(unsupported()))
}

pub fn map(_handle: FileHandle, _size: usize) -> Result<*const u8> {
    Err(Error::Map(unsupported()))
}

/// # Safety
///
/// Trivially safe; there is nothing to release on this platform.
pub unsafe fn unmap(_base: *const u8, _size: usize) {}
