//! POSIX file handle and mapping implementation.

use std::ffi::CString;
use std::io;
use std::mem::MaybeUninit;
use std::os::unix::ffi::OsStrExt;
use std::path::Path;
use std::ptr;

use libc::{c_void, MAP_SHARED, O_CLOEXEC, O_RDONLY, PROT_READ};

use crate::error::{Error, Result};
use crate::handle::FileHandle;

/// The OS file handle type: a file descriptor.
pub type RawFileHandle = libc::c_int;

/// The sentinel value denoting "no handle".
pub const INVALID_HANDLE: RawFileHandle = -1;

/// Open `path` read-only and return the raw descriptor.
pub fn open(path: &Path) -> Result<RawFileHandle> {
    let path = CString::new(path.as_os_str().as_bytes()).map_err(|_| {
        Error::Open(io::Error::new(
            io::ErrorKind::InvalidInput,
            "path contains an interior NUL byte",
        ))
    })?;

    let fd = unsafe { libc::open(path.as_ptr(), O_RDONLY | O_CLOEXEC) };
    if fd < 0 {
        return Err(Error::Open(io::Error::last_os_error()));
    }
    Ok(fd)
}

/// Close a raw descriptor. Errors from the OS are not surfaced.
pub fn close(fd: RawFileHandle) {
    unsafe {
        libc::close(fd);
    }
}

/// Query the current size of the open file behind `fd` via `fstat`.
pub fn file_size(fd: RawFileHandle) -> Result<u64> {
    let mut stat = MaybeUninit::<libc::stat>::uninit();
    if unsafe { libc::fstat(fd, stat.as_mut_ptr()) } < 0 {
        return Err(Error::Stat(io::Error::last_os_error()));
    }
    let stat = unsafe { stat.assume_init() };
    Ok(stat.st_size as u64)
}

/// Map `size + 1` bytes of the file behind `handle`, read-only and shared
/// with any other mappers of the same file.
///
/// Consumes the handle: the kernel keeps mapped pages valid after the
/// originating descriptor is closed, so the descriptor is released as soon
/// as `mmap` returns, on the success path and the failure path alike.
pub fn map(handle: FileHandle, size: usize) -> Result<*const u8> {
    // The byte past EOF within the mapped range reads as zero, which gives
    // callers a terminator without copying the file.
    let len = size + 1;

    let ptr = unsafe {
        libc::mmap(
            ptr::null_mut(),
            len,
            PROT_READ,
            MAP_SHARED,
            handle.as_raw(),
            0,
        )
    };
    if ptr == libc::MAP_FAILED {
        return Err(Error::Map(io::Error::last_os_error()));
    }

    // The mapping holds its own reference to the pages now.
    drop(handle);

    Ok(ptr as *const u8)
}

/// Release a mapping produced by [`map`]. Best effort; `munmap` failures
/// are not surfaced.
///
/// # Safety
///
/// `base` and `size` must describe a live mapping returned by [`map`], and
/// no reads through the mapping may happen afterwards.
pub unsafe fn unmap(base: *const u8, size: usize) {
    // The terminator byte was part of the request, so it is part of the
    // release.
    libc::munmap(base as *mut c_void, size + 1);
}
