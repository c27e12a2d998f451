//! RAII ownership of a single OS file handle.

use std::mem;
use std::path::Path;

use log::trace;

use crate::error::{Error, Result};
use crate::platform::{self, RawFileHandle, INVALID_HANDLE};

/// Owns one OS file descriptor or handle and guarantees it is closed exactly
/// once, on every exit path.
///
/// `FileHandle` is move-only. A raw handle value must never be owned by two
/// live instances at once, since closing it twice is undefined behavior at
/// the OS level; Rust's move semantics rule that out without any runtime
/// bookkeeping. Use [`FileHandle::into_raw`] to hand the value off to code
/// that takes over closing it.
#[derive(Debug)]
pub struct FileHandle {
    raw: RawFileHandle,
}

impl FileHandle {
    /// Open the named file read-only and track the resulting handle.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<FileHandle> {
        let path = path.as_ref();
        let raw = platform::open(path)?;
        trace!("opened {} as handle {:?}", path.display(), raw);
        Ok(FileHandle { raw })
    }

    /// Track a handle that was opened elsewhere.
    ///
    /// The adopting instance owns the handle from here on and will close it.
    /// The invalid sentinel is rejected rather than stored.
    pub fn adopt(raw: RawFileHandle) -> Result<FileHandle> {
        if raw == INVALID_HANDLE {
            return Err(Error::InvalidHandle);
        }
        Ok(FileHandle { raw })
    }

    /// Whether this instance currently represents an open file.
    #[inline]
    pub fn is_valid(&self) -> bool {
        self.raw != INVALID_HANDLE
    }

    /// Query the OS for the size of the open file.
    ///
    /// No attempt is made to cache the value, so repeated calls result in
    /// repeated system calls.
    pub fn size(&self) -> Result<u64> {
        if !self.is_valid() {
            return Err(Error::NotOpen);
        }
        platform::file_size(self.raw)
    }

    /// Close the handle and reset it to the invalid sentinel.
    ///
    /// Closing an already closed handle is an error; dropping the instance
    /// performs the same release without one.
    pub fn close(&mut self) -> Result<()> {
        if !self.is_valid() {
            return Err(Error::NotOpen);
        }

        // Invalidate first, keeping the value just long enough to close it.
        let raw = mem::replace(&mut self.raw, INVALID_HANDLE);
        trace!("closing handle {:?}", raw);
        platform::close(raw);
        Ok(())
    }

    /// Borrow the raw handle value without affecting ownership.
    #[inline]
    pub fn as_raw(&self) -> RawFileHandle {
        self.raw
    }

    /// Release ownership of the raw handle without closing it.
    ///
    /// The caller becomes responsible for closing the returned value.
    pub fn into_raw(mut self) -> RawFileHandle {
        mem::replace(&mut self.raw, INVALID_HANDLE)
    }
}

impl Drop for FileHandle {
    fn drop(&mut self) {
        // The validity check keeps drop silent for handles that were closed
        // explicitly or handed off.
        if self.is_valid() {
            let _ = self.close();
        }
    }
}

#[cfg(unix)]
impl std::os::unix::io::AsRawFd for FileHandle {
    fn as_raw_fd(&self) -> std::os::unix::io::RawFd {
        self.raw
    }
}

#[cfg(windows)]
impl std::os::windows::io::AsRawHandle for FileHandle {
    fn as_raw_handle(&self) -> std::os::windows::io::RawHandle {
        self.raw as std::os::windows::io::RawHandle
    }
}
