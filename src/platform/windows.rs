//! Windows file handle and mapping implementation.

use std::io;
use std::mem;
use std::os::windows::ffi::OsStrExt;
use std::path::Path;
use std::ptr;

use winapi::shared::minwindef::LPVOID;
use winapi::um::fileapi::{CreateFileW, GetFileSizeEx, OPEN_EXISTING};
use winapi::um::handleapi::{CloseHandle, INVALID_HANDLE_VALUE};
use winapi::um::memoryapi::{
    CreateFileMappingW, MapViewOfFileEx, UnmapViewOfFile, FILE_MAP_READ,
};
use winapi::um::winnt::{
    FILE_SHARE_READ, GENERIC_READ, HANDLE, LARGE_INTEGER, PAGE_READONLY,
};

use crate::error::{Error, Result};
use crate::handle::FileHandle;

/// The OS file handle type.
pub type RawFileHandle = HANDLE;

/// The sentinel value denoting "no handle".
pub const INVALID_HANDLE: RawFileHandle = INVALID_HANDLE_VALUE;

/// Open `path` read-only, shared with other readers.
pub fn open(path: &Path) -> Result<RawFileHandle> {
    let wide: Vec<u16> = path.as_os_str().encode_wide().chain(Some(0)).collect();

    let handle = unsafe {
        CreateFileW(
            wide.as_ptr(),
            GENERIC_READ,
            FILE_SHARE_READ,
            ptr::null_mut(),
            OPEN_EXISTING,
            0,
            ptr::null_mut(),
        )
    };
    if handle == INVALID_HANDLE_VALUE {
        return Err(Error::Open(io::Error::last_os_error()));
    }
    Ok(handle)
}

/// Close a raw handle. Errors from the OS are not surfaced.
pub fn close(handle: RawFileHandle) {
    unsafe {
        CloseHandle(handle);
    }
}

/// Query the current size of the open file behind `handle`.
pub fn file_size(handle: RawFileHandle) -> Result<u64> {
    let mut size: LARGE_INTEGER = unsafe { mem::zeroed() };
    if unsafe { GetFileSizeEx(handle, &mut size) } == 0 {
        return Err(Error::Stat(io::Error::last_os_error()));
    }
    Ok(unsafe { *size.QuadPart() } as u64)
}

/// Map the whole file behind `handle` as a read-only shared view.
///
/// Consumes the handle. Ordering matters here: the file handle is closed as
/// soon as the file-mapping object exists (the mapping object holds its own
/// reference to the file), but the mapping handle must stay open until
/// `MapViewOfFileEx` has produced the view. The view itself then outlives
/// both handles.
pub fn map(mut handle: FileHandle, _size: usize) -> Result<*const u8> {
    // Maximum size 0/0 maps the file at its current length. The view is
    // rounded up to page granularity and the slack bytes read as zero,
    // which provides the terminator past EOF.
    let raw_mapping = unsafe {
        CreateFileMappingW(
            handle.as_raw(),
            ptr::null_mut(),
            PAGE_READONLY,
            0,
            0,
            ptr::null(),
        )
    };
    if raw_mapping.is_null() {
        return Err(Error::Map(io::Error::last_os_error()));
    }

    // Track the mapping object so it is released on every path below.
    let mapping = FileHandle::adopt(raw_mapping)?;

    // The original file handle is no longer needed; releasing it before the
    // view is produced lets the handle slot be reused.
    let _ = handle.close();

    let view = unsafe {
        MapViewOfFileEx(
            mapping.as_raw(),
            FILE_MAP_READ,
            0,
            0,
            0,
            ptr::null_mut(),
        )
    };
    if view.is_null() {
        return Err(Error::Map(io::Error::last_os_error()));
    }

    // `mapping` drops here; the view stays valid without it.
    Ok(view as *const u8)
}

/// Release a view produced by [`map`]. Best effort; `UnmapViewOfFile`
/// failures are not surfaced.
///
/// # Safety
///
/// `base` must be a live view returned by [`map`], and no reads through the
/// view may happen afterwards.
pub unsafe fn unmap(base: *const u8, _size: usize) {
    // Windows identifies the view by its base address alone.
    UnmapViewOfFile(base as LPVOID);
}
