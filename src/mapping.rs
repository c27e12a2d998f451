//! Read-only memory-mapped view of a file.
//!
//! Normally `read()` has the OS load file data into its own buffers and then
//! copy it into the buffers you supply. Mapping the file instead exposes the
//! OS buffers directly in the process address space, so the data can be read
//! without copying and the kernel manages paging on our behalf.

use std::io;
use std::ops::Deref;
use std::path::{Path, PathBuf};
use std::ptr;
use std::slice;

use log::debug;

use crate::error::{Error, Result};
use crate::handle::FileHandle;
use crate::platform;

/// A read-only memory-mapped view of a file's contents.
///
/// The mapped range is exposed as a byte slice, with one extra zero byte
/// immediately past the last file byte so the contents can be handed to
/// null-terminated-string APIs without a copy. The terminator is not counted
/// in [`size`](MappedFile::size).
///
/// `MappedFile` is move-only: two live instances never reference the same OS
/// mapping, so a double unmap cannot happen. Multiple instances may map the
/// same file independently; the mapping is created with shared semantics.
///
/// # Example
///
/// ```
/// use filemap::MappedFile;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let dir = tempfile::tempdir()?;
/// std::fs::write(dir.path().join("data.txt"), b"abcdefghij")?;
///
/// let map = MappedFile::open_in(dir.path(), "data.txt")?;
/// assert_eq!(map.size(), 10);
/// assert_eq!(&map[..], b"abcdefghij");
/// assert_eq!(map.as_bytes_with_nul()[10], 0);
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct MappedFile {
    /// Resolved path of the current mapping.
    path: Option<PathBuf>,

    /// First mapped byte, null while unmapped.
    base: *const u8,

    /// Mapped length in bytes, excluding the terminator.
    len: usize,
}

impl MappedFile {
    /// Create an unmapped instance; use [`map_file`](MappedFile::map_file)
    /// to give it contents.
    #[inline]
    pub fn new() -> MappedFile {
        MappedFile::default()
    }

    /// Map `path` in one step, failing construction if the mapping fails.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<MappedFile> {
        let mut mapped = MappedFile::new();
        mapped.map_file(path)?;
        Ok(mapped)
    }

    /// Map `path` relative to the directory `dir` in one step.
    pub fn open_in<B: AsRef<Path>, P: AsRef<Path>>(dir: B, path: P) -> Result<MappedFile> {
        let mut mapped = MappedFile::new();
        mapped.map_file_in(dir, path)?;
        Ok(mapped)
    }

    /// Map a new file, replacing any current mapping.
    ///
    /// A failed call always leaves the instance unmapped, with every
    /// transient handle closed.
    pub fn map_file<P: AsRef<Path>>(&mut self, path: P) -> Result<()> {
        self.map_resolved(path.as_ref().to_path_buf())
    }

    /// Map a file named relative to a base directory, replacing any current
    /// mapping.
    ///
    /// The two components are joined with the platform separator; no
    /// separator is doubled when `dir` already ends with one, and none is
    /// inserted when `dir` is empty.
    pub fn map_file_in<B: AsRef<Path>, P: AsRef<Path>>(&mut self, dir: B, path: P) -> Result<()> {
        self.map_resolved(dir.as_ref().join(path.as_ref()))
    }

    fn map_resolved(&mut self, path: PathBuf) -> Result<()> {
        // Release any file we currently have mapped.
        if self.is_mapped() {
            self.unmap_file()?;
        }

        let handle = FileHandle::open(&path)?;

        let size = usize::try_from(handle.size()?).map_err(|_| {
            Error::Map(io::Error::new(
                io::ErrorKind::InvalidInput,
                "file too large to map on this platform",
            ))
        })?;
        if size == 0 {
            // Mapping zero bytes is meaningless; the handle closes on return.
            return Err(Error::EmptyFile);
        }

        // Consumes the handle. Each platform closes it at the point its
        // mapping semantics allow: POSIX after `mmap` returns, Windows as
        // soon as the mapping object exists.
        let base = platform::map(handle, size)?;

        debug!("mapped {} ({} bytes)", path.display(), size);
        self.path = Some(path);
        self.base = base;
        self.len = size;
        Ok(())
    }

    /// Release the current mapping.
    ///
    /// Unmapping when nothing is mapped is an error; dropping the instance
    /// performs the same release without one. OS-level release failures are
    /// not surfaced.
    pub fn unmap_file(&mut self) -> Result<()> {
        if !self.is_mapped() {
            return Err(Error::NotMapped);
        }

        unsafe { platform::unmap(self.base, self.len) };

        if let Some(path) = self.path.take() {
            debug!("unmapped {}", path.display());
        }
        self.base = ptr::null();
        self.len = 0;
        Ok(())
    }

    /// Whether a file is currently mapped.
    #[inline]
    pub fn is_mapped(&self) -> bool {
        !self.base.is_null()
    }

    /// The resolved path of the current mapping, if any.
    #[inline]
    pub fn filename(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Length of the mapped contents in bytes, excluding the terminator.
    /// Zero while unmapped.
    #[inline]
    pub fn size(&self) -> usize {
        self.len
    }

    /// Pointer to the first mapped byte, null while unmapped.
    #[inline]
    pub fn as_ptr(&self) -> *const u8 {
        self.base
    }

    /// The mapped contents, excluding the terminator. Empty while unmapped.
    #[inline]
    pub fn as_bytes(&self) -> &[u8] {
        if self.base.is_null() {
            &[]
        } else {
            unsafe { slice::from_raw_parts(self.base, self.len) }
        }
    }

    /// The mapped contents including the zero terminator at index
    /// [`size`](MappedFile::size). Empty while unmapped.
    #[inline]
    pub fn as_bytes_with_nul(&self) -> &[u8] {
        if self.base.is_null() {
            &[]
        } else {
            unsafe { slice::from_raw_parts(self.base, self.len + 1) }
        }
    }
}

impl Default for MappedFile {
    fn default() -> MappedFile {
        MappedFile {
            path: None,
            base: ptr::null(),
            len: 0,
        }
    }
}

impl Drop for MappedFile {
    fn drop(&mut self) {
        // The check keeps drop silent for instances that were unmapped
        // explicitly or never mapped at all.
        if self.is_mapped() {
            let _ = self.unmap_file();
        }
    }
}

impl Deref for MappedFile {
    type Target = [u8];

    #[inline]
    fn deref(&self) -> &[u8] {
        self.as_bytes()
    }
}

impl AsRef<[u8]> for MappedFile {
    #[inline]
    fn as_ref(&self) -> &[u8] {
        self.as_bytes()
    }
}
