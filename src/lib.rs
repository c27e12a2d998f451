//! # filemap
//!
//! `filemap` is a cross-platform library for read-only memory-mapped file
//! access. It normalizes the POSIX (`mmap`) and Windows
//! (`CreateFileMapping`/`MapViewOfFile`) APIs into a single RAII interface:
//! a [`FileHandle`] that owns an OS file handle, and a [`MappedFile`] that
//! owns a mapped byte range and releases it on every exit path.
//!
//! ## Features
//!
//! - Zero-copy access to file contents through the OS page cache
//! - Cross-platform support (Linux, macOS, Windows)
//! - Guaranteed zero terminator one byte past the mapped contents, so the
//!   range is safe to pass to null-terminated-string APIs without a copy
//! - Move-only handle and mapping owners; double close and double unmap are
//!   ruled out by the type system
//! - Per-condition error variants carrying the underlying OS error
//!
//! ## Example
//!
//! ```
//! use filemap::MappedFile;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! // Create a file to map.
//! let dir = tempfile::tempdir()?;
//! let path = dir.path().join("greeting.txt");
//! std::fs::write(&path, b"Hello, filemap!")?;
//!
//! // Map it and read it without copying.
//! let map = MappedFile::open(&path)?;
//! assert_eq!(&map[..], b"Hello, filemap!");
//!
//! // One zero byte sits past the end of the contents.
//! assert_eq!(map.as_bytes_with_nul()[map.size()], 0);
//! # Ok(())
//! # }
//! ```

pub mod error;
pub mod handle;
pub mod mapping;
pub mod platform;

pub use error::{Error, Result};
pub use handle::FileHandle;
pub use mapping::MappedFile;

/// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
