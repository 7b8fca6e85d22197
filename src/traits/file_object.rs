//! # FileObject Trait
//!
//! A seekable, read-only byte source. May be stacked: an APFS-volume
//! `FileObject` reads from an APFS-container `FileObject`, which reads from
//! a RAW-image `FileObject`, which reads from a leaf OS file. Each level
//! holds a strong reference to its parent via the
//! [`ResolverContext`](crate::context::ResolverContext).

use crate::error::VfsError;
use crate::path_spec::PathSpec;

/// Origin for a [`FileObject::seek`] offset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SeekWhence {
    /// Offset is absolute from the start of the stream.
    Set,
    /// Offset is relative to the current position.
    Cur,
    /// Offset is relative to the end of the stream.
    End,
}

/// A stacked, read-only byte stream.
///
/// # State Machine
///
/// ```text
/// Unopened ── open() ──▶ Open ── close() ──▶ Closed
/// ```
///
/// Operations outside `Open` fail with [`VfsError::BackEnd`]. Re-opening is
/// not supported.
pub trait FileObject: Send + Sync {
    /// Open backing state for `spec`.
    fn open(&self, spec: &PathSpec) -> Result<(), VfsError>;

    /// Release backing state. Idempotent.
    fn close(&self) -> Result<(), VfsError>;

    /// Read up to `buf.len()` bytes at the current position, returning the
    /// number of bytes actually read. `0` signals end of stream; short
    /// reads are only permitted at EOF.
    fn read(&self, buf: &mut [u8]) -> Result<usize, VfsError>;

    /// Move the current position per `whence` and return the new absolute
    /// offset.
    fn seek(&self, offset: i64, whence: SeekWhence) -> Result<u64, VfsError>;

    /// The current absolute position.
    fn tell(&self) -> Result<u64, VfsError>;

    /// The total size of the stream in bytes.
    fn get_size(&self) -> Result<u64, VfsError>;

    /// The current absolute offset; an alias kept for parity with the
    /// original API (`tell` and `get_offset` always agree).
    fn get_offset(&self) -> Result<u64, VfsError> {
        self.tell()
    }
}
