//! # FileEntry Trait
//!
//! A view onto one object in a [`FileSystem`](crate::traits::file_system::FileSystem):
//! name, type predicates, timestamps, and navigation to parents, links,
//! streams and attributes. Entries are lazily materialised; multiple
//! `FileEntry` objects may describe the same underlying object.

use std::sync::Arc;

use crate::error::VfsError;
use crate::path_spec::PathSpec;
use crate::traits::attribute::Attribute;
use crate::traits::data_stream::DataStream;
use crate::traits::file_object::FileObject;
use crate::types::{Extent, FileType, Timestamps};

/// Lazy iterator over a directory's child `FileEntry` objects.
///
/// Mirrors the original's generator-based directory enumeration: children
/// are materialised one at a time, each wrapping the same type indicator
/// and parent pointer as the directory itself (see
/// [`build_child_path_spec`](crate::backend_support::build_child_path_spec)).
pub struct SubFileEntries(Box<dyn Iterator<Item = Result<Arc<dyn FileEntry>, VfsError>> + Send>);

impl SubFileEntries {
    /// Wrap an existing iterator.
    pub fn new(
        iter: impl Iterator<Item = Result<Arc<dyn FileEntry>, VfsError>> + Send + 'static,
    ) -> Self {
        Self(Box::new(iter))
    }

    /// Build from an already-materialised vector (useful for backends that
    /// enumerate eagerly, and for tests).
    pub fn from_vec(entries: Vec<Arc<dyn FileEntry>>) -> Self {
        Self::new(entries.into_iter().map(Ok))
    }

    /// Collect every entry, short-circuiting on the first error.
    pub fn collect_all(self) -> Result<Vec<Arc<dyn FileEntry>>, VfsError> {
        self.0.collect()
    }
}

impl Iterator for SubFileEntries {
    type Item = Result<Arc<dyn FileEntry>, VfsError>;

    fn next(&mut self) -> Option<Self::Item> {
        self.0.next()
    }
}

/// A view onto one allocated or virtual object within a file system.
///
/// # Invariant
///
/// For any allocated entry, exactly one of `is_file`, `is_directory`,
/// `is_link`, `is_device`, `is_pipe`, `is_socket` is `true`. `is_root()`
/// implies `parent_file_entry()` returns `Ok(None)`. Iterating
/// `sub_file_entries()` on a non-directory yields no items.
pub trait FileEntry: Send + Sync {
    /// The entry's name (not a full path).
    fn name(&self) -> &str;

    /// The path spec that resolves to this entry.
    fn path_spec(&self) -> &PathSpec;

    /// Whether this is the file system's root entry.
    fn is_root(&self) -> bool;

    /// Whether this entry was synthesized by the backend rather than
    /// read from on-disk structures.
    fn is_virtual(&self) -> bool;

    /// Whether this entry corresponds to an allocated (non-deleted) object.
    fn is_allocated(&self) -> bool;

    /// Whether this entry is a block or character device node.
    fn is_device(&self) -> bool;

    /// Whether this entry is a directory.
    fn is_directory(&self) -> bool;

    /// Whether this entry is a regular file.
    fn is_file(&self) -> bool;

    /// Whether this entry is a symbolic link.
    fn is_link(&self) -> bool;

    /// Whether this entry is a named pipe.
    fn is_pipe(&self) -> bool;

    /// Whether this entry is a Unix domain socket.
    fn is_socket(&self) -> bool;

    /// This entry's type, derived from the `is_*` predicates above.
    /// Defaults to checking them in the order the trait invariant lists
    /// them, falling back to `Virtual` once none of the on-disk kinds match.
    fn file_type(&self) -> FileType {
        if self.is_directory() {
            FileType::Directory
        } else if self.is_file() {
            FileType::File
        } else if self.is_link() {
            FileType::Link
        } else if self.is_device() {
            FileType::Device
        } else if self.is_pipe() {
            FileType::Pipe
        } else if self.is_socket() {
            FileType::Socket
        } else {
            FileType::Virtual
        }
    }

    /// The subset of timestamps this backend records for this entry.
    fn timestamps(&self) -> Timestamps;

    /// Size in bytes of the default data stream, if meaningful (e.g. `None`
    /// for directories).
    fn size(&self) -> Option<u64>;

    /// Number of child entries, if this is a directory.
    fn number_of_sub_file_entries(&self) -> usize;

    /// Lazily enumerate child entries. Empty for non-directories.
    fn sub_file_entries(&self) -> SubFileEntries;

    /// This entry's parent, or `None` if `is_root()`.
    fn parent_file_entry(&self) -> Result<Option<Arc<dyn FileEntry>>, VfsError>;

    /// The entry a symlink points to, or `None` if this entry is not a
    /// link.
    fn linked_file_entry(&self) -> Result<Option<Arc<dyn FileEntry>>, VfsError>;

    /// Open the named data stream as a byte stream (empty name = default
    /// stream). `None` if the stream does not exist.
    fn file_object(&self, data_stream_name: &str) -> Result<Option<Arc<dyn FileObject>>, VfsError>;

    /// Physical layout of the default data stream on its backing device.
    fn extents(&self) -> Result<Vec<Extent>, VfsError>;

    /// Look up a named data stream (empty name = default stream).
    fn data_stream(&self, name: &str) -> Result<Option<Arc<dyn DataStream>>, VfsError>;

    /// All data streams this entry exposes.
    fn data_streams(&self) -> Vec<Arc<dyn DataStream>>;

    /// Number of data streams; defaults to `data_streams().len()`.
    fn number_of_data_streams(&self) -> usize {
        self.data_streams().len()
    }

    /// This entry's attributes (extended attributes, security descriptors,
    /// stat attribute).
    fn attributes(&self) -> Vec<Arc<dyn Attribute>>;
}
