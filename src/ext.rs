//! # Extension Trait
//!
//! Convenience methods layered on top of [`FileEntry`], the way the
//! teacher's own extension trait layers convenience methods on top of its
//! core trait: a blanket impl, default-implemented entirely in terms of the
//! core trait's required methods, so every backend gets them for free.
//!
//! ## Available Methods
//!
//! | Method | Description |
//! |--------|-------------|
//! | [`location`](VfsExt::location) | The entry's `location` attribute, if any |
//! | [`is_empty_directory`](VfsExt::is_empty_directory) | A directory with no children |
//! | [`read_to_end`](VfsExt::read_to_end) | Read the default data stream fully into a `Vec<u8>` |

use std::sync::Arc;

use crate::error::VfsError;
use crate::traits::{FileEntry, FileObject};

/// Extension methods for any [`FileEntry`] implementation, including trait
/// objects (`dyn FileEntry`).
pub trait VfsExt: FileEntry {
    /// The `location` attribute of this entry's path spec, if populated.
    fn location(&self) -> Option<&str> {
        self.path_spec().attributes().location.as_deref()
    }

    /// Whether this is a directory with no child entries.
    fn is_empty_directory(&self) -> bool {
        self.is_directory() && self.number_of_sub_file_entries() == 0
    }

    /// Open the default data stream and read it fully into memory.
    ///
    /// # Errors
    ///
    /// Returns [`VfsError::NotSupported`] if this entry has no default
    /// stream (e.g. a directory); otherwise propagates the stream's own
    /// `open`/`read` errors.
    fn read_to_end(&self) -> Result<Vec<u8>, VfsError> {
        let Some(stream) = self.file_object("")? else {
            return Err(VfsError::NotSupported {
                operation: "read_to_end on an entry with no default stream",
            });
        };
        stream.open(self.path_spec())?;
        read_stream_to_end(&*stream)
    }
}

impl<E: FileEntry + ?Sized> VfsExt for E {}

fn read_stream_to_end(stream: &dyn FileObject) -> Result<Vec<u8>, VfsError> {
    let mut out = Vec::new();
    let mut buf = [0u8; 8192];
    loop {
        let n = stream.read(&mut buf)?;
        if n == 0 {
            break;
        }
        out.extend_from_slice(&buf[..n]);
    }
    Ok(out)
}

/// Read a [`FileObject`] fully into memory, for callers that already hold
/// one directly rather than a [`FileEntry`] (e.g. after
/// [`open_file_object`](crate::resolver::open_file_object)).
pub fn read_file_object_to_end(stream: &Arc<dyn FileObject>) -> Result<Vec<u8>, VfsError> {
    read_stream_to_end(&**stream)
}
