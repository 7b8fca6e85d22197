//! # Backend Scaffolding
//!
//! Shared behaviors reused across backend implementations so each format
//! module does not reinvent them: the open/closed state guard, child
//! `PathSpec` construction for directory enumeration, the synthesized stat
//! attribute, and an interior-mutability lock helper.

use std::sync::atomic::{AtomicU8, Ordering};
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::error::VfsError;
use crate::path_spec::{PathSpec, TypeIndicator};
use crate::traits::attribute::Attribute;
use crate::traits::file_object::FileObject;

const UNOPENED: u8 = 0;
const OPEN: u8 = 1;
const CLOSED: u8 = 2;

/// Tracks the `Unopened → Open → Closed` state machine `FileSystem` and
/// `FileObject` implementations share, so every backend does not hand-roll
/// its own open/closed guard.
pub struct OpenState(AtomicU8);

impl OpenState {
    /// A fresh, unopened guard.
    pub fn new() -> Self {
        Self(AtomicU8::new(UNOPENED))
    }

    /// Transition from `Unopened` to `Open`.
    ///
    /// # Errors
    ///
    /// Returns [`VfsError::BackEnd`] if already open or closed; re-opening
    /// is not supported.
    pub fn open(&self) -> Result<(), VfsError> {
        self.0
            .compare_exchange(UNOPENED, OPEN, Ordering::SeqCst, Ordering::SeqCst)
            .map(|_| ())
            .map_err(|_| VfsError::BackEnd {
                source: "already open or closed; re-opening is not supported".into(),
            })
    }

    /// Transition to `Closed`. Idempotent.
    pub fn close(&self) {
        self.0.store(CLOSED, Ordering::SeqCst);
    }

    /// Fail with [`VfsError::BackEnd`] unless the state machine is
    /// currently `Open`.
    pub fn ensure_open(&self) -> Result<(), VfsError> {
        if self.0.load(Ordering::SeqCst) == OPEN {
            Ok(())
        } else {
            Err(VfsError::BackEnd {
                source: "operation attempted outside the Open state".into(),
            })
        }
    }
}

impl Default for OpenState {
    fn default() -> Self {
        Self::new()
    }
}

/// Build the child `PathSpec` for one directory entry, given the parent
/// entry's own spec and the child's name.
///
/// Grounded directly in the original's generator-based directory
/// enumeration: the child carries the same type indicator and parent
/// pointer as the directory, with its `location` composed via the file
/// system's path separator. A root-type directory (no parent pointer of
/// its own, e.g. `TYPE_OS` or `TYPE_FAKE`) produces children that are
/// likewise parentless; only non-root types thread the parent through.
pub fn build_child_path_spec(
    parent_spec: &PathSpec,
    child_name: &str,
    path_separator: char,
) -> Result<PathSpec, VfsError> {
    let parent_location = parent_spec
        .attributes()
        .location
        .as_deref()
        .unwrap_or_default();
    let location = if parent_location.is_empty() || parent_location == path_separator.to_string() {
        format!("{path_separator}{child_name}")
    } else {
        format!("{parent_location}{path_separator}{child_name}")
    };
    let mut builder = PathSpec::builder(parent_spec.type_indicator()).location(location);
    if let Some(parent) = parent_spec.parent() {
        builder = builder.parent(parent.clone());
    }
    builder.build()
}

/// The synthesized POSIX-style stat attribute, satisfying the stat
/// accessors every backend exposes regardless of on-disk format.
pub struct StatAttribute {
    /// Unix permission bits plus file-type bits (e.g. `0o100644`).
    pub mode: u32,
    /// Owning user id.
    pub uid: u32,
    /// Owning group id.
    pub gid: u32,
    /// Inode number.
    pub inode: u64,
    /// Size in bytes.
    pub size: u64,
    /// The backend this stat attribute describes.
    pub type_indicator: TypeIndicator,
}

impl Attribute for StatAttribute {
    fn name(&self) -> &str {
        "stat"
    }

    fn type_indicator(&self) -> TypeIndicator {
        self.type_indicator
    }

    fn value_stream(&self) -> Option<Arc<dyn FileObject>> {
        None
    }
}

/// A thin `RwLock<T>` wrapper that checks an [`OpenState`] guard before
/// handing out a read or write guard.
///
/// These are in-process interior-mutability locks backing `&self`-based
/// trait methods, not POSIX advisory file locks; this VFS is read-only and
/// single-host.
pub struct HandleLock<T> {
    state: OpenState,
    inner: RwLock<T>,
}

impl<T> HandleLock<T> {
    /// Wrap `value` behind a fresh, unopened guard.
    pub fn new(value: T) -> Self {
        Self {
            state: OpenState::new(),
            inner: RwLock::new(value),
        }
    }

    /// Transition the guard to `Open`.
    pub fn open(&self) -> Result<(), VfsError> {
        self.state.open()
    }

    /// Transition the guard to `Closed`.
    pub fn close(&self) {
        self.state.close();
    }

    /// Acquire a read guard, failing unless the state machine is `Open`.
    pub fn read_open(&self) -> Result<RwLockReadGuard<'_, T>, VfsError> {
        self.state.ensure_open()?;
        self.inner.read().map_err(|_| VfsError::BackEnd {
            source: "handle lock poisoned".into(),
        })
    }

    /// Acquire a write guard, failing unless the state machine is `Open`.
    pub fn write_open(&self) -> Result<RwLockWriteGuard<'_, T>, VfsError> {
        self.state.ensure_open()?;
        self.inner.write().map_err(|_| VfsError::BackEnd {
            source: "handle lock poisoned".into(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::path_spec::TypeIndicator;

    #[test]
    fn open_state_rejects_double_open() {
        let state = OpenState::new();
        state.open().unwrap();
        assert!(state.open().is_err());
    }

    #[test]
    fn open_state_rejects_ops_before_open() {
        let state = OpenState::new();
        assert!(state.ensure_open().is_err());
        state.open().unwrap();
        assert!(state.ensure_open().is_ok());
        state.close();
        assert!(state.ensure_open().is_err());
    }

    #[test]
    fn build_child_path_spec_joins_location() {
        let raw = PathSpec::raw(PathSpec::os("/images/apfs.raw"));
        let container = PathSpec::builder(TypeIndicator::ApfsContainer)
            .location("/")
            .parent(raw)
            .build()
            .unwrap();
        let child = build_child_path_spec(&container, "a_directory", '/').unwrap();
        assert_eq!(child.attributes().location.as_deref(), Some("/a_directory"));
        assert_eq!(child.type_indicator(), TypeIndicator::ApfsContainer);
    }

    #[test]
    fn handle_lock_denies_access_before_open() {
        let lock = HandleLock::new(5i32);
        assert!(lock.read_open().is_err());
        lock.open().unwrap();
        assert_eq!(*lock.read_open().unwrap(), 5);
    }
}
