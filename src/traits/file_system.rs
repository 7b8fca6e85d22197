//! # FileSystem Trait
//!
//! The capability a resolver helper constructs from a [`PathSpec`]: owns
//! parsed backend state (superblock, open handles) and hands out
//! [`FileEntry`] views onto the objects it contains.

use std::sync::Arc;

use crate::error::VfsError;
use crate::path_spec::PathSpec;
use crate::traits::file_entry::FileEntry;

/// A file system opened over a [`PathSpec`].
///
/// # State Machine
///
/// ```text
/// Unopened ── open() ──▶ Open ── close() ──▶ Closed
/// ```
///
/// Operations outside `Open` fail with [`VfsError::BackEnd`]. Re-opening is
/// not supported; construct a fresh instance via the resolver helper
/// instead.
pub trait FileSystem: Send + Sync {
    /// Parse and open backend state for `spec`. May consult the
    /// [`KeyChain`](crate::credentials::KeyChain) for encrypted formats.
    fn open(&self, spec: &PathSpec) -> Result<(), VfsError>;

    /// Release backend state. Idempotent.
    fn close(&self) -> Result<(), VfsError>;

    /// The root `FileEntry` of this file system.
    fn root_file_entry(&self) -> Result<Arc<dyn FileEntry>, VfsError>;

    /// Resolve `spec` to a `FileEntry` within this file system, or `None`
    /// if the path does not exist.
    fn file_entry_by_path_spec(
        &self,
        spec: &PathSpec,
    ) -> Result<Option<Arc<dyn FileEntry>>, VfsError>;

    /// The base path specs this file system was (or could be) opened from.
    fn base_path_specs(&self) -> Vec<PathSpec>;

    /// The separator this backend composes locations with: `/` or `\`.
    fn path_separator(&self) -> char;

    /// Join `components` with [`path_separator`](Self::path_separator).
    fn join_path(&self, components: &[&str]) -> String {
        let sep = self.path_separator();
        let mut out = String::new();
        out.push(sep);
        let mut first = true;
        for component in components {
            let component = component.trim_matches(sep);
            if component.is_empty() {
                continue;
            }
            if !first {
                out.push(sep);
            }
            out.push_str(component);
            first = false;
        }
        out
    }

    /// Split `path` into components using [`path_separator`](Self::path_separator).
    fn split_path(&self, path: &str) -> Vec<String> {
        let sep = self.path_separator();
        path.split(sep)
            .filter(|c| !c.is_empty())
            .map(str::to_owned)
            .collect()
    }
}
