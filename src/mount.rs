//! # Mount Point Manager
//!
//! Maps a symbolic mount identifier string to a concrete [`PathSpec`]. The
//! resolver recognises `TYPE_MOUNT` specs, rejects ones with a parent, looks
//! up the identifier here, and continues resolution on the mapped spec.

use std::collections::HashMap;
use std::sync::RwLock;

use crate::error::VfsError;
use crate::path_spec::PathSpec;

/// Process-wide map from mount identifier to the `PathSpec` it stands for.
#[derive(Default)]
pub struct MountPointManager {
    mounts: RwLock<HashMap<String, PathSpec>>,
}

impl MountPointManager {
    /// Construct an empty mount point manager.
    pub fn new() -> Self {
        Self::default()
    }

    /// The process-wide default mount point manager.
    pub fn global() -> &'static MountPointManager {
        static GLOBAL: std::sync::OnceLock<MountPointManager> = std::sync::OnceLock::new();
        GLOBAL.get_or_init(MountPointManager::new)
    }

    /// Register `identifier` as mapping to `spec`.
    pub fn register_mount(&self, identifier: impl Into<String>, spec: PathSpec) {
        if let Ok(mut mounts) = self.mounts.write() {
            mounts.insert(identifier.into(), spec);
        }
    }

    /// Look up the spec mapped to `identifier`.
    ///
    /// # Errors
    ///
    /// Returns [`VfsError::MountPoint`] if no mapping exists.
    pub fn get_mount(&self, identifier: &str) -> Result<PathSpec, VfsError> {
        let mounts = self.mounts.read().map_err(|_| VfsError::MountPoint {
            identifier: identifier.to_string(),
        })?;
        mounts
            .get(identifier)
            .cloned()
            .ok_or_else(|| VfsError::MountPoint {
                identifier: identifier.to_string(),
            })
    }

    /// Remove a previously registered mount.
    pub fn deregister_mount(&self, identifier: &str) {
        if let Ok(mut mounts) = self.mounts.write() {
            mounts.remove(identifier);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn registered_mount_resolves() {
        let manager = MountPointManager::new();
        let spec = PathSpec::os("/images/apfs.raw");
        manager.register_mount("m1", spec.clone());
        assert_eq!(manager.get_mount("m1").unwrap(), spec);
    }

    #[test]
    fn unknown_mount_is_an_error() {
        let manager = MountPointManager::new();
        let err = manager.get_mount("does-not-exist").unwrap_err();
        assert!(matches!(err, VfsError::MountPoint { .. }));
    }

    #[test]
    fn deregister_removes_mapping() {
        let manager = MountPointManager::new();
        manager.register_mount("m1", PathSpec::os("/x"));
        manager.deregister_mount("m1");
        assert!(manager.get_mount("m1").is_err());
    }
}
