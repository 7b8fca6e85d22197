//! # Core Types
//!
//! Fundamental value types shared by path specs, the resolver, and the
//! `FileSystem` / `FileEntry` / `FileObject` trait family.
//!
//! ## Quick Reference
//!
//! | Type | Purpose |
//! |------|---------|
//! | [`FileType`] | File, Directory, Link, Device, Pipe, Socket, or Virtual |
//! | [`Timestamps`] | The five optional entry timestamps |
//! | [`Extent`] / [`ExtentType`] | Physical layout of a data stream on its backing device |
//! | [`FormatCategory`] | Analyzer scan-order category flags |
//!
//! ## Serde Support
//!
//! All types support serialization when the `serde` feature is enabled:
//!
//! ```toml
//! [dependencies]
//! vfscore = { version = "0.1", features = ["serde"] }
//! ```

use std::time::SystemTime;

/// The type of a [`FileEntry`](crate::FileEntry).
///
/// Exactly one of the corresponding `Is*` predicates on `FileEntry` is true
/// for any allocated entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum FileType {
    /// Regular file containing data.
    File,
    /// Directory containing other entries.
    Directory,
    /// Symbolic link pointing to another path.
    Link,
    /// Block or character device node.
    Device,
    /// Named pipe (FIFO).
    Pipe,
    /// Unix domain socket.
    Socket,
    /// An entry synthesized by a backend with no on-disk counterpart
    /// (e.g. a container's virtual root).
    Virtual,
}

/// The optional timestamps a [`FileEntry`](crate::FileEntry) may expose.
///
/// Any field may be absent: not every on-disk format records every kind of
/// timestamp (FAT has no change time; many formats lack "added").
#[derive(Debug, Clone, Copy, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Timestamps {
    /// Last access time.
    #[cfg_attr(feature = "serde", serde(with = "option_system_time_serde"))]
    pub accessed: Option<SystemTime>,
    /// Creation time.
    #[cfg_attr(feature = "serde", serde(with = "option_system_time_serde"))]
    pub created: Option<SystemTime>,
    /// Last inode/metadata change time.
    #[cfg_attr(feature = "serde", serde(with = "option_system_time_serde"))]
    pub changed: Option<SystemTime>,
    /// Last content modification time.
    #[cfg_attr(feature = "serde", serde(with = "option_system_time_serde"))]
    pub modified: Option<SystemTime>,
    /// Time the entry was added to its container (APFS-style).
    #[cfg_attr(feature = "serde", serde(with = "option_system_time_serde"))]
    pub added: Option<SystemTime>,
}

/// The kind of physical layout described by an [`Extent`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ExtentType {
    /// Extent backed by real data on the device.
    Data,
    /// Extent representing a sparse (unallocated, reads-as-zero) hole.
    Sparse,
    /// Extent backed by compressed data; `size` is the decompressed length.
    Compressed,
}

/// Physical layout of one contiguous run of a data stream on its backing
/// device.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Extent {
    /// Kind of extent.
    pub extent_type: ExtentType,
    /// Byte offset on the backing device.
    pub offset: u64,
    /// Length in bytes.
    pub size: u64,
}

/// Format-category flags used to order [`FormatAnalyzer`](crate::FormatAnalyzer)
/// scans and to tag backends in the [`TypeRegistry`](crate::TypeRegistry).
///
/// Stored as a small bitset rather than a `Vec` of variants since a backend
/// may belong to more than one category (a TAR file is both an archive and,
/// once a member is read, a plain byte stream).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FormatCategory {
    /// Raw disk/volume images (`RAW`, `MODI`).
    pub storage_media: bool,
    /// Partition tables and volume managers (`GPT`, `MBR`, `TSK_PARTITION`, `LVM`).
    pub volume_system: bool,
    /// Native file systems (`APFS`, `NTFS`, `FAT`, ...).
    pub file_system: bool,
    /// Archive containers (`TAR`, `ZIP`).
    pub archive: bool,
    /// Compressed streams (`GZIP`, `BZIP2`, `XZ`).
    pub compressed: bool,
    /// Encryption wrappers (`BDE`, `FVDE`, `LUKS`, `CS`).
    pub encrypted: bool,
}

impl FormatCategory {
    /// A category flag set with only `storage_media` on.
    pub const STORAGE_MEDIA: Self = Self {
        storage_media: true,
        volume_system: false,
        file_system: false,
        archive: false,
        compressed: false,
        encrypted: false,
    };

    /// A category flag set with only `volume_system` on.
    pub const VOLUME_SYSTEM: Self = Self {
        storage_media: false,
        volume_system: true,
        file_system: false,
        archive: false,
        compressed: false,
        encrypted: false,
    };

    /// A category flag set with only `file_system` on.
    pub const FILE_SYSTEM: Self = Self {
        storage_media: false,
        volume_system: false,
        file_system: true,
        archive: false,
        compressed: false,
        encrypted: false,
    };

    /// A category flag set with only `archive` on.
    pub const ARCHIVE: Self = Self {
        storage_media: false,
        volume_system: false,
        file_system: false,
        archive: true,
        compressed: false,
        encrypted: false,
    };

    /// A category flag set with only `compressed` on.
    pub const COMPRESSED: Self = Self {
        storage_media: false,
        volume_system: false,
        file_system: false,
        archive: false,
        compressed: true,
        encrypted: false,
    };
}

/// Serde support for `Option<SystemTime>` (when the serde feature is enabled).
#[cfg(feature = "serde")]
mod option_system_time_serde {
    use serde::{Deserialize, Deserializer, Serialize, Serializer};
    use std::time::{Duration, SystemTime, UNIX_EPOCH};

    pub fn serialize<S>(time: &Option<SystemTime>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let pair = time.map(|t| {
            let duration = t.duration_since(UNIX_EPOCH).unwrap_or(Duration::ZERO);
            (duration.as_secs(), duration.subsec_nanos())
        });
        pair.serialize(serializer)
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<SystemTime>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let pair: Option<(u64, u32)> = Deserialize::deserialize(deserializer)?;
        Ok(pair.map(|(secs, nanos)| UNIX_EPOCH + Duration::new(secs, nanos)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn file_type_equality() {
        assert_eq!(FileType::File, FileType::File);
        assert_ne!(FileType::File, FileType::Directory);
    }

    #[test]
    fn timestamps_default_is_all_none() {
        let t = Timestamps::default();
        assert!(t.accessed.is_none());
        assert!(t.created.is_none());
        assert!(t.changed.is_none());
        assert!(t.modified.is_none());
        assert!(t.added.is_none());
    }

    #[test]
    fn extent_holds_fields() {
        let e = Extent {
            extent_type: ExtentType::Data,
            offset: 393_216,
            size: 4096,
        };
        assert_eq!(e.offset, 393_216);
        assert_eq!(e.size, 4096);
    }

    #[test]
    fn format_category_constants_are_single_flag() {
        assert!(FormatCategory::STORAGE_MEDIA.storage_media);
        assert!(!FormatCategory::STORAGE_MEDIA.file_system);
        assert!(FormatCategory::FILE_SYSTEM.file_system);
        assert!(!FormatCategory::FILE_SYSTEM.archive);
    }
}
