//! # Path Specifications
//!
//! The composable, content-addressable identity objects used throughout the
//! resolver: a `PathSpec` describes "a thing inside a thing" — a file on an
//! APFS volume inside an APFS container inside a RAW image on the host OS —
//! as a chain of typed, attribute-bearing links toward a parentless root.
//!
//! ## Quick Example
//!
//! ```rust
//! use vfscore::path_spec::{PathSpec, TypeIndicator};
//!
//! let os = PathSpec::os("/images/apfs.raw");
//! let raw = PathSpec::raw(os);
//! let container = PathSpec::builder(TypeIndicator::ApfsContainer)
//!     .location("/apfs1")
//!     .parent(raw)
//!     .build()
//!     .unwrap();
//!
//! assert!(container.has_parent());
//! assert_eq!(container.type_indicator(), TypeIndicator::ApfsContainer);
//! ```

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use crate::error::VfsError;

/// The closed set of format/wrapper identifiers a `PathSpec` may carry.
///
/// Additions occur only at backend-registration time, before any resolver
/// call (see [`register_builtin_backends`](crate::registry::register_builtin_backends)).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TypeIndicator {
    /// A path on the host operating system.
    Os,
    /// An in-memory or synthetic backend, used for testing.
    Fake,
    /// A raw (unpartitioned) disk or volume image.
    Raw,
    /// A gzip-compressed stream.
    Gzip,
    /// A bzip2-compressed stream.
    Bzip2,
    /// A tar archive.
    Tar,
    /// A zip archive.
    Zip,
    /// An APFS volume.
    Apfs,
    /// An APFS container (may hold multiple volumes).
    ApfsContainer,
    /// An HFS+ volume.
    Hfs,
    /// An NTFS volume.
    Ntfs,
    /// An ext2/3/4 volume.
    Ext,
    /// A FAT12/16/32 volume.
    Fat,
    /// An XFS volume.
    Xfs,
    /// A GUID Partition Table.
    Gpt,
    /// A Master Boot Record partition table.
    Mbr,
    /// A single partition carved out by The Sleuth Kit.
    TskPartition,
    /// A Logical Volume Manager volume group.
    Lvm,
    /// A BitLocker Drive Encryption volume.
    Bde,
    /// A FileVault Drive Encryption volume.
    Fvde,
    /// A LUKS-encrypted volume.
    Luks,
    /// An Apple Core Storage logical volume.
    Cs,
    /// A macOS disk image (MODI/DMG) wrapper.
    Modi,
    /// A generic encrypted byte-stream wrapper.
    EncryptedStream,
    /// A generic decompression byte-stream wrapper.
    CompressedStream,
    /// A sub-range of an underlying stream.
    DataRange,
    /// Indirection through the [`MountPointManager`](crate::mount::MountPointManager).
    Mount,
    /// A Volume Shadow Copy snapshot.
    Vshadow,
}

impl TypeIndicator {
    /// The canonical wire string for this indicator, as used in JSON
    /// serialization and registry lookups.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Os => "OS",
            Self::Fake => "FAKE",
            Self::Raw => "RAW",
            Self::Gzip => "GZIP",
            Self::Bzip2 => "BZIP2",
            Self::Tar => "TAR",
            Self::Zip => "ZIP",
            Self::Apfs => "APFS",
            Self::ApfsContainer => "APFS_CONTAINER",
            Self::Hfs => "HFS",
            Self::Ntfs => "NTFS",
            Self::Ext => "EXT",
            Self::Fat => "FAT",
            Self::Xfs => "XFS",
            Self::Gpt => "GPT",
            Self::Mbr => "MBR",
            Self::TskPartition => "TSK_PARTITION",
            Self::Lvm => "LVM",
            Self::Bde => "BDE",
            Self::Fvde => "FVDE",
            Self::Luks => "LUKS",
            Self::Cs => "CS",
            Self::Modi => "MODI",
            Self::EncryptedStream => "ENCRYPTED_STREAM",
            Self::CompressedStream => "COMPRESSED_STREAM",
            Self::DataRange => "DATA_RANGE",
            Self::Mount => "MOUNT",
            Self::Vshadow => "VSHADOW",
        }
    }

    /// Root-level types that must never carry a parent.
    pub const fn is_root_type(self) -> bool {
        matches!(self, Self::Os | Self::Fake | Self::Mount)
    }
}

impl fmt::Display for TypeIndicator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TypeIndicator {
    type Err = VfsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s {
            "OS" => Self::Os,
            "FAKE" => Self::Fake,
            "RAW" => Self::Raw,
            "GZIP" => Self::Gzip,
            "BZIP2" => Self::Bzip2,
            "TAR" => Self::Tar,
            "ZIP" => Self::Zip,
            "APFS" => Self::Apfs,
            "APFS_CONTAINER" => Self::ApfsContainer,
            "HFS" => Self::Hfs,
            "NTFS" => Self::Ntfs,
            "EXT" => Self::Ext,
            "FAT" => Self::Fat,
            "XFS" => Self::Xfs,
            "GPT" => Self::Gpt,
            "MBR" => Self::Mbr,
            "TSK_PARTITION" => Self::TskPartition,
            "LVM" => Self::Lvm,
            "BDE" => Self::Bde,
            "FVDE" => Self::Fvde,
            "LUKS" => Self::Luks,
            "CS" => Self::Cs,
            "MODI" => Self::Modi,
            "ENCRYPTED_STREAM" => Self::EncryptedStream,
            "COMPRESSED_STREAM" => Self::CompressedStream,
            "DATA_RANGE" => Self::DataRange,
            "MOUNT" => Self::Mount,
            "VSHADOW" => Self::Vshadow,
            other => {
                return Err(VfsError::PathSpec {
                    reason: format!("unknown type indicator: {other}"),
                });
            }
        })
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for TypeIndicator {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for TypeIndicator {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// The name of one attribute slot in [`PathSpecAttributes`].
///
/// Used by the registry to validate, per type indicator, which attributes
/// a backend accepts (see [`BackendFactory::accepted_attributes`](crate::registry::BackendFactory)).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AttributeName {
    /// `location` — a path string within the parent container.
    Location,
    /// `identifier` — a backend-defined object identifier (e.g. APFS `identifier`).
    Identifier,
    /// `inode` — an inode number.
    Inode,
    /// `data_stream` — a named data stream within the target entry.
    DataStream,
    /// `start_offset` — byte offset of a sub-range or partition.
    StartOffset,
    /// `range_offset` — start offset of a `DATA_RANGE` wrapper.
    RangeOffset,
    /// `range_size` — length of a `DATA_RANGE` wrapper.
    RangeSize,
    /// `cipher_mode` — block cipher mode (e.g. `cbc`, `xts`).
    CipherMode,
    /// `encryption_method` — encryption algorithm identifier.
    EncryptionMethod,
    /// `password` — a plaintext password attribute (convenience alternative
    /// to registering a credential in the [`KeyChain`](crate::credentials::KeyChain)).
    Password,
    /// `recovery_password` — a recovery password attribute.
    RecoveryPassword,
    /// `volume_index` — index of a volume within a container.
    VolumeIndex,
    /// `part_index` — index of a partition within a partition table.
    PartIndex,
    /// `key_data` — raw key material attribute.
    KeyData,
    /// `startup_key` — a startup/recovery key attribute (BitLocker).
    StartupKey,
}

/// The variant-specific attribute bag carried by a [`PathSpec`].
///
/// Every field is optional; which ones are meaningful for a given
/// [`TypeIndicator`] is declared by that backend's registry entry and
/// enforced by [`PathSpec::builder`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct PathSpecAttributes {
    /// A path string within the parent container.
    pub location: Option<String>,
    /// A backend-defined object identifier.
    pub identifier: Option<u64>,
    /// An inode number.
    pub inode: Option<u64>,
    /// A named data stream within the target entry.
    pub data_stream: Option<String>,
    /// Byte offset of a sub-range or partition.
    pub start_offset: Option<u64>,
    /// Start offset of a `DATA_RANGE` wrapper.
    pub range_offset: Option<u64>,
    /// Length of a `DATA_RANGE` wrapper.
    pub range_size: Option<u64>,
    /// Block cipher mode.
    pub cipher_mode: Option<String>,
    /// Encryption algorithm identifier.
    pub encryption_method: Option<String>,
    /// Plaintext password attribute.
    pub password: Option<String>,
    /// Recovery password attribute.
    pub recovery_password: Option<String>,
    /// Index of a volume within a container.
    pub volume_index: Option<u64>,
    /// Index of a partition within a partition table.
    pub part_index: Option<u64>,
    /// Raw key material attribute.
    pub key_data: Option<String>,
    /// Startup/recovery key attribute.
    pub startup_key: Option<String>,
}

impl PathSpecAttributes {
    /// Names of attributes that are actually populated (`Some`) on this bag.
    pub fn populated_names(&self) -> Vec<AttributeName> {
        let mut names = Vec::new();
        macro_rules! push_if_some {
            ($field:ident, $name:expr) => {
                if self.$field.is_some() {
                    names.push($name);
                }
            };
        }
        push_if_some!(location, AttributeName::Location);
        push_if_some!(identifier, AttributeName::Identifier);
        push_if_some!(inode, AttributeName::Inode);
        push_if_some!(data_stream, AttributeName::DataStream);
        push_if_some!(start_offset, AttributeName::StartOffset);
        push_if_some!(range_offset, AttributeName::RangeOffset);
        push_if_some!(range_size, AttributeName::RangeSize);
        push_if_some!(cipher_mode, AttributeName::CipherMode);
        push_if_some!(encryption_method, AttributeName::EncryptionMethod);
        push_if_some!(password, AttributeName::Password);
        push_if_some!(recovery_password, AttributeName::RecoveryPassword);
        push_if_some!(volume_index, AttributeName::VolumeIndex);
        push_if_some!(part_index, AttributeName::PartIndex);
        push_if_some!(key_data, AttributeName::KeyData);
        push_if_some!(startup_key, AttributeName::StartupKey);
        names
    }

    fn write_canonical(&self, out: &mut String) {
        macro_rules! write_field {
            ($field:ident, $name:literal) => {
                if let Some(v) = &self.$field {
                    out.push_str(concat!(", ", $name, "="));
                    out.push_str(&v.to_string());
                }
            };
        }
        write_field!(location, "location");
        write_field!(identifier, "identifier");
        write_field!(inode, "inode");
        write_field!(data_stream, "data_stream");
        write_field!(start_offset, "start_offset");
        write_field!(range_offset, "range_offset");
        write_field!(range_size, "range_size");
        write_field!(cipher_mode, "cipher_mode");
        write_field!(encryption_method, "encryption_method");
        write_field!(volume_index, "volume_index");
        write_field!(part_index, "part_index");
        // Credential-shaped attributes are deliberately excluded from the
        // comparable fingerprint's rendered text; they still participate in
        // equality/hash via the derived impls above.
    }
}

/// A canonical, comparable key derived from a [`PathSpec`]'s full parent
/// chain. Two path specs that describe the same object must yield equal
/// fingerprints; the resolver context uses this as its cache key.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Fingerprint(String);

impl Fingerprint {
    /// Borrow the canonical string form.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Fingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// An immutable, hashable, layered path specification.
///
/// Forms a singly-linked chain toward a root spec that has no parent.
/// Equality and hashing are structural over `(type_indicator, attributes,
/// parent)`, so two independently constructed specs describing the same
/// object compare equal.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PathSpec {
    type_indicator: TypeIndicator,
    attributes: PathSpecAttributes,
    parent: Option<Arc<PathSpec>>,
}

impl PathSpec {
    /// Start building a `PathSpec` of the given type.
    pub fn builder(type_indicator: TypeIndicator) -> PathSpecBuilder {
        PathSpecBuilder {
            type_indicator,
            attributes: PathSpecAttributes::default(),
            parent: None,
        }
    }

    /// Convenience constructor for a root `TYPE_OS` spec.
    pub fn os(location: impl Into<String>) -> PathSpec {
        Self::builder(TypeIndicator::Os)
            .location(location)
            .build()
            .expect("TYPE_OS with only location is always valid")
    }

    /// Convenience constructor for a `TYPE_RAW` wrapper over `parent`.
    pub fn raw(parent: PathSpec) -> PathSpec {
        Self::builder(TypeIndicator::Raw)
            .parent(parent)
            .build()
            .expect("TYPE_RAW with only a parent is always valid")
    }

    /// Convenience constructor for a root `TYPE_FAKE` spec (used by the
    /// in-tree test/demo backend).
    pub fn fake(location: impl Into<String>) -> PathSpec {
        Self::builder(TypeIndicator::Fake)
            .location(location)
            .build()
            .expect("TYPE_FAKE with only location is always valid")
    }

    /// Convenience constructor for a `TYPE_MOUNT` indirection spec. Must
    /// never carry a parent; the resolver rejects one that does.
    pub fn mount(identifier: impl Into<String>) -> PathSpec {
        Self::builder(TypeIndicator::Mount)
            .location(identifier)
            .build()
            .expect("TYPE_MOUNT with only location is always valid")
    }

    /// The type indicator of this spec.
    pub fn type_indicator(&self) -> TypeIndicator {
        self.type_indicator
    }

    /// The attribute bag of this spec.
    pub fn attributes(&self) -> &PathSpecAttributes {
        &self.attributes
    }

    /// Whether this spec has a parent.
    pub fn has_parent(&self) -> bool {
        self.parent.is_some()
    }

    /// The parent spec, if any.
    pub fn parent(&self) -> Option<&PathSpec> {
        self.parent.as_deref()
    }

    /// Walk to the root of the parent chain.
    pub fn get_root_parent(&self) -> &PathSpec {
        let mut current = self;
        while let Some(parent) = current.parent() {
            current = parent;
        }
        current
    }

    /// Clone this spec with the file/stream-identifying attributes
    /// (`location`, `identifier`, `inode`, `data_stream`) cleared, keeping
    /// every attribute that identifies the container/backend itself (e.g.
    /// `part_index`, `volume_index`, `range_offset`/`range_size`,
    /// `cipher_mode`). Used by the resolver to derive the identity a
    /// `FileSystem` is cached against: many files share one open
    /// `FileSystem`, but sibling partitions/volumes under the same parent
    /// must not collapse onto each other.
    pub(crate) fn without_file_identity(&self) -> PathSpec {
        let mut attributes = self.attributes.clone();
        attributes.location = None;
        attributes.identifier = None;
        attributes.inode = None;
        attributes.data_stream = None;
        PathSpec {
            type_indicator: self.type_indicator,
            attributes,
            parent: self.parent.clone(),
        }
    }

    /// A canonical, comparable key over the full parent chain. Used as the
    /// resolver context's cache key.
    pub fn comparable(&self) -> Fingerprint {
        let mut out = String::new();
        self.write_comparable(&mut out);
        Fingerprint(out)
    }

    fn write_comparable(&self, out: &mut String) {
        out.push_str("type=");
        out.push_str(self.type_indicator.as_str());
        self.attributes.write_canonical(out);
        if let Some(parent) = &self.parent {
            out.push_str("\nparent:");
            parent.write_comparable(out);
        }
    }

    /// Serialize to the crate's canonical JSON shape.
    #[cfg(feature = "serde")]
    pub fn to_json(&self) -> Result<String, VfsError> {
        serde_json::to_string(self).map_err(|e| VfsError::PathSpec {
            reason: format!("serialization failed: {e}"),
        })
    }

    /// Deserialize from the crate's canonical JSON shape.
    #[cfg(feature = "serde")]
    pub fn from_json(json: &str) -> Result<PathSpec, VfsError> {
        serde_json::from_str(json).map_err(|e| VfsError::PathSpec {
            reason: format!("deserialization failed: {e}"),
        })
    }
}

/// Builder for [`PathSpec`], returned by [`PathSpec::builder`].
///
/// Enforces the invariant that root-level types (`OS`, `FAKE`, `MOUNT`) have
/// no parent, and that nested types have exactly one.
pub struct PathSpecBuilder {
    type_indicator: TypeIndicator,
    attributes: PathSpecAttributes,
    parent: Option<PathSpec>,
}

impl PathSpecBuilder {
    /// Set the `location` attribute.
    pub fn location(mut self, location: impl Into<String>) -> Self {
        self.attributes.location = Some(location.into());
        self
    }

    /// Set the `identifier` attribute.
    pub fn identifier(mut self, identifier: u64) -> Self {
        self.attributes.identifier = Some(identifier);
        self
    }

    /// Set the `inode` attribute.
    pub fn inode(mut self, inode: u64) -> Self {
        self.attributes.inode = Some(inode);
        self
    }

    /// Set the `data_stream` attribute.
    pub fn data_stream(mut self, name: impl Into<String>) -> Self {
        self.attributes.data_stream = Some(name.into());
        self
    }

    /// Set the `start_offset` attribute.
    pub fn start_offset(mut self, offset: u64) -> Self {
        self.attributes.start_offset = Some(offset);
        self
    }

    /// Set the `range_offset` and `range_size` attributes.
    pub fn range(mut self, offset: u64, size: u64) -> Self {
        self.attributes.range_offset = Some(offset);
        self.attributes.range_size = Some(size);
        self
    }

    /// Set the `cipher_mode` attribute.
    pub fn cipher_mode(mut self, mode: impl Into<String>) -> Self {
        self.attributes.cipher_mode = Some(mode.into());
        self
    }

    /// Set the `encryption_method` attribute.
    pub fn encryption_method(mut self, method: impl Into<String>) -> Self {
        self.attributes.encryption_method = Some(method.into());
        self
    }

    /// Set the `password` attribute.
    pub fn password(mut self, password: impl Into<String>) -> Self {
        self.attributes.password = Some(password.into());
        self
    }

    /// Set the `recovery_password` attribute.
    pub fn recovery_password(mut self, password: impl Into<String>) -> Self {
        self.attributes.recovery_password = Some(password.into());
        self
    }

    /// Set the `volume_index` attribute.
    pub fn volume_index(mut self, index: u64) -> Self {
        self.attributes.volume_index = Some(index);
        self
    }

    /// Set the `part_index` attribute.
    pub fn part_index(mut self, index: u64) -> Self {
        self.attributes.part_index = Some(index);
        self
    }

    /// Set the parent spec.
    pub fn parent(mut self, parent: PathSpec) -> Self {
        self.parent = Some(parent);
        self
    }

    /// Validate and construct the `PathSpec`.
    ///
    /// # Errors
    ///
    /// Returns [`VfsError::PathSpec`] if a root-level type indicator
    /// (`OS`, `FAKE`, `MOUNT`) has a parent, or if a non-root type has none.
    pub fn build(self) -> Result<PathSpec, VfsError> {
        let is_root = self.type_indicator.is_root_type();
        if is_root && self.parent.is_some() {
            return Err(VfsError::PathSpec {
                reason: format!("{} must not have a parent", self.type_indicator),
            });
        }
        if !is_root && self.parent.is_none() {
            return Err(VfsError::PathSpec {
                reason: format!("{} requires a parent", self.type_indicator),
            });
        }
        Ok(PathSpec {
            type_indicator: self.type_indicator,
            attributes: self.attributes,
            parent: self.parent.map(Arc::new),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn type_indicator_round_trips_through_str() {
        for ti in [
            TypeIndicator::Os,
            TypeIndicator::Apfs,
            TypeIndicator::ApfsContainer,
            TypeIndicator::TskPartition,
            TypeIndicator::Mount,
        ] {
            assert_eq!(ti.as_str().parse::<TypeIndicator>().unwrap(), ti);
        }
    }

    #[test]
    fn unknown_type_indicator_is_rejected() {
        assert!("BOGUS".parse::<TypeIndicator>().is_err());
    }

    #[test]
    fn root_type_rejects_parent() {
        let os = PathSpec::os("/x");
        let err = PathSpec::builder(TypeIndicator::Os)
            .location("/y")
            .parent(os)
            .build()
            .unwrap_err();
        assert!(matches!(err, VfsError::PathSpec { .. }));
    }

    #[test]
    fn nested_type_requires_parent() {
        let err = PathSpec::builder(TypeIndicator::Raw).build().unwrap_err();
        assert!(matches!(err, VfsError::PathSpec { .. }));
    }

    #[test]
    fn equal_specs_have_equal_fingerprints() {
        let a = PathSpec::raw(PathSpec::os("/images/apfs.raw"));
        let b = PathSpec::raw(PathSpec::os("/images/apfs.raw"));
        assert_eq!(a, b);
        assert_eq!(a.comparable(), b.comparable());
    }

    #[test]
    fn different_locations_have_different_fingerprints() {
        let a = PathSpec::os("/a");
        let b = PathSpec::os("/b");
        assert_ne!(a.comparable(), b.comparable());
    }

    #[test]
    fn get_root_parent_walks_the_chain() {
        let os = PathSpec::os("/images/apfs.raw");
        let raw = PathSpec::raw(os.clone());
        let container = PathSpec::builder(TypeIndicator::ApfsContainer)
            .location("/apfs1")
            .parent(raw)
            .build()
            .unwrap();
        assert_eq!(container.get_root_parent(), &os);
    }

    #[test]
    fn comparable_excludes_credential_attributes() {
        let with_password = PathSpec::builder(TypeIndicator::ApfsContainer)
            .location("/apfs1")
            .password("hunter2")
            .parent(PathSpec::raw(PathSpec::os("/x")))
            .build()
            .unwrap();
        let without_password = PathSpec::builder(TypeIndicator::ApfsContainer)
            .location("/apfs1")
            .parent(PathSpec::raw(PathSpec::os("/x")))
            .build()
            .unwrap();
        assert_eq!(with_password.comparable(), without_password.comparable());
        assert!(!with_password.comparable().as_str().contains("hunter2"));
    }

    #[test]
    fn without_file_identity_clears_only_file_fields() {
        let raw = PathSpec::raw(PathSpec::os("/images/disk.raw"));
        let partition = PathSpec::builder(TypeIndicator::TskPartition)
            .location("/p1")
            .part_index(0)
            .parent(raw)
            .build()
            .unwrap();
        let base = partition.without_file_identity();
        assert!(base.attributes().location.is_none());
        assert_eq!(base.attributes().part_index, Some(0));
        assert_eq!(base.type_indicator(), TypeIndicator::TskPartition);
    }

    #[test]
    fn without_file_identity_keeps_sibling_partitions_distinct() {
        let raw = PathSpec::raw(PathSpec::os("/images/disk.raw"));
        let partition_a = PathSpec::builder(TypeIndicator::TskPartition)
            .location("/p1")
            .part_index(0)
            .parent(raw.clone())
            .build()
            .unwrap();
        let partition_b = PathSpec::builder(TypeIndicator::TskPartition)
            .location("/p2")
            .part_index(1)
            .parent(raw)
            .build()
            .unwrap();
        assert_ne!(
            partition_a.without_file_identity().comparable(),
            partition_b.without_file_identity().comparable()
        );
    }

    #[cfg(feature = "serde")]
    #[test]
    fn json_round_trips() {
        let spec = PathSpec::builder(TypeIndicator::ApfsContainer)
            .location("/apfs1")
            .identifier(19)
            .parent(PathSpec::raw(PathSpec::os("/images/apfs.raw")))
            .build()
            .unwrap();
        let json = spec.to_json().unwrap();
        let decoded = PathSpec::from_json(&json).unwrap();
        assert_eq!(spec, decoded);
    }
}
