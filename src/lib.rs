//! # vfscore
//!
//! Core path-spec, resolver, and trait contracts for a read-only digital
//! forensics virtual file system. Defines **only traits, types, and the
//! resolver** — no concrete disk-image parsers. Format backends (APFS,
//! NTFS, FAT, archive and compression wrappers, ...) are separate crates
//! that implement this crate's traits and register themselves with the
//! [`TypeRegistry`].
//!
//! ---
//!
//! ## Quick Start
//!
//! A [`PathSpec`] describes "a thing inside a thing" as a chain of typed,
//! attribute-bearing links: a file on an APFS volume, inside an APFS
//! container, inside a RAW disk image, on the host OS. The [`resolver`]
//! turns one into live backend objects:
//!
//! ```rust
//! use vfscore::{
//!     path_spec::PathSpec, credentials::KeyChain, mount::MountPointManager,
//!     registry::TypeRegistry, resolver,
//! };
//!
//! let registry = TypeRegistry::global();
//! let key_chain = KeyChain::new();
//! let mounts = MountPointManager::new();
//!
//! let spec = PathSpec::fake("/a_file");
//! let entry = resolver::open_file_entry(&spec, registry, &key_chain, &mounts, None)
//!     .unwrap()
//!     .unwrap();
//! assert!(entry.is_file());
//! ```
//!
//! ---
//!
//! ## Core Types
//!
//! | Type | Purpose |
//! |------|---------|
//! | [`PathSpec`] | Composable, hashable identity of an object inside a backend |
//! | [`TypeIndicator`] | The closed set of backend kinds a path spec may carry |
//! | [`VfsError`] | Comprehensive error type with context |
//! | [`FileSystem`] | Parses backend state, hands out [`FileEntry`] views |
//! | [`FileEntry`] | A view onto one object: name, type, timestamps, navigation |
//! | [`FileObject`] | A seekable, read-only byte stream |
//! | [`DataStream`] | A named stream belonging to a [`FileEntry`] |
//! | [`Attribute`] | Typed metadata on a [`FileEntry`] |
//!
//! ---
//!
//! ## Which Module Should I Use?
//!
//! **[`path_spec`]** — building and comparing the identity of an object.
//!
//! **[`resolver`]** — turning a [`PathSpec`] into a live [`FileSystem`],
//! [`FileEntry`], or [`FileObject`]. Almost every caller starts here.
//!
//! **[`registry`]** and **[`analyzer`]** — registering a new format backend,
//! or content-sniffing an unknown stream to find out what it is.
//!
//! **[`context`]** — reusing already-opened handles across many resolver
//! calls instead of reparsing a container for every file inside it.
//!
//! **[`credentials`]** and **[`mount`]** — supplying passwords to encrypted
//! backends, and indirecting through a symbolic mount point.
//!
//! ---
//!
//! ## Trait Design
//!
//! Unlike a layered capability set where one trait builds on another, the
//! five capability traits are independent: a [`FileSystem`] and a
//! [`FileObject`] are different kinds of thing, not the same kind wearing
//! progressively more hats. A backend module implements whichever subset
//! its format needs. See [`traits`] for the full rationale.
//!
//! ---
//!
//! ## Error Handling
//!
//! All operations return `Result<T, VfsError>`. Errors carry enough
//! context — type indicators, mount identifiers, reasons — to diagnose a
//! failure without re-deriving it from logs:
//!
//! ```rust
//! use vfscore::VfsError;
//!
//! let err = VfsError::MountPoint { identifier: "m1".into() };
//! assert_eq!(err.to_string(), "mount point not found: m1");
//! ```
//!
//! ---
//!
//! ## Thread Safety
//!
//! All five capability traits require `Send + Sync`. Methods take `&self`;
//! backends use interior mutability for the open/closed state machine each
//! of [`FileSystem`] and [`FileObject`] tracks. [`ResolverContext`], by
//! contrast, is **not** `Sync` — see its own documentation for the
//! process-wide convenience instance.
//!
//! ---
//!
//! ## Feature Flags
//!
//! | Feature | Description |
//! |---------|-------------|
//! | `serde` | Enable `Serialize`/`Deserialize` for [`PathSpec`] and friends |
//!
//! ---
//!
//! ## Crate Organization
//!
//! This crate contains traits, types, the resolver, and one in-memory
//! `TYPE_FAKE` backend used by its own tests and by downstream integration
//! tests. Real format backends (APFS, NTFS, TSK, archive and compression
//! wrappers, ...) are separate crates that depend on this one and register
//! themselves with [`TypeRegistry::register`].

// Private modules
mod analyzer;
mod backend_support;
mod context;
mod ext;
mod fake_backend;
mod error;
mod traits;
mod types;

// Public modules — named directly in doc examples throughout the crate.
pub mod credentials;
pub mod mount;
pub mod path_spec;
pub mod registry;
pub mod resolver;

// Public re-exports - error type
pub use error::VfsError;

// Public re-exports - core types
pub use types::{Extent, ExtentType, FileType, FormatCategory, Timestamps};

// Public re-exports - path specifications
pub use path_spec::{AttributeName, Fingerprint, PathSpec, PathSpecAttributes, PathSpecBuilder, TypeIndicator};

// Public re-exports - capability traits
pub use traits::{Attribute, DataStream, FileEntry, FileObject, FileSystem, SeekWhence, SubFileEntries};

// Public re-exports - backend scaffolding
pub use backend_support::{build_child_path_spec, HandleLock, OpenState, StatAttribute};

// Public re-exports - registry and content analysis
pub use analyzer::{AnalyzerHelper, FormatAnalyzer, SniffedStream};
pub use registry::{BackendFactory, ResolverHelper, TypeRegistry};

// Public re-exports - credentials and mount indirection
pub use credentials::{CredentialName, CredentialValue, KeyChain};
pub use mount::MountPointManager;

// Public re-exports - resolver context and extension trait
pub use context::{ResolverContext, ResolverContextBuilder};
pub use ext::{read_file_object_to_end, VfsExt};
