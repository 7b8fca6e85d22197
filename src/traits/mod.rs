//! # VFS Capability Traits
//!
//! The five capability interfaces every format backend implements, and that
//! callers and higher-level tools consume through trait objects:
//! [`FileSystem`], [`FileEntry`], [`FileObject`], [`DataStream`],
//! [`Attribute`].
//!
//! Unlike a layered capability set where one trait builds on another
//! (`Fs: FsRead + FsWrite + FsDir`), these five are independent: a
//! `FileSystem` and a `FileObject` are different kinds of thing, not the
//! same kind wearing progressively more hats. A backend module implements
//! whichever subset its format needs and registers factory closures for
//! them with the [`TypeRegistry`](crate::registry::TypeRegistry).
//!
//! ## Thread Safety
//!
//! All five traits require `Send + Sync`. Methods take `&self`; backends
//! use interior mutability (`RwLock`/`Mutex`) for the state machine each of
//! `FileSystem` and `FileObject` tracks.
//!
//! ## Object Safety
//!
//! All five traits are object-safe and used as trait objects throughout the
//! resolver and context cache (`Arc<dyn FileSystem>`, `Arc<dyn FileObject>`,
//! ...).

pub mod attribute;
pub mod data_stream;
pub mod file_entry;
pub mod file_object;
pub mod file_system;

pub use attribute::Attribute;
pub use data_stream::DataStream;
pub use file_entry::{FileEntry, SubFileEntries};
pub use file_object::{FileObject, SeekWhence};
pub use file_system::FileSystem;
