//! # Attribute Trait
//!
//! Typed metadata on a [`FileEntry`](crate::traits::file_entry::FileEntry):
//! extended attributes, security descriptors, or the synthesized stat
//! attribute (see [`StatAttribute`](crate::backend_support::StatAttribute)).

use std::sync::Arc;

use crate::path_spec::TypeIndicator;
use crate::traits::file_object::FileObject;

/// A single typed metadata attribute on a file entry.
pub trait Attribute: Send + Sync {
    /// The attribute's name (e.g. an xattr name, or `"stat"`).
    fn name(&self) -> &str;

    /// The type indicator of the backend this attribute came from.
    fn type_indicator(&self) -> TypeIndicator;

    /// For extended attributes, a readable byte stream of the attribute's
    /// value. `None` for attributes with no associated stream (e.g. the
    /// stat attribute, whose fields are read directly).
    fn value_stream(&self) -> Option<Arc<dyn FileObject>>;
}
