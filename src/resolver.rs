//! # Resolver
//!
//! The only place this crate's four collaborators — [`TypeRegistry`],
//! [`KeyChain`], [`MountPointManager`], [`ResolverContext`] — come together.
//! Three free functions, one per capability trait, take a [`PathSpec`] and
//! produce the backend object it identifies: `open_file_system`,
//! `open_file_entry`, `open_file_object`. Backend crates never call one
//! another directly; every layer of a stacked path spec is opened by
//! recursing back through these functions.
//!
//! ## Mount Indirection
//!
//! A `TYPE_MOUNT` spec carries an identifier instead of a location. Each
//! function recognises it up front, resolves the identifier through
//! `mounts`, and continues resolution on the mapped spec — the caller never
//! sees the indirection.
//!
//! ## FileSystem Identity vs. Entry Location
//!
//! A `FileSystem` is cached against the *base* of a spec — the file/stream
//! -identifying attributes (`location`, `identifier`, `inode`, `data_stream`)
//! stripped, every other attribute kept — so that every file inside the same
//! container shares one open `FileSystem` instance, while sibling
//! partitions/volumes/ranges under the same parent (`TSK_PARTITION.part_index`,
//! `LVM.volume_index`, `DATA_RANGE.range_offset`/`range_size`,
//! `ENCRYPTED_STREAM.cipher_mode`, ...) stay distinct cache entries. The
//! backend's own `open()` still receives the original, fully attributed
//! spec — only the cache key is stripped. `FileEntry` lookup likewise uses
//! the original spec.

use std::sync::Arc;

use tracing::instrument;

use crate::context::ResolverContext;
use crate::credentials::KeyChain;
use crate::error::VfsError;
use crate::mount::MountPointManager;
use crate::path_spec::{PathSpec, TypeIndicator};
use crate::registry::TypeRegistry;
use crate::traits::{FileEntry, FileObject, FileSystem};

fn resolve_mount(spec: &PathSpec, mounts: &MountPointManager) -> Result<Option<PathSpec>, VfsError> {
    if spec.type_indicator() != TypeIndicator::Mount {
        return Ok(None);
    }
    let identifier = spec.attributes().location.as_deref().unwrap_or_default();
    Ok(Some(mounts.get_mount(identifier)?))
}

/// Resolve `spec` to the `FileSystem` that contains it.
///
/// `key_chain` is threaded through for encrypted backends that need it
/// during `open`; a backend pulls its credential through
/// [`KeyChain::get_credential`] keyed by the spec's own fingerprint, or
/// falls back to [`KeyChain::global`] if no explicit chain reaches it any
/// other way.
#[instrument(level = "debug", skip(registry, key_chain, mounts, context), fields(type_indicator = %spec.type_indicator()))]
pub fn open_file_system(
    spec: &PathSpec,
    registry: &TypeRegistry,
    key_chain: &KeyChain,
    mounts: &MountPointManager,
    mut context: Option<&mut ResolverContext>,
) -> Result<Arc<dyn FileSystem>, VfsError> {
    if let Some(mapped) = resolve_mount(spec, mounts)? {
        return open_file_system(&mapped, registry, key_chain, mounts, context);
    }

    let base = spec.without_file_identity();
    let fingerprint = base.comparable();

    if let Some(ctx) = context.as_deref_mut() {
        if let Some(cached) = ctx.get_file_system(&fingerprint) {
            tracing::trace!(%fingerprint, "file system cache hit");
            return Ok(cached);
        }
    }

    registry.validate_path_spec(spec)?;
    let factory = registry.lookup(spec.type_indicator())?;
    let file_system = factory.resolver_helper.new_file_system();
    file_system.open(spec)?;
    let _ = key_chain;

    if let Some(ctx) = context {
        ctx.cache_file_system(fingerprint, file_system.clone())?;
    }
    Ok(file_system)
}

/// Resolve `spec` to a `FileEntry`, or `None` if the location does not
/// exist within its file system.
#[instrument(level = "debug", skip(registry, key_chain, mounts, context), fields(type_indicator = %spec.type_indicator()))]
pub fn open_file_entry(
    spec: &PathSpec,
    registry: &TypeRegistry,
    key_chain: &KeyChain,
    mounts: &MountPointManager,
    mut context: Option<&mut ResolverContext>,
) -> Result<Option<Arc<dyn FileEntry>>, VfsError> {
    if let Some(mapped) = resolve_mount(spec, mounts)? {
        return open_file_entry(&mapped, registry, key_chain, mounts, context);
    }

    let file_system = open_file_system(spec, registry, key_chain, mounts, context.as_deref_mut())?;
    let entry = file_system.file_entry_by_path_spec(spec)?;

    if let Some(ctx) = context {
        ctx.release_file_system(&spec.without_file_identity().comparable());
    }
    Ok(entry)
}

/// Resolve `spec` to a readable `FileObject` — the entry's default stream,
/// or the stream named by the spec's `data_stream` attribute. Returns
/// `None` if the entry, or the named stream on it, does not exist.
#[instrument(level = "debug", skip(registry, key_chain, mounts, context), fields(type_indicator = %spec.type_indicator()))]
pub fn open_file_object(
    spec: &PathSpec,
    registry: &TypeRegistry,
    key_chain: &KeyChain,
    mounts: &MountPointManager,
    mut context: Option<&mut ResolverContext>,
) -> Result<Option<Arc<dyn FileObject>>, VfsError> {
    let fingerprint = spec.comparable();

    if let Some(ctx) = context.as_deref_mut() {
        if let Some(cached) = ctx.get_file_object(&fingerprint) {
            tracing::trace!(%fingerprint, "file object cache hit");
            return Ok(Some(cached));
        }
    }

    let Some(entry) = open_file_entry(spec, registry, key_chain, mounts, context.as_deref_mut())? else {
        return Ok(None);
    };
    let stream_name = spec.attributes().data_stream.as_deref().unwrap_or("");
    let Some(file_object) = entry.file_object(stream_name)? else {
        return Ok(None);
    };
    file_object.open(spec)?;

    if let Some(ctx) = context {
        ctx.cache_file_object(fingerprint, file_object.clone())?;
    }
    Ok(Some(file_object))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fixtures() -> (TypeRegistry, KeyChain, MountPointManager) {
        (TypeRegistry::new(), KeyChain::new(), MountPointManager::new())
    }

    #[test]
    fn opens_fake_root_file_entry() {
        let (registry, key_chain, mounts) = fixtures();
        crate::fake_backend::register(&registry);
        let spec = PathSpec::fake("/");
        let mut context = ResolverContext::unbounded();
        let entry = open_file_entry(&spec, &registry, &key_chain, &mounts, Some(&mut context))
            .unwrap()
            .unwrap();
        assert!(entry.is_root());
    }

    #[test]
    fn opens_fake_file_object_and_reads_it() {
        let (registry, key_chain, mounts) = fixtures();
        crate::fake_backend::register(&registry);
        let spec = PathSpec::fake("/a_file");
        let mut context = ResolverContext::unbounded();
        let stream = open_file_object(&spec, &registry, &key_chain, &mounts, Some(&mut context))
            .unwrap()
            .unwrap();
        let mut buf = vec![0u8; 64];
        let n = stream.read(&mut buf).unwrap();
        assert_eq!(&buf[..n], b"hello from a_file");
    }

    #[test]
    fn missing_location_resolves_to_none() {
        let (registry, key_chain, mounts) = fixtures();
        crate::fake_backend::register(&registry);
        let spec = PathSpec::fake("/does-not-exist");
        let entry = open_file_entry(&spec, &registry, &key_chain, &mounts, None).unwrap();
        assert!(entry.is_none());
    }

    #[test]
    fn mount_indirection_resolves_through_target_spec() {
        let (registry, key_chain, mounts) = fixtures();
        crate::fake_backend::register(&registry);
        mounts.register_mount("m1", PathSpec::fake("/a_file"));
        let spec = PathSpec::mount("m1");
        let entry = open_file_entry(&spec, &registry, &key_chain, &mounts, None)
            .unwrap()
            .unwrap();
        assert_eq!(entry.name(), "a_file");
    }

    #[test]
    fn unregistered_mount_identifier_is_an_error() {
        let (registry, key_chain, mounts) = fixtures();
        let spec = PathSpec::mount("does-not-exist");
        let err = open_file_system(&spec, &registry, &key_chain, &mounts, None).unwrap_err();
        assert!(matches!(err, VfsError::MountPoint { .. }));
    }

    #[test]
    fn repeated_open_shares_cached_file_system() {
        let (registry, key_chain, mounts) = fixtures();
        crate::fake_backend::register(&registry);
        let mut context = ResolverContext::unbounded();
        let a = open_file_system(
            &PathSpec::fake("/a_file"),
            &registry,
            &key_chain,
            &mounts,
            Some(&mut context),
        )
        .unwrap();
        assert_eq!(context.file_system_cache_len(), 1);
        let b = open_file_system(
            &PathSpec::fake("/a_directory"),
            &registry,
            &key_chain,
            &mounts,
            Some(&mut context),
        )
        .unwrap();
        assert_eq!(context.file_system_cache_len(), 1);
        assert!(Arc::ptr_eq(&a, &b));
    }
}
