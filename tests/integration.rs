//! End-to-end integration tests driving the public resolver API against the
//! in-tree `TYPE_FAKE` backend.
//!
//! These tests verify that:
//! 1. A path spec resolves through the resolver to a live file entry/object.
//! 2. Directory enumeration and parent-walking round-trip correctly.
//! 3. Mount point indirection resolves transparently.
//! 4. The resolver context actually reuses a cached file system.
//! 5. Unsupported formats and missing mounts surface the right error variant.

use vfscore::credentials::KeyChain;
use vfscore::mount::MountPointManager;
use vfscore::registry::TypeRegistry;
use vfscore::{resolver, PathSpec, ResolverContext, TypeIndicator, VfsError, VfsExt};

fn fixtures() -> (&'static TypeRegistry, KeyChain, MountPointManager) {
    (TypeRegistry::global(), KeyChain::new(), MountPointManager::new())
}

#[test]
fn resolves_root_and_enumerates_children() {
    let (registry, key_chain, mounts) = fixtures();
    let root = resolver::open_file_entry(&PathSpec::fake("/"), registry, &key_chain, &mounts, None)
        .unwrap()
        .unwrap();
    assert!(root.is_root());
    assert!(root.is_directory());

    let mut names: Vec<&str> = root
        .sub_file_entries()
        .collect_all()
        .unwrap()
        .iter()
        .map(|entry| entry.name())
        .collect::<Vec<_>>();
    names.sort_unstable();
    assert_eq!(names, vec!["a_directory", "a_file"]);
}

#[test]
fn reads_file_content_through_vfs_ext() {
    let (registry, key_chain, mounts) = fixtures();
    let spec = PathSpec::fake("/a_directory/another_file");
    let entry = resolver::open_file_entry(&spec, registry, &key_chain, &mounts, None)
        .unwrap()
        .unwrap();
    assert_eq!(entry.read_to_end().unwrap(), b"hello from another_file".to_vec());
}

#[test]
fn opens_file_object_directly_via_resolver() {
    let (registry, key_chain, mounts) = fixtures();
    let stream = resolver::open_file_object(&PathSpec::fake("/a_file"), registry, &key_chain, &mounts, None)
        .unwrap()
        .unwrap();
    assert_eq!(stream.get_size().unwrap(), "hello from a_file".len() as u64);
}

#[test]
fn parent_walk_returns_to_root() {
    let (registry, key_chain, mounts) = fixtures();
    let spec = PathSpec::fake("/a_directory/another_file");
    let entry = resolver::open_file_entry(&spec, registry, &key_chain, &mounts, None)
        .unwrap()
        .unwrap();
    let parent = entry.parent_file_entry().unwrap().unwrap();
    assert_eq!(parent.name(), "a_directory");
    let grandparent = parent.parent_file_entry().unwrap().unwrap();
    assert!(grandparent.is_root());
}

#[test]
fn missing_location_resolves_to_none_not_an_error() {
    let (registry, key_chain, mounts) = fixtures();
    let spec = PathSpec::fake("/does-not-exist");
    assert!(resolver::open_file_entry(&spec, registry, &key_chain, &mounts, None)
        .unwrap()
        .is_none());
}

#[test]
fn scenario_s6_mount_point_indirection() {
    let (registry, key_chain, mounts) = fixtures();
    mounts.register_mount("evidence-1", PathSpec::fake("/a_directory"));

    let direct = resolver::open_file_entry(&PathSpec::fake("/a_directory"), registry, &key_chain, &mounts, None)
        .unwrap()
        .unwrap();
    let via_mount = resolver::open_file_entry(&PathSpec::mount("evidence-1"), registry, &key_chain, &mounts, None)
        .unwrap()
        .unwrap();

    assert_eq!(direct.name(), via_mount.name());
    assert_eq!(direct.is_directory(), via_mount.is_directory());
}

#[test]
fn unregistered_mount_identifier_is_a_mount_point_error() {
    let (registry, key_chain, mounts) = fixtures();
    let err = resolver::open_file_system(&PathSpec::mount("ghost"), registry, &key_chain, &mounts, None).unwrap_err();
    assert!(matches!(err, VfsError::MountPoint { identifier } if identifier == "ghost"));
}

#[test]
fn unregistered_type_indicator_is_unsupported_format() {
    let registry = TypeRegistry::new();
    let key_chain = KeyChain::new();
    let mounts = MountPointManager::new();
    let spec = PathSpec::builder(TypeIndicator::Ntfs)
        .location("/")
        .parent(PathSpec::raw(PathSpec::os("/images/disk.raw")))
        .build()
        .unwrap();
    let err = resolver::open_file_system(&spec, &registry, &key_chain, &mounts, None).unwrap_err();
    assert!(matches!(err, VfsError::UnsupportedFormat { type_indicator } if type_indicator == TypeIndicator::Ntfs));
}

#[test]
fn resolver_context_reuses_the_same_file_system_instance() {
    let (registry, key_chain, mounts) = fixtures();
    let mut context = ResolverContext::unbounded();

    let first = resolver::open_file_system(&PathSpec::fake("/a_file"), registry, &key_chain, &mounts, Some(&mut context))
        .unwrap();
    let second = resolver::open_file_system(
        &PathSpec::fake("/a_directory/another_file"),
        registry,
        &key_chain,
        &mounts,
        Some(&mut context),
    )
    .unwrap();

    assert_eq!(context.file_system_cache_len(), 1);
    assert!(std::sync::Arc::ptr_eq(&first, &second));
}
