//! # Fake Backend (`TYPE_FAKE`)
//!
//! An in-memory, read-only backend used by this crate's own tests and by
//! downstream integration tests that want to exercise the resolver without a
//! real disk image. Mirrors a real format backend's shape exactly — it
//! implements all five capability traits and registers through the same
//! [`ResolverHelper`] seam a real APFS or NTFS module would — but its
//! "parsing" is just a fixed, in-memory directory tree keyed by absolute,
//! `/`-separated paths.

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use crate::backend_support::{build_child_path_spec, OpenState, StatAttribute};
use crate::error::VfsError;
use crate::path_spec::{AttributeName, PathSpec, TypeIndicator};
use crate::registry::{BackendFactory, ResolverHelper, TypeRegistry};
use crate::traits::file_object::SeekWhence;
use crate::traits::{Attribute, DataStream, FileEntry, FileObject, FileSystem, SubFileEntries};
use crate::types::{Extent, ExtentType, FormatCategory, Timestamps};

const PATH_SEPARATOR: char = '/';

#[derive(Clone)]
enum FakeContent {
    Directory,
    File(Arc<[u8]>),
}

#[derive(Clone)]
struct FakeNode {
    name: String,
    content: FakeContent,
}

/// The tree every [`FakeFileSystem`] is opened over: a root directory
/// holding one file, one subdirectory, and a file inside that subdirectory —
/// enough nesting to exercise enumeration and parent-walking without a real
/// fixture image.
fn demo_tree() -> BTreeMap<String, FakeNode> {
    let mut tree = BTreeMap::new();
    tree.insert(
        "/".to_string(),
        FakeNode {
            name: String::new(),
            content: FakeContent::Directory,
        },
    );
    tree.insert(
        "/a_file".to_string(),
        FakeNode {
            name: "a_file".to_string(),
            content: FakeContent::File(Arc::from(&b"hello from a_file"[..])),
        },
    );
    tree.insert(
        "/a_directory".to_string(),
        FakeNode {
            name: "a_directory".to_string(),
            content: FakeContent::Directory,
        },
    );
    tree.insert(
        "/a_directory/another_file".to_string(),
        FakeNode {
            name: "another_file".to_string(),
            content: FakeContent::File(Arc::from(&b"hello from another_file"[..])),
        },
    );
    tree
}

fn children_of(tree: &BTreeMap<String, FakeNode>, dir_path: &str) -> Vec<String> {
    let prefix = if dir_path == "/" {
        "/".to_string()
    } else {
        format!("{dir_path}/")
    };
    tree.keys()
        .filter(|path| {
            path.starts_with(&prefix) && path.as_str() != dir_path && !path[prefix.len()..].contains('/')
        })
        .cloned()
        .collect()
}

fn parent_of(location: &str) -> String {
    if location == "/" {
        return "/".to_string();
    }
    match location.rfind('/') {
        Some(0) => "/".to_string(),
        Some(idx) => location[..idx].to_string(),
        None => "/".to_string(),
    }
}

/// An in-memory, read-only `TYPE_FAKE` file system.
pub struct FakeFileSystem {
    state: OpenState,
    tree: Arc<BTreeMap<String, FakeNode>>,
}

impl FakeFileSystem {
    /// A fresh, unopened instance over the built-in demo tree.
    pub fn new() -> Self {
        Self {
            state: OpenState::new(),
            tree: Arc::new(demo_tree()),
        }
    }

    fn entry_at(&self, location: &str) -> Result<Option<Arc<dyn FileEntry>>, VfsError> {
        let Some(node) = self.tree.get(location) else {
            return Ok(None);
        };
        Ok(Some(Arc::new(FakeFileEntry {
            tree: self.tree.clone(),
            location: location.to_string(),
            node: node.clone(),
            spec: PathSpec::fake(location),
        })))
    }
}

impl Default for FakeFileSystem {
    fn default() -> Self {
        Self::new()
    }
}

impl FileSystem for FakeFileSystem {
    fn open(&self, _spec: &PathSpec) -> Result<(), VfsError> {
        self.state.open()
    }

    fn close(&self) -> Result<(), VfsError> {
        self.state.close();
        Ok(())
    }

    fn root_file_entry(&self) -> Result<Arc<dyn FileEntry>, VfsError> {
        self.state.ensure_open()?;
        self.entry_at("/")?.ok_or_else(|| VfsError::BackEnd {
            source: "fake backend is missing its own root node".into(),
        })
    }

    fn file_entry_by_path_spec(&self, spec: &PathSpec) -> Result<Option<Arc<dyn FileEntry>>, VfsError> {
        self.state.ensure_open()?;
        if spec.type_indicator() != TypeIndicator::Fake {
            return Err(VfsError::PathSpec {
                reason: "fake backend only resolves TYPE_FAKE path specs".into(),
            });
        }
        let location = spec.attributes().location.as_deref().unwrap_or("/");
        self.entry_at(location)
    }

    fn base_path_specs(&self) -> Vec<PathSpec> {
        vec![PathSpec::fake("/")]
    }

    fn path_separator(&self) -> char {
        PATH_SEPARATOR
    }
}

struct FakeFileEntry {
    tree: Arc<BTreeMap<String, FakeNode>>,
    location: String,
    node: FakeNode,
    spec: PathSpec,
}

impl FileEntry for FakeFileEntry {
    fn name(&self) -> &str {
        &self.node.name
    }

    fn path_spec(&self) -> &PathSpec {
        &self.spec
    }

    fn is_root(&self) -> bool {
        self.location == "/"
    }

    fn is_virtual(&self) -> bool {
        false
    }

    fn is_allocated(&self) -> bool {
        true
    }

    fn is_device(&self) -> bool {
        false
    }

    fn is_directory(&self) -> bool {
        matches!(self.node.content, FakeContent::Directory)
    }

    fn is_file(&self) -> bool {
        matches!(self.node.content, FakeContent::File(_))
    }

    fn is_link(&self) -> bool {
        false
    }

    fn is_pipe(&self) -> bool {
        false
    }

    fn is_socket(&self) -> bool {
        false
    }

    fn timestamps(&self) -> Timestamps {
        Timestamps::default()
    }

    fn size(&self) -> Option<u64> {
        match &self.node.content {
            FakeContent::File(bytes) => Some(bytes.len() as u64),
            FakeContent::Directory => None,
        }
    }

    fn number_of_sub_file_entries(&self) -> usize {
        if self.is_directory() {
            children_of(&self.tree, &self.location).len()
        } else {
            0
        }
    }

    fn sub_file_entries(&self) -> SubFileEntries {
        if !self.is_directory() {
            return SubFileEntries::from_vec(vec![]);
        }
        let mut paths = children_of(&self.tree, &self.location);
        paths.sort();
        let tree = self.tree.clone();
        let entries: Vec<Arc<dyn FileEntry>> = paths
            .into_iter()
            .filter_map(|path| {
                let node = tree.get(&path)?.clone();
                let child_name = path.rsplit(PATH_SEPARATOR).next().unwrap_or(&path);
                let spec = build_child_path_spec(&self.spec, child_name, PATH_SEPARATOR).ok()?;
                Some(Arc::new(FakeFileEntry {
                    tree: tree.clone(),
                    location: path,
                    node,
                    spec,
                }) as Arc<dyn FileEntry>)
            })
            .collect();
        SubFileEntries::from_vec(entries)
    }

    fn parent_file_entry(&self) -> Result<Option<Arc<dyn FileEntry>>, VfsError> {
        if self.is_root() {
            return Ok(None);
        }
        let parent_location = parent_of(&self.location);
        let Some(node) = self.tree.get(&parent_location) else {
            return Ok(None);
        };
        Ok(Some(Arc::new(FakeFileEntry {
            tree: self.tree.clone(),
            location: parent_location.clone(),
            node: node.clone(),
            spec: PathSpec::fake(parent_location),
        })))
    }

    fn linked_file_entry(&self) -> Result<Option<Arc<dyn FileEntry>>, VfsError> {
        Ok(None)
    }

    fn file_object(&self, data_stream_name: &str) -> Result<Option<Arc<dyn FileObject>>, VfsError> {
        if !data_stream_name.is_empty() {
            return Ok(None);
        }
        match &self.node.content {
            FakeContent::File(bytes) => Ok(Some(Arc::new(FakeFileObject::new(bytes.clone())))),
            FakeContent::Directory => Ok(None),
        }
    }

    fn extents(&self) -> Result<Vec<Extent>, VfsError> {
        match &self.node.content {
            FakeContent::File(bytes) => Ok(vec![Extent {
                extent_type: ExtentType::Data,
                offset: 0,
                size: bytes.len() as u64,
            }]),
            FakeContent::Directory => Ok(vec![]),
        }
    }

    fn data_stream(&self, name: &str) -> Result<Option<Arc<dyn DataStream>>, VfsError> {
        if !name.is_empty() {
            return Ok(None);
        }
        match &self.node.content {
            FakeContent::File(bytes) => Ok(Some(Arc::new(FakeDataStream {
                content: bytes.clone(),
                spec: self.spec.clone(),
            }))),
            FakeContent::Directory => Ok(None),
        }
    }

    fn data_streams(&self) -> Vec<Arc<dyn DataStream>> {
        match &self.node.content {
            FakeContent::File(bytes) => vec![Arc::new(FakeDataStream {
                content: bytes.clone(),
                spec: self.spec.clone(),
            })],
            FakeContent::Directory => vec![],
        }
    }

    fn attributes(&self) -> Vec<Arc<dyn Attribute>> {
        vec![Arc::new(StatAttribute {
            mode: if self.is_directory() { 0o040_755 } else { 0o100_644 },
            uid: 0,
            gid: 0,
            inode: 0,
            size: self.size().unwrap_or(0),
            type_indicator: TypeIndicator::Fake,
        })]
    }
}

struct FakeDataStream {
    content: Arc<[u8]>,
    spec: PathSpec,
}

impl DataStream for FakeDataStream {
    fn name(&self) -> &str {
        ""
    }

    fn open(&self) -> Result<Arc<dyn FileObject>, VfsError> {
        let file_object = FakeFileObject::new(self.content.clone());
        file_object.open(&self.spec)?;
        Ok(Arc::new(file_object))
    }
}

/// An in-memory, read-only `FileObject` backed by a byte slice.
pub struct FakeFileObject {
    state: OpenState,
    content: Arc<[u8]>,
    position: AtomicU64,
}

impl FakeFileObject {
    /// Wrap `content` behind a fresh, unopened guard.
    pub fn new(content: Arc<[u8]>) -> Self {
        Self {
            state: OpenState::new(),
            content,
            position: AtomicU64::new(0),
        }
    }
}

impl FileObject for FakeFileObject {
    fn open(&self, _spec: &PathSpec) -> Result<(), VfsError> {
        self.state.open()
    }

    fn close(&self) -> Result<(), VfsError> {
        self.state.close();
        Ok(())
    }

    fn read(&self, buf: &mut [u8]) -> Result<usize, VfsError> {
        self.state.ensure_open()?;
        let pos = self.position.load(Ordering::SeqCst) as usize;
        if pos >= self.content.len() {
            return Ok(0);
        }
        let n = buf.len().min(self.content.len() - pos);
        buf[..n].copy_from_slice(&self.content[pos..pos + n]);
        self.position.store((pos + n) as u64, Ordering::SeqCst);
        Ok(n)
    }

    fn seek(&self, offset: i64, whence: SeekWhence) -> Result<u64, VfsError> {
        self.state.ensure_open()?;
        let base = match whence {
            SeekWhence::Set => 0i64,
            SeekWhence::Cur => self.position.load(Ordering::SeqCst) as i64,
            SeekWhence::End => self.content.len() as i64,
        };
        let new_pos = base.checked_add(offset).ok_or_else(|| VfsError::BackEnd {
            source: "seek offset overflow".into(),
        })?;
        if new_pos < 0 {
            return Err(VfsError::BackEnd {
                source: "seek before start of stream".into(),
            });
        }
        self.position.store(new_pos as u64, Ordering::SeqCst);
        Ok(new_pos as u64)
    }

    fn tell(&self) -> Result<u64, VfsError> {
        self.state.ensure_open()?;
        Ok(self.position.load(Ordering::SeqCst))
    }

    fn get_size(&self) -> Result<u64, VfsError> {
        self.state.ensure_open()?;
        Ok(self.content.len() as u64)
    }
}

/// Constructs fresh [`FakeFileSystem`] / [`FakeFileObject`] instances for the
/// registry.
pub struct FakeResolverHelper;

impl ResolverHelper for FakeResolverHelper {
    fn type_indicator(&self) -> TypeIndicator {
        TypeIndicator::Fake
    }

    fn new_file_system(&self) -> Arc<dyn FileSystem> {
        Arc::new(FakeFileSystem::new())
    }

    fn new_file_object(&self) -> Arc<dyn FileObject> {
        Arc::new(FakeFileObject::new(Arc::from(&[][..])))
    }
}

/// Register `TYPE_FAKE` into `registry`.
pub fn register(registry: &TypeRegistry) {
    registry
        .register(
            TypeIndicator::Fake,
            BackendFactory {
                accepted_attributes: &[AttributeName::Location],
                accepted_credentials: &[],
                resolver_helper: Arc::new(FakeResolverHelper),
                analyzer_helper: None,
                format_category: FormatCategory::STORAGE_MEDIA,
            },
        )
        .expect("TYPE_FAKE registers exactly once into a fresh registry");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::traits::file_system::FileSystem as _;

    fn opened_fs() -> FakeFileSystem {
        let fs = FakeFileSystem::new();
        fs.open(&PathSpec::fake("/")).unwrap();
        fs
    }

    #[test]
    fn root_entry_is_a_directory() {
        let fs = opened_fs();
        let root = fs.root_file_entry().unwrap();
        assert!(root.is_root());
        assert!(root.is_directory());
        assert_eq!(root.number_of_sub_file_entries(), 2);
    }

    #[test]
    fn sub_file_entries_enumerates_children_in_order() {
        let fs = opened_fs();
        let root = fs.root_file_entry().unwrap();
        let names: Vec<String> = root
            .sub_file_entries()
            .collect_all()
            .unwrap()
            .into_iter()
            .map(|entry| entry.name().to_string())
            .collect();
        assert_eq!(names, vec!["a_directory".to_string(), "a_file".to_string()]);
    }

    #[test]
    fn file_object_reads_full_content() {
        let fs = opened_fs();
        let root = fs.root_file_entry().unwrap();
        let file = root
            .sub_file_entries()
            .collect_all()
            .unwrap()
            .into_iter()
            .find(|entry| entry.name() == "a_file")
            .unwrap();
        let stream = file.file_object("").unwrap().unwrap();
        stream.open(&PathSpec::fake("/a_file")).unwrap();
        let mut buf = vec![0u8; 64];
        let n = stream.read(&mut buf).unwrap();
        assert_eq!(&buf[..n], b"hello from a_file");
        assert_eq!(stream.read(&mut buf).unwrap(), 0);
    }

    #[test]
    fn seek_from_end_lands_at_last_byte() {
        let fs = opened_fs();
        let root = fs.root_file_entry().unwrap();
        let file = root
            .sub_file_entries()
            .collect_all()
            .unwrap()
            .into_iter()
            .find(|entry| entry.name() == "a_file")
            .unwrap();
        let stream = file.file_object("").unwrap().unwrap();
        stream.open(&PathSpec::fake("/a_file")).unwrap();
        stream.seek(-1, SeekWhence::End).unwrap();
        let mut buf = [0u8; 1];
        stream.read(&mut buf).unwrap();
        assert_eq!(&buf, b"e");
    }

    #[test]
    fn parent_file_entry_walks_up_to_root() {
        let fs = opened_fs();
        let root = fs.root_file_entry().unwrap();
        let nested = root
            .sub_file_entries()
            .collect_all()
            .unwrap()
            .into_iter()
            .find(|entry| entry.name() == "a_directory")
            .unwrap()
            .sub_file_entries()
            .collect_all()
            .unwrap()
            .into_iter()
            .find(|entry| entry.name() == "another_file")
            .unwrap();
        let parent = nested.parent_file_entry().unwrap().unwrap();
        assert_eq!(parent.name(), "a_directory");
        let grandparent = parent.parent_file_entry().unwrap().unwrap();
        assert!(grandparent.is_root());
        assert!(grandparent.parent_file_entry().unwrap().is_none());
    }

    #[test]
    fn operations_fail_before_open() {
        let fs = FakeFileSystem::new();
        assert!(fs.root_file_entry().is_err());
    }

    #[test]
    fn register_populates_the_registry() {
        let registry = TypeRegistry::new();
        register(&registry);
        assert!(registry.lookup(TypeIndicator::Fake).is_ok());
    }

    #[test]
    fn sub_file_entries_specs_use_shared_child_spec_builder() {
        let fs = opened_fs();
        let root = fs.root_file_entry().unwrap();
        let nested = root
            .sub_file_entries()
            .collect_all()
            .unwrap()
            .into_iter()
            .find(|entry| entry.name() == "a_directory")
            .unwrap()
            .sub_file_entries()
            .collect_all()
            .unwrap()
            .into_iter()
            .find(|entry| entry.name() == "another_file")
            .unwrap();
        assert_eq!(
            nested.path_spec().attributes().location.as_deref(),
            Some("/a_directory/another_file")
        );
        assert_eq!(nested.path_spec().type_indicator(), TypeIndicator::Fake);
    }

    #[test]
    fn file_type_matches_is_predicates() {
        let fs = opened_fs();
        let root = fs.root_file_entry().unwrap();
        assert_eq!(root.file_type(), crate::types::FileType::Directory);
        let file = root
            .sub_file_entries()
            .collect_all()
            .unwrap()
            .into_iter()
            .find(|entry| entry.name() == "a_file")
            .unwrap();
        assert_eq!(file.file_type(), crate::types::FileType::File);
    }
}
