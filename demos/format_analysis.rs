//! Content-sniff an opened stream with a custom `AnalyzerHelper`, and show a
//! `PathSpec` round-tripping through JSON. Run with:
//!
//! ```text
//! cargo run --example format_analysis --features serde
//! ```

use std::sync::Arc;

use vfscore::credentials::KeyChain;
use vfscore::mount::MountPointManager;
use vfscore::registry::TypeRegistry;
use vfscore::{
    resolver, AnalyzerHelper, AttributeName, BackendFactory, FileObject, FileSystem, FormatAnalyzer,
    FormatCategory, PathSpec, ResolverHelper, TypeIndicator, VfsError,
};

/// Recognises a stream by its first two bytes, standing in for a real
/// magic-bytes check (e.g. gzip's `1f 8b`).
struct MagicBytesHelper {
    type_indicator: TypeIndicator,
    magic: &'static [u8],
}

impl AnalyzerHelper for MagicBytesHelper {
    fn type_indicator(&self) -> TypeIndicator {
        self.type_indicator
    }

    fn analyze_file_object(&self, file_object: &dyn FileObject) -> Result<bool, VfsError> {
        let mut buf = vec![0u8; self.magic.len()];
        let n = file_object.read(&mut buf)?;
        Ok(n == self.magic.len() && buf == self.magic)
    }
}

struct StubResolverHelper(TypeIndicator);

impl ResolverHelper for StubResolverHelper {
    fn type_indicator(&self) -> TypeIndicator {
        self.0
    }
    fn new_file_system(&self) -> Arc<dyn FileSystem> {
        unimplemented!("this demo only exercises content sniffing, not opening this type")
    }
    fn new_file_object(&self) -> Arc<dyn FileObject> {
        unimplemented!("this demo only exercises content sniffing, not opening this type")
    }
}

fn main() {
    let fake_registry = TypeRegistry::global();
    let key_chain = KeyChain::new();
    let mounts = MountPointManager::new();

    let stream = resolver::open_file_object(&PathSpec::fake("/a_file"), fake_registry, &key_chain, &mounts, None)
        .expect("resolver call should not fail")
        .expect("a_file has a default stream");

    let sniff_registry = TypeRegistry::new();
    sniff_registry
        .register(
            TypeIndicator::Raw,
            BackendFactory {
                accepted_attributes: &[AttributeName::Location],
                accepted_credentials: &[],
                resolver_helper: Arc::new(StubResolverHelper(TypeIndicator::Raw)),
                analyzer_helper: Some(Arc::new(MagicBytesHelper {
                    type_indicator: TypeIndicator::Raw,
                    magic: b"he",
                })),
                format_category: FormatCategory::STORAGE_MEDIA,
            },
        )
        .unwrap();

    let analyzer = FormatAnalyzer::new(&sniff_registry);
    let matches = analyzer.analyze(&*stream).expect("analysis should not fail");
    println!("sniffed type indicators: {matches:?}");
    println!("stream position after analysis: {}", stream.tell().unwrap());

    #[cfg(feature = "serde")]
    {
        let spec = PathSpec::builder(TypeIndicator::ApfsContainer)
            .location("/apfs1")
            .identifier(19)
            .parent(PathSpec::raw(PathSpec::os("/images/apfs.raw")))
            .build()
            .unwrap();
        let json = spec.to_json().unwrap();
        println!("path spec as json: {json}");
        assert_eq!(PathSpec::from_json(&json).unwrap(), spec);
    }
}
