//! # Format Analyzer
//!
//! Content-sniffs a [`FileObject`] to determine the type indicator of the
//! format nested inside it, scanning registered analyzer helpers in a fixed
//! category order: storage-media → volume-system → file-system → archive →
//! compressed.
//!
//! Grounded in the original's `AnalyzerHelper` contract: a helper either
//! recognises its format and returns its type indicator, or returns no
//! match; mismatches are never treated as errors.

use std::sync::Arc;

use tracing::trace;

use crate::error::VfsError;
use crate::path_spec::TypeIndicator;
use crate::registry::TypeRegistry;
use crate::traits::file_object::FileObject;
use crate::types::FormatCategory;

/// The fixed order in which [`FormatAnalyzer::analyze`] scans categories.
const CATEGORY_ORDER: &[fn(FormatCategory) -> bool] = &[
    |c| c.storage_media,
    |c| c.volume_system,
    |c| c.file_system,
    |c| c.archive,
    |c| c.compressed,
];

/// A backend-provided content sniffer.
///
/// Implementations must not mutate the file object's logical position:
/// restore the seek offset before returning, regardless of match outcome.
pub trait AnalyzerHelper: Send + Sync {
    /// The type indicator this helper recognises.
    fn type_indicator(&self) -> TypeIndicator;

    /// Inspect `file_object` and report whether it recognises the format.
    /// Returns `Ok(false)` for "no match", never an error for a simple
    /// mismatch; `Err` is reserved for I/O failures while probing.
    fn analyze_file_object(&self, file_object: &dyn FileObject) -> Result<bool, VfsError>;
}

/// Scans a [`FileObject`] against every analyzer helper the registry knows
/// about, in category order.
pub struct FormatAnalyzer<'a> {
    registry: &'a TypeRegistry,
}

impl<'a> FormatAnalyzer<'a> {
    /// Build an analyzer backed by `registry`.
    pub fn new(registry: &'a TypeRegistry) -> Self {
        Self { registry }
    }

    /// Scan `file_object` and return every type indicator that recognised
    /// it, in category-scan order. Ambiguity (more than one match, even
    /// within the same category) is surfaced as a multi-element result
    /// rather than silently resolved.
    pub fn analyze(&self, file_object: &dyn FileObject) -> Result<Vec<TypeIndicator>, VfsError> {
        let start_offset = file_object.tell()?;
        let mut matches = Vec::new();
        for in_category in CATEGORY_ORDER {
            for factory in self.registry.factories_in_category(*in_category) {
                let Some(helper) = factory.analyzer_helper.as_ref() else {
                    continue;
                };
                let type_indicator = helper.type_indicator();
                match helper.analyze_file_object(file_object) {
                    Ok(true) => {
                        if !matches.contains(&type_indicator) {
                            matches.push(type_indicator);
                        }
                    }
                    Ok(false) => {}
                    Err(err) => {
                        trace!(%type_indicator, %err, "analyzer helper swallowed mismatch");
                    }
                }
                file_object.seek(
                    start_offset as i64,
                    crate::traits::file_object::SeekWhence::Set,
                )?;
            }
        }
        Ok(matches)
    }
}

/// Convenience wrapper bundling an `Arc<dyn FileObject>` alongside its
/// analyzer helper, used by backends that want to keep a sniffed type
/// indicator attached to the stream it was sniffed from.
pub struct SniffedStream {
    /// The stream that was sniffed.
    pub file_object: Arc<dyn FileObject>,
    /// The type indicators that matched, in scan order.
    pub matches: Vec<TypeIndicator>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::path_spec::AttributeName;
    use crate::registry::{BackendFactory, ResolverHelper};
    use crate::traits::{FileObject, FileSystem};
    use std::sync::atomic::{AtomicU64, Ordering};
    use std::sync::Mutex;

    struct StubFileObject {
        position: AtomicU64,
    }

    impl FileObject for StubFileObject {
        fn open(&self, _spec: &crate::path_spec::PathSpec) -> Result<(), VfsError> {
            Ok(())
        }
        fn close(&self) -> Result<(), VfsError> {
            Ok(())
        }
        fn read(&self, _buf: &mut [u8]) -> Result<usize, VfsError> {
            Ok(0)
        }
        fn seek(
            &self,
            offset: i64,
            _whence: crate::traits::file_object::SeekWhence,
        ) -> Result<u64, VfsError> {
            self.position.store(offset as u64, Ordering::SeqCst);
            Ok(offset as u64)
        }
        fn tell(&self) -> Result<u64, VfsError> {
            Ok(self.position.load(Ordering::SeqCst))
        }
        fn get_size(&self) -> Result<u64, VfsError> {
            Ok(0)
        }
    }

    struct AlwaysMatchHelper(TypeIndicator);

    impl AnalyzerHelper for AlwaysMatchHelper {
        fn type_indicator(&self) -> TypeIndicator {
            self.0
        }
        fn analyze_file_object(&self, _file_object: &dyn FileObject) -> Result<bool, VfsError> {
            Ok(true)
        }
    }

    struct NeverMatchHelper(TypeIndicator);

    impl AnalyzerHelper for NeverMatchHelper {
        fn type_indicator(&self) -> TypeIndicator {
            self.0
        }
        fn analyze_file_object(&self, _file_object: &dyn FileObject) -> Result<bool, VfsError> {
            Ok(false)
        }
    }

    struct StubResolverHelper(TypeIndicator);
    impl ResolverHelper for StubResolverHelper {
        fn type_indicator(&self) -> TypeIndicator {
            self.0
        }
        fn new_file_system(&self) -> Arc<dyn FileSystem> {
            unimplemented!("not exercised by analyzer tests")
        }
        fn new_file_object(&self) -> Arc<dyn FileObject> {
            unimplemented!("not exercised by analyzer tests")
        }
    }

    fn registry_with(helpers: Vec<(TypeIndicator, FormatCategory, Arc<dyn AnalyzerHelper>)>) -> TypeRegistry {
        let registry = TypeRegistry::new();
        for (ti, category, helper) in helpers {
            registry
                .register(
                    ti,
                    BackendFactory {
                        accepted_attributes: &[AttributeName::Location],
                        accepted_credentials: &[],
                        resolver_helper: Arc::new(StubResolverHelper(ti)),
                        analyzer_helper: Some(helper),
                        format_category: category,
                    },
                )
                .unwrap();
        }
        registry
    }

    #[test]
    fn analyze_returns_matching_type_indicator() {
        let registry = registry_with(vec![(
            TypeIndicator::Gzip,
            FormatCategory::COMPRESSED,
            Arc::new(AlwaysMatchHelper(TypeIndicator::Gzip)),
        )]);
        let analyzer = FormatAnalyzer::new(&registry);
        let stream = StubFileObject {
            position: AtomicU64::new(0),
        };
        let matches = analyzer.analyze(&stream).unwrap();
        assert_eq!(matches, vec![TypeIndicator::Gzip]);
    }

    #[test]
    fn analyze_swallows_non_matches() {
        let registry = registry_with(vec![(
            TypeIndicator::Gzip,
            FormatCategory::COMPRESSED,
            Arc::new(NeverMatchHelper(TypeIndicator::Gzip)),
        )]);
        let analyzer = FormatAnalyzer::new(&registry);
        let stream = StubFileObject {
            position: AtomicU64::new(0),
        };
        assert!(analyzer.analyze(&stream).unwrap().is_empty());
    }

    #[test]
    fn analyze_restores_stream_position() {
        let registry = registry_with(vec![(
            TypeIndicator::Gzip,
            FormatCategory::COMPRESSED,
            Arc::new(AlwaysMatchHelper(TypeIndicator::Gzip)),
        )]);
        let analyzer = FormatAnalyzer::new(&registry);
        let stream = StubFileObject {
            position: AtomicU64::new(42),
        };
        analyzer.analyze(&stream).unwrap();
        assert_eq!(stream.tell().unwrap(), 42);
    }

    #[test]
    fn analyze_scans_storage_media_before_file_system() {
        let order = Arc::new(Mutex::new(Vec::new()));

        struct RecordingHelper {
            ti: TypeIndicator,
            order: Arc<Mutex<Vec<TypeIndicator>>>,
        }
        impl AnalyzerHelper for RecordingHelper {
            fn type_indicator(&self) -> TypeIndicator {
                self.ti
            }
            fn analyze_file_object(&self, _file_object: &dyn FileObject) -> Result<bool, VfsError> {
                self.order.lock().unwrap().push(self.ti);
                Ok(false)
            }
        }

        let registry = registry_with(vec![
            (
                TypeIndicator::Apfs,
                FormatCategory::FILE_SYSTEM,
                Arc::new(RecordingHelper {
                    ti: TypeIndicator::Apfs,
                    order: order.clone(),
                }),
            ),
            (
                TypeIndicator::Raw,
                FormatCategory::STORAGE_MEDIA,
                Arc::new(RecordingHelper {
                    ti: TypeIndicator::Raw,
                    order: order.clone(),
                }),
            ),
        ]);
        let analyzer = FormatAnalyzer::new(&registry);
        let stream = StubFileObject {
            position: AtomicU64::new(0),
        };
        analyzer.analyze(&stream).unwrap();
        let seen = order.lock().unwrap().clone();
        assert_eq!(seen, vec![TypeIndicator::Raw, TypeIndicator::Apfs]);
    }
}
