//! # Type Registry
//!
//! Process-wide map from a [`TypeIndicator`] to the factories that
//! construct its `FileSystem` / `FileObject` instances, sniff it from a
//! byte stream, and validate its path-spec attributes. Registration is
//! one-shot, at backend-module load time; lookup is read-only and safe for
//! concurrent readers.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use crate::analyzer::AnalyzerHelper;
use crate::credentials::CredentialName;
use crate::error::VfsError;
use crate::path_spec::{AttributeName, PathSpec, TypeIndicator};
use crate::traits::{FileObject, FileSystem};
use crate::types::FormatCategory;

/// Backend-provided factory constructing a [`FileSystem`] or [`FileObject`]
/// for one [`TypeIndicator`].
///
/// The resolver never imports backend crates directly; it only holds
/// `Arc<dyn ResolverHelper>` obtained from the registry, matching the
/// original's lazily-imported `ResolverHelperManager` without the import
/// cycle that motivated the delay in a dynamically-typed host language.
pub trait ResolverHelper: Send + Sync {
    /// The type indicator this helper constructs backends for.
    fn type_indicator(&self) -> TypeIndicator;

    /// Construct a fresh, unopened `FileSystem` instance.
    fn new_file_system(&self) -> Arc<dyn FileSystem>;

    /// Construct a fresh, unopened `FileObject` instance.
    fn new_file_object(&self) -> Arc<dyn FileObject>;
}

/// Everything the registry knows about one [`TypeIndicator`].
#[derive(Clone)]
pub struct BackendFactory {
    /// The path-spec attribute names this backend accepts; used to reject
    /// unknown attributes at `PathSpec` construction time.
    pub accepted_attributes: &'static [AttributeName],
    /// The credential names this backend accepts; used by
    /// [`KeyChain::set_credential`](crate::credentials::KeyChain::set_credential)
    /// to reject a credential the backend never asks for. Empty for
    /// backends that have no notion of encryption.
    pub accepted_credentials: &'static [CredentialName],
    /// Constructs `FileSystem` / `FileObject` instances.
    pub resolver_helper: Arc<dyn ResolverHelper>,
    /// Content-sniffing helper, if this type indicator can be auto-detected.
    pub analyzer_helper: Option<Arc<dyn AnalyzerHelper>>,
    /// Which analyzer scan categories this backend belongs to.
    pub format_category: FormatCategory,
}

/// Process-wide registry of backend factories, keyed by [`TypeIndicator`].
#[derive(Default)]
pub struct TypeRegistry {
    factories: RwLock<HashMap<TypeIndicator, BackendFactory>>,
}

impl TypeRegistry {
    /// Construct an empty registry. Most callers want
    /// [`TypeRegistry::global`]; a fresh instance is mainly useful in
    /// tests that need isolation from other tests' registrations.
    pub fn new() -> Self {
        Self::default()
    }

    /// The process-wide default registry, populated by
    /// [`register_builtin_backends`] on first access.
    pub fn global() -> &'static TypeRegistry {
        static GLOBAL: std::sync::OnceLock<TypeRegistry> = std::sync::OnceLock::new();
        GLOBAL.get_or_init(|| {
            let registry = TypeRegistry::new();
            register_builtin_backends(&registry);
            registry
        })
    }

    /// Register a factory for `type_indicator`.
    ///
    /// # Errors
    ///
    /// Returns [`VfsError::PathSpec`] if the indicator is already
    /// registered; registration is idempotent-by-rejection, not
    /// idempotent-by-overwrite.
    pub fn register(
        &self,
        type_indicator: TypeIndicator,
        factory: BackendFactory,
    ) -> Result<(), VfsError> {
        let mut factories = self.factories.write().map_err(|_| VfsError::BackEnd {
            source: "type registry lock poisoned".into(),
        })?;
        if factories.contains_key(&type_indicator) {
            return Err(VfsError::PathSpec {
                reason: format!("{type_indicator} is already registered"),
            });
        }
        factories.insert(type_indicator, factory);
        Ok(())
    }

    /// Remove a registration. For tests.
    pub fn deregister(&self, type_indicator: TypeIndicator) {
        if let Ok(mut factories) = self.factories.write() {
            factories.remove(&type_indicator);
        }
    }

    /// Look up the factory for `type_indicator`.
    ///
    /// # Errors
    ///
    /// Returns [`VfsError::UnsupportedFormat`] if nothing is registered.
    pub fn lookup(&self, type_indicator: TypeIndicator) -> Result<BackendFactory, VfsError> {
        let factories = self.factories.read().map_err(|_| VfsError::BackEnd {
            source: "type registry lock poisoned".into(),
        })?;
        factories
            .get(&type_indicator)
            .cloned()
            .ok_or(VfsError::UnsupportedFormat { type_indicator })
    }

    /// All registered factories, grouped by nothing in particular; used by
    /// [`FormatAnalyzer`](crate::analyzer::FormatAnalyzer) to scan by
    /// category.
    pub fn factories_in_category(&self, category: impl Fn(FormatCategory) -> bool) -> Vec<BackendFactory> {
        let Ok(factories) = self.factories.read() else {
            return Vec::new();
        };
        factories
            .values()
            .filter(|f| category(f.format_category))
            .cloned()
            .collect()
    }

    /// Validate `spec`'s populated attributes against the registered
    /// schema for its type indicator.
    pub fn validate_path_spec(&self, spec: &PathSpec) -> Result<(), VfsError> {
        let factory = self.lookup(spec.type_indicator())?;
        for name in spec.attributes().populated_names() {
            if !factory.accepted_attributes.contains(&name) {
                return Err(VfsError::PathSpec {
                    reason: format!(
                        "{} does not accept attribute {:?}",
                        spec.type_indicator(),
                        name
                    ),
                });
            }
        }
        Ok(())
    }
}

/// Register every backend this crate ships with.
///
/// Called once, explicitly, at program init (or lazily by
/// [`TypeRegistry::global`]). This is the systems-language equivalent of
/// the original's lazily-imported resolver-helper manager: the registry
/// never imports a backend module itself, so there is no import cycle to
/// break. Only `TYPE_FAKE`, the in-memory backend used for tests and
/// demonstrations, is registered here; real format backends (APFS, NTFS,
/// TSK, ...) are external collaborators that call [`TypeRegistry::register`]
/// themselves.
pub fn register_builtin_backends(registry: &TypeRegistry) {
    crate::fake_backend::register(registry);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fake_backend::FakeResolverHelper;

    #[test]
    fn lookup_missing_type_is_unsupported_format() {
        let registry = TypeRegistry::new();
        let err = registry.lookup(TypeIndicator::Apfs).unwrap_err();
        assert!(matches!(err, VfsError::UnsupportedFormat { .. }));
    }

    #[test]
    fn register_then_lookup_round_trips() {
        let registry = TypeRegistry::new();
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
            .unwrap();
        assert!(registry.lookup(TypeIndicator::Fake).is_ok());
    }

    #[test]
    fn double_registration_is_an_error() {
        let registry = TypeRegistry::new();
        let make = || BackendFactory {
            accepted_attributes: &[AttributeName::Location],
            accepted_credentials: &[],
            resolver_helper: Arc::new(FakeResolverHelper),
            analyzer_helper: None,
            format_category: FormatCategory::STORAGE_MEDIA,
        };
        registry.register(TypeIndicator::Fake, make()).unwrap();
        assert!(registry.register(TypeIndicator::Fake, make()).is_err());
    }

    #[test]
    fn deregister_allows_re_registration() {
        let registry = TypeRegistry::new();
        let make = || BackendFactory {
            accepted_attributes: &[AttributeName::Location],
            accepted_credentials: &[],
            resolver_helper: Arc::new(FakeResolverHelper),
            analyzer_helper: None,
            format_category: FormatCategory::STORAGE_MEDIA,
        };
        registry.register(TypeIndicator::Fake, make()).unwrap();
        registry.deregister(TypeIndicator::Fake);
        assert!(registry.register(TypeIndicator::Fake, make()).is_ok());
    }

    #[test]
    fn validate_path_spec_rejects_unknown_attribute() {
        let registry = TypeRegistry::new();
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
            .unwrap();
        let spec = PathSpec::builder(TypeIndicator::Fake)
            .location("/x")
            .identifier(1)
            .build()
            .unwrap();
        assert!(registry.validate_path_spec(&spec).is_err());
    }

    #[test]
    fn global_registry_has_fake_backend() {
        assert!(TypeRegistry::global().lookup(TypeIndicator::Fake).is_ok());
    }
}
