//! The ACL service trait and its graph-backed implementation.

use crate::cache::AclCache;
use crate::config::AclServiceConfig;
use crate::lookup::{AclMap, LookupStrategy};
use async_trait::async_trait;
use std::sync::Arc;
use wardyn_core::{Acl, Error, ObjectIdentity, Result, Sid};
use wardyn_graph::{GraphExecutor, QueryParams};

// ============================================================================
// AclService trait
// ============================================================================

/// Caller-facing ACL service contract.
///
/// Three primitive operations (child lookup, single read, batch read) plus
/// sids-less conveniences. The batch read carries the one load-bearing
/// guarantee: success implies every requested identity resolved.
#[async_trait]
pub trait AclService: Send + Sync {
    /// Finds the identities of all secured children of `parent`.
    ///
    /// Matching is on both the parent's identifier and its type; an empty
    /// result is not an error.
    async fn find_children(&self, parent: &ObjectIdentity) -> Result<Vec<ObjectIdentity>>;

    /// Reads the ACLs for all `objects`, optionally scoping permission
    /// entries to `sids`.
    ///
    /// # Errors
    ///
    /// `NotFound` when any requested identity is absent from the resolved
    /// mapping — a partial result is never returned.
    async fn read_acls_by_id(
        &self,
        objects: &[ObjectIdentity],
        sids: Option<&[Sid]>,
    ) -> Result<AclMap>;

    /// Reads one ACL, optionally scoped to `sids`.
    ///
    /// Delegates to [`Self::read_acls_by_id`] and inherits its failure
    /// modes unchanged.
    async fn read_acl_by_id(&self, object: &ObjectIdentity, sids: Option<&[Sid]>) -> Result<Acl> {
        let mut map = self
            .read_acls_by_id(std::slice::from_ref(object), sids)
            .await?;
        // The batch completeness check guarantees the key is present.
        map.remove(object)
            .ok_or_else(|| Error::not_found(object.clone()))
    }

    /// Reads the ACLs for all `objects` with entries for all Sids.
    async fn read_acls(&self, objects: &[ObjectIdentity]) -> Result<AclMap> {
        self.read_acls_by_id(objects, None).await
    }

    /// Reads one ACL with entries for all Sids.
    async fn read_acl(&self, object: &ObjectIdentity) -> Result<Acl> {
        self.read_acl_by_id(object, None).await
    }
}

// ============================================================================
// GraphAclService
// ============================================================================

/// ACL service backed by a graph store.
///
/// Child lookups run directly against the store through a
/// [`GraphExecutor`]; ACL resolution is delegated to a [`LookupStrategy`].
/// Stateless between calls apart from the fixed configuration and the
/// collaborator handles, so concurrent use is safe whenever the
/// collaborators are.
///
/// # Examples
///
/// ```rust,ignore
/// use wardyn_acl::GraphAclService;
///
/// let service = GraphAclService::builder()
///     .executor(executor)
///     .lookup_strategy(strategy)
///     .acl_cache(cache)
///     .build()?;
///
/// let children = service.find_children(&parent).await?;
/// ```
pub struct GraphAclService {
    executor: Arc<dyn GraphExecutor>,
    lookup_strategy: Arc<dyn LookupStrategy>,
    acl_cache: Arc<dyn AclCache>,
    config: AclServiceConfig,
}

impl GraphAclService {
    /// Starts a builder.
    pub fn builder() -> GraphAclServiceBuilder {
        GraphAclServiceBuilder::default()
    }

    /// The graph executor handle.
    pub fn executor(&self) -> &Arc<dyn GraphExecutor> {
        &self.executor
    }

    /// The lookup strategy handle.
    pub fn lookup_strategy(&self) -> &Arc<dyn LookupStrategy> {
        &self.lookup_strategy
    }

    /// The ACL cache handle.
    ///
    /// Held for configuration pass-through; the service's own read paths
    /// never consult it.
    pub fn acl_cache(&self) -> &Arc<dyn AclCache> {
        &self.acl_cache
    }

    /// The service configuration.
    pub fn config(&self) -> &AclServiceConfig {
        &self.config
    }
}

impl std::fmt::Debug for GraphAclService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GraphAclService")
            .field("executor", &self.executor.name())
            .finish()
    }
}

#[async_trait]
impl AclService for GraphAclService {
    async fn find_children(&self, parent: &ObjectIdentity) -> Result<Vec<ObjectIdentity>> {
        if parent.object_type().is_empty() {
            return Err(Error::invalid_argument(
                "parent object identity requires a type name",
            ));
        }

        let params = QueryParams::new()
            .param("objectIdIdentity", parent.identifier())
            .param("className", parent.object_type());

        let rows = self
            .executor
            .run_query(&self.config.find_children_query, &params)
            .await?;

        log::debug!(
            "find_children: parent={parent} -> {} rows via '{}'",
            rows.len(),
            self.executor.name()
        );

        rows.iter()
            .map(|row| {
                Ok(ObjectIdentity::new(
                    row.get_str("className")?,
                    row.get_i64("aclId")?,
                ))
            })
            .collect()
    }

    async fn read_acls_by_id(
        &self,
        objects: &[ObjectIdentity],
        sids: Option<&[Sid]>,
    ) -> Result<AclMap> {
        let result = self.lookup_strategy.read_acls_by_id(objects, sids).await?;

        // Every requested identity must have resolved; a partial result
        // never reaches the caller.
        for object in objects {
            if !result.contains_key(object) {
                return Err(Error::not_found(object.clone()));
            }
        }

        log::debug!(
            "read_acls_by_id: {} requested, {} resolved",
            objects.len(),
            result.len()
        );

        Ok(result)
    }
}

// ============================================================================
// GraphAclServiceBuilder
// ============================================================================

/// Builder for [`GraphAclService`].
///
/// All three collaborators are required; [`GraphAclServiceBuilder::build`]
/// fails with an invalid-argument error naming the first missing one.
#[derive(Default)]
pub struct GraphAclServiceBuilder {
    executor: Option<Arc<dyn GraphExecutor>>,
    lookup_strategy: Option<Arc<dyn LookupStrategy>>,
    acl_cache: Option<Arc<dyn AclCache>>,
    config: AclServiceConfig,
}

impl GraphAclServiceBuilder {
    /// Sets the graph executor.
    pub fn executor(mut self, executor: Arc<dyn GraphExecutor>) -> Self {
        self.executor = Some(executor);
        self
    }

    /// Sets the lookup strategy.
    pub fn lookup_strategy(mut self, lookup_strategy: Arc<dyn LookupStrategy>) -> Self {
        self.lookup_strategy = Some(lookup_strategy);
        self
    }

    /// Sets the ACL cache.
    pub fn acl_cache(mut self, acl_cache: Arc<dyn AclCache>) -> Self {
        self.acl_cache = Some(acl_cache);
        self
    }

    /// Replaces the default configuration.
    pub fn config(mut self, config: AclServiceConfig) -> Self {
        self.config = config;
        self
    }

    /// Builds the service.
    ///
    /// # Errors
    ///
    /// Invalid-argument error when the executor, lookup strategy, or ACL
    /// cache was not supplied.
    pub fn build(self) -> Result<GraphAclService> {
        let executor = self
            .executor
            .ok_or_else(|| Error::invalid_argument("graph executor is required"))?;
        let lookup_strategy = self
            .lookup_strategy
            .ok_or_else(|| Error::invalid_argument("lookup strategy is required"))?;
        let acl_cache = self
            .acl_cache
            .ok_or_else(|| Error::invalid_argument("ACL cache is required"))?;

        Ok(GraphAclService {
            executor,
            lookup_strategy,
            acl_cache,
            config: self.config,
        })
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::config::DEFAULT_FIND_CHILDREN_QUERY;
    use std::sync::Mutex;
    use wardyn_core::Permission;
    use wardyn_graph::Row;

    // ------------------------------------------------------------------
    // Test doubles
    // ------------------------------------------------------------------

    /// Executor returning fixed rows, recording the last call.
    #[derive(Default)]
    struct RecordingExecutor {
        rows: Vec<Row>,
        last_call: Mutex<Option<(String, QueryParams)>>,
    }

    impl RecordingExecutor {
        fn with_rows(rows: Vec<Row>) -> Self {
            Self {
                rows,
                last_call: Mutex::new(None),
            }
        }

        fn last_call(&self) -> Option<(String, QueryParams)> {
            self.last_call.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl GraphExecutor for RecordingExecutor {
        async fn run_query(&self, template: &str, params: &QueryParams) -> Result<Vec<Row>> {
            *self.last_call.lock().unwrap() = Some((template.to_string(), params.clone()));
            Ok(self.rows.clone())
        }

        fn name(&self) -> &str {
            "recording"
        }
    }

    /// Executor failing every query.
    struct FailingExecutor;

    #[async_trait]
    impl GraphExecutor for FailingExecutor {
        async fn run_query(&self, _template: &str, _params: &QueryParams) -> Result<Vec<Row>> {
            Err(Error::data_access("connection refused"))
        }

        fn name(&self) -> &str {
            "failing"
        }
    }

    /// Strategy returning a fixed map, recording the sids it was given.
    #[derive(Default)]
    struct StubLookup {
        map: AclMap,
        last_sids: Mutex<Option<Option<Vec<Sid>>>>,
    }

    impl StubLookup {
        fn with_map(map: AclMap) -> Self {
            Self {
                map,
                last_sids: Mutex::new(None),
            }
        }

        fn last_sids(&self) -> Option<Option<Vec<Sid>>> {
            self.last_sids.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl LookupStrategy for StubLookup {
        async fn read_acls_by_id(
            &self,
            _objects: &[ObjectIdentity],
            sids: Option<&[Sid]>,
        ) -> Result<AclMap> {
            *self.last_sids.lock().unwrap() = Some(sids.map(<[Sid]>::to_vec));
            Ok(self.map.clone())
        }
    }

    /// Strategy failing every resolution.
    struct FailingLookup;

    #[async_trait]
    impl LookupStrategy for FailingLookup {
        async fn read_acls_by_id(
            &self,
            _objects: &[ObjectIdentity],
            _sids: Option<&[Sid]>,
        ) -> Result<AclMap> {
            Err(Error::data_access("store unreachable"))
        }
    }

    struct NoopCache;

    #[async_trait]
    impl AclCache for NoopCache {
        async fn get(&self, _identity: &ObjectIdentity) -> Option<Acl> {
            None
        }
        async fn put(&self, _acl: Acl) {}
        async fn evict(&self, _identity: &ObjectIdentity) {}
        async fn clear(&self) {}
    }

    // ------------------------------------------------------------------
    // Fixtures
    // ------------------------------------------------------------------

    fn oid(object_type: &str, identifier: i64) -> ObjectIdentity {
        ObjectIdentity::new(object_type, identifier)
    }

    fn acl_for(identity: &ObjectIdentity) -> Acl {
        Acl::new(identity.identifier(), identity.clone(), Sid::principal("owner")).with_entry(
            wardyn_core::AccessControlEntry::granting(
                1,
                Sid::granted_authority("ROLE_USER"),
                Permission::READ,
            ),
        )
    }

    fn map_of(identities: &[ObjectIdentity]) -> AclMap {
        identities
            .iter()
            .map(|identity| (identity.clone(), acl_for(identity)))
            .collect()
    }

    fn service_with(
        executor: Arc<dyn GraphExecutor>,
        lookup: Arc<dyn LookupStrategy>,
    ) -> GraphAclService {
        GraphAclService::builder()
            .executor(executor)
            .lookup_strategy(lookup)
            .acl_cache(Arc::new(NoopCache))
            .build()
            .unwrap()
    }

    fn lookup_service(lookup: Arc<dyn LookupStrategy>) -> GraphAclService {
        service_with(Arc::new(RecordingExecutor::default()), lookup)
    }

    // ------------------------------------------------------------------
    // Construction
    // ------------------------------------------------------------------

    #[test]
    fn test_build_requires_executor() {
        let err = GraphAclService::builder()
            .lookup_strategy(Arc::new(StubLookup::default()))
            .acl_cache(Arc::new(NoopCache))
            .build()
            .unwrap_err();
        assert!(err.to_string().contains("graph executor"));
        assert!(!err.is_retryable());
    }

    #[test]
    fn test_build_requires_lookup_strategy() {
        let err = GraphAclService::builder()
            .executor(Arc::new(RecordingExecutor::default()))
            .acl_cache(Arc::new(NoopCache))
            .build()
            .unwrap_err();
        assert!(err.to_string().contains("lookup strategy"));
    }

    #[test]
    fn test_build_requires_acl_cache() {
        let err = GraphAclService::builder()
            .executor(Arc::new(RecordingExecutor::default()))
            .lookup_strategy(Arc::new(StubLookup::default()))
            .build()
            .unwrap_err();
        assert!(err.to_string().contains("ACL cache"));
    }

    #[test]
    fn test_build_with_all_collaborators() {
        let service = service_with(
            Arc::new(RecordingExecutor::default()),
            Arc::new(StubLookup::default()),
        );
        assert_eq!(service.executor().name(), "recording");
        assert_eq!(
            service.config().find_children_query,
            DEFAULT_FIND_CHILDREN_QUERY
        );
    }

    // ------------------------------------------------------------------
    // find_children
    // ------------------------------------------------------------------

    #[tokio::test]
    async fn test_find_children_maps_rows_in_order() {
        let executor = Arc::new(RecordingExecutor::with_rows(vec![
            Row::new().field("aclId", 100).field("className", "Section"),
            Row::new().field("aclId", 101).field("className", "Section"),
        ]));
        let service = service_with(executor, Arc::new(StubLookup::default()));

        let children = service.find_children(&oid("Document", 42)).await.unwrap();
        assert_eq!(children, vec![oid("Section", 100), oid("Section", 101)]);
    }

    #[tokio::test]
    async fn test_find_children_sends_template_and_both_parameters() {
        let executor = Arc::new(RecordingExecutor::default());
        let service = service_with(executor.clone(), Arc::new(StubLookup::default()));

        service.find_children(&oid("Document", 42)).await.unwrap();

        let (template, params) = executor.last_call().unwrap();
        assert_eq!(template, DEFAULT_FIND_CHILDREN_QUERY);
        assert_eq!(
            params.get("objectIdIdentity"),
            Some(&serde_json::Value::from(42))
        );
        assert_eq!(
            params.get("className"),
            Some(&serde_json::Value::from("Document"))
        );
        assert_eq!(params.len(), 2);
    }

    #[tokio::test]
    async fn test_find_children_uses_configured_template() {
        let executor = Arc::new(RecordingExecutor::default());
        let service = GraphAclService::builder()
            .executor(executor.clone())
            .lookup_strategy(Arc::new(StubLookup::default()))
            .acl_cache(Arc::new(NoopCache))
            .config(AclServiceConfig {
                find_children_query: "MATCH (n) RETURN n".to_string(),
            })
            .build()
            .unwrap();

        service.find_children(&oid("Document", 42)).await.unwrap();

        let (template, _params) = executor.last_call().unwrap();
        assert_eq!(template, "MATCH (n) RETURN n");
    }

    #[tokio::test]
    async fn test_find_children_empty_result_is_not_an_error() {
        let service = service_with(
            Arc::new(RecordingExecutor::default()),
            Arc::new(StubLookup::default()),
        );
        let children = service.find_children(&oid("Document", 42)).await.unwrap();
        assert!(children.is_empty());
    }

    #[tokio::test]
    async fn test_find_children_propagates_executor_failure() {
        let service = service_with(Arc::new(FailingExecutor), Arc::new(StubLookup::default()));
        let err = service
            .find_children(&oid("Document", 42))
            .await
            .unwrap_err();
        assert!(matches!(err, Error::DataAccess { .. }));
    }

    #[tokio::test]
    async fn test_find_children_rejects_untyped_parent() {
        let service = service_with(
            Arc::new(RecordingExecutor::default()),
            Arc::new(StubLookup::default()),
        );
        let err = service.find_children(&oid("", 42)).await.unwrap_err();
        assert!(matches!(err, Error::InvalidArgument { .. }));
    }

    #[tokio::test]
    async fn test_find_children_fails_on_malformed_row() {
        let executor = Arc::new(RecordingExecutor::with_rows(vec![
            Row::new().field("aclId", 100),
        ]));
        let service = service_with(executor, Arc::new(StubLookup::default()));

        let err = service
            .find_children(&oid("Document", 42))
            .await
            .unwrap_err();
        assert!(err.to_string().contains("className"));
    }

    // ------------------------------------------------------------------
    // read_acls_by_id — completeness and pass-through
    // ------------------------------------------------------------------

    #[tokio::test]
    async fn test_batch_read_succeeds_when_all_resolve() {
        let requested = [oid("Document", 1), oid("Document", 2)];
        let service = lookup_service(Arc::new(StubLookup::with_map(map_of(&requested))));

        let result = service.read_acls_by_id(&requested, None).await.unwrap();
        assert_eq!(result.len(), 2);
        for identity in &requested {
            assert_eq!(&result[identity].object_identity, identity);
        }
    }

    #[tokio::test]
    async fn test_batch_read_fails_with_first_missing_identity() {
        let resolved = map_of(&[oid("Document", 1)]);
        let service = lookup_service(Arc::new(StubLookup::with_map(resolved)));

        let requested = [oid("Document", 1), oid("Folder", 7), oid("Folder", 8)];
        let err = service.read_acls_by_id(&requested, None).await.unwrap_err();

        let Error::NotFound { object_identity } = err else {
            panic!("expected NotFound, got {err:?}");
        };
        assert_eq!(object_identity, oid("Folder", 7));
    }

    #[tokio::test]
    async fn test_batch_read_passes_extra_keys_through() {
        let requested = [oid("Document", 1)];
        // The strategy eagerly resolved an ancestor as well.
        let mut resolved = map_of(&requested);
        let ancestor = oid("Folder", 99);
        resolved.insert(ancestor.clone(), acl_for(&ancestor));
        let service = lookup_service(Arc::new(StubLookup::with_map(resolved.clone())));

        let result = service.read_acls_by_id(&requested, None).await.unwrap();
        assert_eq!(result, resolved, "mapping returned unmodified");
    }

    #[tokio::test]
    async fn test_batch_read_distinguishes_types_sharing_an_identifier() {
        let resolved = map_of(&[oid("Document", 42)]);
        let service = lookup_service(Arc::new(StubLookup::with_map(resolved)));

        let err = service
            .read_acls_by_id(&[oid("Folder", 42)], None)
            .await
            .unwrap_err();
        assert!(matches!(err, Error::NotFound { .. }));
    }

    #[tokio::test]
    async fn test_batch_read_permits_duplicate_identities() {
        let requested = [oid("Document", 1), oid("Document", 1)];
        let service = lookup_service(Arc::new(StubLookup::with_map(map_of(&requested))));

        let result = service.read_acls_by_id(&requested, None).await.unwrap();
        assert_eq!(result.len(), 1);
    }

    #[tokio::test]
    async fn test_batch_read_empty_input_trivially_succeeds() {
        let service = lookup_service(Arc::new(StubLookup::default()));
        let result = service.read_acls_by_id(&[], None).await.unwrap();
        assert!(result.is_empty());
    }

    #[tokio::test]
    async fn test_batch_read_propagates_strategy_failure() {
        let service = lookup_service(Arc::new(FailingLookup));
        let err = service
            .read_acls_by_id(&[oid("Document", 1)], None)
            .await
            .unwrap_err();
        assert!(matches!(err, Error::DataAccess { .. }));
    }

    // ------------------------------------------------------------------
    // Sids are opaque
    // ------------------------------------------------------------------

    #[tokio::test]
    async fn test_sids_forwarded_verbatim() {
        let requested = [oid("Document", 1)];
        let lookup = Arc::new(StubLookup::with_map(map_of(&requested)));
        let service = lookup_service(lookup.clone());

        let sids = vec![Sid::principal("alice")];
        service
            .read_acls_by_id(&requested, Some(&sids))
            .await
            .unwrap();
        assert_eq!(lookup.last_sids(), Some(Some(sids)));

        service.read_acls_by_id(&requested, None).await.unwrap();
        assert_eq!(lookup.last_sids(), Some(None));

        // Empty-but-present is forwarded as-is, not collapsed to None.
        service
            .read_acls_by_id(&requested, Some(&[]))
            .await
            .unwrap();
        assert_eq!(lookup.last_sids(), Some(Some(Vec::new())));
    }

    #[tokio::test]
    async fn test_completeness_holds_identically_with_and_without_sids() {
        let resolved = map_of(&[oid("Document", 1)]);
        let service = lookup_service(Arc::new(StubLookup::with_map(resolved)));
        let requested = [oid("Document", 1), oid("Document", 2)];
        let sids = vec![Sid::granted_authority("ROLE_USER")];

        let with_sids = service.read_acls_by_id(&requested, Some(&sids)).await;
        let without = service.read_acls_by_id(&requested, None).await;
        assert!(matches!(with_sids, Err(Error::NotFound { .. })));
        assert!(matches!(without, Err(Error::NotFound { .. })));
    }

    // ------------------------------------------------------------------
    // Single-read delegation and conveniences
    // ------------------------------------------------------------------

    #[tokio::test]
    async fn test_single_read_returns_the_batch_entry() {
        let object = oid("Document", 1);
        let service = lookup_service(Arc::new(StubLookup::with_map(map_of(&[object.clone()]))));

        let acl = service.read_acl_by_id(&object, None).await.unwrap();
        assert_eq!(acl.object_identity, object);
        assert_eq!(acl, acl_for(&object));
    }

    #[tokio::test]
    async fn test_single_read_fails_like_the_batch() {
        let service = lookup_service(Arc::new(StubLookup::default()));
        let object = oid("Document", 1);

        let err = service.read_acl_by_id(&object, None).await.unwrap_err();
        let Error::NotFound { object_identity } = err else {
            panic!("expected NotFound, got {err:?}");
        };
        assert_eq!(object_identity, object);
    }

    #[tokio::test]
    async fn test_sidless_conveniences_delegate_with_no_restriction() {
        let object = oid("Document", 1);
        let lookup = Arc::new(StubLookup::with_map(map_of(&[object.clone()])));
        let service = lookup_service(lookup.clone());

        let acl = service.read_acl(&object).await.unwrap();
        assert_eq!(acl.object_identity, object);
        assert_eq!(lookup.last_sids(), Some(None));

        let map = service.read_acls(std::slice::from_ref(&object)).await.unwrap();
        assert!(map.contains_key(&object));
        assert_eq!(lookup.last_sids(), Some(None));
    }

    // ------------------------------------------------------------------
    // Completeness property
    // ------------------------------------------------------------------

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            /// The batch read succeeds iff the requested identities are a
            /// subset of the resolved keys.
            #[test]
            fn test_success_iff_requested_subset_of_resolved(
                requested in proptest::collection::vec(0i64..8, 1..6),
                resolved in proptest::collection::hash_set(0i64..8, 0..8),
            ) {
                let requested: Vec<ObjectIdentity> =
                    requested.iter().map(|id| oid("Document", *id)).collect();
                let resolved_ids: Vec<ObjectIdentity> =
                    resolved.iter().map(|id| oid("Document", *id)).collect();

                let service = lookup_service(Arc::new(StubLookup::with_map(map_of(&resolved_ids))));
                let result = tokio_test::block_on(service.read_acls_by_id(&requested, None));

                let complete = requested.iter().all(|identity| resolved_ids.contains(identity));
                if complete {
                    let map = result.unwrap();
                    prop_assert!(requested.iter().all(|identity| map.contains_key(identity)));
                } else {
                    let is_not_found = matches!(result.unwrap_err(), Error::NotFound { .. });
                    prop_assert!(is_not_found);
                }
            }
        }
    }
}
