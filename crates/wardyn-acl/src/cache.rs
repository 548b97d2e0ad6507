//! The ACL cache collaborator trait.

use async_trait::async_trait;
use wardyn_core::{Acl, ObjectIdentity};

/// Lookaside cache of resolved ACLs, keyed by object identity.
///
/// Consulted and maintained by [`crate::LookupStrategy`] implementations.
/// The service holds a cache handle for configuration pass-through only
/// and never consults it on its own read paths.
#[async_trait]
pub trait AclCache: Send + Sync {
    /// Fetches the cached ACL for an identity, if present.
    async fn get(&self, identity: &ObjectIdentity) -> Option<Acl>;

    /// Stores a resolved ACL under its object identity.
    async fn put(&self, acl: Acl);

    /// Removes one identity's entry.
    async fn evict(&self, identity: &ObjectIdentity);

    /// Removes all entries.
    async fn clear(&self);
}
