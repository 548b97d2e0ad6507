//! The ACL lookup strategy collaborator trait.

use async_trait::async_trait;
use std::collections::HashMap;
use wardyn_core::{Acl, ObjectIdentity, Result, Sid};

/// Mapping from object identity to its resolved ACL.
pub type AclMap = HashMap<ObjectIdentity, Acl>;

/// Resolves full ACL records from the backing store.
///
/// Owns all caching of previously-resolved records and the interpretation
/// of the optional security-identity restriction: when `sids` is given,
/// permission entries in the returned Acls are scoped to those identities.
/// The service passes `sids` through untouched — `Some(&[])` included.
///
/// A strategy may return a partial map (omitting identities it cannot
/// resolve) and may include extra identities it chose to resolve eagerly,
/// such as ancestors. It is never required to error on a missing entry;
/// completeness is enforced by the caller.
#[async_trait]
pub trait LookupStrategy: Send + Sync {
    /// Resolves ACLs for the requested identities.
    async fn read_acls_by_id(
        &self,
        objects: &[ObjectIdentity],
        sids: Option<&[Sid]>,
    ) -> Result<AclMap>;
}
