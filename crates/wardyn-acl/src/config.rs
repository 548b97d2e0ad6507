//! ACL service configuration.

use serde::{Deserialize, Serialize};

/// Default child-lookup query.
///
/// Finds all secured nodes whose `parentObject` references the node of the
/// given parent, matching the parent on both its domain identifier and its
/// class name — identifiers are only unique within a class. Returns two
/// fields per row: `aclId` (the child's domain identifier) and
/// `className` (the child's class).
///
/// Parameters: `objectIdIdentity` (integer), `className` (string).
pub const DEFAULT_FIND_CHILDREN_QUERY: &str = "MATCH (acl:AclNode)-[:SECURES]->(class:ClassNode) \
     OPTIONAL MATCH (parentAcl:AclNode)-[:SECURES]->(parentClass:ClassNode) \
     WITH parentAcl, parentClass, acl, class \
     WHERE acl.parentObject = parentAcl.id \
     AND parentAcl.objectIdIdentity = $objectIdIdentity \
     AND parentClass.className = $className \
     RETURN acl.objectIdIdentity AS aclId, class.className AS className";

/// Configuration for [`crate::GraphAclService`].
///
/// Supplied at construction and immutable thereafter. The query template
/// is replaceable for stores with a different schema, as long as it keeps
/// the parameter and result-field contract of
/// [`DEFAULT_FIND_CHILDREN_QUERY`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AclServiceConfig {
    /// The parameterized child-lookup query template.
    pub find_children_query: String,
}

impl Default for AclServiceConfig {
    fn default() -> Self {
        Self {
            find_children_query: DEFAULT_FIND_CHILDREN_QUERY.to_string(),
        }
    }
}
