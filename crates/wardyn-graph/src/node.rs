//! Persisted node shapes of the ACL graph schema.
//!
//! The store keeps one `AclNode` per secured resource, linked by a
//! `SECURES` relationship to the `ClassNode` naming its type. Parent
//! references point at the parent ACL node's *node id*, not its domain
//! identifier — domain identifiers are only unique within a class.

use serde::{Deserialize, Serialize};
use std::hash::{Hash, Hasher};

// ============================================================================
// ClassNode
// ============================================================================

/// The node recording a securable resource's logical class name.
///
/// Equality and hashing are by `class_name` alone; the store-assigned
/// `graph_id` is absent until the node is persisted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClassNode {
    /// Store-assigned node id, if persisted.
    pub graph_id: Option<i64>,
    /// The logical class/category name.
    pub class_name: String,
}

impl ClassNode {
    /// Creates an unpersisted class node.
    pub fn new<S: Into<String>>(class_name: S) -> Self {
        Self {
            graph_id: None,
            class_name: class_name.into(),
        }
    }
}

impl PartialEq for ClassNode {
    fn eq(&self, other: &Self) -> bool {
        self.class_name == other.class_name
    }
}

impl Eq for ClassNode {}

impl Hash for ClassNode {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.class_name.hash(state);
    }
}

// ============================================================================
// AclNode
// ============================================================================

/// The node recording one secured resource's ACL anchor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AclNode {
    /// Store-assigned node id. Parent references target this, not
    /// `object_id_identity`.
    pub id: i64,
    /// The secured resource's domain identifier within its class.
    pub object_id_identity: i64,
    /// Node id of the parent ACL node, if any.
    pub parent_object: Option<i64>,
    /// Whether entries from the parent chain apply.
    pub entries_inheriting: bool,
}

impl AclNode {
    /// Creates a parentless ACL node.
    pub fn new(id: i64, object_id_identity: i64) -> Self {
        Self {
            id,
            object_id_identity,
            parent_object: None,
            entries_inheriting: true,
        }
    }

    /// Sets the parent node id.
    pub fn with_parent(mut self, parent_node_id: i64) -> Self {
        self.parent_object = Some(parent_node_id);
        self
    }
}

// ============================================================================
// Tests
// ============================================================================
