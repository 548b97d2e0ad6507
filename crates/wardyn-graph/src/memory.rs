//! In-memory graph executor for tests.
//!
//! Mirrors the concern the storage layer covers with its in-memory
//! backend: a fixture that answers queries without a running graph store.

use crate::executor::GraphExecutor;
use crate::node::{AclNode, ClassNode};
use crate::query::{QueryParams, Row};
use async_trait::async_trait;
use std::collections::HashSet;
use tokio::sync::RwLock;
use wardyn_core::{Error, Result};

/// In-memory executor answering the child-lookup query shape.
///
/// Stores ([`AclNode`], [`ClassNode`]) pairs and resolves the two
/// well-known parameters `objectIdIdentity` and `className` against them,
/// following `parent_object` node-id references the way the store's own
/// query does. The template text is accepted but not parsed.
#[derive(Debug, Default)]
pub struct MemoryGraph {
    nodes: RwLock<Vec<SecuredNode>>,
}

#[derive(Debug, Clone)]
struct SecuredNode {
    acl: AclNode,
    class: ClassNode,
}

impl MemoryGraph {
    /// Creates an empty graph.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a secured resource node and its class.
    pub async fn add_secured(&self, acl: AclNode, class: ClassNode) {
        self.nodes.write().await.push(SecuredNode { acl, class });
    }

    /// Number of stored secured nodes.
    pub async fn len(&self) -> usize {
        self.nodes.read().await.len()
    }

    /// Returns `true` when no nodes are stored.
    pub async fn is_empty(&self) -> bool {
        self.nodes.read().await.is_empty()
    }
}

#[async_trait]
impl GraphExecutor for MemoryGraph {
    async fn run_query(&self, _template: &str, params: &QueryParams) -> Result<Vec<Row>> {
        let parent_identifier = params
            .get("objectIdIdentity")
            .and_then(serde_json::Value::as_i64)
            .ok_or_else(|| {
                Error::data_access("query parameter 'objectIdIdentity' is missing or not an integer")
            })?;
        let class_name = params
            .get("className")
            .and_then(serde_json::Value::as_str)
            .ok_or_else(|| {
                Error::data_access("query parameter 'className' is missing or not a string")
            })?;

        let nodes = self.nodes.read().await;

        // Parent match is on (domain identifier, class name); children link
        // back via the parent's node id.
        let parent_node_ids: HashSet<i64> = nodes
            .iter()
            .filter(|n| {
                n.acl.object_id_identity == parent_identifier && n.class.class_name == class_name
            })
            .map(|n| n.acl.id)
            .collect();

        let rows: Vec<Row> = nodes
            .iter()
            .filter(|n| {
                n.acl
                    .parent_object
                    .is_some_and(|parent| parent_node_ids.contains(&parent))
            })
            .map(|n| {
                Row::new()
                    .field("aclId", n.acl.object_id_identity)
                    .field("className", n.class.class_name.clone())
            })
            .collect();

        log::debug!(
            "MemoryGraph: children of {class_name}:{parent_identifier} -> {} rows",
            rows.len()
        );

        Ok(rows)
    }

    fn name(&self) -> &str {
        "memory"
    }
}

// ============================================================================
// Tests
// ============================================================================
