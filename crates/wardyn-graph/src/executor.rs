//! The graph query executor trait.

use crate::query::{QueryParams, Row};
use async_trait::async_trait;
use wardyn_core::Result;

/// Abstract executor of parameterized read queries against a graph store.
///
/// Implementations adapt a concrete graph database driver; the in-memory
/// `MemoryGraph` (feature `test-utils`) serves tests.
///
/// # Async
///
/// `run_query` is async to suit I/O-bound drivers. Callers issue one query
/// per operation and perform no concurrency of their own; cancellation and
/// timeout semantics belong to the implementation.
#[async_trait]
pub trait GraphExecutor: Send + Sync {
    /// Executes a parameterized query, returning named-field rows in the
    /// store's natural order.
    ///
    /// # Errors
    ///
    /// Data-access error on connectivity failure, malformed query, or
    /// store-side error. An empty result is not an error.
    async fn run_query(&self, template: &str, params: &QueryParams) -> Result<Vec<Row>>;

    /// Executor name for diagnostics.
    fn name(&self) -> &str;
}
