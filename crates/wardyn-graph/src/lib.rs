//! # wardyn-graph
//!
//! Graph query executor abstraction for the Wardyn ACL workspace.
//!
//! The graph store itself is an external collaborator; this crate defines
//! the seam to it:
//! - [`GraphExecutor`]: the async query-execution trait
//! - [`QueryParams`] / [`Row`]: named parameters in, named-field rows out
//! - [`node`]: the persisted node shapes of the ACL graph schema
//! - `memory`: an in-memory executor for tests (feature `test-utils`)

#![warn(missing_docs)]
#![warn(clippy::all)]
#![forbid(unsafe_code)]

pub mod executor;
#[cfg(any(test, feature = "test-utils"))]
pub mod memory;
pub mod node;
pub mod query;

pub use executor::GraphExecutor;
#[cfg(any(test, feature = "test-utils"))]
pub use memory::MemoryGraph;
pub use node::{AclNode, ClassNode};
pub use query::{QueryParams, Row};
