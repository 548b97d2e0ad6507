//! # wardyn-acl
//!
//! Graph-backed ACL service.
//!
//! The service translates object identities into graph queries and maps
//! result rows back into the ACL object model. Resolution of full ACL
//! records is delegated to a [`LookupStrategy`] collaborator (which owns
//! caching); the service enforces the all-or-nothing batch contract: a
//! batch read succeeds only if every requested identity resolved.
//!
//! - [`AclService`]: the caller-facing trait
//! - [`GraphAclService`]: the graph-backed implementation
//! - [`LookupStrategy`] / [`AclCache`]: collaborator traits
//! - [`AclServiceConfig`]: the replaceable child-lookup query template

#![warn(missing_docs)]
#![warn(clippy::all)]
#![forbid(unsafe_code)]

pub mod cache;
pub mod config;
pub mod lookup;
pub mod service;

pub use cache::AclCache;
pub use config::{AclServiceConfig, DEFAULT_FIND_CHILDREN_QUERY};
pub use lookup::{AclMap, LookupStrategy};
pub use service::{AclService, GraphAclService, GraphAclServiceBuilder};
