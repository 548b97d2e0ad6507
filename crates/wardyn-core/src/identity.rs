//! Object and security identity value types.

use serde::{Deserialize, Serialize};
use std::fmt;

// ============================================================================
// ObjectIdentity
// ============================================================================

/// Identity of a securable domain object.
///
/// A pair of the resource's logical type name and its numeric identifier.
/// Identifiers are only unique *within* a type, so both fields participate
/// in equality and hashing — `ObjectIdentity` is safe to use as a map key.
///
/// # Examples
///
/// ```
/// use wardyn_core::ObjectIdentity;
///
/// let a = ObjectIdentity::new("Document", 42);
/// let b = ObjectIdentity::new("Folder", 42);
/// assert_ne!(a, b, "same identifier, different type");
/// assert_eq!(a.to_string(), "Document:42");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ObjectIdentity {
    object_type: String,
    identifier: i64,
}

impl ObjectIdentity {
    /// Creates an identity from a type name and numeric identifier.
    pub fn new<S: Into<String>>(object_type: S, identifier: i64) -> Self {
        Self {
            object_type: object_type.into(),
            identifier,
        }
    }

    /// The resource's logical type name.
    pub fn object_type(&self) -> &str {
        &self.object_type
    }

    /// The resource's identifier within its type.
    pub fn identifier(&self) -> i64 {
        self.identifier
    }
}

impl fmt::Display for ObjectIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.object_type, self.identifier)
    }
}

impl From<(&str, i64)> for ObjectIdentity {
    fn from((object_type, identifier): (&str, i64)) -> Self {
        Self::new(object_type, identifier)
    }
}

// ============================================================================
// Sid
// ============================================================================

/// A security identity: a principal (user) or a granted authority
/// (role, group).
///
/// Opaque to the ACL service itself — Sids are passed through to the
/// lookup strategy, which may scope returned permission entries to them.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Sid {
    /// A directly authenticated principal, keyed by username.
    Principal(String),
    /// A granted authority such as a role or group name.
    GrantedAuthority(String),
}

impl Sid {
    /// Creates a principal Sid.
    pub fn principal<S: Into<String>>(name: S) -> Self {
        Sid::Principal(name.into())
    }

    /// Creates a granted-authority Sid.
    pub fn granted_authority<S: Into<String>>(authority: S) -> Self {
        Sid::GrantedAuthority(authority.into())
    }

    /// The underlying principal or authority name.
    pub fn name(&self) -> &str {
        match self {
            Sid::Principal(name) => name,
            Sid::GrantedAuthority(authority) => authority,
        }
    }

    /// Returns `true` for the principal variant.
    pub fn is_principal(&self) -> bool {
        matches!(self, Sid::Principal(_))
    }
}

impl fmt::Display for Sid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Sid::Principal(name) => write!(f, "principal:{name}"),
            Sid::GrantedAuthority(authority) => write!(f, "authority:{authority}"),
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
