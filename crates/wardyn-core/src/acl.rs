//! Resolved ACL records and permission entries.
//!
//! These are data carriers only. Acls are produced by a lookup strategy
//! (which owns resolution and caching); the ACL service reads them and
//! never evaluates permission masks itself.

use crate::identity::{ObjectIdentity, Sid};
use serde::{Deserialize, Serialize};

// ============================================================================
// Permission
// ============================================================================

/// A permission bit mask.
///
/// Carries the base masks of the standard ACL model. Evaluation of masks
/// against requested access belongs to the consuming framework, not to
/// this workspace.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Permission {
    mask: i32,
}

impl Permission {
    /// Read access.
    pub const READ: Permission = Permission { mask: 1 };
    /// Write access.
    pub const WRITE: Permission = Permission { mask: 1 << 1 };
    /// Create access.
    pub const CREATE: Permission = Permission { mask: 1 << 2 };
    /// Delete access.
    pub const DELETE: Permission = Permission { mask: 1 << 3 };
    /// Administration access.
    pub const ADMINISTRATION: Permission = Permission { mask: 1 << 4 };

    /// Creates a permission from a raw mask.
    pub fn from_mask(mask: i32) -> Self {
        Self { mask }
    }

    /// The raw bit mask.
    pub fn mask(&self) -> i32 {
        self.mask
    }
}

impl std::ops::BitOr for Permission {
    type Output = Permission;

    fn bitor(self, rhs: Permission) -> Permission {
        Permission {
            mask: self.mask | rhs.mask,
        }
    }
}

// ============================================================================
// AccessControlEntry
// ============================================================================

/// One ordered permission entry of an ACL.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccessControlEntry {
    /// Store-assigned entry identifier.
    pub id: i64,
    /// The security identity this entry applies to.
    pub sid: Sid,
    /// The permission mask granted or denied.
    pub permission: Permission,
    /// `true` grants the permission, `false` denies it.
    pub granting: bool,
    /// Whether successful access via this entry is audited.
    pub audit_success: bool,
    /// Whether failed access via this entry is audited.
    pub audit_failure: bool,
}

impl AccessControlEntry {
    /// Creates a granting entry with auditing disabled.
    pub fn granting(id: i64, sid: Sid, permission: Permission) -> Self {
        Self {
            id,
            sid,
            permission,
            granting: true,
            audit_success: false,
            audit_failure: false,
        }
    }
}

// ============================================================================
// Acl
// ============================================================================

/// The resolved permission record for one object identity.
///
/// Owner, optional parent reference (for inheritance resolution by the
/// consuming framework), and the ordered permission entries.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Acl {
    /// Store-assigned ACL identifier.
    pub id: i64,
    /// The identity this record secures.
    pub object_identity: ObjectIdentity,
    /// The owning security identity.
    pub owner: Sid,
    /// Identity of the parent ACL, if entries are inherited.
    pub parent: Option<ObjectIdentity>,
    /// Ordered permission entries.
    pub entries: Vec<AccessControlEntry>,
    /// Whether entries from the parent chain apply to this object.
    pub entries_inheriting: bool,
}

impl Acl {
    /// Creates a parentless ACL with no entries.
    pub fn new(id: i64, object_identity: ObjectIdentity, owner: Sid) -> Self {
        Self {
            id,
            object_identity,
            owner,
            parent: None,
            entries: Vec::new(),
            entries_inheriting: true,
        }
    }

    /// Sets the parent identity.
    pub fn with_parent(mut self, parent: ObjectIdentity) -> Self {
        self.parent = Some(parent);
        self
    }

    /// Appends a permission entry.
    pub fn with_entry(mut self, entry: AccessControlEntry) -> Self {
        self.entries.push(entry);
        self
    }
}

// ============================================================================
// Tests
// ============================================================================
