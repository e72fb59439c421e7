//! # Group Permission Path
//!
//! Binds a permission group to an HTTP method and path pattern. Rules are
//! stored and read back; they are not evaluated against requests here.

use serde::{Deserialize, Serialize};

/// A stored permission rule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroupPermissionPath {
    /// Store-assigned identifier.
    pub id: u64,
    /// Permission group.
    pub group_id: u64,
    /// HTTP method, e.g. `GET`.
    pub method: String,
    /// Path pattern.
    pub path: String,
}

/// Fields supplied when a permission rule is created.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct NewGroupPermissionPath {
    /// Permission group.
    pub group_id: u64,
    /// HTTP method.
    pub method: String,
    /// Path pattern.
    pub path: String,
}

impl NewGroupPermissionPath {
    /// Creates a rule.
    #[must_use]
    pub fn new(group_id: u64, method: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            group_id,
            method: method.into(),
            path: path.into(),
        }
    }

    /// Materializes the stored rule with the assigned id.
    #[must_use]
    pub fn into_rule(self, id: u64) -> GroupPermissionPath {
        GroupPermissionPath {
            id,
            group_id: self.group_id,
            method: self.method,
            path: self.path,
        }
    }
}
