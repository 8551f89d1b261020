//! # Role Catalog
//!
//! The fixed table of dashboard roles and their capability bundles.
//!
//! ## Invariants
//! - The catalog is non-empty (checked at compile time for statics)
//! - Role ids are unique
//! - The first entry is the fallback role

use serde::Serialize;
use std::collections::HashSet;

use super::capability::Capabilities;
use super::errors::{AccessError, AccessResult};

/// Permission token granting every coarse permission
pub const WILDCARD_PERMISSION: &str = "*";

/// A job function and its capability bundle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Role {
    /// Stable identifier (persisted)
    pub id: &'static str,

    pub name: &'static str,

    pub short_name: &'static str,

    pub description: &'static str,

    /// Coarse permission strings, informational only
    pub permissions: &'static [&'static str],

    pub capabilities: Capabilities,
}

impl Role {
    /// Coarse permission check against the permission list.
    ///
    /// This is not consulted by the capability gate.
    pub fn has_permission(&self, permission: &str) -> bool {
        self.permissions
            .iter()
            .any(|p| *p == WILDCARD_PERMISSION || *p == permission)
    }
}

/// Ordered, immutable list of roles
#[derive(Debug, Clone, Copy)]
pub struct RoleCatalog {
    roles: &'static [Role],
}

impl RoleCatalog {
    /// Wrap a role table. Panics (at compile time in const context) when empty.
    pub const fn new(roles: &'static [Role]) -> Self {
        assert!(!roles.is_empty(), "role catalog must not be empty");
        Self { roles }
    }

    pub fn roles(&self) -> &'static [Role] {
        self.roles
    }

    /// Fallback role used when no valid selection exists
    pub fn default_role(&self) -> &'static Role {
        &self.roles[0]
    }

    pub fn find(&self, id: &str) -> Option<&'static Role> {
        self.roles.iter().find(|r| r.id == id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.find(id).is_some()
    }

    pub fn len(&self) -> usize {
        self.roles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.roles.is_empty()
    }

    /// Check structural rules: ids non-empty and unique
    pub fn validate(&self) -> AccessResult<()> {
        let mut seen = HashSet::new();
        for role in self.roles {
            if role.id.trim().is_empty() {
                return Err(AccessError::InvalidCatalog(format!(
                    "role '{}' has an empty id",
                    role.name
                )));
            }
            if !seen.insert(role.id) {
                return Err(AccessError::InvalidCatalog(format!(
                    "duplicate role id '{}'",
                    role.id
                )));
            }
        }
        Ok(())
    }
}

static ROLES: [Role; 7] = [
    Role {
        id: "commander",
        name: "Commander",
        short_name: "CDR",
        description: "Joint force commander with full authority across all feature areas",
        permissions: &[WILDCARD_PERMISSION],
        capabilities: Capabilities::all(),
    },
    Role {
        id: "j2-intel",
        name: "Intelligence Officer",
        short_name: "J2",
        description: "Maintains intelligence products and supports target development",
        permissions: &["intel:read", "intel:write", "targets:read"],
        capabilities: Capabilities {
            can_view_intelligence: true,
            can_edit_intelligence: true,
            can_view_operations: true,
            can_edit_operations: false,
            can_edit_plans: false,
            can_view_targets: true,
            can_edit_targets: false,
            can_nominate_targets: true,
            can_approve_targets: false,
            can_approve_roe: false,
            can_manage_logistics: false,
            can_view_legal: false,
            can_edit_legal: false,
            can_manage_users: false,
        },
    },
    Role {
        id: "j3-ops",
        name: "Operations Officer",
        short_name: "J3",
        description: "Directs current operations and manages the dynamic target list",
        permissions: &["ops:read", "ops:write", "intel:read", "targets:read"],
        capabilities: Capabilities {
            can_view_intelligence: true,
            can_edit_intelligence: false,
            can_view_operations: true,
            can_edit_operations: true,
            can_edit_plans: false,
            can_view_targets: true,
            can_edit_targets: true,
            can_nominate_targets: true,
            can_approve_targets: false,
            can_approve_roe: false,
            can_manage_logistics: false,
            can_view_legal: true,
            can_edit_legal: false,
            can_manage_users: false,
        },
    },
    Role {
        id: "j4-log",
        name: "Logistics Officer",
        short_name: "J4",
        description: "Tracks supply, munitions, and transportation status",
        permissions: &["logistics:read", "logistics:write", "ops:read"],
        capabilities: Capabilities {
            can_view_intelligence: false,
            can_edit_intelligence: false,
            can_view_operations: true,
            can_edit_operations: false,
            can_edit_plans: false,
            can_view_targets: false,
            can_edit_targets: false,
            can_nominate_targets: false,
            can_approve_targets: false,
            can_approve_roe: false,
            can_manage_logistics: true,
            can_view_legal: false,
            can_edit_legal: false,
            can_manage_users: false,
        },
    },
    Role {
        id: "j5-plans",
        name: "Plans Officer",
        short_name: "J5",
        description: "Develops future plans and courses of action",
        permissions: &["plans:read", "plans:write", "ops:read", "intel:read"],
        capabilities: Capabilities {
            can_view_intelligence: true,
            can_edit_intelligence: false,
            can_view_operations: true,
            can_edit_operations: false,
            can_edit_plans: true,
            can_view_targets: true,
            can_edit_targets: false,
            can_nominate_targets: false,
            can_approve_targets: false,
            can_approve_roe: false,
            can_manage_logistics: false,
            can_view_legal: false,
            can_edit_legal: false,
            can_manage_users: false,
        },
    },
    Role {
        id: "targeting",
        name: "Targeting Officer",
        short_name: "TGT",
        description: "Builds target packages and maintains target priorities",
        permissions: &["targets:read", "targets:write", "targets:nominate", "intel:read"],
        capabilities: Capabilities {
            can_view_intelligence: true,
            can_edit_intelligence: false,
            can_view_operations: true,
            can_edit_operations: false,
            can_edit_plans: false,
            can_view_targets: true,
            can_edit_targets: true,
            can_nominate_targets: true,
            can_approve_targets: false,
            can_approve_roe: false,
            can_manage_logistics: false,
            can_view_legal: true,
            can_edit_legal: false,
            can_manage_users: false,
        },
    },
    Role {
        id: "legad",
        name: "Legal Advisor",
        short_name: "LEGAD",
        description: "Reviews targets for legal compliance and approves rules of engagement",
        permissions: &["legal:read", "legal:write", "targets:read", "roe:approve"],
        capabilities: Capabilities {
            can_view_intelligence: false,
            can_edit_intelligence: false,
            can_view_operations: true,
            can_edit_operations: false,
            can_edit_plans: false,
            can_view_targets: true,
            can_edit_targets: false,
            can_nominate_targets: false,
            can_approve_targets: false,
            can_approve_roe: true,
            can_manage_logistics: false,
            can_view_legal: true,
            can_edit_legal: true,
            can_manage_users: false,
        },
    },
];

/// Process-wide role catalog
pub static ROLE_CATALOG: RoleCatalog = RoleCatalog::new(&ROLES);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::access::capability::Capability;

    #[test]
    fn test_builtin_catalog_is_valid() {
        assert!(ROLE_CATALOG.validate().is_ok());
        assert_eq!(ROLE_CATALOG.len(), 7);
    }

    #[test]
    fn test_default_is_first_entry() {
        assert_eq!(ROLE_CATALOG.default_role().id, "commander");
        assert_eq!(ROLE_CATALOG.default_role(), &ROLE_CATALOG.roles()[0]);
    }

    #[test]
    fn test_commander_holds_every_capability() {
        let cdr = ROLE_CATALOG.find("commander").unwrap();
        for cap in Capability::ALL {
            assert!(cdr.capabilities.get(cap), "commander missing {}", cap);
        }
    }

    #[test]
    fn test_legad_capabilities() {
        let legad = ROLE_CATALOG.find("legad").unwrap();
        assert!(legad.capabilities.can_approve_roe);
        assert!(!legad.capabilities.can_edit_targets);
    }

    #[test]
    fn test_find_unknown() {
        assert!(ROLE_CATALOG.find("j9-unknown").is_none());
        assert!(!ROLE_CATALOG.contains(""));
        assert!(ROLE_CATALOG.contains("j2-intel"));
    }

    #[test]
    fn test_duplicate_ids_rejected() {
        static DUPES: [Role; 2] = [
            Role {
                id: "a",
                name: "A",
                short_name: "A",
                description: "",
                permissions: &[],
                capabilities: Capabilities::all(),
            },
            Role {
                id: "a",
                name: "A2",
                short_name: "A2",
                description: "",
                permissions: &[],
                capabilities: Capabilities::all(),
            },
        ];
        let catalog = RoleCatalog::new(&DUPES);
        assert!(matches!(
            catalog.validate(),
            Err(AccessError::InvalidCatalog(msg)) if msg.contains("duplicate")
        ));
    }

    #[test]
    fn test_empty_id_rejected() {
        static BLANK: [Role; 1] = [Role {
            id: " ",
            name: "Blank",
            short_name: "B",
            description: "",
            permissions: &[],
            capabilities: Capabilities::all(),
        }];
        assert!(RoleCatalog::new(&BLANK).validate().is_err());
    }

    #[test]
    fn test_wildcard_permission() {
        let cdr = ROLE_CATALOG.find("commander").unwrap();
        assert!(cdr.has_permission("anything:at-all"));

        let j4 = ROLE_CATALOG.find("j4-log").unwrap();
        assert!(j4.has_permission("logistics:write"));
        assert!(!j4.has_permission("targets:write"));
    }

    #[test]
    fn test_role_serializes_camel_case() {
        let legad = ROLE_CATALOG.find("legad").unwrap();
        let value = serde_json::to_value(legad).unwrap();
        assert_eq!(value["shortName"], "LEGAD");
        assert_eq!(value["capabilities"]["canApproveROE"], true);
    }
}
