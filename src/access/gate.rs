//! # Capability Gate
//!
//! Answers "may the active role perform capability X?".
//!
//! ## Invariants
//! - Pure function of (role, capability name)
//! - Reads only the capability record; the permission list and its
//!   wildcard are never consulted
//! - Unknown names fail closed

use super::capability::Capability;
use super::catalog::Role;
use crate::observability::{log_event_with_fields, Event};

/// Result of a capability lookup with the fail-closed path made visible
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CapabilityCheck {
    Granted,
    Denied,
    /// Name is not part of the capability schema
    Unknown,
}

impl CapabilityCheck {
    pub fn is_granted(&self) -> bool {
        matches!(self, CapabilityCheck::Granted)
    }
}

/// Capability predicate bound to one role
#[derive(Debug, Clone, Copy)]
pub struct CapabilityGate<'a> {
    role: &'a Role,
}

impl<'a> CapabilityGate<'a> {
    pub fn new(role: &'a Role) -> Self {
        Self { role }
    }

    pub fn role(&self) -> &'a Role {
        self.role
    }

    /// Typed lookup
    pub fn allows(&self, capability: Capability) -> bool {
        self.role.capabilities.get(capability)
    }

    /// Lookup by wire name, distinguishing unknown names from denials
    pub fn check(&self, name: &str) -> CapabilityCheck {
        match Capability::from_name(name) {
            Some(cap) if self.allows(cap) => CapabilityCheck::Granted,
            Some(_) => CapabilityCheck::Denied,
            None => {
                log_event_with_fields(
                    Event::CapabilityUnknown,
                    &[("capability", name), ("role_id", self.role.id)],
                );
                CapabilityCheck::Unknown
            }
        }
    }

    /// Lookup by wire name. Unknown names return false.
    pub fn can(&self, name: &str) -> bool {
        self.check(name).is_granted()
    }
}
