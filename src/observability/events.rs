//! Access lifecycle events
//!
//! Closed set of event names emitted by the role resolver and gates.

use std::fmt;

use super::logger::Severity;

/// Access event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    /// Persisted role id was found in the catalog
    RoleResolved,
    /// Fallback role selected at initialization
    RoleDefaulted,
    /// Active role replaced
    RoleSwitched,
    /// Switch requested for an id not in the catalog
    RoleSwitchIgnored,
    /// Role store write failed; in-memory switch kept
    RolePersistFailed,
    /// Capability name not in the schema
    CapabilityUnknown,
    /// Classification label not recognized
    ClassificationUnknown,
    /// Audit record could not be written; the operation still completed
    AuditAppendFailed,
}

impl Event {
    pub fn as_str(&self) -> &'static str {
        match self {
            Event::RoleResolved => "ROLE_RESOLVED",
            Event::RoleDefaulted => "ROLE_DEFAULTED",
            Event::RoleSwitched => "ROLE_SWITCHED",
            Event::RoleSwitchIgnored => "ROLE_SWITCH_IGNORED",
            Event::RolePersistFailed => "ROLE_PERSIST_FAILED",
            Event::CapabilityUnknown => "CAPABILITY_UNKNOWN",
            Event::ClassificationUnknown => "CLASSIFICATION_UNKNOWN",
            Event::AuditAppendFailed => "AUDIT_APPEND_FAILED",
        }
    }

    /// Severity the event is logged at
    pub fn severity(&self) -> Severity {
        match self {
            Event::RoleResolved | Event::RoleDefaulted | Event::RoleSwitched => Severity::Info,
            Event::RoleSwitchIgnored
            | Event::CapabilityUnknown
            | Event::ClassificationUnknown => Severity::Warn,
            Event::RolePersistFailed | Event::AuditAppendFailed => Severity::Error,
        }
    }
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_names() {
        assert_eq!(Event::RoleSwitched.as_str(), "ROLE_SWITCHED");
        assert_eq!(Event::CapabilityUnknown.to_string(), "CAPABILITY_UNKNOWN");
    }

    #[test]
    fn test_event_severities() {
        assert_eq!(Event::RoleResolved.severity(), Severity::Info);
        assert_eq!(Event::RoleDefaulted.severity(), Severity::Info);
        assert_eq!(Event::RoleSwitchIgnored.severity(), Severity::Warn);
        assert_eq!(Event::CapabilityUnknown.severity(), Severity::Warn);
        assert_eq!(Event::RolePersistFailed.severity(), Severity::Error);
        assert_eq!(Event::AuditAppendFailed.severity(), Severity::Error);
    }
}
