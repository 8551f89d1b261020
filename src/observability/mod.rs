//! Observability for the access subsystem
//!
//! - Structured JSON logging
//! - Closed set of access events
//! - Append-only role audit trail
//!
//! Observability never changes a gate decision and never fails a caller.
//!
//! ```ignore
//! use opsgate::observability::{log_event_with_fields, Event};
//!
//! log_event_with_fields(Event::RoleSwitchIgnored, &[("role_id", "j9")]);
//! ```

mod events;
mod logger;
pub mod audit;

pub use audit::{AuditAction, AuditLog, AuditOutcome, AuditRecord, FileAuditLog, MemoryAuditLog};
pub use events::Event;
pub use logger::{Logger, Severity};

/// Log an access event with fields
pub fn log_event_with_fields(event: Event, fields: &[(&str, &str)]) {
    Logger::log(event.severity(), event.as_str(), fields);
}
