//! # Role Resolver
//!
//! Owns the selected role for one session.
//!
//! ## Invariants
//! - After `initialize` the selected role is always a catalog entry
//! - `switch_role` is the only writer; unknown ids leave the selection as is
//! - A failed persist never undoes an in-memory switch
//! - No operation here returns an error or panics

use std::sync::Arc;

use super::catalog::{Role, RoleCatalog};
use super::gate::CapabilityGate;
use super::store::RoleStore;
use crate::observability::{
    log_event_with_fields, AuditAction, AuditLog, AuditOutcome, AuditRecord, Event,
};

/// Outcome of a role switch
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SwitchOutcome {
    /// Active role replaced. `persisted` is false when the store write failed.
    Switched { persisted: bool },
    /// Id not in the catalog; selection unchanged
    Ignored,
}

impl SwitchOutcome {
    pub fn is_switched(&self) -> bool {
        matches!(self, SwitchOutcome::Switched { .. })
    }
}

/// How the initial role was chosen
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InitialSelection {
    /// Persisted id matched a catalog entry
    Persisted,
    /// Nothing was stored
    NoneStored,
    /// Stored id is not in the catalog
    UnknownStored(String),
    /// Store could not be read
    StoreUnreadable(String),
}

/// Session-scoped role state
pub struct RoleResolver<S: RoleStore> {
    catalog: &'static RoleCatalog,
    store: S,
    storage_key: String,
    current: &'static Role,
    initial: InitialSelection,
    audit: Option<Arc<dyn AuditLog>>,
}

impl<S: RoleStore> RoleResolver<S> {
    /// Resolve the session role from the store. Always succeeds.
    pub fn initialize(
        catalog: &'static RoleCatalog,
        store: S,
        storage_key: impl Into<String>,
    ) -> Self {
        let storage_key = storage_key.into();

        let (current, initial) = match store.load(&storage_key) {
            Ok(Some(id)) => match catalog.find(&id) {
                Some(role) => (role, InitialSelection::Persisted),
                None => (catalog.default_role(), InitialSelection::UnknownStored(id)),
            },
            Ok(None) => (catalog.default_role(), InitialSelection::NoneStored),
            Err(e) => (
                catalog.default_role(),
                InitialSelection::StoreUnreadable(e.to_string()),
            ),
        };

        match &initial {
            InitialSelection::Persisted => {
                log_event_with_fields(Event::RoleResolved, &[("role_id", current.id)]);
            }
            InitialSelection::NoneStored => {
                log_event_with_fields(
                    Event::RoleDefaulted,
                    &[("reason", "none_stored"), ("role_id", current.id)],
                );
            }
            InitialSelection::UnknownStored(stored) => {
                log_event_with_fields(
                    Event::RoleDefaulted,
                    &[
                        ("reason", "unknown_stored"),
                        ("role_id", current.id),
                        ("stored_id", stored.as_str()),
                    ],
                );
            }
            InitialSelection::StoreUnreadable(err) => {
                log_event_with_fields(
                    Event::RoleDefaulted,
                    &[
                        ("error", err.as_str()),
                        ("reason", "store_unreadable"),
                        ("role_id", current.id),
                    ],
                );
            }
        }

        Self {
            catalog,
            store,
            storage_key,
            current,
            initial,
            audit: None,
        }
    }

    /// Attach an audit trail and record the initial selection
    pub fn with_audit(mut self, audit: Arc<dyn AuditLog>) -> Self {
        let outcome = match self.initial {
            InitialSelection::Persisted => AuditOutcome::Success,
            _ => AuditOutcome::Ignored,
        };
        let mut record =
            AuditRecord::new(AuditAction::RoleInitialized, outcome).with_role(self.current.id);
        match &self.initial {
            InitialSelection::UnknownStored(id) => record = record.with_requested_role(id.as_str()),
            InitialSelection::StoreUnreadable(err) => record = record.with_error(err.as_str()),
            _ => {}
        }

        self.audit = Some(audit);
        self.record(&record);
        self
    }

    pub fn current(&self) -> &'static Role {
        self.current
    }

    pub fn catalog(&self) -> &'static RoleCatalog {
        self.catalog
    }

    pub fn storage_key(&self) -> &str {
        &self.storage_key
    }

    /// How `initialize` chose the starting role
    pub fn initial_selection(&self) -> &InitialSelection {
        &self.initial
    }

    /// Gate bound to the active role
    pub fn gate(&self) -> CapabilityGate<'static> {
        CapabilityGate::new(self.current)
    }

    /// Capability predicate for the active role
    pub fn can(&self, capability: &str) -> bool {
        self.gate().can(capability)
    }

    /// Switch to `id` if it names a catalog role, then persist it
    pub fn switch_role(&mut self, id: &str) -> SwitchOutcome {
        let previous = self.current;

        let Some(role) = self.catalog.find(id) else {
            log_event_with_fields(
                Event::RoleSwitchIgnored,
                &[("current_role_id", previous.id), ("role_id", id)],
            );
            self.record(
                &AuditRecord::new(AuditAction::RoleSwitchRequested, AuditOutcome::Ignored)
                    .with_previous_role(previous.id)
                    .with_requested_role(id)
                    .with_role(previous.id),
            );
            return SwitchOutcome::Ignored;
        };

        self.current = role;

        let record = AuditRecord::new(AuditAction::RoleSwitchRequested, AuditOutcome::Success)
            .with_previous_role(previous.id)
            .with_requested_role(id)
            .with_role(role.id);

        match self.store.save(&self.storage_key, role.id) {
            Ok(()) => {
                log_event_with_fields(
                    Event::RoleSwitched,
                    &[("previous_role_id", previous.id), ("role_id", role.id)],
                );
                self.record(&record);
                SwitchOutcome::Switched { persisted: true }
            }
            Err(e) => {
                let err = e.to_string();
                log_event_with_fields(
                    Event::RolePersistFailed,
                    &[("error", err.as_str()), ("role_id", role.id)],
                );
                let mut record = record.with_error(err);
                record.outcome = AuditOutcome::Degraded;
                self.record(&record);
                SwitchOutcome::Switched { persisted: false }
            }
        }
    }

    fn record(&self, record: &AuditRecord) {
        if let Some(audit) = &self.audit {
            if let Err(e) = audit.append(record) {
                log_event_with_fields(
                    Event::AuditAppendFailed,
                    &[("error", e.to_string().as_str())],
                );
            }
        }
    }
}
