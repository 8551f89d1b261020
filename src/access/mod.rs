//! # Access Module
//!
//! Role-to-capability resolution and classification gating for the
//! operations dashboard.
//!
//! Consumers depend on four operations only:
//! - [`RoleResolver::current`]
//! - [`RoleResolver::can`] / [`CapabilityGate::can`]
//! - [`RoleResolver::switch_role`]
//! - [`meets_level`] / [`highest_of`]

pub mod capability;
pub mod catalog;
pub mod classification;
pub mod errors;
pub mod gate;
pub mod resolver;
pub mod store;

pub use capability::{Capabilities, Capability};
pub use catalog::{Role, RoleCatalog, ROLE_CATALOG, WILDCARD_PERMISSION};
pub use classification::{
    held_or_lowest, highest_of, meets_level, required_or_highest, ClassificationLevel,
};
pub use errors::{AccessError, AccessResult};
pub use gate::{CapabilityCheck, CapabilityGate};
pub use resolver::{InitialSelection, RoleResolver, SwitchOutcome};
pub use store::{FileRoleStore, MemoryRoleStore, RoleStore, DEFAULT_STORAGE_KEY};
