//! opsgate - role and classification gating for the operations dashboard
//!
//! - `access`: role catalog, session role resolver, capability and
//!   classification gates
//! - `observability`: structured logs and the role audit trail
//! - `config`: JSON configuration
//! - `cli`: command-line front end

pub mod access;
pub mod cli;
pub mod config;
pub mod observability;
