//! CLI argument definitions using clap
//!
//! Commands:
//! - opsgate roles
//! - opsgate current
//! - opsgate switch <ROLE_ID>
//! - opsgate can <CAPABILITY>
//! - opsgate meets <HELD> <REQUIRED>
//! - opsgate highest [LEVEL...]

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// opsgate - role and classification gating for the operations dashboard
#[derive(Parser, Debug)]
#[command(name = "opsgate")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Path to configuration file
    #[arg(long, global = true, default_value = "./opsgate.json")]
    pub config: PathBuf,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// List every role in the catalog
    Roles,

    /// Show the active role and its granted capabilities
    Current,

    /// Switch the active role and persist the selection
    Switch {
        /// Catalog role id (e.g. "legad")
        role_id: String,
    },

    /// Check a capability for the active role
    Can {
        /// Capability wire name (e.g. "canApproveROE")
        capability: String,
    },

    /// Check whether a held clearance meets a required classification
    Meets {
        /// Held clearance level
        held: String,
        /// Required classification level
        required: String,
    },

    /// Highest of the given classification levels
    Highest {
        /// Classification levels; UNCLASS when none are given
        levels: Vec<String>,
    },
}

impl Cli {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Cli::parse()
    }
}
