//! CLI command implementations
//!
//! Each command loads configuration, opens the file-backed role store, and
//! answers with one JSON document. A switch to an unknown role is reported
//! in the output, not as a failure.

use std::path::Path;
use std::sync::Arc;

use serde_json::{json, Value};

use crate::access::{
    highest_of, meets_level, CapabilityCheck, ClassificationLevel, FileRoleStore, Role,
    RoleResolver, SwitchOutcome, ROLE_CATALOG,
};
use crate::config::OpsgateConfig;
use crate::observability::FileAuditLog;

use super::args::{Cli, Command};
use super::errors::{CliError, CliResult};
use super::io::{write_error, write_response};

/// Parse arguments and run the selected command
pub fn run() -> CliResult<()> {
    let cli = Cli::parse_args();
    run_command(cli.command, &cli.config)
}

/// Run a command and print its JSON response
pub fn run_command(cmd: Command, config_path: &Path) -> CliResult<()> {
    let config = OpsgateConfig::load_or_default(config_path)?;

    match execute(cmd, &config) {
        Ok(data) => write_response(data),
        Err(e) => {
            write_error(e.code_str(), e.message())?;
            Err(e)
        }
    }
}

/// Execute a command against a loaded configuration
pub fn execute(cmd: Command, config: &OpsgateConfig) -> CliResult<Value> {
    match cmd {
        Command::Roles => Ok(roles()),
        Command::Current => Ok(current(config)),
        Command::Switch { role_id } => switch(config, &role_id),
        Command::Can { capability } => Ok(can(config, &capability)),
        Command::Meets { held, required } => meets(&held, &required),
        Command::Highest { levels } => highest(&levels),
    }
}

fn open_resolver(config: &OpsgateConfig) -> RoleResolver<FileRoleStore> {
    RoleResolver::initialize(
        &ROLE_CATALOG,
        FileRoleStore::new(config.state_file.clone()),
        config.storage_key.as_str(),
    )
}

fn role_json(role: &Role) -> Value {
    let granted: Vec<&str> = role
        .capabilities
        .granted()
        .iter()
        .map(|c| c.name())
        .collect();

    json!({
        "role": role,
        "grantedCapabilities": granted,
    })
}

fn roles() -> Value {
    json!({
        "default": ROLE_CATALOG.default_role().id,
        "roles": ROLE_CATALOG.roles(),
    })
}

fn current(config: &OpsgateConfig) -> Value {
    role_json(open_resolver(config).current())
}

fn switch(config: &OpsgateConfig, role_id: &str) -> CliResult<Value> {
    let mut resolver = open_resolver(config);

    if let Some(path) = &config.audit_file {
        let audit = FileAuditLog::open(path).map_err(|e| {
            CliError::io_error(format!("failed to open audit log {}: {}", path.display(), e))
        })?;
        resolver = resolver.with_audit(Arc::new(audit));
    }

    let previous = resolver.current().id;
    let outcome = resolver.switch_role(role_id);

    let (status, persisted) = match outcome {
        SwitchOutcome::Switched { persisted } => ("switched", persisted),
        SwitchOutcome::Ignored => ("ignored", false),
    };

    Ok(json!({
        "outcome": status,
        "persisted": persisted,
        "previous": previous,
        "requested": role_id,
        "current": role_json(resolver.current()),
    }))
}

fn can(config: &OpsgateConfig, capability: &str) -> Value {
    let resolver = open_resolver(config);
    let check = resolver.gate().check(capability);

    let check_str = match check {
        CapabilityCheck::Granted => "granted",
        CapabilityCheck::Denied => "denied",
        CapabilityCheck::Unknown => "unknown",
    };

    json!({
        "roleId": resolver.current().id,
        "capability": capability,
        "allowed": check.is_granted(),
        "check": check_str,
    })
}

fn parse_level(label: &str) -> CliResult<ClassificationLevel> {
    label.parse().map_err(CliError::from)
}

fn meets(held: &str, required: &str) -> CliResult<Value> {
    let held = parse_level(held)?;
    let required = parse_level(required)?;

    Ok(json!({
        "held": held,
        "required": required,
        "meets": meets_level(held, required),
    }))
}

fn highest(levels: &[String]) -> CliResult<Value> {
    let parsed = levels
        .iter()
        .map(|l| parse_level(l))
        .collect::<CliResult<Vec<_>>>()?;

    Ok(json!({ "highest": highest_of(parsed) }))
}
