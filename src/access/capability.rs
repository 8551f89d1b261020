//! # Capability Schema
//!
//! The closed set of gated dashboard actions.
//!
//! Capabilities are a struct of named flags rather than a string map: adding
//! a field here is a compile error in every catalog entry until it is set.

use serde::Serialize;
use std::fmt;

/// One gated UI affordance
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Capability {
    ViewIntelligence,
    EditIntelligence,
    ViewOperations,
    EditOperations,
    EditPlans,
    ViewTargets,
    EditTargets,
    NominateTargets,
    ApproveTargets,
    ApproveRoe,
    ManageLogistics,
    ViewLegal,
    EditLegal,
    ManageUsers,
}

impl Capability {
    /// Every capability, in schema order
    pub const ALL: [Capability; 14] = [
        Capability::ViewIntelligence,
        Capability::EditIntelligence,
        Capability::ViewOperations,
        Capability::EditOperations,
        Capability::EditPlans,
        Capability::ViewTargets,
        Capability::EditTargets,
        Capability::NominateTargets,
        Capability::ApproveTargets,
        Capability::ApproveRoe,
        Capability::ManageLogistics,
        Capability::ViewLegal,
        Capability::EditLegal,
        Capability::ManageUsers,
    ];

    /// Wire name used by dashboard views
    pub fn name(&self) -> &'static str {
        match self {
            Capability::ViewIntelligence => "canViewIntelligence",
            Capability::EditIntelligence => "canEditIntelligence",
            Capability::ViewOperations => "canViewOperations",
            Capability::EditOperations => "canEditOperations",
            Capability::EditPlans => "canEditPlans",
            Capability::ViewTargets => "canViewTargets",
            Capability::EditTargets => "canEditTargets",
            Capability::NominateTargets => "canNominateTargets",
            Capability::ApproveTargets => "canApproveTargets",
            Capability::ApproveRoe => "canApproveROE",
            Capability::ManageLogistics => "canManageLogistics",
            Capability::ViewLegal => "canViewLegal",
            Capability::EditLegal => "canEditLegal",
            Capability::ManageUsers => "canManageUsers",
        }
    }

    /// Resolve a wire name. Exact match only.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|c| c.name() == name)
    }
}

impl fmt::Display for Capability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Capability flags carried by a role
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Capabilities {
    pub can_view_intelligence: bool,
    pub can_edit_intelligence: bool,
    pub can_view_operations: bool,
    pub can_edit_operations: bool,
    pub can_edit_plans: bool,
    pub can_view_targets: bool,
    pub can_edit_targets: bool,
    pub can_nominate_targets: bool,
    pub can_approve_targets: bool,
    #[serde(rename = "canApproveROE")]
    pub can_approve_roe: bool,
    pub can_manage_logistics: bool,
    pub can_view_legal: bool,
    pub can_edit_legal: bool,
    pub can_manage_users: bool,
}

impl Capabilities {
    /// Every flag set
    pub const fn all() -> Self {
        Self {
            can_view_intelligence: true,
            can_edit_intelligence: true,
            can_view_operations: true,
            can_edit_operations: true,
            can_edit_plans: true,
            can_view_targets: true,
            can_edit_targets: true,
            can_nominate_targets: true,
            can_approve_targets: true,
            can_approve_roe: true,
            can_manage_logistics: true,
            can_view_legal: true,
            can_edit_legal: true,
            can_manage_users: true,
        }
    }

    /// Read one flag
    pub fn get(&self, capability: Capability) -> bool {
        match capability {
            Capability::ViewIntelligence => self.can_view_intelligence,
            Capability::EditIntelligence => self.can_edit_intelligence,
            Capability::ViewOperations => self.can_view_operations,
            Capability::EditOperations => self.can_edit_operations,
            Capability::EditPlans => self.can_edit_plans,
            Capability::ViewTargets => self.can_view_targets,
            Capability::EditTargets => self.can_edit_targets,
            Capability::NominateTargets => self.can_nominate_targets,
            Capability::ApproveTargets => self.can_approve_targets,
            Capability::ApproveRoe => self.can_approve_roe,
            Capability::ManageLogistics => self.can_manage_logistics,
            Capability::ViewLegal => self.can_view_legal,
            Capability::EditLegal => self.can_edit_legal,
            Capability::ManageUsers => self.can_manage_users,
        }
    }

    /// Capabilities set to true, in schema order
    pub fn granted(&self) -> Vec<Capability> {
        Capability::ALL
            .iter()
            .copied()
            .filter(|c| self.get(*c))
            .collect()
    }
}
