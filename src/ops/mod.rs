// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Pathwise-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Pathwise and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Mutation operations on the assignment graph.
//!
//! Module ↔ department and module ↔ role-journey membership is stored twice: on the module
//! (its target sets) and on the owner (core list / progression list). Every operation here leaves
//! both directions agreeing. Writes validate all references first and fail without mutating the
//! store; each successful write reports what it touched as a [`SyncReport`].

use std::collections::BTreeSet;
use std::fmt;

use thiserror::Error;

use crate::model::{DepartmentId, LearnerId, ModuleId, RoleId};

pub mod admin;
pub mod audit;
pub mod sync;

pub use admin::{
    create_department, create_role, delete_department, delete_module, delete_role,
    rename_department, rename_role, set_learner_admin, set_learner_roles,
};
pub use audit::{check_invariants, repair, InvariantViolation, RepairReport};
pub use sync::{sync_from_assignment_edit, sync_from_module_edit};

/// The owner side of a membership list.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum AssignmentOwner {
    /// A department's core module list.
    Department(DepartmentId),
    /// The progression list of the journey belonging to a role.
    Journey(RoleId),
}

impl fmt::Display for AssignmentOwner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Department(department_id) => write!(f, "department {department_id}"),
            Self::Journey(role_id) => write!(f, "journey of role {role_id}"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityKind {
    Department,
    Role,
    Journey,
    Module,
    Chapter,
    Learner,
}

impl EntityKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Department => "department",
            Self::Role => "role",
            Self::Journey => "journey",
            Self::Module => "module",
            Self::Chapter => "chapter",
            Self::Learner => "learner",
        }
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SyncError {
    #[error("{kind} not found (id={id})")]
    NotFound { kind: EntityKind, id: String },
    #[error("{kind} already exists (id={id})")]
    AlreadyExists { kind: EntityKind, id: String },
    #[error(
        "module {module_id} would lose its last target and become compulsory; edit the module's \
         targets instead"
    )]
    WouldBecomeCompulsory { module_id: ModuleId },
}

impl SyncError {
    pub(crate) fn not_found(kind: EntityKind, id: impl fmt::Display) -> Self {
        Self::NotFound {
            kind,
            id: id.to_string(),
        }
    }

    pub(crate) fn already_exists(kind: EntityKind, id: impl fmt::Display) -> Self {
        Self::AlreadyExists {
            kind,
            id: id.to_string(),
        }
    }
}

/// What a write touched. Every list is sorted and free of duplicates.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SyncReport {
    pub departments_updated: Vec<DepartmentId>,
    pub departments_removed: Vec<DepartmentId>,
    pub roles_removed: Vec<RoleId>,
    pub journeys_created: Vec<RoleId>,
    pub journeys_updated: Vec<RoleId>,
    pub journeys_removed: Vec<RoleId>,
    pub modules_updated: Vec<ModuleId>,
    pub modules_removed: Vec<ModuleId>,
    /// Modules that lost their last target through a cascade and are now assigned to everyone.
    pub became_compulsory: Vec<ModuleId>,
    pub learners_updated: Vec<LearnerId>,
}

impl SyncReport {
    /// `true` when the write left the store unchanged.
    pub fn is_noop(&self) -> bool {
        self.departments_updated.is_empty()
            && self.departments_removed.is_empty()
            && self.roles_removed.is_empty()
            && self.journeys_created.is_empty()
            && self.journeys_updated.is_empty()
            && self.journeys_removed.is_empty()
            && self.modules_updated.is_empty()
            && self.modules_removed.is_empty()
            && self.became_compulsory.is_empty()
            && self.learners_updated.is_empty()
    }
}

#[derive(Debug, Default)]
pub(crate) struct ReportBuilder {
    departments_updated: BTreeSet<DepartmentId>,
    departments_removed: BTreeSet<DepartmentId>,
    roles_removed: BTreeSet<RoleId>,
    journeys_created: BTreeSet<RoleId>,
    journeys_updated: BTreeSet<RoleId>,
    journeys_removed: BTreeSet<RoleId>,
    modules_updated: BTreeSet<ModuleId>,
    modules_removed: BTreeSet<ModuleId>,
    became_compulsory: BTreeSet<ModuleId>,
    learners_updated: BTreeSet<LearnerId>,
}

impl ReportBuilder {
    fn department_updated(&mut self, department_id: &DepartmentId) {
        self.departments_updated.insert(department_id.clone());
    }

    fn department_removed(&mut self, department_id: &DepartmentId) {
        self.departments_updated.remove(department_id);
        self.departments_removed.insert(department_id.clone());
    }

    fn role_removed(&mut self, role_id: &RoleId) {
        self.roles_removed.insert(role_id.clone());
    }

    fn journey_created(&mut self, role_id: &RoleId) {
        self.journeys_created.insert(role_id.clone());
    }

    fn journey_updated(&mut self, role_id: &RoleId) {
        self.journeys_updated.insert(role_id.clone());
    }

    fn journey_removed(&mut self, role_id: &RoleId) {
        self.journeys_created.remove(role_id);
        self.journeys_updated.remove(role_id);
        self.journeys_removed.insert(role_id.clone());
    }

    fn module_updated(&mut self, module_id: &ModuleId) {
        self.modules_updated.insert(module_id.clone());
    }

    fn module_removed(&mut self, module_id: &ModuleId) {
        self.modules_updated.remove(module_id);
        self.modules_removed.insert(module_id.clone());
    }

    fn became_compulsory(&mut self, module_id: &ModuleId) {
        self.became_compulsory.insert(module_id.clone());
    }

    fn learner_updated(&mut self, learner_id: &LearnerId) {
        self.learners_updated.insert(learner_id.clone());
    }

    pub(crate) fn finish(self) -> SyncReport {
        SyncReport {
            departments_updated: self.departments_updated.into_iter().collect(),
            departments_removed: self.departments_removed.into_iter().collect(),
            roles_removed: self.roles_removed.into_iter().collect(),
            journeys_created: self.journeys_created.into_iter().collect(),
            journeys_updated: self.journeys_updated.into_iter().collect(),
            journeys_removed: self.journeys_removed.into_iter().collect(),
            modules_updated: self.modules_updated.into_iter().collect(),
            modules_removed: self.modules_removed.into_iter().collect(),
            became_compulsory: self.became_compulsory.into_iter().collect(),
            learners_updated: self.learners_updated.into_iter().collect(),
        }
    }
}

/// Adds or removes `module_id` so that its presence in `list` equals `wanted`.
///
/// Returns `true` when the list changed. Order of the remaining entries is preserved and new
/// entries are appended.
pub(crate) fn set_listing(list: &mut Vec<ModuleId>, module_id: &ModuleId, wanted: bool) -> bool {
    let present = list.contains(module_id);
    match (wanted, present) {
        (true, false) => {
            list.push(module_id.clone());
            true
        }
        (false, true) => {
            list.retain(|id| id != module_id);
            true
        }
        _ => false,
    }
}

pub(crate) fn set_target<T: Ord + Clone>(targets: &mut BTreeSet<T>, id: &T, wanted: bool) -> bool {
    if wanted {
        targets.insert(id.clone())
    } else {
        targets.remove(id)
    }
}
