// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Pathwise-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Pathwise and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Organisational structure: departments, the roles they own, and per-role journeys.

use super::ids::{DepartmentId, JourneyId, ModuleId, RoleId};

/// A department and its core modules (assigned to every role inside it).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Department {
    department_id: DepartmentId,
    name: String,
    core_module_ids: Vec<ModuleId>,
}

impl Department {
    pub fn new(department_id: DepartmentId, name: impl Into<String>) -> Self {
        Self {
            department_id,
            name: name.into(),
            core_module_ids: Vec::new(),
        }
    }

    pub fn department_id(&self) -> &DepartmentId {
        &self.department_id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    pub fn core_module_ids(&self) -> &[ModuleId] {
        &self.core_module_ids
    }

    pub(crate) fn core_module_ids_mut(&mut self) -> &mut Vec<ModuleId> {
        &mut self.core_module_ids
    }

    pub fn with_core_module_ids(mut self, core_module_ids: Vec<ModuleId>) -> Self {
        self.core_module_ids = core_module_ids;
        self
    }
}

/// A role belongs to exactly one department.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Role {
    role_id: RoleId,
    name: String,
    department_id: DepartmentId,
}

impl Role {
    pub fn new(role_id: RoleId, name: impl Into<String>, department_id: DepartmentId) -> Self {
        Self {
            role_id,
            name: name.into(),
            department_id,
        }
    }

    pub fn role_id(&self) -> &RoleId {
        &self.role_id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    pub fn department_id(&self) -> &DepartmentId {
        &self.department_id
    }
}

/// The ordered, role-specific progression beyond the department core.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Journey {
    journey_id: JourneyId,
    role_id: RoleId,
    progression_module_ids: Vec<ModuleId>,
}

impl Journey {
    pub fn new(journey_id: JourneyId, role_id: RoleId) -> Self {
        Self {
            journey_id,
            role_id,
            progression_module_ids: Vec::new(),
        }
    }

    /// An empty journey for a role that has none yet.
    ///
    /// The id is derived from the role id so that lazily creating the same journey twice (for
    /// example when a sync is re-run during recovery) yields identical stores.
    pub fn for_role(role_id: RoleId) -> Self {
        let journey_id = JourneyId::new(format!("j-{role_id}"))
            .expect("journey id derived from a valid role id is valid");
        Self::new(journey_id, role_id)
    }

    pub fn journey_id(&self) -> &JourneyId {
        &self.journey_id
    }

    pub fn role_id(&self) -> &RoleId {
        &self.role_id
    }

    pub fn progression_module_ids(&self) -> &[ModuleId] {
        &self.progression_module_ids
    }

    pub(crate) fn progression_module_ids_mut(&mut self) -> &mut Vec<ModuleId> {
        &mut self.progression_module_ids
    }

    pub fn with_progression_module_ids(mut self, progression_module_ids: Vec<ModuleId>) -> Self {
        self.progression_module_ids = progression_module_ids;
        self
    }
}
