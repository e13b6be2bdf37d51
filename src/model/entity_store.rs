// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Pathwise-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Pathwise and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use indexmap::IndexMap;

use super::ids::{DepartmentId, LearnerId, ModuleId, RoleId};
use super::learner::Learner;
use super::module::TrainingModule;
use super::org::{Department, Journey, Role};

/// The working set every engine operation reads and writes.
///
/// Collections keep insertion order, which makes derived views (resolved modules, audit reports)
/// deterministic for a given store. Journeys are keyed by the role they belong to, so a role can
/// never own two journeys.
///
/// Departments, roles, journeys and modules are only written through [`crate::ops`], which keeps
/// the mirrored membership lists in agreement. Learners are handed out mutably for checkpoints.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EntityStore {
    departments: IndexMap<DepartmentId, Department>,
    roles: IndexMap<RoleId, Role>,
    journeys: IndexMap<RoleId, Journey>,
    modules: IndexMap<ModuleId, TrainingModule>,
    learners: IndexMap<LearnerId, Learner>,
}

impl EntityStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn departments(&self) -> &IndexMap<DepartmentId, Department> {
        &self.departments
    }

    pub(crate) fn departments_mut(&mut self) -> &mut IndexMap<DepartmentId, Department> {
        &mut self.departments
    }

    pub fn roles(&self) -> &IndexMap<RoleId, Role> {
        &self.roles
    }

    pub(crate) fn roles_mut(&mut self) -> &mut IndexMap<RoleId, Role> {
        &mut self.roles
    }

    pub fn journeys(&self) -> &IndexMap<RoleId, Journey> {
        &self.journeys
    }

    pub(crate) fn journeys_mut(&mut self) -> &mut IndexMap<RoleId, Journey> {
        &mut self.journeys
    }

    pub fn modules(&self) -> &IndexMap<ModuleId, TrainingModule> {
        &self.modules
    }

    pub(crate) fn modules_mut(&mut self) -> &mut IndexMap<ModuleId, TrainingModule> {
        &mut self.modules
    }

    pub fn learners(&self) -> &IndexMap<LearnerId, Learner> {
        &self.learners
    }

    pub fn learners_mut(&mut self) -> &mut IndexMap<LearnerId, Learner> {
        &mut self.learners
    }

    pub fn department(&self, department_id: &DepartmentId) -> Option<&Department> {
        self.departments.get(department_id)
    }

    pub fn role(&self, role_id: &RoleId) -> Option<&Role> {
        self.roles.get(role_id)
    }

    pub fn module(&self, module_id: &ModuleId) -> Option<&TrainingModule> {
        self.modules.get(module_id)
    }

    pub fn learner(&self, learner_id: &LearnerId) -> Option<&Learner> {
        self.learners.get(learner_id)
    }

    pub fn learner_mut(&mut self, learner_id: &LearnerId) -> Option<&mut Learner> {
        self.learners.get_mut(learner_id)
    }

    pub fn department_of(&self, role_id: &RoleId) -> Option<&Department> {
        let role = self.roles.get(role_id)?;
        self.departments.get(role.department_id())
    }

    pub fn journey_of(&self, role_id: &RoleId) -> Option<&Journey> {
        self.journeys.get(role_id)
    }

    /// The role's progression list; a role without a journey has an empty one.
    pub fn progression_of(&self, role_id: &RoleId) -> &[ModuleId] {
        self.journeys
            .get(role_id)
            .map(Journey::progression_module_ids)
            .unwrap_or_default()
    }

    /// Returns the role's journey, creating an empty one first if the role has none.
    ///
    /// The second value reports whether a journey was created.
    pub(crate) fn ensure_journey(&mut self, role_id: &RoleId) -> (&mut Journey, bool) {
        let created = !self.journeys.contains_key(role_id);
        let journey = self
            .journeys
            .entry(role_id.clone())
            .or_insert_with(|| Journey::for_role(role_id.clone()));
        (journey, created)
    }

    pub fn roles_in<'a>(
        &'a self,
        department_id: &'a DepartmentId,
    ) -> impl Iterator<Item = &'a Role> + 'a {
        self.roles
            .values()
            .filter(move |role| role.department_id() == department_id)
    }
}
