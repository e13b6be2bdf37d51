// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Pathwise-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Pathwise and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::collections::BTreeSet;

use crate::model::{DepartmentId, EntityStore, Learner, ModuleId, RoleId, TrainingModule};

/// Every module the learner must complete.
///
/// That is every compulsory module, plus the department core and journey of each of the
/// learner's roles. Unknown roles and dangling module ids are skipped. The result follows store
/// insertion order and holds each module once.
pub fn resolve_assigned_modules<'a>(
    learner: &Learner,
    store: &'a EntityStore,
) -> Vec<&'a TrainingModule> {
    let mut assigned = BTreeSet::<&ModuleId>::new();
    for role_id in learner.role_ids() {
        if store.role(role_id).is_none() {
            continue;
        }
        if let Some(department) = store.department_of(role_id) {
            assigned.extend(department.core_module_ids());
        }
        assigned.extend(store.progression_of(role_id));
    }

    store
        .modules()
        .values()
        .filter(|module| module.is_compulsory() || assigned.contains(module.module_id()))
        .collect()
}

/// Modules an editor can still add to the path of `role_id` inside `department_id`.
///
/// Compulsory modules and modules already on the department core or the role's journey are
/// left out. Empty when the role does not exist or does not belong to the department.
pub fn available_modules<'a>(
    store: &'a EntityStore,
    department_id: &DepartmentId,
    role_id: &RoleId,
) -> Vec<&'a TrainingModule> {
    let Some(department) = store.department(department_id) else {
        return Vec::new();
    };
    match store.role(role_id) {
        Some(role) if role.department_id() == department_id => {}
        _ => return Vec::new(),
    }
    let progression = store.progression_of(role_id);

    store
        .modules()
        .values()
        .filter(|module| !module.is_compulsory())
        .filter(|module| {
            !department.core_module_ids().contains(module.module_id())
                && !progression.contains(module.module_id())
        })
        .collect()
}

/// One row of a learner's reset listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResetCandidate<'a> {
    pub module: &'a TrainingModule,
    /// Chapters of this module the learner has completed. A reset at 0 would be a no-op.
    pub completed_chapters: usize,
}

pub fn modules_for_reset<'a>(learner: &Learner, store: &'a EntityStore) -> Vec<ResetCandidate<'a>> {
    resolve_assigned_modules(learner, store)
        .into_iter()
        .map(|module| ResetCandidate {
            module,
            completed_chapters: module
                .chapter_ids()
                .filter(|chapter_id| learner.has_completed(chapter_id))
                .count(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::{available_modules, modules_for_reset, resolve_assigned_modules};
    use crate::model::fixtures::demo_store;
    use crate::model::{
        Department, DepartmentId, EntityStore, Journey, Learner, LearnerId, ModuleId, Role, RoleId,
        TrainingModule,
    };

    fn mid(value: &str) -> ModuleId {
        ModuleId::new(value).expect("module id")
    }

    fn ids<'a>(modules: impl IntoIterator<Item = &'a TrainingModule>) -> Vec<&'a str> {
        modules.into_iter().map(|m| m.module_id().as_str()).collect()
    }

    #[test]
    fn resolves_compulsory_core_and_journey() {
        let department_id = DepartmentId::new("d").expect("department id");
        let role_id = RoleId::new("r").expect("role id");
        let mut store = EntityStore::new();
        for module in [
            TrainingModule::new(mid("m0"), "Compulsory"),
            TrainingModule::new(mid("m1"), "Core").with_targets([], [department_id.clone()]),
            TrainingModule::new(mid("m2"), "Journey").with_targets([role_id.clone()], []),
            TrainingModule::new(mid("m3"), "Elsewhere")
                .with_targets([RoleId::new("other").expect("role id")], []),
        ] {
            store.modules_mut().insert(module.module_id().clone(), module);
        }
        store.departments_mut().insert(
            department_id.clone(),
            Department::new(department_id.clone(), "Dept").with_core_module_ids(vec![mid("m1")]),
        );
        store.roles_mut().insert(
            role_id.clone(),
            Role::new(role_id.clone(), "Role", department_id),
        );
        store.journeys_mut().insert(
            role_id.clone(),
            Journey::for_role(role_id.clone()).with_progression_module_ids(vec![mid("m2")]),
        );
        let learner = Learner::new(LearnerId::new("v").expect("learner id"), "V").with_roles([role_id]);

        assert_eq!(ids(resolve_assigned_modules(&learner, &store)), ["m0", "m1", "m2"]);
    }

    #[test]
    fn dangling_ids_and_unknown_roles_are_skipped() {
        let mut store = demo_store();
        store
            .departments_mut()
            .get_mut(&DepartmentId::new("d1").expect("department id"))
            .expect("d1")
            .core_module_ids_mut()
            .push(mid("m404"));
        let learner = Learner::new(LearnerId::new("v9").expect("learner id"), "Nine")
            .with_roles([RoleId::new("r1").expect("role id"), RoleId::new("r404").expect("role id")]);

        assert_eq!(
            ids(resolve_assigned_modules(&learner, &store)),
            ["m1", "m2", "m3", "m4"]
        );
    }

    #[test]
    fn learner_without_roles_gets_compulsory_only() {
        let store = demo_store();
        let learner = Learner::new(LearnerId::new("v9").expect("learner id"), "Nine");
        assert_eq!(ids(resolve_assigned_modules(&learner, &store)), ["m1", "m2"]);
    }

    #[test]
    fn available_modules_excludes_path_and_compulsory() {
        let store = demo_store();
        let d1 = DepartmentId::new("d1").expect("department id");
        let r1 = RoleId::new("r1").expect("role id");
        let r2 = RoleId::new("r2").expect("role id");

        assert!(available_modules(&store, &d1, &r1).is_empty());
        assert_eq!(ids(available_modules(&store, &d1, &r2)), ["m4"]);

        let d2 = DepartmentId::new("d2").expect("department id");
        assert!(available_modules(&store, &d2, &r1).is_empty());
    }

    #[test]
    fn reset_listing_counts_completed_chapters() {
        let store = demo_store();
        let learner = store
            .learner(&LearnerId::new("v1").expect("learner id"))
            .expect("v1");

        let rows = modules_for_reset(learner, &store)
            .into_iter()
            .map(|row| (row.module.module_id().as_str(), row.completed_chapters))
            .collect::<Vec<_>>();
        assert_eq!(rows, [("m1", 1), ("m2", 0), ("m3", 0), ("m4", 0)]);
    }
}
