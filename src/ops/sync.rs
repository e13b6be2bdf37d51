// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Pathwise-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Pathwise and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::collections::BTreeSet;

use tracing::debug;

use crate::model::{EntityStore, ModuleId, TrainingModule};

use super::{
    set_listing, set_target, AssignmentOwner, EntityKind, ReportBuilder, SyncError, SyncReport,
};

/// Stores `module` (create or update) and mirrors its target sets onto every department core
/// list and role journey.
///
/// The mirror is re-derived over all departments and journeys each time, so applying the same
/// module twice is a no-op the second time. A compulsory module (no targets) is removed from
/// every list; a targeted role without a journey gets one before the module is appended to it.
///
/// Chapter ids must be unique across the store. Chapters dropped by the edit are also dropped
/// from every learner's completions.
pub fn sync_from_module_edit(
    store: &mut EntityStore,
    module: TrainingModule,
) -> Result<SyncReport, SyncError> {
    for department_id in module.target_department_ids() {
        if store.department(department_id).is_none() {
            return Err(SyncError::not_found(EntityKind::Department, department_id));
        }
    }
    for role_id in module.target_role_ids() {
        if store.role(role_id).is_none() {
            return Err(SyncError::not_found(EntityKind::Role, role_id));
        }
    }

    let module_id = module.module_id().clone();
    let mut chapter_ids = BTreeSet::new();
    for chapter_id in module.chapter_ids() {
        if !chapter_ids.insert(chapter_id) {
            return Err(SyncError::already_exists(EntityKind::Chapter, chapter_id));
        }
    }
    for other in store.modules().values() {
        if other.module_id() == &module_id {
            continue;
        }
        if let Some(taken) = other.chapter_ids().find(|id| chapter_ids.contains(id)) {
            return Err(SyncError::already_exists(EntityKind::Chapter, taken));
        }
    }

    let dropped_chapters = store
        .module(&module_id)
        .map(|existing| {
            existing
                .chapter_ids()
                .filter(|id| !chapter_ids.contains(id))
                .cloned()
                .collect::<Vec<_>>()
        })
        .unwrap_or_default();
    let mut report = ReportBuilder::default();

    match store.modules_mut().get_mut(&module_id) {
        Some(existing) if *existing == module => {}
        Some(existing) => {
            *existing = module;
            report.module_updated(&module_id);
        }
        None => {
            store.modules_mut().insert(module_id.clone(), module);
            report.module_updated(&module_id);
        }
    }

    // Completions of removed chapters go with them.
    for learner in store.learners_mut().values_mut() {
        let mut cleared = false;
        for chapter_id in &dropped_chapters {
            cleared |= learner.clear_completed(chapter_id);
        }
        if cleared {
            debug!(
                learner = %learner.learner_id(),
                module = %module_id,
                "completions of removed chapters cleared"
            );
            report.learner_updated(learner.learner_id());
        }
    }

    mirror_module_targets(store, &module_id, &mut report);
    Ok(report.finish())
}

/// Replaces the owner's module list with `module_ids` and mirrors the change onto the target
/// sets of every module.
///
/// Duplicate ids keep their first position. Listing a compulsory module promotes it: the owner
/// becomes its only target. Unlisting a module whose only target is this owner is rejected with
/// [`SyncError::WouldBecomeCompulsory`], because compulsory status is only ever changed by
/// editing the module itself.
pub fn sync_from_assignment_edit(
    store: &mut EntityStore,
    owner: &AssignmentOwner,
    module_ids: Vec<ModuleId>,
) -> Result<SyncReport, SyncError> {
    match owner {
        AssignmentOwner::Department(department_id) => {
            if store.department(department_id).is_none() {
                return Err(SyncError::not_found(EntityKind::Department, department_id));
            }
        }
        AssignmentOwner::Journey(role_id) => {
            if store.role(role_id).is_none() {
                return Err(SyncError::not_found(EntityKind::Role, role_id));
            }
        }
    }

    let mut seen = BTreeSet::new();
    let module_ids = module_ids
        .into_iter()
        .filter(|module_id| seen.insert(module_id.clone()))
        .collect::<Vec<_>>();

    for module_id in &module_ids {
        if store.module(module_id).is_none() {
            return Err(SyncError::not_found(EntityKind::Module, module_id));
        }
    }

    for module in store.modules().values() {
        if seen.contains(module.module_id()) {
            continue;
        }
        if is_only_target(module, owner) {
            return Err(SyncError::WouldBecomeCompulsory {
                module_id: module.module_id().clone(),
            });
        }
    }

    let mut report = ReportBuilder::default();

    match owner {
        AssignmentOwner::Department(department_id) => {
            if let Some(department) = store.departments_mut().get_mut(department_id) {
                if department.core_module_ids() != module_ids.as_slice() {
                    *department.core_module_ids_mut() = module_ids;
                    debug!(department = %department_id, "department core list replaced");
                    report.department_updated(department_id);
                }
            }
        }
        AssignmentOwner::Journey(role_id) => {
            let (journey, created) = store.ensure_journey(role_id);
            if journey.progression_module_ids() != module_ids.as_slice() {
                *journey.progression_module_ids_mut() = module_ids;
                debug!(role = %role_id, "journey progression list replaced");
                report.journey_updated(role_id);
            }
            if created {
                report.journey_created(role_id);
            }
        }
    }

    for module in store.modules_mut().values_mut() {
        let listed = seen.contains(module.module_id());
        let was_compulsory = module.is_compulsory();
        let changed = match owner {
            AssignmentOwner::Department(department_id) => {
                set_target(module.target_department_ids_mut(), department_id, listed)
            }
            AssignmentOwner::Journey(role_id) => {
                set_target(module.target_role_ids_mut(), role_id, listed)
            }
        };
        if changed {
            if was_compulsory {
                debug!(module = %module.module_id(), %owner, "compulsory module promoted by listing");
            } else {
                debug!(module = %module.module_id(), %owner, listed, "module targets updated");
            }
            report.module_updated(module.module_id());
        }
    }

    Ok(report.finish())
}

fn is_only_target(module: &TrainingModule, owner: &AssignmentOwner) -> bool {
    let target_count = module.target_department_ids().len() + module.target_role_ids().len();
    let targets_owner = match owner {
        AssignmentOwner::Department(department_id) => {
            module.target_department_ids().contains(department_id)
        }
        AssignmentOwner::Journey(role_id) => module.target_role_ids().contains(role_id),
    };
    targets_owner && target_count == 1
}

/// Re-derives every department core list and journey from the module's target sets.
///
/// Targets pointing at departments or roles that are not in the store are ignored here; the
/// audit reports and strips them.
pub(crate) fn mirror_module_targets(
    store: &mut EntityStore,
    module_id: &ModuleId,
    report: &mut ReportBuilder,
) {
    let Some(module) = store.module(module_id) else {
        return;
    };
    let compulsory = module.is_compulsory();
    let target_department_ids = module.target_department_ids().clone();
    let target_role_ids = module.target_role_ids().clone();

    for department in store.departments_mut().values_mut() {
        let wanted = !compulsory && target_department_ids.contains(department.department_id());
        if set_listing(department.core_module_ids_mut(), module_id, wanted) {
            debug!(
                module = %module_id,
                department = %department.department_id(),
                listed = wanted,
                "department core list synced"
            );
            report.department_updated(department.department_id());
        }
    }

    if !compulsory {
        for role_id in &target_role_ids {
            if store.role(role_id).is_none() {
                continue;
            }
            let (_, created) = store.ensure_journey(role_id);
            if created {
                debug!(role = %role_id, "journey created for targeted role");
                report.journey_created(role_id);
            }
        }
    }

    for journey in store.journeys_mut().values_mut() {
        let wanted = !compulsory && target_role_ids.contains(journey.role_id());
        if set_listing(journey.progression_module_ids_mut(), module_id, wanted) {
            debug!(
                module = %module_id,
                role = %journey.role_id(),
                listed = wanted,
                "journey progression list synced"
            );
            report.journey_updated(journey.role_id());
        }
    }
}
