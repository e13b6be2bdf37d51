// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Pathwise-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Pathwise and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Administrative writes on organisation structure, modules and learners.

use std::collections::BTreeSet;

use tracing::{info, warn};

use crate::model::{
    ChapterId, Department, DepartmentId, EntityStore, LearnerId, ModuleId, Role, RoleId,
};

use super::sync::mirror_module_targets;
use super::{set_target, EntityKind, ReportBuilder, SyncError, SyncReport};

pub fn create_department(
    store: &mut EntityStore,
    department_id: DepartmentId,
    name: impl Into<String>,
) -> Result<(), SyncError> {
    if store.department(&department_id).is_some() {
        return Err(SyncError::already_exists(EntityKind::Department, &department_id));
    }
    store
        .departments_mut()
        .insert(department_id.clone(), Department::new(department_id, name));
    Ok(())
}

pub fn rename_department(
    store: &mut EntityStore,
    department_id: &DepartmentId,
    name: impl Into<String>,
) -> Result<(), SyncError> {
    let department = store
        .departments_mut()
        .get_mut(department_id)
        .ok_or_else(|| SyncError::not_found(EntityKind::Department, department_id))?;
    department.set_name(name);
    Ok(())
}

pub fn create_role(
    store: &mut EntityStore,
    role_id: RoleId,
    name: impl Into<String>,
    department_id: DepartmentId,
) -> Result<(), SyncError> {
    if store.role(&role_id).is_some() {
        return Err(SyncError::already_exists(EntityKind::Role, &role_id));
    }
    if store.department(&department_id).is_none() {
        return Err(SyncError::not_found(EntityKind::Department, &department_id));
    }
    store
        .roles_mut()
        .insert(role_id.clone(), Role::new(role_id, name, department_id));
    Ok(())
}

pub fn rename_role(
    store: &mut EntityStore,
    role_id: &RoleId,
    name: impl Into<String>,
) -> Result<(), SyncError> {
    let role = store
        .roles_mut()
        .get_mut(role_id)
        .ok_or_else(|| SyncError::not_found(EntityKind::Role, role_id))?;
    role.set_name(name);
    Ok(())
}

/// Deletes a department together with every role it owns and those roles' journeys.
///
/// The department id and the removed role ids are stripped from every module's target sets.
/// A module left without targets becomes compulsory; it is reported in
/// [`SyncReport::became_compulsory`].
pub fn delete_department(
    store: &mut EntityStore,
    department_id: &DepartmentId,
) -> Result<SyncReport, SyncError> {
    if store.department(department_id).is_none() {
        return Err(SyncError::not_found(EntityKind::Department, department_id));
    }

    let role_ids = store
        .roles_in(department_id)
        .map(|role| role.role_id().clone())
        .collect::<Vec<_>>();

    let mut report = ReportBuilder::default();
    store.departments_mut().shift_remove(department_id);
    report.department_removed(department_id);
    info!(department = %department_id, roles = role_ids.len(), "department deleted");

    let role_set = role_ids.iter().cloned().collect::<BTreeSet<_>>();
    for role_id in &role_ids {
        remove_role_entities(store, role_id, &mut report);
    }

    strip_targets(store, Some(department_id), &role_set, &mut report);
    Ok(report.finish())
}

/// Deletes a role and its journey, strips the role from every module's targets and from every
/// learner's roles.
pub fn delete_role(store: &mut EntityStore, role_id: &RoleId) -> Result<SyncReport, SyncError> {
    if store.role(role_id).is_none() {
        return Err(SyncError::not_found(EntityKind::Role, role_id));
    }

    let mut report = ReportBuilder::default();
    remove_role_entities(store, role_id, &mut report);
    info!(role = %role_id, "role deleted");

    let role_set = BTreeSet::from([role_id.clone()]);
    strip_targets(store, None, &role_set, &mut report);
    Ok(report.finish())
}

/// Deletes a module, unlists it everywhere and forgets learners' completions of its chapters.
pub fn delete_module(
    store: &mut EntityStore,
    module_id: &ModuleId,
) -> Result<SyncReport, SyncError> {
    let module = store
        .modules_mut()
        .shift_remove(module_id)
        .ok_or_else(|| SyncError::not_found(EntityKind::Module, module_id))?;

    let mut report = ReportBuilder::default();
    report.module_removed(module_id);

    for department in store.departments_mut().values_mut() {
        if super::set_listing(department.core_module_ids_mut(), module_id, false) {
            report.department_updated(department.department_id());
        }
    }
    for journey in store.journeys_mut().values_mut() {
        if super::set_listing(journey.progression_module_ids_mut(), module_id, false) {
            report.journey_updated(journey.role_id());
        }
    }

    let chapter_ids = module.chapter_ids().collect::<BTreeSet<&ChapterId>>();
    for learner in store.learners_mut().values_mut() {
        let mut changed = false;
        for chapter_id in &chapter_ids {
            changed |= learner.clear_completed(chapter_id);
        }
        if changed {
            report.learner_updated(learner.learner_id());
        }
    }

    info!(module = %module_id, "module deleted");
    Ok(report.finish())
}

pub fn set_learner_roles(
    store: &mut EntityStore,
    learner_id: &LearnerId,
    role_ids: BTreeSet<RoleId>,
) -> Result<(), SyncError> {
    for role_id in &role_ids {
        if store.role(role_id).is_none() {
            return Err(SyncError::not_found(EntityKind::Role, role_id));
        }
    }
    let learner = store
        .learner_mut(learner_id)
        .ok_or_else(|| SyncError::not_found(EntityKind::Learner, learner_id))?;
    *learner.role_ids_mut() = role_ids;
    Ok(())
}

pub fn set_learner_admin(
    store: &mut EntityStore,
    learner_id: &LearnerId,
    is_admin: bool,
) -> Result<(), SyncError> {
    let learner = store
        .learner_mut(learner_id)
        .ok_or_else(|| SyncError::not_found(EntityKind::Learner, learner_id))?;
    learner.set_admin(is_admin);
    Ok(())
}

fn remove_role_entities(store: &mut EntityStore, role_id: &RoleId, report: &mut ReportBuilder) {
    if store.roles_mut().shift_remove(role_id).is_some() {
        report.role_removed(role_id);
    }
    if store.journeys_mut().shift_remove(role_id).is_some() {
        report.journey_removed(role_id);
    }
    for learner in store.learners_mut().values_mut() {
        if learner.role_ids_mut().remove(role_id) {
            report.learner_updated(learner.learner_id());
        }
    }
}

fn strip_targets(
    store: &mut EntityStore,
    department_id: Option<&DepartmentId>,
    role_ids: &BTreeSet<RoleId>,
    report: &mut ReportBuilder,
) {
    let mut touched = Vec::new();
    for module in store.modules_mut().values_mut() {
        let was_compulsory = module.is_compulsory();
        let mut changed = false;
        if let Some(department_id) = department_id {
            changed |= set_target(module.target_department_ids_mut(), department_id, false);
        }
        for role_id in role_ids {
            changed |= set_target(module.target_role_ids_mut(), role_id, false);
        }
        if !changed {
            continue;
        }
        report.module_updated(module.module_id());
        if !was_compulsory && module.is_compulsory() {
            warn!(
                module = %module.module_id(),
                "module lost its last target and is now compulsory for every learner"
            );
            report.became_compulsory(module.module_id());
        }
        touched.push(module.module_id().clone());
    }

    for module_id in &touched {
        mirror_module_targets(store, module_id, report);
    }
}
