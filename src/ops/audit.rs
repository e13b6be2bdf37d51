// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Pathwise-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Pathwise and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Invariant checks over a whole store, and repair by re-deriving the mirrored side.
//!
//! Module target sets are authoritative during repair: lists are rebuilt from them. This is what
//! recovers a store in which an edit reached the module but the mirrored department or journey
//! write did not.

use std::collections::BTreeSet;

use thiserror::Error;
use tracing::{info, warn};

use crate::model::{ChapterId, DepartmentId, EntityStore, LearnerId, ModuleId, RoleId};

use super::sync::mirror_module_targets;
use super::{set_target, AssignmentOwner, ReportBuilder, SyncReport};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InvariantViolation {
    #[error("compulsory module {module_id} is listed by {owner}")]
    CompulsoryListed {
        module_id: ModuleId,
        owner: AssignmentOwner,
    },
    #[error("module {module_id} targets {owner} but is not listed there")]
    MissingListing {
        module_id: ModuleId,
        owner: AssignmentOwner,
    },
    #[error("module {module_id} is listed by {owner} but does not target it")]
    UnexpectedListing {
        module_id: ModuleId,
        owner: AssignmentOwner,
    },
    #[error("{owner} lists module {module_id} more than once")]
    DuplicateListing {
        module_id: ModuleId,
        owner: AssignmentOwner,
    },
    #[error("{owner} lists unknown module {module_id}")]
    DanglingListing {
        module_id: ModuleId,
        owner: AssignmentOwner,
    },
    #[error("module {module_id} targets unknown department {department_id}")]
    DanglingDepartmentTarget {
        module_id: ModuleId,
        department_id: DepartmentId,
    },
    #[error("module {module_id} targets unknown role {role_id}")]
    DanglingRoleTarget { module_id: ModuleId, role_id: RoleId },
    #[error("journey exists for unknown role {role_id}")]
    OrphanJourney { role_id: RoleId },
    #[error("learner {learner_id} completed unknown chapter {chapter_id}")]
    UnknownCompletion {
        learner_id: LearnerId,
        chapter_id: ChapterId,
    },
}

/// Violations found before repairing, and the writes the repair made.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RepairReport {
    pub violations: Vec<InvariantViolation>,
    pub sync: SyncReport,
}

/// Lists every cross-entity invariant violation in the store, in store order.
pub fn check_invariants(store: &EntityStore) -> Vec<InvariantViolation> {
    let mut violations = Vec::new();
    let lists = owner_lists(store);

    for (owner, list) in &lists {
        let mut seen = BTreeSet::new();
        for module_id in list.iter() {
            if !seen.insert(module_id) {
                violations.push(InvariantViolation::DuplicateListing {
                    module_id: module_id.clone(),
                    owner: owner.clone(),
                });
            }
            if store.module(module_id).is_none() {
                violations.push(InvariantViolation::DanglingListing {
                    module_id: module_id.clone(),
                    owner: owner.clone(),
                });
            }
        }
    }

    for role_id in store.journeys().keys() {
        if store.role(role_id).is_none() {
            violations.push(InvariantViolation::OrphanJourney {
                role_id: role_id.clone(),
            });
        }
    }

    for module in store.modules().values() {
        let module_id = module.module_id();

        for department_id in module.target_department_ids() {
            if store.department(department_id).is_none() {
                violations.push(InvariantViolation::DanglingDepartmentTarget {
                    module_id: module_id.clone(),
                    department_id: department_id.clone(),
                });
            }
        }
        for role_id in module.target_role_ids() {
            if store.role(role_id).is_none() {
                violations.push(InvariantViolation::DanglingRoleTarget {
                    module_id: module_id.clone(),
                    role_id: role_id.clone(),
                });
            }
        }

        for (owner, list) in &lists {
            let listed = list.contains(module_id);
            if module.is_compulsory() {
                if listed {
                    violations.push(InvariantViolation::CompulsoryListed {
                        module_id: module_id.clone(),
                        owner: owner.clone(),
                    });
                }
                continue;
            }
            let targeted = match owner {
                AssignmentOwner::Department(department_id) => {
                    module.target_department_ids().contains(department_id)
                }
                AssignmentOwner::Journey(role_id) => module.target_role_ids().contains(role_id),
            };
            match (targeted, listed) {
                (true, false) => violations.push(InvariantViolation::MissingListing {
                    module_id: module_id.clone(),
                    owner: owner.clone(),
                }),
                (false, true) => violations.push(InvariantViolation::UnexpectedListing {
                    module_id: module_id.clone(),
                    owner: owner.clone(),
                }),
                _ => {}
            }
        }

        // A targeted role without a journey is listed nowhere yet.
        if !module.is_compulsory() {
            for role_id in module.target_role_ids() {
                if store.role(role_id).is_some() && store.journey_of(role_id).is_none() {
                    violations.push(InvariantViolation::MissingListing {
                        module_id: module_id.clone(),
                        owner: AssignmentOwner::Journey(role_id.clone()),
                    });
                }
            }
        }
    }

    let known_chapters = store
        .modules()
        .values()
        .flat_map(|module| module.chapter_ids())
        .collect::<BTreeSet<_>>();
    for learner in store.learners().values() {
        for chapter_id in learner.completed_chapter_ids() {
            if !known_chapters.contains(chapter_id) {
                violations.push(InvariantViolation::UnknownCompletion {
                    learner_id: learner.learner_id().clone(),
                    chapter_id: chapter_id.clone(),
                });
            }
        }
    }

    violations
}

/// Repairs every violation [`check_invariants`] reports. Running it on a consistent store
/// changes nothing.
pub fn repair(store: &mut EntityStore) -> RepairReport {
    let violations = check_invariants(store);
    if violations.is_empty() {
        return RepairReport::default();
    }
    for violation in &violations {
        warn!(%violation, "repairing invariant violation");
    }

    let mut report = ReportBuilder::default();

    let orphan_roles = store
        .journeys()
        .keys()
        .filter(|role_id| store.role(role_id).is_none())
        .cloned()
        .collect::<Vec<_>>();
    for role_id in &orphan_roles {
        store.journeys_mut().shift_remove(role_id);
        report.journey_removed(role_id);
    }

    let known_modules = store.modules().keys().cloned().collect::<BTreeSet<_>>();
    for department in store.departments_mut().values_mut() {
        if retain_known_unique(department.core_module_ids_mut(), &known_modules) {
            report.department_updated(department.department_id());
        }
    }
    for journey in store.journeys_mut().values_mut() {
        if retain_known_unique(journey.progression_module_ids_mut(), &known_modules) {
            report.journey_updated(journey.role_id());
        }
    }

    let known_departments = store.departments().keys().cloned().collect::<BTreeSet<_>>();
    let known_roles = store.roles().keys().cloned().collect::<BTreeSet<_>>();
    for module in store.modules_mut().values_mut() {
        let was_compulsory = module.is_compulsory();
        let dangling_departments = module
            .target_department_ids()
            .difference(&known_departments)
            .cloned()
            .collect::<Vec<_>>();
        let dangling_roles = module
            .target_role_ids()
            .difference(&known_roles)
            .cloned()
            .collect::<Vec<_>>();
        let mut changed = false;
        for department_id in &dangling_departments {
            changed |= set_target(module.target_department_ids_mut(), department_id, false);
        }
        for role_id in &dangling_roles {
            changed |= set_target(module.target_role_ids_mut(), role_id, false);
        }
        if changed {
            report.module_updated(module.module_id());
            if !was_compulsory && module.is_compulsory() {
                warn!(module = %module.module_id(), "module lost its last target and is now compulsory");
                report.became_compulsory(module.module_id());
            }
        }
    }

    for module_id in &known_modules {
        mirror_module_targets(store, module_id, &mut report);
    }

    let known_chapters = store
        .modules()
        .values()
        .flat_map(|module| module.chapter_ids().cloned())
        .collect::<BTreeSet<_>>();
    for learner in store.learners_mut().values_mut() {
        let unknown = learner
            .completed_chapter_ids()
            .difference(&known_chapters)
            .cloned()
            .collect::<Vec<_>>();
        for chapter_id in &unknown {
            learner.clear_completed(chapter_id);
        }
        if !unknown.is_empty() {
            report.learner_updated(learner.learner_id());
        }
    }

    let sync = report.finish();
    info!(violations = violations.len(), "store repaired");
    RepairReport { violations, sync }
}

fn owner_lists(store: &EntityStore) -> Vec<(AssignmentOwner, &[ModuleId])> {
    let departments = store.departments().values().map(|department| {
        (
            AssignmentOwner::Department(department.department_id().clone()),
            department.core_module_ids(),
        )
    });
    let journeys = store.journeys().values().map(|journey| {
        (
            AssignmentOwner::Journey(journey.role_id().clone()),
            journey.progression_module_ids(),
        )
    });
    departments.chain(journeys).collect()
}

fn retain_known_unique(list: &mut Vec<ModuleId>, known: &BTreeSet<ModuleId>) -> bool {
    let before = list.len();
    let mut seen = BTreeSet::new();
    list.retain(|module_id| known.contains(module_id) && seen.insert(module_id.clone()));
    list.len() != before
}
