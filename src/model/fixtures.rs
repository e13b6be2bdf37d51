// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Pathwise-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Pathwise and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Seed organisation used by `pathwise --demo` and by tests.

use super::entity_store::EntityStore;
use super::ids::{ChapterId, DepartmentId, LearnerId, ModuleId, QuestionId, RoleId};
use super::learner::Learner;
use super::module::{Chapter, ContentType, Question, TrainingModule};
use super::org::{Department, Journey, Role};

fn did(value: &str) -> DepartmentId {
    DepartmentId::new(value).expect("department id")
}

fn rid(value: &str) -> RoleId {
    RoleId::new(value).expect("role id")
}

fn mid(value: &str) -> ModuleId {
    ModuleId::new(value).expect("module id")
}

fn cid(value: &str) -> ChapterId {
    ChapterId::new(value).expect("chapter id")
}

fn lid(value: &str) -> LearnerId {
    LearnerId::new(value).expect("learner id")
}

/// Three departments, four roles, two compulsory and two targeted modules, two learners.
///
/// - `m1`, `m2` are compulsory (no targets).
/// - `m3` is core for department `d1` (Guest Services).
/// - `m4` is on the `r1` (Usher) journey.
/// - `v1` is an admin usher who completed `c1-1`; `v2` is on the worship team.
pub fn demo_store() -> EntityStore {
    let mut store = EntityStore::new();

    for (id, name, core) in [
        ("d1", "Guest Services", vec![mid("m3")]),
        ("d2", "Worship Arts", Vec::new()),
        ("d3", "Family Ministry", Vec::new()),
    ] {
        store
            .departments_mut()
            .insert(did(id), Department::new(did(id), name).with_core_module_ids(core));
    }

    for (id, name, department) in [
        ("r1", "Usher", "d1"),
        ("r2", "Greeter", "d1"),
        ("r3", "Sunday School Teacher", "d3"),
        ("r4", "Worship Team", "d2"),
    ] {
        store
            .roles_mut()
            .insert(rid(id), Role::new(rid(id), name, did(department)));
    }

    let modules = [
        {
            let mut module = TrainingModule::new(mid("m1"), "Safe Sanctuary Basics").with_chapters(
                vec![Chapter::new(cid("c1-1"), "Introduction to Safety", ContentType::Video)
                    .with_content_url("https://www.youtube.com/watch?v=aqz-KE-bpKQ")
                    .with_questions(vec![Question::text(
                        QuestionId::new("q1").expect("question id"),
                        "What is the primary goal of Safe Sanctuary?",
                        "safety",
                    )])],
            );
            module.set_description(
                "Essential safety protocols for protecting children and vulnerable adults.",
            );
            module.set_duration_minutes(45);
            module
        },
        {
            let mut module = TrainingModule::new(mid("m2"), "Church Vision & Values")
                .with_chapters(vec![Chapter::new(cid("c2-1"), "Our Core Mission", ContentType::Link)
                    .with_content_url("https://www.church.com/vision")]);
            module.set_description("Understanding our mission and core beliefs.");
            module.set_sequential(false);
            module
        },
        {
            let mut module = TrainingModule::new(mid("m3"), "Guest Hospitality Fundamentals")
                .with_targets([], [did("d1")])
                .with_chapters(vec![Chapter::new(
                    cid("c3-1"),
                    "The Heart of a Servant",
                    ContentType::Video,
                )
                .with_content_url("https://www.youtube.com/watch?v=XW9O9_f0DYo")]);
            module.set_description(
                "The core mindset of serving every person who walks through our doors.",
            );
            module.set_duration_minutes(20);
            module
        },
        {
            let mut module = TrainingModule::new(mid("m4"), "Emergency Response for Ushers")
                .with_targets([rid("r1")], [])
                .with_chapters(vec![Chapter::new(
                    cid("c4-1"),
                    "Crisis Management",
                    ContentType::Video,
                )
                .with_content_url("https://www.youtube.com/watch?v=kYI9F6Y9fN4")]);
            module.set_description(
                "Specific security and medical response procedures for the ushering team.",
            );
            module.set_duration_minutes(40);
            module
        },
    ];
    for module in modules {
        store.modules_mut().insert(module.module_id().clone(), module);
    }

    store.journeys_mut().insert(
        rid("r1"),
        Journey::new("j1".parse().expect("journey id"), rid("r1"))
            .with_progression_module_ids(vec![mid("m4")]),
    );

    store.learners_mut().insert(
        lid("v1"),
        Learner::new(lid("v1"), "John Smith")
            .with_roles([rid("r1")])
            .with_completed([cid("c1-1")])
            .with_admin(true),
    );
    store.learners_mut().insert(
        lid("v2"),
        Learner::new(lid("v2"), "Alice Lee").with_roles([rid("r4")]),
    );

    store
}
