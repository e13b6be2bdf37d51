// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Pathwise-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Pathwise and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

#![allow(dead_code)]

// Shared deterministic benchmark fixtures (no RNG).

use pathwise::model::{
    Chapter, ChapterId, ContentType, DepartmentId, EntityStore, Learner, LearnerId, ModuleId,
    Question, QuestionId, RoleId, TrainingModule,
};
use pathwise::ops::{create_department, create_role, sync_from_module_edit};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OrgParams {
    pub departments: usize,
    pub roles_per_department: usize,
    pub modules: usize,
    pub chapters_per_module: usize,
    pub questions_per_chapter: usize,
    pub learners: usize,
}

impl OrgParams {
    pub const fn new(
        departments: usize,
        roles_per_department: usize,
        modules: usize,
        chapters_per_module: usize,
        questions_per_chapter: usize,
        learners: usize,
    ) -> Self {
        Self {
            departments,
            roles_per_department,
            modules,
            chapters_per_module,
            questions_per_chapter,
            learners,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Case {
    Small,
    Medium,
    Large,
}

impl Case {
    pub const fn id(self) -> &'static str {
        match self {
            Self::Small => "small",
            Self::Medium => "medium",
            Self::Large => "large",
        }
    }

    pub const fn params(self) -> OrgParams {
        match self {
            Self::Small => OrgParams::new(3, 4, 20, 4, 2, 50),
            Self::Medium => OrgParams::new(10, 8, 200, 6, 3, 1_000),
            Self::Large => OrgParams::new(40, 12, 1_500, 8, 3, 10_000),
        }
    }
}

pub fn department_id(index: usize) -> DepartmentId {
    DepartmentId::new(format!("bench_dep_{index:04}")).expect("department id")
}

pub fn role_id(department: usize, index: usize) -> RoleId {
    RoleId::new(format!("bench_role_{department:04}_{index:03}")).expect("role id")
}

pub fn module_id(index: usize) -> ModuleId {
    ModuleId::new(format!("bench_mod_{index:05}")).expect("module id")
}

pub fn learner_id(index: usize) -> LearnerId {
    LearnerId::new(format!("bench_learner_{index:06}")).expect("learner id")
}

/// Chapters whose questions alternate text and multiple choice. The correct answer of question
/// `q` is always `answer_{q}`.
pub fn chapters(module_index: usize, params: OrgParams) -> Vec<Chapter> {
    (0..params.chapters_per_module)
        .map(|chapter| {
            let chapter_id =
                ChapterId::new(format!("bench_ch_{module_index:05}_{chapter:02}")).expect("chapter id");
            let questions = (0..params.questions_per_chapter)
                .map(|question| {
                    let question_id = QuestionId::new(format!(
                        "bench_q_{module_index:05}_{chapter:02}_{question:02}"
                    ))
                    .expect("question id");
                    let answer = format!("answer_{question}");
                    if question % 2 == 0 {
                        Question::text(question_id, "Explain", answer)
                    } else {
                        Question::multiple_choice(
                            question_id,
                            "Pick one",
                            vec!["other".to_owned(), answer.clone()],
                            answer,
                        )
                    }
                })
                .collect();
            Chapter::new(chapter_id, format!("Chapter {chapter}"), ContentType::Video)
                .with_questions(questions)
        })
        .collect()
}

/// Module `i` is compulsory when `i % 10 == 0`, targets one department when `i % 10 == 1`, and
/// otherwise targets two roles.
pub fn module(index: usize, params: OrgParams) -> TrainingModule {
    let module = TrainingModule::new(module_id(index), format!("Module {index}"))
        .with_chapters(chapters(index, params));
    match index % 10 {
        0 => module,
        1 => module.with_targets([], [department_id(index % params.departments)]),
        _ => {
            let department = index % params.departments;
            let first = index % params.roles_per_department;
            let second = (index / params.departments) % params.roles_per_department;
            module.with_targets([role_id(department, first), role_id(department, second)], [])
        }
    }
}

/// A consistent store built through the sync operations. Learner `i` holds one role and has
/// completed every other chapter of its first assigned modules.
pub fn store(params: OrgParams) -> EntityStore {
    let mut store = EntityStore::new();
    for department in 0..params.departments {
        create_department(&mut store, department_id(department), format!("Dep {department}"))
            .expect("create department");
        for role in 0..params.roles_per_department {
            create_role(
                &mut store,
                role_id(department, role),
                format!("Role {role}"),
                department_id(department),
            )
            .expect("create role");
        }
    }
    for index in 0..params.modules {
        sync_from_module_edit(&mut store, module(index, params)).expect("sync module");
    }

    let chapter_ids = store
        .modules()
        .values()
        .flat_map(|module| module.chapter_ids().cloned().collect::<Vec<_>>())
        .step_by(2)
        .take(params.chapters_per_module * 4)
        .collect::<Vec<_>>();
    for index in 0..params.learners {
        let department = index % params.departments;
        let role = (index / params.departments) % params.roles_per_department;
        let learner = Learner::new(learner_id(index), format!("Learner {index}"))
            .with_roles([role_id(department, role)])
            .with_completed(chapter_ids.iter().cloned());
        store.learners_mut().insert(learner.learner_id().clone(), learner);
    }
    store
}

pub fn fixture(case: Case) -> EntityStore {
    store(case.params())
}

pub fn checksum_ids<'a, I, T>(ids: I) -> u64
where
    I: IntoIterator<Item = &'a T>,
    T: AsRef<str> + 'a + ?Sized,
{
    let mut acc = 0u64;
    for id in ids {
        for byte in id.as_ref().bytes() {
            acc = acc.wrapping_mul(131).wrapping_add(u64::from(byte));
        }
        acc = acc.wrapping_mul(131).wrapping_add(0xff);
    }
    acc
}
