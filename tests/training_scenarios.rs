// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Pathwise-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Pathwise and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use rstest::{fixture, rstest};

use pathwise::checkpoint::{reset_progress, Advanced, ChapterState, ModulePlayer, SequentialGating};
use pathwise::model::fixtures::demo_store;
use pathwise::model::{
    Actor, Chapter, ChapterId, ContentType, DepartmentId, EntityStore, LearnerId, ModuleId,
    Question, QuestionId, RoleId, TrainingModule, ViewContext,
};
use pathwise::ops::{
    check_invariants, delete_department, delete_module, delete_role, sync_from_assignment_edit,
    sync_from_module_edit, AssignmentOwner,
};
use pathwise::query::{
    assigned_with_progress, modules_for_reset, overall_progress, resolve_assigned_modules,
};
use pathwise::store::SnapshotFile;

fn did(value: &str) -> DepartmentId {
    DepartmentId::new(value).expect("department id")
}

fn rid(value: &str) -> RoleId {
    RoleId::new(value).expect("role id")
}

fn mid(value: &str) -> ModuleId {
    ModuleId::new(value).expect("module id")
}

fn lid(value: &str) -> LearnerId {
    LearnerId::new(value).expect("learner id")
}

fn assigned_ids(store: &EntityStore, learner: &str) -> Vec<String> {
    let learner = store.learner(&lid(learner)).expect("learner");
    resolve_assigned_modules(learner, store)
        .into_iter()
        .map(|module| module.module_id().to_string())
        .collect()
}

#[fixture]
fn store() -> EntityStore {
    demo_store()
}

#[rstest]
fn demo_learners_see_their_paths(store: EntityStore) {
    assert!(check_invariants(&store).is_empty());
    assert_eq!(assigned_ids(&store, "v1"), ["m1", "m2", "m3", "m4"]);
    assert_eq!(assigned_ids(&store, "v2"), ["m1", "m2"]);

    let v1 = store.learner(&lid("v1")).expect("v1");
    let dashboard = assigned_with_progress(v1, &store)
        .into_iter()
        .map(|(module, percent)| (module.module_id().as_str(), percent))
        .collect::<Vec<_>>();
    assert_eq!(dashboard, [("m1", 100), ("m2", 0), ("m3", 0), ("m4", 0)]);

    let progress = overall_progress(resolve_assigned_modules(v1, &store), v1);
    assert_eq!((progress.completed, progress.total, progress.percent), (1, 4, 25));
}

#[rstest]
fn targeting_a_role_exempts_a_module_from_compulsory(mut store: EntityStore) {
    let module = TrainingModule::new(mid("m5"), "First Aid");
    sync_from_module_edit(&mut store, module.clone()).expect("create");
    assert!(store.module(&mid("m5")).expect("m5").is_compulsory());
    assert!(assigned_ids(&store, "v2").contains(&"m5".to_owned()));

    let targeted = module.with_targets([rid("r4")], []);
    assert!(!targeted.is_compulsory());
    sync_from_module_edit(&mut store, targeted).expect("target r4");

    assert_eq!(store.progression_of(&rid("r4")), [mid("m5")]);
    assert!(assigned_ids(&store, "v2").contains(&"m5".to_owned()));
    assert!(!assigned_ids(&store, "v1").contains(&"m5".to_owned()));
    assert!(check_invariants(&store).is_empty());
}

#[rstest]
fn assigning_through_a_department_reaches_every_role(mut store: EntityStore) {
    sync_from_assignment_edit(
        &mut store,
        &AssignmentOwner::Department(did("d2")),
        vec![mid("m4")],
    )
    .expect("assign");

    let m4 = store.module(&mid("m4")).expect("m4");
    assert!(m4.target_department_ids().contains(&did("d2")));
    assert!(m4.target_role_ids().contains(&rid("r1")));
    assert_eq!(assigned_ids(&store, "v2"), ["m1", "m2", "m4"]);
    assert!(check_invariants(&store).is_empty());
}

#[rstest]
fn deleting_a_department_cascades_to_roles_journeys_and_targets(mut store: EntityStore) {
    let report = delete_department(&mut store, &did("d1")).expect("delete");

    assert!(store.role(&rid("r1")).is_none());
    assert!(store.role(&rid("r2")).is_none());
    assert!(store.journey_of(&rid("r1")).is_none());
    for module in store.modules().values() {
        assert!(!module.target_role_ids().contains(&rid("r1")));
        assert!(!module.target_department_ids().contains(&did("d1")));
    }
    assert_eq!(report.became_compulsory, [mid("m3"), mid("m4")]);

    // v1 lost the role; what remains is the compulsory set, which now includes m3 and m4.
    assert!(store.learner(&lid("v1")).expect("v1").role_ids().is_empty());
    assert_eq!(assigned_ids(&store, "v1"), ["m1", "m2", "m3", "m4"]);
    assert!(check_invariants(&store).is_empty());
}

fn quiz_module() -> TrainingModule {
    let chapter = |id: &str, keyword: &str| {
        Chapter::new(ChapterId::new(id).expect("chapter id"), id, ContentType::Pdf).with_questions(
            vec![Question::text(
                QuestionId::new(format!("{id}-q")).expect("question id"),
                "Keyword?",
                keyword,
            )],
        )
    };
    TrainingModule::new(mid("m9"), "Quiz Walk")
        .with_targets([rid("r4")], [])
        .with_chapters(vec![chapter("c9-1", "safety"), chapter("c9-2", "care")])
}

#[rstest]
fn learner_completes_a_module_through_the_player(mut store: EntityStore) {
    sync_from_module_edit(&mut store, quiz_module()).expect("create");
    let module = store.module(&mid("m9")).expect("m9").clone();
    let mut learner = store.learner(&lid("v2")).expect("v2").clone();

    let mut player = ModulePlayer::new(&module, SequentialGating::Enforce);
    assert!(player.jump_to(1, &learner).is_err());

    let q1 = QuestionId::new("c9-1-q").expect("question id");
    player.set_answer(&q1, "risk").expect("answer");
    let err = player.advance(&mut learner).expect_err("wrong answer");
    assert_eq!(err.wrong_question_ids, [q1.clone()]);
    assert_eq!(player.state_of(&learner, 0), Some(ChapterState::InProgress));

    player.set_answer(&q1, "Safety first!").expect("answer");
    assert_eq!(player.advance(&mut learner), Ok(Advanced::Moved { index: 1 }));
    player
        .set_answer(&QuestionId::new("c9-2-q").expect("question id"), "Pastoral CARE")
        .expect("answer");
    assert_eq!(player.advance(&mut learner), Ok(Advanced::Finished));

    *store.learner_mut(&lid("v2")).expect("v2") = learner;
    let v2 = store.learner(&lid("v2")).expect("v2");
    let dashboard = assigned_with_progress(v2, &store);
    let (last, percent) = dashboard.last().expect("m9 assigned");
    assert_eq!((last.module_id().as_str(), *percent), ("m9", 100));

    let reset_rows = modules_for_reset(v2, &store);
    let m9_row = reset_rows
        .iter()
        .find(|row| row.module.module_id() == &mid("m9"))
        .expect("m9 row");
    assert_eq!(m9_row.completed_chapters, 2);
}

#[rstest]
fn learners_retake_their_own_modules_and_admins_reset_anyone(mut store: EntityStore) {
    let v2 = Actor::for_learner(store.learner(&lid("v2")).expect("v2"));
    assert!(reset_progress(&mut store, &v2, &lid("v1"), None).is_err());
    let c1 = ChapterId::new("c1-1").expect("chapter id");
    assert!(store.learner(&lid("v1")).expect("v1").has_completed(&c1));

    let v1 = Actor::for_learner(store.learner(&lid("v1")).expect("v1"));
    let cleared = reset_progress(&mut store, &v1, &lid("v1"), Some(&mid("m1"))).expect("reset");
    assert_eq!(cleared, 1);
    assert!(store.learner(&lid("v1")).expect("v1").completed_chapter_ids().is_empty());
}

#[rstest]
fn admin_preview_shows_the_learner_dashboard(store: EntityStore) {
    let admin = Actor::for_learner(store.learner(&lid("v1")).expect("v1"));
    let view = ViewContext::preview(admin, lid("v2")).expect("admin may preview");
    assert!(!view.shows_admin_surfaces());

    let subject = store.learner(view.subject()).expect("subject");
    let ids = resolve_assigned_modules(subject, &store)
        .into_iter()
        .map(|module| module.module_id().as_str())
        .collect::<Vec<_>>();
    assert_eq!(ids, ["m1", "m2"]);
}

#[rstest]
fn snapshot_round_trip_keeps_assignments_and_progress(store: EntityStore) {
    let tmp = tempfile::tempdir().expect("tempdir");
    let file = SnapshotFile::new(tmp.path().join("portal.json"));
    file.save(&store).expect("save");

    let loaded = file.load().expect("load");
    assert!(loaded.repaired.violations.is_empty());
    assert_eq!(loaded.store, store);
    assert_eq!(assigned_ids(&loaded.store, "v1"), assigned_ids(&store, "v1"));
}

fn assert_survives_save_and_load(file: &SnapshotFile, store: &EntityStore, step: &str) {
    file.save(store).unwrap_or_else(|err| panic!("save after {step}: {err}"));
    let loaded = file
        .load()
        .unwrap_or_else(|err| panic!("load after {step}: {err}"));
    assert!(
        loaded.repaired.violations.is_empty(),
        "repairs after {step}: {:?}",
        loaded.repaired.violations
    );
    assert_eq!(&loaded.store, store, "store changed by round trip after {step}");
}

#[rstest]
fn every_write_leaves_a_loadable_snapshot(mut store: EntityStore) {
    let tmp = tempfile::tempdir().expect("tempdir");
    let file = SnapshotFile::new(tmp.path().join("portal.json"));
    assert_survives_save_and_load(&file, &store, "start");

    sync_from_module_edit(&mut store, quiz_module()).expect("create m9");
    assert_survives_save_and_load(&file, &store, "create m9");

    let shortened = store
        .module(&mid("m9"))
        .expect("m9")
        .clone()
        .with_targets([rid("r2")], [did("d3")])
        .with_chapters(quiz_module().chapters()[..1].to_vec());
    sync_from_module_edit(&mut store, shortened).expect("retarget m9");
    assert_survives_save_and_load(&file, &store, "retarget m9");

    assert!(sync_from_module_edit(
        &mut store,
        TrainingModule::new(mid("m10"), "Clash").with_chapters(quiz_module().chapters().to_vec()),
    )
    .is_err());
    assert_survives_save_and_load(&file, &store, "rejected chapter clash");

    sync_from_assignment_edit(
        &mut store,
        &AssignmentOwner::Journey(rid("r3")),
        vec![mid("m2"), mid("m9")],
    )
    .expect("journey r3");
    assert_survives_save_and_load(&file, &store, "journey r3");

    sync_from_assignment_edit(
        &mut store,
        &AssignmentOwner::Department(did("d2")),
        vec![mid("m3")],
    )
    .expect("department d2");
    assert_survives_save_and_load(&file, &store, "department d2");

    delete_role(&mut store, &rid("r2")).expect("delete r2");
    assert_survives_save_and_load(&file, &store, "delete r2");

    delete_module(&mut store, &mid("m1")).expect("delete m1");
    assert_survives_save_and_load(&file, &store, "delete m1");

    delete_department(&mut store, &did("d1")).expect("delete d1");
    assert_survives_save_and_load(&file, &store, "delete d1");
    assert!(check_invariants(&store).is_empty());
}
