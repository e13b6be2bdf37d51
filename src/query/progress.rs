// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Pathwise-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Pathwise and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use crate::model::{EntityStore, Learner, TrainingModule};

use super::assignments::resolve_assigned_modules;

/// Completed module count over assigned module count.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct OverallProgress {
    pub completed: usize,
    pub total: usize,
    /// `0..=100`, and 0 when nothing is assigned.
    pub percent: u8,
}

/// Share of the module's chapters the learner completed, rounded half up, `0..=100`.
///
/// A module without chapters is trivially complete.
pub fn module_progress(module: &TrainingModule, learner: &Learner) -> u8 {
    let total = module.chapters().len();
    let done = module
        .chapter_ids()
        .filter(|chapter_id| learner.has_completed(chapter_id))
        .count();
    if total == 0 {
        return 100;
    }
    rounded_percent(done, total)
}

pub fn overall_progress<'a>(
    modules: impl IntoIterator<Item = &'a TrainingModule>,
    learner: &Learner,
) -> OverallProgress {
    let mut completed = 0;
    let mut total = 0;
    for module in modules {
        total += 1;
        if module_progress(module, learner) == 100 {
            completed += 1;
        }
    }
    let percent = if total == 0 {
        0
    } else {
        rounded_percent(completed, total)
    };
    OverallProgress {
        completed,
        total,
        percent,
    }
}

/// The learner's assigned modules in resolver order, each with its progress.
pub fn assigned_with_progress<'a>(
    learner: &Learner,
    store: &'a EntityStore,
) -> Vec<(&'a TrainingModule, u8)> {
    resolve_assigned_modules(learner, store)
        .into_iter()
        .map(|module| (module, module_progress(module, learner)))
        .collect()
}

fn rounded_percent(part: usize, whole: usize) -> u8 {
    let percent = (200 * part + whole) / (2 * whole);
    u8::try_from(percent.min(100)).unwrap_or(100)
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::{assigned_with_progress, module_progress, overall_progress, OverallProgress};
    use crate::query::resolve_assigned_modules;
    use crate::model::fixtures::demo_store;
    use crate::model::{
        Chapter, ChapterId, ContentType, Learner, LearnerId, ModuleId, TrainingModule,
    };

    fn module_with_chapters(count: usize) -> TrainingModule {
        TrainingModule::new(ModuleId::new("m").expect("module id"), "Module").with_chapters(
            (0..count)
                .map(|i| {
                    Chapter::new(
                        ChapterId::new(format!("c{i}")).expect("chapter id"),
                        format!("Chapter {i}"),
                        ContentType::Video,
                    )
                })
                .collect(),
        )
    }

    fn learner_with(completed: usize) -> Learner {
        Learner::new(LearnerId::new("v").expect("learner id"), "V").with_completed(
            (0..completed).map(|i| ChapterId::new(format!("c{i}")).expect("chapter id")),
        )
    }

    #[rstest]
    #[case::no_chapters(0, 0, 100)]
    #[case::none_done(4, 0, 0)]
    #[case::three_of_four(4, 3, 75)]
    #[case::one_of_three(3, 1, 33)]
    #[case::two_of_three(3, 2, 67)]
    #[case::half_rounds_up(8, 1, 13)]
    #[case::all_done(2, 2, 100)]
    fn module_progress_rounds(#[case] chapters: usize, #[case] done: usize, #[case] expected: u8) {
        assert_eq!(
            module_progress(&module_with_chapters(chapters), &learner_with(done)),
            expected
        );
    }

    #[test]
    fn completions_outside_the_module_do_not_count() {
        let learner = Learner::new(LearnerId::new("v").expect("learner id"), "V")
            .with_completed([ChapterId::new("elsewhere").expect("chapter id")]);
        assert_eq!(module_progress(&module_with_chapters(2), &learner), 0);
    }

    #[test]
    fn overall_progress_of_nothing_is_zero() {
        let learner = learner_with(0);
        assert_eq!(
            overall_progress(std::iter::empty(), &learner),
            OverallProgress::default()
        );
    }

    #[test]
    fn demo_learner_progress() {
        let store = demo_store();
        let learner = store
            .learner(&LearnerId::new("v1").expect("learner id"))
            .expect("v1");

        let rows = assigned_with_progress(learner, &store)
            .into_iter()
            .map(|(module, percent)| (module.module_id().as_str(), percent))
            .collect::<Vec<_>>();
        assert_eq!(rows, [("m1", 100), ("m2", 0), ("m3", 0), ("m4", 0)]);

        let overall = overall_progress(resolve_assigned_modules(learner, &store), learner);
        assert_eq!(
            overall,
            OverallProgress {
                completed: 1,
                total: 4,
                percent: 25,
            }
        );
    }
}
