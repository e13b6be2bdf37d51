// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Pathwise-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Pathwise and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Chapter checkpoints: per-learner chapter state, quiz validation, and resets.
//!
//! A chapter is `Unstarted` until answers are drafted (`InProgress`) and `Completed` once its
//! checkpoint validates. Completion lives on the learner record; drafts are transient and held
//! by the caller (usually a [`ModulePlayer`]).

use std::collections::BTreeMap;

use thiserror::Error;
use tracing::{debug, info};

use crate::model::{
    Actor, Chapter, ChapterId, EntityStore, Learner, LearnerId, ModuleId, QuestionId,
    TrainingModule,
};
use crate::ops::EntityKind;

pub mod grading;
pub mod player;

pub use grading::{grade, grade_chapter, Grade, ValidationError, ValidationKind};
pub use player::{Advanced, Jump, ModulePlayer, NavigationError, SequentialGating};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChapterState {
    Unstarted,
    InProgress,
    Completed,
}

/// Drafted answers for the questions of one chapter.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DraftAnswers {
    answers: BTreeMap<QuestionId, String>,
}

impl DraftAnswers {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, question_id: &QuestionId) -> Option<&str> {
        self.answers.get(question_id).map(String::as_str)
    }

    pub fn set(&mut self, question_id: QuestionId, answer: impl Into<String>) {
        self.answers.insert(question_id, answer.into());
    }

    pub fn clear(&mut self) {
        self.answers.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.answers.is_empty()
    }

    pub fn with(mut self, question_id: QuestionId, answer: impl Into<String>) -> Self {
        self.set(question_id, answer);
        self
    }
}

/// Drafts of one learner, keyed by chapter.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DraftBook {
    chapters: BTreeMap<ChapterId, DraftAnswers>,
}

impl DraftBook {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn answers(&self, chapter_id: &ChapterId) -> Option<&DraftAnswers> {
        self.chapters.get(chapter_id)
    }

    pub fn answers_mut(&mut self, chapter_id: &ChapterId) -> &mut DraftAnswers {
        self.chapters.entry(chapter_id.clone()).or_default()
    }

    /// Returns `true` when there was something to discard.
    pub fn discard(&mut self, chapter_id: &ChapterId) -> bool {
        self.chapters
            .remove(chapter_id)
            .is_some_and(|answers| !answers.is_empty())
    }
}

/// Successful checkpoint validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Completed {
    pub chapter_id: ChapterId,
    /// `false` when the chapter had already been completed.
    pub newly_completed: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CheckpointError {
    #[error("{kind} not found (id={id})")]
    NotFound { kind: EntityKind, id: String },
    #[error("{actor} may not reset progress of {learner_id}")]
    Forbidden {
        actor: LearnerId,
        learner_id: LearnerId,
    },
}

pub fn chapter_state(learner: &Learner, chapter: &Chapter, drafts: &DraftBook) -> ChapterState {
    if learner.has_completed(chapter.chapter_id()) {
        return ChapterState::Completed;
    }
    match drafts.answers(chapter.chapter_id()) {
        Some(answers) if !answers.is_empty() => ChapterState::InProgress,
        _ => ChapterState::Unstarted,
    }
}

/// Grades the chapter and, when every question passes, marks it completed for the learner.
///
/// A chapter without questions always passes. Completing twice is harmless.
pub fn validate_chapter(
    learner: &mut Learner,
    chapter: &Chapter,
    answers: &DraftAnswers,
) -> Result<Completed, ValidationError> {
    grade_chapter(chapter, answers)?;
    let newly_completed = learner.mark_completed(chapter.chapter_id().clone());
    if newly_completed {
        debug!(learner = %learner.learner_id(), chapter = %chapter.chapter_id(), "chapter completed");
    }
    Ok(Completed {
        chapter_id: chapter.chapter_id().clone(),
        newly_completed,
    })
}

/// Returns the chapter to `Unstarted`: forgets its completion and its drafted answers.
pub fn reset_chapter(learner: &mut Learner, drafts: &mut DraftBook, chapter: &Chapter) -> bool {
    let uncompleted = learner.clear_completed(chapter.chapter_id());
    let discarded = drafts.discard(chapter.chapter_id());
    uncompleted || discarded
}

/// Clears the learner's completions for one module, or all of them when `module` is `None`.
///
/// Returns the number of completions removed.
pub fn reset_module(learner: &mut Learner, module: Option<&TrainingModule>) -> usize {
    match module {
        Some(module) => {
            let mut cleared = 0;
            for chapter_id in module.chapter_ids() {
                if learner.clear_completed(chapter_id) {
                    cleared += 1;
                }
            }
            cleared
        }
        None => learner.clear_all_completed(),
    }
}

/// Store-level reset on behalf of `actor`.
///
/// Admins may reset anyone; a learner may only reset (retake) their own record.
pub fn reset_progress(
    store: &mut EntityStore,
    actor: &Actor,
    learner_id: &LearnerId,
    module_id: Option<&ModuleId>,
) -> Result<usize, CheckpointError> {
    if !actor.may_reset(learner_id) {
        return Err(CheckpointError::Forbidden {
            actor: actor.learner_id().clone(),
            learner_id: learner_id.clone(),
        });
    }
    if store.learner(learner_id).is_none() {
        return Err(CheckpointError::NotFound {
            kind: EntityKind::Learner,
            id: learner_id.to_string(),
        });
    }

    let module = match module_id {
        Some(module_id) => Some(store.module(module_id).cloned().ok_or_else(|| {
            CheckpointError::NotFound {
                kind: EntityKind::Module,
                id: module_id.to_string(),
            }
        })?),
        None => None,
    };

    let Some(learner) = store.learner_mut(learner_id) else {
        return Ok(0);
    };
    let cleared = reset_module(learner, module.as_ref());
    info!(
        actor = %actor.learner_id(),
        learner = %learner_id,
        module = module_id.map(ModuleId::as_str).unwrap_or("*"),
        cleared,
        "progress reset"
    );
    Ok(cleared)
}
