// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Pathwise-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Pathwise and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Chapter-by-chapter navigation through one module for one learner.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use crate::model::{Chapter, ChapterId, Learner, QuestionId, TrainingModule};

use super::{
    chapter_state, reset_chapter, validate_chapter, ChapterState, DraftAnswers, DraftBook,
    ValidationError,
};

/// What `is_sequential` means when a learner jumps ahead.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SequentialGating {
    /// Jumping past an incomplete chapter is refused.
    #[default]
    Enforce,
    /// The jump is allowed; skipped incomplete chapters are reported.
    Advisory,
}

impl SequentialGating {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Enforce => "enforce",
            Self::Advisory => "advisory",
        }
    }
}

impl fmt::Display for SequentialGating {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SequentialGating {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "enforce" => Ok(Self::Enforce),
            "advisory" => Ok(Self::Advisory),
            other => Err(format!(
                "unknown sequential gating {other:?} (expected enforce or advisory)"
            )),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NavigationError {
    #[error("module has no chapters")]
    NoChapters,
    #[error("chapter index {index} out of range (chapters={chapter_count})")]
    OutOfRange { index: usize, chapter_count: usize },
    #[error("chapter {index} is locked until chapter {blocking} is completed")]
    Locked { index: usize, blocking: ChapterId },
    #[error("question {question_id} is not part of the current chapter")]
    UnknownQuestion { question_id: QuestionId },
}

/// Result of a successful [`ModulePlayer::advance`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Advanced {
    Moved { index: usize },
    /// The last chapter is completed; there is nowhere further to go.
    Finished,
}

/// Result of a successful [`ModulePlayer::jump_to`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Jump {
    pub index: usize,
    /// Incomplete chapters before `index` of a sequential module. Only non-empty under
    /// [`SequentialGating::Advisory`].
    pub skipped: Vec<ChapterId>,
}

/// A learner's pass through one module: the current chapter and the drafted answers.
///
/// Starts at chapter 0. The player never holds the learner; completion is written to the learner
/// passed into each call.
#[derive(Debug, Clone)]
pub struct ModulePlayer<'m> {
    module: &'m TrainingModule,
    gating: SequentialGating,
    position: usize,
    drafts: DraftBook,
}

impl<'m> ModulePlayer<'m> {
    pub fn new(module: &'m TrainingModule, gating: SequentialGating) -> Self {
        Self {
            module,
            gating,
            position: 0,
            drafts: DraftBook::new(),
        }
    }

    pub fn module(&self) -> &'m TrainingModule {
        self.module
    }

    pub fn position(&self) -> usize {
        self.position
    }

    pub fn current(&self) -> Option<&'m Chapter> {
        self.module.chapter(self.position)
    }

    pub fn drafts(&self) -> &DraftBook {
        &self.drafts
    }

    pub fn state_of(&self, learner: &Learner, index: usize) -> Option<ChapterState> {
        let chapter = self.module.chapter(index)?;
        Some(chapter_state(learner, chapter, &self.drafts))
    }

    /// Drafts an answer for a question of the current chapter.
    pub fn set_answer(
        &mut self,
        question_id: &QuestionId,
        answer: impl Into<String>,
    ) -> Result<(), NavigationError> {
        let chapter = self.current().ok_or(NavigationError::NoChapters)?;
        if !chapter
            .questions()
            .iter()
            .any(|question| question.question_id() == question_id)
        {
            return Err(NavigationError::UnknownQuestion {
                question_id: question_id.clone(),
            });
        }
        self.drafts
            .answers_mut(chapter.chapter_id())
            .set(question_id.clone(), answer);
        Ok(())
    }

    /// Validates the current chapter unless it is already completed, then moves on.
    ///
    /// On a failed checkpoint the position stays put and the drafts are kept for correction.
    pub fn advance(&mut self, learner: &mut Learner) -> Result<Advanced, ValidationError> {
        let Some(chapter) = self.current() else {
            return Ok(Advanced::Finished);
        };
        if !learner.has_completed(chapter.chapter_id()) {
            let empty = DraftAnswers::new();
            let answers = self.drafts.answers(chapter.chapter_id()).unwrap_or(&empty);
            validate_chapter(learner, chapter, answers)?;
        }

        let next = self.position + 1;
        if next < self.module.chapters().len() {
            self.position = next;
            Ok(Advanced::Moved { index: next })
        } else {
            Ok(Advanced::Finished)
        }
    }

    /// Moves back one chapter. Going back is never gated.
    pub fn back(&mut self) -> usize {
        self.position = self.position.saturating_sub(1);
        self.position
    }

    /// Opens the chapter at `index`, honouring the module's sequential flag.
    pub fn jump_to(&mut self, index: usize, learner: &Learner) -> Result<Jump, NavigationError> {
        let chapter_count = self.module.chapters().len();
        if index >= chapter_count {
            return Err(NavigationError::OutOfRange {
                index,
                chapter_count,
            });
        }

        let skipped = if self.module.is_sequential() {
            self.module.chapters()[..index]
                .iter()
                .map(Chapter::chapter_id)
                .filter(|chapter_id| !learner.has_completed(chapter_id))
                .cloned()
                .collect::<Vec<_>>()
        } else {
            Vec::new()
        };

        if self.gating == SequentialGating::Enforce {
            if let Some(blocking) = skipped.first() {
                return Err(NavigationError::Locked {
                    index,
                    blocking: blocking.clone(),
                });
            }
        }
        if !skipped.is_empty() {
            debug!(
                module = %self.module.module_id(),
                index,
                skipped = skipped.len(),
                "jumped past incomplete chapters"
            );
        }

        self.position = index;
        Ok(Jump { index, skipped })
    }

    /// Resets the current chapter so it can be taken again.
    pub fn retake(&mut self, learner: &mut Learner) -> bool {
        match self.current() {
            Some(chapter) => reset_chapter(learner, &mut self.drafts, chapter),
            None => false,
        }
    }
}
