// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Pathwise-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Pathwise and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::collections::BTreeSet;

use super::ids::{ChapterId, LearnerId, RoleId};

/// A volunteer profile as far as training is concerned.
///
/// `completed_chapter_ids` only grows through checkpoint validation and only shrinks through an
/// explicit reset.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Learner {
    learner_id: LearnerId,
    name: String,
    role_ids: BTreeSet<RoleId>,
    completed_chapter_ids: BTreeSet<ChapterId>,
    is_admin: bool,
}

impl Learner {
    pub fn new(learner_id: LearnerId, name: impl Into<String>) -> Self {
        Self {
            learner_id,
            name: name.into(),
            role_ids: BTreeSet::new(),
            completed_chapter_ids: BTreeSet::new(),
            is_admin: false,
        }
    }

    pub fn learner_id(&self) -> &LearnerId {
        &self.learner_id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn role_ids(&self) -> &BTreeSet<RoleId> {
        &self.role_ids
    }

    pub fn role_ids_mut(&mut self) -> &mut BTreeSet<RoleId> {
        &mut self.role_ids
    }

    pub fn completed_chapter_ids(&self) -> &BTreeSet<ChapterId> {
        &self.completed_chapter_ids
    }

    pub fn has_completed(&self, chapter_id: &ChapterId) -> bool {
        self.completed_chapter_ids.contains(chapter_id)
    }

    /// Returns `true` when the chapter was not completed before.
    pub fn mark_completed(&mut self, chapter_id: ChapterId) -> bool {
        self.completed_chapter_ids.insert(chapter_id)
    }

    /// Returns `true` when the chapter had been completed.
    pub fn clear_completed(&mut self, chapter_id: &ChapterId) -> bool {
        self.completed_chapter_ids.remove(chapter_id)
    }

    pub fn clear_all_completed(&mut self) -> usize {
        let count = self.completed_chapter_ids.len();
        self.completed_chapter_ids.clear();
        count
    }

    pub fn is_admin(&self) -> bool {
        self.is_admin
    }

    pub fn set_admin(&mut self, is_admin: bool) {
        self.is_admin = is_admin;
    }

    pub fn with_roles(mut self, role_ids: impl IntoIterator<Item = RoleId>) -> Self {
        self.role_ids = role_ids.into_iter().collect();
        self
    }

    pub fn with_completed(mut self, chapter_ids: impl IntoIterator<Item = ChapterId>) -> Self {
        self.completed_chapter_ids = chapter_ids.into_iter().collect();
        self
    }

    pub fn with_admin(mut self, is_admin: bool) -> Self {
        self.is_admin = is_admin;
        self
    }
}
