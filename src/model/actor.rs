// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Pathwise-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Pathwise and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use super::ids::LearnerId;
use super::learner::Learner;

/// Who is issuing an operation. Passed explicitly; the engine keeps no session state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Actor {
    Admin(LearnerId),
    Learner(LearnerId),
}

impl Actor {
    pub fn for_learner(learner: &Learner) -> Self {
        if learner.is_admin() {
            Self::Admin(learner.learner_id().clone())
        } else {
            Self::Learner(learner.learner_id().clone())
        }
    }

    pub fn learner_id(&self) -> &LearnerId {
        match self {
            Self::Admin(id) | Self::Learner(id) => id,
        }
    }

    pub fn is_admin(&self) -> bool {
        matches!(self, Self::Admin(_))
    }

    /// Admins may reset anyone; learners only their own record (retake).
    pub fn may_reset(&self, learner_id: &LearnerId) -> bool {
        self.is_admin() || self.learner_id() == learner_id
    }
}

/// Whose dashboard is being rendered, and by whom.
///
/// An admin previewing a learner sees exactly what the learner sees; admin-only surfaces stay
/// hidden while previewing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewContext {
    actor: Actor,
    previewing: Option<LearnerId>,
}

impl ViewContext {
    pub fn new(actor: Actor) -> Self {
        Self {
            actor,
            previewing: None,
        }
    }

    /// Returns `None` when the actor is not an admin.
    pub fn preview(actor: Actor, learner_id: LearnerId) -> Option<Self> {
        if !actor.is_admin() {
            return None;
        }
        Some(Self {
            actor,
            previewing: Some(learner_id),
        })
    }

    pub fn actor(&self) -> &Actor {
        &self.actor
    }

    pub fn is_previewing(&self) -> bool {
        self.previewing.is_some()
    }

    /// The learner whose assignments and progress are shown.
    pub fn subject(&self) -> &LearnerId {
        self.previewing
            .as_ref()
            .unwrap_or_else(|| self.actor.learner_id())
    }

    pub fn shows_admin_surfaces(&self) -> bool {
        self.actor.is_admin() && !self.is_previewing()
    }
}
