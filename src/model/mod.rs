// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Pathwise-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Pathwise and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Core data model.
//!
//! The entity store holds departments, roles, journeys, modules and learners; modules carry
//! their chapters and checkpoint questions.

pub mod actor;
pub mod entity_store;
pub mod fixtures;
pub mod ids;
pub mod learner;
pub mod module;
pub mod org;

pub use actor::{Actor, ViewContext};
pub use entity_store::EntityStore;
pub use ids::{
    ChapterId, DepartmentId, Id, IdError, JourneyId, LearnerId, ModuleId, QuestionId, RoleId,
};
pub use learner::Learner;
pub use module::{
    Chapter, ContentType, ParseContentTypeError, Question, QuestionKind, TrainingModule,
};
pub use org::{Department, Journey, Role};
