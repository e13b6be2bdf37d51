// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Pathwise-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Pathwise and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Pathwise: training assignment graph and progress engine for a volunteer portal.
//!
//! - [`model`]: entities and the in-memory [`model::EntityStore`].
//! - [`ops`]: writes that keep module targets and department/journey lists in sync.
//! - [`query`]: assignment resolution and progress.
//! - [`checkpoint`]: chapter quizzes, completion, resets and module navigation.
//! - [`store`]: JSON snapshot persistence.

pub mod checkpoint;
pub mod config;
pub mod model;
pub mod ops;
pub mod query;
pub mod store;
