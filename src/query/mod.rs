// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Pathwise-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Pathwise and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Read-only queries over the entity store.
//!
//! Queries derive the views dashboards and editors render: who is assigned what, and how far
//! along they are. They never mutate and silently skip dangling references.

pub mod assignments;
pub mod progress;

pub use assignments::{
    available_modules, modules_for_reset, resolve_assigned_modules, ResetCandidate,
};
pub use progress::{assigned_with_progress, module_progress, overall_progress, OverallProgress};
