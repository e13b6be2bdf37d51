// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Pathwise-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Pathwise and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Persistence for the entity store on disk.
//!
//! The engine itself is pure; this module loads a snapshot before the computations and saves it
//! after them.

pub mod snapshot;

pub use snapshot::{
    snapshot_schema, LoadedSnapshot, SnapshotFile, SnapshotJson, StoreError, WriteDurability,
};
