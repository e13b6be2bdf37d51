// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Pathwise-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Pathwise and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::collections::BTreeSet;
use std::fs;
use std::io;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{info, warn};

use crate::model::{
    Chapter, ChapterId, ContentType, Department, DepartmentId, EntityStore, Id, IdError, Journey,
    JourneyId, Learner, LearnerId, ModuleId, Question, QuestionId, QuestionKind, Role, RoleId,
    TrainingModule,
};
use crate::ops::{repair, EntityKind, RepairReport};

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("io error at {path:?}: {source}")]
    Io { path: PathBuf, source: io::Error },
    #[error("json error at {path:?}: {source}")]
    Json {
        path: PathBuf,
        source: serde_json::Error,
    },
    #[error("invalid id for {field}: {value:?}: {source}")]
    InvalidId {
        field: &'static str,
        value: String,
        source: IdError,
    },
    #[error("duplicate {kind} id {id}")]
    Duplicate { kind: EntityKind, id: String },
    #[error("{kind} {id} refers to unknown {target_kind} {target_id}")]
    DanglingReference {
        kind: EntityKind,
        id: String,
        target_kind: EntityKind,
        target_id: String,
    },
    #[error("refusing to write through symlink at {path:?}")]
    SymlinkRefused { path: PathBuf },
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum WriteDurability {
    /// Fast, best-effort persistence.
    ///
    /// - Writes a temp file and renames atomically into place.
    /// - Does not fsync.
    #[default]
    BestEffort,

    /// Flushes the file contents and the rename to stable storage where the platform allows.
    Durable,
}

/// A snapshot file: the whole entity store as one JSON document.
#[derive(Debug, Clone)]
pub struct SnapshotFile {
    path: PathBuf,
    durability: WriteDurability,
}

/// A loaded store together with the repairs applied while loading it.
#[derive(Debug, Clone)]
pub struct LoadedSnapshot {
    pub store: EntityStore,
    pub repaired: RepairReport,
}

impl SnapshotFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            durability: WriteDurability::default(),
        }
    }

    pub fn with_durability(mut self, durability: WriteDurability) -> Self {
        self.durability = durability;
        self
    }

    pub fn durability(&self) -> WriteDurability {
        self.durability
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Reads, validates and repairs the snapshot.
    ///
    /// Structural problems (bad ids, duplicates, roles or journeys pointing nowhere) fail the
    /// load. Broken mirroring between modules and lists is repaired and reported instead.
    pub fn load(&self) -> Result<LoadedSnapshot, StoreError> {
        let raw = fs::read_to_string(&self.path).map_err(|source| StoreError::Io {
            path: self.path.clone(),
            source,
        })?;
        let snapshot: SnapshotJson =
            serde_json::from_str(&raw).map_err(|source| StoreError::Json {
                path: self.path.clone(),
                source,
            })?;

        let mut store = store_from_json(snapshot)?;
        let repaired = repair(&mut store);
        if !repaired.violations.is_empty() {
            warn!(
                path = %self.path.display(),
                violations = repaired.violations.len(),
                "snapshot repaired while loading"
            );
        }
        info!(
            path = %self.path.display(),
            modules = store.modules().len(),
            learners = store.learners().len(),
            "snapshot loaded"
        );
        Ok(LoadedSnapshot { store, repaired })
    }

    /// Loads the snapshot, or writes and returns an empty store when the file does not exist.
    pub fn load_or_init(&self) -> Result<LoadedSnapshot, StoreError> {
        match self.load() {
            Ok(loaded) => Ok(loaded),
            Err(StoreError::Io { path, source })
                if source.kind() == io::ErrorKind::NotFound && path == self.path =>
            {
                let store = EntityStore::new();
                self.save(&store)?;
                Ok(LoadedSnapshot {
                    store,
                    repaired: RepairReport::default(),
                })
            }
            Err(err) => Err(err),
        }
    }

    pub fn save(&self, store: &EntityStore) -> Result<(), StoreError> {
        let snapshot = store_to_json(store);
        let raw = serde_json::to_string_pretty(&snapshot).map_err(|source| StoreError::Json {
            path: self.path.clone(),
            source,
        })?;
        write_atomic(&self.path, format!("{raw}\n").as_bytes(), self.durability)?;
        info!(path = %self.path.display(), "snapshot saved");
        Ok(())
    }
}

/// JSON Schema of the snapshot file format.
pub fn snapshot_schema() -> schemars::Schema {
    schemars::schema_for!(SnapshotJson)
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct SnapshotJson {
    #[serde(default)]
    pub departments: Vec<DepartmentJson>,
    #[serde(default)]
    pub roles: Vec<RoleJson>,
    #[serde(default)]
    pub journeys: Vec<JourneyJson>,
    #[serde(default)]
    pub modules: Vec<ModuleJson>,
    #[serde(default)]
    pub learners: Vec<LearnerJson>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct DepartmentJson {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub core_module_ids: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct RoleJson {
    pub id: String,
    pub name: String,
    pub department_id: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct JourneyJson {
    pub id: String,
    pub role_id: String,
    #[serde(default)]
    pub progression_module_ids: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ModuleJson {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    /// Written for readers; recomputed from the targets on load.
    #[serde(default)]
    pub is_compulsory: bool,
    #[serde(default)]
    pub target_role_ids: Vec<String>,
    #[serde(default)]
    pub target_department_ids: Vec<String>,
    #[serde(default = "default_duration_minutes")]
    pub duration_minutes: u32,
    #[serde(default)]
    pub chapters: Vec<ChapterJson>,
    #[serde(default = "default_true")]
    pub is_sequential: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ChapterJson {
    pub id: String,
    pub title: String,
    pub content_type: ContentTypeJson,
    #[serde(default)]
    pub content_url: String,
    #[serde(default)]
    pub questions: Vec<QuestionJson>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "UPPERCASE")]
pub enum ContentTypeJson {
    Video,
    Pdf,
    Link,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct QuestionJson {
    pub id: String,
    pub text: String,
    #[serde(rename = "type")]
    pub kind: QuestionTypeJson,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub options: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub correct_answer: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum QuestionTypeJson {
    Text,
    MultipleChoice,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct LearnerJson {
    pub id: String,
    pub full_name: String,
    #[serde(default)]
    pub role_ids: Vec<String>,
    #[serde(default)]
    pub completed_chapter_ids: Vec<String>,
    #[serde(default)]
    pub is_admin: bool,
}

fn default_duration_minutes() -> u32 {
    30
}

fn default_true() -> bool {
    true
}

// Record conversion and file helpers for `SnapshotFile`.
include!("snapshot/helpers.rs");
