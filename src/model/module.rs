// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Pathwise-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Pathwise and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use thiserror::Error;

use super::ids::{ChapterId, DepartmentId, ModuleId, QuestionId, RoleId};

/// A unit of training made of ordered chapters.
///
/// Whether a module is compulsory is never stored: a module without any role or department
/// target is assigned to everyone (see [`TrainingModule::is_compulsory`]).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrainingModule {
    module_id: ModuleId,
    title: String,
    description: String,
    target_role_ids: BTreeSet<RoleId>,
    target_department_ids: BTreeSet<DepartmentId>,
    duration_minutes: u32,
    is_sequential: bool,
    chapters: Vec<Chapter>,
}

impl TrainingModule {
    pub fn new(module_id: ModuleId, title: impl Into<String>) -> Self {
        Self {
            module_id,
            title: title.into(),
            description: String::new(),
            target_role_ids: BTreeSet::new(),
            target_department_ids: BTreeSet::new(),
            duration_minutes: 30,
            is_sequential: true,
            chapters: Vec::new(),
        }
    }

    pub fn module_id(&self) -> &ModuleId {
        &self.module_id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn set_title(&mut self, title: impl Into<String>) {
        self.title = title.into();
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn set_description(&mut self, description: impl Into<String>) {
        self.description = description.into();
    }

    pub fn is_compulsory(&self) -> bool {
        self.target_role_ids.is_empty() && self.target_department_ids.is_empty()
    }

    pub fn target_role_ids(&self) -> &BTreeSet<RoleId> {
        &self.target_role_ids
    }

    pub(crate) fn target_role_ids_mut(&mut self) -> &mut BTreeSet<RoleId> {
        &mut self.target_role_ids
    }

    pub fn target_department_ids(&self) -> &BTreeSet<DepartmentId> {
        &self.target_department_ids
    }

    pub(crate) fn target_department_ids_mut(&mut self) -> &mut BTreeSet<DepartmentId> {
        &mut self.target_department_ids
    }

    pub fn duration_minutes(&self) -> u32 {
        self.duration_minutes
    }

    pub fn set_duration_minutes(&mut self, duration_minutes: u32) {
        self.duration_minutes = duration_minutes;
    }

    pub fn is_sequential(&self) -> bool {
        self.is_sequential
    }

    pub fn set_sequential(&mut self, is_sequential: bool) {
        self.is_sequential = is_sequential;
    }

    pub fn chapters(&self) -> &[Chapter] {
        &self.chapters
    }

    pub fn chapters_mut(&mut self) -> &mut Vec<Chapter> {
        &mut self.chapters
    }

    pub fn chapter(&self, index: usize) -> Option<&Chapter> {
        self.chapters.get(index)
    }

    pub fn chapter_ids(&self) -> impl Iterator<Item = &ChapterId> + '_ {
        self.chapters.iter().map(Chapter::chapter_id)
    }

    pub fn position_of(&self, chapter_id: &ChapterId) -> Option<usize> {
        self.chapters.iter().position(|c| c.chapter_id() == chapter_id)
    }

    pub fn question_count(&self) -> usize {
        self.chapters.iter().map(|c| c.questions().len()).sum()
    }

    pub fn with_targets(
        mut self,
        role_ids: impl IntoIterator<Item = RoleId>,
        department_ids: impl IntoIterator<Item = DepartmentId>,
    ) -> Self {
        self.target_role_ids = role_ids.into_iter().collect();
        self.target_department_ids = department_ids.into_iter().collect();
        self
    }

    pub fn with_chapters(mut self, chapters: Vec<Chapter>) -> Self {
        self.chapters = chapters;
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ContentType {
    Video,
    Pdf,
    Link,
}

impl ContentType {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Video => "VIDEO",
            Self::Pdf => "PDF",
            Self::Link => "LINK",
        }
    }
}

impl fmt::Display for ContentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid content type {0:?}")]
pub struct ParseContentTypeError(pub String);

impl FromStr for ContentType {
    type Err = ParseContentTypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "VIDEO" => Ok(Self::Video),
            "PDF" => Ok(Self::Pdf),
            "LINK" => Ok(Self::Link),
            _ => Err(ParseContentTypeError(s.to_owned())),
        }
    }
}

/// One deliverable piece of a module, gated by its checkpoint questions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Chapter {
    chapter_id: ChapterId,
    title: String,
    content_type: ContentType,
    content_url: String,
    questions: Vec<Question>,
}

impl Chapter {
    pub fn new(chapter_id: ChapterId, title: impl Into<String>, content_type: ContentType) -> Self {
        Self {
            chapter_id,
            title: title.into(),
            content_type,
            content_url: String::new(),
            questions: Vec::new(),
        }
    }

    pub fn chapter_id(&self) -> &ChapterId {
        &self.chapter_id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn content_type(&self) -> ContentType {
        self.content_type
    }

    pub fn content_url(&self) -> &str {
        &self.content_url
    }

    pub fn set_content_url(&mut self, content_url: impl Into<String>) {
        self.content_url = content_url.into();
    }

    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    pub fn questions_mut(&mut self) -> &mut Vec<Question> {
        &mut self.questions
    }

    pub fn with_content_url(mut self, content_url: impl Into<String>) -> Self {
        self.content_url = content_url.into();
        self
    }

    pub fn with_questions(mut self, questions: Vec<Question>) -> Self {
        self.questions = questions;
        self
    }
}

/// How a question is answered. Options only exist for multiple choice.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QuestionKind {
    Text,
    MultipleChoice { options: Vec<String> },
}

impl QuestionKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Text => "TEXT",
            Self::MultipleChoice { .. } => "MULTIPLE_CHOICE",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Question {
    question_id: QuestionId,
    text: String,
    kind: QuestionKind,
    correct_answer: Option<String>,
}

impl Question {
    pub fn text(question_id: QuestionId, text: impl Into<String>, keyword: impl Into<String>) -> Self {
        Self {
            question_id,
            text: text.into(),
            kind: QuestionKind::Text,
            correct_answer: Some(keyword.into()),
        }
    }

    pub fn multiple_choice(
        question_id: QuestionId,
        text: impl Into<String>,
        options: Vec<String>,
        correct_answer: impl Into<String>,
    ) -> Self {
        Self {
            question_id,
            text: text.into(),
            kind: QuestionKind::MultipleChoice { options },
            correct_answer: Some(correct_answer.into()),
        }
    }

    pub fn new(
        question_id: QuestionId,
        text: impl Into<String>,
        kind: QuestionKind,
        correct_answer: Option<String>,
    ) -> Self {
        Self {
            question_id,
            text: text.into(),
            kind,
            correct_answer,
        }
    }

    pub fn question_id(&self) -> &QuestionId {
        &self.question_id
    }

    pub fn prompt(&self) -> &str {
        &self.text
    }

    pub fn kind(&self) -> &QuestionKind {
        &self.kind
    }

    /// For `TEXT` questions this is a required keyword, not the exact expected text.
    pub fn correct_answer(&self) -> Option<&str> {
        self.correct_answer.as_deref()
    }
}
