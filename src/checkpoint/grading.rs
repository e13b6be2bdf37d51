// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Pathwise-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Pathwise and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::fmt;

use thiserror::Error;

use crate::model::{Chapter, Question, QuestionId, QuestionKind};

use super::DraftAnswers;

/// Why a checkpoint did not pass. Both kinds are recoverable: the learner edits answers and
/// tries again.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValidationKind {
    /// At least one question has no answer.
    Incomplete,
    /// Every question is answered, at least one wrongly.
    Incorrect,
}

impl ValidationKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Incomplete => "INCOMPLETE",
            Self::Incorrect => "INCORRECT",
        }
    }
}

impl fmt::Display for ValidationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{kind}: {} question(s) need attention", .wrong_question_ids.len())]
pub struct ValidationError {
    pub kind: ValidationKind,
    /// Missing and incorrect answers alike, in chapter order.
    pub wrong_question_ids: Vec<QuestionId>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Grade {
    Missing,
    Incorrect,
    Correct,
}

/// Grades a single answer. Blank answers are missing.
///
/// Multiple choice compares exactly. Text answers pass when, lower-cased, they contain the
/// lower-cased keyword. Without a stored correct answer any non-blank answer passes.
pub fn grade(question: &Question, answer: Option<&str>) -> Grade {
    let Some(answer) = answer.filter(|answer| !answer.trim().is_empty()) else {
        return Grade::Missing;
    };
    let Some(expected) = question.correct_answer() else {
        return Grade::Correct;
    };
    let passed = match question.kind() {
        QuestionKind::MultipleChoice { .. } => answer == expected,
        QuestionKind::Text => answer
            .to_lowercase()
            .contains(&expected.to_lowercase()),
    };
    if passed {
        Grade::Correct
    } else {
        Grade::Incorrect
    }
}

/// Grades every question of the chapter against the drafted answers.
pub fn grade_chapter(chapter: &Chapter, answers: &DraftAnswers) -> Result<(), ValidationError> {
    let mut any_missing = false;
    let mut wrong_question_ids = Vec::new();
    for question in chapter.questions() {
        match grade(question, answers.get(question.question_id())) {
            Grade::Correct => {}
            Grade::Missing => {
                any_missing = true;
                wrong_question_ids.push(question.question_id().clone());
            }
            Grade::Incorrect => wrong_question_ids.push(question.question_id().clone()),
        }
    }
    if wrong_question_ids.is_empty() {
        return Ok(());
    }
    let kind = if any_missing {
        ValidationKind::Incomplete
    } else {
        ValidationKind::Incorrect
    };
    Err(ValidationError {
        kind,
        wrong_question_ids,
    })
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::{grade, Grade};
    use crate::model::{Question, QuestionId, QuestionKind};

    fn qid() -> QuestionId {
        QuestionId::new("q1").expect("question id")
    }

    #[rstest]
    #[case::keyword_inside("Safety first!", Grade::Correct)]
    #[case::exact("safety", Grade::Correct)]
    #[case::upper("SAFETY", Grade::Correct)]
    #[case::unrelated("risk", Grade::Incorrect)]
    #[case::blank("   ", Grade::Missing)]
    fn text_questions_match_keyword(#[case] answer: &str, #[case] expected: Grade) {
        let question = Question::text(qid(), "Primary goal?", "safety");
        assert_eq!(grade(&question, Some(answer)), expected);
    }

    #[rstest]
    #[case::exact("Sunday", Grade::Correct)]
    #[case::case_differs("sunday", Grade::Incorrect)]
    #[case::padded(" Sunday", Grade::Incorrect)]
    #[case::missing("", Grade::Missing)]
    fn multiple_choice_matches_exactly(#[case] answer: &str, #[case] expected: Grade) {
        let question = Question::multiple_choice(
            qid(),
            "Main service day?",
            vec!["Sunday".to_owned(), "Monday".to_owned()],
            "Sunday",
        );
        assert_eq!(grade(&question, Some(answer)), expected);
    }

    #[test]
    fn question_without_correct_answer_accepts_any_answer() {
        let question = Question::new(qid(), "Thoughts?", QuestionKind::Text, None);
        assert_eq!(grade(&question, Some("anything")), Grade::Correct);
        assert_eq!(grade(&question, None), Grade::Missing);
    }
}
