//! Stored problem -> `NormalizedQuestion`.
//!
//! Never fails: a record with nothing recognisable still yields five empty
//! choices, answer index 0 and the placeholder explanation.

use crate::classify::classify;
use crate::domain::{NormalizedQuestion, StoredProblem};
use crate::lookup::{first_list, first_number, first_text, Field};

pub const CHOICE_COUNT: usize = 5;
pub const MISSING_EXPLANATION: &str = "해설이 제공되지 않았습니다.";

const PASSAGE: &[Field] = &[
    Field::Content("passage"),
    Field::Content("stem"),
    Field::Raw("지문"),
    Field::Raw("본문"),
    Field::Raw("passage"),
    Field::Raw("body"),
];

const QUESTION: &[Field] = &[
    Field::Row("question"),
    Field::Content("question"),
    Field::Raw("question"),
    Field::Raw("문제"),
    Field::Raw("질문"),
    Field::Raw("문항"),
    Field::Content("prompt"),
];

const CHOICE_LISTS: &[Field] = &[Field::Row("choices"), Field::Content("choices"), Field::Raw("options")];

/// Individually numbered choice columns, Korean spelling first.
const CHOICE_COLUMNS: [[Field; 2]; CHOICE_COUNT] = [
    [Field::Raw("보기1"), Field::Raw("choice1")],
    [Field::Raw("보기2"), Field::Raw("choice2")],
    [Field::Raw("보기3"), Field::Raw("choice3")],
    [Field::Raw("보기4"), Field::Raw("choice4")],
    [Field::Raw("보기5"), Field::Raw("choice5")],
];

/// One-based answer numbers.
const ANSWER_NUMBER: &[Field] = &[
    Field::Raw("정답번호"),
    Field::Raw("answerNo"),
    Field::Raw("answerNumber"),
    Field::Raw("answer"),
    Field::Content("answerNo"),
];

/// Zero-based answer indexes.
const ANSWER_INDEX: &[Field] = &[Field::Content("answerIndex"), Field::Raw("answerIndex")];
const ROW_ANSWER_INDEX: &[Field] = &[Field::Row("answerIndex")];

const EXPLANATION: &[Field] = &[
    Field::Raw("해설"),
    Field::Content("explanation"),
    Field::Raw("explanation"),
    Field::Content("solution"),
];

const EXPLANATION_WRONG: &[Field] = &[Field::Raw("오답해설"), Field::Content("explanationWrong")];

pub fn normalize(record: &StoredProblem) -> NormalizedQuestion {
    NormalizedQuestion {
        id: record.id.clone(),
        kind: classify(record),
        passage: first_text(record, PASSAGE),
        question: first_text(record, QUESTION).unwrap_or_default(),
        choices: extract_choices(record),
        answer_index: extract_answer_index(record),
        explanation: first_text(record, EXPLANATION).unwrap_or_else(|| MISSING_EXPLANATION.to_string()),
        explanation_wrong: first_text(record, EXPLANATION_WRONG),
        content: record.content.clone(),
    }
}

/// Array fields first, then the numbered columns (empties dropped). Always five
/// entries: extra choices are cut, missing ones padded with "".
pub fn extract_choices(record: &StoredProblem) -> [String; CHOICE_COUNT] {
    let found = first_list(record, CHOICE_LISTS).unwrap_or_else(|| {
        CHOICE_COLUMNS
            .iter()
            .filter_map(|aliases| first_text(record, aliases))
            .collect()
    });

    let mut out: [String; CHOICE_COUNT] = Default::default();
    for (slot, choice) in out.iter_mut().zip(found) {
        *slot = choice;
    }
    out
}

/// One-based number first (a row-level zero-based index counts as one-based + 1);
/// if that is missing or outside 1..=5, a zero-based index in 0..=4. The result
/// is clamped into 0..=4, and 0 when nothing usable exists.
pub fn extract_answer_index(record: &StoredProblem) -> usize {
    let mut answer_no = first_number(record, ANSWER_NUMBER)
        .or_else(|| first_number(record, ROW_ANSWER_INDEX).map(|i| i + 1.0));

    if !answer_no.is_some_and(|n| (1.0..=CHOICE_COUNT as f64).contains(&n)) {
        let zero_based = first_number(record, ANSWER_INDEX)
            .or_else(|| first_number(record, ROW_ANSWER_INDEX))
            .filter(|i| (0.0..=(CHOICE_COUNT - 1) as f64).contains(i));
        if let Some(i) = zero_based {
            answer_no = Some(i + 1.0);
        }
    }

    match answer_no {
        Some(n) => (n - 1.0).trunc().clamp(0.0, (CHOICE_COUNT - 1) as f64) as usize,
        None => 0,
    }
}
