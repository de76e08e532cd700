//! Built-in sample problems so the service is usable without a store.
//!
//! One record per import shape the normaliser understands: spreadsheet columns,
//! manual entry, and seed-script payloads.

use serde_json::{json, Value};

use crate::domain::{ProblemId, StoredProblem};

fn seeded(id: &str, category: &str, content: Value) -> StoredProblem {
  let mut row = StoredProblem::new(ProblemId::Text(id.into()), content);
  row.grade = Some("2".into());
  row.subject = Some("english".into());
  row.category = Some(category.into());
  row
}

pub fn seed_problems() -> Vec<StoredProblem> {
  vec![
    // spreadsheet import: Korean column names under `raw`
    seeded("seed-vocab-1", "vocab", json!({
      "raw": {
        "qtype": "어휘_사전",
        "문제": "다음 중 'borrow'의 뜻으로 알맞은 것은?",
        "보기1": "빌리다", "보기2": "빌려주다", "보기3": "돌려주다", "보기4": "사다", "보기5": "팔다",
        "정답번호": 1,
        "해설": "borrow는 '빌리다'라는 뜻입니다."
      }
    })),
    seeded("seed-grammar-1", "grammar", json!({
      "raw": {
        "qtype": "문법_빈칸",
        "문제": "She ___ to school every day.",
        "options": ["go", "goes", "going", "gone", "to go"],
        "정답번호": "2",
        "해설": "3인칭 단수 현재형은 goes입니다.",
        "오답해설": "go는 주어가 3인칭 단수일 때 쓸 수 없습니다."
      }
    })),
    // manual entry: English keys, zero-based index
    seeded("seed-dialogue-1", "dialogue", json!({
      "type": "dialogue",
      "passage": "A: How was your weekend?\nB: ________",
      "question": "Which is the most natural reply?",
      "choices": ["It was great, thanks.", "I am ten years old.", "See you tomorrow.", "Yes, I do.", "It's on the table."],
      "answerIndex": 0,
      "explanation": "주말이 어땠는지 묻는 말에 대한 자연스러운 응답입니다."
    })),
    // seed script: legacy `body` type, passage under raw
    seeded("seed-reading-1", "body", json!({
      "type": "body",
      "raw": {
        "qtype": "본문_제목",
        "지문": "Minsu planted a small tree in his yard. Every morning he watered it, and in spring it finally bloomed.",
        "question": "What is the best title for the passage?",
        "choice1": "Minsu's Patient Care", "choice2": "A Rainy Day", "choice3": "The Lost Dog",
        "choice4": "A Trip to the Sea", "choice5": "My Favorite Food",
        "answer": 1
      }
    })),
  ]
}
