//! Bucket classification of stored problems.
//!
//! Importers tagged records with free-text Korean subtypes such as `문법_빈칸` or
//! `본문_제목`, so matching is by substring. Precedence is grammar, dialogue,
//! reading, vocab; a tag matching several substrings takes the first.

use crate::domain::{Bucket, StoredProblem};
use crate::lookup::{as_text, first_text, Field};

const TAG_CHAIN: &[Field] = &[Field::Raw("qtype"), Field::Content("qtype"), Field::Content("type")];

const TAG_SUBSTRINGS: &[(&str, Bucket)] = &[
  ("문법", Bucket::Grammar),
  ("대화", Bucket::Dialogue),
  ("본문", Bucket::Reading),
  ("독해", Bucket::Reading),
  ("어휘", Bucket::Vocab),
];

const TYPE_LITERALS: &[(&str, Bucket)] = &[
  ("body", Bucket::Reading),
  ("reading", Bucket::Reading),
  ("dialogue", Bucket::Dialogue),
  ("grammar", Bucket::Grammar),
];

/// Subtype tag: `content.raw.qtype`, `content.qtype`, `content.type`, then the
/// row's `category` column.
pub fn question_tag(record: &StoredProblem) -> String {
  first_text(record, TAG_CHAIN)
    .or_else(|| record.category.as_deref().map(|c| c.trim().to_string()))
    .unwrap_or_default()
}

/// Total: every record lands in exactly one bucket, `vocab` by default.
pub fn classify(record: &StoredProblem) -> Bucket {
  let tag = question_tag(record);
  if let Some((_, bucket)) = TAG_SUBSTRINGS.iter().find(|(needle, _)| tag.contains(needle)) {
    return *bucket;
  }

  let literal = record
    .content
    .get("type")
    .and_then(as_text)
    .filter(|s| !s.is_empty())
    .or_else(|| record.category.as_deref().map(|c| c.trim().to_string()))
    .unwrap_or_default();
  TYPE_LITERALS
    .iter()
    .find(|(lit, _)| *lit == literal)
    .map(|(_, bucket)| *bucket)
    .unwrap_or(Bucket::Vocab)
}
