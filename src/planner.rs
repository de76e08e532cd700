//! Quota plans: an even split across requested buckets, or one of the fixed
//! exam-style presets.

use serde::Serialize;

use crate::domain::{Bucket, CategoryPlan, PlanEntry};

/// Split `total` across `buckets` in the given order. Every bucket gets
/// `total / n`; the remainder goes one unit at a time to the earliest buckets.
///
/// Callers de-duplicate and pass at least one bucket; an empty list yields an
/// empty plan.
pub fn plan(total: usize, buckets: &[Bucket]) -> CategoryPlan {
  if buckets.is_empty() {
    return CategoryPlan::default();
  }
  let base = total / buckets.len();
  let mut remainder = total - base * buckets.len();

  let entries = buckets
    .iter()
    .map(|&bucket| {
      let extra = usize::from(remainder > 0);
      remainder = remainder.saturating_sub(1);
      PlanEntry { bucket, quota: base + extra }
    })
    .collect();
  CategoryPlan { entries }
}

/// Fixed weighted mixes for printed exam papers. Each one is a 20-item
/// paper listed vocab, dialogue, grammar, reading.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Preset {
  Balanced,
  VocabFocus,
  DialogueFocus,
  ReadingFocus,
}

impl Preset {
  pub fn as_str(self) -> &'static str {
    match self {
      Preset::Balanced => "balanced",
      Preset::VocabFocus => "vocab_focus",
      Preset::DialogueFocus => "dialogue_focus",
      Preset::ReadingFocus => "reading_focus",
    }
  }

  /// Blank means no preset. Unknown names fall back to `Balanced`.
  pub fn resolve(name: &str) -> Option<Preset> {
    let v = name.trim().to_lowercase();
    let preset = match v.as_str() {
      "" => return None,
      "vocab_focus" => Preset::VocabFocus,
      "dialogue_focus" => Preset::DialogueFocus,
      "reading_focus" => Preset::ReadingFocus,
      _ => Preset::Balanced,
    };
    Some(preset)
  }

  fn counts(self) -> [(Bucket, usize); 4] {
    use crate::domain::Bucket::*;
    match self {
      Preset::Balanced => [(Vocab, 4), (Dialogue, 6), (Grammar, 4), (Reading, 6)],
      Preset::VocabFocus => [(Vocab, 8), (Dialogue, 4), (Grammar, 4), (Reading, 4)],
      Preset::DialogueFocus => [(Vocab, 4), (Dialogue, 8), (Grammar, 4), (Reading, 4)],
      Preset::ReadingFocus => [(Vocab, 4), (Dialogue, 4), (Grammar, 4), (Reading, 8)],
    }
  }

  pub fn plan(self) -> CategoryPlan {
    let entries = self.counts().into_iter().map(|(bucket, quota)| PlanEntry { bucket, quota }).collect();
    CategoryPlan { entries }
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::domain::Bucket::*;

  #[test]
  fn four_buckets_split_twenty_evenly() {
    assert_eq!(plan(20, &[Vocab, Grammar, Dialogue, Reading]).quotas(), vec![5, 5, 5, 5]);
  }

  #[test]
  fn remainder_goes_to_earliest_buckets() {
    let p = plan(20, &[Vocab, Grammar, Dialogue]);
    assert_eq!(p.quotas(), vec![7, 7, 6]);
    assert_eq!(p.entries[0].bucket, Vocab);
    assert_eq!(p.entries[2].bucket, Dialogue);

    assert_eq!(plan(23, &[Reading, Vocab, Grammar, Dialogue]).quotas(), vec![6, 6, 6, 5]);
  }

  #[test]
  fn caller_order_is_preserved() {
    let p = plan(21, &[Reading, Vocab]);
    assert_eq!(p.entries, vec![
      PlanEntry { bucket: Reading, quota: 11 },
      PlanEntry { bucket: Vocab, quota: 10 },
    ]);
  }

  #[test]
  fn quotas_sum_to_total_and_differ_by_at_most_one() {
    let orders: [&[Bucket]; 4] = [&[Grammar], &[Dialogue, Vocab], &[Reading, Grammar, Vocab], &Bucket::ALL];
    for buckets in orders {
      for total in 0..=120 {
        let p = plan(total, buckets);
        assert_eq!(p.total(), total);
        assert_eq!(p.entries.len(), buckets.len());
        let max = p.quotas().into_iter().max().unwrap_or(0);
        let min = p.quotas().into_iter().min().unwrap_or(0);
        assert!(max - min <= 1, "total={} quotas={:?}", total, p.quotas());
      }
    }
  }

  #[test]
  fn planning_is_deterministic() {
    let a = plan(37, &[Dialogue, Reading, Vocab]);
    for _ in 0..10 {
      assert_eq!(plan(37, &[Dialogue, Reading, Vocab]), a);
    }
  }

  #[test]
  fn empty_bucket_list_gives_empty_plan() {
    assert_eq!(plan(20, &[]).total(), 0);
  }

  #[test]
  fn huge_totals_do_not_overflow() {
    let p = plan(usize::MAX, &Bucket::ALL);
    assert_eq!(p.total(), usize::MAX);
  }

  #[test]
  fn presets_are_fixed_twenty_item_mixes() {
    let balanced = Preset::Balanced.plan();
    assert_eq!(balanced.entries, vec![
      PlanEntry { bucket: Vocab, quota: 4 },
      PlanEntry { bucket: Dialogue, quota: 6 },
      PlanEntry { bucket: Grammar, quota: 4 },
      PlanEntry { bucket: Reading, quota: 6 },
    ]);
    assert_eq!(Preset::VocabFocus.plan().quotas(), vec![8, 4, 4, 4]);
    assert_eq!(Preset::DialogueFocus.plan().quotas(), vec![4, 8, 4, 4]);
    assert_eq!(Preset::ReadingFocus.plan().quotas(), vec![4, 4, 4, 8]);
    for p in [Preset::Balanced, Preset::VocabFocus, Preset::DialogueFocus, Preset::ReadingFocus] {
      assert_eq!(p.plan().total(), 20);
      assert_eq!(Preset::resolve(p.as_str()), Some(p));
    }
  }

  #[test]
  fn preset_names_resolve_with_balanced_fallback() {
    assert_eq!(Preset::resolve(" Reading_Focus "), Some(Preset::ReadingFocus));
    assert_eq!(Preset::resolve("listening_focus"), Some(Preset::Balanced));
    assert_eq!(Preset::resolve("  "), None);
  }
}
