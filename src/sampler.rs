//! Randomised selection against a quota plan, with shortfall backfill.
//!
//! Callers pass the generator in, so tests can pin the sequence with a seed.

use std::collections::BTreeMap;

use rand::{seq::SliceRandom, Rng};
use tracing::debug;

use crate::classify::classify;
use crate::domain::{Bucket, CategoryPlan, SamplingResult, StoredProblem};

pub type BucketPools = BTreeMap<Bucket, Vec<StoredProblem>>;

/// Group candidates by classified bucket, keeping fetch order within a bucket.
pub fn bucket_pools(rows: Vec<StoredProblem>) -> BucketPools {
  let mut pools = BucketPools::new();
  for row in rows {
    pools.entry(classify(&row)).or_default().push(row);
  }
  pools
}

/// Take each planned bucket's quota from its shuffled pool, then fill any
/// shortfall from the shuffled union of every bucket's leftovers. The result
/// can be smaller than the plan total when the whole pool runs out.
pub fn sample<R: Rng + ?Sized>(mut pools: BucketPools, plan: &CategoryPlan, rng: &mut R) -> SamplingResult {
  let want = plan.total();
  let available: usize = pools.values().map(Vec::len).sum();
  let mut selected = Vec::with_capacity(want.min(available));
  let mut counts_by_bucket = BTreeMap::new();

  for entry in &plan.entries {
    let pool = pools.entry(entry.bucket).or_default();
    pool.shuffle(rng);
    let take = entry.quota.min(pool.len());
    selected.extend(pool.drain(..take));
    *counts_by_bucket.entry(entry.bucket).or_insert(0) += take;
  }

  let mut backfilled = 0;
  if selected.len() < want {
    let mut rest: Vec<(Bucket, StoredProblem)> = pools
      .into_iter()
      .flat_map(|(bucket, rows)| rows.into_iter().map(move |row| (bucket, row)))
      .collect();
    rest.shuffle(rng);
    let need = want - selected.len();
    backfilled = need.min(rest.len());
    for (bucket, row) in rest.into_iter().take(backfilled) {
      *counts_by_bucket.entry(bucket).or_insert(0) += 1;
      selected.push(row);
    }
    debug!(target: "compose", want, need, backfilled, "Backfilled shortfall from leftovers");
  }

  selected.shuffle(rng);
  SamplingResult { selected, counts_by_bucket, backfilled }
}
