//! Quiz composition: fetch a bounded candidate pool, bucket it, plan quotas,
//! sample, normalise.
//!
//! One store round-trip per request, everything after it is in-memory and
//! single-threaded. Store failures are surfaced as-is, without retry.

use rand::Rng;
use tracing::{info, instrument, warn};

use crate::config::ComposeSettings;
use crate::domain::{Bucket, NormalizedQuestion};
use crate::error::ComposeError;
use crate::normalize::normalize;
use crate::planner::{plan, Preset};
use crate::protocol::{ComposeMeta, ComposeRequest};
use crate::sampler::{bucket_pools, sample};
use crate::store::ProblemStore;
use crate::util::{normalize_grade, normalize_subject};

#[derive(Debug)]
pub struct Composition {
  pub items: Vec<NormalizedQuestion>,
  pub meta: ComposeMeta,
}

/// Resolve aliases, drop unknowns and repeats (first occurrence wins); falls
/// back to every bucket when nothing usable is left.
pub fn resolve_categories(raw: &[String]) -> Vec<Bucket> {
  let mut out: Vec<Bucket> = Vec::new();
  for bucket in raw.iter().filter_map(|c| Bucket::resolve(c)) {
    if !out.contains(&bucket) {
      out.push(bucket);
    }
  }
  if out.is_empty() { Bucket::ALL.to_vec() } else { out }
}

/// Requested count, defaulted when absent/invalid, then clamped to
/// `min_total..=max_total`. A `max_total` below the minimum is ignored.
pub fn effective_total(limit: Option<f64>, settings: &ComposeSettings) -> usize {
  let requested = limit
    .filter(|n| n.is_finite() && *n > 0.0)
    .map(|n| n.floor() as usize)
    .filter(|n| *n > 0)
    .unwrap_or(settings.default_total);
  requested.max(settings.min_total).min(settings.max_total.max(settings.min_total))
}

#[instrument(level = "info", target = "compose", skip(store, settings, request, rng), fields(backend = %store.describe()))]
pub async fn compose<R: Rng + Send>(
  store: &dyn ProblemStore,
  settings: &ComposeSettings,
  request: ComposeRequest,
  mut rng: R,
) -> Result<Composition, ComposeError> {
  let grade = normalize_grade(&request.grade);
  let subject = normalize_subject(&request.subject);
  if grade.is_empty() || subject.is_empty() {
    return Err(ComposeError::MissingFilter { grade, subject });
  }

  let preset = request.preset.as_deref().and_then(Preset::resolve);
  let (categories, category_plan) = match preset {
    Some(p) => {
      let fixed = p.plan();
      (fixed.entries.iter().map(|e| e.bucket).collect::<Vec<_>>(), fixed)
    }
    None => {
      let categories = resolve_categories(&request.categories);
      let total = effective_total(request.limit, settings);
      let even = plan(total, &categories);
      (categories, even)
    }
  };
  let total = category_plan.total();

  let rows = store.fetch_candidates(&grade, &subject, settings.candidate_cap).await?;
  let fetched = rows.len();

  let pools = bucket_pools(rows);
  let sampled = sample(pools, &category_plan, &mut rng);
  let items: Vec<NormalizedQuestion> = sampled.selected.iter().map(normalize).collect();

  if items.len() < total {
    warn!(target: "compose", %grade, %subject, requested = total, returned = items.len(), fetched, "Candidate pool too small for requested total");
  }
  info!(
    target: "compose",
    %grade, %subject,
    categories = ?categories,
    preset = preset.map(Preset::as_str),
    quotas = ?category_plan.quotas(),
    fetched,
    backfilled = sampled.backfilled,
    returned = items.len(),
    "Composed quiz"
  );

  let meta = ComposeMeta {
    grade_filter: grade,
    subject_filter: subject,
    categories,
    preset,
    limit: total,
    counts_by_bucket: sampled.counts_by_bucket,
    total_returned: items.len(),
  };
  Ok(Composition { items, meta })
}
