//! HTTP endpoint handlers. These are thin wrappers that forward to the composer.
//! Each handler is instrumented and logs basic result info.

use std::sync::Arc;

use axum::{
  extract::{rejection::JsonRejection, Query, State},
  response::{IntoResponse, Response},
  Json,
};
use rand::{rngs::StdRng, SeedableRng};
use serde_json::json;
use tracing::{error, info, instrument, warn};

use crate::classify::classify;
use crate::composer::compose;
use crate::domain::StoredProblem;
use crate::error::ComposeError;
use crate::normalize::normalize;
use crate::protocol::*;
use crate::state::AppState;

#[instrument(level = "info")]
pub async fn http_health() -> impl IntoResponse { Json(HealthOut { ok: true }) }

#[instrument(level = "info", skip(state, pairs))]
pub async fn http_get_random(
  State(state): State<Arc<AppState>>,
  Query(pairs): Query<Vec<(String, String)>>,
) -> Response {
  run_compose(&state, ComposeRequest::from_query_pairs(&pairs)).await
}

#[instrument(level = "info", skip(state, payload))]
pub async fn http_post_random(
  State(state): State<Arc<AppState>>,
  payload: Result<Json<ComposeBody>, JsonRejection>,
) -> Response {
  match payload {
    Ok(Json(body)) => run_compose(&state, ComposeRequest::from(body)).await,
    Err(rejection) => reject_body(rejection),
  }
}

/// Unreadable JSON bodies get the same envelope as every other failure.
fn reject_body(rejection: JsonRejection) -> Response {
  warn!(target: "quizmix_backend", error = %rejection.body_text(), "Rejected request body");
  let out = ErrorOut {
    ok: false,
    error_message: "Invalid JSON body".into(),
    error_details: json!({ "reason": rejection.body_text() }),
  };
  (rejection.status(), Json(out)).into_response()
}

async fn run_compose(state: &AppState, request: ComposeRequest) -> Response {
  match compose(state.store.as_ref(), &state.settings, request, StdRng::from_entropy()).await {
    Ok(out) => {
      info!(target: "quizmix_backend", returned = out.meta.total_returned, limit = out.meta.limit, "HTTP quiz served");
      Json(ComposeOut { ok: true, items: out.items, meta: out.meta }).into_response()
    }
    Err(e) => {
      match &e {
        ComposeError::MissingFilter { .. } => warn!(target: "quizmix_backend", error = %e, "Rejected compose request"),
        ComposeError::Store(inner) => error!(target: "quizmix_backend", error = %inner, "Problem store fetch failed"),
      }
      e.into_response()
    }
  }
}

#[instrument(level = "info", skip(payload))]
pub async fn http_post_normalize(payload: Result<Json<StoredProblem>, JsonRejection>) -> Response {
  let Json(body) = match payload {
    Ok(body) => body,
    Err(rejection) => return reject_body(rejection),
  };
  let bucket = classify(&body);
  let item = normalize(&body);
  info!(target: "quizmix_backend", id = %body.id, %bucket, "HTTP normalize preview");
  Json(NormalizeOut { ok: true, bucket, item }).into_response()
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::config::ComposeSettings;
  use crate::domain::ProblemId;
  use crate::error::StoreError;
  use crate::routes::build_router;
  use crate::seeds::seed_problems;
  use crate::store::{MemoryStore, ProblemStore};
  use async_trait::async_trait;
  use axum::{
    body::Body,
    http::{Request, StatusCode},
  };
  use serde_json::Value;
  use tower::util::ServiceExt; // for `oneshot`

  struct DownStore;

  #[async_trait]
  impl ProblemStore for DownStore {
    async fn fetch_candidates(&self, _: &str, _: &str, _: usize) -> Result<Vec<StoredProblem>, StoreError> {
      Err(StoreError::Rejected {
        status: 503,
        message: "upstream unavailable".into(),
        payload: json!({ "message": "upstream unavailable", "hint": null }),
      })
    }

    fn describe(&self) -> String {
      "down".into()
    }
  }

  fn app(store: Arc<dyn ProblemStore>) -> axum::Router {
    build_router(Arc::new(AppState::with_store(store, ComposeSettings::default())))
  }

  fn seeded_app() -> axum::Router {
    let mut rows = seed_problems();
    // enough extra rows to fill a default-size quiz
    for i in 0..40 {
      let mut r = StoredProblem::new(ProblemId::Int(i), json!({ "raw": { "qtype": "문법_배열", "문제": format!("q{}", i) } }));
      r.grade = Some("2".into());
      r.subject = Some("english".into());
      rows.push(r);
    }
    app(Arc::new(MemoryStore::new(rows)))
  }

  async fn json_body(res: Response) -> Value {
    let bytes = axum::body::to_bytes(res.into_body(), usize::MAX).await.expect("Should read body");
    serde_json::from_slice(&bytes).expect("Should parse JSON")
  }

  #[tokio::test]
  async fn health_is_ok() {
    let res = seeded_app()
      .oneshot(Request::get("/api/v1/health").body(Body::empty()).unwrap())
      .await
      .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(json_body(res).await, json!({ "ok": true }));
  }

  #[tokio::test]
  async fn get_random_returns_items_and_meta() {
    let uri = "/api/v1/problems/random?grade=%EC%A4%912&subject=english&categories=grammar,body&limit=10";
    let res = seeded_app().oneshot(Request::get(uri).body(Body::empty()).unwrap()).await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);

    let body = json_body(res).await;
    assert_eq!(body["ok"], true);
    assert_eq!(body["meta"]["gradeFilter"], "2");
    assert_eq!(body["meta"]["categories"], json!(["grammar", "reading"]));
    assert_eq!(body["meta"]["limit"], 20);
    assert_eq!(body["meta"]["countsByBucket"]["reading"], 1);
    assert_eq!(body["meta"]["totalReturned"], 20);

    let items = body["items"].as_array().unwrap();
    assert_eq!(items.len(), 20);
    let counts = body["meta"]["countsByBucket"].as_object().unwrap();
    assert_eq!(counts.values().map(|v| v.as_u64().unwrap()).sum::<u64>(), 20);
    for (bucket, n) in counts {
      let listed = items.iter().filter(|i| i["type"] == bucket.as_str()).count() as u64;
      assert_eq!(n.as_u64().unwrap(), listed);
    }
    for item in items {
      assert_eq!(item["choices"].as_array().unwrap().len(), 5);
      assert!(item["answerIndex"].as_u64().unwrap() <= 4);
      assert!(!item["explanation"].as_str().unwrap().is_empty());
    }
  }

  #[tokio::test]
  async fn post_random_accepts_json_body() {
    let req = Request::post("/api/v1/problems/random")
      .header("content-type", "application/json")
      .body(Body::from(json!({ "grade": "2", "subject": "영어", "categories": ["dialogue"] }).to_string()))
      .unwrap();
    let res = seeded_app().oneshot(req).await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let body = json_body(res).await;
    assert_eq!(body["meta"]["subjectFilter"], "english");
    assert_eq!(body["meta"]["countsByBucket"]["dialogue"], 1);
    assert_eq!(body["meta"]["totalReturned"], 20);
    assert!(body["meta"].get("preset").is_none());
  }

  #[tokio::test]
  async fn get_random_accepts_count_and_preset() {
    let uri = "/api/v1/problems/random?grade=2&subject=english&count=500";
    let res = seeded_app().oneshot(Request::get(uri).body(Body::empty()).unwrap()).await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let body = json_body(res).await;
    assert_eq!(body["meta"]["limit"], 200);
    assert_eq!(body["meta"]["totalReturned"], 44);

    let uri = "/api/v1/problems/random?grade=2&subject=english&preset=dialogue_focus";
    let res = seeded_app().oneshot(Request::get(uri).body(Body::empty()).unwrap()).await.unwrap();
    let body = json_body(res).await;
    assert_eq!(body["meta"]["preset"], "dialogue_focus");
    assert_eq!(body["meta"]["categories"], json!(["vocab", "dialogue", "grammar", "reading"]));
    assert_eq!(body["meta"]["limit"], 20);
    assert_eq!(body["meta"]["totalReturned"], 20);
  }

  #[tokio::test]
  async fn malformed_json_gets_the_error_envelope() {
    for uri in ["/api/v1/problems/random", "/api/v1/problems/normalize"] {
      let req = Request::post(uri)
        .header("content-type", "application/json")
        .body(Body::from("{ \"grade\": "))
        .unwrap();
      let res = seeded_app().oneshot(req).await.unwrap();
      assert_eq!(res.status(), StatusCode::BAD_REQUEST);
      let body = json_body(res).await;
      assert_eq!(body["ok"], false);
      assert_eq!(body["errorMessage"], "Invalid JSON body");
      assert!(body["errorDetails"]["reason"].is_string());
    }
  }

  #[tokio::test]
  async fn missing_filter_is_bad_request() {
    let res = seeded_app()
      .oneshot(Request::get("/api/v1/problems/random?grade=2").body(Body::empty()).unwrap())
      .await
      .unwrap();
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body = json_body(res).await;
    assert_eq!(body["ok"], false);
    assert_eq!(body["errorMessage"], "Missing grade/subject");
    assert_eq!(body["errorDetails"]["grade"], "2");
  }

  #[tokio::test]
  async fn store_failure_is_internal_error_with_payload() {
    let res = app(Arc::new(DownStore))
      .oneshot(Request::get("/api/v1/problems/random?grade=2&subject=english").body(Body::empty()).unwrap())
      .await
      .unwrap();
    assert_eq!(res.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body = json_body(res).await;
    assert_eq!(body["ok"], false);
    assert_eq!(body["errorMessage"], "upstream unavailable");
    assert_eq!(body["errorDetails"], json!({ "message": "upstream unavailable", "hint": null }));
  }

  #[tokio::test]
  async fn normalize_previews_a_raw_record() {
    let raw = json!({
      "id": "x-1",
      "category": "grammar",
      "content": { "raw": { "qtype": "문법_어법오류", "문제": "Find the error.", "정답번호": 3 } }
    });
    let req = Request::post("/api/v1/problems/normalize")
      .header("content-type", "application/json")
      .body(Body::from(raw.to_string()))
      .unwrap();
    let res = seeded_app().oneshot(req).await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let body = json_body(res).await;
    assert_eq!(body["bucket"], "grammar");
    assert_eq!(body["item"]["type"], "grammar");
    assert_eq!(body["item"]["question"], "Find the error.");
    assert_eq!(body["item"]["answerIndex"], 2);
    assert_eq!(body["item"]["choices"], json!(["", "", "", "", ""]));
  }
}
