use crate::infra::AppState;
use crate::presentation::{render_assessment, ImmunityResponse};
use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Extension, Json, Router};
use probable_immunity::error::AppError;
use probable_immunity::{ImmunityForm, ImmunityService};
use serde_json::json;
use std::sync::Arc;
use tracing::info;

/// Domain endpoints backed by the immunity service.
pub(crate) fn immunity_router(service: Arc<ImmunityService>) -> Router {
    Router::new()
        .route("/api/v1/illnesses", get(illnesses_endpoint))
        .route("/api/v1/immunity", post(immunity_endpoint))
        .with_state(service)
}

pub(crate) fn with_immunity_routes(service: Arc<ImmunityService>) -> Router {
    immunity_router(service)
        .route("/health", get(healthcheck))
        .route("/ready", get(readiness_endpoint))
        .route("/metrics", get(metrics_endpoint))
}

pub(crate) async fn healthcheck() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

pub(crate) async fn readiness_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    let ready = state.readiness.load(std::sync::atomic::Ordering::Relaxed);
    let status = if ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    let payload = if ready {
        json!({ "status": "ready" })
    } else {
        json!({ "status": "initializing" })
    };

    (status, Json(payload))
}

pub(crate) async fn metrics_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        state.metrics.render(),
    )
}

pub(crate) async fn illnesses_endpoint(
    State(service): State<Arc<ImmunityService>>,
) -> Json<serde_json::Value> {
    Json(json!({ "illnesses": service.illness_names() }))
}

pub(crate) async fn immunity_endpoint(
    State(service): State<Arc<ImmunityService>>,
    payload: Result<Json<ImmunityForm>, JsonRejection>,
) -> Result<Json<ImmunityResponse>, AppError> {
    let Json(form) = payload?;
    let assessment = service.evaluate(&form)?;
    info!(birth_year = assessment.birth_year, "immunity results rendered");
    Ok(Json(render_assessment(&assessment)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infra::immunity_service;
    use crate::presentation::ProbabilityView;
    use axum::body::{to_bytes, Body};
    use axum::http::Request;
    use probable_immunity::config::IntakeConfig;
    use probable_immunity::MessageKey;
    use serde_json::Value;
    use tower::ServiceExt;

    fn service() -> Arc<ImmunityService> {
        immunity_service(IntakeConfig {
            reference_year: Some(2026),
        })
    }

    fn router(ready: bool) -> Router {
        with_immunity_routes(service()).layer(Extension(AppState::detached(ready)))
    }

    async fn json_body(response: axum::response::Response) -> Value {
        let body = to_bytes(response.into_body(), 1024 * 1024)
            .await
            .expect("body");
        serde_json::from_slice(&body).expect("json")
    }

    fn post_immunity(payload: Value) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri("/api/v1/immunity")
            .header("content-type", "application/json")
            .body(Body::from(
                serde_json::to_vec(&payload).expect("serialize payload"),
            ))
            .expect("request")
    }

    #[tokio::test]
    async fn immunity_endpoint_returns_measles_estimate() {
        let form = ImmunityForm {
            birth_year: Some(2011),
            on_time_measles_vaccinations: Some(1),
        };

        let Json(body) = immunity_endpoint(State(service()), Ok(Json(form)))
            .await
            .expect("assessment succeeds");

        assert_eq!(body.birth_year, 2011);
        assert_eq!(body.results.len(), 1);
        let measles = &body.results[0];
        assert_eq!(measles.illness, "measles");
        assert_eq!(measles.probability, ProbabilityView::Known(0.93));
        assert_eq!(measles.message_key, Some(MessageKey::HasImmunizations));
        assert!(measles.citation.is_none());
    }

    #[tokio::test]
    async fn post_immunity_route_renders_pre_1957_citation() {
        let response = router(true)
            .oneshot(post_immunity(json!({
                "birth_year": 1956,
                "on_time_measles_vaccinations": 3
            })))
            .await
            .expect("router dispatch");

        assert_eq!(response.status(), StatusCode::OK);
        let payload = json_body(response).await;
        let measles = &payload["results"][0];
        assert_eq!(measles["probability"], json!(1.0));
        assert_eq!(measles["message_key"], json!("PRE_1957"));
        assert!(measles["citation"]["url"]
            .as_str()
            .is_some_and(|url| url.starts_with("https://www.cdc.gov/")));
    }

    #[tokio::test]
    async fn post_immunity_route_rejects_invalid_form() {
        let response = router(true)
            .oneshot(post_immunity(json!({ "on_time_measles_vaccinations": -1 })))
            .await
            .expect("router dispatch");

        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
        let payload = json_body(response).await;
        assert_eq!(
            payload["errors"]["birth_year"],
            json!(["This field is required."])
        );
        assert!(payload["errors"]["on_time_measles_vaccinations"].is_array());
    }

    #[tokio::test]
    async fn post_immunity_route_reports_mistyped_field_as_json() {
        let response = router(true)
            .oneshot(post_immunity(json!({ "birth_year": "1990" })))
            .await
            .expect("router dispatch");

        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(
            response
                .headers()
                .get(header::CONTENT_TYPE)
                .and_then(|value| value.to_str().ok()),
            Some("application/json")
        );
        let payload = json_body(response).await;
        let messages = payload["errors"]["body"]
            .as_array()
            .expect("body errors listed");
        assert!(messages[0]
            .as_str()
            .is_some_and(|message| message.contains("birth_year")));
    }

    #[tokio::test]
    async fn metrics_route_renders_prometheus_text() {
        let response = router(true)
            .oneshot(
                Request::builder()
                    .uri("/metrics")
                    .body(Body::empty())
                    .expect("request"),
            )
            .await
            .expect("router dispatch");

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response
                .headers()
                .get(header::CONTENT_TYPE)
                .and_then(|value| value.to_str().ok()),
            Some("text/plain; version=0.0.4")
        );
        let body = to_bytes(response.into_body(), 1024 * 1024)
            .await
            .expect("body");
        assert!(std::str::from_utf8(&body).is_ok());
    }

    #[tokio::test]
    async fn illnesses_route_lists_registry() {
        let response = router(true)
            .oneshot(
                Request::builder()
                    .uri("/api/v1/illnesses")
                    .body(Body::empty())
                    .expect("request"),
            )
            .await
            .expect("router dispatch");

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(json_body(response).await, json!({ "illnesses": ["measles"] }));
    }

    #[tokio::test]
    async fn readiness_reflects_startup_flag() {
        let response = router(false)
            .oneshot(
                Request::builder()
                    .uri("/ready")
                    .body(Body::empty())
                    .expect("request"),
            )
            .await
            .expect("router dispatch");

        assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(json_body(response).await, json!({ "status": "initializing" }));
    }

    #[tokio::test]
    async fn healthcheck_reports_ok() {
        let Json(body) = healthcheck().await;
        assert_eq!(body, json!({ "status": "ok" }));
    }
}
