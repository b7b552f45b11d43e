pub mod health;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, patch, post},
    Router,
};

use crate::recruiting::handlers;
use crate::state::AppState;

/// Upper bound for a multipart submission (resume plus form fields).
const MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Job board
        .route(
            "/api/v1/jobs",
            get(handlers::handle_list_jobs).post(handlers::handle_post_job),
        )
        .route("/api/v1/jobs/:id", get(handlers::handle_get_job))
        .route(
            "/api/v1/jobs/:id/applications",
            post(handlers::handle_submit_application)
                .layer(DefaultBodyLimit::max(MAX_UPLOAD_BYTES)),
        )
        // HR review
        .route(
            "/api/v1/applications",
            get(handlers::handle_list_applications),
        )
        .route(
            "/api/v1/applications/:id",
            get(handlers::handle_get_application),
        )
        .route(
            "/api/v1/applications/:id/status",
            patch(handlers::handle_update_status),
        )
        .route(
            "/api/v1/applications/:id/assessment",
            post(handlers::handle_send_assessment),
        )
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::{to_bytes, Body};
    use axum::http::{header, Request, StatusCode};
    use serde_json::{json, Value};
    use tower::ServiceExt;

    use crate::models::ApplicationId;
    use crate::test_support::{analysis_json, app_state, application, job, StubModel};

    async fn send(router: Router, request: Request<Body>) -> (StatusCode, Value) {
        let response = router.oneshot(request).await.unwrap();
        let status = response.status();
        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let value = if body.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&body).unwrap()
        };
        (status, value)
    }

    fn get_req(uri: &str) -> Request<Body> {
        Request::builder().uri(uri).body(Body::empty()).unwrap()
    }

    fn json_req(method: &str, uri: &str, body: Value) -> Request<Body> {
        Request::builder()
            .method(method)
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    fn multipart_req(uri: &str) -> Request<Body> {
        let body = "--XBOUNDARY\r\n\
            Content-Disposition: form-data; name=\"name\"\r\n\r\n\
            Ada Lovelace\r\n\
            --XBOUNDARY\r\n\
            Content-Disposition: form-data; name=\"email\"\r\n\r\n\
            ada@example.com\r\n\
            --XBOUNDARY\r\n\
            Content-Disposition: form-data; name=\"resume\"; filename=\"ada.pdf\"\r\n\
            Content-Type: application/pdf\r\n\r\n\
            %PDF-1.4 resume bytes\r\n\
            --XBOUNDARY--\r\n";
        Request::builder()
            .method("POST")
            .uri(uri)
            .header(
                header::CONTENT_TYPE,
                "multipart/form-data; boundary=XBOUNDARY",
            )
            .body(Body::from(body))
            .unwrap()
    }

    #[tokio::test]
    async fn test_health() {
        let (state, _) = app_state(StubModel::replying("unused"));
        let (status, body) = send(build_router(state), get_req("/health")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "ok");
    }

    #[tokio::test]
    async fn test_post_then_list_jobs_newest_first() {
        let (state, _) = app_state(StubModel::replying("unused"));
        let router = build_router(state);

        for title in ["First", "Second"] {
            let (status, _) = send(
                router.clone(),
                json_req(
                    "POST",
                    "/api/v1/jobs",
                    json!({"title": title, "description": "d", "requirements": "r"}),
                ),
            )
            .await;
            assert_eq!(status, StatusCode::CREATED);
        }

        let (status, body) = send(router, get_req("/api/v1/jobs")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body[0]["title"], "Second");
        assert_eq!(body[1]["title"], "First");
        assert_eq!(body[0]["type"], "full-time");
    }

    #[tokio::test]
    async fn test_unknown_job_is_404() {
        let (state, _) = app_state(StubModel::replying("unused"));
        let (status, body) = send(build_router(state), get_req("/api/v1/jobs/ghost")).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"]["code"], "NOT_FOUND");
    }

    #[tokio::test]
    async fn test_multipart_submission_is_scored_and_stored() {
        let stub = StubModel::replying(analysis_json(86.0, &["Jira"]));
        let (state, _) = app_state(stub.clone());
        state.store.add_job(job("j1", "Product Manager")).await;
        let router = build_router(state.clone());

        let (status, body) = send(router, multipart_req("/api/v1/jobs/j1/applications")).await;

        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(body["application"]["status"], "shortlisted");
        assert_eq!(body["application"]["resumeFileName"], "ada.pdf");
        assert_eq!(body["statusLabel"], "Shortlisted");
        assert_eq!(state.store.applications().await.len(), 1);
        let document = stub.requests()[0].document.clone().unwrap();
        assert_eq!(document.mime_type, "application/pdf");
    }

    #[tokio::test]
    async fn test_applications_listed_by_score() {
        let (state, _) = app_state(StubModel::replying("unused"));
        state.store.add_application(application("mid", "j", 70.0)).await;
        state.store.add_application(application("top", "j", 95.0)).await;
        state.store.add_application(application("low", "j", 20.0)).await;

        let (_, body) = send(build_router(state), get_req("/api/v1/applications")).await;
        let ids: Vec<&str> = body
            .as_array()
            .unwrap()
            .iter()
            .map(|a| a["id"].as_str().unwrap())
            .collect();
        assert_eq!(ids, vec!["top", "mid", "low"]);
    }

    #[tokio::test]
    async fn test_status_update_flows() {
        let (state, _) = app_state(StubModel::replying("unused"));
        state.store.add_application(application("hi", "j", 90.0)).await;
        state.store.add_application(application("lo", "j", 50.0)).await;
        let router = build_router(state.clone());

        let (status, body) = send(
            router.clone(),
            json_req("PATCH", "/api/v1/applications/hi/status", json!({"status": "hired"})),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "hired");

        let (status, _) = send(
            router.clone(),
            json_req("PATCH", "/api/v1/applications/lo/status", json!({"status": "hired"})),
        )
        .await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);

        let (status, _) = send(
            router,
            json_req("PATCH", "/api/v1/applications/ghost/status", json!({"status": "hired"})),
        )
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND);

        let lo = state.store.application(&ApplicationId("lo".into())).await.unwrap();
        assert_eq!(lo.status, crate::models::ApplicationStatus::AutoRejected);
    }

    #[tokio::test]
    async fn test_send_assessment_endpoint() {
        let (state, _) = app_state(StubModel::replying("Please take the Kafka quiz."));
        state.store.add_job(job("j1", "Data Engineer")).await;
        state.store.add_application(application("x", "j1", 80.0)).await;
        state.store.add_application(application("y", "j1", 60.0)).await;
        let router = build_router(state);

        let (status, body) = send(
            router.clone(),
            Request::builder()
                .method("POST")
                .uri("/api/v1/applications/x/assessment")
                .body(Body::empty())
                .unwrap(),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["body"], "Please take the Kafka quiz.");
        assert_eq!(body["recipient"], "grace@example.com");

        let (status, _) = send(
            router,
            Request::builder()
                .method("POST")
                .uri("/api/v1/applications/y/assessment")
                .body(Body::empty())
                .unwrap(),
        )
        .await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    }
}
