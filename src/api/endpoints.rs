//! API endpoint handlers
//!
//! This module implements the HTTP endpoints of the quotation listing
//! service: the provider listing, data reload, and health checks.

use crate::conversion::grouping::build_listing;
use crate::core::config::Config;
use crate::core::constants::message;
use crate::core::repository::QuotationRepository;
use crate::models::listing::ListingResponse;
use axum::{
    Json, Router,
    extract::{Path, State},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
};
use serde_json::json;
use std::sync::Arc;
use tracing::{debug, error, info, warn};

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub repository: Arc<dyn QuotationRepository>,
}

/// Create the API router with all endpoints
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(root))
        .route(
            "/quotations/{quotation_id}/versions/{version_id}/providers",
            get(list_providers),
        )
        .route("/admin/reload", post(reload_data))
        .route("/health", get(health_check))
        .with_state(state)
}

/// Validate API key from request headers
fn validate_api_key(headers: &HeaderMap, config: &Config) -> Result<(), StatusCode> {
    if config.api_key.is_none() {
        return Ok(());
    }

    let client_api_key = headers
        .get("x-api-key")
        .and_then(|v| v.to_str().ok())
        .or_else(|| {
            headers
                .get("authorization")
                .and_then(|v| v.to_str().ok())
                .and_then(|v| v.strip_prefix("Bearer "))
        });

    match client_api_key {
        Some(key) if config.validate_client_api_key(key) => Ok(()),
        _ => {
            warn!("Invalid API key provided by client");
            Err(StatusCode::UNAUTHORIZED)
        }
    }
}

/// GET /quotations/{quotation_id}/versions/{version_id}/providers
///
/// Lists the providers of a finalized quotation version with their products.
/// Ids are taken as raw segments so the API key check runs before parsing.
async fn list_providers(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path((raw_quotation_id, raw_version_id)): Path<(String, String)>,
) -> Result<Response, StatusCode> {
    validate_api_key(&headers, &state.config)?;

    let (quotation_id, version_id) = match (
        raw_quotation_id.parse::<i64>(),
        raw_version_id.parse::<i64>(),
    ) {
        (Ok(quotation_id), Ok(version_id)) => (quotation_id, version_id),
        _ => {
            debug!(
                "Rejected non-integer ids: quotation={}, version={}",
                raw_quotation_id, raw_version_id
            );
            let body = ListingResponse::failure(message::INVALID_IDS);
            return Ok((StatusCode::BAD_REQUEST, Json(body)).into_response());
        }
    };

    let request_id = uuid::Uuid::new_v4().to_string();
    info!(
        "📥 Listing providers: request_id={}, quotation={}, version={}",
        request_id, quotation_id, version_id
    );

    let rows = match state.repository.find_rows(quotation_id, version_id).await {
        Ok(rows) => rows,
        Err(e) => {
            error!("Repository error (request_id={}): {}", request_id, e);
            let body = ListingResponse::failure(format!("{}: {}", message::LOAD_FAILED, e));
            return Ok((StatusCode::INTERNAL_SERVER_ERROR, Json(body)).into_response());
        }
    };

    let listing = build_listing(&rows);
    if !listing.success {
        debug!(
            "No rows for quotation {} version {} (request_id={})",
            quotation_id, version_id, request_id
        );
        return Ok((StatusCode::NOT_FOUND, Json(listing)).into_response());
    }

    info!(
        "📤 Listed {} providers with {} products (request_id={})",
        listing.content.len(),
        listing.product_count(),
        request_id
    );
    Ok(Json(listing).into_response())
}

/// POST /admin/reload - Re-read the data source
async fn reload_data(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Response, StatusCode> {
    validate_api_key(&headers, &state.config)?;

    match state.repository.reload().await {
        Ok(rows) => Ok(Json(json!({
            "status": "reloaded",
            "source": state.repository.source_name(),
            "rows": rows,
            "timestamp": chrono::Utc::now().to_rfc3339(),
        }))
        .into_response()),
        Err(e) => {
            error!("Reload failed: {}", e);
            Ok((
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({
                    "status": "failed",
                    "source": state.repository.source_name(),
                    "message": e.to_string(),
                })),
            )
                .into_response())
        }
    }
}

/// GET / - Root endpoint
async fn root(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<impl IntoResponse, StatusCode> {
    validate_api_key(&headers, &state.config)?;

    Ok(Json(json!({
        "message": format!("Quotation Listing Service v{}", env!("CARGO_PKG_VERSION")),
        "status": "running",
        "config": {
            "data_source": state.repository.source_name(),
            "seed_path": state.config.seed_path.display().to_string(),
            "client_api_key_validation": state.config.api_key.is_some(),
        },
        "endpoints": {
            "providers": "/quotations/{quotation_id}/versions/{version_id}/providers",
            "reload": "/admin/reload",
            "health": "/health",
        },
    })))
}

/// GET /health - Health check endpoint
async fn health_check(State(state): State<AppState>) -> impl IntoResponse {
    Json(json!({
        "status": "healthy",
        "timestamp": chrono::Utc::now().to_rfc3339(),
        "data_source": state.repository.source_name(),
        "rows": state.repository.row_count().await,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::repositories::{InMemoryRepository, JsonFileRepository};
    use crate::core::repositories::memory::tests::row;
    use crate::core::repository::RepositoryError;
    use crate::models::quotation::QuotationRow;
    use async_trait::async_trait;
    use axum::body::{Body, to_bytes};
    use axum::http::Request;
    use std::io::Write;
    use tower::ServiceExt;

    struct FailingRepository;

    #[async_trait]
    impl QuotationRepository for FailingRepository {
        async fn find_rows(&self, _: i64, _: i64) -> Result<Vec<QuotationRow>, RepositoryError> {
            Err(RepositoryError::Unavailable("seed not loaded".to_string()))
        }

        async fn reload(&self) -> Result<usize, RepositoryError> {
            Err(RepositoryError::Unavailable("seed not loaded".to_string()))
        }

        async fn row_count(&self) -> usize {
            0
        }

        fn source_name(&self) -> &str {
            "failing"
        }
    }

    fn test_router(config: Config, repository: Arc<dyn QuotationRepository>) -> Router {
        create_router(AppState {
            config: Arc::new(config),
            repository,
        })
    }

    fn seeded_router() -> Router {
        let repository = InMemoryRepository::new(vec![
            row(1, 1, 1, 1),
            row(1, 1, 1, 2),
            row(1, 1, 2, 3),
            row(1, 2, 1, 4),
        ]);
        test_router(Config::default(), Arc::new(repository))
    }

    fn get_request(uri: &str) -> Request<Body> {
        Request::builder().uri(uri).body(Body::empty()).unwrap()
    }

    async fn json_body(response: Response) -> serde_json::Value {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_list_providers() {
        let response = seeded_router()
            .oneshot(get_request("/quotations/1/versions/1/providers"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let body = json_body(response).await;
        assert_eq!(body["success"], true);
        assert_eq!(body["message"], message::LISTING_LOADED);

        let content = body["content"].as_array().unwrap();
        assert_eq!(content.len(), 2);
        assert_eq!(content[0]["providerInfo"]["id"], 1);
        assert_eq!(content[0]["providerInfo"]["currency"], "DOLARES");
        assert_eq!(content[0]["products"].as_array().unwrap().len(), 2);
        assert_eq!(content[1]["products"][0]["id"], 3);
    }

    #[tokio::test]
    async fn test_list_providers_not_found() {
        let response = seeded_router()
            .oneshot(get_request("/quotations/9/versions/1/providers"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let body = json_body(response).await;
        assert_eq!(body["success"], false);
        assert_eq!(body["message"], message::NO_DATA);
        assert_eq!(body["content"], json!([]));
    }

    #[tokio::test]
    async fn test_list_providers_bad_path() {
        let response = seeded_router()
            .oneshot(get_request("/quotations/abc/versions/1/providers"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let body = json_body(response).await;
        assert_eq!(body["success"], false);
        assert_eq!(body["message"], message::INVALID_IDS);
    }

    #[tokio::test]
    async fn test_repository_failure() {
        let app = test_router(Config::default(), Arc::new(FailingRepository));
        let response = app
            .oneshot(get_request("/quotations/1/versions/1/providers"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let body = json_body(response).await;
        assert_eq!(body["success"], false);
        assert!(
            body["message"]
                .as_str()
                .unwrap()
                .starts_with(message::LOAD_FAILED)
        );
    }

    #[tokio::test]
    async fn test_api_key_required() {
        let config = Config {
            api_key: Some("secret".to_string()),
            ..Config::default()
        };
        let repository: Arc<dyn QuotationRepository> =
            Arc::new(InMemoryRepository::new(vec![row(1, 1, 1, 1)]));

        let response = test_router(config.clone(), repository.clone())
            .oneshot(get_request("/quotations/1/versions/1/providers"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

        let request = Request::builder()
            .uri("/quotations/1/versions/1/providers")
            .header("x-api-key", "wrong")
            .body(Body::empty())
            .unwrap();
        let response = test_router(config.clone(), repository.clone())
            .oneshot(request)
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

        let request = Request::builder()
            .uri("/quotations/1/versions/1/providers")
            .header("x-api-key", "secret")
            .body(Body::empty())
            .unwrap();
        let response = test_router(config.clone(), repository.clone())
            .oneshot(request)
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let request = Request::builder()
            .uri("/quotations/1/versions/1/providers")
            .header("authorization", "Bearer secret")
            .body(Body::empty())
            .unwrap();
        let response = test_router(config.clone(), repository.clone())
            .oneshot(request)
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        // Health stays open
        let response = test_router(config, repository)
            .oneshot(get_request("/health"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_unauthorized_wins_over_bad_ids() {
        let config = Config {
            api_key: Some("secret".to_string()),
            ..Config::default()
        };
        let app = test_router(config, Arc::new(InMemoryRepository::default()));

        let response = app
            .oneshot(get_request("/quotations/abc/versions/xyz/providers"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_health_check() {
        let response = seeded_router().oneshot(get_request("/health")).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let body = json_body(response).await;
        assert_eq!(body["status"], "healthy");
        assert_eq!(body["rows"], 4);
        assert_eq!(body["data_source"], "memory");
    }

    fn reload_request() -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri("/admin/reload")
            .body(Body::empty())
            .unwrap()
    }

    #[tokio::test]
    async fn test_reload() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{"rows": [{{"quotationId": 1, "versionId": 1, "providerId": 1, "providerName": "Provider 1", "productId": 1}}]}}"#
        )
        .unwrap();
        file.flush().unwrap();

        let repository = JsonFileRepository::load(file.path()).await.unwrap();
        let app = test_router(Config::default(), Arc::new(repository));
        let response = app.oneshot(reload_request()).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let body = json_body(response).await;
        assert_eq!(body["status"], "reloaded");
        assert_eq!(body["source"], "json_file");
        assert_eq!(body["rows"], 1);
    }

    #[tokio::test]
    async fn test_reload_unsupported_source() {
        let response = seeded_router().oneshot(reload_request()).await.unwrap();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(json_body(response).await["source"], "memory");

        let app = test_router(Config::default(), Arc::new(FailingRepository));
        let response = app.oneshot(reload_request()).await.unwrap();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[tokio::test]
    async fn test_root() {
        let response = seeded_router().oneshot(get_request("/")).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(json_body(response).await["status"], "running");
    }
}
