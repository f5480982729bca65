//! Route handlers.
//!
//! | Route                       | Success              | Failure                          |
//! |-----------------------------|----------------------|----------------------------------|
//! | `GET /api/pokemon?name=...` | 200, upstream JSON   | 400 missing name, 404 not found  |
//! | `GET /health`               | 200, `OK`            |                                  |

use std::sync::Arc;

use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use rd_api::Upstream;
use serde::Deserialize;
use serde_json::{Value, json};
use tower_http::trace::TraceLayer;
use tracing::{debug, warn};

/// Query string for `/api/pokemon`.
#[derive(Debug, Default, Deserialize)]
pub struct PokemonQuery {
    /// Pokémon name or numeric id, any case.
    #[serde(default)]
    pub name: Option<String>,
}

/// A failed lookup, rendered as `{"error": "..."}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LookupError {
    /// `name` was absent or blank.
    MissingName,
    /// The upstream request failed for any reason.
    NotFound,
}

impl LookupError {
    /// Returns the HTTP status for this failure.
    #[must_use]
    pub const fn status(self) -> StatusCode {
        match self {
            Self::MissingName => StatusCode::BAD_REQUEST,
            Self::NotFound => StatusCode::NOT_FOUND,
        }
    }

    /// Returns the client-facing message.
    #[must_use]
    pub const fn message(self) -> &'static str {
        match self {
            Self::MissingName => "Name parameter is required",
            Self::NotFound => "Pokémon not found",
        }
    }
}

impl IntoResponse for LookupError {
    fn into_response(self) -> Response {
        (self.status(), Json(json!({ "error": self.message() }))).into_response()
    }
}

/// Builds the proxy router over `upstream`.
pub fn router<U>(upstream: Arc<U>) -> Router
where
    U: Upstream + 'static,
{
    Router::new()
        .route("/api/pokemon", get(pokemon::<U>))
        .route("/health", get(health))
        .layer(TraceLayer::new_for_http())
        .with_state(upstream)
}

async fn pokemon<U>(
    State(upstream): State<Arc<U>>,
    Query(query): Query<PokemonQuery>,
) -> Result<Json<Value>, LookupError>
where
    U: Upstream + 'static,
{
    let name = query
        .name
        .as_deref()
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .ok_or(LookupError::MissingName)?
        .to_lowercase();

    // The name becomes a path segment upstream.
    if !is_resource_name(&name) {
        debug!(name = %name, "rejecting malformed pokemon name");
        return Err(LookupError::NotFound);
    }

    debug!(name = %name, "proxying pokemon lookup");
    match upstream.get_json(&format!("pokemon/{name}")).await {
        Ok(body) => Ok(Json(body)),
        Err(e) => {
            warn!(name = %name, error = %e, "pokemon lookup failed");
            Err(LookupError::NotFound)
        }
    }
}

/// Returns `true` for names made of letters, digits and `-` (`mr-mime`, `25`).
fn is_resource_name(name: &str) -> bool {
    name.chars().all(|c| c.is_alphanumeric() || c == '-')
}

async fn health() -> &'static str {
    "OK"
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use async_trait::async_trait;
    use axum::body::{Body, to_bytes};
    use axum::http::Request;
    use rd_api::ApiError;
    use tower::ServiceExt;

    use super::*;

    /// Answers only for pikachu and records every requested path.
    #[derive(Default)]
    struct FakeUpstream {
        seen: Mutex<Vec<String>>,
    }

    impl FakeUpstream {
        fn paths(&self) -> Vec<String> {
            self.seen.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl Upstream for FakeUpstream {
        async fn get_json(&self, path: &str) -> Result<Value, ApiError> {
            self.seen.lock().unwrap().push(path.to_owned());
            if path == "pokemon/pikachu" {
                Ok(json!({"id": 25, "name": "pikachu"}))
            } else {
                Err(ApiError::status(404, path))
            }
        }
    }

    async fn call(upstream: Arc<FakeUpstream>, uri: &str) -> (StatusCode, Value) {
        let response = router(upstream)
            .oneshot(Request::get(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn test_lookup_lowercases_name() {
        let upstream = Arc::new(FakeUpstream::default());
        let (status, body) = call(Arc::clone(&upstream), "/api/pokemon?name=PiKaChU").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["id"], 25);
        assert_eq!(upstream.paths(), ["pokemon/pikachu"]);
    }

    #[tokio::test]
    async fn test_missing_name_is_bad_request() {
        for uri in ["/api/pokemon", "/api/pokemon?name=", "/api/pokemon?name=%20%20"] {
            let upstream = Arc::new(FakeUpstream::default());
            let (status, body) = call(Arc::clone(&upstream), uri).await;

            assert_eq!(status, StatusCode::BAD_REQUEST, "{uri}");
            assert_eq!(body, json!({"error": "Name parameter is required"}));
            assert!(upstream.paths().is_empty());
        }
    }

    #[tokio::test]
    async fn test_upstream_failure_is_not_found() {
        let (status, body) = call(Arc::default(), "/api/pokemon?name=missingno").await;

        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body, json!({"error": "Pokémon not found"}));
    }

    #[tokio::test]
    async fn test_name_cannot_leave_the_pokemon_endpoint() {
        for uri in [
            "/api/pokemon?name=..%2Fitem%2Fpotion",
            "/api/pokemon?name=pikachu%3Flimit%3D1",
            "/api/pokemon?name=pikachu%23x",
        ] {
            let upstream = Arc::new(FakeUpstream::default());
            let (status, body) = call(Arc::clone(&upstream), uri).await;

            assert_eq!(status, StatusCode::NOT_FOUND, "{uri}");
            assert_eq!(body, json!({"error": "Pokémon not found"}));
            assert!(upstream.paths().is_empty(), "{uri}");
        }
    }

    #[test]
    fn test_is_resource_name() {
        assert!(is_resource_name("mr-mime"));
        assert!(is_resource_name("25"));
        assert!(!is_resource_name("../item/potion"));
        assert!(!is_resource_name("pikachu?x"));
    }

    #[tokio::test]
    async fn test_health() {
        let response = router(Arc::new(FakeUpstream::default()))
            .oneshot(Request::get("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }
}
