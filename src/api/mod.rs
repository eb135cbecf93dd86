pub mod countries;
pub mod country;
pub mod map;

use crate::{
    config::Config,
    models::response::ApiResponse,
    services::{
        lookup::CountryLookup,
        session::{CatalogSession, CatalogState},
        source::{CountryError, CountrySource},
    },
};
use axum::{
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use std::sync::Arc;
use tokio::task::JoinHandle;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

pub type ApiResult<T> = (StatusCode, Json<ApiResponse<T>>);

/// Shared handler state; one session per list-backed screen.
pub struct AppState<S> {
    pub config: Arc<Config>,
    pub list_session: Arc<CatalogSession<S>>,
    pub map_session: Arc<CatalogSession<S>>,
    pub lookup: CountryLookup<S>,
}

impl<S> Clone for AppState<S> {
    fn clone(&self) -> Self {
        Self {
            config: self.config.clone(),
            list_session: self.list_session.clone(),
            map_session: self.map_session.clone(),
            lookup: self.lookup.clone(),
        }
    }
}

impl<S: CountrySource + 'static> AppState<S> {
    pub fn new(config: Arc<Config>, source: Arc<S>) -> Self {
        Self {
            config,
            list_session: Arc::new(CatalogSession::new("list", source.clone())),
            map_session: Arc::new(CatalogSession::new("map", source.clone())),
            lookup: CountryLookup::new(source),
        }
    }

    /// Mounts every list-backed screen, each with its own fetch.
    pub async fn mount(&self) -> Vec<JoinHandle<()>> {
        vec![
            self.list_session.mount().await,
            self.map_session.mount().await,
        ]
    }
}

pub fn router<S: CountrySource + 'static>(app_state: AppState<S>) -> Router {
    Router::new()
        .route("/countries", get(countries::search_countries::<S>))
        .route("/countries/reload", post(countries::reload_countries::<S>))
        .route("/countries/{code}", get(country::get_country::<S>))
        .route("/map", get(map::get_map::<S>))
        .route(
            "/health",
            get(|| async {
                (
                    StatusCode::OK,
                    Json(serde_json::json!({ "status": "healthy" })),
                )
            }),
        )
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(app_state)
}

pub(crate) fn error_status(error: &CountryError) -> StatusCode {
    match error {
        CountryError::NotFound(_) => StatusCode::NOT_FOUND,
        CountryError::Network(_) | CountryError::MalformedResponse(_) => StatusCode::BAD_GATEWAY,
    }
}

pub(crate) fn error_response<T>(status: StatusCode, message: impl Into<String>) -> ApiResult<T> {
    (status, Json(ApiResponse::error(message)))
}

/// Response for a session that is not `Ready`.
pub(crate) fn not_ready<T>(state: &CatalogState) -> ApiResult<T> {
    match state.error() {
        Some(e) => error_response(
            error_status(e),
            format!("Failed to load countries: {}", e),
        ),
        None => error_response(
            StatusCode::SERVICE_UNAVAILABLE,
            "Countries are still loading",
        ),
    }
}
