use super::{error_response, not_ready, ApiResult, AppState};
use crate::models::country::CountrySummary;
use crate::models::response::{ApiResponse, PaginationInfo};
use crate::services::source::CountrySource;
use axum::{
    extract::{Query, State},
    http::StatusCode,
    Json,
};
use tracing::info;

#[derive(serde::Deserialize)]
pub struct CountryQueryParams {
    pub q: Option<String>,
    pub offset: Option<i64>,
    pub limit: Option<i64>,
}

pub async fn search_countries<S: CountrySource + 'static>(
    State(app_state): State<AppState<S>>,
    Query(params): Query<CountryQueryParams>,
) -> ApiResult<Vec<CountrySummary>> {
    let offset = match params.offset {
        None => 0,
        Some(offset) if offset < 0 => {
            return error_response(
                StatusCode::BAD_REQUEST,
                "Offset must be a non-negative integer",
            );
        }
        Some(offset) => usize::try_from(offset).unwrap_or(usize::MAX),
    };

    let limit = match params.limit {
        None => app_state
            .config
            .page_size
            .min(app_state.config.max_page_size),
        Some(limit) if limit <= 0 => 0,
        Some(limit) => usize::try_from(limit)
            .unwrap_or(usize::MAX)
            .min(app_state.config.max_page_size),
    };

    let state = app_state.list_session.state().await;
    let Some(catalog) = state.ready() else {
        return not_ready(&state);
    };

    let results = catalog.search(params.q.as_deref().unwrap_or(""));
    let data: Vec<CountrySummary> = results
        .page(offset, limit)
        .iter()
        .map(|country| CountrySummary::from(*country))
        .collect();

    (
        StatusCode::OK,
        Json(ApiResponse::paginated(
            data,
            PaginationInfo::new(offset, limit, results.len()),
        )),
    )
}

pub async fn reload_countries<S: CountrySource + 'static>(
    State(app_state): State<AppState<S>>,
) -> ApiResult<&'static str> {
    info!("Reloading country list on request");
    app_state.list_session.mount().await;

    (StatusCode::ACCEPTED, Json(ApiResponse::ok("loading")))
}
