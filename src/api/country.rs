use super::{error_response, error_status, ApiResult, AppState};
use crate::models::country::CountryDetail;
use crate::models::response::ApiResponse;
use crate::services::source::CountrySource;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};

pub async fn get_country<S: CountrySource + 'static>(
    State(app_state): State<AppState<S>>,
    Path(code): Path<String>,
) -> ApiResult<CountryDetail> {
    match app_state.lookup.resolve(&code).await {
        Ok(country) => (
            StatusCode::OK,
            Json(ApiResponse::ok(CountryDetail::from(&country))),
        ),
        Err(e) => error_response(error_status(&e), e.to_string()),
    }
}
