use super::{not_ready, ApiResult, AppState};
use crate::models::map::{MapMarker, MapRegion, MapView};
use crate::models::response::ApiResponse;
use crate::services::{geo, source::CountrySource};
use axum::{extract::State, http::StatusCode, Json};

pub async fn get_map<S: CountrySource + 'static>(
    State(app_state): State<AppState<S>>,
) -> ApiResult<MapView> {
    let state = app_state.map_session.state().await;
    let Some(catalog) = state.ready() else {
        return not_ready(&state);
    };

    let markers = geo::visible_on(catalog.iter())
        .iter()
        .map(MapMarker::from)
        .collect();

    (
        StatusCode::OK,
        Json(ApiResponse::ok(MapView {
            region: MapRegion::WORLD,
            markers,
        })),
    )
}
