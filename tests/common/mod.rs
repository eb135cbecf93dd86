//! Shared fixtures: an in-process stand-in for the REST Countries API.

#![allow(dead_code)]

use axum::{
    extract::{Path, Query},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
    Router,
};
use countrysrv::models::country::Country;
use std::collections::HashMap;
use std::time::Duration;
use tokio::net::TcpListener;

pub const COUNTRIES_JSON: &str = include_str!("../resources/countries.json");

/// Serves `app` on an ephemeral local port and returns its base URL.
pub async fn spawn_upstream(app: Router) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    format!("http://{}/v3.1", addr)
}

/// Upstream that behaves like restcountries.com for the fixture countries.
pub fn fixture_upstream() -> Router {
    Router::new()
        .route("/v3.1/all", get(all_countries))
        .route("/v3.1/alpha/{code}", get(country_by_code))
}

async fn all_countries(Query(params): Query<HashMap<String, String>>) -> impl IntoResponse {
    if !params.contains_key("fields") {
        return (
            StatusCode::BAD_REQUEST,
            r#"{"message":"'fields' query not specified","status":400}"#.to_string(),
        );
    }

    (StatusCode::OK, COUNTRIES_JSON.to_string())
}

async fn country_by_code(Path(code): Path<String>) -> impl IntoResponse {
    let countries: Vec<serde_json::Value> = serde_json::from_str(COUNTRIES_JSON).unwrap();

    if code.len() != 3 {
        return (
            StatusCode::BAD_REQUEST,
            r#"{"message":"Bad Request","status":400}"#.to_string(),
        );
    }

    match countries
        .into_iter()
        .find(|c| c["cca3"].as_str() == Some(code.as_str()))
    {
        Some(country) => (StatusCode::OK, serde_json::json!([country]).to_string()),
        None => (
            StatusCode::NOT_FOUND,
            r#"{"message":"Not Found","status":404}"#.to_string(),
        ),
    }
}

/// Upstream whose every route answers with `status` and `body`.
pub fn static_upstream(status: StatusCode, body: &'static str) -> Router {
    Router::new().fallback(move || async move { (status, body) })
}

/// Upstream that takes `delay` before answering anything.
pub fn slow_upstream(delay: Duration) -> Router {
    Router::new().fallback(move || async move {
        tokio::time::sleep(delay).await;
        (StatusCode::OK, COUNTRIES_JSON)
    })
}

/// Base URL of a port that nothing listens on.
pub async fn closed_port_url() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    format!("http://{}/v3.1", addr)
}

pub fn names(countries: &[Country]) -> Vec<&str> {
    countries.iter().map(|c| c.name.as_str()).collect()
}
