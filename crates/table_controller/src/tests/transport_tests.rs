use std::{collections::HashMap, sync::Arc};

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use serde_json::{json, Value};
use shared::domain::FilterMap;
use tokio::{net::TcpListener, sync::Mutex};

use super::*;

#[derive(Clone, Default)]
struct ServerState {
    seen: Arc<Mutex<Vec<(String, HashMap<String, String>)>>>,
}

async fn handle_systems(
    State(state): State<ServerState>,
    Path(package): Path<String>,
    Query(query): Query<HashMap<String, String>>,
) -> Result<Json<Value>, StatusCode> {
    if package == "missing" {
        return Err(StatusCode::NOT_FOUND);
    }
    state.seen.lock().await.push((package.clone(), query));
    Ok(Json(json!({
        "data": [
            { "id": "sys-1", "display_name": "web-1", "available_evra": "1.2-3" },
            { "id": "sys-2", "attributes": { "display_name": "web-2" } }
        ],
        "meta": { "total_items": 2, "limit": 20, "offset": 0 }
    })))
}

async fn spawn_rows_server() -> anyhow::Result<(String, ServerState)> {
    std::env::set_var("NO_PROXY", "127.0.0.1,localhost");
    let listener = TcpListener::bind("127.0.0.1:0").await?;
    let addr = listener.local_addr()?;
    let state = ServerState::default();
    let app = Router::new()
        .route("/api/packages/:package/systems", get(handle_systems))
        .with_state(state.clone());
    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });
    Ok((format!("http://{addr}/api"), state))
}

#[tokio::test]
async fn fetch_all_sends_limit_override_and_parses_rows() {
    let (base_url, state) = spawn_rows_server().await.expect("spawn server");
    let fetcher = HttpRowFetcher::new(&base_url, "packages/{id}/systems").expect("fetcher");

    let page = fetcher.fetch_all(Some("kernel"), 999_999).await.expect("rows");

    assert_eq!(page.data.len(), 2);
    assert_eq!(page.meta.total_items, 2);
    assert_eq!(page.data[0].field_str("available_evra"), Some("1.2-3"));
    assert_eq!(page.data[1].field_str("display_name"), Some("web-2"));

    let seen = state.seen.lock().await;
    assert_eq!(seen[0].0, "kernel");
    assert_eq!(seen[0].1.get("limit").map(String::as_str), Some("999999"));
    assert!(!seen[0].1.contains_key("offset"));
}

#[tokio::test]
async fn fetch_page_encodes_query_params() {
    let (base_url, state) = spawn_rows_server().await.expect("spawn server");
    let fetcher = HttpRowFetcher::new(&base_url, "/packages/{id}/systems").expect("fetcher");

    let mut filter = FilterMap::new();
    filter.insert("status".into(), vec!["installable", "applicable"].into());
    filter.insert("os".into(), "".into());
    let params = QueryParams {
        limit: 50,
        offset: 100,
        sort: Some("-last_upload".into()),
        filter,
        search: "web".into(),
    };

    fetcher
        .fetch_page(Some("kernel"), &params)
        .await
        .expect("rows");

    let seen = state.seen.lock().await;
    let query = &seen[0].1;
    assert_eq!(query.get("limit").map(String::as_str), Some("50"));
    assert_eq!(query.get("offset").map(String::as_str), Some("100"));
    assert_eq!(query.get("sort").map(String::as_str), Some("-last_upload"));
    assert_eq!(query.get("search").map(String::as_str), Some("web"));
    assert_eq!(
        query.get("filter[status]").map(String::as_str),
        Some("installable,applicable")
    );
    assert!(!query.contains_key("filter[os]"));
}

#[tokio::test]
async fn error_status_is_propagated() {
    let (base_url, _state) = spawn_rows_server().await.expect("spawn server");
    let fetcher = HttpRowFetcher::new(&base_url, "packages/{id}/systems").expect("fetcher");

    let err = fetcher
        .fetch_all(Some("missing"), 10)
        .await
        .expect_err("must fail");
    assert!(err.to_string().contains("404"), "unexpected error: {err}");
}

#[tokio::test]
async fn identifier_is_required_by_templated_path() {
    let fetcher =
        HttpRowFetcher::new("http://127.0.0.1:9/api", "packages/{id}/systems").expect("fetcher");
    let err = fetcher.fetch_all(None, 10).await.expect_err("must fail");
    assert!(err.to_string().contains("requires an identifier"));
}

#[tokio::test]
async fn missing_fetcher_always_fails() {
    assert!(MissingRowFetcher.fetch_all(None, 10).await.is_err());
    assert!(MissingRowFetcher
        .fetch_page(None, &QueryParams::default())
        .await
        .is_err());
}

#[test]
fn default_params_encode_only_paging() {
    assert_eq!(
        query_pairs(&QueryParams::default()),
        vec![
            ("limit".to_string(), "20".to_string()),
            ("offset".to_string(), "0".to_string()),
        ]
    );
}
