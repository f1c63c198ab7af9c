#![allow(dead_code)]

use std::{
    collections::HashMap,
    net::SocketAddr,
    sync::{
        Arc, Mutex,
        atomic::{AtomicUsize, Ordering},
    },
};

use apodctl::{
    config::Config,
    types::{Apod, ApodPayload},
};
use axum::{
    Extension, Json, Router,
    extract::Query,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
};
use chrono::{Duration, NaiveDate};
use serde_json::{Value, json};

pub const IMAGE_BYTES: &[u8] = b"\xFF\xD8\xFFfake-jpeg-bytes";

// Helper function to create a raw payload for a test APOD
pub fn sample_payload(date: &str) -> ApodPayload {
    ApodPayload {
        date: date.to_string(),
        title: format!("Sky on {}", date),
        explanation: "Stars, mostly.".to_string(),
        url: Some(format!("https://apod.example/image/{}.jpg", date)),
        media_type: "image".to_string(),
        ..Default::default()
    }
}

pub fn sample_apod(date: &str) -> Apod {
    Apod::try_from(sample_payload(date)).unwrap()
}

pub fn payload_json(date: &str) -> Value {
    json!({
        "date": date,
        "title": format!("Sky on {}", date),
        "explanation": "...",
        "url": format!("https://apod.example/image/{}.jpg", date),
        "media_type": "image",
        "service_version": "v1"
    })
}

/// Requests seen by the stub, in arrival order.
#[derive(Clone, Default)]
pub struct Hits {
    count: Arc<AtomicUsize>,
    queries: Arc<Mutex<Vec<HashMap<String, String>>>>,
}

impl Hits {
    pub fn count(&self) -> usize {
        self.count.load(Ordering::SeqCst)
    }

    pub fn queries(&self) -> Vec<HashMap<String, String>> {
        self.queries.lock().unwrap().clone()
    }

    fn record(&self, params: HashMap<String, String>) {
        self.count.fetch_add(1, Ordering::SeqCst);
        self.queries.lock().unwrap().push(params);
    }
}

pub struct Stub {
    pub addr: SocketAddr,
    pub hits: Hits,
}

impl Stub {
    pub fn url(&self, path: &str) -> String {
        format!("http://{}{}", self.addr, path)
    }

    /// Config pointing the APOD client at `path` on this stub.
    pub fn config(&self, path: &str, root: &std::path::Path) -> Config {
        Config::new("DEMO_KEY", root.join("apods"), root.join("images"))
            .unwrap()
            .with_endpoint(self.url(path))
    }
}

/// Starts a local stand-in for the APOD API.
///
/// - `/apod` answers like the real endpoint for `date`, `start_date`/`end_date` and `count`
/// - `/fixed` always answers with the 2023-05-01 `.jpeg` record
/// - `/broken` answers 200 with a body that is not JSON
/// - `/unavailable` answers 503
/// - `/mixed-batch` answers an array whose second element has no title
/// - `/image.jpeg` serves [`IMAGE_BYTES`], `/missing.jpg` answers 404
pub async fn spawn_stub() -> Stub {
    let hits = Hits::default();
    let app = Router::new()
        .route("/apod", get(apod))
        .route("/fixed", get(fixed))
        .route("/broken", get(broken))
        .route("/unavailable", get(unavailable))
        .route("/mixed-batch", get(mixed_batch))
        .route("/image.jpeg", get(image))
        .route("/missing.jpg", get(missing))
        .layer(Extension(hits.clone()));

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move { axum::serve(listener, app).await.unwrap() });

    Stub { addr, hits }
}

async fn apod(
    Query(params): Query<HashMap<String, String>>,
    Extension(hits): Extension<Hits>,
) -> Response {
    hits.record(params.clone());

    if let Some(count) = params.get("count") {
        let count: i64 = count.parse().unwrap_or(0);
        let first = NaiveDate::from_ymd_opt(2000, 1, 1).unwrap();
        let items: Vec<Value> = (0..count)
            .map(|i| payload_json(&(first + Duration::days(i)).format("%Y-%m-%d").to_string()))
            .collect();
        return Json(Value::Array(items)).into_response();
    }

    if let (Some(start), Some(end)) = (params.get("start_date"), params.get("end_date")) {
        let start = NaiveDate::parse_from_str(start, "%Y-%m-%d").unwrap();
        let end = NaiveDate::parse_from_str(end, "%Y-%m-%d").unwrap();
        let items: Vec<Value> = start
            .iter_days()
            .take_while(|day| *day <= end)
            .map(|day| payload_json(&day.format("%Y-%m-%d").to_string()))
            .collect();
        return Json(Value::Array(items)).into_response();
    }

    match params.get("date") {
        Some(date) => Json(payload_json(date)).into_response(),
        None => StatusCode::BAD_REQUEST.into_response(),
    }
}

async fn fixed(
    Query(params): Query<HashMap<String, String>>,
    Extension(hits): Extension<Hits>,
) -> Json<Value> {
    hits.record(params);
    Json(json!({
        "date": "2023-05-01",
        "title": "Test",
        "explanation": "...",
        "url": "https://x/a.jpeg",
        "media_type": "image"
    }))
}

async fn broken(
    Query(params): Query<HashMap<String, String>>,
    Extension(hits): Extension<Hits>,
) -> &'static str {
    hits.record(params);
    "<html>not json</html>"
}

async fn unavailable(
    Query(params): Query<HashMap<String, String>>,
    Extension(hits): Extension<Hits>,
) -> StatusCode {
    hits.record(params);
    StatusCode::SERVICE_UNAVAILABLE
}

async fn mixed_batch(
    Query(params): Query<HashMap<String, String>>,
    Extension(hits): Extension<Hits>,
) -> Json<Value> {
    hits.record(params);
    let mut invalid = payload_json("2024-01-02");
    invalid["title"] = json!("");
    Json(json!([payload_json("2024-01-01"), invalid, payload_json("2024-01-03")]))
}

async fn image(Extension(hits): Extension<Hits>) -> &'static [u8] {
    hits.record(HashMap::new());
    IMAGE_BYTES
}

async fn missing(Extension(hits): Extension<Hits>) -> StatusCode {
    hits.record(HashMap::new());
    StatusCode::NOT_FOUND
}
