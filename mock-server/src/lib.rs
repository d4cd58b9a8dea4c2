//! Fixture backend for exercising the launcher API client over real HTTP.
//!
//! Serves the two supported-version manifests, a launcher version manifest,
//! and a few diagnostic endpoints that reflect back what the client sent.

use axum::{
    extract::{Path, RawQuery},
    http::{header, HeaderMap, StatusCode},
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tokio::net::TcpListener;

pub const STANDARD_MANIFEST_PATH: &str = "/mods.json";
pub const DEVELOPER_MANIFEST_PATH: &str = "/dev-mods.json";
pub const VERSION_MANIFEST_PATH: &str = "/version_manifest_v2.json";

/// A catalog entry as served in the version manifest.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Version {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub url: String,
    pub release_time: String,
}

/// What `/echo` saw of the incoming request.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EchoReply {
    pub query: Option<String>,
    pub content_type: Option<String>,
    pub accept: Option<String>,
    pub body: Value,
}

/// Catalog in newest-first order. `1.19.2` appears twice, as some upstream
/// mirrors do.
pub fn versions() -> Vec<Version> {
    [
        ("1.20.1", "release", "2023-06-12T13:25:51+00:00"),
        ("1.19.4", "release", "2023-03-14T12:56:18+00:00"),
        ("1.19.2", "release", "2022-08-05T11:57:05+00:00"),
        ("1.18.2", "release", "2022-02-28T10:42:45+00:00"),
        ("1.19.2", "release", "2022-08-05T11:57:05+00:00"),
        ("1.17.1", "release", "2021-07-06T12:01:34+00:00"),
    ]
    .into_iter()
    .map(|(id, kind, release_time)| Version {
        id: id.to_string(),
        kind: kind.to_string(),
        url: format!("https://meta.example.test/v1/packages/{id}.json"),
        release_time: release_time.to_string(),
    })
    .collect()
}

pub fn standard_manifest() -> Value {
    json!({
        "1.18.2": { "mods": ["sodium", "lithium"] },
        "1.19.2": { "mods": ["sodium"] },
        "0.0.1": { "mods": [] }
    })
}

pub fn developer_manifest() -> Value {
    json!({
        "1.20.1": { "mods": ["sodium-dev"] },
        "1.19.4": { "mods": ["sodium-dev"] },
        "1.18.2": { "mods": ["sodium-dev"] }
    })
}

pub fn app() -> Router {
    Router::new()
        .route(STANDARD_MANIFEST_PATH, get(|| async { Json(standard_manifest()) }))
        .route(DEVELOPER_MANIFEST_PATH, get(|| async { Json(developer_manifest()) }))
        .route(VERSION_MANIFEST_PATH, get(version_manifest))
        .route("/query", get(query))
        .route("/echo", post(echo))
        .route("/status/{code}", get(status))
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    axum::serve(listener, app()).await
}

async fn version_manifest() -> Json<Value> {
    Json(json!({
        "latest": { "release": "1.20.1", "snapshot": "1.20.1" },
        "versions": versions(),
    }))
}

async fn query(RawQuery(raw): RawQuery) -> Json<Value> {
    Json(json!({ "query": raw }))
}

async fn echo(RawQuery(raw): RawQuery, headers: HeaderMap, Json(body): Json<Value>) -> Json<EchoReply> {
    let header_text = |name: header::HeaderName| {
        headers
            .get(name)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string)
    };
    Json(EchoReply {
        query: raw,
        content_type: header_text(header::CONTENT_TYPE),
        accept: header_text(header::ACCEPT),
        body,
    })
}

async fn status(Path(code): Path<u16>) -> (StatusCode, String) {
    match StatusCode::from_u16(code) {
        Ok(status) => (status, format!("status {code}")),
        Err(_) => (StatusCode::BAD_REQUEST, format!("invalid status {code}")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn version_serializes_with_launcher_keys() {
        let json = serde_json::to_value(&versions()[0]).unwrap();
        assert_eq!(json["id"], "1.20.1");
        assert_eq!(json["type"], "release");
        assert_eq!(json["releaseTime"], "2023-06-12T13:25:51+00:00");
    }

    #[test]
    fn catalog_is_newest_first() {
        let ids: Vec<String> = versions().into_iter().map(|v| v.id).collect();
        assert_eq!(ids.first().map(String::as_str), Some("1.20.1"));
        assert_eq!(ids.last().map(String::as_str), Some("1.17.1"));
    }

    #[test]
    fn manifests_are_objects() {
        assert!(standard_manifest().is_object());
        assert!(developer_manifest().is_object());
    }

    #[test]
    fn echo_reply_roundtrips_through_json() {
        let reply = EchoReply {
            query: Some("a=1".to_string()),
            content_type: Some("application/json".to_string()),
            accept: None,
            body: json!({"k": [1, 2]}),
        };
        let back: EchoReply = serde_json::from_str(&serde_json::to_string(&reply).unwrap()).unwrap();
        assert_eq!(back.query, reply.query);
        assert_eq!(back.body, reply.body);
        assert!(back.accept.is_none());
    }
}
