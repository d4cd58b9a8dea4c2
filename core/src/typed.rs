//! Typed JSON calls on top of a `Transport`.
//!
//! The generic parameter `T` names the shape the response is decoded into.
//! Transport errors return before the codec runs, so a decode error always
//! means the server answered with something that is not a `T`.

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::ApiError;
use crate::query::Query;
use crate::transport::Transport;

/// Decode `text` as JSON into `T`.
pub fn decode<T: DeserializeOwned>(text: &str) -> Result<T, ApiError> {
    serde_json::from_str(text).map_err(|e| ApiError::Decode {
        target: std::any::type_name::<T>(),
        message: e.to_string(),
    })
}

/// Encode `value` as JSON text.
pub fn encode<B: Serialize + ?Sized>(value: &B) -> Result<String, ApiError> {
    serde_json::to_string(value).map_err(|e| ApiError::Serialization(e.to_string()))
}

pub fn get_json<T, X>(transport: &X, url: &str) -> Result<T, ApiError>
where
    T: DeserializeOwned,
    X: Transport + ?Sized,
{
    let text = transport.fetch(url)?;
    decode(&text)
}

pub fn get_json_with_query<T, X>(transport: &X, url: &str, query: &Query) -> Result<T, ApiError>
where
    T: DeserializeOwned,
    X: Transport + ?Sized,
{
    get_json(transport, &format!("{url}{}", query.encode()))
}

/// POST `body` encoded as JSON and decode the response into `T`.
pub fn post_json<B, T, X>(transport: &X, url: &str, body: &B) -> Result<T, ApiError>
where
    B: Serialize + ?Sized,
    T: DeserializeOwned,
    X: Transport + ?Sized,
{
    let payload = encode(body)?;
    let text = transport.send(url, &payload)?;
    decode(&text)
}

pub fn post_json_with_query<B, T, X>(
    transport: &X,
    url: &str,
    query: &Query,
    body: &B,
) -> Result<T, ApiError>
where
    B: Serialize + ?Sized,
    T: DeserializeOwned,
    X: Transport + ?Sized,
{
    post_json(transport, &format!("{url}{}", query.encode()), body)
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use serde::Deserialize;

    use super::*;
    use crate::http::HttpMethod;
    use crate::testing::RecordingTransport;

    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    struct Profile {
        name: String,
        memory_mb: u32,
        mods: Vec<String>,
    }

    fn profile() -> Profile {
        Profile {
            name: "default".to_string(),
            memory_mb: 2048,
            mods: vec!["sodium".to_string(), "lithium".to_string()],
        }
    }

    #[test]
    fn decode_inverts_encode() {
        let value = profile();
        let back: Profile = decode(&encode(&value).unwrap()).unwrap();
        assert_eq!(back, value);
    }

    #[test]
    fn decode_rejects_mismatched_shape() {
        let err = decode::<Profile>(r#"{"name":"x"}"#).unwrap_err();
        match err {
            ApiError::Decode { target, .. } => assert!(target.ends_with("Profile")),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn decode_rejects_empty_body() {
        assert!(matches!(
            decode::<Profile>("").unwrap_err(),
            ApiError::Decode { .. }
        ));
    }

    #[test]
    fn get_json_decodes_body() {
        let body = encode(&profile()).unwrap();
        let transport = RecordingTransport::new().respond("http://x/profile", 200, &body);
        let got: Profile = get_json(&transport, "http://x/profile").unwrap();
        assert_eq!(got, profile());
    }

    #[test]
    fn get_json_surfaces_transport_failure_not_decode_failure() {
        let transport = RecordingTransport::new().fail("http://x/profile", "dns failure");
        let err = get_json::<Profile, _>(&transport, "http://x/profile").unwrap_err();
        assert!(err.is_transport(), "got {err:?}");
    }

    #[test]
    fn get_json_with_query_appends_encoded_query() {
        let transport = RecordingTransport::new().respond("http://x/mods?loader=fabric&page=2", 200, "[]");
        let query = Query::new().with("loader", "fabric").with("page", 2);
        let got: Vec<String> = get_json_with_query(&transport, "http://x/mods", &query).unwrap();
        assert!(got.is_empty());
        assert_eq!(transport.requested_urls(), vec!["http://x/mods?loader=fabric&page=2"]);
    }

    #[test]
    fn get_json_with_empty_query_uses_bare_url() {
        let transport = RecordingTransport::new().respond("http://x/mods", 200, "[]");
        let _: Vec<String> = get_json_with_query(&transport, "http://x/mods", &Query::new()).unwrap();
        assert_eq!(transport.requested_urls(), vec!["http://x/mods"]);
    }

    #[test]
    fn post_json_serializes_body_with_codec() {
        let transport = RecordingTransport::new().respond("http://x/profile", 200, r#"{"ok":true}"#);
        let got: BTreeMap<String, bool> = post_json(&transport, "http://x/profile", &profile()).unwrap();
        assert_eq!(got.get("ok"), Some(&true));

        let requests = transport.requests();
        assert_eq!(requests[0].method, HttpMethod::Post);
        let sent: Profile = serde_json::from_str(requests[0].body.as_deref().unwrap()).unwrap();
        assert_eq!(sent, profile());
    }

    #[test]
    fn post_json_string_body_is_sent_as_json_string() {
        let transport = RecordingTransport::new().respond("http://x/echo", 200, "null");
        let _: Option<String> = post_json(&transport, "http://x/echo", "already json").unwrap();
        assert_eq!(transport.requests()[0].body.as_deref(), Some(r#""already json""#));
    }

    #[test]
    fn post_json_with_query_targets_query_url() {
        let transport = RecordingTransport::new().respond("http://x/profile?dry_run=true", 200, "{}");
        let query = Query::new().with("dry_run", true);
        let _: BTreeMap<String, bool> =
            post_json_with_query(&transport, "http://x/profile", &query, &profile()).unwrap();
        assert_eq!(transport.requested_urls(), vec!["http://x/profile?dry_run=true"]);
    }

    #[test]
    fn post_json_decode_failure_is_distinct() {
        let transport = RecordingTransport::new().respond("http://x/profile", 200, "<html>");
        let err = post_json::<_, Profile, _>(&transport, "http://x/profile", &profile()).unwrap_err();
        assert!(matches!(err, ApiError::Decode { .. }));
    }
}
