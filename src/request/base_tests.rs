//! Tests for `Request` and raw serialization.

use super::{Body, Request, RequestBody, SerializationError};
use serde_json::{Map, Value, json};

fn url() -> url::Url {
    url::Url::parse("https://example.com/hooks").unwrap()
}

fn map(value: Value) -> Map<String, Value> {
    match value {
        Value::Object(map) => map,
        other => panic!("Expected object, got {other}"),
    }
}

mod construction {
    use super::*;

    #[test]
    fn new_uses_octet_stream_and_no_headers() {
        let request = Request::new(url(), "hello");

        assert_eq!(request.url().as_str(), "https://example.com/hooks");
        assert_eq!(request.content_type(), "application/octet-stream");
        assert!(request.headers().is_empty());
        assert_eq!(*request.body(), Body::raw("hello"));
    }

    #[test]
    fn with_header_and_headers_merge() {
        let mut extra = http::HeaderMap::new();
        extra.insert("x-tenant", http::HeaderValue::from_static("acme"));
        extra.insert("x-id", http::HeaderValue::from_static("2"));

        let request = Request::new(url(), "hello")
            .with_header(
                http::HeaderName::from_static("x-id"),
                http::HeaderValue::from_static("1"),
            )
            .with_headers(extra);

        assert_eq!(request.headers().len(), 2);
        assert_eq!(request.headers().get("x-id").unwrap(), "2");
        assert_eq!(request.headers().get("x-tenant").unwrap(), "acme");
    }
}

mod raw_serialization {
    use super::*;

    #[test]
    fn raw_body_is_returned_unchanged() {
        for text in ["", "plain", "{\"not\": \"re-encoded\"}", "ünïcödé\n\t"] {
            let request = Request::new(url(), text);

            assert_eq!(request.serialized_body().unwrap(), text);
        }
    }

    #[test]
    fn raw_body_is_identity_for_any_content_type() {
        let request = Request::new(url(), "a=b").with_content_type("application/json");

        assert_eq!(request.serialized_body().unwrap(), "a=b");
    }

    #[test]
    fn serialization_is_deterministic() {
        let request = Request::new(url(), map(json!({"b": "2", "a": "1"})))
            .with_content_type("application/x-www-form-urlencoded");

        assert_eq!(
            request.serialized_body().unwrap(),
            request.serialized_body().unwrap()
        );
    }

    #[test]
    fn structured_body_without_form_type_is_unsupported() {
        let request = Request::new(url(), map(json!({"event": "ping"})));

        match request.serialized_body() {
            Err(SerializationError::Unsupported { content_type }) => {
                assert_eq!(content_type, "application/octet-stream");
            }
            other => panic!("Expected Unsupported, got {other:?}"),
        }
    }

    #[test]
    fn sequence_body_is_unsupported_even_for_forms() {
        let request = Request::new(url(), vec![json!(1)])
            .with_content_type("application/x-www-form-urlencoded");

        assert!(matches!(
            request.serialized_body(),
            Err(SerializationError::Unsupported { .. })
        ));
    }
}

mod form_serialization {
    use super::*;

    #[test]
    fn encodes_in_insertion_order() {
        let request = Request::new(
            url(),
            map(json!({"event": "user signed up", "count": 2, "ok": true, "tag": "a&b"})),
        )
        .with_content_type("application/x-www-form-urlencoded");

        assert_eq!(
            request.serialized_body().unwrap(),
            "event=user+signed+up&count=2&ok=true&tag=a%26b"
        );
    }

    #[test]
    fn content_type_parameters_and_case_are_ignored() {
        let request = Request::new(url(), map(json!({"a": "1"})))
            .with_content_type("Application/X-WWW-Form-Urlencoded; charset=utf-8");

        assert_eq!(request.serialized_body().unwrap(), "a=1");
    }

    #[test]
    fn nested_values_are_rejected() {
        let request = Request::new(url(), map(json!({"ok": "1", "nested": {"a": 1}})))
            .with_content_type("application/x-www-form-urlencoded");

        match request.serialized_body() {
            Err(SerializationError::UnsupportedFormValue { key }) => assert_eq!(key, "nested"),
            other => panic!("Expected UnsupportedFormValue, got {other:?}"),
        }
    }

    #[test]
    fn null_values_are_rejected() {
        let request = Request::new(url(), map(json!({"gone": null})))
            .with_content_type("application/x-www-form-urlencoded");

        assert!(matches!(
            request.serialized_body(),
            Err(SerializationError::UnsupportedFormValue { .. })
        ));
    }
}
