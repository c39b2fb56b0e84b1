// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

mod common;

use std::time::Duration;

use beam_flags::{Beam, BeamConfig, FlagResult, Scope};
use common::{anonymous_client, init_tracing};
use serde_json::json;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn scope(value: serde_json::Value) -> Scope {
	match value {
		serde_json::Value::Object(map) => map,
		_ => panic!("scope must be an object"),
	}
}

#[tokio::test]
async fn cached_result_is_served_without_network() {
	let server = MockServer::start().await;
	Mock::given(method("POST"))
		.and(path("/beam/feature-flag/upload-limit"))
		.respond_with(ResponseTemplate::new(200).set_body_json(json!({"status": true, "value": 7})))
		.expect(1)
		.mount(&server)
		.await;

	let beam = anonymous_client(&server);

	let first = beam.get("upload-limit", None).await;
	let second = beam.get("upload-limit", None).await;

	assert_eq!(first, FlagResult::active("upload-limit", Some(json!(7))));
	assert_eq!(first, second);
	assert_eq!(beam.value("upload-limit", 0, None).await, 7);
	assert!(beam.active("upload-limit", None).await);
}

#[tokio::test]
async fn clear_cache_forces_refetch() {
	let server = MockServer::start().await;
	Mock::given(method("POST"))
		.and(path("/beam/feature-flag/f"))
		.respond_with(ResponseTemplate::new(200).set_body_json(json!({"status": true})))
		.expect(2)
		.mount(&server)
		.await;

	let beam = anonymous_client(&server);

	assert!(beam.active("f", None).await);
	beam.clear_cache().await;
	assert!(beam.active("f", None).await);
}

#[tokio::test]
async fn legacy_active_field_is_normalized() {
	let server = MockServer::start().await;
	Mock::given(method("POST"))
		.and(path("/beam/feature-flag/legacy-on"))
		.respond_with(ResponseTemplate::new(200).set_body_json(json!({"active": true, "value": "blue"})))
		.mount(&server)
		.await;
	Mock::given(method("POST"))
		.and(path("/beam/feature-flag/legacy-off"))
		.respond_with(ResponseTemplate::new(200).set_body_json(json!({"active": false, "value": "blue"})))
		.mount(&server)
		.await;

	let beam = anonymous_client(&server);

	assert_eq!(
		beam.get("legacy-on", None).await,
		FlagResult::active("legacy-on", Some(json!("blue")))
	);
	assert_eq!(beam.get("legacy-off", None).await, FlagResult::inactive("legacy-off"));
	assert_eq!(beam.value("legacy-off", "red".to_string(), None).await, "red");
	assert!(beam.inactive("legacy-off", None).await);
}

#[tokio::test]
async fn value_falls_back_to_default() {
	let server = MockServer::start().await;
	Mock::given(method("POST"))
		.and(path("/beam/feature-flag/no-value"))
		.respond_with(ResponseTemplate::new(200).set_body_json(json!({"status": true})))
		.mount(&server)
		.await;
	Mock::given(method("POST"))
		.and(path("/beam/feature-flag/null-value"))
		.respond_with(ResponseTemplate::new(200).set_body_json(json!({"status": true, "value": null})))
		.mount(&server)
		.await;
	Mock::given(method("POST"))
		.and(path("/beam/feature-flag/wrong-type"))
		.respond_with(ResponseTemplate::new(200).set_body_json(json!({"status": true, "value": "many"})))
		.mount(&server)
		.await;

	let beam = anonymous_client(&server);

	assert_eq!(beam.value("no-value", 3, None).await, 3);
	assert_eq!(beam.value("null-value", 3, None).await, 3);
	assert_eq!(beam.value("wrong-type", 3, None).await, 3);
	assert_eq!(beam.value::<Option<u32>>("no-value", None, None).await, None);
}

#[tokio::test]
async fn server_error_resolves_inactive_and_is_not_cached() {
	let server = MockServer::start().await;
	Mock::given(method("POST"))
		.and(path("/beam/feature-flag/x"))
		.respond_with(ResponseTemplate::new(500))
		.expect(2)
		.mount(&server)
		.await;

	let beam = anonymous_client(&server);

	assert_eq!(beam.get("x", None).await, FlagResult::inactive("x"));
	assert_eq!(beam.get("x", None).await, FlagResult::inactive("x"));
}

#[tokio::test]
async fn malformed_body_resolves_inactive() {
	let server = MockServer::start().await;
	Mock::given(method("POST"))
		.and(path("/beam/feature-flag/html"))
		.respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
		.mount(&server)
		.await;
	Mock::given(method("POST"))
		.and(path("/beam/feature-flag/null"))
		.respond_with(ResponseTemplate::new(200).set_body_string("null"))
		.mount(&server)
		.await;

	let beam = anonymous_client(&server);

	assert_eq!(beam.get("html", None).await, FlagResult::inactive("html"));
	assert_eq!(beam.get("null", None).await, FlagResult::inactive("null"));
}

#[tokio::test]
async fn slow_response_times_out_to_inactive() {
	init_tracing();
	let server = MockServer::start().await;
	Mock::given(method("POST"))
		.and(path("/beam/feature-flag/slow"))
		.respond_with(
			ResponseTemplate::new(200)
				.set_body_json(json!({"status": true}))
				.set_delay(Duration::from_millis(500)),
		)
		.mount(&server)
		.await;

	let beam = Beam::new(
		BeamConfig::new()
			.base_url(server.uri())
			.timeout(Duration::from_millis(50))
			.cookie_session(false),
	)
	.unwrap();

	assert!(!beam.active("slow", None).await);
}

#[tokio::test]
async fn request_carries_scope_and_headers() {
	init_tracing();
	let server = MockServer::start().await;
	Mock::given(method("POST"))
		.and(path("/flags/checkout"))
		.and(header("content-type", "application/json"))
		.and(header("x-requested-with", "XMLHttpRequest"))
		.and(header("x-tenant", "acme"))
		.and(body_json(json!({"team": "core", "seats": 3})))
		.respond_with(ResponseTemplate::new(200).set_body_json(json!({"status": true})))
		.expect(1)
		.mount(&server)
		.await;

	let beam = Beam::new(
		BeamConfig::new()
			.base_url(format!("{}/", server.uri()))
			.path("flags/")
			.header("X-Tenant", "acme")
			.cookie_session(false),
	)
	.unwrap();

	let scope = scope(json!({"team": "core", "seats": 3}));
	assert!(beam.active("checkout", Some(&scope)).await);
}

#[tokio::test]
async fn missing_scope_sends_empty_object() {
	let server = MockServer::start().await;
	Mock::given(method("POST"))
		.and(path("/beam/feature-flag/f"))
		.and(body_json(json!({})))
		.respond_with(ResponseTemplate::new(200).set_body_json(json!({"status": true})))
		.expect(1)
		.mount(&server)
		.await;

	let beam = anonymous_client(&server);
	assert!(beam.active("f", None).await);
}

#[tokio::test]
async fn default_scope_applies_when_none_given() {
	init_tracing();
	let server = MockServer::start().await;
	Mock::given(method("POST"))
		.and(path("/beam/feature-flag/f"))
		.and(body_json(json!({"team": "default"})))
		.respond_with(ResponseTemplate::new(200).set_body_json(json!({"status": true})))
		.expect(1)
		.mount(&server)
		.await;
	Mock::given(method("POST"))
		.and(path("/beam/feature-flag/f"))
		.and(body_json(json!({"team": "explicit"})))
		.respond_with(ResponseTemplate::new(200).set_body_json(json!({"status": false})))
		.expect(1)
		.mount(&server)
		.await;

	let beam = Beam::new(
		BeamConfig::new()
			.base_url(server.uri())
			.default_scope(scope(json!({"team": "default"})))
			.cookie_session(false),
	)
	.unwrap();

	assert!(beam.active("f", None).await);
	assert!(!beam.active("f", Some(&scope(json!({"team": "explicit"})))).await);
	// Both results are cached under their own keys.
	assert!(beam.active("f", None).await);
}

#[tokio::test]
async fn scope_key_order_produces_distinct_cache_entries() {
	let server = MockServer::start().await;
	Mock::given(method("POST"))
		.and(path("/beam/feature-flag/f"))
		.respond_with(ResponseTemplate::new(200).set_body_json(json!({"status": true})))
		.expect(2)
		.mount(&server)
		.await;

	let beam = anonymous_client(&server);

	let mut ab = Scope::new();
	ab.insert("a".into(), json!(1));
	ab.insert("b".into(), json!(2));
	let mut ba = Scope::new();
	ba.insert("b".into(), json!(2));
	ba.insert("a".into(), json!(1));

	beam.get("f", Some(&ab)).await;
	beam.get("f", Some(&ba)).await;
	beam.get("f", Some(&ab)).await;
}

#[tokio::test]
async fn flag_name_is_percent_encoded() {
	let server = MockServer::start().await;
	Mock::given(method("POST"))
		.and(path("/beam/feature-flag/new%20ui%2Fbeta"))
		.respond_with(ResponseTemplate::new(200).set_body_json(json!({"status": true})))
		.expect(1)
		.mount(&server)
		.await;

	let beam = anonymous_client(&server);
	assert!(beam.active("new ui/beta", None).await);
}
