// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

#![allow(dead_code)]

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use beam_flags::{Beam, BeamConfig};
use tracing_subscriber::EnvFilter;
use wiremock::MockServer;

pub fn init_tracing() {
	let _ = tracing_subscriber::fmt()
		.with_env_filter(EnvFilter::from_default_env())
		.with_test_writer()
		.try_init();
}

/// Builds an unsigned JWT-shaped token whose `exp` is `expires_in` seconds
/// from now.
pub fn make_jwt(expires_in: i64) -> String {
	let exp = chrono::Utc::now().timestamp() + expires_in;
	make_jwt_with_payload(&format!(r#"{{"sub":"user-1","exp":{exp}}}"#))
}

pub fn make_jwt_with_payload(payload: &str) -> String {
	let header = URL_SAFE_NO_PAD.encode(r#"{"alg":"none","typ":"JWT"}"#);
	let payload = URL_SAFE_NO_PAD.encode(payload);
	format!("{header}.{payload}.sig")
}

pub fn token_cookie(token: &str) -> String {
	format!("BEAM-TOKEN={token}; Path=/")
}

/// A client pointed at `server` with the token step disabled.
pub fn anonymous_client(server: &MockServer) -> Beam {
	init_tracing();
	Beam::new(BeamConfig::new().base_url(server.uri()).cookie_session(false)).unwrap()
}

/// A client pointed at `server` with a cookie session.
pub fn session_client(server: &MockServer) -> Beam {
	init_tracing();
	Beam::new(BeamConfig::new().base_url(server.uri())).unwrap()
}
