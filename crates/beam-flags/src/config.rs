// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Client configuration.
//!
//! [`BeamConfig`] is what callers provide: every field optional, settable via
//! chained setters, from the environment, or deserialized from host
//! application configuration using the camelCase option names. Resolution
//! fills defaults and normalizes URLs into an immutable [`ResolvedConfig`].

use std::collections::BTreeMap;
use std::time::Duration;

use beam_flags_core::{encode_flag_name, normalize_path, strip_trailing_slash, Scope};
use serde::Deserialize;
use tracing::warn;

/// Default path of the flag endpoint.
pub const DEFAULT_PATH: &str = "/beam/feature-flag";
/// Default path of the token endpoint.
pub const DEFAULT_TOKEN_PATH: &str = "/beam/token";
/// Default name of the cookie carrying the bearer token.
pub const DEFAULT_TOKEN_COOKIE: &str = "BEAM-TOKEN";
/// Default request timeout in milliseconds.
pub const DEFAULT_TIMEOUT_MS: u64 = 5000;
/// Default allowed clock skew when checking token expiry.
pub const DEFAULT_CLOCK_SKEW_SECONDS: i64 = 30;
/// Base URL used when neither configuration nor `SERVER_URL` provide one.
pub const FALLBACK_BASE_URL: &str = "http://localhost";
/// Registry name used when `global` is simply `true`.
pub const DEFAULT_GLOBAL_NAME: &str = "Beam";

/// Whether, and under which name, to register a client globally.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum GlobalOption {
	/// `true` registers under [`DEFAULT_GLOBAL_NAME`].
	Enabled(bool),
	/// Registers under the given name. An empty name disables registration.
	Named(String),
}

impl GlobalOption {
	/// The registry name, if registration is enabled.
	pub fn name(&self) -> Option<&str> {
		match self {
			GlobalOption::Enabled(true) => Some(DEFAULT_GLOBAL_NAME),
			GlobalOption::Enabled(false) => None,
			GlobalOption::Named(name) if name.is_empty() => None,
			GlobalOption::Named(name) => Some(name),
		}
	}
}

/// Caller-supplied configuration for a [`crate::Beam`] client.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct BeamConfig {
	/// Origin of the Beam server, e.g. `https://app.example.com`.
	pub base_url: Option<String>,
	/// Path of the flag endpoint.
	pub path: Option<String>,
	/// Scope used when a call does not pass one.
	pub default_scope: Option<Scope>,
	/// Extra headers sent with every flag request. These win over the
	/// client's own headers.
	pub headers: Option<BTreeMap<String, String>>,
	/// Request timeout in milliseconds. Zero disables the timeout.
	#[serde(rename = "timeout")]
	pub timeout_ms: Option<u64>,
	/// Path of the token endpoint.
	pub token_path: Option<String>,
	/// Name of the cookie the token endpoint sets.
	#[serde(alias = "tokenCookieName")]
	pub token_cookie: Option<String>,
	/// Margin, in seconds, kept before a token's expiry.
	pub clock_skew_seconds: Option<i64>,
	/// Register the client in the global registry.
	pub global: Option<GlobalOption>,
	/// Whether a cookie session is available for token acquisition. When
	/// false the token step is skipped and requests go out unauthenticated.
	pub cookie_session: Option<bool>,
}

impl BeamConfig {
	/// Creates an empty configuration; every field takes its default.
	pub fn new() -> Self {
		Self::default()
	}

	/// Loads configuration from `BEAM_*` environment variables.
	///
	/// `BEAM_BASE_URL` falls back to `SERVER_URL`. Unparseable numeric values
	/// are logged and ignored.
	pub fn from_env() -> Self {
		Self::from_lookup(|key| std::env::var(key).ok())
	}

	fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
		Self {
			base_url: lookup("BEAM_BASE_URL").or_else(|| lookup("SERVER_URL")),
			path: lookup("BEAM_PATH"),
			timeout_ms: parse_var(&lookup, "BEAM_TIMEOUT_MS"),
			token_path: lookup("BEAM_TOKEN_PATH"),
			token_cookie: lookup("BEAM_TOKEN_COOKIE"),
			clock_skew_seconds: parse_var(&lookup, "BEAM_CLOCK_SKEW_SECONDS"),
			..Self::default()
		}
	}

	pub fn base_url(mut self, url: impl Into<String>) -> Self {
		self.base_url = Some(url.into());
		self
	}

	pub fn path(mut self, path: impl Into<String>) -> Self {
		self.path = Some(path.into());
		self
	}

	pub fn default_scope(mut self, scope: Scope) -> Self {
		self.default_scope = Some(scope);
		self
	}

	/// Adds a header sent with every flag request.
	pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
		self
			.headers
			.get_or_insert_with(BTreeMap::new)
			.insert(name.into(), value.into());
		self
	}

	pub fn timeout(mut self, timeout: Duration) -> Self {
		self.timeout_ms = Some(timeout.as_millis().try_into().unwrap_or(u64::MAX));
		self
	}

	pub fn token_path(mut self, path: impl Into<String>) -> Self {
		self.token_path = Some(path.into());
		self
	}

	pub fn token_cookie(mut self, name: impl Into<String>) -> Self {
		self.token_cookie = Some(name.into());
		self
	}

	pub fn clock_skew_seconds(mut self, seconds: i64) -> Self {
		self.clock_skew_seconds = Some(seconds);
		self
	}

	/// Registers the client globally under [`DEFAULT_GLOBAL_NAME`].
	pub fn global(mut self) -> Self {
		self.global = Some(GlobalOption::Enabled(true));
		self
	}

	/// Registers the client globally under `name`.
	pub fn global_as(mut self, name: impl Into<String>) -> Self {
		self.global = Some(GlobalOption::Named(name.into()));
		self
	}

	pub fn cookie_session(mut self, enabled: bool) -> Self {
		self.cookie_session = Some(enabled);
		self
	}

	/// Applies defaults and normalization.
	pub fn resolve(self) -> ResolvedConfig {
		self.resolve_with(|key| std::env::var(key).ok())
	}

	fn resolve_with(self, lookup: impl Fn(&str) -> Option<String>) -> ResolvedConfig {
		let base_url = self
			.base_url
			.or_else(|| lookup("SERVER_URL"))
			.unwrap_or_else(|| FALLBACK_BASE_URL.to_string());

		ResolvedConfig {
			base_url: strip_trailing_slash(&base_url).to_string(),
			path: normalize_path(self.path.as_deref().unwrap_or(DEFAULT_PATH)),
			default_scope: self.default_scope,
			headers: self.headers.unwrap_or_default(),
			timeout: match self.timeout_ms.unwrap_or(DEFAULT_TIMEOUT_MS) {
				0 => None,
				ms => Some(Duration::from_millis(ms)),
			},
			token_path: normalize_path(self.token_path.as_deref().unwrap_or(DEFAULT_TOKEN_PATH)),
			token_cookie: self
				.token_cookie
				.unwrap_or_else(|| DEFAULT_TOKEN_COOKIE.to_string()),
			clock_skew_seconds: self.clock_skew_seconds.unwrap_or(DEFAULT_CLOCK_SKEW_SECONDS),
			global: self
				.global
				.as_ref()
				.and_then(GlobalOption::name)
				.map(str::to_string),
			cookie_session: self.cookie_session.unwrap_or(true),
		}
	}
}

fn parse_var<T: std::str::FromStr>(lookup: &impl Fn(&str) -> Option<String>, key: &str) -> Option<T> {
	let raw = lookup(key)?;
	match raw.trim().parse() {
		Ok(value) => Some(value),
		Err(_) => {
			warn!(key = key, value = %raw, "Ignoring unparseable environment variable");
			None
		}
	}
}

/// Fully-resolved, immutable client configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedConfig {
	/// Server origin without a trailing slash.
	pub base_url: String,
	/// Flag endpoint path: one leading slash, no trailing slash.
	pub path: String,
	pub default_scope: Option<Scope>,
	pub headers: BTreeMap<String, String>,
	/// `None` when timeouts are disabled.
	pub timeout: Option<Duration>,
	/// Token endpoint path: one leading slash, no trailing slash.
	pub token_path: String,
	pub token_cookie: String,
	pub clock_skew_seconds: i64,
	/// Global registry name, if any.
	pub global: Option<String>,
	pub cookie_session: bool,
}

impl ResolvedConfig {
	/// URL of the flag endpoint for `flag`.
	pub fn flag_url(&self, flag: &str) -> String {
		format!("{}{}/{}", self.base_url, self.path, encode_flag_name(flag))
	}

	/// URL of the token endpoint.
	pub fn token_url(&self) -> String {
		format!("{}{}", self.base_url, self.token_path)
	}
}

impl Default for ResolvedConfig {
	fn default() -> Self {
		BeamConfig::default().resolve()
	}
}
