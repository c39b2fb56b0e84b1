// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Feature flags client for resolving flags against a Beam endpoint.

use std::sync::Arc;

use beam_flags_core::{cache_key, CoreError, FlagResponse, FlagResult, Scope};
use reqwest::header::{HeaderMap, HeaderName, HeaderValue, AUTHORIZATION, CONTENT_TYPE};
use reqwest::Client;
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use crate::cache::FlagCache;
use crate::config::{BeamConfig, ResolvedConfig};
use crate::cookie::CookieSession;
use crate::error::{BeamError, Result};
use crate::token::{TokenManager, TokenState};

const X_REQUESTED_WITH: &str = "x-requested-with";

/// Client for resolving feature flags.
///
/// Results are cached per flag and scope until [`Beam::clear_cache`] is
/// called. Resolution never fails: anything that goes wrong while fetching a
/// flag is logged and the flag reads as inactive. Failed lookups are not
/// cached, so the next call tries again.
///
/// Concurrent lookups of the same uncached key are not coalesced. Each sends
/// its own request and the last response to arrive is the one left cached.
#[derive(Debug)]
pub struct Beam {
	config: Arc<ResolvedConfig>,
	http: Client,
	cache: FlagCache,
	tokens: TokenManager,
	cookies: Option<CookieSession>,
}

impl Beam {
	/// Creates a client from `config`.
	///
	/// Unless `cookie_session` is disabled, the client gets a fresh cookie
	/// session for token acquisition. Fails only if the HTTP client cannot
	/// be constructed.
	pub fn new(config: BeamConfig) -> Result<Self> {
		let config = config.resolve();
		let session = config.cookie_session.then(CookieSession::new);
		Self::from_resolved(config, session)
	}

	/// Creates a client that shares an existing cookie session.
	pub fn with_cookie_session(config: BeamConfig, session: CookieSession) -> Result<Self> {
		let config = config.cookie_session(true).resolve();
		Self::from_resolved(config, Some(session))
	}

	fn from_resolved(config: ResolvedConfig, session: Option<CookieSession>) -> Result<Self> {
		let builder = match &session {
			Some(session) => beam_common_http::builder_with_cookies(session.jar()),
			None => beam_common_http::builder(),
		};
		let http = builder.build().map_err(BeamError::HttpClient)?;

		debug!(
			base_url = %config.base_url,
			path = %config.path,
			cookie_session = session.is_some(),
			"Beam client created"
		);

		Ok(Self {
			config: Arc::new(config),
			http,
			cache: FlagCache::new(),
			tokens: TokenManager::new(session.clone()),
			cookies: session,
		})
	}

	/// The resolved configuration.
	pub fn config(&self) -> &ResolvedConfig {
		&self.config
	}

	/// The cookie session, if the client has one.
	pub fn cookie_session(&self) -> Option<&CookieSession> {
		self.cookies.as_ref()
	}

	/// Where the bearer token currently stands.
	pub fn token_state(&self) -> TokenState {
		self.tokens.state(self.config.clock_skew_seconds)
	}

	/// Resolves a flag, from the cache when possible.
	///
	/// When `scope` is `None` the configured default scope applies.
	pub async fn get(&self, flag: &str, scope: Option<&Scope>) -> FlagResult {
		let scope = scope.or(self.config.default_scope.as_ref());
		let key = cache_key(flag, scope);

		if let Some(cached) = self.cache.get(&key).await {
			debug!(flag = flag, "Flag served from cache");
			return cached;
		}

		match self.fetch_flag(flag, scope).await {
			Ok(result) => {
				self.cache.insert(key, result.clone()).await;
				result
			}
			Err(e) => {
				warn!(
					flag = flag,
					error = %e,
					timeout = e.is_timeout(),
					"Failed to fetch flag, treating it as inactive"
				);
				FlagResult::inactive(flag)
			}
		}
	}

	/// Returns true if the flag is active.
	pub async fn active(&self, flag: &str, scope: Option<&Scope>) -> bool {
		self.get(flag, scope).await.status
	}

	/// Returns true if the flag is inactive.
	pub async fn inactive(&self, flag: &str, scope: Option<&Scope>) -> bool {
		!self.active(flag, scope).await
	}

	/// Returns the flag's value, or `default` if the flag is inactive, has no
	/// value, or its value does not deserialize into `T`.
	pub async fn value<T: DeserializeOwned>(&self, flag: &str, default: T, scope: Option<&Scope>) -> T {
		let result = self.get(flag, scope).await;
		let value = match result.value {
			Some(value) if result.status && !value.is_null() => value,
			_ => return default,
		};

		match serde_json::from_value(value) {
			Ok(value) => value,
			Err(e) => {
				warn!(flag = flag, error = %e, "Flag value has unexpected type, using default");
				default
			}
		}
	}

	/// Empties the cache.
	pub async fn clear_cache(&self) {
		self.cache.clear().await;
		debug!("Flag cache cleared");
	}

	/// Fetches a flag from the server.
	async fn fetch_flag(&self, flag: &str, scope: Option<&Scope>) -> Result<FlagResult> {
		let url = self.config.flag_url(flag);
		let empty = Scope::new();
		let body = serde_json::to_vec(scope.unwrap_or(&empty)).map_err(CoreError::from)?;

		let authorization = self.tokens.authorization(&self.http, &self.config).await;
		let headers = self.request_headers(authorization)?;

		let mut request = self.http.post(&url).headers(headers).body(body);
		if let Some(timeout) = self.config.timeout {
			request = request.timeout(timeout);
		}

		let response = request.send().await.map_err(BeamError::RequestFailed)?;

		let status = response.status();
		if !status.is_success() {
			return Err(BeamError::ServerError {
				status: status.as_u16(),
				reason: status.canonical_reason().unwrap_or_default().to_string(),
			});
		}

		let bytes = response.bytes().await.map_err(BeamError::BodyFailed)?;
		let result = FlagResponse::from_slice(&bytes)?.into_result(flag);

		debug!(flag = flag, status = result.status, "Flag fetched");
		Ok(result)
	}

	/// Builds flag request headers. Configured headers are applied last and
	/// replace any header of the same name.
	fn request_headers(&self, authorization: Option<String>) -> Result<HeaderMap> {
		let mut headers = HeaderMap::new();
		headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
		headers.insert(
			HeaderName::from_static(X_REQUESTED_WITH),
			HeaderValue::from_static("XMLHttpRequest"),
		);

		if let Some(authorization) = authorization {
			let value = HeaderValue::from_str(&authorization).map_err(|_| BeamError::InvalidHeader {
				name: AUTHORIZATION.to_string(),
			})?;
			headers.insert(AUTHORIZATION, value);
		}

		for (name, value) in &self.config.headers {
			let invalid = || BeamError::InvalidHeader { name: name.clone() };
			let header_name = HeaderName::from_bytes(name.as_bytes()).map_err(|_| invalid())?;
			let header_value = HeaderValue::from_str(value).map_err(|_| invalid())?;
			headers.insert(header_name, header_value);
		}

		Ok(headers)
	}
}
