// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Bearer token lifecycle.
//!
//! The token is never returned by the token endpoint directly. A GET to that
//! endpoint makes the server set a cookie, which is then read from the
//! cookie session and decoded for its expiry.

use beam_flags_core::BearerToken;
use chrono::Utc;
use parking_lot::Mutex;
use reqwest::{Client, Url};
use tracing::debug;

use crate::config::ResolvedConfig;
use crate::cookie::CookieSession;

/// Where the client's token stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenState {
	/// No usable token is held.
	NoToken,
	/// A token is held and is outside the clock-skew window of its expiry.
	Valid,
	/// A token is held but expires within the clock-skew window.
	Expired,
}

/// Holds the current token and refreshes it on demand.
#[derive(Debug)]
pub(crate) struct TokenManager {
	session: Option<CookieSession>,
	token: Mutex<Option<BearerToken>>,
}

impl TokenManager {
	pub(crate) fn new(session: Option<CookieSession>) -> Self {
		Self {
			session,
			token: Mutex::new(None),
		}
	}

	pub(crate) fn state(&self, skew_seconds: i64) -> TokenState {
		match self.token.lock().as_ref() {
			None => TokenState::NoToken,
			Some(token) if token.is_valid_at(Utc::now(), skew_seconds) => TokenState::Valid,
			Some(_) => TokenState::Expired,
		}
	}

	/// Returns the `Authorization` header value to send, refreshing the token
	/// first unless it is valid. Without a cookie session there is never a
	/// token.
	pub(crate) async fn authorization(&self, http: &Client, config: &ResolvedConfig) -> Option<String> {
		let session = self.session.as_ref()?;

		if self.state(config.clock_skew_seconds) != TokenState::Valid {
			let token = Self::refresh(session, http, config).await;
			*self.token.lock() = token;
		}

		self.token.lock().as_ref().map(BearerToken::authorization)
	}

	async fn refresh(session: &CookieSession, http: &Client, config: &ResolvedConfig) -> Option<BearerToken> {
		let token_url = config.token_url();

		let mut request = http
			.get(&token_url)
			.header("X-Requested-With", "XMLHttpRequest");
		if let Some(timeout) = config.timeout {
			request = request.timeout(timeout);
		}

		// The response itself is irrelevant; only the cookie it sets matters.
		if let Err(e) = request.send().await {
			debug!(url = %token_url, error = %e, "Token refresh request failed");
		}

		let url = match Url::parse(&token_url) {
			Ok(url) => url,
			Err(e) => {
				debug!(url = %token_url, error = %e, "Token URL is not a valid URL");
				return None;
			}
		};

		let raw = session.read(&config.token_cookie, &url)?;
		match BearerToken::parse(raw) {
			Ok(token) => {
				debug!(expires_at = %token.expires_at(), "Bearer token refreshed");
				Some(token)
			}
			Err(e) => {
				debug!(cookie = %config.token_cookie, error = %e, "Discarding unusable token cookie");
				None
			}
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use base64::engine::general_purpose::URL_SAFE_NO_PAD;
	use base64::Engine;

	fn make_token(expires_in: i64) -> BearerToken {
		let exp = Utc::now().timestamp() + expires_in;
		let payload = URL_SAFE_NO_PAD.encode(format!(r#"{{"exp":{exp}}}"#));
		BearerToken::parse(format!("h.{payload}.s")).unwrap()
	}

	#[test]
	fn starts_without_token() {
		let manager = TokenManager::new(Some(CookieSession::new()));
		assert_eq!(manager.state(30), TokenState::NoToken);
	}

	#[test]
	fn state_follows_expiry_and_skew() {
		let manager = TokenManager::new(Some(CookieSession::new()));

		*manager.token.lock() = Some(make_token(120));
		assert_eq!(manager.state(30), TokenState::Valid);

		*manager.token.lock() = Some(make_token(10));
		assert_eq!(manager.state(30), TokenState::Expired);
		assert_eq!(manager.state(0), TokenState::Valid);
	}

	#[tokio::test]
	async fn no_session_means_no_authorization() {
		let manager = TokenManager::new(None);
		let http = Client::new();
		let config = ResolvedConfig::default();

		assert_eq!(manager.authorization(&http, &config).await, None);
	}

	#[tokio::test]
	async fn valid_token_is_used_without_refresh() {
		let manager = TokenManager::new(Some(CookieSession::new()));
		let token = make_token(300);
		*manager.token.lock() = Some(token.clone());

		// Port 9 is discard; a refresh attempt would fail and clear the token.
		let config = crate::BeamConfig::new()
			.base_url("http://127.0.0.1:9")
			.resolve();
		let auth = manager.authorization(&Client::new(), &config).await;

		assert_eq!(auth, Some(token.authorization()));
	}
}
