// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Bearer tokens and their expiry.
//!
//! The client never verifies token signatures; it only needs the `exp` claim
//! to decide when to ask the server for a fresh token.

use base64::alphabet;
use base64::engine::general_purpose::{GeneralPurpose, GeneralPurposeConfig};
use base64::engine::DecodePaddingMode;
use base64::Engine;
use chrono::{DateTime, Utc};
use serde_json::Value;

use crate::error::{CoreError, Result};

/// Accepts padded or unpadded input and tolerates non-canonical trailing bits.
const LENIENT_BASE64: GeneralPurpose = GeneralPurpose::new(
	&alphabet::STANDARD,
	GeneralPurposeConfig::new()
		.with_decode_padding_mode(DecodePaddingMode::Indifferent)
		.with_decode_allow_trailing_bits(true),
);

/// A JWT-shaped bearer token with a decoded expiry.
#[derive(Clone, PartialEq, Eq)]
pub struct BearerToken {
	raw: String,
	expires_at: DateTime<Utc>,
}

impl BearerToken {
	/// Parses a token, failing if its expiry cannot be read.
	pub fn parse(raw: impl Into<String>) -> Result<Self> {
		let raw = raw.into();
		let expires_at = decode_expiry(&raw)?;
		Ok(Self { raw, expires_at })
	}

	/// The token exactly as received.
	pub fn as_str(&self) -> &str {
		&self.raw
	}

	/// When the token expires.
	pub fn expires_at(&self) -> DateTime<Utc> {
		self.expires_at
	}

	/// Whether the token is still usable at `now`, keeping `skew_seconds`
	/// of margin before expiry. `now` is truncated to whole seconds.
	pub fn is_valid_at(&self, now: DateTime<Utc>, skew_seconds: i64) -> bool {
		let threshold_ms = now.timestamp().saturating_add(skew_seconds).saturating_mul(1000);
		threshold_ms < self.expires_at.timestamp_millis()
	}

	/// The `Authorization` header value for this token.
	pub fn authorization(&self) -> String {
		format!("Bearer {}", self.raw)
	}
}

impl std::fmt::Debug for BearerToken {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("BearerToken")
			.field("raw", &"[REDACTED]")
			.field("expires_at", &self.expires_at)
			.finish()
	}
}

/// Reads the `exp` claim (seconds since the epoch) from the payload segment
/// of a dot-separated token.
///
/// A zero `exp` counts as missing. An `exp` beyond the representable range
/// clamps to the nearest bound.
pub fn decode_expiry(token: &str) -> Result<DateTime<Utc>> {
	let payload = token.split('.').nth(1).ok_or(CoreError::MalformedToken)?;

	let base64 = payload.replace('-', "+").replace('_', "/");
	let bytes = LENIENT_BASE64
		.decode(base64.trim_end_matches('='))
		.map_err(|_| CoreError::InvalidTokenEncoding)?;
	let json = String::from_utf8(bytes).map_err(|_| CoreError::InvalidTokenEncoding)?;

	let claims: Value =
		serde_json::from_str(&json).map_err(|_| CoreError::InvalidTokenPayload)?;
	let exp = claims
		.get("exp")
		.and_then(Value::as_f64)
		.filter(|exp| *exp != 0.0)
		.ok_or(CoreError::MissingExpiry)?;

	let millis = (exp * 1000.0).round() as i64;
	Ok(DateTime::from_timestamp_millis(millis).unwrap_or(if exp > 0.0 {
		DateTime::<Utc>::MAX_UTC
	} else {
		DateTime::<Utc>::MIN_UTC
	}))
}
