// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

use thiserror::Error;

/// Result type alias for core operations.
pub type Result<T> = std::result::Result<T, CoreError>;

/// Errors raised while interpreting data received from a Beam server.
#[derive(Debug, Error)]
pub enum CoreError {
	#[error("response body is not valid JSON: {0}")]
	InvalidJson(#[from] serde_json::Error),

	#[error("response body is null")]
	NullBody,

	#[error("token is not a dot-separated JWT")]
	MalformedToken,

	#[error("token payload is not valid base64url")]
	InvalidTokenEncoding,

	#[error("token payload is not a JSON object")]
	InvalidTokenPayload,

	#[error("token has no usable exp claim")]
	MissingExpiry,
}
