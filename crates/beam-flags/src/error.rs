// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Error types for the Beam flags client.
//!
//! Only [`BeamError::HttpClient`] ever reaches callers of the public API, at
//! construction time. Every other variant is produced at the internal fetch
//! boundary and collapsed into an inactive flag by [`crate::Beam::get`].

use thiserror::Error;

/// Result type alias for the flags client.
pub type Result<T> = std::result::Result<T, BeamError>;

/// Errors that can occur in the Beam flags client.
#[derive(Error, Debug)]
pub enum BeamError {
	/// The HTTP client could not be constructed.
	#[error("Failed to build HTTP client: {0}")]
	HttpClient(#[source] reqwest::Error),

	/// The request could not be sent or timed out.
	#[error("HTTP request failed: {0}")]
	RequestFailed(#[source] reqwest::Error),

	/// The server answered with a non-success status.
	#[error("Server returned an error: {status} - {reason}")]
	ServerError {
		/// HTTP status code.
		status: u16,
		/// Canonical reason phrase for the status.
		reason: String,
	},

	/// The response body could not be read.
	#[error("Failed to read response body: {0}")]
	BodyFailed(#[source] reqwest::Error),

	/// The response body could not be interpreted.
	#[error("Failed to parse server response: {0}")]
	ParseFailed(#[from] beam_flags_core::CoreError),

	/// A configured header name or value is not valid HTTP.
	#[error("Invalid header: {name}")]
	InvalidHeader {
		/// The offending header name.
		name: String,
	},
}

impl BeamError {
	/// Returns true if the request was aborted by the configured timeout.
	pub fn is_timeout(&self) -> bool {
		match self {
			BeamError::RequestFailed(e) | BeamError::BodyFailed(e) => e.is_timeout(),
			_ => false,
		}
	}
}
