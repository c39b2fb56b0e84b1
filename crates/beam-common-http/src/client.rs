// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

//! Shared HTTP client builder with consistent User-Agent header.

use std::sync::Arc;

use reqwest::cookie::Jar;
use reqwest::ClientBuilder;

/// Creates a new HTTP client builder with the standard Beam User-Agent header.
///
/// # Example
/// ```ignore
/// let client = beam_common_http::builder()
///     .timeout(Duration::from_secs(5))
///     .build()?;
/// ```
pub fn builder() -> ClientBuilder {
	reqwest::Client::builder().user_agent(user_agent())
}

/// Creates a builder whose client stores response cookies in `jar` and
/// replays them on matching requests, the way a browser page does.
pub fn builder_with_cookies(jar: Arc<Jar>) -> ClientBuilder {
	builder().cookie_provider(jar)
}

/// Returns the standard Beam User-Agent string.
///
/// Format: `beam/{platform}/{version}`
pub fn user_agent() -> String {
	format!(
		"beam/{}-{}/{}",
		std::env::consts::OS,
		std::env::consts::ARCH,
		env!("CARGO_PKG_VERSION")
	)
}
