// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! URL path and percent-encoding helpers.

use std::borrow::Cow;

/// Removes trailing slashes from a base URL.
pub fn strip_trailing_slash(url: &str) -> &str {
	url.trim_end_matches('/')
}

/// Normalizes an endpoint path to exactly one leading slash and no trailing
/// slash. A path made only of slashes normalizes to the empty string, which
/// addresses the base URL itself.
pub fn normalize_path(path: &str) -> String {
	let trimmed = path.trim_matches('/');
	if trimmed.is_empty() {
		String::new()
	} else {
		format!("/{trimmed}")
	}
}

/// Percent-encodes a flag name for use as a single path segment.
pub fn encode_flag_name(name: &str) -> Cow<'_, str> {
	urlencoding::encode(name)
}

/// Percent-decodes a cookie value, returning it unchanged if it does not
/// decode to UTF-8.
pub fn decode_cookie_value(value: &str) -> String {
	match urlencoding::decode(value) {
		Ok(decoded) => decoded.into_owned(),
		Err(_) => value.to_string(),
	}
}
