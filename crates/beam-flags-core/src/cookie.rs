// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Reading a named cookie out of a `Cookie` header string.

use crate::encoding::decode_cookie_value;

/// Finds `name` in a `"k1=v1; k2=v2"` cookie string and returns its
/// percent-decoded value. A cookie without `=` reads as the empty string.
pub fn read_cookie(cookies: &str, name: &str) -> Option<String> {
	cookies
		.split("; ")
		.filter(|c| !c.is_empty())
		.find_map(|c| {
			let (key, value) = c.split_once('=').unwrap_or((c, ""));
			(key == name).then(|| decode_cookie_value(value))
		})
}
