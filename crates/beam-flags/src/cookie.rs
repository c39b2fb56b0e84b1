// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! The cookie session shared between the HTTP client and token lookup.
//!
//! A session plays the role of a browser page's cookie store: cookies the
//! server sets on any response are recorded, replayed on matching requests,
//! and can be read back by name.

use std::sync::Arc;

use beam_flags_core::read_cookie;
use reqwest::cookie::{CookieStore, Jar};
use reqwest::Url;

/// A shareable cookie store. Clones share the same cookies.
#[derive(Debug, Clone, Default)]
pub struct CookieSession {
	jar: Arc<Jar>,
}

impl CookieSession {
	/// Creates an empty session.
	pub fn new() -> Self {
		Self::default()
	}

	/// The underlying jar.
	pub fn jar(&self) -> Arc<Jar> {
		Arc::clone(&self.jar)
	}

	/// Stores a cookie as if `url` had answered with this `Set-Cookie` value.
	pub fn set_cookie(&self, set_cookie: &str, url: &Url) {
		self.jar.add_cookie_str(set_cookie, url);
	}

	/// Reads the percent-decoded value of cookie `name` as visible to `url`.
	pub fn read(&self, name: &str, url: &Url) -> Option<String> {
		let header = self.jar.cookies(url)?;
		let header = header.to_str().ok()?;
		read_cookie(header, name)
	}
}
