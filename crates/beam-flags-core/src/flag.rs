// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Flag results, scopes, and cache keys.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Arbitrary key/value context sent to the server as the request body.
///
/// Keys keep their insertion order, both on the wire and in cache keys, so
/// two scopes with the same entries inserted in a different order are cached
/// separately.
pub type Scope = serde_json::Map<String, Value>;

/// The resolved state of a single flag.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FlagResult {
	/// Name of the flag as requested.
	pub feature_flag: String,
	/// Whether the flag is active.
	pub status: bool,
	/// Value supplied by the server. Only ever set when `status` is true.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub value: Option<Value>,
}

impl FlagResult {
	/// An active result, optionally carrying a value.
	pub fn active(feature_flag: impl Into<String>, value: Option<Value>) -> Self {
		Self {
			feature_flag: feature_flag.into(),
			status: true,
			value,
		}
	}

	/// The inactive result, used both for inactive flags and as the fallback
	/// when a flag cannot be resolved.
	pub fn inactive(feature_flag: impl Into<String>) -> Self {
		Self {
			feature_flag: feature_flag.into(),
			status: false,
			value: None,
		}
	}
}

/// Derives the cache key for a flag and its effective scope.
///
/// Without a scope the key is the flag name; with one (even an empty one) it
/// is `name:` followed by the compact JSON of the scope.
pub fn cache_key(flag: &str, scope: Option<&Scope>) -> String {
	match scope {
		Some(scope) => format!("{}:{}", flag, Value::Object(scope.clone())),
		None => flag.to_string(),
	}
}
