// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Normalization of flag endpoint responses.
//!
//! Servers answer with one of two shapes. Current servers send a boolean
//! `status`; older ones send `active`, which is read for truthiness. Both map
//! onto [`FlagResult`]:
//!
//! | `status` field  | `active` field       | `FlagResult::status` |
//! |-----------------|----------------------|----------------------|
//! | boolean `b`     | ignored              | `b`                  |
//! | absent/non-bool | truthy               | `true`               |
//! | absent/non-bool | falsy or absent      | `false`              |
//!
//! In every case `value` is carried through only when the flag is active and
//! the field is present. A body that is JSON `null` is rejected; any other
//! non-object body resolves to inactive.

use serde_json::Value;

use crate::error::{CoreError, Result};
use crate::flag::FlagResult;

/// A flag response body, classified by which status field it uses.
#[derive(Debug, Clone, PartialEq)]
pub enum FlagResponse {
	/// `{ "status": bool, "value"?: any }`
	Status { status: bool, value: Option<Value> },
	/// `{ "active": any, "value"?: any }`
	Legacy { active: bool, value: Option<Value> },
}

impl FlagResponse {
	/// Parses and classifies a raw response body.
	pub fn from_slice(body: &[u8]) -> Result<Self> {
		let json: Value = serde_json::from_slice(body)?;
		Self::from_json(json)
	}

	/// Classifies an already-parsed response body.
	pub fn from_json(body: Value) -> Result<Self> {
		let mut fields = match body {
			Value::Null => return Err(CoreError::NullBody),
			Value::Object(fields) => fields,
			_ => {
				return Ok(FlagResponse::Legacy {
					active: false,
					value: None,
				})
			}
		};

		let value = fields.remove("value");
		match fields.get("status") {
			Some(Value::Bool(status)) => Ok(FlagResponse::Status {
				status: *status,
				value,
			}),
			_ => Ok(FlagResponse::Legacy {
				active: fields.get("active").is_some_and(is_truthy),
				value,
			}),
		}
	}

	/// Converts into the canonical result for `feature_flag`.
	pub fn into_result(self, feature_flag: &str) -> FlagResult {
		let (active, value) = match self {
			FlagResponse::Status { status, value } => (status, value),
			FlagResponse::Legacy { active, value } => (active, value),
		};

		if active {
			FlagResult::active(feature_flag, value)
		} else {
			FlagResult::inactive(feature_flag)
		}
	}
}

fn is_truthy(value: &Value) -> bool {
	match value {
		Value::Null => false,
		Value::Bool(b) => *b,
		Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
		Value::String(s) => !s.is_empty(),
		Value::Array(_) | Value::Object(_) => true,
	}
}
