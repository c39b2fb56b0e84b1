// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Core types for the Beam feature flags client.
//!
//! This crate holds everything about Beam flags that does not touch the
//! network: the result shape returned to callers, scopes and the cache keys
//! derived from them, normalization of the server's response body, decoding
//! of the bearer token's expiry, and the small URL and cookie helpers the
//! client needs. It is used by the async client in `beam-flags`.
//!
//! # Example
//!
//! ```
//! use beam_flags_core::{cache_key, FlagResponse, Scope};
//! use serde_json::json;
//!
//! let mut scope = Scope::new();
//! scope.insert("team".to_string(), json!("core"));
//! assert_eq!(cache_key("checkout", Some(&scope)), r#"checkout:{"team":"core"}"#);
//!
//! let response = FlagResponse::from_slice(br#"{"active": true}"#).unwrap();
//! let result = response.into_result("checkout");
//! assert!(result.status);
//! ```

pub mod cookie;
pub mod encoding;
pub mod error;
pub mod flag;
pub mod response;
pub mod token;

pub use cookie::read_cookie;
pub use encoding::{decode_cookie_value, encode_flag_name, normalize_path, strip_trailing_slash};
pub use error::{CoreError, Result};
pub use flag::{cache_key, FlagResult, Scope};
pub use response::FlagResponse;
pub use token::{decode_expiry, BearerToken};
