// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Feature flags client for Beam.
//!
//! This crate resolves feature flags against a Beam flag endpoint (as exposed
//! by a Laravel Pennant backend). Flags are evaluated by the server; the
//! client only asks, caches the answer, and keeps a bearer token fresh.
//!
//! # Features
//!
//! - **Cache-or-fetch**: results are cached per flag and scope until cleared
//! - **Never fails**: network, status, and parse errors resolve to inactive
//! - **Cookie tokens**: a JWT is obtained via a cookie set by the token
//!   endpoint and sent as a bearer token until it nears expiry
//! - **Default client**: a reconfigurable process-wide instance
//! - **Reactive bindings**: `watch`-based flag state for UI layers
//!
//! # Example
//!
//! ```ignore
//! use beam_flags::{Beam, BeamConfig, Scope};
//! use serde_json::json;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let beam = Beam::new(
//!         BeamConfig::new()
//!             .base_url("https://app.example.com")
//!             .header("X-Tenant", "acme"),
//!     )?;
//!
//!     if beam.active("new-checkout", None).await {
//!         // ...
//!     }
//!
//!     let mut scope = Scope::new();
//!     scope.insert("team".into(), json!("core"));
//!     let limit: u32 = beam.value("upload-limit", 10, Some(&scope)).await;
//!
//!     Ok(())
//! }
//! ```

mod binding;
mod cache;
mod client;
mod config;
mod cookie;
mod error;
mod global;
mod token;

pub use binding::{use_feature_flag, FlagBinding, FlagOptions, FlagSnapshot};
pub use client::Beam;
pub use config::{
	BeamConfig, GlobalOption, ResolvedConfig, DEFAULT_CLOCK_SKEW_SECONDS, DEFAULT_GLOBAL_NAME,
	DEFAULT_PATH, DEFAULT_TIMEOUT_MS, DEFAULT_TOKEN_COOKIE, DEFAULT_TOKEN_PATH, FALLBACK_BASE_URL,
};
pub use cookie::CookieSession;
pub use error::{BeamError, Result};
pub use global::{beam, beam_with, configure_beam, global_instance, set_default};
pub use token::TokenState;

// Re-export core types for convenience
pub use beam_flags_core::{cache_key, BearerToken, FlagResult, Scope};
