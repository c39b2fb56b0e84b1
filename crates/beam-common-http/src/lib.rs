// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

//! Shared HTTP utilities for Beam.
//!
//! This crate provides a pre-configured HTTP client builder with a consistent
//! User-Agent header, optionally wired to a cookie session.

mod client;

pub use client::{builder, builder_with_cookies, user_agent};
