// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Local in-memory cache of resolved flags.
//!
//! Entries live until [`FlagCache::clear`] is called. There is no TTL and no
//! eviction.

use std::collections::HashMap;
use std::sync::Arc;

use beam_flags_core::FlagResult;
use tokio::sync::RwLock;

/// In-memory cache of flag results keyed by [`beam_flags_core::cache_key`].
///
/// Clones share the same underlying map.
#[derive(Debug, Default, Clone)]
pub(crate) struct FlagCache {
	inner: Arc<RwLock<HashMap<String, FlagResult>>>,
}

impl FlagCache {
	/// Creates a new empty cache.
	pub(crate) fn new() -> Self {
		Self::default()
	}

	/// Gets a cached result by key.
	pub(crate) async fn get(&self, key: &str) -> Option<FlagResult> {
		self.inner.read().await.get(key).cloned()
	}

	/// Stores a result, replacing any previous entry for the key.
	pub(crate) async fn insert(&self, key: impl Into<String>, result: FlagResult) {
		self.inner.write().await.insert(key.into(), result);
	}

	/// Removes every entry.
	pub(crate) async fn clear(&self) {
		self.inner.write().await.clear();
	}
}
