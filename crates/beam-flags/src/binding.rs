// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Reactive flag bindings for UI layers.
//!
//! A [`FlagBinding`] tracks one flag and publishes [`FlagSnapshot`]s over a
//! `watch` channel. It fetches once when mounted, again on [`FlagBinding::refresh`],
//! and again whenever [`FlagBinding::set_deps`] is given a dependency list
//! that differs from the previous one.
//!
//! # Example
//!
//! ```ignore
//! use beam_flags::{FlagBinding, FlagOptions};
//!
//! let binding = FlagBinding::<String>::mount(
//!     beam,
//!     "ui.theme",
//!     FlagOptions::new().default_value("light".to_string()),
//!     None,
//! )
//! .await;
//!
//! let mut updates = binding.subscribe();
//! while updates.changed().await.is_ok() {
//!     let snapshot = updates.borrow().clone();
//!     render(snapshot.value, snapshot.loading);
//! }
//! ```

use std::sync::Arc;

use beam_flags_core::Scope;
use parking_lot::Mutex;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tokio::sync::watch;

use crate::client::Beam;
use crate::error::Result;

/// The observable state of a bound flag.
#[derive(Debug, Clone, PartialEq)]
pub struct FlagSnapshot<T> {
	pub feature_flag: String,
	/// The flag's value when active, else the default.
	pub value: Option<T>,
	pub status: bool,
	/// True while a fetch is in flight.
	pub loading: bool,
}

/// Options for [`FlagBinding::mount`].
#[derive(Debug, Clone)]
pub struct FlagOptions<T> {
	pub default_value: Option<T>,
	pub deps: Vec<Value>,
}

impl<T> Default for FlagOptions<T> {
	fn default() -> Self {
		Self {
			default_value: None,
			deps: Vec::new(),
		}
	}
}

impl<T> FlagOptions<T> {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn default_value(mut self, value: T) -> Self {
		self.default_value = Some(value);
		self
	}

	pub fn deps(mut self, deps: Vec<Value>) -> Self {
		self.deps = deps;
		self
	}
}

/// A single flag bound to a [`Beam`] client.
pub struct FlagBinding<T> {
	beam: Arc<Beam>,
	flag: String,
	scope: Option<Scope>,
	default_value: Option<T>,
	deps: Mutex<Vec<Value>>,
	state: watch::Sender<FlagSnapshot<T>>,
}

impl<T> FlagBinding<T>
where
	T: DeserializeOwned + Clone,
{
	/// Creates the binding and performs the initial fetch.
	pub async fn mount(beam: Arc<Beam>, flag: impl Into<String>, options: FlagOptions<T>, scope: Option<Scope>) -> Self {
		let flag = flag.into();
		let (state, _) = watch::channel(FlagSnapshot {
			feature_flag: flag.clone(),
			value: options.default_value.clone(),
			status: false,
			loading: false,
		});

		let binding = Self {
			beam,
			flag,
			scope,
			default_value: options.default_value,
			deps: Mutex::new(options.deps),
			state,
		};
		binding.refresh().await;
		binding
	}

	/// Re-resolves the flag and publishes the result.
	pub async fn refresh(&self) {
		self.state.send_modify(|s| s.loading = true);

		let result = self.beam.get(&self.flag, self.scope.as_ref()).await;
		let value = if result.status {
			result
				.value
				.filter(|v| !v.is_null())
				.and_then(|v| serde_json::from_value(v).ok())
				.or_else(|| self.default_value.clone())
		} else {
			self.default_value.clone()
		};

		self.state.send_modify(|s| {
			s.status = result.status;
			s.value = value;
			s.loading = false;
		});
	}

	/// Replaces the dependency list, refreshing if it changed. Returns
	/// whether a refresh happened.
	pub async fn set_deps(&self, deps: Vec<Value>) -> bool {
		let changed = {
			let mut current = self.deps.lock();
			if *current == deps {
				false
			} else {
				*current = deps;
				true
			}
		};

		if changed {
			self.refresh().await;
		}
		changed
	}

	/// The current state.
	pub fn snapshot(&self) -> FlagSnapshot<T> {
		self.state.borrow().clone()
	}

	/// Subscribes to state changes.
	pub fn subscribe(&self) -> watch::Receiver<FlagSnapshot<T>> {
		self.state.subscribe()
	}
}

/// Mounts a binding on the default client.
pub async fn use_feature_flag<T>(flag: impl Into<String>, options: FlagOptions<T>, scope: Option<Scope>) -> Result<FlagBinding<T>>
where
	T: DeserializeOwned + Clone,
{
	let beam = crate::global::beam()?;
	Ok(FlagBinding::mount(beam, flag, options, scope).await)
}
