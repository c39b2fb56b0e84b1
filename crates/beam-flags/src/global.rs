// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! The process-wide default client and named global clients.
//!
//! Code that holds an `Arc<Beam>` should pass it around explicitly. These
//! functions exist for callers that want one shared, reconfigurable default.

use std::collections::HashMap;
use std::sync::{Arc, LazyLock};

use parking_lot::{const_rwlock, RwLock};
use tracing::info;

use crate::client::Beam;
use crate::config::BeamConfig;
use crate::error::Result;

static DEFAULT: RwLock<Option<Arc<Beam>>> = const_rwlock(None);

static NAMED: LazyLock<RwLock<HashMap<String, Arc<Beam>>>> =
	LazyLock::new(|| RwLock::new(HashMap::new()));

fn create(config: BeamConfig) -> Result<Arc<Beam>> {
	let beam = Arc::new(Beam::new(config)?);
	if let Some(name) = beam.config().global.clone() {
		info!(name = %name, "Registering global Beam client");
		NAMED.write().insert(name, Arc::clone(&beam));
	}
	Ok(beam)
}

/// Replaces the default client with one built from `config`.
///
/// Each call fully replaces the previous configuration. The replaced client
/// keeps working for anyone still holding it.
pub fn configure_beam(config: BeamConfig) -> Result<()> {
	beam_with(config).map(|_| ())
}

/// Replaces the default client with one built from `config` and returns it.
pub fn beam_with(config: BeamConfig) -> Result<Arc<Beam>> {
	let beam = create(config)?;
	*DEFAULT.write() = Some(Arc::clone(&beam));
	Ok(beam)
}

/// Returns the default client, creating it with default configuration on
/// first use.
pub fn beam() -> Result<Arc<Beam>> {
	if let Some(beam) = DEFAULT.read().as_ref() {
		return Ok(Arc::clone(beam));
	}

	let mut default = DEFAULT.write();
	match default.as_ref() {
		Some(beam) => Ok(Arc::clone(beam)),
		None => {
			let beam = create(BeamConfig::default())?;
			*default = Some(Arc::clone(&beam));
			Ok(beam)
		}
	}
}

/// Installs an already-built client as the default.
pub fn set_default(beam: Arc<Beam>) {
	*DEFAULT.write() = Some(beam);
}

/// Returns the client registered under `name` via the `global` option.
pub fn global_instance(name: &str) -> Option<Arc<Beam>> {
	NAMED.read().get(name).cloned()
}
