// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Fitness activity client.
//!
//! This crate talks to the activity-sharing REST API: it logs users in,
//! edits profiles and activities, converts API timestamps to local time
//! and back, and drives the paginated activity search.

pub mod config;
pub mod error;
pub mod models;
pub mod services;
pub mod session;
pub mod time_utils;
pub mod validation;

use config::Config;
use services::ApiClient;
use time_utils::{DateTimeConverter, LocalZone};

/// Shared client state.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub api: ApiClient,
    pub converter: DateTimeConverter,
}

impl AppState {
    /// Build the API client and date converter described by `config`.
    pub fn from_config(config: Config) -> error::Result<Self> {
        let api = ApiClient::new(&config)?;
        let converter = DateTimeConverter::new(LocalZone::from_config(config.timezone));
        Ok(Self {
            config,
            api,
            converter,
        })
    }
}
