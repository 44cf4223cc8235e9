// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Services module - API access and search coordination.

pub mod api;
pub mod search;

pub use api::ApiClient;
pub use search::{ActivityQueryService, ActivitySearch, PageQuery, PageRequest};
