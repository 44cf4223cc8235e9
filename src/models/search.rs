// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Activity search parameters and results.

use crate::models::ActivitySummary;
use serde::{Deserialize, Serialize};

/// Which query the search runs. Exactly one is active at a time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchMode {
    /// Keyword search over activity titles.
    ByTitle,
    /// Search by activity type names.
    ByActivityType,
}

/// How several activity types are combined.
///
/// The search form always asks for all types (`And`). The API also answers
/// any-of queries, which [`ActivityQueryService::query_by_type`] callers can
/// request with `Or`.
///
/// [`ActivityQueryService::query_by_type`]: crate::services::ActivityQueryService::query_by_type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum JoinMode {
    And,
    Or,
}

impl JoinMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            JoinMode::And => "and",
            JoinMode::Or => "or",
        }
    }
}

/// Inclusive fitness level bounds. A minimum of `-1` means unbounded below.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FitnessRange {
    pub min: i32,
    pub max: i32,
}

impl FitnessRange {
    pub const UNBOUNDED_MIN: i32 = -1;
    pub const HIGHEST_LEVEL: i32 = 4;

    pub fn new(min: i32, max: i32) -> Self {
        Self { min, max }
    }
}

impl Default for FitnessRange {
    fn default() -> Self {
        Self {
            min: Self::UNBOUNDED_MIN,
            max: Self::HIGHEST_LEVEL,
        }
    }
}

/// One page of search results plus the server's total row count.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ActivityPage {
    pub items: Vec<ActivitySummary>,
    pub total_rows: u64,
}
