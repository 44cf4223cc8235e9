// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use fitness_client::error::{AppError, Result};
use fitness_client::models::{ActivityPage, ActivitySummary, ActivityType, JoinMode};
use fitness_client::services::ActivityQueryService;
use fitness_client::time_utils::{DateTimeConverter, FixedClock, LocalZone};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

#[allow(dead_code)]
pub const PAGE_SIZE: u32 = 5;

/// One call received by the recording service.
#[allow(dead_code)]
#[derive(Debug, Clone, PartialEq)]
pub enum RecordedCall {
    Title {
        terms: Vec<String>,
        fitness_min: i32,
        fitness_max: i32,
        page_offset: u32,
    },
    Type {
        types: Vec<String>,
        join_mode: String,
        fitness_min: i32,
        fitness_max: i32,
        page_offset: u32,
    },
}

/// Query service that records calls and serves pages of a fixed result set.
#[allow(dead_code)]
#[derive(Clone)]
pub struct RecordingQueryService {
    pub calls: Arc<Mutex<Vec<RecordedCall>>>,
    rows: Vec<ActivitySummary>,
    fail: Arc<AtomicBool>,
}

#[allow(dead_code)]
impl RecordingQueryService {
    pub fn new(rows: Vec<ActivitySummary>) -> Self {
        Self {
            calls: Arc::new(Mutex::new(Vec::new())),
            rows,
            fail: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Make every following call fail with an HTTP 500.
    pub fn set_failing(&self, fail: bool) {
        self.fail.store(fail, Ordering::SeqCst);
    }

    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().unwrap().clone()
    }

    fn page(&self, call: RecordedCall, page_offset: u32) -> Result<ActivityPage> {
        self.calls.lock().unwrap().push(call);
        if self.fail.load(Ordering::SeqCst) {
            return Err(AppError::Api(
                "HTTP 500 Internal Server Error: boom".to_string(),
            ));
        }

        let start = (page_offset * PAGE_SIZE) as usize;
        let items = self
            .rows
            .iter()
            .skip(start)
            .take(PAGE_SIZE as usize)
            .cloned()
            .collect();

        Ok(ActivityPage {
            items,
            total_rows: self.rows.len() as u64,
        })
    }
}

#[async_trait]
impl ActivityQueryService for RecordingQueryService {
    async fn query_by_title(
        &self,
        terms: &[String],
        fitness_min: i32,
        fitness_max: i32,
        page_offset: u32,
    ) -> Result<ActivityPage> {
        let call = RecordedCall::Title {
            terms: terms.to_vec(),
            fitness_min,
            fitness_max,
            page_offset,
        };
        self.page(call, page_offset)
    }

    async fn query_by_type(
        &self,
        types: &[String],
        join_mode: JoinMode,
        fitness_min: i32,
        fitness_max: i32,
        page_offset: u32,
    ) -> Result<ActivityPage> {
        let call = RecordedCall::Type {
            types: types.to_vec(),
            join_mode: join_mode.as_str().to_string(),
            fitness_min,
            fitness_max,
            page_offset,
        };
        self.page(call, page_offset)
    }
}

#[allow(dead_code)]
fn summary(firstname: &str, lastname: &str, name: &str, types: &[(u64, &str)]) -> ActivitySummary {
    ActivitySummary {
        id: None,
        firstname: firstname.to_string(),
        lastname: lastname.to_string(),
        activity_name: name.to_string(),
        activity_types: types
            .iter()
            .map(|(id, name)| ActivityType {
                activity_type_id: *id,
                name: name.to_string(),
            })
            .collect(),
        fitness: None,
        location: None,
    }
}

/// Six search results, enough for two pages of five.
#[allow(dead_code)]
pub fn search_rows() -> Vec<ActivitySummary> {
    vec![
        summary("DJ", "Roomba", "Morning Ride", &[(12, "Biking"), (34, "Hiking")]),
        summary("Akira", "Kurosawa", "Evening Rides", &[(12, "Biking"), (34, "Hiking")]),
        summary("Samantha", "Saliva", "lmao", &[(7, "Athletics"), (34, "Hiking")]),
        summary("Manny", "Mannamynamo", "idk", &[(12, "Biking")]),
        summary("Jenny", "Mariam", "Another", &[(12, "Biking")]),
        summary(
            "Mary",
            "Sidoarjo",
            "Another Another Kaikoura Coast Track race",
            &[(34, "Hiking")],
        ),
    ]
}

/// Converter for New Zealand time (NZST +12, NZDT +13) with a pinned clock.
#[allow(dead_code)]
pub fn auckland_converter(now: DateTime<Utc>) -> DateTimeConverter {
    DateTimeConverter::with_clock(
        LocalZone::Named(chrono_tz::Pacific::Auckland),
        Arc::new(FixedClock(now)),
    )
}
