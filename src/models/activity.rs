// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Activity models for the API and for editing forms.

use crate::time_utils::DateTimeConverter;
use serde::{Deserialize, Serialize};
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

/// An activity type attached to a search result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct ActivityType {
    #[serde(rename = "activityTypeId")]
    #[cfg_attr(feature = "binding-generation", ts(type = "number"))]
    pub activity_type_id: u64,
    pub name: String,
}

/// One row of an activity search page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct ActivitySummary {
    #[serde(default, alias = "activityId", skip_serializing_if = "Option::is_none")]
    #[cfg_attr(feature = "binding-generation", ts(type = "number | null"))]
    pub id: Option<u64>,
    /// Owner's first name
    #[serde(default)]
    pub firstname: String,
    /// Owner's last name
    #[serde(default)]
    pub lastname: String,
    #[serde(default, alias = "activityName")]
    pub activity_name: String,
    #[serde(default, rename = "activityTypes")]
    pub activity_types: Vec<ActivityType>,
    /// Fitness level, absent for unleveled activities
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fitness: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
}

/// Activity as stored by the API (detail, create and update payloads).
///
/// Times are API timestamps (`YYYY-MM-DDTHH:mm:ss±HHMM`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Activity {
    #[serde(default, alias = "activityId", skip_serializing_if = "Option::is_none")]
    pub id: Option<u64>,
    pub activity_name: String,
    #[serde(default)]
    pub description: Option<String>,
    /// Activity type names
    #[serde(default)]
    pub activity_type: Vec<String>,
    /// Continuous activities have no start or end
    #[serde(default)]
    pub continuous: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_time: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_time: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fitness: Option<i32>,
}

/// Activity as edited by the user, with local `YYYY-MM-DDTHH:mm` times.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ActivityForm {
    pub activity_name: String,
    pub description: Option<String>,
    pub activity_type: Vec<String>,
    pub continuous: bool,
    pub start_time: Option<String>,
    pub end_time: Option<String>,
    pub location: Option<String>,
    pub fitness: Option<i32>,
}

impl ActivityForm {
    /// Build the API payload, converting local times to API timestamps.
    ///
    /// Times are dropped for continuous activities.
    pub fn into_activity(self, converter: &DateTimeConverter) -> Activity {
        let (start_time, end_time) = if self.continuous {
            (None, None)
        } else {
            (
                self.start_time.map(|t| converter.local_to_backend(&t)),
                self.end_time.map(|t| converter.local_to_backend(&t)),
            )
        };

        Activity {
            id: None,
            activity_name: self.activity_name,
            description: self.description,
            activity_type: self.activity_type,
            continuous: self.continuous,
            start_time,
            end_time,
            location: self.location,
            fitness: self.fitness,
        }
    }
}

impl Activity {
    /// Prefill an editing form from a stored activity.
    pub fn to_form(&self, converter: &DateTimeConverter) -> ActivityForm {
        ActivityForm {
            activity_name: self.activity_name.clone(),
            description: self.description.clone(),
            activity_type: self.activity_type.clone(),
            continuous: self.continuous,
            start_time: self
                .start_time
                .as_deref()
                .map(|t| converter.backend_to_local(t)),
            end_time: self
                .end_time
                .as_deref()
                .map(|t| converter.backend_to_local(t)),
            location: self.location.clone(),
            fitness: self.fitness,
        }
    }

    /// Start and end rendered for display, if the activity has them.
    pub fn display_times(&self, converter: &DateTimeConverter) -> Option<(String, String)> {
        let start = self.start_time.as_deref()?;
        let end = self.end_time.as_deref()?;
        Some((
            converter.format_for_display(start),
            converter.format_for_display(end),
        ))
    }
}
