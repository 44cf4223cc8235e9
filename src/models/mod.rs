// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Data models exchanged with the activity API.

pub mod activity;
pub mod search;
pub mod user;

pub use activity::{Activity, ActivityForm, ActivitySummary, ActivityType};
pub use search::{ActivityPage, FitnessRange, JoinMode, SearchMode};
pub use user::{
    EmailUpdate, Gender, Location, LoginRequest, LoginResponse, PasswordUpdate, UserProfile,
};
