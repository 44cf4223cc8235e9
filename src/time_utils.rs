// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Conversion between API timestamps and local, user-facing times.
//!
//! The API speaks `YYYY-MM-DDTHH:mm:ss±HHMM`. Date/time inputs edit
//! `YYYY-MM-DDTHH:mm` in the user's zone, and lists show
//! `Ddd, DD Mon YYYY hh:mm AM/PM`. Offsets are always taken from the zone
//! rules in force at the instant being converted, so daylight saving is
//! honoured per date rather than per "now".
//!
//! None of the conversions fail. Input that cannot be parsed, even after
//! toggling a trailing `Z`, is replaced by the current time.

use chrono::{DateTime, Duration, FixedOffset, Local, NaiveDateTime, TimeZone, Timelike, Utc};
use chrono_tz::Tz;
use std::ops::Add;
use std::sync::Arc;

/// Format consumed by date/time editing controls.
pub const EDITABLE_FORMAT: &str = "%Y-%m-%dT%H:%M";
/// Format sent to the API (seconds always `00`).
pub const BACKEND_FORMAT: &str = "%Y-%m-%dT%H:%M:00%z";
/// Human-readable format with a 12-hour clock.
pub const DISPLAY_FORMAT: &str = "%a, %d %b %Y %I:%M %p";

const ZONE_MARKER: char = 'Z';
const OFFSET_FORMATS: [&str; 2] = ["%Y-%m-%dT%H:%M:%S%.f%z", "%Y-%m-%dT%H:%M%z"];
const NAIVE_FORMATS: [&str; 2] = ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M"];

/// Source of the current instant.
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

/// Wall clock of the machine.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Clock pinned to a single instant.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub DateTime<Utc>);

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}

/// The zone that "local" time refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LocalZone {
    /// The machine's configured zone.
    #[default]
    System,
    /// An explicit IANA zone.
    Named(Tz),
}

impl LocalZone {
    pub fn from_config(timezone: Option<Tz>) -> Self {
        timezone.map_or(LocalZone::System, LocalZone::Named)
    }

    /// Express an instant in this zone.
    pub fn localize(&self, instant: DateTime<Utc>) -> DateTime<FixedOffset> {
        match self {
            LocalZone::System => instant.with_timezone(&Local).fixed_offset(),
            LocalZone::Named(tz) => instant.with_timezone(tz).fixed_offset(),
        }
    }

    /// Resolve a wall-clock reading in this zone to an instant.
    ///
    /// Repeated readings (clocks going back) resolve to the earlier instant.
    /// Readings that fall in a gap (clocks going forward) are moved one hour
    /// later.
    pub fn resolve_wall_clock(&self, wall: NaiveDateTime) -> Option<DateTime<FixedOffset>> {
        self.resolve_exact(wall).or_else(|| {
            let shifted = wall.checked_add_signed(Duration::hours(1))?;
            self.resolve_exact(shifted)
        })
    }

    fn resolve_exact(&self, wall: NaiveDateTime) -> Option<DateTime<FixedOffset>> {
        match self {
            LocalZone::System => Local
                .from_local_datetime(&wall)
                .earliest()
                .map(|dt| dt.fixed_offset()),
            LocalZone::Named(tz) => tz
                .from_local_datetime(&wall)
                .earliest()
                .map(|dt| dt.fixed_offset()),
        }
    }
}

/// Converts timestamps between the API form and the local forms.
#[derive(Clone)]
pub struct DateTimeConverter {
    zone: LocalZone,
    clock: Arc<dyn Clock>,
}

impl Default for DateTimeConverter {
    fn default() -> Self {
        Self::new(LocalZone::System)
    }
}

impl DateTimeConverter {
    pub fn new(zone: LocalZone) -> Self {
        Self::with_clock(zone, Arc::new(SystemClock))
    }

    pub fn with_clock(zone: LocalZone, clock: Arc<dyn Clock>) -> Self {
        Self { zone, clock }
    }

    pub fn zone(&self) -> LocalZone {
        self.zone
    }

    /// `"1997-02-11T09:00:00+0000"` -> `"1997-02-11T22:00"` (in Auckland).
    pub fn backend_to_local(&self, raw: &str) -> String {
        match parse_backend(raw) {
            Some(instant) => self.format_local(instant, EDITABLE_FORMAT),
            None => self.malformed_fallback(raw, EDITABLE_FORMAT),
        }
    }

    /// `"1997-02-11T21:00"` -> `"1997-02-11T21:00:00+1300"` (in Auckland).
    pub fn local_to_backend(&self, raw: &str) -> String {
        match self.parse_wall_clock(raw) {
            Some(instant) => self.format_local(instant, BACKEND_FORMAT),
            None => self.malformed_fallback(raw, BACKEND_FORMAT),
        }
    }

    /// `"2020-07-15T09:00:00+0000"` -> `"Wed, 15 Jul 2020 09:00 PM"` (in Auckland).
    pub fn format_for_display(&self, raw: &str) -> String {
        match parse_backend(raw) {
            Some(instant) => self.format_local(instant, DISPLAY_FORMAT),
            None => self.malformed_fallback(raw, DISPLAY_FORMAT),
        }
    }

    pub fn current_backend_timestamp(&self) -> String {
        self.format_local(self.clock.now(), BACKEND_FORMAT)
    }

    pub fn current_frontend_timestamp(&self) -> String {
        self.format_local(self.clock.now(), EDITABLE_FORMAT)
    }

    /// Read `raw` as a local wall-clock time. If that fails, the `Z`-toggled
    /// form is tried as a wall-clock time and then as an explicit instant.
    fn parse_wall_clock(&self, raw: &str) -> Option<DateTime<Utc>> {
        self.resolve_local(raw).or_else(|| {
            let toggled = toggle_zone_marker(raw);
            self.resolve_local(&toggled).or_else(|| parse_offset_aware(&toggled))
        })
    }

    fn resolve_local(&self, raw: &str) -> Option<DateTime<Utc>> {
        with_end_of_day(raw, parse_naive)
            .and_then(|wall| self.zone.resolve_wall_clock(wall))
            .map(|dt| dt.with_timezone(&Utc))
    }

    fn format_local(&self, instant: DateTime<Utc>, format: &str) -> String {
        self.zone.localize(instant).format(format).to_string()
    }

    /// Every unparsable input ends up here: it is answered with "now" in the
    /// requested format instead of an error.
    fn malformed_fallback(&self, raw: &str, format: &str) -> String {
        tracing::warn!(input = raw, "Unparsable timestamp, substituting current time");
        self.format_local(self.clock.now(), format)
    }
}

/// Parse an API timestamp, retrying once with the trailing `Z` toggled.
pub fn parse_backend(raw: &str) -> Option<DateTime<Utc>> {
    parse_offset_aware(raw).or_else(|| parse_offset_aware(&toggle_zone_marker(raw)))
}

fn parse_offset_aware(raw: &str) -> Option<DateTime<Utc>> {
    with_end_of_day(raw, parse_instant).map(|dt| dt.with_timezone(&Utc))
}

fn parse_instant(raw: &str) -> Option<DateTime<FixedOffset>> {
    // A trailing `Z` marks UTC, unless an explicit offset precedes it
    let raw = match raw.strip_suffix(ZONE_MARKER) {
        Some(stripped) => {
            if let Some(naive) = parse_naive(stripped) {
                return Some(naive.and_utc().fixed_offset());
            }
            stripped
        }
        None => raw,
    };
    OFFSET_FORMATS
        .iter()
        .find_map(|format| DateTime::parse_from_str(raw, format).ok())
}

fn parse_naive(raw: &str) -> Option<NaiveDateTime> {
    NAIVE_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(raw, format).ok())
}

fn toggle_zone_marker(raw: &str) -> String {
    match raw.strip_suffix(ZONE_MARKER) {
        Some(stripped) => stripped.to_string(),
        None => format!("{}{}", raw, ZONE_MARKER),
    }
}

/// Accept `T24:00[:00]` as the midnight that ends the given day.
fn with_end_of_day<T>(raw: &str, parse: fn(&str) -> Option<T>) -> Option<T>
where
    T: Timelike + Add<Duration, Output = T>,
{
    if let Some(parsed) = parse(raw) {
        return Some(parsed);
    }
    if raw.get(11..13) != Some("24") {
        return None;
    }

    let rolled = format!("{}00{}", &raw[..11], &raw[13..]);
    let midnight = parse(&rolled)?;
    (midnight.minute() == 0 && midnight.second() == 0 && midnight.nanosecond() == 0)
        .then(|| midnight + Duration::days(1))
}
