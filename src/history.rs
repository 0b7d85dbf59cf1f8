//! Patient history view — date-bucketed record index and calendar matrix.
//!
//! Groups the four per-patient history collections (symptom logs, adherence
//! events, appointments, calendar entries) by calendar day and lays a month
//! out as a Sunday-first grid of cells, each annotated with the day's peak
//! severity, medication status, and event presence. Everything here is a
//! pure function of its inputs; callers rebuild the structures per request.

use std::collections::HashMap;

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::models::PatientHistory;

// ── Types ──────────────────────────────────────────────────────────────────

/// All records that fall on one calendar day.
///
/// Days with no records are never stored in the index; `lookup_day`
/// synthesizes an empty bucket for them instead.
#[derive(Debug, Clone, Default, Serialize)]
pub struct DayBucket {
    pub symptoms: Vec<crate::models::SymptomLog>,
    pub adherence: Vec<crate::models::AdherenceLog>,
    pub appointments: Vec<crate::models::Appointment>,
    pub calendar: Vec<crate::models::CalendarEvent>,
}

impl DayBucket {
    pub fn is_empty(&self) -> bool {
        self.symptoms.is_empty()
            && self.adherence.is_empty()
            && self.appointments.is_empty()
            && self.calendar.is_empty()
    }
}

/// Medication outcome for one day of the calendar grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MedicationStatus {
    /// No adherence events logged that day.
    None,
    /// At least one dose logged, all taken.
    AllTaken,
    /// At least one logged dose was missed.
    SomeMissed,
}

/// One day cell of the month grid. Padding slots before day 1 and after
/// the last day are represented as `None` in the matrix itself.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalendarCell {
    pub day: u32,
    /// Peak symptom severity logged that day, 0 when nothing was logged.
    pub max_severity: u8,
    pub medication: MedicationStatus,
    pub has_event: bool,
}

/// Discrete heat band derived from a 0–10 severity score.
/// Drives cell coloring; `High` and `Severe` also flip the cell to
/// light-on-dark text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SeverityBand {
    None,
    Low,
    Mid,
    High,
    Severe,
}

impl SeverityBand {
    /// Whether a cell in this band renders light text on a dark fill.
    pub fn light_text(&self) -> bool {
        matches!(self, Self::High | Self::Severe)
    }
}

/// Date-keyed index over one patient's history records.
pub type DateIndex = HashMap<String, DayBucket>;

// ── Date keys ──────────────────────────────────────────────────────────────

/// Derive the `YYYY-MM-DD` bucket key from a stored timestamp string.
///
/// Takes the date-only prefix and verifies it parses as a civil date; no
/// timezone conversion happens here — records bucket under the date their
/// writer embedded in the string. Returns `None` for anything shorter than
/// a full date or not date-shaped.
pub fn date_key(timestamp: &str) -> Option<&str> {
    let prefix = timestamp.get(0..10)?;
    NaiveDate::parse_from_str(prefix, "%Y-%m-%d").ok()?;
    Some(prefix)
}

fn day_key(year: i32, month0: i32, day: u32) -> String {
    format!("{:04}-{:02}-{:02}", year, month0 + 1, day)
}

// ── Index construction ─────────────────────────────────────────────────────

/// Partition every record into a per-day bucket keyed by its date.
///
/// Records without a parseable date prefix are dropped silently. Input
/// order is preserved within a bucket.
pub fn build_date_index(history: &PatientHistory) -> DateIndex {
    let mut index = DateIndex::new();

    for log in &history.symptom_logs {
        if let Some(key) = date_key(&log.logged_at) {
            index.entry(key.to_string()).or_default().symptoms.push(log.clone());
        }
    }
    for event in &history.adherence {
        if let Some(key) = date_key(&event.logged_date) {
            index.entry(key.to_string()).or_default().adherence.push(event.clone());
        }
    }
    for appt in &history.appointments {
        if let Some(key) = date_key(&appt.scheduled_at) {
            index.entry(key.to_string()).or_default().appointments.push(appt.clone());
        }
    }
    for entry in &history.calendar {
        if let Some(key) = date_key(&entry.event_at) {
            index.entry(key.to_string()).or_default().calendar.push(entry.clone());
        }
    }

    index
}

/// Fetch the bucket for a (year, month, day), or an empty one.
///
/// `month0` is zero-based (0 = January) to match the grid builder. Never
/// fails: unknown dates simply have nothing logged.
pub fn lookup_day(index: &DateIndex, year: i32, month0: i32, day: u32) -> DayBucket {
    index.get(&day_key(year, month0, day)).cloned().unwrap_or_default()
}

// ── Month matrix ───────────────────────────────────────────────────────────

fn is_leap_year(year: i32) -> bool {
    (year % 4 == 0 && year % 100 != 0) || year % 400 == 0
}

/// Number of days in a month. `month1` is 1-based.
fn days_in_month(year: i32, month1: u32) -> u32 {
    match month1 {
        4 | 6 | 9 | 11 => 30,
        2 => {
            if is_leap_year(year) {
                29
            } else {
                28
            }
        }
        _ => 31,
    }
}

/// Build the Sunday-first month grid for (year, month0).
///
/// `month0` is zero-based; values outside 0–11 clamp rather than crash.
/// The result is front-padded with `None` so day 1 lands in its weekday
/// column, then back-padded to full weeks — length is always a multiple
/// of 7 with exactly `days_in_month` populated cells in day order.
pub fn build_month_matrix(
    index: &DateIndex,
    year: i32,
    month0: i32,
) -> Vec<Option<CalendarCell>> {
    let month0 = month0.clamp(0, 11);
    let month1 = (month0 + 1) as u32;

    let Some(first) = NaiveDate::from_ymd_opt(year, month1, 1) else {
        // Year outside chrono's range; nothing sensible to draw.
        return Vec::new();
    };

    let lead = first.weekday().num_days_from_sunday() as usize;
    let days = days_in_month(year, month1);

    let mut matrix: Vec<Option<CalendarCell>> = Vec::with_capacity(42);
    matrix.resize(lead, None);

    for day in 1..=days {
        let bucket = lookup_day(index, year, month0, day);
        matrix.push(Some(CalendarCell {
            day,
            max_severity: bucket.symptoms.iter().map(|s| s.severity).max().unwrap_or(0),
            medication: medication_status(&bucket),
            has_event: !bucket.appointments.is_empty() || !bucket.calendar.is_empty(),
        }));
    }

    while matrix.len() % 7 != 0 {
        matrix.push(None);
    }

    matrix
}

fn medication_status(bucket: &DayBucket) -> MedicationStatus {
    if bucket.adherence.iter().any(|a| !a.taken) {
        MedicationStatus::SomeMissed
    } else if !bucket.adherence.is_empty() {
        MedicationStatus::AllTaken
    } else {
        MedicationStatus::None
    }
}

// ── Severity bands ─────────────────────────────────────────────────────────

/// Map a severity score onto its heat band. Total over all integers:
/// negatives clamp to `None`, anything past 10 stays `Severe`.
pub fn severity_color_class(severity: i32) -> SeverityBand {
    match severity {
        i32::MIN..=0 => SeverityBand::None,
        1..=2 => SeverityBand::Low,
        3..=4 => SeverityBand::Mid,
        5..=6 => SeverityBand::High,
        _ => SeverityBand::Severe,
    }
}

// ── Month navigation ───────────────────────────────────────────────────────

/// Shift a (year, month0) pair by `delta` months, carrying across year
/// boundaries. The year is unbounded in both directions.
pub fn shift_month(year: i32, month0: i32, delta: i32) -> (i32, i32) {
    let total = year * 12 + month0 + delta;
    (total.div_euclid(12), total.rem_euclid(12))
}

// ── Tests ──────────────────────────────────────────────────────────────────
