//! Dashboard metrics computed from one patient's history.
//!
//! Everything the physician dashboard charts: flare days and adherence over
//! the trailing 30 days, an actionable trend callout, and the four weekly /
//! per-day series. Pure functions of (history, today) — the API layer passes
//! the current UTC date so these stay deterministic under test.

use std::collections::{BTreeMap, BTreeSet, HashSet};

use chrono::{Duration, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::history::date_key;
use crate::models::PatientHistory;

/// Severity scores strictly above this count as a flare day.
pub const FLARE_THRESHOLD: u8 = 4;

/// How many weekly buckets the dashboard charts show.
const WEEKS_SHOWN: usize = 4;

/// How many daily points the severity trend line shows.
const TREND_POINTS: usize = 14;

// ── Types ──────────────────────────────────────────────────────────────────

/// Headline numbers for the dashboard insight cards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Insights {
    /// Distinct days in the trailing 30 with any severity above threshold.
    pub flare_days: u32,
    /// Percentage of doses taken in the trailing 30 days, 0 when none logged.
    pub adherence_pct: u32,
    /// Headline of the actionable-trend card ("↑ Breathing" or "Stable").
    pub actionable_val: String,
    /// Secondary line of the actionable-trend card.
    pub actionable_sub: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeeklyAdherence {
    pub week: String,
    pub adherence: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeeklyFlareDays {
    pub week: String,
    pub flare_days: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeeklyFrequency {
    pub week: String,
    pub count: u32,
}

/// One point of the severity trend line — peak severity for one day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeverityPoint {
    /// Display label, e.g. "Feb 25".
    pub date: String,
    pub severity: u8,
}

/// Everything the dashboard charts, computed in one pass.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DashboardData {
    pub insights: Insights,
    pub adherence_by_week: Vec<WeeklyAdherence>,
    pub severity_trend: Vec<SeverityPoint>,
    pub symptom_names: Vec<String>,
    pub flare_days_by_week: Vec<WeeklyFlareDays>,
    pub symptom_frequency_by_week: Vec<WeeklyFrequency>,
}

// ── Helpers ────────────────────────────────────────────────────────────────

fn parse_day(timestamp: &str) -> Option<NaiveDate> {
    let key = date_key(timestamp)?;
    NaiveDate::parse_from_str(key, "%Y-%m-%d").ok()
}

/// Monday-based year-week bucket key, e.g. "2026-W08".
fn week_key(date: NaiveDate) -> String {
    date.format("%Y-W%W").to_string()
}

/// Relabel the latest `WEEKS_SHOWN` bucket values W1..W4 in chronological
/// order, padding with zeros when data is thin. The week-key ordering comes
/// from the BTreeMap the callers build.
fn relabel_weeks(values: Vec<u32>) -> Vec<(String, u32)> {
    let start = values.len().saturating_sub(WEEKS_SHOWN);
    let mut result: Vec<u32> = values[start..].to_vec();
    result.resize(WEEKS_SHOWN, 0);
    result
        .into_iter()
        .enumerate()
        .map(|(i, v)| (format!("W{}", i + 1), v))
        .collect()
}

// ── Insight cards ──────────────────────────────────────────────────────────

/// Flare days, adherence percentage, and the actionable-trend callout for
/// the trailing 30 days.
pub fn compute_insights(history: &PatientHistory, today: NaiveDate) -> Insights {
    let cutoff = today - Duration::days(30);

    let mut flare_dates: HashSet<NaiveDate> = HashSet::new();
    for log in &history.symptom_logs {
        let Some(day) = parse_day(&log.logged_at) else {
            continue;
        };
        if day >= cutoff && log.severity > FLARE_THRESHOLD {
            flare_dates.insert(day);
        }
    }

    let recent_doses: Vec<bool> = history
        .adherence
        .iter()
        .filter_map(|a| parse_day(&a.logged_date).map(|day| (day, a.taken)))
        .filter(|(day, _)| *day >= cutoff)
        .map(|(_, taken)| taken)
        .collect();
    let adherence_pct = if recent_doses.is_empty() {
        0
    } else {
        let taken = recent_doses.iter().filter(|&&t| t).count();
        ((taken as f64 / recent_doses.len() as f64) * 100.0).round() as u32
    };

    let (actionable_val, actionable_sub) = actionable_trend(history);

    Insights {
        flare_days: flare_dates.len() as u32,
        adherence_pct,
        actionable_val,
        actionable_sub,
    }
}

/// Most recent elevated symptom among the last five logs, or "Stable".
fn actionable_trend(history: &PatientHistory) -> (String, String) {
    let mut recent: Vec<_> = history.symptom_logs.iter().collect();
    recent.sort_by(|a, b| b.logged_at.cmp(&a.logged_at));

    for log in recent.into_iter().take(5) {
        if log.severity > FLARE_THRESHOLD {
            let since = parse_day(&log.logged_at)
                .map(|d| format!(" since {}", d.format("%b %d")))
                .unwrap_or_default();
            return (
                format!("↑ {}", log.symptom_name),
                format!("severity {}/10{since}", log.severity),
            );
        }
    }
    ("Stable".into(), "no concerning trends".into())
}

// ── Weekly series ──────────────────────────────────────────────────────────

/// Percentage of doses taken per week, last four weeks.
pub fn adherence_by_week(history: &PatientHistory) -> Vec<WeeklyAdherence> {
    let mut weeks: BTreeMap<String, Vec<bool>> = BTreeMap::new();
    for log in &history.adherence {
        if let Some(day) = parse_day(&log.logged_date) {
            weeks.entry(week_key(day)).or_default().push(log.taken);
        }
    }

    let percentages = weeks
        .into_values()
        .map(|doses| {
            let taken = doses.iter().filter(|&&t| t).count();
            ((taken as f64 / doses.len() as f64) * 100.0).round() as u32
        })
        .collect();

    relabel_weeks(percentages)
        .into_iter()
        .map(|(week, adherence)| WeeklyAdherence { week, adherence })
        .collect()
}

/// Count of flare days (severity above threshold) per week, last four weeks.
pub fn flare_days_by_week(history: &PatientHistory) -> Vec<WeeklyFlareDays> {
    let mut weeks: BTreeMap<String, BTreeSet<NaiveDate>> = BTreeMap::new();
    for log in &history.symptom_logs {
        let Some(day) = parse_day(&log.logged_at) else {
            continue;
        };
        if log.severity > FLARE_THRESHOLD {
            weeks.entry(week_key(day)).or_default().insert(day);
        }
    }

    let counts = weeks.into_values().map(|days| days.len() as u32).collect();
    relabel_weeks(counts)
        .into_iter()
        .map(|(week, flare_days)| WeeklyFlareDays { week, flare_days })
        .collect()
}

/// Count of symptom log entries per week, last four weeks.
pub fn symptom_frequency_by_week(history: &PatientHistory) -> Vec<WeeklyFrequency> {
    let mut weeks: BTreeMap<String, u32> = BTreeMap::new();
    for log in &history.symptom_logs {
        if let Some(day) = parse_day(&log.logged_at) {
            *weeks.entry(week_key(day)).or_default() += 1;
        }
    }

    let counts = weeks.into_values().collect();
    relabel_weeks(counts)
        .into_iter()
        .map(|(week, count)| WeeklyFrequency { week, count })
        .collect()
}

// ── Severity trend ─────────────────────────────────────────────────────────

/// One point per day (peak severity), chronological, capped at the last
/// fourteen days with data. Also returns the distinct symptom names seen,
/// sorted, for the chart legend.
pub fn severity_trend(history: &PatientHistory) -> (Vec<SeverityPoint>, Vec<String>) {
    let mut by_day: BTreeMap<NaiveDate, u8> = BTreeMap::new();
    let mut names: BTreeSet<String> = BTreeSet::new();

    for log in &history.symptom_logs {
        names.insert(log.symptom_name.clone());
        if let Some(day) = parse_day(&log.logged_at) {
            let peak = by_day.entry(day).or_default();
            *peak = (*peak).max(log.severity);
        }
    }

    let start = by_day.len().saturating_sub(TREND_POINTS);
    let points = by_day
        .into_iter()
        .skip(start)
        .map(|(day, severity)| SeverityPoint {
            date: day.format("%b %d").to_string(),
            severity,
        })
        .collect();

    (points, names.into_iter().collect())
}

// ── Assembly ───────────────────────────────────────────────────────────────

/// Compute every dashboard series for one patient.
pub fn compute_dashboard(history: &PatientHistory, today: NaiveDate) -> DashboardData {
    let (severity_trend, symptom_names) = severity_trend(history);
    DashboardData {
        insights: compute_insights(history, today),
        adherence_by_week: adherence_by_week(history),
        severity_trend,
        symptom_names,
        flare_days_by_week: flare_days_by_week(history),
        symptom_frequency_by_week: symptom_frequency_by_week(history),
    }
}

// ── Tests ──────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{AdherenceLog, SymptomLog};
    use uuid::Uuid;

    fn symptom(logged_at: &str, name: &str, severity: u8) -> SymptomLog {
        SymptomLog {
            id: Uuid::new_v4(),
            patient_id: Uuid::new_v4(),
            logged_at: logged_at.into(),
            symptom_name: name.into(),
            severity,
            notes: None,
        }
    }

    fn dose(logged_date: &str, taken: bool) -> AdherenceLog {
        AdherenceLog {
            id: Uuid::new_v4(),
            patient_id: Uuid::new_v4(),
            logged_date: logged_date.into(),
            medication_name: "Gabapentin".into(),
            taken,
            notes: None,
        }
    }

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 2, 28).unwrap()
    }

    #[test]
    fn flare_days_count_distinct_dates_in_window() {
        let history = PatientHistory {
            symptom_logs: vec![
                symptom("2026-02-25T08:00:00Z", "Pain", 7),
                symptom("2026-02-25T20:00:00Z", "Breathing", 8), // same day, one flare
                symptom("2026-02-26T08:00:00Z", "Pain", 6),
                symptom("2026-02-27T08:00:00Z", "Pain", 3), // below threshold
                symptom("2025-11-01T08:00:00Z", "Pain", 9), // outside 30d window
            ],
            ..Default::default()
        };
        let insights = compute_insights(&history, today());
        assert_eq!(insights.flare_days, 2);
    }

    #[test]
    fn adherence_pct_over_trailing_window() {
        let history = PatientHistory {
            adherence: vec![
                dose("2026-02-20", true),
                dose("2026-02-21", true),
                dose("2026-02-22", false),
                dose("2025-12-01", false), // outside window, ignored
            ],
            ..Default::default()
        };
        let insights = compute_insights(&history, today());
        assert_eq!(insights.adherence_pct, 67);
    }

    #[test]
    fn adherence_pct_zero_when_nothing_logged() {
        let insights = compute_insights(&PatientHistory::default(), today());
        assert_eq!(insights.adherence_pct, 0);
        assert_eq!(insights.flare_days, 0);
    }

    #[test]
    fn actionable_reports_recent_elevated_symptom() {
        let history = PatientHistory {
            symptom_logs: vec![
                symptom("2026-02-20T08:00:00Z", "Pain", 3),
                symptom("2026-02-26T08:00:00Z", "Breathing", 7),
            ],
            ..Default::default()
        };
        let insights = compute_insights(&history, today());
        assert_eq!(insights.actionable_val, "↑ Breathing");
        assert_eq!(insights.actionable_sub, "severity 7/10 since Feb 26");
    }

    #[test]
    fn actionable_stable_when_nothing_elevated() {
        let history = PatientHistory {
            symptom_logs: vec![symptom("2026-02-26T08:00:00Z", "Pain", 2)],
            ..Default::default()
        };
        let insights = compute_insights(&history, today());
        assert_eq!(insights.actionable_val, "Stable");
        assert_eq!(insights.actionable_sub, "no concerning trends");
    }

    #[test]
    fn actionable_only_considers_last_five_logs() {
        // Six logs: the elevated one is oldest, pushed out of the window.
        let mut logs: Vec<_> = (21..=25)
            .map(|d| symptom(&format!("2026-02-{d}T08:00:00Z"), "Pain", 2))
            .collect();
        logs.insert(0, symptom("2026-02-20T08:00:00Z", "Breathing", 9));
        let history = PatientHistory {
            symptom_logs: logs,
            ..Default::default()
        };
        let insights = compute_insights(&history, today());
        assert_eq!(insights.actionable_val, "Stable");
    }

    #[test]
    fn weekly_adherence_pads_to_four_weeks() {
        let history = PatientHistory {
            adherence: vec![
                dose("2026-02-16", true),
                dose("2026-02-17", false),
                dose("2026-02-23", true),
            ],
            ..Default::default()
        };
        let weeks = adherence_by_week(&history);
        assert_eq!(weeks.len(), 4);
        assert_eq!(weeks[0].week, "W1");
        assert_eq!(weeks[0].adherence, 50); // Feb 16–17
        assert_eq!(weeks[1].adherence, 100); // Feb 23
        assert_eq!(weeks[2].adherence, 0); // padding
        assert_eq!(weeks[3].week, "W4");
    }

    #[test]
    fn weekly_adherence_keeps_latest_four() {
        // Six consecutive weeks of data, all taken; earliest two drop off.
        let adherence = vec![
            dose("2026-01-05", false), // W01 of the run
            dose("2026-01-12", false),
            dose("2026-01-19", true),
            dose("2026-01-26", true),
            dose("2026-02-02", true),
            dose("2026-02-09", true),
        ];
        let history = PatientHistory {
            adherence,
            ..Default::default()
        };
        let weeks = adherence_by_week(&history);
        assert_eq!(weeks.len(), 4);
        assert!(weeks.iter().all(|w| w.adherence == 100));
    }

    #[test]
    fn weekly_flare_days_dedupe_within_week() {
        let history = PatientHistory {
            symptom_logs: vec![
                symptom("2026-02-16T06:00:00Z", "Pain", 8),
                symptom("2026-02-16T20:00:00Z", "Pain", 6), // same flare day
                symptom("2026-02-17T08:00:00Z", "Pain", 7),
                symptom("2026-02-18T08:00:00Z", "Pain", 2), // not a flare
            ],
            ..Default::default()
        };
        let weeks = flare_days_by_week(&history);
        assert_eq!(weeks[0].flare_days, 2);
        assert_eq!(weeks.len(), 4);
    }

    #[test]
    fn weekly_frequency_counts_entries() {
        let history = PatientHistory {
            symptom_logs: vec![
                symptom("2026-02-16T06:00:00Z", "Pain", 1),
                symptom("2026-02-16T20:00:00Z", "Fatigue", 2),
                symptom("2026-02-23T08:00:00Z", "Pain", 3),
            ],
            ..Default::default()
        };
        let weeks = symptom_frequency_by_week(&history);
        assert_eq!(weeks[0].count, 2);
        assert_eq!(weeks[1].count, 1);
    }

    #[test]
    fn trend_uses_peak_severity_per_day() {
        let history = PatientHistory {
            symptom_logs: vec![
                symptom("2026-02-25T06:00:00Z", "Pain", 3),
                symptom("2026-02-25T20:00:00Z", "Breathing", 8),
                symptom("2026-02-26T08:00:00Z", "Pain", 5),
            ],
            ..Default::default()
        };
        let (points, names) = severity_trend(&history);
        assert_eq!(points.len(), 2);
        assert_eq!(points[0].date, "Feb 25");
        assert_eq!(points[0].severity, 8);
        assert_eq!(points[1].severity, 5);
        assert_eq!(names, vec!["Breathing".to_string(), "Pain".to_string()]);
    }

    #[test]
    fn trend_caps_at_fourteen_points() {
        let logs: Vec<_> = (1..=20)
            .map(|d| symptom(&format!("2026-01-{d:02}T08:00:00Z"), "Pain", 5))
            .collect();
        let history = PatientHistory {
            symptom_logs: logs,
            ..Default::default()
        };
        let (points, _) = severity_trend(&history);
        assert_eq!(points.len(), 14);
        assert_eq!(points[0].date, "Jan 07"); // days 1–6 dropped
    }

    #[test]
    fn malformed_timestamps_are_skipped_everywhere() {
        let history = PatientHistory {
            symptom_logs: vec![
                symptom("not a date", "Ghost", 9),
                symptom("2026-02-26T08:00:00Z", "Pain", 6),
            ],
            adherence: vec![dose("??", true)],
            ..Default::default()
        };
        let data = compute_dashboard(&history, today());
        assert_eq!(data.insights.flare_days, 1);
        assert_eq!(data.insights.adherence_pct, 0);
        assert_eq!(data.severity_trend.len(), 1);
    }
}
