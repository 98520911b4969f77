//! Dashboard aggregation over stored design records.
//!
//! [`summarize`] is a pure function over samples already loaded from the
//! store; [`filter_by_range`] applies the time-range window first.

use std::collections::{BTreeMap, HashMap};

use chrono::Duration;
use serde::{Deserialize, Serialize};

use crate::design::split_materials;
use crate::types::Timestamp;

// ---------------------------------------------------------------------------
// Time ranges
// ---------------------------------------------------------------------------

/// Reporting window offered by the dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TimeRange {
    AllTime,
    LastWeek,
    LastMonth,
    LastYear,
}

impl TimeRange {
    /// All ranges, in display order.
    pub const ALL: [TimeRange; 4] = [
        TimeRange::AllTime,
        TimeRange::LastWeek,
        TimeRange::LastMonth,
        TimeRange::LastYear,
    ];

    /// Display label.
    pub fn label(self) -> &'static str {
        match self {
            Self::AllTime => "All Time",
            Self::LastWeek => "Last Week",
            Self::LastMonth => "Last Month",
            Self::LastYear => "Last Year",
        }
    }

    /// Window length in days, `None` for all-time.
    pub fn days(self) -> Option<i64> {
        match self {
            Self::AllTime => None,
            Self::LastWeek => Some(7),
            Self::LastMonth => Some(30),
            Self::LastYear => Some(365),
        }
    }

    /// Earliest timestamp inside the window ending at `now`.
    pub fn window_start(self, now: Timestamp) -> Option<Timestamp> {
        self.days().map(|d| now - Duration::days(d))
    }
}

/// Ranges worth offering given the oldest stored record.
///
/// `All Time` is always offered; a bounded range appears once the oldest
/// record is at least that many days old.
pub fn available_time_ranges(oldest: Option<Timestamp>, now: Timestamp) -> Vec<TimeRange> {
    let mut ranges = vec![TimeRange::AllTime];
    let Some(oldest) = oldest else {
        return ranges;
    };
    let age = now - oldest;
    for range in TimeRange::ALL {
        if let Some(days) = range.days() {
            if age >= Duration::days(days) {
                ranges.push(range);
            }
        }
    }
    ranges
}

// ---------------------------------------------------------------------------
// Summary
// ---------------------------------------------------------------------------

/// The subset of a design record the dashboard reads.
#[derive(Debug, Clone)]
pub struct DesignSample {
    /// Materials as stored (`", "`-joined).
    pub materials: Option<String>,
    pub production_method: Option<String>,
    pub clothing_type: Option<String>,
    pub sustainability_score: Option<i64>,
    pub created_at: Timestamp,
}

/// A label and how many records carry it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CountEntry {
    pub label: String,
    pub count: u64,
}

/// Per-month aggregate.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MonthlyTrend {
    /// `YYYY-MM`.
    pub month: String,
    pub average_score: Option<f64>,
    pub design_count: u64,
}

/// Aggregate statistics for a set of records.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardSummary {
    pub average_score: Option<f64>,
    pub total_count: u64,
    pub per_material_counts: Vec<CountEntry>,
    pub per_production_method_counts: Vec<CountEntry>,
    pub per_clothing_type_counts: Vec<CountEntry>,
    pub trend_by_month: Vec<MonthlyTrend>,
    /// Change in design count between the two most recent months, in percent.
    pub monthly_growth_pct: Option<f64>,
}

/// Keep only samples inside `range` (relative to `now`).
pub fn filter_by_range(samples: &[DesignSample], range: TimeRange, now: Timestamp) -> Vec<DesignSample> {
    match range.window_start(now) {
        None => samples.to_vec(),
        Some(start) => samples
            .iter()
            .filter(|s| s.created_at >= start)
            .cloned()
            .collect(),
    }
}

/// Aggregate `samples`.
pub fn summarize(samples: &[DesignSample]) -> DashboardSummary {
    let mut materials: HashMap<String, u64> = HashMap::new();
    let mut methods: HashMap<String, u64> = HashMap::new();
    let mut clothing: HashMap<String, u64> = HashMap::new();
    let mut months: BTreeMap<String, (i64, u64, u64)> = BTreeMap::new();
    let mut score_sum: i64 = 0;
    let mut scored: u64 = 0;

    for sample in samples {
        if let Some(text) = &sample.materials {
            for material in split_materials(text) {
                *materials.entry(material).or_default() += 1;
            }
        }
        if let Some(method) = &sample.production_method {
            *methods.entry(method.clone()).or_default() += 1;
        }
        if let Some(kind) = &sample.clothing_type {
            *clothing.entry(kind.clone()).or_default() += 1;
        }

        let month = sample.created_at.format("%Y-%m").to_string();
        let entry = months.entry(month).or_insert((0, 0, 0));
        entry.2 += 1;
        if let Some(score) = sample.sustainability_score {
            score_sum += score;
            scored += 1;
            entry.0 += score;
            entry.1 += 1;
        }
    }

    let trend_by_month: Vec<MonthlyTrend> = months
        .into_iter()
        .map(|(month, (sum, count, designs))| MonthlyTrend {
            month,
            average_score: average(sum, count),
            design_count: designs,
        })
        .collect();

    DashboardSummary {
        average_score: average(score_sum, scored),
        total_count: samples.len() as u64,
        per_material_counts: sorted_counts(materials),
        per_production_method_counts: sorted_counts(methods),
        per_clothing_type_counts: sorted_counts(clothing),
        monthly_growth_pct: monthly_growth(&trend_by_month),
        trend_by_month,
    }
}

fn average(sum: i64, count: u64) -> Option<f64> {
    (count > 0).then(|| sum as f64 / count as f64)
}

/// Sort by descending count, then label, so output is deterministic.
fn sorted_counts(counts: HashMap<String, u64>) -> Vec<CountEntry> {
    let mut entries: Vec<CountEntry> = counts
        .into_iter()
        .map(|(label, count)| CountEntry { label, count })
        .collect();
    entries.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.label.cmp(&b.label)));
    entries
}

fn monthly_growth(trend: &[MonthlyTrend]) -> Option<f64> {
    let [.., previous, latest] = trend else {
        return None;
    };
    if previous.design_count == 0 {
        return None;
    }
    Some((latest.design_count as f64 / previous.design_count as f64 - 1.0) * 100.0)
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};

    use super::*;

    fn at(y: i32, m: u32, d: u32) -> Timestamp {
        Utc.with_ymd_and_hms(y, m, d, 12, 0, 0).unwrap()
    }

    fn sample(materials: &str, method: &str, kind: &str, score: i64, created_at: Timestamp) -> DesignSample {
        DesignSample {
            materials: Some(materials.to_string()),
            production_method: Some(method.to_string()),
            clothing_type: Some(kind.to_string()),
            sustainability_score: Some(score),
            created_at,
        }
    }

    fn samples() -> Vec<DesignSample> {
        vec![
            sample("Organic Cotton, Hemp", "Cut-and-Sew", "Shirt", 80, at(2026, 8, 3)),
            sample("Hemp", "Upcycling", "Dress", 60, at(2026, 9, 10)),
            sample("Hemp, Cork", "Cut-and-Sew", "Shirt", 70, at(2026, 9, 20)),
        ]
    }

    // -- available_time_ranges ----------------------------------------------

    #[test]
    fn three_day_old_data_offers_only_all_time() {
        let now = at(2026, 10, 18);
        let oldest = now - Duration::days(3);
        assert_eq!(available_time_ranges(Some(oldest), now), vec![TimeRange::AllTime]);
    }

    #[test]
    fn week_boundary_is_inclusive() {
        let now = at(2026, 10, 18);
        let exactly_week = now - Duration::days(7);
        assert_eq!(
            available_time_ranges(Some(exactly_week), now),
            vec![TimeRange::AllTime, TimeRange::LastWeek]
        );

        let just_short = now - Duration::days(7) + Duration::seconds(1);
        assert_eq!(available_time_ranges(Some(just_short), now), vec![TimeRange::AllTime]);
    }

    #[test]
    fn old_data_offers_every_range() {
        let now = at(2026, 10, 18);
        let oldest = now - Duration::days(400);
        assert_eq!(available_time_ranges(Some(oldest), now), TimeRange::ALL.to_vec());
    }

    #[test]
    fn empty_store_offers_all_time() {
        assert_eq!(available_time_ranges(None, at(2026, 1, 1)), vec![TimeRange::AllTime]);
    }

    // -- filter_by_range ----------------------------------------------------

    #[test]
    fn filter_keeps_records_inside_window() {
        let now = at(2026, 9, 25);
        let filtered = filter_by_range(&samples(), TimeRange::LastWeek, now);
        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered[0].sustainability_score, Some(70));

        assert_eq!(filter_by_range(&samples(), TimeRange::AllTime, now).len(), 3);
    }

    // -- summarize ----------------------------------------------------------

    #[test]
    fn summary_counts_and_average() {
        let summary = summarize(&samples());
        assert_eq!(summary.total_count, 3);
        assert_eq!(summary.average_score, Some(70.0));
        assert_eq!(
            summary.per_material_counts,
            vec![
                CountEntry { label: "Hemp".into(), count: 3 },
                CountEntry { label: "Cork".into(), count: 1 },
                CountEntry { label: "Organic Cotton".into(), count: 1 },
            ]
        );
        assert_eq!(summary.per_production_method_counts[0].label, "Cut-and-Sew");
        assert_eq!(summary.per_clothing_type_counts[0].count, 2);
    }

    #[test]
    fn summary_trend_is_monthly_and_ascending() {
        let summary = summarize(&samples());
        let months: Vec<&str> = summary.trend_by_month.iter().map(|t| t.month.as_str()).collect();
        assert_eq!(months, vec!["2026-08", "2026-09"]);
        assert_eq!(summary.trend_by_month[1].design_count, 2);
        assert_eq!(summary.trend_by_month[1].average_score, Some(65.0));
        assert_eq!(summary.monthly_growth_pct, Some(100.0));
    }

    #[test]
    fn summarize_is_idempotent() {
        let data = samples();
        assert_eq!(summarize(&data), summarize(&data));
    }

    #[test]
    fn empty_summary() {
        let summary = summarize(&[]);
        assert_eq!(summary.total_count, 0);
        assert!(summary.average_score.is_none());
        assert!(summary.trend_by_month.is_empty());
        assert!(summary.monthly_growth_pct.is_none());
    }

    #[test]
    fn unscored_records_count_but_do_not_skew_average() {
        let mut data = samples();
        data.push(DesignSample {
            materials: None,
            production_method: None,
            clothing_type: None,
            sustainability_score: None,
            created_at: at(2026, 9, 21),
        });
        let summary = summarize(&data);
        assert_eq!(summary.total_count, 4);
        assert_eq!(summary.average_score, Some(70.0));
    }
}
