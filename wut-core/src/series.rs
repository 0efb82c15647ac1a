//! Read-only example series for the weekly and daily views.

use chrono::Weekday;
use serde::Serialize;

/// Litres per day, Monday through Sunday.
pub const WEEKLY_LITRES: [f64; 7] = [80.0, 60.0, 70.0, 90.0, 75.0, 65.0, 85.0];

/// Labels and litres for the daily comparison bars.
pub const DAILY: [(&str, f64); 3] = [("Today", 120.0), ("Yesterday", 100.0), ("Last Week", 130.0)];

/// Bar colors, cycled by bar index.
pub const DAILY_COLORS: [&str; 3] = ["#6fb3ff", "#ffd27f", "#ff9f9a"];

/// A labelled value used for line and bar chart points.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct LabelValue {
    pub label: String,
    pub value: f64,
}

/// Weekly trend points labelled by weekday ("Mon".."Sun").
pub fn weekly_series() -> Vec<LabelValue> {
    let mut day = Weekday::Mon;
    WEEKLY_LITRES
        .iter()
        .map(|value| {
            let point = LabelValue {
                label: day.to_string(),
                value: *value,
            };
            day = day.succ();
            point
        })
        .collect()
}

pub fn daily_series() -> Vec<LabelValue> {
    DAILY
        .iter()
        .map(|(label, value)| LabelValue {
            label: label.to_string(),
            value: *value,
        })
        .collect()
}

/// Sum of a series' values.
pub fn series_total(series: &[LabelValue]) -> f64 {
    series.iter().map(|p| p.value).sum()
}

/// Largest value in a series, or 0 for an empty one.
pub fn series_max(series: &[LabelValue]) -> f64 {
    series.iter().map(|p| p.value).fold(0.0, f64::max)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_weekly_series_labels() {
        let weekly = weekly_series();
        assert_eq!(weekly.len(), 7);
        assert_eq!(weekly[0].label, "Mon");
        assert_eq!(weekly[6].label, "Sun");
        assert_eq!(series_total(&weekly), 525.0);
    }

    #[test]
    fn test_daily_series() {
        let daily = daily_series();
        assert_eq!(daily[2].label, "Last Week");
        assert_eq!(series_max(&daily), 130.0);
    }
}
