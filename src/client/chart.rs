use std::collections::HashMap;

use serde::Serialize;

use crate::progress::record::ProgressRecord;

use super::format_date_label;

/// Number of trailing points kept in the activity series.
const SERIES_LEN: usize = 14;

/// One bar-chart point: how many entries on that date carried food text and
/// how many carried exercise text.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DayActivity {
    pub date: String,
    /// Display label for the chart axis.
    pub day: String,
    pub food_logs: u32,
    pub exercise_logs: u32,
}

/// Group entries by date in the order dates are first encountered while
/// scanning `entries`, then keep only the last `SERIES_LEN` points of that
/// sequence.
///
/// The truncation deliberately works on encounter order, not calendar order:
/// because the incoming list is date-descending, "last 14" means the 14 dates
/// nearest the end of the scan. Re-sorting here would change which dates
/// appear. A date seen only through blank entries still yields a zero point.
pub fn activity_series(entries: &[ProgressRecord]) -> Vec<DayActivity> {
    let mut index_by_date: HashMap<&str, usize> = HashMap::new();
    let mut series: Vec<DayActivity> = Vec::new();

    for entry in entries {
        let slot = match index_by_date.get(entry.date.as_str()) {
            Some(&slot) => slot,
            None => {
                series.push(DayActivity {
                    date: entry.date.clone(),
                    day: format_date_label(&entry.date),
                    food_logs: 0,
                    exercise_logs: 0,
                });
                index_by_date.insert(entry.date.as_str(), series.len() - 1);
                series.len() - 1
            }
        };
        if !entry.food.trim().is_empty() {
            series[slot].food_logs += 1;
        }
        if !entry.exercise.trim().is_empty() {
            series[slot].exercise_logs += 1;
        }
    }

    let start = series.len().saturating_sub(SERIES_LEN);
    series.split_off(start)
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::OffsetDateTime;
    use uuid::Uuid;

    fn entry(date: &str, food: &str, exercise: &str) -> ProgressRecord {
        ProgressRecord {
            id: Uuid::new_v4(),
            date: date.to_string(),
            food: food.to_string(),
            exercise: exercise.to_string(),
            whey_grams: 0.0,
            creatine_grams: 0.0,
            image_data: None,
            image_name: None,
            created_at: OffsetDateTime::UNIX_EPOCH,
        }
    }

    #[test]
    fn groups_counts_by_date_in_encounter_order() {
        let entries = vec![
            entry("2024-01-03", "eggs", ""),
            entry("2024-01-03", "rice", "run"),
            entry("2024-01-02", "  ", "lift"),
            entry("2024-01-01", "", ""),
        ];
        let series = activity_series(&entries);
        assert_eq!(series.len(), 3);
        assert_eq!(series[0].date, "2024-01-03");
        assert_eq!(series[0].food_logs, 2);
        assert_eq!(series[0].exercise_logs, 1);
        assert_eq!(series[1].date, "2024-01-02");
        assert_eq!(series[1].food_logs, 0);
        assert_eq!(series[1].exercise_logs, 1);
        // blank entries still produce a zero point for their date
        assert_eq!(series[2].date, "2024-01-01");
        assert_eq!(series[2].food_logs, 0);
        assert_eq!(series[2].exercise_logs, 0);
    }

    #[test]
    fn truncates_to_the_last_14_encountered_dates() {
        // Date-descending scan over 20 distinct dates: D20 first, D1 last.
        let entries: Vec<ProgressRecord> = (1..=20)
            .rev()
            .map(|d| entry(&format!("2024-01-{d:02}"), "food", ""))
            .collect();
        let series = activity_series(&entries);
        assert_eq!(series.len(), 14);
        assert_eq!(series[0].date, "2024-01-14");
        assert_eq!(series[13].date, "2024-01-01");
    }

    #[test]
    fn truncation_follows_encounter_order_not_calendar_order() {
        // 15 distinct dates where the chronologically newest date comes first
        // in the scan: it must be dropped by the trailing-14 truncation even
        // though it is the most recent calendar date.
        let mut entries = vec![entry("2024-12-31", "food", "")];
        entries.extend((1..=14).map(|d| entry(&format!("2024-01-{d:02}"), "food", "")));
        let series = activity_series(&entries);
        assert_eq!(series.len(), 14);
        assert!(series.iter().all(|p| p.date != "2024-12-31"));
        assert_eq!(series[0].date, "2024-01-01");
    }

    #[test]
    fn repeat_dates_do_not_create_new_points() {
        let entries = vec![
            entry("2024-01-02", "a", ""),
            entry("2024-01-01", "b", ""),
            entry("2024-01-02", "c", ""),
        ];
        let series = activity_series(&entries);
        assert_eq!(series.len(), 2);
        assert_eq!(series[0].date, "2024-01-02");
        assert_eq!(series[0].food_logs, 2);
    }

    #[test]
    fn chart_labels_use_the_display_format() {
        let series = activity_series(&[entry("2024-01-05", "x", "")]);
        assert_eq!(series[0].day, "1/5/2024");
    }
}
