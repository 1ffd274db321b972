use std::fmt::Display;

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::{
    error::TrackerResult,
    utils::time::{date_to_record_name, parse_record_date},
};

use super::{
    outcome::Outcome,
    validation::{parse_date, parse_non_negative, required_text},
};

/// How many workouts the dashboard lists.
pub const DASHBOARD_RECENT: usize = 5;

/// Kind of workout. Anything outside of the known list is kept verbatim in [ActivityType::Custom].
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ActivityType {
    #[default]
    Gym,
    HomeWorkout,
    Running,
    Cycling,
    Swimming,
    Yoga,
    Other,
    Custom(String),
}

impl ActivityType {
    pub const KNOWN: [ActivityType; 7] = [
        ActivityType::Gym,
        ActivityType::HomeWorkout,
        ActivityType::Running,
        ActivityType::Cycling,
        ActivityType::Swimming,
        ActivityType::Yoga,
        ActivityType::Other,
    ];

    pub fn name(&self) -> &str {
        match self {
            ActivityType::Gym => "Gym",
            ActivityType::HomeWorkout => "Home Workout",
            ActivityType::Running => "Running",
            ActivityType::Cycling => "Cycling",
            ActivityType::Swimming => "Swimming",
            ActivityType::Yoga => "Yoga",
            ActivityType::Other => "Other",
            ActivityType::Custom(v) => v,
        }
    }
}

impl Display for ActivityType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl From<String> for ActivityType {
    fn from(value: String) -> Self {
        let trimmed = value.trim();
        Self::KNOWN
            .into_iter()
            .find(|known| known.name().eq_ignore_ascii_case(trimmed))
            .unwrap_or_else(|| ActivityType::Custom(trimmed.to_string()))
    }
}

impl From<ActivityType> for String {
    fn from(value: ActivityType) -> Self {
        match value {
            ActivityType::Custom(v) => v,
            known => known.name().to_string(),
        }
    }
}

/// A logged workout. Field names on disk are kept short: `date`, `type`, `duration`,
/// `calories`, `notes`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkoutRecord {
    /// Kept as text so that a hand-edited file with a broken date still loads.
    pub date: String,
    #[serde(rename = "type")]
    pub activity: ActivityType,
    #[serde(rename = "duration")]
    pub duration_minutes: f64,
    #[serde(rename = "calories", default)]
    pub calories_burned: f64,
    #[serde(default)]
    pub notes: String,
}

impl WorkoutRecord {
    pub fn parsed_date(&self) -> Option<NaiveDate> {
        parse_record_date(&self.date)
    }
}

/// Raw values of the workout form, exactly as typed.
#[derive(Debug, Clone, Copy, Default)]
pub struct WorkoutForm<'a> {
    pub date: &'a str,
    pub activity: &'a str,
    pub duration_minutes: &'a str,
    pub calories_burned: &'a str,
    pub notes: &'a str,
}

impl WorkoutForm<'_> {
    fn validate(&self) -> TrackerResult<WorkoutRecord> {
        let date = required_text("date", self.date)?;
        let activity = required_text("type", self.activity)?;
        let duration = required_text("duration", self.duration_minutes)?;
        let duration_minutes = parse_non_negative("duration", duration)?;
        let calories_burned = if self.calories_burned.trim().is_empty() {
            0.
        } else {
            parse_non_negative("calories", self.calories_burned)?
        };
        let date = parse_date(date)?;

        Ok(WorkoutRecord {
            date: date_to_record_name(date),
            activity: ActivityType::from(activity.to_string()),
            duration_minutes,
            calories_burned,
            notes: self.notes.trim().to_string(),
        })
    }
}

/// Append-only list of workouts in insertion order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WorkoutLog {
    records: Vec<WorkoutRecord>,
}

impl WorkoutLog {
    pub fn records(&self) -> &[WorkoutRecord] {
        &self.records
    }

    pub fn log_workout(&mut self, form: WorkoutForm) -> TrackerResult<Outcome<WorkoutRecord>> {
        let record = form.validate()?;
        info!("Logging workout {:?}", record);
        self.records.push(record.clone());
        Ok(Outcome::changed(record, "Workout logged successfully!"))
    }

    /// Workouts in the same ISO week as `today`.
    pub fn weekly_count(&self, today: NaiveDate) -> usize {
        let week = today.iso_week();
        self.dated()
            .filter(|(date, _)| date.iso_week() == week)
            .count()
    }

    /// Calories burned during the calendar month of `today`.
    pub fn monthly_calories(&self, today: NaiveDate) -> f64 {
        self.dated()
            .filter(|(date, _)| date.year() == today.year() && date.month() == today.month())
            .map(|(_, record)| record.calories_burned)
            .sum()
    }

    /// Up to `n` records, newest date first. Among records with the same date the one logged
    /// last comes first. Records whose date can't be parsed go to the end.
    pub fn recent(&self, n: usize) -> Vec<&WorkoutRecord> {
        let mut records = self.records.iter().rev().collect::<Vec<_>>();
        records.sort_by(|a, b| b.parsed_date().cmp(&a.parsed_date()));
        records.truncate(n);
        records
    }

    pub fn history(&self) -> Vec<&WorkoutRecord> {
        self.recent(self.records.len())
    }

    pub fn dashboard(&self, today: NaiveDate, active_challenges: usize) -> Dashboard {
        let dashboard = Dashboard {
            weekly_count: self.weekly_count(today),
            monthly_calories: self.monthly_calories(today),
            active_challenges,
            recent: self.recent(DASHBOARD_RECENT).into_iter().cloned().collect(),
        };
        debug!("Computed dashboard {:?}", dashboard);
        dashboard
    }

    fn dated(&self) -> impl Iterator<Item = (NaiveDate, &WorkoutRecord)> {
        self.records
            .iter()
            .filter_map(|record| record.parsed_date().map(|date| (date, record)))
    }
}

/// Everything the fitness dashboard shows.
#[derive(Debug, Clone, PartialEq)]
pub struct Dashboard {
    pub weekly_count: usize,
    pub monthly_calories: f64,
    pub active_challenges: usize,
    pub recent: Vec<WorkoutRecord>,
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use crate::{error::TrackerError, tracker::outcome::Effect};

    use super::{ActivityType, WorkoutForm, WorkoutLog};

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn form<'a>(date: &'a str, calories: &'a str) -> WorkoutForm<'a> {
        WorkoutForm {
            date,
            activity: "Running",
            duration_minutes: "30",
            calories_burned: calories,
            notes: "",
        }
    }

    fn log_of(entries: &[(&str, &str)]) -> WorkoutLog {
        let mut log = WorkoutLog::default();
        for (date, calories) in entries {
            let _ = log.log_workout(form(date, calories)).unwrap();
        }
        log
    }

    #[test]
    fn log_workout_appends_and_asks_for_persist() {
        let mut log = WorkoutLog::default();
        let outcome = log
            .log_workout(WorkoutForm {
                date: "2025-03-10",
                activity: "home workout",
                duration_minutes: "45.5",
                calories_burned: "",
                notes: "  legs  ",
            })
            .unwrap();

        assert!(outcome.needs_persist());
        assert!(outcome.effects.contains(&Effect::Persist));
        let record = &log.records()[0];
        assert_eq!(record.activity, ActivityType::HomeWorkout);
        assert_eq!(record.duration_minutes, 45.5);
        assert_eq!(record.calories_burned, 0.);
        assert_eq!(record.notes, "legs");
        assert_eq!(outcome.value, *record);
    }

    #[test]
    fn log_workout_rejects_missing_fields() {
        let mut log = WorkoutLog::default();
        for (form, field) in [
            (WorkoutForm { date: "", ..form("2025-03-10", "") }, "date"),
            (WorkoutForm { activity: " ", ..form("2025-03-10", "") }, "type"),
            (WorkoutForm { duration_minutes: "", ..form("2025-03-10", "") }, "duration"),
        ] {
            match log.log_workout(form) {
                Err(TrackerError::MissingField { field: f }) => assert_eq!(f, field),
                other => panic!("Expected missing {field}, got {other:?}"),
            }
        }
        assert!(log.records().is_empty());
    }

    #[test]
    fn log_workout_rejects_bad_numbers_and_dates() {
        let mut log = WorkoutLog::default();
        assert!(matches!(
            log.log_workout(WorkoutForm { duration_minutes: "half an hour", ..form("2025-03-10", "") }),
            Err(TrackerError::InvalidNumber { field: "duration", .. })
        ));
        assert!(matches!(
            log.log_workout(form("2025-03-10", "lots")),
            Err(TrackerError::InvalidNumber { field: "calories", .. })
        ));
        assert!(matches!(
            log.log_workout(form("2025-03-10", "-10")),
            Err(TrackerError::OutOfRange { field: "calories", .. })
        ));
        assert!(matches!(
            log.log_workout(form("10/03/2025", "")),
            Err(TrackerError::InvalidDate { .. })
        ));
        assert!(log.records().is_empty());
    }

    #[test]
    fn weekly_count_uses_iso_weeks() {
        // 2024-12-30 belongs to ISO week 1 of 2025.
        let log = log_of(&[
            ("2024-12-29", ""),
            ("2024-12-30", ""),
            ("2025-01-01", ""),
            ("2025-01-05", ""),
            ("2025-01-06", ""),
        ]);
        assert_eq!(log.weekly_count(date(2025, 1, 2)), 3);
        assert_eq!(log.weekly_count(date(2024, 12, 29)), 1);
    }

    #[test]
    fn monthly_calories_sums_current_month_only() {
        let log = log_of(&[
            ("2025-03-01", "100"),
            ("2025-03-31", "250.5"),
            ("2025-04-01", "1000"),
            ("2024-03-15", "1000"),
        ]);
        assert_eq!(log.monthly_calories(date(2025, 3, 15)), 350.5);
    }

    #[test]
    fn aggregates_ignore_insertion_order() {
        let entries = [
            ("2025-03-10", "100"),
            ("2025-03-11", "200"),
            ("2025-02-28", "50"),
            ("2025-03-16", "10"),
        ];
        let forward = log_of(&entries);
        let mut reversed = entries;
        reversed.reverse();
        let backward = log_of(&reversed);

        let today = date(2025, 3, 12);
        assert_eq!(forward.weekly_count(today), backward.weekly_count(today));
        assert_eq!(forward.monthly_calories(today), backward.monthly_calories(today));
        assert_eq!(forward.weekly_count(today), 3);
    }

    #[test]
    fn unparseable_dates_are_excluded() {
        let log: WorkoutLog = serde_json::from_str(
            r#"[
                {"date": "yesterday", "type": "Gym", "duration": 10, "calories": 500, "notes": ""},
                {"date": "2025-03-10", "type": "Gym", "duration": 10, "calories": 5, "notes": ""}
            ]"#,
        )
        .unwrap();
        let today = date(2025, 3, 10);
        assert_eq!(log.weekly_count(today), 1);
        assert_eq!(log.monthly_calories(today), 5.);
        assert_eq!(log.recent(2)[1].date, "yesterday");
    }

    #[test]
    fn recent_sorts_by_date_then_last_inserted() {
        let mut log = WorkoutLog::default();
        for (day, notes) in [("2025-03-01", "a"), ("2025-03-05", "b"), ("2025-03-01", "c"), ("2025-03-03", "d")] {
            let _ = log
                .log_workout(WorkoutForm { notes, ..form(day, "") })
                .unwrap();
        }
        let notes = log.recent(3).iter().map(|r| r.notes.as_str()).collect::<Vec<_>>();
        assert_eq!(notes, ["b", "d", "c"]);
        assert_eq!(log.history().len(), 4);
        assert_eq!(log.history()[3].notes, "a");
    }

    #[test]
    fn dashboard_combines_metrics() {
        let log = log_of(&[
            ("2025-03-10", "100"),
            ("2025-03-11", "100"),
            ("2025-03-01", "100"),
            ("2025-02-01", "100"),
            ("2025-01-01", "100"),
            ("2024-01-01", "100"),
        ]);
        let dashboard = log.dashboard(date(2025, 3, 12), 2);
        assert_eq!(dashboard.weekly_count, 2);
        assert_eq!(dashboard.monthly_calories, 300.);
        assert_eq!(dashboard.active_challenges, 2);
        assert_eq!(dashboard.recent.len(), 5);
        assert_eq!(dashboard.recent[0].date, "2025-03-11");
    }

    #[test]
    fn stored_format_uses_short_keys() {
        let log = log_of(&[("2025-03-10", "12")]);
        let json = serde_json::to_value(&log).unwrap();
        assert_eq!(
            json,
            serde_json::json!([{
                "date": "2025-03-10",
                "type": "Running",
                "duration": 30.0,
                "calories": 12.0,
                "notes": ""
            }])
        );
    }

    #[test]
    fn custom_activity_types_survive() {
        assert_eq!(ActivityType::from("Climbing".to_string()), ActivityType::Custom("Climbing".into()));
        assert_eq!(String::from(ActivityType::Custom("Climbing".into())), "Climbing");
        assert_eq!(ActivityType::from("yoga".to_string()), ActivityType::Yoga);
    }
}
