use chrono::{Days, NaiveDate};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::{TrackerError, TrackerResult};

use super::{
    outcome::Outcome,
    validation::{parse_date, parse_integer, parse_non_negative, required_text},
};

/// Target based challenge from the fitness tracker, e.g. "run 50 km in 14 days".
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FitnessChallenge {
    pub name: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub target: f64,
    #[serde(rename = "timeframe")]
    pub timeframe_days: u32,
    pub start_date: NaiveDate,
    #[serde(default)]
    pub progress: f64,
}

impl FitnessChallenge {
    /// `None` when the timeframe reaches past the last representable date, which only a
    /// hand-edited file can contain.
    pub fn end_date(&self) -> Option<NaiveDate> {
        self.start_date
            .checked_add_days(Days::new(self.timeframe_days.into()))
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct FitnessChallengeForm<'a> {
    pub name: &'a str,
    pub kind: &'a str,
    pub target: &'a str,
    pub timeframe_days: &'a str,
    pub start_date: &'a str,
}

impl FitnessChallengeForm<'_> {
    fn validate(&self) -> TrackerResult<FitnessChallenge> {
        let name = required_text("name", self.name)?;
        let kind = required_text("type", self.kind)?;
        let target = required_text("target", self.target)?;
        let timeframe = required_text("timeframe", self.timeframe_days)?;
        let start_date = required_text("start date", self.start_date)?;

        let target = parse_non_negative("target", target)?;
        let timeframe = parse_integer("timeframe", timeframe)?;
        let timeframe_days = u32::try_from(timeframe)
            .ok()
            .filter(|v| *v > 0)
            .ok_or_else(|| {
                TrackerError::out_of_range("timeframe", format!("{timeframe} is not a positive number of days"))
            })?;

        let challenge = FitnessChallenge {
            name: name.to_string(),
            kind: kind.to_string(),
            target,
            timeframe_days,
            start_date: parse_date(start_date)?,
            progress: 0.,
        };
        if challenge.end_date().is_none() {
            return Err(TrackerError::out_of_range(
                "timeframe",
                format!("{timeframe_days} days is too long"),
            ));
        }
        Ok(challenge)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FitnessChallenges {
    challenges: Vec<FitnessChallenge>,
}

impl FitnessChallenges {
    pub fn challenges(&self) -> &[FitnessChallenge] {
        &self.challenges
    }

    pub fn create_challenge(
        &mut self,
        form: FitnessChallengeForm,
    ) -> TrackerResult<Outcome<FitnessChallenge>> {
        let challenge = form.validate()?;
        info!("Creating fitness challenge {:?}", challenge);
        self.challenges.push(challenge.clone());
        Ok(Outcome::changed(challenge, "Challenge created successfully!"))
    }

    /// Every stored challenge counts as active, they are never closed.
    pub fn active_count(&self) -> usize {
        self.challenges.len()
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use crate::error::TrackerError;

    use super::{FitnessChallengeForm, FitnessChallenges};

    fn form() -> FitnessChallengeForm<'static> {
        FitnessChallengeForm {
            name: "Spring run",
            kind: "Distance",
            target: "50",
            timeframe_days: "14",
            start_date: "2025-03-25",
        }
    }

    #[test]
    fn end_date_adds_timeframe() {
        let mut challenges = FitnessChallenges::default();
        let created = challenges.create_challenge(form()).unwrap().value;
        assert_eq!(created.end_date(), NaiveDate::from_ymd_opt(2025, 4, 8));
        assert_eq!(created.progress, 0.);
        assert_eq!(challenges.active_count(), 1);
    }

    #[test]
    fn every_field_is_required() {
        let mut challenges = FitnessChallenges::default();
        for form in [
            FitnessChallengeForm { name: "", ..form() },
            FitnessChallengeForm { kind: "", ..form() },
            FitnessChallengeForm { target: "", ..form() },
            FitnessChallengeForm { timeframe_days: "", ..form() },
            FitnessChallengeForm { start_date: "", ..form() },
        ] {
            assert!(matches!(
                challenges.create_challenge(form),
                Err(TrackerError::MissingField { .. })
            ));
        }
        assert_eq!(challenges.active_count(), 0);
    }

    #[test]
    fn numbers_are_checked() {
        let mut challenges = FitnessChallenges::default();
        assert!(matches!(
            challenges.create_challenge(FitnessChallengeForm { target: "far", ..form() }),
            Err(TrackerError::InvalidNumber { .. })
        ));
        assert!(matches!(
            challenges.create_challenge(FitnessChallengeForm { timeframe_days: "1.5", ..form() }),
            Err(TrackerError::InvalidNumber { .. })
        ));
        assert!(matches!(
            challenges.create_challenge(FitnessChallengeForm { timeframe_days: "0", ..form() }),
            Err(TrackerError::OutOfRange { .. })
        ));
        assert!(matches!(
            challenges.create_challenge(FitnessChallengeForm { start_date: "soon", ..form() }),
            Err(TrackerError::InvalidDate { .. })
        ));
    }

    #[test]
    fn timeframe_past_calendar_end() {
        let mut challenges = FitnessChallenges::default();
        assert!(matches!(
            challenges.create_challenge(FitnessChallengeForm { timeframe_days: "4000000000", ..form() }),
            Err(TrackerError::OutOfRange { .. })
        ));
        assert_eq!(challenges.active_count(), 0);

        let stored: FitnessChallenges = serde_json::from_str(
            r#"[{"name": "Far", "type": "Distance", "target": 1, "timeframe": 4000000000, "start_date": "2025-03-25"}]"#,
        )
        .unwrap();
        assert_eq!(stored.challenges()[0].end_date(), None);
    }
}
