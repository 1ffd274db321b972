use std::collections::BTreeSet;

use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize};
use tracing::{debug, info};

use crate::{
    error::{TrackerError, TrackerResult},
    utils::percentage::{ratio_percentage, Percentage},
};

use super::{
    outcome::Outcome,
    validation::{parse_date, required_text},
};

pub const CHALLENGE_DAYS: u32 = 30;

/// The single 30-day challenge. Days are numbered from 1, day 1 being `start_date`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Challenge {
    #[serde(rename = "challenge_name")]
    pub name: String,
    pub start_date: NaiveDate,
    #[serde(default, deserialize_with = "challenge_days")]
    pub completed_days: BTreeSet<u32>,
}

/// Stored completed days outside of 1..=[CHALLENGE_DAYS] are dropped on load.
fn challenge_days<'de, D: Deserializer<'de>>(deserializer: D) -> Result<BTreeSet<u32>, D::Error> {
    let mut days = BTreeSet::<u32>::deserialize(deserializer)?;
    let before = days.len();
    days.retain(|day| (1..=CHALLENGE_DAYS).contains(day));
    if days.len() != before {
        debug!("Dropped {} stored days outside of the challenge", before - days.len());
    }
    Ok(days)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChallengePhase {
    NoChallenge,
    /// Start date is still in the future.
    NotStarted,
    Day(u32),
    /// More than [CHALLENGE_DAYS] days passed. There is no explicit end state, a challenge simply
    /// stays finished until it is reset or replaced.
    Finished,
}

impl Challenge {
    /// `(today - start) + 1`. Not clamped: below 1 the challenge hasn't started, above
    /// [CHALLENGE_DAYS] it is over.
    pub fn current_day(&self, today: NaiveDate) -> i64 {
        (today - self.start_date).num_days() + 1
    }

    pub fn phase(&self, today: NaiveDate) -> ChallengePhase {
        match self.current_day(today) {
            day if day < 1 => ChallengePhase::NotStarted,
            day if day > CHALLENGE_DAYS as i64 => ChallengePhase::Finished,
            day => ChallengePhase::Day(day as u32),
        }
    }
}

/// One cell of the 30 day calendar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CalendarDay {
    pub day: u32,
    pub completed: bool,
    pub current: bool,
}

/// View model for rendering the tracker.
#[derive(Debug, Clone, PartialEq)]
pub struct ChallengeStatus {
    pub name: Option<String>,
    pub phase: ChallengePhase,
    pub completed: usize,
    pub progress: Percentage,
    pub can_mark: bool,
    pub calendar: Vec<CalendarDay>,
}

/// Holds the active challenge, if there is one. Stored on disk as the challenge object or
/// `null`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ChallengeTracker {
    challenge: Option<Challenge>,
}

impl ChallengeTracker {
    pub fn challenge(&self) -> Option<&Challenge> {
        self.challenge.as_ref()
    }

    /// Replaces the current challenge. A blank `start_date` means `today`.
    pub fn start_challenge(
        &mut self,
        name: &str,
        start_date: &str,
        today: NaiveDate,
    ) -> TrackerResult<Outcome<NaiveDate>> {
        let name = required_text("challenge name", name)?;
        let start_date = if start_date.trim().is_empty() {
            today
        } else {
            parse_date(start_date)?
        };

        if let Some(previous) = &self.challenge {
            info!("Replacing challenge {:?}", previous.name);
        }
        self.challenge = Some(Challenge {
            name: name.to_string(),
            start_date,
            completed_days: BTreeSet::new(),
        });
        Ok(Outcome::changed(
            start_date,
            format!("Challenge '{name}' started on {start_date}"),
        ))
    }

    pub fn current_day(&self, today: NaiveDate) -> Option<i64> {
        self.challenge.as_ref().map(|v| v.current_day(today))
    }

    pub fn phase(&self, today: NaiveDate) -> ChallengePhase {
        self.challenge
            .as_ref()
            .map_or(ChallengePhase::NoChallenge, |v| v.phase(today))
    }

    /// Marks today's day. Returns the marked day, or `None` when there was nothing to mark
    /// because the day is already marked or the challenge is not running.
    pub fn mark_day_complete(&mut self, today: NaiveDate) -> TrackerResult<Outcome<Option<u32>>> {
        let challenge = self
            .challenge
            .as_mut()
            .ok_or_else(|| TrackerError::not_found("Active challenge"))?;

        let ChallengePhase::Day(day) = challenge.phase(today) else {
            debug!("Day {} is outside of the challenge", challenge.current_day(today));
            return Ok(Outcome::unchanged(None));
        };

        if !challenge.completed_days.insert(day) {
            debug!("Day {day} is already completed");
            return Ok(Outcome::unchanged(None));
        }
        info!("Completed day {day} of {:?}", challenge.name);
        Ok(Outcome::changed(
            Some(day),
            format!("Day {day} marked complete"),
        ))
    }

    pub fn reset_challenge(&mut self) -> Outcome {
        info!("Resetting challenge");
        self.challenge = None;
        Outcome::changed((), "Challenge reset")
    }

    pub fn progress_percent(&self) -> Percentage {
        let completed = self
            .challenge
            .as_ref()
            .map_or(0, |v| v.completed_days.len());
        ratio_percentage(completed, CHALLENGE_DAYS as usize)
    }

    pub fn status(&self, today: NaiveDate) -> ChallengeStatus {
        let phase = self.phase(today);
        let Some(challenge) = &self.challenge else {
            return ChallengeStatus {
                name: None,
                phase,
                completed: 0,
                progress: self.progress_percent(),
                can_mark: false,
                calendar: vec![],
            };
        };

        let current = match phase {
            ChallengePhase::Day(day) => Some(day),
            _ => None,
        };
        let calendar = (1..=CHALLENGE_DAYS)
            .map(|day| CalendarDay {
                day,
                completed: challenge.completed_days.contains(&day),
                current: current == Some(day),
            })
            .collect();

        ChallengeStatus {
            name: Some(challenge.name.clone()),
            phase,
            completed: challenge.completed_days.len(),
            progress: self.progress_percent(),
            can_mark: current.is_some_and(|day| !challenge.completed_days.contains(&day)),
            calendar,
        }
    }
}
