use std::fmt::Display;

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::{TrackerError, TrackerResult};

use super::{
    outcome::Outcome,
    validation::{parse_integer, required_text},
};

pub type GoalId = u32;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum GoalStatus {
    #[default]
    NotStarted,
    InProgress,
    Completed,
}

impl GoalStatus {
    pub fn from_progress(progress: u8) -> Self {
        match progress {
            0 => GoalStatus::NotStarted,
            100 => GoalStatus::Completed,
            _ => GoalStatus::InProgress,
        }
    }
}

impl Display for GoalStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GoalStatus::NotStarted => write!(f, "Not Started"),
            GoalStatus::InProgress => write!(f, "In Progress"),
            GoalStatus::Completed => write!(f, "Completed"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Goal {
    pub id: GoalId,
    pub text: String,
    /// Free text, the goal list doesn't interpret it.
    #[serde(default)]
    pub target_date: String,
    pub progress: u8,
    pub status: GoalStatus,
}

/// Goals in insertion order. Ids are never reused while the goal they belong to exists.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GoalList {
    goals: Vec<Goal>,
}

impl GoalList {
    pub fn goals(&self) -> &[Goal] {
        &self.goals
    }

    pub fn get(&self, id: GoalId) -> Option<&Goal> {
        self.goals.iter().find(|v| v.id == id)
    }

    pub fn add_goal(&mut self, text: &str, target_date: &str) -> TrackerResult<Outcome<GoalId>> {
        let text = required_text("goal", text)?;
        let id = self.goals.iter().map(|v| v.id).max().map_or(1, |v| v + 1);
        info!("Adding goal {id}: {text:?}");
        self.goals.push(Goal {
            id,
            text: text.to_string(),
            target_date: target_date.trim().to_string(),
            progress: 0,
            status: GoalStatus::NotStarted,
        });
        Ok(Outcome::changed(id, format!("Added goal {id}")))
    }

    pub fn edit_goal(&mut self, id: GoalId, text: &str, target_date: &str) -> TrackerResult<Outcome> {
        let text = required_text("goal", text)?;
        let goal = self.get_mut(id)?;
        goal.text = text.to_string();
        goal.target_date = target_date.trim().to_string();
        Ok(Outcome::changed((), format!("Updated goal {id}")))
    }

    pub fn delete_goal(&mut self, id: GoalId) -> TrackerResult<Outcome<Goal>> {
        let index = self
            .goals
            .iter()
            .position(|v| v.id == id)
            .ok_or_else(|| goal_not_found(id))?;
        let goal = self.goals.remove(index);
        info!("Deleted goal {id}");
        Ok(Outcome::changed(goal, format!("Deleted goal {id}")))
    }

    pub fn mark_complete(&mut self, id: GoalId) -> TrackerResult<Outcome> {
        let goal = self.get_mut(id)?;
        goal.progress = 100;
        goal.status = GoalStatus::Completed;
        Ok(Outcome::changed((), format!("Goal {id} completed")))
    }

    /// Sets progress and derives the status from it.
    pub fn update_progress(&mut self, id: GoalId, percent: i64) -> TrackerResult<Outcome<GoalStatus>> {
        let progress = u8::try_from(percent)
            .ok()
            .filter(|v| *v <= 100)
            .ok_or_else(|| {
                TrackerError::out_of_range("progress", format!("{percent} is not within 0-100"))
            })?;
        let goal = self.get_mut(id)?;
        goal.progress = progress;
        goal.status = GoalStatus::from_progress(progress);
        Ok(Outcome::changed(
            goal.status,
            format!("Goal {id} is {progress}% done"),
        ))
    }

    fn get_mut(&mut self, id: GoalId) -> TrackerResult<&mut Goal> {
        self.goals
            .iter_mut()
            .find(|v| v.id == id)
            .ok_or_else(|| goal_not_found(id))
    }
}

/// Reads a percentage typed by the user, `40` and `40%` both work.
pub fn parse_percent(value: &str) -> TrackerResult<i64> {
    parse_integer("progress", value.trim().trim_end_matches('%'))
}

fn goal_not_found(id: GoalId) -> TrackerError {
    TrackerError::not_found(format!("Goal {id}"))
}
