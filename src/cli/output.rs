//! Plain text rendering of tracker view models. Rows are tab separated so the output can be
//! piped into other tools.

use std::fmt::Write;

use ansi_term::Colour;

use crate::tracker::{
    challenge::{ChallengePhase, ChallengeStatus, CHALLENGE_DAYS},
    fitness_challenge::FitnessChallenge,
    goal::{Goal, GoalStatus},
    outcome::Outcome,
    workout::{Dashboard, WorkoutRecord},
};

const NOTES_PREVIEW: usize = 50;
const CALENDAR_WIDTH: usize = 7;

pub fn print_messages<T>(outcome: &Outcome<T>) {
    for message in outcome.messages() {
        println!("{}", Colour::Green.paint(message));
    }
}

/// Cuts notes to the preview length, marking the cut with `...`.
pub fn preview_notes(notes: &str) -> String {
    if notes.chars().count() > NOTES_PREVIEW {
        let mut preview = notes.chars().take(NOTES_PREVIEW).collect::<String>();
        preview.push_str("...");
        preview
    } else {
        notes.to_string()
    }
}

pub fn render_workouts<'a>(records: impl IntoIterator<Item = &'a WorkoutRecord>) -> String {
    let mut output = String::new();
    for record in records {
        let _ = writeln!(
            output,
            "{}\t{}\t{} min\t{} kcal\t{}",
            record.date,
            record.activity,
            record.duration_minutes,
            record.calories_burned,
            preview_notes(&record.notes)
        );
    }
    output
}

pub fn render_dashboard(dashboard: &Dashboard) -> String {
    let mut output = String::new();
    let _ = writeln!(output, "Workouts this week: {}", dashboard.weekly_count);
    let _ = writeln!(output, "Active challenges: {}", dashboard.active_challenges);
    let _ = writeln!(
        output,
        "Calories burned this month: {}",
        dashboard.monthly_calories
    );
    if !dashboard.recent.is_empty() {
        let _ = writeln!(output, "\nRecent workouts:");
        output.push_str(&render_workouts(&dashboard.recent));
    }
    output
}

pub fn render_fitness_challenges(challenges: &[FitnessChallenge]) -> String {
    let mut output = String::new();
    for challenge in challenges {
        let end = challenge
            .end_date()
            .map_or_else(|| "never".to_string(), |v| v.to_string());
        let _ = writeln!(
            output,
            "{}\t{}\t{}/{}\tends {end}",
            challenge.name, challenge.kind, challenge.progress, challenge.target,
        );
    }
    output
}

pub fn render_challenge_status(status: &ChallengeStatus) -> String {
    let mut output = String::new();
    let name = status.name.as_deref().unwrap_or_default();
    let _ = match status.phase {
        ChallengePhase::NoChallenge => writeln!(output, "No active challenge"),
        ChallengePhase::NotStarted => writeln!(output, "Challenge starts soon!"),
        ChallengePhase::Day(day) => writeln!(output, "Day {day} of {CHALLENGE_DAYS}: {name}"),
        ChallengePhase::Finished => writeln!(
            output,
            "Challenge completed! {}/{CHALLENGE_DAYS} days",
            status.completed
        ),
    };
    if status.phase == ChallengePhase::NoChallenge {
        return output;
    }

    let _ = writeln!(
        output,
        "Completed days: {}/{CHALLENGE_DAYS} ({})",
        status.completed, status.progress
    );
    for week in status.calendar.chunks(CALENDAR_WIDTH) {
        let row = week
            .iter()
            .map(|cell| {
                let marker = if cell.completed {
                    '*'
                } else if cell.current {
                    '>'
                } else {
                    ' '
                };
                format!("{:>3}{marker}", cell.day)
            })
            .collect::<String>();
        let _ = writeln!(output, "{}", row.trim_end());
    }
    output
}

pub fn render_goals(goals: &[Goal]) -> String {
    let mut output = String::new();
    for goal in goals {
        let status = match goal.status {
            GoalStatus::Completed => Colour::Green.paint(goal.status.to_string()),
            GoalStatus::InProgress => Colour::Yellow.paint(goal.status.to_string()),
            GoalStatus::NotStarted => Colour::White.paint(goal.status.to_string()),
        };
        let _ = writeln!(
            output,
            "{}\t{}\t{}\t{}%\t{}",
            goal.id, goal.text, goal.target_date, goal.progress, status
        );
    }
    output
}
