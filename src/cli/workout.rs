use anyhow::Result;
use clap::Subcommand;

use crate::{
    storage::{FITNESS_CHALLENGES_FILE, WORKOUTS_FILE},
    tracker::{
        fitness_challenge::{FitnessChallengeForm, FitnessChallenges},
        workout::{WorkoutForm, WorkoutLog},
    },
    utils::time::date_to_record_name,
};

use super::{
    output::{print_messages, render_dashboard, render_fitness_challenges, render_workouts},
    Context,
};

const DATE_HELP: &str =
    "Examples are \"today\", \"yesterday\", \"15/03/2025\", \"2025-03-15\"";

#[derive(Debug, Subcommand)]
pub enum WorkoutCommand {
    #[command(about = "Log a finished workout")]
    Log {
        #[arg(long, short, help = format!("Date of the workout, today by default. {DATE_HELP}"))]
        date: Option<String>,
        #[arg(
            long = "type",
            short = 't',
            help = "Activity, for example Gym, Running or Yoga. Defaults to the location from settings"
        )]
        activity: Option<String>,
        #[arg(long, short = 'm', allow_hyphen_values = true, help = "Duration in minutes")]
        duration: String,
        #[arg(long, short, default_value = "", allow_hyphen_values = true, help = "Calories burned")]
        calories: String,
        #[arg(long, short, default_value = "")]
        notes: String,
    },
    #[command(about = "Workouts, newest first")]
    List {
        #[arg(short = 'n', long, help = "Show at most this many workouts")]
        limit: Option<usize>,
    },
    #[command(about = "Workouts this week and calories burned this month")]
    Stats,
}

#[derive(Debug, Subcommand)]
pub enum FitnessChallengeCommand {
    #[command(about = "Create a challenge with a target to reach within a timeframe")]
    Create {
        name: String,
        #[arg(long = "type", short = 't', help = "What is measured, for example \"Distance\"")]
        kind: String,
        #[arg(long, allow_hyphen_values = true)]
        target: String,
        #[arg(long, allow_hyphen_values = true, help = "Length of the challenge in days")]
        timeframe: String,
        #[arg(long, short, default_value = "today", help = format!("Start of the challenge. {DATE_HELP}"))]
        start: String,
    },
    #[command(about = "Every created challenge")]
    List,
}

pub async fn process_workout_command(command: WorkoutCommand, context: &Context) -> Result<()> {
    match command {
        WorkoutCommand::Log {
            date,
            activity,
            duration,
            calories,
            notes,
        } => {
            let activity = match activity {
                Some(v) => v,
                None => context.settings().await?.default_location.to_string(),
            };
            let date = date
                .map(|v| context.normalize_date(&v))
                .unwrap_or_else(|| date_to_record_name(context.today()));

            let mut log = context.open::<WorkoutLog>(WORKOUTS_FILE).await?;
            let outcome = log
                .apply(|v| {
                    v.log_workout(WorkoutForm {
                        date: &date,
                        activity: &activity,
                        duration_minutes: &duration,
                        calories_burned: &calories,
                        notes: &notes,
                    })
                })
                .await?;
            print_messages(&outcome);
        }
        WorkoutCommand::List { limit } => {
            let log = context.open::<WorkoutLog>(WORKOUTS_FILE).await?;
            let records = match limit {
                Some(n) => log.state().recent(n),
                None => log.state().history(),
            };
            if records.is_empty() {
                println!("No workouts logged yet");
            }
            print!("{}", render_workouts(records));
        }
        WorkoutCommand::Stats => {
            let log = context.open::<WorkoutLog>(WORKOUTS_FILE).await?;
            let today = context.today();
            println!("Workouts this week: {}", log.state().weekly_count(today));
            println!(
                "Calories burned this month: {}",
                log.state().monthly_calories(today)
            );
        }
    }
    Ok(())
}

pub async fn process_dashboard_command(context: &Context) -> Result<()> {
    let log = context.open::<WorkoutLog>(WORKOUTS_FILE).await?;
    let challenges = context
        .open::<FitnessChallenges>(FITNESS_CHALLENGES_FILE)
        .await?;
    let dashboard = log
        .state()
        .dashboard(context.today(), challenges.state().active_count());
    print!("{}", render_dashboard(&dashboard));
    Ok(())
}

pub async fn process_fitness_challenge_command(
    command: FitnessChallengeCommand,
    context: &Context,
) -> Result<()> {
    let mut challenges = context
        .open::<FitnessChallenges>(FITNESS_CHALLENGES_FILE)
        .await?;
    match command {
        FitnessChallengeCommand::Create {
            name,
            kind,
            target,
            timeframe,
            start,
        } => {
            let start = context.normalize_date(&start);
            let outcome = challenges
                .apply(|v| {
                    v.create_challenge(FitnessChallengeForm {
                        name: &name,
                        kind: &kind,
                        target: &target,
                        timeframe_days: &timeframe,
                        start_date: &start,
                    })
                })
                .await?;
            print_messages(&outcome);
            if let Some(end) = outcome.value.end_date() {
                println!("Ends on {end}");
            }
        }
        FitnessChallengeCommand::List => {
            let list = challenges.state().challenges();
            if list.is_empty() {
                println!("No challenges yet");
            }
            print!("{}", render_fitness_challenges(list));
        }
    }
    Ok(())
}
