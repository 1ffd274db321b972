pub mod challenge;
pub mod dates;
pub mod goal;
pub mod output;
pub mod settings;
pub mod timer;
pub mod tools;
pub mod workout;

use std::path::PathBuf;

use anyhow::Result;
use challenge::{process_challenge_command, ChallengeCommand};
use chrono::{DateTime, Local, NaiveDate};
use clap::{Parser, Subcommand};
use dates::{normalize_date, DateStyle};
use goal::{process_goal_command, GoalCommand};
use serde::{de::DeserializeOwned, Serialize};
use settings::{process_settings_command, SettingsCommand};
use timer::{process_timer_command, TimerCommand};
use tools::{process_calc_command, process_translate_command, run_quiz};
use tracing::{debug, level_filters::LevelFilter};
use workout::{
    process_dashboard_command, process_fitness_challenge_command, process_workout_command,
    FitnessChallengeCommand, WorkoutCommand,
};

use crate::{
    error::TrackerResult,
    storage::{json_storage::JsonFileStorage, persisted::Persisted, StoragePaths, SETTINGS_FILE},
    tools::{quiz::GROWTH_MINDSET_QUIZ, translator::Language},
    tracker::settings::Settings,
    utils::{
        clock::{Clock, DefaultClock},
        dir::{create_application_default_path, ensure_dir},
        logging::{enable_logging, CLI_PREFIX},
    },
};

#[derive(Parser, Debug)]
#[command(name = "Growthkit", version, long_about = None)]
#[command(about = "Workouts, challenges, goals and a few small helpers for self improvement", long_about = None)]
pub struct Args {
    #[command(subcommand)]
    commands: Commands,
    #[arg(
        long,
        global = true,
        env = "GROWTHKIT_DIR",
        help = "Application directory. By default tries to save into $XDG_STATE_HOME or $HOME/.local/state"
    )]
    dir: Option<PathBuf>,
    #[arg(long, global = true, help = "Enable logging")]
    log: bool,
    #[arg(long, global = true, default_value_t = DateStyle::Uk, help = "Style of dates used during parsing. For Uk it's day/month/year. For Us it's month/day/year")]
    date_style: DateStyle,
}

#[derive(Subcommand, Debug)]
#[command(version, about, long_about = None)]
enum Commands {
    #[command(about = "Log and review workouts")]
    Workout {
        #[command(subcommand)]
        command: WorkoutCommand,
    },
    #[command(about = "Weekly workouts, monthly calories, active challenges and recent workouts")]
    Dashboard,
    #[command(about = "Fitness challenges with a target and a timeframe")]
    FitnessChallenge {
        #[command(subcommand)]
        command: FitnessChallengeCommand,
    },
    #[command(about = "30 day challenge")]
    Challenge {
        #[command(subcommand)]
        command: ChallengeCommand,
    },
    #[command(about = "Personal goals")]
    Goal {
        #[command(subcommand)]
        command: GoalCommand,
    },
    #[command(about = "Countdown timer")]
    Timer {
        #[command(subcommand)]
        command: TimerCommands,
    },
    #[command(about = "Growth mindset quiz")]
    Quiz,
    #[command(about = "Simple calculator. Keys are digits, '.', '+', '-', '*', '/', '=' and 'C'")]
    Calc {
        #[arg(required = true, allow_hyphen_values = true, help = "Keys to press, for example \"12+3=\"")]
        keys: Vec<String>,
    },
    #[command(about = "English/Myanmar phrase book")]
    Translate {
        #[arg(long, short, default_value_t = Language::English, help = "Language of the text")]
        from: Language,
        #[arg(required = true)]
        text: Vec<String>,
    },
    #[command(about = "Fitness tracker settings")]
    Settings {
        #[command(subcommand)]
        command: SettingsCommand,
    },
}

#[derive(Subcommand, Debug)]
enum TimerCommands {
    #[command(about = "Start a countdown in the foreground. Ctrl-C pauses it and exits")]
    Start(TimerCommand),
}

/// Everything a command needs from the outside world.
pub struct Context {
    pub paths: StoragePaths,
    pub clock: Box<dyn Clock>,
    pub date_style: DateStyle,
}

impl Context {
    pub async fn open<T>(&self, file_name: &str) -> TrackerResult<Persisted<T, JsonFileStorage>>
    where
        T: Clone + Serialize + DeserializeOwned + Default,
    {
        Persisted::load(self.paths.storage(file_name)).await
    }

    pub async fn settings(&self) -> Result<Settings> {
        Ok(self.open::<Settings>(SETTINGS_FILE).await?.into_state())
    }

    pub fn today(&self) -> NaiveDate {
        self.clock.today()
    }

    pub fn now_local(&self) -> DateTime<Local> {
        self.clock.time().with_timezone(&Local)
    }

    /// See [normalize_date].
    pub fn normalize_date(&self, input: &str) -> String {
        normalize_date(input, self.now_local(), self.date_style)
    }
}

pub async fn run_cli() -> Result<()> {
    let args = Args::parse();

    let dir = match &args.dir {
        Some(dir) => {
            ensure_dir(dir)?;
            dir.clone()
        }
        None => create_application_default_path()?,
    };

    let logging_level = if args.log {
        Some(LevelFilter::TRACE)
    } else {
        None
    };
    enable_logging(CLI_PREFIX, &dir, logging_level, args.log)?;
    debug!("Using application directory {dir:?}");

    let context = Context {
        paths: StoragePaths::new(dir),
        clock: Box::new(DefaultClock),
        date_style: args.date_style,
    };
    run_command(args.commands, &context).await
}

async fn run_command(command: Commands, context: &Context) -> Result<()> {
    match command {
        Commands::Workout { command } => process_workout_command(command, context).await,
        Commands::Dashboard => process_dashboard_command(context).await,
        Commands::FitnessChallenge { command } => {
            process_fitness_challenge_command(command, context).await
        }
        Commands::Challenge { command } => process_challenge_command(command, context).await,
        Commands::Goal { command } => process_goal_command(command, context).await,
        Commands::Timer {
            command: TimerCommands::Start(command),
        } => process_timer_command(command, context).await,
        Commands::Quiz => run_quiz(GROWTH_MINDSET_QUIZ),
        Commands::Calc { keys } => process_calc_command(&keys.concat()),
        Commands::Translate { from, text } => process_translate_command(from, &text.join(" ")),
        Commands::Settings { command } => process_settings_command(command, context).await,
    }
}
