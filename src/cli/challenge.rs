use ansi_term::Colour;
use anyhow::Result;
use clap::Subcommand;

use crate::{
    storage::CHALLENGE_FILE,
    tracker::{challenge::ChallengeTracker, outcome::Outcome},
};

use super::{
    output::{print_messages, render_challenge_status},
    Context,
};

#[derive(Debug, Subcommand)]
pub enum ChallengeCommand {
    #[command(about = "Start a new 30 day challenge, replacing the current one")]
    Start {
        name: String,
        #[arg(
            long,
            short,
            default_value = "",
            help = "First day of the challenge, today by default. Examples are \"today\", \"tomorrow\", \"15/03/2025\""
        )]
        start: String,
    },
    #[command(about = "Current day and the calendar of completed days")]
    Status,
    #[command(about = "Mark today as completed")]
    Mark,
    #[command(about = "Drop the current challenge")]
    Reset,
}

pub async fn process_challenge_command(command: ChallengeCommand, context: &Context) -> Result<()> {
    let mut tracker = context.open::<ChallengeTracker>(CHALLENGE_FILE).await?;
    let today = context.today();
    match command {
        ChallengeCommand::Start { name, start } => {
            let start = context.normalize_date(&start);
            let outcome = tracker
                .apply(|v| v.start_challenge(&name, &start, today))
                .await?;
            print_messages(&outcome);
        }
        ChallengeCommand::Status => {
            print!("{}", render_challenge_status(&tracker.state().status(today)));
        }
        ChallengeCommand::Mark => {
            let outcome = tracker.apply(|v| v.mark_day_complete(today)).await?;
            if outcome.value.is_none() {
                println!(
                    "{}",
                    Colour::Yellow.paint("Nothing to mark: today is already completed or outside of the challenge")
                );
            }
            print_messages(&outcome);
        }
        ChallengeCommand::Reset => {
            let outcome: Outcome = tracker.apply(|v| Ok(v.reset_challenge())).await?;
            print_messages(&outcome);
        }
    }
    Ok(())
}
