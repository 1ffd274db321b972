use anyhow::Result;
use clap::Subcommand;

use crate::{
    storage::GOALS_FILE,
    tracker::goal::{parse_percent, GoalId, GoalList},
};

use super::{
    output::{print_messages, render_goals},
    Context,
};

#[derive(Debug, Subcommand)]
pub enum GoalCommand {
    #[command(about = "Add a goal")]
    Add {
        text: String,
        #[arg(long, short, default_value = "", help = "Date the goal should be reached by")]
        target: String,
    },
    #[command(about = "Change the text and target date of a goal")]
    Edit {
        id: GoalId,
        text: String,
        #[arg(long, short, default_value = "")]
        target: String,
    },
    #[command(about = "Delete a goal")]
    Delete { id: GoalId },
    #[command(about = "Mark a goal as completed")]
    Complete { id: GoalId },
    #[command(about = "Set the progress of a goal, from 0 to 100")]
    Progress {
        id: GoalId,
        #[arg(allow_hyphen_values = true, help = "Progress in percent, \"40\" or \"40%\"")]
        percent: String,
    },
    #[command(about = "Every goal with its progress and status")]
    List,
}

pub async fn process_goal_command(command: GoalCommand, context: &Context) -> Result<()> {
    let mut goals = context.open::<GoalList>(GOALS_FILE).await?;
    match command {
        GoalCommand::Add { text, target } => {
            let target = context.normalize_date(&target);
            let outcome = goals.apply(|v| v.add_goal(&text, &target)).await?;
            print_messages(&outcome);
        }
        GoalCommand::Edit { id, text, target } => {
            let target = context.normalize_date(&target);
            let outcome = goals.apply(|v| v.edit_goal(id, &text, &target)).await?;
            print_messages(&outcome);
        }
        GoalCommand::Delete { id } => {
            let outcome = goals.apply(|v| v.delete_goal(id)).await?;
            print_messages(&outcome);
        }
        GoalCommand::Complete { id } => {
            let outcome = goals.apply(|v| v.mark_complete(id)).await?;
            print_messages(&outcome);
        }
        GoalCommand::Progress { id, percent } => {
            let percent = parse_percent(&percent)?;
            let outcome = goals.apply(|v| v.update_progress(id, percent)).await?;
            print_messages(&outcome);
            println!("Status: {}", outcome.value);
        }
        GoalCommand::List => {
            let list = goals.state().goals();
            if list.is_empty() {
                println!("No goals yet");
            }
            print!("{}", render_goals(list));
        }
    }
    Ok(())
}
