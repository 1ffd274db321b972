use anyhow::Result;
use clap::Subcommand;

use crate::{
    storage::SETTINGS_FILE,
    tracker::{
        settings::{Settings, SettingsUpdate, Theme},
        workout::ActivityType,
    },
};

use super::{output::print_messages, Context};

#[derive(Debug, Subcommand)]
pub enum SettingsCommand {
    #[command(about = "Print the current settings")]
    Show,
    #[command(about = "Change settings. Options that are not passed keep their value")]
    Set {
        #[arg(long, help = "Activity used when a workout is logged without a type")]
        location: Option<String>,
        #[arg(long)]
        notifications: Option<bool>,
        #[arg(long)]
        theme: Option<Theme>,
    },
}

pub async fn process_settings_command(command: SettingsCommand, context: &Context) -> Result<()> {
    let mut settings = context.open::<Settings>(SETTINGS_FILE).await?;
    match command {
        SettingsCommand::Show => {
            let Settings {
                default_location,
                notifications,
                theme,
            } = settings.state();
            println!("Default location: {default_location}");
            println!("Notifications: {notifications}");
            println!("Theme: {theme}");
        }
        SettingsCommand::Set {
            location,
            notifications,
            theme,
        } => {
            let update = SettingsUpdate {
                default_location: location.map(ActivityType::from),
                notifications,
                theme,
            };
            let outcome = settings.apply(|v| Ok(v.update(update))).await?;
            print_messages(&outcome);
        }
    }
    Ok(())
}
