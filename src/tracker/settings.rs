use std::fmt::Display;

use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use tracing::info;

use super::{outcome::Outcome, workout::ActivityType};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
pub enum Theme {
    #[default]
    Light,
    Dark,
    System,
}

impl Display for Theme {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Theme::Light => write!(f, "Light"),
            Theme::Dark => write!(f, "Dark"),
            Theme::System => write!(f, "System"),
        }
    }
}

/// Fitness tracker preferences. Missing keys in the stored file fall back to the defaults.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub default_location: ActivityType,
    pub notifications: bool,
    pub theme: Theme,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            default_location: ActivityType::Gym,
            notifications: true,
            theme: Theme::Light,
        }
    }
}

/// Fields to change, `None` keeps the current value.
#[derive(Debug, Clone, Default)]
pub struct SettingsUpdate {
    pub default_location: Option<ActivityType>,
    pub notifications: Option<bool>,
    pub theme: Option<Theme>,
}

impl Settings {
    pub fn update(&mut self, update: SettingsUpdate) -> Outcome {
        if let Some(location) = update.default_location {
            self.default_location = location;
        }
        if let Some(notifications) = update.notifications {
            self.notifications = notifications;
        }
        if let Some(theme) = update.theme {
            self.theme = theme;
        }
        info!("Settings updated to {:?}", self);
        Outcome::changed((), "Settings saved successfully!")
    }
}

#[cfg(test)]
mod tests {
    use crate::tracker::workout::ActivityType;

    use super::{Settings, SettingsUpdate, Theme};

    #[test]
    fn partial_update() {
        let mut settings = Settings::default();
        let outcome = settings.update(SettingsUpdate {
            theme: Some(Theme::Dark),
            ..Default::default()
        });
        assert!(outcome.needs_persist());
        assert_eq!(settings.theme, Theme::Dark);
        assert!(settings.notifications);
        assert_eq!(settings.default_location, ActivityType::Gym);
    }

    #[test]
    fn missing_keys_use_defaults() {
        let settings: Settings =
            serde_json::from_str(r#"{"default_location": "Yoga"}"#).unwrap();
        assert_eq!(settings.default_location, ActivityType::Yoga);
        assert!(settings.notifications);
        assert_eq!(settings.theme, Theme::Light);
    }
}
