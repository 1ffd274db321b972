/// Something the presentation layer has to do after a tracker operation. Trackers never touch
/// the disk or the terminal themselves.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// State changed and should be written to its file.
    Persist,
    /// Text to show the user.
    Message(String),
    /// The countdown reached zero. Emitted once per completion.
    TimerFinished,
}

/// Result of a successful operation: the value it produced plus the effects to apply.
#[derive(Debug, Clone, PartialEq)]
#[must_use]
pub struct Outcome<T = ()> {
    pub value: T,
    pub effects: Vec<Effect>,
}

impl<T> Outcome<T> {
    /// State changed: persist it and tell the user `message`.
    pub fn changed(value: T, message: impl Into<String>) -> Self {
        Self {
            value,
            effects: vec![Effect::Persist, Effect::Message(message.into())],
        }
    }

    /// Nothing happened. Used by idempotent operations on their repeated calls.
    pub fn unchanged(value: T) -> Self {
        Self {
            value,
            effects: vec![],
        }
    }

    pub fn with_effect(mut self, effect: Effect) -> Self {
        self.effects.push(effect);
        self
    }

    pub fn needs_persist(&self) -> bool {
        self.effects.contains(&Effect::Persist)
    }

    pub fn messages(&self) -> impl Iterator<Item = &str> {
        self.effects.iter().filter_map(|v| match v {
            Effect::Message(message) => Some(message.as_str()),
            _ => None,
        })
    }
}
