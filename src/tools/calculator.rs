use std::fmt::Display;

use crate::error::{TrackerError, TrackerResult};

const ERROR_DISPLAY: &str = "Error";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Add,
    Subtract,
    Multiply,
    Divide,
}

impl Operation {
    /// `None` on division by zero.
    fn apply(self, left: f64, right: f64) -> Option<f64> {
        match self {
            Operation::Add => Some(left + right),
            Operation::Subtract => Some(left - right),
            Operation::Multiply => Some(left * right),
            Operation::Divide if right == 0. => None,
            Operation::Divide => Some(left / right),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Digit(char),
    Point,
    Operation(Operation),
    Equals,
    Clear,
}

impl TryFrom<char> for Key {
    type Error = TrackerError;

    fn try_from(value: char) -> Result<Self, Self::Error> {
        Ok(match value {
            '0'..='9' => Key::Digit(value),
            '.' => Key::Point,
            '+' => Key::Operation(Operation::Add),
            '-' => Key::Operation(Operation::Subtract),
            '*' | 'x' => Key::Operation(Operation::Multiply),
            '/' => Key::Operation(Operation::Divide),
            '=' => Key::Equals,
            'C' | 'c' => Key::Clear,
            other => {
                return Err(TrackerError::out_of_range(
                    "key",
                    format!("'{other}' is not a calculator key"),
                ))
            }
        })
    }
}

/// Four function calculator driven by key presses, evaluating strictly left to right.
#[derive(Debug, Clone)]
pub struct Calculator {
    input: String,
    operation: Option<Operation>,
    previous: Option<f64>,
    /// Next digit starts a new number instead of extending the display.
    reset_input: bool,
}

impl Default for Calculator {
    fn default() -> Self {
        Self {
            input: "0".into(),
            operation: None,
            previous: None,
            reset_input: false,
        }
    }
}

impl Display for Calculator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.input)
    }
}

impl Calculator {
    pub fn display(&self) -> &str {
        &self.input
    }

    pub fn press(&mut self, key: Key) {
        match key {
            Key::Digit(digit) => {
                if self.input == "0" || self.reset_input || self.input == ERROR_DISPLAY {
                    self.input = digit.to_string();
                    self.reset_input = false;
                } else {
                    self.input.push(digit);
                }
            }
            Key::Point => {
                if self.reset_input || self.input == ERROR_DISPLAY {
                    self.input = "0.".into();
                    self.reset_input = false;
                } else if !self.input.contains('.') {
                    self.input.push('.');
                }
            }
            Key::Clear => *self = Self::default(),
            Key::Operation(operation) => {
                if self.operation.is_some() && !self.reset_input {
                    self.calculate();
                }
                self.previous = Some(self.current_value());
                self.operation = Some(operation);
                self.reset_input = true;
            }
            Key::Equals => {
                if self.operation.is_some() {
                    self.calculate();
                    self.operation = None;
                }
            }
        }
    }

    /// Presses every key in `keys`, whitespace is skipped. Nothing is pressed if any key is
    /// unknown.
    pub fn press_all(&mut self, keys: &str) -> TrackerResult<&str> {
        let keys = keys
            .chars()
            .filter(|v| !v.is_whitespace())
            .map(Key::try_from)
            .collect::<TrackerResult<Vec<_>>>()?;
        for key in keys {
            self.press(key);
        }
        Ok(self.display())
    }

    fn current_value(&self) -> f64 {
        self.input.parse().unwrap_or(0.)
    }

    fn calculate(&mut self) {
        let (Some(operation), Some(previous)) = (self.operation, self.previous) else {
            return;
        };
        self.input = match operation.apply(previous, self.current_value()) {
            Some(result) => format_number(result),
            None => ERROR_DISPLAY.into(),
        };
        self.reset_input = true;
    }
}

/// Whole numbers are shown without a fractional part.
fn format_number(value: f64) -> String {
    if value.fract() == 0. && value.abs() < 1e15 {
        format!("{}", value as i64)
    } else {
        format!("{value}")
    }
}
