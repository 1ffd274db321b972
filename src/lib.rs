//! Small self improvement toolkit usable from a terminal: a workout log, a 30 day challenge,
//! a goal list and a countdown timer, plus a few helpers like a quiz and a phrase book.
//! Every tracker keeps its state in a single JSON file inside the application directory.
//!

pub mod cli;
pub mod error;
pub mod storage;
pub mod tools;
pub mod tracker;
pub mod utils;
