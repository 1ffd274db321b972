//! Record keeping for each tool. Trackers are plain state objects: operations validate their
//! input, mutate the state only when validation passed, and describe what should happen next
//! through [outcome::Effect]s. Loading, saving and rendering happen elsewhere.

pub mod challenge;
pub mod countdown;
pub mod fitness_challenge;
pub mod goal;
pub mod outcome;
pub mod settings;
pub mod validation;
pub mod workout;
