//! Stateless helpers from the launcher: nothing here is persisted.

pub mod calculator;
pub mod quiz;
pub mod translator;
