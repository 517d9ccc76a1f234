//! CivicDesk core: the municipal complaint desk, its admin dashboard data and
//! the scripted assistant that answers citizens' questions.

pub mod actors;
pub mod assistant;
pub mod complaints;
pub mod config;
pub mod dashboard;
pub mod error;
pub mod logging;
pub mod models;

#[cfg(test)]
mod tests;

pub use error::AppError;
