//! Test Module
//!
//! Test suite for the CivicDesk core.
//!
//! ## Test Categories
//! - `assistant_tests`: keyword classification, ordering, response table
//! - `chat_actor_tests`: conversation log, deferred replies, dismissal
//! - `complaints_tests`: complaint desk listing, tracking, submission
//! - `dashboard_tests`: static dashboard figures and derived numbers
//! - `config_tests`: environment-driven configuration

pub mod complaints_tests;
pub mod config_tests;
