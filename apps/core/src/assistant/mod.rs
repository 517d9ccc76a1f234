//! # Assistant Module
//!
//! Scripted municipal assistant. No model, no network: a free-text utterance
//! is mapped to one canned answer by ordered keyword rules.
//!
//! ## Components
//! - `intent`: categories and the first-match keyword classifier
//! - `responses`: the read-only Category -> Response table

pub mod intent;
pub mod responses;

pub use intent::{Category, Classification, IntentClassifier};
pub use responses::{ResponseTable, GREETING};
