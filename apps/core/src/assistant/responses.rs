//! Canned response table for the municipal assistant.
//!
//! The table is built once at startup (built-in texts, optionally overlaid by a
//! JSON file) and is read-only afterwards.

use super::intent::Category;
use crate::error::AppError;
use std::collections::HashMap;
use std::fs;
use std::path::Path;
use tracing::info;

/// Opening line the widget shows before the user has typed anything.
pub const GREETING: &str = "Hello! I'm your municipal assistant. I can help you navigate the complaint system, explain processes, or answer questions about your community services. How can I help you today?";

const SUBMIT_HELP: &str = "To submit a complaint: 1) Go to the 'Submit Complaint' tab, 2) Fill in the title and category, 3) Set priority level, 4) Add location details, 5) Provide a detailed description, 6) Optionally attach media, 7) Click 'Submit Complaint'. You'll receive a tracking ID to monitor progress.";

const TRACK_HELP: &str = "To track your complaint, you can use the 'My Complaints' tab in your citizen portal, or visit our tracking page and enter your complaint ID (format: C001, C002, etc.). You'll see real-time updates on status and progress.";

const STATUS_EXPLAIN: &str = "Complaint statuses include: 'Pending' (awaiting review), 'Under Review' (being evaluated), 'Assigned' (given to relevant department), 'In Progress' (being worked on), and 'Resolved' (completed). You'll receive notifications for each status change.";

const CONTACT: &str = "For urgent issues, contact us directly: Municipal Office: (555) 123-4567, Emergency Services: 911, Non-emergency Police: (555) 123-4568, Public Works: (555) 123-4569. You can also email us at info@municipality.gov";

const DEPARTMENTS: &str = "Our departments handle different issues: Public Works (streetlights, utilities), Roads & Traffic (potholes, traffic signals), Public Safety (noise, safety concerns), Environment (pollution, waste), Building & Safety (construction, permits).";

const PRIORITY: &str = "Priority levels: High (safety hazards, emergencies), Medium (moderate impact on daily life), Low (minor issues). High priority complaints are addressed within 24 hours, Medium within 3-5 days, Low within 1-2 weeks.";

const DEFAULT: &str = "I'm here to help with questions about submitting complaints, tracking progress, understanding our processes, or connecting you with the right department. What would you like to know?";

/// Read-only Category -> Response mapping.
///
/// Every category always has a non-empty entry, so lookups cannot fail.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResponseTable {
    entries: [String; Category::COUNT],
}

impl Default for ResponseTable {
    fn default() -> Self {
        Self {
            entries: Category::ALL.map(|category| builtin(category).to_string()),
        }
    }
}

fn builtin(category: Category) -> &'static str {
    match category {
        Category::SubmitHelp => SUBMIT_HELP,
        Category::TrackHelp => TRACK_HELP,
        Category::StatusExplain => STATUS_EXPLAIN,
        Category::Contact => CONTACT,
        Category::Departments => DEPARTMENTS,
        Category::Priority => PRIORITY,
        Category::Default => DEFAULT,
    }
}

impl ResponseTable {
    /// Returns the response text for a category.
    pub fn get(&self, category: Category) -> &str {
        &self.entries[category.index()]
    }

    /// Builds a table from the built-in texts with `overrides` laid on top.
    ///
    /// Categories missing from `overrides` keep their built-in text. A blank
    /// override is rejected so the table never holds an empty response.
    pub fn with_overrides(overrides: HashMap<Category, String>) -> Result<Self, AppError> {
        let mut table = Self::default();
        for (category, text) in overrides {
            if text.trim().is_empty() {
                return Err(AppError::Validation(format!(
                    "Response for '{}' must not be blank",
                    category
                )));
            }
            table.entries[category.index()] = text;
        }
        Ok(table)
    }

    /// Parses a JSON object keyed by snake_case category names.
    pub fn from_json(json: &str) -> Result<Self, AppError> {
        let overrides: HashMap<Category, String> = serde_json::from_str(json)?;
        Self::with_overrides(overrides)
    }

    /// Loads overrides from a JSON file on disk.
    pub fn load(path: &Path) -> Result<Self, AppError> {
        let raw = fs::read_to_string(path)?;
        let table = Self::from_json(&raw)?;
        info!("Loaded response overrides from {:?}", path);
        Ok(table)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_table_has_no_blank_entries() {
        let table = ResponseTable::default();
        for category in Category::ALL {
            assert!(!table.get(category).trim().is_empty(), "{} is blank", category);
        }
    }

    #[test]
    fn test_override_replaces_only_named_category() {
        let table = ResponseTable::from_json(r#"{"contact": "Call 311."}"#).unwrap();
        assert_eq!(table.get(Category::Contact), "Call 311.");
        assert_eq!(table.get(Category::Priority), PRIORITY);
    }

    #[test]
    fn test_blank_override_rejected() {
        let result = ResponseTable::from_json(r#"{"default": "   "}"#);
        assert!(matches!(result, Err(AppError::Validation(_))));
    }

    #[test]
    fn test_unknown_category_rejected() {
        let result = ResponseTable::from_json(r#"{"weather": "Sunny"}"#);
        assert!(result.is_err());
    }
}
