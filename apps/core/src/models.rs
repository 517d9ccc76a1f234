use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;
use validator::Validate;

use crate::error::AppError;

/// Represents a single entry in the assistant conversation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    /// The unique identifier for the message.
    pub id: Uuid,
    /// The text content of the message.
    pub text: String,
    /// Whether the assistant (rather than the citizen) wrote it.
    pub is_assistant: bool,
    /// When the message was appended.
    pub created_at: DateTime<Utc>,
}

impl Message {
    pub fn user(text: impl Into<String>) -> Self {
        Self::new(text.into(), false)
    }

    pub fn assistant(text: impl Into<String>) -> Self {
        Self::new(text.into(), true)
    }

    fn new(text: String, is_assistant: bool) -> Self {
        Self {
            id: Uuid::new_v4(),
            text,
            is_assistant,
            created_at: Utc::now(),
        }
    }
}

/// Append-only, insertion-ordered conversation.
///
/// There is no way to edit or remove an entry once pushed.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ConversationLog {
    messages: Vec<Message>,
}

impl ConversationLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a message and returns a reference to the stored copy.
    pub fn push(&mut self, message: Message) -> &Message {
        self.messages.push(message);
        &self.messages[self.messages.len() - 1]
    }

    pub fn push_user(&mut self, text: impl Into<String>) -> &Message {
        self.push(Message::user(text))
    }

    pub fn push_assistant(&mut self, text: impl Into<String>) -> &Message {
        self.push(Message::assistant(text))
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Message> {
        self.messages.iter()
    }

    /// Owned snapshot in insertion order.
    pub fn messages(&self) -> Vec<Message> {
        self.messages.clone()
    }
}

/// Complaint identifier: `C` followed by a zero-padded sequence number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ComplaintId(u32);

impl ComplaintId {
    pub fn new(sequence: u32) -> Self {
        Self(sequence)
    }

    pub fn sequence(&self) -> u32 {
        self.0
    }

    /// The identifier that follows this one.
    pub fn next(&self) -> Self {
        Self(self.0.saturating_add(1))
    }
}

impl fmt::Display for ComplaintId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "C{:03}", self.0)
    }
}

impl FromStr for ComplaintId {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let digits = s
            .trim()
            .strip_prefix(|c: char| c == 'C' || c == 'c')
            .ok_or_else(|| AppError::Validation(format!("Complaint ID must start with 'C': {}", s)))?;
        if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
            return Err(AppError::Validation(format!("Malformed complaint ID: {}", s)));
        }
        let sequence = digits
            .parse::<u32>()
            .map_err(|e| AppError::Validation(format!("Malformed complaint ID {}: {}", s, e)))?;
        Ok(Self(sequence))
    }
}

impl TryFrom<String> for ComplaintId {
    type Error = AppError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<ComplaintId> for String {
    fn from(id: ComplaintId) -> Self {
        id.to_string()
    }
}

/// Lifecycle stage of a complaint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Status {
    Submitted,
    Pending,
    PendingAssignment,
    UnderReview,
    Assigned,
    InProgress,
    Resolved,
}

impl Status {
    pub fn label(&self) -> &'static str {
        match self {
            Status::Submitted => "Submitted",
            Status::Pending => "Pending",
            Status::PendingAssignment => "Pending Assignment",
            Status::UnderReview => "Under Review",
            Status::Assigned => "Assigned",
            Status::InProgress => "In Progress",
            Status::Resolved => "Resolved",
        }
    }

    pub fn is_open(&self) -> bool {
        !matches!(self, Status::Resolved)
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.label())
    }
}

/// Urgency assigned by the citizen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Priority {
    High,
    Medium,
    Low,
}

impl Priority {
    pub fn label(&self) -> &'static str {
        match self {
            Priority::High => "High",
            Priority::Medium => "Medium",
            Priority::Low => "Low",
        }
    }

    /// Target window for addressing a complaint of this priority.
    pub fn response_window(&self) -> &'static str {
        match self {
            Priority::High => "24 hours",
            Priority::Medium => "3-5 days",
            Priority::Low => "1-2 weeks",
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.label())
    }
}

/// Municipal department a complaint is routed to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Department {
    PublicWorks,
    RoadsAndTraffic,
    PublicSafety,
    Environment,
    BuildingAndSafety,
}

impl Department {
    pub fn label(&self) -> &'static str {
        match self {
            Department::PublicWorks => "Public Works",
            Department::RoadsAndTraffic => "Roads & Traffic",
            Department::PublicSafety => "Public Safety",
            Department::Environment => "Environment",
            Department::BuildingAndSafety => "Building & Safety",
        }
    }
}

impl fmt::Display for Department {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.label())
    }
}

/// Row shown in the citizen's "My Complaints" list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComplaintSummary {
    pub id: ComplaintId,
    pub title: String,
    pub status: Status,
    pub date: NaiveDate,
    pub department: Department,
    pub priority: Priority,
}

/// One step in a complaint's history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimelineEvent {
    pub date: NaiveDate,
    pub time: String,
    pub status: Status,
    pub description: String,
}

/// Full record returned by the tracking page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComplaintDetail {
    pub summary: ComplaintSummary,
    pub description: String,
    pub location: String,
    pub assigned_to: Option<String>,
    pub last_updated: NaiveDate,
    pub estimated_completion: Option<NaiveDate>,
    pub timeline: Vec<TimelineEvent>,
}

/// Citizen submission form. Blank fields are rejected by `ComplaintDesk::submit`.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct NewComplaint {
    #[validate(length(max = 200))]
    pub title: String,
    pub department: Department,
    pub priority: Priority,
    pub location: String,
    pub description: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_complaint_id_format() {
        assert_eq!(ComplaintId::new(4).to_string(), "C004");
        assert_eq!("C012".parse::<ComplaintId>().unwrap(), ComplaintId::new(12));
        assert_eq!(" c7 ".parse::<ComplaintId>().unwrap(), ComplaintId::new(7));
    }

    #[test]
    fn test_complaint_id_rejects_garbage() {
        assert!("".parse::<ComplaintId>().is_err());
        assert!("C".parse::<ComplaintId>().is_err());
        assert!("X001".parse::<ComplaintId>().is_err());
        assert!("C-01".parse::<ComplaintId>().is_err());
    }

    #[test]
    fn test_complaint_id_serializes_as_string() {
        let json = serde_json::to_string(&ComplaintId::new(1)).unwrap();
        assert_eq!(json, "\"C001\"");
    }

    #[test]
    fn test_log_preserves_order() {
        let mut log = ConversationLog::new();
        log.push_user("first");
        log.push_assistant("second");
        log.push_user("third");

        let texts: Vec<&str> = log.iter().map(|m| m.text.as_str()).collect();
        assert_eq!(texts, vec!["first", "second", "third"]);
        assert_eq!(log.len(), 3);
        assert!(log.messages()[1].is_assistant);
    }

    #[test]
    fn test_status_labels() {
        assert_eq!(Status::InProgress.to_string(), "In Progress");
        assert!(!Status::Resolved.is_open());
        assert_eq!(Priority::High.response_window(), "24 hours");
    }
}
