//! In-memory complaint desk backing the citizen portal and tracking page.
//!
//! Seeded with the demo complaints; submissions are appended in memory and
//! lost when the process exits.

use chrono::{NaiveDate, Utc};
use tokio::time::{sleep, Duration};
use tracing::{debug, info, instrument};
use validator::Validate;

use crate::error::AppError;
use crate::models::{
    ComplaintDetail, ComplaintId, ComplaintSummary, Department, NewComplaint, Priority, Status,
    TimelineEvent,
};

fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    // Only called with literal calendar dates below.
    NaiveDate::from_ymd_opt(year, month, day).unwrap_or_default()
}

fn seed_complaints() -> Vec<ComplaintSummary> {
    vec![
        ComplaintSummary {
            id: ComplaintId::new(1),
            title: "Broken Streetlight on Main St".to_string(),
            status: Status::InProgress,
            date: date(2024, 1, 15),
            department: Department::PublicWorks,
            priority: Priority::Medium,
        },
        ComplaintSummary {
            id: ComplaintId::new(2),
            title: "Pothole near City Park".to_string(),
            status: Status::Resolved,
            date: date(2024, 1, 10),
            department: Department::RoadsAndTraffic,
            priority: Priority::High,
        },
        ComplaintSummary {
            id: ComplaintId::new(3),
            title: "Noise Complaint - Construction".to_string(),
            status: Status::Pending,
            date: date(2024, 1, 20),
            department: Department::BuildingAndSafety,
            priority: Priority::Low,
        },
    ]
}

fn timeline_event(date: NaiveDate, time: &str, status: Status, description: &str) -> TimelineEvent {
    TimelineEvent {
        date,
        time: time.to_string(),
        status,
        description: description.to_string(),
    }
}

/// The record every tracking lookup resolves to.
fn demo_detail() -> ComplaintDetail {
    ComplaintDetail {
        summary: ComplaintSummary {
            id: ComplaintId::new(1),
            title: "Broken Streetlight on Main St".to_string(),
            status: Status::InProgress,
            date: date(2024, 1, 15),
            department: Department::PublicWorks,
            priority: Priority::Medium,
        },
        description: "The streetlight at the intersection of Main St and Oak Ave has been broken for over a week. This creates a safety hazard for pedestrians and drivers, especially during evening hours.".to_string(),
        location: "Main St & Oak Ave Intersection".to_string(),
        assigned_to: Some("John Smith".to_string()),
        last_updated: date(2024, 1, 18),
        estimated_completion: Some(date(2024, 1, 25)),
        timeline: vec![
            timeline_event(date(2024, 1, 15), "09:30 AM", Status::Submitted, "Complaint received and logged into system"),
            timeline_event(date(2024, 1, 16), "02:15 PM", Status::UnderReview, "Complaint reviewed by Public Works department"),
            timeline_event(date(2024, 1, 17), "10:45 AM", Status::Assigned, "Assigned to maintenance team for inspection"),
            timeline_event(date(2024, 1, 18), "03:20 PM", Status::InProgress, "Field inspection completed. Parts ordered for repair"),
        ],
    }
}

/// Citizen-facing complaint store.
pub struct ComplaintDesk {
    complaints: Vec<ComplaintSummary>,
    next_id: ComplaintId,
    submit_delay: Duration,
}

impl ComplaintDesk {
    /// Creates a desk holding the demo complaints.
    pub fn new(submit_delay: Duration) -> Self {
        let complaints = seed_complaints();
        let next_id = complaints
            .iter()
            .map(|c| c.id)
            .max()
            .map(|id| id.next())
            .unwrap_or(ComplaintId::new(1));
        Self {
            complaints,
            next_id,
            submit_delay,
        }
    }

    /// All complaints in the order they were filed.
    pub fn list(&self) -> &[ComplaintSummary] {
        &self.complaints
    }

    /// Summary row for one complaint.
    pub fn summary(&self, id: ComplaintId) -> Result<&ComplaintSummary, AppError> {
        self.complaints
            .iter()
            .find(|c| c.id == id)
            .ok_or_else(|| AppError::NotFound(format!("Complaint {}", id)))
    }

    /// Looks up a complaint for the tracking page.
    ///
    /// Any non-blank tracking ID yields the demo record; there is only one
    /// detailed record in the mock data.
    #[instrument(skip(self))]
    pub fn track(&self, tracking_id: &str) -> Result<ComplaintDetail, AppError> {
        if tracking_id.trim().is_empty() {
            return Err(AppError::Validation(
                "Tracking ID must not be empty".to_string(),
            ));
        }
        let detail = demo_detail();
        if tracking_id.parse::<ComplaintId>().ok() != Some(detail.summary.id) {
            debug!("Serving demo record for unknown tracking ID");
        }
        Ok(detail)
    }

    /// Files a new complaint after the simulated submission latency.
    #[instrument(skip(self, form), fields(title = %form.title))]
    pub async fn submit(&mut self, form: NewComplaint) -> Result<ComplaintId, AppError> {
        form.validate()?;
        for (field, value) in [
            ("title", &form.title),
            ("location", &form.location),
            ("description", &form.description),
        ] {
            if value.trim().is_empty() {
                return Err(AppError::Validation(format!("{} must not be blank", field)));
            }
        }

        sleep(self.submit_delay).await;

        let id = self.next_id;
        self.next_id = id.next();
        self.complaints.push(ComplaintSummary {
            id,
            title: form.title.trim().to_string(),
            status: Status::Pending,
            date: Utc::now().date_naive(),
            department: form.department,
            priority: form.priority,
        });
        info!(%id, "Complaint submitted");
        Ok(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seed_order() {
        let desk = ComplaintDesk::new(Duration::ZERO);
        let ids: Vec<String> = desk.list().iter().map(|c| c.id.to_string()).collect();
        assert_eq!(ids, vec!["C001", "C002", "C003"]);
    }

    #[test]
    fn test_demo_timeline_is_chronological() {
        let detail = demo_detail();
        let dates: Vec<NaiveDate> = detail.timeline.iter().map(|e| e.date).collect();
        let mut sorted = dates.clone();
        sorted.sort();
        assert_eq!(dates, sorted);
        assert_eq!(detail.timeline.last().map(|e| e.status), Some(detail.summary.status));
    }
}
