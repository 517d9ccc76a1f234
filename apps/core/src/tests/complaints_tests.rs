//! Complaint Desk Tests

use crate::complaints::ComplaintDesk;
use crate::error::AppError;
use crate::models::{ComplaintId, Department, NewComplaint, Priority, Status};
use std::time::Instant;
use tokio::time::Duration;

fn form(title: &str) -> NewComplaint {
    NewComplaint {
        title: title.to_string(),
        department: Department::Environment,
        priority: Priority::High,
        location: "Riverside Park".to_string(),
        description: "Overflowing bins near the playground".to_string(),
    }
}

#[cfg(test)]
mod listing_tests {
    use super::*;

    #[test]
    fn test_seed_complaints() {
        let desk = ComplaintDesk::new(Duration::ZERO);
        let list = desk.list();

        assert_eq!(list.len(), 3);
        assert_eq!(list[0].title, "Broken Streetlight on Main St");
        assert_eq!(list[1].status, Status::Resolved);
        assert_eq!(list[2].department, Department::BuildingAndSafety);
    }

    #[test]
    fn test_summary_lookup() {
        let desk = ComplaintDesk::new(Duration::ZERO);

        let summary = desk.summary(ComplaintId::new(2)).unwrap();
        assert_eq!(summary.title, "Pothole near City Park");

        let missing = desk.summary(ComplaintId::new(99));
        assert!(matches!(missing, Err(AppError::NotFound(_))));
    }
}

#[cfg(test)]
mod tracking_tests {
    use super::*;

    #[test]
    fn test_blank_tracking_id_rejected() {
        let desk = ComplaintDesk::new(Duration::ZERO);

        assert!(matches!(desk.track(""), Err(AppError::Validation(_))));
        assert!(matches!(desk.track("   "), Err(AppError::Validation(_))));
    }

    #[test]
    fn test_any_id_returns_demo_record() {
        let desk = ComplaintDesk::new(Duration::ZERO);

        for id in ["C001", "C003", "not-an-id"] {
            let detail = desk.track(id).unwrap();
            assert_eq!(detail.summary.id, ComplaintId::new(1), "{}", id);
            assert_eq!(detail.timeline.len(), 4);
            assert_eq!(detail.assigned_to.as_deref(), Some("John Smith"));
        }
    }
}

#[cfg(test)]
mod submission_tests {
    use super::*;

    #[tokio::test]
    async fn test_submit_issues_next_id() {
        let mut desk = ComplaintDesk::new(Duration::ZERO);

        let first = desk.submit(form("Overflowing bins")).await.unwrap();
        let second = desk.submit(form("Broken bench")).await.unwrap();

        assert_eq!(first.to_string(), "C004");
        assert_eq!(second.to_string(), "C005");

        let added = desk.summary(first).unwrap();
        assert_eq!(added.status, Status::Pending);
        assert_eq!(added.priority, Priority::High);
        assert_eq!(desk.list().len(), 5);
    }

    #[tokio::test]
    async fn test_submit_waits_for_simulated_latency() {
        let mut desk = ComplaintDesk::new(Duration::from_millis(40));

        let started = Instant::now();
        desk.submit(form("Graffiti on wall")).await.unwrap();
        assert!(started.elapsed() >= Duration::from_millis(40));
    }

    #[tokio::test]
    async fn test_invalid_form_rejected_without_side_effects() {
        let mut desk = ComplaintDesk::new(Duration::ZERO);

        let empty_title = form("");
        assert!(matches!(
            desk.submit(empty_title).await,
            Err(AppError::Validation(_))
        ));

        let mut blank_location = form("Loose manhole");
        blank_location.location = "   ".to_string();
        assert!(matches!(
            desk.submit(blank_location).await,
            Err(AppError::Validation(_))
        ));

        let mut blank_description = form("Loose manhole");
        blank_description.description = String::new();
        assert!(matches!(
            desk.submit(blank_description).await,
            Err(AppError::Validation(_))
        ));

        let long_title = form(&"x".repeat(201));
        assert!(matches!(
            desk.submit(long_title).await,
            Err(AppError::Validation(_))
        ));

        assert_eq!(desk.list().len(), 3);
        // The failed attempts did not consume IDs.
        let id = desk.submit(form("Loose manhole")).await.unwrap();
        assert_eq!(id, ComplaintId::new(4));
    }
}
