//! Admin dashboard data.
//!
//! The figures are fixed demo arrays. The derived helpers compute the few
//! numbers the dashboard shows beyond the raw series.

use chrono::NaiveDate;
use serde::Serialize;

use crate::models::{ComplaintId, Department, Priority, Status};

/// Complaint volume for one month.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MonthlyVolume {
    pub month: &'static str,
    pub total: u32,
    pub resolved: u32,
    pub pending: u32,
}

/// Complaint count routed to one department.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DepartmentLoad {
    pub department: Department,
    pub complaints: u32,
}

/// Average days to resolution for one week.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ResolutionTrend {
    pub week: &'static str,
    pub avg_days: f32,
}

/// Headline card: value plus percent change against the previous period.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct HeadlineStat {
    pub title: &'static str,
    pub value: u32,
    pub change_percent: i32,
}

/// Row of the admin "recent complaints" table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AdminComplaintRow {
    pub id: ComplaintId,
    pub title: &'static str,
    pub status: Status,
    pub date: NaiveDate,
    pub department: Department,
    pub priority: Priority,
    pub assigned_to: Option<&'static str>,
}

/// Everything the admin dashboard renders.
#[derive(Debug, Clone, Serialize)]
pub struct DashboardSnapshot {
    pub monthly: Vec<MonthlyVolume>,
    pub by_department: Vec<DepartmentLoad>,
    pub resolution_trend: Vec<ResolutionTrend>,
    pub headline: Vec<HeadlineStat>,
    pub recent: Vec<AdminComplaintRow>,
}

fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap_or_default()
}

impl Default for DashboardSnapshot {
    fn default() -> Self {
        let month = |month, total, resolved, pending| MonthlyVolume {
            month,
            total,
            resolved,
            pending,
        };
        let load = |department, complaints| DepartmentLoad {
            department,
            complaints,
        };
        let week = |week, avg_days| ResolutionTrend { week, avg_days };
        let stat = |title, value, change_percent| HeadlineStat {
            title,
            value,
            change_percent,
        };

        Self {
            monthly: vec![
                month("Jan", 45, 32, 13),
                month("Feb", 52, 38, 14),
                month("Mar", 38, 29, 9),
                month("Apr", 61, 45, 16),
                month("May", 55, 42, 13),
                month("Jun", 49, 35, 14),
            ],
            by_department: vec![
                load(Department::PublicWorks, 120),
                load(Department::RoadsAndTraffic, 85),
                load(Department::PublicSafety, 65),
                load(Department::Environment, 45),
                load(Department::BuildingAndSafety, 35),
            ],
            resolution_trend: vec![
                week("Week 1", 5.2),
                week("Week 2", 4.8),
                week("Week 3", 6.1),
                week("Week 4", 4.5),
            ],
            headline: vec![
                stat("Total Complaints", 1247, 12),
                stat("Resolved This Month", 89, 8),
                stat("Pending Review", 23, -15),
                stat("High Priority", 7, -2),
            ],
            recent: vec![
                AdminComplaintRow {
                    id: ComplaintId::new(1),
                    title: "Broken Streetlight on Main St",
                    status: Status::InProgress,
                    date: date(2024, 1, 15),
                    department: Department::PublicWorks,
                    priority: Priority::Medium,
                    assigned_to: Some("John Smith"),
                },
                AdminComplaintRow {
                    id: ComplaintId::new(2),
                    title: "Pothole near City Park",
                    status: Status::PendingAssignment,
                    date: date(2024, 1, 20),
                    department: Department::RoadsAndTraffic,
                    priority: Priority::High,
                    assigned_to: None,
                },
                AdminComplaintRow {
                    id: ComplaintId::new(3),
                    title: "Noise Complaint - Construction",
                    status: Status::UnderReview,
                    date: date(2024, 1, 18),
                    department: Department::BuildingAndSafety,
                    priority: Priority::Low,
                    assigned_to: Some("Sarah Johnson"),
                },
            ],
        }
    }
}

impl DashboardSnapshot {
    /// Share of complaints resolved across all months, in `0.0..=1.0`.
    pub fn resolution_rate(&self) -> f64 {
        let (resolved, total) = self
            .monthly
            .iter()
            .fold((0u64, 0u64), |(resolved, total), m| {
                (resolved + u64::from(m.resolved), total + u64::from(m.total))
            });
        if total == 0 {
            return 0.0;
        }
        resolved as f64 / total as f64
    }

    /// Department with the most complaints. Ties go to the one listed first.
    pub fn busiest_department(&self) -> Option<DepartmentLoad> {
        self.by_department
            .iter()
            .copied()
            .reduce(|best, next| if next.complaints > best.complaints { next } else { best })
    }

    /// Mean of the weekly resolution averages.
    pub fn mean_resolution_days(&self) -> Option<f32> {
        if self.resolution_trend.is_empty() {
            return None;
        }
        let sum: f32 = self.resolution_trend.iter().map(|w| w.avg_days).sum();
        Some(sum / self.resolution_trend.len() as f32)
    }

    /// Month with the highest complaint volume. Ties go to the earlier month.
    pub fn peak_month(&self) -> Option<MonthlyVolume> {
        self.monthly
            .iter()
            .copied()
            .reduce(|best, next| if next.total > best.total { next } else { best })
    }

    /// Recent complaints nobody has been assigned to yet.
    pub fn unassigned(&self) -> impl Iterator<Item = &AdminComplaintRow> {
        self.recent.iter().filter(|row| row.assigned_to.is_none())
    }
}
