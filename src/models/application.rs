use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use utoipa::ToSchema;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum ApplicationStatus {
    #[default]
    Submitted,
    UnderReview,
    Interview,
    Rejected,
    Accepted,
}

impl ApplicationStatus {
    pub const ALL: [ApplicationStatus; 5] = [
        ApplicationStatus::Submitted,
        ApplicationStatus::UnderReview,
        ApplicationStatus::Interview,
        ApplicationStatus::Rejected,
        ApplicationStatus::Accepted,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            ApplicationStatus::Submitted => "submitted",
            ApplicationStatus::UnderReview => "under_review",
            ApplicationStatus::Interview => "interview",
            ApplicationStatus::Rejected => "rejected",
            ApplicationStatus::Accepted => "accepted",
        }
    }
}

impl fmt::Display for ApplicationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, thiserror::Error)]
#[error("unknown application status: {0}")]
pub struct UnknownStatus(pub String);

impl FromStr for ApplicationStatus {
    type Err = UnknownStatus;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ApplicationStatus::ALL
            .into_iter()
            .find(|status| status.as_str() == s)
            .ok_or_else(|| UnknownStatus(s.to_string()))
    }
}

/// One candidacy as stored and as returned to clients.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Application {
    pub id: i32,
    pub candidate_name: String,
    pub candidate_email: String,
    pub candidate_full_name: String,
    pub position: String,
    pub cv_filename: Option<String>,
    pub cover_letter: Option<String>,
    pub status: ApplicationStatus,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Fields supplied by the applicant when a candidacy is created.
#[derive(Debug, Clone, PartialEq)]
pub struct NewApplication {
    pub candidate_name: String,
    pub candidate_email: String,
    pub candidate_full_name: String,
    pub position: String,
    pub cv_filename: Option<String>,
    pub cover_letter: Option<String>,
}

/// Recruiter-side partial update. `None` keeps the stored value.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ApplicationChanges {
    pub status: Option<ApplicationStatus>,
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct StatusCounts {
    pub submitted: i64,
    pub under_review: i64,
    pub interview: i64,
    pub accepted: i64,
    pub rejected: i64,
}

impl StatusCounts {
    fn slot(&mut self, status: ApplicationStatus) -> &mut i64 {
        match status {
            ApplicationStatus::Submitted => &mut self.submitted,
            ApplicationStatus::UnderReview => &mut self.under_review,
            ApplicationStatus::Interview => &mut self.interview,
            ApplicationStatus::Rejected => &mut self.rejected,
            ApplicationStatus::Accepted => &mut self.accepted,
        }
    }

    pub fn get(&self, status: ApplicationStatus) -> i64 {
        match status {
            ApplicationStatus::Submitted => self.submitted,
            ApplicationStatus::UnderReview => self.under_review,
            ApplicationStatus::Interview => self.interview,
            ApplicationStatus::Rejected => self.rejected,
            ApplicationStatus::Accepted => self.accepted,
        }
    }

    pub fn sum(&self) -> i64 {
        ApplicationStatus::ALL
            .into_iter()
            .map(|status| self.get(status))
            .sum()
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ApplicationStats {
    pub total: i64,
    pub by_status: StatusCounts,
}

impl ApplicationStats {
    /// Builds the summary from per-status counts. `total` is derived from the
    /// buckets so the two can never disagree.
    pub fn from_counts<I>(counts: I) -> Self
    where
        I: IntoIterator<Item = (ApplicationStatus, i64)>,
    {
        let mut by_status = StatusCounts::default();
        for (status, count) in counts {
            *by_status.slot(status) += count;
        }
        Self {
            total: by_status.sum(),
            by_status,
        }
    }
}
