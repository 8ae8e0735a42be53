use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::models::application::{ApplicationChanges, ApplicationStatus, NewApplication};

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateApplicationPayload {
    pub candidate_name: String,
    pub candidate_email: String,
    pub candidate_full_name: String,
    pub position: String,
    pub cv_filename: Option<String>,
    pub cover_letter: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateApplicationPayload {
    pub status: Option<ApplicationStatus>,
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct ApplicationListQuery {
    pub email: Option<String>,
}

impl ApplicationListQuery {
    /// An empty `?email=` is treated the same as no filter.
    pub fn email_filter(&self) -> Option<&str> {
        self.email.as_deref().filter(|email| !email.is_empty())
    }
}

impl From<CreateApplicationPayload> for NewApplication {
    fn from(value: CreateApplicationPayload) -> Self {
        Self {
            candidate_name: value.candidate_name,
            candidate_email: value.candidate_email,
            candidate_full_name: value.candidate_full_name,
            position: value.position,
            cv_filename: value.cv_filename,
            cover_letter: value.cover_letter,
        }
    }
}

impl From<UpdateApplicationPayload> for ApplicationChanges {
    fn from(value: UpdateApplicationPayload) -> Self {
        Self {
            status: value.status,
            notes: value.notes,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn create_payload_reads_client_field_names() {
        let payload: CreateApplicationPayload = serde_json::from_value(json!({
            "candidateName": "john.doe",
            "candidateEmail": "john@x.com",
            "candidateFullName": "John Doe",
            "position": "Backend Developer",
            "cvFilename": "john_cv.pdf"
        }))
        .unwrap();

        let new = NewApplication::from(payload);
        assert_eq!(new.cv_filename.as_deref(), Some("john_cv.pdf"));
        assert!(new.cover_letter.is_none());
    }

    #[test]
    fn required_keys_must_be_present_but_may_be_empty() {
        let blank: CreateApplicationPayload = serde_json::from_value(json!({
            "candidateName": "",
            "candidateEmail": "",
            "candidateFullName": "",
            "position": ""
        }))
        .unwrap();
        assert_eq!(NewApplication::from(blank).candidate_email, "");

        let missing = serde_json::from_value::<CreateApplicationPayload>(json!({
            "candidateName": "john.doe",
            "candidateEmail": "john@x.com",
            "candidateFullName": "John Doe"
        }));
        assert!(missing.is_err());
    }

    #[test]
    fn update_payload_is_partial() {
        let payload: UpdateApplicationPayload =
            serde_json::from_value(json!({ "status": "under_review" })).unwrap();
        let changes = ApplicationChanges::from(payload);
        assert_eq!(changes.status, Some(ApplicationStatus::UnderReview));
        assert!(changes.notes.is_none());

        assert!(serde_json::from_value::<UpdateApplicationPayload>(json!({ "status": "hired" })).is_err());
    }

    #[test]
    fn blank_email_query_means_no_filter() {
        let blank = ApplicationListQuery {
            email: Some(String::new()),
        };
        assert_eq!(blank.email_filter(), None);
        let set = ApplicationListQuery {
            email: Some("a@x.com".to_string()),
        };
        assert_eq!(set.email_filter(), Some("a@x.com"));
    }
}
