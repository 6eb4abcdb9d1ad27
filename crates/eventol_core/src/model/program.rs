//! Activities, talk proposals, scheduled talks and comments.
//!
//! # Invariants
//! - Time ranges are epoch milliseconds with `end >= start`.
//! - `TalkProposal::speakers_email` is a comma separated list of emails.

use crate::model::validation::{
    require_email, require_text, require_time_range, ModelValidationError,
};
use crate::model::RecordId;
use serde::{Deserialize, Serialize};

/// Activity category, e.g. `talk`, `workshop` or `debate`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActivityType {
    pub id: Option<RecordId>,
    pub name: String,
}

/// Anything scheduled at a venue. Talk proposals and comments hang off it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Activity {
    pub id: Option<RecordId>,
    pub venue_id: RecordId,
    pub activity_type_id: RecordId,
    pub title: String,
    /// Short idea of the activity, two or three sentences.
    pub abstract_text: String,
    pub long_description: String,
    pub start_date: Option<i64>,
    pub end_date: Option<i64>,
}

impl Activity {
    pub fn new(venue_id: RecordId, activity_type_id: RecordId, title: impl Into<String>) -> Self {
        Self {
            id: None,
            venue_id,
            activity_type_id,
            title: title.into(),
            abstract_text: String::new(),
            long_description: String::new(),
            start_date: None,
            end_date: None,
        }
    }

    pub fn validate(&self) -> Result<(), ModelValidationError> {
        require_text("activity", "title", &self.title)?;
        require_time_range(self.start_date, self.end_date)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TalkType {
    pub id: Option<RecordId>,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TalkProposal {
    pub id: Option<RecordId>,
    pub activity_id: RecordId,
    pub talk_type_id: RecordId,
    pub speakers_email: String,
    /// Comma separated tags, e.g. `Linux, Free Software`.
    pub labels: String,
    /// Stored path of the uploaded presentation material.
    pub presentation: Option<String>,
}

impl TalkProposal {
    pub fn validate(&self) -> Result<(), ModelValidationError> {
        require_text("talk_proposal", "speakers_email", &self.speakers_email)?;
        for email in self.speaker_emails() {
            require_email(email)?;
        }
        Ok(())
    }

    /// Returns trimmed, non-empty entries of `speakers_email`.
    pub fn speaker_emails(&self) -> impl Iterator<Item = &str> {
        self.speakers_email
            .split(',')
            .map(str::trim)
            .filter(|email| !email.is_empty())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Room {
    pub id: Option<RecordId>,
    pub venue_id: RecordId,
    /// e.g. `Classroom 256`.
    pub name: String,
    pub for_talk_type_id: Option<RecordId>,
}

/// Schedule slot for one talk type at one venue.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TalkTime {
    pub id: Option<RecordId>,
    pub venue_id: RecordId,
    pub talk_type_id: RecordId,
    pub start_date: i64,
    pub end_date: i64,
}

impl TalkTime {
    pub fn validate(&self) -> Result<(), ModelValidationError> {
        require_time_range(Some(self.start_date), Some(self.end_date))
    }
}

/// Accepted proposal placed in a room and a time slot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Talk {
    pub id: Option<RecordId>,
    pub proposal_id: RecordId,
    pub room_id: RecordId,
    pub talk_time_id: RecordId,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Comment {
    pub id: Option<RecordId>,
    pub activity_id: RecordId,
    pub user_id: RecordId,
    pub body: String,
    /// Unix epoch milliseconds.
    pub created: i64,
}

impl Comment {
    pub fn validate(&self) -> Result<(), ModelValidationError> {
        require_text("comment", "body", &self.body)
    }
}

#[cfg(test)]
mod tests {
    use super::{Activity, TalkProposal, TalkTime};
    use crate::model::validation::ModelValidationError;

    fn proposal(speakers_email: &str) -> TalkProposal {
        TalkProposal {
            id: None,
            activity_id: 1,
            talk_type_id: 1,
            speakers_email: speakers_email.to_string(),
            labels: "Linux, Debian".to_string(),
            presentation: None,
        }
    }

    #[test]
    fn proposal_accepts_comma_separated_speakers() {
        let proposal = proposal("ana@example.org, beto@example.org,");
        assert!(proposal.validate().is_ok());
        assert_eq!(
            proposal.speaker_emails().collect::<Vec<_>>(),
            vec!["ana@example.org", "beto@example.org"]
        );
    }

    #[test]
    fn proposal_rejects_malformed_speaker() {
        let err = proposal("ana@example.org, beto")
            .validate()
            .expect_err("second speaker is malformed");
        assert_eq!(err, ModelValidationError::InvalidEmail("beto".to_string()));
    }

    #[test]
    fn schedule_ranges_must_not_run_backwards() {
        let mut activity = Activity::new(1, 1, "Install fest");
        activity.start_date = Some(2_000);
        activity.end_date = Some(1_000);
        assert!(matches!(
            activity.validate(),
            Err(ModelValidationError::InvalidTimeRange { .. })
        ));

        let slot = TalkTime {
            id: None,
            venue_id: 1,
            talk_type_id: 1,
            start_date: 1_000,
            end_date: 1_000,
        };
        assert!(slot.validate().is_ok());
    }
}
