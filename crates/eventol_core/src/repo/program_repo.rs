//! Program repository contracts and SQLite implementation.
//!
//! # Responsibility
//! - Persist activities, proposals, rooms, schedule slots, talks and comments.
//!
//! # Invariants
//! - Time ranges are validated before insert.
//! - Activity type names are unique; `ensure_activity_type` reuses existing rows.
//! - A talk's proposal, room and time slot belong to the same venue.

use crate::model::entity::EntityKind;
use crate::model::program::{
    Activity, ActivityType, Comment, Room, Talk, TalkProposal, TalkTime, TalkType,
};
use crate::model::validation::require_text;
use crate::model::RecordId;
use crate::repo::{query_optional, shared_venue, RepoResult};
use rusqlite::{params, Connection, OptionalExtension};

const PROPOSAL_VENUE_SQL: &str = "SELECT activities.venue_id
FROM talk_proposals
JOIN activities ON activities.id = talk_proposals.activity_id
WHERE talk_proposals.id = ?1;";
const ROOM_VENUE_SQL: &str = "SELECT venue_id FROM rooms WHERE id = ?1;";
const TALK_TIME_VENUE_SQL: &str = "SELECT venue_id FROM talk_times WHERE id = ?1;";

/// Repository interface for the event program.
pub trait ProgramRepository {
    fn ensure_activity_type(&self, name: &str) -> RepoResult<RecordId>;
    fn create_activity(&self, activity: &Activity) -> RepoResult<RecordId>;
    fn get_activity(&self, id: RecordId) -> RepoResult<Option<Activity>>;
    fn create_talk_type(&self, talk_type: &TalkType) -> RepoResult<RecordId>;
    fn create_talk_proposal(&self, proposal: &TalkProposal) -> RepoResult<RecordId>;
    fn create_room(&self, room: &Room) -> RepoResult<RecordId>;
    fn create_talk_time(&self, talk_time: &TalkTime) -> RepoResult<RecordId>;
    fn create_talk(&self, talk: &Talk) -> RepoResult<RecordId>;
    fn create_comment(&self, comment: &Comment) -> RepoResult<RecordId>;
}

/// SQLite-backed program repository.
pub struct SqliteProgramRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteProgramRepository<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }
}

impl ProgramRepository for SqliteProgramRepository<'_> {
    fn ensure_activity_type(&self, name: &str) -> RepoResult<RecordId> {
        let activity_type = ActivityType {
            id: None,
            name: name.trim().to_string(),
        };
        require_text("activity_type", "name", &activity_type.name)?;

        let existing = self
            .conn
            .query_row(
                "SELECT id FROM activity_types WHERE name = ?1;",
                [activity_type.name.as_str()],
                |row| row.get::<_, RecordId>(0),
            )
            .optional()?;
        if let Some(id) = existing {
            return Ok(id);
        }

        self.conn.execute(
            "INSERT INTO activity_types (name) VALUES (?1);",
            [activity_type.name.as_str()],
        )?;
        Ok(self.conn.last_insert_rowid())
    }

    fn create_activity(&self, activity: &Activity) -> RepoResult<RecordId> {
        activity.validate()?;
        self.conn.execute(
            "INSERT INTO activities (
                venue_id,
                activity_type_id,
                title,
                abstract,
                long_description,
                start_date,
                end_date
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7);",
            params![
                activity.venue_id,
                activity.activity_type_id,
                activity.title.trim(),
                activity.abstract_text,
                activity.long_description,
                activity.start_date,
                activity.end_date,
            ],
        )?;
        Ok(self.conn.last_insert_rowid())
    }

    fn get_activity(&self, id: RecordId) -> RepoResult<Option<Activity>> {
        query_optional(
            self.conn,
            "SELECT
                id,
                venue_id,
                activity_type_id,
                title,
                abstract,
                long_description,
                start_date,
                end_date
             FROM activities
             WHERE id = ?1;",
            [id],
            |row| {
                let activity = Activity {
                    id: Some(row.get("id")?),
                    venue_id: row.get("venue_id")?,
                    activity_type_id: row.get("activity_type_id")?,
                    title: row.get("title")?,
                    abstract_text: row.get("abstract")?,
                    long_description: row.get("long_description")?,
                    start_date: row.get("start_date")?,
                    end_date: row.get("end_date")?,
                };
                activity.validate()?;
                Ok(activity)
            },
        )
    }

    fn create_talk_type(&self, talk_type: &TalkType) -> RepoResult<RecordId> {
        require_text("talk_type", "name", &talk_type.name)?;
        self.conn.execute(
            "INSERT INTO talk_types (name) VALUES (?1);",
            [talk_type.name.trim()],
        )?;
        Ok(self.conn.last_insert_rowid())
    }

    fn create_talk_proposal(&self, proposal: &TalkProposal) -> RepoResult<RecordId> {
        proposal.validate()?;
        self.conn.execute(
            "INSERT INTO talk_proposals (
                activity_id,
                talk_type_id,
                speakers_email,
                labels,
                presentation
            ) VALUES (?1, ?2, ?3, ?4, ?5);",
            params![
                proposal.activity_id,
                proposal.talk_type_id,
                proposal.speakers_email,
                proposal.labels,
                proposal.presentation.as_deref(),
            ],
        )?;
        Ok(self.conn.last_insert_rowid())
    }

    fn create_room(&self, room: &Room) -> RepoResult<RecordId> {
        require_text("room", "name", &room.name)?;
        self.conn.execute(
            "INSERT INTO rooms (venue_id, name, for_talk_type_id) VALUES (?1, ?2, ?3);",
            params![room.venue_id, room.name.trim(), room.for_talk_type_id],
        )?;
        Ok(self.conn.last_insert_rowid())
    }

    fn create_talk_time(&self, talk_time: &TalkTime) -> RepoResult<RecordId> {
        talk_time.validate()?;
        self.conn.execute(
            "INSERT INTO talk_times (venue_id, talk_type_id, start_date, end_date)
             VALUES (?1, ?2, ?3, ?4);",
            params![
                talk_time.venue_id,
                talk_time.talk_type_id,
                talk_time.start_date,
                talk_time.end_date,
            ],
        )?;
        Ok(self.conn.last_insert_rowid())
    }

    fn create_talk(&self, talk: &Talk) -> RepoResult<RecordId> {
        shared_venue(
            self.conn,
            EntityKind::Talk,
            &[
                (EntityKind::TalkProposal, PROPOSAL_VENUE_SQL, talk.proposal_id),
                (EntityKind::Room, ROOM_VENUE_SQL, talk.room_id),
                (EntityKind::TalkTime, TALK_TIME_VENUE_SQL, talk.talk_time_id),
            ],
        )?;
        self.conn.execute(
            "INSERT INTO talks (proposal_id, room_id, talk_time_id) VALUES (?1, ?2, ?3);",
            params![talk.proposal_id, talk.room_id, talk.talk_time_id],
        )?;
        Ok(self.conn.last_insert_rowid())
    }

    fn create_comment(&self, comment: &Comment) -> RepoResult<RecordId> {
        comment.validate()?;
        self.conn.execute(
            "INSERT INTO comments (activity_id, user_id, body, created) VALUES (?1, ?2, ?3, ?4);",
            params![
                comment.activity_id,
                comment.user_id,
                comment.body,
                comment.created,
            ],
        )?;
        Ok(self.conn.last_insert_rowid())
    }
}
