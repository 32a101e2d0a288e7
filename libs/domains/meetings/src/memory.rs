//! In-process MeetingRepository, for tests and local runs without a store

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use mongodb::bson::oid::ObjectId;
use tokio::sync::RwLock;

use crate::error::{MeetingError, MeetingResult};
use crate::models::Meeting;
use crate::repository::MeetingRepository;

/// Keeps meetings in insertion order and applies the same containment
/// predicate as the MongoDB filter.
#[derive(Default)]
pub struct InMemoryMeetingRepository {
    meetings: RwLock<Vec<Meeting>>,
}

impl InMemoryMeetingRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl MeetingRepository for InMemoryMeetingRepository {
    async fn insert(&self, mut meeting: Meeting) -> MeetingResult<String> {
        let id = ObjectId::new().to_hex();
        meeting.id = id.clone();
        self.meetings.write().await.push(meeting);
        Ok(id)
    }

    async fn find_by_id(&self, id: &str) -> MeetingResult<Meeting> {
        ObjectId::parse_str(id).map_err(|e| MeetingError::InvalidId {
            id: id.to_string(),
            reason: e.to_string(),
        })?;

        self.meetings
            .read()
            .await
            .iter()
            .find(|m| m.id == id)
            .cloned()
            .ok_or_else(|| MeetingError::NotFound(id.to_string()))
    }

    async fn find_by_time_range(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> MeetingResult<Vec<Meeting>> {
        Ok(self
            .meetings
            .read()
            .await
            .iter()
            .filter(|m| m.is_within(start, end))
            .cloned()
            .collect())
    }
}
