use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::error::MeetingResult;
use crate::models::Meeting;

/// Repository trait for Meeting persistence
///
/// Implementations can use different storage backends (MongoDB, in-memory).
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MeetingRepository: Send + Sync {
    /// Persist a meeting whose `id` is unset; returns the assigned id as hex.
    async fn insert(&self, meeting: Meeting) -> MeetingResult<String>;

    /// Look up one meeting by its hex id.
    ///
    /// A malformed id is [`InvalidId`](crate::MeetingError::InvalidId), a
    /// well-formed one with no match is [`NotFound`](crate::MeetingError::NotFound).
    async fn find_by_id(&self, id: &str) -> MeetingResult<Meeting>;

    /// Every meeting with `start_time >= start` and `end_time <= end`, in store order.
    async fn find_by_time_range(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> MeetingResult<Vec<Meeting>>;
}
