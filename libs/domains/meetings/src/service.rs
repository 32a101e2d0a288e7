//! Meeting Service - bounds every store call and stamps creation time

use chrono::{DateTime, Utc};
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;
use tracing::instrument;

use crate::error::{MeetingError, MeetingResult};
use crate::models::{CreateMeeting, InsertAck, Meeting};
use crate::repository::MeetingRepository;

pub const DEFAULT_CREATE_TIMEOUT: Duration = Duration::from_secs(5);
pub const DEFAULT_READ_TIMEOUT: Duration = Duration::from_secs(30);

/// Per-request bounds on store calls. Expiry abandons the call and yields
/// [`MeetingError::Timeout`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MeetingTimeouts {
    pub create: Duration,
    /// Applies to both id and time-range lookups
    pub read: Duration,
}

impl Default for MeetingTimeouts {
    fn default() -> Self {
        Self {
            create: DEFAULT_CREATE_TIMEOUT,
            read: DEFAULT_READ_TIMEOUT,
        }
    }
}

pub struct MeetingService<R: MeetingRepository> {
    repository: Arc<R>,
    timeouts: MeetingTimeouts,
}

impl<R: MeetingRepository> MeetingService<R> {
    pub fn new(repository: R) -> Self {
        Self {
            repository: Arc::new(repository),
            timeouts: MeetingTimeouts::default(),
        }
    }

    pub fn with_timeouts(mut self, timeouts: MeetingTimeouts) -> Self {
        self.timeouts = timeouts;
        self
    }

    pub fn timeouts(&self) -> MeetingTimeouts {
        self.timeouts
    }

    /// Stamp `created_at` with the current server time and persist.
    #[instrument(skip(self, input), fields(title = %input.title))]
    pub async fn create_meeting(&self, input: CreateMeeting) -> MeetingResult<InsertAck> {
        let meeting = Meeting::new(input, Utc::now());

        let inserted_id = bounded(self.timeouts.create, self.repository.insert(meeting)).await?;
        Ok(InsertAck { inserted_id })
    }

    #[instrument(skip(self))]
    pub async fn get_meeting(&self, id: &str) -> MeetingResult<Meeting> {
        bounded(self.timeouts.read, self.repository.find_by_id(id)).await
    }

    #[instrument(skip(self))]
    pub async fn meetings_in_range(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> MeetingResult<Vec<Meeting>> {
        bounded(
            self.timeouts.read,
            self.repository.find_by_time_range(start, end),
        )
        .await
    }
}

async fn bounded<T>(
    limit: Duration,
    operation: impl Future<Output = MeetingResult<T>>,
) -> MeetingResult<T> {
    tokio::time::timeout(limit, operation)
        .await
        .map_err(|_| MeetingError::Timeout(limit))?
}
