//! MongoDB implementation of MeetingRepository

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use futures_util::TryStreamExt;
use mongodb::{
    Collection, Database,
    bson::{self, Document, doc, oid::ObjectId},
};
use serde::{Deserialize, Serialize};
use tracing::instrument;

use crate::error::{MeetingError, MeetingResult};
use crate::models::{Meeting, Participant};
use crate::repository::MeetingRepository;

pub const DEFAULT_COLLECTION: &str = "meetings";

/// Stored shape of a meeting: native ObjectId and BSON datetimes.
///
/// Empty values are left out of the document, same as in the JSON encoding.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub(crate) struct MeetingDocument {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub title: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub participants: Vec<Participant>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_time: Option<bson::DateTime>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_time: Option<bson::DateTime>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<bson::DateTime>,
}

fn to_bson_datetime(dt: DateTime<Utc>) -> bson::DateTime {
    bson::DateTime::from_millis(dt.timestamp_millis())
}

fn from_bson_datetime(dt: bson::DateTime) -> Option<DateTime<Utc>> {
    DateTime::<Utc>::from_timestamp_millis(dt.timestamp_millis())
}

impl MeetingDocument {
    fn from_meeting(meeting: Meeting, id: ObjectId) -> Self {
        Self {
            id: Some(id),
            title: meeting.title,
            participants: meeting.participants,
            start_time: meeting.start_time.map(to_bson_datetime),
            end_time: meeting.end_time.map(to_bson_datetime),
            created_at: meeting.created_at.map(to_bson_datetime),
        }
    }
}

impl From<MeetingDocument> for Meeting {
    fn from(doc: MeetingDocument) -> Self {
        Self {
            id: doc.id.map(|id| id.to_hex()).unwrap_or_default(),
            title: doc.title,
            participants: doc.participants,
            start_time: doc.start_time.and_then(from_bson_datetime),
            end_time: doc.end_time.and_then(from_bson_datetime),
            created_at: doc.created_at.and_then(from_bson_datetime),
        }
    }
}

/// `{"$and": [{"start_time": {"$gte": start}}, {"end_time": {"$lte": end}}]}`
pub(crate) fn build_time_range_filter(start: DateTime<Utc>, end: DateTime<Utc>) -> Document {
    doc! {
        "$and": [
            { "start_time": { "$gte": to_bson_datetime(start) } },
            { "end_time": { "$lte": to_bson_datetime(end) } },
        ]
    }
}

/// MongoDB implementation of the MeetingRepository
pub struct MongoMeetingRepository {
    collection: Collection<MeetingDocument>,
}

impl MongoMeetingRepository {
    /// Repository over the `meetings` collection of `db`
    ///
    /// ```ignore
    /// let client = Client::with_uri_str("mongodb://localhost:27017").await?;
    /// let repo = MongoMeetingRepository::new(client.database("appointy"));
    /// ```
    pub fn new(db: Database) -> Self {
        Self::with_collection(db, DEFAULT_COLLECTION)
    }

    pub fn with_collection(db: Database, collection_name: &str) -> Self {
        let collection = db.collection::<MeetingDocument>(collection_name);
        Self { collection }
    }
}

#[async_trait]
impl MeetingRepository for MongoMeetingRepository {
    #[instrument(skip(self, meeting), fields(title = %meeting.title))]
    async fn insert(&self, meeting: Meeting) -> MeetingResult<String> {
        let document = MeetingDocument::from_meeting(meeting, ObjectId::new());

        let result = self.collection.insert_one(&document).await?;
        let id = result
            .inserted_id
            .as_object_id()
            .ok_or_else(|| {
                MeetingError::Internal(format!(
                    "insert acknowledged with non-ObjectId id: {}",
                    result.inserted_id
                ))
            })?
            .to_hex();

        tracing::info!(meeting_id = %id, "Meeting created");
        Ok(id)
    }

    #[instrument(skip(self))]
    async fn find_by_id(&self, id: &str) -> MeetingResult<Meeting> {
        let oid = ObjectId::parse_str(id).map_err(|e| MeetingError::InvalidId {
            id: id.to_string(),
            reason: e.to_string(),
        })?;

        self.collection
            .find_one(doc! { "_id": oid })
            .await?
            .map(Meeting::from)
            .ok_or_else(|| MeetingError::NotFound(id.to_string()))
    }

    #[instrument(skip(self))]
    async fn find_by_time_range(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> MeetingResult<Vec<Meeting>> {
        let filter = build_time_range_filter(start, end);

        let cursor = self
            .collection
            .clone_with_type::<Document>()
            .find(filter)
            .await?;
        let raw: Vec<Document> = cursor.try_collect().await?;

        let total = raw.len();
        let meetings: Vec<Meeting> = raw.into_iter().filter_map(decode_or_skip).collect();

        tracing::debug!(
            count = meetings.len(),
            skipped = total - meetings.len(),
            "Time range lookup finished"
        );
        Ok(meetings)
    }
}

/// A stored document that does not have the meeting shape is logged and
/// left out of range results.
fn decode_or_skip(raw: Document) -> Option<Meeting> {
    let id = raw.get("_id").cloned();
    match bson::from_document::<MeetingDocument>(raw) {
        Ok(document) => Some(document.into()),
        Err(e) => {
            tracing::warn!(id = ?id, error = %e, "Skipping undecodable meeting document");
            None
        }
    }
}
