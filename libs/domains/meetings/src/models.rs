use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

/// `0001-01-01T00:00:00Z`, in seconds since the Unix epoch
const ZERO_INSTANT_SECS: i64 = -62_135_596_800;

/// Attendee of a meeting. Owned by its meeting; has no identity of its own.
///
/// All fields are free-form and omitted from the encoding when empty.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Participant {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    #[schema(example = "Fedrick")]
    pub name: String,
    /// Not validated
    #[serde(default, skip_serializing_if = "String::is_empty")]
    #[schema(example = "f123.com")]
    pub email: String,
    /// Usually "Yes", "No" or "Maybe", but any text is accepted
    #[serde(default, skip_serializing_if = "String::is_empty")]
    #[schema(example = "Yes")]
    pub rsvp: String,
}

/// Meeting as returned by the API.
///
/// Empty strings, empty participant lists and absent timestamps are left out
/// of the JSON entirely. An empty title therefore reads the same as a missing
/// one.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Meeting {
    /// Store-assigned ObjectId, 24 hex characters
    #[serde(rename = "_id", default, skip_serializing_if = "String::is_empty")]
    #[schema(example = "65a1b2c3d4e5f60718293a4b")]
    pub id: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    #[schema(example = "with Spiderman")]
    pub title: String,
    /// Input order is preserved
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub participants: Vec<Participant>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_time: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_time: Option<DateTime<Utc>>,
    /// Server receipt time, never taken from the client
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

impl Meeting {
    /// Build an unsaved meeting (no id yet) stamped with `created_at`.
    pub fn new(input: CreateMeeting, created_at: DateTime<Utc>) -> Self {
        Self {
            id: String::new(),
            title: input.title,
            participants: input.participants,
            start_time: input.start_time,
            end_time: input.end_time,
            created_at: Some(created_at),
        }
    }

    /// Whether the meeting lies entirely inside `[start, end]`.
    ///
    /// Containment, not overlap: a meeting that begins before `start` or
    /// finishes after `end` does not match. A meeting missing either
    /// timestamp never matches.
    pub fn is_within(&self, start: DateTime<Utc>, end: DateTime<Utc>) -> bool {
        matches!(
            (self.start_time, self.end_time),
            (Some(s), Some(e)) if s >= start && e <= end
        )
    }
}

/// Request body for `POST /meetings`.
///
/// Unknown fields are ignored, including any `created_at` or `_id` the client
/// sends. Missing fields take their empty value.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, ToSchema)]
#[serde(default)]
pub struct CreateMeeting {
    #[schema(example = "with Spiderman")]
    pub title: String,
    pub participants: Vec<Participant>,
    /// RFC3339, normalized to UTC
    #[schema(example = "2020-09-19T13:00:00Z")]
    pub start_time: Option<DateTime<Utc>>,
    #[schema(example = "2020-09-19T17:00:00Z")]
    pub end_time: Option<DateTime<Utc>>,
}

/// Insert acknowledgement returned by `POST /meetings`, keyed the way the
/// store driver reports it: `{"InsertedID": "<hex>"}`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct InsertAck {
    #[serde(rename = "InsertedID")]
    #[schema(example = "65a1b2c3d4e5f60718293a4b")]
    pub inserted_id: String,
}

/// Query window for `GET /meetings`
#[derive(Debug, Clone, Default, PartialEq, Eq, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct TimeRangeQuery {
    /// Inclusive lower bound on `start_time` (RFC3339)
    #[param(example = "2020-09-19T12:00:00Z")]
    pub start: Option<String>,
    /// Inclusive upper bound on `end_time` (RFC3339)
    #[param(example = "2020-09-19T18:00:00Z")]
    pub end: Option<String>,
}

impl TimeRangeQuery {
    /// Collect the window from decoded query pairs. The first `start` and the
    /// first `end` win; repeats and unknown keys are ignored.
    pub fn from_pairs(pairs: impl IntoIterator<Item = (String, String)>) -> Self {
        let mut query = Self::default();
        for (key, value) in pairs {
            match key.as_str() {
                "start" if query.start.is_none() => query.start = Some(value),
                "end" if query.end.is_none() => query.end = Some(value),
                _ => {}
            }
        }
        query
    }

    /// Parsed `(start, end)` bounds.
    ///
    /// A missing or malformed bound becomes [`zero_instant`] rather than an
    /// error, so a bad `end` simply matches nothing.
    pub fn bounds(&self) -> (DateTime<Utc>, DateTime<Utc>) {
        (
            parse_bound("start", self.start.as_deref()),
            parse_bound("end", self.end.as_deref()),
        )
    }
}

/// `0001-01-01T00:00:00Z`
pub fn zero_instant() -> DateTime<Utc> {
    DateTime::from_timestamp(ZERO_INSTANT_SECS, 0).unwrap_or(DateTime::<Utc>::MIN_UTC)
}

fn parse_bound(name: &str, raw: Option<&str>) -> DateTime<Utc> {
    let Some(raw) = raw else {
        tracing::warn!(param = name, "Missing time bound, using zero instant");
        return zero_instant();
    };

    match DateTime::parse_from_rfc3339(raw) {
        Ok(dt) => dt.with_timezone(&Utc),
        Err(e) => {
            tracing::warn!(param = name, value = raw, error = %e, "Unparseable time bound, using zero instant");
            zero_instant()
        }
    }
}
