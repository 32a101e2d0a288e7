//! Request extractors for the meetings routes.
//!
//! Each one turns axum's rejection into a [`MeetingError`], so a request
//! that cannot be read still gets the JSON error body.

use axum::{
    body::Bytes,
    extract::{FromRequest, FromRequestParts, Path, Query, Request},
    http::request::Parts,
};
use std::convert::Infallible;

use crate::error::MeetingError;
use crate::models::{CreateMeeting, TimeRangeQuery};

/// `{id}` path segment, undecoded beyond percent-decoding.
///
/// A segment that is not valid UTF-8 is reported as an invalid id.
pub struct MeetingId(pub String);

impl<S> FromRequestParts<S> for MeetingId
where
    S: Send + Sync,
{
    type Rejection = MeetingError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        match Path::<String>::from_request_parts(parts, state).await {
            Ok(Path(id)) => Ok(MeetingId(id)),
            Err(rejection) => Err(MeetingError::InvalidId {
                id: parts
                    .uri
                    .path()
                    .rsplit('/')
                    .next()
                    .unwrap_or_default()
                    .to_string(),
                reason: rejection.body_text(),
            }),
        }
    }
}

/// Create body, decoded as JSON whatever the declared content type.
pub struct MeetingPayload(pub CreateMeeting);

impl<S> FromRequest<S> for MeetingPayload
where
    S: Send + Sync,
{
    type Rejection = MeetingError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let body = Bytes::from_request(req, state).await?;
        Ok(MeetingPayload(serde_json::from_slice(&body)?))
    }
}

/// Never rejects: a query string that does not decode is treated as empty,
/// which leaves both bounds at the zero instant.
impl<S> FromRequestParts<S> for TimeRangeQuery
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let pairs = match Query::<Vec<(String, String)>>::try_from_uri(&parts.uri) {
            Ok(Query(pairs)) => pairs,
            Err(rejection) => {
                tracing::warn!(error = %rejection.body_text(), "Undecodable query string, ignoring it");
                Vec::new()
            }
        };
        Ok(TimeRangeQuery::from_pairs(pairs))
    }
}
