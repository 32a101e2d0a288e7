use axum::{Json, Router, extract::State, routing::get};
use axum_helpers::errors::responses::{
    BadRequestJsonResponse, InternalServerErrorResponse, PayloadTooLargeResponse,
};
use std::sync::Arc;
use utoipa::OpenApi;

use crate::error::MeetingResult;
use crate::extract::{MeetingId, MeetingPayload};
use crate::models::{CreateMeeting, InsertAck, Meeting, Participant, TimeRangeQuery};
use crate::repository::MeetingRepository;
use crate::service::MeetingService;

/// OpenAPI documentation for Meetings API
#[derive(OpenApi)]
#[openapi(
    paths(create_meeting, get_meeting, list_meetings_in_range),
    components(
        schemas(Meeting, Participant, CreateMeeting, InsertAck),
        responses(
            BadRequestJsonResponse,
            PayloadTooLargeResponse,
            InternalServerErrorResponse
        )
    ),
    tags(
        (name = "Meetings", description = "Meeting scheduling endpoints (MongoDB)")
    )
)]
pub struct ApiDoc;

/// Create the meetings router; mount it under `/meetings`.
pub fn router<R: MeetingRepository + 'static>(service: MeetingService<R>) -> Router {
    let shared_service = Arc::new(service);

    Router::new()
        .route("/", get(list_meetings_in_range).post(create_meeting))
        .route("/{id}", get(get_meeting))
        .with_state(shared_service)
}

/// Schedule a meeting
///
/// The body is read as JSON whatever its declared content type. The server
/// sets `created_at`; a client-supplied value is ignored. Bodies over 2 MiB
/// are answered 413.
#[utoipa::path(
    post,
    path = "",
    tag = "Meetings",
    request_body = CreateMeeting,
    responses(
        (status = 200, description = "Meeting stored", body = InsertAck),
        (status = 400, response = BadRequestJsonResponse),
        (status = 413, response = PayloadTooLargeResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn create_meeting<R: MeetingRepository>(
    State(service): State<Arc<MeetingService<R>>>,
    MeetingPayload(input): MeetingPayload,
) -> MeetingResult<Json<InsertAck>> {
    let ack = service.create_meeting(input).await?;
    Ok(Json(ack))
}

/// Get a meeting by id
///
/// Every failure, including an unknown or malformed id, is a 500 whose
/// `message` says what went wrong.
#[utoipa::path(
    get,
    path = "/{id}",
    tag = "Meetings",
    params(
        ("id" = String, Path, description = "Meeting ObjectId (24 hex characters)")
    ),
    responses(
        (status = 200, description = "Meeting found", body = Meeting),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn get_meeting<R: MeetingRepository>(
    State(service): State<Arc<MeetingService<R>>>,
    MeetingId(id): MeetingId,
) -> MeetingResult<Json<Meeting>> {
    let meeting = service.get_meeting(&id).await?;
    Ok(Json(meeting))
}

/// List meetings contained in a time window
///
/// Returns meetings with `start_time >= start` and `end_time <= end`.
/// A meeting that only overlaps the window is not included. Missing or
/// unparseable bounds are treated as `0001-01-01T00:00:00Z`; when a bound is
/// repeated the first value is used.
#[utoipa::path(
    get,
    path = "",
    tag = "Meetings",
    params(TimeRangeQuery),
    responses(
        (status = 200, description = "Matching meetings, possibly empty", body = Vec<Meeting>),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn list_meetings_in_range<R: MeetingRepository>(
    State(service): State<Arc<MeetingService<R>>>,
    query: TimeRangeQuery,
) -> MeetingResult<Json<Vec<Meeting>>> {
    let (start, end) = query.bounds();
    let meetings = service.meetings_in_range(start, end).await?;
    Ok(Json(meetings))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::MeetingError;
    use crate::repository::MockMeetingRepository;
    use axum::{
        body::Body,
        http::{Request, StatusCode, header},
    };
    use axum_helpers::ErrorResponse;
    use http_body_util::BodyExt;
    use tower::ServiceExt;

    async fn call(
        repository: MockMeetingRepository,
        request: Request<Body>,
    ) -> (StatusCode, ErrorResponse) {
        let app = Router::new().nest("/meetings", router(MeetingService::new(repository)));
        let response = app.oneshot(request).await.unwrap();

        let status = response.status();
        assert_eq!(response.headers()[header::CONTENT_TYPE], "application/json");
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn test_failed_range_lookup_is_500_json() {
        let mut mock = MockMeetingRepository::new();
        mock.expect_find_by_time_range()
            .times(1)
            .returning(|_, _| Err(MeetingError::Database("cursor killed".into())));

        let (status, body) = call(
            mock,
            Request::get("/meetings?start=2020-09-19T12:00:00Z&end=2020-09-19T18:00:00Z")
                .body(Body::empty())
                .unwrap(),
        )
        .await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body.error, "DATABASE_ERROR");
        assert_eq!(body.message, "cursor killed");
    }

    #[tokio::test]
    async fn test_failed_insert_is_500_database_error() {
        let mut mock = MockMeetingRepository::new();
        mock.expect_insert()
            .times(1)
            .returning(|_| Err(MeetingError::Database("not primary".into())));

        let (status, body) = call(
            mock,
            Request::post("/meetings")
                .body(Body::from(r#"{"title":"sync"}"#))
                .unwrap(),
        )
        .await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body.error, "DATABASE_ERROR");
        assert_eq!(body.code, 2003);
        assert_eq!(body.message, "not primary");
    }

    #[tokio::test]
    async fn test_failed_id_lookup_is_500_json() {
        let mut mock = MockMeetingRepository::new();
        mock.expect_find_by_id()
            .times(1)
            .returning(|_| Err(MeetingError::Database("connection reset".into())));

        let (status, body) = call(
            mock,
            Request::get("/meetings/65a1b2c3d4e5f60718293a4b")
                .body(Body::empty())
                .unwrap(),
        )
        .await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body.message, "connection reset");
    }

    #[tokio::test]
    async fn test_malformed_body_never_reaches_store() {
        let mut mock = MockMeetingRepository::new();
        mock.expect_insert().never();

        let (status, body) = call(
            mock,
            Request::post("/meetings").body(Body::from("[1, 2")).unwrap(),
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body.error, "INVALID_JSON");
    }
}
