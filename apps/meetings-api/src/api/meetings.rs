//! Wires the meetings domain onto the configured MongoDB collection.

use axum::Router;
use domain_meetings::{MeetingService, MongoMeetingRepository, handlers};

use crate::state::AppState;

pub fn router(state: &AppState) -> Router {
    let settings = &state.config.meetings;

    let repository =
        MongoMeetingRepository::with_collection(state.db.clone(), &settings.collection);
    let service = MeetingService::new(repository).with_timeouts(settings.timeouts);

    handlers::router(service)
}
