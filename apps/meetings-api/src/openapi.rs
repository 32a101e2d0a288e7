//! OpenAPI documentation configuration

use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Meetings API",
        version = "0.1.0",
        description = "Schedule meetings and look them up by id or time window",
        license(name = "MIT")
    ),
    servers(
        (url = "http://localhost:12345", description = "Local development server")
    ),
    nest(
        (path = "/meetings", api = domain_meetings::ApiDoc)
    ),
    tags(
        (name = "Meetings", description = "Meeting scheduling endpoints (MongoDB)")
    )
)]
pub struct ApiDoc;
