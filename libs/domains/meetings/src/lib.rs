//! Meetings Domain
//!
//! Scheduling of meetings backed by MongoDB: create a meeting, fetch one by
//! id, list those contained in a time window.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────┐
//! │  Handlers   │  ← HTTP endpoints (POST /, GET /, GET /{id})
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │   Service   │  ← Creation timestamp, per-call timeouts
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │ Repository  │  ← Data access (trait + MongoDB / in-memory)
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │   Models    │  ← Meeting, Participant, DTOs
//! └─────────────┘
//! ```
//!
//! # Usage
//!
//! ```rust,no_run
//! use domain_meetings::{MeetingService, MongoMeetingRepository, handlers};
//! use mongodb::Client;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let client = Client::with_uri_str("mongodb://localhost:27017").await?;
//! let db = client.database("appointy");
//!
//! let repository = MongoMeetingRepository::new(db);
//! let service = MeetingService::new(repository);
//!
//! let app = axum::Router::new().nest("/meetings", handlers::router(service));
//! # Ok(())
//! # }
//! ```

pub mod error;
pub mod extract;
pub mod handlers;
pub mod memory;
pub mod models;
pub mod mongodb;
pub mod repository;
pub mod service;

// Re-export commonly used types
pub use error::{MeetingError, MeetingResult};
pub use handlers::ApiDoc;
pub use memory::InMemoryMeetingRepository;
pub use models::{CreateMeeting, InsertAck, Meeting, Participant, TimeRangeQuery, zero_instant};
pub use self::mongodb::MongoMeetingRepository;
pub use repository::MeetingRepository;
pub use service::{MeetingService, MeetingTimeouts};
