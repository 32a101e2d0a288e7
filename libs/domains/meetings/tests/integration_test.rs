//! MongoDB-backed repository tests. Require Docker:
//! `cargo test -p domain_meetings -- --ignored`

use chrono::{DateTime, TimeZone, Utc};
use domain_meetings::{
    Meeting, MeetingError, MeetingRepository, MongoMeetingRepository, Participant,
};
use mongodb::bson::{Document, doc, oid::ObjectId};
use test_utils::TestMongo;

fn at(h: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2020, 9, 19, h, 0, 0).unwrap()
}

fn meeting(title: &str, start: u32, end: u32) -> Meeting {
    Meeting {
        title: title.into(),
        participants: vec![Participant {
            name: "Fedrick".into(),
            email: "f123.com".into(),
            rsvp: "Yes".into(),
        }],
        start_time: Some(at(start)),
        end_time: Some(at(end)),
        created_at: Some(Utc::now()),
        ..Default::default()
    }
}

#[tokio::test]
#[ignore = "requires Docker"]
async fn test_insert_and_find_by_id() {
    let mongo = TestMongo::new().await;
    let repo = MongoMeetingRepository::new(mongo.database());

    let id = repo.insert(meeting("with Spiderman", 13, 17)).await.unwrap();
    let found = repo.find_by_id(&id).await.unwrap();

    assert_eq!(found.id, id);
    assert_eq!(found.title, "with Spiderman");
    assert_eq!(found.participants.len(), 1);
    assert_eq!(found.start_time, Some(at(13)));
    assert_eq!(found.end_time, Some(at(17)));
}

#[tokio::test]
#[ignore = "requires Docker"]
async fn test_stored_document_layout() {
    let mongo = TestMongo::new().await;
    let repo = MongoMeetingRepository::with_collection(mongo.database(), "layout");

    let mut sparse = meeting("", 13, 17);
    sparse.participants.clear();
    let id = repo.insert(sparse).await.unwrap();

    let raw = mongo
        .database()
        .collection::<Document>("layout")
        .find_one(doc! { "_id": ObjectId::parse_str(&id).unwrap() })
        .await
        .unwrap()
        .unwrap();

    assert!(raw.get_object_id("_id").is_ok());
    assert!(raw.get_datetime("start_time").is_ok());
    assert!(!raw.contains_key("title"));
    assert!(!raw.contains_key("participants"));
}

#[tokio::test]
#[ignore = "requires Docker"]
async fn test_find_by_id_errors() {
    let mongo = TestMongo::new().await;
    let repo = MongoMeetingRepository::new(mongo.database());

    assert!(matches!(
        repo.find_by_id("zzz").await,
        Err(MeetingError::InvalidId { .. })
    ));
    assert!(matches!(
        repo.find_by_id(&ObjectId::new().to_hex()).await,
        Err(MeetingError::NotFound(_))
    ));
}

#[tokio::test]
#[ignore = "requires Docker"]
async fn test_time_range_containment() {
    let mongo = TestMongo::new().await;
    let repo = MongoMeetingRepository::new(mongo.database());

    let inside = repo.insert(meeting("inside", 13, 17)).await.unwrap();
    let edges = repo.insert(meeting("edges", 12, 18)).await.unwrap();
    repo.insert(meeting("early", 11, 13)).await.unwrap();
    repo.insert(meeting("late", 17, 19)).await.unwrap();

    let found = repo.find_by_time_range(at(12), at(18)).await.unwrap();
    let mut ids: Vec<_> = found.into_iter().map(|m| m.id).collect();
    ids.sort();
    let mut expected = vec![inside, edges];
    expected.sort();
    assert_eq!(ids, expected);

    let none = repo.find_by_time_range(at(20), at(21)).await.unwrap();
    assert!(none.is_empty());
}

#[tokio::test]
#[ignore = "requires Docker"]
async fn test_time_range_skips_foreign_documents() {
    let mongo = TestMongo::new().await;
    let repo = MongoMeetingRepository::with_collection(mongo.database(), "mixed");

    let kept = repo.insert(meeting("kept", 13, 17)).await.unwrap();
    mongo
        .database()
        .collection::<Document>("mixed")
        .insert_one(doc! {
            "title": 42,
            "start_time": mongodb::bson::DateTime::from_millis(at(13).timestamp_millis()),
            "end_time": mongodb::bson::DateTime::from_millis(at(14).timestamp_millis()),
        })
        .await
        .unwrap();

    let found = repo.find_by_time_range(at(12), at(18)).await.unwrap();
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].id, kept);
}
