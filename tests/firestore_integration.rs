// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Firestore integration tests.
//!
//! Require the Firestore emulator; set FIRESTORE_EMULATOR_HOST to run.

use chrono::{TimeZone, Utc};
use run_tracker::models::{Activity, Sport};

mod common;

fn sample_activity(sport: Sport, distance_km: f64, duration_s: u32) -> Activity {
    Activity {
        id: uuid::Uuid::new_v4().to_string(),
        sport,
        distance_km,
        duration_s,
        date: Utc.with_ymd_and_hms(2024, 6, 1, 8, 0, 0).unwrap(),
        title: Some("Morning session".to_string()),
        comment: None,
    }
}

#[tokio::test]
async fn test_activity_round_trip() {
    require_emulator!();
    let db = common::test_db().await;

    let activity = sample_activity(Sport::Run, 10.0, 3000);
    db.create_activity(&activity).await.unwrap();

    let fetched = db
        .get_activity(&activity.id)
        .await
        .unwrap()
        .expect("activity should exist");
    assert_eq!(fetched.sport, Sport::Run);
    assert_eq!(fetched.distance_km, 10.0);
    assert_eq!(fetched.duration_s, 3000);
    assert_eq!(fetched.date, activity.date);

    db.delete_activity(&activity.id).await.unwrap();
    assert!(db.get_activity(&activity.id).await.unwrap().is_none());
}

#[tokio::test]
async fn test_list_filters_by_sport() {
    require_emulator!();
    let db = common::test_db().await;

    let run = sample_activity(Sport::Run, 5.0, 1500);
    let swim = sample_activity(Sport::Swim, 1.0, 1800);
    db.create_activity(&run).await.unwrap();
    db.create_activity(&swim).await.unwrap();

    let swims = db.list_activities(Some(Sport::Swim)).await.unwrap();
    assert!(swims.iter().any(|a| a.id == swim.id));
    assert!(!swims.iter().any(|a| a.id == run.id));

    db.delete_activity(&run.id).await.unwrap();
    db.delete_activity(&swim.id).await.unwrap();
}
