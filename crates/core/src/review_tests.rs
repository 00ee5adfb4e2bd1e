// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

#![allow(clippy::unwrap_used)]

use super::*;
use yare::parameterized;

#[parameterized(
    zero = { 0 },
    three = { 3 },
    five = { 5 },
)]
fn quality_accepts_range(value: i64) {
    let quality = Quality::try_from(value).unwrap();
    assert_eq!(i64::from(quality), value);
}

#[parameterized(
    negative = { -1 },
    six = { 6 },
    huge = { 300 },
)]
fn quality_rejects_out_of_range(value: i64) {
    let err = Quality::try_from(value).unwrap_err();
    assert!(matches!(err, Error::InvalidQuality(v) if v == value));
}

#[test]
fn quality_deserialize_validates() {
    assert!(serde_json::from_str::<Quality>("4").is_ok());
    assert!(serde_json::from_str::<Quality>("7").is_err());
}

#[test]
fn submission_body_shape() {
    let body = ReviewSubmission {
        quality: Quality::try_from(5).unwrap(),
    };
    assert_eq!(serde_json::to_string(&body).unwrap(), r#"{"quality":5}"#);
}

#[test]
fn pending_review_json_roundtrip() {
    let review = PendingReview::new(7, Quality::try_from(3).unwrap());
    let json = serde_json::to_string(&review).unwrap();
    assert!(json.contains("\"card_id\":7"));
    let parsed: PendingReview = serde_json::from_str(&json).unwrap();
    assert_eq!(parsed, review);
}

#[test]
fn due_card_from_server_json() {
    let json = r#"{"id":3,"deckId":1,"frontText":"hola","backText":"hello","imageUrl":null,"videoUrl":null}"#;
    let card: DueCard = serde_json::from_str(json).unwrap();
    assert_eq!(card.id, 3);
    assert_eq!(card.front_text, "hola");
    assert!(card.image_url.is_none());
}
