// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Tests for submit-or-queue review recording.

#![allow(clippy::unwrap_used)]
#![allow(clippy::panic)]

use std::sync::Arc;
use std::time::Duration;

use flash_core::Credentials;
use serde_json::json;
use tempfile::tempdir;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use super::test_helpers::{open_queue, quality, queued_cards, ScriptedSubmitter};
use super::*;
use crate::api::{RequestPipeline, StudyApi};
use crate::secrets::{MemorySecretStore, SecretStore};
use crate::session::{AuthState, Session};

#[tokio::test]
async fn test_successful_review_is_not_queued() {
    let dir = tempdir().unwrap();
    let sync = StudySync::new(
        ScriptedSubmitter::default(),
        open_queue(&dir.path().join("queue.json")),
    );

    let outcome = sync.record_review(4, quality(5)).await.unwrap();

    assert!(outcome.is_submitted());
    assert!(sync.queue().is_empty().unwrap());
}

#[tokio::test]
async fn test_failed_review_is_queued() {
    let dir = tempdir().unwrap();
    let sync = StudySync::new(
        ScriptedSubmitter::failing(&[4]),
        open_queue(&dir.path().join("queue.json")),
    );

    let outcome = sync.record_review(4, quality(2)).await.unwrap();

    assert!(matches!(outcome, ReviewOutcome::Queued(_)));
    let entries = sync.queue().peek_all().unwrap();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].card_id, 4);
    assert_eq!(entries[0].quality.value(), 2);
}

#[tokio::test]
async fn test_expired_session_is_reported_with_queued_review() {
    let dir = tempdir().unwrap();
    let sync = StudySync::new(
        ScriptedSubmitter::expired(),
        open_queue(&dir.path().join("queue.json")),
    );

    let outcome = sync.record_review(4, quality(2)).await.unwrap();

    match outcome {
        ReviewOutcome::Queued(err) => assert!(err.is_session_expired()),
        other => panic!("expected queued review, got {:?}", other),
    }
    assert_eq!(sync.queue().len().unwrap(), 1);
}

#[tokio::test]
async fn test_success_flushes_backlog() {
    let dir = tempdir().unwrap();
    let queue = open_queue(&dir.path().join("queue.json"));
    queue.enqueue(1, quality(3)).unwrap();
    queue.enqueue(2, quality(3)).unwrap();
    let sync = StudySync::new(ScriptedSubmitter::default(), queue);

    sync.record_review(3, quality(4)).await.unwrap();

    assert!(sync.queue().is_empty().unwrap());
}

#[tokio::test]
async fn test_newer_review_supersedes_queued_one() {
    let dir = tempdir().unwrap();
    let queue = open_queue(&dir.path().join("queue.json"));
    queue.enqueue(7, quality(3)).unwrap();
    let submitter = Arc::new(ScriptedSubmitter::default());
    let sync = StudySync::new(Arc::clone(&submitter), queue);

    sync.record_review(7, quality(5)).await.unwrap();

    assert_eq!(submitter.calls(), vec![(7, 5)]);
    assert!(sync.queue().is_empty().unwrap());
}

#[tokio::test]
async fn test_superseded_review_dropped_before_backlog_flush() {
    let dir = tempdir().unwrap();
    let queue = open_queue(&dir.path().join("queue.json"));
    queue.enqueue(1, quality(2)).unwrap();
    queue.enqueue(7, quality(3)).unwrap();
    queue.enqueue(2, quality(4)).unwrap();
    let submitter = Arc::new(ScriptedSubmitter::default());
    let sync = StudySync::new(Arc::clone(&submitter), queue);

    sync.record_review(7, quality(5)).await.unwrap();

    assert_eq!(submitter.calls(), vec![(7, 5), (1, 2), (2, 4)]);
    assert!(sync.queue().is_empty().unwrap());
}

#[tokio::test]
async fn test_failed_newer_review_replaces_queued_one() {
    let dir = tempdir().unwrap();
    let queue = open_queue(&dir.path().join("queue.json"));
    queue.enqueue(7, quality(3)).unwrap();
    let sync = StudySync::new(ScriptedSubmitter::failing(&[7]), queue);

    sync.record_review(7, quality(5)).await.unwrap();

    let entries = sync.queue().peek_all().unwrap();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].quality.value(), 5);
}

#[tokio::test]
async fn test_backlog_flush_keeps_failing_tail() {
    let dir = tempdir().unwrap();
    let queue = open_queue(&dir.path().join("queue.json"));
    queue.enqueue(1, quality(3)).unwrap();
    queue.enqueue(2, quality(3)).unwrap();
    let sync = StudySync::new(ScriptedSubmitter::failing(&[1]), queue);

    let outcome = sync.record_review(3, quality(4)).await.unwrap();

    assert!(outcome.is_submitted());
    assert_eq!(queued_cards(sync.queue()), vec![1, 2]);
}

#[tokio::test]
async fn test_explicit_flush() {
    let dir = tempdir().unwrap();
    let queue = open_queue(&dir.path().join("queue.json"));
    queue.enqueue(1, quality(3)).unwrap();
    let sync = StudySync::new(ScriptedSubmitter::default(), queue);

    let report = sync.flush().await.unwrap();
    assert_eq!(report.submitted, 1);
    assert_eq!(report.remaining, 0);
}

#[tokio::test]
async fn test_unreachable_server_queues_through_study_api() {
    let dir = tempdir().unwrap();
    let store: Arc<dyn SecretStore> = Arc::new(MemorySecretStore::with_credentials(
        &Credentials::new("tok", Some("ref".into())),
    ));
    let session = Arc::new(Session::new(Arc::clone(&store)));
    let pipeline = Arc::new(
        RequestPipeline::new("http://127.0.0.1:1", Duration::from_secs(2), session).unwrap(),
    );
    let queue = OfflineQueue::open(&dir.path().join("queue.json"), store).unwrap();
    let sync = StudySync::new(StudyApi::new(pipeline), queue);

    let outcome = sync.record_review(8, quality(1)).await.unwrap();

    assert!(matches!(outcome, ReviewOutcome::Queued(_)));
    assert_eq!(queued_cards(sync.queue()), vec![8]);
}

#[tokio::test]
async fn test_rejected_refresh_queues_and_expires_session() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/study/8/review"))
        .respond_with(ResponseTemplate::new(401))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/api/auth/refresh"))
        .respond_with(ResponseTemplate::new(403).set_body_json(json!({"message": "expired"})))
        .expect(1)
        .mount(&server)
        .await;

    let dir = tempdir().unwrap();
    let store: Arc<dyn SecretStore> = Arc::new(MemorySecretStore::with_credentials(
        &Credentials::new("tok", Some("ref".into())),
    ));
    let session = Arc::new(Session::new(Arc::clone(&store)));
    let pipeline = Arc::new(
        RequestPipeline::new(&server.uri(), Duration::from_secs(5), Arc::clone(&session))
            .unwrap(),
    );
    let queue = OfflineQueue::open(&dir.path().join("queue.json"), store).unwrap();
    let sync = StudySync::new(StudyApi::new(pipeline), queue);

    let outcome = sync.record_review(8, quality(1)).await.unwrap();

    match outcome {
        ReviewOutcome::Queued(err) => assert!(err.is_session_expired()),
        other => panic!("expected queued review, got {:?}", other),
    }
    assert_eq!(session.state(), AuthState::Expired);
    assert_eq!(queued_cards(sync.queue()), vec![8]);

    // Signed out now, so a flush leaves the review in place.
    let report = sync.flush().await.unwrap();
    assert_eq!(report.remaining, 1);
}
