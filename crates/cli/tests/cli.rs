// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Binary-level tests: argument handling, exit codes and offline behavior.

#![allow(clippy::unwrap_used)]

mod common;
use common::*;

use serde_json::json;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[test]
fn help_lists_commands() {
    let home = TempDir::new().unwrap();
    flash(&home)
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("review"))
        .stdout(predicate::str::contains("duel"));
}

#[test]
fn queue_status_starts_empty() {
    let home = TempDir::new().unwrap();
    flash(&home)
        .args(["queue", "status"])
        .assert()
        .success()
        .stdout("No reviews queued.\n");
}

#[test]
fn whoami_signed_out_points_to_login() {
    let home = TempDir::new().unwrap();
    flash(&home)
        .arg("whoami")
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("flash login"));
}

#[test]
fn out_of_range_quality_is_a_usage_error() {
    let home = TempDir::new().unwrap();
    flash(&home)
        .args(["review", "1", "9"])
        .assert()
        .failure()
        .code(2);
}

#[test]
fn invalid_base_url_is_rejected() {
    let home = TempDir::new().unwrap();
    flash(&home)
        .args(["--base-url", "ftp://example", "queue", "status"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid base URL"));
}

#[test]
fn signed_out_review_is_queued_and_listed() {
    let home = TempDir::new().unwrap();
    flash(&home)
        .args(["review", "5", "3"])
        .assert()
        .success()
        .stdout("Not signed in; review for card 5 queued.\n");

    flash(&home)
        .args(["queue", "status"])
        .assert()
        .success()
        .stdout(predicate::str::contains("quality 3"))
        .stdout(predicate::str::contains("1 review(s) queued"));

    flash(&home)
        .args(["queue", "status", "-o", "json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"card_id\": 5"));
}

#[test]
fn flush_signed_out_fails() {
    let home = TempDir::new().unwrap();
    flash(&home)
        .args(["queue", "flush"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("not signed in"));
}

#[tokio::test(flavor = "multi_thread")]
async fn login_replays_queue_then_logout() {
    let home = TempDir::new().unwrap();
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/auth/signin"))
        .and(body_json(json!({"username": "ada", "password": "pw"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "token": "acc", "refreshToken": "ref", "username": "ada"
        })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/api/study/5/review"))
        .and(header("authorization", "Bearer acc"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    flash(&home).args(["review", "5", "4"]).assert().success();

    flash(&home)
        .args(["--base-url", &server.uri(), "login", "-u", "ada", "-p", "pw"])
        .assert()
        .success()
        .stdout("Signed in as ada.\nSubmitted 1 queued review(s).\n");

    flash(&home)
        .args(["queue", "status"])
        .assert()
        .success()
        .stdout("No reviews queued.\n");

    flash(&home).arg("logout").assert().success().stdout("Signed out.\n");
    flash(&home).arg("whoami").assert().failure();
}
