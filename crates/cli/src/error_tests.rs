// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

#![allow(clippy::unwrap_used)]

use super::*;
use yare::parameterized;

#[parameterized(
    not_signed_in = { Error::NotSignedIn, "flash login" },
    bad_url = { Error::InvalidBaseUrl("ftp://x".into()), "http://" },
    config = { Error::Config("bad toml".into()), "bad toml" },
)]
fn error_display_contains(err: Error, expected: &str) {
    assert!(err.to_string().contains(expected));
}

#[test]
fn session_expired_reads_as_log_in_again() {
    let err: Error = ApiError::SessionExpired.into();
    assert!(err.user_message().contains("log in again"));
}

#[test]
fn request_failure_keeps_server_message() {
    let err: Error = ApiError::RequestFailed {
        status: 404,
        message: Some("Deck not found".into()),
    }
    .into();
    assert_eq!(err.user_message(), "Deck not found");
}
