//! Bet/win transaction integration tests.

mod common;

use std::future::IntoFuture;

use axum::http::StatusCode;
use common::TestHarness;
use serde_json::json;
use wager_core::BetSumMode;

fn transaction(id: u64, kind: &str, amount: i64, token: &str) -> serde_json::Value {
    json!({
        "user_id": 2,
        "transaction_id": id,
        "type": kind,
        "amount": amount,
        "token": token,
    })
}

#[tokio::test]
async fn win_increases_balance() {
    let harness = TestHarness::new();
    harness.create_account(2, 50, "t2").await;

    let response = harness
        .server
        .post("/transaction")
        .json(&transaction(1, "Win", 25, "t2"))
        .await;

    response.assert_status_ok();
    let body: serde_json::Value = response.json();
    assert_eq!(body["balance"], 75.0);
}

#[tokio::test]
async fn bet_over_balance_is_rejected() {
    let harness = TestHarness::new();
    harness.create_account(2, 75, "t2").await;

    let response = harness
        .server
        .post("/transaction")
        .json(&transaction(2, "Bet", 300, "t2"))
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
    let body: serde_json::Value = response.json();
    assert_eq!(body["error"]["code"], "insufficient_balance");
    assert_eq!(body["error"]["details"]["balance"], 75.0);
    assert_eq!(body["error"]["details"]["required"], 300.0);

    let body: serde_json::Value = harness
        .server
        .post("/user/get")
        .json(&json!({ "id": 2, "token": "t2" }))
        .await
        .json();
    assert_eq!(body["balance"], 75.0);
    assert_eq!(body["bet_count"], 0);
}

#[tokio::test]
async fn wrong_token_leaves_balance_unchanged() {
    let harness = TestHarness::new();
    harness.create_account(2, 75, "t2").await;

    let response = harness
        .server
        .post("/transaction")
        .json(&transaction(3, "Win", 25, "wrong"))
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
    let body: serde_json::Value = response.json();
    assert_eq!(body["error"]["code"], "wrong_token");
}

#[tokio::test]
async fn unknown_type_is_a_bad_request() {
    let harness = TestHarness::new();
    harness.create_account(2, 75, "t2").await;

    for kind in ["Refund", "bet", ""] {
        harness
            .server
            .post("/transaction")
            .json(&transaction(4, kind, 5, "t2"))
            .await
            .assert_status(StatusCode::BAD_REQUEST);
    }
}

#[tokio::test]
async fn statistics_follow_the_bet_sum_mode() {
    for (mode, expected) in [(BetSumMode::Gross, 30.0), (BetSumMode::Net, -30.0)] {
        let harness = TestHarness::with_mode(mode);
        harness.create_account(2, 100, "t2").await;

        harness
            .server
            .post("/transaction")
            .json(&transaction(1, "Bet", 30, "t2"))
            .await
            .assert_status_ok();
        harness
            .server
            .post("/transaction")
            .json(&transaction(2, "Win", 10, "t2"))
            .await
            .assert_status_ok();

        let harness = harness.restart().await;
        let body: serde_json::Value = harness
            .server
            .post("/user/get")
            .json(&json!({ "id": 2, "token": "t2" }))
            .await
            .json();
        assert_eq!(body["balance"], 80.0);
        assert_eq!(body["bet_count"], 1);
        assert_eq!(body["bet_sum"], expected);
        assert_eq!(body["win_count"], 1);
        assert_eq!(body["win_sum"], 10.0);
    }
}

#[tokio::test]
async fn concurrent_requests_never_lose_updates() {
    let harness = TestHarness::new();
    harness.create_account(2, 0, "t2").await;

    let requests = (1..=40u64).map(|id| {
        harness
            .server
            .post("/transaction")
            .json(&transaction(id, "Win", 1, "t2"))
            .into_future()
    });
    let responses = futures::future::join_all(requests).await;
    for response in responses {
        response.assert_status_ok();
    }

    let body: serde_json::Value = harness
        .server
        .post("/user/get")
        .json(&json!({ "id": 2, "token": "t2" }))
        .await
        .json();
    assert_eq!(body["balance"], 40.0);
    assert_eq!(body["win_count"], 40);
}
