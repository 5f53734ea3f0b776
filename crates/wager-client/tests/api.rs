//! Client tests against a mocked wager service.

use serde_json::json;
use wiremock::matchers::{body_partial_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use wager_client::{ClientError, WagerClient};
use wager_core::{AccountId, Decimal, DepositId, TransactionId, TransactionType};

fn error_body(code: &str, message: &str, details: Option<serde_json::Value>) -> serde_json::Value {
    let mut error = json!({ "code": code, "message": message });
    if let Some(details) = details {
        error["details"] = details;
    }
    json!({ "error": error })
}

#[tokio::test]
async fn get_account_parses_statistics() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/user/get"))
        .and(body_partial_json(json!({ "id": 1, "token": "t1" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": 1,
            "balance": 125.0,
            "deposit_count": 1,
            "deposit_sum": 50.0,
            "bet_count": 0,
            "bet_sum": 0.0,
            "win_count": 0,
            "win_sum": 0.0,
        })))
        .mount(&server)
        .await;

    let client = WagerClient::new(server.uri()).unwrap();
    let account = client.get_account(AccountId::new(1), "t1").await.unwrap();

    assert_eq!(account.id, AccountId::new(1));
    assert_eq!(account.balance, Decimal::from(125));
    assert_eq!(account.statistics().deposit_count, 1);
    assert_eq!(account.statistics().deposit_sum, Decimal::from(50));
}

#[tokio::test]
async fn deposit_sends_amount_and_returns_balance() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/user/deposit"))
        .and(body_partial_json(json!({
            "user_id": 1,
            "deposit_id": 7,
            "amount": "50",
            "token": "t1",
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "balance": 125.0 })))
        .expect(1)
        .mount(&server)
        .await;

    let client = WagerClient::new(server.uri()).unwrap();
    let balance = client
        .deposit(AccountId::new(1), DepositId::new(7), Decimal::from(50), "t1")
        .await
        .unwrap();

    assert_eq!(balance, Decimal::from(125));
}

#[tokio::test]
async fn transaction_sends_type_on_the_wire() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/transaction"))
        .and(body_partial_json(json!({ "type": "Win", "transaction_id": 1 })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "balance": 75.0 })))
        .mount(&server)
        .await;

    let client = WagerClient::new(server.uri()).unwrap();
    let balance = client
        .transaction(
            AccountId::new(2),
            TransactionId::new(1),
            TransactionType::Win,
            Decimal::from(25),
            "t2",
        )
        .await
        .unwrap();

    assert_eq!(balance, Decimal::from(75));
}

#[tokio::test]
async fn error_codes_map_to_typed_errors() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/transaction"))
        .respond_with(ResponseTemplate::new(400).set_body_json(error_body(
            "insufficient_balance",
            "insufficient balance: balance=75, required=300",
            Some(json!({ "balance": 75.0, "required": 300.0 })),
        )))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/user/get"))
        .and(body_partial_json(json!({ "id": 42 })))
        .respond_with(ResponseTemplate::new(404).set_body_json(error_body(
            "not_found",
            "account not found: 42",
            None,
        )))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/user/get"))
        .and(body_partial_json(json!({ "id": 1 })))
        .respond_with(ResponseTemplate::new(400).set_body_json(error_body(
            "wrong_token",
            "wrong token",
            None,
        )))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/user/deposit"))
        .respond_with(ResponseTemplate::new(409).set_body_json(error_body(
            "duplicate_record",
            "deposit 7 already recorded",
            None,
        )))
        .mount(&server)
        .await;

    let client = WagerClient::new(server.uri()).unwrap();

    let err = client
        .transaction(
            AccountId::new(2),
            TransactionId::new(2),
            TransactionType::Bet,
            Decimal::from(300),
            "t2",
        )
        .await
        .unwrap_err();
    match err {
        ClientError::InsufficientBalance { balance, required } => {
            assert_eq!(balance, Decimal::from(75));
            assert_eq!(required, Decimal::from(300));
        }
        other => panic!("unexpected error: {other:?}"),
    }

    let err = client.get_account(AccountId::new(42), "t").await.unwrap_err();
    assert!(matches!(err, ClientError::NotFound { .. }));

    let err = client.get_account(AccountId::new(1), "bad").await.unwrap_err();
    assert!(matches!(err, ClientError::WrongToken));

    let err = client
        .deposit(AccountId::new(1), DepositId::new(7), Decimal::ONE, "t1")
        .await
        .unwrap_err();
    assert!(matches!(err, ClientError::DuplicateRecord { .. }));
}

#[tokio::test]
async fn unknown_errors_keep_status_and_code() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/user/create"))
        .respond_with(ResponseTemplate::new(500).set_body_json(error_body(
            "internal_error",
            "An internal error occurred",
            None,
        )))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/user/get"))
        .respond_with(ResponseTemplate::new(502).set_body_string("bad gateway"))
        .mount(&server)
        .await;

    let client = WagerClient::new(server.uri()).unwrap();

    let err = client
        .create_account(AccountId::new(1), Decimal::ONE, "t")
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        ClientError::Api { ref code, status: 500, .. } if code == "internal_error"
    ));

    let err = client.get_account(AccountId::new(1), "t").await.unwrap_err();
    assert!(matches!(
        err,
        ClientError::Api { ref code, status: 502, .. } if code == "unknown"
    ));
}
