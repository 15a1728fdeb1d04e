//! Transaction route handlers.

use axum::extract::State;
use serde::Deserialize;

use crate::error::Result;
use crate::models::requests::{TransactionRequest, UpdateTransactionRequest};
use crate::models::transaction::Transaction;
use crate::response::{ApiJson, ApiQuery, BaseResponse};
use crate::state::AppState;

/// Query for `GET /api/transaction`.
#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct TransactionQuery {
    pub transaction_id: String,
}

/// Query for `GET /api/transaction/history`.
#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct HistoryQuery {
    pub user_id: String,
}

/// `POST /api/transaction`
pub async fn create(
    State(state): State<AppState>,
    ApiJson(request): ApiJson<TransactionRequest>,
) -> Result<BaseResponse<Transaction>> {
    let transaction = state.transactions().create_transaction(request).await?;
    Ok(BaseResponse::ok(transaction))
}

/// `POST /api/transaction/status`
pub async fn update_status(
    State(state): State<AppState>,
    ApiJson(request): ApiJson<UpdateTransactionRequest>,
) -> Result<BaseResponse<Transaction>> {
    let transaction = state
        .transactions()
        .update_transaction_status(request)
        .await?;
    Ok(BaseResponse::ok(transaction))
}

/// `GET /api/transaction?transactionId=`
pub async fn show(
    State(state): State<AppState>,
    ApiQuery(query): ApiQuery<TransactionQuery>,
) -> Result<BaseResponse<Transaction>> {
    let transaction = state
        .transactions()
        .get_transaction_by_id(&query.transaction_id)
        .await?;
    Ok(BaseResponse::ok(transaction))
}

/// `GET /api/transaction/history?userId=`
pub async fn history(
    State(state): State<AppState>,
    ApiQuery(query): ApiQuery<HistoryQuery>,
) -> Result<BaseResponse<Vec<Transaction>>> {
    let transactions = state
        .transactions()
        .get_transaction_history(&query.user_id)
        .await?;
    Ok(BaseResponse::ok(transactions))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use axum::http::{Method, StatusCode};
    use chrono::Utc;
    use serde_json::json;

    use sea_apd_core::{TransactionId, TransactionStatus, UserId};

    use super::*;
    use crate::db::RepositoryError;
    use crate::models::transaction::NewTransaction;
    use crate::routes::test_support::{Mocks, request, send};

    fn stored(id: TransactionId, new: &NewTransaction) -> Transaction {
        Transaction {
            id,
            status: new.status,
            bank_number: new.bank_number.clone(),
            bank_name: new.bank_name.clone(),
            amount: new.amount,
            customer_id: new.customer_id,
            merchant_id: new.merchant_id,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn sample(customer_id: UserId, merchant_id: UserId) -> Transaction {
        stored(
            TransactionId::generate(),
            &NewTransaction {
                status: TransactionStatus::WaitingConfirmation,
                bank_number: "1234567890".to_string(),
                bank_name: "BCA".to_string(),
                amount: 150_000,
                customer_id,
                merchant_id,
            },
        )
    }

    #[tokio::test]
    async fn test_create_transaction() {
        let customer = UserId::generate();
        let merchant = UserId::generate();

        let mut mocks = Mocks::default();
        mocks
            .transactions
            .expect_create()
            .times(1)
            .returning(|t| Ok(stored(TransactionId::generate(), &t)));
        let app = mocks.into_app();

        let (status, _, body) = send(
            &app,
            request(
                Method::POST,
                "/api/transaction",
                Some(json!({
                    "bank_number": "1234567890",
                    "bank_name": "BCA",
                    "amount": 150_000,
                    "customer_id": customer.to_string(),
                    "merchant_id": merchant.to_string()
                })),
                None,
            ),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"]["status"], "waiting_confirmation");
        assert_eq!(body["data"]["customer_id"], customer.to_string());
    }

    #[tokio::test]
    async fn test_empty_requests_are_not_found() {
        let mut mocks = Mocks::default();
        mocks.transactions.expect_create().never();
        mocks.transactions.expect_update_status().never();
        let app = mocks.into_app();

        for uri in ["/api/transaction", "/api/transaction/status"] {
            let (status, _, body) =
                send(&app, request(Method::POST, uri, Some(json!({})), None)).await;
            assert_eq!(status, StatusCode::NOT_FOUND, "{uri}");
            assert_eq!(body["code"], 404);
            assert_eq!(body["message"], "Not Found");
        }
    }

    #[tokio::test]
    async fn test_create_with_unknown_customer_is_not_found() {
        let mut mocks = Mocks::default();
        mocks.transactions.expect_create().returning(|_| {
            Err(RepositoryError::MissingReference(
                "transaction: transaction_customer_id_fkey".to_string(),
            ))
        });
        let app = mocks.into_app();

        let (status, _, body) = send(
            &app,
            request(
                Method::POST,
                "/api/transaction",
                Some(json!({
                    "bank_number": "1234567890",
                    "bank_name": "BCA",
                    "amount": 10,
                    "customer_id": UserId::generate().to_string(),
                    "merchant_id": UserId::generate().to_string()
                })),
                None,
            ),
        )
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["message"], "Not Found");
    }

    #[tokio::test]
    async fn test_update_status() {
        let existing = sample(UserId::generate(), UserId::generate());
        let mut mocks = Mocks::default();
        let base = existing.clone();
        mocks
            .transactions
            .expect_update_status()
            .returning(move |id, status| {
                if id != base.id {
                    return Err(RepositoryError::NotFound);
                }
                let mut t = base.clone();
                t.status = status;
                Ok(t)
            });
        let app = mocks.into_app();

        let (status, _, body) = send(
            &app,
            request(
                Method::POST,
                "/api/transaction/status",
                Some(json!({
                    "transaction_id": existing.id.to_string(),
                    "status": "accepted"
                })),
                None,
            ),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"]["status"], "accepted");

        let (status, _, _) = send(
            &app,
            request(
                Method::POST,
                "/api/transaction/status",
                Some(json!({
                    "transaction_id": existing.id.to_string(),
                    "status": "teleported"
                })),
                None,
            ),
        )
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND);

        let (status, _, _) = send(
            &app,
            request(
                Method::POST,
                "/api/transaction/status",
                Some(json!({
                    "transaction_id": TransactionId::generate().to_string(),
                    "status": "rejected"
                })),
                None,
            ),
        )
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_get_by_id() {
        let existing = sample(UserId::generate(), UserId::generate());
        let mut mocks = Mocks::default();
        let found = existing.clone();
        mocks
            .transactions
            .expect_get_by_id()
            .returning(move |id| Ok((id == found.id).then(|| found.clone())));
        let app = mocks.into_app();

        let uri = format!("/api/transaction?transactionId={}", existing.id);
        let (status, _, body) = send(&app, request(Method::GET, &uri, None, None)).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"]["id"], existing.id.to_string());

        let uri = format!("/api/transaction?transactionId={}", TransactionId::generate());
        let (status, _, _) = send(&app, request(Method::GET, &uri, None, None)).await;
        assert_eq!(status, StatusCode::NOT_FOUND);

        for uri in ["/api/transaction", "/api/transaction?transactionId=", "/api/transaction?transactionId=abc"] {
            let (status, _, body) = send(&app, request(Method::GET, uri, None, None)).await;
            assert_eq!(status, StatusCode::NOT_FOUND, "{uri}");
            assert_eq!(body["message"], "Not Found");
        }
    }

    #[tokio::test]
    async fn test_history() {
        let customer = UserId::generate();
        let lonely = UserId::generate();
        let rows = vec![
            sample(customer, UserId::generate()),
            sample(customer, UserId::generate()),
        ];

        let mut mocks = Mocks::default();
        mocks
            .transactions
            .expect_list_by_user()
            .returning(move |id| Ok(if id == customer { rows.clone() } else { Vec::new() }));
        let app = mocks.into_app();

        let uri = format!("/api/transaction/history?userId={customer}");
        let (status, _, body) = send(&app, request(Method::GET, &uri, None, None)).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"].as_array().unwrap().len(), 2);

        let uri = format!("/api/transaction/history?userId={lonely}");
        let (status, _, body) = send(&app, request(Method::GET, &uri, None, None)).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"], json!([]));

        let (status, _, _) = send(
            &app,
            request(Method::GET, "/api/transaction/history?userId=", None, None),
        )
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }
}
