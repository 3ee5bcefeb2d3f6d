//! API route handlers

pub mod collateral;
pub mod health;
pub mod orderbook;
pub mod yields;

use axum::{routing::get, Router};

use crate::AppState;

/// Create the API router with all routes
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_check))
        .nest("/yield", yields::router())
        .nest("/orderbook", orderbook::router())
        .nest("/collateral", collateral::router())
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;

    use axum::{
        body::{to_bytes, Body},
        http::{Request, StatusCode},
    };
    use serde_json::{json, Value};
    use tower::ServiceExt;

    const AS_OF: i64 = 1_700_000_000;
    const MATURITY: i64 = AS_OF + 90 * 86_400;

    async fn send(request: Request<Body>) -> (StatusCode, Value) {
        let response = create_router(AppState::new())
            .oneshot(request)
            .await
            .unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, body)
    }

    fn post_json(uri: &str, body: Value) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    #[tokio::test]
    async fn test_prepare_borrow_buckets() {
        let (status, body) = send(post_json(
            "/orderbook/prepare",
            json!({
                "maturity": MATURITY,
                "as_of": AS_OF,
                "aggregation_factor": 10,
                "borrow": [
                    {"amount": "1", "unitPrice": 9850},
                    {"amount": "1", "unitPrice": 9851},
                    {"amount": "1", "unitPrice": 9852},
                    {"amount": "1", "unitPrice": 9853},
                    {"amount": "1", "unitPrice": 9854},
                    {"amount": "0", "unitPrice": 9855}
                ],
                "lend": [{"amount": "3", "unitPrice": 9700}]
            }),
        ))
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["borrow"][0]["amount"], "0");
        assert_eq!(body["borrow"][0]["price"], 9855);
        assert_eq!(body["borrow"][1]["amount"], "5");
        assert_eq!(body["borrow"][1]["price"], 9850);
        assert_eq!(body["max_amount"], "5");
        assert_eq!(body["mid_price"]["price"], 9775);
    }

    #[tokio::test]
    async fn test_prepare_rejects_zero_factor() {
        let (status, body) = send(post_json(
            "/orderbook/prepare",
            json!({
                "maturity": MATURITY,
                "as_of": AS_OF,
                "aggregation_factor": 0,
                "borrow": [],
                "lend": []
            }),
        ))
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["code"], "invalid_aggregation_factor");
    }

    #[tokio::test]
    async fn test_collateral_summary() {
        let (status, body) = send(post_json(
            "/collateral/summary",
            json!({
                "collateral": {"ETH": "1200000000000000000"},
                "prices": {"ETH": 2000.34},
                "coverage_bps": 3700
            }),
        ))
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["collateral_usd"], 2400.41);
        assert_eq!(body["shortfall_to_threshold_bps"], 4300);
        assert_eq!(body["risk"]["tier"], "Low");
        assert_eq!(body["risk"]["color_tag"], "green");
        assert_eq!(body["collateral_display"]["ETH"], "1.200000 ETH");
    }

    #[tokio::test]
    async fn test_collateral_summary_display_balances() {
        let (status, body) = send(post_json(
            "/collateral/summary",
            json!({
                "collateral": {"USDC": "1234567"},
                "non_collateral": {"WBTC": "50000000"},
                "prices": {"USDC": 1.0, "WBTC": 60000.0},
                "coverage_bps": 0
            }),
        ))
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["collateral_display"]["USDC"], "1.23 USDC");
        assert_eq!(body["non_collateral_display"]["WBTC"], "0.5000 WBTC");
        assert_eq!(body["non_collateral_usd"], 30000.0);
    }

    #[tokio::test]
    async fn test_collateral_summary_unknown_currency() {
        let (status, body) = send(post_json(
            "/collateral/summary",
            json!({
                "collateral": {"DOGE": "1"},
                "prices": {},
                "coverage_bps": 0
            }),
        ))
        .await;

        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["code"], "unknown_currency");
    }

    #[tokio::test]
    async fn test_risk_lookup() {
        let request = Request::builder()
            .uri("/collateral/risk?coverage_pct=81")
            .body(Body::empty())
            .unwrap();
        let (status, body) = send(request).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["tier"], "VeryHigh");
        assert_eq!(body["color_tag"], "red");
    }

    #[tokio::test]
    async fn test_threshold_out_of_range() {
        let (status, body) = send(post_json(
            "/collateral/threshold",
            json!({"threshold_bps": 20000}),
        ))
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["code"], "bad_request");
    }
}
