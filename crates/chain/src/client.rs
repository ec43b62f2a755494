//! TronGrid account API client.

use crate::fetcher::RetryingFetcher;
use tracing::debug;
use tronwatch_core::{TransferEvent, UsdtAmount};

/// USDT TRC20 contract address on TRON mainnet.
pub const USDT_CONTRACT: &str = "TR7NHqjeKQxGTCi8q8ZY4pL8otSzgjLj6t";

/// TronGrid production endpoint.
pub const TRONGRID_BASE_URL: &str = "https://api.trongrid.io";

/// How many transfers to request per poll. Transfers beyond this window
/// between two polls are silently missed; an accepted limitation.
pub const TRANSFER_FETCH_LIMIT: usize = 20;

/// Client for the two TronGrid endpoints the monitor needs: recent TRC20
/// transfers and current USDT balance. Both degrade to empty/zero when the
/// fetch layer reports absence.
#[derive(Debug, Clone)]
pub struct TronGridClient {
    fetcher: RetryingFetcher,
    base_url: String,
}

impl TronGridClient {
    pub fn new() -> Self {
        Self::with_base_url(TRONGRID_BASE_URL, RetryingFetcher::new())
    }

    /// Point the client at a different endpoint (tests, gateways).
    pub fn with_base_url(base_url: impl Into<String>, fetcher: RetryingFetcher) -> Self {
        Self {
            fetcher,
            base_url: base_url.into(),
        }
    }

    /// Fetch recent USDT transfers for `address`, newest first as the API
    /// returns them. Absence and malformed entries both collapse to "no new
    /// data": an empty vec, never an error.
    pub async fn list_transfers(&self, address: &str) -> Vec<TransferEvent> {
        let url = format!(
            "{}/v1/accounts/{}/transactions/trc20?limit={}&contract_address={}",
            self.base_url, address, TRANSFER_FETCH_LIMIT, USDT_CONTRACT
        );

        let json = match self.fetcher.fetch_json(&url).await {
            Some(json) => json,
            None => return Vec::new(),
        };

        let mut transfers = Vec::new();

        // Response: {"data":[{"transaction_id":"...","block_timestamp":ms,
        //                     "value":"123","from":"T...","to":"T..."},...]}
        if let Some(data) = json["data"].as_array() {
            for tx in data {
                let event_id = match tx["transaction_id"].as_str() {
                    Some(id) => id.to_string(),
                    None => continue,
                };
                let timestamp_ms = tx["block_timestamp"].as_i64().unwrap_or(0);
                let amount = tx["value"]
                    .as_str()
                    .and_then(UsdtAmount::from_raw_str)
                    .unwrap_or(UsdtAmount::ZERO);
                let from_address = tx["from"].as_str().unwrap_or_default().to_string();
                let to_address = tx["to"].as_str().unwrap_or_default().to_string();

                transfers.push(TransferEvent {
                    event_id,
                    timestamp_ms,
                    amount,
                    from_address,
                    to_address,
                });
            }
        }

        debug!(
            address = address,
            count = transfers.len(),
            "Fetched TRC20 transfers"
        );
        transfers
    }

    /// Fetch the current USDT balance for `address`. A missing account, a
    /// missing token entry, or an unreachable API all yield zero.
    pub async fn get_balance(&self, address: &str) -> UsdtAmount {
        let url = format!("{}/v1/accounts/{}", self.base_url, address);

        let json = match self.fetcher.fetch_json(&url).await {
            Some(json) => json,
            None => return UsdtAmount::ZERO,
        };

        // Response: {"data":[{"trc20":[{"<contract>":"<raw balance>"},...]}]}
        let account = match json["data"].as_array().and_then(|d| d.first()) {
            Some(account) => account,
            None => return UsdtAmount::ZERO,
        };

        if let Some(balances) = account["trc20"].as_array() {
            for entry in balances {
                if let Some(raw) = entry[USDT_CONTRACT].as_str() {
                    return UsdtAmount::from_raw_str(raw).unwrap_or(UsdtAmount::ZERO);
                }
            }
        }

        UsdtAmount::ZERO
    }
}

impl Default for TronGridClient {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fetcher::RetryPolicy;
    use pretty_assertions::assert_eq;
    use std::time::Duration;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn test_client(server: &MockServer) -> TronGridClient {
        let fetcher = RetryingFetcher::with_policy(RetryPolicy {
            attempts: 2,
            base_delay: Duration::from_millis(5),
        });
        TronGridClient::with_base_url(server.uri(), fetcher)
    }

    #[tokio::test]
    async fn test_list_transfers_parses_entries() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/v1/accounts/TWallet/transactions/trc20"))
            .and(query_param("limit", "20"))
            .and(query_param("contract_address", USDT_CONTRACT))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "data": [
                    {
                        "transaction_id": "tx2",
                        "block_timestamp": 1_700_000_060_000i64,
                        "value": "12346900",
                        "from": "TSender",
                        "to": "TWallet"
                    },
                    {
                        "transaction_id": "tx1",
                        "block_timestamp": 1_700_000_000_000i64,
                        "value": "5000000",
                        "from": "TWallet",
                        "to": "TReceiver"
                    }
                ]
            })))
            .mount(&server)
            .await;

        let transfers = test_client(&server).list_transfers("TWallet").await;
        assert_eq!(transfers.len(), 2);
        assert_eq!(transfers[0].event_id, "tx2");
        assert_eq!(transfers[0].amount, UsdtAmount::from_raw(12_346_900));
        assert_eq!(transfers[1].to_address, "TReceiver");
    }

    #[tokio::test]
    async fn test_list_transfers_skips_entries_without_id() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/v1/accounts/TWallet/transactions/trc20"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "data": [
                    { "block_timestamp": 1_700_000_000_000i64, "value": "1" },
                    {
                        "transaction_id": "tx1",
                        "block_timestamp": 1_700_000_000_000i64,
                        "value": "1000000",
                        "from": "TSender",
                        "to": "TWallet"
                    }
                ]
            })))
            .mount(&server)
            .await;

        let transfers = test_client(&server).list_transfers("TWallet").await;
        assert_eq!(transfers.len(), 1);
        assert_eq!(transfers[0].event_id, "tx1");
    }

    #[tokio::test]
    async fn test_list_transfers_empty_on_unreachable_api() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(502))
            .mount(&server)
            .await;

        let transfers = test_client(&server).list_transfers("TWallet").await;
        assert!(transfers.is_empty());
    }

    #[tokio::test]
    async fn test_get_balance_extracts_usdt_entry() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/v1/accounts/TWallet"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "data": [{
                    "trc20": [
                        { "TOtherContract": "999" },
                        { USDT_CONTRACT: "12346900" }
                    ]
                }]
            })))
            .mount(&server)
            .await;

        let balance = test_client(&server).get_balance("TWallet").await;
        assert_eq!(balance, UsdtAmount::from_raw(12_346_900));
        assert_eq!(balance.to_string(), "12.34");
    }

    #[tokio::test]
    async fn test_get_balance_zero_when_token_missing() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/v1/accounts/TWallet"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "data": [{ "trc20": [{ "TOtherContract": "999" }] }]
            })))
            .mount(&server)
            .await;

        let balance = test_client(&server).get_balance("TWallet").await;
        assert_eq!(balance, UsdtAmount::ZERO);
    }

    #[tokio::test]
    async fn test_get_balance_zero_when_account_missing() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/v1/accounts/TWallet"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "data": []
            })))
            .mount(&server)
            .await;

        let balance = test_client(&server).get_balance("TWallet").await;
        assert_eq!(balance, UsdtAmount::ZERO);
    }
}
