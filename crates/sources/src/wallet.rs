// In crates/sources/src/wallet.rs

use crate::types::{RpcRequest, RpcResponse, SignatureInfo, TransactionRecord};
use crate::{Error, Result, TradeSource, SYMBOLS};
use app_config::WalletSettings;
use async_trait::async_trait;
use chrono::{Duration, TimeZone, Utc};
use core_types::{Side, Symbol, Trade, TradeStatus};
use rust_decimal::prelude::*;
use serde::de::DeserializeOwned;
use serde_json::{json, Value};

const LAMPORTS_PER_SOL: f64 = 1e9;
const BASE58_ALPHABET: &str = "123456789ABCDEFGHJKLMNPQRSTUVWXYZabcdefghijkmnopqrstuvwxyz";

/// Reads a wallet's recent Solana transactions and maps them onto trades.
///
/// Raw transactions carry no perp semantics, so the mapping only keeps what
/// is real (timestamps, fees and the signer's SOL balance change) and derives
/// the remaining trade fields from those.
#[derive(Debug, Clone)]
pub struct WalletTradeSource {
    http_client: reqwest::Client,
    rpc_url: String,
    address: String,
    limit: usize,
}

impl WalletTradeSource {
    /// Constructs a source for `address` from the wallet settings.
    pub fn new(settings: &WalletSettings, address: &str) -> Result<Self> {
        validate_address(address)?;
        Ok(Self {
            http_client: reqwest::Client::new(),
            rpc_url: settings.rpc_url.clone(),
            address: address.to_string(),
            limit: settings.signature_limit,
        })
    }

    pub fn address(&self) -> &str {
        &self.address
    }

    /// Performs one JSON-RPC call and decodes its `result`.
    async fn call<T: DeserializeOwned>(&self, method: &str, params: Value) -> Result<T> {
        let request = RpcRequest {
            jsonrpc: "2.0",
            id: 1,
            method,
            params,
        };

        let text = self
            .http_client
            .post(&self.rpc_url)
            .json(&request)
            .send()
            .await?
            .error_for_status()?
            .text()
            .await?;

        let response: RpcResponse = serde_json::from_str(&text)?;
        if let Some(error) = response.error {
            return Err(Error::RpcError {
                code: error.code,
                msg: error.message,
            });
        }
        Ok(serde_json::from_value(response.result.unwrap_or(Value::Null))?)
    }

    /// Fetches the most recent signatures for the wallet.
    ///
    /// This corresponds to the `getSignaturesForAddress` RPC method.
    pub async fn get_signatures(&self) -> Result<Vec<SignatureInfo>> {
        self.call(
            "getSignaturesForAddress",
            json!([self.address, { "limit": self.limit }]),
        )
        .await
    }

    /// Fetches every transaction in one JSON-RPC batch, in signature order.
    ///
    /// An entry is `None` when the node no longer has that transaction.
    pub async fn get_transactions(
        &self,
        signatures: &[SignatureInfo],
    ) -> Result<Vec<Option<TransactionRecord>>> {
        let text = self
            .http_client
            .post(&self.rpc_url)
            .json(&transaction_batch(signatures))
            .send()
            .await?
            .error_for_status()?
            .text()
            .await?;

        let responses: Vec<RpcResponse> = serde_json::from_str(&text)?;
        order_batch(responses, signatures.len())
    }
}

/// One `getTransaction` request per signature; the request id is the
/// signature's position in the batch.
pub fn transaction_batch(signatures: &[SignatureInfo]) -> Vec<RpcRequest<'static>> {
    signatures
        .iter()
        .enumerate()
        .map(|(index, sig)| RpcRequest {
            jsonrpc: "2.0",
            id: index as u64,
            method: "getTransaction",
            params: json!([
                sig.signature,
                { "encoding": "jsonParsed", "maxSupportedTransactionVersion": 0 }
            ]),
        })
        .collect()
}

/// Puts batch responses back into request order.
///
/// Nodes may answer a batch in any order. Any error entry fails the batch.
pub fn order_batch(
    responses: Vec<RpcResponse>,
    len: usize,
) -> Result<Vec<Option<TransactionRecord>>> {
    let mut records: Vec<Option<TransactionRecord>> = vec![None; len];
    for response in responses {
        if let Some(error) = response.error {
            return Err(Error::RpcError {
                code: error.code,
                msg: error.message,
            });
        }
        let Some(slot) = response.id.and_then(|id| records.get_mut(id as usize)) else {
            tracing::warn!(id = ?response.id, "Ignoring batch response with unknown id");
            continue;
        };
        *slot = match response.result {
            Some(Value::Null) | None => None,
            Some(result) => Some(serde_json::from_value(result)?),
        };
    }
    Ok(records)
}

#[async_trait]
impl TradeSource for WalletTradeSource {
    fn name(&self) -> &'static str {
        "wallet"
    }

    async fn fetch_trades(&self) -> Result<Vec<Trade>> {
        let signatures = self.get_signatures().await?;
        if signatures.is_empty() {
            tracing::info!(address = %self.address, "Wallet has no transactions");
            return Ok(Vec::new());
        }

        let records = self.get_transactions(&signatures).await?;

        let trades: Vec<Trade> = signatures
            .iter()
            .zip(records)
            .enumerate()
            .filter_map(|(index, (sig, record))| {
                if sig.err.is_some() {
                    return None;
                }
                parse_transaction(&record?, &sig.signature, index)
            })
            .collect();

        tracing::info!(
            address = %self.address,
            signatures = signatures.len(),
            trades = trades.len(),
            "Fetched wallet trade history"
        );
        Ok(trades)
    }
}

/// Checks that `address` looks like a base58-encoded Solana public key.
pub fn validate_address(address: &str) -> Result<()> {
    let valid_length = (32..=44).contains(&address.len());
    let valid_chars = address.chars().all(|c| BASE58_ALPHABET.contains(c));
    if valid_length && valid_chars {
        Ok(())
    } else {
        Err(Error::InvalidAddress(address.to_string()))
    }
}

/// Maps a confirmed transaction onto a closed trade.
///
/// Returns `None` for failed transactions, transactions without metadata or
/// block time, and dust movements. `index` is the transaction's position in
/// the fetched batch and seeds the derived symbol, leverage and holding time.
pub fn parse_transaction(record: &TransactionRecord, signature: &str, index: usize) -> Option<Trade> {
    let meta = record.meta.as_ref()?;
    let block_time = record.block_time?;
    if meta.err.is_some() {
        return None;
    }

    let pre = *meta.pre_balances.first()? as f64;
    let post = *meta.post_balances.first()? as f64;
    let fee = meta.fee as f64 / LAMPORTS_PER_SOL;
    let sol_change = (post - pre) / LAMPORTS_PER_SOL;
    // The fee is part of the balance change but not of the traded amount.
    let traded = (sol_change + fee).abs();

    if traded < 0.001 && fee < 0.0001 {
        return None;
    }

    let is_long = sol_change > 0.0;
    let sol_price = 150.0 + (index as f64 * 0.5).sin() * 30.0;
    let size = (traded * sol_price).max(10.0);
    let offset = if is_long { 2.0 } else { -2.0 };
    let pnl = sol_change * sol_price;

    let entry_time = Utc.timestamp_opt(block_time, 0).single()?;
    let duration_ms = (5 + (index as i64 * 7) % 120) * 60 * 1000;

    let size = cents(size);
    let pnl = cents(pnl);
    let pnl_percentage = if size > Decimal::ZERO {
        (pnl / size * Decimal::ONE_HUNDRED).round_dp(2)
    } else {
        Decimal::ZERO
    };

    Some(Trade {
        id: signature.chars().take(16).collect(),
        symbol: Symbol::from(SYMBOLS[index % SYMBOLS.len()]),
        side: if is_long { Side::Long } else { Side::Short },
        status: TradeStatus::Closed,
        entry_price: cents(sol_price - offset),
        exit_price: Some(cents(sol_price + offset)),
        size,
        leverage: 1 + (index % 10) as u8,
        pnl,
        pnl_percentage,
        fees: cents(fee * sol_price),
        entry_time,
        exit_time: Some(entry_time + Duration::milliseconds(duration_ms)),
        duration_ms,
    })
}

fn cents(value: f64) -> Decimal {
    Decimal::from_f64(value).unwrap_or_default().round_dp(2)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::TransactionMeta;
    use core_types::validate_trades;
    use rust_decimal_macros::dec;

    const ADDRESS: &str = "9WzDXwBbmkg8ZTbNMqUxvQRAyrZzDsGYdLVL9zYtAWWM";

    fn record(pre: u64, post: u64, fee: u64) -> TransactionRecord {
        TransactionRecord {
            block_time: Some(1_700_000_000),
            meta: Some(TransactionMeta {
                err: None,
                fee,
                pre_balances: vec![pre, 1],
                post_balances: vec![post, 1],
            }),
        }
    }

    #[test]
    fn accepts_base58_addresses() {
        assert!(validate_address(ADDRESS).is_ok());
        assert!(matches!(validate_address("short"), Err(Error::InvalidAddress(_))));
        // '0', 'O', 'I' and 'l' are not in the alphabet
        assert!(validate_address("0WzDXwBbmkg8ZTbNMqUxvQRAyrZzDsGYdLVL9zYtAWWM").is_err());
    }

    #[test]
    fn incoming_sol_becomes_a_long() {
        // +2 SOL received, 5000 lamport fee paid by the signer
        let trade = parse_transaction(&record(1_000_000_000, 2_999_995_000, 5_000), "5abcdefghijkmnopqrstuvwxyz", 0).unwrap();

        assert_eq!(trade.id, "5abcdefghijkmnop");
        assert_eq!(trade.side, Side::Long);
        assert_eq!(trade.symbol.as_str(), "SOL-PERP");
        assert_eq!(trade.leverage, 1);
        // index 0 -> price 150
        assert_eq!(trade.size, dec!(300));
        // 1.999995 SOL * 150 rounds to whole cents
        assert_eq!(trade.pnl, dec!(300));
        assert_eq!(trade.entry_price, dec!(148));
        assert_eq!(trade.exit_price, Some(dec!(152)));
        assert_eq!(trade.duration_ms, 5 * 60 * 1000);
        assert!(validate_trades(&[trade]).is_ok());
    }

    #[test]
    fn outgoing_sol_becomes_a_short() {
        let trade = parse_transaction(&record(3_000_000_000, 1_999_995_000, 5_000), "sig-short-000000000", 3).unwrap();
        assert_eq!(trade.side, Side::Short);
        assert_eq!(trade.symbol.as_str(), "WIF-PERP");
        assert_eq!(trade.leverage, 4);
        assert!(trade.pnl < Decimal::ZERO);
        assert_eq!(trade.duration_ms, (5 + 21) * 60 * 1000);
    }

    #[test]
    fn dust_and_failures_are_skipped() {
        assert!(parse_transaction(&record(1_000_000, 1_000_100, 10), "dust", 0).is_none());

        let mut failed = record(1_000_000_000, 2_000_000_000, 5_000);
        failed.meta.as_mut().unwrap().err = Some(json!({ "InstructionError": [0, "Custom"] }));
        assert!(parse_transaction(&failed, "failed", 0).is_none());

        let mut unconfirmed = record(1_000_000_000, 2_000_000_000, 5_000);
        unconfirmed.block_time = None;
        assert!(parse_transaction(&unconfirmed, "pending", 0).is_none());
    }

    #[test]
    fn small_positions_get_the_minimum_size() {
        // 0.01 SOL at 150 is 1.5 USD, floored to 10
        let trade = parse_transaction(&record(1_000_000_000, 1_010_000_000, 0), "tiny", 0).unwrap();
        assert_eq!(trade.size, dec!(10));
        assert_eq!(trade.pnl_percentage, dec!(15));
    }

    #[test]
    fn decodes_rpc_payloads() {
        let payload = json!({
            "blockTime": 1_700_000_000,
            "meta": { "err": null, "fee": 5000, "preBalances": [10, 0], "postBalances": [20, 0], "logMessages": [] },
            "transaction": { "signatures": ["abc"] }
        });
        let record: TransactionRecord = serde_json::from_value(payload).unwrap();
        assert_eq!(record.meta.unwrap().post_balances, vec![20, 0]);

        let response: RpcResponse =
            serde_json::from_value(json!({ "jsonrpc": "2.0", "id": 1, "error": { "code": -32602, "message": "bad" } })).unwrap();
        assert_eq!(response.error.unwrap().code, -32602);
    }

    fn signatures(names: &[&str]) -> Vec<SignatureInfo> {
        names
            .iter()
            .map(|name| SignatureInfo {
                signature: name.to_string(),
                err: None,
                block_time: None,
            })
            .collect()
    }

    #[test]
    fn transactions_go_out_as_one_batch() {
        let batch = transaction_batch(&signatures(&["sig-a", "sig-b", "sig-c"]));
        let body = serde_json::to_value(&batch).unwrap();

        let requests = body.as_array().unwrap();
        assert_eq!(requests.len(), 3);
        assert_eq!(requests[2]["id"], 2);
        assert_eq!(requests[2]["method"], "getTransaction");
        assert_eq!(requests[2]["params"][0], "sig-c");
        assert_eq!(requests[2]["params"][1]["encoding"], "jsonParsed");
    }

    #[test]
    fn batch_answers_are_put_back_in_request_order() {
        let tx = |fee: u64| {
            json!({ "blockTime": 1_700_000_000, "meta": { "err": null, "fee": fee, "preBalances": [1], "postBalances": [2] } })
        };
        let responses: Vec<RpcResponse> = serde_json::from_value(json!([
            { "jsonrpc": "2.0", "id": 2, "result": tx(30) },
            { "jsonrpc": "2.0", "id": 0, "result": tx(10) },
            { "jsonrpc": "2.0", "id": 1, "result": null },
            { "jsonrpc": "2.0", "id": 9, "result": tx(90) },
        ]))
        .unwrap();

        let records = order_batch(responses, 3).unwrap();
        let fees: Vec<Option<u64>> = records
            .iter()
            .map(|r| r.as_ref().and_then(|r| r.meta.as_ref()).map(|m| m.fee))
            .collect();
        assert_eq!(fees, vec![Some(10), None, Some(30)]);
    }

    #[test]
    fn an_error_entry_fails_the_batch() {
        let responses: Vec<RpcResponse> = serde_json::from_value(json!([
            { "jsonrpc": "2.0", "id": 0, "result": null },
            { "jsonrpc": "2.0", "id": 1, "error": { "code": 429, "message": "Too many requests" } },
        ]))
        .unwrap();

        let err = order_batch(responses, 2).unwrap_err();
        assert!(matches!(err, Error::RpcError { code: 429, .. }));
    }

    #[test]
    fn constructor_rejects_bad_addresses() {
        let settings = WalletSettings {
            rpc_url: "http://localhost:8899".to_string(),
            signature_limit: 10,
        };
        assert!(WalletTradeSource::new(&settings, "not-an-address").is_err());
        assert_eq!(WalletTradeSource::new(&settings, ADDRESS).unwrap().address(), ADDRESS);
    }
}
