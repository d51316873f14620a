// In crates/sources/src/types.rs

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A JSON-RPC 2.0 request envelope.
#[derive(Debug, Serialize)]
pub struct RpcRequest<'a> {
    pub jsonrpc: &'static str,
    pub id: u64,
    pub method: &'a str,
    pub params: Value,
}

/// A JSON-RPC 2.0 response envelope; exactly one of the fields is set.
#[derive(Debug, Deserialize)]
pub struct RpcResponse {
    /// Echo of the request id; needed to match batch entries.
    #[serde(default)]
    pub id: Option<u64>,
    #[serde(default)]
    pub result: Option<Value>,
    #[serde(default)]
    pub error: Option<RpcErrorBody>,
}

#[derive(Debug, Deserialize)]
pub struct RpcErrorBody {
    pub code: i64,
    pub message: String,
}

/// One entry of `getSignaturesForAddress`.
#[derive(Debug, Deserialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct SignatureInfo {
    /// The base58 transaction signature.
    pub signature: String,
    /// Set when the transaction failed on chain.
    #[serde(default)]
    pub err: Option<Value>,
    /// Unix time in seconds, if known.
    #[serde(default)]
    pub block_time: Option<i64>,
}

/// The subset of a `getTransaction` result the trade mapping needs.
#[derive(Debug, Deserialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct TransactionRecord {
    #[serde(default)]
    pub block_time: Option<i64>,
    #[serde(default)]
    pub meta: Option<TransactionMeta>,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct TransactionMeta {
    #[serde(default)]
    pub err: Option<Value>,
    /// Fee in lamports.
    pub fee: u64,
    /// Lamport balances before the transaction, signer first.
    pub pre_balances: Vec<u64>,
    /// Lamport balances after the transaction, signer first.
    pub post_balances: Vec<u64>,
}
