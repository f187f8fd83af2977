//! LCD wire types and error definitions.

use serde::{Deserialize, Deserializer, Serialize};
use thiserror::Error;

use crate::wallet::WalletError;

/// A token amount in a minimal denomination.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Coin {
    pub denom: String,
    /// Kept as a string; amounts may exceed `u64`.
    pub amount: String,
}

impl Coin {
    pub fn new(amount: impl Into<String>, denom: impl Into<String>) -> Self {
        Self {
            denom: denom.into(),
            amount: amount.into(),
        }
    }
}

/// Fee ceiling attached to a transaction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StdFee {
    pub amount: Vec<Coin>,
    pub gas: String,
}

/// Public key as reported by the chain or a signer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PubKey {
    #[serde(rename = "type")]
    pub kind: String,
    pub value: String,
}

/// A single amino-JSON message.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Msg {
    #[serde(rename = "type")]
    pub kind: String,
    pub value: serde_json::Value,
}

/// The document an offline signer signs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StdSignDoc {
    pub chain_id: String,
    pub account_number: String,
    pub sequence: String,
    pub fee: StdFee,
    pub msgs: Vec<Msg>,
    pub memo: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StdSignature {
    pub pub_key: PubKey,
    pub signature: String,
}

/// What an offline signer hands back: the (possibly adjusted) document and
/// its signature.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SignResponse {
    pub signed: StdSignDoc,
    pub signature: StdSignature,
}

/// On-chain account record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountRecord {
    pub address: String,
    #[serde(default)]
    pub balance: Vec<Coin>,
    #[serde(default)]
    pub public_key: Option<PubKey>,
    pub account_number: u64,
    pub sequence: u64,
}

impl AccountRecord {
    /// Record for an address the chain has not seen yet.
    pub fn unfunded(address: impl Into<String>) -> Self {
        Self {
            address: address.into(),
            balance: Vec::new(),
            public_key: None,
            account_number: 0,
            sequence: 0,
        }
    }
}

/// Raw `/auth/accounts/{address}` value.
#[derive(Debug, Deserialize)]
pub(crate) struct LcdAccount {
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub coins: Vec<Coin>,
    #[serde(default, deserialize_with = "de_pub_key")]
    pub public_key: Option<PubKey>,
    #[serde(default, deserialize_with = "de_u64")]
    pub account_number: u64,
    #[serde(default, deserialize_with = "de_u64")]
    pub sequence: u64,
}

#[derive(Debug, Deserialize)]
pub(crate) struct LcdAccountEnvelope {
    pub value: LcdAccount,
}

/// Standard LCD response wrapper.
#[derive(Debug, Deserialize)]
pub(crate) struct LcdResponse<T> {
    pub result: T,
}

#[derive(Debug, Deserialize)]
pub(crate) struct SmartQueryResult {
    pub smart: String,
}

#[derive(Debug, Deserialize)]
pub(crate) struct NodeInfoResponse {
    pub node_info: NodeInfo,
}

#[derive(Debug, Deserialize)]
pub(crate) struct NodeInfo {
    pub network: String,
}

/// One attribute of a log event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attribute {
    pub key: String,
    #[serde(default)]
    pub value: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Event {
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub attributes: Vec<Attribute>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TxLog {
    #[serde(default)]
    pub msg_index: u32,
    #[serde(default)]
    pub log: String,
    #[serde(default)]
    pub events: Vec<Event>,
}

impl TxLog {
    /// First value of `key` inside events of type `kind`.
    pub fn attribute(&self, kind: &str, key: &str) -> Option<&str> {
        self.events
            .iter()
            .filter(|e| e.kind == kind)
            .flat_map(|e| e.attributes.iter())
            .find(|a| a.key == key)
            .map(|a| a.value.as_str())
    }
}

/// Raw `POST /txs` response.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct BroadcastResponse {
    pub txhash: String,
    #[serde(default, deserialize_with = "de_u64")]
    pub height: u64,
    #[serde(default)]
    pub code: Option<u32>,
    #[serde(default)]
    pub raw_log: String,
    #[serde(default)]
    pub logs: Vec<TxLog>,
    #[serde(default)]
    pub data: Option<String>,
}

/// Outcome of a contract-execute transaction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExecuteResult {
    pub transaction_hash: String,
    pub height: u64,
    pub logs: Vec<TxLog>,
    pub data: Option<String>,
}

/// Outcome of a contract-init transaction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InstantiateResult {
    pub contract_address: String,
    pub transaction_hash: String,
    pub logs: Vec<TxLog>,
}

/// Errors that can occur while talking to the chain.
#[derive(Debug, Error)]
pub enum ClientError {
    /// REST endpoint is not a valid URL.
    #[error("Invalid REST endpoint '{url}': {reason}")]
    InvalidEndpoint { url: String, reason: String },

    /// Connection or transport failure.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Request did not settle in time.
    #[error("LCD request timed out after {0} seconds")]
    Timeout(u64),

    /// LCD answered with a non-success status.
    #[error("LCD returned status {status}: {body}")]
    Status { status: u16, body: String },

    /// Response body did not match the expected shape.
    #[error("Decode error: {0}")]
    Decode(#[from] serde_json::Error),

    /// Payload could not be base64/hex/utf-8 decoded.
    #[error("Encoding error: {0}")]
    Encoding(String),

    /// Transaction was included but failed.
    #[error("Transaction {txhash} failed with code {code}: {raw_log}")]
    TxFailed {
        txhash: String,
        code: u32,
        raw_log: String,
    },

    /// Instantiate succeeded without reporting a contract address.
    #[error("Contract address missing from transaction {0}")]
    MissingContractAddress(String),

    /// Signer or crypto utilities refused.
    #[error("Wallet error: {0}")]
    Wallet(#[from] WalletError),
}

/// Result type for client operations.
pub type ClientResult<T> = Result<T, ClientError>;

#[derive(Deserialize)]
#[serde(untagged)]
enum StringOrInt {
    Str(String),
    Int(u64),
}

/// LCD versions disagree on whether counters are strings or integers.
fn de_u64<'de, D>(deserializer: D) -> Result<u64, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<StringOrInt>::deserialize(deserializer)? {
        None => Ok(0),
        Some(StringOrInt::Int(n)) => Ok(n),
        Some(StringOrInt::Str(s)) if s.is_empty() => Ok(0),
        Some(StringOrInt::Str(s)) => s.parse().map_err(serde::de::Error::custom),
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum PubKeyRepr {
    Typed(PubKey),
    Bare(String),
}

/// Older LCDs return the bech32 string, newer ones the typed object.
fn de_pub_key<'de, D>(deserializer: D) -> Result<Option<PubKey>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<PubKeyRepr>::deserialize(deserializer)? {
        None => None,
        Some(PubKeyRepr::Bare(s)) if s.is_empty() => None,
        Some(PubKeyRepr::Bare(s)) => Some(PubKey {
            kind: "bech32".to_string(),
            value: s,
        }),
        Some(PubKeyRepr::Typed(k)) => Some(k),
    })
}
