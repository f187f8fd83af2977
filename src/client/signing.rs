//! Authenticated contract client over the chain's REST (LCD) API.
//!
//! # Responsibilities
//! - Query account records and contract code hashes
//! - Encrypt smart queries and decrypt their results
//! - Build, sign, and broadcast contract-init and contract-execute transactions
//! - Bound every request with a timeout

use std::sync::Arc;
use std::time::Duration;

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use serde_json::{json, Value};
use tokio::time::timeout;
use url::Url;

use crate::client::fees::FeeConfig;
use crate::client::types::{
    AccountRecord, BroadcastResponse, ClientError, ClientResult, Coin, ExecuteResult,
    InstantiateResult, LcdAccountEnvelope, LcdResponse, Msg, NodeInfoResponse,
    SmartQueryResult, StdFee, StdSignDoc,
};
use crate::observability::metrics;
use crate::wallet::{EnigmaUtils, OfflineSigner, NONCE_LEN};

/// Default per-request timeout.
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Authenticated handle for submitting and querying contract transactions.
#[derive(Clone)]
pub struct SigningClient {
    http: reqwest::Client,
    rest_url: Url,
    sender_address: String,
    signer: Arc<dyn OfflineSigner>,
    enigma_utils: Arc<dyn EnigmaUtils>,
    fees: FeeConfig,
    request_timeout: Duration,
}

impl SigningClient {
    /// Create a new signing client.
    ///
    /// # Arguments
    /// * `rest_url` - LCD endpoint
    /// * `sender_address` - Address that signs every transaction
    /// * `signer` - Offline signer owning `sender_address`
    /// * `enigma_utils` - Contract message encryption
    /// * `fees` - Fee ceilings for init and exec
    pub fn new(
        rest_url: &str,
        sender_address: impl Into<String>,
        signer: Arc<dyn OfflineSigner>,
        enigma_utils: Arc<dyn EnigmaUtils>,
        fees: FeeConfig,
    ) -> ClientResult<Self> {
        let rest_url = Url::parse(rest_url).map_err(|e| ClientError::InvalidEndpoint {
            url: rest_url.to_string(),
            reason: e.to_string(),
        })?;
        if rest_url.cannot_be_a_base() {
            return Err(ClientError::InvalidEndpoint {
                url: rest_url.to_string(),
                reason: "not a base URL".to_string(),
            });
        }

        let http = reqwest::Client::builder().build()?;
        let sender_address = sender_address.into();

        tracing::info!(
            rest_url = %rest_url,
            sender = %sender_address,
            "Signing client initialized"
        );

        Ok(Self {
            http,
            rest_url,
            sender_address,
            signer,
            enigma_utils,
            fees,
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
        })
    }

    /// Override the per-request timeout.
    pub fn with_request_timeout(mut self, request_timeout: Duration) -> Self {
        self.request_timeout = request_timeout;
        self
    }

    pub fn sender_address(&self) -> &str {
        &self.sender_address
    }

    pub fn fees(&self) -> &FeeConfig {
        &self.fees
    }

    pub fn rest_url(&self) -> &Url {
        &self.rest_url
    }

    /// Fetch the on-chain record for `address`.
    ///
    /// An address the chain has never seen yields an unfunded record.
    pub async fn get_account(&self, address: &str) -> ClientResult<AccountRecord> {
        let path = format!("auth/accounts/{}", address);
        let envelope: LcdResponse<LcdAccountEnvelope> = self.get_json("account", &path).await?;
        let account = envelope.result.value;

        if account.address.is_empty() {
            tracing::warn!(address = %address, "Account not found on chain");
            return Ok(AccountRecord::unfunded(address));
        }

        Ok(AccountRecord {
            address: account.address,
            balance: account.coins,
            public_key: account.public_key,
            account_number: account.account_number,
            sequence: account.sequence,
        })
    }

    /// Network name reported by the node.
    pub async fn get_chain_id(&self) -> ClientResult<String> {
        let info: NodeInfoResponse = self.get_json("node_info", "node_info").await?;
        Ok(info.node_info.network)
    }

    pub async fn get_code_hash_by_contract_address(
        &self,
        contract_address: &str,
    ) -> ClientResult<String> {
        let path = format!("wasm/contract/{}/code-hash", contract_address);
        let res: LcdResponse<String> = self.get_json("code_hash", &path).await?;
        Ok(res.result)
    }

    pub async fn get_code_hash_by_code_id(&self, code_id: u64) -> ClientResult<String> {
        let path = format!("wasm/code/{}/hash", code_id);
        let res: LcdResponse<String> = self.get_json("code_hash", &path).await?;
        Ok(res.result)
    }

    /// Run an encrypted smart query against a contract.
    pub async fn query_contract_smart(
        &self,
        contract_address: &str,
        query: &Value,
    ) -> ClientResult<Value> {
        let code_hash = self.get_code_hash_by_contract_address(contract_address).await?;
        let encrypted = self.enigma_utils.encrypt(&code_hash, query).await?;
        let nonce = nonce_of(&encrypted)?;

        let path = format!(
            "wasm/contract/{}/query/{}?encoding=hex",
            contract_address,
            hex::encode(&encrypted)
        );
        let res: LcdResponse<SmartQueryResult> = self.get_json("query", &path).await?;

        let ciphertext = BASE64
            .decode(res.result.smart.as_bytes())
            .map_err(|e| ClientError::Encoding(format!("smart result: {}", e)))?;
        let decrypted = self.enigma_utils.decrypt(&ciphertext, nonce).await?;

        // The decrypted payload is itself base64-encoded JSON.
        let inner = BASE64
            .decode(&decrypted)
            .map_err(|e| ClientError::Encoding(format!("decrypted result: {}", e)))?;
        Ok(serde_json::from_slice(&inner)?)
    }

    /// Execute a contract handle message, charged against the exec ceiling.
    pub async fn execute(
        &self,
        contract_address: &str,
        handle_msg: &Value,
        memo: &str,
        transfer_amount: Vec<Coin>,
    ) -> ClientResult<ExecuteResult> {
        let code_hash = self.get_code_hash_by_contract_address(contract_address).await?;
        let encrypted = self.enigma_utils.encrypt(&code_hash, handle_msg).await?;

        let msg = Msg {
            kind: "wasm/MsgExecuteContract".to_string(),
            value: json!({
                "sender": self.sender_address,
                "contract": contract_address,
                "msg": BASE64.encode(&encrypted),
                "callback_code_hash": "",
                "sent_funds": transfer_amount,
                "callback_sig": null,
            }),
        };

        let res = self.sign_and_broadcast(vec![msg], self.fees.exec.clone(), memo).await?;

        tracing::info!(
            contract = %contract_address,
            txhash = %res.txhash,
            "Contract executed"
        );

        Ok(ExecuteResult {
            transaction_hash: res.txhash,
            height: res.height,
            logs: res.logs,
            data: res.data,
        })
    }

    /// Instantiate stored code, charged against the init ceiling.
    pub async fn instantiate(
        &self,
        code_id: u64,
        init_msg: &Value,
        label: &str,
        memo: &str,
        transfer_amount: Vec<Coin>,
    ) -> ClientResult<InstantiateResult> {
        let code_hash = self.get_code_hash_by_code_id(code_id).await?;
        let encrypted = self.enigma_utils.encrypt(&code_hash, init_msg).await?;

        let msg = Msg {
            kind: "wasm/MsgInstantiateContract".to_string(),
            value: json!({
                "sender": self.sender_address,
                "code_id": code_id.to_string(),
                "label": label,
                "init_msg": BASE64.encode(&encrypted),
                "init_funds": transfer_amount,
                "callback_code_hash": "",
                "callback_sig": null,
            }),
        };

        let res = self.sign_and_broadcast(vec![msg], self.fees.init.clone(), memo).await?;

        let contract_address = res
            .logs
            .iter()
            .find_map(|log| log.attribute("message", "contract_address"))
            .map(str::to_string)
            .ok_or_else(|| ClientError::MissingContractAddress(res.txhash.clone()))?;

        tracing::info!(
            code_id = code_id,
            contract = %contract_address,
            txhash = %res.txhash,
            "Contract instantiated"
        );

        Ok(InstantiateResult {
            contract_address,
            transaction_hash: res.txhash,
            logs: res.logs,
        })
    }

    async fn sign_and_broadcast(
        &self,
        msgs: Vec<Msg>,
        fee: StdFee,
        memo: &str,
    ) -> ClientResult<BroadcastResponse> {
        let account = self.get_account(&self.sender_address).await?;
        let chain_id = self.get_chain_id().await?;

        let doc = StdSignDoc {
            chain_id,
            account_number: account.account_number.to_string(),
            sequence: account.sequence.to_string(),
            fee,
            msgs,
            memo: memo.to_string(),
        };

        let signed = self.signer.sign(&self.sender_address, &doc).await?;

        let body = json!({
            "tx": {
                "msg": signed.signed.msgs,
                "fee": signed.signed.fee,
                "signatures": [signed.signature],
                "memo": signed.signed.memo,
            },
            "mode": "block",
        });

        let res: BroadcastResponse = self.post_json("txs", "txs", &body).await?;

        match res.code {
            Some(code) if code != 0 => Err(ClientError::TxFailed {
                txhash: res.txhash,
                code,
                raw_log: res.raw_log,
            }),
            _ => Ok(res),
        }
    }

    fn endpoint(&self, path: &str) -> ClientResult<Url> {
        let base = self.rest_url.as_str().trim_end_matches('/');
        let full = format!("{}/{}", base, path);
        Url::parse(&full).map_err(|e| ClientError::InvalidEndpoint {
            url: full,
            reason: e.to_string(),
        })
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        label: &'static str,
        path: &str,
    ) -> ClientResult<T> {
        let url = self.endpoint(path)?;
        tracing::debug!(url = %url, "LCD GET");
        self.send(label, self.http.get(url)).await
    }

    async fn post_json<T: DeserializeOwned>(
        &self,
        label: &'static str,
        path: &str,
        body: &Value,
    ) -> ClientResult<T> {
        let url = self.endpoint(path)?;
        tracing::debug!(url = %url, "LCD POST");
        self.send(label, self.http.post(url).json(body)).await
    }

    async fn send<T: DeserializeOwned>(
        &self,
        label: &'static str,
        request: reqwest::RequestBuilder,
    ) -> ClientResult<T> {
        let fut = async {
            let response = request.send().await?;
            let status = response.status();
            let text = response.text().await?;
            Ok::<_, ClientError>((status, text))
        };

        let (status, text) = match timeout(self.request_timeout, fut).await {
            Ok(Ok(result)) => result,
            Ok(Err(e)) => {
                metrics::record_client_request(label, "error");
                return Err(e);
            }
            Err(_) => {
                metrics::record_client_request(label, "timeout");
                return Err(ClientError::Timeout(self.request_timeout.as_secs()));
            }
        };

        metrics::record_client_request(label, status.as_str());

        if status != StatusCode::OK {
            tracing::warn!(endpoint = label, status = %status, "LCD returned non-success status");
            return Err(ClientError::Status {
                status: status.as_u16(),
                body: text,
            });
        }

        Ok(serde_json::from_str(&text)?)
    }
}

fn nonce_of(encrypted: &[u8]) -> ClientResult<&[u8]> {
    encrypted
        .get(..NONCE_LEN)
        .ok_or_else(|| {
            ClientError::Encoding(format!(
                "encrypted message shorter than {} byte nonce",
                NONCE_LEN
            ))
        })
}

impl std::fmt::Debug for SigningClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SigningClient")
            .field("rest_url", &self.rest_url.as_str())
            .field("sender_address", &self.sender_address)
            .field("fees", &self.fees)
            .field("timeout_secs", &self.request_timeout.as_secs())
            .finish()
    }
}
