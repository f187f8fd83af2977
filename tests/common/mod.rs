//! Shared utilities for integration testing.

use std::net::SocketAddr;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};

use secret_dex_client::chain::ChainDescriptor;
use secret_dex_client::client::types::{PubKey, SignResponse, StdSignDoc, StdSignature};
use secret_dex_client::wallet::{
    AccountData, EnigmaUtils, EnigmaUtilsFactory, OfflineSigner, OfflineSignerFactory,
    WalletEnvironment, WalletError, WalletHandle, WalletResult, NONCE_LEN,
};

/// Nonce the stub enigma utils prefix every message with.
#[allow(dead_code)]
pub const STUB_NONCE: [u8; NONCE_LEN] = [9u8; NONCE_LEN];

/// A request captured by the mock LCD.
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub method: String,
    pub path: String,
    pub body: String,
}

/// Handle to a running mock LCD.
pub struct MockLcd {
    pub addr: SocketAddr,
    pub requests: Arc<Mutex<Vec<RecordedRequest>>>,
}

#[allow(dead_code)]
impl MockLcd {
    pub fn url(&self) -> String {
        format!("http://{}", self.addr)
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub fn paths(&self) -> Vec<String> {
        self.requests().into_iter().map(|r| r.path).collect()
    }
}

/// Start a programmable mock LCD on an ephemeral port.
pub async fn start_mock_lcd<F>(handler: F) -> MockLcd
where
    F: Fn(&RecordedRequest) -> (u16, String) + Send + Sync + 'static,
{
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let handler = Arc::new(handler);
    let requests = Arc::new(Mutex::new(Vec::new()));
    let recorded = requests.clone();

    tokio::spawn(async move {
        loop {
            match listener.accept().await {
                Ok((mut socket, _)) => {
                    let handler = handler.clone();
                    let recorded = recorded.clone();
                    tokio::spawn(async move {
                        let Some(request) = read_request(&mut socket).await else {
                            return;
                        };
                        let (status, body) = handler(&request);
                        recorded.lock().unwrap().push(request);

                        let status_text = match status {
                            200 => "200 OK",
                            404 => "404 Not Found",
                            500 => "500 Internal Server Error",
                            502 => "502 Bad Gateway",
                            _ => "200 OK",
                        };
                        let response = format!(
                            "HTTP/1.1 {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                            status_text,
                            body.len(),
                            body
                        );
                        let _ = socket.write_all(response.as_bytes()).await;
                        let _ = socket.shutdown().await;
                    });
                }
                Err(_) => break,
            }
        }
    });

    MockLcd { addr, requests }
}

async fn read_request(socket: &mut TcpStream) -> Option<RecordedRequest> {
    let mut buf = Vec::new();
    let mut chunk = [0u8; 4096];

    let header_end = loop {
        let n = socket.read(&mut chunk).await.ok()?;
        if n == 0 {
            return None;
        }
        buf.extend_from_slice(&chunk[..n]);
        if let Some(pos) = buf.windows(4).position(|w| w == b"\r\n\r\n") {
            break pos + 4;
        }
    };

    let head = String::from_utf8_lossy(&buf[..header_end]).to_string();
    let mut lines = head.lines();
    let mut request_line = lines.next()?.split_whitespace();
    let method = request_line.next()?.to_string();
    let path = request_line.next()?.to_string();
    let content_length = lines
        .filter_map(|l| l.split_once(':'))
        .find(|(k, _)| k.trim().eq_ignore_ascii_case("content-length"))
        .and_then(|(_, v)| v.trim().parse::<usize>().ok())
        .unwrap_or(0);

    while buf.len() < header_end + content_length {
        let n = socket.read(&mut chunk).await.ok()?;
        if n == 0 {
            break;
        }
        buf.extend_from_slice(&chunk[..n]);
    }

    Some(RecordedRequest {
        method,
        path,
        body: String::from_utf8_lossy(&buf[header_end..]).to_string(),
    })
}

/// `/auth/accounts/{address}` body for an existing account.
#[allow(dead_code)]
pub fn account_json(address: &str, account_number: u64, sequence: u64) -> String {
    serde_json::json!({
        "height": "100",
        "result": {
            "type": "cosmos-sdk/Account",
            "value": {
                "address": address,
                "coins": [{"denom": "uscrt", "amount": "1000000"}],
                "public_key": {"type": "tendermint/PubKeySecp256k1", "value": "AtQaCqFnshaZQp6rIkvAPyzThvCvXSDO+9AzbxVErqJP"},
                "account_number": account_number.to_string(),
                "sequence": sequence.to_string(),
            }
        }
    })
    .to_string()
}

/// Body the LCD returns for an address it has never seen.
#[allow(dead_code)]
pub fn unknown_account_json() -> String {
    serde_json::json!({
        "height": "100",
        "result": {
            "type": "cosmos-sdk/Account",
            "value": {"address": "", "coins": [], "public_key": "", "account_number": "0", "sequence": "0"}
        }
    })
    .to_string()
}

/// Stub smart-query answer: the stub decrypt is the identity, so the LCD
/// returns base64(base64(json)).
#[allow(dead_code)]
pub fn smart_result_json(answer: &serde_json::Value) -> String {
    let inner = BASE64.encode(answer.to_string());
    serde_json::json!({"height": "100", "result": {"smart": BASE64.encode(inner)}}).to_string()
}

/// Decode a stub-encrypted message (nonce prefix + plaintext JSON).
#[allow(dead_code)]
pub fn decode_stub_message(bytes: &[u8]) -> serde_json::Value {
    assert_eq!(&bytes[..NONCE_LEN], &STUB_NONCE);
    serde_json::from_slice(&bytes[NONCE_LEN..]).unwrap()
}

/// Scriptable wallet behavior and call log.
#[derive(Default)]
pub struct StubState {
    pub accounts: Vec<AccountData>,
    pub reject_suggest: bool,
    pub reject_enable: bool,
    pub fail_accounts: bool,
    pub calls: Mutex<Vec<String>>,
    pub suggested: Mutex<Vec<ChainDescriptor>>,
    pub signed: Mutex<Vec<StdSignDoc>>,
    pub encrypted_for: Mutex<Vec<String>>,
}

impl StubState {
    fn log(&self, call: &str) {
        self.calls.lock().unwrap().push(call.to_string());
    }
}

#[async_trait]
impl WalletHandle for StubState {
    async fn experimental_suggest_chain(&self, descriptor: &ChainDescriptor) -> WalletResult<()> {
        self.log("suggest_chain");
        self.suggested.lock().unwrap().push(*descriptor);
        if self.reject_suggest {
            return Err(WalletError::Rejected("chain suggestion declined".into()));
        }
        Ok(())
    }

    async fn enable(&self, chain_id: &str) -> WalletResult<()> {
        self.log(&format!("enable:{}", chain_id));
        if self.reject_enable {
            return Err(WalletError::Rejected("user declined access".into()));
        }
        Ok(())
    }
}

#[async_trait]
impl OfflineSigner for StubState {
    async fn get_accounts(&self) -> WalletResult<Vec<AccountData>> {
        self.log("get_accounts");
        if self.fail_accounts {
            return Err(WalletError::Provider("keyring locked".into()));
        }
        Ok(self.accounts.clone())
    }

    async fn sign(&self, signer_address: &str, doc: &StdSignDoc) -> WalletResult<SignResponse> {
        self.log(&format!("sign:{}", signer_address));
        self.signed.lock().unwrap().push(doc.clone());
        Ok(SignResponse {
            signed: doc.clone(),
            signature: StdSignature {
                pub_key: PubKey {
                    kind: "tendermint/PubKeySecp256k1".into(),
                    value: "AtQaCqFnshaZQp6rIkvAPyzThvCvXSDO+9AzbxVErqJP".into(),
                },
                signature: "c2lnbmF0dXJl".into(),
            },
        })
    }
}

#[async_trait]
impl EnigmaUtils for StubState {
    async fn encrypt(
        &self,
        contract_code_hash: &str,
        msg: &serde_json::Value,
    ) -> WalletResult<Vec<u8>> {
        self.encrypted_for.lock().unwrap().push(contract_code_hash.to_string());
        let mut out = STUB_NONCE.to_vec();
        out.extend_from_slice(msg.to_string().as_bytes());
        Ok(out)
    }

    async fn decrypt(&self, ciphertext: &[u8], nonce: &[u8]) -> WalletResult<Vec<u8>> {
        assert_eq!(nonce, &STUB_NONCE);
        Ok(ciphertext.to_vec())
    }
}

struct StubFactory {
    state: Arc<StubState>,
}

impl OfflineSignerFactory for StubFactory {
    fn get_offline_signer(&self, chain_id: &str) -> Arc<dyn OfflineSigner> {
        self.state.log(&format!("get_offline_signer:{}", chain_id));
        self.state.clone()
    }
}

impl EnigmaUtilsFactory for StubFactory {
    fn get_enigma_utils(&self, chain_id: &str) -> Arc<dyn EnigmaUtils> {
        self.state.log(&format!("get_enigma_utils:{}", chain_id));
        self.state.clone()
    }
}

/// Wallet environment whose capabilities can be injected one at a time.
pub struct StubEnvironment {
    pub state: Arc<StubState>,
    wallet: AtomicBool,
    signers: AtomicBool,
    enigma: AtomicBool,
}

#[allow(dead_code)]
impl StubEnvironment {
    /// All three capabilities present.
    pub fn injected(state: StubState) -> Self {
        let env = Self::empty(state);
        env.inject_wallet();
        env.inject_signers();
        env.inject_enigma();
        env
    }

    /// Nothing injected yet.
    pub fn empty(state: StubState) -> Self {
        Self {
            state: Arc::new(state),
            wallet: AtomicBool::new(false),
            signers: AtomicBool::new(false),
            enigma: AtomicBool::new(false),
        }
    }

    pub fn inject_wallet(&self) {
        self.wallet.store(true, Ordering::SeqCst);
    }

    pub fn inject_signers(&self) {
        self.signers.store(true, Ordering::SeqCst);
    }

    pub fn inject_enigma(&self) {
        self.enigma.store(true, Ordering::SeqCst);
    }

    pub fn calls(&self) -> Vec<String> {
        self.state.calls.lock().unwrap().clone()
    }
}

impl WalletEnvironment for StubEnvironment {
    fn wallet(&self) -> Option<Arc<dyn WalletHandle>> {
        if self.wallet.load(Ordering::SeqCst) {
            Some(self.state.clone())
        } else {
            None
        }
    }

    fn offline_signer_factory(&self) -> Option<Arc<dyn OfflineSignerFactory>> {
        if self.signers.load(Ordering::SeqCst) {
            Some(Arc::new(StubFactory {
                state: self.state.clone(),
            }))
        } else {
            None
        }
    }

    fn enigma_utils_factory(&self) -> Option<Arc<dyn EnigmaUtilsFactory>> {
        if self.enigma.load(Ordering::SeqCst) {
            Some(Arc::new(StubFactory {
                state: self.state.clone(),
            }))
        } else {
            None
        }
    }
}

/// Stub account with the given address.
#[allow(dead_code)]
pub fn account(address: &str) -> AccountData {
    AccountData {
        address: address.to_string(),
        algo: "secp256k1".to_string(),
        pubkey: "AtQaCqFnshaZQp6rIkvAPyzThvCvXSDO+9AzbxVErqJP".to_string(),
    }
}
