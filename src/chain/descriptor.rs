//! Chain descriptor suggested to the wallet provider.

use serde::Serialize;

/// BIP-44 derivation parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Bip44 {
    pub coin_type: u32,
}

/// Currency metadata (display denom, minimal denom, decimals).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Currency {
    pub coin_denom: &'static str,
    pub coin_minimal_denom: &'static str,
    pub coin_decimals: u8,
}

/// Bech32 human-readable prefixes for every address kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Bech32Config {
    pub bech32_prefix_acc_addr: &'static str,
    pub bech32_prefix_acc_pub: &'static str,
    pub bech32_prefix_val_addr: &'static str,
    pub bech32_prefix_val_pub: &'static str,
    pub bech32_prefix_cons_addr: &'static str,
    pub bech32_prefix_cons_pub: &'static str,
}

/// Gas price tiers offered to the user when signing.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct GasPriceStep {
    pub low: f64,
    pub average: f64,
    pub high: f64,
}

/// Network identity, endpoints, and formatting rules for a chain.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChainDescriptor {
    pub chain_id: &'static str,
    pub chain_name: &'static str,
    pub rpc: &'static str,
    pub rest: &'static str,
    pub bip44: Bip44,
    pub coin_type: u32,
    pub stake_currency: Currency,
    pub bech32_config: Bech32Config,
    pub currencies: &'static [Currency],
    pub fee_currencies: &'static [Currency],
    pub gas_price_step: GasPriceStep,
    pub features: &'static [&'static str],
}

/// Native staking and fee currency.
pub const SCRT: Currency = Currency {
    coin_denom: "SCRT",
    coin_minimal_denom: "uscrt",
    coin_decimals: 6,
};

/// The Secret Network public testnet.
pub const HOLODECK_2: ChainDescriptor = ChainDescriptor {
    chain_id: "holodeck-2",
    chain_name: "Local Secret Chain",
    rpc: "http://bootstrap.secrettestnet.io:26657",
    rest: "https://bootstrap.secrettestnet.io",
    bip44: Bip44 { coin_type: 529 },
    coin_type: 529,
    stake_currency: SCRT,
    bech32_config: Bech32Config {
        bech32_prefix_acc_addr: "secret",
        bech32_prefix_acc_pub: "secretpub",
        bech32_prefix_val_addr: "secretvaloper",
        bech32_prefix_val_pub: "secretvaloperpub",
        bech32_prefix_cons_addr: "secretvalcons",
        bech32_prefix_cons_pub: "secretvalconspub",
    },
    currencies: &[SCRT],
    fee_currencies: &[SCRT],
    gas_price_step: GasPriceStep {
        low: 0.3,
        average: 0.45,
        high: 0.6,
    },
    features: &["secretwasm"],
};

impl ChainDescriptor {
    /// Minimal denomination used for fees.
    pub fn fee_denom(&self) -> &'static str {
        self.fee_currencies
            .first()
            .map(|c| c.coin_minimal_denom)
            .unwrap_or(self.stake_currency.coin_minimal_denom)
    }

    /// Whether `address` carries this chain's account prefix.
    pub fn is_account_address(&self, address: &str) -> bool {
        let prefix = self.bech32_config.bech32_prefix_acc_addr;
        address
            .strip_prefix(prefix)
            .is_some_and(|rest| rest.starts_with('1') && rest.len() > 1)
    }
}
