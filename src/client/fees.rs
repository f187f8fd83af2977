//! Fee ceilings for contract transactions.

use serde::{Deserialize, Serialize};

use crate::chain::HOLODECK_2;
use crate::client::types::{Coin, StdFee};

/// Maximum fee, in minimal denomination units, for either transaction kind.
pub const BOOTSTRAP_FEE_AMOUNT: &str = "500000";

/// Maximum gas units for either transaction kind.
pub const BOOTSTRAP_GAS_LIMIT: &str = "500000";

/// Fee ceilings per transaction category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeeConfig {
    /// Applied to contract-init transactions.
    pub init: StdFee,
    /// Applied to contract-execute transactions.
    pub exec: StdFee,
}

impl FeeConfig {
    /// Ceilings the client is built with during wallet bootstrap.
    pub fn bootstrap() -> Self {
        let fee = StdFee {
            amount: vec![Coin::new(BOOTSTRAP_FEE_AMOUNT, HOLODECK_2.fee_denom())],
            gas: BOOTSTRAP_GAS_LIMIT.to_string(),
        };
        Self {
            init: fee.clone(),
            exec: fee,
        }
    }
}
