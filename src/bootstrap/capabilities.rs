//! Waiting for the wallet provider to inject itself.

use std::sync::Arc;
use std::time::Duration;

use tokio::time::{interval, timeout, MissedTickBehavior};

use crate::bootstrap::error::BootstrapError;
use crate::wallet::{EnigmaUtilsFactory, OfflineSignerFactory, WalletEnvironment, WalletHandle};

/// Shortest period the capability poll runs at.
pub const MIN_POLL_INTERVAL: Duration = Duration::from_millis(1);

/// The three capabilities, all present.
#[derive(Clone)]
pub struct WalletCapabilities {
    pub wallet: Arc<dyn WalletHandle>,
    pub signers: Arc<dyn OfflineSignerFactory>,
    pub enigma: Arc<dyn EnigmaUtilsFactory>,
}

impl std::fmt::Debug for WalletCapabilities {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WalletCapabilities").finish_non_exhaustive()
    }
}

/// Probe the environment once. `Ok` only when every capability is present.
pub fn probe(env: &dyn WalletEnvironment) -> Result<WalletCapabilities, Vec<&'static str>> {
    let wallet = env.wallet();
    let signers = env.offline_signer_factory();
    let enigma = env.enigma_utils_factory();

    match (wallet, signers, enigma) {
        (Some(wallet), Some(signers), Some(enigma)) => Ok(WalletCapabilities {
            wallet,
            signers,
            enigma,
        }),
        (wallet, signers, enigma) => {
            let mut missing = Vec::new();
            if wallet.is_none() {
                missing.push("wallet");
            }
            if signers.is_none() {
                missing.push("offline_signer");
            }
            if enigma.is_none() {
                missing.push("enigma_utils");
            }
            Err(missing)
        }
    }
}

/// Poll `env` every `poll_interval` until all capabilities appear at once,
/// or fail with [`BootstrapError::CapabilityNotFound`] after `deadline`.
///
/// Intervals below [`MIN_POLL_INTERVAL`] are raised to it.
pub async fn wait_for_capabilities(
    env: &dyn WalletEnvironment,
    poll_interval: Duration,
    deadline: Duration,
) -> Result<WalletCapabilities, BootstrapError> {
    let result = timeout(deadline, async {
        let mut last_missing = Vec::new();
        let mut ticker = interval(poll_interval.max(MIN_POLL_INTERVAL));
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            ticker.tick().await;

            match probe(env) {
                Ok(caps) => return caps,
                Err(missing) => {
                    if missing != last_missing {
                        tracing::debug!(missing = ?missing, "Waiting for wallet capabilities");
                        last_missing = missing;
                    }
                }
            }
        }
    })
    .await;

    match result {
        Ok(caps) => Ok(caps),
        Err(_) => {
            // One last look; the provider may have landed on the final tick.
            probe(env).map_err(|missing| BootstrapError::CapabilityNotFound {
                waited: deadline,
                missing: missing.join(", "),
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::wallet::ConfiguredWallet;

    struct Empty;

    impl WalletEnvironment for Empty {
        fn wallet(&self) -> Option<Arc<dyn WalletHandle>> {
            None
        }
        fn offline_signer_factory(&self) -> Option<Arc<dyn OfflineSignerFactory>> {
            None
        }
        fn enigma_utils_factory(&self) -> Option<Arc<dyn EnigmaUtilsFactory>> {
            None
        }
    }

    #[test]
    fn test_probe_reports_missing() {
        let missing = probe(&Empty).unwrap_err();
        assert_eq!(missing, vec!["wallet", "offline_signer", "enigma_utils"]);
    }

    #[test]
    fn test_probe_complete() {
        let wallet = ConfiguredWallet::new(Vec::new());
        assert!(probe(&wallet).is_ok());
    }

    #[tokio::test(start_paused = true)]
    async fn test_zero_interval_is_clamped() {
        let err = wait_for_capabilities(&Empty, Duration::ZERO, Duration::from_millis(50))
            .await
            .unwrap_err();
        assert!(matches!(err, BootstrapError::CapabilityNotFound { .. }));

        let wallet = ConfiguredWallet::new(Vec::new());
        assert!(wait_for_capabilities(&wallet, Duration::ZERO, Duration::from_secs(1))
            .await
            .is_ok());
    }

    #[tokio::test(start_paused = true)]
    async fn test_wait_times_out() {
        let err = wait_for_capabilities(&Empty, Duration::from_millis(10), Duration::from_secs(1))
            .await
            .unwrap_err();
        match err {
            BootstrapError::CapabilityNotFound { waited, missing } => {
                assert_eq!(waited, Duration::from_secs(1));
                assert_eq!(missing, "wallet, offline_signer, enigma_utils");
            }
            other => panic!("unexpected error: {other}"),
        }
    }
}
