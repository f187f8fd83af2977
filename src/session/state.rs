//! Shared client and view-key state.

use std::sync::Arc;

use crate::client::{AccountRecord, SigningClient};

/// Client state published to the rest of the application.
///
/// Moves from `Loading` to `Ready` once and never back.
#[derive(Debug, Clone, Default)]
pub enum ClientState {
    #[default]
    Loading,
    Ready {
        execute: Arc<SigningClient>,
        account_data: AccountRecord,
    },
}

impl ClientState {
    pub fn ready(&self) -> bool {
        matches!(self, Self::Ready { .. })
    }

    pub fn execute(&self) -> Option<&Arc<SigningClient>> {
        match self {
            Self::Ready { execute, .. } => Some(execute),
            Self::Loading => None,
        }
    }

    pub fn account_data(&self) -> Option<&AccountRecord> {
        match self {
            Self::Ready { account_data, .. } => Some(account_data),
            Self::Loading => None,
        }
    }

    pub fn address(&self) -> Option<&str> {
        self.account_data().map(|a| a.address.as_str())
    }
}

/// Viewing key for private contract queries.
#[derive(Clone, PartialEq, Eq)]
pub struct ViewKey(String);

impl ViewKey {
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Debug for ViewKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("ViewKey(<redacted>)")
    }
}

/// View-key state, owned by the view-key control.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ViewKeyState {
    pub value: Option<ViewKey>,
}

impl ViewKeyState {
    pub fn ready(&self) -> bool {
        self.value.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_loading_has_nothing() {
        let state = ClientState::default();
        assert!(!state.ready());
        assert!(state.execute().is_none());
        assert!(state.address().is_none());
    }

    #[test]
    fn test_view_key_redacted() {
        let key = ViewKey::new("api_key_s3cr3t");
        assert_eq!(format!("{:?}", key), "ViewKey(<redacted>)");
        assert_eq!(key.expose(), "api_key_s3cr3t");

        let state = ViewKeyState { value: Some(key) };
        assert!(state.ready());
        assert!(!format!("{:?}", state).contains("s3cr3t"));
    }
}
