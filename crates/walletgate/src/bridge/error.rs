use std::time::Duration;

use crate::provider::ProviderError;

/// Failures of the local bridge, as opposed to errors reported by the
/// wallet.
#[derive(Debug, thiserror::Error)]
pub enum BridgeError {
    /// The wallet (or the page on its behalf) reported an error for a
    /// relayed request.
    #[error(transparent)]
    Provider(#[from] ProviderError),

    /// The page gave no response for a relayed request in time.
    #[error("no response from the browser page within {0:?}")]
    Timeout(Duration),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl From<BridgeError> for ProviderError {
    fn from(err: BridgeError) -> Self {
        match err {
            BridgeError::Provider(err) => err,
            err => Self::internal(err.to_string()),
        }
    }
}
