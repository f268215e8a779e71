use alloy_primitives::ChainId;

use crate::provider::ProviderError;

/// Failures of the connection and network-check operations.
///
/// Every variant is converted into a user notice at the boundary of the
/// operation that produced it; none escapes to the caller and none is
/// retried.
#[derive(Debug, thiserror::Error)]
pub enum ConnectorError {
    #[error("no injected wallet provider detected")]
    ProviderMissing,
    #[error("wallet declined the account request: {0}")]
    ConnectionRejected(ProviderError),
    #[error("wallet granted access but returned no accounts")]
    NoAccounts,
    #[error("failed to switch wallet to chain {chain_id}: {source}")]
    ChainSwitchFailed { chain_id: ChainId, source: ProviderError },
    #[error("chain {chain_id} is not registered with the wallet")]
    ChainUnrecognized { chain_id: ChainId },
    #[error("failed to register chain {chain_id} with the wallet: {source}")]
    ChainAddFailed { chain_id: ChainId, source: ProviderError },
    #[error(transparent)]
    Provider(#[from] ProviderError),
}
