use alloy_primitives::{Address, ChainId};
use serde::{Deserialize, Serialize};

use crate::chain::ChainDescriptor;

/// Error payload returned by the wallet, mirroring the EIP-1193
/// `ProviderRpcError` shape.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, thiserror::Error)]
#[error("provider error {code}: {message}")]
pub struct ProviderError {
    pub code: i64,
    pub message: String,
}

impl ProviderError {
    /// EIP-1193: the user rejected the request.
    pub const USER_REJECTED: i64 = 4001;
    /// EIP-3326: the wallet has no definition for the requested chain.
    pub const UNRECOGNIZED_CHAIN: i64 = 4902;
    /// JSON-RPC 2.0 internal error, used for transport-level failures.
    pub const INTERNAL: i64 = -32603;

    pub fn new(code: i64, message: impl Into<String>) -> Self {
        Self { code, message: message.into() }
    }

    /// An internal error that did not originate in the wallet itself.
    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(Self::INTERNAL, message)
    }

    /// Whether a `wallet_switchEthereumChain` request failed because the
    /// wallet does not know the chain.
    pub fn is_unrecognized_chain(&self) -> bool {
        self.code == Self::UNRECOGNIZED_CHAIN
    }
}

/// The injected wallet as seen by the connector: the EIP-1193 request subset
/// this crate issues.
///
/// Implementations are expected to resolve one request at a time; the
/// connector never issues two requests concurrently.
#[async_trait::async_trait]
#[auto_impl::auto_impl(&, Arc)]
pub trait WalletProvider: Send + Sync {
    /// `eth_requestAccounts`: prompt the wallet for account access and return
    /// the accounts it exposes, primary account first.
    async fn request_accounts(&self) -> Result<Vec<Address>, ProviderError>;

    /// `eth_chainId`: the chain the wallet is currently on.
    async fn chain_id(&self) -> Result<ChainId, ProviderError>;

    /// `wallet_switchEthereumChain`: ask the wallet to activate `chain_id`.
    async fn switch_chain(&self, chain_id: ChainId) -> Result<(), ProviderError>;

    /// `wallet_addEthereumChain`: register a chain definition with the
    /// wallet. Adding a chain does not activate it.
    async fn add_chain(&self, chain: &ChainDescriptor) -> Result<(), ProviderError>;
}
