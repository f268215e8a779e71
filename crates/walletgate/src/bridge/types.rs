use alloy_primitives::{Address, ChainId};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{chain::ChainDescriptor, provider::ProviderError};

/// EIP-1193 requests the bridge can relay to the injected wallet.
///
/// Serializes to the provider request shape the page passes straight to
/// `window.ethereum.request`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "method", content = "params")]
pub(crate) enum Eip1193Request {
    #[serde(rename = "eth_requestAccounts")]
    RequestAccounts,

    #[serde(rename = "eth_chainId")]
    ChainId,

    #[serde(rename = "wallet_switchEthereumChain")]
    SwitchChain([SwitchChainParams; 1]),

    #[serde(rename = "wallet_addEthereumChain")]
    AddChain([ChainDescriptor; 1]),
}

/// The EIP-3326 `wallet_switchEthereumChain` parameter object.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct SwitchChainParams {
    #[serde(with = "crate::chain::hex_chain_id")]
    pub chain_id: ChainId,
}

/// A queued provider request awaiting execution in the browser.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub(crate) struct ProviderRequest {
    pub id: Uuid,
    #[serde(flatten)]
    pub request: Eip1193Request,
}

/// Result or wallet error the page reports back for a request id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub(crate) struct ProviderResponse {
    pub id: Uuid,
    pub result: Option<serde_json::Value>,
    pub error: Option<ProviderError>,
}

/// Active wallet connection as reported by the page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct Connection {
    pub address: Address,
    pub chain_id: ChainId,
}

impl Connection {
    pub(crate) fn new(address: Address, chain_id: ChainId) -> Self {
        Self { address, chain_id }
    }
}

/// Envelope for every `/api` payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", content = "data", rename_all = "snake_case")]
pub(crate) enum BridgeApiResponse<T> {
    Ok(T),
    Error { message: String },
}

impl<T> BridgeApiResponse<T> {
    pub(crate) fn error(message: impl Into<String>) -> Self {
        Self::Error { message: message.into() }
    }
}
