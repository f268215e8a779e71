use alloy_primitives::ChainId;
use serde::{Deserialize, Serialize};

/// Native currency metadata of a chain, as expected by
/// `wallet_addEthereumChain`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NativeCurrency {
    pub name: String,
    pub symbol: String,
    pub decimals: u8,
}

/// Full chain definition submitted to the wallet when it does not know the
/// target chain.
///
/// Field names and the hex-quantity chain id follow the EIP-3085 parameter
/// object, so the struct serializes to the exact shape
/// `wallet_addEthereumChain` takes on the wire.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChainDescriptor {
    #[serde(with = "hex_chain_id")]
    pub chain_id: ChainId,
    pub chain_name: String,
    pub native_currency: NativeCurrency,
    pub rpc_urls: Vec<String>,
    pub block_explorer_urls: Vec<String>,
}

impl ChainDescriptor {
    /// Base Mainnet (chain id `0x2105`), the network this crate pins wallets
    /// to.
    pub fn base_mainnet() -> Self {
        Self {
            chain_id: 0x2105,
            chain_name: "Base Mainnet".to_string(),
            native_currency: NativeCurrency {
                name: "ETH".to_string(),
                symbol: "ETH".to_string(),
                decimals: 18,
            },
            rpc_urls: vec!["https://mainnet.base.org".to_string()],
            block_explorer_urls: vec!["https://basescan.org/".to_string()],
        }
    }

    /// The chain id as a 0x-prefixed hex quantity, e.g. `0x2105`.
    pub fn chain_id_hex(&self) -> String {
        format!("{:#x}", self.chain_id)
    }
}

/// Parse a chain id from a 0x-prefixed hex quantity or a decimal string.
///
/// Wallets report `eth_chainId` as a hex quantity; configuration written by
/// hand tends to use decimal.
pub(crate) fn parse_chain_id(value: &str) -> Result<ChainId, String> {
    let value = value.trim();
    if let Some(digits) = value.strip_prefix("0x").or_else(|| value.strip_prefix("0X")) {
        ChainId::from_str_radix(digits, 16)
            .map_err(|err| format!("invalid hex chain id {value:?}: {err}"))
    } else {
        value.parse().map_err(|err| format!("invalid chain id {value:?}: {err}"))
    }
}

pub(crate) mod hex_chain_id {
    use alloy_primitives::ChainId;
    use serde::{Deserialize, Deserializer, Serializer, de};

    pub(crate) fn serialize<S: Serializer>(
        chain_id: &ChainId,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&format!("{chain_id:#x}"))
    }

    pub(crate) fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<ChainId, D::Error> {
        let value = String::deserialize(deserializer)?;
        super::parse_chain_id(&value).map_err(de::Error::custom)
    }
}
