//! # Browser Wallet Connection for Base
//!
//! This crate implements the wallet-connection flow of a Base-only web app
//! following:
//! - [EIP-1193](https://eips.ethereum.org/EIPS/eip-1193): Ethereum Provider JavaScript API
//! - [EIP-3326](https://eips.ethereum.org/EIPS/eip-3326): `wallet_switchEthereumChain`
//! - [EIP-3085](https://eips.ethereum.org/EIPS/eip-3085): `wallet_addEthereumChain`
//!
//! ## Architecture
//!
//! [`WalletConnector`] drives the flow the page exposes to the user: request
//! account access, compare the wallet's active chain against the target
//! chain, switch the wallet over, and register the chain definition with the
//! wallet when it does not know it yet. The wallet sits behind the
//! [`WalletProvider`] trait so the flow can be exercised against a fake
//! provider; connection status and user-visible notices go through
//! [`StatusSink`].
//!
//! With the `browser` feature the crate also ships [`BridgeServer`], a local
//! HTTP bridge in the spirit of CLI browser-wallet integrations:
//! 1. The process starts a loopback server and the user opens it in a browser
//! 2. The served page connects to MetaMask/injected wallets via `window.ethereum`
//! 3. Provider requests are queued and relayed by the page
//! 4. Results are returned to the process via polling
//!
//! [`BridgeServer`] implements [`WalletProvider`] on top of that relay, so the
//! same connector works unchanged against a real injected wallet.

mod chain;
mod connector;
mod error;
mod provider;
mod status;

#[cfg(feature = "browser")]
pub mod bridge;

pub use chain::{ChainDescriptor, NativeCurrency};
pub use connector::WalletConnector;
pub use error::ConnectorError;
pub use provider::{ProviderError, WalletProvider};
pub use status::{Notice, StatusSink};

#[cfg(feature = "browser")]
pub use bridge::{error::BridgeError, server::BridgeServer};
