//! Local HTTP bridge between this process and a browser-injected wallet.
//!
//! The bridge serves a single page at `/` that relays queued EIP-1193
//! requests to `window.ethereum` and posts results back through a small JSON
//! API. [`server::BridgeServer`] implements
//! [`WalletProvider`](crate::WalletProvider) on top of that relay.

pub mod error;
pub mod server;

mod app;
mod handlers;
mod queue;
mod router;
mod state;
mod types;
