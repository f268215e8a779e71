use std::{net::SocketAddr, sync::Arc, time::Duration};

use alloy_primitives::{Address, ChainId};
use parking_lot::Mutex;
use tokio::{net::TcpListener, sync::oneshot, task::JoinHandle, time::Instant};
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::{
    bridge::{
        error::BridgeError,
        router::build_router,
        state::BridgeState,
        types::{Eip1193Request, ProviderRequest, ProviderResponse, SwitchChainParams},
    },
    chain::{ChainDescriptor, parse_chain_id},
    provider::{ProviderError, WalletProvider},
};

/// How often the dispatcher polls for a response posted by the page.
const POLL_INTERVAL: Duration = Duration::from_millis(100);

/// Local HTTP bridge to a browser-injected wallet.
///
/// Serves a page that relays queued EIP-1193 requests to `window.ethereum`
/// and posts the results back. Clones share one underlying bridge;
/// [`start`](Self::start) binds the listener and [`stop`](Self::stop) shuts
/// it down gracefully.
#[derive(Debug, Clone)]
pub struct BridgeServer {
    state: Arc<BridgeState>,
    requested_port: u16,
    timeout: Duration,
    runtime: Arc<Mutex<Option<ServerTask>>>,
}

#[derive(Debug)]
struct ServerTask {
    port: u16,
    shutdown: oneshot::Sender<()>,
    task: JoinHandle<()>,
}

impl BridgeServer {
    /// Create a bridge on `port` (0 picks an ephemeral port). `timeout`
    /// bounds how long a relayed request may wait for the page to respond.
    pub fn new(port: u16, timeout: Duration) -> Self {
        Self {
            state: Arc::new(BridgeState::new()),
            requested_port: port,
            timeout,
            runtime: Arc::new(Mutex::new(None)),
        }
    }

    /// The port the bridge is listening on.
    pub fn port(&self) -> u16 {
        self.runtime.lock().as_ref().map_or(self.requested_port, |task| task.port)
    }

    /// How long a relayed request may wait for the page.
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Whether the page currently reports a connected wallet.
    pub fn is_connected(&self) -> bool {
        self.state.is_connected()
    }

    /// The wallet connection reported by the page, if any.
    pub fn connection(&self) -> Option<(Address, ChainId)> {
        self.state.get_connection().map(|connection| (connection.address, connection.chain_id))
    }

    /// Bind the loopback listener and start serving the bridge page and API.
    pub async fn start(&mut self) -> Result<(), BridgeError> {
        if self.runtime.lock().is_some() {
            warn!("bridge server already running");
            return Ok(());
        }

        let addr = SocketAddr::from(([127, 0, 0, 1], self.requested_port));
        let listener = TcpListener::bind(addr).await?;
        let port = listener.local_addr()?.port();

        let router = build_router(self.state.clone());
        let (shutdown_tx, shutdown_rx) = oneshot::channel::<()>();
        let task = tokio::spawn(async move {
            let server = axum::serve(listener, router).with_graceful_shutdown(async {
                let _ = shutdown_rx.await;
            });
            if let Err(err) = server.await {
                warn!(%err, "bridge server terminated");
            }
        });

        info!(port, "wallet bridge listening, open http://127.0.0.1:{port} in the wallet browser");
        *self.runtime.lock() = Some(ServerTask { port, shutdown: shutdown_tx, task });
        Ok(())
    }

    /// Shut the bridge down and wait for the listener task to finish.
    pub async fn stop(&mut self) {
        let Some(ServerTask { shutdown, task, .. }) = self.runtime.lock().take() else {
            return;
        };
        let _ = shutdown.send(());
        if let Err(err) = task.await {
            warn!(%err, "bridge server task failed");
        }
    }

    /// Queue `request` for the page and wait for its response.
    async fn dispatch(&self, request: Eip1193Request) -> Result<serde_json::Value, BridgeError> {
        let id = Uuid::new_v4();
        debug!(%id, ?request, "relaying provider request");
        self.state.add_request(ProviderRequest { id, request });

        let deadline = Instant::now() + self.timeout;
        loop {
            if let Some(response) = self.state.take_response(&id) {
                return match response {
                    ProviderResponse { error: Some(error), .. } => {
                        Err(BridgeError::Provider(error))
                    }
                    ProviderResponse { result: Some(result), .. } => Ok(result),
                    ProviderResponse { .. } => Ok(serde_json::Value::Null),
                };
            }
            if Instant::now() >= deadline {
                self.state.remove_request(&id);
                return Err(BridgeError::Timeout(self.timeout));
            }
            tokio::time::sleep(POLL_INTERVAL).await;
        }
    }
}

#[async_trait::async_trait]
impl WalletProvider for BridgeServer {
    async fn request_accounts(&self) -> Result<Vec<Address>, ProviderError> {
        let result = self.dispatch(Eip1193Request::RequestAccounts).await?;
        serde_json::from_value(result)
            .map_err(|err| ProviderError::internal(format!("malformed accounts response: {err}")))
    }

    async fn chain_id(&self) -> Result<ChainId, ProviderError> {
        let result = self.dispatch(Eip1193Request::ChainId).await?;
        let quantity: String = serde_json::from_value(result)
            .map_err(|err| ProviderError::internal(format!("malformed chain id response: {err}")))?;
        parse_chain_id(&quantity).map_err(ProviderError::internal)
    }

    async fn switch_chain(&self, chain_id: ChainId) -> Result<(), ProviderError> {
        self.dispatch(Eip1193Request::SwitchChain([SwitchChainParams { chain_id }])).await?;
        Ok(())
    }

    async fn add_chain(&self, chain: &ChainDescriptor) -> Result<(), ProviderError> {
        self.dispatch(Eip1193Request::AddChain([chain.clone()])).await?;
        Ok(())
    }
}
