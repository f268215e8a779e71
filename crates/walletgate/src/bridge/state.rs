use std::sync::Arc;

use parking_lot::Mutex;
use uuid::Uuid;

use crate::bridge::{
    queue::RequestQueue,
    types::{Connection, ProviderRequest, ProviderResponse},
};

/// State shared between the HTTP handlers and the dispatching side of the
/// bridge.
#[derive(Debug, Clone)]
pub(crate) struct BridgeState {
    /// Current information about the wallet connection.
    connection: Arc<Mutex<Option<Connection>>>,
    /// Request/response queue for provider calls.
    requests: Arc<Mutex<RequestQueue<ProviderRequest, ProviderResponse>>>,
}

impl Default for BridgeState {
    fn default() -> Self {
        Self::new()
    }
}

impl BridgeState {
    pub fn new() -> Self {
        Self {
            connection: Arc::new(Mutex::new(None)),
            requests: Arc::new(Mutex::new(RequestQueue::new())),
        }
    }

    /// Check if the page reports a connected wallet.
    pub fn is_connected(&self) -> bool {
        self.connection.lock().is_some()
    }

    /// Get current connection information.
    pub fn get_connection(&self) -> Option<Connection> {
        *self.connection.lock()
    }

    /// Set connection information.
    pub fn set_connection(&self, connection: Option<Connection>) {
        *self.connection.lock() = connection;
    }

    /// Queue a provider request for the page.
    pub fn add_request(&self, request: ProviderRequest) {
        let mut requests = self.requests.lock();
        requests.add_request(request.id, request);
    }

    /// Check if a provider request is still pending.
    pub fn has_request(&self, id: &Uuid) -> bool {
        self.requests.lock().has_request(id)
    }

    /// Read the next provider request without removing it.
    pub fn read_next_request(&self) -> Option<ProviderRequest> {
        self.requests.lock().read_request().cloned()
    }

    /// Withdraw a provider request, e.g. after a timeout.
    pub fn remove_request(&self, id: &Uuid) {
        self.requests.lock().remove_request(id);
    }

    /// Record the page's response and retire the matching request.
    pub fn add_response(&self, response: ProviderResponse) {
        let id = response.id;
        let mut requests = self.requests.lock();
        requests.add_response(id, response);
        requests.remove_request(&id);
    }

    /// Claim a response, removing it from the queue.
    pub fn take_response(&self, id: &Uuid) -> Option<ProviderResponse> {
        self.requests.lock().get_response(id)
    }
}
