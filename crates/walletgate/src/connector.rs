use std::sync::atomic::{AtomicBool, Ordering};

use alloy_primitives::Address;
use parking_lot::Mutex;
use tracing::{debug, error, warn};

use crate::{
    chain::ChainDescriptor,
    error::ConnectorError,
    provider::WalletProvider,
    status::{Notice, StatusSink},
};

/// Outcome of a network check that did not error.
enum NetworkStatus {
    /// The wallet already reported the target chain; nothing was issued.
    OnTarget,
    /// The wallet accepted a switch to the target chain.
    Switched,
}

/// Connects an injected wallet and pins it to a target chain.
///
/// State lives for the lifetime of the page and is rebuilt from scratch on
/// reload. [`connect`](Self::connect), [`verify_network`](Self::verify_network)
/// and [`register_network`](Self::register_network) each catch their own
/// failures and surface them through the [`StatusSink`]; nothing propagates
/// to the caller and nothing is retried. Partial effects stay in place: an
/// account stays connected even when the network check after it fails.
#[derive(Debug)]
pub struct WalletConnector<P, S> {
    /// `None` models an environment without an injected wallet.
    provider: Option<P>,
    sink: S,
    target: ChainDescriptor,
    address: Mutex<Option<Address>>,
    /// Set while a connect attempt is in flight. Overlapping calls are
    /// dropped instead of racing the wallet prompt.
    connecting: AtomicBool,
}

impl<P: WalletProvider, S: StatusSink> WalletConnector<P, S> {
    /// Create a connector for `target`. Pass `provider: None` when the
    /// environment has no injected wallet.
    pub fn new(provider: Option<P>, sink: S, target: ChainDescriptor) -> Self {
        Self {
            provider,
            sink,
            target,
            address: Mutex::new(None),
            connecting: AtomicBool::new(false),
        }
    }

    /// The connected account, if any.
    pub fn address(&self) -> Option<Address> {
        *self.address.lock()
    }

    /// Whether an account request has completed successfully.
    pub fn is_connected(&self) -> bool {
        self.address.lock().is_some()
    }

    /// The chain this connector pins wallets to.
    pub fn target(&self) -> &ChainDescriptor {
        &self.target
    }

    /// Connect the injected wallet, then make sure it is on the target chain.
    ///
    /// A call that overlaps an in-flight attempt is dropped. Failures are
    /// surfaced as notices and leave the connector ready for another attempt.
    pub async fn connect(&self) {
        if self.connecting.swap(true, Ordering::SeqCst) {
            debug!("connect attempt already in flight, dropping");
            return;
        }
        self.do_connect().await;
        self.connecting.store(false, Ordering::SeqCst);
    }

    async fn do_connect(&self) {
        let address = match self.request_account().await {
            Ok(address) => address,
            Err(err @ ConnectorError::ProviderMissing) => {
                warn!(%err, "cannot connect");
                self.sink.notify(Notice::ProviderMissing);
                return;
            }
            Err(err) => {
                error!(%err, "wallet connection failed");
                self.sink.notify(Notice::ConnectFailed);
                return;
            }
        };
        debug!(%address, "wallet connected");
        self.sink.connected(address);

        self.verify_network().await;
        // The account is connected whatever the check concluded, so the
        // wallet-gated actions unlock either way.
        self.sink.enable_actions();
    }

    async fn request_account(&self) -> Result<Address, ConnectorError> {
        let provider = self.provider.as_ref().ok_or(ConnectorError::ProviderMissing)?;
        let accounts =
            provider.request_accounts().await.map_err(ConnectorError::ConnectionRejected)?;
        let address = accounts.first().copied().ok_or(ConnectorError::NoAccounts)?;
        *self.address.lock() = Some(address);
        Ok(address)
    }

    /// Check the wallet's active chain and move it to the target if needed.
    ///
    /// Issues no request beyond the chain query when the wallet already
    /// reports the target chain. A switch the wallet rejects because it does
    /// not know the chain falls through to
    /// [`register_network`](Self::register_network).
    pub async fn verify_network(&self) {
        let Some(provider) = &self.provider else {
            warn!("network check requested without a wallet provider");
            return;
        };
        let chain = self.target.chain_name.clone();
        match self.try_verify_network(provider).await {
            Ok(NetworkStatus::OnTarget) => {}
            Ok(NetworkStatus::Switched) => self.sink.notify(Notice::Switched { chain }),
            Err(ConnectorError::ChainUnrecognized { chain_id }) => {
                debug!(chain_id, "wallet does not know the target chain, registering it");
                self.register_network().await;
            }
            Err(err @ ConnectorError::ChainSwitchFailed { .. }) => {
                error!(%err, "network switch failed");
                self.sink.notify(Notice::WrongChain { chain });
            }
            Err(err) => {
                error!(%err, "failed to query the wallet's active chain");
                self.sink.notify(Notice::ConnectFailed);
            }
        }
    }

    async fn try_verify_network(&self, provider: &P) -> Result<NetworkStatus, ConnectorError> {
        let current = provider.chain_id().await?;
        debug!(current, target = self.target.chain_id, "checked active chain");
        if current == self.target.chain_id {
            return Ok(NetworkStatus::OnTarget);
        }
        provider.switch_chain(self.target.chain_id).await.map_err(|err| {
            if err.is_unrecognized_chain() {
                ConnectorError::ChainUnrecognized { chain_id: self.target.chain_id }
            } else {
                ConnectorError::ChainSwitchFailed { chain_id: self.target.chain_id, source: err }
            }
        })?;
        Ok(NetworkStatus::Switched)
    }

    /// Register the target chain definition with the wallet.
    ///
    /// `wallet_addEthereumChain` does not activate the chain it adds, so the
    /// user is told to switch manually afterwards.
    pub async fn register_network(&self) {
        let Some(provider) = &self.provider else {
            warn!("chain registration requested without a wallet provider");
            return;
        };
        let chain = self.target.chain_name.clone();
        match provider.add_chain(&self.target).await {
            Ok(()) => {
                debug!(chain_id = self.target.chain_id, "chain registered with the wallet");
                self.sink.notify(Notice::ChainAdded { chain });
            }
            Err(err) => {
                let err = ConnectorError::ChainAddFailed {
                    chain_id: self.target.chain_id,
                    source: err,
                };
                error!(%err, "chain registration failed");
                self.sink.notify(Notice::ChainAddFailed { chain });
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::{
        sync::{
            Arc,
            atomic::{AtomicUsize, Ordering},
        },
        time::Duration,
    };

    use alloy_primitives::{Address, ChainId, address};
    use parking_lot::Mutex;
    use tokio::sync::Notify;

    use super::*;
    use crate::provider::ProviderError;

    const ALICE: Address = address!("0xf39Fd6e51aad88F6F4ce6aB8827279cffFb92266");
    const BOB: Address = address!("0x70997970C51812dc3A010C7d01b50e0d17dc79C8");
    const BASE: ChainId = 0x2105;
    const MAINNET: ChainId = 1;

    #[derive(Debug, Clone, PartialEq, Eq)]
    enum Call {
        RequestAccounts,
        ChainId,
        SwitchChain(ChainId),
        AddChain(ChainDescriptor),
    }

    struct MockProvider {
        accounts: Result<Vec<Address>, ProviderError>,
        chain_id: Result<ChainId, ProviderError>,
        switch: Result<(), ProviderError>,
        add: Result<(), ProviderError>,
        calls: Mutex<Vec<Call>>,
        /// When set, `request_accounts` parks until notified.
        gate: Option<Arc<Notify>>,
    }

    impl MockProvider {
        fn on_chain(chain_id: ChainId) -> Self {
            Self {
                accounts: Ok(vec![ALICE]),
                chain_id: Ok(chain_id),
                switch: Ok(()),
                add: Ok(()),
                calls: Mutex::new(Vec::new()),
                gate: None,
            }
        }

        fn calls(&self) -> Vec<Call> {
            self.calls.lock().clone()
        }

        fn count(&self, call: &Call) -> usize {
            self.calls.lock().iter().filter(|recorded| *recorded == call).count()
        }
    }

    #[async_trait::async_trait]
    impl WalletProvider for MockProvider {
        async fn request_accounts(&self) -> Result<Vec<Address>, ProviderError> {
            self.calls.lock().push(Call::RequestAccounts);
            if let Some(gate) = &self.gate {
                gate.notified().await;
            }
            self.accounts.clone()
        }

        async fn chain_id(&self) -> Result<ChainId, ProviderError> {
            self.calls.lock().push(Call::ChainId);
            self.chain_id.clone()
        }

        async fn switch_chain(&self, chain_id: ChainId) -> Result<(), ProviderError> {
            self.calls.lock().push(Call::SwitchChain(chain_id));
            self.switch.clone()
        }

        async fn add_chain(&self, chain: &ChainDescriptor) -> Result<(), ProviderError> {
            self.calls.lock().push(Call::AddChain(chain.clone()));
            self.add.clone()
        }
    }

    #[derive(Default)]
    struct RecordingSink {
        connected: Mutex<Vec<Address>>,
        notices: Mutex<Vec<Notice>>,
        actions: AtomicUsize,
    }

    impl RecordingSink {
        fn notices(&self) -> Vec<Notice> {
            self.notices.lock().clone()
        }

        fn actions(&self) -> usize {
            self.actions.load(Ordering::SeqCst)
        }
    }

    impl StatusSink for RecordingSink {
        fn connected(&self, address: Address) {
            self.connected.lock().push(address);
        }

        fn enable_actions(&self) {
            self.actions.fetch_add(1, Ordering::SeqCst);
        }

        fn notify(&self, notice: Notice) {
            self.notices.lock().push(notice);
        }
    }

    type TestConnector = WalletConnector<Arc<MockProvider>, Arc<RecordingSink>>;

    fn connector_with(provider: MockProvider) -> (Arc<MockProvider>, Arc<RecordingSink>, TestConnector) {
        let provider = Arc::new(provider);
        let sink = Arc::new(RecordingSink::default());
        let connector = WalletConnector::new(
            Some(provider.clone()),
            sink.clone(),
            ChainDescriptor::base_mainnet(),
        );
        (provider, sink, connector)
    }

    fn rejected(message: &str) -> ProviderError {
        ProviderError::new(ProviderError::USER_REJECTED, message)
    }

    fn unrecognized_chain() -> ProviderError {
        ProviderError::new(ProviderError::UNRECOGNIZED_CHAIN, "Unrecognized chain ID")
    }

    #[tokio::test]
    async fn missing_provider_produces_one_notice_and_no_requests() {
        let sink = Arc::new(RecordingSink::default());
        let connector: TestConnector =
            WalletConnector::new(None, sink.clone(), ChainDescriptor::base_mainnet());

        connector.connect().await;

        assert_eq!(sink.notices(), vec![Notice::ProviderMissing]);
        assert_eq!(connector.address(), None);
        assert_eq!(sink.actions(), 0);
    }

    #[tokio::test]
    async fn connect_stores_first_account_and_updates_label_once() {
        let (provider, sink, connector) = connector_with(MockProvider {
            accounts: Ok(vec![ALICE, BOB]),
            ..MockProvider::on_chain(BASE)
        });

        connector.connect().await;

        assert_eq!(connector.address(), Some(ALICE));
        assert!(connector.is_connected());
        assert_eq!(connector.target().chain_id, BASE);
        assert_eq!(*sink.connected.lock(), vec![ALICE]);
        assert_eq!(sink.actions(), 1);
        assert_eq!(sink.notices(), Vec::new());
        assert_eq!(provider.calls(), vec![Call::RequestAccounts, Call::ChainId]);
    }

    // The wallet reports 8453, which is exactly what "0x2105" parses to: no
    // switch, no add, no notices.
    #[tokio::test]
    async fn matching_chain_issues_no_switch_or_add() {
        let (provider, sink, connector) = connector_with(MockProvider::on_chain(BASE));

        connector.connect().await;

        assert_eq!(provider.calls(), vec![Call::RequestAccounts, Call::ChainId]);
        assert_eq!(sink.notices(), Vec::new());
    }

    #[tokio::test]
    async fn successful_switch_notifies_once_and_never_adds() {
        let (provider, sink, connector) = connector_with(MockProvider::on_chain(MAINNET));

        connector.connect().await;

        assert_eq!(
            provider.calls(),
            vec![Call::RequestAccounts, Call::ChainId, Call::SwitchChain(BASE)]
        );
        assert_eq!(sink.notices(), vec![Notice::Switched { chain: "Base Mainnet".into() }]);
        assert_eq!(sink.actions(), 1);
    }

    #[tokio::test]
    async fn unrecognized_chain_registers_full_descriptor() {
        let (provider, sink, connector) = connector_with(MockProvider {
            switch: Err(unrecognized_chain()),
            ..MockProvider::on_chain(MAINNET)
        });

        connector.connect().await;

        assert_eq!(
            provider.calls(),
            vec![
                Call::RequestAccounts,
                Call::ChainId,
                Call::SwitchChain(BASE),
                Call::AddChain(ChainDescriptor::base_mainnet()),
            ]
        );
        assert_eq!(sink.notices(), vec![Notice::ChainAdded { chain: "Base Mainnet".into() }]);
        assert_eq!(sink.actions(), 1);
    }

    #[tokio::test]
    async fn other_switch_failure_never_adds() {
        let (provider, sink, connector) = connector_with(MockProvider {
            switch: Err(rejected("User rejected the request")),
            ..MockProvider::on_chain(MAINNET)
        });

        connector.connect().await;

        assert!(!provider.calls().iter().any(|call| matches!(call, Call::AddChain(_))));
        assert_eq!(sink.notices(), vec![Notice::WrongChain { chain: "Base Mainnet".into() }]);
        assert_eq!(sink.actions(), 1);
    }

    #[tokio::test]
    async fn failed_add_notifies_manual_setup() {
        let (_, sink, connector) = connector_with(MockProvider {
            switch: Err(unrecognized_chain()),
            add: Err(rejected("User rejected the request")),
            ..MockProvider::on_chain(MAINNET)
        });

        connector.connect().await;

        assert_eq!(sink.notices(), vec![Notice::ChainAddFailed { chain: "Base Mainnet".into() }]);
        assert_eq!(sink.actions(), 1);
    }

    #[tokio::test]
    async fn rejected_account_request_leaves_address_unset() {
        let (provider, sink, connector) = connector_with(MockProvider {
            accounts: Err(rejected("User rejected the request")),
            ..MockProvider::on_chain(BASE)
        });

        connector.connect().await;

        assert_eq!(connector.address(), None);
        assert_eq!(sink.notices(), vec![Notice::ConnectFailed]);
        assert_eq!(sink.actions(), 0);
        assert_eq!(provider.calls(), vec![Call::RequestAccounts]);
    }

    #[tokio::test]
    async fn empty_account_list_fails_the_connection() {
        let (_, sink, connector) = connector_with(MockProvider {
            accounts: Ok(Vec::new()),
            ..MockProvider::on_chain(BASE)
        });

        connector.connect().await;

        assert_eq!(connector.address(), None);
        assert_eq!(sink.notices(), vec![Notice::ConnectFailed]);
        assert_eq!(sink.actions(), 0);
    }

    #[tokio::test]
    async fn chain_query_failure_still_unlocks_actions() {
        let (_, sink, connector) = connector_with(MockProvider {
            chain_id: Err(ProviderError::internal("wallet hung up")),
            ..MockProvider::on_chain(BASE)
        });

        connector.connect().await;

        // The account itself connected; only the check after it failed.
        assert_eq!(connector.address(), Some(ALICE));
        assert_eq!(sink.notices(), vec![Notice::ConnectFailed]);
        assert_eq!(sink.actions(), 1);
    }

    #[tokio::test]
    async fn overlapping_connect_attempts_are_dropped() {
        let gate = Arc::new(Notify::new());
        let mut provider = MockProvider::on_chain(BASE);
        provider.gate = Some(gate.clone());
        let provider = Arc::new(provider);
        let sink = Arc::new(RecordingSink::default());
        let connector = Arc::new(WalletConnector::new(
            Some(provider.clone()),
            sink.clone(),
            ChainDescriptor::base_mainnet(),
        ));

        let first = tokio::spawn({
            let connector = connector.clone();
            async move { connector.connect().await }
        });
        // Give the first attempt time to park inside the account request.
        tokio::time::sleep(Duration::from_millis(50)).await;

        connector.connect().await;
        assert_eq!(provider.count(&Call::RequestAccounts), 1);

        gate.notify_one();
        first.await.unwrap();

        assert_eq!(provider.count(&Call::RequestAccounts), 1);
        assert_eq!(*sink.connected.lock(), vec![ALICE]);
        assert_eq!(sink.actions(), 1);
    }

    #[tokio::test]
    async fn failed_attempt_allows_retry() {
        let (provider, sink, connector) = connector_with(MockProvider {
            accounts: Err(rejected("User rejected the request")),
            ..MockProvider::on_chain(BASE)
        });

        connector.connect().await;
        connector.connect().await;

        assert_eq!(provider.count(&Call::RequestAccounts), 2);
        assert_eq!(sink.notices(), vec![Notice::ConnectFailed, Notice::ConnectFailed]);
    }
}
