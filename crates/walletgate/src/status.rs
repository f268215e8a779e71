use std::fmt;

use alloy_primitives::Address;

/// User-visible outcome of a connection or network-check step.
///
/// Every failure and every completed switch/add surfaces as exactly one
/// notice; `Display` carries the wording shown to the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    /// No injected wallet was found in the environment.
    ProviderMissing,
    /// The wallet declined or failed the connection attempt.
    ConnectFailed,
    /// The wallet switched its active network to `chain`.
    Switched { chain: String },
    /// The wallet stayed on another network even though `chain` is required.
    WrongChain { chain: String },
    /// `chain` was registered with the wallet; activating it is still up to
    /// the user.
    ChainAdded { chain: String },
    /// Registering `chain` with the wallet failed.
    ChainAddFailed { chain: String },
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ProviderMissing => {
                f.write_str("No wallet extension detected. Please install one to continue.")
            }
            Self::ConnectFailed => f.write_str("Failed to connect wallet."),
            Self::Switched { chain } => write!(f, "Switched to {chain}."),
            Self::WrongChain { chain } => {
                write!(f, "You must be on {chain} to use this app.")
            }
            Self::ChainAdded { chain } => {
                write!(f, "{chain} added. Please switch to it to continue.")
            }
            Self::ChainAddFailed { chain } => {
                write!(f, "Failed to add {chain}. Please add it manually.")
            }
        }
    }
}

/// Where connection status lands on the page: the address label, the
/// affordances that need a connected wallet, and the notification channel.
#[auto_impl::auto_impl(&, Arc)]
pub trait StatusSink: Send + Sync {
    /// Show `address` as the connected account. Called once per successful
    /// connection.
    fn connected(&self, address: Address);

    /// Reveal the actions that require a connected wallet. Called after the
    /// network check has run, whatever its outcome.
    fn enable_actions(&self);

    /// Surface a notice to the user.
    fn notify(&self, notice: Notice);
}
