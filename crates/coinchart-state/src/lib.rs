// File: crates/coinchart-state/src/lib.rs
// Summary: Coin list / coin detail presentation state, independent of any UI framework.

pub mod error;
pub mod domain;
pub mod dto;
pub mod models;
pub mod cancel;
pub mod source;
pub mod remote;
pub mod store;

pub use error::{FetchError, NetworkError};
pub use domain::{Coin, CoinPrice};
pub use models::{history_to_data_points, CoinUi, DisplayableNumber};
pub use cancel::CancellationToken;
pub use source::CoinDataSource;
pub use remote::{RemoteCoinDataSource, Response, Transport};
pub use store::{Command, CoinListState, CoinListStore, LoadedCoins, StoreEvent, SubscriptionId};
