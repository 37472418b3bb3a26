// File: crates/coinchart-state/src/store.rs
// Summary: Coin list state machine driven by explicit commands and observed through subscriptions.

use chrono::{DateTime, FixedOffset, Offset, Utc};
use tracing::{debug, info, warn};

use crate::cancel::CancellationToken;
use crate::error::{FetchError, NetworkError};
use crate::models::{history_to_data_points, history_window, CoinUi};
use crate::source::CoinDataSource;

#[derive(Clone, Debug, PartialEq)]
pub struct LoadedCoins {
    pub coins: Vec<CoinUi>,
    pub selected: Option<CoinUi>,
}

/// Idle -> Loading -> Loaded | Error. `LoadCoins` may be dispatched from any state.
#[derive(Clone, Debug, Default, PartialEq)]
pub enum CoinListState {
    #[default]
    Idle,
    Loading,
    Loaded(LoadedCoins),
    Error(NetworkError),
}

impl CoinListState {
    pub fn is_loading(&self) -> bool {
        matches!(self, Self::Loading)
    }

    pub fn loaded(&self) -> Option<&LoadedCoins> {
        match self {
            Self::Loaded(l) => Some(l),
            _ => None,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum Command {
    LoadCoins,
    SelectCoin(CoinUi),
}

#[derive(Clone, Debug, PartialEq)]
pub enum StoreEvent {
    StateChanged(CoinListState),
    /// One-shot failure notice, for a toast or snackbar.
    Error(NetworkError),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Subscriber = Box<dyn FnMut(&StoreEvent)>;
type Clock = Box<dyn Fn() -> DateTime<Utc>>;

pub struct CoinListStore<S> {
    source: S,
    state: CoinListState,
    cancel: CancellationToken,
    subscribers: Vec<(SubscriptionId, Subscriber)>,
    next_id: u64,
    clock: Clock,
    label_offset: FixedOffset,
}

impl<S: CoinDataSource> CoinListStore<S> {
    pub fn new(source: S) -> Self {
        Self {
            source,
            state: CoinListState::Idle,
            cancel: CancellationToken::new(),
            subscribers: Vec::new(),
            next_id: 0,
            clock: Box::new(Utc::now),
            label_offset: Utc.fix(),
        }
    }

    pub fn with_clock(mut self, clock: impl Fn() -> DateTime<Utc> + 'static) -> Self {
        self.clock = Box::new(clock);
        self
    }

    /// Offset used for chart x values and labels.
    pub fn with_label_offset(mut self, offset: FixedOffset) -> Self {
        self.label_offset = offset;
        self
    }

    pub fn state(&self) -> &CoinListState {
        &self.state
    }

    /// Token handed to every fetch; cancelling it stops current and future work.
    pub fn cancellation_token(&self) -> CancellationToken {
        self.cancel.clone()
    }

    pub fn cancel(&self) {
        self.cancel.cancel();
    }

    pub fn subscribe(&mut self, f: impl FnMut(&StoreEvent) + 'static) -> SubscriptionId {
        let id = SubscriptionId(self.next_id);
        self.next_id += 1;
        self.subscribers.push((id, Box::new(f)));
        id
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.subscribers.len();
        self.subscribers.retain(|(sid, _)| *sid != id);
        self.subscribers.len() != before
    }

    pub fn dispatch(&mut self, command: Command) {
        if self.cancel.is_cancelled() {
            debug!(?command, "store cancelled; dropping command");
            return;
        }
        match command {
            Command::LoadCoins => self.load_coins(),
            Command::SelectCoin(coin) => self.select_coin(coin),
        }
    }

    fn load_coins(&mut self) {
        let previous = std::mem::replace(&mut self.state, CoinListState::Loading);
        self.emit_state();

        match self.source.get_coins(&self.cancel) {
            Ok(coins) => {
                info!(count = coins.len(), "coins loaded");
                let selected = match previous {
                    CoinListState::Loaded(l) => l.selected.filter(|s| coins.iter().any(|c| c.id == s.id)),
                    _ => None,
                };
                let coins = coins.into_iter().map(CoinUi::from).collect();
                self.state = CoinListState::Loaded(LoadedCoins { coins, selected });
                self.emit_state();
            }
            Err(FetchError::Network(e)) => {
                warn!(error = ?e, "loading coins failed");
                self.state = CoinListState::Error(e);
                self.emit_state();
                self.emit(StoreEvent::Error(e));
            }
            Err(FetchError::Cancelled) => {
                debug!("coin load cancelled");
                self.state = previous;
                self.emit_state();
            }
        }
    }

    fn select_coin(&mut self, coin: CoinUi) {
        let CoinListState::Loaded(loaded) = &mut self.state else {
            warn!(coin = %coin.id, "coin selected before the list loaded; ignoring");
            return;
        };
        let previous = loaded.selected.replace(coin.clone());
        self.emit_state();

        let (start, end) = history_window((self.clock)());
        match self.source.get_coin_history(&coin.id, start, end, &self.cancel) {
            Ok(history) => {
                let points = history_to_data_points(&history, &self.label_offset);
                debug!(coin = %coin.id, points = points.len(), "price history loaded");
                if let CoinListState::Loaded(LoadedCoins { selected: Some(sel), .. }) = &mut self.state {
                    if sel.id == coin.id {
                        sel.price_history = points;
                        self.emit_state();
                    }
                }
            }
            Err(FetchError::Network(e)) => {
                warn!(coin = %coin.id, error = ?e, "loading price history failed");
                self.emit(StoreEvent::Error(e));
            }
            Err(FetchError::Cancelled) => {
                debug!(coin = %coin.id, "price history load cancelled");
                if let CoinListState::Loaded(loaded) = &mut self.state {
                    loaded.selected = previous;
                }
                self.emit_state();
            }
        }
    }

    fn emit_state(&mut self) {
        let event = StoreEvent::StateChanged(self.state.clone());
        self.emit(event);
    }

    fn emit(&mut self, event: StoreEvent) {
        for (_, f) in self.subscribers.iter_mut() {
            f(&event);
        }
    }
}
