// File: crates/coinchart-state/tests/store.rs
// Purpose: Drive the coin list state machine against a scripted data source.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use chrono::{DateTime, Duration, TimeZone, Utc};
use coinchart_state::{
    CancellationToken, Coin, CoinDataSource, CoinListState, CoinListStore, CoinPrice, CoinUi, Command, FetchError,
    NetworkError, StoreEvent,
};

#[derive(Clone, Default)]
struct FakeSource {
    coins: Option<Result<Vec<Coin>, FetchError>>,
    history: Option<Result<Vec<CoinPrice>, FetchError>>,
    history_calls: Rc<RefCell<Vec<(String, DateTime<Utc>, DateTime<Utc>)>>>,
    /// When set, the next fetch cancels the store's token mid-flight.
    cancel_in_coins: Rc<Cell<bool>>,
    cancel_in_history: Rc<Cell<bool>>,
}

impl CoinDataSource for FakeSource {
    fn get_coins(&self, cancel: &CancellationToken) -> Result<Vec<Coin>, FetchError> {
        cancel.check()?;
        if self.cancel_in_coins.take() {
            cancel.cancel();
            return Err(FetchError::Cancelled);
        }
        self.coins.clone().unwrap_or(Err(FetchError::Network(NetworkError::Unknown)))
    }

    fn get_coin_history(
        &self,
        coin_id: &str,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
        cancel: &CancellationToken,
    ) -> Result<Vec<CoinPrice>, FetchError> {
        cancel.check()?;
        self.history_calls.borrow_mut().push((coin_id.to_string(), start, end));
        if self.cancel_in_history.take() {
            cancel.cancel();
            return Err(FetchError::Cancelled);
        }
        self.history.clone().unwrap_or(Ok(Vec::new()))
    }
}

fn now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 10, 14, 12, 0, 0).single().expect("valid time")
}

fn coin(id: &str, rank: u32) -> Coin {
    Coin {
        id: id.into(),
        rank,
        name: id.to_uppercase(),
        symbol: id[..3].to_uppercase(),
        market_cap_usd: 1.0e9,
        price_usd: 100.0,
        change_percent_24hr: 0.5,
    }
}

fn record<S: CoinDataSource>(store: &mut CoinListStore<S>) -> Rc<RefCell<Vec<StoreEvent>>> {
    let events = Rc::new(RefCell::new(Vec::new()));
    let sink = events.clone();
    store.subscribe(move |e| sink.borrow_mut().push(e.clone()));
    events
}

#[test]
fn load_transitions_through_loading_to_loaded() {
    let source = FakeSource { coins: Some(Ok(vec![coin("bitcoin", 1), coin("ethereum", 2)])), ..Default::default() };
    let mut store = CoinListStore::new(source);
    assert_eq!(store.state(), &CoinListState::Idle);
    let events = record(&mut store);

    store.dispatch(Command::LoadCoins);

    let events = events.borrow();
    assert_eq!(events.len(), 2);
    assert_eq!(events[0], StoreEvent::StateChanged(CoinListState::Loading));
    let loaded = store.state().loaded().expect("loaded");
    assert_eq!(loaded.coins.len(), 2);
    assert_eq!(loaded.coins[0].price_usd.formatted, "100.00");
    assert!(loaded.selected.is_none());
    assert!(!store.state().is_loading());
}

#[test]
fn failed_load_ends_in_error_not_loading() {
    let source = FakeSource { coins: Some(Err(NetworkError::NoInternet.into())), ..Default::default() };
    let mut store = CoinListStore::new(source);
    let events = record(&mut store);

    store.dispatch(Command::LoadCoins);

    assert_eq!(store.state(), &CoinListState::Error(NetworkError::NoInternet));
    assert!(!store.state().is_loading());
    assert_eq!(events.borrow().last(), Some(&StoreEvent::Error(NetworkError::NoInternet)));
}

#[test]
fn selecting_coin_fetches_five_day_history() {
    let t0 = now() - Duration::hours(6);
    let history = vec![
        CoinPrice { price_usd: 101.0, date_time: now() },
        CoinPrice { price_usd: 99.0, date_time: t0 },
    ];
    let source = FakeSource {
        coins: Some(Ok(vec![coin("bitcoin", 1)])),
        history: Some(Ok(history)),
        ..Default::default()
    };
    let calls = source.history_calls.clone();
    let mut store = CoinListStore::new(source).with_clock(now);
    store.dispatch(Command::LoadCoins);

    let btc: CoinUi = store.state().loaded().expect("loaded").coins[0].clone();
    store.dispatch(Command::SelectCoin(btc));

    let calls = calls.borrow();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].0, "bitcoin");
    assert_eq!(calls[0].2 - calls[0].1, Duration::days(5));

    let selected = store.state().loaded().and_then(|l| l.selected.as_ref()).expect("selected");
    let ys: Vec<f64> = selected.price_history.iter().map(|p| p.y).collect();
    assert_eq!(ys, vec![99.0, 101.0]);
    assert_eq!(selected.price_history[0].label, "6AM\n10/14");
}

#[test]
fn history_failure_emits_event_and_keeps_selection() {
    let source = FakeSource {
        coins: Some(Ok(vec![coin("bitcoin", 1)])),
        history: Some(Err(NetworkError::TooManyRequests.into())),
        ..Default::default()
    };
    let mut store = CoinListStore::new(source).with_clock(now);
    store.dispatch(Command::LoadCoins);
    let events = record(&mut store);

    let btc = store.state().loaded().expect("loaded").coins[0].clone();
    store.dispatch(Command::SelectCoin(btc.clone()));

    assert_eq!(store.state().loaded().and_then(|l| l.selected.clone()), Some(btc));
    assert_eq!(events.borrow().last(), Some(&StoreEvent::Error(NetworkError::TooManyRequests)));
}

#[test]
fn select_before_load_is_ignored() {
    let mut store = CoinListStore::new(FakeSource::default());
    let events = record(&mut store);
    store.dispatch(Command::SelectCoin(coin("bitcoin", 1).into()));
    assert_eq!(store.state(), &CoinListState::Idle);
    assert!(events.borrow().is_empty());
}

#[test]
fn cancelled_store_drops_commands() {
    let source = FakeSource { coins: Some(Ok(vec![coin("bitcoin", 1)])), ..Default::default() };
    let mut store = CoinListStore::new(source);
    let events = record(&mut store);
    store.cancellation_token().cancel();

    store.dispatch(Command::LoadCoins);

    assert_eq!(store.state(), &CoinListState::Idle);
    assert!(events.borrow().is_empty());
}

#[test]
fn unsubscribed_callbacks_stop_receiving() {
    let source = FakeSource { coins: Some(Ok(vec![coin("bitcoin", 1)])), ..Default::default() };
    let mut store = CoinListStore::new(source);
    let count = Rc::new(RefCell::new(0usize));
    let c = count.clone();
    let id = store.subscribe(move |_| *c.borrow_mut() += 1);

    store.dispatch(Command::LoadCoins);
    let after_first = *count.borrow();
    assert!(store.unsubscribe(id));
    assert!(!store.unsubscribe(id));
    store.dispatch(Command::LoadCoins);

    assert_eq!(after_first, 2);
    assert_eq!(*count.borrow(), 2);
}

#[test]
fn reload_keeps_selection_still_listed() {
    let source = FakeSource { coins: Some(Ok(vec![coin("bitcoin", 1), coin("ethereum", 2)])), ..Default::default() };
    let mut store = CoinListStore::new(source).with_clock(now);
    store.dispatch(Command::LoadCoins);
    let eth = store.state().loaded().expect("loaded").coins[1].clone();
    store.dispatch(Command::SelectCoin(eth));

    store.dispatch(Command::LoadCoins);

    let selected = store.state().loaded().and_then(|l| l.selected.as_ref()).map(|c| c.id.clone());
    assert_eq!(selected.as_deref(), Some("ethereum"));
}

#[test]
fn coin_load_cancelled_mid_fetch_restores_previous_state() {
    let source = FakeSource { coins: Some(Ok(vec![coin("bitcoin", 1)])), ..Default::default() };
    let arm = source.cancel_in_coins.clone();
    let mut store = CoinListStore::new(source).with_clock(now);
    store.dispatch(Command::LoadCoins);
    let previous = store.state().clone();
    let events = record(&mut store);

    arm.set(true);
    store.dispatch(Command::LoadCoins);

    assert_eq!(store.state(), &previous);
    let events = events.borrow();
    assert!(!events.iter().any(|e| matches!(e, StoreEvent::Error(_))));
    assert_eq!(events.last(), Some(&StoreEvent::StateChanged(previous.clone())));
    assert!(store.cancellation_token().is_cancelled());
}

#[test]
fn first_load_cancelled_mid_fetch_returns_to_idle() {
    let source = FakeSource { coins: Some(Ok(vec![coin("bitcoin", 1)])), ..Default::default() };
    source.cancel_in_coins.set(true);
    let mut store = CoinListStore::new(source);
    let events = record(&mut store);

    store.dispatch(Command::LoadCoins);

    assert_eq!(store.state(), &CoinListState::Idle);
    assert_eq!(
        *events.borrow(),
        vec![StoreEvent::StateChanged(CoinListState::Loading), StoreEvent::StateChanged(CoinListState::Idle)]
    );
}

#[test]
fn history_cancelled_mid_fetch_restores_previous_selection() {
    let source = FakeSource {
        coins: Some(Ok(vec![coin("bitcoin", 1), coin("ethereum", 2)])),
        history: Some(Ok(vec![CoinPrice { price_usd: 101.0, date_time: now() }])),
        ..Default::default()
    };
    let arm = source.cancel_in_history.clone();
    let mut store = CoinListStore::new(source).with_clock(now);
    store.dispatch(Command::LoadCoins);
    let coins = store.state().loaded().expect("loaded").coins.clone();
    store.dispatch(Command::SelectCoin(coins[0].clone()));
    let previous = store.state().clone();
    let events = record(&mut store);

    arm.set(true);
    store.dispatch(Command::SelectCoin(coins[1].clone()));

    assert_eq!(store.state(), &previous);
    let selected = store.state().loaded().and_then(|l| l.selected.as_ref()).map(|c| c.id.clone());
    assert_eq!(selected.as_deref(), Some("bitcoin"));
    let events = events.borrow();
    assert!(!events.iter().any(|e| matches!(e, StoreEvent::Error(_))));
    assert_eq!(events.last(), Some(&StoreEvent::StateChanged(previous.clone())));
}

#[test]
fn history_cancelled_on_first_selection_clears_it() {
    let source = FakeSource { coins: Some(Ok(vec![coin("bitcoin", 1)])), ..Default::default() };
    source.cancel_in_history.set(true);
    let mut store = CoinListStore::new(source).with_clock(now);
    store.dispatch(Command::LoadCoins);

    let btc = store.state().loaded().expect("loaded").coins[0].clone();
    store.dispatch(Command::SelectCoin(btc));

    assert_eq!(store.state().loaded().map(|l| l.selected.is_none()), Some(true));
}
