// File: crates/demo/src/main.rs
// Summary: Demo loads price history through the coin list store and renders line charts to PNGs.
// Usage: coinchart-demo <prices.csv | api fixture dir> [style.json] [theme]

mod csv_source;
mod fixture_source;

use std::cell::RefCell;
use std::path::{Path, PathBuf};
use std::rc::Rc;

use anyhow::{Context, Result};
use coinchart_core::{theme, ChartStyle, DataPoint, LineChart, RenderOptions};
use chrono::{DateTime, Utc};
use coinchart_state::{CoinDataSource, CoinListStore, Command, RemoteCoinDataSource, StoreEvent};
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::csv_source::CsvCoinSource;
use crate::fixture_source::{latest_in, FixtureTransport};

/// Points shown in the zoomed, selected chart.
const WINDOW: usize = 12;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let mut args = std::env::args().skip(1);
    let raw = args.next().unwrap_or_else(|| "crates/demo/data/bitcoin_prices.csv".to_string());
    let style = match args.next() {
        Some(p) => load_style(Path::new(&p))?,
        None => ChartStyle::default(),
    };
    let theme = theme::find(&args.next().unwrap_or_else(|| "light".to_string()));

    let path = PathBuf::from(&raw);
    let points = if path.is_dir() {
        let transport = FixtureTransport::open(&path)?;
        // Recorded payloads are old; anchor the window on the newest bitcoin sample when present.
        let latest = latest_in(&path, "bitcoin")?.unwrap_or_else(Utc::now);
        info!(input = %path.display(), %latest, "using recorded api payloads");
        load_selected_history(RemoteCoinDataSource::new(transport), latest)?
    } else {
        let source = CsvCoinSource::open(&path)?;
        let latest = source.latest();
        info!(input = %path.display(), %latest, "using input file");
        load_selected_history(source, latest)?
    };

    let opts = RenderOptions { theme, ..RenderOptions::default() };
    let n = points.len();

    // 1) Full history, width grown so every label gets its slot
    let full_style = style.clone().with_size(style.width.max(n as f32 * 64.0), style.height);
    let full = LineChart::new(points.clone(), full_style);
    let out_full = out_name_with(&path, "history");
    full.render_to_png(&opts, &out_full)?;
    info!(output = %out_full.display(), "wrote chart");

    // 2) Last WINDOW points with the middle one selected
    let start = n.saturating_sub(WINDOW);
    let windowed = LineChart::new(points, style)
        .with_visible(start..n)
        .with_selected(Some(start + (n - start) / 2));
    let out_sel = out_name_with(&path, "selected");
    windowed.render_to_png(&opts, &out_sel)?;
    info!(output = %out_sel.display(), "wrote chart");

    Ok(())
}

/// Load the coin list, select the top coin and return its chart points.
fn load_selected_history<S: CoinDataSource>(source: S, latest: DateTime<Utc>) -> Result<Vec<DataPoint>> {
    let mut store = CoinListStore::new(source).with_clock(move || latest);
    let last_error = Rc::new(RefCell::new(None));
    let sink = last_error.clone();
    store.subscribe(move |e| {
        if let StoreEvent::Error(err) = e {
            *sink.borrow_mut() = Some(*err);
        }
    });

    store.dispatch(Command::LoadCoins);
    let coin = store
        .state()
        .loaded()
        .and_then(|l| l.coins.first().cloned())
        .with_context(|| format!("loading coins failed: {:?}", last_error.borrow()))?;
    store.dispatch(Command::SelectCoin(coin));

    let selected = store
        .state()
        .loaded()
        .and_then(|l| l.selected.clone())
        .context("coin selection was dropped")?;
    if let Some(err) = *last_error.borrow() {
        anyhow::bail!("loading price history failed: {err}");
    }
    let points = selected.price_history;
    anyhow::ensure!(!points.is_empty(), "no prices within the 5-day window ending {latest}");
    info!(coin = %selected.id, price = %selected.price_usd.formatted, points = points.len(), "price history ready");
    Ok(points)
}

fn load_style(path: &Path) -> Result<ChartStyle> {
    let text = std::fs::read_to_string(path).with_context(|| format!("reading style {}", path.display()))?;
    let style: ChartStyle = serde_json::from_str(&text).with_context(|| format!("parsing style {}", path.display()))?;
    style.validate()?;
    Ok(style)
}

/// Produce output file name like target/out/chart_<stem>_<suffix>.png
fn out_name_with(input: &Path, suffix: &str) -> PathBuf {
    let stem = input.file_stem().and_then(|s| s.to_str()).unwrap_or("chart");
    let short = stem.split('_').take(3).collect::<Vec<_>>().join("_");
    let mut out = PathBuf::from("target/out");
    if short.is_empty() {
        out.push(format!("chart_{}.png", suffix));
    } else {
        out.push(format!("chart_{}_{}.png", short, suffix));
    }
    out
}
