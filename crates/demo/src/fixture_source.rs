// File: crates/demo/src/fixture_source.rs
// Summary: Transport that serves recorded API payloads from a directory, for offline runs of the remote source.
// Layout: <root>/assets.json, <root>/assets/<coin id>/history.json

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use coinchart_state::{NetworkError, Response, Transport};
use tracing::debug;

pub struct FixtureTransport {
    root: PathBuf,
}

impl FixtureTransport {
    pub fn open(root: &Path) -> Result<Self> {
        let assets = root.join("assets.json");
        anyhow::ensure!(assets.is_file(), "{} has no assets.json", root.display());
        Ok(Self { root: root.to_path_buf() })
    }

    fn file_for(&self, path: &str) -> Option<PathBuf> {
        let parts: Vec<&str> = path.trim_matches('/').split('/').collect();
        if parts.iter().any(|p| p.is_empty() || *p == "." || *p == "..") {
            return None;
        }
        match parts.as_slice() {
            ["assets"] => Some(self.root.join("assets.json")),
            ["assets", id, "history"] => Some(self.root.join("assets").join(id).join("history.json")),
            _ => None,
        }
    }
}

impl Transport for FixtureTransport {
    /// Query parameters are ignored; recorded payloads are served whole.
    fn get(&self, path: &str, _params: &[(&str, String)]) -> Result<Response, NetworkError> {
        let Some(file) = self.file_for(path) else {
            return Ok(Response { status: 404, body: String::new() });
        };
        match std::fs::read_to_string(&file) {
            Ok(body) => {
                debug!(file = %file.display(), "serving fixture");
                Ok(Response::ok(body))
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(Response { status: 404, body: String::new() }),
            Err(_) => Err(NetworkError::Unknown),
        }
    }
}

/// Newest sample time in a recorded history payload, used as the store clock.
pub fn latest_in(root: &Path, coin_id: &str) -> Result<Option<chrono::DateTime<chrono::Utc>>> {
    let file = root.join("assets").join(coin_id).join("history.json");
    if !file.is_file() {
        return Ok(None);
    }
    let text = std::fs::read_to_string(&file).with_context(|| format!("reading {}", file.display()))?;
    let history = coinchart_state::dto::parse_history(&text).with_context(|| format!("parsing {}", file.display()))?;
    Ok(history.iter().map(|p| p.date_time).max())
}

#[cfg(test)]
mod tests {
    use super::*;
    use coinchart_state::{CancellationToken, CoinDataSource, FetchError, RemoteCoinDataSource};

    fn fixtures() -> PathBuf {
        Path::new(env!("CARGO_MANIFEST_DIR")).join("data/api")
    }

    #[test]
    fn serves_recorded_assets_and_history() {
        let source = RemoteCoinDataSource::new(FixtureTransport::open(&fixtures()).expect("fixtures"));
        let cancel = CancellationToken::new();
        let coins = source.get_coins(&cancel).expect("coins");
        assert_eq!(coins[0].id, "bitcoin");

        let end = latest_in(&fixtures(), "bitcoin").expect("read").expect("has samples");
        let history = source.get_coin_history("bitcoin", end - chrono::Duration::days(5), end, &cancel).expect("history");
        assert_eq!(history.len(), 8);
    }

    #[test]
    fn unknown_coin_is_not_found() {
        let source = RemoteCoinDataSource::new(FixtureTransport::open(&fixtures()).expect("fixtures"));
        let end = chrono::Utc::now();
        let got = source.get_coin_history("dogecoin", end, end, &CancellationToken::new());
        assert_eq!(got, Err(FetchError::Network(NetworkError::Unknown)));
    }

    #[test]
    fn traversal_paths_are_rejected() {
        let transport = FixtureTransport::open(&fixtures()).expect("fixtures");
        let res = transport.get("/assets/../../Cargo.toml/history", &[]).expect("response");
        assert_eq!(res.status, 404);
    }
}
