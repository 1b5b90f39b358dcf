//! Ticker universe parsing.
//!
//! Parses ticker lists from configuration or the command line. Sourcing of
//! larger universes (index constituents, cached lists) is left to callers;
//! this module only normalizes what it is given.

use std::collections::HashSet;

/// Analyzed when no tickers are configured.
pub const DEFAULT_UNIVERSE: &[&str] = &[
    "AAPL", "MSFT", "GOOGL", "AMZN", "TSLA", "JNJ", "V", "WMT", "JPM", "MA", "PG", "UNH", "HD",
    "DIS", "NFLX", "NVDA", "META", "PYPL", "INTC", "AMD", "BA", "IBM", "T", "VZ", "KO", "PEP",
    "MCD", "NKE", "SBUX", "ABT",
];

#[derive(Debug, Clone, thiserror::Error)]
pub enum UniverseError {
    #[error("empty token in ticker list")]
    EmptyToken,

    #[error("duplicate ticker: {0}")]
    DuplicateTicker(String),
}

pub fn parse_tickers(input: &str) -> Result<Vec<String>, UniverseError> {
    let mut tickers = Vec::new();
    let mut seen = HashSet::new();

    for token in input.split(',') {
        let trimmed = token.trim();
        if trimmed.is_empty() {
            return Err(UniverseError::EmptyToken);
        }
        let ticker = trimmed.to_uppercase();
        if !seen.insert(ticker.clone()) {
            return Err(UniverseError::DuplicateTicker(ticker));
        }
        tickers.push(ticker);
    }

    Ok(tickers)
}

/// Upper-cases and drops repeats, keeping first occurrences in order. For
/// merging universes where overlap is expected.
pub fn dedup_tickers<I, S>(tickers: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut seen = HashSet::new();
    tickers
        .into_iter()
        .map(|t| t.as_ref().trim().to_uppercase())
        .filter(|t| !t.is_empty() && seen.insert(t.clone()))
        .collect()
}

pub fn default_universe() -> Vec<String> {
    DEFAULT_UNIVERSE.iter().map(|t| t.to_string()).collect()
}

/// Keeps the first `limit` tickers when a limit is given.
pub fn apply_limit(mut tickers: Vec<String>, limit: Option<usize>) -> Vec<String> {
    if let Some(limit) = limit {
        tickers.truncate(limit);
    }
    tickers
}
