//! Sector growth profiles keyed by ticker symbol.
//!
//! The table is a curated list of literal tickers, not an industry
//! classification: anything outside it falls back to [`DEFAULT_GROWTH_RATE`]
//! under the [`UNKNOWN_SECTOR`] label.

use std::collections::HashMap;

pub const DEFAULT_GROWTH_RATE: f64 = 0.04;
pub const UNKNOWN_SECTOR: &str = "UNKNOWN";

#[derive(Debug, Clone, PartialEq)]
pub struct SectorProfile {
    pub name: &'static str,
    pub tickers: &'static [&'static str],
    pub base_growth_rate: f64,
    pub min_roe_threshold: f64,
    pub description: &'static str,
}

const BUILTIN_PROFILES: &[SectorProfile] = &[
    SectorProfile {
        name: "TELECOM",
        tickers: &["T", "VZ", "VOX"],
        base_growth_rate: 0.02,
        min_roe_threshold: 0.10,
        description: "Telecom - mature, regulated, declining",
    },
    SectorProfile {
        name: "UTILITIES",
        tickers: &["NEE", "DUK", "SO"],
        base_growth_rate: 0.025,
        min_roe_threshold: 0.08,
        description: "Utilities - stable, regulated, low growth",
    },
    SectorProfile {
        name: "TECH_LARGE",
        tickers: &["AAPL", "MSFT", "GOOGL", "NVDA"],
        base_growth_rate: 0.08,
        min_roe_threshold: 0.15,
        description: "Tech giants - strong moats, but mature valuations",
    },
    SectorProfile {
        name: "NETWORK",
        tickers: &["V", "MA"],
        base_growth_rate: 0.12,
        min_roe_threshold: 0.40,
        description: "Network processors - high moat, pricing power, minimal capex",
    },
    SectorProfile {
        name: "FINTECH",
        tickers: &["PYPL"],
        base_growth_rate: 0.10,
        min_roe_threshold: 0.20,
        description: "Fintech - network effects, but more competitive",
    },
    SectorProfile {
        name: "CONSUMER",
        tickers: &["PG", "KO", "PEP", "WMT", "MCD"],
        base_growth_rate: 0.03,
        min_roe_threshold: 0.12,
        description: "Consumer staples - mature, limited growth",
    },
    SectorProfile {
        name: "HEALTHCARE",
        tickers: &["JNJ", "UNH", "ABT"],
        base_growth_rate: 0.05,
        min_roe_threshold: 0.12,
        description: "Healthcare - regulatory headwinds, slower growth",
    },
    SectorProfile {
        name: "RETAIL",
        tickers: &["HD", "MCD", "SBUX"],
        base_growth_rate: 0.03,
        min_roe_threshold: 0.15,
        description: "Retail/Discretionary - mature, saturated",
    },
    SectorProfile {
        name: "INDUSTRIALS",
        tickers: &["BA", "IBM"],
        base_growth_rate: 0.03,
        min_roe_threshold: 0.10,
        description: "Industrials - cyclical, tied to economy",
    },
    SectorProfile {
        name: "MEDIA",
        tickers: &["DIS", "NFLX"],
        base_growth_rate: 0.04,
        min_roe_threshold: 0.12,
        description: "Media/Entertainment - secular headwinds",
    },
    SectorProfile {
        name: "SOCIAL_MEDIA",
        tickers: &["META"],
        base_growth_rate: 0.12,
        min_roe_threshold: 0.15,
        description: "Social Media - AI growth opportunity but uncertainty",
    },
];

/// Immutable ticker-to-profile lookup. Build once and share by reference.
#[derive(Debug, Clone)]
pub struct SectorTable {
    profiles: Vec<SectorProfile>,
    by_ticker: HashMap<&'static str, usize>,
}

impl SectorTable {
    pub fn new(profiles: Vec<SectorProfile>) -> Self {
        let mut by_ticker = HashMap::new();
        for (idx, profile) in profiles.iter().enumerate() {
            for &ticker in profile.tickers {
                // earlier profiles win for tickers listed twice
                by_ticker.entry(ticker).or_insert(idx);
            }
        }
        Self {
            profiles,
            by_ticker,
        }
    }

    pub fn builtin() -> Self {
        Self::new(BUILTIN_PROFILES.to_vec())
    }

    pub fn profiles(&self) -> &[SectorProfile] {
        &self.profiles
    }

    pub fn lookup(&self, ticker: &str) -> Option<&SectorProfile> {
        let upper = ticker.trim().to_uppercase();
        self.by_ticker
            .get(upper.as_str())
            .map(|&idx| &self.profiles[idx])
    }

    /// Base growth rate and sector label for `ticker`.
    pub fn growth_rate(&self, ticker: &str) -> (f64, &'static str) {
        match self.lookup(ticker) {
            Some(profile) => (profile.base_growth_rate, profile.name),
            None => (DEFAULT_GROWTH_RATE, UNKNOWN_SECTOR),
        }
    }
}

impl Default for SectorTable {
    fn default() -> Self {
        Self::builtin()
    }
}
