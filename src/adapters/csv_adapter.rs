//! CSV fundamentals adapter.
//!
//! Loads one row of financial figures per ticker from a CSV file with the
//! header `ticker,current_price,shares_outstanding,operating_cash_flow,capex,
//! net_income,shareholders_equity,operating_income,invested_capital,growth_rate`.
//! The last three columns may be left empty.

use crate::domain::error::IntrinsicError;
use crate::domain::financials::FinancialInputs;
use crate::ports::metrics_port::MetricsPort;
use serde::Deserialize;
use std::collections::HashMap;
use std::fs::File;
use std::io::Read;
use std::path::Path;

#[derive(Debug, Deserialize)]
struct MetricsRecord {
    ticker: String,
    current_price: f64,
    shares_outstanding: f64,
    operating_cash_flow: f64,
    capex: f64,
    net_income: f64,
    shareholders_equity: f64,
    #[serde(default)]
    operating_income: Option<f64>,
    #[serde(default)]
    invested_capital: Option<f64>,
    #[serde(default)]
    growth_rate: Option<f64>,
}

impl From<MetricsRecord> for FinancialInputs {
    fn from(r: MetricsRecord) -> Self {
        FinancialInputs {
            ticker: r.ticker.trim().to_uppercase(),
            current_price: r.current_price,
            shares_outstanding: r.shares_outstanding,
            operating_cash_flow: r.operating_cash_flow,
            // providers report capex as a signed outflow
            capex: r.capex.abs(),
            net_income: r.net_income,
            shareholders_equity: r.shareholders_equity,
            operating_income: r.operating_income,
            invested_capital: r.invested_capital,
            growth_rate: r.growth_rate,
        }
    }
}

pub struct CsvMetricsAdapter {
    rows: HashMap<String, FinancialInputs>,
}

impl CsvMetricsAdapter {
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, IntrinsicError> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|e| IntrinsicError::DataSource {
            reason: format!("failed to read {}: {}", path.display(), e),
        })?;
        Self::from_reader(file)
    }

    /// Parses every row up front. Malformed rows are logged and skipped.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self, IntrinsicError> {
        let mut rdr = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .flexible(true)
            .from_reader(reader);
        let mut rows = HashMap::new();

        for (idx, result) in rdr.deserialize::<MetricsRecord>().enumerate() {
            // header is line 1
            let line = idx + 2;
            let record = match result {
                Ok(r) => r,
                Err(e) => {
                    tracing::warn!("skipping fundamentals row {}: {}", line, e);
                    continue;
                }
            };
            if record.capex < 0.0 {
                tracing::debug!(
                    "{}: negative capex {} taken as outflow",
                    record.ticker,
                    record.capex
                );
            }
            let inputs = FinancialInputs::from(record);
            if inputs.ticker.is_empty() {
                tracing::warn!("skipping fundamentals row {}: empty ticker", line);
                continue;
            }
            if rows.contains_key(&inputs.ticker) {
                tracing::warn!(
                    "duplicate fundamentals for {} on row {}, keeping the first",
                    inputs.ticker,
                    line
                );
                continue;
            }
            rows.insert(inputs.ticker.clone(), inputs);
        }

        tracing::debug!("loaded fundamentals for {} tickers", rows.len());
        Ok(Self { rows })
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

}

impl MetricsPort for CsvMetricsAdapter {
    fn get_metrics(&self, ticker: &str) -> Result<Option<FinancialInputs>, IntrinsicError> {
        Ok(self.rows.get(&ticker.trim().to_uppercase()).cloned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    const HEADER: &str = "ticker,current_price,shares_outstanding,operating_cash_flow,capex,\
net_income,shareholders_equity,operating_income,invested_capital,growth_rate\n";

    fn adapter(body: &str) -> CsvMetricsAdapter {
        let content = format!("{HEADER}{body}");
        CsvMetricsAdapter::from_reader(content.as_bytes()).unwrap()
    }

    #[test]
    fn get_metrics_returns_row() {
        let a = adapter("KO,60.0,4300,11000,1500,9500,26000,,,\n");
        let m = a.get_metrics("KO").unwrap().unwrap();
        assert_eq!(m.ticker, "KO");
        assert_eq!(m.current_price, 60.0);
        assert_eq!(m.shares_outstanding, 4300.0);
        assert_eq!(m.capex, 1500.0);
        assert_eq!(m.operating_income, None);
        assert_eq!(m.growth_rate, None);
    }

    #[test]
    fn optional_columns_are_parsed() {
        let a = adapter("V,250,2000,20000,1000,17000,38000,23000,45000,0.06\n");
        let m = a.get_metrics("V").unwrap().unwrap();
        assert_eq!(m.operating_income, Some(23000.0));
        assert_eq!(m.invested_capital, Some(45000.0));
        assert_eq!(m.growth_rate, Some(0.06));
    }

    #[test]
    fn lookup_is_case_insensitive() {
        let a = adapter("aapl,190,15500,110000,11000,97000,62000,,,\n");
        assert!(a.get_metrics("AAPL").unwrap().is_some());
        assert!(a.get_metrics("aapl").unwrap().is_some());
    }

    #[test]
    fn unknown_ticker_is_none() {
        let a = adapter("KO,60.0,4300,11000,1500,9500,26000,,,\n");
        assert_eq!(a.get_metrics("PEP").unwrap(), None);
    }

    #[test]
    fn negative_capex_is_made_positive() {
        let a = adapter("KO,60.0,4300,11000,-1500,9500,26000,,,\n");
        assert_eq!(a.get_metrics("KO").unwrap().unwrap().capex, 1500.0);
    }

    #[test]
    fn malformed_rows_are_skipped() {
        let a = adapter(
            "KO,sixty,4300,11000,1500,9500,26000,,,\n\
             PEP,170,1370,13000,5000,9000,18000,,,\n",
        );
        assert_eq!(a.len(), 1);
        assert_eq!(a.get_metrics("KO").unwrap(), None);
        assert!(a.get_metrics("PEP").unwrap().is_some());
    }

    #[test]
    fn duplicate_rows_keep_first() {
        let a = adapter(
            "KO,60,4300,11000,1500,9500,26000,,,\n\
             KO,99,4300,11000,1500,9500,26000,,,\n",
        );
        assert_eq!(a.get_metrics("KO").unwrap().unwrap().current_price, 60.0);
    }

    #[test]
    fn from_path_reads_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("fundamentals.csv");
        fs::write(&path, format!("{HEADER}KO,60.0,4300,11000,1500,9500,26000,,,\n")).unwrap();

        let a = CsvMetricsAdapter::from_path(&path).unwrap();
        assert!(!a.is_empty());
    }

    #[test]
    fn from_path_missing_file_is_data_source_error() {
        let result = CsvMetricsAdapter::from_path("/nonexistent/fundamentals.csv");
        assert!(matches!(result, Err(IntrinsicError::DataSource { .. })));
    }
}
