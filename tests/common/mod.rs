#![allow(dead_code)]

use intrinsic::domain::error::IntrinsicError;
pub use intrinsic::domain::financials::FinancialInputs;
use intrinsic::ports::metrics_port::MetricsPort;
use std::collections::HashMap;

pub struct MockMetricsPort {
    pub data: HashMap<String, FinancialInputs>,
    pub errors: HashMap<String, String>,
}

impl MockMetricsPort {
    pub fn new() -> Self {
        Self {
            data: HashMap::new(),
            errors: HashMap::new(),
        }
    }

    pub fn with_inputs(mut self, inputs: FinancialInputs) -> Self {
        self.data.insert(inputs.ticker.clone(), inputs);
        self
    }

    pub fn with_error(mut self, ticker: &str, reason: &str) -> Self {
        self.errors.insert(ticker.to_string(), reason.to_string());
        self
    }
}

impl MetricsPort for MockMetricsPort {
    fn get_metrics(&self, ticker: &str) -> Result<Option<FinancialInputs>, IntrinsicError> {
        if let Some(reason) = self.errors.get(ticker) {
            return Err(IntrinsicError::DataSource {
                reason: reason.clone(),
            });
        }
        Ok(self.data.get(ticker).cloned())
    }
}

/// Inputs with only the required figures set.
pub fn make_inputs(
    ticker: &str,
    price: f64,
    shares: f64,
    operating_cash_flow: f64,
    capex: f64,
    net_income: f64,
    equity: f64,
) -> FinancialInputs {
    FinancialInputs {
        ticker: ticker.to_string(),
        current_price: price,
        shares_outstanding: shares,
        operating_cash_flow,
        capex,
        net_income,
        shareholders_equity: equity,
        operating_income: None,
        invested_capital: None,
        growth_rate: None,
    }
}

/// Steady compounder: ROE around 36%, FCF yield under 4%.
pub fn quality_inputs(ticker: &str) -> FinancialInputs {
    make_inputs(ticker, 60.0, 4_300.0, 11_000.0, 1_500.0, 9_500.0, 26_000.0)
}

/// 20% FCF yield on a 5% ROE.
pub fn trap_inputs(ticker: &str) -> FinancialInputs {
    make_inputs(ticker, 10.0, 100.0, 300.0, 100.0, 50.0, 1_000.0)
}

/// Cheap mid-quality business trading well below value.
pub fn bargain_inputs(ticker: &str) -> FinancialInputs {
    make_inputs(ticker, 20.0, 1_000.0, 2_500.0, 600.0, 1_500.0, 10_000.0)
}

pub const FUNDAMENTALS_HEADER: &str = "ticker,current_price,shares_outstanding,\
operating_cash_flow,capex,net_income,shareholders_equity,operating_income,\
invested_capital,growth_rate";

pub fn inputs_csv_line(i: &FinancialInputs) -> String {
    let opt = |v: Option<f64>| v.map(|x| x.to_string()).unwrap_or_default();
    format!(
        "{},{},{},{},{},{},{},{},{},{}",
        i.ticker,
        i.current_price,
        i.shares_outstanding,
        i.operating_cash_flow,
        i.capex,
        i.net_income,
        i.shareholders_equity,
        opt(i.operating_income),
        opt(i.invested_capital),
        opt(i.growth_rate)
    )
}

pub fn fundamentals_csv(rows: &[FinancialInputs]) -> String {
    let mut out = String::from(FUNDAMENTALS_HEADER);
    out.push('\n');
    for r in rows {
        out.push_str(&inputs_csv_line(r));
        out.push('\n');
    }
    out
}
