//! Per-ticker financial inputs supplied by a metrics provider.

/// Raw figures for one company, as returned by a [`MetricsPort`].
///
/// [`MetricsPort`]: crate::ports::metrics_port::MetricsPort
#[derive(Debug, Clone, PartialEq)]
pub struct FinancialInputs {
    pub ticker: String,
    pub current_price: f64,
    pub shares_outstanding: f64,
    pub operating_cash_flow: f64,
    pub capex: f64,
    pub net_income: f64,
    pub shareholders_equity: f64,
    pub operating_income: Option<f64>,
    pub invested_capital: Option<f64>,
    /// Provider-estimated growth rate; overrides the sector default when set.
    pub growth_rate: Option<f64>,
}

impl FinancialInputs {
    /// Returns the name of the first required field that makes these inputs
    /// unusable, or `None` if the ticker can be analyzed.
    ///
    /// Price, shares, operating cash flow, net income and equity must be
    /// strictly positive. Capex may be zero but not negative. NaN fails
    /// every check.
    pub fn first_invalid_field(&self) -> Option<&'static str> {
        let positive = [
            ("current_price", self.current_price),
            ("shares_outstanding", self.shares_outstanding),
            ("operating_cash_flow", self.operating_cash_flow),
            ("net_income", self.net_income),
            ("shareholders_equity", self.shareholders_equity),
        ];
        for (name, value) in positive {
            if !(value > 0.0) {
                return Some(name);
            }
        }
        if !(self.capex >= 0.0) {
            return Some("capex");
        }
        None
    }

    /// Earnings per share, or `None` when shares are not positive.
    pub fn earnings_per_share(&self) -> Option<f64> {
        (self.shares_outstanding > 0.0).then(|| self.net_income / self.shares_outstanding)
    }
}
