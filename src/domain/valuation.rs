//! Cash-flow, return and discounted-cash-flow calculations.
//!
//! Every function here is pure: no I/O, no state. Degenerate inputs fall back
//! to documented values rather than failing.

use crate::domain::sector::SectorTable;

pub const DEFAULT_RISK_FREE_RATE: f64 = 0.045;
pub const DEFAULT_MARKET_RISK_PREMIUM: f64 = 0.055;
pub const DEFAULT_BETA: f64 = 1.0;
pub const DEFAULT_DEBT_TO_EQUITY: f64 = 0.5;
pub const DEFAULT_TAX_RATE: f64 = 0.21;
pub const DEFAULT_TERMINAL_GROWTH_RATE: f64 = 0.025;
pub const DEFAULT_PROJECTION_YEARS: u32 = 10;

/// Growth used when neither an override nor a ticker is available.
pub const FALLBACK_GROWTH_RATE: f64 = 0.03;
pub const MAX_GROWTH_RATE: f64 = 0.08;
pub const MAX_TERMINAL_GROWTH_RATE: f64 = 0.025;

/// Inputs to the single-factor discount rate.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WaccInputs {
    pub risk_free_rate: f64,
    pub market_risk_premium: f64,
    pub beta: f64,
    pub debt_to_equity: f64,
}

impl Default for WaccInputs {
    fn default() -> Self {
        Self {
            risk_free_rate: DEFAULT_RISK_FREE_RATE,
            market_risk_premium: DEFAULT_MARKET_RISK_PREMIUM,
            beta: DEFAULT_BETA,
            debt_to_equity: DEFAULT_DEBT_TO_EQUITY,
        }
    }
}

/// Tunables for one valuation run.
#[derive(Debug, Clone, PartialEq)]
pub struct ValuationConfig {
    pub wacc: WaccInputs,
    pub terminal_growth_rate: f64,
    pub projection_years: u32,
    pub tax_rate: f64,
    /// Applied to every ticker in place of provider or sector growth.
    pub growth_override: Option<f64>,
}

impl Default for ValuationConfig {
    fn default() -> Self {
        Self {
            wacc: WaccInputs::default(),
            terminal_growth_rate: DEFAULT_TERMINAL_GROWTH_RATE,
            projection_years: DEFAULT_PROJECTION_YEARS,
            tax_rate: DEFAULT_TAX_RATE,
            growth_override: None,
        }
    }
}

/// How an intrinsic value was obtained.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValuationMethod {
    /// Explicit-period DCF plus Gordon growth terminal value.
    Discounted,
    /// WACC did not exceed growth or terminal growth; a one-period estimate
    /// was used instead.
    Simplified,
    /// Free cash flow per share was not positive.
    NoCashFlow,
}

impl ValuationMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            ValuationMethod::Discounted => "DCF",
            ValuationMethod::Simplified => "SIMPLIFIED",
            ValuationMethod::NoCashFlow => "NO_CASH_FLOW",
        }
    }

    pub fn is_reliable(&self) -> bool {
        matches!(self, ValuationMethod::Discounted)
    }
}

impl std::fmt::Display for ValuationMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Unmargined per-share intrinsic value. Margin of safety is applied later
/// from the quality tier.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IntrinsicValue {
    pub value: f64,
    pub method: ValuationMethod,
}

/// Operating cash flow minus capex, floored at zero.
pub fn calculate_free_cash_flow(operating_cash_flow: f64, capex: f64) -> f64 {
    (operating_cash_flow - capex).max(0.0)
}

pub fn calculate_fcf_per_share(free_cash_flow: f64, shares_outstanding: f64) -> f64 {
    if shares_outstanding > 0.0 {
        free_cash_flow / shares_outstanding
    } else {
        0.0
    }
}

pub fn calculate_roe(net_income: f64, shareholders_equity: f64) -> f64 {
    if shareholders_equity > 0.0 {
        net_income / shareholders_equity
    } else {
        0.0
    }
}

pub fn calculate_roic(nopat: f64, invested_capital: f64) -> f64 {
    if invested_capital > 0.0 {
        nopat / invested_capital
    } else {
        0.0
    }
}

/// Operating income after tax; zero for non-positive operating income.
pub fn estimate_nopat(operating_income: f64, tax_rate: f64) -> f64 {
    if operating_income > 0.0 {
        operating_income * (1.0 - tax_rate)
    } else {
        0.0
    }
}

/// ROIC when both optional inputs are present and positive.
pub fn roic_from_optional(
    operating_income: Option<f64>,
    invested_capital: Option<f64>,
    tax_rate: f64,
) -> Option<f64> {
    match (operating_income, invested_capital) {
        (Some(income), Some(capital)) if income > 0.0 && capital > 0.0 => {
            Some(calculate_roic(estimate_nopat(income, tax_rate), capital))
        }
        _ => None,
    }
}

/// CAPM cost of equity divided by `1 + D/E`. Debt is assumed to cost the
/// risk-free rate.
pub fn calculate_wacc(inputs: &WaccInputs) -> f64 {
    let cost_of_equity = inputs.risk_free_rate + inputs.beta * inputs.market_risk_premium;
    cost_of_equity / (1.0 + inputs.debt_to_equity)
}

/// Per-share DCF value.
///
/// Growth resolves from `growth_rate`, then the sector table for `ticker`,
/// then [`FALLBACK_GROWTH_RATE`], and is clamped to `[0, MAX_GROWTH_RATE]`.
/// Terminal growth is capped at [`MAX_TERMINAL_GROWTH_RATE`]. A missing
/// `wacc` is computed from [`WaccInputs::default`]. When `wacc` does not
/// exceed either growth rate the Gordon term is undefined and a
/// [`ValuationMethod::Simplified`] estimate is returned.
pub fn calculate_intrinsic_value(
    fcf_per_share: f64,
    ticker: Option<&str>,
    growth_rate: Option<f64>,
    wacc: Option<f64>,
    terminal_growth_rate: f64,
    projection_years: u32,
    sectors: &SectorTable,
) -> IntrinsicValue {
    if !(fcf_per_share > 0.0) {
        return IntrinsicValue {
            value: 0.0,
            method: ValuationMethod::NoCashFlow,
        };
    }

    let growth_rate = growth_rate
        .or_else(|| ticker.map(|t| sectors.growth_rate(t).0))
        .unwrap_or(FALLBACK_GROWTH_RATE)
        .clamp(0.0, MAX_GROWTH_RATE);
    let terminal_growth_rate = terminal_growth_rate.min(MAX_TERMINAL_GROWTH_RATE);
    let wacc = wacc.unwrap_or_else(|| calculate_wacc(&WaccInputs::default()));

    if wacc <= growth_rate || wacc <= terminal_growth_rate {
        tracing::warn!(
            ticker = ticker.unwrap_or("-"),
            "WACC ({:.2}%) <= growth rate ({:.2}%) or terminal growth ({:.2}%), \
             returning simplified estimate",
            wacc * 100.0,
            growth_rate * 100.0,
            terminal_growth_rate * 100.0
        );
        return IntrinsicValue {
            value: fcf_per_share * (1.0 + growth_rate) / (wacc + 0.01),
            method: ValuationMethod::Simplified,
        };
    }

    let mut pv_fcf = 0.0;
    let mut current_fcf = fcf_per_share;
    for year in 1..=projection_years {
        current_fcf *= 1.0 + growth_rate;
        pv_fcf += current_fcf / (1.0 + wacc).powi(year as i32);
    }

    let terminal_value =
        current_fcf * (1.0 + terminal_growth_rate) / (wacc - terminal_growth_rate);
    let pv_terminal = terminal_value / (1.0 + wacc).powi(projection_years as i32);

    IntrinsicValue {
        value: pv_fcf + pv_terminal,
        method: ValuationMethod::Discounted,
    }
}
