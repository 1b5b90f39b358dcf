//! Full single-ticker analysis.

use crate::domain::assessment::{rate_valuation, ValuationAssessment};
use crate::domain::financials::FinancialInputs;
use crate::domain::quality::{
    calculate_quality_rating, detect_value_trap, QualityRating, ValueTrapFlag,
};
use crate::domain::sector::SectorTable;
use crate::domain::valuation::{
    calculate_fcf_per_share, calculate_free_cash_flow, calculate_intrinsic_value, calculate_roe,
    calculate_wacc, roic_from_optional, ValuationConfig, ValuationMethod,
};

#[derive(Debug, Clone, PartialEq)]
pub struct CashFlowMetrics {
    pub fcf: f64,
    pub fcf_per_share: f64,
    pub roe: f64,
    pub roic: Option<f64>,
    pub operating_cash_flow: f64,
    pub capex: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Valuation {
    pub intrinsic_value: f64,
    pub value_with_margin_of_safety: f64,
    pub method: ValuationMethod,
    pub wacc: f64,
    pub growth_rate: f64,
    pub sector: &'static str,
}

/// Everything derived for one ticker in one run. Built once, never mutated.
#[derive(Debug, Clone, PartialEq)]
pub struct Analysis {
    pub ticker: String,
    pub current_price: f64,
    pub metrics: CashFlowMetrics,
    pub valuation: Valuation,
    pub quality: QualityRating,
    pub value_trap: ValueTrapFlag,
    pub assessment: ValuationAssessment,
}

impl Analysis {
    /// FCF per share over price, in percent.
    pub fn fcf_yield_percent(&self) -> f64 {
        if self.current_price > 0.0 {
            self.metrics.fcf_per_share / self.current_price * 100.0
        } else {
            0.0
        }
    }

    pub fn is_value_trap(&self) -> bool {
        self.value_trap.is_trap
    }
}

/// Runs the valuation pipeline over one company's figures.
///
/// `growth_rate` overrides the sector growth when set. The growth recorded in
/// [`Valuation::growth_rate`] is the unclamped rate that fed the value-trap
/// screen; the DCF clamps its own copy.
pub fn analyze_stock(
    inputs: &FinancialInputs,
    growth_rate: Option<f64>,
    config: &ValuationConfig,
    sectors: &SectorTable,
) -> Analysis {
    let fcf = calculate_free_cash_flow(inputs.operating_cash_flow, inputs.capex);
    let fcf_per_share = calculate_fcf_per_share(fcf, inputs.shares_outstanding);
    let roe = calculate_roe(inputs.net_income, inputs.shareholders_equity);
    let roic = roic_from_optional(
        inputs.operating_income,
        inputs.invested_capital,
        config.tax_rate,
    );

    let (sector_growth, sector) = sectors.growth_rate(&inputs.ticker);
    let growth_rate = growth_rate.unwrap_or(sector_growth);
    let wacc = calculate_wacc(&config.wacc);

    let intrinsic = calculate_intrinsic_value(
        fcf_per_share,
        Some(&inputs.ticker),
        Some(growth_rate),
        Some(wacc),
        config.terminal_growth_rate,
        config.projection_years,
        sectors,
    );

    let quality = calculate_quality_rating(roe, roic, fcf_per_share, inputs.current_price);
    let value_trap = detect_value_trap(roe, fcf_per_share, inputs.current_price, growth_rate);
    let assessment = rate_valuation(inputs.current_price, intrinsic.value, &quality, &value_trap);

    Analysis {
        ticker: inputs.ticker.clone(),
        current_price: inputs.current_price,
        metrics: CashFlowMetrics {
            fcf,
            fcf_per_share,
            roe,
            roic,
            operating_cash_flow: inputs.operating_cash_flow,
            capex: inputs.capex,
        },
        valuation: Valuation {
            intrinsic_value: intrinsic.value,
            value_with_margin_of_safety: intrinsic.value * (1.0 - quality.margin_of_safety),
            method: intrinsic.method,
            wacc,
            growth_rate,
            sector,
        },
        quality,
        value_trap,
        assessment,
    }
}
