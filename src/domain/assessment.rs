//! Price-versus-value rating.

use crate::domain::quality::{QualityRating, QualityTier, ValueTrapFlag};

/// Price band above intrinsic value still considered fair.
pub const FAIR_VALUE_BAND: f64 = 1.15;

pub const VALUE_TRAP_WARNING: &str = "High FCF yield with low ROE - unsustainable";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValuationRating {
    SignificantlyUndervalued,
    Undervalued,
    FairlyValued,
    Overvalued,
    ValueTrap,
    UnableToCalculate,
}

impl ValuationRating {
    pub fn as_str(&self) -> &'static str {
        match self {
            ValuationRating::SignificantlyUndervalued => "SIGNIFICANTLY_UNDERVALUED",
            ValuationRating::Undervalued => "UNDERVALUED",
            ValuationRating::FairlyValued => "FAIRLY_VALUED",
            ValuationRating::Overvalued => "OVERVALUED",
            ValuationRating::ValueTrap => "VALUE_TRAP",
            ValuationRating::UnableToCalculate => "UNABLE_TO_CALCULATE",
        }
    }
}

impl std::fmt::Display for ValuationRating {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Signal {
    StrongBuy,
    Buy,
    Hold,
    Avoid,
    Skip,
}

impl Signal {
    pub fn as_str(&self) -> &'static str {
        match self {
            Signal::StrongBuy => "STRONG_BUY",
            Signal::Buy => "BUY",
            Signal::Hold => "HOLD",
            Signal::Avoid => "AVOID",
            Signal::Skip => "SKIP",
        }
    }
}

impl std::fmt::Display for Signal {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ValuationAssessment {
    pub rating: ValuationRating,
    pub signal: Signal,
    /// `(1 - price / intrinsic) * 100`; negative when trading above value.
    pub discount_percent: f64,
    pub upside_percent: f64,
    pub quality: QualityTier,
    pub warning: Option<&'static str>,
}

/// Rates `current_price` against intrinsic value after the quality-tier
/// margin of safety. A detected value trap overrides the price bands.
pub fn rate_valuation(
    current_price: f64,
    intrinsic_value: f64,
    quality_rating: &QualityRating,
    value_trap: &ValueTrapFlag,
) -> ValuationAssessment {
    if !(intrinsic_value > 0.0) {
        return ValuationAssessment {
            rating: ValuationRating::UnableToCalculate,
            signal: Signal::Skip,
            discount_percent: 0.0,
            upside_percent: 0.0,
            quality: quality_rating.tier,
            warning: None,
        };
    }

    let value_with_mos = intrinsic_value * (1.0 - quality_rating.margin_of_safety);
    let discount_percent = (1.0 - current_price / intrinsic_value) * 100.0;
    let upside_percent = if current_price > 0.0 {
        (intrinsic_value / current_price - 1.0) * 100.0
    } else {
        0.0
    };

    if value_trap.is_trap {
        return ValuationAssessment {
            rating: ValuationRating::ValueTrap,
            signal: Signal::Avoid,
            discount_percent,
            upside_percent,
            quality: quality_rating.tier,
            warning: Some(VALUE_TRAP_WARNING),
        };
    }

    let (signal, rating) = if current_price < value_with_mos {
        (Signal::StrongBuy, ValuationRating::SignificantlyUndervalued)
    } else if current_price < intrinsic_value {
        (Signal::Buy, ValuationRating::Undervalued)
    } else if current_price < intrinsic_value * FAIR_VALUE_BAND {
        (Signal::Hold, ValuationRating::FairlyValued)
    } else {
        (Signal::Avoid, ValuationRating::Overvalued)
    };

    ValuationAssessment {
        rating,
        signal,
        discount_percent,
        upside_percent,
        quality: quality_rating.tier,
        warning: None,
    }
}
