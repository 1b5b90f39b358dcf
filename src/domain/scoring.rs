//! Recommendation score (0-100) for a finished [`Analysis`].
//!
//! Three mutually exclusive paths:
//!
//! - value traps are capped at 20 and scaled down by trap severity;
//! - `EXCEPTIONAL` businesses score on signal and FCF sustainability only,
//!   with the DCF discount left out;
//! - everything else adds four buckets: quality (30), discount (30),
//!   signal (20) and FCF sustainability (20).

use crate::domain::analysis::Analysis;
use crate::domain::assessment::Signal;
use crate::domain::quality::QualityTier;

pub const MAX_SCORE: f64 = 100.0;
const TRAP_SCORE_CEILING: f64 = 20.0;
const EXCEPTIONAL_BASE: f64 = 35.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScorePath {
    ValueTrap,
    Exceptional,
    Normal,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScoreFlag {
    /// Discount above 80%: more likely bad inputs than a bargain.
    SuspiciousDiscount,
    /// FCF yield above 12% on the normal path.
    UnsustainableYield,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ScoreBreakdown {
    pub path: ScorePath,
    pub base: f64,
    pub quality: f64,
    pub discount: f64,
    pub signal: f64,
    pub fcf_sustainability: f64,
    pub flags: Vec<ScoreFlag>,
}

impl ScoreBreakdown {
    fn empty(path: ScorePath) -> Self {
        Self {
            path,
            base: 0.0,
            quality: 0.0,
            discount: 0.0,
            signal: 0.0,
            fcf_sustainability: 0.0,
            flags: Vec::new(),
        }
    }

    pub fn total(&self) -> f64 {
        let sum = self.base + self.quality + self.discount + self.signal + self.fcf_sustainability;
        sum.clamp(0.0, MAX_SCORE)
    }
}

/// Points for the primary return (percent), ROIC preferred over ROE.
pub fn quality_points(primary_return_percent: f64) -> f64 {
    if primary_return_percent >= 25.0 {
        30.0
    } else if primary_return_percent >= 20.0 {
        28.0
    } else if primary_return_percent >= 15.0 {
        22.0
    } else if primary_return_percent >= 12.0 {
        15.0
    } else if primary_return_percent >= 8.0 {
        8.0
    } else {
        2.0
    }
}

pub fn discount_points(discount_percent: f64) -> f64 {
    if (25.0..=60.0).contains(&discount_percent) {
        30.0
    } else if (discount_percent > 15.0 && discount_percent < 25.0)
        || (discount_percent > 60.0 && discount_percent <= 80.0)
    {
        20.0
    } else if discount_percent > 0.0 && discount_percent <= 15.0 {
        10.0
    } else if discount_percent > 80.0 {
        5.0
    } else {
        0.0
    }
}

pub fn signal_points(signal: Signal) -> f64 {
    match signal {
        Signal::StrongBuy => 20.0,
        Signal::Buy => 15.0,
        Signal::Hold => 5.0,
        Signal::Avoid | Signal::Skip => 0.0,
    }
}

/// FCF sustainability on the normal path: 3-8% is the sweet spot.
pub fn fcf_yield_points(fcf_yield_percent: f64) -> f64 {
    if (3.0..=8.0).contains(&fcf_yield_percent) {
        20.0
    } else if (fcf_yield_percent > 2.0 && fcf_yield_percent < 3.0)
        || (fcf_yield_percent > 8.0 && fcf_yield_percent <= 12.0)
    {
        12.0
    } else if fcf_yield_percent <= 2.0 {
        5.0
    } else if fcf_yield_percent > 12.0 {
        3.0
    } else {
        0.0
    }
}

/// FCF sustainability for exceptional businesses, which tolerate higher
/// yields.
pub fn exceptional_fcf_yield_points(fcf_yield_percent: f64) -> f64 {
    if (3.0..=10.0).contains(&fcf_yield_percent) {
        25.0
    } else if (fcf_yield_percent > 2.0 && fcf_yield_percent < 3.0)
        || (fcf_yield_percent > 10.0 && fcf_yield_percent <= 15.0)
    {
        15.0
    } else if fcf_yield_percent <= 2.0 {
        5.0
    } else {
        0.0
    }
}

pub fn score_breakdown(analysis: &Analysis) -> ScoreBreakdown {
    if analysis.is_value_trap() {
        let mut breakdown = ScoreBreakdown::empty(ScorePath::ValueTrap);
        breakdown.base = (TRAP_SCORE_CEILING * (1.0 - analysis.value_trap.trap_score)).max(0.0);
        return breakdown;
    }

    let fcf_yield = analysis.fcf_yield_percent();
    let signal = signal_points(analysis.assessment.signal);

    if analysis.quality.tier == QualityTier::Exceptional {
        let mut breakdown = ScoreBreakdown::empty(ScorePath::Exceptional);
        breakdown.base = EXCEPTIONAL_BASE;
        breakdown.signal = signal;
        breakdown.fcf_sustainability = exceptional_fcf_yield_points(fcf_yield);
        return breakdown;
    }

    let discount = analysis.assessment.discount_percent;
    let mut breakdown = ScoreBreakdown::empty(ScorePath::Normal);
    breakdown.quality = quality_points(analysis.quality.primary_return * 100.0);
    breakdown.discount = discount_points(discount);
    breakdown.signal = signal;
    breakdown.fcf_sustainability = fcf_yield_points(fcf_yield);

    if discount > 80.0 {
        tracing::debug!(
            ticker = %analysis.ticker,
            "discount {:.1}% is suspiciously large",
            discount
        );
        breakdown.flags.push(ScoreFlag::SuspiciousDiscount);
    }
    if fcf_yield > 12.0 {
        tracing::debug!(
            ticker = %analysis.ticker,
            "FCF yield {:.1}% is unlikely to be sustainable",
            fcf_yield
        );
        breakdown.flags.push(ScoreFlag::UnsustainableYield);
    }

    breakdown
}

pub fn calculate_score(analysis: &Analysis) -> f64 {
    score_breakdown(analysis).total()
}
