//! Business-quality tiers and value-trap screening.

/// Quality tier derived from the primary return metric.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum QualityTier {
    Exceptional,
    Excellent,
    Good,
    Adequate,
    Poor,
    Weak,
}

impl QualityTier {
    /// Tier for a primary return expressed as a fraction.
    pub fn from_return(primary_return: f64) -> Self {
        if primary_return >= 0.40 {
            QualityTier::Exceptional
        } else if primary_return >= 0.20 {
            QualityTier::Excellent
        } else if primary_return >= 0.15 {
            QualityTier::Good
        } else if primary_return >= 0.10 {
            QualityTier::Adequate
        } else if primary_return >= 0.08 {
            QualityTier::Poor
        } else {
            QualityTier::Weak
        }
    }

    /// Fraction of intrinsic value withheld before a price counts as cheap.
    pub fn margin_of_safety(&self) -> f64 {
        match self {
            QualityTier::Exceptional => 0.15,
            QualityTier::Excellent | QualityTier::Good => 0.20,
            QualityTier::Adequate => 0.35,
            QualityTier::Poor => 0.50,
            QualityTier::Weak => 0.65,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            QualityTier::Exceptional => "EXCEPTIONAL",
            QualityTier::Excellent => "EXCELLENT",
            QualityTier::Good => "GOOD",
            QualityTier::Adequate => "ADEQUATE",
            QualityTier::Poor => "POOR",
            QualityTier::Weak => "WEAK",
        }
    }
}

impl std::fmt::Display for QualityTier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct QualityRating {
    pub tier: QualityTier,
    pub primary_return: f64,
    pub margin_of_safety: f64,
}

/// ROIC when present and positive, otherwise ROE.
pub fn primary_return(roe: f64, roic: Option<f64>) -> f64 {
    match roic {
        Some(r) if r > 0.0 => r,
        _ => roe,
    }
}

/// Rates business quality from its return on capital.
///
/// Cash yield does not move the tier; `_fcf_per_share` and `_price` are
/// ignored.
pub fn calculate_quality_rating(
    roe: f64,
    roic: Option<f64>,
    _fcf_per_share: f64,
    _price: f64,
) -> QualityRating {
    let primary_return = primary_return(roe, roic);
    let tier = QualityTier::from_return(primary_return);
    QualityRating {
        tier,
        primary_return,
        margin_of_safety: tier.margin_of_safety(),
    }
}

pub const TRAP_FCF_YIELD_MIN: f64 = 0.15;
pub const TRAP_ROE_MAX: f64 = 0.10;
pub const TRAP_LOW_GROWTH_MAX: f64 = 0.03;
pub const TRAP_LOW_GROWTH_YIELD_MIN: f64 = 0.10;
pub const TRAP_SCORE_THRESHOLD: f64 = 0.5;

#[derive(Debug, Clone, PartialEq)]
pub struct ValueTrapFlag {
    pub is_trap: bool,
    pub trap_score: f64,
    pub fcf_yield: f64,
    pub reasons: Vec<String>,
}

impl ValueTrapFlag {
    fn clear() -> Self {
        Self {
            is_trap: false,
            trap_score: 0.0,
            fcf_yield: 0.0,
            reasons: Vec::new(),
        }
    }
}

/// Flags cheap-looking stocks whose cash yield is unlikely to last.
///
/// Three additive signals: FCF yield above 15% (+0.4), ROE below 10% (+0.3),
/// and growth at most 3% with FCF yield above 10% (+0.3). A score of 0.5 or
/// more marks a trap.
pub fn detect_value_trap(
    roe: f64,
    fcf_per_share: f64,
    price: f64,
    growth_rate: f64,
) -> ValueTrapFlag {
    if !(price > 0.0) {
        return ValueTrapFlag::clear();
    }

    let fcf_yield = if fcf_per_share > 0.0 {
        fcf_per_share / price
    } else {
        0.0
    };
    let mut trap_score = 0.0;
    let mut reasons = Vec::new();

    if fcf_yield > TRAP_FCF_YIELD_MIN {
        trap_score += 0.4;
        reasons.push(format!(
            "Very high FCF yield ({:.1}%) - may not be sustainable",
            fcf_yield * 100.0
        ));
    }

    if roe < TRAP_ROE_MAX {
        trap_score += 0.3;
        reasons.push(format!(
            "Low ROE ({:.1}%) - weak capital efficiency",
            roe * 100.0
        ));
    }

    if growth_rate <= TRAP_LOW_GROWTH_MAX && fcf_yield > TRAP_LOW_GROWTH_YIELD_MIN {
        trap_score += 0.3;
        reasons.push("Low growth + high yield profile suggests secular decline".to_string());
    }

    ValueTrapFlag {
        is_trap: trap_score >= TRAP_SCORE_THRESHOLD,
        trap_score,
        fcf_yield,
        reasons,
    }
}
