//! Flattened report row for rendering and export.

use crate::domain::recommender::Recommendation;
use serde::Serialize;

pub const COLUMNS: &[&str] = &[
    "Ticker",
    "Price",
    "Intrinsic Value",
    "MOS Value",
    "Discount%",
    "Upside%",
    "Quality",
    "ROE%",
    "ROIC%",
    "FCF Yield%",
    "Growth Rate%",
    "Sector",
    "Rating",
    "Signal",
    "Score",
];

/// One table row. Percent columns are already multiplied by 100.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReportRow {
    #[serde(rename = "Ticker")]
    pub ticker: String,
    #[serde(rename = "Price")]
    pub price: f64,
    #[serde(rename = "Intrinsic Value")]
    pub intrinsic_value: f64,
    #[serde(rename = "MOS Value")]
    pub mos_value: f64,
    #[serde(rename = "Discount%")]
    pub discount_percent: f64,
    #[serde(rename = "Upside%")]
    pub upside_percent: f64,
    #[serde(rename = "Quality")]
    pub quality: &'static str,
    #[serde(rename = "ROE%")]
    pub roe_percent: f64,
    #[serde(rename = "ROIC%")]
    pub roic_percent: Option<f64>,
    #[serde(rename = "FCF Yield%")]
    pub fcf_yield_percent: f64,
    #[serde(rename = "Growth Rate%")]
    pub growth_rate_percent: f64,
    #[serde(rename = "Sector")]
    pub sector: &'static str,
    #[serde(rename = "Rating")]
    pub rating: &'static str,
    #[serde(rename = "Signal")]
    pub signal: &'static str,
    #[serde(rename = "Score")]
    pub score: f64,
}

impl From<&Recommendation> for ReportRow {
    fn from(rec: &Recommendation) -> Self {
        let a = &rec.analysis;
        Self {
            ticker: a.ticker.clone(),
            price: a.current_price,
            intrinsic_value: a.valuation.intrinsic_value,
            mos_value: a.valuation.value_with_margin_of_safety,
            discount_percent: a.assessment.discount_percent,
            upside_percent: a.assessment.upside_percent,
            quality: a.quality.tier.as_str(),
            roe_percent: rec.quality_metrics.roe_percent,
            roic_percent: rec.quality_metrics.roic_percent,
            fcf_yield_percent: rec.quality_metrics.fcf_yield_percent,
            growth_rate_percent: a.valuation.growth_rate * 100.0,
            sector: a.valuation.sector,
            rating: a.assessment.rating.as_str(),
            signal: a.assessment.signal.as_str(),
            score: rec.recommendation_score,
        }
    }
}

pub fn to_rows(recommendations: &[Recommendation]) -> Vec<ReportRow> {
    recommendations.iter().map(ReportRow::from).collect()
}
