//! Universe analysis and ranking.
//!
//! Drives [`analyze_stock`] across many tickers, scores each result and ranks
//! the survivors. A ticker that cannot be analyzed is recorded as skipped and
//! never aborts the batch.

use crate::domain::analysis::{analyze_stock, Analysis};
use crate::domain::error::IntrinsicError;
use crate::domain::financials::FinancialInputs;
use crate::domain::scoring::calculate_score;
use crate::domain::sector::SectorTable;
use crate::domain::valuation::ValuationConfig;
use crate::ports::metrics_port::MetricsPort;

/// Ratios shown alongside a recommendation, in percent where named so.
#[derive(Debug, Clone, PartialEq)]
pub struct QualityMetrics {
    pub fcf_yield_percent: f64,
    /// Price over earnings per share; 0 when earnings are not positive.
    pub pe_ratio: f64,
    pub roe_percent: f64,
    pub roic_percent: Option<f64>,
}

impl QualityMetrics {
    pub fn compute(analysis: &Analysis, inputs: &FinancialInputs) -> Self {
        let pe_ratio = match inputs.earnings_per_share() {
            Some(eps) if eps > 0.0 => inputs.current_price / eps,
            _ => 0.0,
        };
        Self {
            fcf_yield_percent: analysis.fcf_yield_percent(),
            pe_ratio,
            roe_percent: analysis.metrics.roe * 100.0,
            roic_percent: analysis.metrics.roic.map(|r| r * 100.0),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Recommendation {
    pub analysis: Analysis,
    pub quality_metrics: QualityMetrics,
    pub recommendation_score: f64,
}

impl Recommendation {
    pub fn ticker(&self) -> &str {
        &self.analysis.ticker
    }

    pub fn discount_percent(&self) -> f64 {
        self.analysis.assessment.discount_percent
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum SkipReason {
    NoData,
    InsufficientData { field: &'static str },
    Provider { reason: String },
}

impl std::fmt::Display for SkipReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SkipReason::NoData => f.write_str("no metrics available"),
            SkipReason::InsufficientData { field } => {
                write!(f, "missing or non-positive {field}")
            }
            SkipReason::Provider { reason } => write!(f, "provider error: {reason}"),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SkippedTicker {
    pub ticker: String,
    pub reason: SkipReason,
}

impl SkippedTicker {
    pub fn into_error(self) -> IntrinsicError {
        match self.reason {
            SkipReason::NoData => IntrinsicError::MissingData {
                ticker: self.ticker,
                field: "financial metrics".to_string(),
            },
            SkipReason::InsufficientData { field } => IntrinsicError::MissingData {
                ticker: self.ticker,
                field: field.to_string(),
            },
            SkipReason::Provider { reason } => IntrinsicError::DataSource { reason },
        }
    }
}

#[derive(Debug, Clone)]
pub struct UniverseReport {
    /// Top-N recommendations, best first.
    pub ranked: Vec<Recommendation>,
    pub analyzed: usize,
    pub skipped: Vec<SkippedTicker>,
}

impl UniverseReport {
    pub fn total(&self) -> usize {
        self.analyzed + self.skipped.len()
    }
}

/// Sorts best first by score, then by discount. Stable, so exact ties keep
/// their input order.
pub fn rank(recommendations: &mut [Recommendation]) {
    recommendations.sort_by(|a, b| {
        b.recommendation_score
            .total_cmp(&a.recommendation_score)
            .then_with(|| b.discount_percent().total_cmp(&a.discount_percent()))
    });
}

pub struct Recommender<'a> {
    metrics: &'a dyn MetricsPort,
    sectors: &'a SectorTable,
    config: &'a ValuationConfig,
    analyses: Vec<Recommendation>,
}

impl<'a> Recommender<'a> {
    pub fn new(
        metrics: &'a dyn MetricsPort,
        sectors: &'a SectorTable,
        config: &'a ValuationConfig,
    ) -> Self {
        Self {
            metrics,
            sectors,
            config,
            analyses: Vec::new(),
        }
    }

    /// Successful analyses from the last [`analyze_universe`] run, unranked.
    ///
    /// [`analyze_universe`]: Recommender::analyze_universe
    pub fn analyses(&self) -> &[Recommendation] {
        &self.analyses
    }

    pub fn analyze_stock(&self, ticker: &str) -> Result<Recommendation, SkippedTicker> {
        let skip = |reason| SkippedTicker {
            ticker: ticker.to_string(),
            reason,
        };

        let inputs = match self.metrics.get_metrics(ticker) {
            Ok(Some(inputs)) => inputs,
            Ok(None) => return Err(skip(SkipReason::NoData)),
            Err(e) => {
                return Err(skip(SkipReason::Provider {
                    reason: e.to_string(),
                }))
            }
        };

        if let Some(field) = inputs.first_invalid_field() {
            return Err(skip(SkipReason::InsufficientData { field }));
        }

        let growth_rate = self.config.growth_override.or(inputs.growth_rate);
        let analysis = analyze_stock(&inputs, growth_rate, self.config, self.sectors);
        let quality_metrics = QualityMetrics::compute(&analysis, &inputs);
        let recommendation_score = calculate_score(&analysis);

        Ok(Recommendation {
            analysis,
            quality_metrics,
            recommendation_score,
        })
    }

    pub fn analyze_universe(&mut self, tickers: &[String], top_n: usize) -> UniverseReport {
        tracing::info!("Analyzing {} stocks...", tickers.len());

        self.analyses.clear();
        let mut skipped = Vec::new();

        for ticker in tickers {
            match self.analyze_stock(ticker) {
                Ok(rec) => {
                    tracing::info!(
                        "{} - score {:.1} ({})",
                        ticker,
                        rec.recommendation_score,
                        rec.analysis.assessment.signal
                    );
                    self.analyses.push(rec);
                }
                Err(s) => {
                    tracing::warn!("skipping {} ({})", s.ticker, s.reason);
                    skipped.push(s);
                }
            }
        }

        let analyzed = self.analyses.len();
        tracing::info!(
            "Successfully analyzed {}/{} stocks",
            analyzed,
            tickers.len()
        );
        if analyzed == 0 {
            tracing::warn!("No successful analyses to rank");
        }

        let mut ranked = self.analyses.clone();
        rank(&mut ranked);
        ranked.truncate(top_n);

        UniverseReport {
            ranked,
            analyzed,
            skipped,
        }
    }
}
