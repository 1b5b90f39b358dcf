//! Financial metrics port trait.

use crate::domain::error::IntrinsicError;
use crate::domain::financials::FinancialInputs;

/// Source of per-ticker financial figures.
///
/// `Ok(None)` means the provider has nothing for the ticker; callers skip it.
/// `Err` is reserved for provider failures and is also non-fatal to a batch.
pub trait MetricsPort {
    fn get_metrics(&self, ticker: &str) -> Result<Option<FinancialInputs>, IntrinsicError>;
}
