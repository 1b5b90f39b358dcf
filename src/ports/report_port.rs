//! Report output port trait.

use crate::domain::error::IntrinsicError;
use crate::domain::recommender::Recommendation;
use std::path::Path;

/// Port for persisting a ranked recommendation table.
pub trait ReportPort {
    fn write(
        &self,
        recommendations: &[Recommendation],
        output_path: &Path,
    ) -> Result<(), IntrinsicError>;
}
