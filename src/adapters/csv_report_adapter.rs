//! CSV recommendation report writer.

use crate::domain::error::IntrinsicError;
use crate::domain::recommender::Recommendation;
use crate::domain::report::to_rows;
use crate::ports::report_port::ReportPort;
use std::io::Write;
use std::path::Path;

pub struct CsvReportAdapter;

impl CsvReportAdapter {
    /// Writes header and rows to any writer.
    pub fn write_to<W: Write>(
        recommendations: &[Recommendation],
        writer: W,
    ) -> Result<(), IntrinsicError> {
        let mut wtr = csv::Writer::from_writer(writer);
        for row in to_rows(recommendations) {
            wtr.serialize(row)?;
        }
        wtr.flush()?;
        Ok(())
    }
}

impl ReportPort for CsvReportAdapter {
    fn write(
        &self,
        recommendations: &[Recommendation],
        output_path: &Path,
    ) -> Result<(), IntrinsicError> {
        let wtr = std::fs::File::create(output_path)?;
        Self::write_to(recommendations, wtr)
    }
}
