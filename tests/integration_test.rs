//! End-to-end tests for the analysis pipeline against mock and CSV-backed
//! metrics sources.

mod common;

use common::*;
use intrinsic::adapters::csv_adapter::CsvMetricsAdapter;
use intrinsic::adapters::csv_report_adapter::CsvReportAdapter;
use intrinsic::domain::assessment::{Signal, ValuationRating};
use intrinsic::domain::recommender::{Recommender, SkipReason};
use intrinsic::domain::report::{to_rows, COLUMNS};
use intrinsic::domain::sector::SectorTable;
use intrinsic::domain::valuation::{ValuationConfig, ValuationMethod};
use intrinsic::ports::report_port::ReportPort;

fn tickers(list: &[&str]) -> Vec<String> {
    list.iter().map(|t| t.to_string()).collect()
}

fn mixed_port() -> MockMetricsPort {
    MockMetricsPort::new()
        .with_inputs(quality_inputs("KO"))
        .with_inputs(trap_inputs("TRAP"))
        .with_inputs(bargain_inputs("CHEAP"))
        .with_inputs(make_inputs("NOSHARES", 10.0, 0.0, 100.0, 10.0, 50.0, 500.0))
        .with_error("BOOM", "connection reset")
}

mod pipeline {
    use super::*;

    #[test]
    fn batch_skips_bad_tickers_and_ranks_the_rest() {
        let port = mixed_port();
        let sectors = SectorTable::builtin();
        let config = ValuationConfig::default();
        let mut recommender = Recommender::new(&port, &sectors, &config);

        let report = recommender.analyze_universe(
            &tickers(&["KO", "TRAP", "NOSHARES", "MISSING", "BOOM", "CHEAP"]),
            10,
        );

        assert_eq!(report.analyzed, 3);
        assert_eq!(report.skipped.len(), 3);
        assert_eq!(report.total(), 6);
        assert_eq!(recommender.analyses().len(), 3);

        let reasons: Vec<(&str, &SkipReason)> = report
            .skipped
            .iter()
            .map(|s| (s.ticker.as_str(), &s.reason))
            .collect();
        assert!(matches!(
            reasons[0],
            ("NOSHARES", SkipReason::InsufficientData { .. })
        ));
        assert!(matches!(reasons[1], ("MISSING", SkipReason::NoData)));
        assert!(matches!(reasons[2], ("BOOM", SkipReason::Provider { .. })));

        let scores: Vec<f64> = report
            .ranked
            .iter()
            .map(|r| r.recommendation_score)
            .collect();
        assert!(scores.windows(2).all(|w| w[0] >= w[1]));
    }

    #[test]
    fn value_trap_is_flagged_and_ranked_last() {
        let port = mixed_port();
        let sectors = SectorTable::builtin();
        let config = ValuationConfig::default();
        let mut recommender = Recommender::new(&port, &sectors, &config);

        let report = recommender.analyze_universe(&tickers(&["TRAP", "KO", "CHEAP"]), 10);
        let last = report.ranked.last().unwrap();

        assert_eq!(last.ticker(), "TRAP");
        assert_eq!(last.analysis.assessment.rating, ValuationRating::ValueTrap);
        assert_eq!(last.analysis.assessment.signal, Signal::Avoid);
        assert!(last.analysis.assessment.warning.is_some());
        assert!(last.recommendation_score <= 20.0);
    }

    #[test]
    fn top_n_truncates_but_counts_everything() {
        let port = mixed_port();
        let sectors = SectorTable::builtin();
        let config = ValuationConfig::default();
        let mut recommender = Recommender::new(&port, &sectors, &config);

        let report = recommender.analyze_universe(&tickers(&["KO", "TRAP", "CHEAP"]), 1);
        assert_eq!(report.ranked.len(), 1);
        assert_eq!(report.analyzed, 3);
    }

    #[test]
    fn empty_universe_yields_empty_report() {
        let port = MockMetricsPort::new();
        let sectors = SectorTable::builtin();
        let config = ValuationConfig::default();
        let mut recommender = Recommender::new(&port, &sectors, &config);

        let report = recommender.analyze_universe(&[], 15);
        assert_eq!(report.analyzed, 0);
        assert!(report.ranked.is_empty());
        assert!(report.skipped.is_empty());
    }

    #[test]
    fn growth_override_beats_provider_growth() {
        let mut inputs = quality_inputs("KO");
        inputs.growth_rate = Some(0.07);
        let port = MockMetricsPort::new().with_inputs(inputs);
        let sectors = SectorTable::builtin();

        let provider = ValuationConfig::default();
        let rec = Recommender::new(&port, &sectors, &provider)
            .analyze_stock("KO")
            .unwrap();
        assert_eq!(rec.analysis.valuation.growth_rate, 0.07);

        let overridden = ValuationConfig {
            growth_override: Some(0.01),
            ..ValuationConfig::default()
        };
        let rec = Recommender::new(&port, &sectors, &overridden)
            .analyze_stock("KO")
            .unwrap();
        assert_eq!(rec.analysis.valuation.growth_rate, 0.01);
    }

    #[test]
    fn growth_above_wacc_falls_back_to_simplified_value() {
        let mut inputs = quality_inputs("KO");
        inputs.growth_rate = Some(0.30);
        let port = MockMetricsPort::new().with_inputs(inputs);
        let sectors = SectorTable::builtin();
        let config = ValuationConfig::default();

        let rec = Recommender::new(&port, &sectors, &config)
            .analyze_stock("KO")
            .unwrap();
        // default WACC is 0.10 / 1.5, below the 8% growth cap
        assert_eq!(rec.analysis.valuation.method, ValuationMethod::Simplified);
        assert_eq!(rec.analysis.valuation.growth_rate, 0.30);
        assert!(rec.analysis.valuation.intrinsic_value > 0.0);
    }
}

mod reporting {
    use super::*;

    #[test]
    fn report_rows_follow_ranking() {
        let port = mixed_port();
        let sectors = SectorTable::builtin();
        let config = ValuationConfig::default();
        let mut recommender = Recommender::new(&port, &sectors, &config);
        let report = recommender.analyze_universe(&tickers(&["KO", "TRAP", "CHEAP"]), 10);

        let rows = to_rows(&report.ranked);
        assert_eq!(rows.len(), report.ranked.len());
        for (row, rec) in rows.iter().zip(&report.ranked) {
            assert_eq!(row.ticker, rec.ticker());
            assert_eq!(row.score, rec.recommendation_score);
            assert_eq!(row.roic_percent, None);
        }
        let ko = rows.iter().find(|r| r.ticker == "KO").unwrap();
        assert_eq!(ko.sector, "CONSUMER");
    }

    #[test]
    fn csv_report_has_expected_header() {
        let port = mixed_port();
        let sectors = SectorTable::builtin();
        let config = ValuationConfig::default();
        let mut recommender = Recommender::new(&port, &sectors, &config);
        let report = recommender.analyze_universe(&tickers(&["KO", "CHEAP"]), 10);

        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("recs.csv");
        CsvReportAdapter.write(&report.ranked, &path).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        let mut lines = content.lines();
        assert_eq!(lines.next().unwrap(), COLUMNS.join(","));
        assert_eq!(lines.count(), 2);
    }

    #[test]
    fn csv_report_leaves_missing_roic_empty() {
        let port = MockMetricsPort::new().with_inputs(quality_inputs("KO"));
        let sectors = SectorTable::builtin();
        let config = ValuationConfig::default();
        let rec = Recommender::new(&port, &sectors, &config)
            .analyze_stock("KO")
            .unwrap();

        let mut buf = Vec::new();
        CsvReportAdapter::write_to(&[rec], &mut buf).unwrap();
        let content = String::from_utf8(buf).unwrap();
        let row: Vec<&str> = content.lines().nth(1).unwrap().split(',').collect();
        assert_eq!(row[0], "KO");
        assert_eq!(row[8], "");
    }
}

mod csv_source {
    use super::*;

    #[test]
    fn fundamentals_file_drives_the_pipeline() {
        let mut with_roic = quality_inputs("V");
        with_roic.operating_income = Some(23_000.0);
        with_roic.invested_capital = Some(45_000.0);
        let csv = fundamentals_csv(&[quality_inputs("KO"), with_roic, trap_inputs("TRAP")]);

        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("fundamentals.csv");
        std::fs::write(&path, csv).unwrap();

        let metrics = CsvMetricsAdapter::from_path(&path).unwrap();
        assert_eq!(metrics.len(), 3);

        let sectors = SectorTable::builtin();
        let config = ValuationConfig::default();
        let mut recommender = Recommender::new(&metrics, &sectors, &config);
        let report = recommender.analyze_universe(&tickers(&["KO", "V", "TRAP"]), 15);

        assert_eq!(report.analyzed, 3);
        let v = report.ranked.iter().find(|r| r.ticker() == "V").unwrap();
        assert!(v.quality_metrics.roic_percent.is_some());
        assert_eq!(v.analysis.valuation.sector, "NETWORK");
    }
}
