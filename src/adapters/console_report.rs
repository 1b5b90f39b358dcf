//! Plain-text rendering for the terminal.

use crate::domain::analysis::Analysis;
use crate::domain::recommender::Recommendation;
use crate::domain::report::{to_rows, ReportRow, COLUMNS};
use crate::domain::scoring::{score_breakdown, ScoreFlag, ScorePath};
use crate::domain::sector::SectorTable;

pub const LEGEND: &str = "\
Legend:
  MOS Value    intrinsic value after the quality tier's margin of safety
  Discount%    how far the price sits below intrinsic value (negative = premium)
  Rating       SIGNIFICANTLY_UNDERVALUED, UNDERVALUED, FAIRLY_VALUED, OVERVALUED,
               VALUE_TRAP, UNABLE_TO_CALCULATE
  Signal       STRONG_BUY, BUY, HOLD, AVOID, SKIP
  ROE%         net income over shareholders' equity
  ROIC%        NOPAT over invested capital, '-' when unavailable
  FCF Yield%   free cash flow per share over price
";

fn cells(row: &ReportRow) -> [String; 15] {
    [
        row.ticker.clone(),
        format!("${:.2}", row.price),
        format!("${:.2}", row.intrinsic_value),
        format!("${:.2}", row.mos_value),
        format!("{:.1}%", row.discount_percent),
        format!("{:.1}%", row.upside_percent),
        row.quality.to_string(),
        format!("{:.1}%", row.roe_percent),
        row.roic_percent
            .map(|r| format!("{r:.1}%"))
            .unwrap_or_else(|| "-".to_string()),
        format!("{:.1}%", row.fcf_yield_percent),
        format!("{:.1}%", row.growth_rate_percent),
        row.sector.to_string(),
        row.rating.to_string(),
        row.signal.to_string(),
        format!("{:.1}", row.score),
    ]
}

/// Text columns are left aligned, the rest right aligned.
fn is_text_column(idx: usize) -> bool {
    matches!(idx, 0 | 6 | 11 | 12 | 13)
}

/// Aligned table of ranked recommendations, header first.
pub fn render_table(recommendations: &[Recommendation]) -> String {
    let rows: Vec<[String; 15]> = to_rows(recommendations).iter().map(cells).collect();

    let widths: Vec<usize> = COLUMNS
        .iter()
        .enumerate()
        .map(|(i, h)| {
            rows.iter()
                .map(|r| r[i].len())
                .chain(std::iter::once(h.len()))
                .max()
                .unwrap_or(0)
        })
        .collect();

    let mut out = String::new();
    let header: Vec<&str> = COLUMNS.to_vec();
    push_line(&mut out, &header, &widths);
    let rule: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
    push_line(&mut out, &rule, &widths);
    for row in &rows {
        push_line(&mut out, row, &widths);
    }
    out
}

fn push_line<S: AsRef<str>>(out: &mut String, cells: &[S], widths: &[usize]) {
    let line: Vec<String> = cells
        .iter()
        .zip(widths)
        .enumerate()
        .map(|(i, (cell, w))| {
            if is_text_column(i) {
                format!("{:<w$}", cell.as_ref(), w = w)
            } else {
                format!("{:>w$}", cell.as_ref(), w = w)
            }
        })
        .collect();
    out.push_str(line.join("  ").trim_end());
    out.push('\n');
}

/// Summary line printed after a ranking run.
pub fn render_summary(analyzed: usize, total: usize, shown: usize) -> String {
    format!("Analyzed {analyzed}/{total} stocks, showing top {shown}")
}

fn path_label(path: ScorePath) -> &'static str {
    match path {
        ScorePath::ValueTrap => "value trap",
        ScorePath::Exceptional => "exceptional",
        ScorePath::Normal => "normal",
    }
}

fn flag_label(flag: ScoreFlag) -> &'static str {
    match flag {
        ScoreFlag::SuspiciousDiscount => "discount above 80%, inputs may be unreliable",
        ScoreFlag::UnsustainableYield => "FCF yield above 12%, likely unsustainable",
    }
}

/// Full breakdown for a single ticker.
pub fn render_detail(rec: &Recommendation) -> String {
    let a: &Analysis = &rec.analysis;
    let qm = &rec.quality_metrics;
    let mut out = String::new();

    out.push_str(&format!("=== {} ===\n", a.ticker));
    out.push_str(&format!("Price:              ${:.2}\n", a.current_price));
    out.push_str(&format!("Sector:             {}\n", a.valuation.sector));

    out.push_str("\nCash flow\n");
    out.push_str(&format!("  Operating CF:     {:.0}\n", a.metrics.operating_cash_flow));
    out.push_str(&format!("  Capex:            {:.0}\n", a.metrics.capex));
    out.push_str(&format!("  Free CF:          {:.0}\n", a.metrics.fcf));
    out.push_str(&format!("  FCF/share:        ${:.2}\n", a.metrics.fcf_per_share));
    out.push_str(&format!("  FCF yield:        {:.1}%\n", qm.fcf_yield_percent));
    out.push_str(&format!("  ROE:              {:.1}%\n", qm.roe_percent));
    match qm.roic_percent {
        Some(roic) => out.push_str(&format!("  ROIC:             {roic:.1}%\n")),
        None => out.push_str("  ROIC:             -\n"),
    }
    if qm.pe_ratio > 0.0 {
        out.push_str(&format!("  P/E:              {:.1}\n", qm.pe_ratio));
    }

    out.push_str("\nValuation\n");
    out.push_str(&format!("  Method:           {}\n", a.valuation.method));
    out.push_str(&format!("  WACC:             {:.2}%\n", a.valuation.wacc * 100.0));
    out.push_str(&format!("  Growth:           {:.2}%\n", a.valuation.growth_rate * 100.0));
    out.push_str(&format!("  Intrinsic value:  ${:.2}\n", a.valuation.intrinsic_value));
    out.push_str(&format!(
        "  MOS value:        ${:.2} ({:.0}% margin)\n",
        a.valuation.value_with_margin_of_safety,
        a.quality.margin_of_safety * 100.0
    ));
    out.push_str(&format!("  Discount:         {:.1}%\n", a.assessment.discount_percent));
    out.push_str(&format!("  Upside:           {:.1}%\n", a.assessment.upside_percent));

    out.push_str("\nAssessment\n");
    out.push_str(&format!("  Quality:          {}\n", a.quality.tier));
    out.push_str(&format!("  Rating:           {}\n", a.assessment.rating));
    out.push_str(&format!("  Signal:           {}\n", a.assessment.signal));
    if let Some(warning) = a.assessment.warning {
        out.push_str(&format!("  Warning:          {warning}\n"));
    }
    if !a.value_trap.reasons.is_empty() {
        out.push_str(&format!("  Trap score:       {:.1}\n", a.value_trap.trap_score));
        for reason in &a.value_trap.reasons {
            out.push_str(&format!("    - {reason}\n"));
        }
    }

    let b = score_breakdown(a);
    out.push_str(&format!("\nScore ({} path)\n", path_label(b.path)));
    out.push_str(&format!("  Base:             {:.1}\n", b.base));
    out.push_str(&format!("  Quality:          {:.1}\n", b.quality));
    out.push_str(&format!("  Discount:         {:.1}\n", b.discount));
    out.push_str(&format!("  Signal:           {:.1}\n", b.signal));
    out.push_str(&format!("  FCF:              {:.1}\n", b.fcf_sustainability));
    out.push_str(&format!("  Total:            {:.1}\n", rec.recommendation_score));
    for flag in &b.flags {
        out.push_str(&format!("  note: {}\n", flag_label(*flag)));
    }
    out
}

pub fn render_sectors(table: &SectorTable) -> String {
    let mut out = String::new();
    out.push_str(&format!(
        "{:<14} {:>7} {:>8}  {}\n",
        "Sector", "Growth", "Min ROE", "Tickers"
    ));
    for p in table.profiles() {
        out.push_str(&format!(
            "{:<14} {:>6.1}% {:>7.0}%  {}\n",
            p.name,
            p.base_growth_rate * 100.0,
            p.min_roe_threshold * 100.0,
            p.tickers.join(", ")
        ));
    }
    out
}
