//! Plain-text rendering of a finished comparison

use levsim_core::{HistoricalRun, SummaryStatistics};

use crate::util::format::{format_percentage, format_price};

fn position_lines(
    lines: &mut Vec<String>,
    label: &str,
    stats: &SummaryStatistics,
    theoretical: f64,
) {
    let p = &stats.terminal_percentiles;
    lines.push(format!(
        " Mean Price ({label}): {}",
        format_price(stats.mean_terminal_price)
    ));
    lines.push(format!(
        " Median Price ({label}): {}",
        format_price(stats.median_terminal_price)
    ));
    lines.push(format!(
        " Log Average Price ({label}): {}",
        format_price(stats.log_mean_terminal_price)
    ));
    lines.push(format!(
        " Annualized Median Volatility ({label}): {}",
        format_percentage(stats.median_annualized_volatility)
    ));
    lines.push(format!(
        " Annualized Median Geometric Return ({label}): {}",
        format_percentage(stats.median_annualized_return)
    ));
    lines.push(format!(
        " Theoretical Geometric Return ({label}): {}",
        format_percentage(theoretical)
    ));
    lines.push(format!(
        " Terminal Price P5 / P50 / P95 ({label}): {} / {} / {}",
        format_price(p.p5),
        format_price(p.p50),
        format_price(p.p95)
    ));
}

/// Render the estimate and both positions' statistics.
pub fn render(ticker: &str, result: &HistoricalRun) -> String {
    let comparison = &result.run.comparison;
    let params = &comparison.parameters;
    let leveraged_label = format!("{}x Leveraged", params.leverage);

    let mut lines = vec![
        format!(
            " {} over {} years, {} paths, estimated from the last {} years",
            ticker.to_uppercase(),
            params.horizon_years,
            params.path_count,
            result.estimate.window_years
        ),
        format!(
            " Annual Return: {}",
            format_percentage(result.estimate.annual_return)
        ),
        format!(
            " Annual Volatility: {}",
            format_percentage(result.estimate.annual_volatility)
        ),
        String::new(),
    ];

    position_lines(
        &mut lines,
        "Regular",
        &comparison.unleveraged,
        comparison.theoretical.unleveraged,
    );
    lines.push(String::new());
    position_lines(
        &mut lines,
        &leveraged_label,
        &comparison.leveraged,
        comparison.theoretical.leveraged,
    );

    lines.join("\n")
}
