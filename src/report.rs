use std::fmt::Write;

use crate::dashboard::Dashboard;
use crate::models::{CategorySummary, RfmSummary};

fn metric(value: Option<f64>, precision: usize) -> String {
    match value {
        Some(value) => format!("{value:.precision$}"),
        None => "n/a".to_string(),
    }
}

fn category_lines(output: &mut String, rows: &[CategorySummary]) {
    if rows.is_empty() {
        let _ = writeln!(output, "No categories in this window.");
        return;
    }
    for row in rows {
        let _ = writeln!(
            output,
            "- {}: {} items, revenue {:.2}",
            row.category, row.total_orders, row.total_revenue
        );
    }
}

fn customer_lines(output: &mut String, rows: &[RfmSummary]) {
    if rows.is_empty() {
        let _ = writeln!(output, "No customers in this window.");
        return;
    }
    for row in rows {
        let _ = writeln!(
            output,
            "- {}: recency {} days, {} orders, spent {:.2}",
            row.customer_id, row.recency, row.frequency, row.monetary
        );
    }
}

/// Plain-text headline figures for the terminal.
pub fn build_summary(view: &Dashboard) -> String {
    let mut output = String::new();

    let _ = writeln!(
        output,
        "Orders {} to {}: {} lines, {} customers, {} categories",
        view.window.start,
        view.window.end,
        view.filtered_records,
        view.customers.len(),
        view.categories.len()
    );
    if let Some(reference) = view.reference_date {
        let _ = writeln!(output, "Recency measured against {reference}");
    }
    let _ = writeln!(
        output,
        "Average recency {} days, frequency {}, monetary {}",
        metric(view.stats.avg_recency, 1),
        metric(view.stats.avg_frequency, 2),
        metric(view.stats.avg_monetary, 2)
    );

    let _ = writeln!(output);
    let _ = writeln!(output, "Best categories by revenue:");
    category_lines(&mut output, &view.category_rankings.highest_revenue);
    let _ = writeln!(output);
    let _ = writeln!(output, "Top customers by spend:");
    customer_lines(&mut output, &view.customer_rankings.highest_monetary);

    output
}

pub fn build_report(view: &Dashboard) -> String {
    let mut output = String::new();
    let rankings = &view.category_rankings;
    let customers = &view.customer_rankings;

    let _ = writeln!(output, "# Order Analytics Dashboard");
    let _ = writeln!(
        output,
        "Orders placed between {} and {} ({} order lines)",
        view.window.start, view.window.end, view.filtered_records
    );

    if !view.warnings.is_empty() {
        let _ = writeln!(output);
        for warning in &view.warnings {
            let _ = writeln!(output, "> {warning}");
        }
    }

    let _ = writeln!(output);
    let _ = writeln!(output, "## Best and Worst Categories by Items Sold");
    let _ = writeln!(output, "### Best");
    category_lines(&mut output, &rankings.most_orders);
    let _ = writeln!(output, "### Worst");
    category_lines(&mut output, &rankings.fewest_orders);

    let _ = writeln!(output);
    let _ = writeln!(output, "## Highest and Lowest Revenue Categories");
    let _ = writeln!(output, "### Highest");
    category_lines(&mut output, &rankings.highest_revenue);
    let _ = writeln!(output, "### Lowest");
    category_lines(&mut output, &rankings.lowest_revenue);

    let _ = writeln!(output);
    let _ = writeln!(output, "## RFM Performance");
    if let Some(reference) = view.reference_date {
        let _ = writeln!(output, "Recency is measured against {reference}.");
    }
    let _ = writeln!(
        output,
        "- Average recency (days): {}",
        metric(view.stats.avg_recency, 1)
    );
    let _ = writeln!(
        output,
        "- Average frequency: {}",
        metric(view.stats.avg_frequency, 2)
    );
    let _ = writeln!(
        output,
        "- Average monetary: {}",
        metric(view.stats.avg_monetary, 2)
    );

    let _ = writeln!(output);
    let _ = writeln!(output, "### Most Recent Customers");
    customer_lines(&mut output, &customers.most_recent);
    let _ = writeln!(output, "### Most Frequent Customers");
    customer_lines(&mut output, &customers.most_frequent);
    let _ = writeln!(output, "### Highest Spending Customers");
    customer_lines(&mut output, &customers.highest_monetary);

    output
}

pub fn build_json(view: &Dashboard) -> serde_json::Result<String> {
    serde_json::to_string_pretty(view)
}
