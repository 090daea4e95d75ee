use chrono::NaiveDate;
use serde::Serialize;
use tracing::{debug, warn};

use crate::category::{self, CategoryMeasure};
use crate::error::{AnalyticsError, Warning};
use crate::filter::{self, DateWindow};
use crate::models::{CategorySummary, OrderRecord, RfmStats, RfmSummary};
use crate::ranking::Direction;
use crate::rfm::{self, RfmMeasure};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryRankings {
    pub most_orders: Vec<CategorySummary>,
    pub fewest_orders: Vec<CategorySummary>,
    pub highest_revenue: Vec<CategorySummary>,
    pub lowest_revenue: Vec<CategorySummary>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CustomerRankings {
    pub most_recent: Vec<RfmSummary>,
    pub most_frequent: Vec<RfmSummary>,
    pub highest_monetary: Vec<RfmSummary>,
}

/// Everything the presentation layer needs for one date window.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Dashboard {
    pub window: DateWindow,
    /// Latest purchase date across the whole dataset.
    pub reference_date: Option<NaiveDate>,
    pub filtered_records: usize,
    pub customers: Vec<RfmSummary>,
    pub categories: Vec<CategorySummary>,
    pub stats: RfmStats,
    pub category_rankings: CategoryRankings,
    pub customer_rankings: CustomerRankings,
    pub warnings: Vec<Warning>,
}

impl Dashboard {
    /// Builds the view for `window` over the full, unfiltered `records`.
    pub fn build(
        records: &[OrderRecord],
        window: DateWindow,
        limit: usize,
    ) -> Result<Self, AnalyticsError> {
        let filtered = filter::filter_records(records, window.start, window.end)?;
        let reference_date = rfm::reference_date(records);
        debug!(
            start = %window.start,
            end = %window.end,
            matched = filtered.len(),
            total = records.len(),
            "applied date window"
        );

        let customers = match reference_date {
            Some(reference) => rfm::aggregate(filtered.iter().copied(), reference),
            None => Vec::new(),
        };
        let breakdown = category::aggregate(filtered.iter().copied());
        let stats = rfm::stats(&customers);

        let mut warnings = Vec::new();
        if filtered.is_empty() {
            warnings.push(Warning::EmptyResult {
                start: window.start,
                end: window.end,
            });
        }
        if breakdown.uncategorized > 0 {
            warnings.push(Warning::UncategorizedRows {
                count: breakdown.uncategorized,
            });
        }
        for warning in &warnings {
            warn!("{warning}");
        }

        let categories = breakdown.summaries;
        let category_rankings = CategoryRankings {
            most_orders: top_categories(
                &categories,
                CategoryMeasure::TotalOrders,
                Direction::Highest,
                limit,
            ),
            fewest_orders: top_categories(
                &categories,
                CategoryMeasure::TotalOrders,
                Direction::Lowest,
                limit,
            ),
            highest_revenue: top_categories(
                &categories,
                CategoryMeasure::TotalRevenue,
                Direction::Highest,
                limit,
            ),
            lowest_revenue: top_categories(
                &categories,
                CategoryMeasure::TotalRevenue,
                Direction::Lowest,
                limit,
            ),
        };
        let customer_rankings = CustomerRankings {
            most_recent: top_customers(
                &customers,
                RfmMeasure::Recency,
                Direction::Lowest,
                limit,
            ),
            most_frequent: top_customers(
                &customers,
                RfmMeasure::Frequency,
                Direction::Highest,
                limit,
            ),
            highest_monetary: top_customers(
                &customers,
                RfmMeasure::Monetary,
                Direction::Highest,
                limit,
            ),
        };

        Ok(Self {
            window,
            reference_date,
            filtered_records: filtered.len(),
            customers,
            categories,
            stats,
            category_rankings,
            customer_rankings,
            warnings,
        })
    }

    pub fn is_empty(&self) -> bool {
        self.filtered_records == 0
    }
}

fn top_categories(
    summaries: &[CategorySummary],
    measure: CategoryMeasure,
    direction: Direction,
    limit: usize,
) -> Vec<CategorySummary> {
    category::rank(summaries, measure, direction, limit)
        .into_iter()
        .cloned()
        .collect()
}

fn top_customers(
    summaries: &[RfmSummary],
    measure: RfmMeasure,
    direction: Direction,
    limit: usize,
) -> Vec<RfmSummary> {
    rfm::rank(summaries, measure, direction, limit)
        .into_iter()
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testutil::{at, date, order_line, scenario};

    #[test]
    fn full_window_covers_both_summaries() {
        let records = scenario();
        let window = DateWindow::new(date(2018, 1, 1), date(2018, 1, 3)).unwrap();
        let view = Dashboard::build(&records, window, 5).unwrap();

        assert_eq!(view.reference_date, Some(date(2018, 1, 3)));
        assert_eq!(view.filtered_records, 3);
        assert_eq!(view.customers.len(), 2);
        assert_eq!(view.categories.len(), 2);
        assert!(view.warnings.is_empty());
        assert_eq!(view.customer_rankings.most_recent[0].customer_id, "B");
        assert_eq!(view.category_rankings.most_orders[0].category, "X");
        assert_eq!(view.category_rankings.highest_revenue[0].category, "Y");
        assert_eq!(view.category_rankings.lowest_revenue[0].category, "X");
    }

    #[test]
    fn narrowed_window_excludes_earlier_customer() {
        let records = scenario();
        let window = DateWindow::new(date(2018, 1, 2), date(2018, 1, 3)).unwrap();
        let view = Dashboard::build(&records, window, 5).unwrap();

        let customers: Vec<&str> = view.customers.iter().map(|c| c.customer_id.as_str()).collect();
        let categories: Vec<&str> = view.categories.iter().map(|c| c.category.as_str()).collect();
        assert_eq!(customers, vec!["B"]);
        assert_eq!(categories, vec!["Y"]);
    }

    #[test]
    fn empty_window_warns_and_leaves_means_undefined() {
        let records = scenario();
        let window = DateWindow::new(date(2018, 1, 2), date(2018, 1, 2)).unwrap();
        let view = Dashboard::build(&records, window, 5).unwrap();

        assert!(view.is_empty());
        assert!(view.customers.is_empty());
        assert!(view.categories.is_empty());
        assert_eq!(view.stats, RfmStats::default());
        assert_eq!(
            view.warnings,
            vec![Warning::EmptyResult {
                start: date(2018, 1, 2),
                end: date(2018, 1, 2),
            }]
        );
    }

    #[test]
    fn window_outside_dataset_is_empty() {
        let records = scenario();
        let window = DateWindow::resolve(
            Some(date(2019, 5, 1)),
            Some(date(2019, 5, 1)),
            filter::dataset_bounds(&records),
        )
        .unwrap();
        let view = Dashboard::build(&records, window, 5).unwrap();

        assert_eq!(view.window.start, date(2019, 5, 1));
        assert!(view.customers.is_empty());
        assert!(view.categories.is_empty());
        assert_eq!(
            view.warnings,
            vec![Warning::EmptyResult {
                start: date(2019, 5, 1),
                end: date(2019, 5, 1),
            }]
        );
    }

    #[test]
    fn rankings_respect_limit() {
        let records: Vec<OrderRecord> = (0..8)
            .map(|i| {
                order_line(
                    &format!("c{i}"),
                    &format!("o{i}"),
                    Some(format!("cat{i}").as_str()),
                    10.0 + i as f64,
                    at(2018, 1, 1 + i, 9),
                )
            })
            .collect();
        let window = DateWindow::new(date(2018, 1, 1), date(2018, 1, 31)).unwrap();
        let view = Dashboard::build(&records, window, 5).unwrap();

        assert_eq!(view.customers.len(), 8);
        assert_eq!(view.customer_rankings.highest_monetary.len(), 5);
        assert_eq!(view.customer_rankings.highest_monetary[0].customer_id, "c7");
        assert_eq!(view.category_rankings.fewest_orders.len(), 5);
        assert_eq!(view.category_rankings.fewest_orders[0].category, "cat0");
    }

    #[test]
    fn uncategorized_lines_are_reported() {
        let records = vec![
            order_line("A", "1", Some("toys"), 10.0, at(2018, 1, 1, 9)),
            order_line("A", "1", None, 4.0, at(2018, 1, 1, 9)),
        ];
        let window = DateWindow::new(date(2018, 1, 1), date(2018, 1, 1)).unwrap();
        let view = Dashboard::build(&records, window, 5).unwrap();

        assert_eq!(view.warnings, vec![Warning::UncategorizedRows { count: 1 }]);
        assert!((view.customers[0].monetary - 14.0).abs() < 1e-9);
    }
}
