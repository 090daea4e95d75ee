use std::collections::HashMap;

use crate::models::{CategorySummary, OrderRecord};
use crate::ranking::{self, Direction};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CategoryMeasure {
    TotalOrders,
    TotalRevenue,
}

impl CategoryMeasure {
    pub fn value(self, summary: &CategorySummary) -> f64 {
        match self {
            CategoryMeasure::TotalOrders => summary.total_orders as f64,
            CategoryMeasure::TotalRevenue => summary.total_revenue,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct CategoryBreakdown {
    pub summaries: Vec<CategorySummary>,
    /// Lines skipped because they carry no category.
    pub uncategorized: usize,
}

/// Groups line items by product category in first-seen order. Lines without a
/// category are counted in `uncategorized` and otherwise left out.
pub fn aggregate<'a, I>(records: I) -> CategoryBreakdown
where
    I: IntoIterator<Item = &'a OrderRecord>,
{
    let mut index: HashMap<&'a str, usize> = HashMap::new();
    let mut summaries: Vec<CategorySummary> = Vec::new();
    let mut uncategorized = 0usize;

    for record in records {
        let Some(category) = record.category() else {
            uncategorized += 1;
            continue;
        };

        let slot = *index.entry(category).or_insert_with(|| {
            summaries.push(CategorySummary {
                category: category.to_string(),
                total_orders: 0,
                total_revenue: 0.0,
            });
            summaries.len() - 1
        });

        let entry = &mut summaries[slot];
        entry.total_orders += 1;
        entry.total_revenue += record.line_price;
    }

    CategoryBreakdown {
        summaries,
        uncategorized,
    }
}

pub fn rank(
    summaries: &[CategorySummary],
    measure: CategoryMeasure,
    direction: Direction,
    n: usize,
) -> Vec<&CategorySummary> {
    ranking::rank_by(summaries, n, direction, |s| measure.value(s))
}
