use std::collections::{HashMap, HashSet};

use chrono::NaiveDate;

use crate::models::{OrderRecord, RfmStats, RfmSummary};
use crate::ranking::{self, Direction};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RfmMeasure {
    Recency,
    Frequency,
    Monetary,
}

impl RfmMeasure {
    pub fn value(self, summary: &RfmSummary) -> f64 {
        match self {
            RfmMeasure::Recency => summary.recency as f64,
            RfmMeasure::Frequency => summary.frequency as f64,
            RfmMeasure::Monetary => summary.monetary,
        }
    }
}

struct CustomerTotals<'a> {
    customer_id: &'a str,
    last_purchase: NaiveDate,
    orders: HashSet<&'a str>,
    monetary: f64,
}

/// Latest purchase date in `records`. Pass the whole dataset, not a filtered
/// slice, so recency stays comparable across windows.
pub fn reference_date<'a, I>(records: I) -> Option<NaiveDate>
where
    I: IntoIterator<Item = &'a OrderRecord>,
{
    records
        .into_iter()
        .map(OrderRecord::purchase_date)
        .max()
}

/// One summary per customer, in the order customers first appear.
///
/// `reference_date` must not precede any purchase in `records`; with the
/// value from [`reference_date`] over the full dataset, recency is never
/// negative.
pub fn aggregate<'a, I>(records: I, reference_date: NaiveDate) -> Vec<RfmSummary>
where
    I: IntoIterator<Item = &'a OrderRecord>,
{
    let mut index: HashMap<&'a str, usize> = HashMap::new();
    let mut customers: Vec<CustomerTotals<'a>> = Vec::new();

    for record in records {
        let purchased = record.purchase_date();
        let slot = *index
            .entry(record.customer_id.as_str())
            .or_insert_with(|| {
                customers.push(CustomerTotals {
                    customer_id: record.customer_id.as_str(),
                    last_purchase: purchased,
                    orders: HashSet::new(),
                    monetary: 0.0,
                });
                customers.len() - 1
            });

        let entry = &mut customers[slot];
        entry.last_purchase = entry.last_purchase.max(purchased);
        entry.orders.insert(record.order_id.as_str());
        entry.monetary += record.line_price;
    }

    customers
        .into_iter()
        .map(|totals| RfmSummary {
            customer_id: totals.customer_id.to_string(),
            recency: (reference_date - totals.last_purchase).num_days(),
            frequency: totals.orders.len(),
            monetary: totals.monetary,
        })
        .collect()
}

pub fn stats(summaries: &[RfmSummary]) -> RfmStats {
    RfmStats {
        avg_recency: mean(summaries, RfmMeasure::Recency),
        avg_frequency: mean(summaries, RfmMeasure::Frequency),
        avg_monetary: mean(summaries, RfmMeasure::Monetary),
    }
}

fn mean(summaries: &[RfmSummary], measure: RfmMeasure) -> Option<f64> {
    if summaries.is_empty() {
        return None;
    }
    let total: f64 = summaries.iter().map(|s| measure.value(s)).sum();
    Some(total / summaries.len() as f64)
}

pub fn rank(
    summaries: &[RfmSummary],
    measure: RfmMeasure,
    direction: Direction,
    n: usize,
) -> Vec<&RfmSummary> {
    ranking::rank_by(summaries, n, direction, |s| measure.value(s))
}
