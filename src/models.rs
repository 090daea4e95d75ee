use chrono::{NaiveDate, NaiveDateTime};
use serde::Serialize;

/// One product line of an order.
#[derive(Debug, Clone, PartialEq)]
pub struct OrderRecord {
    pub customer_id: String,
    pub order_id: String,
    pub purchase_timestamp: NaiveDateTime,
    pub product_category: Option<String>,
    pub line_price: f64,
}

impl OrderRecord {
    pub fn purchase_date(&self) -> NaiveDate {
        self.purchase_timestamp.date()
    }

    /// Category name, treating blank values as missing.
    pub fn category(&self) -> Option<&str> {
        self.product_category
            .as_deref()
            .map(str::trim)
            .filter(|name| !name.is_empty())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RfmSummary {
    pub customer_id: String,
    pub recency: i64,
    pub frequency: usize,
    pub monetary: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategorySummary {
    pub category: String,
    pub total_orders: usize,
    pub total_revenue: f64,
}

/// Means over the RFM table. `None` when the table is empty.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct RfmStats {
    pub avg_recency: Option<f64>,
    pub avg_frequency: Option<f64>,
    pub avg_monetary: Option<f64>,
}
