use std::io;
use std::path::Path;

use anyhow::Context;
use chrono::{NaiveDate, NaiveDateTime};
use csv::StringRecord;
use serde::Deserialize;
use tracing::{debug, info};

use crate::error::AnalyticsError;
use crate::models::OrderRecord;

/// Accepted header names per field, in order of preference.
const CUSTOMER_COLUMNS: &[&str] = &["customer_unique_id", "customer_id"];
const ORDER_COLUMNS: &[&str] = &["order_id"];
const TIMESTAMP_COLUMNS: &[&str] = &["order_purchase_timestamp", "purchase_timestamp"];
const CATEGORY_COLUMNS: &[&str] = &[
    "product_category_name_english",
    "product_category",
    "product_category_name",
];
const PRICE_COLUMNS: &[&str] = &["price_y", "price", "line_price"];

const DATETIME_FORMATS: &[&str] = &["%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M:%S%.f"];

#[derive(Debug, Deserialize)]
struct CsvRow {
    customer_id: String,
    order_id: String,
    purchase_timestamp: String,
    product_category: Option<String>,
    line_price: f64,
}

struct ColumnMap {
    customer_id: usize,
    order_id: usize,
    purchase_timestamp: usize,
    product_category: Option<usize>,
    line_price: usize,
}

impl ColumnMap {
    fn from_headers(headers: &StringRecord) -> Result<Self, AnalyticsError> {
        Ok(Self {
            customer_id: required(headers, CUSTOMER_COLUMNS)?,
            order_id: required(headers, ORDER_COLUMNS)?,
            purchase_timestamp: required(headers, TIMESTAMP_COLUMNS)?,
            product_category: locate(headers, CATEGORY_COLUMNS),
            line_price: required(headers, PRICE_COLUMNS)?,
        })
    }

    /// Projects a raw row onto the canonical field order of [`CsvRow`].
    fn project(&self, record: &StringRecord) -> StringRecord {
        let field = |idx: usize| record.get(idx).unwrap_or("");
        StringRecord::from(vec![
            field(self.customer_id),
            field(self.order_id),
            field(self.purchase_timestamp),
            self.product_category.map(field).unwrap_or(""),
            field(self.line_price),
        ])
    }
}

fn locate(headers: &StringRecord, candidates: &[&str]) -> Option<usize> {
    candidates
        .iter()
        .find_map(|name| headers.iter().position(|header| header.trim() == *name))
}

fn required(headers: &StringRecord, candidates: &[&str]) -> Result<usize, AnalyticsError> {
    locate(headers, candidates).ok_or_else(|| AnalyticsError::MissingColumn {
        candidates: candidates.join(", "),
    })
}

pub fn parse_timestamp(value: &str) -> Option<NaiveDateTime> {
    let value = value.trim();
    DATETIME_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(value, format).ok())
        .or_else(|| {
            NaiveDate::parse_from_str(value, "%Y-%m-%d")
                .ok()
                .and_then(|date| date.and_hms_opt(0, 0, 0))
        })
}

pub fn load_csv(csv_path: &Path) -> anyhow::Result<Vec<OrderRecord>> {
    let file = std::fs::File::open(csv_path)
        .with_context(|| format!("failed to open {}", csv_path.display()))?;
    let records = read_orders(file)?;
    info!(
        path = %csv_path.display(),
        records = records.len(),
        "loaded order lines"
    );
    Ok(records)
}

/// Reads order lines from CSV, sorted by purchase timestamp.
pub fn read_orders<R: io::Read>(reader: R) -> anyhow::Result<Vec<OrderRecord>> {
    let mut reader = csv::ReaderBuilder::new().flexible(true).from_reader(reader);
    let columns = ColumnMap::from_headers(reader.headers()?)?;
    let canonical = StringRecord::from(vec![
        "customer_id",
        "order_id",
        "purchase_timestamp",
        "product_category",
        "line_price",
    ]);

    let mut orders = Vec::new();

    for (idx, result) in reader.records().enumerate() {
        let row_number = idx + 1;
        let raw = result.with_context(|| format!("failed to read row {row_number}"))?;
        let row: CsvRow = columns
            .project(&raw)
            .deserialize(Some(&canonical))
            .map_err(|err| AnalyticsError::InvalidRow {
                row: row_number,
                message: err.to_string(),
            })?;

        let purchase_timestamp =
            parse_timestamp(&row.purchase_timestamp).ok_or_else(|| AnalyticsError::InvalidRow {
                row: row_number,
                message: format!("unrecognised timestamp '{}'", row.purchase_timestamp),
            })?;

        if row.customer_id.trim().is_empty() || row.order_id.trim().is_empty() {
            return Err(AnalyticsError::InvalidRow {
                row: row_number,
                message: "customer and order ids must not be blank".to_string(),
            }
            .into());
        }

        if !row.line_price.is_finite() || row.line_price < 0.0 {
            return Err(AnalyticsError::InvalidRow {
                row: row_number,
                message: format!("price must be a non-negative number, got {}", row.line_price),
            }
            .into());
        }

        let product_category = row
            .product_category
            .map(|name| name.trim().to_string())
            .filter(|name| !name.is_empty());

        orders.push(OrderRecord {
            customer_id: row.customer_id,
            order_id: row.order_id,
            purchase_timestamp,
            product_category,
            line_price: row.line_price,
        });
    }

    orders.sort_by_key(|order| order.purchase_timestamp);
    debug!(records = orders.len(), "parsed order csv");
    Ok(orders)
}
