use chrono::{NaiveDate, NaiveDateTime};

use crate::models::OrderRecord;

pub fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).expect("valid date")
}

pub fn at(year: i32, month: u32, day: u32, hour: u32) -> NaiveDateTime {
    date(year, month, day)
        .and_hms_opt(hour, 0, 0)
        .expect("valid time")
}

pub fn order_line(
    customer: &str,
    order: &str,
    category: Option<&str>,
    price: f64,
    purchased: NaiveDateTime,
) -> OrderRecord {
    OrderRecord {
        customer_id: customer.to_string(),
        order_id: order.to_string(),
        purchase_timestamp: purchased,
        product_category: category.map(str::to_string),
        line_price: price,
    }
}

/// Two customers over three lines: A buys twice in one order on Jan 1, B once on Jan 3.
pub fn scenario() -> Vec<OrderRecord> {
    vec![
        order_line("A", "1", Some("X"), 10.0, at(2018, 1, 1, 9)),
        order_line("A", "1", Some("X"), 5.0, at(2018, 1, 1, 9)),
        order_line("B", "2", Some("Y"), 20.0, at(2018, 1, 3, 17)),
    ]
}
