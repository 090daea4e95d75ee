use chrono::NaiveDate;
use serde::Serialize;

use crate::error::AnalyticsError;
use crate::models::OrderRecord;

/// Inclusive `[start, end]` range of purchase dates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DateWindow {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateWindow {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Result<Self, AnalyticsError> {
        if start > end {
            return Err(AnalyticsError::InvalidRange { start, end });
        }
        Ok(Self { start, end })
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }

    /// Fills missing bounds from `dataset`. Explicit bounds are kept as given,
    /// so a window outside the dataset stays outside it and matches nothing.
    pub fn resolve(
        start: Option<NaiveDate>,
        end: Option<NaiveDate>,
        dataset: Option<DateWindow>,
    ) -> Result<Self, AnalyticsError> {
        let (start, end) = match (start, end, dataset) {
            (Some(start), Some(end), _) => (start, end),
            (start, end, Some(bounds)) => {
                (start.unwrap_or(bounds.start), end.unwrap_or(bounds.end))
            }
            _ => return Err(AnalyticsError::NoDefaultWindow),
        };
        Self::new(start, end)
    }
}

/// First and last purchase date in `records`.
pub fn dataset_bounds<'a, I>(records: I) -> Option<DateWindow>
where
    I: IntoIterator<Item = &'a OrderRecord>,
{
    records.into_iter().fold(None, |bounds, record| {
        let date = record.purchase_date();
        Some(match bounds {
            None => DateWindow {
                start: date,
                end: date,
            },
            Some(window) => DateWindow {
                start: window.start.min(date),
                end: window.end.max(date),
            },
        })
    })
}

/// Keeps the records purchased between `start_date` and `end_date`, both
/// inclusive and compared by calendar date only. Input order is preserved.
pub fn filter_records(
    records: &[OrderRecord],
    start_date: NaiveDate,
    end_date: NaiveDate,
) -> Result<Vec<&OrderRecord>, AnalyticsError> {
    let window = DateWindow::new(start_date, end_date)?;
    Ok(records
        .iter()
        .filter(|record| window.contains(record.purchase_date()))
        .collect())
}
