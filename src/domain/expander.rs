// src/domain/expander.rs

use crate::domain::pricing::{DailyRow, DetailId, ExpandedTable, PriceRecord};
use chrono::{Duration, NaiveDate};
use rust_decimal::{Decimal, RoundingStrategy};
use thiserror::Error;

/// Prices are kept to the cent.
const PRICE_SCALE: u32 = 2;

/// Longest period a single record may cover (ten years of daily rows).
pub const MAX_PERIOD_DAYS: i64 = 3660;

#[derive(Debug, Error, PartialEq)]
pub enum ExpandError {
    #[error("invalid date range: {start} to {end} covers {days} day(s), end date is excluded")]
    InvalidRange {
        start: NaiveDate,
        end: NaiveDate,
        days: i64,
    },

    #[error("date range {start} to {end} covers {days} days, more than the {max} day limit")]
    RangeTooLong {
        start: NaiveDate,
        end: NaiveDate,
        days: i64,
        max: i64,
    },

    #[error("period price {price} is too large to split over {days} day(s)")]
    PriceOverflow { price: Decimal, days: i64 },
}

/// Rounds to the cent, midpoints to the even cent.
pub fn round_price(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(PRICE_SCALE, RoundingStrategy::MidpointNearestEven)
}

/// Splits `period_price` over every day of `[start_date, end_date)`.
///
/// Every day gets the rounded even share, except the last day which absorbs
/// the rounding drift so the rows add up to the period price.
pub fn expand(
    period_price: Decimal,
    detail_id: &DetailId,
    start_date: NaiveDate,
    end_date: NaiveDate,
) -> Result<Vec<DailyRow>, ExpandError> {
    let days = (end_date - start_date).num_days();
    if days <= 0 {
        return Err(ExpandError::InvalidRange {
            start: start_date,
            end: end_date,
            days,
        });
    }
    if days > MAX_PERIOD_DAYS {
        return Err(ExpandError::RangeTooLong {
            start: start_date,
            end: end_date,
            days,
            max: MAX_PERIOD_DAYS,
        });
    }

    let overflow = || ExpandError::PriceOverflow {
        price: period_price,
        days,
    };
    let day_count = Decimal::from(days);
    let share = period_price.checked_div(day_count).ok_or_else(overflow)?;
    let daily_price = round_price(share);
    let spread = daily_price
        .checked_mul(day_count)
        .and_then(|total| total.checked_sub(period_price))
        .ok_or_else(overflow)?;
    let drift = round_price(spread);
    let last_day_price = daily_price.checked_sub(drift).ok_or_else(overflow)?;

    let rows = (0..days)
        .map(|i| DailyRow {
            detail_id: detail_id.clone(),
            date: start_date + Duration::days(i),
            daily_price: if i == days - 1 {
                last_day_price
            } else {
                daily_price
            },
            active: true,
            min_duration: String::new(),
            max_duration: String::new(),
            arrival_allowed: true,
        })
        .collect();

    Ok(rows)
}

pub fn expand_record(record: &PriceRecord) -> Result<Vec<DailyRow>, ExpandError> {
    expand(
        record.period_price,
        &record.detail_id,
        record.start_date,
        record.end_date,
    )
}

/// Expands every record into one table, stopping at the first bad range.
/// The error carries the index of the failing record.
pub fn expand_all(records: &[PriceRecord]) -> Result<ExpandedTable, (usize, ExpandError)> {
    let capacity = records
        .iter()
        .map(|r| {
            let days = (r.end_date - r.start_date).num_days();
            days.clamp(0, MAX_PERIOD_DAYS) as usize
        })
        .sum();
    let mut table = ExpandedTable::with_capacity(capacity);

    for (i, record) in records.iter().enumerate() {
        let rows = expand_record(record).map_err(|e| (i, e))?;
        table.extend(rows);
    }

    Ok(table)
}
