use chrono::NaiveDate;

use crate::error::LivestockFinanceError;
use crate::LivestockFinanceResult;

/// Bounds on the accrual calendar. Records outside this window are almost
/// certainly data-entry mistakes, not history or planning horizons.
pub const MIN_YEAR: i32 = 1900;
pub const MAX_YEAR: i32 = 2200;

const MONTH_ABBREVS: [&str; 12] = [
    "jan", "feb", "mar", "apr", "may", "jun", "jul", "aug", "sep", "oct", "nov", "dec",
];

/// Exact day count of a calendar month, leap-aware.
pub fn days_in_month(year: i32, month: u32) -> LivestockFinanceResult<u32> {
    if !(MIN_YEAR..=MAX_YEAR).contains(&year) || !(1..=12).contains(&month) {
        return Err(LivestockFinanceError::InvalidPeriod { year, month });
    }

    let first = NaiveDate::from_ymd_opt(year, month, 1)
        .ok_or(LivestockFinanceError::InvalidPeriod { year, month })?;
    let next_first = if month == 12 {
        NaiveDate::from_ymd_opt(year + 1, 1, 1)
    } else {
        NaiveDate::from_ymd_opt(year, month + 1, 1)
    }
    .ok_or(LivestockFinanceError::InvalidPeriod { year, month })?;

    Ok((next_first - first).num_days() as u32)
}

/// Day count to accrue over for a month, honoring a custom period override
/// (e.g. a 15-day partial month at lot entry). The period itself must be
/// valid even when overridden; a zero-day override is rejected.
pub fn effective_days(
    year: i32,
    month: u32,
    custom_days: Option<u32>,
) -> LivestockFinanceResult<u32> {
    let calendar_days = days_in_month(year, month)?;
    match custom_days {
        None => Ok(calendar_days),
        Some(0) => Err(LivestockFinanceError::InvalidInput {
            field: "custom_period_days".into(),
            reason: format!("custom period for {month}/{year} must be at least 1 day"),
        }),
        Some(d) => Ok(d),
    }
}

/// Short period label, e.g. "jan/2025".
pub fn month_label(year: i32, month: u32) -> LivestockFinanceResult<String> {
    let idx = month
        .checked_sub(1)
        .filter(|i| *i < 12)
        .ok_or(LivestockFinanceError::InvalidPeriod { year, month })? as usize;
    Ok(format!("{}/{}", MONTH_ABBREVS[idx], year))
}
