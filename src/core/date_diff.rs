//! Calendar difference engine.
//!
//! Chrono has no year/month/day difference, so the borrowing rules are done
//! by hand: a negative day count borrows the length of the month before the
//! target's month, and a negative month count borrows a year. When the start
//! day does not exist in that month, the borrow is anchored at its last day.
//!
//! The total day count is taken from the date delta directly and is never
//! derived from the year/month/day breakdown.

use crate::domain::model::DateDifference;
use crate::utils::error::{Result, ToolError};
use chrono::{Datelike, NaiveDate};

pub const DISPLAY_DATE_FORMAT: &str = "%d-%m-%Y";

/// Computes the elapsed breakdown from `start` to `target`.
///
/// Returns [`ToolError::InvalidRange`] when `start` is after `target`.
/// A Feb 29 start whose anniversary lands in a non-leap year is celebrated
/// on Feb 28.
///
/// Returns [`ToolError::ProcessingError`] when the next anniversary falls
/// after [`NaiveDate::MAX`], which only happens for targets in chrono's last
/// supported year.
pub fn compute_difference(start: NaiveDate, target: NaiveDate) -> Result<DateDifference> {
    if start > target {
        return Err(ToolError::InvalidRange { start, target });
    }

    let mut years = target.year() - start.year();
    let mut months = target.month() as i32 - start.month() as i32;
    let mut days = target.day() as i32 - start.day() as i32;

    if days < 0 {
        months -= 1;
        // start 的日期在前一個月不存在時 (例如 1/31 -> 2 月)，以月底為基準
        let (prev_year, prev_month) = previous_month(target.year(), target.month());
        let prev_len = days_in_month(prev_year, prev_month) as i32;
        days = target.day() as i32 + (prev_len - start.day() as i32).max(0);
    }

    if months < 0 {
        years -= 1;
        months += 12;
    }

    let total_days = (target - start).num_days();
    let total_weeks = total_days.div_euclid(7);
    let remaining_days = total_days.rem_euclid(7);
    let total_months = years * 12 + months;

    let mut next_anniversary = anniversary_in(start, target.year())?;
    if next_anniversary < target {
        next_anniversary = anniversary_in(start, target.year() + 1)?;
    }
    let days_until_next_anniversary = (next_anniversary - target).num_days();

    tracing::trace!(
        %start,
        %target,
        years,
        months,
        days,
        total_days,
        "computed date difference"
    );

    Ok(DateDifference {
        start,
        target,
        years,
        months,
        days,
        total_days,
        total_weeks,
        remaining_days,
        total_months,
        next_anniversary,
        days_until_next_anniversary,
    })
}

/// `start`'s month and day placed in `year`, clamping Feb 29 to Feb 28.
pub fn anniversary_in(start: NaiveDate, year: i32) -> Result<NaiveDate> {
    NaiveDate::from_ymd_opt(year, start.month(), start.day())
        .or_else(|| {
            if start.month() == 2 && start.day() == 29 {
                NaiveDate::from_ymd_opt(year, 2, 28)
            } else {
                None
            }
        })
        .ok_or_else(|| ToolError::ProcessingError {
            message: format!("year {} is outside the supported calendar range", year),
        })
}

fn previous_month(year: i32, month: u32) -> (i32, u32) {
    if month == 1 {
        (year - 1, 12)
    } else {
        (year, month - 1)
    }
}

pub fn days_in_month(year: i32, month: u32) -> u32 {
    match month {
        1 | 3 | 5 | 7 | 8 | 10 | 12 => 31,
        4 | 6 | 9 | 11 => 30,
        2 if is_leap_year(year) => 29,
        2 => 28,
        _ => 30,
    }
}

pub fn is_leap_year(year: i32) -> bool {
    (year % 4 == 0 && year % 100 != 0) || year % 400 == 0
}

/// DD-MM-YYYY, the display format of the age calculator page.
pub fn format_display_date(date: NaiveDate) -> String {
    date.format(DISPLAY_DATE_FORMAT).to_string()
}

impl DateDifference {
    pub fn age_statement(&self) -> String {
        format!(
            "You are {} years, {} months, and {} days old as of {}.",
            self.years,
            self.months,
            self.days,
            format_display_date(self.target)
        )
    }

    pub fn weeks_label(&self) -> String {
        format!("{} weeks, {} days", self.total_weeks, self.remaining_days)
    }

    /// Compact `24y 0m 1d` form.
    pub fn short_label(&self) -> String {
        format!("{}y {}m {}d", self.years, self.months, self.days)
    }
}
