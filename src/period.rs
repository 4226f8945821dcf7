// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Calendar periods as half-open date ranges.
//!
//! A month runs from its first day up to, but excluding, the first day of
//! the next month; a year likewise. Every date filter in the crate, in Rust
//! or in SQL, goes through [`Period::contains`] or `start`/`end` with
//! `>= start AND < end`.

use crate::error::{FinanceError, FinanceResult};
use chrono::{Datelike, NaiveDate};
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Period {
    pub start: NaiveDate,
    /// Exclusive.
    pub end: NaiveDate,
}

impl Period {
    pub fn month(month: u32, year: i32) -> FinanceResult<Period> {
        let invalid = || FinanceError::InvalidPeriod { month, year };
        if !(1..=12).contains(&month) || year < 1 {
            return Err(invalid());
        }
        let start = NaiveDate::from_ymd_opt(year, month, 1).ok_or_else(invalid)?;
        let end = if month == 12 {
            NaiveDate::from_ymd_opt(year + 1, 1, 1)
        } else {
            NaiveDate::from_ymd_opt(year, month + 1, 1)
        }
        .ok_or_else(invalid)?;
        Ok(Period { start, end })
    }

    pub fn year(year: i32) -> FinanceResult<Period> {
        if year < 1 {
            return Err(FinanceError::InvalidYear(year));
        }
        let start = NaiveDate::from_ymd_opt(year, 1, 1).ok_or(FinanceError::InvalidYear(year))?;
        let end =
            NaiveDate::from_ymd_opt(year + 1, 1, 1).ok_or(FinanceError::InvalidYear(year))?;
        Ok(Period { start, end })
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date < self.end
    }

    pub fn month_number(&self) -> u32 {
        self.start.month()
    }

    pub fn year_number(&self) -> i32 {
        self.start.year()
    }
}
