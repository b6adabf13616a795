//! Month-grid date math for the calendar view.
//!
//! The visible grid covers every full Sunday-to-Saturday week overlapping
//! the displayed month, so a month renders as four to six rows of seven.

use chrono::{Datelike, Duration, NaiveDate};

/// A calendar month, identified by year and 1-based month number.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct YearMonth {
    first: NaiveDate,
}

impl YearMonth {
    /// The month numbered `month` (1-12) of `year`, or `None` when the
    /// month number is out of range.
    pub fn new(year: i32, month: u32) -> Option<Self> {
        NaiveDate::from_ymd_opt(year, month, 1).map(|first| Self { first })
    }

    /// The month containing `date`.
    pub fn from_date(date: NaiveDate) -> Self {
        Self {
            // with_day(1) cannot fail: every month has a day 1.
            first: date.with_day(1).unwrap_or(date),
        }
    }

    pub fn year(self) -> i32 {
        self.first.year()
    }

    pub fn month(self) -> u32 {
        self.first.month()
    }

    pub fn first_day(self) -> NaiveDate {
        self.first
    }

    pub fn last_day(self) -> NaiveDate {
        self.next().first_day() - Duration::days(1)
    }

    pub fn next(self) -> Self {
        let (year, month) = if self.month() == 12 {
            (self.year() + 1, 1)
        } else {
            (self.year(), self.month() + 1)
        };
        Self::new(year, month).unwrap_or(self)
    }

    pub fn prev(self) -> Self {
        let (year, month) = if self.month() == 1 {
            (self.year() - 1, 12)
        } else {
            (self.year(), self.month() - 1)
        };
        Self::new(year, month).unwrap_or(self)
    }

    pub fn contains(self, date: NaiveDate) -> bool {
        date.year() == self.year() && date.month() == self.month()
    }
}

/// The full-week date window rendered for one month.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MonthGrid {
    pub month: YearMonth,
    /// The Sunday on or before the first of the month.
    pub start: NaiveDate,
    /// The Saturday on or after the last day of the month.
    pub end: NaiveDate,
}

impl MonthGrid {
    pub fn for_month(month: YearMonth) -> Self {
        let start = start_of_week(month.first_day());
        let end = start_of_week(month.last_day()) + Duration::days(6);
        Self { month, start, end }
    }

    /// Every date in the grid, in order.
    pub fn days(&self) -> impl Iterator<Item = NaiveDate> {
        let end = self.end;
        self.start.iter_days().take_while(move |d| *d <= end)
    }

    /// The grid as rows of seven days, Sunday first.
    pub fn weeks(&self) -> Vec<[NaiveDate; 7]> {
        let mut weeks = Vec::new();
        let mut day = self.start;
        while day <= self.end {
            let mut week = [day; 7];
            for slot in week.iter_mut() {
                *slot = day;
                day += Duration::days(1);
            }
            weeks.push(week);
        }
        weeks
    }
}

/// The Sunday on or before `date`.
fn start_of_week(date: NaiveDate) -> NaiveDate {
    date - Duration::days(date.weekday().num_days_from_sunday() as i64)
}
