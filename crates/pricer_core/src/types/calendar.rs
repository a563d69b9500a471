//! Business-day calendars and date rolling.
//!
//! A [`Calendar`] answers one question: is a date a business day?
//! Everything else (business-day adjustment, business-day arithmetic) is
//! built on top of that predicate.

use std::collections::BTreeSet;

use super::time::{BusinessDayConvention, Date};

/// Holiday calendar abstraction.
///
/// Implementations must be pure: the same date always yields the same answer.
pub trait Calendar: Send + Sync {
    /// Returns true if `date` is a business day.
    fn is_business_day(&self, date: Date) -> bool;

    /// Calendar identifier used in logs and error messages.
    fn name(&self) -> &str;
}

/// Monday to Friday calendar without holidays.
///
/// This is the calendar of the ISDA standard CDS model.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct WeekendCalendar;

impl Calendar for WeekendCalendar {
    #[inline]
    fn is_business_day(&self, date: Date) -> bool {
        !date.is_weekend()
    }

    fn name(&self) -> &str {
        "MondayToFriday"
    }
}

/// Weekend calendar extended with an explicit holiday list.
///
/// # Examples
///
/// ```
/// use pricer_core::types::calendar::{Calendar, HolidayCalendar};
/// use pricer_core::types::Date;
///
/// let xmas = Date::from_ymd(2013, 12, 25).unwrap();
/// let cal = HolidayCalendar::new("LON", [xmas]);
/// assert!(!cal.is_business_day(xmas));
/// assert!(cal.is_business_day(xmas.add_days(1)));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct HolidayCalendar {
    name: String,
    holidays: BTreeSet<Date>,
}

impl HolidayCalendar {
    /// Creates a calendar from a name and a set of holiday dates.
    pub fn new(name: impl Into<String>, holidays: impl IntoIterator<Item = Date>) -> Self {
        Self {
            name: name.into(),
            holidays: holidays.into_iter().collect(),
        }
    }

    /// Returns the configured holidays in ascending order.
    pub fn holidays(&self) -> impl Iterator<Item = &Date> {
        self.holidays.iter()
    }
}

impl Calendar for HolidayCalendar {
    fn is_business_day(&self, date: Date) -> bool {
        !date.is_weekend() && !self.holidays.contains(&date)
    }

    fn name(&self) -> &str {
        &self.name
    }
}

impl BusinessDayConvention {
    /// Rolls `date` onto a business day of `calendar`.
    ///
    /// # Examples
    ///
    /// ```
    /// use pricer_core::types::calendar::WeekendCalendar;
    /// use pricer_core::types::{BusinessDayConvention, Date};
    ///
    /// // 2013-06-22 is a Saturday
    /// let sat = Date::from_ymd(2013, 6, 22).unwrap();
    /// let adj = BusinessDayConvention::Following.adjust(sat, &WeekendCalendar);
    /// assert_eq!(adj, Date::from_ymd(2013, 6, 24).unwrap());
    /// ```
    pub fn adjust<C: Calendar + ?Sized>(&self, date: Date, calendar: &C) -> Date {
        match self {
            BusinessDayConvention::Unadjusted => date,
            BusinessDayConvention::Following => roll(date, 1, calendar),
            BusinessDayConvention::Preceding => roll(date, -1, calendar),
            BusinessDayConvention::ModifiedFollowing => {
                let adjusted = roll(date, 1, calendar);
                if adjusted.month() != date.month() {
                    roll(date, -1, calendar)
                } else {
                    adjusted
                }
            }
            BusinessDayConvention::ModifiedPreceding => {
                let adjusted = roll(date, -1, calendar);
                if adjusted.month() != date.month() {
                    roll(date, 1, calendar)
                } else {
                    adjusted
                }
            }
        }
    }
}

fn roll<C: Calendar + ?Sized>(mut date: Date, step: i64, calendar: &C) -> Date {
    while !calendar.is_business_day(date) {
        date = date.add_days(step);
    }
    date
}

/// Adds `n` business days to `date`.
///
/// Each step moves one calendar day and then rolls Following, so the
/// result of `n` steps is always a business day. Negative `n` walks
/// backwards with Preceding.
///
/// # Examples
///
/// ```
/// use pricer_core::types::calendar::{add_business_days, WeekendCalendar};
/// use pricer_core::types::Date;
///
/// // Thursday + 3 business days = Tuesday
/// let thu = Date::from_ymd(2013, 6, 20).unwrap();
/// let settle = add_business_days(thu, 3, &WeekendCalendar);
/// assert_eq!(settle, Date::from_ymd(2013, 6, 25).unwrap());
/// ```
pub fn add_business_days<C: Calendar + ?Sized>(date: Date, n: i32, calendar: &C) -> Date {
    let step = if n >= 0 { 1 } else { -1 };
    (0..n.unsigned_abs()).fold(date, |d, _| roll(d.add_days(step), step, calendar))
}
