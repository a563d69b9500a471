//! Period definition for scheduled instruments.

use pricer_core::types::{Date, DayCountConvention};
use std::fmt;

/// A single accrual period in a schedule.
///
/// Accrual dates are business-day adjusted; the payment date is the
/// adjusted accrual end unless set otherwise.
///
/// # Examples
///
/// ```
/// use pricer_models::schedules::Period;
/// use pricer_core::types::{Date, DayCountConvention};
///
/// let period = Period::new(
///     Date::from_ymd(2024, 1, 15).unwrap(),
///     Date::from_ymd(2024, 7, 15).unwrap(),
///     Date::from_ymd(2024, 7, 17).unwrap(),
///     DayCountConvention::Actual360,
/// );
///
/// assert!((period.year_fraction() - 182.0 / 360.0).abs() < 1e-15);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Period {
    start: Date,
    end: Date,
    payment: Date,
    day_count: DayCountConvention,
}

impl Period {
    /// Creates a period from its accrual dates, payment date and day count.
    #[inline]
    pub fn new(start: Date, end: Date, payment: Date, day_count: DayCountConvention) -> Self {
        Self {
            start,
            end,
            payment,
            day_count,
        }
    }

    /// Creates a period paying on its accrual end date.
    #[inline]
    pub fn with_payment_on_end(start: Date, end: Date, day_count: DayCountConvention) -> Self {
        Self::new(start, end, end, day_count)
    }

    /// Accrual start date.
    #[inline]
    pub fn start(&self) -> Date {
        self.start
    }

    /// Accrual end date.
    #[inline]
    pub fn end(&self) -> Date {
        self.end
    }

    /// Payment date.
    #[inline]
    pub fn payment(&self) -> Date {
        self.payment
    }

    /// Accrual day count.
    #[inline]
    pub fn day_count(&self) -> DayCountConvention {
        self.day_count
    }

    /// Accrual year fraction between start and end.
    #[inline]
    pub fn year_fraction(&self) -> f64 {
        self.day_count.year_fraction(self.start, self.end)
    }

    /// Calendar days between start and end.
    #[inline]
    pub fn days(&self) -> i64 {
        self.end - self.start
    }

    /// Returns whether the date lies in `[start, end)`.
    ///
    /// ```
    /// use pricer_models::schedules::Period;
    /// use pricer_core::types::{Date, DayCountConvention};
    ///
    /// let period = Period::with_payment_on_end(
    ///     Date::from_ymd(2024, 1, 1).unwrap(),
    ///     Date::from_ymd(2024, 7, 1).unwrap(),
    ///     DayCountConvention::Actual365Fixed,
    /// );
    ///
    /// assert!(period.contains(Date::from_ymd(2024, 1, 1).unwrap()));
    /// assert!(!period.contains(Date::from_ymd(2024, 7, 1).unwrap()));
    /// ```
    #[inline]
    pub fn contains(&self, date: Date) -> bool {
        date >= self.start && date < self.end
    }
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Period({} to {}, pay {}, {})",
            self.start, self.end, self.payment, self.day_count
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_days_and_fraction() {
        let period = Period::with_payment_on_end(
            Date::from_ymd(2024, 1, 15).unwrap(),
            Date::from_ymd(2024, 7, 15).unwrap(),
            DayCountConvention::Thirty360,
        );
        assert_eq!(period.days(), 182);
        assert_eq!(period.year_fraction(), 0.5);
        assert_eq!(period.payment(), period.end());
    }

    #[test]
    fn test_display() {
        let period = Period::new(
            Date::from_ymd(2024, 1, 15).unwrap(),
            Date::from_ymd(2024, 7, 15).unwrap(),
            Date::from_ymd(2024, 7, 17).unwrap(),
            DayCountConvention::Actual360,
        );
        assert_eq!(
            period.to_string(),
            "Period(2024-01-15 to 2024-07-15, pay 2024-07-17, ACT/360)"
        );
    }
}
