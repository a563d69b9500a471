//! Schedule and ScheduleBuilder implementation.

use std::fmt;
use std::sync::Arc;

use super::error::ScheduleError;
use super::frequency::Frequency;
use super::period::Period;
use pricer_core::types::{BusinessDayConvention, Calendar, Date, DayCountConvention, WeekendCalendar};

/// Direction in which unadjusted period boundaries are rolled out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DateGeneration {
    /// From the start date; any stub is at the back.
    #[default]
    Forward,
    /// From the end date; any stub is at the front.
    Backward,
}

/// A collection of payment periods for financial instruments.
///
/// # Examples
///
/// ```
/// use pricer_models::schedules::{Frequency, ScheduleBuilder};
/// use pricer_core::types::{Date, DayCountConvention};
///
/// let schedule = ScheduleBuilder::new()
///     .start(Date::from_ymd(2024, 1, 15).unwrap())
///     .end(Date::from_ymd(2026, 1, 15).unwrap())
///     .frequency(Frequency::SemiAnnual)
///     .day_count(DayCountConvention::Actual360)
///     .build()
///     .unwrap();
///
/// assert_eq!(schedule.len(), 4);
/// assert_eq!(schedule.payment_dates().len(), 4);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Schedule {
    periods: Vec<Period>,
    payment_dates: Vec<Date>,
}

impl Schedule {
    /// Creates a schedule from a non-empty list of periods.
    ///
    /// # Panics
    ///
    /// Panics if periods is empty.
    pub fn new(periods: Vec<Period>) -> Self {
        assert!(
            !periods.is_empty(),
            "Schedule must have at least one period"
        );
        let payment_dates = periods.iter().map(|p| p.payment()).collect();
        Self {
            periods,
            payment_dates,
        }
    }

    /// Periods in date order.
    #[inline]
    pub fn periods(&self) -> &[Period] {
        &self.periods
    }

    /// Payment dates in date order.
    #[inline]
    pub fn payment_dates(&self) -> &[Date] {
        &self.payment_dates
    }

    /// Number of periods.
    #[inline]
    pub fn len(&self) -> usize {
        self.periods.len()
    }

    /// Always false; kept for API symmetry with `len`.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.periods.is_empty()
    }

    /// Accrual start of the first period.
    #[inline]
    pub fn start_date(&self) -> Date {
        self.periods[0].start()
    }

    /// Accrual end of the last period.
    #[inline]
    pub fn end_date(&self) -> Date {
        self.periods[self.periods.len() - 1].end()
    }

    /// Iterator over the periods.
    pub fn iter(&self) -> impl Iterator<Item = &Period> {
        self.periods.iter()
    }

    /// Sum of the accrual year fractions.
    pub fn total_year_fraction(&self) -> f64 {
        self.periods.iter().map(Period::year_fraction).sum()
    }

    /// Index of the period whose accrual interval contains `date`.
    pub fn period_index_containing(&self, date: Date) -> Option<usize> {
        self.periods.iter().position(|p| p.contains(date))
    }
}

/// Builder for constructing schedules.
///
/// Unadjusted boundaries are generated from one anchor date by whole
/// multiples of the frequency (no month-end drift), then every boundary is
/// rolled with the business-day convention. Payments fall on the adjusted
/// accrual end.
///
/// # Examples
///
/// ```
/// use pricer_models::schedules::{DateGeneration, Frequency, ScheduleBuilder};
/// use pricer_core::types::{BusinessDayConvention, Date, WeekendCalendar};
///
/// // short front stub when generating backward
/// let schedule = ScheduleBuilder::new()
///     .start(Date::from_ymd(2024, 2, 1).unwrap())
///     .end(Date::from_ymd(2025, 1, 15).unwrap())
///     .frequency(Frequency::Quarterly)
///     .generation(DateGeneration::Backward)
///     .business_day_convention(BusinessDayConvention::Following)
///     .calendar(WeekendCalendar)
///     .build()
///     .unwrap();
///
/// assert_eq!(schedule.len(), 4);
/// assert_eq!(schedule.periods()[0].end(), Date::from_ymd(2024, 4, 15).unwrap());
/// assert_eq!(schedule.start_date(), Date::from_ymd(2024, 2, 1).unwrap());
/// ```
#[derive(Clone)]
pub struct ScheduleBuilder {
    start_date: Option<Date>,
    end_date: Option<Date>,
    frequency: Option<Frequency>,
    day_count: DayCountConvention,
    convention: BusinessDayConvention,
    calendar: Arc<dyn Calendar>,
    generation: DateGeneration,
}

impl fmt::Debug for ScheduleBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ScheduleBuilder")
            .field("start_date", &self.start_date)
            .field("end_date", &self.end_date)
            .field("frequency", &self.frequency)
            .field("day_count", &self.day_count)
            .field("convention", &self.convention)
            .field("calendar", &self.calendar.name())
            .field("generation", &self.generation)
            .finish()
    }
}

impl Default for ScheduleBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl ScheduleBuilder {
    /// Creates a builder: ACT/365F, unadjusted, weekend calendar, forward.
    pub fn new() -> Self {
        Self {
            start_date: None,
            end_date: None,
            frequency: None,
            day_count: DayCountConvention::Actual365Fixed,
            convention: BusinessDayConvention::Unadjusted,
            calendar: Arc::new(WeekendCalendar),
            generation: DateGeneration::Forward,
        }
    }

    /// Sets the start date of the schedule.
    pub fn start(mut self, date: Date) -> Self {
        self.start_date = Some(date);
        self
    }

    /// Sets the end date of the schedule.
    pub fn end(mut self, date: Date) -> Self {
        self.end_date = Some(date);
        self
    }

    /// Sets the payment frequency.
    pub fn frequency(mut self, freq: Frequency) -> Self {
        self.frequency = Some(freq);
        self
    }

    /// Sets the accrual day count.
    pub fn day_count(mut self, dc: DayCountConvention) -> Self {
        self.day_count = dc;
        self
    }

    /// Sets the business-day convention applied to every boundary.
    pub fn business_day_convention(mut self, convention: BusinessDayConvention) -> Self {
        self.convention = convention;
        self
    }

    /// Sets the holiday calendar.
    pub fn calendar(mut self, calendar: impl Calendar + 'static) -> Self {
        self.calendar = Arc::new(calendar);
        self
    }

    /// Sets the generation direction.
    pub fn generation(mut self, generation: DateGeneration) -> Self {
        self.generation = generation;
        self
    }

    /// Builds the schedule.
    ///
    /// # Errors
    ///
    /// - `MissingField` if start, end or frequency is unset
    /// - `InvalidDateRange` if start is not before end
    /// - `DateOverflow` if date arithmetic leaves chrono's range
    pub fn build(self) -> Result<Schedule, ScheduleError> {
        let start = self
            .start_date
            .ok_or(ScheduleError::MissingField { field: "start" })?;
        let end = self
            .end_date
            .ok_or(ScheduleError::MissingField { field: "end" })?;
        let frequency = self
            .frequency
            .ok_or(ScheduleError::MissingField { field: "frequency" })?;

        if start >= end {
            return Err(ScheduleError::InvalidDateRange { start, end });
        }

        let boundaries = self.unadjusted_boundaries(start, end, frequency)?;
        let adjusted: Vec<Date> = boundaries
            .iter()
            .map(|&d| self.convention.adjust(d, self.calendar.as_ref()))
            .collect();

        let periods = adjusted
            .windows(2)
            .map(|w| Period::with_payment_on_end(w[0], w[1], self.day_count))
            .collect();

        Ok(Schedule::new(periods))
    }

    fn unadjusted_boundaries(
        &self,
        start: Date,
        end: Date,
        frequency: Frequency,
    ) -> Result<Vec<Date>, ScheduleError> {
        let step = frequency.months_between_payments() as i32;
        let mut dates = Vec::new();

        match self.generation {
            DateGeneration::Forward => {
                dates.push(start);
                let mut k = 1;
                loop {
                    let next = start.add_months(k * step)?;
                    if next >= end {
                        break;
                    }
                    dates.push(next);
                    k += 1;
                }
                dates.push(end);
            }
            DateGeneration::Backward => {
                dates.push(end);
                let mut k = 1;
                loop {
                    let prev = end.add_months(-k * step)?;
                    if prev <= start {
                        break;
                    }
                    dates.push(prev);
                    k += 1;
                }
                dates.push(start);
                dates.reverse();
            }
        }

        Ok(dates)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pricer_core::types::HolidayCalendar;

    fn date(y: i32, m: u32, d: u32) -> Date {
        Date::from_ymd(y, m, d).unwrap()
    }

    #[test]
    fn test_forward_back_stub() {
        let schedule = ScheduleBuilder::new()
            .start(date(2024, 1, 15))
            .end(date(2024, 12, 1))
            .frequency(Frequency::Quarterly)
            .build()
            .unwrap();
        assert_eq!(schedule.len(), 4);
        assert_eq!(schedule.periods()[3].start(), date(2024, 10, 15));
        assert_eq!(schedule.end_date(), date(2024, 12, 1));
    }

    #[test]
    fn test_backward_front_stub() {
        let schedule = ScheduleBuilder::new()
            .start(date(2024, 1, 1))
            .end(date(2024, 12, 15))
            .frequency(Frequency::SemiAnnual)
            .generation(DateGeneration::Backward)
            .build()
            .unwrap();
        let starts: Vec<Date> = schedule.iter().map(|p| p.start()).collect();
        assert_eq!(starts, vec![date(2024, 1, 1), date(2024, 6, 15)]);
    }

    #[test]
    fn test_month_end_does_not_drift() {
        let schedule = ScheduleBuilder::new()
            .start(date(2024, 1, 31))
            .end(date(2024, 7, 31))
            .frequency(Frequency::Monthly)
            .build()
            .unwrap();
        let ends: Vec<u32> = schedule.iter().map(|p| p.end().day()).collect();
        assert_eq!(ends, vec![29, 31, 30, 31, 30, 31]);
    }

    #[test]
    fn test_holiday_adjustment() {
        // 2024-07-15 is a Monday; make it a holiday
        let cal = HolidayCalendar::new("TEST", [date(2024, 7, 15)]);
        let schedule = ScheduleBuilder::new()
            .start(date(2024, 1, 15))
            .end(date(2025, 1, 15))
            .frequency(Frequency::SemiAnnual)
            .business_day_convention(BusinessDayConvention::ModifiedFollowing)
            .calendar(cal)
            .build()
            .unwrap();
        assert_eq!(schedule.payment_dates()[0], date(2024, 7, 16));
        assert_eq!(schedule.periods()[1].start(), date(2024, 7, 16));
    }

    #[test]
    fn test_invalid_range() {
        let result = ScheduleBuilder::new()
            .start(date(2024, 6, 1))
            .end(date(2024, 6, 1))
            .frequency(Frequency::Annual)
            .build();
        assert!(matches!(result, Err(ScheduleError::InvalidDateRange { .. })));
    }

    #[test]
    fn test_missing_frequency() {
        let result = ScheduleBuilder::new()
            .start(date(2024, 1, 1))
            .end(date(2025, 1, 1))
            .build();
        assert_eq!(result, Err(ScheduleError::MissingField { field: "frequency" }));
    }
}
