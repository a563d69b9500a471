//! Dates and day count conventions for financial calculations.
//!
//! This module provides:
//! - `Date`: Type-safe date wrapper around chrono::NaiveDate
//! - `DayCountConvention`: ACT/360, ACT/365F and 30/360 accrual fractions
//! - `BusinessDayConvention`: Rolling rules for non-business days
//!
//! Calendar-dependent operations (business-day adjustment, business-day
//! arithmetic) live in [`crate::types::calendar`].
//!
//! # Examples
//!
//! ```
//! use pricer_core::types::time::{Date, DayCountConvention};
//!
//! let start = Date::from_ymd(2013, 6, 20).unwrap();
//! let end = Date::from_ymd(2013, 9, 20).unwrap();
//!
//! // 92 days on an ACT/360 basis
//! let yf = DayCountConvention::Actual360.year_fraction(start, end);
//! assert!((yf - 92.0 / 360.0).abs() < 1e-15);
//! ```

use chrono::{Datelike, Duration, Months, NaiveDate, Weekday};
use std::fmt;
use std::ops::Sub;
use std::str::FromStr;

use super::error::DateError;

/// Type-safe date wrapper around chrono::NaiveDate.
///
/// # Examples
///
/// ```
/// use pricer_core::types::time::Date;
///
/// let date = Date::from_ymd(2013, 6, 20).unwrap();
/// assert_eq!(date.year(), 2013);
///
/// let parsed: Date = "2013-06-20".parse().unwrap();
/// assert_eq!(date, parsed);
///
/// let next = date.add_days(1);
/// assert_eq!(next - date, 1);
/// ```
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct Date(NaiveDate);

impl Date {
    /// Creates a Date from year, month, and day components.
    ///
    /// # Returns
    /// `Ok(Date)` if the date is valid, `Err(DateError::InvalidDate)` otherwise.
    ///
    /// # Examples
    ///
    /// ```
    /// use pricer_core::types::time::Date;
    ///
    /// assert!(Date::from_ymd(2024, 2, 29).is_ok());
    /// assert!(Date::from_ymd(2023, 2, 29).is_err());
    /// ```
    pub fn from_ymd(year: i32, month: u32, day: u32) -> Result<Self, DateError> {
        NaiveDate::from_ymd_opt(year, month, day)
            .map(Date)
            .ok_or(DateError::InvalidDate { year, month, day })
    }

    /// Parses a date from ISO 8601 format string (YYYY-MM-DD).
    ///
    /// # Examples
    ///
    /// ```
    /// use pricer_core::types::time::Date;
    ///
    /// let date = Date::parse("2018-06-20").unwrap();
    /// assert_eq!(date.month(), 6);
    ///
    /// assert!(Date::parse("20/06/2018").is_err());
    /// ```
    pub fn parse(s: &str) -> Result<Self, DateError> {
        NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d")
            .map(Date)
            .map_err(|e| DateError::ParseError(format!("{}: {}", s, e)))
    }

    /// Returns the underlying NaiveDate.
    #[inline]
    pub fn into_inner(self) -> NaiveDate {
        self.0
    }

    /// Returns the year component.
    #[inline]
    pub fn year(&self) -> i32 {
        self.0.year()
    }

    /// Returns the month component (1-12).
    #[inline]
    pub fn month(&self) -> u32 {
        self.0.month()
    }

    /// Returns the day-of-month component (1-31).
    #[inline]
    pub fn day(&self) -> u32 {
        self.0.day()
    }

    /// Returns the day of the week.
    #[inline]
    pub fn weekday(&self) -> Weekday {
        self.0.weekday()
    }

    /// Returns true on Saturdays and Sundays.
    #[inline]
    pub fn is_weekend(&self) -> bool {
        matches!(self.weekday(), Weekday::Sat | Weekday::Sun)
    }

    /// Adds a (possibly negative) number of calendar days.
    ///
    /// # Panics
    ///
    /// Panics if the result falls outside chrono's supported range
    /// (roughly ±262,000 years).
    #[inline]
    pub fn add_days(self, days: i64) -> Self {
        Date(self.0 + Duration::days(days))
    }

    /// Adds a (possibly negative) number of calendar months.
    ///
    /// The day of month is clamped to the end of the target month,
    /// so 31 January plus one month is the last day of February.
    ///
    /// # Examples
    ///
    /// ```
    /// use pricer_core::types::time::Date;
    ///
    /// let d = Date::from_ymd(2024, 1, 31).unwrap();
    /// assert_eq!(d.add_months(1).unwrap(), Date::from_ymd(2024, 2, 29).unwrap());
    /// assert_eq!(d.add_months(-2).unwrap(), Date::from_ymd(2023, 11, 30).unwrap());
    /// ```
    pub fn add_months(self, months: i32) -> Result<Self, DateError> {
        let shifted = if months >= 0 {
            self.0.checked_add_months(Months::new(months as u32))
        } else {
            self.0.checked_sub_months(Months::new(months.unsigned_abs()))
        };
        shifted
            .map(Date)
            .ok_or_else(|| DateError::Overflow(format!("{} + {} months", self, months)))
    }

    /// Adds a (possibly negative) number of years, clamping 29 February.
    pub fn add_years(self, years: i32) -> Result<Self, DateError> {
        self.add_months(years * 12)
    }
}

impl Sub for Date {
    type Output = i64;

    /// Returns the number of calendar days from `other` to `self`.
    fn sub(self, other: Self) -> Self::Output {
        (self.0 - other.0).num_days()
    }
}

impl FromStr for Date {
    type Err = DateError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Date::parse(s)
    }
}

impl fmt::Display for Date {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format("%Y-%m-%d"))
    }
}

impl From<NaiveDate> for Date {
    fn from(date: NaiveDate) -> Self {
        Date(date)
    }
}

/// Day count convention for accrual and curve time calculations.
///
/// # Variants
///
/// - `Actual360`: actual days / 360 (money market, CDS premium leg)
/// - `Actual365Fixed`: actual days / 365 (ISDA curve time)
/// - `Thirty360`: 30/360 US bond basis
///
/// # Examples
///
/// ```
/// use pricer_core::types::time::DayCountConvention;
///
/// let dc: DayCountConvention = "ACT/365F".parse().unwrap();
/// assert_eq!(dc, DayCountConvention::Actual365Fixed);
/// assert_eq!(dc.name(), "ACT/365F");
/// ```
#[non_exhaustive]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DayCountConvention {
    /// Actual days divided by 360.
    Actual360,

    /// Actual days divided by 365, ignoring leap years.
    Actual365Fixed,

    /// 30/360 US bond basis.
    Thirty360,
}

impl DayCountConvention {
    /// Returns the market name of the convention.
    #[inline]
    pub fn name(&self) -> &'static str {
        match self {
            DayCountConvention::Actual360 => "ACT/360",
            DayCountConvention::Actual365Fixed => "ACT/365F",
            DayCountConvention::Thirty360 => "30/360",
        }
    }

    /// Calculates the year fraction between two dates.
    ///
    /// Returns a negative value when `start > end`.
    ///
    /// # Examples
    ///
    /// ```
    /// use pricer_core::types::time::{Date, DayCountConvention};
    ///
    /// let start = Date::from_ymd(2024, 1, 15).unwrap();
    /// let end = Date::from_ymd(2024, 7, 15).unwrap();
    ///
    /// assert!((DayCountConvention::Thirty360.year_fraction(start, end) - 0.5).abs() < 1e-15);
    /// assert!(DayCountConvention::Actual360.year_fraction(end, start) < 0.0);
    /// ```
    pub fn year_fraction(&self, start: Date, end: Date) -> f64 {
        match self {
            DayCountConvention::Actual360 => (end - start) as f64 / 360.0,
            DayCountConvention::Actual365Fixed => (end - start) as f64 / 365.0,
            DayCountConvention::Thirty360 => {
                let (lo, hi, sign) = if start <= end {
                    (start, end, 1.0)
                } else {
                    (end, start, -1.0)
                };

                let d1 = if lo.day() == 31 { 30 } else { lo.day() as i64 };
                let d2 = if hi.day() == 31 && d1 == 30 {
                    30
                } else {
                    hi.day() as i64
                };

                let days = 360 * (hi.year() - lo.year()) as i64
                    + 30 * (hi.month() as i64 - lo.month() as i64)
                    + (d2 - d1);
                sign * days as f64 / 360.0
            }
        }
    }
}

impl FromStr for DayCountConvention {
    type Err = DateError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().replace(' ', "").as_str() {
            "ACT/360" | "ACTUAL/360" | "A360" => Ok(DayCountConvention::Actual360),
            "ACT/365F" | "ACT/365" | "ACTUAL/365" | "ACTUAL/365FIXED" | "A365F" => {
                Ok(DayCountConvention::Actual365Fixed)
            }
            "30/360" | "30U/360" | "THIRTY360" => Ok(DayCountConvention::Thirty360),
            _ => Err(DateError::ParseError(format!(
                "unknown day count convention: {}",
                s
            ))),
        }
    }
}

impl fmt::Display for DayCountConvention {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

#[cfg(feature = "serde")]
mod serde_impl {
    use super::{BusinessDayConvention, DayCountConvention};
    use serde::{de, Deserialize, Deserializer, Serialize, Serializer};
    use std::str::FromStr;

    impl Serialize for DayCountConvention {
        fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
        where
            S: Serializer,
        {
            serializer.serialize_str(self.name())
        }
    }

    impl<'de> Deserialize<'de> for DayCountConvention {
        fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
        where
            D: Deserializer<'de>,
        {
            let s = String::deserialize(deserializer)?;
            DayCountConvention::from_str(&s).map_err(de::Error::custom)
        }
    }

    impl Serialize for BusinessDayConvention {
        fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
        where
            S: Serializer,
        {
            serializer.serialize_str(self.name())
        }
    }

    impl<'de> Deserialize<'de> for BusinessDayConvention {
        fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
        where
            D: Deserializer<'de>,
        {
            let s = String::deserialize(deserializer)?;
            BusinessDayConvention::from_str(&s).map_err(de::Error::custom)
        }
    }
}

/// Business day convention for rolling dates off non-business days.
///
/// The rolling itself needs a calendar, see
/// [`BusinessDayConvention::adjust`](crate::types::calendar).
///
/// # Examples
///
/// ```
/// use pricer_core::types::time::BusinessDayConvention;
///
/// let conv: BusinessDayConvention = "MF".parse().unwrap();
/// assert_eq!(conv, BusinessDayConvention::ModifiedFollowing);
/// ```
#[non_exhaustive]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BusinessDayConvention {
    /// Move forward to the next business day.
    Following,

    /// Move forward unless that crosses a month end, in which case move back.
    ModifiedFollowing,

    /// Move back to the previous business day.
    Preceding,

    /// Move back unless that crosses a month start, in which case move forward.
    ModifiedPreceding,

    /// Leave the date unchanged.
    Unadjusted,
}

impl BusinessDayConvention {
    /// Returns the human-readable name of the convention.
    #[inline]
    pub fn name(&self) -> &'static str {
        match self {
            BusinessDayConvention::Following => "Following",
            BusinessDayConvention::ModifiedFollowing => "Modified Following",
            BusinessDayConvention::Preceding => "Preceding",
            BusinessDayConvention::ModifiedPreceding => "Modified Preceding",
            BusinessDayConvention::Unadjusted => "Unadjusted",
        }
    }

    /// Returns the short market code of the convention.
    #[inline]
    pub fn code(&self) -> &'static str {
        match self {
            BusinessDayConvention::Following => "F",
            BusinessDayConvention::ModifiedFollowing => "MF",
            BusinessDayConvention::Preceding => "P",
            BusinessDayConvention::ModifiedPreceding => "MP",
            BusinessDayConvention::Unadjusted => "U",
        }
    }
}

impl fmt::Display for BusinessDayConvention {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for BusinessDayConvention {
    type Err = DateError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().replace([' ', '_', '-'], "").as_str() {
            "following" | "f" => Ok(BusinessDayConvention::Following),
            "modifiedfollowing" | "mf" => Ok(BusinessDayConvention::ModifiedFollowing),
            "preceding" | "p" => Ok(BusinessDayConvention::Preceding),
            "modifiedpreceding" | "mp" => Ok(BusinessDayConvention::ModifiedPreceding),
            "unadjusted" | "none" | "u" => Ok(BusinessDayConvention::Unadjusted),
            _ => Err(DateError::ParseError(format!(
                "unknown business day convention: {}",
                s
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn date(y: i32, m: u32, d: u32) -> Date {
        Date::from_ymd(y, m, d).unwrap()
    }

    // ========================================
    // Date Tests
    // ========================================

    #[test]
    fn test_date_parse_and_display() {
        let d = Date::parse("2013-06-20").unwrap();
        assert_eq!(d, date(2013, 6, 20));
        assert_eq!(d.to_string(), "2013-06-20");
    }

    #[test]
    fn test_date_parse_invalid() {
        assert!(Date::parse("2013-13-01").is_err());
        assert!(matches!(
            Date::parse("garbage"),
            Err(DateError::ParseError(_))
        ));
    }

    #[test]
    fn test_date_subtraction() {
        assert_eq!(date(2013, 6, 21) - date(2013, 6, 20), 1);
        assert_eq!(date(2013, 6, 20) - date(2013, 6, 21), -1);
        assert_eq!(date(2018, 6, 20) - date(2013, 6, 20), 1826);
    }

    #[test]
    fn test_weekend_detection() {
        // 2013-06-22 is a Saturday
        assert!(date(2013, 6, 22).is_weekend());
        assert!(date(2013, 6, 23).is_weekend());
        assert!(!date(2013, 6, 24).is_weekend());
    }

    #[test]
    fn test_add_months_clamps_to_month_end() {
        assert_eq!(date(2013, 8, 31).add_months(1).unwrap(), date(2013, 9, 30));
        assert_eq!(date(2018, 6, 20).add_months(-3).unwrap(), date(2018, 3, 20));
    }

    #[test]
    fn test_add_years_leap_day() {
        assert_eq!(date(2016, 2, 29).add_years(1).unwrap(), date(2017, 2, 28));
        assert_eq!(date(2018, 6, 20).add_years(-20).unwrap(), date(1998, 6, 20));
    }

    // ========================================
    // DayCountConvention Tests
    // ========================================

    #[test]
    fn test_actual_360() {
        let yf = DayCountConvention::Actual360.year_fraction(date(2013, 6, 20), date(2013, 9, 20));
        assert_relative_eq!(yf, 92.0 / 360.0, epsilon = 1e-15);
    }

    #[test]
    fn test_actual_365_fixed_ignores_leap_years() {
        let yf = DayCountConvention::Actual365Fixed
            .year_fraction(date(2024, 1, 1), date(2025, 1, 1));
        assert_relative_eq!(yf, 366.0 / 365.0, epsilon = 1e-15);
    }

    #[test]
    fn test_thirty_360_end_of_month() {
        let yf = DayCountConvention::Thirty360.year_fraction(date(2024, 1, 31), date(2024, 3, 31));
        assert_relative_eq!(yf, 60.0 / 360.0, epsilon = 1e-15);
    }

    #[test]
    fn test_year_fraction_negative_when_reversed() {
        for dc in [
            DayCountConvention::Actual360,
            DayCountConvention::Actual365Fixed,
            DayCountConvention::Thirty360,
        ] {
            let fwd = dc.year_fraction(date(2020, 3, 15), date(2021, 8, 31));
            let bwd = dc.year_fraction(date(2021, 8, 31), date(2020, 3, 15));
            assert_relative_eq!(fwd, -bwd, epsilon = 1e-15);
        }
    }

    #[test]
    fn test_day_count_parsing() {
        assert_eq!(
            "Actual/360".parse::<DayCountConvention>().unwrap(),
            DayCountConvention::Actual360
        );
        assert_eq!(
            "act/365".parse::<DayCountConvention>().unwrap(),
            DayCountConvention::Actual365Fixed
        );
        assert!("ACT/ACT".parse::<DayCountConvention>().is_err());
    }

    #[test]
    fn test_bdc_parsing() {
        assert_eq!(
            "Modified Following".parse::<BusinessDayConvention>().unwrap(),
            BusinessDayConvention::ModifiedFollowing
        );
        assert_eq!(
            "f".parse::<BusinessDayConvention>().unwrap(),
            BusinessDayConvention::Following
        );
        assert!("nearest".parse::<BusinessDayConvention>().is_err());
    }

    #[cfg(feature = "serde")]
    mod serde_tests {
        use super::*;

        #[test]
        fn test_date_serde_roundtrip() {
            let d = date(2013, 6, 20);
            let json = serde_json::to_string(&d).unwrap();
            assert_eq!(json, "\"2013-06-20\"");
            let parsed: Date = serde_json::from_str(&json).unwrap();
            assert_eq!(parsed, d);
        }

        #[test]
        fn test_dcc_serde_uses_market_name() {
            let json = serde_json::to_string(&DayCountConvention::Actual360).unwrap();
            assert_eq!(json, "\"ACT/360\"");
            let parsed: DayCountConvention = serde_json::from_str("\"ACT/365F\"").unwrap();
            assert_eq!(parsed, DayCountConvention::Actual365Fixed);
        }

        #[test]
        fn test_bdc_serde_roundtrip() {
            let json = serde_json::to_string(&BusinessDayConvention::Following).unwrap();
            let parsed: BusinessDayConvention = serde_json::from_str(&json).unwrap();
            assert_eq!(parsed, BusinessDayConvention::Following);
        }
    }

    mod property_tests {
        use super::*;
        use proptest::prelude::*;

        fn date_strategy() -> impl Strategy<Value = Date> {
            (1990i32..2060, 1u32..=12, 1u32..=28).prop_map(|(y, m, d)| date(y, m, d))
        }

        proptest! {
            #![proptest_config(ProptestConfig::with_cases(500))]

            #[test]
            fn test_actual_conventions_are_additive(
                a in date_strategy(),
                b in date_strategy(),
                c in date_strategy(),
            ) {
                for dc in [DayCountConvention::Actual360, DayCountConvention::Actual365Fixed] {
                    let whole = dc.year_fraction(a, c);
                    let split = dc.year_fraction(a, b) + dc.year_fraction(b, c);
                    prop_assert!((whole - split).abs() < 1e-12);
                }
            }

            #[test]
            fn test_add_months_round_trip_on_safe_days(
                d in date_strategy(),
                months in -240i32..240,
            ) {
                // Days 1..=28 exist in every month, so no clamping occurs.
                let there = d.add_months(months).unwrap();
                let back = there.add_months(-months).unwrap();
                prop_assert_eq!(back, d);
            }
        }
    }
}
