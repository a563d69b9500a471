//! Money-market and swap quotes for building an ISDA discount curve.

use std::collections::BTreeMap;

use super::error::MarketDataError;
use crate::types::{BusinessDayConvention, Currency, Date, DayCountConvention, HolidayCalendar, Tenor};

/// Quotes and conventions for an ISDA yield curve.
///
/// Cash and swap tenors are kept sorted and must be disjoint.
/// Rates are fractions (`0.01` is 1%).
///
/// # Example
///
/// ```
/// use pricer_core::market_data::YieldCurveData;
/// use pricer_core::types::{Currency, Date, Tenor};
///
/// let data = YieldCurveData::builder(Currency::USD, Date::from_ymd(2013, 6, 24).unwrap())
///     .cash("1M".parse().unwrap(), 0.0019)
///     .cash("3M".parse().unwrap(), 0.0027)
///     .swap("2Y".parse().unwrap(), 0.0045)
///     .swap("5Y".parse().unwrap(), 0.0141)
///     .build()
///     .unwrap();
///
/// assert_eq!(data.cash_data().len(), 2);
/// assert_eq!(data.swap_fixed_leg_interval(), Tenor::months(6));
///
/// let clash = YieldCurveData::builder(Currency::USD, Date::from_ymd(2013, 6, 24).unwrap())
///     .cash("1Y".parse().unwrap(), 0.01)
///     .swap("12M".parse().unwrap(), 0.01)
///     .build();
/// assert!(clash.is_err());
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct YieldCurveData {
    currency: Currency,
    curve_day_count: DayCountConvention,
    curve_business_day_convention: BusinessDayConvention,
    cash_day_count: DayCountConvention,
    swap_day_count: DayCountConvention,
    spot_date: Date,
    calendar: HolidayCalendar,
    swap_fixed_leg_interval: Tenor,
    cash_data: BTreeMap<Tenor, f64>,
    swap_data: BTreeMap<Tenor, f64>,
}

impl YieldCurveData {
    /// Builder with the ISDA standard conventions: ACT/365F curve,
    /// Modified Following, ACT/360 cash, 30/360 swaps, semi-annual fixed
    /// leg and a weekend-only calendar.
    pub fn builder(currency: Currency, spot_date: Date) -> YieldCurveDataBuilder {
        YieldCurveDataBuilder {
            currency,
            curve_day_count: DayCountConvention::Actual365Fixed,
            curve_business_day_convention: BusinessDayConvention::ModifiedFollowing,
            cash_day_count: DayCountConvention::Actual360,
            swap_day_count: DayCountConvention::Thirty360,
            spot_date,
            calendar: HolidayCalendar::new("MondayToFriday", []),
            swap_fixed_leg_interval: Tenor::months(6),
            cash_data: BTreeMap::new(),
            swap_data: BTreeMap::new(),
        }
    }

    /// Curve currency.
    pub fn currency(&self) -> Currency {
        self.currency
    }

    /// Day count used for curve node times.
    pub fn curve_day_count(&self) -> DayCountConvention {
        self.curve_day_count
    }

    /// Bad-day convention for instrument dates.
    pub fn curve_business_day_convention(&self) -> BusinessDayConvention {
        self.curve_business_day_convention
    }

    /// Accrual day count of money-market instruments.
    pub fn cash_day_count(&self) -> DayCountConvention {
        self.cash_day_count
    }

    /// Accrual day count of swap fixed legs.
    pub fn swap_day_count(&self) -> DayCountConvention {
        self.swap_day_count
    }

    /// Start date of every calibration instrument.
    pub fn spot_date(&self) -> Date {
        self.spot_date
    }

    /// Calendar used to adjust instrument dates.
    pub fn calendar(&self) -> &HolidayCalendar {
        &self.calendar
    }

    /// Payment interval of swap fixed legs.
    pub fn swap_fixed_leg_interval(&self) -> Tenor {
        self.swap_fixed_leg_interval
    }

    /// Money-market quotes sorted by tenor.
    pub fn cash_data(&self) -> &BTreeMap<Tenor, f64> {
        &self.cash_data
    }

    /// Par swap quotes sorted by tenor.
    pub fn swap_data(&self) -> &BTreeMap<Tenor, f64> {
        &self.swap_data
    }
}

/// Converts an annually compounded rate into a continuously compounded one.
///
/// ```
/// use pricer_core::market_data::periodic_to_continuous;
///
/// assert!((periodic_to_continuous(0.05) - 1.05f64.ln()).abs() < 1e-16);
/// ```
#[inline]
pub fn periodic_to_continuous(rate: f64) -> f64 {
    rate.ln_1p()
}

/// Builder for [`YieldCurveData`].
#[derive(Debug, Clone)]
pub struct YieldCurveDataBuilder {
    currency: Currency,
    curve_day_count: DayCountConvention,
    curve_business_day_convention: BusinessDayConvention,
    cash_day_count: DayCountConvention,
    swap_day_count: DayCountConvention,
    spot_date: Date,
    calendar: HolidayCalendar,
    swap_fixed_leg_interval: Tenor,
    cash_data: BTreeMap<Tenor, f64>,
    swap_data: BTreeMap<Tenor, f64>,
}

impl YieldCurveDataBuilder {
    /// Day count for curve node times.
    pub fn curve_day_count(mut self, dc: DayCountConvention) -> Self {
        self.curve_day_count = dc;
        self
    }

    /// Bad-day convention for instrument dates.
    pub fn curve_business_day_convention(mut self, bdc: BusinessDayConvention) -> Self {
        self.curve_business_day_convention = bdc;
        self
    }

    /// Money-market accrual day count.
    pub fn cash_day_count(mut self, dc: DayCountConvention) -> Self {
        self.cash_day_count = dc;
        self
    }

    /// Swap fixed-leg accrual day count.
    pub fn swap_day_count(mut self, dc: DayCountConvention) -> Self {
        self.swap_day_count = dc;
        self
    }

    /// Holiday calendar.
    pub fn calendar(mut self, calendar: HolidayCalendar) -> Self {
        self.calendar = calendar;
        self
    }

    /// Fixed-leg payment interval.
    pub fn swap_fixed_leg_interval(mut self, interval: Tenor) -> Self {
        self.swap_fixed_leg_interval = interval;
        self
    }

    /// Adds a money-market quote.
    pub fn cash(mut self, tenor: Tenor, rate: f64) -> Self {
        self.cash_data.insert(tenor, rate);
        self
    }

    /// Adds a par swap quote.
    pub fn swap(mut self, tenor: Tenor, rate: f64) -> Self {
        self.swap_data.insert(tenor, rate);
        self
    }

    /// Validates and finishes the data set.
    ///
    /// # Errors
    ///
    /// `InvalidData` if a tenor appears in both the cash and the swap quotes,
    /// if a rate is not finite, or if there are no quotes at all.
    pub fn build(self) -> Result<YieldCurveData, MarketDataError> {
        if self.cash_data.keys().any(|t| self.swap_data.contains_key(t)) {
            return Err(MarketDataError::InvalidData(
                "Tenors should not overlap".to_string(),
            ));
        }
        if self.cash_data.is_empty() && self.swap_data.is_empty() {
            return Err(MarketDataError::InsufficientData { got: 0, need: 1 });
        }
        if self
            .cash_data
            .values()
            .chain(self.swap_data.values())
            .any(|r| !r.is_finite())
        {
            return Err(MarketDataError::InvalidData(
                "quotes must be finite".to_string(),
            ));
        }
        Ok(YieldCurveData {
            currency: self.currency,
            curve_day_count: self.curve_day_count,
            curve_business_day_convention: self.curve_business_day_convention,
            cash_day_count: self.cash_day_count,
            swap_day_count: self.swap_day_count,
            spot_date: self.spot_date,
            calendar: self.calendar,
            swap_fixed_leg_interval: self.swap_fixed_leg_interval,
            cash_data: self.cash_data,
            swap_data: self.swap_data,
        })
    }
}
